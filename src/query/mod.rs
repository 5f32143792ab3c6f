// Query kinds and fragment generation

pub mod generator;

use std::fmt;
use std::str::FromStr;

use crate::error::GeneratorError;
use crate::extract::{FieldSet, FunctionInfo};

pub use generator::generate_query;

/// The four statement shapes a fragment can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [QueryKind::Select, QueryKind::Insert, QueryKind::Update, QueryKind::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Select => "SELECT",
            QueryKind::Insert => "INSERT",
            QueryKind::Update => "UPDATE",
            QueryKind::Delete => "DELETE",
        }
    }

    /// Which value objects this kind reads fields from, given the method name
    pub fn needs(&self, info: &FunctionInfo) -> SidesNeeded {
        match self {
            QueryKind::Select if is_count_query(&info.function_name) => SidesNeeded::default(),
            QueryKind::Select => SidesNeeded { param: false, ret: true },
            QueryKind::Insert | QueryKind::Update | QueryKind::Delete => SidesNeeded { param: true, ret: false },
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELECT" => Ok(QueryKind::Select),
            "INSERT" => Ok(QueryKind::Insert),
            "UPDATE" => Ok(QueryKind::Update),
            "DELETE" => Ok(QueryKind::Delete),
            _ => Err(GeneratorError::UnknownQueryKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidesNeeded {
    pub param: bool,
    pub ret: bool,
}

/// Field sets for the parameter VO and the return VO. A side is `None`
/// when it was not looked up.
#[derive(Debug, Clone, Default)]
pub struct FieldSides {
    pub param: Option<FieldSet>,
    pub ret: Option<FieldSet>,
}

/// `countActiveUsers`, `selectcnt` and friends select `count(*)`. Case-sensitive.
pub fn is_count_query(function_name: &str) -> bool {
    function_name.contains("cnt") || function_name.contains("count")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> FunctionInfo {
        FunctionInfo {
            function_name: name.to_string(),
            return_type: "UserVO".to_string(),
            params: vec!["UserVO".to_string()],
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("select".parse::<QueryKind>().unwrap(), QueryKind::Select);
        assert_eq!(" DELETE ".parse::<QueryKind>().unwrap(), QueryKind::Delete);
        assert!(matches!("merge".parse::<QueryKind>(), Err(GeneratorError::UnknownQueryKind(_))));
        assert_eq!(QueryKind::Update.to_string(), "UPDATE");
    }

    #[test]
    fn test_sides_needed() {
        assert_eq!(QueryKind::Select.needs(&info("countActiveUsers")), SidesNeeded::default());
        assert_eq!(
            QueryKind::Select.needs(&info("selectUser")),
            SidesNeeded { param: false, ret: true }
        );
        assert_eq!(
            QueryKind::Delete.needs(&info("deleteUser")),
            SidesNeeded { param: true, ret: false }
        );
    }

    #[test]
    fn test_count_detection_is_case_sensitive() {
        assert!(is_count_query("countActiveUsers"));
        assert!(!is_count_query("selectUserCnt"));
        assert!(is_count_query("selectcnt"));
        assert!(!is_count_query("selectUserList"));
    }
}
