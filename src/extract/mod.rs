// Text extraction: method signatures and value-object fields

pub mod fields;
pub mod signature;

pub use fields::{extract_fields, to_snake_case};
pub use signature::extract_function_info;

/// A data-access method signature, as far as the regex could tell
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FunctionInfo {
    pub function_name: String,
    /// Return type, with a `List<..>` container unwrapped
    pub return_type: String,
    /// Parameter types in declaration order, identifiers dropped
    pub params: Vec<String>,
}

impl FunctionInfo {
    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(|p| p.as_str())
    }
}

/// Field names of one value object, in declaration order.
///
/// `snake_case_fields[i]` is always `to_snake_case(&camel_case_fields[i])`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    camel_case_fields: Vec<String>,
    snake_case_fields: Vec<String>,
}

impl FieldSet {
    pub fn from_camel(fields: Vec<String>) -> Self {
        let snake_case_fields = fields.iter().map(|f| to_snake_case(f)).collect();
        Self {
            camel_case_fields: fields,
            snake_case_fields,
        }
    }

    pub fn camel(&self) -> &[String] {
        &self.camel_case_fields
    }

    pub fn snake(&self) -> &[String] {
        &self.snake_case_fields
    }

    /// (snake, camel) pairs, index-aligned
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.snake_case_fields
            .iter()
            .zip(self.camel_case_fields.iter())
            .map(|(s, c)| (s.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.camel_case_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camel_case_fields.is_empty()
    }
}
