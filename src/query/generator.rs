// Query fragment templates
//
// Four fixed shapes, one per QueryKind. Names are interpolated verbatim: no XML
// or SQL escaping happens here.

use tracing::debug;

use super::{is_count_query, FieldSides, QueryKind};
use crate::error::{GeneratorError, Result};
use crate::extract::{FieldSet, FunctionInfo};

const INDENT: &str = "    ";

/// Markers that turn a DELETE into a flag update
const DELETE_MARKERS: [&str; 2] = ["delYn", "delete"];

/// Render the mapper fragment for one method
pub fn generate_query(info: &FunctionInfo, kind: QueryKind, sides: &FieldSides, table: &str) -> Result<String> {
    debug!("Generating {} for {} on table '{}'", kind, info.function_name, table);

    let lines = match kind {
        QueryKind::Insert => insert(info, require(sides.param.as_ref(), info.first_param())?, table),
        QueryKind::Select if is_count_query(&info.function_name) => select_count(info, table),
        QueryKind::Select => select(info, require(sides.ret.as_ref(), Some(info.return_type.as_str()))?, table),
        QueryKind::Update => update(info, require(sides.param.as_ref(), info.first_param())?, table),
        QueryKind::Delete => delete(info, require(sides.param.as_ref(), info.first_param())?, table)?,
    };

    Ok(lines.join("\n"))
}

fn require<'a>(fields: Option<&'a FieldSet>, type_name: Option<&str>) -> Result<&'a FieldSet> {
    match fields {
        Some(set) if !set.is_empty() => Ok(set),
        _ => Err(GeneratorError::NoFieldsFound(type_name.unwrap_or("<none>").to_string())),
    }
}

fn open_tag(tag: &str, info: &FunctionInfo, result_type: Option<&str>) -> String {
    let mut attrs = format!("id=\"{}\"", info.function_name);
    if let Some(param) = info.first_param() {
        attrs.push_str(&format!(" parameterType=\"{}\"", param));
    }
    if let Some(result) = result_type {
        attrs.push_str(&format!(" resultType=\"{}\"", result));
    }
    format!("{INDENT}<{tag} {attrs}>")
}

fn close_tag(tag: &str) -> String {
    format!("{INDENT}</{tag}>")
}

fn body(line: impl AsRef<str>) -> String {
    format!("{INDENT}{INDENT}{}", line.as_ref())
}

/// Join items one per line, comma after every item but the last
fn comma_lines(items: impl Iterator<Item = String>) -> Vec<String> {
    let items: Vec<String> = items.collect();
    let last = items.len().saturating_sub(1);
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| if i < last { format!("{item},") } else { item })
        .collect()
}

fn insert(info: &FunctionInfo, fields: &FieldSet, table: &str) -> Vec<String> {
    let mut lines = vec![open_tag("insert", info, None), body(format!("INSERT INTO {table} ("))];
    lines.extend(comma_lines(fields.snake().iter().map(|c| body(format!("{INDENT}{c}")))));
    lines.push(body(") VALUES ("));
    lines.extend(comma_lines(fields.camel().iter().map(|c| body(format!("{INDENT}#{{{c}}}")))));
    lines.push(body(")"));
    lines.push(close_tag("insert"));
    lines
}

fn select_count(info: &FunctionInfo, table: &str) -> Vec<String> {
    vec![
        open_tag("select", info, Some("int")),
        body("SELECT count(*)"),
        body(format!("  FROM {table}")),
        body(" WHERE 1=1"),
        close_tag("select"),
    ]
}

fn select(info: &FunctionInfo, fields: &FieldSet, table: &str) -> Vec<String> {
    let mut lines = vec![open_tag("select", info, Some(&info.return_type)), body("SELECT")];
    lines.extend(comma_lines(fields.snake().iter().map(|c| body(format!("{INDENT}{c}")))));
    lines.push(body(format!("  FROM {table}")));
    lines.push(body(" WHERE 1=1"));
    lines.push(close_tag("select"));
    lines
}

fn update(info: &FunctionInfo, fields: &FieldSet, table: &str) -> Vec<String> {
    let mut lines = vec![open_tag("update", info, None), body(format!("UPDATE {table}")), body("   SET")];
    // Every assignment keeps its trailing comma; the WHERE clause is finished by hand
    lines.extend(
        fields
            .pairs()
            .map(|(column, field)| body(format!("       {column} = #{{{field}}},"))),
    );
    lines.push(body(" WHERE 1=1"));
    lines.push(close_tag("update"));
    lines
}

fn delete(info: &FunctionInfo, fields: &FieldSet, table: &str) -> Result<Vec<String>> {
    // The flag is set under the field's own name, not its column form
    let marker = fields
        .camel()
        .iter()
        .find(|field| DELETE_MARKERS.iter().any(|m| field.contains(m)));

    if let Some(field) = marker {
        debug!("Soft delete via flag field '{}'", field);
        return Ok(vec![
            open_tag("delete", info, None),
            body(format!("UPDATE {table}")),
            body(format!("   SET {field} = 'Y'")),
            body(" WHERE 1=1"),
            close_tag("delete"),
        ]);
    }

    let (column, field) = fields
        .pairs()
        .find(|(_, field)| field.contains("Id") || *field == "id")
        .ok_or_else(|| GeneratorError::NoIdentifyingField(fields.camel().to_vec()))?;

    Ok(vec![
        open_tag("delete", info, None),
        body(format!("DELETE FROM {table} WHERE {column} = #{{{field}}}")),
        close_tag("delete"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, ret: &str, params: &[&str]) -> FunctionInfo {
        FunctionInfo {
            function_name: name.to_string(),
            return_type: ret.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn fields(names: &[&str]) -> FieldSet {
        FieldSet::from_camel(names.iter().map(|n| n.to_string()).collect())
    }

    fn param_side(names: &[&str]) -> FieldSides {
        FieldSides {
            param: Some(fields(names)),
            ret: None,
        }
    }

    #[test]
    fn test_insert() {
        let sides = param_side(&["userId", "userName", "email"]);
        let query = generate_query(&info("insertUser", "int", &["UserVO"]), QueryKind::Insert, &sides, "tb_user").unwrap();

        let expected = [
            r#"    <insert id="insertUser" parameterType="UserVO">"#,
            "        INSERT INTO tb_user (",
            "            user_id,",
            "            user_name,",
            "            email",
            "        ) VALUES (",
            "            #{userId},",
            "            #{userName},",
            "            #{email}",
            "        )",
            "    </insert>",
        ]
        .join("\n");
        assert_eq!(query, expected);
    }

    #[test]
    fn test_insert_has_one_line_per_field() {
        let names = ["a", "bCol", "cCol", "dCol"];
        let query = generate_query(&info("insertX", "int", &["XVO"]), QueryKind::Insert, &param_side(&names), "t").unwrap();

        let columns: Vec<&str> = query
            .lines()
            .skip_while(|l| !l.contains("INSERT INTO"))
            .skip(1)
            .take_while(|l| !l.contains("VALUES"))
            .collect();
        let values: Vec<&str> = query
            .lines()
            .skip_while(|l| !l.contains("VALUES"))
            .skip(1)
            .take_while(|l| l.contains("#{"))
            .collect();

        assert_eq!(columns.len(), names.len());
        assert_eq!(values.len(), names.len());
        assert!(columns[1].contains("b_col"));
        assert!(values[1].contains("#{bCol}"));
    }

    #[test]
    fn test_select_count_ignores_return_type() {
        let sides = FieldSides::default();
        let query = generate_query(
            &info("countActiveUsers", "UserVO", &["SearchVO"]),
            QueryKind::Select,
            &sides,
            "tb_user",
        )
        .unwrap();

        assert!(query.contains(r#"resultType="int""#));
        assert!(query.contains("SELECT count(*)"));
        assert!(query.contains("FROM tb_user"));
        assert!(query.contains("WHERE 1=1"));
        assert!(!query.contains("UserVO\""));
    }

    #[test]
    fn test_select_columns() {
        let sides = FieldSides {
            param: None,
            ret: Some(fields(&["userId", "userName"])),
        };
        let query = generate_query(&info("selectUserList", "UserVO", &["SearchVO"]), QueryKind::Select, &sides, "tb_user")
            .unwrap();

        let expected = [
            r#"    <select id="selectUserList" parameterType="SearchVO" resultType="UserVO">"#,
            "        SELECT",
            "            user_id,",
            "            user_name",
            "          FROM tb_user",
            "         WHERE 1=1",
            "    </select>",
        ]
        .join("\n");
        assert_eq!(query, expected);
    }

    #[test]
    fn test_select_without_params_omits_parameter_type() {
        let sides = FieldSides {
            param: None,
            ret: Some(fields(&["userId"])),
        };
        let query = generate_query(&info("selectAll", "UserVO", &[]), QueryKind::Select, &sides, "tb_user").unwrap();
        assert!(query.starts_with(r#"    <select id="selectAll" resultType="UserVO">"#));
    }

    #[test]
    fn test_update_keeps_trailing_commas() {
        let sides = param_side(&["userId", "email"]);
        let query = generate_query(&info("updateUser", "int", &["UserVO"]), QueryKind::Update, &sides, "tb_user").unwrap();

        let expected = [
            r#"    <update id="updateUser" parameterType="UserVO">"#,
            "        UPDATE tb_user",
            "           SET",
            "               user_id = #{userId},",
            "               email = #{email},",
            "         WHERE 1=1",
            "    </update>",
        ]
        .join("\n");
        assert_eq!(query, expected);
    }

    #[test]
    fn test_delete_prefers_flag_update() {
        let sides = param_side(&["delYn", "userId"]);
        let query = generate_query(&info("deleteUser", "int", &["UserVO"]), QueryKind::Delete, &sides, "tb_user").unwrap();

        assert!(query.contains("<delete id=\"deleteUser\""));
        assert!(query.contains("UPDATE tb_user"));
        assert!(query.contains("SET delYn = 'Y'"));
        assert!(query.replace(' ', "").contains("delYn='Y'"));
        assert!(!query.contains("del_yn"));
        assert!(query.contains("WHERE 1=1"));
        assert!(!query.contains("DELETE FROM"));
    }

    #[test]
    fn test_delete_marker_containing_delete() {
        let sides = param_side(&["userId", "deleteFlag"]);
        let query = generate_query(&info("removeUser", "int", &["UserVO"]), QueryKind::Delete, &sides, "tb_user").unwrap();
        assert!(query.contains("SET deleteFlag = 'Y'"));
    }

    #[test]
    fn test_delete_falls_back_to_id() {
        let sides = param_side(&["userId"]);
        let query = generate_query(&info("deleteUser", "int", &["UserVO"]), QueryKind::Delete, &sides, "tb_user").unwrap();

        assert!(query.contains("DELETE FROM tb_user WHERE user_id = #{userId}"));
        assert_eq!(query.lines().count(), 3);
    }

    #[test]
    fn test_delete_without_identifying_field() {
        let sides = param_side(&["name", "email"]);
        let err = generate_query(&info("deleteUser", "int", &["UserVO"]), QueryKind::Delete, &sides, "tb_user").unwrap_err();
        assert!(matches!(err, GeneratorError::NoIdentifyingField(ref f) if f == &["name", "email"]));
    }

    #[test]
    fn test_missing_side_is_reported() {
        let err = generate_query(
            &info("insertUser", "int", &["UserVO"]),
            QueryKind::Insert,
            &FieldSides::default(),
            "tb_user",
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::NoFieldsFound(ref t) if t == "UserVO"));
    }

    #[test]
    fn test_names_are_not_escaped() {
        let sides = param_side(&["userId"]);
        let query = generate_query(&info("deleteUser", "int", &["UserVO"]), QueryKind::Delete, &sides, "a<b").unwrap();
        assert!(query.contains("DELETE FROM a<b WHERE"));
    }
}
