//! `[panel]` settings with caller-declared types. Dotted names address
//! nested tables (`bottom.enabled` is `[panel.bottom] enabled`).

use std::fmt;
use std::str::FromStr;

use toml::{Table, Value};

use crate::document::{remove_ordered, replace_in_place, Document};
use crate::error::{Result, SettingsError};
use crate::status::Outcome;

pub const SECTION: &str = "panel";

/// Type a panel value is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelValueType {
    Boolean,
    Integer,
    Float,
    String,
}

impl FromStr for PanelValueType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(PanelValueType::Boolean),
            "integer" | "int" => Ok(PanelValueType::Integer),
            "float" => Ok(PanelValueType::Float),
            "string" | "str" => Ok(PanelValueType::String),
            other => Err(SettingsError::validation(
                "type",
                format!("unknown type '{other}' (expected boolean, integer, float or string)"),
            )),
        }
    }
}

impl fmt::Display for PanelValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelValueType::Boolean => "boolean",
            PanelValueType::Integer => "integer",
            PanelValueType::Float => "float",
            PanelValueType::String => "string",
        };
        f.write_str(name)
    }
}

/// Convert submitted text to a TOML value of the declared type. Numbers and
/// booleans are trimmed first; strings are stored verbatim.
pub fn coerce(raw: &str, value_type: PanelValueType) -> Result<Value> {
    let invalid = || {
        SettingsError::validation(
            "value",
            format!("'{raw}' is not a valid {value_type}"),
        )
    };
    let trimmed = raw.trim();
    match value_type {
        PanelValueType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Boolean(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Boolean(false)),
            _ => Err(invalid()),
        },
        PanelValueType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid()),
        PanelValueType::Float => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid()),
        PanelValueType::String => Ok(Value::String(raw.to_string())),
    }
}

/// Settings sorted by name. Nested tables such as `[panel.bottom]` are
/// flattened to dotted names (`bottom.enabled`).
pub fn settings(doc: &Document) -> Vec<(String, Value)> {
    let mut settings = Vec::new();
    if let Some(panel) = doc.table(SECTION) {
        flatten("", panel, &mut settings);
    }
    settings.sort_by(|(a, _), (b, _)| a.cmp(b));
    settings
}

fn flatten(prefix: &str, table: &Table, out: &mut Vec<(String, Value)>) {
    for (key, value) in table {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(nested) => flatten(&name, nested, out),
            other => out.push((name, other.clone())),
        }
    }
}

/// Split a setting name on `.` into its path below `[panel]`.
fn setting_path(name: &str) -> Result<Vec<&str>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SettingsError::validation("name", "is required"));
    }
    let path: Vec<&str> = name.split('.').map(str::trim).collect();
    if path.iter().any(|part| part.is_empty()) {
        return Err(SettingsError::validation(
            "name",
            format!("'{name}' has an empty path segment"),
        ));
    }
    Ok(path)
}

/// Descend through `parents`, creating missing tables. A scalar in the way
/// is refused.
fn nested_table_mut<'a>(mut table: &'a mut Table, parents: &[&str]) -> Result<&'a mut Table> {
    for (depth, part) in parents.iter().enumerate() {
        let entry = table
            .entry(part.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        table = match entry {
            Value::Table(nested) => nested,
            other => {
                return Err(SettingsError::validation(
                    parents[..=depth].join("."),
                    format!("is a {}, not a table", other.type_str()),
                ))
            }
        };
    }
    Ok(table)
}

/// Remove the value at `path`, dropping tables the removal leaves empty.
fn remove_path(table: &mut Table, path: &[&str]) -> Option<Value> {
    match path {
        [] => None,
        [leaf] => remove_ordered(table, leaf),
        [head, rest @ ..] => {
            let nested = table.get_mut(*head)?.as_table_mut()?;
            let removed = remove_path(nested, rest)?;
            if nested.is_empty() {
                remove_ordered(table, head);
            }
            Some(removed)
        }
    }
}

pub fn set_value(
    doc: &mut Document,
    name: &str,
    raw: &str,
    value_type: PanelValueType,
) -> Result<Outcome> {
    let path = setting_path(name)?;
    let value = coerce(raw, value_type)?;
    let Some((leaf, parents)) = path.split_last() else {
        return Err(SettingsError::validation("name", "is required"));
    };
    let table = nested_table_mut(doc.table_mut(SECTION)?, parents)?;
    replace_in_place(table, leaf, value);
    Ok(Outcome::success("Setting added!"))
}

/// Remove a setting by its dotted name. A key written literally with dots
/// (`"bottom.enabled" = true`) is matched when no nested path exists.
pub fn delete_value(doc: &mut Document, name: &str) -> Result<Outcome> {
    let path = setting_path(name)?;
    let Some(panel) = doc.root_mut().get_mut(SECTION).and_then(Value::as_table_mut) else {
        return Err(SettingsError::not_found("panel setting", name));
    };
    let removed = remove_path(panel, &path).or_else(|| remove_ordered(panel, name.trim()));
    if removed.is_none() {
        return Err(SettingsError::not_found("panel setting", name));
    }
    Ok(Outcome::success(format!("Setting \"{name}\" deleted!")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_boolean() {
        assert_eq!(coerce("True", PanelValueType::Boolean).unwrap(), Value::Boolean(true));
        assert_eq!(coerce(" off ", PanelValueType::Boolean).unwrap(), Value::Boolean(false));
        assert!(coerce("maybe", PanelValueType::Boolean).is_err());
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce("42", PanelValueType::Integer).unwrap(), Value::Integer(42));
        assert_eq!(coerce("-3", PanelValueType::Integer).unwrap(), Value::Integer(-3));
        let err = coerce("forty", PanelValueType::Integer).unwrap_err();
        assert_eq!(err.to_string(), "invalid value: 'forty' is not a valid integer");
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce("0.75", PanelValueType::Float).unwrap(), Value::Float(0.75));
        assert_eq!(coerce("2", PanelValueType::Float).unwrap(), Value::Float(2.0));
        assert!(coerce("", PanelValueType::Float).is_err());
    }

    #[test]
    fn test_coerce_string_is_verbatim() {
        assert_eq!(
            coerce(" 42 ", PanelValueType::String).unwrap(),
            Value::String(" 42 ".into())
        );
    }

    #[test]
    fn test_value_type_from_str() {
        assert_eq!("int".parse::<PanelValueType>().unwrap(), PanelValueType::Integer);
        assert_eq!("Boolean".parse::<PanelValueType>().unwrap(), PanelValueType::Boolean);
        assert!("list".parse::<PanelValueType>().is_err());
    }

    #[test]
    fn test_set_value_overwrites_type() {
        let mut doc = Document::default();
        set_value(&mut doc, "height", "32", PanelValueType::Integer).unwrap();
        set_value(&mut doc, "height", "32.5", PanelValueType::Float).unwrap();
        assert_eq!(settings(&doc), vec![("height".to_string(), Value::Float(32.5))]);
    }

    #[test]
    fn test_set_value_failure_leaves_document() {
        let mut doc = Document::default();
        let before = doc.clone();
        assert!(set_value(&mut doc, "height", "tall", PanelValueType::Integer).is_err());
        assert!(set_value(&mut doc, "  ", "1", PanelValueType::Integer).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_settings_sorted_by_name() {
        let mut doc = Document::default();
        set_value(&mut doc, "position", "top", PanelValueType::String).unwrap();
        set_value(&mut doc, "autohide", "no", PanelValueType::Boolean).unwrap();
        let names: Vec<_> = settings(&doc).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["autohide", "position"]);
    }

    #[test]
    fn test_delete_value() {
        let mut doc = Document::default();
        set_value(&mut doc, "height", "32", PanelValueType::Integer).unwrap();
        delete_value(&mut doc, "height").unwrap();
        assert!(settings(&doc).is_empty());
        assert!(matches!(
            delete_value(&mut doc, "height"),
            Err(SettingsError::NotFound { .. })
        ));
    }

    fn nested_doc() -> Document {
        Document::parse("[panel]\nheight = 32\n\n[panel.bottom]\nenabled = true\nsize = 24\n").unwrap()
    }

    #[test]
    fn test_set_dotted_name_updates_nested_table() {
        let mut doc = nested_doc();
        set_value(&mut doc, "bottom.enabled", "false", PanelValueType::Boolean).unwrap();

        let panel = doc.table(SECTION).unwrap();
        assert!(!panel.contains_key("bottom.enabled"));
        let bottom = panel["bottom"].as_table().unwrap();
        assert_eq!(bottom["enabled"], Value::Boolean(false));
        let keys: Vec<_> = bottom.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["enabled", "size"]);
    }

    #[test]
    fn test_set_dotted_name_creates_tables() {
        let mut doc = Document::default();
        set_value(&mut doc, "top.clock.format", "%H:%M", PanelValueType::String).unwrap();
        let rendered = doc.to_toml_string().unwrap();
        assert!(rendered.contains("[panel.top.clock]"), "{rendered}");
        assert!(rendered.contains("format = \"%H:%M\""), "{rendered}");
    }

    #[test]
    fn test_set_dotted_name_through_scalar_fails() {
        let mut doc = nested_doc();
        let before = doc.clone();
        let err = set_value(&mut doc, "height.value", "1", PanelValueType::Integer).unwrap_err();
        assert!(matches!(err, SettingsError::Validation { .. }));
        assert!(set_value(&mut doc, "bottom..size", "1", PanelValueType::Integer).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_settings_flatten_nested_tables() {
        let doc = nested_doc();
        assert_eq!(
            settings(&doc),
            vec![
                ("bottom.enabled".to_string(), Value::Boolean(true)),
                ("bottom.size".to_string(), Value::Integer(24)),
                ("height".to_string(), Value::Integer(32)),
            ]
        );
    }

    #[test]
    fn test_delete_dotted_name_drops_empty_table() {
        let mut doc = nested_doc();
        delete_value(&mut doc, "bottom.size").unwrap();
        assert!(doc.table(SECTION).unwrap()["bottom"].as_table().is_some());

        delete_value(&mut doc, "bottom.enabled").unwrap();
        let names: Vec<_> = doc.table(SECTION).unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["height"]);
        assert!(matches!(
            delete_value(&mut doc, "bottom.enabled"),
            Err(SettingsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_literal_dotted_key() {
        let mut doc = Document::parse("[panel]\n\"bottom.enabled\" = true\n").unwrap();
        delete_value(&mut doc, "bottom.enabled").unwrap();
        assert!(doc.table(SECTION).unwrap().is_empty());
    }
}
