//! Per-section transformations of a [`Document`](crate::Document).
//!
//! Every function here mutates the in-memory tree only; loading and saving
//! is done by [`SettingsEditor`](crate::SettingsEditor).

pub mod dockbar;
pub mod folders;
pub mod menu;
pub mod panel;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use toml::{Table, Value};

use crate::error::{Result, SettingsError};

/// A required form field: absent and blank are both rejected.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SettingsError::validation(field, "is required")),
    }
}

pub(crate) fn to_value<T: Serialize>(record: &T) -> Result<Value> {
    Ok(Value::try_from(record)?)
}

/// Typed view of every table-valued entry in `table`. Entries that do not
/// match the record shape are skipped.
pub(crate) fn records<T: DeserializeOwned>(section: &str, table: &Table) -> Vec<(String, T)> {
    table
        .iter()
        .filter_map(|(key, value)| match value.clone().try_into::<T>() {
            Ok(record) => Some((key.clone(), record)),
            Err(e) => {
                warn!("Skipping malformed [{section}.{key}]: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_blank() {
        assert!(required("cmd", None).is_err());
        assert!(required("cmd", Some("   ".into())).is_err());
        assert_eq!(required("cmd", Some("foot".into())).unwrap(), "foot");
    }
}
