//! In-memory model of `waypanel.toml`.
//!
//! This module provides:
//! - [`Document`], an insertion-ordered tree of TOML tables
//! - [`DocumentStore`], loading and atomically saving the document
//! - Item list normalization for `item_<n>` keyed and array-of-tables submenus
//! - Orphan pruning of empty dotted sections

pub mod items;
pub mod prune;
mod store;

pub use items::{extract_items, next_item_key, to_keyed_map, ItemList};
pub use prune::{prune_empty_menu_entries, prune_orphans, PROTECTED_SECTIONS};
pub use store::DocumentStore;

use toml::{Table, Value};

use crate::error::{Result, SettingsError};

/// Parsed configuration document. Key order follows the source file, with
/// new keys appended at the end of their table.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Table,
}

impl Default for Document {
    /// Document used when no configuration file exists yet.
    fn default() -> Self {
        let mut root = Table::new();
        for name in PROTECTED_SECTIONS {
            root.insert(name.to_string(), Value::Table(Table::new()));
        }
        if let Some(Value::Table(menu)) = root.get_mut("menu") {
            menu.insert("icons".to_string(), Value::Table(Table::new()));
        }
        Self { root }
    }
}

impl Document {
    pub fn from_table(root: Table) -> Self {
        Self { root }
    }

    /// Parse TOML text. Errors are returned raw so the store can attach a path.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let root: Table = toml::from_str(content)?;
        Ok(Self { root })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&self.root)?)
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Table {
        &mut self.root
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Section as a table, if present and table-shaped.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.root.get(name).and_then(Value::as_table)
    }

    /// Mutable table for `name`, created empty (and appended) when absent.
    ///
    /// A non-table value at `name` is a shape the editor cannot work with and
    /// is reported as a validation error rather than overwritten.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        let value = self
            .root
            .entry(name.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        match value {
            Value::Table(table) => Ok(table),
            other => Err(SettingsError::validation(
                name,
                format!("expected a table, found {}", other.type_str()),
            )),
        }
    }

    /// Remove a top-level section, keeping the order of the others.
    pub fn remove_section(&mut self, name: &str) -> Option<Value> {
        remove_ordered(&mut self.root, name)
    }
}

/// Remove `key` from `table` without disturbing the order of the remaining
/// entries.
pub fn remove_ordered(table: &mut Table, key: &str) -> Option<Value> {
    if !table.contains_key(key) {
        return None;
    }
    let mut removed = None;
    let kept: Table = std::mem::take(table)
        .into_iter()
        .filter_map(|(k, v)| {
            if k == key {
                removed = Some(v);
                None
            } else {
                Some((k, v))
            }
        })
        .collect();
    *table = kept;
    removed
}

/// Replace the value at `key` in place, or append it when absent.
pub fn replace_in_place(table: &mut Table, key: &str, value: Value) {
    match table.get_mut(key) {
        Some(slot) => *slot = value,
        None => {
            table.insert(key.to_string(), value);
        }
    }
}

/// Truthiness of a TOML value: empty containers, empty strings, `false`
/// and zero are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Integer(i) => *i == 0,
        Value::Float(f) => *f == 0.0,
        Value::Boolean(b) => !b,
        Value::Array(a) => a.is_empty(),
        Value::Table(t) => t.is_empty(),
        Value::Datetime(_) => false,
    }
}
