//! `[dockbar.<id>]` launcher entries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::{records, required, to_value};
use crate::document::{remove_ordered, replace_in_place, Document};
use crate::error::{Result, SettingsError};
use crate::status::Outcome;

pub const SECTION: &str = "dockbar";

/// Raw field set as submitted by a caller.
#[derive(Debug, Clone, Default)]
pub struct DockbarFields {
    pub cmd: Option<String>,
    pub icon: Option<String>,
    pub wclass: Option<String>,
    pub desktop_file: Option<String>,
    pub name: Option<String>,
    pub initial_title: Option<String>,
}

/// One dockbar entry as stored in the document. Field order is the order
/// keys are written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockbarEntry {
    pub cmd: String,
    pub icon: String,
    /// Window class used to match running windows
    #[serde(default)]
    pub wclass: String,
    #[serde(default)]
    pub desktop_file: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_title: Option<String>,
}

impl DockbarEntry {
    pub fn from_fields(fields: DockbarFields) -> Result<Self> {
        Ok(Self {
            cmd: required("cmd", fields.cmd)?,
            icon: required("icon", fields.icon)?,
            wclass: fields.wclass.unwrap_or_default(),
            desktop_file: fields.desktop_file.unwrap_or_default(),
            name: required("name", fields.name)?,
            initial_title: fields.initial_title,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(SettingsError::validation(
                "direction",
                format!("expected 'up' or 'down', got '{other}'"),
            )),
        }
    }
}

/// Entries in dock order.
pub fn entries(doc: &Document) -> Vec<(String, DockbarEntry)> {
    doc.table(SECTION)
        .map(|table| records(SECTION, table))
        .unwrap_or_default()
}

fn existing<'a>(doc: &'a mut Document, id: &str) -> Result<&'a mut Table> {
    if !doc.table(SECTION).is_some_and(|table| table.contains_key(id)) {
        return Err(SettingsError::not_found("dockbar entry", id));
    }
    doc.table_mut(SECTION)
}

/// Insert `entry` under `key`, silently replacing an entry with the same key.
pub fn add(doc: &mut Document, key: &str, entry: &DockbarEntry) -> Result<Outcome> {
    if key.is_empty() {
        return Err(SettingsError::validation("id", "is required"));
    }
    let value = to_value(entry)?;
    replace_in_place(doc.table_mut(SECTION)?, key, value);
    Ok(Outcome::success(format!("Added {}", entry.name)))
}

/// Replace the whole entry at `id`, keeping its position.
pub fn edit(doc: &mut Document, id: &str, entry: &DockbarEntry) -> Result<Outcome> {
    let value = to_value(entry)?;
    replace_in_place(existing(doc, id)?, id, value);
    Ok(Outcome::success(format!("Updated {id}")))
}

pub fn delete(doc: &mut Document, id: &str) -> Result<Outcome> {
    remove_ordered(existing(doc, id)?, id);
    Ok(Outcome::success(format!("Deleted {id}")))
}

/// Swap `id` with its neighbour. Moving past either end is reported as
/// [`Status::Info`](crate::Status::Info) and leaves the document untouched.
pub fn move_entry(doc: &mut Document, id: &str, direction: Direction) -> Result<Outcome> {
    let dockbar = existing(doc, id)?;
    let len = dockbar.len();
    let index = dockbar
        .keys()
        .position(|key| key == id)
        .ok_or_else(|| SettingsError::not_found("dockbar entry", id))?;

    let neighbour = match direction {
        Direction::Up if index == 0 => return Ok(Outcome::info("Already at top")),
        Direction::Down if index + 1 >= len => return Ok(Outcome::info("Already at bottom")),
        Direction::Up => index - 1,
        Direction::Down => index + 1,
    };

    let mut ordered: Vec<(String, Value)> = std::mem::take(dockbar).into_iter().collect();
    ordered.swap(index, neighbour);
    *dockbar = ordered.into_iter().collect();
    Ok(Outcome::success(format!("Moved {id} {direction}")))
}
