//! `[folders.<id>]` bookmarks

use serde::{Deserialize, Serialize};

use super::{records, required, to_value};
use crate::document::{remove_ordered, replace_in_place, Document};
use crate::error::{Result, SettingsError};
use crate::status::Outcome;

pub const SECTION: &str = "folders";

#[derive(Debug, Clone, Default)]
pub struct FolderFields {
    pub name: Option<String>,
    pub path: Option<String>,
    pub filemanager: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderBookmark {
    pub name: String,
    pub path: String,
    pub filemanager: String,
    pub icon: String,
}

impl FolderBookmark {
    pub fn from_fields(fields: FolderFields) -> Result<Self> {
        Ok(Self {
            name: required("name", fields.name)?,
            path: required("path", fields.path)?,
            filemanager: required("filemanager", fields.filemanager)?,
            icon: required("icon", fields.icon)?,
        })
    }
}

pub fn bookmarks(doc: &Document) -> Vec<(String, FolderBookmark)> {
    doc.table(SECTION)
        .map(|table| records(SECTION, table))
        .unwrap_or_default()
}

pub fn add(doc: &mut Document, key: &str, folder: &FolderBookmark) -> Result<Outcome> {
    if key.is_empty() {
        return Err(SettingsError::validation("id", "is required"));
    }
    let value = to_value(folder)?;
    replace_in_place(doc.table_mut(SECTION)?, key, value);
    Ok(Outcome::success("Folder added"))
}

pub fn edit(doc: &mut Document, id: &str, folder: &FolderBookmark) -> Result<Outcome> {
    ensure_exists(doc, id)?;
    let value = to_value(folder)?;
    replace_in_place(doc.table_mut(SECTION)?, id, value);
    Ok(Outcome::success("Folder updated"))
}

pub fn delete(doc: &mut Document, id: &str) -> Result<Outcome> {
    ensure_exists(doc, id)?;
    remove_ordered(doc.table_mut(SECTION)?, id);
    Ok(Outcome::success("Folder deleted"))
}

fn ensure_exists(doc: &Document, id: &str) -> Result<()> {
    if doc.table(SECTION).is_some_and(|table| table.contains_key(id)) {
        Ok(())
    } else {
        Err(SettingsError::not_found("folder", id))
    }
}
