//! `[menu]`: submenus of positional items plus the `menu.icons` table

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::{records, required, to_value};
use crate::document::items::ItemList;
use crate::document::{remove_ordered, replace_in_place, to_keyed_map, Document};
use crate::error::{Result, SettingsError};
use crate::status::Outcome;

pub const SECTION: &str = "menu";
pub const ICONS_KEY: &str = "icons";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cmd: String,
}

impl MenuItem {
    pub fn new(name: Option<String>, cmd: Option<String>) -> Result<Self> {
        Ok(Self {
            name: required("name", name)?,
            cmd: required("cmd", cmd)?,
        })
    }
}

fn is_submenu(key: &str, value: &Value) -> bool {
    key != ICONS_KEY && matches!(value, Value::Table(_) | Value::Array(_))
}

/// Names of all submenus in document order.
pub fn submenus(doc: &Document) -> Vec<String> {
    doc.table(SECTION)
        .map(|menu| {
            menu.iter()
                .filter(|(key, value)| is_submenu(key, value))
                .map(|(key, _)| key.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn submenu<'a>(doc: &'a Document, name: &str) -> Result<&'a Value> {
    doc.table(SECTION)
        .and_then(|menu| menu.get(name))
        .filter(|value| is_submenu(name, value))
        .ok_or_else(|| SettingsError::not_found("submenu", name))
}

/// Items of a submenu in display order, whichever encoding it uses.
pub fn items(doc: &Document, name: &str) -> Result<Vec<(String, MenuItem)>> {
    let value = submenu(doc, name)?;
    let items: Vec<(String, MenuItem)> = ItemList::classify(value)
        .map(|list| {
            let keyed: Table = list
                .items()
                .into_iter()
                .map(|(key, item)| (key, Value::Table(item.clone())))
                .collect();
            records(name, &keyed)
        })
        .unwrap_or_default();
    Ok(items)
}

/// Create an empty submenu. An existing one is left alone.
pub fn add_submenu(doc: &mut Document, name: &str) -> Result<Outcome> {
    if name.is_empty() || name == ICONS_KEY {
        return Err(SettingsError::validation(
            "submenu name",
            format!("'{name}' is not a usable submenu name"),
        ));
    }
    let menu = doc.table_mut(SECTION)?;
    if menu.contains_key(name) {
        return Ok(Outcome::info(format!("Submenu \"{name}\" already exists")));
    }
    menu.insert(name.to_string(), Value::Table(Table::new()));
    Ok(Outcome::success("Submenu created"))
}

pub fn delete_submenu(doc: &mut Document, name: &str) -> Result<Outcome> {
    submenu(doc, name)?;
    remove_ordered(doc.table_mut(SECTION)?, name);
    Ok(Outcome::success(format!(
        "Submenu \"{name}\" deleted successfully"
    )))
}

/// Submenu `name` in keyed form, or an empty table when it does not exist
/// yet. A scalar under the same key is refused.
fn keyed_submenu(menu: &Table, name: &str) -> Result<Table> {
    match menu.get(name) {
        None => Ok(Table::new()),
        Some(value) if is_submenu(name, value) => Ok(to_keyed_map(value)),
        Some(other) => Err(SettingsError::validation(
            name,
            format!("is a {}, not a submenu", other.type_str()),
        )),
    }
}

/// Append an item, creating the submenu when needed. Array-of-tables
/// submenus are rewritten in keyed form.
pub fn add_item(doc: &mut Document, name: &str, item: &MenuItem) -> Result<Outcome> {
    if name.is_empty() || name == ICONS_KEY {
        return Err(SettingsError::validation("submenu name", "is required"));
    }
    let value = to_value(item)?;
    let menu = doc.table_mut(SECTION)?;
    let mut keyed = keyed_submenu(menu, name)?;
    let key = ItemList::KeyedMap(&keyed).next_key();
    keyed.insert(key, value);
    replace_in_place(menu, name, Value::Table(keyed));
    Ok(Outcome::success("Item added successfully"))
}

pub fn edit_item(doc: &mut Document, name: &str, item_key: &str, item: &MenuItem) -> Result<Outcome> {
    submenu(doc, name)?;
    let value = to_value(item)?;
    let menu = doc.table_mut(SECTION)?;
    let mut keyed = keyed_submenu(menu, name)?;
    match keyed.get_mut(item_key) {
        Some(slot) => *slot = value,
        None => return Err(SettingsError::not_found("menu item", item_key)),
    }
    replace_in_place(menu, name, Value::Table(keyed));
    Ok(Outcome::success("Item updated"))
}

/// Remove exactly `item_key`. Later items keep their numbers; a submenu
/// left empty is removed right away.
pub fn delete_item(doc: &mut Document, name: &str, item_key: &str) -> Result<Outcome> {
    submenu(doc, name)?;
    let menu = doc.table_mut(SECTION)?;
    let mut keyed = keyed_submenu(menu, name)?;
    let removed = remove_ordered(&mut keyed, item_key)
        .ok_or_else(|| SettingsError::not_found("menu item", item_key))?;

    let label = removed
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unnamed item")
        .to_string();
    if keyed.is_empty() {
        remove_ordered(menu, name);
    } else {
        replace_in_place(menu, name, Value::Table(keyed));
    }
    Ok(Outcome::success(format!("Deleted item \"{label}\" from {name}")))
}

/// `menu.icons` entries (category name to icon).
pub fn icons(doc: &Document) -> Vec<(String, String)> {
    doc.table(SECTION)
        .and_then(|menu| menu.get(ICONS_KEY))
        .and_then(Value::as_table)
        .map(|icons| {
            icons
                .iter()
                .filter_map(|(name, icon)| icon.as_str().map(|icon| (name.clone(), icon.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Replace `menu.icons` wholesale. Pairs with a blank name or icon are
/// dropped; a later duplicate name wins.
pub fn set_icons(doc: &mut Document, icons: Vec<(String, String)>) -> Result<Outcome> {
    let table: Table = icons
        .into_iter()
        .map(|(name, icon)| (name.trim().to_string(), icon.trim().to_string()))
        .filter(|(name, icon)| !name.is_empty() && !icon.is_empty())
        .map(|(name, icon)| (name, Value::String(icon)))
        .collect();
    replace_in_place(doc.table_mut(SECTION)?, ICONS_KEY, Value::Table(table));
    Ok(Outcome::success("Menu icons updated!"))
}
