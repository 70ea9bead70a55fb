//! Positional item lists.
//!
//! A submenu can be written two ways in `waypanel.toml`:
//!
//! ```toml
//! [[menu.Network]]          # array of tables
//! name = "VPN On"
//!
//! [menu.Network.item_1]     # keyed by item_<n>
//! name = "VPN On"
//! ```
//!
//! Both are read; only the keyed form is ever written.

use toml::{Table, Value};

const ITEM_PREFIX: &str = "item";
const NUMBERED_PREFIX: &str = "item_";

/// The encoding a section uses for its items, decided once per section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemList<'a> {
    Sequence(&'a [Value]),
    KeyedMap(&'a Table),
}

impl<'a> ItemList<'a> {
    /// `None` for scalars, which cannot hold items.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(ItemList::Sequence(items)),
            Value::Table(table) => Some(ItemList::KeyedMap(table)),
            _ => None,
        }
    }

    /// Items in display order, paired with the key they are (or would be)
    /// stored under.
    pub fn items(&self) -> Vec<(String, &'a Table)> {
        match *self {
            ItemList::Sequence(values) => values
                .iter()
                .filter_map(Value::as_table)
                .enumerate()
                .map(|(idx, item)| (format!("{NUMBERED_PREFIX}{}", idx + 1), item))
                .collect(),
            ItemList::KeyedMap(table) => {
                let mut items: Vec<(u64, String, &'a Table)> = table
                    .iter()
                    .filter(|(key, _)| key.starts_with(ITEM_PREFIX))
                    .filter_map(|(key, value)| value.as_table().map(|item| (key, item)))
                    .enumerate()
                    .map(|(idx, (key, item))| {
                        let order = item_number(key).unwrap_or(idx as u64 + 1);
                        (order, key.clone(), item)
                    })
                    .collect();
                // Stable, so items with equal numbers keep file order
                items.sort_by_key(|(order, _, _)| *order);
                items
                    .into_iter()
                    .map(|(_, key, item)| (key, item))
                    .collect()
            }
        }
    }

    pub fn next_key(&self) -> String {
        let next = match *self {
            ItemList::Sequence(values) => values.iter().filter(|v| v.is_table()).count() as u64 + 1,
            ItemList::KeyedMap(table) => {
                table
                    .keys()
                    .filter(|key| key.starts_with(NUMBERED_PREFIX))
                    .filter_map(|key| item_number(key))
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        };
        format!("{NUMBERED_PREFIX}{next}")
    }
}

/// Number following the last `_` of an item key (`item_12` -> 12).
fn item_number(key: &str) -> Option<u64> {
    key.rsplit_once('_')
        .and_then(|(_, suffix)| suffix.parse().ok())
}

/// Ordered `(key, item)` pairs of a section in either encoding.
pub fn extract_items(value: &Value) -> Vec<(String, Table)> {
    ItemList::classify(value)
        .map(|list| {
            list.items()
                .into_iter()
                .map(|(key, item)| (key, item.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Key for an item appended to `value`. Numbers freed by deletion are not
/// reused.
pub fn next_item_key(value: &Value) -> String {
    ItemList::classify(value)
        .map(|list| list.next_key())
        .unwrap_or_else(|| format!("{NUMBERED_PREFIX}1"))
}

/// The keyed-table encoding of `value`. Sequences become `item_1..item_n`
/// in order; keyed tables are returned unchanged.
pub fn to_keyed_map(value: &Value) -> Table {
    match ItemList::classify(value) {
        Some(ItemList::KeyedMap(table)) => table.clone(),
        Some(list @ ItemList::Sequence(_)) => list
            .items()
            .into_iter()
            .map(|(key, item)| (key, Value::Table(item.clone())))
            .collect(),
        None => Table::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(toml_text: &str, name: &str) -> Value {
        let table: Table = toml::from_str(toml_text).unwrap();
        table[name].clone()
    }

    fn item_names(items: &[(String, Table)]) -> Vec<&str> {
        items
            .iter()
            .map(|(_, item)| item["name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_extract_from_array_of_tables() {
        let value = section(
            r#"
[[vpn]]
name = "On"
cmd = "nmcli up"

[[vpn]]
name = "Off"
cmd = "nmcli down"
"#,
            "vpn",
        );
        let items = extract_items(&value);
        assert_eq!(items[0].0, "item_1");
        assert_eq!(items[1].0, "item_2");
        assert_eq!(item_names(&items), vec!["On", "Off"]);
    }

    #[test]
    fn test_extract_sorts_by_numeric_suffix() {
        let value = section(
            r#"
[vpn.item_12]
name = "twelve"
[vpn.item_2]
name = "two"
[vpn.item_1]
name = "one"
"#,
            "vpn",
        );
        let items = extract_items(&value);
        let keys: Vec<_> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["item_1", "item_2", "item_12"]);
    }

    #[test]
    fn test_extract_ignores_non_item_entries() {
        let value = section(
            r#"
[vpn]
icon = "network"
[vpn.item_1]
name = "one"
[vpn.other]
name = "skipped"
[vpn.item_scalar_2]
"#,
            "vpn",
        );
        let items = extract_items(&value);
        // item_scalar_2 is an (empty) table and still counts as an item
        let keys: Vec<_> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["item_1", "item_scalar_2"]);
    }

    #[test]
    fn test_extract_unnumbered_items_keep_encounter_order() {
        let value = section(
            r#"
[vpn.itemB]
name = "b"
[vpn.itemA]
name = "a"
"#,
            "vpn",
        );
        let items = extract_items(&value);
        assert_eq!(item_names(&items), vec!["b", "a"]);
    }

    #[test]
    fn test_extract_mixed_numbered_and_unnumbered() {
        let keys_of = |toml_text: &str| -> Vec<String> {
            extract_items(&section(toml_text, "vpn"))
                .into_iter()
                .map(|(key, _)| key)
                .collect()
        };

        // itemB is third, so it sorts as 3 and stays after item_3
        assert_eq!(
            keys_of("[vpn.itemA]\n[vpn.item_3]\n[vpn.itemB]\n"),
            vec!["itemA", "item_3", "itemB"]
        );
        // itemA is second, so it lands between item_1 and item_5
        assert_eq!(
            keys_of("[vpn.item_5]\n[vpn.itemA]\n[vpn.item_1]\n"),
            vec!["item_1", "itemA", "item_5"]
        );
    }

    #[test]
    fn test_extract_from_scalar_is_empty() {
        assert!(extract_items(&Value::String("x".into())).is_empty());
    }

    #[test]
    fn test_next_key_skips_gaps() {
        let value = section("[vpn.item_1]\n[vpn.item_3]\n", "vpn");
        assert_eq!(next_item_key(&value), "item_4");
    }

    #[test]
    fn test_next_key_for_empty_section() {
        assert_eq!(next_item_key(&Value::Table(Table::new())), "item_1");
        assert_eq!(next_item_key(&Value::Integer(5)), "item_1");
    }

    #[test]
    fn test_next_key_for_sequence() {
        let value = section("[[vpn]]\nname = \"a\"\n[[vpn]]\nname = \"b\"\n", "vpn");
        assert_eq!(next_item_key(&value), "item_3");
    }

    #[test]
    fn test_next_key_ignores_unnumbered_keys() {
        let value = section("[vpn.itemX]\n[vpn.item_2]\n", "vpn");
        assert_eq!(next_item_key(&value), "item_3");
    }

    #[test]
    fn test_to_keyed_map_from_sequence() {
        let value = section("[[vpn]]\nname = \"a\"\n[[vpn]]\nname = \"b\"\n", "vpn");
        let keyed = to_keyed_map(&value);
        let keys: Vec<_> = keyed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["item_1", "item_2"]);
        assert_eq!(extract_items(&Value::Table(keyed)), extract_items(&value));
    }
}
