//! Removal of empty sections left behind by partial edits

use log::info;
use toml::Value;

use super::{is_falsy, remove_ordered, Document};

/// Top-level sections that are kept even when empty.
pub const PROTECTED_SECTIONS: [&str; 7] = [
    "panel", "menu", "folders", "dockbar", "cmd", "launcher", "dpms",
];

pub fn is_protected(name: &str) -> bool {
    PROTECTED_SECTIONS.contains(&name)
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Table(table) => table.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Drop empty dotted top-level sections (`["foo.bar"]`) whose prefix is
/// not a protected section name.
pub fn prune_orphans(mut doc: Document) -> Document {
    let orphans: Vec<String> = doc
        .section_names()
        .filter(|name| {
            name.split_once('.')
                .is_some_and(|(prefix, _)| !is_protected(prefix))
        })
        .filter(|name| doc.section(name).is_some_and(is_empty_container))
        .map(str::to_string)
        .collect();

    for name in orphans {
        doc.remove_section(&name);
        info!("Removed empty orphaned section: [{name}]");
    }
    doc
}

/// Drop direct children of `menu` whose value is falsy. Applied before
/// every save.
pub fn prune_empty_menu_entries(doc: &mut Document) {
    let Some(Value::Table(menu)) = doc.root_mut().get_mut("menu") else {
        return;
    };
    let empty: Vec<String> = menu
        .iter()
        .filter(|(_, value)| is_falsy(value))
        .map(|(key, _)| key.clone())
        .collect();
    for key in empty {
        remove_ordered(menu, &key);
        info!("Dropped empty menu entry: {key}");
    }
}
