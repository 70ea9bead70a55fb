//! The mutation API: one call per user action, each loading the document,
//! transforming it in memory and saving it atomically.
//!
//! Calls are independent; nothing serializes two editors writing the same
//! file, and the atomic rename only guarantees the file is never seen
//! half-written.

use std::fs;

use log::info;

use crate::document::{Document, DocumentStore};
use crate::error::Result;
use crate::sanitize::{Sanitizer, SecureSlug};
use crate::sections::dockbar::{self, Direction, DockbarEntry, DockbarFields};
use crate::sections::folders::{self, FolderBookmark, FolderFields};
use crate::sections::menu::{self, MenuItem};
use crate::sections::panel::{self, PanelValueType};
use crate::status::Outcome;

/// A single user-facing edit.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddDockbarEntry {
        id: String,
        fields: DockbarFields,
    },
    EditDockbarEntry {
        id: String,
        fields: DockbarFields,
    },
    DeleteDockbarEntry {
        id: String,
    },
    MoveDockbarEntry {
        id: String,
        direction: Direction,
    },
    AddSubmenu {
        name: String,
    },
    DeleteSubmenu {
        name: String,
    },
    AddMenuItem {
        submenu: String,
        name: Option<String>,
        cmd: Option<String>,
    },
    EditMenuItem {
        submenu: String,
        item_key: String,
        name: Option<String>,
        cmd: Option<String>,
    },
    DeleteMenuItem {
        submenu: String,
        item_key: String,
    },
    SetMenuIcons {
        icons: Vec<(String, String)>,
    },
    AddFolder {
        id: String,
        fields: FolderFields,
    },
    EditFolder {
        id: String,
        fields: FolderFields,
    },
    DeleteFolder {
        id: String,
    },
    SetPanelValue {
        name: String,
        raw: String,
        value_type: PanelValueType,
    },
    DeletePanelValue {
        name: String,
    },
}

impl Mutation {
    /// Apply to `doc` in memory. Only user-chosen new identifiers (dockbar
    /// and folder ids, submenu names on creation) go through `sanitizer`;
    /// references to existing keys are used as given.
    pub fn apply(self, doc: &mut Document, sanitizer: &dyn Sanitizer) -> Result<Outcome> {
        match self {
            Mutation::AddDockbarEntry { id, fields } => {
                let entry = DockbarEntry::from_fields(fields)?;
                dockbar::add(doc, &sanitizer.sanitize(&id), &entry)
            }
            Mutation::EditDockbarEntry { id, fields } => {
                let entry = DockbarEntry::from_fields(fields)?;
                dockbar::edit(doc, &id, &entry)
            }
            Mutation::DeleteDockbarEntry { id } => dockbar::delete(doc, &id),
            Mutation::MoveDockbarEntry { id, direction } => {
                dockbar::move_entry(doc, &id, direction)
            }
            Mutation::AddSubmenu { name } => menu::add_submenu(doc, &sanitizer.sanitize(&name)),
            Mutation::DeleteSubmenu { name } => menu::delete_submenu(doc, &name),
            Mutation::AddMenuItem { submenu, name, cmd } => {
                let item = MenuItem::new(name, cmd)?;
                menu::add_item(doc, &submenu, &item)
            }
            Mutation::EditMenuItem {
                submenu,
                item_key,
                name,
                cmd,
            } => {
                let item = MenuItem::new(name, cmd)?;
                menu::edit_item(doc, &submenu, &item_key, &item)
            }
            Mutation::DeleteMenuItem { submenu, item_key } => {
                menu::delete_item(doc, &submenu, &item_key)
            }
            Mutation::SetMenuIcons { icons } => menu::set_icons(doc, icons),
            Mutation::AddFolder { id, fields } => {
                let folder = FolderBookmark::from_fields(fields)?;
                folders::add(doc, &sanitizer.sanitize(&id), &folder)
            }
            Mutation::EditFolder { id, fields } => {
                let folder = FolderBookmark::from_fields(fields)?;
                folders::edit(doc, &id, &folder)
            }
            Mutation::DeleteFolder { id } => folders::delete(doc, &id),
            Mutation::SetPanelValue {
                name,
                raw,
                value_type,
            } => panel::set_value(doc, &name, &raw, value_type),
            Mutation::DeletePanelValue { name } => panel::delete_value(doc, &name),
        }
    }
}

/// What a mutation would do, without saving.
#[derive(Debug, Clone)]
pub struct Preview {
    pub outcome: Outcome,
    /// Current file content (empty if the file does not exist)
    pub before: String,
    /// Content that would be written
    pub after: String,
}

pub struct SettingsEditor<S = SecureSlug> {
    store: DocumentStore,
    sanitizer: S,
}

impl SettingsEditor<SecureSlug> {
    pub fn new(store: DocumentStore) -> Self {
        Self::with_sanitizer(store, SecureSlug)
    }
}

impl<S: Sanitizer> SettingsEditor<S> {
    pub fn with_sanitizer(store: DocumentStore, sanitizer: S) -> Self {
        Self { store, sanitizer }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn load(&self) -> Result<Document> {
        self.store.load()
    }

    /// Load, apply, and save when the document changed. Informational
    /// outcomes and errors never touch the file.
    pub fn execute(&self, mutation: Mutation) -> Result<Outcome> {
        let mut doc = self.store.load()?;
        let outcome = mutation.apply(&mut doc, &self.sanitizer)?;
        if outcome.changed() {
            self.store.save(&doc)?;
            info!("{}", outcome.message);
        }
        Ok(outcome)
    }

    pub fn preview(&self, mutation: Mutation) -> Result<Preview> {
        let before = fs::read_to_string(self.store.path()).unwrap_or_default();
        let mut doc = self.store.load()?;
        let outcome = mutation.apply(&mut doc, &self.sanitizer)?;
        let after = if outcome.changed() {
            self.store.render(&doc)?
        } else {
            before.clone()
        };
        Ok(Preview {
            outcome,
            before,
            after,
        })
    }

    pub fn add_dockbar_entry(&self, id: &str, fields: DockbarFields) -> Result<Outcome> {
        self.execute(Mutation::AddDockbarEntry {
            id: id.to_string(),
            fields,
        })
    }

    pub fn edit_dockbar_entry(&self, id: &str, fields: DockbarFields) -> Result<Outcome> {
        self.execute(Mutation::EditDockbarEntry {
            id: id.to_string(),
            fields,
        })
    }

    pub fn delete_dockbar_entry(&self, id: &str) -> Result<Outcome> {
        self.execute(Mutation::DeleteDockbarEntry { id: id.to_string() })
    }

    pub fn move_dockbar_entry(&self, id: &str, direction: Direction) -> Result<Outcome> {
        self.execute(Mutation::MoveDockbarEntry {
            id: id.to_string(),
            direction,
        })
    }

    pub fn add_submenu(&self, name: &str) -> Result<Outcome> {
        self.execute(Mutation::AddSubmenu {
            name: name.to_string(),
        })
    }

    pub fn delete_submenu(&self, name: &str) -> Result<Outcome> {
        self.execute(Mutation::DeleteSubmenu {
            name: name.to_string(),
        })
    }

    pub fn add_menu_item(&self, submenu: &str, name: &str, cmd: &str) -> Result<Outcome> {
        self.execute(Mutation::AddMenuItem {
            submenu: submenu.to_string(),
            name: Some(name.to_string()),
            cmd: Some(cmd.to_string()),
        })
    }

    pub fn edit_menu_item(
        &self,
        submenu: &str,
        item_key: &str,
        name: &str,
        cmd: &str,
    ) -> Result<Outcome> {
        self.execute(Mutation::EditMenuItem {
            submenu: submenu.to_string(),
            item_key: item_key.to_string(),
            name: Some(name.to_string()),
            cmd: Some(cmd.to_string()),
        })
    }

    pub fn delete_menu_item(&self, submenu: &str, item_key: &str) -> Result<Outcome> {
        self.execute(Mutation::DeleteMenuItem {
            submenu: submenu.to_string(),
            item_key: item_key.to_string(),
        })
    }

    pub fn set_menu_icons(&self, icons: Vec<(String, String)>) -> Result<Outcome> {
        self.execute(Mutation::SetMenuIcons { icons })
    }

    pub fn add_folder(&self, id: &str, fields: FolderFields) -> Result<Outcome> {
        self.execute(Mutation::AddFolder {
            id: id.to_string(),
            fields,
        })
    }

    pub fn edit_folder(&self, id: &str, fields: FolderFields) -> Result<Outcome> {
        self.execute(Mutation::EditFolder {
            id: id.to_string(),
            fields,
        })
    }

    pub fn delete_folder(&self, id: &str) -> Result<Outcome> {
        self.execute(Mutation::DeleteFolder { id: id.to_string() })
    }

    pub fn set_panel_value(
        &self,
        name: &str,
        raw: &str,
        value_type: PanelValueType,
    ) -> Result<Outcome> {
        self.execute(Mutation::SetPanelValue {
            name: name.to_string(),
            raw: raw.to_string(),
            value_type,
        })
    }

    pub fn delete_panel_value(&self, name: &str) -> Result<Outcome> {
        self.execute(Mutation::DeletePanelValue {
            name: name.to_string(),
        })
    }
}
