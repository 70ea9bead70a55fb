//! Loading and atomic saving of the configuration file

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;
use tempfile::NamedTempFile;

use super::prune::{prune_empty_menu_entries, prune_orphans};
use super::Document;
use crate::error::{Result, SettingsError};

/// Reads and writes one configuration file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    /// Load the document, falling back to [`Document::default`] when the
    /// file does not exist. Orphaned sections are pruned on every load.
    pub fn load(&self) -> Result<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found, using defaults", self.path.display());
                return Ok(Document::default());
            }
            Err(source) => {
                return Err(SettingsError::Persistence {
                    action: "read",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let doc = Document::parse(&content).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!("Loaded {}", self.path.display());
        Ok(prune_orphans(doc))
    }

    /// Text [`save`](Self::save) would write for `doc`.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut doc = doc.clone();
        prune_empty_menu_entries(&mut doc);
        doc.to_toml_string()
    }

    /// Serialize and atomically replace the file. Empty `menu` children are
    /// dropped first.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let content = self.render(doc)?;
        self.write_atomically(content.as_bytes(), |file, bytes| file.write_all(bytes))?;
        debug!("Saved {}", self.path.display());
        Ok(())
    }

    /// Write `bytes` to a temporary file next to the target, sync it, then
    /// rename it over the target. The target is never opened for writing.
    fn write_atomically<F>(&self, bytes: &[u8], write: F) -> Result<()>
    where
        F: FnOnce(&mut fs::File, &[u8]) -> io::Result<()>,
    {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|source| self.persistence("create directory for", source))?;

        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|source| self.persistence("create temp file for", source))?;
        if let Some(permissions) = self.target_permissions()? {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|source| self.persistence("set permissions for", source))?;
        }
        write(temp.as_file_mut(), bytes).map_err(|source| self.persistence("write", source))?;
        temp.as_file_mut()
            .flush()
            .map_err(|source| self.persistence("flush", source))?;
        temp.as_file()
            .sync_all()
            .map_err(|source| self.persistence("sync", source))?;
        temp.persist(&self.path)
            .map_err(|err| self.persistence("replace", err.error))?;

        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(&dir) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }

    /// Mode for the replacement file: the existing file's, or 0644 for a
    /// new one on unix. Temp files start out as 0600.
    fn target_permissions(&self) -> Result<Option<fs::Permissions>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.permissions())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
            Err(source) => Err(self.persistence("stat", source)),
        }
    }

    fn persistence(&self, action: &'static str, source: io::Error) -> SettingsError {
        SettingsError::Persistence {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use toml::Value;

    fn store_in(dir: &TempDir) -> DocumentStore {
        DocumentStore::new(dir.path().join("waypanel").join("waypanel.toml"))
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), Document::default());
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        fs::write(&path, "[dockbar\ncmd = ").unwrap();

        let result = DocumentStore::new(&path).load();
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_load_directory_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let result = DocumentStore::new(dir.path()).load();
        assert!(matches!(result, Err(SettingsError::Persistence { .. })));
    }

    #[test]
    fn test_load_prunes_orphans() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        fs::write(&path, "[\"test.leftover\"]\n[dockbar.term]\ncmd = \"foot\"\n").unwrap();

        let doc = DocumentStore::new(&path).load().unwrap();
        let names: Vec<_> = doc.section_names().collect();
        assert_eq!(names, vec!["dockbar"]);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Document::default()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_save_drops_empty_menu_children() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Document::default()).unwrap();

        let reloaded = store.load().unwrap();
        assert!(reloaded.table("menu").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_encodings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        let source = r#"
[panel]
height = 32
opacity = 0.9
autohide = false
position = "top"

[dockbar.zterm]
cmd = "foot"
icon = "foot"
name = "Foot"

[dockbar.browser]
cmd = "firefox"
icon = "firefox"
name = "Firefox"

[[menu.Power]]
name = "Shutdown"
cmd = "systemctl poweroff"

[[menu.Power]]
name = "Reboot"
cmd = "systemctl reboot"

[menu.Network.item_2]
name = "VPN Off"
cmd = "nmcli down"

[menu.Network.item_1]
name = "VPN On"
cmd = "nmcli up"
"#;
        fs::write(&path, source).unwrap();
        let store = DocumentStore::new(&path);

        let original = store.load().unwrap();
        store.save(&original).unwrap();
        let reloaded = store.load().unwrap();

        assert_eq!(reloaded, original);
        let dockbar: Vec<_> = reloaded.table("dockbar").unwrap().keys().cloned().collect();
        assert_eq!(dockbar, vec!["zterm", "browser"]);
        let menu = reloaded.table("menu").unwrap();
        assert!(matches!(menu["Power"], Value::Array(_)));
    }

    #[test]
    fn test_failed_write_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        let original = "[panel]\nheight = 32\n";
        fs::write(&path, original).unwrap();
        let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

        let store = DocumentStore::new(&path);
        let result = store.write_atomically(b"[panel]\nheight = 48\n", |file, bytes| {
            file.write_all(&bytes[..4])?;
            Err(io::Error::other("no space left on device"))
        });

        assert!(matches!(
            result,
            Err(SettingsError::Persistence { action: "write", .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(
            fs::metadata(&path).unwrap().modified().unwrap(),
            modified_before
        );
        // The temp file is cleaned up on failure
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        fs::write(&path, "[panel]\nheight = 32\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let store = DocumentStore::new(&path);
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Document::default()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_save_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waypanel.toml");
        fs::write(&path, "[panel]\nheight = 32\n").unwrap();
        let store = DocumentStore::new(&path);

        let mut doc = store.load().unwrap();
        doc.table_mut("panel")
            .unwrap()
            .insert("height".into(), Value::Integer(48));
        store.save(&doc).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.table("panel").unwrap()["height"], Value::Integer(48));
    }
}
