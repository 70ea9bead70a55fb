//! Template generation for the `init` command

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Starting `waypanel.toml`: every protected section, all empty.
pub const WAYPANEL_TOML_TEMPLATE: &str = r#"# waypanel.toml - Configuration for waypanel
#
# Edit with `waypanel-settings` or by hand. Sections below are kept even
# when empty; other empty dotted sections are cleaned up automatically.

# Panel-wide settings: booleans, integers, floats or strings.
# height = 32
[panel]

# Application menu. Each submenu holds items keyed item_1, item_2, ...
# [menu.Network.item_1]
# name = "VPN On"
# cmd = "nmcli connection up vpn"
[menu]

# Icons shown next to menu categories.
# Network = "network-wired"
[menu.icons]

# Bookmarked folders.
# [folders.downloads]
# name = "Downloads"
# path = "~/Downloads"
# filemanager = "nautilus"
# icon = "folder-download"
[folders]

# Dock launchers, shown in the order they appear here.
# [dockbar.term]
# cmd = "foot"
# icon = "foot"
# wclass = "foot"
# desktop_file = "foot.desktop"
# name = "Terminal"
[dockbar]

[cmd]

[launcher]

[dpms]
"#;

/// Write the template to `path`, creating parent directories.
///
/// Returns an error if the file already exists.
pub fn generate_init_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(WAYPANEL_TOML_TEMPLATE.as_bytes())?;
    file.sync_all()
}
