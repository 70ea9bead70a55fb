//! Config path resolution
//!
//! Priority: explicit path > `WAYPANEL_CONFIG` > `<config dir>/waypanel/waypanel.toml`

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "WAYPANEL_CONFIG";

/// `<config dir>/waypanel/waypanel.toml`, or `None` when the platform has no
/// config directory (no `$HOME`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("waypanel").join("waypanel.toml"))
}

/// Resolve which file to edit.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_from(explicit, env::var_os(CONFIG_ENV_VAR), default_config_path())
}

fn resolve_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or(default)
}
