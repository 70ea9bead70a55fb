//! Locating and bootstrapping `waypanel.toml`.
//!
//! This module provides:
//! - Config path resolution (`--config` > `WAYPANEL_CONFIG` > XDG config dir)
//! - Template generation for `init`

mod init;
mod path;

pub use init::{generate_init_file, WAYPANEL_TOML_TEMPLATE};
pub use path::{default_config_path, resolve_config_path, CONFIG_ENV_VAR};
