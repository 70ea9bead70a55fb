pub mod colors;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
mod output;
pub mod reload;
pub mod sanitize;
pub mod sections;
pub mod status;

pub use colors::{should_use_colors, Colors};
pub use config::{
    default_config_path, generate_init_file, resolve_config_path, CONFIG_ENV_VAR,
    WAYPANEL_TOML_TEMPLATE,
};
pub use document::{
    extract_items, next_item_key, prune_orphans, Document, DocumentStore, ItemList,
    PROTECTED_SECTIONS,
};
pub use editor::{Mutation, Preview, SettingsEditor};
pub use error::{Result, SettingsError};
pub use output::{
    print_dockbar, print_error, print_folders, print_menu_items, print_outcome, print_panel,
    print_submenus, print_summary, OutputContext,
};
pub use reload::reload_panel;
pub use sanitize::{Sanitizer, SecureSlug};
pub use sections::dockbar::{Direction, DockbarEntry, DockbarFields};
pub use sections::folders::{FolderBookmark, FolderFields};
pub use sections::menu::MenuItem;
pub use sections::panel::PanelValueType;
pub use status::{Outcome, Status};

use log::info;

/// Apply `mutation` and report the outcome, or print a diff of what would
/// change when `dry_run` is set.
pub fn run(
    editor: &SettingsEditor,
    mutation: Mutation,
    dry_run: bool,
    ctx: &OutputContext,
) -> Result<Outcome> {
    if !dry_run {
        let outcome = editor.execute(mutation)?;
        print_outcome(&outcome, ctx);
        return Ok(outcome);
    }

    let preview = editor.preview(mutation)?;
    if preview.before != preview.after {
        output::print_diff(
            &editor.store().path().display().to_string(),
            &preview.before,
            &preview.after,
        );
    } else {
        info!("Dry run: no changes");
    }
    print_outcome(&preview.outcome, ctx);
    Ok(preview.outcome)
}
