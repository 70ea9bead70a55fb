use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use similar::{ChangeTag, TextDiff};
use toml::Value;

use crate::colors::Colors;
use crate::document::Document;
use crate::error::SettingsError;
use crate::sections::dockbar::DockbarEntry;
use crate::sections::folders::FolderBookmark;
use crate::sections::menu::MenuItem;
use crate::status::{Outcome, Status};

pub struct OutputContext {
    pub colors: Colors,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self {
            colors: Colors::new(use_colors),
            quiet,
        }
    }

    fn status_line(&self, status: Status, message: &str) -> String {
        format!(
            "{}{}:{} {}",
            self.colors.status(status),
            status.label(),
            self.colors.reset(),
            message
        )
    }
}

pub fn print_outcome(outcome: &Outcome, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    println!("{}", ctx.status_line(outcome.status, &outcome.message));
}

/// Errors are always shown, on stderr.
pub fn print_error(err: &SettingsError, ctx: &OutputContext) {
    eprintln!("{}", ctx.status_line(err.status(), &err.to_string()));
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    let diff = TextDiff::from_lines(original, content);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
            }
        }
    }
}

/// Compact single-line rendering of a scalar or container value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Table(t) => format!("{{{} keys}}", t.len()),
        Value::Array(a) => format!("[{} items]", a.len()),
        other => other.to_string(),
    }
}

fn heading(title: &str, ctx: &OutputContext) {
    println!("{}{title}{}", ctx.colors.heading(), ctx.colors.reset());
}

/// Local time in `ctime` layout, e.g. `Thu Jul  1 12:00:00 1971`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

pub fn print_summary(
    path: &Path,
    last_modified: Option<SystemTime>,
    doc: &Document,
    ctx: &OutputContext,
) {
    println!("Config: {}", path.display());
    let modified = last_modified
        .map(format_timestamp)
        .unwrap_or_else(|| "Never".to_string());
    println!("Last modified: {modified}");
    println!();
    heading("Sections", ctx);
    for name in doc.section_names() {
        let detail = doc.section(name).map(format_value).unwrap_or_default();
        println!("  {name} {detail}");
    }
}

pub fn print_dockbar(entries: &[(String, DockbarEntry)], ctx: &OutputContext) {
    heading("Dockbar", ctx);
    for (position, (id, entry)) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {id}: {} ({}) icon={}",
            position + 1,
            entry.name,
            entry.cmd,
            entry.icon
        );
    }
}

pub fn print_submenus(names: &[String], icons: &[(String, String)], ctx: &OutputContext) {
    heading("Submenus", ctx);
    for name in names {
        println!("  {name}");
    }
    if !icons.is_empty() {
        heading("Icons", ctx);
        for (name, icon) in icons {
            println!("  {name} = {icon}");
        }
    }
}

pub fn print_menu_items(submenu: &str, items: &[(String, MenuItem)], ctx: &OutputContext) {
    heading(submenu, ctx);
    for (key, item) in items {
        println!("  {key}: {} ({})", item.name, item.cmd);
    }
}

pub fn print_folders(folders: &[(String, FolderBookmark)], ctx: &OutputContext) {
    heading("Folders", ctx);
    for (id, folder) in folders {
        println!(
            "  {id}: {} -> {} [{}] icon={}",
            folder.name, folder.path, folder.filemanager, folder.icon
        );
    }
}

pub fn print_panel(settings: &[(String, Value)], ctx: &OutputContext) {
    heading("Panel", ctx);
    for (name, value) in settings {
        println!("  {name} = {} ({})", format_value(value), value.type_str());
    }
}
