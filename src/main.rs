use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use waypanel_settings::{
    generate_init_file, print_dockbar, print_error, print_folders, print_menu_items,
    print_outcome, print_panel, print_submenus, print_summary, reload_panel,
    resolve_config_path, run, sections, should_use_colors, Direction, DockbarFields,
    DocumentStore, FolderFields, Mutation, OutputContext, PanelValueType, Result,
    SettingsEditor, SettingsError,
};

#[derive(Parser)]
#[command(name = "waypanel-settings")]
#[command(version, about = "Edit the waypanel configuration file")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file to edit (default: $WAYPANEL_CONFIG or ~/.config/waypanel/waypanel.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Show the change as a diff instead of saving it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Force colored output
    #[arg(long, global = true)]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the config path, last modification time and section overview
    Show,
    /// Write a template waypanel.toml (fails if the file exists)
    Init,
    /// Restart the running waypanel so it rereads the config
    Reload,
    /// Dock launchers
    Dockbar {
        #[command(subcommand)]
        action: DockbarAction,
    },
    /// Application menu submenus, items and icons
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Bookmarked folders
    Folders {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Panel settings
    Panel {
        #[command(subcommand)]
        action: PanelAction,
    },
}

#[derive(Subcommand)]
enum DockbarAction {
    List,
    /// Add an entry (replaces an entry with the same id)
    Add(DockbarArgs),
    /// Replace an existing entry
    Edit(DockbarArgs),
    Remove { id: String },
    /// Move an entry one position towards the start
    Up { id: String },
    /// Move an entry one position towards the end
    Down { id: String },
}

#[derive(Args)]
struct DockbarArgs {
    id: String,
    #[arg(long)]
    cmd: Option<String>,
    #[arg(long)]
    icon: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Window class used to match running windows
    #[arg(long)]
    wclass: Option<String>,
    #[arg(long)]
    desktop_file: Option<String>,
    #[arg(long)]
    initial_title: Option<String>,
}

impl DockbarArgs {
    fn into_parts(self) -> (String, DockbarFields) {
        let fields = DockbarFields {
            cmd: self.cmd,
            icon: self.icon,
            wclass: self.wclass,
            desktop_file: self.desktop_file,
            name: self.name,
            initial_title: self.initial_title,
        };
        (self.id, fields)
    }
}

#[derive(Subcommand)]
enum MenuAction {
    /// List submenus and category icons
    List,
    /// List the items of a submenu
    Items { submenu: String },
    AddSubmenu { name: String },
    RemoveSubmenu { name: String },
    AddItem {
        submenu: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cmd: Option<String>,
    },
    EditItem {
        submenu: String,
        /// Item key, e.g. item_2
        item_key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cmd: Option<String>,
    },
    RemoveItem { submenu: String, item_key: String },
    /// Replace all category icons
    SetIcons {
        #[arg(value_name = "NAME=ICON", value_parser = parse_icon)]
        icons: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum FolderAction {
    List,
    Add(FolderArgs),
    Edit(FolderArgs),
    Remove { id: String },
}

#[derive(Args)]
struct FolderArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    path: Option<String>,
    #[arg(long)]
    filemanager: Option<String>,
    #[arg(long)]
    icon: Option<String>,
}

impl FolderArgs {
    fn into_parts(self) -> (String, FolderFields) {
        let fields = FolderFields {
            name: self.name,
            path: self.path,
            filemanager: self.filemanager,
            icon: self.icon,
        };
        (self.id, fields)
    }
}

#[derive(Subcommand)]
enum PanelAction {
    List,
    Set {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// boolean, integer, float or string
        #[arg(short = 't', long = "type", default_value = "string")]
        value_type: PanelValueType,
    },
    Remove { name: String },
}

fn parse_icon(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, icon)| (name.to_string(), icon.to_string()))
        .ok_or_else(|| format!("expected NAME=ICON, got '{s}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = OutputContext::new(should_use_colors(cli.color, cli.no_color), cli.quiet);

    let Some(path) = resolve_config_path(cli.config.as_deref()) else {
        eprintln!("Error: cannot determine the config directory, pass --config");
        return ExitCode::from(1);
    };

    let editor = SettingsEditor::new(DocumentStore::new(path));
    match dispatch(cli.command, &editor, cli.dry_run, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e, &ctx);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn dispatch(
    command: Command,
    editor: &SettingsEditor,
    dry_run: bool,
    ctx: &OutputContext,
) -> Result<()> {
    let mutation = match command {
        Command::Show => {
            let store = editor.store();
            print_summary(store.path(), store.last_modified(), &editor.load()?, ctx);
            return Ok(());
        }
        Command::Init => {
            let path = editor.store().path();
            generate_init_file(path).map_err(|source| SettingsError::Persistence {
                action: "create",
                path: path.to_path_buf(),
                source,
            })?;
            if !ctx.quiet {
                println!("Created {}", path.display());
            }
            return Ok(());
        }
        Command::Reload => {
            print_outcome(&reload_panel()?, ctx);
            return Ok(());
        }
        Command::Dockbar { action } => match action {
            DockbarAction::List => {
                print_dockbar(&sections::dockbar::entries(&editor.load()?), ctx);
                return Ok(());
            }
            DockbarAction::Add(args) => {
                let (id, fields) = args.into_parts();
                Mutation::AddDockbarEntry { id, fields }
            }
            DockbarAction::Edit(args) => {
                let (id, fields) = args.into_parts();
                Mutation::EditDockbarEntry { id, fields }
            }
            DockbarAction::Remove { id } => Mutation::DeleteDockbarEntry { id },
            DockbarAction::Up { id } => Mutation::MoveDockbarEntry {
                id,
                direction: Direction::Up,
            },
            DockbarAction::Down { id } => Mutation::MoveDockbarEntry {
                id,
                direction: Direction::Down,
            },
        },
        Command::Menu { action } => match action {
            MenuAction::List => {
                let doc = editor.load()?;
                print_submenus(
                    &sections::menu::submenus(&doc),
                    &sections::menu::icons(&doc),
                    ctx,
                );
                return Ok(());
            }
            MenuAction::Items { submenu } => {
                let items = sections::menu::items(&editor.load()?, &submenu)?;
                print_menu_items(&submenu, &items, ctx);
                return Ok(());
            }
            MenuAction::AddSubmenu { name } => Mutation::AddSubmenu { name },
            MenuAction::RemoveSubmenu { name } => Mutation::DeleteSubmenu { name },
            MenuAction::AddItem { submenu, name, cmd } => {
                Mutation::AddMenuItem { submenu, name, cmd }
            }
            MenuAction::EditItem {
                submenu,
                item_key,
                name,
                cmd,
            } => Mutation::EditMenuItem {
                submenu,
                item_key,
                name,
                cmd,
            },
            MenuAction::RemoveItem { submenu, item_key } => {
                Mutation::DeleteMenuItem { submenu, item_key }
            }
            MenuAction::SetIcons { icons } => Mutation::SetMenuIcons { icons },
        },
        Command::Folders { action } => match action {
            FolderAction::List => {
                print_folders(&sections::folders::bookmarks(&editor.load()?), ctx);
                return Ok(());
            }
            FolderAction::Add(args) => {
                let (id, fields) = args.into_parts();
                Mutation::AddFolder { id, fields }
            }
            FolderAction::Edit(args) => {
                let (id, fields) = args.into_parts();
                Mutation::EditFolder { id, fields }
            }
            FolderAction::Remove { id } => Mutation::DeleteFolder { id },
        },
        Command::Panel { action } => match action {
            PanelAction::List => {
                print_panel(&sections::panel::settings(&editor.load()?), ctx);
                return Ok(());
            }
            PanelAction::Set {
                name,
                value,
                value_type,
            } => Mutation::SetPanelValue {
                name,
                raw: value,
                value_type,
            },
            PanelAction::Remove { name } => Mutation::DeletePanelValue { name },
        },
    };

    run(editor, mutation, dry_run, ctx).map(|_| ())
}
