mod shell;
pub use shell::{Flow, Session, SessionError};

use std::io;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::dir_store::DirStore;
use crate::io::local::FsStore;
use crate::io::sync::{SyncError, Workspace};
use crate::model::collection::ListCollection;
use crate::model::config::Config;
use crate::model::todo_list::TodoList;
use crate::ops::collection_ops::{self, CollectionError};

type FsWorkspace = Workspace<FsStore, DirStore>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = load_config(&cli);
    let workspace = open_workspace(&cli, &config);

    match cli.command {
        None => cmd_shell(&workspace, config.display.window),
        Some(cmd) => match cmd {
            Commands::Lists => cmd_lists(&workspace, json),
            Commands::Show(args) => cmd_show(&workspace, args, json),
            Commands::Share(args) => cmd_share(&workspace, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(cli: &Cli) -> Config {
    let path = match &cli.config {
        Some(path) => config_io::expand_path(path),
        None => config_io::config_path(),
    };
    log::debug!("config: {}", path.display());
    config_io::load_config(&path)
}

/// Resolve paths from the config, with command-line overrides on top.
fn open_workspace(cli: &Cli, config: &Config) -> FsWorkspace {
    let mut paths = config_io::resolve_paths(config);
    if let Some(save_file) = &cli.save_file {
        paths.save_file = config_io::expand_path(save_file);
    }
    let store_dir = match &cli.store_dir {
        Some(dir) => config_io::expand_path(dir),
        None => config_io::resolve_store_dir(config),
    };
    log::debug!(
        "save file {}, cache {}, store {}",
        paths.save_file.display(),
        paths.cache_dir.display(),
        store_dir.display()
    );
    Workspace::new(FsStore, DirStore::new(store_dir), paths)
}

/// Strict load for subcommands that never save: a malformed save file is
/// reported and left alone.
fn read_lists(workspace: &FsWorkspace) -> Result<ListCollection, SyncError> {
    Ok(workspace.read_collection()?.unwrap_or_default())
}

fn find_list<'a>(coll: &'a ListCollection, name: &str) -> Result<&'a TodoList, CollectionError> {
    coll.position_by_name(name)
        .map(|i| &coll.lists()[i])
        .ok_or_else(|| CollectionError::NotFound(name.to_string()))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_shell(workspace: &FsWorkspace, window: usize) -> Result<(), Box<dyn std::error::Error>> {
    let coll = workspace.load_collection()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(workspace, coll, window, stdin.lock(), stdout.lock());
    session.run()?;
    Ok(())
}

fn cmd_lists(workspace: &FsWorkspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let coll = read_lists(workspace)?;
    let summaries = collection_ops::list_names(&coll);

    if json {
        let out: Vec<_> = summaries.iter().map(summary_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if summaries.is_empty() {
        println!("No lists yet. Run skydo to create one.");
    } else {
        for line in format_all_lists(&summaries) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(
    workspace: &FsWorkspace,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let coll = read_lists(workspace)?;
    let list = find_list(&coll, &args.name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(list))?);
    } else {
        let view = collection_ops::view_list(list, 0..list.len());
        for line in format_list_view(&view) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_share(
    workspace: &FsWorkspace,
    args: ShareArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let coll = read_lists(workspace)?;
    let list = find_list(&coll, &args.name)?;
    let status = collection_ops::share_status(list);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&share_to_json(&list.name, &status))?
        );
    } else {
        for line in format_share(&status) {
            println!("{}", line);
        }
    }
    Ok(())
}
