mod init;
pub use init::cmd_init;

use std::path::Path;

use tracing::{info, warn};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, LoadedConfig};
use crate::io::logging;
use crate::manager::ListManager;
use crate::model::Record;
use crate::remote::RestStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let loaded = config_io::load_config(cli.config.as_deref().map(Path::new))?;

    // Held until dispatch returns so buffered log lines are flushed
    let _log_guard = match logging::init_tracing(&loaded.log_dir(), &loaded.config.log) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    match cli.command {
        None => crate::tui::run(&loaded),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before config discovery
            Commands::Init(args) => cmd_init(args),

            Commands::List => cmd_list(&loaded, json),
            Commands::Add(args) => cmd_add(&loaded, args, json),
            Commands::Edit(args) => cmd_edit(&loaded, args, json),
            Commands::Delete(args) => cmd_delete(&loaded, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_manager(loaded: &LoadedConfig) -> Result<ListManager<RestStore>, Box<dyn std::error::Error>> {
    config_io::validate_remote(&loaded.config.remote)?;
    let store = RestStore::from_config(&loaded.config.remote)?;
    info!(endpoint = store.endpoint(), "using remote table");
    Ok(ListManager::new(store))
}

fn print_records(records: &[Record], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&records_to_json(records))?);
    } else {
        for line in format_listing(records) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(loaded: &LoadedConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager(loaded)?;
    manager.fetch_all()?;
    print_records(&manager.state().records, json)
}

fn cmd_add(loaded: &LoadedConfig, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager(loaded)?;
    manager.create(&args.text)?;
    print_records(&manager.state().records, json)
}

fn cmd_edit(loaded: &LoadedConfig, args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager(loaded)?;
    // beginEdit needs the record in the snapshot
    manager.fetch_all()?;
    manager.begin_edit(args.id)?;
    manager.set_edit_buffer(&args.text);
    if let Err(e) = manager.save_edit(args.id) {
        warn!(id = args.id, error = %e, "edit not saved");
        return Err(e.into());
    }
    print_records(&manager.state().records, json)
}

fn cmd_delete(loaded: &LoadedConfig, args: DeleteArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager(loaded)?;
    manager.delete(args.id)?;
    print_records(&manager.state().records, json)
}
