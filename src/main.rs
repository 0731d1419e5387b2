use clap::Parser;
use taskdeck::cli::commands::{Cli, Commands};
use taskdeck::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // Init runs before config discovery
        Some(Commands::Init(args)) => handlers::cmd_init(args),
        _ => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
