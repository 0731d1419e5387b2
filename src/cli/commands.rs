use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - your tasks table, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of searching for taskdeck.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a taskdeck.toml in the current directory
    Init(InitArgs),
    /// List all tasks, newest first
    List,
    /// Add a task
    Add(AddArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project URL of the hosted database
    #[arg(long)]
    pub url: Option<String>,
    /// API key
    #[arg(long)]
    pub key: Option<String>,
    /// Table name (default: tasks)
    #[arg(long)]
    pub table: Option<String>,
    /// Overwrite an existing taskdeck.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,
    /// New task text
    pub text: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: i64,
}
