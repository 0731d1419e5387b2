use crate::cli::commands::InitArgs;
use crate::io::config_io::{CONFIG_FILE, render_template, write_config};

/// Write a commented taskdeck.toml into the current directory.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(table) = &args.table {
        validate_table_name(table)?;
    }

    let path = std::env::current_dir()?.join(CONFIG_FILE);
    let contents = render_template(
        args.url.as_deref(),
        args.key.as_deref(),
        args.table.as_deref(),
    );
    write_config(&path, &contents, args.force)?;

    println!("Created {}", path.display());
    if args.url.is_none() || args.key.is_none() {
        println!("Set remote.url and remote.api_key before running td.");
    }
    Ok(())
}

/// Table names end up in the request path, so keep them to identifier characters.
fn validate_table_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("table name cannot be empty".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(format!(
            "invalid table name \"{}\" (use letters, digits and underscores)",
            name
        ));
    }
    Ok(())
}
