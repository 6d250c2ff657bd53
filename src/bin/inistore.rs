//! inistore - read and edit INI settings files from the shell.

use std::process;

use clap::Parser;
use inistore::{
    ConfigStore,
    cli::{Cli, CliService, formatting::format_error},
    tracing_config,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _log_guard = tracing_config::init("warn", cli.log_dir.as_deref())?;

    let store = ConfigStore::open(&cli.file)?;
    let mut cli_service = CliService::new(store);

    match cli_service.execute(cli.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{}: {}", format_error("Error"), e);
            process::exit(1);
        }
    }

    Ok(())
}
