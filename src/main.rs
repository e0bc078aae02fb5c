use clap::Parser;
use log::debug;

use esp32_ble_interface_android::{logging, BridgeConfig, Result};

mod app_config;
mod commands;

use app_config::{Cli, Commands};
use commands as cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load_with(Some(path))?,
        None => BridgeConfig::load()?,
    };

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    logging::init(&config.logging)?;
    debug!("Effective configuration: {:?}", config);

    let output = match cli.command {
        Commands::Greet => cmd::greet_command()?,
        Commands::Mangle {
            class,
            method,
            signature,
        } => cmd::mangle_command(&class, &method, signature.as_deref())?,
        Commands::Check => cmd::check_command(&config)?,
        Commands::Config => cmd::config_command(&config)?,
    };

    println!("{}", output);
    Ok(())
}
