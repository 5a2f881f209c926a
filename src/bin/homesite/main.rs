use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use spdlog::{info, warn};

use homesite::logger::configure_logger;
use homesite::server::server_run;

use crate::config::{default_config_path, open_config};
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "homesite.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Write a sample configuration to the config path and exit
    #[arg(long)]
    write_sample_config: bool,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if args.write_sample_config {
        let path = match config_path {
            Some(path) => path,
            None => default_config_path().map_err(|e| anyhow!(e))?,
        };
        write_sample_cfg(&path)?;
        println!("Sample config written to {}", path.display());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Please run homesite --help");
            return Err(anyhow!(err));
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting homesite =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");

    server_run(config).await?;
    Ok(())
}
