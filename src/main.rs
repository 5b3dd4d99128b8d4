//! FAVC CLI
//!
//! ```bash
//! favc extract -i talk.mp4 -s 00:01:00.000 -e 00:01:30.500 -o intro.mp4
//! favc extract -i talk.mp4 --clips clips.json --strategy re-encode --report run.json
//! favc thumbnail -i talk.mp4 -t 450f -o poster.jpg
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use favc_cli::app::DefaultAppContainer;
use favc_cli::cli::{commands, Cli, Commands};
use favc_cli::config_initialization::resolve_config;
use favc_cli::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    init_logging(&config.log_level, config.log_format)?;
    debug!(?config, "resolved configuration");

    let container = DefaultAppContainer::from_config(&config);

    match cli.command {
        Commands::Extract(args) => commands::extract(&container, args, &config).await?,
        Commands::Thumbnail(args) => commands::thumbnail(&container, args).await?,
    }

    Ok(())
}
