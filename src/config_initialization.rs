//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::{FavcConfig, LogFormat, TomlConfigAdapter};
use crate::cli::Cli;
use crate::error::FavcResult;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "FAVC_CONFIG";

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn resolve_config(cli: &Cli) -> FavcResult<FavcConfig> {
    resolve_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve_config`] with an injectable environment lookup
pub fn resolve_with_env<F>(cli: &Cli, env: F) -> FavcResult<FavcConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = cli
        .config
        .clone()
        .or_else(|| env(CONFIG_ENV_VAR).map(PathBuf::from));

    let mut config = match TomlConfigAdapter::locate(explicit.as_deref()) {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(&path)?
        }
        None => FavcConfig::default(),
    };

    apply_environment_overrides(&mut config, &env)?;
    apply_cli_overrides(&mut config, cli);

    config.validate()?;
    Ok(config)
}

fn apply_environment_overrides<F>(config: &mut FavcConfig, env: &F) -> FavcResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env("FAVC_FFMPEG") {
        config.ffmpeg_path = value;
    }
    if let Some(value) = env("FAVC_FFPROBE") {
        config.ffprobe_path = value;
    }
    if let Some(value) = env("FAVC_STRATEGY") {
        config.default_strategy = value;
    }
    if let Some(value) = env("FAVC_LOG_LEVEL") {
        config.log_level = value;
    }
    if let Some(value) = env("FAVC_LOG_FORMAT") {
        config.log_format = LogFormat::parse(&value)?;
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut FavcConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(strategy) = cli.command.strategy_override() {
        config.default_strategy = strategy.to_string();
    }
}
