//! Command-line and environment configuration for pooltest-hook

use clap::Parser;
use pooltest_common::config::{
    default_config_file, load_toml_config, resolve, BackendKind, ConfigOverrides,
    ServiceSettings,
};
use std::path::PathBuf;

/// Command-line arguments for pooltest-hook
///
/// Every flag can also come from the environment; anything left unset falls
/// back to the TOML config file, then to compiled defaults.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pooltest-hook")]
#[command(about = "Webhook receiver that stores water test measurements")]
#[command(version)]
pub struct Args {
    /// Address to listen on
    #[arg(short, long, env = "POOLTEST_BIND")]
    pub bind: Option<String>,

    /// Storage backend: sqlite, append-log or memory
    #[arg(long, env = "POOLTEST_BACKEND")]
    pub backend: Option<BackendKind>,

    /// SQLite database file (absolute path)
    #[arg(long, env = "READINGS_DB")]
    pub db_path: Option<PathBuf>,

    /// Append log file (absolute path)
    #[arg(long, env = "POOLTEST_APPEND_LOG")]
    pub log_path: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "POOLTEST_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            backend: self.backend,
            db_path: self.db_path.clone(),
            log_path: self.log_path.clone(),
        }
    }

    /// Resolve final settings
    ///
    /// An explicitly named config file must be readable; the default
    /// location is only used when it exists.
    pub fn load_settings(&self) -> pooltest_common::Result<ServiceSettings> {
        let file = match &self.config {
            Some(path) => Some(load_toml_config(path)?),
            None => default_config_file()
                .map(|path| load_toml_config(&path))
                .transpose()?,
        };

        resolve(&self.overrides(), file.as_ref())
    }
}
