pub mod bulb;
pub mod demo;
pub mod output;
pub mod plug;
pub mod web;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;
use dialoguer::Password;

use crate::config::{self, DeviceConfig, DeviceKind, OutputMode, Overrides, RuntimeConfig};
use crate::error::AppError;

/// Connection settings accepted by every front-end.
#[derive(Args, Debug, Clone, Default)]
pub struct DeviceArgs {
    /// Device IP address
    #[arg(short, long, global = true)]
    pub address: Option<String>,

    /// Tapo account email
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Tapo account password
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Handshake and command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Config file (default: <config dir>/tapoctl/config.toml)
    #[arg(long, env = "TAPO_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

impl DeviceArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            address: self.address.clone(),
            account: self.account.clone(),
            secret: self.secret.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Merge flags, environment and config file into a device config,
    /// prompting for the password on a terminal if none was configured.
    pub fn resolve(&self, kind: DeviceKind) -> Result<DeviceConfig, AppError> {
        let settings = config::load_settings(self.config.as_deref())?;
        let (mut device, has_secret) = settings.resolve(kind, &self.overrides())?;

        if !has_secret {
            if !std::io::stdin().is_terminal() {
                return Err(AppError::Config(
                    "no password; pass --secret or set TAPO_SECRET".into(),
                ));
            }
            device.secret = Password::new()
                .with_prompt(format!("Tapo password for {}", device.account))
                .interact()
                .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        }

        Ok(device)
    }
}

/// Output flags shared by the plug and bulb front-ends.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// One-line summary instead of JSON
    #[arg(short, long, global = true, conflicts_with = "table")]
    pub compact: bool,

    /// Output as a field/value table instead of JSON
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputArgs {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            output_mode: if self.compact {
                OutputMode::Compact
            } else if self.table {
                OutputMode::Table
            } else {
                OutputMode::Json
            },
            verbose: self.verbose,
        }
    }
}
