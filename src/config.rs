use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

const ENV_PREFIX: &str = "TAPO";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Compact,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
}

/// Which configuration profile (and library handle) a front-end uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Plug,
    Bulb,
}

impl DeviceKind {
    pub fn profile(&self) -> &'static str {
        match self {
            DeviceKind::Plug => "plug",
            DeviceKind::Bulb => "bulb",
        }
    }

    fn env_var(&self, field: &str) -> String {
        format!(
            "{}_{}_{}",
            ENV_PREFIX,
            self.profile().to_uppercase(),
            field.to_uppercase()
        )
    }
}

/// Connection settings for a single device.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub address: String,
    pub account: String,
    pub secret: String,
    pub timeout: Duration,
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("address", &self.address)
            .field("account", &self.account)
            .field("secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettings {
    pub address: Option<String>,
    pub account: Option<String>,
    pub secret: Option<String>,
}

/// One source of settings: the config file, or the `TAPO_*` environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsLayer {
    pub account: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub plug: ProfileSettings,
    #[serde(default)]
    pub bulb: ProfileSettings,
}

impl SettingsLayer {
    fn profile(&self, kind: DeviceKind) -> &ProfileSettings {
        match kind {
            DeviceKind::Plug => &self.plug,
            DeviceKind::Bulb => &self.bulb,
        }
    }

    /// Profile value first, then the top-level one. Empty strings count
    /// as unset.
    fn lookup(&self, kind: DeviceKind, field: Field) -> Option<String> {
        let profile = self.profile(kind);
        let value = match field {
            Field::Address => set(&profile.address),
            Field::Account => set(&profile.account).or(set(&self.account)),
            Field::Secret => set(&profile.secret).or(set(&self.secret)),
        };
        value.cloned()
    }
}

fn set(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Address,
    Account,
    Secret,
}

/// Environment variables as the `config` crate sees them once the `TAPO_`
/// prefix is stripped: `TAPO_PLUG_ADDRESS` becomes `plug_address`.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvSettings {
    account: Option<String>,
    secret: Option<String>,
    timeout_secs: Option<u64>,
    plug_address: Option<String>,
    plug_account: Option<String>,
    plug_secret: Option<String>,
    bulb_address: Option<String>,
    bulb_account: Option<String>,
    bulb_secret: Option<String>,
}

impl From<EnvSettings> for SettingsLayer {
    fn from(env: EnvSettings) -> Self {
        SettingsLayer {
            account: env.account,
            secret: env.secret,
            timeout_secs: env.timeout_secs,
            plug: ProfileSettings {
                address: env.plug_address,
                account: env.plug_account,
                secret: env.plug_secret,
            },
            bulb: ProfileSettings {
                address: env.bulb_address,
                account: env.bulb_account,
                secret: env.bulb_secret,
            },
        }
    }
}

/// Environment and file layers, kept apart so a profile value in the file
/// cannot shadow a top-level environment variable.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub env: SettingsLayer,
    pub file: SettingsLayer,
}

/// Values given on the command line; these win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub address: Option<String>,
    pub account: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tapoctl").join("config.toml"))
}

/// Load the config file and the process environment. An explicitly given
/// path must exist; the default path is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, AppError> {
    load_layers(path, None)
}

/// `env` replaces the process environment when given.
fn load_layers(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, AppError> {
    let mut file = config::Config::builder();
    match path {
        Some(path) => {
            file = file.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                file = file.add_source(config::File::from(default).required(false));
            }
        }
    }
    let file: SettingsLayer = file.build()?.try_deserialize()?;

    // `__` never occurs in our names, so keys stay flat after the prefix.
    let env: EnvSettings = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()?;

    Ok(Settings {
        env: env.into(),
        file,
    })
}

impl Settings {
    /// Resolve a device configuration. Each field comes from the first
    /// source that has it: command line, environment (profile, then
    /// top-level), config file (profile, then top-level). A missing secret
    /// is reported through the returned flag so the caller can decide
    /// whether to prompt for it.
    pub fn resolve(
        &self,
        kind: DeviceKind,
        overrides: &Overrides,
    ) -> Result<(DeviceConfig, bool), AppError> {
        let layered = |given: &Option<String>, field: Field| {
            given
                .clone()
                .filter(|s| !s.is_empty())
                .or_else(|| self.env.lookup(kind, field))
                .or_else(|| self.file.lookup(kind, field))
        };

        let address = layered(&overrides.address, Field::Address).ok_or_else(|| {
            AppError::Config(format!(
                "no {} address; pass --address or set {}",
                kind.profile(),
                kind.env_var("address")
            ))
        })?;

        let account = layered(&overrides.account, Field::Account).ok_or_else(|| {
            AppError::Config(format!(
                "no account; pass --account or set {}_ACCOUNT",
                ENV_PREFIX
            ))
        })?;

        let secret = layered(&overrides.secret, Field::Secret);

        let timeout_secs = overrides
            .timeout_secs
            .or(self.env.timeout_secs)
            .or(self.file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let has_secret = secret.is_some();
        Ok((
            DeviceConfig {
                address,
                account,
                secret: secret.unwrap_or_default(),
                timeout: Duration::from_secs(timeout_secs),
            },
            has_secret,
        ))
    }
}
