use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use config::Config;
use serde::Deserialize;
use std::time::Duration;

use crate::core::error::ConfigError;

const ENV_PREFIX: &str = "ONCEGATE";
const CONFIG_FILE: &str = "oncegate";
const MAX_TOKEN_TTL: u64 = i64::MAX as u64 / 2;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) port: u16,
    pub(crate) log_level: String,
    pub(crate) api_key: String,
    pub(crate) secret: Option<String>,
    pub(crate) token_ttl: u64,
    pub(crate) sweep_interval: u64,
}

impl Args {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("port", 8000)?
            .set_default("log_level", "info")?
            .set_default("token_ttl", 300)?
            .set_default("sweep_interval", 60)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let args = config.try_deserialize::<Args>()?;
        args.validate()?;

        Ok(args)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token_ttl == 0 || self.token_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::InvalidTtl);
        }

        Ok(())
    }

    pub(crate) fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl)
    }

    pub(crate) fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

/// Returns the configured signing secret, or a fresh random one when none is
/// set. A generated secret lives only as long as the process, so tokens never
/// outlive a restart.
pub(crate) fn resolve_secret(secret: Option<String>) -> Result<String, ConfigError> {
    match secret {
        Some(secret) if secret.trim().is_empty() => Err(ConfigError::EmptySecret),
        Some(secret) => Ok(secret),
        None => {
            tracing::warn!("no signing secret configured, generating a random one");
            Ok(URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>()))
        }
    }
}
