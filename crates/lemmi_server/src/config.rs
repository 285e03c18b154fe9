//! # Server Configuration
//!
//! Layered: defaults, then an optional TOML file, then environment
//! overrides. The binary applies command-line flags on top.
//!
//! ```toml
//! bind = "127.0.0.1:5000"
//! referral_code_len = 6
//! referral_seed = 42
//! ```

use std::net::SocketAddr;
use std::path::Path;

use lemmi_shared::{
    DEFAULT_BIND, MAX_REFERRAL_CODE_LEN, MIN_REFERRAL_CODE_LEN, REFERRAL_CODE_LEN,
};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Environment variable that overrides the bind address.
pub const BIND_ENV: &str = "LEMMI_BIND";

/// Backend settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Length of generated referral codes.
    pub referral_code_len: usize,
    /// Fixed seed for referral codes. `None` seeds from OS entropy.
    pub referral_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            referral_code_len: REFERRAL_CODE_LEN,
            referral_seed: None,
        }
    }
}

impl ServerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on a parse error or a bad value.
    pub fn from_toml_str(source: &str) -> ServerResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ServerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read, `InvalidConfig` otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Applies `LEMMI_BIND` if it is set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(BIND_ENV) {
            tracing::debug!(%bind, "bind address from environment");
            self.bind = bind;
        }
        self
    }

    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when `bind` is not `host:port`.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| ServerError::InvalidConfig(format!("bad bind address {:?}", self.bind)))
    }

    /// Checks the values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first bad value.
    pub fn validate(&self) -> ServerResult<()> {
        self.socket_addr()?;
        if !(MIN_REFERRAL_CODE_LEN..=MAX_REFERRAL_CODE_LEN).contains(&self.referral_code_len) {
            return Err(ServerError::InvalidConfig(format!(
                "referral_code_len must be within {MIN_REFERRAL_CODE_LEN}..={MAX_REFERRAL_CODE_LEN}, got {}",
                self.referral_code_len
            )));
        }
        Ok(())
    }
}
