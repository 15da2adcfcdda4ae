//! Registry configuration: which generator to use and with what key.

use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generator::{HmacTokenGenerator, LEGACY_SECRET_KEY, RandomTokenGenerator, TokenGenerator};

/// Environment variable holding the HMAC secret key.
pub const SECRET_KEY_ENV: &str = "SECTOKEN_SECRET_KEY";

/// Environment variable selecting the generator (`hmac` or `random`).
pub const GENERATOR_ENV: &str = "SECTOKEN_GENERATOR";

/// Errors raised while loading or applying a [`TokenConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The HMAC generator was selected with an empty key.
    #[error("secret key must not be empty")]
    EmptySecretKey,

    /// The generator name is not one of `hmac`, `random`.
    #[error("unknown token generator: {0}")]
    UnknownGenerator(String),

    /// An environment variable is set but is not valid Unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}

// ---------------------------------------------------------------------------
// GeneratorKind
// ---------------------------------------------------------------------------

/// Which [`TokenGenerator`] a registry built from config uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// [`HmacTokenGenerator`] keyed with [`TokenConfig::secret_key`].
    #[default]
    Hmac,
    /// [`RandomTokenGenerator`]; the secret key is ignored.
    Random,
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hmac" => Ok(Self::Hmac),
            "random" => Ok(Self::Random),
            other => Err(ConfigError::UnknownGenerator(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TokenConfig
// ---------------------------------------------------------------------------

/// Configuration for token generation.
///
/// Missing fields fall back to [`Default`], so `{}` is a valid JSON
/// config. The default key is [`LEGACY_SECRET_KEY`], kept only so that
/// unconfigured deployments keep working; set a real one.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HMAC key for [`GeneratorKind::Hmac`].
    pub secret_key: String,

    /// Which generator to build.
    pub generator: GeneratorKind,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_key: LEGACY_SECRET_KEY.to_string(),
            generator: GeneratorKind::default(),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret_key", &"<redacted>")
            .field("generator", &self.generator)
            .finish()
    }
}

impl TokenConfig {
    /// Loads the config from `SECTOKEN_SECRET_KEY` and `SECTOKEN_GENERATOR`,
    /// using defaults for unset variables.
    ///
    /// # Errors
    /// - [`ConfigError::UnknownGenerator`] for an unrecognised generator name
    /// - [`ConfigError::NotUnicode`] if either variable is set but not valid
    ///   Unicode
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env::var)
    }

    /// [`TokenConfig::from_env`] over an arbitrary variable source.
    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, VarError>,
    ) -> Result<Self, ConfigError> {
        let secret_key = match read_var(&lookup, SECRET_KEY_ENV)? {
            Some(key) => key,
            None => {
                tracing::warn!(
                    var = SECRET_KEY_ENV,
                    "no secret key configured, using the legacy key"
                );
                LEGACY_SECRET_KEY.to_string()
            }
        };

        let generator = read_var(&lookup, GENERATOR_ENV)?
            .map(|name| name.parse::<GeneratorKind>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            secret_key,
            generator,
        })
    }

    /// Checks the config can produce a working generator.
    ///
    /// # Errors
    /// [`ConfigError::EmptySecretKey`] if HMAC is selected without a key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator == GeneratorKind::Hmac && self.secret_key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }
        Ok(())
    }

    /// Builds the configured generator.
    ///
    /// # Errors
    /// Same as [`TokenConfig::validate`].
    pub fn build_generator(&self) -> Result<Box<dyn TokenGenerator>, ConfigError> {
        self.validate()?;
        match self.generator {
            GeneratorKind::Hmac => {
                let generator = HmacTokenGenerator::new(&self.secret_key)
                    .map_err(|_| ConfigError::EmptySecretKey)?;
                Ok(Box::new(generator))
            }
            GeneratorKind::Random => Ok(Box::new(RandomTokenGenerator)),
        }
    }
}

/// Reads one variable: `None` only when it is unset.
fn read_var(
    lookup: &impl Fn(&'static str) -> Result<String, VarError>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            tracing::error!(var = name, "environment variable is not valid unicode");
            Err(ConfigError::NotUnicode(name))
        }
    }
}
