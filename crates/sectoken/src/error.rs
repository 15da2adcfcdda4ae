//! Unified error type for the sectoken facade.

use sectoken_core::TokenError;
use sectoken_session::ConfigError;

/// Top-level error that wraps the per-crate errors.
///
/// The `#[from]` attributes generate `From` impls, so `?` converts a
/// [`TokenError`] or [`ConfigError`] automatically.
#[derive(Debug, thiserror::Error)]
pub enum SectokenError {
    /// Extracting, resolving, or minting a token failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The token configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SectokenError {
    /// Returns `true` if the caller should answer "please sign in" rather
    /// than report a server fault.
    pub fn requires_authentication(&self) -> bool {
        match self {
            Self::Token(err) => err.requires_authentication(),
            Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_error() {
        let err: SectokenError = TokenError::MissingToken("gone".into()).into();
        assert!(matches!(err, SectokenError::Token(_)));
        assert!(err.to_string().contains("gone"));
        assert!(err.requires_authentication());
    }

    #[test]
    fn test_from_config_error() {
        let err: SectokenError = ConfigError::EmptySecretKey.into();
        assert!(matches!(err, SectokenError::Config(_)));
        assert!(!err.requires_authentication());
    }

    #[test]
    fn test_generation_failure_is_server_fault() {
        let err: SectokenError =
            TokenError::GenerationFailure("no key".into()).into();
        assert!(!err.requires_authentication());
    }
}
