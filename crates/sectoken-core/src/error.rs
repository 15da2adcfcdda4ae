//! Error types for token handling.
//!
//! Every layer of sectoken reports failures through [`TokenError`], so a
//! caller resolving a request deals with one enum no matter whether the
//! problem was in parsing, lookup, or generation.

/// Errors that can occur while minting, extracting, or resolving a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// A candidate token value was absent, empty, or too short.
    ///
    /// Also raised for a malformed `Authorization` header (wrong scheme).
    #[error("invalid security token value: {0}")]
    InvalidTokenValue(String),

    /// No candidate token could be located in the request: no cookies at
    /// all, no cookie with the token name, or no `Authorization` header.
    #[error("missing security token: {0}")]
    MissingToken(String),

    /// The token is well-formed but no user specification is bound to it.
    ///
    /// Carries the token's fingerprint, never the full value.
    #[error("{0}: no such user specification")]
    UnknownToken(String),

    /// The keyed-hash algorithm or its key material is unusable.
    /// This is a configuration fault, not a client error.
    #[error("cannot generate security token: {0}")]
    GenerationFailure(String),
}

impl TokenError {
    /// Returns `true` if the error means "the client is not signed in".
    ///
    /// The HTTP layer typically answers these with 401 and treats
    /// [`TokenError::GenerationFailure`] as a server fault.
    pub fn requires_authentication(&self) -> bool {
        !matches!(self, Self::GenerationFailure(_))
    }
}
