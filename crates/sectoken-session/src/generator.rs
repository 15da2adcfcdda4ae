//! Token generation.
//!
//! The registry does not decide what a token looks like. It asks a
//! [`TokenGenerator`] for a fresh value every time a user signs in, so
//! the format can be swapped without touching registry code:
//!
//! - [`HmacTokenGenerator`] — HMAC-SHA256 of a random UUID, Base64
//!   encoded. This is the established token format.
//! - [`RandomTokenGenerator`] — 32 bytes straight from the OS-seeded
//!   CSPRNG, Base64 encoded. Same length and alphabet, no key needed.
//! - Your own type, e.g. a deterministic sequence in tests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sectoken_core::{Token, TokenError};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Key used by deployments that never configured one.
///
/// Tokens minted with a public key are only as unguessable as the UUID
/// behind them. Provision a real secret through
/// [`TokenConfig`](crate::TokenConfig).
pub const LEGACY_SECRET_KEY: &str = "app_security";

/// Produces fresh token values.
///
/// # Trait bounds
///
/// - `Send + Sync` → the registry holding the generator is shared across
///   request-handling threads.
/// - `'static` → the generator lives as long as the registry.
///
/// Implementations must make collisions practically impossible: the
/// registry trusts every generated value to be unused.
pub trait TokenGenerator: Send + Sync + 'static {
    /// Returns a new, never-before-issued token.
    ///
    /// # Errors
    /// [`TokenError::GenerationFailure`] when the algorithm or its key
    /// material is unusable.
    fn generate(&self) -> Result<Token, TokenError>;
}

impl TokenGenerator for Box<dyn TokenGenerator> {
    fn generate(&self) -> Result<Token, TokenError> {
        (**self).generate()
    }
}

// ---------------------------------------------------------------------------
// HmacTokenGenerator
// ---------------------------------------------------------------------------

/// Mints tokens as `base64(HMAC-SHA256(key, uuid_v4_text))`.
///
/// The UUID is rendered in its hyphenated lowercase form before hashing.
/// Output is always 44 characters of standard, padded Base64.
pub struct HmacTokenGenerator {
    key: Vec<u8>,
}

impl HmacTokenGenerator {
    /// Creates a generator keyed with `secret_key`.
    ///
    /// # Errors
    /// [`TokenError::GenerationFailure`] if the key is empty.
    pub fn new(secret_key: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let key = secret_key.as_ref();
        if key.is_empty() {
            return Err(TokenError::GenerationFailure(
                "HMAC key must not be empty".into(),
            ));
        }
        Ok(Self { key: key.to_vec() })
    }

    /// Creates a generator keyed with [`LEGACY_SECRET_KEY`].
    pub fn legacy() -> Self {
        Self {
            key: LEGACY_SECRET_KEY.as_bytes().to_vec(),
        }
    }

    /// Computes the token value for a given identifier.
    fn sign(&self, id: &str) -> Result<Token, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| TokenError::GenerationFailure(e.to_string()))?;
        mac.update(id.as_bytes());
        let digest = mac.finalize().into_bytes();
        Token::new(STANDARD.encode(digest))
    }
}

impl TokenGenerator for HmacTokenGenerator {
    fn generate(&self) -> Result<Token, TokenError> {
        let id = Uuid::new_v4().to_string();
        self.sign(&id)
    }
}

impl std::fmt::Debug for HmacTokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenGenerator")
            .field("key", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RandomTokenGenerator
// ---------------------------------------------------------------------------

/// Mints tokens as `base64(32 random bytes)` using the thread-local CSPRNG.
///
/// Same shape as [`HmacTokenGenerator`] output (44 Base64 characters), so
/// clients cannot tell the two apart.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Result<Token, TokenError> {
        let bytes: [u8; 32] = rand::rng().random();
        Token::new(STANDARD.encode(bytes))
    }
}
