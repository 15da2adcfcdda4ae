//! The token registry: binds live tokens to user specifications.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Minting a token when a user signs in and remembering who it belongs to
//! - Resolving a token back to its user specification on every request
//! - Forgetting a token when the user signs out
//!
//! # Concurrency note
//!
//! `TokenRegistry` is safe to share between threads as-is (wrap it in an
//! `Arc`). Entries live in a sharded [`DashMap`], so every operation takes
//! `&self` and callers never lock anything themselves. No operation awaits
//! or performs I/O.

use std::fmt;

use dashmap::DashMap;
use sectoken_core::{Token, TokenError};

use crate::{ConfigError, TokenConfig, TokenGenerator};

/// Maps live tokens to user specifications of type `T`.
///
/// `T` is opaque to the registry: it is stored on sign-in and handed back
/// on lookup, never inspected.
///
/// ## Lifecycle
///
/// ```text
/// create_new(spec) ──→ [live] ──→ remove_security_token()
///                        │
///                        ├── exists()   → true
///                        └── get_user() → spec
/// ```
///
/// The registry starts empty and has no persistence. Dropping it (or
/// restarting the process) signs everybody out.
pub struct TokenRegistry<T, G = Box<dyn TokenGenerator>> {
    /// Live entries. At most one specification per token.
    entries: DashMap<Token, T>,

    /// Source of fresh token values.
    generator: G,
}

impl<T> TokenRegistry<T> {
    /// Creates an empty registry using the generator described by `config`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the config is unusable (e.g. HMAC
    /// selected with an empty key).
    pub fn from_config(config: &TokenConfig) -> Result<Self, ConfigError> {
        let generator = config.build_generator()?;
        tracing::debug!(generator = ?config.generator, "token registry created");
        Ok(Self::new(generator))
    }
}

impl<T, G: TokenGenerator> TokenRegistry<T, G> {
    /// Creates an empty registry that mints tokens with `generator`.
    pub fn new(generator: G) -> Self {
        Self {
            entries: DashMap::new(),
            generator,
        }
    }

    /// Mints a new token for a user who just signed in.
    ///
    /// Generates a fresh token and binds `spec` to it. Generators are
    /// trusted to produce unique values; should one ever collide, the new
    /// specification replaces the old one.
    ///
    /// # Errors
    /// Returns [`TokenError::GenerationFailure`] if the generator fails.
    pub fn create_new(&self, spec: T) -> Result<Token, TokenError> {
        let token = self.generator.generate()?;

        if self.entries.insert(token.clone(), spec).is_some() {
            tracing::warn!(
                token = token.fingerprint(),
                "generated token collided with a live one, entry replaced"
            );
        }

        tracing::info!(token = token.fingerprint(), "security token created");
        Ok(token)
    }

    /// Ends the session behind `token`. Usually called on sign-out.
    ///
    /// Removing a token that is not registered is a no-op, so signing out
    /// twice is harmless. Returns the specification that was bound to the
    /// token, if any.
    pub fn remove_security_token(&self, token: &Token) -> Option<T> {
        let removed = self.entries.remove(token).map(|(_, spec)| spec);
        if removed.is_some() {
            tracing::info!(token = token.fingerprint(), "security token removed");
        } else {
            tracing::debug!(
                token = token.fingerprint(),
                "removal of unknown security token ignored"
            );
        }
        removed
    }

    /// Returns the user specification bound to `token`.
    ///
    /// Hands back a clone; use [`TokenRegistry::with_user`] to borrow
    /// instead.
    ///
    /// # Errors
    /// Returns [`TokenError::UnknownToken`] if the token is not registered.
    pub fn get_user(&self, token: &Token) -> Result<T, TokenError>
    where
        T: Clone,
    {
        self.with_user(token, T::clone)
    }

    /// Runs `f` on the user specification bound to `token`.
    ///
    /// The entry's shard is read-locked while `f` runs, so `f` must not
    /// call back into this registry.
    ///
    /// # Errors
    /// Returns [`TokenError::UnknownToken`] if the token is not registered.
    pub fn with_user<R>(&self, token: &Token, f: impl FnOnce(&T) -> R) -> Result<R, TokenError> {
        match self.entries.get(token) {
            Some(entry) => Ok(f(entry.value())),
            None => {
                tracing::debug!(
                    token = token.fingerprint(),
                    "lookup of unknown security token"
                );
                Err(TokenError::UnknownToken(token.fingerprint().to_string()))
            }
        }
    }

    /// Returns `true` if `token` is currently registered.
    pub fn exists(&self, token: &Token) -> bool {
        self.entries.contains_key(token)
    }

    /// Returns the number of live tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no tokens are live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry, signing all users out.
    pub fn clear(&self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::info!(count, "token registry cleared");
    }
}

impl<T, G> fmt::Debug for TokenRegistry<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
