//! Token lifecycle management for sectoken.
//!
//! This crate owns the one piece of shared mutable state in the system:
//!
//! 1. **Generation** — minting fresh token values ([`TokenGenerator`] trait,
//!    [`HmacTokenGenerator`], [`RandomTokenGenerator`])
//! 2. **Registry** — binding live tokens to user specifications
//!    ([`TokenRegistry`])
//! 3. **Configuration** — choosing the generator and its key material
//!    ([`TokenConfig`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (above)   ← signs users in and out, resolves requests
//!     ↕
//! Session Layer (this crate)  ← token → user specification
//!     ↕
//! Core (below)     ← provides Token, TokenError
//! ```
//!
//! The registry is volatile: it starts empty and everything in it is gone
//! when the process exits.

mod config;
mod generator;
mod registry;

pub use config::{ConfigError, GENERATOR_ENV, GeneratorKind, SECRET_KEY_ENV, TokenConfig};
pub use generator::{HmacTokenGenerator, LEGACY_SECRET_KEY, RandomTokenGenerator, TokenGenerator};
pub use registry::TokenRegistry;
