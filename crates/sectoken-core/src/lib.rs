//! Token identity for sectoken.
//!
//! This crate defines the two leaf types every other layer speaks:
//!
//! - **[`Token`]** — the opaque, validated session identifier handed to
//!   clients after sign-in.
//! - **[`TokenError`]** — everything that can go wrong while minting,
//!   locating, or resolving a token.
//!
//! # Architecture
//!
//! ```text
//! HTTP layer (cookies, headers) → Core (Token) ← Session layer (registry)
//! ```
//!
//! The core knows nothing about requests or storage. It only guarantees
//! that a `Token` can never hold an empty value.

mod error;
mod token;

pub use error::TokenError;
pub use token::Token;
