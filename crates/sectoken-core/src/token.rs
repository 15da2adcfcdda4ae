//! The security token type.
//!
//! A [`Token`] is what a client carries between requests after signing
//! in: a cookie value or the credential of a `Bearer` header. The server
//! never interprets its contents; it is only ever compared, hashed, and
//! looked up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Number of leading characters shown by [`Token::fingerprint`].
const FINGERPRINT_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// An opaque, non-empty session identifier.
///
/// Equality, ordering, and hashing all derive from the wrapped string
/// alone, so the three are consistent by construction: two tokens are
/// equal exactly when their values are, and equal tokens hash equally.
/// Ordering is lexical over the UTF-8 bytes.
///
/// The only way to build a `Token` is through a validating constructor
/// ([`Token::new`], [`FromStr`], [`TryFrom`], or deserialization), which
/// rejects empty values with [`TokenError::InvalidTokenValue`].
///
/// Serialized as the bare string: `Token("abc")` becomes `"abc"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Wraps `value` in a token.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidTokenValue`] if `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TokenError::InvalidTokenValue(
                "value must not be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Like [`Token::new`], but for a value that may be absent altogether.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidTokenValue`] for `None` or `""`.
    pub fn from_optional(value: Option<&str>) -> Result<Self, TokenError> {
        match value {
            Some(value) => Self::new(value),
            None => Err(TokenError::InvalidTokenValue(
                "value must not be absent".into(),
            )),
        }
    }

    /// Returns the wrapped value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the wrapped value.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// A short prefix of the value, safe to put in logs and error messages.
    pub fn fingerprint(&self) -> &str {
        match self.0.char_indices().nth(FINGERPRINT_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Token {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn tok(value: &str) -> Token {
        Token::new(value).expect("non-empty value")
    }

    fn hash_of(token: &Token) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    // =====================================================================
    // Construction
    // =====================================================================

    #[test]
    fn test_new_non_empty_value_round_trips() {
        for value in ["a", "abc123", "with space", "ünïcødé", "x=y;z"] {
            assert_eq!(tok(value).as_str(), value);
        }
    }

    #[test]
    fn test_new_empty_value_returns_invalid() {
        let result = Token::new("");
        assert!(matches!(result, Err(TokenError::InvalidTokenValue(_))));
    }

    #[test]
    fn test_from_optional_none_returns_invalid() {
        let result = Token::from_optional(None);
        assert!(matches!(result, Err(TokenError::InvalidTokenValue(_))));
    }

    #[test]
    fn test_from_optional_some_empty_returns_invalid() {
        let result = Token::from_optional(Some(""));
        assert!(matches!(result, Err(TokenError::InvalidTokenValue(_))));
    }

    #[test]
    fn test_from_optional_some_value_succeeds() {
        assert_eq!(Token::from_optional(Some("abc")).unwrap(), tok("abc"));
    }

    #[test]
    fn test_from_str_and_try_from_agree_with_new() {
        let parsed: Token = "abc".parse().unwrap();
        assert_eq!(parsed, tok("abc"));
        assert_eq!(Token::try_from("abc".to_string()).unwrap(), tok("abc"));
        assert!("".parse::<Token>().is_err());
    }

    #[test]
    fn test_into_inner_returns_value() {
        assert_eq!(tok("abc").into_inner(), "abc");
    }

    // =====================================================================
    // Equality, ordering, hashing
    // =====================================================================

    #[test]
    fn test_eq_follows_value() {
        assert_eq!(tok("abc"), tok("abc"));
        assert_ne!(tok("abc"), tok("abd"));
        // Case matters: tokens are opaque bytes.
        assert_ne!(tok("abc"), tok("ABC"));
    }

    #[test]
    fn test_equal_tokens_hash_equal() {
        assert_eq!(hash_of(&tok("abc")), hash_of(&tok("abc")));
    }

    #[test]
    fn test_cmp_is_lexical_and_consistent_with_eq() {
        assert_eq!(tok("abc").cmp(&tok("abd")), Ordering::Less);
        assert_eq!(tok("b").cmp(&tok("abc")), Ordering::Greater);
        assert_eq!(tok("abc").cmp(&tok("abc")), Ordering::Equal);
    }

    #[test]
    fn test_hash_set_deduplicates_equal_tokens() {
        let set: HashSet<Token> =
            [tok("a"), tok("b"), tok("a")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    // =====================================================================
    // Display / fingerprint / serde
    // =====================================================================

    #[test]
    fn test_display_prints_value() {
        assert_eq!(tok("abc123").to_string(), "abc123");
    }

    #[test]
    fn test_fingerprint_truncates_long_values() {
        assert_eq!(tok("abcdefghijklmnop").fingerprint(), "abcdefgh");
    }

    #[test]
    fn test_fingerprint_keeps_short_values() {
        assert_eq!(tok("abc").fingerprint(), "abc");
    }

    #[test]
    fn test_fingerprint_respects_char_boundaries() {
        assert_eq!(tok("ééééééééé").fingerprint(), "éééééééé");
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let json = serde_json::to_string(&tok("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn test_token_deserialize_rejects_empty_string() {
        let result: Result<Token, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
        let token: Token = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(token, tok("abc"));
    }
}
