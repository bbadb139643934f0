//! Filter parameters — `key=value` settings handed to filter factories.
//!
//! Parameters are parsed the way an editor parses a `:set` line: each token
//! is `key=value`, split at the first `=`, so values may themselves contain
//! `=` (useful for regex patterns). A later token for the same key replaces
//! the earlier one.
//!
//! | Filter          | Key       | Type    | Default            |
//! |-----------------|-----------|---------|--------------------|
//! | `expand_tabs`   | `tabstop` | integer | 8                  |
//! | `regex`         | `pattern` | regex   | required           |
//! | `regex`         | `color`   | color   | required           |
//! | `regex`         | `id`      | string  | `hlregex_<pattern>`|
//!
//! Factories validate their own keys with [`FilterParameters::expect_only`]
//! so a typo is a configuration error instead of a silently ignored setting.

use crate::error::{Error, Result};
use crate::style::Color;

/// Ordered `key=value` settings for one filter instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParameters {
    entries: Vec<(String, String)>,
}

/// Split one `key=value` token.
///
/// # Errors
///
/// Returns [`Error::MalformedParameter`] when there is no `=` or the key is
/// empty.
pub fn parse_param(token: &str) -> Result<(String, String)> {
    match token.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::MalformedParameter(token.to_string())),
    }
}

impl FilterParameters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a sequence of `key=value` tokens.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed token.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for token in tokens {
            let (key, value) = parse_param(token.as_ref())?;
            params.set(key, value);
        }
        Ok(params)
    }

    /// Set `key`, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Reject any key not in `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for the first unexpected key.
    pub fn expect_only(&self, filter: &str, allowed: &[&str]) -> Result<()> {
        match self.keys().find(|key| !allowed.contains(key)) {
            Some(key) => Err(Error::UnknownParameter {
                filter: filter.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// A value that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] when `key` was not given.
    pub fn require(&self, filter: &str, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingParameter {
            filter: filter.to_string(),
            key: key.to_string(),
        })
    }

    /// An integer value of at least `min`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value does not parse or is
    /// below `min`.
    pub fn usize_or(&self, filter: &str, key: &str, default: usize, min: usize) -> Result<usize> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n >= min => Ok(n),
            _ => Err(Error::InvalidParameter {
                filter: filter.to_string(),
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// A required color value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] or [`Error::InvalidColor`].
    pub fn color(&self, filter: &str, key: &str) -> Result<Color> {
        self.require(filter, key)?.parse()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
