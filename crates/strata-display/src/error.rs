//! Error types for filter configuration.
//!
//! Only configuration can fail recoverably. Broken display-buffer invariants
//! (splitting outside an atom, inserting a non-synthetic atom) are programming
//! errors and panic at the point of violation.

use std::fmt;

/// Result type alias for strata-display operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for filter lookup and construction.
#[derive(Debug)]
pub enum Error {
    /// No factory registered under this name.
    UnknownFilter(String),
    /// A filter with this id is already in the pipeline.
    DuplicateFilter(String),
    /// Parameter token was not `key=value`.
    MalformedParameter(String),
    /// A filter does not accept this parameter key.
    UnknownParameter { filter: String, key: String },
    /// A required parameter was not supplied.
    MissingParameter { filter: String, key: String },
    /// A parameter value failed to parse or is out of range.
    InvalidParameter {
        filter: String,
        key: String,
        value: String,
    },
    /// Color name not in the palette.
    InvalidColor(String),
    /// Pattern failed to compile.
    Regex(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFilter(name) => write!(f, "no such filter: {name}"),
            Self::DuplicateFilter(id) => write!(f, "filter id not unique: {id}"),
            Self::MalformedParameter(token) => {
                write!(f, "malformed parameter (expected key=value): {token}")
            }
            Self::UnknownParameter { filter, key } => {
                write!(f, "{filter}: unknown parameter '{key}'")
            }
            Self::MissingParameter { filter, key } => {
                write!(f, "{filter}: missing parameter '{key}'")
            }
            Self::InvalidParameter { filter, key, value } => {
                write!(f, "{filter}: invalid value for '{key}': {value}")
            }
            Self::InvalidColor(name) => write!(f, "invalid color: {name}"),
            Self::Regex(e) => write!(f, "invalid pattern: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Regex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::Regex(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_the_offender() {
        let err = Error::UnknownFilter("hlpy".to_string());
        assert_eq!(err.to_string(), "no such filter: hlpy");

        let err = Error::InvalidParameter {
            filter: "expand_tabs".to_string(),
            key: "tabstop".to_string(),
            value: "0".to_string(),
        };
        assert_eq!(err.to_string(), "expand_tabs: invalid value for 'tabstop': 0");
    }

    #[test]
    fn regex_error_is_source() {
        let re_err = regex::Regex::new("(").unwrap_err();
        let err: Error = re_err.into();
        assert!(err.to_string().starts_with("invalid pattern"));
        assert!(err.source().is_some());
    }

    #[test]
    fn config_errors_have_no_source() {
        assert!(Error::DuplicateFilter("x".to_string()).source().is_none());
    }
}
