//! Error types for object identifiers
//!
//! Every failure the codec can report is a variant of [`OidError`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! None of these are recoverable inside the codec. They are handed to the
//! immediate caller, which decides whether to retry, abort or report.

use crate::contract::{Component, OidKind, OidState};
use thiserror::Error;

/// Result type alias for identifier operations
pub type OidResult<T> = std::result::Result<T, OidError>;

/// Human readable form of the identifier grammar, used in parse errors
pub const OID_PATTERN: &str =
    "[!|*]TYPE:ID(~TYPE:LOCALID)*($MEMBER)?(^SEQUENCE(:USER?)?(:TIMESTAMP?)?)?";

/// Retired grammar branches that are still recognized when decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyForm {
    /// `root~type:localId` nesting chain
    AggregatedChain,
    /// `root~type:localId$member`, a collection owned by an aggregate
    ParentedAggregate,
}

impl std::fmt::Display for LegacyForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegacyForm::AggregatedChain => write!(f, "aggregated OIDs"),
            LegacyForm::ParentedAggregate => write!(f, "collections of aggregated OIDs"),
        }
    }
}

/// Error types for identifier construction, encoding and decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OidError {
    /// Input does not match the identifier grammar
    #[error(
        "malformed oid string '{input}' at position {position}: {reason} (expected {})",
        OID_PATTERN
    )]
    Malformed {
        /// The offending string
        input: String,
        /// Byte offset where parsing stopped
        position: usize,
        /// What the parser was looking for
        reason: String,
    },

    /// Input matches a grammar branch that is no longer constructed
    #[error("{form} are no longer supported: '{input}'")]
    UnsupportedLegacyForm {
        /// The offending string (empty for programmatic construction)
        input: String,
        /// Which retired construct was recognized
        form: LegacyForm,
    },

    /// Input parsed, but to a different identifier kind than requested
    #[error("oid string '{input}' is a {actual} oid, but a {requested} oid was requested")]
    WrongKind {
        /// The decoded string
        input: String,
        /// Kind the caller asked for
        requested: OidKind,
        /// Kind the string actually holds
        actual: OidKind,
    },

    /// A programmatically supplied value contains a reserved character
    #[error(
        "{component} '{value}' contains reserved character '{character}' at position {position}"
    )]
    InvalidIdentifierCharacter {
        /// Which part of the identifier was being set
        component: Component,
        /// The rejected value
        value: String,
        /// The reserved character
        character: char,
        /// Character offset of the reserved character
        position: usize,
    },

    /// A required identifier component is empty
    #[error("{component} cannot be empty")]
    EmptyComponent {
        /// Which part of the identifier was empty
        component: Component,
    },

    /// `as_persistent` (or re-parenting) attempted from the wrong state
    #[error("illegal state transition: cannot {operation} a {from} oid")]
    IllegalStateTransition {
        /// State the oid was in
        from: OidState,
        /// The attempted operation
        operation: &'static str,
    },

    /// Codec configuration could not be loaded
    #[error("invalid codec configuration: {reason}")]
    Config {
        /// Why the configuration was rejected
        reason: String,
    },
}

impl OidError {
    /// Create a parse error for `input`
    pub fn malformed(input: &str, position: usize, reason: impl Into<String>) -> Self {
        OidError::Malformed {
            input: input.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        OidError::Config {
            reason: reason.into(),
        }
    }

    /// Input did not match the grammar ("bad data")
    pub fn is_malformed(&self) -> bool {
        matches!(self, OidError::Malformed { .. })
    }

    /// Input used a retired grammar branch ("old data")
    pub fn is_legacy(&self) -> bool {
        matches!(self, OidError::UnsupportedLegacyForm { .. })
    }

    /// Input decoded to the wrong identifier kind
    pub fn is_wrong_kind(&self) -> bool {
        matches!(self, OidError::WrongKind { .. })
    }

    /// A programmatic value was rejected before any encoding
    pub fn is_invalid_component(&self) -> bool {
        matches!(
            self,
            OidError::InvalidIdentifierCharacter { .. } | OidError::EmptyComponent { .. }
        )
    }

    /// A lifecycle transition was refused
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, OidError::IllegalStateTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed() {
        let err = OidError::malformed("CUS", 3, "expected ':'");
        let msg = err.to_string();
        assert!(msg.contains("malformed"));
        assert!(msg.contains("'CUS'"));
        assert!(msg.contains("expected ':'"));
        assert!(msg.contains(OID_PATTERN));
    }

    #[test]
    fn test_error_display_legacy() {
        let err = OidError::UnsupportedLegacyForm {
            input: "CUS:1~ADR:2".to_string(),
            form: LegacyForm::AggregatedChain,
        };
        assert_eq!(
            err.to_string(),
            "aggregated OIDs are no longer supported: 'CUS:1~ADR:2'"
        );
    }

    #[test]
    fn test_error_display_wrong_kind() {
        let err = OidError::WrongKind {
            input: "CUS:1$items".to_string(),
            requested: OidKind::Root,
            actual: OidKind::Parented,
        };
        let msg = err.to_string();
        assert!(msg.contains("parented"));
        assert!(msg.contains("root"));
    }

    #[test]
    fn test_error_display_invalid_character() {
        let err = OidError::InvalidIdentifierCharacter {
            component: Component::Identifier,
            value: "A:B".to_string(),
            character: ':',
            position: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("identifier"));
        assert!(msg.contains("'A:B'"));
        assert!(msg.contains("':'"));
    }

    #[test]
    fn test_error_display_transition() {
        let err = OidError::IllegalStateTransition {
            from: OidState::Persistent,
            operation: "make persistent",
        };
        assert_eq!(
            err.to_string(),
            "illegal state transition: cannot make persistent a persistent oid"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(OidError::malformed("", 0, "empty").is_malformed());
        assert!(OidError::EmptyComponent {
            component: Component::MemberName
        }
        .is_invalid_component());
        assert!(!OidError::config("bad").is_legacy());
    }
}
