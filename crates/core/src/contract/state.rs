//! Lifecycle state and identifier kinds
//!
//! Only root identifiers carry a state. Parented and aggregated identifiers
//! delegate to the root they hang off.
//!
//! ## State Transitions
//!
//! ```text
//! Transient ──as_persistent──> Persistent
//! ViewModel   (terminal, never made persistent)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle tag of a root identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OidState {
    /// Stored by the persistence layer
    Persistent,
    /// Not yet persisted
    Transient,
    /// View model, recreated from its identifier rather than loaded
    ViewModel,
}

impl OidState {
    /// Prefix written in front of the type name, if any
    ///
    /// Persistent oids carry no marker.
    #[inline]
    pub const fn marker(&self) -> Option<char> {
        match self {
            OidState::Persistent => None,
            OidState::Transient => Some('!'),
            OidState::ViewModel => Some('*'),
        }
    }

    /// Map a marker character back to a state
    pub const fn from_marker(c: char) -> Option<Self> {
        match c {
            '!' => Some(OidState::Transient),
            '*' => Some(OidState::ViewModel),
            _ => None,
        }
    }

    /// Check if this is the persistent state
    #[inline]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, OidState::Persistent)
    }

    /// Check if this is the transient state
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(self, OidState::Transient)
    }

    /// Check if this is the view model state
    #[inline]
    pub const fn is_view_model(&self) -> bool {
        matches!(self, OidState::ViewModel)
    }

    /// Check if `self -> to` is an allowed transition
    pub const fn can_transition_to(&self, to: OidState) -> bool {
        matches!((self, to), (OidState::Transient, OidState::Persistent))
    }

    /// Get the state name
    pub const fn as_str(&self) -> &'static str {
        match self {
            OidState::Persistent => "persistent",
            OidState::Transient => "transient",
            OidState::ViewModel => "view model",
        }
    }
}

impl fmt::Display for OidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of identifier kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OidKind {
    /// Top-level domain object
    Root,
    /// Collection owned by a root
    Parented,
    /// Legacy nested identifier
    Aggregated,
    /// Value placeholder, has no identity
    Value,
}

impl fmt::Display for OidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OidKind::Root => "root",
            OidKind::Parented => "parented",
            OidKind::Aggregated => "aggregated",
            OidKind::Value => "value",
        };
        f.write_str(name)
    }
}
