//! Concurrency-check version tokens
//!
//! A version is attached to a root identifier by the persistence layer at
//! write time and is compared on the next write (optimistic concurrency).
//! It is orthogonal to identity: versions never take part in oid equality
//! or hashing.
//!
//! ## Fields
//!
//! - `sequence`: the concurrency token proper. Absent means "no version
//!   information available".
//! - `user`: who made the change. Informational.
//! - `utc_timestamp`: when, in milliseconds since the Unix epoch. Informational.

use super::component::{self, Component};
use crate::error::OidResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Optimistic-concurrency token
///
/// Two versions are equal iff all three fields are equal. Change detection
/// ([`Version::differs_from`]) only looks at the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    sequence: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utc_timestamp: Option<u64>,
}

impl Version {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a version with the given sequence number
    pub const fn new(sequence: u64) -> Self {
        Version {
            sequence: Some(sequence),
            user: None,
            utc_timestamp: None,
        }
    }

    /// Create a version that carries no information
    pub const fn unknown() -> Self {
        Version {
            sequence: None,
            user: None,
            utc_timestamp: None,
        }
    }

    /// Create a version stamped with the current time
    pub fn stamped_now(sequence: u64, user: Option<&str>) -> OidResult<Self> {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        let version = Version::new(sequence).with_utc_timestamp(millis);
        match user {
            Some(user) => version.with_user(user),
            None => Ok(version),
        }
    }

    /// Record the user responsible for this version
    ///
    /// An empty user is treated as no user.
    ///
    /// # Errors
    ///
    /// `InvalidIdentifierCharacter` if the user contains a reserved character,
    /// since it is written inline in the version segment.
    pub fn with_user(mut self, user: impl Into<String>) -> OidResult<Self> {
        let user = user.into();
        if user.is_empty() {
            self.user = None;
            return Ok(self);
        }
        component::validate(Component::VersionUser, &user)?;
        self.user = Some(user);
        Ok(self)
    }

    /// Record when this version was created (ms since epoch)
    pub fn with_utc_timestamp(mut self, millis: u64) -> Self {
        self.utc_timestamp = Some(millis);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Sequence number, if known
    #[inline]
    pub fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    /// User, if recorded
    #[inline]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Raw timestamp in milliseconds since epoch, if recorded
    #[inline]
    pub fn utc_timestamp(&self) -> Option<u64> {
        self.utc_timestamp
    }

    /// Timestamp as a UTC date time, if recorded and representable
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.utc_timestamp?).ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Check if this version can be used for change detection
    #[inline]
    pub fn has_info(&self) -> bool {
        self.sequence.is_some()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Check if `other` represents a different revision
    ///
    /// Compares sequences only. Returns `false` when either side has no
    /// sequence; callers that need to tell "unchanged" from "unknown" should
    /// check [`Version::has_info`] first.
    pub fn differs_from(&self, other: &Version) -> bool {
        match (self.sequence, other.sequence) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sequence {
            Some(sequence) => write!(f, "#{}", sequence)?,
            None => write!(f, "#?")?,
        }
        if let Some(user) = &self.user {
            write!(f, " by {}", user)?;
        }
        if let Some(at) = self.timestamp() {
            write!(f, " at {}", at.to_rfc3339())?;
        }
        Ok(())
    }
}

impl From<u64> for Version {
    /// Create a version from a bare sequence number
    fn from(sequence: u64) -> Self {
        Version::new(sequence)
    }
}

// ============================================================================
// Tests
// ============================================================================
