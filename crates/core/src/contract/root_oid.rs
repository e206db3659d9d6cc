//! Root identifiers
//!
//! A [`RootOid`] is the canonical identity of a top-level domain object:
//! `(logical type name, identifier, state)` plus a concurrency version.
//!
//! ## Identity vs Version
//!
//! The identity part is immutable and its hash is computed once, at
//! construction. The version lives in a separate [`VersionCell`] that can be
//! updated through a shared reference after a successful write, so children
//! holding an `Arc<RootOid>` see the bump without being rebuilt. The version
//! never participates in equality or hashing.
//!
//! The cell is lock-protected, but concurrent writers to the same object are
//! expected to be serialized by the session layer.
//!
//! ## Lifecycle
//!
//! A transient oid becomes persistent via [`RootOid::as_persistent`], which
//! returns a *new* oid. Children built against the old root must be rebuilt
//! with their own `as_persistent`.

use super::bookmark::Bookmark;
use super::component::{self, Component};
use super::policy::IdentityPolicy;
use super::state::OidState;
use super::version::Version;
use crate::error::{OidError, OidResult};
use parking_lot::RwLock;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Outcome of comparing two root oids for optimistic concurrency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    /// Different identity
    NotEquivalent,
    /// Same identity, both versioned, same sequence
    EquivalentAndUnchanged,
    /// Same identity, both versioned, different sequence
    EquivalentButChanged,
    /// Same identity, at least one side has no version information
    ///
    /// Callers must not treat this as unchanged.
    EquivalentButNoVersionInfo,
}

impl ComparisonResult {
    /// Check if the two oids identify the same object
    pub const fn is_equivalent(&self) -> bool {
        !matches!(self, ComparisonResult::NotEquivalent)
    }
}

/// Mutable concurrency slot of a root oid
#[derive(Debug, Default)]
pub struct VersionCell(RwLock<Option<Version>>);

impl VersionCell {
    /// Create a cell holding `version`
    pub fn new(version: Option<Version>) -> Self {
        VersionCell(RwLock::new(version))
    }

    /// Snapshot of the current version
    pub fn get(&self) -> Option<Version> {
        self.0.read().clone()
    }

    /// Replace the current version
    pub fn set(&self, version: Option<Version>) {
        *self.0.write() = version;
    }

    /// Check if the current version carries a sequence
    pub fn has_info(&self) -> bool {
        self.0.read().as_ref().is_some_and(Version::has_info)
    }
}

impl Clone for VersionCell {
    fn clone(&self) -> Self {
        VersionCell::new(self.get())
    }
}

#[derive(Debug, Clone)]
struct RootIdentity {
    logical_type_name: String,
    identifier: String,
    state: OidState,
    policy: IdentityPolicy,
    hash: u64,
}

impl RootIdentity {
    fn new(
        logical_type_name: String,
        identifier: String,
        state: OidState,
        policy: IdentityPolicy,
    ) -> Self {
        let mut hasher = FxHasher::default();
        policy.hash(&mut hasher);
        logical_type_name.hash(&mut hasher);
        identifier.hash(&mut hasher);
        if policy.includes_state() {
            state.hash(&mut hasher);
        }
        RootIdentity {
            logical_type_name,
            identifier,
            state,
            policy,
            hash: hasher.finish(),
        }
    }
}

impl PartialEq for RootIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.policy == other.policy
            && self.logical_type_name == other.logical_type_name
            && self.identifier == other.identifier
            && (!self.policy.includes_state() || self.state == other.state)
    }
}

impl Eq for RootIdentity {}

/// Identifier of a top-level domain object
#[derive(Clone)]
pub struct RootOid {
    identity: RootIdentity,
    version: VersionCell,
}

impl RootOid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a root oid under the default identity policy
    ///
    /// # Errors
    ///
    /// Returns an error if the type name or identifier is empty or contains a
    /// reserved character.
    pub fn new(
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
        state: OidState,
    ) -> OidResult<Self> {
        Self::with_policy(
            logical_type_name,
            identifier,
            state,
            IdentityPolicy::default(),
        )
    }

    /// Create a root oid under an explicit identity policy
    pub fn with_policy(
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
        state: OidState,
        policy: IdentityPolicy,
    ) -> OidResult<Self> {
        let logical_type_name = logical_type_name.into();
        let identifier = identifier.into();
        component::validate(Component::LogicalTypeName, &logical_type_name)?;
        component::validate(Component::Identifier, &identifier)?;
        Ok(RootOid {
            identity: RootIdentity::new(logical_type_name, identifier, state, policy),
            version: VersionCell::default(),
        })
    }

    /// Create a persistent root oid
    pub fn persistent(
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> OidResult<Self> {
        Self::new(logical_type_name, identifier, OidState::Persistent)
    }

    /// Create a transient root oid
    pub fn transient(
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> OidResult<Self> {
        Self::new(logical_type_name, identifier, OidState::Transient)
    }

    /// Create a view model root oid
    pub fn view_model(
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> OidResult<Self> {
        Self::new(logical_type_name, identifier, OidState::ViewModel)
    }

    /// Attach a version, consuming `self`
    pub fn with_version(self, version: Option<Version>) -> Self {
        self.version.set(version);
        self
    }

    /// Rebuild a persistent root oid from a bookmark
    pub fn from_bookmark(bookmark: &Bookmark) -> OidResult<Self> {
        Self::from_bookmark_with_policy(bookmark, IdentityPolicy::default())
    }

    /// Rebuild a persistent root oid from a bookmark under `policy`
    ///
    /// Use the policy of the oids the result will be compared with; a
    /// bookmark does not carry one.
    pub fn from_bookmark_with_policy(
        bookmark: &Bookmark,
        policy: IdentityPolicy,
    ) -> OidResult<Self> {
        Self::with_policy(
            bookmark.object_type(),
            bookmark.identifier(),
            OidState::Persistent,
            policy,
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Short, stable type tag
    #[inline]
    pub fn logical_type_name(&self) -> &str {
        &self.identity.logical_type_name
    }

    /// Instance key
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identity.identifier
    }

    /// Lifecycle state
    #[inline]
    pub fn state(&self) -> OidState {
        self.identity.state
    }

    /// Equality policy this oid was built under
    #[inline]
    pub fn policy(&self) -> IdentityPolicy {
        self.identity.policy
    }

    /// Check if this oid is persistent
    pub fn is_persistent(&self) -> bool {
        self.state().is_persistent()
    }

    /// Check if this oid is transient
    pub fn is_transient(&self) -> bool {
        self.state().is_transient()
    }

    /// Check if this oid is a view model
    pub fn is_view_model(&self) -> bool {
        self.state().is_view_model()
    }

    /// Snapshot of the current version
    pub fn version(&self) -> Option<Version> {
        self.version.get()
    }

    /// Replace the version after a write
    ///
    /// Identity, equality and hash are unaffected.
    pub fn set_version(&self, version: Option<Version>) {
        self.version.set(version);
    }

    /// Check if the current version can be used for change detection
    pub fn has_version_info(&self) -> bool {
        self.version.has_info()
    }

    /// Public `(objectType, identifier)` projection
    ///
    /// Drops state and version.
    pub fn as_bookmark(&self) -> Bookmark {
        Bookmark::new(self.logical_type_name(), self.identifier())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Check identity equality (same as `==`)
    pub fn same_identity(&self, other: &RootOid) -> bool {
        self.identity == other.identity
    }

    /// Persisted counterpart of a transient oid
    ///
    /// The returned oid has no version. Parented or aggregated children of
    /// `self` must be rebuilt against it.
    ///
    /// # Errors
    ///
    /// `IllegalStateTransition` unless `self` is transient, or a component
    /// error if `identifier` is invalid.
    pub fn as_persistent(&self, identifier: impl Into<String>) -> OidResult<RootOid> {
        let from = self.state();
        if !from.can_transition_to(OidState::Persistent) {
            return Err(OidError::IllegalStateTransition {
                from,
                operation: "make persistent",
            });
        }
        let persisted = RootOid::with_policy(
            self.logical_type_name(),
            identifier,
            OidState::Persistent,
            self.policy(),
        )?;
        debug!(
            logical_type_name = self.logical_type_name(),
            transient = self.identifier(),
            persistent = persisted.identifier(),
            "root oid made persistent"
        );
        Ok(persisted)
    }

    /// Classify `other` for an optimistic-concurrency check
    pub fn compare_against(&self, other: &RootOid) -> ComparisonResult {
        if !self.same_identity(other) {
            return ComparisonResult::NotEquivalent;
        }
        match (self.version(), other.version()) {
            (Some(mine), Some(theirs)) if mine.has_info() && theirs.has_info() => {
                if mine.differs_from(&theirs) {
                    ComparisonResult::EquivalentButChanged
                } else {
                    ComparisonResult::EquivalentAndUnchanged
                }
            }
            _ => ComparisonResult::EquivalentButNoVersionInfo,
        }
    }
}

impl PartialEq for RootOid {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for RootOid {}

impl Hash for RootOid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity.hash);
    }
}

impl fmt::Debug for RootOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootOid")
            .field("logical_type_name", &self.identity.logical_type_name)
            .field("identifier", &self.identity.identifier)
            .field("state", &self.identity.state)
            .field("version", &self.version())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
