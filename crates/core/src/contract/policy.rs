//! Identity equality policy
//!
//! Root identifiers can be compared in two ways:
//!
//! - [`IdentityPolicy::StateAware`]: `(logical type name, identifier, state)`.
//!   A transient and a persistent oid with the same key are different objects.
//! - [`IdentityPolicy::TypeAndIdentifier`]: `(logical type name, identifier)`.
//!   State is ignored.
//!
//! The policy is fixed when an oid is constructed and is part of its
//! identity. Oids built under different policies never compare equal, so the
//! two rules cannot be mixed silently.
//!
//! Plain constructors such as `RootOid::persistent` use the default policy.
//! Code running under a non-default policy builds its oids through
//! `RootOid::with_policy` and `RootOid::from_bookmark_with_policy`, or through
//! the codec's `Marshaller`, which applies its configured policy to both
//! construction and decoding.

use serde::{Deserialize, Serialize};

/// Which fields of a root identifier take part in equality and hashing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Type name, identifier and state
    #[default]
    StateAware,
    /// Type name and identifier only
    TypeAndIdentifier,
}

impl IdentityPolicy {
    /// Check if state participates in identity under this policy
    #[inline]
    pub const fn includes_state(&self) -> bool {
        matches!(self, IdentityPolicy::StateAware)
    }
}
