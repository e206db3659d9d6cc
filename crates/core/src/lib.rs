//! Core identifier types for Strata OIDs
//!
//! This crate defines the value types that give every domain object a
//! canonical identity:
//! - RootOid: identity of a top-level object, plus its concurrency version
//! - ParentedOid: identity of a collection owned by a root
//! - AggregatedOid: legacy nested identity, decode-only
//! - Oid: closed sum over the above and the value placeholder
//! - Version: optimistic-concurrency token
//! - Bookmark: version-free public projection of a root
//! - Error: error type hierarchy
//!
//! String encoding lives in `strata-oid-codec`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;

pub use error::{LegacyForm, OidError, OidResult, OID_PATTERN};

// Re-export contract types at crate root for convenience
pub use contract::{
    AggregateParent, AggregatedOid, Bookmark, ComparisonResult, Component, IdentityPolicy, Oid,
    OidKind, OidState, ParentedOid, RootOid, Version, VersionCell, RESERVED_CHARS,
};
