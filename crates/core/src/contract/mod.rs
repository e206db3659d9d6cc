//! Identifier value types
//!
//! These types define the identity contract every other layer relies on:
//!
//! 1. **Addressable**: every domain object has a canonical `RootOid`
//! 2. **Scoped**: collections are addressed relative to their root (`ParentedOid`)
//! 3. **Versioned**: a concurrency token rides along with, but outside of, identity
//! 4. **Projectable**: roots reduce to a public `Bookmark`
//!
//! ## Module Structure
//!
//! - `component`: reserved characters and WORD validation
//! - `state`: lifecycle states and identifier kinds
//! - `version`: concurrency tokens
//! - `policy`: identity equality policy
//! - `root_oid`: top-level identifiers and concurrency comparison
//! - `parented_oid`: collection identifiers
//! - `aggregated_oid`: legacy nested identifiers
//! - `oid`: the closed identifier sum type
//! - `bookmark`: public projection of a root

pub mod aggregated_oid;
pub mod bookmark;
pub mod component;
pub mod oid;
pub mod parented_oid;
pub mod policy;
pub mod root_oid;
pub mod state;
pub mod version;

// Re-exports
pub use aggregated_oid::{AggregateParent, AggregatedOid};
pub use bookmark::Bookmark;
pub use component::{
    is_word_char, Component, RESERVED_CHARS, SEPARATOR, SEPARATOR_COLLECTION, SEPARATOR_NESTING,
    SEPARATOR_RESERVED, SEPARATOR_VERSION,
};
pub use oid::Oid;
pub use parented_oid::ParentedOid;
pub use policy::IdentityPolicy;
pub use root_oid::{ComparisonResult, RootOid, VersionCell};
pub use state::{OidKind, OidState};
pub use version::Version;
