//! The identifier sum type
//!
//! [`Oid`] is what flows through the metamodel, persistence and viewer
//! layers. It is closed: a root, a parented collection, a legacy aggregate,
//! or the value placeholder.
//!
//! ## Value Placeholder
//!
//! Strings, numbers and other value types never get an identity. They are
//! represented by [`Oid::Value`], and every accessor that needs an identity
//! returns `None` for it instead of failing. Callers check "does this have
//! an oid" generically across value and reference types.

use super::aggregated_oid::AggregatedOid;
use super::bookmark::Bookmark;
use super::parented_oid::ParentedOid;
use super::root_oid::RootOid;
use super::state::{OidKind, OidState};
use std::sync::Arc;

/// Any object identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Oid {
    /// Top-level domain object
    Root(RootOid),
    /// Collection owned by a root
    Parented(ParentedOid),
    /// Legacy nested identifier
    Aggregated(AggregatedOid),
    /// Value type, no identity
    Value,
}

impl Oid {
    /// The kind of this oid
    pub fn kind(&self) -> OidKind {
        match self {
            Oid::Root(_) => OidKind::Root,
            Oid::Parented(_) => OidKind::Parented,
            Oid::Aggregated(_) => OidKind::Aggregated,
            Oid::Value => OidKind::Value,
        }
    }

    /// Check if this is the value placeholder
    pub fn is_value(&self) -> bool {
        matches!(self, Oid::Value)
    }

    /// Instance key: the root identifier or the aggregate local id
    ///
    /// `None` for parented oids (they are keyed by their parent and member)
    /// and for the value placeholder.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Oid::Root(root) => Some(root.identifier()),
            Oid::Aggregated(aggregated) => Some(aggregated.local_id()),
            Oid::Parented(_) | Oid::Value => None,
        }
    }

    /// State, delegated to the root for non-root oids
    pub fn state(&self) -> Option<OidState> {
        match self {
            Oid::Root(root) => Some(root.state()),
            Oid::Parented(parented) => Some(parented.state()),
            Oid::Aggregated(aggregated) => Some(aggregated.state()),
            Oid::Value => None,
        }
    }

    /// Bookmark of a root oid
    pub fn as_bookmark(&self) -> Option<Bookmark> {
        self.as_root().map(RootOid::as_bookmark)
    }

    /// The root this oid belongs to
    pub fn root(&self) -> Option<&RootOid> {
        match self {
            Oid::Root(root) => Some(root),
            Oid::Parented(parented) => Some(parented.parent().as_ref()),
            Oid::Aggregated(aggregated) => Some(aggregated.root().as_ref()),
            Oid::Value => None,
        }
    }

    /// Borrow as a root oid
    pub fn as_root(&self) -> Option<&RootOid> {
        match self {
            Oid::Root(root) => Some(root),
            _ => None,
        }
    }

    /// Borrow as a parented oid
    pub fn as_parented(&self) -> Option<&ParentedOid> {
        match self {
            Oid::Parented(parented) => Some(parented),
            _ => None,
        }
    }

    /// Borrow as an aggregated oid
    pub fn as_aggregated(&self) -> Option<&AggregatedOid> {
        match self {
            Oid::Aggregated(aggregated) => Some(aggregated),
            _ => None,
        }
    }
}

impl From<RootOid> for Oid {
    fn from(root: RootOid) -> Self {
        Oid::Root(root)
    }
}

impl From<Arc<RootOid>> for Oid {
    fn from(root: Arc<RootOid>) -> Self {
        Oid::Root(Arc::try_unwrap(root).unwrap_or_else(|shared| (*shared).clone()))
    }
}

impl From<ParentedOid> for Oid {
    fn from(parented: ParentedOid) -> Self {
        Oid::Parented(parented)
    }
}

impl From<AggregatedOid> for Oid {
    fn from(aggregated: AggregatedOid) -> Self {
        Oid::Aggregated(aggregated)
    }
}
