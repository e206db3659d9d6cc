//! Legacy aggregated identifiers
//!
//! Objects embedded in another object's identity used to be addressed as a
//! chain hanging off a root: `CUS:1~ADR:home~LINE:2`. Value types replaced
//! this, so new aggregated oids cannot be constructed ([`AggregatedOid::new`]
//! always fails). Strings written by older versions are still recognized by
//! the decoder, which uses [`AggregatedOid::from_legacy`] when the codec is
//! configured to accept them.

use super::component::{self, Component};
use super::root_oid::RootOid;
use super::state::OidState;
use crate::error::{LegacyForm, OidError, OidResult};
use std::sync::Arc;

/// What an aggregated oid hangs off
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateParent {
    /// Directly under a root
    Root(Arc<RootOid>),
    /// Under another aggregate
    Aggregated(Arc<AggregatedOid>),
}

impl AggregateParent {
    /// The root at the top of the chain
    pub fn root(&self) -> &Arc<RootOid> {
        match self {
            AggregateParent::Root(root) => root,
            AggregateParent::Aggregated(parent) => parent.root(),
        }
    }
}

/// `(parent, logical type name, local id)` link of a legacy chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregatedOid {
    parent: AggregateParent,
    logical_type_name: String,
    local_id: String,
}

impl AggregatedOid {
    /// Always fails: aggregated oids are no longer constructed
    pub fn new(
        _parent: AggregateParent,
        _logical_type_name: impl Into<String>,
        _local_id: impl Into<String>,
    ) -> OidResult<Self> {
        Err(OidError::UnsupportedLegacyForm {
            input: String::new(),
            form: LegacyForm::AggregatedChain,
        })
    }

    /// Rebuild one link of a chain decoded from a legacy string
    ///
    /// Only the decoder should call this.
    #[doc(hidden)]
    pub fn from_legacy(
        parent: AggregateParent,
        logical_type_name: impl Into<String>,
        local_id: impl Into<String>,
    ) -> OidResult<Self> {
        let logical_type_name = logical_type_name.into();
        let local_id = local_id.into();
        component::validate(Component::LogicalTypeName, &logical_type_name)?;
        component::validate(Component::LocalId, &local_id)?;
        Ok(AggregatedOid {
            parent,
            logical_type_name,
            local_id,
        })
    }

    /// Immediate parent
    pub fn parent(&self) -> &AggregateParent {
        &self.parent
    }

    /// The root at the top of the chain
    pub fn root(&self) -> &Arc<RootOid> {
        self.parent.root()
    }

    /// Type name of this link
    pub fn logical_type_name(&self) -> &str {
        &self.logical_type_name
    }

    /// Local id of this link
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Number of links from the root to this oid (1 for a direct child)
    pub fn depth(&self) -> usize {
        match &self.parent {
            AggregateParent::Root(_) => 1,
            AggregateParent::Aggregated(parent) => parent.depth() + 1,
        }
    }

    /// State of the root
    pub fn state(&self) -> OidState {
        self.root().state()
    }

    /// Rebuild the whole chain against the persisted root
    ///
    /// # Errors
    ///
    /// `IllegalStateTransition` if `new_root` is not persistent.
    pub fn as_persistent(&self, new_root: Arc<RootOid>) -> OidResult<AggregatedOid> {
        if !new_root.is_persistent() {
            return Err(OidError::IllegalStateTransition {
                from: new_root.state(),
                operation: "re-parent an aggregate onto",
            });
        }
        let parent = match &self.parent {
            AggregateParent::Root(_) => AggregateParent::Root(new_root),
            AggregateParent::Aggregated(parent) => {
                AggregateParent::Aggregated(Arc::new(parent.as_persistent(new_root)?))
            }
        };
        Ok(AggregatedOid {
            parent,
            logical_type_name: self.logical_type_name.clone(),
            local_id: self.local_id.clone(),
        })
    }
}
