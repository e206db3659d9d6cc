//! Identifiers of collection-valued associations
//!
//! A [`ParentedOid`] names one collection member of a root object, e.g. the
//! `items` of order `ORD:42`. It shares its parent through an `Arc`; the
//! parent remains the source of truth for state and version.

use super::component::{self, Component};
use super::root_oid::RootOid;
use super::state::OidState;
use crate::error::{OidError, OidResult};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// `(owning root, member name)`
#[derive(Debug, Clone)]
pub struct ParentedOid {
    parent: Arc<RootOid>,
    name: String,
    hash: u64,
}

impl ParentedOid {
    /// Create a parented oid for member `name` of `parent`
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or contains a reserved character.
    pub fn new(parent: Arc<RootOid>, name: impl Into<String>) -> OidResult<Self> {
        let name = name.into();
        component::validate(Component::MemberName, &name)?;

        let mut hasher = FxHasher::default();
        parent.hash(&mut hasher);
        name.hash(&mut hasher);

        Ok(ParentedOid {
            parent,
            name,
            hash: hasher.finish(),
        })
    }

    /// The owning root
    pub fn parent(&self) -> &Arc<RootOid> {
        &self.parent
    }

    /// Association member name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// State of the owning root
    pub fn state(&self) -> OidState {
        self.parent.state()
    }

    /// Check if the owning root is persistent
    pub fn is_persistent(&self) -> bool {
        self.parent.is_persistent()
    }

    /// Check if the owning root is transient
    pub fn is_transient(&self) -> bool {
        self.parent.is_transient()
    }

    /// Check if the owning root is a view model
    pub fn is_view_model(&self) -> bool {
        self.parent.is_view_model()
    }

    /// Rebuild against the persisted parent
    ///
    /// # Errors
    ///
    /// `IllegalStateTransition` if `new_parent` is not persistent.
    pub fn as_persistent(&self, new_parent: Arc<RootOid>) -> OidResult<ParentedOid> {
        if !new_parent.is_persistent() {
            return Err(OidError::IllegalStateTransition {
                from: new_parent.state(),
                operation: "re-parent a collection onto",
            });
        }
        ParentedOid::new(new_parent, self.name.clone())
    }
}

impl PartialEq for ParentedOid {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name && self.parent == other.parent
    }
}

impl Eq for ParentedOid {}

impl Hash for ParentedOid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Version;
    use std::collections::HashSet;

    fn customer(id: &str) -> Arc<RootOid> {
        Arc::new(RootOid::persistent("CUS", id).unwrap())
    }

    #[test]
    fn test_parented_accessors() {
        let oid = ParentedOid::new(customer("1"), "items").unwrap();
        assert_eq!(oid.name(), "items");
        assert_eq!(oid.parent().identifier(), "1");
        assert_eq!(oid.state(), OidState::Persistent);
        assert!(oid.is_persistent());
    }

    #[test]
    fn test_parented_state_delegates_to_parent() {
        let parent = Arc::new(RootOid::view_model("DASH", "x").unwrap());
        let oid = ParentedOid::new(parent, "rows").unwrap();
        assert!(oid.is_view_model());
        assert!(!oid.is_transient());
    }

    #[test]
    fn test_parented_name_validated() {
        assert!(ParentedOid::new(customer("1"), "")
            .unwrap_err()
            .is_invalid_component());
        assert!(matches!(
            ParentedOid::new(customer("1"), "it$ems").unwrap_err(),
            OidError::InvalidIdentifierCharacter {
                component: Component::MemberName,
                character: '$',
                ..
            }
        ));
    }

    #[test]
    fn test_parented_equality() {
        let a = ParentedOid::new(customer("1"), "items").unwrap();
        let b = ParentedOid::new(customer("1"), "items").unwrap();
        let other_name = ParentedOid::new(customer("1"), "orders").unwrap();
        let other_parent = ParentedOid::new(customer("2"), "items").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, other_name);
        assert_ne!(a, other_parent);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(other_name);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parent_version_bump_visible_and_ignored() {
        let parent = customer("1");
        let oid = ParentedOid::new(Arc::clone(&parent), "items").unwrap();
        let copy = ParentedOid::new(customer("1"), "items").unwrap();

        parent.set_version(Some(Version::new(2)));
        assert_eq!(oid.parent().version(), Some(Version::new(2)));
        assert_eq!(oid, copy);
    }

    #[test]
    fn test_reparent_on_persist() {
        let transient = Arc::new(RootOid::transient("ORD", "t1").unwrap());
        let items = ParentedOid::new(Arc::clone(&transient), "items").unwrap();
        assert!(items.is_transient());

        let persisted = Arc::new(transient.as_persistent("42").unwrap());
        let rebuilt = items.as_persistent(Arc::clone(&persisted)).unwrap();

        assert!(rebuilt.is_persistent());
        assert_eq!(rebuilt.name(), "items");
        assert_eq!(rebuilt.parent().as_ref(), persisted.as_ref());
        assert_ne!(rebuilt, items);
    }

    #[test]
    fn test_reparent_onto_transient_fails() {
        let items = ParentedOid::new(customer("1"), "items").unwrap();
        let transient = Arc::new(RootOid::transient("CUS", "t").unwrap());
        assert!(items.as_persistent(transient).unwrap_err().is_illegal_transition());
    }
}
