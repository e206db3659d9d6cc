//! Public-facing projection of a root identifier
//!
//! A [`Bookmark`] is what leaves the system at its boundaries (REST paths,
//! UI links): just `(objectType, identifier)`. It is always version-free and
//! stateless; rebuilding a [`RootOid`] from it yields a persistent oid.
//!
//! ## Format
//!
//! `objectType:identifier`, for example `CUS:123`.

use super::component::{self, Component, SEPARATOR};
use super::root_oid::RootOid;
use crate::error::{OidError, OidResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `(objectType, identifier)` pair derived from a [`RootOid`]
///
/// Deserialization validates both components the same way [`FromStr`] does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BookmarkFields")]
pub struct Bookmark {
    object_type: String,
    identifier: String,
}

/// Unvalidated wire shape of a [`Bookmark`]
#[derive(Deserialize)]
struct BookmarkFields {
    object_type: String,
    identifier: String,
}

impl TryFrom<BookmarkFields> for Bookmark {
    type Error = OidError;

    fn try_from(fields: BookmarkFields) -> OidResult<Self> {
        component::validate(Component::LogicalTypeName, &fields.object_type)?;
        component::validate(Component::Identifier, &fields.identifier)?;
        Ok(Bookmark::new(fields.object_type, fields.identifier))
    }
}

impl Bookmark {
    pub(crate) fn new(object_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Bookmark {
            object_type: object_type.into(),
            identifier: identifier.into(),
        }
    }

    /// Logical type name of the bookmarked object
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Instance key of the bookmarked object
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.object_type, SEPARATOR, self.identifier)
    }
}

impl FromStr for Bookmark {
    type Err = OidError;

    /// Parse `objectType:identifier`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (object_type, identifier) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| OidError::malformed(s, s.len(), "expected ':' in bookmark"))?;
        component::validate(Component::LogicalTypeName, object_type)?;
        component::validate(Component::Identifier, identifier)?;
        Ok(Bookmark::new(object_type, identifier))
    }
}

impl From<&RootOid> for Bookmark {
    fn from(oid: &RootOid) -> Self {
        oid.as_bookmark()
    }
}

impl TryFrom<&Bookmark> for RootOid {
    type Error = OidError;

    fn try_from(bookmark: &Bookmark) -> OidResult<Self> {
        RootOid::from_bookmark(bookmark)
    }
}
