//! Encoding and decoding of identifiers
//!
//! The [`Marshaller`] is the only place that translates between identifier
//! values and their canonical strings. It holds nothing but a small `Copy`
//! configuration, so it is cheap to construct and safe to share across
//! threads; [`Marshaller::DEFAULT`] covers the common case.
//!
//! ## Two string forms
//!
//! - [`Marshaller::marshal`]: includes the version segment, for URLs and
//!   bookmarks that take part in optimistic-concurrency checks.
//! - [`Marshaller::marshal_no_version`]: omits it, for persistence keys that
//!   must stay stable across edits.
//!
//! Parented and aggregated oids always encode their parent version-free.
//!
//! ## Decoding precedence
//!
//! 1. A `$member` segment makes the result a [`ParentedOid`].
//! 2. Otherwise `~type:id` segments make it an [`AggregatedOid`] chain,
//!    provided the configuration accepts legacy chains.
//! 3. Otherwise it is a [`RootOid`].
//!
//! A trailing version segment is always attached to the root.

use crate::config::{CodecConfig, LegacyAggregated};
use crate::grammar::{self, OidSyntax, VersionSegment};
use std::sync::Arc;
use strata_oid_core::contract::{
    SEPARATOR, SEPARATOR_COLLECTION, SEPARATOR_NESTING, SEPARATOR_VERSION,
};
use strata_oid_core::{
    AggregateParent, AggregatedOid, Bookmark, LegacyForm, Oid, OidError, OidKind, OidResult,
    OidState, ParentedOid, RootOid, Version,
};
use tracing::{debug, trace, warn};

/// Converts identifiers to and from their canonical string form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marshaller {
    config: CodecConfig,
}

impl Marshaller {
    /// Marshaller with the default configuration
    pub const DEFAULT: Marshaller = Marshaller::new(CodecConfig::DEFAULT);

    /// Create a marshaller for `config`
    pub const fn new(config: CodecConfig) -> Self {
        Marshaller { config }
    }

    /// The configuration this marshaller decodes with
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a root oid under the configured identity policy
    ///
    /// Oids built here compare equal to the ones this marshaller decodes.
    pub fn root(
        &self,
        logical_type_name: impl Into<String>,
        identifier: impl Into<String>,
        state: OidState,
    ) -> OidResult<RootOid> {
        RootOid::with_policy(
            logical_type_name,
            identifier,
            state,
            self.config.identity_policy,
        )
    }

    /// Rebuild a persistent root oid from a bookmark under the configured policy
    pub fn root_from_bookmark(&self, bookmark: &Bookmark) -> OidResult<RootOid> {
        RootOid::from_bookmark_with_policy(bookmark, self.config.identity_policy)
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode a root oid, including its version if it has one
    pub fn marshal(&self, oid: &RootOid) -> String {
        let mut out = self.marshal_no_version(oid);
        if let Some(version) = oid.version() {
            write_version(&mut out, &version);
        }
        out
    }

    /// Encode a root oid without its version
    pub fn marshal_no_version(&self, oid: &RootOid) -> String {
        let mut out = String::with_capacity(
            oid.logical_type_name().len() + oid.identifier().len() + 2,
        );
        write_root(&mut out, oid);
        out
    }

    /// Encode a parented oid as `parent$member`
    pub fn marshal_parented(&self, oid: &ParentedOid) -> String {
        let mut out = self.marshal_no_version(oid.parent());
        out.push(SEPARATOR_COLLECTION);
        out.push_str(oid.name());
        out
    }

    /// Encode a legacy aggregated chain as `root~type:id~...`
    pub fn marshal_aggregated(&self, oid: &AggregatedOid) -> String {
        let mut out = String::new();
        write_aggregated(&mut out, oid);
        out
    }

    /// Encode any oid, with version for roots
    ///
    /// Returns `None` for the value placeholder, which has no string form.
    pub fn marshal_oid(&self, oid: &Oid) -> Option<String> {
        match oid {
            Oid::Root(root) => Some(self.marshal(root)),
            Oid::Value => None,
            other => self.marshal_oid_no_version(other),
        }
    }

    /// Encode any oid without a version segment
    ///
    /// Returns `None` for the value placeholder.
    pub fn marshal_oid_no_version(&self, oid: &Oid) -> Option<String> {
        match oid {
            Oid::Root(root) => Some(self.marshal_no_version(root)),
            Oid::Parented(parented) => Some(self.marshal_parented(parented)),
            Oid::Aggregated(aggregated) => Some(self.marshal_aggregated(aggregated)),
            Oid::Value => None,
        }
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode a string into whatever kind of oid it holds
    ///
    /// # Errors
    ///
    /// - `Malformed` if the string does not match the grammar
    /// - `UnsupportedLegacyForm` for aggregated chains the configuration refuses
    pub fn decode(&self, input: &str) -> OidResult<Oid> {
        let result = grammar::parse(input).and_then(|syntax| self.build(input, syntax));
        match &result {
            Ok(oid) => trace!(input, kind = %oid.kind(), "decoded oid"),
            Err(e) => debug!(input, error = %e, "failed to decode oid"),
        }
        result
    }

    /// Decode a string, requiring a particular kind of oid
    ///
    /// # Errors
    ///
    /// As [`Marshaller::decode`], plus `WrongKind` if the string holds a
    /// different kind than `expected`.
    pub fn unmarshal(&self, input: &str, expected: OidKind) -> OidResult<Oid> {
        let oid = self.decode(input)?;
        let actual = oid.kind();
        if actual != expected {
            return Err(OidError::WrongKind {
                input: input.to_string(),
                requested: expected,
                actual,
            });
        }
        Ok(oid)
    }

    /// Decode a string that must hold a root oid
    pub fn unmarshal_root(&self, input: &str) -> OidResult<RootOid> {
        match self.unmarshal(input, OidKind::Root)? {
            Oid::Root(root) => Ok(root),
            other => Err(wrong_kind(input, OidKind::Root, &other)),
        }
    }

    /// Decode a string that must hold a parented oid
    pub fn unmarshal_parented(&self, input: &str) -> OidResult<ParentedOid> {
        match self.unmarshal(input, OidKind::Parented)? {
            Oid::Parented(parented) => Ok(parented),
            other => Err(wrong_kind(input, OidKind::Parented, &other)),
        }
    }

    fn build(&self, input: &str, syntax: OidSyntax<'_>) -> OidResult<Oid> {
        let version = syntax.version.map(to_version).transpose()?;
        let root = self
            .root(syntax.root.logical_type_name, syntax.root.id, syntax.state)?
            .with_version(version);

        if let Some((last, links)) = syntax.nesting.split_last() {
            if self.config.legacy_aggregated == LegacyAggregated::Reject {
                return Err(legacy(input, LegacyForm::AggregatedChain));
            }
            if syntax.member.is_some() {
                return Err(legacy(input, LegacyForm::ParentedAggregate));
            }
            warn!(input, depth = syntax.nesting.len(), "decoding legacy aggregated oid");

            let mut parent = AggregateParent::Root(Arc::new(root));
            for link in links {
                let aggregated =
                    AggregatedOid::from_legacy(parent, link.logical_type_name, link.id)?;
                parent = AggregateParent::Aggregated(Arc::new(aggregated));
            }
            let aggregated = AggregatedOid::from_legacy(parent, last.logical_type_name, last.id)?;
            return Ok(Oid::Aggregated(aggregated));
        }

        match syntax.member {
            Some(name) => Ok(Oid::Parented(ParentedOid::new(Arc::new(root), name)?)),
            None => Ok(Oid::Root(root)),
        }
    }
}

fn write_root(out: &mut String, oid: &RootOid) {
    if let Some(marker) = oid.state().marker() {
        out.push(marker);
    }
    out.push_str(oid.logical_type_name());
    out.push(SEPARATOR);
    out.push_str(oid.identifier());
}

fn write_aggregated(out: &mut String, oid: &AggregatedOid) {
    match oid.parent() {
        AggregateParent::Root(root) => write_root(out, root),
        AggregateParent::Aggregated(parent) => write_aggregated(out, parent),
    }
    out.push(SEPARATOR_NESTING);
    out.push_str(oid.logical_type_name());
    out.push(SEPARATOR);
    out.push_str(oid.local_id());
}

/// `^sequence:user:timestamp`, empty fields left empty
///
/// Nothing is written for a version without a sequence.
fn write_version(out: &mut String, version: &Version) {
    let Some(sequence) = version.sequence() else {
        return;
    };
    out.push(SEPARATOR_VERSION);
    out.push_str(&sequence.to_string());
    out.push(SEPARATOR);
    if let Some(user) = version.user() {
        out.push_str(user);
    }
    out.push(SEPARATOR);
    if let Some(millis) = version.utc_timestamp() {
        out.push_str(&millis.to_string());
    }
}

fn to_version(segment: VersionSegment<'_>) -> OidResult<Version> {
    let mut version = Version::new(segment.sequence);
    if let Some(user) = segment.user {
        version = version.with_user(user)?;
    }
    if let Some(millis) = segment.utc_timestamp {
        version = version.with_utc_timestamp(millis);
    }
    Ok(version)
}

fn legacy(input: &str, form: LegacyForm) -> OidError {
    OidError::UnsupportedLegacyForm {
        input: input.to_string(),
        form,
    }
}

fn wrong_kind(input: &str, requested: OidKind, actual: &Oid) -> OidError {
    OidError::WrongKind {
        input: input.to_string(),
        requested,
        actual: actual.kind(),
    }
}

// ============================================================================
// Tests
// ============================================================================
