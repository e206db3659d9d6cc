//! String codec for Strata OIDs
//!
//! This crate turns identifier values into their canonical, single-line
//! strings and back:
//! - grammar: syntax tree and one-pass parser for the identifier grammar
//! - marshaller: encoding, decoding and kind checking
//! - config: decoding policy loaded from `oid-codec.toml`
//!
//! The strings are used as persistence keys, URL path segments (callers
//! percent-encode them) and cache keys.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod grammar;
pub mod marshaller;

pub use config::{CodecConfig, LegacyAggregated, CONFIG_FILE_NAME};
pub use grammar::{parse, OidSyntax};
pub use marshaller::Marshaller;

use strata_oid_core::{AggregatedOid, Oid, ParentedOid, RootOid};

/// Canonical string forms on identifier values
///
/// Encoding does not depend on configuration, so these go through
/// [`Marshaller::DEFAULT`].
pub trait EnString {
    /// `String` for concrete oids, `Option<String>` for [`Oid`]
    type Output;

    /// String form including the version segment, where there is one
    fn en_string(&self) -> Self::Output;

    /// String form without the version segment
    fn en_string_no_version(&self) -> Self::Output;
}

impl EnString for RootOid {
    type Output = String;

    fn en_string(&self) -> String {
        Marshaller::DEFAULT.marshal(self)
    }

    fn en_string_no_version(&self) -> String {
        Marshaller::DEFAULT.marshal_no_version(self)
    }
}

impl EnString for ParentedOid {
    type Output = String;

    fn en_string(&self) -> String {
        Marshaller::DEFAULT.marshal_parented(self)
    }

    fn en_string_no_version(&self) -> String {
        Marshaller::DEFAULT.marshal_parented(self)
    }
}

impl EnString for AggregatedOid {
    type Output = String;

    fn en_string(&self) -> String {
        Marshaller::DEFAULT.marshal_aggregated(self)
    }

    fn en_string_no_version(&self) -> String {
        Marshaller::DEFAULT.marshal_aggregated(self)
    }
}

impl EnString for Oid {
    type Output = Option<String>;

    /// `None` for the value placeholder
    fn en_string(&self) -> Option<String> {
        Marshaller::DEFAULT.marshal_oid(self)
    }

    /// `None` for the value placeholder
    fn en_string_no_version(&self) -> Option<String> {
        Marshaller::DEFAULT.marshal_oid_no_version(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_oid_core::Version;

    #[test]
    fn test_en_string_root() {
        let oid = RootOid::view_model("DASH", "main")
            .unwrap()
            .with_version(Some(Version::new(1)));
        assert_eq!(oid.en_string(), "*DASH:main^1::");
        assert_eq!(oid.en_string_no_version(), "*DASH:main");
    }

    #[test]
    fn test_en_string_parented() {
        let parent = Arc::new(RootOid::persistent("CUS", "1").unwrap());
        let oid = ParentedOid::new(parent, "orders").unwrap();
        assert_eq!(oid.en_string(), "CUS:1$orders");
        assert_eq!(oid.en_string_no_version(), "CUS:1$orders");
    }

    #[test]
    fn test_en_string_value_placeholder() {
        assert_eq!(Oid::Value.en_string(), None);
        assert_eq!(Oid::Value.en_string_no_version(), None);
    }
}
