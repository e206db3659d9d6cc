//! Strata OID - canonical, reversible identifiers for domain objects
//!
//! Every domain object gets a root identifier, every collection it owns a
//! parented identifier, and both have a single-line string form used as
//! persistence key, URL segment and concurrency token.
//!
//! # Quick Start
//!
//! ```
//! use strata_oid::{EnString, Marshaller, OidState, Version};
//!
//! let oid = Marshaller::DEFAULT.unmarshal_root("!CUS:123").unwrap();
//! assert_eq!(oid.state(), OidState::Transient);
//!
//! let persisted = oid.as_persistent("456").unwrap();
//! persisted.set_version(Some(Version::new(1)));
//! assert_eq!(persisted.en_string_no_version(), "CUS:456");
//! assert_eq!(persisted.en_string(), "CUS:456^1::");
//! ```
//!
//! # Architecture
//!
//! Value types live in `strata-oid-core`; the grammar, marshaller and
//! configuration live in `strata-oid-codec`. Both are re-exported here.

pub use strata_oid_codec::*;
pub use strata_oid_core::*;
