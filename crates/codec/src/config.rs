//! Codec configuration via `oid-codec.toml`
//!
//! Two switches affect decoding:
//!
//! - `identity_policy`: which fields of a decoded root take part in equality
//! - `legacy_aggregated`: whether `~type:id` chains are decoded or refused
//!
//! Encoding does not depend on configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_oid_core::{IdentityPolicy, OidError, OidResult};

/// Config file name used by applications that keep codec settings on disk.
pub const CONFIG_FILE_NAME: &str = "oid-codec.toml";

/// What to do with legacy aggregated chains found while decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyAggregated {
    /// Fail with `UnsupportedLegacyForm`
    #[default]
    Reject,
    /// Decode into `AggregatedOid` values (logged at warn)
    Accept,
}

/// Codec configuration loaded from `oid-codec.toml`.
///
/// # Example
///
/// ```toml
/// identity_policy = "state_aware"
/// legacy_aggregated = "reject"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Equality policy applied to decoded roots
    #[serde(default)]
    pub identity_policy: IdentityPolicy,
    /// Handling of `~type:id` chains
    #[serde(default)]
    pub legacy_aggregated: LegacyAggregated,
}

impl CodecConfig {
    /// State-aware identity, legacy chains rejected
    pub const DEFAULT: CodecConfig = CodecConfig {
        identity_policy: IdentityPolicy::StateAware,
        legacy_aggregated: LegacyAggregated::Reject,
    };

    /// Default settings, but legacy chains are decoded
    pub const fn accepting_legacy() -> Self {
        CodecConfig {
            identity_policy: IdentityPolicy::StateAware,
            legacy_aggregated: LegacyAggregated::Accept,
        }
    }

    /// Replace the identity policy
    pub const fn with_identity_policy(mut self, policy: IdentityPolicy) -> Self {
        self.identity_policy = policy;
        self
    }

    /// Replace the legacy chain handling
    pub const fn with_legacy_aggregated(mut self, legacy: LegacyAggregated) -> Self {
        self.legacy_aggregated = legacy;
        self
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Object identifier codec configuration
#
# Identity policy: "state_aware" (default) or "type_and_identifier"
#   "state_aware"         = type, identifier and state take part in equality
#   "type_and_identifier" = state is ignored
identity_policy = "state_aware"

# Legacy aggregated chains (CUS:1~ADR:home): "reject" (default) or "accept"
#   "reject" = decoding fails with an unsupported-legacy-form error
#   "accept" = chains are decoded so old data can be migrated
legacy_aggregated = "reject"
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> OidResult<Self> {
        toml::from_str(content)
            .map_err(|e| OidError::config(format!("failed to parse codec config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> OidResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OidError::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            OidError::config(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> OidResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                OidError::config(format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_rejects_legacy() {
        let config = CodecConfig::default();
        assert_eq!(config.identity_policy, IdentityPolicy::StateAware);
        assert_eq!(config.legacy_aggregated, LegacyAggregated::Reject);
    }

    #[test]
    fn test_parse_type_and_identifier() {
        let config =
            CodecConfig::from_toml_str("identity_policy = \"type_and_identifier\"").unwrap();
        assert_eq!(config.identity_policy, IdentityPolicy::TypeAndIdentifier);
        assert_eq!(config.legacy_aggregated, LegacyAggregated::Reject);
    }

    #[test]
    fn test_parse_accept_legacy() {
        let config = CodecConfig::from_toml_str("legacy_aggregated = \"accept\"").unwrap();
        assert_eq!(config, CodecConfig::accepting_legacy());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CodecConfig::from_toml_str("").unwrap(), CodecConfig::DEFAULT);
    }

    #[test]
    fn test_parse_invalid_policy_returns_error() {
        let err = CodecConfig::from_toml_str("identity_policy = \"loose\"").unwrap_err();
        assert!(matches!(err, OidError::Config { .. }));
    }

    #[test]
    fn test_default_toml_parses_correctly() {
        let config = CodecConfig::from_toml_str(CodecConfig::default_toml()).unwrap();
        assert_eq!(config, CodecConfig::DEFAULT);
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::DEFAULT
            .with_identity_policy(IdentityPolicy::TypeAndIdentifier)
            .with_legacy_aggregated(LegacyAggregated::Accept);
        assert_eq!(config.identity_policy, IdentityPolicy::TypeAndIdentifier);
        assert_eq!(config.legacy_aggregated, LegacyAggregated::Accept);
    }

    #[test]
    fn test_write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        CodecConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());

        let config = CodecConfig::from_file(&path).unwrap();
        assert_eq!(config, CodecConfig::DEFAULT);
    }

    #[test]
    fn test_write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "legacy_aggregated = \"accept\"\n").unwrap();
        CodecConfig::write_default_if_missing(&path).unwrap();

        let config = CodecConfig::from_file(&path).unwrap();
        assert_eq!(config.legacy_aggregated, LegacyAggregated::Accept);
    }

    #[test]
    fn test_missing_file_returns_error() {
        let dir = TempDir::new().unwrap();
        let err = CodecConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
