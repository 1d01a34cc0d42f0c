//! Harness configuration, loadable from YAML.
//!
//! ```yaml
//! log:
//!   level: info
//!   components:
//!     feltcodec-marshal: debug
//! caller_address: "0x0"
//! abi_path: build/contract_abi.json
//! ```

use crate::contract::CallOptions;
use crate::error::ConfigError;
use feltcodec_core::Felt;
use feltcodec_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub log: LogConfig,
    /// Caller address used when no explicit [`CallOptions`] are given
    #[serde(default)]
    pub caller_address: Felt,
    /// Compiled contract ABI to load by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_path: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Default options for invocations made under this config.
    pub fn call_options(&self) -> CallOptions {
        CallOptions::with_caller(self.caller_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = HarnessConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.call_options(), CallOptions::default());
    }

    #[test]
    fn parses_caller_and_log_overrides() {
        let config = HarnessConfig::from_yaml_str(
            r#"
log:
  level: warn
  components:
    feltcodec-marshal: debug
caller_address: "0x1234"
abi_path: build/abi.json
"#,
        )
        .unwrap();
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.directives(), "warn,feltcodec_marshal=debug");
        assert_eq!(config.caller_address, Felt::from(0x1234u64));
        assert_eq!(config.abi_path, Some(PathBuf::from("build/abi.json")));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            HarnessConfig::from_yaml_str("caller_address: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
