//! TOML file configuration structures.
//!
//! These structs directly map to the `feltscan.toml` file format. Every
//! value is optional; command-line flags take precedence over the file.

use feltscan_sdk::Felt;
use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Starknet node connection section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint of the node.
    pub url: Option<Url>,
    /// Per-request timeout in seconds; 0 disables it.
    pub timeout_secs: Option<u64>,
}

/// Crawl section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub contract: Option<Felt>,
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub batch_size: Option<u64>,
    pub confirmations: Option<u64>,
    pub hot_threshold: Option<u32>,
    pub hot_interval_ms: Option<u64>,
    pub cold_interval_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[provider]
url = "https://starknet-mainnet.example.com/rpc/v0_7"
timeout_secs = 30

[crawl]
contract = "0x0422d33a3638dcc4c62e72e1d6942cd31eb643ef596ccac2351e0e21f6cd4bf4"
from_block = 650000
batch_size = 500
hot_interval_ms = 250
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.provider.url.as_ref().map(Url::as_str),
            Some("https://starknet-mainnet.example.com/rpc/v0_7")
        );
        assert_eq!(config.provider.timeout_secs, Some(30));
        assert_eq!(config.crawl.from_block, Some(650_000));
        assert_eq!(config.crawl.batch_size, Some(500));
        assert_eq!(config.crawl.hot_interval_ms, Some(250));
        assert_eq!(config.crawl.to_block, None);
        assert!(config.crawl.contract.is_some());
    }

    #[test]
    fn test_empty_config_parsing() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.provider.url.is_none());
        assert!(config.crawl.contract.is_none());
    }

    #[test]
    fn test_invalid_contract_rejected() {
        let toml_str = r#"
[crawl]
contract = "0xnot-an-address"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
