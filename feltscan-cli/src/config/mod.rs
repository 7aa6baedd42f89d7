//! Configuration module for feltscan.
//!
//! Handles loading configuration from an optional TOML file, CLI arguments,
//! and the `STARKNET_RPC_URL` environment variable. Flags win over the file;
//! anything left unset falls back to the crawl defaults.

pub mod file;

use crate::config::file::FileConfig;
use clap::Args;
use feltscan_core::config::CrawlConfig;
use feltscan_sdk::Felt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid crawl configuration: {0}")]
    CrawlError(#[from] feltscan_core::config::ConfigError),

    #[error("no provider URL given (use --provider, STARKNET_RPC_URL or [provider] url)")]
    MissingProviderUrl,
}

/// Node connection flags shared by every command that talks to a node.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Starknet JSON-RPC endpoint
    #[arg(short = 'p', long, env = "STARKNET_RPC_URL")]
    pub provider: Option<Url>,

    /// Request timeout in seconds (0 means no timeout)
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Crawl flags of the `events` command.
#[derive(Args, Debug, Clone, Default)]
pub struct CrawlArgs {
    /// Only crawl events emitted by this contract
    #[arg(short = 'c', long)]
    pub contract: Option<Felt>,

    /// Events requested per page [default: 100]
    #[arg(short = 'N', long)]
    pub batch_size: Option<u64>,

    /// Productive ranges in a row before switching to the hot interval [default: 2]
    #[arg(long)]
    pub hot_threshold: Option<u32>,

    /// Milliseconds between polls while the crawl is hot [default: 100]
    #[arg(long)]
    pub hot_interval: Option<u64>,

    /// Milliseconds between polls while the crawl is cold [default: 10000]
    #[arg(long)]
    pub cold_interval: Option<u64>,

    /// Most recent blocks to leave alone [default: 5]
    #[arg(long)]
    pub confirmations: Option<u64>,

    /// First block to crawl; 0 starts at the contract's deployment block
    #[arg(long)]
    pub from: Option<u64>,

    /// Last block to crawl; 0 keeps following the chain head
    #[arg(long)]
    pub to: Option<u64>,
}

/// Resolved node connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub url: Url,
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    /// Build an RPC client honoring the configured timeout.
    pub fn client(&self) -> Result<feltscan_sdk::client::StarknetRpcClient, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(feltscan_sdk::client::StarknetRpcClient::new(self.url.clone())
            .with_http_client(builder.build()?))
    }
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub provider: ProviderSettings,
    pub crawl: CrawlConfig,
}

/// Configuration loader that merges file, flags and defaults.
pub struct ConfigLoader {
    provider: ProviderArgs,
    crawl: CrawlArgs,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(provider: ProviderArgs, crawl: CrawlArgs) -> Self {
        Self { provider, crawl }
    }

    /// Load and merge the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply CLI overrides
    /// 3. Validate the resulting crawl configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match &self.provider.config {
            Some(path) => Self::read_file(path)?,
            None => FileConfig::default(),
        };
        self.merge(file_config)
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let config_content = std::fs::read_to_string(path)?;
        let file_config = toml::from_str(&config_content)?;
        tracing::debug!("Configuration loaded from {:?}", path);
        Ok(file_config)
    }

    fn merge(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let FileConfig {
            provider: file_provider,
            crawl: file_crawl,
        } = file_config;

        let url = self
            .provider
            .provider
            .clone()
            .or(file_provider.url)
            .ok_or(ConfigError::MissingProviderUrl)?;
        let timeout = self
            .provider
            .timeout
            .or(file_provider.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let defaults = CrawlConfig::default();
        let crawl = CrawlConfig {
            contract: self.crawl.contract.or(file_crawl.contract),
            from_block: self
                .crawl
                .from
                .or(file_crawl.from_block)
                .unwrap_or(defaults.from_block),
            to_block: self
                .crawl
                .to
                .or(file_crawl.to_block)
                .unwrap_or(defaults.to_block),
            batch_size: self
                .crawl
                .batch_size
                .or(file_crawl.batch_size)
                .unwrap_or(defaults.batch_size),
            confirmations: self
                .crawl
                .confirmations
                .or(file_crawl.confirmations)
                .unwrap_or(defaults.confirmations),
            hot_threshold: self
                .crawl
                .hot_threshold
                .or(file_crawl.hot_threshold)
                .unwrap_or(defaults.hot_threshold),
            hot_interval: self
                .crawl
                .hot_interval
                .or(file_crawl.hot_interval_ms)
                .map_or(defaults.hot_interval, Duration::from_millis),
            cold_interval: self
                .crawl
                .cold_interval
                .or(file_crawl.cold_interval_ms)
                .map_or(defaults.cold_interval, Duration::from_millis),
        };
        crawl.validate()?;

        Ok(LoadedConfig {
            provider: ProviderSettings { url, timeout },
            crawl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn provider_args(url: Option<&str>) -> ProviderArgs {
        ProviderArgs {
            provider: url.map(|u| Url::parse(u).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_apply_without_file() {
        let loader = ConfigLoader::new(
            provider_args(Some("http://localhost:9545")),
            CrawlArgs::default(),
        );
        let loaded = loader.merge(FileConfig::default()).unwrap();
        assert_eq!(loaded.provider.url.as_str(), "http://localhost:9545/");
        assert_eq!(loaded.provider.timeout, None);
        assert_eq!(loaded.crawl, CrawlConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let file_config: FileConfig = toml::from_str(
            r#"
[provider]
url = "http://file.example.com"
timeout_secs = 30

[crawl]
batch_size = 500
confirmations = 10
cold_interval_ms = 60000
"#,
        )
        .unwrap();
        let loader = ConfigLoader::new(
            ProviderArgs {
                timeout: Some(0),
                ..Default::default()
            },
            CrawlArgs {
                batch_size: Some(20),
                from: Some(100),
                to: Some(200),
                ..Default::default()
            },
        );

        let loaded = loader.merge(file_config).unwrap();
        assert_eq!(loaded.provider.url.as_str(), "http://file.example.com/");
        assert_eq!(loaded.provider.timeout, None);
        assert_eq!(loaded.crawl.batch_size, 20);
        assert_eq!(loaded.crawl.confirmations, 10);
        assert_eq!(loaded.crawl.cold_interval, Duration::from_secs(60));
        assert_eq!((loaded.crawl.from_block, loaded.crawl.to_block), (100, 200));
    }

    #[test]
    fn test_missing_provider_url() {
        let loader = ConfigLoader::new(provider_args(None), CrawlArgs::default());
        assert_matches!(
            loader.merge(FileConfig::default()),
            Err(ConfigError::MissingProviderUrl)
        );
    }

    #[test]
    fn test_invalid_range_rejected() {
        let loader = ConfigLoader::new(
            provider_args(Some("http://localhost:9545")),
            CrawlArgs {
                from: Some(200),
                to: Some(100),
                ..Default::default()
            },
        );
        assert_matches!(
            loader.merge(FileConfig::default()),
            Err(ConfigError::CrawlError(_))
        );
    }
}
