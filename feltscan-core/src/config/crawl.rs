use super::ConfigError;
use feltscan_sdk::Felt;
use std::time::Duration;

/// Values that drive one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Only events emitted by this contract are fetched. `None` fetches all.
    pub contract: Option<Felt>,
    pub from_block: u64,
    /// Last block to read; 0 tracks the chain head indefinitely.
    pub to_block: u64,
    /// Events requested per page.
    pub batch_size: u64,
    /// Most recent blocks treated as not yet final.
    pub confirmations: u64,
    /// Productive ranges in a row before polling switches to `hot_interval`.
    pub hot_threshold: u32,
    pub hot_interval: Duration,
    pub cold_interval: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            contract: None,
            from_block: 0,
            to_block: 0,
            batch_size: 100,
            confirmations: 5,
            hot_threshold: 2,
            hot_interval: Duration::from_millis(100),
            cold_interval: Duration::from_millis(10_000),
        }
    }
}

impl CrawlConfig {
    pub fn is_open_ended(&self) -> bool {
        self.to_block == 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "batch size must be positive".to_owned(),
            ));
        }
        if self.hot_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "hot threshold must be positive".to_owned(),
            ));
        }
        if !self.is_open_ended() && self.to_block <= self.from_block {
            return Err(ConfigError::ValidationError(format!(
                "to block {} must be greater than from block {}",
                self.to_block, self.from_block
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_are_valid_and_open_ended() {
        let config = CrawlConfig::default();
        assert!(config.is_open_ended());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_batches() {
        let config = CrawlConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_zero_hot_threshold() {
        let config = CrawlConfig {
            hot_threshold: 0,
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(ConfigError::ValidationError(_)));
    }

    #[test]
    fn fixed_range_must_be_non_empty() {
        let mut config = CrawlConfig {
            from_block: 100,
            to_block: 100,
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(ConfigError::ValidationError(_)));

        config.to_block = 101;
        assert_eq!(config.validate(), Ok(()));
    }
}
