use crate::config::CrawlConfig;
use std::time::Duration;

/// Returns the next heat and poll interval once a block range is exhausted.
///
/// A range that yielded events warms the crawl; reaching the hot threshold
/// switches to the hot interval. An empty range resets heat and cools down.
/// Below the threshold the current interval is kept.
pub fn range_cadence(
    heat: u32,
    yielded_events: bool,
    current: Duration,
    config: &CrawlConfig,
) -> (u32, Duration) {
    if !yielded_events {
        return (0, config.cold_interval);
    }
    let heat = heat.saturating_add(1);
    if heat >= config.hot_threshold {
        (heat, config.hot_interval)
    } else {
        (heat, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warms_up_after_threshold() {
        let config = CrawlConfig::default();
        let cold = config.cold_interval;

        let (heat, interval) = range_cadence(0, true, cold, &config);
        assert_eq!((heat, interval), (1, cold));

        let (heat, interval) = range_cadence(heat, true, interval, &config);
        assert_eq!((heat, interval), (2, config.hot_interval));
    }

    #[test]
    fn empty_range_cools_down() {
        let config = CrawlConfig::default();
        assert_eq!(
            range_cadence(9, false, config.hot_interval, &config),
            (0, config.cold_interval)
        );
    }
}
