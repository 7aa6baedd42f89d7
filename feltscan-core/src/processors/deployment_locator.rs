//! Locating the block at which a contract was deployed.
//!
//! Used to pick a crawl start point when none is given: crawling from the
//! deployment block skips the (possibly long) history before the contract
//! existed.

use super::provider::{LedgerProvider, ProviderError};
use feltscan_sdk::Felt;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while locating a deployment block.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The contract has no code even at the chain head.
    #[error("contract is not deployed as of block {head}")]
    NotDeployed { head: u64 },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Binary search over `[0, head]` for the first block where `probe` holds.
///
/// `probe` must be monotonic: once true for a block it stays true for every
/// later one. Each call is typically a network round-trip, so the search
/// issues at most `1 + ceil(log2(head + 1))` probes.
pub async fn find_deployment_block<F, Fut>(head: u64, mut probe: F) -> Result<u64, LocateError>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<bool, ProviderError>>,
{
    if !probe(head).await? {
        return Err(LocateError::NotDeployed { head });
    }

    let (mut lo, mut hi) = (0u64, head);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if probe(mid).await? {
            hi = mid;
        } else {
            lo = mid + 1;
        }
        debug!(lo, hi, "Narrowed deployment block search");
    }
    Ok(lo)
}

/// Finds the block at which `address` was deployed, searching up to the
/// current chain head.
pub async fn deployment_block(
    provider: &dyn LedgerProvider,
    address: Felt,
) -> Result<u64, LocateError> {
    let head = provider.block_number().await?;
    let block = find_deployment_block(head, |block| provider.has_code_at(address, block)).await?;
    info!(contract = %address, block, head, "Located deployment block");
    Ok(block)
}
