//! Pool metrics derived from a sample of blocks and pool parameters.
//!
//! Every function here is pure. Inputs that would divide by zero (an empty
//! sample, a sample with no elapsed round time, a zero pool hashrate) are
//! rejected with an error instead of producing a placeholder value.

use crate::api_client::types::Block;
use crate::error::{Error, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fraction of `blocks` that are uncles, in `0.0..=1.0`.
pub fn uncle_rate(blocks: &[Block]) -> Result<f64> {
    if blocks.is_empty() {
        return Err(Error::EmptyBlockSample);
    }

    let uncles = blocks.iter().filter(|b| b.is_uncle()).count();
    Ok(uncles as f64 / blocks.len() as f64)
}

/// Mean `total_rewards` per block in gwei, truncated.
pub fn average_block_reward(blocks: &[Block]) -> Result<u64> {
    if blocks.is_empty() {
        return Err(Error::EmptyBlockSample);
    }

    let total: u128 = blocks.iter().map(|b| u128::from(b.total_rewards)).sum();
    // The mean of u64 values always fits in a u64.
    Ok((total / blocks.len() as u128) as u64)
}

/// Blocks found per day, judged by the summed round time of the sample.
///
/// The elapsed time is kept in fractional days, so samples covering less
/// than a day still produce a rate.
pub fn average_blocks_per_day(blocks: &[Block]) -> Result<f64> {
    if blocks.is_empty() {
        return Err(Error::EmptyBlockSample);
    }

    let elapsed: u128 = blocks.iter().map(|b| u128::from(b.round_time)).sum();
    if elapsed == 0 {
        return Err(Error::DegenerateTimespan);
    }

    let days = elapsed as f64 / SECONDS_PER_DAY;
    Ok(blocks.len() as f64 / days)
}

/// Expected time between pool blocks, in the unit of `average_block_time`.
///
/// Both hashrates must be in the same unit. The ratio is taken in `f64`,
/// so a pool larger than the network still yields a fraction of a block
/// time rather than zero.
pub fn expected_round_time(
    network_hashrate: u64,
    pool_hashrate: u64,
    average_block_time: f64,
) -> Result<f64> {
    if pool_hashrate == 0 {
        return Err(Error::DivisionByZero {
            what: "pool hashrate",
        });
    }

    Ok(network_hashrate as f64 / pool_hashrate as f64 * average_block_time)
}

/// Seconds until a share stops counting toward PPLNS payouts.
///
/// `n` is the PPLNS window in shares. `share_difficulty` and
/// `pool_hashrate` must share a unit (H and H/s, or MH and MH/s). The
/// result is truncated to whole seconds.
pub fn pplns_share_window(n: u64, share_difficulty: u64, pool_hashrate: u64) -> Result<u64> {
    if pool_hashrate == 0 {
        return Err(Error::DivisionByZero {
            what: "pool hashrate",
        });
    }

    let work = u128::from(n) * u128::from(share_difficulty);
    u64::try_from(work / u128::from(pool_hashrate))
        .map_err(|_| Error::ShareWindowOverflow)
}
