//! Domain records returned by the resource decoders.
//!
//! Counts, gwei amounts, hashrates (H/s) and unix timestamps are `u64`.
//! Ratios, luck, donation percentages and averaged hashrates are `f64`.

/// Block found by the pool, as listed by the miner and pool block pages.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub hash: String,
    pub number: u64,
    /// Block type tag, `"block"` or `"uncle"`.
    pub kind: String,
    pub miner: String,
    pub difficulty: u64,
    pub timestamp: u64,
    pub confirmed: bool,
    /// Seconds since the previous block.
    pub round_time: u64,
    pub luck: f64,
    pub server_name: String,
    pub block_reward: u64,
    pub block_fees: u64,
    pub uncle_inclusion_rewards: u64,
    /// Total reward in gwei.
    pub total_rewards: u64,
}

impl Block {
    pub const UNCLE: &'static str = "uncle";

    pub fn is_uncle(&self) -> bool {
        self.kind == Self::UNCLE
    }
}

/// Current effective and reported hashrate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurrentStats {
    pub effective_hashrate: u64,
    pub reported_hashrate: u64,
}

/// Hashrate and share totals over the last 24 hours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DailyStats {
    pub effective_hashrate: u64,
    pub reported_hashrate: u64,
    pub valid_shares: u64,
    pub stale_shares: u64,
    pub invalid_shares: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub current: CurrentStats,
    pub daily: DailyStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerCount {
    pub online: u64,
    pub offline: u64,
}

/// Worker entry from a miner's worker listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerWorker {
    pub name: String,
    pub online: bool,
    pub duplicate_workers_merged: u64,
    pub reported_hashrate: u64,
    pub effective_hashrate: u64,
    pub valid_shares: u64,
    pub stale_shares: u64,
    pub invalid_shares: u64,
    pub last_seen: u64,
}

/// Hashrate chart sample, shared by the miner and worker charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPoint {
    pub timestamp: u64,
    pub effective_hashrate: u64,
    pub average_effective_hashrate: f64,
    pub reported_hashrate: u64,
    pub valid_shares: u64,
    pub stale_shares: u64,
    pub invalid_shares: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub txid: String,
    /// Amount in gwei.
    pub amount: u64,
    pub timestamp: u64,
    /// Seconds covered by this payout.
    pub duration: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentChartPoint {
    pub amount: u64,
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockCount {
    pub confirmed: u64,
    pub unconfirmed: u64,
}

/// Account settings and metadata for a mining address.
#[derive(Clone, Debug, PartialEq)]
pub struct MinerDetails {
    /// Payout threshold in gwei.
    pub min_payout_threshold: u64,
    /// Donation to the pool, in percent.
    pub pool_donation: f64,
    pub max_fee_price: u64,
    pub censored_email: String,
    pub censored_ip: String,
    pub first_joined: u64,
}

/// Pool hashrate per region, in H/s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionalHashrate {
    pub asia: u64,
    pub australia: u64,
    pub europe: u64,
    pub south_america: u64,
    pub us: u64,
    pub total: u64,
}

impl RegionalHashrate {
    /// Regions with their short labels, in display order.
    pub fn regions(&self) -> [(&'static str, u64); 5] {
        [
            ("As", self.asia),
            ("Au", self.australia),
            ("Eu", self.europe),
            ("Sa", self.south_america),
            ("Us", self.us),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolHashratePoint {
    pub timestamp: u64,
    pub hashrate: RegionalHashrate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopMiner {
    pub address: String,
    pub hashrate: u64,
    pub total_workers: u64,
    pub balance: u64,
    pub pool_donation: f64,
    pub first_joined: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopDonator {
    pub address: String,
    pub pool_donation: f64,
    pub total_donated: u64,
    pub first_joined: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LuckRoundTime {
    /// Average luck, in percent.
    pub luck: f64,
    /// Average round time, in seconds.
    pub round_time: f64,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            items_per_page: 0,
            total_items: 0,
            total_pages: 0,
        }
    }
}
