//! `/pool/...` endpoints.

use std::time::Duration;

use super::decode::{self, Decode, Fields};
use super::types::{
    Block, BlockCount, LuckRoundTime, Page, PoolHashratePoint, RegionalHashrate, TopDonator,
    TopMiner,
};
use super::{Client, Endpoint, Transport, page_param};
use crate::error::Result;
use crate::tracing::prelude::*;

/// Pool-wide endpoints. Obtained from [`Client::pool`].
pub struct PoolApi<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> PoolApi<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    async fn get(&self, method: &str, params: &[String]) -> Result<serde_json::Value> {
        self.client
            .request(Endpoint::Pool, "", method, params)
            .await
    }

    /// Hashrate per region, in H/s.
    pub async fn hashrate(&self) -> Result<RegionalHashrate> {
        decode::object(&self.get("hashrate", &[]).await?, "hashrate")
    }

    pub async fn hashrate_chart(&self) -> Result<Vec<PoolHashratePoint>> {
        decode::list(&self.get("hashrateChart", &[]).await?, "hashrateChart")
    }

    pub async fn miners_online(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("minersOnline", &[]).await?, "minersOnline")
    }

    pub async fn workers_online(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("workersOnline", &[]).await?, "workersOnline")
    }

    pub async fn blocks(&self, page: u32) -> Result<Page<Block>> {
        decode::page(&self.get("blocks", &page_param(page)).await?, "blocks")
    }

    /// Fetch pages `0..pages` of pool blocks and concatenate them.
    ///
    /// Pages are requested one after another. When `throttle` is set, the
    /// loop sleeps that long after each page to go easy on the upstream
    /// service. The first failing page aborts the sample.
    pub async fn block_sample(&self, pages: u32, throttle: Option<Duration>) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();

        for page in 0..pages {
            let data = self.blocks(page).await?.data;
            debug!(page, count = data.len(), "fetched pool block page");
            blocks.extend(data);

            if let Some(delay) = throttle {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(blocks)
    }

    pub async fn block_count(&self) -> Result<BlockCount> {
        decode::object(&self.get("blockCount", &[]).await?, "blockCount")
    }

    pub async fn top_miners(&self) -> Result<Vec<TopMiner>> {
        decode::list(&self.get("topMiners", &[]).await?, "topMiners")
    }

    pub async fn top_donators(&self) -> Result<Vec<TopDonator>> {
        decode::list(&self.get("topDonators", &[]).await?, "topDonators")
    }

    pub async fn average_luck_round_time(&self) -> Result<LuckRoundTime> {
        decode::object(&self.get("avgLuckRoundtime", &[]).await?, "avgLuckRoundtime")
    }

    /// Luck of the current round, in percent.
    pub async fn current_luck(&self) -> Result<f64> {
        decode::number(&self.get("currentLuck", &[]).await?, "currentLuck")
    }

    /// Average block reward, in gwei.
    pub async fn average_block_reward(&self) -> Result<u64> {
        decode::narrow_u64(
            &self.get("averageBlockReward", &[]).await?,
            "averageBlockReward",
        )
    }
}

impl Decode for RegionalHashrate {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            asia: f.u64("as")?,
            australia: f.u64("au")?,
            europe: f.u64("eu")?,
            south_america: f.u64("sa")?,
            us: f.u64("us")?,
            total: f.u64("total")?,
        })
    }
}

impl Decode for PoolHashratePoint {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            timestamp: f.u64("timestamp")?,
            hashrate: RegionalHashrate::decode(f)?,
        })
    }
}

impl Decode for TopMiner {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            address: f.string("address")?,
            hashrate: f.u64("hashrate")?,
            total_workers: f.u64("total_workers")?,
            balance: f.u64("balance")?,
            pool_donation: f.f64("pool_donation")?,
            first_joined: f.u64("first_joined")?,
        })
    }
}

impl Decode for TopDonator {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            address: f.string("address")?,
            pool_donation: f.f64("pool_donation")?,
            total_donated: f.u64("total_donated")?,
            first_joined: f.u64("first_joined")?,
        })
    }
}

impl Decode for LuckRoundTime {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            luck: f.f64("luck")?,
            round_time: f.f64("round_time")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::api_client::decode::tests::block_json;
    use crate::api_client::testing::client;
    use crate::error::Error;

    fn hashrate_json() -> serde_json::Value {
        json!({
            "as": 1_000_000_000_000u64,
            "au": 200_000_000_000u64,
            "eu": 3_000_000_000_000u64,
            "sa": 100_000_000_000u64,
            "us": 2_700_000_000_000u64,
            "total": 7_000_000_000_000u64,
        })
    }

    fn blocks_page(numbers: &[u64]) -> serde_json::Value {
        let data: Vec<_> = numbers.iter().map(|&n| block_json(n, "block")).collect();
        json!({
            "data": data,
            "items_per_page": 10,
            "total_items": 100,
            "total_pages": 10,
        })
    }

    #[tokio::test]
    async fn hashrate_regions() {
        let client = client();
        client.mock().push_result(hashrate_json());

        let hashrate = client.pool().hashrate().await.unwrap();
        assert_eq!(hashrate.europe, 3_000_000_000_000);
        assert_eq!(hashrate.total, 7_000_000_000_000);
        assert_eq!(hashrate.regions()[4], ("Us", 2_700_000_000_000));
        assert_eq!(client.mock().urls(), ["https://api.test/v1/pool/hashrate"]);
    }

    #[tokio::test]
    async fn hashrate_chart() {
        let client = client();
        let mut point = hashrate_json();
        point["timestamp"] = json!(1_600_000_000);
        client.mock().push_result(json!([point]));

        let chart = client.pool().hashrate_chart().await.unwrap();
        assert_eq!(chart[0].timestamp, 1_600_000_000);
        assert_eq!(chart[0].hashrate.asia, 1_000_000_000_000);
    }

    #[tokio::test]
    async fn online_counts_and_scalars() {
        let client = client();
        let pool = client.pool();
        client.mock().push_result(json!(5_432));
        client.mock().push_result(json!(21_000));
        client.mock().push_result(json!(87.5));
        client.mock().push_result(json!(2_100_000_000u64));

        assert_eq!(pool.miners_online().await.unwrap(), 5_432);
        assert_eq!(pool.workers_online().await.unwrap(), 21_000);
        assert_eq!(pool.current_luck().await.unwrap(), 87.5);
        assert_eq!(pool.average_block_reward().await.unwrap(), 2_100_000_000);
    }

    #[tokio::test]
    async fn blocks_use_query_page() {
        let client = client();
        client.mock().push_result(blocks_page(&[1, 2]));

        let page = client.pool().blocks(4).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_pages, 10);
        assert_eq!(
            client.mock().urls(),
            ["https://api.test/v1/pool/blocks?page=4"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn block_sample_walks_pages_with_throttle() {
        let client = client();
        client.mock().push_result(blocks_page(&[1, 2]));
        client.mock().push_result(blocks_page(&[3]));
        client.mock().push_result(json!({
            "data": null,
            "items_per_page": 10,
            "total_items": 3,
            "total_pages": 2,
        }));

        let started = tokio::time::Instant::now();
        let blocks = client
            .pool()
            .block_sample(3, Some(Duration::from_millis(200)))
            .await
            .unwrap();

        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert!(started.elapsed() >= Duration::from_millis(600));
        assert_eq!(
            client.mock().urls(),
            [
                "https://api.test/v1/pool/blocks?page=0",
                "https://api.test/v1/pool/blocks?page=1",
                "https://api.test/v1/pool/blocks?page=2",
            ]
        );
    }

    #[tokio::test]
    async fn block_sample_stops_on_first_error() {
        let client = client();
        client.mock().push_result(blocks_page(&[1]));
        client.mock().push(500, "internal error");

        let err = client.pool().block_sample(5, None).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
        assert_eq!(client.mock().urls().len(), 2);
    }

    #[tokio::test]
    async fn block_count() {
        let client = client();
        client
            .mock()
            .push_result(json!({"confirmed": 1_200, "unconfirmed": 4}));

        let count = client.pool().block_count().await.unwrap();
        assert_eq!(count.confirmed, 1_200);
        assert_eq!(count.unconfirmed, 4);
    }

    #[tokio::test]
    async fn top_miners_and_donators() {
        let client = client();
        client.mock().push_result(json!([{
            "address": "0x01",
            "hashrate": 50_000_000_000u64,
            "total_workers": 120,
            "balance": 300_000_000,
            "pool_donation": 0.5,
            "first_joined": 1_590_000_000,
        }]));
        client.mock().push_result(json!([{
            "address": "0x02",
            "pool_donation": 2.0,
            "total_donated": 9_000_000_000u64,
            "first_joined": 1_580_000_000,
        }]));

        let miners = client.pool().top_miners().await.unwrap();
        assert_eq!(miners[0].total_workers, 120);
        assert_eq!(miners[0].pool_donation, 0.5);

        let donators = client.pool().top_donators().await.unwrap();
        assert_eq!(donators[0].address, "0x02");
        assert_eq!(donators[0].total_donated, 9_000_000_000);
    }

    #[tokio::test]
    async fn average_luck_round_time() {
        let client = client();
        client
            .mock()
            .push_result(json!({"luck": 0.97, "round_time": 512.3}));

        let stats = client.pool().average_luck_round_time().await.unwrap();
        assert_eq!(stats.luck, 0.97);
        assert_eq!(stats.round_time, 512.3);
        assert!(client.mock().urls()[0].ends_with("/pool/avgLuckRoundtime"));
    }

    #[tokio::test]
    async fn top_miners_null_is_malformed() {
        let client = client();
        client.mock().push_result(json!(null));

        assert!(matches!(
            client.pool().top_miners().await,
            Err(Error::MalformedResponse { .. })
        ));
    }
}
