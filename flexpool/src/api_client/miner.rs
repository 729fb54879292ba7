//! `/miner/<address>/...` endpoints.

use super::decode::{self, Decode, Fields};
use super::types::{
    Block, BlockCount, ChartPoint, CurrentStats, DailyStats, MinerDetails, MinerWorker, Page,
    Payment, PaymentChartPoint, Stats, WorkerCount,
};
use super::{Client, Endpoint, Transport, page_param};
use crate::error::Result;

/// Accessor for one mining address. Obtained from [`Client::miner`].
pub struct MinerApi<'a, T> {
    client: &'a Client<T>,
    address: &'a str,
}

impl<'a, T: Transport> MinerApi<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, address: &'a str) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> &str {
        self.address
    }

    async fn get(&self, method: &str, params: &[String]) -> Result<serde_json::Value> {
        self.client
            .request(Endpoint::Miner, self.address, method, params)
            .await
    }

    /// Unpaid balance, in gwei.
    pub async fn balance(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("balance", &[]).await?, "balance")
    }

    pub async fn current(&self) -> Result<CurrentStats> {
        decode::object(&self.get("current", &[]).await?, "current")
    }

    pub async fn daily(&self) -> Result<DailyStats> {
        decode::object(&self.get("daily", &[]).await?, "daily")
    }

    pub async fn stats(&self) -> Result<Stats> {
        decode::object(&self.get("stats", &[]).await?, "stats")
    }

    pub async fn worker_count(&self) -> Result<WorkerCount> {
        decode::object(&self.get("workerCount", &[]).await?, "workerCount")
    }

    /// Active workers. An address with no workers yields an empty list.
    pub async fn workers(&self) -> Result<Vec<MinerWorker>> {
        decode::list_or_empty(&self.get("workers", &[]).await?, "workers")
    }

    pub async fn chart(&self) -> Result<Vec<ChartPoint>> {
        decode::list(&self.get("chart", &[]).await?, "chart")
    }

    pub async fn payments(&self, page: u32) -> Result<Page<Payment>> {
        decode::page(&self.get("payments", &page_param(page)).await?, "payments")
    }

    pub async fn payment_count(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("paymentCount", &[]).await?, "paymentCount")
    }

    pub async fn payments_chart(&self) -> Result<Vec<PaymentChartPoint>> {
        decode::list(&self.get("paymentsChart", &[]).await?, "paymentsChart")
    }

    /// Blocks mined by this address.
    pub async fn blocks(&self, page: u32) -> Result<Page<Block>> {
        decode::page(&self.get("blocks", &page_param(page)).await?, "blocks")
    }

    pub async fn block_count(&self) -> Result<BlockCount> {
        decode::object(&self.get("blockCount", &[]).await?, "blockCount")
    }

    pub async fn details(&self) -> Result<MinerDetails> {
        decode::object(&self.get("details", &[]).await?, "details")
    }

    /// Estimated revenue over the next 24 hours, in gwei.
    pub async fn estimated_daily_revenue(&self) -> Result<u64> {
        decode::narrow_u64(
            &self.get("estimatedDailyRevenue", &[]).await?,
            "estimatedDailyRevenue",
        )
    }

    /// Share of the current round, in percent.
    pub async fn round_share(&self) -> Result<f64> {
        decode::number(&self.get("roundShare", &[]).await?, "roundShare")
    }

    /// Total paid out to this address, in gwei.
    pub async fn total_paid(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("totalPaid", &[]).await?, "totalPaid")
    }

    /// Total donated to the pool, in gwei.
    pub async fn total_donated(&self) -> Result<u64> {
        decode::narrow_u64(&self.get("totalDonated", &[]).await?, "totalDonated")
    }
}

impl Decode for WorkerCount {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            online: f.u64("online")?,
            offline: f.u64("offline")?,
        })
    }
}

impl Decode for MinerWorker {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: f.string("name")?,
            online: f.bool("online")?,
            duplicate_workers_merged: f.u64("duplicate_workers_merged")?,
            reported_hashrate: f.u64("reported_hashrate")?,
            effective_hashrate: f.u64("effective_hashrate")?,
            valid_shares: f.u64("valid_shares")?,
            stale_shares: f.u64("stale_shares")?,
            invalid_shares: f.u64("invalid_shares")?,
            last_seen: f.u64("last_seen")?,
        })
    }
}

impl Decode for Payment {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            txid: f.string("txid")?,
            amount: f.u64("amount")?,
            timestamp: f.u64("timestamp")?,
            duration: f.u64("duration")?,
        })
    }
}

impl Decode for PaymentChartPoint {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            amount: f.u64("amount")?,
            timestamp: f.u64("timestamp")?,
        })
    }
}

impl Decode for MinerDetails {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            min_payout_threshold: f.u64("min_payout_threshold")?,
            pool_donation: f.f64("pool_donation")?,
            max_fee_price: f.u64("max_fee_price")?,
            censored_email: f.string("censored_email")?,
            censored_ip: f.string("censored_ip")?,
            first_joined: f.u64("first_joined")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api_client::decode::tests::block_json;
    use crate::api_client::testing::client;
    use crate::error::Error;

    const ADDRESS: &str = "0x0000000000000000000000000000000000000001";

    #[tokio::test]
    async fn details_end_to_end() {
        let client = client();
        client.mock().push(
            200,
            r#"{"error":{"code":0,"message":""},"result":{"min_payout_threshold":10000000000,"pool_donation":1.0,"max_fee_price":0,"censored_email":"a***@b.com","censored_ip":"1.2.3.*","first_joined":1600000000}}"#,
        );

        let details = client.miner(ADDRESS).details().await.unwrap();
        assert_eq!(details.min_payout_threshold, 10_000_000_000);
        assert_eq!(details.pool_donation, 1.0);
        assert_eq!(details.max_fee_price, 0);
        assert_eq!(details.censored_email, "a***@b.com");
        assert_eq!(details.censored_ip, "1.2.3.*");
        assert_eq!(details.first_joined, 1_600_000_000);
        assert_eq!(
            client.mock().urls(),
            [format!("https://api.test/v1/miner/{ADDRESS}/details")]
        );
    }

    #[tokio::test]
    async fn details_with_string_result_is_malformed() {
        let client = client();
        client.mock().push_result(json!("not an object"));

        let err = client.miner(ADDRESS).details().await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }), "{err}");
    }

    #[tokio::test]
    async fn scalar_endpoints() {
        let client = client();
        let miner = client.miner(ADDRESS);
        client.mock().push_result(json!(123_456_789));
        client.mock().push_result(json!(7));
        client.mock().push_result(json!(0.0125));
        client.mock().push_result(json!(5_000_000_000u64));
        client.mock().push_result(json!(1_000_000));
        client.mock().push_result(json!(42_000));

        assert_eq!(miner.balance().await.unwrap(), 123_456_789);
        assert_eq!(miner.payment_count().await.unwrap(), 7);
        assert_eq!(miner.round_share().await.unwrap(), 0.0125);
        assert_eq!(miner.total_paid().await.unwrap(), 5_000_000_000);
        assert_eq!(miner.total_donated().await.unwrap(), 1_000_000);
        assert_eq!(miner.estimated_daily_revenue().await.unwrap(), 42_000);

        let methods: Vec<String> = client
            .mock()
            .urls()
            .iter()
            .map(|u| u.rsplit('/').next().unwrap().to_string())
            .collect();
        assert_eq!(
            methods,
            [
                "balance",
                "paymentCount",
                "roundShare",
                "totalPaid",
                "totalDonated",
                "estimatedDailyRevenue",
            ]
        );
    }

    #[tokio::test]
    async fn balance_null_is_malformed() {
        let client = client();
        client.mock().push_result(json!(null));

        let err = client.miner(ADDRESS).balance().await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn workers_null_is_empty() {
        let client = client();
        client.mock().push_result(json!(null));

        assert!(client.miner(ADDRESS).workers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn workers_list() {
        let client = client();
        client.mock().push_result(json!([{
            "name": "rig01",
            "online": true,
            "duplicate_workers_merged": 0,
            "reported_hashrate": 100_000_000,
            "effective_hashrate": 97_500_000.5,
            "valid_shares": 900,
            "stale_shares": 10,
            "invalid_shares": 2,
            "last_seen": 1_600_000_500,
        }]));

        let workers = client.miner(ADDRESS).workers().await.unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].name, "rig01");
        assert_eq!(workers[0].effective_hashrate, 97_500_000);
        assert_eq!(workers[0].invalid_shares, 2);
    }

    #[tokio::test]
    async fn chart_null_is_malformed() {
        let client = client();
        client.mock().push_result(json!(null));

        assert!(client.miner(ADDRESS).chart().await.is_err());
    }

    #[tokio::test]
    async fn payments_page_param_and_null_data() {
        let client = client();
        client.mock().push_result(json!({
            "data": null,
            "items_per_page": 10,
            "total_items": 0,
            "total_pages": 0,
        }));

        let page = client.miner(ADDRESS).payments(3).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.items_per_page, 10);
        assert_eq!(
            client.mock().urls(),
            [format!("https://api.test/v1/miner/{ADDRESS}/payments?page=3")]
        );
    }

    #[tokio::test]
    async fn payments_page() {
        let client = client();
        client.mock().push_result(json!({
            "data": [
                {"txid": "0x01", "amount": 50_000_000, "timestamp": 1_600_000_000, "duration": 86_400},
                {"txid": "0x02", "amount": 60_000_000, "timestamp": 1_600_086_400, "duration": 86_400},
            ],
            "items_per_page": 10,
            "total_items": 12,
            "total_pages": 2,
        }));

        let page = client.miner(ADDRESS).payments(0).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[1].amount, 60_000_000);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn blocks_page() {
        let client = client();
        client.mock().push_result(json!({
            "data": [block_json(10, "block")],
            "items_per_page": 10,
            "total_items": 1,
            "total_pages": 1,
        }));

        let page = client.miner(ADDRESS).blocks(0).await.unwrap();
        assert_eq!(page.data[0].number, 10);
        assert_eq!(page.data[0].luck, 0.85);
        assert!(client.mock().urls()[0].ends_with("/blocks?page=0"));
    }

    #[tokio::test]
    async fn stats_and_counts() {
        let client = client();
        let miner = client.miner(ADDRESS);
        client.mock().push_result(json!({
            "current": {"effective_hashrate": 1, "reported_hashrate": 2},
            "daily": {
                "effective_hashrate": 3,
                "reported_hashrate": 4,
                "valid_shares": 5,
                "stale_shares": 6,
                "invalid_shares": 7,
            },
        }));
        client.mock().push_result(json!({"online": 3, "offline": 1}));
        client.mock().push_result(json!({"confirmed": 20, "unconfirmed": 2}));

        let stats = miner.stats().await.unwrap();
        assert_eq!(stats.current.reported_hashrate, 2);
        assert_eq!(stats.daily.stale_shares, 6);

        let count = miner.worker_count().await.unwrap();
        assert_eq!((count.online, count.offline), (3, 1));

        let blocks = miner.block_count().await.unwrap();
        assert_eq!((blocks.confirmed, blocks.unconfirmed), (20, 2));
    }

    #[tokio::test]
    async fn payments_chart() {
        let client = client();
        client.mock().push_result(json!([
            {"amount": 10, "timestamp": 1},
            {"amount": 20, "timestamp": 2},
        ]));

        let chart = client.miner(ADDRESS).payments_chart().await.unwrap();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[1].amount, 20);
    }
}
