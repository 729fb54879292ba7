//! `/worker/<address>/<worker>/...` endpoints.
//!
//! The worker API nests the action below the worker name, so the worker
//! name takes the dispatcher's method slot and the action is sent as the
//! single `/`-delimited parameter.

use super::decode;
use super::types::{ChartPoint, CurrentStats, DailyStats, Stats};
use super::{Client, Endpoint, Transport};
use crate::error::Result;

/// Accessor for one named worker. Obtained from [`Client::worker`].
pub struct WorkerApi<'a, T> {
    client: &'a Client<T>,
    address: &'a str,
    worker: &'a str,
}

impl<'a, T: Transport> WorkerApi<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, address: &'a str, worker: &'a str) -> Self {
        Self {
            client,
            address,
            worker,
        }
    }

    pub fn name(&self) -> &str {
        self.worker
    }

    async fn get(&self, action: &str) -> Result<serde_json::Value> {
        self.client
            .request(
                Endpoint::Worker,
                self.address,
                self.worker,
                &[action.to_string()],
            )
            .await
    }

    pub async fn current(&self) -> Result<CurrentStats> {
        decode::object(&self.get("current").await?, "worker current")
    }

    pub async fn daily(&self) -> Result<DailyStats> {
        decode::object(&self.get("daily").await?, "worker daily")
    }

    pub async fn stats(&self) -> Result<Stats> {
        decode::object(&self.get("stats").await?, "worker stats")
    }

    pub async fn chart(&self) -> Result<Vec<ChartPoint>> {
        decode::list(&self.get("chart").await?, "worker chart")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api_client::testing::client;
    use crate::error::Error;

    #[tokio::test]
    async fn current_path_and_decode() {
        let client = client();
        client
            .mock()
            .push_result(json!({"effective_hashrate": 90_000_000, "reported_hashrate": 95_000_000}));

        let current = client.worker("0xabc", "rig01").current().await.unwrap();
        assert_eq!(current.effective_hashrate, 90_000_000);
        assert_eq!(current.reported_hashrate, 95_000_000);
        assert_eq!(
            client.mock().urls(),
            ["https://api.test/v1/worker/0xabc/rig01/current"]
        );
    }

    #[tokio::test]
    async fn daily_and_stats() {
        let client = client();
        let worker = client.worker("0xabc", "rig01");
        let daily = json!({
            "effective_hashrate": 88_000_000,
            "reported_hashrate": 95_000_000,
            "valid_shares": 1_000,
            "stale_shares": 20,
            "invalid_shares": 0,
        });
        client.mock().push_result(daily.clone());
        client.mock().push_result(json!({
            "current": {"effective_hashrate": 1, "reported_hashrate": 2},
            "daily": daily,
        }));

        assert_eq!(worker.daily().await.unwrap().valid_shares, 1_000);
        assert_eq!(worker.stats().await.unwrap().daily.stale_shares, 20);
        assert_eq!(
            client.mock().urls(),
            [
                "https://api.test/v1/worker/0xabc/rig01/daily",
                "https://api.test/v1/worker/0xabc/rig01/stats",
            ]
        );
    }

    #[tokio::test]
    async fn chart() {
        let client = client();
        client.mock().push_result(json!([{
            "timestamp": 1_600_000_000,
            "effective_hashrate": 90_000_000,
            "average_effective_hashrate": 89_512_345.67,
            "reported_hashrate": 95_000_000,
            "valid_shares": 30,
            "stale_shares": 1,
            "invalid_shares": 0,
        }]));

        let chart = client.worker("0xabc", "rig01").chart().await.unwrap();
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].average_effective_hashrate, 89_512_345.67);
    }

    #[tokio::test]
    async fn stats_missing_daily_is_malformed() {
        let client = client();
        client
            .mock()
            .push_result(json!({"current": {"effective_hashrate": 1, "reported_hashrate": 2}}));

        let err = client.worker("0xabc", "rig01").stats().await.unwrap_err();
        match err {
            Error::MalformedResponse { reason, .. } => assert!(reason.contains("daily")),
            other => panic!("expected malformed response, got {other:?}"),
        }
    }
}
