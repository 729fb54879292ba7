//! Report for a single mining address.
//!
//! Fetches balance, account details, revenue figures, the worker listing
//! and the first page of payments and blocks, then prints them as text.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use flexpool::Client;
use flexpool::api_client::types::{Block, MinerDetails, MinerWorker, Page, Payment};
use flexpool::config::{API_URL_ENV, DEFAULT_BASE_URL};
use flexpool::units::{HashrateUnit, convert_hashrate, gwei_to_eth};

#[derive(Parser, Debug)]
#[command(name = "flexpool-minerinfo", about = "Show Flexpool stats for a mining address")]
struct Args {
    /// Mining wallet address
    #[arg(long)]
    address: Option<String>,

    /// API base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

struct MinerReport {
    address: String,
    balance: u64,
    details: MinerDetails,
    round_share: f64,
    estimated_daily: u64,
    total_paid: u64,
    total_donated: u64,
    workers: Vec<MinerWorker>,
    payments: Page<Payment>,
    blocks: Page<Block>,
}

#[tokio::main]
async fn main() -> ExitCode {
    flexpool::tracing::init();
    let args = Args::parse();

    let Some(address) = args.address.filter(|a| !a.is_empty()) else {
        eprintln!("No address given, exiting.");
        return ExitCode::FAILURE;
    };

    match fetch(&args.api_url, address).await {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn fetch(api_url: &str, address: String) -> Result<MinerReport> {
    let client = Client::with_base_url(api_url).context("Unable to build API client")?;
    let miner = client.miner(&address);

    let balance = miner.balance().await.context("Unable to get wallet balance")?;
    let details = miner.details().await.context("Unable to get wallet details")?;
    let round_share = miner
        .round_share()
        .await
        .context("Unable to get round share")?;
    let estimated_daily = miner
        .estimated_daily_revenue()
        .await
        .context("Unable to get estimated daily revenue")?;
    let total_paid = miner.total_paid().await.context("Unable to get total paid")?;
    let total_donated = miner
        .total_donated()
        .await
        .context("Unable to get total donated")?;
    let workers = miner
        .workers()
        .await
        .context("Unable to get worker listing")?;
    let payments = miner
        .payments(0)
        .await
        .context("Unable to get latest payments")?;
    let blocks = miner
        .blocks(0)
        .await
        .context("Unable to get latest blocks mined")?;

    Ok(MinerReport {
        address,
        balance,
        details,
        round_share,
        estimated_daily,
        total_paid,
        total_donated,
        workers,
        payments,
        blocks,
    })
}

fn print_report(report: &MinerReport) {
    println!("Flexpool Miner '{}' Stats", report.address);
    println!("-");
    println!();
    println!("Unpaid Balance: {:.8} eth", gwei_to_eth(report.balance));
    println!(
        "Min Payout Threshold: {:.4} eth\tDonation Percent: {:.4}%\tRound Share: {:.8}%",
        gwei_to_eth(report.details.min_payout_threshold),
        report.details.pool_donation,
        report.round_share,
    );
    println!(
        "Estimated Daily Eth: {:.8} eth\tTotal Paid: {:.8} eth\tTotal Donated: {:.8} eth",
        gwei_to_eth(report.estimated_daily),
        gwei_to_eth(report.total_paid),
        gwei_to_eth(report.total_donated),
    );

    println!();
    println!("Workers:");
    if report.workers.is_empty() {
        println!("\tNone currently active.");
    }
    for worker in &report.workers {
        // MH/s from H/s cannot overflow.
        let mhs = convert_hashrate(
            worker.effective_hashrate,
            HashrateUnit::Hashes,
            HashrateUnit::MegaHashes,
        )
        .unwrap_or_default();
        println!(
            "\t{} (effective hashrate: {}{})\t(valid: {}, stale: {}, invalid: {})",
            worker.name,
            mhs,
            HashrateUnit::MegaHashes,
            worker.valid_shares,
            worker.stale_shares,
            worker.invalid_shares,
        );
    }

    println!();
    println!("Latest payments:");
    if report.payments.data.is_empty() {
        println!("\tNo payments made.");
    }
    for payment in &report.payments.data {
        println!(
            "\tTxn: {} (amount: {:.8} eth)\t{}",
            payment.txid,
            gwei_to_eth(payment.amount),
            format_timestamp(payment.timestamp),
        );
    }

    println!();
    println!("Latest blocks mined:");
    if report.blocks.data.is_empty() {
        println!("\tNo blocks mined yet.");
    }
    for block in &report.blocks.data {
        println!(
            "\t{} (type: {}) (reward: {:.8} eth)\t{}",
            block.number,
            block.kind,
            gwei_to_eth(block.total_rewards),
            format_timestamp(block.timestamp),
        );
    }
}

/// RFC 3339 in UTC, or the raw seconds if out of range.
fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| timestamp.to_string())
}
