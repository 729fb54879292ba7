//! Pool-wide report.
//!
//! Prints the online counts and regional hashrate, then derives the PPLNS
//! share window, uncle rate, block rate and average reward from a sample of
//! recent pool blocks.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use flexpool::Client;
use flexpool::api_client::types::RegionalHashrate;
use flexpool::config::{API_URL_ENV, DEFAULT_BASE_URL};
use flexpool::stats;
use flexpool::units::{HashrateUnit, convert_hashrate, format_hms, gwei_to_eth};

#[derive(Parser, Debug)]
#[command(name = "flexpool-poolinfo", about = "Show Flexpool pool stats")]
struct Args {
    /// Number of block pages to sample
    #[arg(long, default_value_t = 10)]
    pages: u32,

    /// Delay between block page requests, in milliseconds
    #[arg(long, default_value_t = 200)]
    throttle_ms: u64,

    /// PPLNS window size, in shares
    #[arg(long, default_value_t = 2_000_000)]
    pplns_n: u64,

    /// Share difficulty, in hashes
    #[arg(long, default_value_t = 4_000_000_000)]
    share_difficulty: u64,

    /// API base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

struct PoolReport {
    miners_online: u64,
    workers_online: u64,
    hashrate: RegionalHashrate,
    sample_size: usize,
    pplns_window: u64,
    uncle_rate: f64,
    blocks_per_day: f64,
    average_reward: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    flexpool::tracing::init();
    let args = Args::parse();

    match fetch(&args).await {
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

async fn fetch(args: &Args) -> Result<PoolReport> {
    let client = Client::with_base_url(&args.api_url).context("Unable to build API client")?;
    let pool = client.pool();

    let hashrate = pool.hashrate().await.context("Failed to get pool hashrate")?;
    let miners_online = pool
        .miners_online()
        .await
        .context("Failed to get online miner count")?;
    let workers_online = pool
        .workers_online()
        .await
        .context("Failed to get online worker count")?;

    let throttle = (args.throttle_ms > 0).then(|| Duration::from_millis(args.throttle_ms));
    let blocks = pool
        .block_sample(args.pages, throttle)
        .await
        .context("Failed to get pool block data")?;

    let pplns_window = stats::pplns_share_window(args.pplns_n, args.share_difficulty, hashrate.total)
        .context("Unable to compute PPLNS share window")?;
    let uncle_rate = stats::uncle_rate(&blocks).context("Unable to compute uncle rate")?;
    let blocks_per_day =
        stats::average_blocks_per_day(&blocks).context("Unable to compute blocks per day")?;
    let average_reward =
        stats::average_block_reward(&blocks).context("Unable to compute average block reward")?;

    Ok(PoolReport {
        miners_online,
        workers_online,
        hashrate,
        sample_size: blocks.len(),
        pplns_window,
        uncle_rate,
        blocks_per_day,
        average_reward,
    })
}

fn ghs(hashrate: u64) -> u64 {
    // GH/s from H/s cannot overflow.
    convert_hashrate(hashrate, HashrateUnit::Hashes, HashrateUnit::GigaHashes).unwrap_or_default()
}

fn print_report(report: &PoolReport) {
    let unit = HashrateUnit::GigaHashes;

    println!("Flexpool Stats");
    println!("-");
    println!();
    println!(
        "Miners: {} (Workers: {})",
        report.miners_online, report.workers_online
    );
    println!();
    println!("Hashrate: {}{unit}", ghs(report.hashrate.total));
    for (region, hashrate) in report.hashrate.regions() {
        println!("\t{region}: {}{unit}", ghs(hashrate));
    }
    println!();
    println!(
        "PPLNS share window: {} ({})",
        format_hms(report.pplns_window),
        report.pplns_window
    );
    println!("Uncle rate: {:.2}%", report.uncle_rate * 100.0);
    println!(
        "Average blocks per day: {:.2} (average reward: {:.8} eth)",
        report.blocks_per_day,
        gwei_to_eth(report.average_reward)
    );
    println!(
        "\t* Averages and uncle rate are over the last {} blocks",
        report.sample_size
    );
}
