//! Laptop Catalog demo client
//!
//! Registers a batch of random laptops, then streams a search back.

use std::{io, time::Duration};

use anyhow::{bail, Context};
use clap::Parser;
use reqwest::{Client, StatusCode};
use tokio_stream::StreamExt;
use tokio_util::{
    codec::{FramedRead, LinesCodec},
    io::StreamReader,
};
use tracing_subscriber::EnvFilter;

use laptop_catalog::{
    api::REQUEST_TIMEOUT_HEADER,
    models::laptop::{
        CreateLaptopRequest, CreateLaptopResponse, Filter, Memory, SearchLaptopRequest,
        SearchLaptopResponse,
    },
    sample,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "laptop-client")]
#[command(about = "Create sample laptops and search the catalog")]
#[command(version)]
struct Cli {
    /// Server address, e.g. localhost:8080
    #[arg(long)]
    address: String,
    /// Maximum price in USD
    #[arg(long, default_value_t = 3000.0)]
    price: f64,
    /// Minimum CPU cores
    #[arg(long, default_value_t = 4)]
    cores: u32,
    /// Minimum CPU frequency in GHz
    #[arg(long, default_value_t = 2.5)]
    ghz: f64,
    /// Minimum RAM in GB
    #[arg(long, default_value_t = 8)]
    ram: u64,
    /// Number of laptops to create before searching
    #[arg(long, default_value_t = 10)]
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let base_url = if cli.address.starts_with("http") {
        format!("{}/api/v1", cli.address.trim_end_matches('/'))
    } else {
        format!("http://{}/api/v1", cli.address)
    };
    tracing::info!("dial server {}", base_url);

    let client = Client::new();
    for _ in 0..cli.count {
        create_laptop(&client, &base_url).await?;
    }

    let filter = Filter {
        max_price_usd: cli.price,
        min_cpu_cores: cli.cores,
        min_cpu_ghz: cli.ghz,
        min_ram: Some(Memory::gigabytes(cli.ram)),
    };
    search_laptop(&client, &base_url, filter).await
}

async fn create_laptop(client: &Client, base_url: &str) -> anyhow::Result<()> {
    let mut laptop = sample::new_laptop();
    laptop.id = String::new();

    let response = client
        .post(format!("{}/laptops", base_url))
        .header(REQUEST_TIMEOUT_HEADER, REQUEST_TIMEOUT.as_millis().to_string())
        .timeout(REQUEST_TIMEOUT)
        .json(&CreateLaptopRequest { laptop })
        .send()
        .await
        .context("cannot create laptop")?;

    match response.status() {
        StatusCode::CREATED => {
            let created: CreateLaptopResponse = response.json().await?;
            tracing::info!("created laptop with id: {}", created.id);
        }
        StatusCode::CONFLICT => tracing::info!("laptop already exists"),
        status => {
            let body = response.text().await.unwrap_or_default();
            bail!("cannot create laptop: {} {}", status, body);
        }
    }
    Ok(())
}

async fn search_laptop(client: &Client, base_url: &str, filter: Filter) -> anyhow::Result<()> {
    tracing::info!("search filter: {}", filter);

    let response = client
        .post(format!("{}/laptops/search", base_url))
        .header(REQUEST_TIMEOUT_HEADER, REQUEST_TIMEOUT.as_millis().to_string())
        .timeout(REQUEST_TIMEOUT)
        .json(&SearchLaptopRequest { filter })
        .send()
        .await
        .context("cannot search laptop")?
        .error_for_status()?;

    let body = StreamReader::new(
        response
            .bytes_stream()
            .map(|chunk| chunk.map_err(io::Error::other)),
    );
    let lines = FramedRead::new(body, LinesCodec::new());
    tokio::pin!(lines);

    while let Some(line) = lines.next().await {
        let line = line.context("cannot receive response")?;
        if line.is_empty() {
            continue;
        }
        let found: SearchLaptopResponse = serde_json::from_str(&line)?;
        let laptop = found.laptop;
        tracing::info!(
            id = %laptop.id,
            brand = %laptop.brand,
            name = %laptop.name,
            cpu_cores = laptop.cpu.as_ref().map(|c| c.number_cores).unwrap_or_default(),
            price = laptop.price_usd,
            "found laptop"
        );
    }
    Ok(())
}
