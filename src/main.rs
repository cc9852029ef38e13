use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zonecrab::zone::{DynZoneSource, SharedTable};
use zonecrab::{Config, FileZoneSource, LiveTable, Refresher, SharedConfig};

#[derive(Parser)]
#[command(name = "zonecrab")]
#[command(version)]
#[command(about = "Authoritative DNS responder for a fixed zone of A records")]
struct Cli {
    /// UDP port to answer DNS queries on
    #[arg(long, alias = "dnsPort", value_parser = clap::value_parser!(u16).range(1..))]
    dns_port: u16,

    /// Seconds between reloads of the zone file
    #[arg(long, alias = "serverRefreshTime", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// TTL, in seconds, of every answer record
    #[arg(long, alias = "ttlForResponse", value_parser = clap::value_parser!(u32).range(1..))]
    ttl: u32,

    /// Address to bind the UDP socket to
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Zone file mapping domains to IPv4 addresses (JSON, or YAML for .yaml/.yml)
    #[arg(long, default_value = "domains.json")]
    zone_file: PathBuf,

    /// Match queried names case-insensitively
    #[arg(long)]
    fold_case: bool,

    /// Answer unknown names with NXDOMAIN instead of dropping the query
    #[arg(long)]
    nxdomain: bool,

    /// Keep serving the previous zone when a reload fails, instead of exiting
    #[arg(long)]
    keep_stale: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config_init(Cli::parse());
    tracing_init();

    let zone_source: DynZoneSource =
        Arc::new(FileZoneSource::new(&config.zone_file, config.fold_case));
    let table = zone_source
        .load()
        .await
        .with_context(|| format!("loading zone from {}", config.zone_file.display()))?;
    tracing::info!(
        "loaded {} domains from {}",
        table.len(),
        config.zone_file.display()
    );
    let table: SharedTable = Arc::new(LiveTable::new(table));

    let refresher = Refresher::new(&config, zone_source, table.clone());
    let refresh_handle = tokio::spawn(refresher.block_until_done());

    let dns_server = zonecrab::new_dns(config.clone(), table).await?;
    tracing::info!("DNS listening on UDP {}", dns_server.local_addr()?);
    let dns_handle = tokio::spawn(dns_server.block_until_done());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(refresh_res) = refresh_handle => {
            if let Err(err) = refresh_res {
                return Err(err).context("refreshing zone");
            }
        }
        Ok(()) = dns_handle => {}
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zonecrab=info".into()),
        )
        .init();
}

fn config_init(cli: Cli) -> SharedConfig {
    let mut config = Config::new(
        SocketAddr::new(cli.bind, cli.dns_port),
        Duration::from_secs(cli.refresh_interval),
        cli.ttl,
        cli.zone_file,
    );
    config.fold_case = cli.fold_case;
    config.nxdomain = cli.nxdomain;
    config.keep_stale = cli.keep_stale;
    Arc::new(config)
}
