use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

/// Runtime settings for the responder. Built once at start-up and shared read-only between the
/// dispatcher and the refresher.
#[derive(Debug, Clone)]
pub struct Config {
    pub dns_udp_bind_addr: SocketAddr,
    pub refresh_interval: Duration,
    /// TTL (in seconds) carried by every answer record.
    pub response_ttl: u32,
    pub zone_file: PathBuf,
    /// Lowercase zone keys on load and queried names before lookup.
    pub fold_case: bool,
    /// Answer unknown names with an authoritative NXDOMAIN instead of dropping the query.
    pub nxdomain: bool,
    /// Keep serving the previous zone when a refresh fails, instead of exiting.
    pub keep_stale: bool,
}

impl Config {
    #[must_use]
    pub fn new(
        dns_udp_bind_addr: SocketAddr,
        refresh_interval: Duration,
        response_ttl: u32,
        zone_file: impl Into<PathBuf>,
    ) -> Self {
        Config {
            dns_udp_bind_addr,
            refresh_interval,
            response_ttl,
            zone_file: zone_file.into(),
            fold_case: false,
            nxdomain: false,
            keep_stale: false,
        }
    }
}
