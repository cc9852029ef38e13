//! Periodic reload of the [`LiveTable`][super::LiveTable].
//!
//! Every `interval` the [`Refresher`] loads a complete table from its
//! [`ZoneSource`][super::ZoneSource] and swaps it in. What happens when a load fails depends on
//! [`Config::keep_stale`][`crate::config::Config::keep_stale`]: by default the failure ends the
//! refresher with the error (and the process with it); with `keep_stale` the failure is logged and
//! the previous table keeps being served.

use crate::config::Config;
use crate::error::Error;
use crate::zone::{DynZoneSource, SharedTable};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

pub struct Refresher {
    source: DynZoneSource,
    table: SharedTable,
    interval: Duration,
    keep_stale: bool,
}

impl Refresher {
    #[must_use]
    pub fn new(config: &Config, source: DynZoneSource, table: SharedTable) -> Self {
        Refresher {
            source,
            table,
            interval: config.refresh_interval,
            keep_stale: config.keep_stale,
        }
    }

    /// Load the zone once and install it, returning the number of entries now served.
    ///
    /// # Errors
    ///
    /// Returns whatever the [`ZoneSource`][super::ZoneSource] failed with. The current table is
    /// left untouched in that case.
    pub async fn refresh(&self) -> Result<usize, Error> {
        let table = self.source.load().await?;
        let entries = table.len();
        self.table.replace(table);
        Ok(entries)
    }

    /// Refresh every interval, forever. The first refresh happens one interval from now, the
    /// caller is expected to have installed an initial table already.
    ///
    /// # Errors
    ///
    /// Returns the first load failure, unless `keep_stale` is set, in which case this never
    /// returns.
    pub async fn block_until_done(self) -> Result<(), Error> {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.refresh().await {
                Ok(entries) => debug!("refreshed domain table, {entries} entries"),
                Err(err) if self.keep_stale => {
                    error!("domain table refresh failed, keeping previous table: {err}");
                }
                Err(err) => {
                    error!("domain table refresh failed: {err}");
                    return Err(err);
                }
            }
        }
    }
}
