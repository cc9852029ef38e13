//! Zone Crab
//!
//! A small authoritative DNS responder for a fixed, operator-maintained zone.
//!
//! Zone Crab answers UDP `A` queries from a table of domain names and IPv4 addresses kept in a
//! JSON zone file. The table is reloaded on a fixed interval and swapped in atomically, so the
//! zone can be edited while the responder is running. Every answer is authoritative and carries
//! the same operator-configured TTL.
//!
//! It is not a recursive resolver: it doesn't cache, forward, or serve any record type other
//! than `A`, and only ever answers over UDP.
//!
#![warn(clippy::pedantic)]

pub mod config;
pub mod dns;
pub mod error;
pub mod zone;

pub use config::{Config, SharedConfig};
pub use dns::new as new_dns;
pub use zone::refresh::Refresher;
pub use zone::{DomainTable, FileZoneSource, InMemoryZoneSource, LiveTable};
