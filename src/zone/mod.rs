//! The domain table served by the responder, and where it comes from.
//!
//! A [`DomainTable`] maps fully qualified names (no trailing dot) to IPv4 dotted quads. The
//! responder only ever reads the *current* table through a [`LiveTable`], which the
//! [`refresh::Refresher`] replaces wholesale on every tick. Request tasks take a snapshot once and
//! keep it until they finish, so a swap never hands a reader a half-updated table.
//!
//! Tables are produced by a [`ZoneSource`]. Two implementations are provided,
//! [`file::FileZoneSource`] and [`memory::InMemoryZoneSource`]. The former reads a JSON zone file
//! on every load, the latter hands out whatever table it was last given.

use crate::error::Error;
use arc_swap::ArcSwap;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub mod file;
pub mod memory;
pub mod refresh;

#[allow(clippy::module_name_repetitions)]
pub use file::FileZoneSource;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryZoneSource;

/// `DynZoneSource` is a type alias for a [`ZoneSource`] shared between the start-up load and the
/// [`refresh::Refresher`].
#[allow(clippy::module_name_repetitions)]
pub type DynZoneSource = Arc<dyn ZoneSource + Send + Sync>;

/// `SharedTable` is the handle request tasks and the refresher use to reach the [`LiveTable`].
pub type SharedTable = Arc<LiveTable>;

/// An async trait describing where zone data comes from. Each call produces a complete,
/// validated [`DomainTable`], or fails without side effects.
#[async_trait::async_trait]
pub trait ZoneSource {
    /// Load the zone as a new table.
    async fn load(&self) -> Result<DomainTable, Error>;
}

/// A mapping of domain names to IPv4 dotted quads.
///
/// Deserialized from `{"domains": {"<name>": "<ipv4>"}}`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainTable {
    domains: HashMap<String, String>,
    #[serde(skip)]
    fold_case: bool,
}

impl DomainTable {
    /// Build a table from `(domain, address)` pairs, as given. No normalization or validation is
    /// performed, see [`DomainTable::normalized`].
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        DomainTable {
            domains: entries
                .into_iter()
                .map(|(domain, address)| (domain.into(), address.into()))
                .collect(),
            fold_case: false,
        }
    }

    /// Strip trailing dots from every key, lowercase keys when `fold_case` is set, and check that
    /// every address is an IPv4 dotted quad.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneEntry`] for the first entry whose address doesn't parse.
    ///
    /// Returns [`Error::DuplicateZoneEntry`] if two keys are the same name once normalized, e.g.
    /// `a.com` and `a.com.`.
    pub fn normalized(self, fold_case: bool) -> Result<Self, Error> {
        let mut domains = HashMap::with_capacity(self.domains.len());
        for (domain, address) in self.domains {
            if address.parse::<Ipv4Addr>().is_err() {
                return Err(Error::InvalidZoneEntry { domain, address });
            }
            let mut domain = domain.trim_end_matches('.').to_string();
            if fold_case {
                domain.make_ascii_lowercase();
            }
            if domains.contains_key(&domain) {
                return Err(Error::DuplicateZoneEntry(domain));
            }
            domains.insert(domain, address);
        }
        Ok(DomainTable { domains, fold_case })
    }

    /// Whether lookups against this table should lowercase the queried name first.
    #[must_use]
    pub fn folds_case(&self) -> bool {
        self.fold_case
    }

    /// The address mapped to `domain`, by exact key match.
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&str> {
        self.domains.get(domain).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// The current [`DomainTable`]. Reads never block on a replacement, and a replacement is a single
/// pointer swap.
#[derive(Debug)]
pub struct LiveTable {
    current: ArcSwap<DomainTable>,
}

impl LiveTable {
    #[must_use]
    pub fn new(table: DomainTable) -> Self {
        LiveTable {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Take a snapshot of the current table. The snapshot stays valid, and unchanged, after any
    /// later [`LiveTable::replace`].
    #[must_use]
    pub fn snapshot(&self) -> Arc<DomainTable> {
        self.current.load_full()
    }

    /// Install `table` as the current table.
    pub fn replace(&self, table: DomainTable) {
        self.current.store(Arc::new(table));
    }
}
