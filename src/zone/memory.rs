use crate::error::Error;
use crate::zone::{DomainTable, ZoneSource};
use tokio::sync::RwLock;

/// A zone source that hands out a copy of whatever table it holds. Useful when the zone is
/// managed by the embedding program rather than a file.
#[derive(Default, Debug)]
pub struct InMemoryZoneSource {
    table: RwLock<DomainTable>,
}

impl InMemoryZoneSource {
    #[must_use]
    pub fn new(table: DomainTable) -> Self {
        InMemoryZoneSource {
            table: RwLock::new(table),
        }
    }

    /// Replace the held table. Takes effect on the next [`ZoneSource::load`].
    pub async fn set(&self, table: DomainTable) {
        *self.table.write().await = table;
    }
}

#[async_trait::async_trait]
impl ZoneSource for InMemoryZoneSource {
    async fn load(&self) -> Result<DomainTable, Error> {
        Ok(self.table.read().await.clone())
    }
}
