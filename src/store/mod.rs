//! Read access to the PLACENAMES table.
//!
//! Two backends implement [`PlaceStore`]: PostgreSQL, opening one
//! connection per request, and an in-memory table loaded once from a CSV
//! export.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PageWindow, PlaceNameRow, RegisterItem, SearchFilter};

#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Number of rows matching the filter, plus one window of `(ID, NAME)`
    /// pairs in register order
    async fn register(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<(u64, Vec<RegisterItem>)>;

    /// The row with the given ID, if any
    async fn fetch(&self, id: &str) -> Result<Option<PlaceNameRow>>;

    /// Cheap reachability check for the health endpoint
    async fn ping(&self) -> Result<()>;
}
