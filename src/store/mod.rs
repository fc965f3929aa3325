//! Table accessor for `flavors`. One statement per operation.

mod memory;
mod postgres;

pub use memory::MemoryFlavorStore;
pub use postgres::PgFlavorStore;

use crate::error::AppError;
use crate::model::{Flavor, NewFlavor};
use async_trait::async_trait;

/// Row-level operations the router needs. `None` means no row has that id.
#[async_trait]
pub trait FlavorStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Flavor>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Flavor>, AppError>;

    /// Insert one row and return it with its generated id and timestamps.
    async fn create(&self, flavor: &NewFlavor) -> Result<Flavor, AppError>;

    /// Replace both mutable columns and refresh `updated_at`.
    async fn update(&self, id: i32, flavor: &NewFlavor) -> Result<Option<Flavor>, AppError>;

    /// Delete one row and return it as it was.
    async fn delete(&self, id: i32) -> Result<Option<Flavor>, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
