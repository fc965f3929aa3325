//! In-process accessor with the same contract as the PostgreSQL one.
//! Ids are sequential and never reused, like a `SERIAL` column.

use super::FlavorStore;
use crate::error::AppError;
use crate::migration::SEED_FLAVORS;
use crate::model::{Flavor, NewFlavor};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Flavor>,
}

#[derive(Default)]
pub struct MemoryFlavorStore {
    table: RwLock<Table>,
}

impl MemoryFlavorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the four seed rows with ids 1..=4.
    pub fn seeded() -> Self {
        let mut table = Table::default();
        for (name, is_favorite) in SEED_FLAVORS {
            table.insert(&NewFlavor::new(name, is_favorite));
        }
        Self {
            table: RwLock::new(table),
        }
    }
}

impl Table {
    fn insert(&mut self, flavor: &NewFlavor) -> Flavor {
        self.last_id += 1;
        let now = Utc::now();
        let row = Flavor {
            id: self.last_id,
            name: flavor.name.clone(),
            is_favorite: flavor.is_favorite,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(row.id, row.clone());
        row
    }
}

#[async_trait]
impl FlavorStore for MemoryFlavorStore {
    async fn list(&self) -> Result<Vec<Flavor>, AppError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Flavor>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, flavor: &NewFlavor) -> Result<Flavor, AppError> {
        Ok(self.table.write().await.insert(flavor))
    }

    async fn update(&self, id: i32, flavor: &NewFlavor) -> Result<Option<Flavor>, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            row.name = flavor.name.clone();
            row.is_favorite = flavor.is_favorite;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Flavor>, AppError> {
        Ok(self.table.write().await.rows.remove(&id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
