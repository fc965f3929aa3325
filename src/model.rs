//! The flavor row and its request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `flavors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Flavor {
    /// Generated by the datastore, never changes
    pub id: i32,
    pub name: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Body of create and update requests, before validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FlavorInput {
    /// Required and non-empty
    pub name: Option<String>,
    /// Defaults to false
    pub is_favorite: Option<bool>,
}

/// Validated values for both mutable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlavor {
    pub name: String,
    pub is_favorite: bool,
}

impl NewFlavor {
    pub fn new(name: impl Into<String>, is_favorite: bool) -> Self {
        Self {
            name: name.into(),
            is_favorite,
        }
    }
}
