//! Flavors API: REST backend for a single `flavors` table on PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, ErrorBody};
pub use migration::{ensure_schema, seed, SeedOutcome, SEED_FLAVORS};
pub use model::{Flavor, FlavorInput, NewFlavor};
pub use routes::{build_router, common_routes, flavor_routes, ApiDoc};
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{FlavorStore, MemoryFlavorStore, PgFlavorStore};
