//! Flavor CRUD routes, mounted under the canonical and the alternate prefix.

use crate::handlers::flavor::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const FLAVOR_MOUNTS: &[&str] = &["/api/flavors", "/flavors"];

pub fn flavor_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for base in FLAVOR_MOUNTS {
        router = router
            .route(base, get(list).post(create))
            .route(&format!("{base}/:id"), get(read).put(update).delete(delete));
    }
    router.with_state(state)
}
