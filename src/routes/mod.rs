//! Router assembly: common routes, flavor routes, OpenAPI document, HTTP layers.

mod common;
mod flavor;

pub use common::common_routes;
pub use flavor::{flavor_routes, FLAVOR_MOUNTS};

use crate::error::{AppError, ErrorBody};
use crate::handlers;
use crate::model::{Flavor, FlavorInput};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Largest accepted request body. Flavor payloads are a few dozen bytes.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flavors API",
        description = "CRUD over the flavors table"
    ),
    tags((name = "flavors", description = "Flavor management")),
    paths(
        handlers::flavor::list,
        handlers::flavor::read,
        handlers::flavor::create,
        handlers::flavor::update,
        handlers::flavor::delete,
    ),
    components(schemas(Flavor, FlavorInput, ErrorBody))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route")
}

/// axum answers a known path with an unrouted method by a bare 405; give it
/// the error envelope and keep the `Allow` header.
async fn envelope_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

/// Full application router with the accessor injected through `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(flavor_routes(state))
        .route("/api/openapi.json", get(openapi))
        .fallback(route_not_found)
        .layer(middleware::map_response(envelope_method_not_allowed))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
