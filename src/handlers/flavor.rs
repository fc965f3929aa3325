//! Flavor CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::{Flavor, FlavorInput};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

const ENTITY: &str = "Flavor";

/// Path ids are strings; anything that cannot be a row key cannot match a row.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.trim().parse().map_err(|_| AppError::NotFound(ENTITY))
}

/// List all flavors
#[utoipa::path(
    get,
    path = "/api/flavors",
    responses(
        (status = 200, description = "All flavors", body = [Flavor]),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    ),
    tag = "flavors"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Flavor>>, AppError> {
    let rows = state.store.list().await?;
    Ok(Json(rows))
}

/// Get one flavor by id
#[utoipa::path(
    get,
    path = "/api/flavors/{id}",
    params(("id" = i32, Path, description = "Flavor id")),
    responses(
        (status = 200, description = "Flavor found", body = Flavor),
        (status = 404, description = "Flavor not found", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    ),
    tag = "flavors"
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Flavor>, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    Ok(Json(row))
}

/// Create a flavor
#[utoipa::path(
    post,
    path = "/api/flavors",
    request_body = FlavorInput,
    responses(
        (status = 201, description = "Flavor created", body = Flavor),
        (status = 400, description = "Name missing or body malformed", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    ),
    tag = "flavors"
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<FlavorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Flavor>), AppError> {
    let Json(input) = payload?;
    let flavor = RequestValidator::validate(input)?;
    let row = state.store.create(&flavor).await?;
    tracing::info!(id = row.id, name = %row.name, "flavor created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// Replace both mutable fields of a flavor
#[utoipa::path(
    put,
    path = "/api/flavors/{id}",
    params(("id" = i32, Path, description = "Flavor id")),
    request_body = FlavorInput,
    responses(
        (status = 200, description = "Flavor updated", body = Flavor),
        (status = 400, description = "Name missing or body malformed", body = ErrorBody),
        (status = 404, description = "Flavor not found", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    ),
    tag = "flavors"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<FlavorInput>, JsonRejection>,
) -> Result<Json<Flavor>, AppError> {
    let id = parse_id(&id_str)?;
    let Json(input) = payload?;
    let flavor = RequestValidator::validate(input)?;
    let row = state
        .store
        .update(id, &flavor)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(id = row.id, "flavor updated");
    Ok(Json(row))
}

/// Delete a flavor and return the removed row
#[utoipa::path(
    delete,
    path = "/api/flavors/{id}",
    params(("id" = i32, Path, description = "Flavor id")),
    responses(
        (status = 200, description = "Flavor deleted", body = Flavor),
        (status = 404, description = "Flavor not found", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    ),
    tag = "flavors"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Flavor>, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .store
        .delete(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(id = row.id, "flavor deleted");
    Ok(Json(row))
}
