use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::extract::{Id, Params, Payload};
use db::models::DomainRow;
use db::repository::domains as domain_repo;
use taxonomy::{DomainCreate, DomainFilter, DomainUpdate};

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<DomainCreate>,
) -> Result<(StatusCode, Json<DomainRow>), ApiError> {
    payload.validate()?;
    let domain = domain_repo::create_domain(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

pub async fn list(
    State(state): State<AppState>,
    Params(filter): Params<DomainFilter>,
) -> Result<Json<Vec<DomainRow>>, ApiError> {
    Ok(Json(domain_repo::list_domains(&state.pool, &filter).await?))
}

pub async fn get(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DomainRow>, ApiError> {
    Ok(Json(domain_repo::get_domain(&state.pool, id).await?))
}

pub async fn update(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
    Payload(payload): Payload<DomainUpdate>,
) -> Result<Json<DomainRow>, ApiError> {
    let changes = payload.into_changeset()?;
    Ok(Json(domain_repo::update_domain(&state.pool, id, &changes).await?))
}

pub async fn delete(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    domain_repo::delete_domain(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
