use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::extract::{Id, Params, Payload};
use db::models::{SkillRow, SubdomainRow};
use db::repository::{links as link_repo, subdomains as subdomain_repo};
use taxonomy::{SubdomainCreate, SubdomainFilter, SubdomainUpdate};

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<SubdomainCreate>,
) -> Result<(StatusCode, Json<SubdomainRow>), ApiError> {
    payload.validate()?;
    let subdomain = subdomain_repo::create_subdomain(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(subdomain)))
}

pub async fn list(
    State(state): State<AppState>,
    Params(filter): Params<SubdomainFilter>,
) -> Result<Json<Vec<SubdomainRow>>, ApiError> {
    Ok(Json(subdomain_repo::list_subdomains(&state.pool, &filter).await?))
}

pub async fn get(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SubdomainRow>, ApiError> {
    Ok(Json(subdomain_repo::get_subdomain(&state.pool, id).await?))
}

pub async fn update(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
    Payload(payload): Payload<SubdomainUpdate>,
) -> Result<Json<SubdomainRow>, ApiError> {
    let changes = payload.into_changeset()?;
    Ok(Json(subdomain_repo::update_subdomain(&state.pool, id, &changes).await?))
}

pub async fn delete(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    subdomain_repo::delete_subdomain(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_skills(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillRow>>, ApiError> {
    Ok(Json(link_repo::subdomain_skills(&state.pool, id).await?))
}
