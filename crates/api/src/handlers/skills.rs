use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::extract::{Id, Params, Payload};
use db::models::{SkillRow, SkillSubdomainLink, SubdomainRow};
use db::repository::{links as link_repo, skills as skill_repo};
use taxonomy::{SkillCreate, SkillFilter, SkillUpdate};

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<SkillCreate>,
) -> Result<(StatusCode, Json<SkillRow>), ApiError> {
    payload.validate()?;
    let skill = skill_repo::create_skill(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

pub async fn list(
    State(state): State<AppState>,
    Params(filter): Params<SkillFilter>,
) -> Result<Json<Vec<SkillRow>>, ApiError> {
    Ok(Json(skill_repo::list_skills(&state.pool, &filter).await?))
}

pub async fn get(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SkillRow>, ApiError> {
    Ok(Json(skill_repo::get_skill(&state.pool, id).await?))
}

pub async fn update(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
    Payload(payload): Payload<SkillUpdate>,
) -> Result<Json<SkillRow>, ApiError> {
    let changes = payload.into_changeset()?;
    Ok(Json(skill_repo::update_skill(&state.pool, id, &changes).await?))
}

pub async fn delete(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    skill_repo::delete_skill(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// skill ↔ subdomain links
// ---------------------------------------------------------------------------

pub async fn list_subdomains(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubdomainRow>>, ApiError> {
    Ok(Json(link_repo::skill_subdomains(&state.pool, id).await?))
}

pub async fn link_subdomain(
    Id((id, subdomain_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SkillSubdomainLink>), ApiError> {
    let link = link_repo::link_skill_subdomain(&state.pool, id, subdomain_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn unlink_subdomain(
    Id((id, subdomain_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    link_repo::unlink_skill_subdomain(&state.pool, id, subdomain_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
