use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::extract::{Id, Params, Payload};
use db::models::{JobTitleCoreSkillLink, JobTitleRow, JobTitleSubdomainLink, SkillRow, SubdomainRow};
use db::repository::{job_titles as job_title_repo, links as link_repo};
use taxonomy::{JobTitleCreate, JobTitleFilter, JobTitleUpdate};

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<JobTitleCreate>,
) -> Result<(StatusCode, Json<JobTitleRow>), ApiError> {
    payload.validate()?;
    let job_title = job_title_repo::create_job_title(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(job_title)))
}

pub async fn list(
    State(state): State<AppState>,
    Params(filter): Params<JobTitleFilter>,
) -> Result<Json<Vec<JobTitleRow>>, ApiError> {
    Ok(Json(job_title_repo::list_job_titles(&state.pool, &filter).await?))
}

pub async fn get(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<JobTitleRow>, ApiError> {
    Ok(Json(job_title_repo::get_job_title(&state.pool, id).await?))
}

pub async fn update(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
    Payload(payload): Payload<JobTitleUpdate>,
) -> Result<Json<JobTitleRow>, ApiError> {
    let changes = payload.into_changeset()?;
    Ok(Json(job_title_repo::update_job_title(&state.pool, id, &changes).await?))
}

pub async fn delete(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    job_title_repo::delete_job_title(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// core skills
// ---------------------------------------------------------------------------

pub async fn list_core_skills(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillRow>>, ApiError> {
    Ok(Json(link_repo::job_title_core_skills(&state.pool, id).await?))
}

pub async fn link_core_skill(
    Id((id, skill_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<JobTitleCoreSkillLink>), ApiError> {
    let link = link_repo::link_job_title_core_skill(&state.pool, id, skill_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn unlink_core_skill(
    Id((id, skill_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    link_repo::unlink_job_title_core_skill(&state.pool, id, skill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// subdomains
// ---------------------------------------------------------------------------

pub async fn list_subdomains(
    Id(id): Id<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubdomainRow>>, ApiError> {
    Ok(Json(link_repo::job_title_subdomains(&state.pool, id).await?))
}

pub async fn link_subdomain(
    Id((id, subdomain_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<JobTitleSubdomainLink>), ApiError> {
    let link = link_repo::link_job_title_subdomain(&state.pool, id, subdomain_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn unlink_subdomain(
    Id((id, subdomain_id)): Id<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    link_repo::unlink_job_title_subdomain(&state.pool, id, subdomain_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
