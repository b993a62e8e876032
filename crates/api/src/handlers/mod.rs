//! Route table: one module per entity, each mapping HTTP verbs onto
//! repository calls.

mod domains;
mod job_titles;
mod skills;
mod subdomains;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/domains", get(domains::list).post(domains::create))
        .route(
            "/domains/:id",
            get(domains::get).put(domains::update).delete(domains::delete),
        )
        .route("/subdomains", get(subdomains::list).post(subdomains::create))
        .route(
            "/subdomains/:id",
            get(subdomains::get).put(subdomains::update).delete(subdomains::delete),
        )
        .route("/subdomains/:id/skills", get(subdomains::list_skills))
        .route("/skills", get(skills::list).post(skills::create))
        .route(
            "/skills/:id",
            get(skills::get).put(skills::update).delete(skills::delete),
        )
        .route("/skills/:id/subdomains", get(skills::list_subdomains))
        .route(
            "/skills/:id/subdomains/:subdomain_id",
            post(skills::link_subdomain).delete(skills::unlink_subdomain),
        )
        .route("/job_titles", get(job_titles::list).post(job_titles::create))
        .route(
            "/job_titles/:id",
            get(job_titles::get).put(job_titles::update).delete(job_titles::delete),
        )
        .route("/job_titles/:id/core_skills", get(job_titles::list_core_skills))
        .route(
            "/job_titles/:id/core_skills/:skill_id",
            post(job_titles::link_core_skill).delete(job_titles::unlink_core_skill),
        )
        .route("/job_titles/:id/subdomains", get(job_titles::list_subdomains))
        .route(
            "/job_titles/:id/subdomains/:subdomain_id",
            post(job_titles::link_subdomain).delete(job_titles::unlink_subdomain),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Taxonomy API!" }))
}
