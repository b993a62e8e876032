//! End-to-end tests against a live Postgres.
//!
//! Run with `DATABASE_URL=postgres://… cargo test -p api --features integration`.
//! Every test names its rows with a fresh suffix so tests can share one
//! database and run in parallel.

#![cfg(feature = "integration")]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api::{router, AppState};

async fn app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = db::pool::create_pool(&url, 5).await.expect("connect");
    db::pool::run_migrations(&pool).await.expect("migrate");
    router(AppState { pool })
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, path: &str, body: Value) -> Value {
    let (status, json) = call(app, Method::POST, path, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{path}: {json}");
    json
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("list response")
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

fn urlencode(s: &str) -> String {
    s.replace(' ', "%20")
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = app().await;
    let skill = create(
        &app,
        "/skills",
        json!({
            "skill_name_en": format!("Rust {}", suffix()),
            "skill_name_jp": "ラスト",
            "skill_type": "technical",
            "synonyms_en": ["rustlang"],
        }),
    )
    .await;
    assert_eq!(skill["synonyms_jp"], json!([]));

    let (status, fetched) = call(&app, Method::GET, &format!("/skills/{}", skill["id"].as_str().unwrap()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, skill);
}

#[tokio::test]
async fn subdomain_embeds_parent_domain() {
    let app = app().await;
    let domain = create(&app, "/domains", json!({ "domain": format!("Engineering {}", suffix()) })).await;
    let subdomain = create(
        &app,
        "/subdomains",
        json!({ "subdomain": "Backend", "domain_id": domain["id"] }),
    )
    .await;
    assert_eq!(subdomain["domain"], domain);
    assert_eq!(subdomain["domain_id"], domain["id"]);
}

#[tokio::test]
async fn subdomain_with_unknown_domain_is_a_constraint_violation() {
    let app = app().await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/subdomains",
        Some(json!({ "subdomain": "Orphan", "domain_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "constraint_violation");
}

#[tokio::test]
async fn empty_update_leaves_record_unchanged() {
    let app = app().await;
    let job = create(
        &app,
        "/job_titles",
        json!({ "job_title": format!("SRE {}", suffix()), "synonyms_en": ["Site Reliability Engineer"] }),
    )
    .await;
    let uri = format!("/job_titles/{}", job["id"].as_str().unwrap());
    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, job);
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = app().await;
    let skill = create(
        &app,
        "/skills",
        json!({
            "skill_name_en": format!("Negotiation {}", suffix()),
            "skill_name_jp": "交渉",
            "skill_type": "soft",
            "synonyms_en": ["bargaining"],
        }),
    )
    .await;
    let uri = format!("/skills/{}", skill["id"].as_str().unwrap());

    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({ "skill_type": "other" }))).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = skill.clone();
    expected["skill_type"] = json!("other");
    assert_eq!(updated, expected);

    let (_, cleared) = call(&app, Method::PUT, &uri, Some(json!({ "skill_name_jp": null }))).await;
    assert_eq!(cleared["skill_name_jp"], Value::Null);
    assert_eq!(cleared["synonyms_en"], json!(["bargaining"]));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app().await;
    let domain = create(&app, "/domains", json!({ "domain": format!("Temp {}", suffix()) })).await;
    let uri = format!("/domains/{}", domain["id"].as_str().unwrap());

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Domain not found");

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::PUT, &uri, Some(json!({ "domain": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_domain_cascades_to_subdomains_and_links() {
    let app = app().await;
    let domain = create(&app, "/domains", json!({ "domain": format!("Cascade {}", suffix()) })).await;
    let subdomain = create(
        &app,
        "/subdomains",
        json!({ "subdomain": "Frontend", "domain_id": domain["id"] }),
    )
    .await;
    let skill = create(&app, "/skills", json!({ "skill_name_en": "CSS", "skill_type": "technical" })).await;
    let skill_id = skill["id"].as_str().unwrap();
    let subdomain_id = subdomain["id"].as_str().unwrap();

    let (status, link) = call(
        &app,
        Method::POST,
        &format!("/skills/{skill_id}/subdomains/{subdomain_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(link, json!({ "skill_id": skill_id, "subdomain_id": subdomain_id }));

    let (status, _) = call(&app, Method::DELETE, &format!("/domains/{}", domain["id"].as_str().unwrap()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &format!("/subdomains/{subdomain_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, linked) = call(&app, Method::GET, &format!("/skills/{skill_id}/subdomains"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(linked, json!([]));
}

#[tokio::test]
async fn domain_name_filter_is_case_insensitive_substring() {
    let app = app().await;
    let tag = suffix();
    let domain = create(&app, "/domains", json!({ "domain": format!("{tag} Engineering") })).await;
    let subdomain = create(
        &app,
        "/subdomains",
        json!({ "subdomain": "Backend", "domain_id": domain["id"] }),
    )
    .await;

    let (status, list) = call(&app, Method::GET, &format!("/subdomains?domain_name={tag}%20engineer"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![subdomain["id"].as_str().unwrap().to_string()]);
    assert_eq!(list[0]["domain"], domain);
}

#[tokio::test]
async fn synonym_filter_matches_whole_elements_only() {
    let app = app().await;
    let tag = suffix();
    let synonym = format!("API design {tag}");
    let skill = create(
        &app,
        "/skills",
        json!({ "skill_name_en": "Interface design", "skill_type": "technical", "synonyms_en": [synonym] }),
    )
    .await;

    let (_, hit) = call(&app, Method::GET, &format!("/skills?synonym_en={}", urlencode(&synonym)), None).await;
    assert_eq!(ids(&hit), vec![skill["id"].as_str().unwrap().to_string()]);

    let (_, miss) = call(&app, Method::GET, &format!("/skills?synonym_en=API%20{tag}"), None).await;
    assert_eq!(miss, json!([]));
}

#[tokio::test]
async fn filters_compose_conjunctively_without_duplicates() {
    let app = app().await;
    let tag = suffix();
    let domain = create(&app, "/domains", json!({ "domain": format!("Data {tag}") })).await;
    let ml = create(&app, "/subdomains", json!({ "subdomain": format!("ML {tag}"), "domain_id": domain["id"] })).await;
    let bi = create(&app, "/subdomains", json!({ "subdomain": format!("BI {tag}"), "domain_id": domain["id"] })).await;

    let python = create(&app, "/skills", json!({ "skill_name_en": "Python", "skill_type": "technical" })).await;
    let sql = create(&app, "/skills", json!({ "skill_name_en": "SQL", "skill_type": "technical" })).await;
    let storytelling = create(&app, "/skills", json!({ "skill_name_en": "Storytelling", "skill_type": "soft" })).await;

    for (skill, sub) in [(&python, &ml), (&python, &bi), (&sql, &bi), (&storytelling, &bi)] {
        let uri = format!(
            "/skills/{}/subdomains/{}",
            skill["id"].as_str().unwrap(),
            sub["id"].as_str().unwrap()
        );
        let (status, _) = call(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // python is linked twice under the same domain but listed once
    let (_, by_domain) = call(&app, Method::GET, &format!("/skills?domain_name=Data%20{tag}"), None).await;
    let mut got = ids(&by_domain);
    got.sort();
    let mut want: Vec<String> = [&python, &sql, &storytelling]
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    want.sort();
    assert_eq!(got, want);

    let (_, technical) = call(
        &app,
        Method::GET,
        &format!("/skills?domain_name=Data%20{tag}&skill_type=technical"),
        None,
    )
    .await;
    assert_eq!(ids(&technical).len(), 2);

    let (_, narrowed) = call(
        &app,
        Method::GET,
        &format!("/skills?domain_name=Data%20{tag}&skill_type=technical&subdomain_name=ML%20{tag}"),
        None,
    )
    .await;
    assert_eq!(ids(&narrowed), vec![python["id"].as_str().unwrap().to_string()]);

    let (_, paged) = call(&app, Method::GET, &format!("/skills?domain_name=Data%20{tag}&skip=1&limit=1"), None).await;
    assert_eq!(ids(&paged).len(), 1);
}

#[tokio::test]
async fn deleting_core_skill_removes_it_from_job_title() {
    let app = app().await;
    let tag = suffix();
    let job = create(&app, "/job_titles", json!({ "job_title": format!("Backend Engineer {tag}") })).await;
    let skill = create(&app, "/skills", json!({ "skill_name_en": format!("Go {tag}"), "skill_type": "technical" })).await;
    let job_id = job["id"].as_str().unwrap();
    let skill_id = skill["id"].as_str().unwrap();

    let link_uri = format!("/job_titles/{job_id}/core_skills/{skill_id}");
    let (status, _) = call(&app, Method::POST, &link_uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    // linking twice is idempotent
    let (status, _) = call(&app, Method::POST, &link_uri, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, core) = call(&app, Method::GET, &format!("/job_titles/{job_id}/core_skills"), None).await;
    assert_eq!(ids(&core), vec![skill_id.to_string()]);

    let (_, by_skill) = call(&app, Method::GET, &format!("/job_titles?skill_name_en=go%20{tag}"), None).await;
    assert_eq!(ids(&by_skill), vec![job_id.to_string()]);

    let (status, _) = call(&app, Method::DELETE, &format!("/skills/{skill_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, core) = call(&app, Method::GET, &format!("/job_titles/{job_id}/core_skills"), None).await;
    assert_eq!(core, json!([]));

    let (status, _) = call(&app, Method::DELETE, &link_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn linking_to_missing_entity_names_it() {
    let app = app().await;
    let job = create(&app, "/job_titles", json!({ "job_title": format!("PM {}", suffix()) })).await;
    let uri = format!(
        "/job_titles/{}/subdomains/{}",
        job["id"].as_str().unwrap(),
        Uuid::new_v4()
    );
    let (status, body) = call(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Subdomain not found");
}
