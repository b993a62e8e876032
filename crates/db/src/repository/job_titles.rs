//! Job title CRUD operations.

use sqlx::{PgPool, Postgres, QueryBuilder};
use taxonomy::filters::text;
use taxonomy::{Changeset, JobTitleCreate, JobTitleFilter};
use uuid::Uuid;

use crate::filter::{Filter, Join, ListQuery, Predicate};
use crate::{DbError, models::JobTitleRow};

pub const ENTITY: &str = "Job Title";

pub(crate) const COLUMNS: &str = "jt.id, jt.job_title, jt.synonyms_en, jt.synonyms_jp";

const RETURNING: &str = " RETURNING id, job_title, synonyms_en, synonyms_jp";

const CORE_SKILL: Join = Join::new("jcs", "JOIN job_title_core_skill jcs ON jcs.job_title_id = jt.id");
const SKILL: Join = Join::new("s", "JOIN skill s ON s.id = jcs.skill_id");
const JOB_TITLE_SUBDOMAIN: Join =
    Join::new("jsd", "JOIN job_title_subdomain jsd ON jsd.job_title_id = jt.id");
const SUBDOMAIN: Join = Join::new("sd", "JOIN subdomain sd ON sd.id = jsd.subdomain_id");
const DOMAIN: Join = Join::new("d", "JOIN domain d ON d.id = sd.domain_id");

pub async fn create_job_title(pool: &PgPool, input: &JobTitleCreate) -> Result<JobTitleRow, DbError> {
    let sql = format!(
        "INSERT INTO job_title (id, job_title, synonyms_en, synonyms_jp) \
         VALUES ($1, $2, $3, $4){RETURNING}"
    );
    let row = sqlx::query_as::<_, JobTitleRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(&input.job_title)
        .bind(&input.synonyms_en)
        .bind(&input.synonyms_jp)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn get_job_title(pool: &PgPool, id: Uuid) -> Result<JobTitleRow, DbError> {
    let sql = format!("SELECT {COLUMNS} FROM job_title jt WHERE jt.id = $1");
    sqlx::query_as::<_, JobTitleRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

pub fn list_query(filter: &JobTitleFilter) -> ListQuery {
    ListQuery::new(COLUMNS, "job_title jt", "jt.id")
        .filter(filter.skill_id.map(|id| {
            Filter::through(&[CORE_SKILL], Predicate::IdEquals { column: "jcs.skill_id", id })
        }))
        .filter(text(&filter.skill_name_en).map(|needle| {
            Filter::through(
                &[CORE_SKILL, SKILL],
                Predicate::Contains { column: "s.skill_name_en", needle: needle.into() },
            )
        }))
        .filter(filter.skill_type.map(|tag| {
            Filter::through(
                &[CORE_SKILL, SKILL],
                Predicate::TextEquals { column: "s.skill_type", value: tag.to_string() },
            )
        }))
        .filter(filter.subdomain_id.map(|id| {
            Filter::through(
                &[JOB_TITLE_SUBDOMAIN],
                Predicate::IdEquals { column: "jsd.subdomain_id", id },
            )
        }))
        .filter(text(&filter.subdomain_name).map(|needle| {
            Filter::through(
                &[JOB_TITLE_SUBDOMAIN, SUBDOMAIN],
                Predicate::Contains { column: "sd.subdomain", needle: needle.into() },
            )
        }))
        .filter(filter.domain_id.map(|id| {
            Filter::through(
                &[JOB_TITLE_SUBDOMAIN, SUBDOMAIN],
                Predicate::IdEquals { column: "sd.domain_id", id },
            )
        }))
        .filter(text(&filter.domain_name).map(|needle| {
            Filter::through(
                &[JOB_TITLE_SUBDOMAIN, SUBDOMAIN, DOMAIN],
                Predicate::Contains { column: "d.domain", needle: needle.into() },
            )
        }))
        .filter(text(&filter.synonym_en).map(|value| {
            Filter::direct(Predicate::HasElement { column: "jt.synonyms_en", value: value.into() })
        }))
        .page(filter.page())
}

/// Return the job titles matching every supplied filter.
pub async fn list_job_titles(pool: &PgPool, filter: &JobTitleFilter) -> Result<Vec<JobTitleRow>, DbError> {
    let rows = list_query(filter)
        .build()
        .build_query_as::<JobTitleRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn update_job_title(pool: &PgPool, id: Uuid, changes: &Changeset) -> Result<JobTitleRow, DbError> {
    if changes.is_empty() {
        return get_job_title(pool, id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE job_title SET ");
    super::push_assignments(&mut qb, changes);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(RETURNING);

    qb.build_query_as::<JobTitleRow>()
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

/// Permanently delete a job title; its core-skill and subdomain links cascade.
pub async fn delete_job_title(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM job_title WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(ENTITY));
    }

    Ok(())
}
