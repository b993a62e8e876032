//! Skill CRUD operations.

use sqlx::{PgPool, Postgres, QueryBuilder};
use taxonomy::filters::text;
use taxonomy::{Changeset, SkillCreate, SkillFilter};
use uuid::Uuid;

use crate::filter::{Filter, Join, ListQuery, Predicate};
use crate::{DbError, models::SkillRow};

pub const ENTITY: &str = "Skill";

pub(crate) const COLUMNS: &str =
    "s.id, s.skill_name_en, s.skill_name_jp, s.skill_type, s.synonyms_en, s.synonyms_jp";

const RETURNING: &str =
    " RETURNING id, skill_name_en, skill_name_jp, skill_type, synonyms_en, synonyms_jp";

const SKILL_SUBDOMAIN: Join = Join::new("ss", "JOIN skill_subdomain ss ON ss.skill_id = s.id");
const SUBDOMAIN: Join = Join::new("sd", "JOIN subdomain sd ON sd.id = ss.subdomain_id");
const DOMAIN: Join = Join::new("d", "JOIN domain d ON d.id = sd.domain_id");
const CORE_SKILL: Join = Join::new("jcs", "JOIN job_title_core_skill jcs ON jcs.skill_id = s.id");
const JOB_TITLE: Join = Join::new("jt", "JOIN job_title jt ON jt.id = jcs.job_title_id");

pub async fn create_skill(pool: &PgPool, input: &SkillCreate) -> Result<SkillRow, DbError> {
    let sql = format!(
        "INSERT INTO skill (id, skill_name_en, skill_name_jp, skill_type, synonyms_en, synonyms_jp) \
         VALUES ($1, $2, $3, $4, $5, $6){RETURNING}"
    );
    let row = sqlx::query_as::<_, SkillRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(&input.skill_name_en)
        .bind(&input.skill_name_jp)
        .bind(input.skill_type.as_str())
        .bind(&input.synonyms_en)
        .bind(&input.synonyms_jp)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn get_skill(pool: &PgPool, id: Uuid) -> Result<SkillRow, DbError> {
    let sql = format!("SELECT {COLUMNS} FROM skill s WHERE s.id = $1");
    sqlx::query_as::<_, SkillRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

pub fn list_query(filter: &SkillFilter) -> ListQuery {
    ListQuery::new(COLUMNS, "skill s", "s.id")
        .filter(filter.skill_type.map(|tag| {
            Filter::direct(Predicate::TextEquals { column: "s.skill_type", value: tag.to_string() })
        }))
        .filter(filter.subdomain_id.map(|id| {
            Filter::through(
                &[SKILL_SUBDOMAIN],
                Predicate::IdEquals { column: "ss.subdomain_id", id },
            )
        }))
        .filter(text(&filter.subdomain_name).map(|needle| {
            Filter::through(
                &[SKILL_SUBDOMAIN, SUBDOMAIN],
                Predicate::Contains { column: "sd.subdomain", needle: needle.into() },
            )
        }))
        .filter(filter.domain_id.map(|id| {
            Filter::through(
                &[SKILL_SUBDOMAIN, SUBDOMAIN],
                Predicate::IdEquals { column: "sd.domain_id", id },
            )
        }))
        .filter(text(&filter.domain_name).map(|needle| {
            Filter::through(
                &[SKILL_SUBDOMAIN, SUBDOMAIN, DOMAIN],
                Predicate::Contains { column: "d.domain", needle: needle.into() },
            )
        }))
        .filter(text(&filter.synonym_en).map(|value| {
            Filter::direct(Predicate::HasElement { column: "s.synonyms_en", value: value.into() })
        }))
        .filter(filter.job_title_id.map(|id| {
            Filter::through(
                &[CORE_SKILL],
                Predicate::IdEquals { column: "jcs.job_title_id", id },
            )
        }))
        .filter(text(&filter.job_title_name).map(|needle| {
            Filter::through(
                &[CORE_SKILL, JOB_TITLE],
                Predicate::Contains { column: "jt.job_title", needle: needle.into() },
            )
        }))
        .page(filter.page())
}

/// Return the skills matching every supplied filter.
pub async fn list_skills(pool: &PgPool, filter: &SkillFilter) -> Result<Vec<SkillRow>, DbError> {
    let rows = list_query(filter)
        .build()
        .build_query_as::<SkillRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn update_skill(pool: &PgPool, id: Uuid, changes: &Changeset) -> Result<SkillRow, DbError> {
    if changes.is_empty() {
        return get_skill(pool, id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE skill SET ");
    super::push_assignments(&mut qb, changes);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(RETURNING);

    qb.build_query_as::<SkillRow>()
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

/// Permanently delete a skill; its subdomain and job-title links cascade.
pub async fn delete_skill(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM skill WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(ENTITY));
    }

    Ok(())
}
