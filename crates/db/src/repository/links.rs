//! Association-table operations: linking, unlinking and listing the rows
//! on the far side of a many-to-many relationship.
//!
//! Linking checks both sides inside one transaction so a missing entity is
//! reported as `DbError::NotFound` naming that entity, and is idempotent
//! (`ON CONFLICT DO NOTHING`).

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::{job_titles, skills, subdomains};
use crate::{
    DbError,
    models::{JobTitleCoreSkillLink, JobTitleSubdomainLink, SkillRow, SkillSubdomainLink, SubdomainRow},
};

/// One side of an association table.
#[derive(Debug, Clone, Copy)]
struct Side {
    table: &'static str,
    column: &'static str,
    entity: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Association {
    table: &'static str,
    owner: Side,
    target: Side,
}

const SKILL: Side = Side { table: "skill", column: "skill_id", entity: skills::ENTITY };
const SUBDOMAIN: Side = Side { table: "subdomain", column: "subdomain_id", entity: subdomains::ENTITY };
const JOB_TITLE: Side = Side { table: "job_title", column: "job_title_id", entity: job_titles::ENTITY };

const SKILL_SUBDOMAIN: Association = Association {
    table: "skill_subdomain",
    owner: SKILL,
    target: SUBDOMAIN,
};

const JOB_TITLE_CORE_SKILL: Association = Association {
    table: "job_title_core_skill",
    owner: JOB_TITLE,
    target: SKILL,
};

const JOB_TITLE_SUBDOMAIN: Association = Association {
    table: "job_title_subdomain",
    owner: JOB_TITLE,
    target: SUBDOMAIN,
};

async fn ensure_exists<'e, E: PgExecutor<'e>>(executor: E, side: Side, id: Uuid) -> Result<(), DbError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", side.table);
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(executor).await?;
    if !exists {
        return Err(DbError::NotFound(side.entity));
    }
    Ok(())
}

async fn link(pool: &PgPool, assoc: Association, owner_id: Uuid, target_id: Uuid) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    ensure_exists(&mut *tx, assoc.owner, owner_id).await?;
    ensure_exists(&mut *tx, assoc.target, target_id).await?;

    let sql = format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        assoc.table, assoc.owner.column, assoc.target.column
    );
    sqlx::query(&sql)
        .bind(owner_id)
        .bind(target_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn unlink(pool: &PgPool, assoc: Association, owner_id: Uuid, target_id: Uuid) -> Result<(), DbError> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = $1 AND {} = $2",
        assoc.table, assoc.owner.column, assoc.target.column
    );
    let result = sqlx::query(&sql)
        .bind(owner_id)
        .bind(target_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Link"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// skill ↔ subdomain
// ---------------------------------------------------------------------------

pub async fn link_skill_subdomain(
    pool: &PgPool,
    skill_id: Uuid,
    subdomain_id: Uuid,
) -> Result<SkillSubdomainLink, DbError> {
    link(pool, SKILL_SUBDOMAIN, skill_id, subdomain_id).await?;
    Ok(SkillSubdomainLink { skill_id, subdomain_id })
}

pub async fn unlink_skill_subdomain(pool: &PgPool, skill_id: Uuid, subdomain_id: Uuid) -> Result<(), DbError> {
    unlink(pool, SKILL_SUBDOMAIN, skill_id, subdomain_id).await
}

/// Subdomains (with their domain) linked to a skill.
pub async fn skill_subdomains(pool: &PgPool, skill_id: Uuid) -> Result<Vec<SubdomainRow>, DbError> {
    ensure_exists(pool, SKILL, skill_id).await?;
    let sql = format!(
        "SELECT {} FROM subdomain sd {} \
         JOIN skill_subdomain ss ON ss.subdomain_id = sd.id \
         WHERE ss.skill_id = $1 ORDER BY sd.id",
        subdomains::COLUMNS,
        subdomains::DOMAIN.clause,
    );
    let rows = sqlx::query_as::<_, SubdomainRow>(&sql)
        .bind(skill_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Skills linked to a subdomain.
pub async fn subdomain_skills(pool: &PgPool, subdomain_id: Uuid) -> Result<Vec<SkillRow>, DbError> {
    ensure_exists(pool, SUBDOMAIN, subdomain_id).await?;
    let sql = format!(
        "SELECT {} FROM skill s \
         JOIN skill_subdomain ss ON ss.skill_id = s.id \
         WHERE ss.subdomain_id = $1 ORDER BY s.id",
        skills::COLUMNS,
    );
    let rows = sqlx::query_as::<_, SkillRow>(&sql)
        .bind(subdomain_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// job_title ↔ core skill
// ---------------------------------------------------------------------------

pub async fn link_job_title_core_skill(
    pool: &PgPool,
    job_title_id: Uuid,
    skill_id: Uuid,
) -> Result<JobTitleCoreSkillLink, DbError> {
    link(pool, JOB_TITLE_CORE_SKILL, job_title_id, skill_id).await?;
    Ok(JobTitleCoreSkillLink { job_title_id, skill_id })
}

pub async fn unlink_job_title_core_skill(
    pool: &PgPool,
    job_title_id: Uuid,
    skill_id: Uuid,
) -> Result<(), DbError> {
    unlink(pool, JOB_TITLE_CORE_SKILL, job_title_id, skill_id).await
}

pub async fn job_title_core_skills(pool: &PgPool, job_title_id: Uuid) -> Result<Vec<SkillRow>, DbError> {
    ensure_exists(pool, JOB_TITLE, job_title_id).await?;
    let sql = format!(
        "SELECT {} FROM skill s \
         JOIN job_title_core_skill jcs ON jcs.skill_id = s.id \
         WHERE jcs.job_title_id = $1 ORDER BY s.id",
        skills::COLUMNS,
    );
    let rows = sqlx::query_as::<_, SkillRow>(&sql)
        .bind(job_title_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// job_title ↔ subdomain
// ---------------------------------------------------------------------------

pub async fn link_job_title_subdomain(
    pool: &PgPool,
    job_title_id: Uuid,
    subdomain_id: Uuid,
) -> Result<JobTitleSubdomainLink, DbError> {
    link(pool, JOB_TITLE_SUBDOMAIN, job_title_id, subdomain_id).await?;
    Ok(JobTitleSubdomainLink { job_title_id, subdomain_id })
}

pub async fn unlink_job_title_subdomain(
    pool: &PgPool,
    job_title_id: Uuid,
    subdomain_id: Uuid,
) -> Result<(), DbError> {
    unlink(pool, JOB_TITLE_SUBDOMAIN, job_title_id, subdomain_id).await
}

pub async fn job_title_subdomains(pool: &PgPool, job_title_id: Uuid) -> Result<Vec<SubdomainRow>, DbError> {
    ensure_exists(pool, JOB_TITLE, job_title_id).await?;
    let sql = format!(
        "SELECT {} FROM subdomain sd {} \
         JOIN job_title_subdomain jsd ON jsd.subdomain_id = sd.id \
         WHERE jsd.job_title_id = $1 ORDER BY sd.id",
        subdomains::COLUMNS,
        subdomains::DOMAIN.clause,
    );
    let rows = sqlx::query_as::<_, SubdomainRow>(&sql)
        .bind(job_title_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
