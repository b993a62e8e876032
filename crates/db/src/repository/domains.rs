//! Domain CRUD operations.

use sqlx::{PgPool, Postgres, QueryBuilder};
use taxonomy::filters::text;
use taxonomy::{Changeset, DomainCreate, DomainFilter};
use uuid::Uuid;

use crate::filter::{Filter, Join, ListQuery, Predicate};
use crate::{DbError, models::DomainRow};

pub const ENTITY: &str = "Domain";

const COLUMNS: &str = "d.id, d.domain";

const SUBDOMAIN: Join = Join::new("sd", "JOIN subdomain sd ON sd.domain_id = d.id");

/// Insert a new domain.
pub async fn create_domain(pool: &PgPool, input: &DomainCreate) -> Result<DomainRow, DbError> {
    let row = sqlx::query_as::<_, DomainRow>(
        "INSERT INTO domain (id, domain) VALUES ($1, $2) RETURNING id, domain",
    )
    .bind(Uuid::new_v4())
    .bind(&input.domain)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetch a single domain by its primary key.
pub async fn get_domain(pool: &PgPool, id: Uuid) -> Result<DomainRow, DbError> {
    sqlx::query_as::<_, DomainRow>("SELECT id, domain FROM domain WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

pub fn list_query(filter: &DomainFilter) -> ListQuery {
    ListQuery::new(COLUMNS, "domain d", "d.id")
        .filter(text(&filter.subdomain_name).map(|needle| {
            Filter::through(
                &[SUBDOMAIN],
                Predicate::Contains { column: "sd.subdomain", needle: needle.into() },
            )
        }))
        .page(filter.page())
}

/// Return the domains matching every supplied filter.
pub async fn list_domains(pool: &PgPool, filter: &DomainFilter) -> Result<Vec<DomainRow>, DbError> {
    let rows = list_query(filter)
        .build()
        .build_query_as::<DomainRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Apply a partial update. An empty changeset returns the row unchanged.
pub async fn update_domain(pool: &PgPool, id: Uuid, changes: &Changeset) -> Result<DomainRow, DbError> {
    if changes.is_empty() {
        return get_domain(pool, id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE domain SET ");
    super::push_assignments(&mut qb, changes);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING id, domain");

    qb.build_query_as::<DomainRow>()
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

/// Permanently delete a domain; its subdomains and their links cascade.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_domain(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM domain WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(ENTITY));
    }

    Ok(())
}
