//! Subdomain CRUD operations.
//!
//! Every read returns the parent domain alongside the subdomain, so all
//! statements select `d.domain AS domain_name` through the domain join.

use sqlx::{PgPool, Postgres, QueryBuilder};
use taxonomy::filters::text;
use taxonomy::{Changeset, SubdomainCreate, SubdomainFilter};
use uuid::Uuid;

use crate::filter::{Filter, Join, ListQuery, Predicate};
use crate::{DbError, models::SubdomainRow};

pub const ENTITY: &str = "Subdomain";

pub(crate) const COLUMNS: &str = "sd.id, sd.subdomain, sd.domain_id, d.domain AS domain_name";

pub(crate) const DOMAIN: Join = Join::new("d", "JOIN domain d ON d.id = sd.domain_id");
const SKILL_SUBDOMAIN: Join = Join::new("ss", "JOIN skill_subdomain ss ON ss.subdomain_id = sd.id");
const SKILL: Join = Join::new("s", "JOIN skill s ON s.id = ss.skill_id");

/// Insert a new subdomain under an existing domain.
///
/// A `domain_id` that does not resolve surfaces as
/// `DbError::ConstraintViolation`.
pub async fn create_subdomain(pool: &PgPool, input: &SubdomainCreate) -> Result<SubdomainRow, DbError> {
    let row = sqlx::query_as::<_, SubdomainRow>(
        r#"
        WITH sd AS (
            INSERT INTO subdomain (id, subdomain, domain_id)
            VALUES ($1, $2, $3)
            RETURNING id, subdomain, domain_id
        )
        SELECT sd.id, sd.subdomain, sd.domain_id, d.domain AS domain_name
        FROM sd JOIN domain d ON d.id = sd.domain_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.subdomain)
    .bind(input.domain_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_subdomain(pool: &PgPool, id: Uuid) -> Result<SubdomainRow, DbError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM subdomain sd {} WHERE sd.id = $1",
        DOMAIN.clause
    );
    sqlx::query_as::<_, SubdomainRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

pub fn list_query(filter: &SubdomainFilter) -> ListQuery {
    ListQuery::new(COLUMNS, "subdomain sd", "sd.id")
        .with_base_joins(&[DOMAIN])
        .filter(filter.domain_id.map(|id| {
            Filter::direct(Predicate::IdEquals { column: "sd.domain_id", id })
        }))
        .filter(text(&filter.domain_name).map(|needle| {
            Filter::through(
                &[DOMAIN],
                Predicate::Contains { column: "d.domain", needle: needle.into() },
            )
        }))
        .filter(text(&filter.skill_name_en).map(|needle| {
            Filter::through(
                &[SKILL_SUBDOMAIN, SKILL],
                Predicate::Contains { column: "s.skill_name_en", needle: needle.into() },
            )
        }))
        .page(filter.page())
}

/// Return the subdomains matching every supplied filter.
pub async fn list_subdomains(pool: &PgPool, filter: &SubdomainFilter) -> Result<Vec<SubdomainRow>, DbError> {
    let rows = list_query(filter)
        .build()
        .build_query_as::<SubdomainRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Apply a partial update, possibly moving the subdomain to another domain.
pub async fn update_subdomain(
    pool: &PgPool,
    id: Uuid,
    changes: &Changeset,
) -> Result<SubdomainRow, DbError> {
    if changes.is_empty() {
        return get_subdomain(pool, id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("WITH sd AS (UPDATE subdomain SET ");
    super::push_assignments(&mut qb, changes);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(
        " RETURNING id, subdomain, domain_id) \
         SELECT sd.id, sd.subdomain, sd.domain_id, d.domain AS domain_name \
         FROM sd JOIN domain d ON d.id = sd.domain_id",
    );

    qb.build_query_as::<SubdomainRow>()
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound(ENTITY))
}

/// Permanently delete a subdomain; association rows cascade.
pub async fn delete_subdomain(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM subdomain WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(ENTITY));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_filters_reuse_the_base_join() {
        let filter = SubdomainFilter {
            domain_id: Some(Uuid::nil()),
            domain_name: Some("Engineer".into()),
            ..Default::default()
        };
        let sql = list_query(&filter).build().sql().to_string();
        assert!(sql.starts_with("SELECT sd.id"));
        assert_eq!(sql.matches("JOIN domain d").count(), 1);
        assert!(sql.contains("WHERE sd.domain_id = $1 AND d.domain ILIKE $2"));
    }

    #[test]
    fn skill_name_goes_through_the_association() {
        let filter = SubdomainFilter {
            skill_name_en: Some("rust".into()),
            ..Default::default()
        };
        assert_eq!(
            list_query(&filter).build().sql(),
            "SELECT DISTINCT sd.id, sd.subdomain, sd.domain_id, d.domain AS domain_name \
             FROM subdomain sd \
             JOIN domain d ON d.id = sd.domain_id \
             JOIN skill_subdomain ss ON ss.subdomain_id = sd.id \
             JOIN skill s ON s.id = ss.skill_id \
             WHERE s.skill_name_en ILIKE $1 ORDER BY sd.id LIMIT $2 OFFSET $3"
        );
    }
}
