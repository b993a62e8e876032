//! Typed error type for the db crate.

use thiserror::Error;

/// SQLSTATE codes Postgres raises when a write breaks a table constraint.
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),

    /// The id-addressed row does not exist. Carries the entity label,
    /// e.g. `"Skill"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Postgres rejected the write because of a foreign key, unique or
    /// check constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = matches!(
                db_err.code().as_deref(),
                Some(FOREIGN_KEY_VIOLATION | UNIQUE_VIOLATION | CHECK_VIOLATION)
            );
            if constraint {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::Sqlx(err)
    }
}
