//! Repository functions, one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No business logic, no request types beyond the validated contracts from
//! the `taxonomy` crate.

pub mod domains;
pub mod job_titles;
pub mod links;
pub mod skills;
pub mod subdomains;

use sqlx::{Postgres, QueryBuilder};
use taxonomy::{Changeset, FieldValue};

/// Appends `col = $n, …` for every entry of a non-empty changeset.
pub(crate) fn push_assignments(qb: &mut QueryBuilder<'static, Postgres>, changeset: &Changeset) {
    let mut set = qb.separated(", ");
    for (column, value) in changeset.iter() {
        set.push(column);
        set.push_unseparated(" = ");
        match value {
            FieldValue::Text(v) => set.push_bind_unseparated(v.clone()),
            FieldValue::NullableText(v) => set.push_bind_unseparated(v.clone()),
            FieldValue::Id(v) => set.push_bind_unseparated(*v),
            FieldValue::TextList(v) => set.push_bind_unseparated(v.clone()),
            FieldValue::SkillType(v) => set.push_bind_unseparated(v.as_str()),
        };
    }
}
