//! Composable list filters.
//!
//! A list query is a fixed `SELECT … FROM …` plus any number of [`Filter`]s.
//! Each filter is a [`Predicate`] carrying the ordered join path it needs to
//! reach its column. [`ListQuery::build`] merges every path (each join is
//! emitted once, keyed by alias), ANDs the predicates and appends stable
//! pagination.
//!
//! Filters that share a join path predicate the same joined row: filtering
//! skills by `subdomain_name` and `domain_id` together matches skills linked
//! to one subdomain satisfying both. Joining through an association table
//! can fan rows out, so any query with filter joins selects `DISTINCT`.

use sqlx::{Postgres, QueryBuilder};
use taxonomy::Page;
use tracing::debug;
use uuid::Uuid;

/// A single `JOIN` clause, identified by the alias it introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub alias: &'static str,
    pub clause: &'static str,
}

impl Join {
    pub const fn new(alias: &'static str, clause: &'static str) -> Self {
        Self { alias, clause }
    }
}

/// A boolean condition on one qualified column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match.
    Contains { column: &'static str, needle: String },
    /// Exact match on an id column.
    IdEquals { column: &'static str, id: Uuid },
    /// Exact match on a text column.
    TextEquals { column: &'static str, value: String },
    /// `value` is an element of the text array `column`.
    HasElement { column: &'static str, value: String },
}

impl Predicate {
    fn push_to(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::Contains { column, needle } => {
                qb.push(*column).push(" ILIKE ");
                qb.push_bind(format!("%{}%", escape_like(needle)));
            }
            Self::IdEquals { column, id } => {
                qb.push(*column).push(" = ");
                qb.push_bind(*id);
            }
            Self::TextEquals { column, value } => {
                qb.push(*column).push(" = ");
                qb.push_bind(value.clone());
            }
            Self::HasElement { column, value } => {
                qb.push_bind(value.clone());
                qb.push(" = ANY(").push(*column).push(")");
            }
        }
    }
}

/// A predicate plus the joins it requires, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    joins: &'static [Join],
    predicate: Predicate,
}

impl Filter {
    /// A filter on a column of the base table.
    pub fn direct(predicate: Predicate) -> Self {
        Self { joins: &[], predicate }
    }

    pub fn through(joins: &'static [Join], predicate: Predicate) -> Self {
        Self { joins, predicate }
    }
}

/// Builder for one entity's list query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    select: &'static str,
    from: &'static str,
    base_joins: &'static [Join],
    order_by: &'static str,
    filters: Vec<Filter>,
    page: Page,
}

impl ListQuery {
    /// `select` is the column list, `from` the aliased base table, and
    /// `order_by` a selected column giving a stable order.
    pub fn new(select: &'static str, from: &'static str, order_by: &'static str) -> Self {
        Self {
            select,
            from,
            base_joins: &[],
            order_by,
            filters: Vec::new(),
            page: Page::default(),
        }
    }

    /// Joins that are always present (one-to-one lookups used by the
    /// select list). Filters needing the same alias reuse them.
    pub fn with_base_joins(mut self, joins: &'static [Join]) -> Self {
        self.base_joins = joins;
        self
    }

    pub fn filter(mut self, filter: Option<Filter>) -> Self {
        if let Some(filter) = filter {
            self.filters.push(filter);
        }
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Base joins followed by every join required by a filter, each alias
    /// at most once, in first-seen order.
    pub fn joins(&self) -> Vec<Join> {
        let mut joins: Vec<Join> = self.base_joins.to_vec();
        for join in self.filters.iter().flat_map(|f| f.joins.iter()) {
            if !joins.iter().any(|j| j.alias == join.alias) {
                joins.push(*join);
            }
        }
        joins
    }

    /// Whether the filters add a join beyond the base ones.
    pub fn fans_out(&self) -> bool {
        self.joins().len() > self.base_joins.len()
    }

    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        if self.fans_out() {
            qb.push("DISTINCT ");
        }
        qb.push(self.select).push(" FROM ").push(self.from);

        for join in self.joins() {
            qb.push(" ").push(join.clause);
        }

        for (i, filter) in self.filters.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            filter.predicate.push_to(&mut qb);
        }

        qb.push(" ORDER BY ").push(self.order_by);
        qb.push(" LIMIT ").push_bind(i64::from(self.page.limit));
        qb.push(" OFFSET ").push_bind(i64::from(self.page.skip));

        debug!(sql = qb.sql(), "built list query");
        qb
    }
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
