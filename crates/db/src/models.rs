//! Row structs that map onto database tables.
//!
//! These are *persistence* models; they carry no behaviour. They are
//! also what the API serialises back to callers.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use taxonomy::SkillType;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DomainRow {
    pub id: Uuid,
    pub domain: String,
}

// ---------------------------------------------------------------------------
// subdomain
// ---------------------------------------------------------------------------

/// A subdomain together with its parent domain.
///
/// Queries must select the parent's name as `domain_name`; the embedded
/// [`DomainRow`] is assembled from `domain_id` and that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainRow {
    pub id: Uuid,
    pub subdomain: String,
    pub domain_id: Uuid,
    pub domain: DomainRow,
}

impl<'r> FromRow<'r, PgRow> for SubdomainRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let domain_id: Uuid = row.try_get("domain_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            subdomain: row.try_get("subdomain")?,
            domain_id,
            domain: DomainRow {
                id: domain_id,
                domain: row.try_get("domain_name")?,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// skill
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub skill_name_en: String,
    pub skill_name_jp: Option<String>,
    #[sqlx(try_from = "String")]
    pub skill_type: SkillType,
    pub synonyms_en: Vec<String>,
    pub synonyms_jp: Vec<String>,
}

// ---------------------------------------------------------------------------
// job_title
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobTitleRow {
    pub id: Uuid,
    pub job_title: String,
    pub synonyms_en: Vec<String>,
    pub synonyms_jp: Vec<String>,
}

// ---------------------------------------------------------------------------
// association tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSubdomainLink {
    pub skill_id: Uuid,
    pub subdomain_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitleCoreSkillLink {
    pub job_title_id: Uuid,
    pub skill_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitleSubdomainLink {
    pub job_title_id: Uuid,
    pub subdomain_id: Uuid,
}
