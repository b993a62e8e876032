//! `taxonomy` crate: request/response contracts for the taxonomy API.
//!
//! Everything a caller sends lives here: create payloads, partial-update
//! payloads, list filter parameters and the closed [`SkillType`] tag.
//! Validation happens at this boundary, before the `db` crate is touched.

pub mod changeset;
pub mod error;
pub mod filters;
pub mod models;
pub mod patch;
pub mod skill_type;

pub use changeset::{Changeset, FieldValue};
pub use error::ValidationError;
pub use filters::{DomainFilter, JobTitleFilter, Page, SkillFilter, SubdomainFilter};
pub use models::{
    DomainCreate, DomainUpdate, JobTitleCreate, JobTitleUpdate, SkillCreate, SkillUpdate,
    SubdomainCreate, SubdomainUpdate,
};
pub use patch::Patch;
pub use skill_type::SkillType;
