//! Query-string parameters accepted by the list endpoints.
//!
//! Every filter is optional. An empty text parameter (`?domain_name=`)
//! counts as absent; see [`text`].

use serde::Deserialize;
use uuid::Uuid;

use crate::SkillType;

pub const DEFAULT_LIMIT: u32 = 100;

/// Offset pagination shared by every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Returns the parameter only when it carries a non-empty needle.
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainFilter {
    pub subdomain_name: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubdomainFilter {
    pub domain_id: Option<Uuid>,
    pub domain_name: Option<String>,
    pub skill_name_en: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillFilter {
    pub skill_type: Option<SkillType>,
    pub subdomain_id: Option<Uuid>,
    pub subdomain_name: Option<String>,
    pub domain_id: Option<Uuid>,
    pub domain_name: Option<String>,
    pub synonym_en: Option<String>,
    pub job_title_id: Option<Uuid>,
    pub job_title_name: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTitleFilter {
    pub skill_id: Option<Uuid>,
    pub skill_name_en: Option<String>,
    pub skill_type: Option<SkillType>,
    pub subdomain_id: Option<Uuid>,
    pub subdomain_name: Option<String>,
    pub domain_id: Option<Uuid>,
    pub domain_name: Option<String>,
    pub synonym_en: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

macro_rules! impl_page {
    ($($filter:ty),+ $(,)?) => {
        $(
            impl $filter {
                pub fn page(&self) -> Page {
                    Page::new(self.skip, self.limit)
                }
            }
        )+
    };
}

impl_page!(DomainFilter, SubdomainFilter, SkillFilter, JobTitleFilter);
