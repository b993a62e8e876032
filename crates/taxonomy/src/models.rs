//! Create and update payloads for every entity.
//!
//! Create payloads are plain structs: business-required fields are
//! mandatory and synonym lists default to empty. Update payloads wrap every
//! field in [`Patch`] and are converted into a [`Changeset`] before any
//! persistence call runs.

use serde::Deserialize;
use uuid::Uuid;

use crate::changeset::ensure_not_blank;
use crate::{Changeset, Patch, SkillType, ValidationError};

// ---------------------------------------------------------------------------
// domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DomainCreate {
    pub domain: String,
}

impl DomainCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("domain", &self.domain)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainUpdate {
    #[serde(default)]
    pub domain: Patch<String>,
}

impl DomainUpdate {
    pub fn into_changeset(self) -> Result<Changeset, ValidationError> {
        let mut cs = Changeset::new();
        cs.name("domain", self.domain)?;
        Ok(cs)
    }
}

// ---------------------------------------------------------------------------
// subdomain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SubdomainCreate {
    pub subdomain: String,
    pub domain_id: Uuid,
}

impl SubdomainCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("subdomain", &self.subdomain)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubdomainUpdate {
    #[serde(default)]
    pub subdomain: Patch<String>,
    /// Moving a subdomain to another domain is allowed; the foreign key
    /// still has to resolve.
    #[serde(default)]
    pub domain_id: Patch<Uuid>,
}

impl SubdomainUpdate {
    pub fn into_changeset(self) -> Result<Changeset, ValidationError> {
        let mut cs = Changeset::new();
        cs.name("subdomain", self.subdomain)?;
        cs.id("domain_id", self.domain_id)?;
        Ok(cs)
    }
}

// ---------------------------------------------------------------------------
// skill
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCreate {
    pub skill_name_en: String,
    #[serde(default)]
    pub skill_name_jp: Option<String>,
    pub skill_type: SkillType,
    #[serde(default)]
    pub synonyms_en: Vec<String>,
    #[serde(default)]
    pub synonyms_jp: Vec<String>,
}

impl SkillCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("skill_name_en", &self.skill_name_en)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillUpdate {
    #[serde(default)]
    pub skill_name_en: Patch<String>,
    #[serde(default)]
    pub skill_name_jp: Patch<String>,
    #[serde(default)]
    pub skill_type: Patch<SkillType>,
    #[serde(default)]
    pub synonyms_en: Patch<Vec<String>>,
    #[serde(default)]
    pub synonyms_jp: Patch<Vec<String>>,
}

impl SkillUpdate {
    pub fn into_changeset(self) -> Result<Changeset, ValidationError> {
        let mut cs = Changeset::new();
        cs.name("skill_name_en", self.skill_name_en)?;
        cs.nullable_text("skill_name_jp", self.skill_name_jp);
        cs.skill_type("skill_type", self.skill_type)?;
        cs.list("synonyms_en", self.synonyms_en)?;
        cs.list("synonyms_jp", self.synonyms_jp)?;
        Ok(cs)
    }
}

// ---------------------------------------------------------------------------
// job_title
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct JobTitleCreate {
    pub job_title: String,
    #[serde(default)]
    pub synonyms_en: Vec<String>,
    #[serde(default)]
    pub synonyms_jp: Vec<String>,
}

impl JobTitleCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("job_title", &self.job_title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTitleUpdate {
    #[serde(default)]
    pub job_title: Patch<String>,
    #[serde(default)]
    pub synonyms_en: Patch<Vec<String>>,
    #[serde(default)]
    pub synonyms_jp: Patch<Vec<String>>,
}

impl JobTitleUpdate {
    pub fn into_changeset(self) -> Result<Changeset, ValidationError> {
        let mut cs = Changeset::new();
        cs.name("job_title", self.job_title)?;
        cs.list("synonyms_en", self.synonyms_en)?;
        cs.list("synonyms_jp", self.synonyms_jp)?;
        Ok(cs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    #[test]
    fn skill_create_defaults_optional_fields() {
        let skill: SkillCreate = serde_json::from_str(
            r#"{"skill_name_en": "Rust", "skill_type": "technical"}"#,
        )
        .unwrap();
        assert_eq!(skill.skill_name_jp, None);
        assert!(skill.synonyms_en.is_empty());
        assert!(skill.synonyms_jp.is_empty());
        assert!(skill.validate().is_ok());
    }

    #[test]
    fn skill_create_requires_name_and_type() {
        assert!(serde_json::from_str::<SkillCreate>(r#"{"skill_type": "soft"}"#).is_err());
        assert!(serde_json::from_str::<SkillCreate>(r#"{"skill_name_en": "Rust"}"#).is_err());
        assert!(serde_json::from_str::<SkillCreate>(
            r#"{"skill_name_en": "Rust", "skill_type": "magic"}"#
        )
        .is_err());
    }

    #[test]
    fn synonym_lists_cannot_be_null_on_create() {
        assert!(serde_json::from_str::<JobTitleCreate>(
            r#"{"job_title": "SRE", "synonyms_en": null}"#
        )
        .is_err());
    }

    #[test]
    fn blank_domain_fails_validation() {
        let domain = DomainCreate { domain: " ".into() };
        assert_eq!(domain.validate(), Err(ValidationError::Blank("domain")));
    }

    #[test]
    fn empty_update_yields_empty_changeset() {
        let update: SkillUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.into_changeset().unwrap().is_empty());
    }

    #[test]
    fn update_only_carries_supplied_keys() {
        let update: SkillUpdate =
            serde_json::from_str(r#"{"skill_name_jp": null, "synonyms_en": ["API design"]}"#).unwrap();
        let cs = update.into_changeset().unwrap();
        assert_eq!(cs.len(), 2);
        assert_eq!(cs.get("skill_name_jp"), Some(&FieldValue::NullableText(None)));
        assert_eq!(
            cs.get("synonyms_en"),
            Some(&FieldValue::TextList(vec!["API design".into()]))
        );
        assert_eq!(cs.get("skill_name_en"), None);
    }

    #[test]
    fn null_for_required_column_is_rejected() {
        let update: SubdomainUpdate = serde_json::from_str(r#"{"domain_id": null}"#).unwrap();
        assert_eq!(
            update.into_changeset(),
            Err(ValidationError::NullNotAllowed("domain_id"))
        );
    }
}
