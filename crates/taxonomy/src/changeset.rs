//! `Changeset`: the validated column → value mapping behind a partial update.
//!
//! Update payloads are turned into a changeset at the contract boundary.
//! Only keys present in the request body produce an entry, so the `db`
//! crate can write exactly those columns and nothing else.

use uuid::Uuid;

use crate::{Patch, SkillType, ValidationError};

/// A typed value destined for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    NullableText(Option<String>),
    Id(Uuid),
    TextList(Vec<String>),
    SkillType(SkillType),
}

/// Ordered list of `(column, value)` assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    entries: Vec<(&'static str, FieldValue)>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(column, value)| (*column, value))
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, value)| value)
    }

    /// Required, non-blank text column.
    pub fn name(&mut self, column: &'static str, patch: Patch<String>) -> Result<(), ValidationError> {
        match patch {
            Patch::Absent => {}
            Patch::Null => return Err(ValidationError::NullNotAllowed(column)),
            Patch::Value(v) => {
                ensure_not_blank(column, &v)?;
                self.entries.push((column, FieldValue::Text(v)));
            }
        }
        Ok(())
    }

    /// Text column that accepts `null`.
    pub fn nullable_text(&mut self, column: &'static str, patch: Patch<String>) {
        match patch {
            Patch::Absent => {}
            Patch::Null => self.entries.push((column, FieldValue::NullableText(None))),
            Patch::Value(v) => self.entries.push((column, FieldValue::NullableText(Some(v)))),
        }
    }

    pub fn id(&mut self, column: &'static str, patch: Patch<Uuid>) -> Result<(), ValidationError> {
        self.required(column, patch, FieldValue::Id)
    }

    /// Synonym lists are never null; an explicit `[]` clears them.
    pub fn list(&mut self, column: &'static str, patch: Patch<Vec<String>>) -> Result<(), ValidationError> {
        self.required(column, patch, FieldValue::TextList)
    }

    pub fn skill_type(&mut self, column: &'static str, patch: Patch<SkillType>) -> Result<(), ValidationError> {
        self.required(column, patch, FieldValue::SkillType)
    }

    fn required<T>(
        &mut self,
        column: &'static str,
        patch: Patch<T>,
        wrap: impl FnOnce(T) -> FieldValue,
    ) -> Result<(), ValidationError> {
        match patch {
            Patch::Absent => Ok(()),
            Patch::Null => Err(ValidationError::NullNotAllowed(column)),
            Patch::Value(v) => {
                self.entries.push((column, wrap(v)));
                Ok(())
            }
        }
    }
}

pub(crate) fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_produce_no_entries() {
        let mut cs = Changeset::new();
        cs.name("domain", Patch::Absent).unwrap();
        cs.nullable_text("skill_name_jp", Patch::Absent);
        cs.list("synonyms_en", Patch::Absent).unwrap();
        assert!(cs.is_empty());
    }

    #[test]
    fn null_is_kept_only_for_nullable_columns() {
        let mut cs = Changeset::new();
        cs.nullable_text("skill_name_jp", Patch::Null);
        assert_eq!(cs.get("skill_name_jp"), Some(&FieldValue::NullableText(None)));

        assert_eq!(
            cs.name("skill_name_en", Patch::Null),
            Err(ValidationError::NullNotAllowed("skill_name_en"))
        );
        assert_eq!(
            cs.list("synonyms_en", Patch::Null),
            Err(ValidationError::NullNotAllowed("synonyms_en"))
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut cs = Changeset::new();
        assert_eq!(
            cs.name("job_title", Patch::Value("   ".into())),
            Err(ValidationError::Blank("job_title"))
        );
        assert!(cs.is_empty());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut cs = Changeset::new();
        cs.name("job_title", Patch::Value("SRE".into())).unwrap();
        cs.list("synonyms_en", Patch::Value(vec![])).unwrap();
        let columns: Vec<_> = cs.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["job_title", "synonyms_en"]);
        assert_eq!(cs.len(), 2);
    }
}
