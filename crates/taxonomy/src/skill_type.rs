//! The closed set of skill categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category tag carried by every skill.
///
/// Stored as lowercase text; the database enforces the same set with a
/// `CHECK` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Soft,
    Technical,
    Other,
}

impl SkillType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Technical => "technical",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for SkillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown skill type: {0}")]
pub struct UnknownSkillType(pub String);

impl std::str::FromStr for SkillType {
    type Err = UnknownSkillType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft"      => Ok(Self::Soft),
            "technical" => Ok(Self::Technical),
            "other"     => Ok(Self::Other),
            other       => Err(UnknownSkillType(other.to_string())),
        }
    }
}

/// Lets row structs decode the text column straight into the enum.
impl TryFrom<String> for SkillType {
    type Error = UnknownSkillType;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
