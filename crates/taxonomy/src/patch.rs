//! `Patch<T>`: a field of a partial-update payload.
//!
//! A plain `Option<T>` cannot tell "key omitted" from "key set to null".
//! Update payloads declare each field as `#[serde(default)] Patch<T>`:
//! serde leaves omitted keys at [`Patch::Absent`], and the custom
//! `Deserialize` maps a present key to [`Patch::Null`] or [`Patch::Value`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// The key was not in the request body.
    #[default]
    Absent,
    /// The key was present with an explicit `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}
