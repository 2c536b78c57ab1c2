//! Serde helpers for partial-update payloads.
//!
//! A nullable column in a patch has three states: the key is absent (leave
//! the stored value alone), the key is `null` (clear it), or the key holds a
//! value (replace it). Plain `Option<T>` collapses the first two, so patch
//! fields use `Option<Option<T>>` deserialized through [`nullable`].

use serde::{Deserialize, Deserializer};

/// Deserializes a present key into `Some(inner)`, where `inner` is `None`
/// for an explicit `null`.
///
/// Must be paired with `#[serde(default)]` so that an absent key becomes
/// the outer `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Applies a three-state patch value onto a stored nullable field.
pub fn apply_nullable<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value;
    }
}
