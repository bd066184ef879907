//! Serde helpers shared by the partner wire types.

use serde::{Deserialize, Deserializer};

/// Decodes JSON `null` as `T::default()`.
///
/// Partners send `null` for absent strings, numbers, objects and lists.
/// Pair with `#[serde(default)]` so a missing key decodes the same way.
///
/// # Errors
///
/// Returns the deserializer's error when the value is neither `null` nor a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
