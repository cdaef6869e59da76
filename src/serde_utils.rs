/// Serde utility functions for tool parameters
use serde::{Deserialize, Deserializer, de::Error};
use std::fmt::Display;

/// Deserialize `Option<T>`, rejecting a present value outside `min..=max`.
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::limit")]
///     limit: Option<u32>,
/// }
/// ```
fn in_range<'de, T, D>(de: D, min: T, max: T) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de> + PartialOrd + Display,
    D: Deserializer<'de>,
{
    match Option::<T>::deserialize(de)? {
        Some(value) if value < min || value > max => Err(D::Error::custom(format!(
            "expected a value between {} and {}, got {}",
            min, max, value
        ))),
        other => Ok(other),
    }
}

/// Page size accepted by list endpoints: 1 to 200.
pub fn limit<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    in_range(de, 1, 200)
}

/// Task priority: 1 (normal) to 4 (urgent).
pub fn priority<'de, D>(de: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    in_range(de, 1, 4)
}

/// Strictly positive amount, e.g. a task duration.
pub fn positive<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    in_range(de, 1, u32::MAX)
}
