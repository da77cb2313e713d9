pub mod error;
pub mod geojson;

use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` the same way as a missing member.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
