//! Field deserializers for backend rows that may carry junk values.
//!
//! A single bad field must not reject the whole request; the row is kept and
//! the engine skips it with a warning.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OrJunk<T> {
    Value(T),
    Junk(IgnoredAny),
}

/// Deserializes `T`, mapping null or a value of the wrong type to `None`.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OrJunk::<T>::deserialize(deserializer)? {
        OrJunk::Value(value) => Some(value),
        OrJunk::Junk(_) => None,
    })
}
