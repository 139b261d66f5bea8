//! Serde adapters for the sheet's wire conventions.

/// `Option<String>` that travels as a plain string: `None` is written as
/// `""`, and `""` (or a missing key, with `#[serde(default)]`) reads back as
/// `None`.
pub(crate) mod empty_as_none {
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
  }
}

/// Reads an optional waste label, mapping unknown labels to `None` instead of
/// failing the whole record.
pub(crate) mod lenient_waste {
  use serde::{Deserialize, Deserializer};

  use crate::submission::WasteCategory;

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<WasteCategory>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WasteCategory::lookup))
  }
}
