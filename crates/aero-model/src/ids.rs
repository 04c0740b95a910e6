#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Nominal key of a data source, e.g. `"2021"` or `"aeropuertos"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct SourceKey(String);

impl SourceKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSourceKey(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Key from a literal known to be non-blank.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SourceKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceKey> for String {
    fn from(key: SourceKey) -> Self {
        key.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SourceKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SourceKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank_keys() {
        assert_eq!(SourceKey::new(" 2021 ").unwrap().as_str(), "2021");
        assert!(matches!(
            SourceKey::new("   "),
            Err(ModelError::InvalidSourceKey(_))
        ));
    }

    #[test]
    fn deserializes_from_plain_string() {
        let key: SourceKey = serde_json::from_str("\"aeropuertos\"").unwrap();
        assert_eq!(key, "aeropuertos");
        assert!(serde_json::from_str::<SourceKey>("\"\"").is_err());
    }
}
