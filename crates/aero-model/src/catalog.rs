//! The fixed list of input files and which of them hold flight data.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::SourceKey;

/// Key of the airport reference source.
pub const AIRPORTS_KEY: &str = "aeropuertos";

/// One named input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub key: SourceKey,
    pub file_name: String,
}

impl SourceSpec {
    pub fn new(key: &str, file_name: &str) -> Result<Self> {
        Ok(Self {
            key: SourceKey::new(key)?,
            file_name: file_name.to_string(),
        })
    }
}

/// Ordered list of sources plus the subset combined as flight data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalog {
    /// Sources in load order.
    pub sources: Vec<SourceSpec>,
    /// Flight report keys in combination order.
    pub flight_order: Vec<SourceKey>,
    /// Key of the airport reference source.
    pub airports: SourceKey,
}

impl Default for SourceCatalog {
    fn default() -> Self {
        let sources = [
            ("2023", "202312-informe-ministerio-actualizado-dic.csv"),
            (AIRPORTS_KEY, "aeropuertos_detalle.csv"),
            ("2019", "2019_informe_ministerio.csv"),
            ("2020", "2020_informe_ministerio.csv"),
            ("2022", "202212-informe-ministerio.csv"),
            ("2024", "202404-informe-ministerio.csv"),
            ("2021", "202112_informe_ministerio.csv"),
        ]
        .into_iter()
        .map(|(key, file_name)| SourceSpec {
            key: SourceKey::from_static(key),
            file_name: file_name.to_string(),
        })
        .collect();
        let flight_order = ["2019", "2020", "2022", "2024", "2023", "2021"]
            .into_iter()
            .map(SourceKey::from_static)
            .collect();
        Self {
            sources,
            flight_order,
            airports: SourceKey::from_static(AIRPORTS_KEY),
        }
    }
}

impl SourceCatalog {
    pub fn get(&self, key: &SourceKey) -> Option<&SourceSpec> {
        self.sources.iter().find(|spec| &spec.key == key)
    }

    /// Checks that keys are unique and the flight order only names flight sources.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for spec in &self.sources {
            if !seen.insert(spec.key.as_str()) {
                return Err(ModelError::DuplicateSource(spec.key.to_string()));
            }
        }
        for key in &self.flight_order {
            if key == &self.airports {
                return Err(ModelError::ReferenceInFlightOrder(key.to_string()));
            }
            if !seen.contains(key.as_str()) {
                return Err(ModelError::UnknownFlightSource(key.to_string()));
            }
        }
        Ok(())
    }
}
