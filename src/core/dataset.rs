use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One named budget line item. Negative amounts are savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub amount: f64,
}

impl Measure {
    #[must_use]
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Subsector breakdown, only available for the Industrie sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustrieSubsectors {
    #[serde(default)]
    pub subsector_totals: IndexMap<String, f64>,
    #[serde(default)]
    pub subsector_details: IndexMap<String, Vec<Measure>>,
}

impl IndustrieSubsectors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subsector_totals.is_empty()
    }

    #[must_use]
    pub fn measures(&self, subsector: &str) -> &[Measure] {
        self.subsector_details
            .get(subsector)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Immutable budget dataset shared by every view.
///
/// Map order follows the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub sector_totals: IndexMap<String, f64>,
    pub sector_details: IndexMap<String, Vec<Measure>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrie_subsectors: Option<IndustrieSubsectors>,
}

impl Dataset {
    /// Parses a dataset document.
    ///
    /// Only presence is checked: `sector_totals` and `sector_details` must be
    /// JSON objects. Everything else is taken as-is.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse dataset json: {e}")))?;

        for field in ["sector_totals", "sector_details"] {
            if !value.get(field).is_some_and(serde_json::Value::is_object) {
                return Err(ChartError::InvalidData(format!(
                    "dataset field `{field}` must be an object"
                )));
            }
        }

        serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("failed to decode dataset: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize dataset: {e}")))
    }

    #[must_use]
    pub fn sector_measures(&self, sector: &str) -> &[Measure] {
        self.sector_details
            .get(sector)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Subsector data, treating an empty breakdown the same as a missing one.
    #[must_use]
    pub fn subsectors(&self) -> Option<&IndustrieSubsectors> {
        self.industrie_subsectors
            .as_ref()
            .filter(|subsectors| !subsectors.is_empty())
    }
}
