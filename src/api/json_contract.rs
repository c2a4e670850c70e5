use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::NavigationState;

use super::chart_config::ChartConfig;
use super::render_command::{InfoText, ViewCommand};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Versioned wire form of one rendered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewJsonContractV1 {
    pub schema_version: u32,
    pub state: NavigationState,
    pub back_visible: bool,
    pub info: InfoText,
    pub chart: ChartConfig,
}

impl ViewJsonContractV1 {
    #[must_use]
    pub fn new(state: &NavigationState, command: &ViewCommand) -> Self {
        Self {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            state: state.clone(),
            back_visible: command.back_visible,
            info: command.info.clone(),
            chart: command.config.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize view contract v1: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse view contract payload: {e}"))
        })?;
        if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported view contract schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl ChartConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}
