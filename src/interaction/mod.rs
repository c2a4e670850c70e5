//! Drill-down navigation state and its pure transition function.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::core::labels::{format_sector_name, format_subsector_name};
use crate::error::{ChartError, ChartResult};

/// Current drill-down depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Sectors,
    Subsectors,
    Measures,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sectors => "sectors",
            Self::Subsectors => "subsectors",
            Self::Measures => "measures",
        };
        f.write_str(name)
    }
}

/// User-initiated navigation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEvent {
    SelectSector(String),
    SelectSubsector(String),
    Back,
}

impl fmt::Display for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectSector(sector) => write!(f, "select sector `{sector}`"),
            Self::SelectSubsector(subsector) => write!(f, "select subsector `{subsector}`"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Drill-down position.
///
/// `current_subsector` is only ever set in `View::Measures` reached through
/// the Industrie subsector view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    view: View,
    current_sector: Option<String>,
    current_subsector: Option<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::sectors()
    }
}

impl NavigationState {
    #[must_use]
    pub fn sectors() -> Self {
        Self {
            view: View::Sectors,
            current_sector: None,
            current_subsector: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn current_sector(&self) -> Option<&str> {
        self.current_sector.as_deref()
    }

    #[must_use]
    pub fn current_subsector(&self) -> Option<&str> {
        self.current_subsector.as_deref()
    }

    /// The back control is hidden only on the top-level view.
    #[must_use]
    pub fn back_visible(&self) -> bool {
        self.view != View::Sectors
    }

    /// Computes the next state without touching `self`.
    ///
    /// Selections that would lead to an empty chart are rejected with
    /// `EmptySelection` or `MissingSubsectorData`; callers keep the current
    /// state in that case.
    pub fn transition(
        &self,
        event: &NavigationEvent,
        dataset: &Dataset,
        industrie_key: &str,
    ) -> ChartResult<Self> {
        match (self.view, event) {
            (View::Sectors, NavigationEvent::SelectSector(sector)) if sector == industrie_key => {
                if dataset.subsectors().is_none() {
                    return Err(ChartError::MissingSubsectorData);
                }
                Ok(Self {
                    view: View::Subsectors,
                    current_sector: Some(sector.clone()),
                    current_subsector: None,
                })
            }
            (View::Sectors, NavigationEvent::SelectSector(sector)) => {
                if dataset.sector_measures(sector).is_empty() {
                    return Err(ChartError::EmptySelection {
                        level: "sector",
                        name: format_sector_name(sector),
                    });
                }
                Ok(Self {
                    view: View::Measures,
                    current_sector: Some(sector.clone()),
                    current_subsector: None,
                })
            }
            (View::Subsectors, NavigationEvent::SelectSubsector(subsector)) => {
                let has_measures = dataset
                    .subsectors()
                    .is_some_and(|subsectors| !subsectors.measures(subsector).is_empty());
                if !has_measures {
                    return Err(ChartError::EmptySelection {
                        level: "subsector",
                        name: format_subsector_name(subsector),
                    });
                }
                Ok(Self {
                    view: View::Measures,
                    current_sector: Some(industrie_key.to_owned()),
                    current_subsector: Some(subsector.clone()),
                })
            }
            (View::Measures, NavigationEvent::Back) if self.current_subsector.is_some() => {
                Ok(Self {
                    view: View::Subsectors,
                    current_sector: self.current_sector.clone(),
                    current_subsector: None,
                })
            }
            (_, NavigationEvent::Back) => Ok(Self::sectors()),
            (view, event) => Err(ChartError::InvalidTransition {
                view: view.to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Checks the subsector invariant against the configured Industrie key.
    #[must_use]
    pub fn is_consistent(&self, industrie_key: &str) -> bool {
        match self.current_subsector {
            None => true,
            Some(_) => {
                self.view == View::Measures && self.current_sector.as_deref() == Some(industrie_key)
            }
        }
    }
}
