use std::fs;
use std::path::PathBuf;

use tracing::{debug, error};

use crate::core::Dataset;
use crate::error::{ChartError, ChartResult};

/// Fixed relative location of the dataset document.
pub const DEFAULT_DATASET_PATH: &str = "./sector_data.json";

/// Where the dataset document comes from.
pub trait DatasetSource {
    /// Human-readable location, used in failure notices.
    fn location(&self) -> String;
    fn fetch(&self) -> ChartResult<String>;
}

/// Reads the dataset from the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileDatasetSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_PATH)
    }
}

impl DatasetSource for FileDatasetSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> ChartResult<String> {
        fs::read_to_string(&self.path).map_err(|err| ChartError::DatasetLoad {
            location: self.location(),
            reason: err.to_string(),
        })
    }
}

/// Serves an in-memory document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDatasetSource {
    label: String,
    document: String,
}

impl StaticDatasetSource {
    #[must_use]
    pub fn new(label: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            document: document.into(),
        }
    }
}

impl DatasetSource for StaticDatasetSource {
    fn location(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> ChartResult<String> {
        Ok(self.document.clone())
    }
}

/// Fetches and parses the dataset once. There is no retry.
pub fn load_dataset(source: &dyn DatasetSource) -> ChartResult<Dataset> {
    let location = source.location();
    let result = source.fetch().and_then(|raw| {
        Dataset::from_json_str(&raw).map_err(|err| ChartError::DatasetLoad {
            location: location.clone(),
            reason: err.to_string(),
        })
    });

    match result {
        Ok(dataset) => {
            debug!(
                location = %location,
                sectors = dataset.sector_totals.len(),
                has_subsectors = dataset.subsectors().is_some(),
                "dataset loaded"
            );
            Ok(dataset)
        }
        Err(err) => {
            error!(location = %location, error = %err, "dataset load failed");
            Err(match err {
                ChartError::DatasetLoad { .. } => err,
                other => ChartError::DatasetLoad {
                    location,
                    reason: other.to_string(),
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DatasetSource, FileDatasetSource, StaticDatasetSource, load_dataset};
    use crate::error::ChartError;

    #[test]
    fn missing_file_maps_to_load_failure() {
        let source = FileDatasetSource::new("/definitely/not/here/sector_data.json");
        let err = load_dataset(&source).expect_err("missing file");
        match err {
            ChartError::DatasetLoad { location, .. } => {
                assert!(location.ends_with("sector_data.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_document_maps_to_load_failure() {
        let source = StaticDatasetSource::new("inline", "{ not json");
        let err = load_dataset(&source).expect_err("parse error");
        assert!(matches!(err, ChartError::DatasetLoad { .. }));
    }

    #[test]
    fn default_file_source_points_at_fixed_relative_path() {
        assert_eq!(FileDatasetSource::default().location(), "./sector_data.json");
    }
}
