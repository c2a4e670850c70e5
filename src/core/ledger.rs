use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dataset::{Dataset, IndustrieSubsectors, Measure};

/// One policy row from the budget overview, with per-column amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Scheme name; preferred measure name when present.
    #[serde(default)]
    pub regeling: Option<String>,
    /// Descriptive cells used to name the measure when `regeling` is absent.
    #[serde(default)]
    pub context: Vec<String>,
    /// Any value here means the row could not be attributed to a sector.
    #[serde(default)]
    pub unallocatable: Option<f64>,
    #[serde(default)]
    pub amounts: IndexMap<String, f64>,
}

impl LedgerRow {
    #[must_use]
    pub fn measure_name(&self) -> Option<String> {
        if let Some(regeling) = self.regeling.as_deref().filter(|name| !name.is_empty()) {
            return Some(regeling.to_owned());
        }
        let parts: Vec<&str> = self
            .context
            .iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" - "))
    }

    /// A row with no text and no numeric cell at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.regeling.as_deref().is_none_or(str::is_empty)
            && self.context.iter().all(String::is_empty)
            && self.unallocatable.is_none_or(|value| !value.is_finite())
            && self.amounts.values().all(|amount| !amount.is_finite())
    }

    /// The closing `SOM` row of a subsector sheet, matched on the first
    /// context cell.
    #[must_use]
    pub fn is_sum_row(&self) -> bool {
        self.context
            .first()
            .is_some_and(|cell| cell.trim().eq_ignore_ascii_case("SOM"))
    }

    fn is_unallocatable(&self) -> bool {
        self.unallocatable.is_some_and(f64::is_finite)
    }

    fn amount(&self, column: &str) -> Option<f64> {
        self.amounts
            .get(column)
            .copied()
            .filter(|amount| amount.is_finite() && *amount != 0.0)
    }
}

/// Column totals and per-column measures for one ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerAggregate {
    pub totals: IndexMap<String, f64>,
    pub details: IndexMap<String, Vec<Measure>>,
}

/// Aggregates ledger rows over `columns`, in column order.
///
/// Zero and non-finite cells are ignored, and columns whose total is zero
/// are omitted entirely. Rows that cannot be named still count towards the
/// total but produce no measure.
#[must_use]
pub fn aggregate_ledger(rows: &[LedgerRow], columns: &[String]) -> LedgerAggregate {
    aggregate_rows(&rows.iter().collect::<Vec<_>>(), columns)
}

fn aggregate_rows(rows: &[&LedgerRow], columns: &[String]) -> LedgerAggregate {
    let mut aggregate = LedgerAggregate::default();
    for column in columns {
        let total: f64 = rows.iter().filter_map(|row| row.amount(column)).sum();
        if total == 0.0 {
            continue;
        }

        let measures = rows
            .iter()
            .filter_map(|row| {
                let amount = row.amount(column)?;
                Some(Measure::new(row.measure_name()?, amount))
            })
            .collect();
        aggregate.totals.insert(column.clone(), total);
        aggregate.details.insert(column.clone(), measures);
    }
    aggregate
}

// Rows before the first one matching `stop`.
fn rows_until(rows: &[LedgerRow], stop: impl Fn(&LedgerRow) -> bool) -> &[LedgerRow] {
    let end = rows.iter().position(stop).unwrap_or(rows.len());
    &rows[..end]
}

/// Assembles a `Dataset` from the sector ledger and the optional Industrie
/// subsector ledger.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    sectors: LedgerAggregate,
    subsectors: Option<LedgerAggregate>,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the sector sheet up to its first blank row and drops rows
    /// marked unallocatable. Columns listed in `excluded` (for example a
    /// generic column) are skipped.
    #[must_use]
    pub fn with_sector_ledger(
        mut self,
        rows: &[LedgerRow],
        columns: &[String],
        excluded: &[String],
    ) -> Self {
        let columns: Vec<String> = columns
            .iter()
            .filter(|column| !excluded.contains(column))
            .cloned()
            .collect();
        let sheet = rows_until(rows, LedgerRow::is_blank);
        let allocatable: Vec<&LedgerRow> =
            sheet.iter().filter(|row| !row.is_unallocatable()).collect();
        debug!(
            total_rows = rows.len(),
            sheet_rows = sheet.len(),
            allocatable_rows = allocatable.len(),
            columns = columns.len(),
            "aggregate sector ledger"
        );
        self.sectors = aggregate_rows(&allocatable, &columns);
        self
    }

    /// Reads the Industrie subsector sheet up to its `SOM` row.
    #[must_use]
    pub fn with_subsector_ledger(mut self, rows: &[LedgerRow], columns: &[String]) -> Self {
        let sheet = rows_until(rows, LedgerRow::is_sum_row);
        debug!(
            total_rows = rows.len(),
            sheet_rows = sheet.len(),
            columns = columns.len(),
            "aggregate subsector ledger"
        );
        self.subsectors = Some(aggregate_ledger(sheet, columns));
        self
    }

    #[must_use]
    pub fn build(self) -> Dataset {
        Dataset {
            sector_totals: self.sectors.totals,
            sector_details: self.sectors.details,
            industrie_subsectors: self.subsectors.map(|aggregate| IndustrieSubsectors {
                subsector_totals: aggregate.totals,
                subsector_details: aggregate.details,
            }),
        }
    }
}
