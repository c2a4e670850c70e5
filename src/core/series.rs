use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::dataset::Measure;
use crate::core::labels::LabelKind;

pub const DEFAULT_POSITIVE_COLOR: &str = "#d63f44";
pub const DEFAULT_NEGATIVE_COLOR: &str = "#4790b1";

/// Bar fill colors keyed on the sign of the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPalette {
    pub positive: String,
    pub negative: String,
}

impl Default for SignPalette {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_COLOR.to_owned(),
            negative: DEFAULT_NEGATIVE_COLOR.to_owned(),
        }
    }
}

/// Zero counts as positive; NaN falls through to the negative color.
#[must_use]
pub fn bar_color_for_amount(amount: f64, palette: &SignPalette) -> &str {
    if amount >= 0.0 {
        &palette.positive
    } else {
        &palette.negative
    }
}

/// Largest magnitude first; equal magnitudes put the positive amount first.
#[must_use]
pub fn magnitude_order(left: f64, right: f64) -> Ordering {
    OrderedFloat(right.abs())
        .cmp(&OrderedFloat(left.abs()))
        .then_with(|| OrderedFloat(right).cmp(&OrderedFloat(left)))
}

/// Stable sort of `(key, amount)` pairs by `magnitude_order`.
pub fn sort_by_magnitude<K>(entries: &mut [(K, f64)]) {
    entries.sort_by(|left, right| magnitude_order(left.1, right.1));
}

/// One bar as handed to the chart surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub label: String,
    pub full_label: String,
    pub amount: f64,
    pub original_key: String,
    pub color: String,
}

/// Sorted, labeled and colored bars for one view.
///
/// Entries are index-aligned with the bars drawn by the surface, so a click
/// index resolves through `original_key_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub entries: Vec<BarEntry>,
}

impl BarSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn original_key_at(&self, index: usize) -> Option<&str> {
        self.entries
            .get(index)
            .map(|entry| entry.original_key.as_str())
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.label.clone()).collect()
    }

    #[must_use]
    pub fn full_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.full_label.clone())
            .collect()
    }

    #[must_use]
    pub fn amounts(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.amount).collect()
    }

    #[must_use]
    pub fn colors(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.color.clone()).collect()
    }

    #[must_use]
    pub fn original_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.original_key.clone())
            .collect()
    }
}

/// Sorts, labels and colors `(key, amount)` pairs into a bar series.
#[must_use]
pub fn build_bar_series<'a, I>(items: I, kind: LabelKind, palette: &SignPalette) -> BarSeries
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut pairs: Vec<(&str, f64)> = items.into_iter().collect();
    sort_by_magnitude(&mut pairs);

    let entries = pairs
        .into_iter()
        .map(|(key, amount)| BarEntry {
            label: kind.format(key),
            full_label: kind.full_label(key),
            amount,
            original_key: key.to_owned(),
            color: bar_color_for_amount(amount, palette).to_owned(),
        })
        .collect();

    BarSeries { entries }
}

#[must_use]
pub fn build_measure_series(measures: &[Measure], palette: &SignPalette) -> BarSeries {
    build_bar_series(
        measures
            .iter()
            .map(|measure| (measure.name.as_str(), measure.amount)),
        LabelKind::Measure,
        palette,
    )
}
