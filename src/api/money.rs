use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount in millions to `decimals` places.
///
/// Rounding applies to the exact binary value, half away from zero, so
/// `1.45` (stored just below 1.45) gives `1.4`. Negative zero prints as zero.
#[must_use]
pub fn format_fixed(value: f64, decimals: u32) -> String {
    let Some(decimal) = Decimal::from_f64_retain(value) else {
        return format!("{value:.prec$}", prec = decimals as usize);
    };
    let mut rounded =
        decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// `€12.5 miljoen`, as used in tooltips and info text.
#[must_use]
pub fn format_millions(value: f64) -> String {
    format!("€{} miljoen", format_fixed(value, 1))
}

/// `€15M`, as used for value axis ticks.
#[must_use]
pub fn format_axis_tick(value: f64) -> String {
    format!("€{}M", format_fixed(value, 0))
}
