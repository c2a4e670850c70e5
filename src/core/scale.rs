use crate::error::{ChartError, ChartResult};

/// Linear mapping from the value axis domain onto a horizontal pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite()
            || !domain_end.is_finite()
            || half_span(domain_start, domain_end) == 0.0
        {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start >= pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and increasing".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    /// Builds a value domain that always contains zero, so bars grow from
    /// the zero line in both directions.
    pub fn zero_anchored(values: &[f64], pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        let mut min = 0.0_f64;
        let mut max = 0.0_f64;
        for value in values.iter().copied().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        if min == max {
            max = 1.0;
        }
        let (min, max) = nice_bounds(min, max);
        Self::new(min, max, pixel_start, pixel_end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized =
            half_span(self.domain_start, value) / half_span(self.domain_start, self.domain_end);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        Ok(self.domain_start * (1.0 - normalized) + self.domain_end * normalized)
    }

    /// Tick values on a 1/2/5 step grid covering the domain.
    ///
    /// Returns no ticks when the grid would exceed `MAX_TICKS` entries.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let step = nice_step(low, high, target_count.max(2));
        let first = (low / step).ceil();
        let last = (high / step).floor();
        let count = last - first;
        if !count.is_finite() || !(0.0..=MAX_TICKS).contains(&count) {
            return Vec::new();
        }
        (0..=count as usize)
            .map(|offset| (first + offset as f64) * step)
            .filter(|tick| tick.is_finite())
            .collect()
    }
}

const MAX_TICKS: f64 = 1_000.0;

// Halved so that any two finite values give a finite difference.
fn half_span(from: f64, to: f64) -> f64 {
    to / 2.0 - from / 2.0
}

fn nice_step(low: f64, high: f64, target_count: usize) -> f64 {
    let intervals = (target_count - 1) as f64;
    let raw = (high / intervals - low / intervals).abs();
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn nice_bounds(min: f64, max: f64) -> (f64, f64) {
    let step = nice_step(min, max, 6);
    let bounds = ((min / step).floor() * step, (max / step).ceil() * step);
    if bounds.0.is_finite() && bounds.1.is_finite() {
        bounds
    } else {
        (min, max)
    }
}
