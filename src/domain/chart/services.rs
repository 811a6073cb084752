use std::fmt::Write as _;

use super::value_objects::{AxisBounds, ChartMode, ChartState, DerivedDisplay, SparklinePaths, Trend};
use crate::domain::market_data::{Instrument, SeriesWindow, VolatilityClass};

/// Fraction of the base price used as the range when the window is flat.
const FLAT_RANGE_FRACTION: f64 = 0.0001;

/// Domain service deriving display values from a window.
///
/// Every division is guarded: nothing here returns NaN or an infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartProjector;

impl ChartProjector {
    pub fn new() -> Self {
        Self
    }

    /// Plain min/max over the window, `None` when empty.
    pub fn bounds(&self, window: &SeriesWindow) -> Option<(f64, f64)> {
        window.iter().fold(None, |acc, sample| match acc {
            None => Some((sample, sample)),
            Some((min, max)) => Some((min.min(sample), max.max(sample))),
        })
    }

    /// Divisor for `normalize`. Falls back to `base * 0.0001` (or 1) when `max == min`.
    pub fn safe_range(&self, min: f64, max: f64, base_price: f64) -> f64 {
        let range = max - min;
        if range == 0.0 {
            let fallback = base_price * FLAT_RANGE_FRACTION;
            if base_price > 0.0 && fallback > 0.0 && fallback.is_finite() { fallback } else { 1.0 }
        } else if range.is_finite() {
            range
        } else {
            f64::MAX
        }
    }

    /// Map a sample into `[0, 1]`. A flat window puts every point at `0.5`.
    pub fn normalize(&self, sample: f64, min: f64, max: f64, base_price: f64) -> f64 {
        if max == min {
            return 0.5;
        }
        let t = (sample - min) / self.safe_range(min, max, base_price);
        if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 }
    }

    pub fn normalized_points(&self, window: &SeriesWindow, base_price: f64) -> Vec<f64> {
        let Some((min, max)) = self.bounds(window) else {
            return Vec::new();
        };
        window.iter().map(|sample| self.normalize(sample, min, max, base_price)).collect()
    }

    pub fn trend(&self, current_price: f64, first_sample: f64) -> Trend {
        if current_price >= first_sample { Trend::Positive } else { Trend::Negative }
    }

    /// Percent move since `first_sample`; `0.0` for an empty window or a zero start.
    pub fn percent_change(&self, current_price: f64, first_sample: Option<f64>) -> f64 {
        match first_sample {
            Some(first) if first != 0.0 => {
                let percent = (current_price - first) / first * 100.0;
                if percent.is_finite() { percent } else { 0.0 }
            }
            _ => 0.0,
        }
    }

    /// Flatline always reads `0.00`; sub-unit prices get 8 decimals, the rest 2.
    pub fn format_price(&self, price: f64, class: VolatilityClass) -> String {
        if class == VolatilityClass::Flatline || !price.is_finite() {
            return "0.00".to_string();
        }
        if price < 1.0 { format!("{:.8}", price) } else { format!("{:.2}", price) }
    }

    /// Signed two-decimal percent; anything that rounds to zero prints as `0.00%`.
    pub fn format_percent(&self, percent: f64) -> String {
        if !percent.is_finite() || percent.abs() < 0.005 {
            return "0.00%".to_string();
        }
        format!("{:+.2}%", percent)
    }

    /// Bundle every derived value for one tick.
    pub fn project(
        &self,
        window: &SeriesWindow,
        instrument: &Instrument,
        current_price: f64,
    ) -> DerivedDisplay {
        let base_price = instrument.base_price.value();
        let (min, max) = self.bounds(window).unwrap_or((current_price, current_price));
        let first = window.first();
        let percent_change = self.percent_change(current_price, first);

        DerivedDisplay {
            min,
            max,
            normalized_range: self.safe_range(min, max, base_price),
            trend: self.trend(current_price, first.unwrap_or(current_price)),
            current_price,
            percent_change,
            formatted_price: self.format_price(current_price, instrument.volatility),
            formatted_percent: self.format_percent(percent_change),
        }
    }
}

/// Axis policy of the sparkline area chart. Independent from
/// [`ChartProjector::normalize`], which drives the scene overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SparklineScale {
    pub mode: ChartMode,
}

impl SparklineScale {
    pub fn new(mode: ChartMode) -> Self {
        Self { mode }
    }

    pub fn state(&self, window: &SeriesWindow) -> ChartState {
        if window.is_empty() { ChartState::Loading } else { ChartState::Ready }
    }

    pub fn bounds(&self, min: f64, max: f64) -> AxisBounds {
        match self.mode {
            ChartMode::Compact => AxisBounds { min: min * 0.99, max: max * 1.01 },
            ChartMode::Detailed => AxisBounds { min: min * 0.999, max: max * 1.001 },
        }
    }

    pub fn bounds_for(&self, window: &SeriesWindow) -> Option<AxisBounds> {
        ChartProjector::new().bounds(window).map(|(min, max)| self.bounds(min, max))
    }

    /// SVG y for `price`; the vertical centre when the bounds have collapsed.
    pub fn y_for(&self, price: f64, bounds: &AxisBounds, height: f64) -> f64 {
        let span = bounds.span();
        if span == 0.0 || !span.is_finite() {
            return height / 2.0;
        }
        let y = height * (1.0 - (price - bounds.min) / span);
        if y.is_finite() { y } else { height / 2.0 }
    }

    /// Evenly spaced axis values from top (max) to bottom (min).
    pub fn axis_ticks(&self, bounds: &AxisBounds, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![(bounds.min + bounds.max) / 2.0],
            _ => (0..count)
                .map(|i| bounds.max - bounds.span() * i as f64 / (count - 1) as f64)
                .collect(),
        }
    }

    /// Stroke and fill paths, `None` while the window is still loading.
    pub fn paths(&self, window: &SeriesWindow, width: f64, height: f64) -> Option<SparklinePaths> {
        let bounds = self.bounds_for(window)?;
        let count = window.len();
        let step = if count > 1 { width / (count - 1) as f64 } else { 0.0 };
        let x_for = |i: usize| if count > 1 { i as f64 * step } else { width / 2.0 };

        let mut line = String::new();
        for (i, sample) in window.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(line, "{}{:.2},{:.2} ", command, x_for(i), self.y_for(sample, &bounds, height));
        }
        let line = line.trim_end().to_string();
        let area = format!(
            "{} L{:.2},{:.2} L{:.2},{:.2} Z",
            line,
            x_for(count - 1),
            height,
            x_for(0),
            height
        );

        Some(SparklinePaths { line, area })
    }
}
