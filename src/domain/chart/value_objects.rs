use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// Direction of the window relative to its first sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[display(fmt = "▲")]
    #[strum(serialize = "positive")]
    Positive,
    #[display(fmt = "▼")]
    #[strum(serialize = "negative")]
    Negative,
}

impl Trend {
    pub fn is_positive(&self) -> bool {
        matches!(self, Trend::Positive)
    }
}

/// Everything the rendering layer needs for one frame of readouts.
/// Recomputed on every tick; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedDisplay {
    pub min: f64,
    pub max: f64,
    /// Divisor used by `normalize`: `max - min`, or the fallback when flat.
    pub normalized_range: f64,
    pub trend: Trend,
    pub current_price: f64,
    pub percent_change: f64,
    pub formatted_price: String,
    pub formatted_percent: String,
}

/// Vertical scaling policy of the sparkline chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum ChartMode {
    /// No axes, generous padding.
    #[default]
    #[display(fmt = "Compact")]
    #[strum(serialize = "compact")]
    Compact,
    /// Axes shown, tight padding so small moves look bigger.
    #[display(fmt = "Detailed")]
    #[strum(serialize = "detailed")]
    Detailed,
}

impl ChartMode {
    pub fn toggle(self) -> Self {
        match self {
            ChartMode::Compact => ChartMode::Detailed,
            ChartMode::Detailed => ChartMode::Compact,
        }
    }

    pub fn shows_axes(&self) -> bool {
        matches!(self, ChartMode::Detailed)
    }
}

/// Sparkline placeholder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartState {
    #[display(fmt = "Loading")]
    Loading,
    #[display(fmt = "Ready")]
    Ready,
}

/// Presentation flavour for instruments that offer one. No effect on simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum DisplayVariant {
    #[default]
    #[display(fmt = "Standard")]
    #[strum(serialize = "standard")]
    Standard,
    #[display(fmt = "Exotic")]
    #[strum(serialize = "exotic")]
    Exotic,
}

impl DisplayVariant {
    pub fn toggle(self) -> Self {
        match self {
            DisplayVariant::Standard => DisplayVariant::Exotic,
            DisplayVariant::Exotic => DisplayVariant::Standard,
        }
    }
}

/// Value Object - vertical axis bounds of the sparkline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// SVG path data for the sparkline stroke and its filled area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparklinePaths {
    pub line: String,
    pub area: String,
}
