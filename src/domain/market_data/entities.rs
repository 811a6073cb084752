pub use super::value_objects::{InstrumentColor, InstrumentId, Price, Symbol, VolatilityClass};
use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Domain entity - a selectable coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub symbol: Symbol,
    pub name: String,
    pub color: InstrumentColor,
    pub base_price: Price,
    /// Last readout. Only meaningful for display; the simulator starts from `base_price`.
    #[serde(default)]
    pub current_price: Price,
    /// Units held, shown as a portfolio value in the header.
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub volatility: VolatilityClass,
    /// Whether the UI offers the alternate "exotic" presentation for this coin.
    #[serde(default)]
    pub exotic_variant: bool,
}

impl Instrument {
    pub fn new(
        id: &str,
        symbol: &str,
        name: &str,
        color: u32,
        base_price: f64,
        volatility: VolatilityClass,
    ) -> Self {
        Self {
            id: InstrumentId::from(id),
            symbol: Symbol::from(symbol),
            name: name.to_string(),
            color: InstrumentColor::from_hex(color),
            base_price: Price::from(base_price),
            current_price: Price::from(base_price),
            balance: 0.0,
            volatility,
            exotic_variant: false,
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_exotic_variant(mut self) -> Self {
        self.exotic_variant = true;
        self
    }

    pub fn is_flatline(&self) -> bool {
        self.volatility == VolatilityClass::Flatline
    }

    /// Value of the held balance at the current readout.
    pub fn holdings_value(&self) -> f64 {
        let value = self.balance * self.current_price.value();
        if value.is_finite() { value } else { 0.0 }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.value().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        self.base_price.check("base_price")?;
        self.current_price.check("current_price")?;
        if !self.balance.is_finite() {
            return Err(ValidationError::NonFinite { field: "balance", value: self.balance });
        }
        Ok(())
    }
}

/// Domain entity - fixed-capacity sliding window of samples, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SeriesWindow {
    pub fn new(capacity: usize) -> Self {
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    /// Build a window from samples; only the newest `capacity` are kept.
    pub fn from_samples(capacity: usize, samples: impl IntoIterator<Item = f64>) -> Self {
        let mut window = Self::new(capacity);
        for sample in samples {
            window.push(sample);
        }
        window
    }

    /// Append a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, sample: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn first(&self) -> Option<f64> {
        self.samples.front().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
