use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::errors::ValidationError;

/// Value Object - Price
#[derive(Debug, Clone, Copy, Default, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Finite and non-negative.
    pub fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        if !self.0.is_finite() {
            return Err(ValidationError::NonFinite { field, value: self.0 });
        }
        if self.0 < 0.0 {
            return Err(ValidationError::Negative { field, value: self.0 });
        }
        Ok(())
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - Trading symbol, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: String) -> Result<Self, ValidationError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_uppercase())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Value Object - Catalog key of an instrument (`"bitcoin"`, `"ethereum"`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstrumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Value Object - Palette tag, parsed from `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentColor(u32);

impl InstrumentColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    pub fn hex(&self) -> u32 {
        self.0
    }

    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0)
    }

    /// `rgba(r, g, b, alpha)` for translucent fills.
    pub fn to_css_alpha(&self, alpha: f64) -> String {
        let r = (self.0 >> 16) & 0xFF;
        let g = (self.0 >> 8) & 0xFF;
        let b = self.0 & 0xFF;
        format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

impl TryFrom<String> for InstrumentColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ValidationError::InvalidColor(value));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ValidationError::InvalidColor(value))
    }
}

impl From<InstrumentColor> for String {
    fn from(color: InstrumentColor) -> Self {
        color.to_css()
    }
}

/// How an instrument's series moves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityClass {
    /// Banded random walk around the base price.
    #[default]
    #[display(fmt = "Normal")]
    #[strum(serialize = "normal")]
    Normal,
    /// Pinned at zero with a rare ±flicker.
    #[display(fmt = "Flatline")]
    #[strum(serialize = "flatline")]
    Flatline,
}
