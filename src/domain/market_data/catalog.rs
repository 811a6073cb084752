use std::collections::HashSet;

use super::entities::Instrument;
use super::value_objects::{InstrumentId, VolatilityClass};
use crate::domain::errors::{ConfigResult, DomainResult, ValidationError};

/// Immutable table of selectable coins, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    pub fn new(instruments: Vec<Instrument>) -> DomainResult<Self> {
        if instruments.is_empty() {
            return Err(ValidationError::EmptyCatalog.into());
        }
        let mut seen = HashSet::new();
        for instrument in &instruments {
            instrument.validate()?;
            if !seen.insert(instrument.id.clone()) {
                return Err(ValidationError::DuplicateInstrument(instrument.id.to_string()).into());
            }
        }
        Ok(Self { instruments })
    }

    /// Parse a JSON array of instruments.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let instruments: Vec<Instrument> = serde_json::from_str(json)?;
        Self::new(instruments)
    }

    /// The built-in coin list.
    pub fn default_coins() -> Self {
        Self {
            instruments: vec![
                Instrument::new("bitcoin", "BTC", "Bitcoin", 0xF7931A, 67_250.0, VolatilityClass::Normal)
                    .with_balance(0.42),
                Instrument::new("ethereum", "ETH", "Ethereum", 0x627EEA, 3_480.0, VolatilityClass::Normal)
                    .with_balance(5.8),
                Instrument::new("solana", "SOL", "Solana", 0x14F195, 148.5, VolatilityClass::Normal)
                    .with_balance(64.0),
                Instrument::new("dogecoin", "DOGE", "Dogecoin", 0xC2A633, 0.1642, VolatilityClass::Normal)
                    .with_balance(25_000.0)
                    .with_exotic_variant(),
                Instrument::new("cardano", "ADA", "Cardano", 0x0033AD, 0.4521, VolatilityClass::Normal)
                    .with_balance(8_000.0),
                Instrument::new("terra-classic", "LUNC", "Terra Classic", 0xFF4D4D, 0.0, VolatilityClass::Flatline)
                    .with_balance(1_000_000.0),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn first(&self) -> &Instrument {
        // Non-empty by construction.
        &self.instruments[0]
    }

    pub fn position(&self, id: &InstrumentId) -> Option<usize> {
        self.instruments.iter().position(|instrument| &instrument.id == id)
    }

    pub fn get(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|instrument| &instrument.id == id)
    }

    pub fn require(&self, id: &InstrumentId) -> DomainResult<&Instrument> {
        self.get(id).ok_or_else(|| ValidationError::UnknownInstrument(id.to_string()).into())
    }

    /// The instrument after `id`, wrapping to the start.
    pub fn next(&self, id: &InstrumentId) -> DomainResult<&Instrument> {
        let index = self.position(id).ok_or_else(|| ValidationError::UnknownInstrument(id.to_string()))?;
        Ok(&self.instruments[(index + 1) % self.instruments.len()])
    }

    /// The instrument before `id`, wrapping to the end.
    pub fn previous(&self, id: &InstrumentId) -> DomainResult<&Instrument> {
        let index = self.position(id).ok_or_else(|| ValidationError::UnknownInstrument(id.to_string()))?;
        let len = self.instruments.len();
        Ok(&self.instruments[(index + len - 1) % len])
    }
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        Self::default_coins()
    }
}
