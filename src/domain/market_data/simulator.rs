//! Synthetic price source.
//!
//! Each instrument gets an [`AdvancePolicy`] once, when it is selected. The
//! policy owns the class-specific seeding and stepping rules.

use rand::Rng;

use super::entities::{Instrument, SeriesWindow};
use super::value_objects::VolatilityClass;
use crate::domain::config::SimulationConfig;
use crate::domain::logging::LogComponent;
use crate::log_trace;

/// Random walk confined to `[floor, ceiling]` around a base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandedWalk {
    pub base: f64,
    /// Half-width of the seed band in price units.
    pub seed_spread: f64,
    /// Half-width of one step in price units. Also the reset offset.
    pub volatility: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl BandedWalk {
    pub fn new(base: f64, config: &SimulationConfig) -> Self {
        Self {
            base,
            seed_spread: base * config.seed_variance,
            volatility: base * config.per_tick_volatility,
            floor: base * config.band_low,
            ceiling: base * config.band_high,
        }
    }

    fn seed_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.base + rng.gen_range(-1.0_f64..=1.0) * self.seed_spread
    }

    fn step<R: Rng + ?Sized>(&self, last: Option<f64>, rng: &mut R) -> f64 {
        let last = last.unwrap_or(self.base);
        let change = rng.gen_range(-1.0_f64..=1.0) * self.volatility;
        let next = last + change;

        // Out-of-band samples jump back inside by one volatility unit
        // instead of sticking to the edge.
        if next < self.floor {
            self.floor + self.volatility
        } else if next > self.ceiling {
            self.ceiling - self.volatility
        } else {
            next
        }
    }
}

/// Zero line with a rare flicker of exactly `±magnitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flicker {
    pub quiet_probability: f64,
    pub magnitude: f64,
}

impl Flicker {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            quiet_probability: config.flatline_quiet_probability,
            magnitude: config.flicker_magnitude,
        }
    }

    fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if rng.gen_bool(self.quiet_probability) {
            0.0
        } else if rng.gen_bool(0.5) {
            self.magnitude
        } else {
            -self.magnitude
        }
    }
}

/// Advance rule chosen once per instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvancePolicy {
    Normal(BandedWalk),
    Flatline(Flicker),
}

impl AdvancePolicy {
    pub fn for_instrument(instrument: &Instrument, config: &SimulationConfig) -> Self {
        match instrument.volatility {
            VolatilityClass::Normal => {
                AdvancePolicy::Normal(BandedWalk::new(instrument.base_price.value(), config))
            }
            VolatilityClass::Flatline => AdvancePolicy::Flatline(Flicker::new(config)),
        }
    }

    /// A full window: zeros for a flatline, independent uniform draws otherwise.
    pub fn seed<R: Rng + ?Sized>(&self, capacity: usize, rng: &mut R) -> SeriesWindow {
        match self {
            AdvancePolicy::Normal(walk) => {
                SeriesWindow::from_samples(capacity, (0..capacity).map(|_| walk.seed_sample(rng)))
            }
            AdvancePolicy::Flatline(_) => {
                SeriesWindow::from_samples(capacity, std::iter::repeat_n(0.0, capacity))
            }
        }
    }

    /// Produce the next sample given the most recent one.
    pub fn next_sample<R: Rng + ?Sized>(&self, last: Option<f64>, rng: &mut R) -> f64 {
        match self {
            AdvancePolicy::Normal(walk) => walk.step(last, rng),
            AdvancePolicy::Flatline(flicker) => flicker.step(rng),
        }
    }

    /// Price shown in the readouts. A flatline always reads zero, even mid-flicker.
    pub fn readout(&self, window: &SeriesWindow) -> f64 {
        match self {
            AdvancePolicy::Normal(walk) => window.latest().unwrap_or(walk.base),
            AdvancePolicy::Flatline(_) => 0.0,
        }
    }
}

/// Stateless entry point over [`AdvancePolicy`] keyed by instrument.
#[derive(Debug, Clone, Default)]
pub struct SeriesSimulator {
    config: SimulationConfig,
}

impl SeriesSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self, instrument: &Instrument) -> AdvancePolicy {
        AdvancePolicy::for_instrument(instrument, &self.config)
    }

    pub fn initialize<R: Rng + ?Sized>(&self, instrument: &Instrument, rng: &mut R) -> SeriesWindow {
        self.policy(instrument).seed(self.config.window_capacity, rng)
    }

    /// Append exactly one sample (evicting the oldest) and return it.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        window: &mut SeriesWindow,
        instrument: &Instrument,
        rng: &mut R,
    ) -> f64 {
        let sample = self.policy(instrument).next_sample(window.latest(), rng);
        window.push(sample);
        log_trace!(
            LogComponent::Simulation("Simulator"),
            "{} -> {:.8} ({} samples)",
            instrument.symbol,
            sample,
            window.len()
        );
        sample
    }

    /// Price shown for `instrument` given its window.
    pub fn readout(&self, instrument: &Instrument, window: &SeriesWindow) -> f64 {
        self.policy(instrument).readout(window)
    }
}
