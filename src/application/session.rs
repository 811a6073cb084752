use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::domain::{
    chart::{ChartProjector, DerivedDisplay},
    config::SimulationConfig,
    errors::DomainResult,
    logging::{LogComponent, get_logger},
    market_data::{Instrument, InstrumentCatalog, InstrumentId, Price, SeriesSimulator, SeriesWindow},
};

/// Read-only copy of the session state handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub instrument: Instrument,
    pub samples: Vec<f64>,
    pub display: DerivedDisplay,
    /// Ticks since the instrument was selected.
    pub tick: u64,
    /// Bumped on every instrument switch.
    pub generation: u64,
}

/// One active instrument and its window. Switching replaces both wholesale.
pub struct SimulationSession<R: Rng = StdRng> {
    catalog: InstrumentCatalog,
    simulator: SeriesSimulator,
    projector: ChartProjector,
    instrument: Instrument,
    window: SeriesWindow,
    rng: R,
    tick: u64,
    generation: u64,
}

impl SimulationSession<StdRng> {
    /// Session seeded from OS / browser entropy.
    pub fn from_entropy(catalog: InstrumentCatalog, config: SimulationConfig) -> DomainResult<Self> {
        Self::new(catalog, config, StdRng::from_entropy())
    }

    /// Reproducible session, mainly for tests.
    pub fn seeded(catalog: InstrumentCatalog, config: SimulationConfig, seed: u64) -> DomainResult<Self> {
        Self::new(catalog, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationSession<R> {
    /// Validates the configuration and starts on the first catalog entry.
    pub fn new(catalog: InstrumentCatalog, config: SimulationConfig, mut rng: R) -> DomainResult<Self> {
        config.validate()?;
        let instrument = catalog.first().clone();
        let simulator = SeriesSimulator::new(config);
        let window = simulator.initialize(&instrument, &mut rng);

        get_logger().info(
            LogComponent::Application("Session"),
            &format!(
                "Session started on {} ({} samples, {}ms tick)",
                instrument.symbol,
                window.len(),
                simulator.config().tick_interval_ms
            ),
        );

        Ok(Self {
            catalog,
            simulator,
            projector: ChartProjector::new(),
            instrument,
            window,
            rng,
            tick: 0,
            generation: 0,
        })
    }

    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        self.simulator.config()
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn window(&self) -> &SeriesWindow {
        &self.window
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_price(&self) -> f64 {
        self.simulator.readout(&self.instrument, &self.window)
    }

    pub fn display(&self) -> DerivedDisplay {
        self.projector.project(&self.window, &self.instrument, self.current_price())
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let mut instrument = self.instrument.clone();
        instrument.current_price = Price::from(self.current_price());
        DashboardSnapshot {
            instrument,
            samples: self.window.to_vec(),
            display: self.display(),
            tick: self.tick,
            generation: self.generation,
        }
    }

    /// Advance one sample and recompute the readouts.
    pub fn tick(&mut self) -> DashboardSnapshot {
        self.simulator.advance(&mut self.window, &self.instrument, &mut self.rng);
        self.tick += 1;
        self.snapshot()
    }

    /// Tear down the current series and start fresh on `id`.
    pub fn switch_instrument(&mut self, id: &InstrumentId) -> DomainResult<DashboardSnapshot> {
        let instrument = self.catalog.require(id)?.clone();
        self.window = self.simulator.initialize(&instrument, &mut self.rng);
        self.tick = 0;
        self.generation += 1;

        get_logger().info(
            LogComponent::Application("Session"),
            &format!(
                "Switched {} -> {} (generation {})",
                self.instrument.symbol, instrument.symbol, self.generation
            ),
        );
        self.instrument = instrument;
        Ok(self.snapshot())
    }

    pub fn select_next(&mut self) -> DomainResult<DashboardSnapshot> {
        let next = self.catalog.next(&self.instrument.id)?.id.clone();
        self.switch_instrument(&next)
    }

    pub fn select_previous(&mut self) -> DomainResult<DashboardSnapshot> {
        let previous = self.catalog.previous(&self.instrument.id)?.id.clone();
        self.switch_instrument(&previous)
    }
}
