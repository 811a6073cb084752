use rand::SeedableRng;
use rand::rngs::StdRng;
use voxel_ticker::application::SimulationSession;
use voxel_ticker::domain::chart::Trend;
use voxel_ticker::domain::config::SimulationConfig;
use voxel_ticker::domain::errors::{AppError, ValidationError};
use voxel_ticker::domain::market_data::{InstrumentCatalog, InstrumentId, SeriesSimulator};

fn session(seed: u64) -> SimulationSession {
    SimulationSession::seeded(InstrumentCatalog::default_coins(), SimulationConfig::default(), seed)
        .expect("default config is valid")
}

#[test]
fn starts_on_first_catalog_entry() {
    let session = session(1);
    assert_eq!(session.instrument().id, InstrumentId::from("bitcoin"));
    assert_eq!(session.window().len(), 80);
    assert_eq!(session.tick_count(), 0);
    assert_eq!(session.generation(), 0);
}

#[test]
fn tick_appends_one_sample() {
    let mut session = session(2);
    let before = session.window().to_vec();
    let snapshot = session.tick();

    assert_eq!(snapshot.tick, 1);
    assert_eq!(snapshot.samples.len(), 80);
    assert_eq!(&snapshot.samples[..79], &before[1..]);
    assert_eq!(snapshot.display.current_price, snapshot.samples[79]);
    assert_eq!(snapshot.instrument.current_price.value(), snapshot.samples[79]);
}

#[test]
fn ticks_follow_simulator_advance() {
    let catalog = InstrumentCatalog::default_coins();
    let simulator = SeriesSimulator::new(SimulationConfig::default());
    let mut rng = StdRng::seed_from_u64(9);
    let mut window = simulator.initialize(catalog.first(), &mut rng);

    let mut session = session(9);
    assert_eq!(session.window(), &window);
    for _ in 0..20 {
        simulator.advance(&mut window, catalog.first(), &mut rng);
        assert_eq!(session.tick().samples, window.to_vec());
    }
}

#[test]
fn switch_replaces_series_wholesale() {
    let mut session = session(3);
    for _ in 0..25 {
        session.tick();
    }
    let snapshot = session.switch_instrument(&InstrumentId::from("ethereum")).expect("known id");

    assert_eq!(snapshot.instrument.id, InstrumentId::from("ethereum"));
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.samples.len(), 80);
    // Nothing from the bitcoin series survives: every sample is in ETH's seed band.
    assert!(snapshot.samples.iter().all(|s| (3_410.0..=3_550.0).contains(s)));
}

#[test]
fn flatline_reads_zero() {
    let mut session = session(4);
    session.switch_instrument(&InstrumentId::from("terra-classic")).expect("known id");
    for _ in 0..100 {
        let snapshot = session.tick();
        assert_eq!(snapshot.display.current_price, 0.0);
        assert_eq!(snapshot.display.formatted_price, "0.00");
        assert_eq!(snapshot.instrument.holdings_value(), 0.0);
    }
}

#[test]
fn flatline_change_follows_oldest_sample() {
    let mut session = session(4);
    session.switch_instrument(&InstrumentId::from("terra-classic")).expect("known id");
    let snapshot = (0..2_000)
        .map(|_| session.tick())
        .find(|snapshot| snapshot.samples[0] != 0.0)
        .expect("a flicker reaches the front of the window");

    let first = snapshot.samples[0];
    assert!(first == 0.01 || first == -0.01);
    assert_eq!(snapshot.display.current_price, 0.0);
    assert_eq!(snapshot.display.percent_change, -100.0);
    assert_eq!(snapshot.display.formatted_percent, "-100.00%");
    let expected = if first > 0.0 { Trend::Negative } else { Trend::Positive };
    assert_eq!(snapshot.display.trend, expected);
}

#[test]
fn unknown_instrument_leaves_session_untouched() {
    let mut session = session(5);
    let window = session.window().clone();
    let error = session.switch_instrument(&InstrumentId::from("nope")).unwrap_err();

    assert_eq!(error, AppError::Validation(ValidationError::UnknownInstrument("nope".to_string())));
    assert_eq!(session.generation(), 0);
    assert_eq!(session.instrument().id, InstrumentId::from("bitcoin"));
    assert_eq!(session.window(), &window);
}

#[test]
fn navigation_wraps_both_ways() {
    let mut session = session(6);
    let previous = session.select_previous().expect("wraps to the end");
    assert_eq!(previous.instrument.id, InstrumentId::from("terra-classic"));

    let next = session.select_next().expect("wraps to the start");
    assert_eq!(next.instrument.id, InstrumentId::from("bitcoin"));
    assert_eq!(session.generation(), 2);
}

#[test]
fn same_seed_same_series() {
    let mut a = session(7);
    let mut b = session(7);
    for _ in 0..10 {
        assert_eq!(a.tick().samples, b.tick().samples);
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimulationConfig { window_capacity: 0, ..SimulationConfig::default() };
    let result = SimulationSession::seeded(InstrumentCatalog::default_coins(), config, 8);
    assert!(matches!(result, Err(AppError::Configuration(_))));
}
