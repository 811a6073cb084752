use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;
use voxel_ticker::domain::config::SimulationConfig;
use voxel_ticker::domain::market_data::{
    AdvancePolicy, Instrument, SeriesSimulator, SeriesWindow, VolatilityClass,
};

const EPSILON: f64 = 1e-9;

fn coin(base: f64) -> Instrument {
    Instrument::new("test-coin", "TST", "Test Coin", 0x336699, base, VolatilityClass::Normal)
}

fn flatline() -> Instrument {
    Instrument::new("flat-coin", "FLT", "Flat Coin", 0xFF0000, 0.0, VolatilityClass::Flatline)
}

#[test]
fn window_length_is_capacity_after_initialize_and_advance() {
    let simulator = SeriesSimulator::default();
    let mut rng = StdRng::seed_from_u64(1);
    for instrument in [coin(100.0), coin(0.25), flatline()] {
        let mut window = simulator.initialize(&instrument, &mut rng);
        assert_eq!(window.len(), 80);
        for _ in 0..200 {
            simulator.advance(&mut window, &instrument, &mut rng);
            assert_eq!(window.len(), 80);
        }
    }
}

#[test]
fn seeded_samples_stay_within_two_percent() {
    let simulator = SeriesSimulator::default();
    let mut rng = StdRng::seed_from_u64(7);
    let window = simulator.initialize(&coin(1_000.0), &mut rng);
    assert!(window.iter().all(|s| (980.0 - EPSILON..=1_020.0 + EPSILON).contains(&s)));
}

#[test]
fn flatline_seeds_zeros_and_flickers_rarely() {
    let simulator = SeriesSimulator::default();
    let instrument = flatline();
    let mut rng = StdRng::seed_from_u64(42);
    let mut window = simulator.initialize(&instrument, &mut rng);
    assert!(window.iter().all(|s| s == 0.0));

    let ticks = 20_000;
    let mut flickers = 0;
    for _ in 0..ticks {
        let sample = simulator.advance(&mut window, &instrument, &mut rng);
        if sample != 0.0 {
            assert!(sample == 0.01 || sample == -0.01, "unexpected flicker {}", sample);
            flickers += 1;
        }
    }
    let rate = flickers as f64 / ticks as f64;
    assert!((0.04..=0.06).contains(&rate), "flicker rate {}", rate);
}

#[test]
fn flatline_readout_is_always_zero() {
    let config = SimulationConfig::default();
    let policy = AdvancePolicy::for_instrument(&flatline(), &config);
    let window = SeriesWindow::from_samples(3, [0.0, 0.01, -0.01]);
    assert_eq!(policy.readout(&window), 0.0);
}

#[test]
fn thousand_seeded_ticks_stay_in_band() {
    let simulator = SeriesSimulator::default();
    let instrument = coin(100.0);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut window = simulator.initialize(&instrument, &mut rng);

    for _ in 0..1_000 {
        let sample = simulator.advance(&mut window, &instrument, &mut rng);
        assert!((80.0 - EPSILON..=120.0 + EPSILON).contains(&sample), "sample {}", sample);
        assert_eq!(window.len(), 80);
    }
    assert!(window.iter().all(|s| (80.0 - EPSILON..=120.0 + EPSILON).contains(&s)));
}

#[test]
fn out_of_band_step_resets_one_volatility_inside() {
    let config = SimulationConfig::default();
    let policy = AdvancePolicy::for_instrument(&coin(100.0), &config);
    let mut rng = StdRng::seed_from_u64(3);

    // Far below the floor: any step lands below, so the reset applies.
    assert!((policy.next_sample(Some(10.0), &mut rng) - 80.5).abs() < EPSILON);
    // Far above the ceiling.
    assert!((policy.next_sample(Some(500.0), &mut rng) - 119.5).abs() < EPSILON);
}

#[test]
fn empty_window_steps_from_base() {
    let config = SimulationConfig::default();
    let policy = AdvancePolicy::for_instrument(&coin(100.0), &config);
    let mut rng = StdRng::seed_from_u64(9);
    let sample = policy.next_sample(None, &mut rng);
    assert!((99.5 - EPSILON..=100.5 + EPSILON).contains(&sample));
}

#[quickcheck]
fn normal_walk_never_leaves_band(base: u32, seed: u64, start: f64) -> TestResult {
    if !start.is_finite() {
        return TestResult::discard();
    }
    let base = (base % 1_000_000) as f64 / 100.0 + 0.01;
    let config = SimulationConfig::default();
    let policy = AdvancePolicy::for_instrument(&coin(base), &config);
    let mut rng = StdRng::seed_from_u64(seed);

    let tolerance = base * 1e-9;
    let mut last = Some(start.clamp(-1e12, 1e12));
    for _ in 0..50 {
        let sample = policy.next_sample(last, &mut rng);
        if sample < base * 0.8 - tolerance || sample > base * 1.2 + tolerance {
            return TestResult::failed();
        }
        last = Some(sample);
    }
    TestResult::passed()
}
