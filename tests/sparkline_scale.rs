use voxel_ticker::domain::chart::{AxisBounds, ChartMode, ChartState, SparklineScale};
use voxel_ticker::domain::market_data::SeriesWindow;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn compact_and_detailed_padding() {
    let compact = SparklineScale::new(ChartMode::Compact).bounds(100.0, 200.0);
    assert!(close(compact.min, 99.0));
    assert!(close(compact.max, 202.0));

    let detailed = SparklineScale::new(ChartMode::Detailed).bounds(100.0, 200.0);
    assert!(close(detailed.min, 99.9));
    assert!(close(detailed.max, 200.2));
}

#[test]
fn empty_window_is_loading() {
    let scale = SparklineScale::default();
    let window = SeriesWindow::new(80);
    assert_eq!(scale.state(&window), ChartState::Loading);
    assert!(scale.paths(&window, 100.0, 50.0).is_none());
    assert_eq!(scale.state(&SeriesWindow::from_samples(80, [1.0])), ChartState::Ready);
}

#[test]
fn collapsed_bounds_centre_vertically() {
    let scale = SparklineScale::new(ChartMode::Detailed);
    let flat = scale.bounds(0.0, 0.0);
    assert_eq!(scale.y_for(0.0, &flat, 140.0), 70.0);
}

#[test]
fn y_grows_downwards() {
    let scale = SparklineScale::default();
    let bounds = AxisBounds { min: 0.0, max: 10.0 };
    assert_eq!(scale.y_for(10.0, &bounds, 100.0), 0.0);
    assert_eq!(scale.y_for(0.0, &bounds, 100.0), 100.0);
}

#[test]
fn axis_ticks_run_top_to_bottom() {
    let scale = SparklineScale::new(ChartMode::Detailed);
    let bounds = AxisBounds { min: 0.0, max: 30.0 };
    assert_eq!(scale.axis_ticks(&bounds, 4), vec![30.0, 20.0, 10.0, 0.0]);
    assert!(scale.axis_ticks(&bounds, 0).is_empty());
    assert_eq!(scale.axis_ticks(&bounds, 1), vec![15.0]);
}

#[test]
fn paths_close_the_area() {
    let scale = SparklineScale::new(ChartMode::Compact);
    let window = SeriesWindow::from_samples(80, [1.0, 2.0, 3.0]);
    let paths = scale.paths(&window, 100.0, 50.0).expect("window has samples");

    assert!(paths.line.starts_with("M0.00,"));
    assert_eq!(paths.line.matches('L').count(), 2);
    assert!(paths.area.starts_with(&paths.line));
    assert!(paths.area.ends_with(" L100.00,50.00 L0.00,50.00 Z"));
}

#[test]
fn single_sample_sits_mid_width() {
    let scale = SparklineScale::default();
    let window = SeriesWindow::from_samples(80, [5.0]);
    let paths = scale.paths(&window, 100.0, 50.0).expect("window has samples");
    assert!(paths.line.starts_with("M50.00,"));
}
