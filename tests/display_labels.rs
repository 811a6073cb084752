use serde::Serialize;
use voxel_ticker::domain::chart::{ChartProjector, Trend};
use voxel_ticker::domain::config::SimulationConfig;
use voxel_ticker::domain::market_data::{AdvancePolicy, InstrumentCatalog, InstrumentId, SeriesWindow};

#[derive(Serialize)]
struct Label {
    symbol: String,
    price: String,
    change: String,
    trend: Trend,
}

fn label(id: &str, samples: &[f64]) -> Label {
    let catalog = InstrumentCatalog::default_coins();
    let instrument = catalog.get(&InstrumentId::from(id)).expect("known id");
    let window = SeriesWindow::from_samples(80, samples.iter().copied());
    let current = AdvancePolicy::for_instrument(instrument, &SimulationConfig::default()).readout(&window);
    let display = ChartProjector::new().project(&window, instrument, current);
    Label {
        symbol: instrument.symbol.to_string(),
        price: display.formatted_price,
        change: display.formatted_percent,
        trend: display.trend,
    }
}

#[test]
fn header_labels() {
    let labels = vec![
        label("bitcoin", &[60_000.0, 63_000.0, 66_000.0]),
        label("dogecoin", &[0.2, 0.18, 0.15]),
        label("terra-classic", &[0.0, 0.01, 0.0]),
        label("cardano", &[0.5, 0.5]),
    ];

    insta::assert_json_snapshot!(labels, @r###"
    [
      {
        "symbol": "BTC",
        "price": "66000.00",
        "change": "+10.00%",
        "trend": "positive"
      },
      {
        "symbol": "DOGE",
        "price": "0.15000000",
        "change": "-25.00%",
        "trend": "negative"
      },
      {
        "symbol": "LUNC",
        "price": "0.00",
        "change": "0.00%",
        "trend": "positive"
      },
      {
        "symbol": "ADA",
        "price": "0.50000000",
        "change": "0.00%",
        "trend": "positive"
      }
    ]
    "###);
}
