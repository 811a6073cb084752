use voxel_ticker::domain::config::SimulationConfig;
use voxel_ticker::domain::errors::{AppError, ConfigurationError, ValidationError};
use voxel_ticker::domain::market_data::{
    Instrument, InstrumentCatalog, InstrumentId, VolatilityClass,
};

#[test]
fn default_catalog_has_one_flatline_and_one_exotic() {
    let catalog = InstrumentCatalog::default_coins();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.iter().filter(|i| i.is_flatline()).count(), 1);
    assert_eq!(catalog.iter().filter(|i| i.exotic_variant).count(), 1);
    assert!(catalog.get(&InstrumentId::from("dogecoin")).is_some_and(|i| i.exotic_variant));
}

#[test]
fn catalog_rejects_duplicates_and_empty() {
    let btc = Instrument::new("bitcoin", "BTC", "Bitcoin", 0xF7931A, 1.0, VolatilityClass::Normal);
    assert_eq!(
        InstrumentCatalog::new(vec![btc.clone(), btc]),
        Err(AppError::Validation(ValidationError::DuplicateInstrument("bitcoin".to_string())))
    );
    assert_eq!(
        InstrumentCatalog::new(Vec::new()),
        Err(AppError::Validation(ValidationError::EmptyCatalog))
    );
}

#[test]
fn catalog_rejects_negative_base_price() {
    let bad = Instrument::new("bad", "BAD", "Bad", 0x000000, -1.0, VolatilityClass::Normal);
    assert!(matches!(
        InstrumentCatalog::new(vec![bad]),
        Err(AppError::Validation(ValidationError::Negative { field: "base_price", .. }))
    ));
}

#[test]
fn catalog_from_json() {
    let json = r##"[
        {"id": "alpha", "symbol": "alp", "name": "Alpha", "color": "#112233", "base_price": 2.5},
        {"id": "zero", "symbol": "ZRO", "name": "Zero", "color": "#ff0000", "base_price": 0.0, "volatility": "flatline"}
    ]"##;
    let catalog = InstrumentCatalog::from_json(json).expect("valid catalog");
    let alpha = catalog.first();

    assert_eq!(alpha.symbol.value(), "ALP");
    assert_eq!(alpha.color.hex(), 0x112233);
    assert_eq!(alpha.volatility, VolatilityClass::Normal);
    assert_eq!(alpha.balance, 0.0);
    assert_eq!(catalog.next(&alpha.id).map(|i| i.volatility), Ok(VolatilityClass::Flatline));
}

#[test]
fn catalog_json_rejects_bad_color() {
    let json = r##"[{"id": "a", "symbol": "A", "name": "A", "color": "#12", "base_price": 1.0}]"##;
    assert!(matches!(
        InstrumentCatalog::from_json(json),
        Err(AppError::Configuration(ConfigurationError::Parse(_)))
    ));
}

#[test]
fn config_json_overrides_subset() {
    let config = SimulationConfig::from_json(r#"{"window_capacity": 40, "tick_interval_ms": 250}"#)
        .expect("valid overrides");
    assert_eq!(config.window_capacity, 40);
    assert_eq!(config.tick_interval().as_millis(), 250);
    assert_eq!(config.band_low, 0.8);
    assert_eq!(config.flatline_quiet_probability, 0.95);
}

#[test]
fn config_rejects_out_of_range_values() {
    for json in [
        r#"{"tick_interval_ms": 0}"#,
        r#"{"band_low": 1.3}"#,
        r#"{"flatline_quiet_probability": 1.5}"#,
        r#"{"seed_variance": -0.1}"#,
        r#"{"per_tick_volatility": 0.5}"#,
        r#"{"seed_variance": 0.3}"#,
    ] {
        assert!(
            matches!(SimulationConfig::from_json(json), Err(AppError::Configuration(ConfigurationError::InvalidParameter { .. }))),
            "accepted {}",
            json
        );
    }
}
