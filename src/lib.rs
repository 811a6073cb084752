use leptos::*;
use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;

/// Page entry point: logging, UI mount, then the simulation.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let min_level = if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info };
    domain::logging::init_logger(Box::new(app::LeptosLogger::new(min_level)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    let catalog = domain::market_data::InstrumentCatalog::default_coins();
    let ui_catalog = catalog.clone();
    mount_to_body(move || view! { <app::App catalog=ui_catalog.clone() /> });

    match app::launch_dashboard(catalog, domain::config::SimulationConfig::default()) {
        Ok(()) => get_logger().info(LogComponent::Presentation("Initialize"), "Dashboard initialized"),
        Err(error) => {
            get_logger().error(LogComponent::Presentation("Initialize"), &error.to_string());
            global_state::status_signal().set(format!("Failed to start: {}", error));
        }
    }
}
