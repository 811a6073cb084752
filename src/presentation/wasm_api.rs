//! JavaScript bridge. Only forwards to the coordinator.

use leptos::SignalSet;
use wasm_bindgen::prelude::*;

use crate::app::launch_dashboard;
use crate::application::coordinator::{with_global_coordinator, with_global_coordinator_mut};
use crate::domain::{
    config::SimulationConfig,
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::{InstrumentCatalog, InstrumentId},
};
use crate::global_state::is_ticking_signal;

fn to_js(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn not_running() -> JsValue {
    JsValue::from_str("dashboard is not running")
}

/// Restart the dashboard with a JSON `SimulationConfig` (any subset of knobs).
#[wasm_bindgen(js_name = startDashboardWithConfig)]
pub fn start_dashboard_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = SimulationConfig::from_json(config_json).map_err(to_js)?;
    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("Restarting with window={} tick={}ms", config.window_capacity, config.tick_interval_ms),
    );
    launch_dashboard(InstrumentCatalog::default_coins(), config).map_err(to_js)
}

#[wasm_bindgen(js_name = selectInstrument)]
pub fn select_instrument(id: &str) -> Result<(), JsValue> {
    with_global_coordinator_mut(|coordinator| coordinator.switch_instrument(&InstrumentId::from(id)))
        .ok_or_else(not_running)?
        .map_err(to_js)
}

#[wasm_bindgen(js_name = nextInstrument)]
pub fn next_instrument() -> Result<(), JsValue> {
    with_global_coordinator_mut(|coordinator| coordinator.select_next())
        .ok_or_else(not_running)?
        .map_err(to_js)
}

#[wasm_bindgen(js_name = previousInstrument)]
pub fn previous_instrument() -> Result<(), JsValue> {
    with_global_coordinator_mut(|coordinator| coordinator.select_previous())
        .ok_or_else(not_running)?
        .map_err(to_js)
}

/// Latest `DashboardSnapshot` as JSON, or `null` before the first publish.
#[wasm_bindgen(js_name = currentDisplayJson)]
pub fn current_display_json() -> Result<JsValue, JsValue> {
    let snapshot = with_global_coordinator(|coordinator| coordinator.latest_snapshot()).flatten();
    match snapshot {
        Some(snapshot) => serde_json::to_string(&snapshot)
            .map(|json| JsValue::from_str(&json))
            .map_err(|e| to_js(e.into())),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = pauseDashboard)]
pub fn pause_dashboard() -> Result<(), JsValue> {
    with_global_coordinator_mut(|coordinator| coordinator.stop()).ok_or_else(not_running)?;
    is_ticking_signal().set(false);
    Ok(())
}

#[wasm_bindgen(js_name = resumeDashboard)]
pub fn resume_dashboard() -> Result<(), JsValue> {
    with_global_coordinator_mut(|coordinator| coordinator.start()).ok_or_else(not_running)?;
    is_ticking_signal().set(true);
    Ok(())
}
