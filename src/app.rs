use std::cell::Cell;

use leptos::*;

use crate::{
    application::{
        coordinator::{DashboardCoordinator, install_global_coordinator, with_global_coordinator_mut},
        session::{DashboardSnapshot, SimulationSession},
    },
    domain::{
        chart::{AxisBounds, ChartState, DisplayVariant, SparklineScale},
        config::SimulationConfig,
        errors::DomainResult,
        logging::{LogComponent, LogEntry, LogLevel, Logger, get_logger},
        market_data::{InstrumentCatalog, InstrumentId, SeriesWindow},
    },
    global_state::{
        chart_mode_signal, display_variant_signal, is_ticking_signal, logs_paused_signal, logs_signal,
        push_log_line, snapshot_signal, status_signal,
    },
    infrastructure::{rendering::CanvasRenderer, services::ConsoleLogger},
};

pub const OVERLAY_CANVAS_ID: &str = "scene-canvas";
const OVERLAY_WIDTH: u32 = 720;
const OVERLAY_HEIGHT: u32 = 360;
const SPARKLINE_WIDTH: f64 = 720.0;
const SPARKLINE_HEIGHT: f64 = 140.0;
const AXIS_TICKS: usize = 4;

/// Bridge logger: browser console plus the debug-console signal.
pub struct LeptosLogger {
    console: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { console: ConsoleLogger::new(min_level) }
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        if !self.console.accepts(entry.level) {
            return;
        }
        push_log_line(entry.render());
        self.console.log(entry);
    }
}

/// Build the coordinator for `catalog` / `config`, wire it to the global
/// signals and the overlay canvas, and install it as the page coordinator.
pub fn launch_dashboard(catalog: InstrumentCatalog, config: SimulationConfig) -> DomainResult<()> {
    let session = SimulationSession::from_entropy(catalog, config)?;
    let renderer = CanvasRenderer::new(OVERLAY_CANVAS_ID, OVERLAY_WIDTH, OVERLAY_HEIGHT);
    let render_failed = Cell::new(false);

    let coordinator = DashboardCoordinator::new(session)
        .with_tick_listener(|snapshot: &DashboardSnapshot| {
            snapshot_signal().set(Some(snapshot.clone()));
        })
        .with_frame_renderer(move |_timestamp, animator, snapshot| {
            if let Err(error) = renderer.render_frame(snapshot, animator) {
                // One report per coordinator; a missing canvas would otherwise fire every frame.
                if !render_failed.replace(true) {
                    get_logger().warn(LogComponent::Presentation("Overlay"), &error.to_string());
                }
            }
        });

    install_global_coordinator(coordinator);
    is_ticking_signal().set(true);
    status_signal().set("Simulating".to_string());
    Ok(())
}

fn select_instrument(id: InstrumentId) {
    let result = with_global_coordinator_mut(|coordinator| coordinator.switch_instrument(&id));
    report_navigation(result);
}

fn step_instrument(forward: bool) {
    let result = with_global_coordinator_mut(|coordinator| {
        if forward { coordinator.select_next() } else { coordinator.select_previous() }
    });
    report_navigation(result);
}

fn report_navigation(result: Option<DomainResult<()>>) {
    match result {
        Some(Ok(())) => display_variant_signal().set(DisplayVariant::Standard),
        Some(Err(error)) => get_logger().error(LogComponent::Presentation("CoinSelector"), &error.to_string()),
        None => get_logger().warn(LogComponent::Presentation("CoinSelector"), "Dashboard is not running"),
    }
}

#[component]
pub fn App(catalog: InstrumentCatalog) -> impl IntoView {
    view! {
        <style>
            {r#"
            .voxel-dashboard {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: linear-gradient(160deg, #0b1020 0%, #1a2340 100%);
                min-height: 100vh;
                padding: 20px;
                color: #e2e8f0;
            }

            .header {
                display: flex;
                justify-content: space-between;
                align-items: center;
                background: rgba(255, 255, 255, 0.06);
                padding: 16px 24px;
                border-radius: 14px;
                border: 1px solid rgba(255, 255, 255, 0.12);
                margin-bottom: 16px;
            }

            .readouts { display: flex; gap: 32px; }
            .readout { text-align: right; }
            .readout-value { font-family: 'Courier New', monospace; font-size: 22px; font-weight: 700; }
            .readout-label { font-size: 11px; color: #94a3b8; margin-top: 4px; }
            .positive { color: #48bb78; }
            .negative { color: #f56565; }

            .coin-selector { display: flex; gap: 8px; margin-bottom: 16px; flex-wrap: wrap; }
            .coin-btn {
                background: rgba(255, 255, 255, 0.08);
                color: inherit;
                border: 1px solid transparent;
                padding: 6px 14px;
                border-radius: 999px;
                cursor: pointer;
            }
            .coin-btn.active { border-color: currentColor; }

            .chart-panel { display: flex; flex-direction: column; align-items: center; gap: 10px; }
            .scene { border-radius: 12px; border: 1px solid #2d3748; }
            .sparkline { width: 720px; height: 140px; }
            .sparkline-placeholder { width: 720px; height: 140px; display: flex; align-items: center; justify-content: center; color: #718096; }
            .axis-label { font-size: 10px; fill: #94a3b8; font-family: 'Courier New', monospace; }

            .debug-console {
                background: rgba(0, 0, 0, 0.7);
                border-radius: 10px;
                padding: 12px;
                margin-top: 16px;
                max-height: 240px;
                overflow-y: auto;
                border: 1px solid #2d3748;
            }
            .debug-header { display: flex; justify-content: space-between; color: #48bb78; font-weight: bold; margin-bottom: 8px; }
            .debug-btn { background: #2d3748; color: white; border: none; padding: 4px 10px; border-radius: 5px; cursor: pointer; margin-left: 5px; }
            .log-line { font-family: 'Courier New', monospace; font-size: 11px; color: #cbd5e0; }
            "#}
        </style>
        <div class="voxel-dashboard">
            <Header />
            <CoinSelector catalog=catalog />
            <ChartPanel />
            <DebugConsole />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let snapshot = snapshot_signal();
    let is_ticking = is_ticking_signal();
    let status = status_signal();

    let title = move || {
        snapshot.with(|snapshot| match snapshot {
            Some(s) => format!("{} · {}", s.instrument.name, s.instrument.symbol),
            None => "Voxel Ticker".to_string(),
        })
    };
    let price = move || {
        snapshot.with(|snapshot| {
            snapshot.as_ref().map(|s| format!("${}", s.display.formatted_price)).unwrap_or_else(|| "-".to_string())
        })
    };
    let change_class = move || {
        snapshot.with(|snapshot| match snapshot {
            Some(s) => format!("readout-value {}", s.display.trend.as_ref()),
            None => "readout-value".to_string(),
        })
    };
    let change = move || {
        snapshot.with(|snapshot| {
            snapshot
                .as_ref()
                .map(|s| format!("{} {}", s.display.trend, s.display.formatted_percent))
                .unwrap_or_else(|| "-".to_string())
        })
    };
    let portfolio = move || {
        snapshot.with(|snapshot| {
            snapshot
                .as_ref()
                .map(|s| format!("${:.2}", s.instrument.holdings_value()))
                .unwrap_or_else(|| "-".to_string())
        })
    };

    view! {
        <div class="header">
            <div>
                <h1>{title}</h1>
                <div class="readout-label">
                    {move || if is_ticking.get() { "● LIVE (simulated)" } else { "○ PAUSED" }}
                    " · "
                    {move || status.get()}
                </div>
            </div>
            <div class="readouts">
                <div class="readout">
                    <div class="readout-value">{price}</div>
                    <div class="readout-label">"Price"</div>
                </div>
                <div class="readout">
                    <div class=change_class>{change}</div>
                    <div class="readout-label">"Since window start"</div>
                </div>
                <div class="readout">
                    <div class="readout-value">{portfolio}</div>
                    <div class="readout-label">"Holdings"</div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CoinSelector(catalog: InstrumentCatalog) -> impl IntoView {
    let snapshot = snapshot_signal();
    let active = move || snapshot.with(|s| s.as_ref().map(|s| s.instrument.id.clone()));

    let buttons = catalog
        .iter()
        .map(|instrument| {
            let id = instrument.id.clone();
            let click_id = id.clone();
            let style = format!("color: {}", instrument.color.to_css());
            let class = move || {
                if active().as_ref() == Some(&id) { "coin-btn active" } else { "coin-btn" }
            };
            view! {
                <button class=class style=style on:click=move |_| select_instrument(click_id.clone())>
                    {instrument.symbol.to_string()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="coin-selector">
            <button class="coin-btn" on:click=move |_| step_instrument(false)>"◀"</button>
            {buttons}
            <button class="coin-btn" on:click=move |_| step_instrument(true)>"▶"</button>
        </div>
    }
}

#[component]
fn ChartPanel() -> impl IntoView {
    let chart_mode = chart_mode_signal();
    let display_variant = display_variant_signal();
    let snapshot = snapshot_signal();
    let has_exotic = move || snapshot.with(|s| s.as_ref().is_some_and(|s| s.instrument.exotic_variant));

    view! {
        <div class="chart-panel">
            <canvas
                id=OVERLAY_CANVAS_ID
                class="scene"
                width=OVERLAY_WIDTH.to_string()
                height=OVERLAY_HEIGHT.to_string()
            />
            <Sparkline />
            <div>
                <button class="debug-btn" on:click=move |_| chart_mode.update(|mode| *mode = mode.toggle())>
                    {move || format!("Mode: {}", chart_mode.get())}
                </button>
                <Show when=has_exotic>
                    <button
                        class="debug-btn"
                        on:click=move |_| display_variant.update(|variant| *variant = variant.toggle())
                    >
                        {move || format!("Style: {}", display_variant.get())}
                    </button>
                </Show>
            </div>
        </div>
    }
}

/// SVG area chart of the active window.
#[component]
fn Sparkline() -> impl IntoView {
    let snapshot = snapshot_signal();
    let chart_mode = chart_mode_signal();
    let display_variant = display_variant_signal();

    move || {
        let scale = SparklineScale::new(chart_mode.get());
        let exotic = display_variant.get() == DisplayVariant::Exotic;
        snapshot.with(|snapshot| {
            let Some(snapshot) = snapshot else {
                return view! { <div class="sparkline-placeholder">"Loading chart..."</div> }.into_view();
            };
            let window = SeriesWindow::from_samples(snapshot.samples.len(), snapshot.samples.iter().copied());
            let (ChartState::Ready, Some(paths), Some(bounds)) = (
                scale.state(&window),
                scale.paths(&window, SPARKLINE_WIDTH, SPARKLINE_HEIGHT),
                scale.bounds_for(&window),
            ) else {
                return view! { <div class="sparkline-placeholder">"Loading chart..."</div> }.into_view();
            };

            let color = snapshot.instrument.color;
            let (stroke, fill, dash) = if exotic {
                (color.to_css_alpha(0.9), color.to_css_alpha(0.35), "6 3")
            } else {
                (color.to_css(), color.to_css_alpha(0.15), "none")
            };
            let axes = if scale.mode.shows_axes() { axis_labels(&scale, &bounds) } else { ().into_view() };

            view! {
                <svg class="sparkline" viewBox=format!("0 0 {} {}", SPARKLINE_WIDTH, SPARKLINE_HEIGHT) preserveAspectRatio="none">
                    <path d=paths.area fill=fill stroke="none" />
                    <path d=paths.line fill="none" stroke=stroke stroke-width="2" stroke-dasharray=dash />
                    {axes}
                </svg>
            }
            .into_view()
        })
    }
}

fn axis_labels(scale: &SparklineScale, bounds: &AxisBounds) -> View {
    scale
        .axis_ticks(bounds, AXIS_TICKS)
        .into_iter()
        .map(|value| {
            let y = scale.y_for(value, bounds, SPARKLINE_HEIGHT).clamp(10.0, SPARKLINE_HEIGHT - 2.0);
            let label = if value.abs() < 1.0 { format!("{:.6}", value) } else { format!("{:.2}", value) };
            view! { <text class="axis-label" x="4" y=y.to_string()>{label}</text> }
        })
        .collect_view()
}

#[component]
fn DebugConsole() -> impl IntoView {
    let logs = logs_signal();
    let is_paused = logs_paused_signal();

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Debug Console"</span>
                <div>
                    <button
                        class="debug-btn"
                        on:click=move |_| {
                            is_paused.update(|paused| *paused = !*paused);
                            let message = if is_paused.get_untracked() { "Logging paused" } else { "Logging resumed" };
                            get_logger().info(LogComponent::Presentation("DebugConsole"), message);
                        }
                    >
                        {move || if is_paused.get() { "Resume" } else { "Pause" }}
                    </button>
                    <button class="debug-btn" on:click=move |_| logs.set(Vec::new())>"Clear"</button>
                </div>
            </div>
            <For
                each=move || logs.get().into_iter().enumerate()
                key=|(index, line)| (*index, line.clone())
                children=move |(_, line)| view! { <div class="log-line">{line}</div> }
            />
        </div>
    }
}
