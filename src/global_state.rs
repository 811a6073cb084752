use leptos::*;
use once_cell::sync::OnceCell;

use crate::application::session::DashboardSnapshot;
use crate::domain::chart::{ChartMode, DisplayVariant};
use crate::global_signals;

/// Upper bound on lines kept by the debug console.
pub const MAX_LOG_LINES: usize = 100;

pub struct Globals {
    pub snapshot: RwSignal<Option<DashboardSnapshot>>,
    pub chart_mode: RwSignal<ChartMode>,
    pub display_variant: RwSignal<DisplayVariant>,
    pub is_ticking: RwSignal<bool>,
    pub status: RwSignal<String>,
    pub logs: RwSignal<Vec<String>>,
    pub logs_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        snapshot: create_rw_signal(None),
        chart_mode: create_rw_signal(ChartMode::default()),
        display_variant: create_rw_signal(DisplayVariant::default()),
        is_ticking: create_rw_signal(false),
        status: create_rw_signal("Starting...".to_string()),
        logs: create_rw_signal(Vec::new()),
        logs_paused: create_rw_signal(false),
    })
}

global_signals! {
    /// Latest snapshot published by the tick task.
    pub snapshot_signal => snapshot: Option<DashboardSnapshot>,
    pub chart_mode_signal => chart_mode: ChartMode,
    pub display_variant_signal => display_variant: DisplayVariant,
    pub is_ticking_signal => is_ticking: bool,
    pub status_signal => status: String,
    pub logs_signal => logs: Vec<String>,
    pub logs_paused_signal => logs_paused: bool,
}

/// Append a console line unless paused, keeping at most [`MAX_LOG_LINES`].
pub fn push_log_line(line: String) {
    if logs_paused_signal().get_untracked() {
        return;
    }
    logs_signal().update(|lines| {
        lines.push(line);
        let overflow = lines.len().saturating_sub(MAX_LOG_LINES);
        lines.drain(..overflow);
    });
}
