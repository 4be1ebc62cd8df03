use leptos::*;
use once_cell::sync::OnceCell;

use crate::domain::sonar::{PLACEHOLDER, Readouts, SignalStatus};
use crate::global_signals;

/// Top-left corner of the finder window before the player drags it.
const INITIAL_WINDOW_POS: (f64, f64) = (40.0, 40.0);

/// Reactive view state of the overlay (one UI session per page).
pub struct Globals {
    pub visible: RwSignal<bool>,
    pub depth_text: RwSignal<String>,
    pub speed_text: RwSignal<String>,
    pub status_text: RwSignal<String>,
    pub window_left: RwSignal<f64>,
    pub window_top: RwSignal<f64>,
    /// Grab offset inside the header while a drag is active.
    pub drag_offset: RwSignal<Option<(f64, f64)>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        visible: create_rw_signal(false),
        depth_text: create_rw_signal(PLACEHOLDER.to_string()),
        speed_text: create_rw_signal(PLACEHOLDER.to_string()),
        status_text: create_rw_signal(SignalStatus::NoSignal.to_string()),
        window_left: create_rw_signal(INITIAL_WINDOW_POS.0),
        window_top: create_rw_signal(INITIAL_WINDOW_POS.1),
        drag_offset: create_rw_signal(None),
    })
}

global_signals! {
    pub finder_visible => visible: bool,
    pub depth_text => depth_text: String,
    pub speed_text => speed_text: String,
    pub status_text => status_text: String,
    pub window_left => window_left: f64,
    pub window_top => window_top: f64,
    pub drag_offset => drag_offset: Option<(f64, f64)>,
}

/// Push renderer readouts into the view.
pub fn publish_readouts(readouts: &Readouts) {
    depth_text().set(readouts.depth.clone());
    speed_text().set(readouts.speed.clone());
    status_text().set(readouts.status.to_string());
}
