use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::FinderApp;
use crate::domain::config::FinderConfig;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::sonar::SonarRenderer;
use crate::infrastructure::nui::{NuiBridge, host_resource_name};

pub mod app;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod macros;

/// Body attribute that may carry a JSON [`FinderConfig`].
const CONFIG_ATTRIBUTE: &str = "data-finder-config";

/// Initialize logging, build the sonar and mount the overlay
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    let config = load_config();
    let bridge = NuiBridge::new(host_resource_name().unwrap_or_else(|| config.resource_name.clone()));
    let renderer = Rc::new(RefCell::new(SonarRenderer::seeded(&config, entropy_seed())));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!(
            "🚀 Fish finder ready ({}x{}, resource '{}')",
            config.canvas_width,
            config.canvas_height,
            bridge.resource_name()
        ),
    );

    mount_to_body(move || {
        view! {
            <FinderApp config=config.clone() renderer=renderer.clone() bridge=bridge.clone() />
        }
    });
}

/// Config from the page, or defaults when absent or invalid.
fn load_config() -> FinderConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));

    let Some(raw) = raw else {
        return FinderConfig::default();
    };

    FinderConfig::from_json(&raw).unwrap_or_else(|e| {
        get_logger().warn(
            LogComponent::Presentation("Initialize"),
            &format!("⚠️ {} rejected, using defaults: {}", CONFIG_ATTRIBUTE, e),
        );
        FinderConfig::default()
    })
}

fn entropy_seed() -> u64 {
    let clock = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    clock ^ (noise << 32)
}
