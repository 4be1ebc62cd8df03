use std::cell::Cell;
use std::rc::Rc;

use gloo::utils::format::JsValueSerdeExt;
use leptos::html::Canvas;
use leptos::*;
use web_sys::MouseEvent;

use crate::{
    domain::{config::FinderConfig, logging::LogComponent},
    event_utils::{EventOptions, window_event_listener_with_options},
    global_state::{
        depth_text, drag_offset, finder_visible, publish_readouts, speed_text, status_text,
        window_left, window_top,
    },
    infrastructure::{
        nui::{HostMessage, NuiBridge, NuiCallback},
        rendering::{CanvasRenderer, SharedRenderer, start_render_loop},
    },
    log_debug, log_error, log_info,
};

/// Route one decoded host message to the renderer and the view.
pub fn handle_host_message(renderer: &SharedRenderer, message: HostMessage) {
    match message {
        HostMessage::Toggle { show } => {
            renderer.borrow_mut().toggle_visibility(show);
            finder_visible().set(show);
        }
        HostMessage::Update { in_boat, depth, speed } => {
            let readouts = renderer.borrow_mut().apply_telemetry(in_boat, depth, speed);
            publish_readouts(&readouts);
        }
    }
}

fn is_escape_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// 🎣 Fish finder overlay window
#[component]
pub fn FinderApp(config: FinderConfig, renderer: SharedRenderer, bridge: NuiBridge) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let loop_started = Rc::new(Cell::new(false));

    // Start the frame loop once the canvas is mounted
    {
        let renderer = renderer.clone();
        let (width, height) = (config.canvas_width, config.canvas_height);
        create_effect(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if loop_started.replace(true) {
                return;
            }
            let started = CanvasRenderer::attach(&canvas, width, height)
                .and_then(|presenter| start_render_loop(renderer.clone(), presenter));
            match started {
                Ok(()) => {
                    log_info!(LogComponent::Presentation("FinderApp"), "📡 Sonar loop running");
                }
                Err(e) => {
                    log_error!(LogComponent::Presentation("FinderApp"), "❌ Sonar loop failed: {}", e);
                }
            }
        });
    }

    // Host messages
    let message_listener = {
        let renderer = renderer.clone();
        window_event_listener_with_options(
            ev::message,
            &EventOptions::default(),
            move |event| {
                let Ok(payload) = event.data().into_serde::<serde_json::Value>() else {
                    return;
                };
                match HostMessage::decode(&payload) {
                    Some(message) => handle_host_message(&renderer, message),
                    None => {
                        log_debug!(
                            LogComponent::Presentation("FinderApp"),
                            "ignoring message {}",
                            payload
                        );
                    }
                }
            },
        )
    };

    // Escape drops focus on the host side but keeps the window open
    let key_listener = {
        let bridge = bridge.clone();
        window_event_listener_with_options(
            ev::keydown,
            &EventOptions::active(),
            move |event| {
                if is_escape_key(&event.key()) {
                    event.prevent_default();
                    bridge.post(NuiCallback::Escape);
                }
            },
        )
    };

    // Dragging by the header
    let move_listener = window_event_listener_with_options(
        ev::mousemove,
        &EventOptions::default(),
        move |event| {
            if let Some((dx, dy)) = drag_offset().get_untracked() {
                window_left().set(f64::from(event.client_x()) - dx);
                window_top().set(f64::from(event.client_y()) - dy);
            }
        },
    );
    let up_listener = window_event_listener_with_options(
        ev::mouseup,
        &EventOptions::default(),
        move |_| drag_offset().set(None),
    );

    on_cleanup(move || {
        message_listener.remove();
        key_listener.remove();
        move_listener.remove();
        up_listener.remove();
    });

    let start_drag = move |event: MouseEvent| {
        drag_offset().set(Some((
            f64::from(event.client_x()) - window_left().get_untracked(),
            f64::from(event.client_y()) - window_top().get_untracked(),
        )));
    };

    let close = move |_: MouseEvent| bridge.post(NuiCallback::Close);

    view! {
        <style>
            {r#"
            #finder-wrapper {
                position: absolute;
                font-family: 'Courier New', monospace;
                background: rgba(8, 14, 22, 0.92);
                border: 1px solid #2b4a5e;
                border-radius: 8px;
                color: #d8f3ff;
                user-select: none;
                box-shadow: 0 4px 18px rgba(0, 0, 0, 0.6);
            }

            #finder-header {
                display: flex;
                justify-content: space-between;
                align-items: center;
                padding: 6px 10px;
                cursor: move;
                background: #13263a;
                border-radius: 8px 8px 0 0;
                font-weight: 700;
                letter-spacing: 1px;
            }

            #close-btn {
                background: none;
                border: none;
                color: #ff6b6b;
                font-size: 16px;
                cursor: pointer;
            }

            .readouts {
                display: flex;
                gap: 18px;
                padding: 6px 10px;
            }

            .readout-value {
                font-size: 20px;
                color: #5effff;
            }

            .readout-label {
                font-size: 10px;
                color: #8aa4b8;
            }

            #status-text {
                padding: 0 10px 6px;
                font-size: 11px;
                color: #ffe66d;
            }

            #sonar-canvas {
                display: block;
                margin: 0 10px 10px;
                background: black;
                image-rendering: pixelated;
            }
            "#}
        </style>
        <div
            id="finder-wrapper"
            style:display=move || if finder_visible().get() { "block" } else { "none" }
            style:left=move || format!("{}px", window_left().get())
            style:top=move || format!("{}px", window_top().get())
        >
            <div id="finder-header" on:mousedown=start_drag>
                <span>"FISH FINDER"</span>
                <button id="close-btn" on:click=close>"✕"</button>
            </div>
            <div class="readouts">
                <div>
                    <div class="readout-value" id="depth-value">{move || depth_text().get()}</div>
                    <div class="readout-label">"DEPTH (FT)"</div>
                </div>
                <div>
                    <div class="readout-value" id="speed-value">{move || speed_text().get()}</div>
                    <div class="readout-label">"SPEED"</div>
                </div>
            </div>
            <div id="status-text">{move || status_text().get()}</div>
            <canvas id="sonar-canvas" node_ref=canvas_ref />
        </div>
    }
}
