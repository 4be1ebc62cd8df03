//! Bridge to the host game: inbound NUI messages and outbound callbacks.

use gloo::net::http::Request;
use serde_json::Value;
use strum::AsRefStr;
use wasm_bindgen::{JsCast, JsValue};

use crate::domain::{
    errors::{FinderError, FinderResult},
    logging::LogComponent,
};
use crate::log_debug;

const CALLBACK_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const CALLBACK_BODY: &str = "{}";

/// Message pushed by the host into the overlay window.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    Toggle {
        show: bool,
    },
    Update {
        in_boat: bool,
        depth: Option<f64>,
        speed: Option<f64>,
    },
}

impl HostMessage {
    /// Decode a `postMessage` payload. Non-objects and unknown types yield `None`.
    ///
    /// Flags follow JS truthiness; numeric fields that are missing, non-numeric or
    /// non-finite become `None`.
    pub fn decode(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        match object.get("type").and_then(Value::as_str)? {
            "toggle" => Some(HostMessage::Toggle {
                show: truthy(object.get("show")),
            }),
            "update" => Some(HostMessage::Update {
                in_boat: truthy(object.get("inBoat")),
                depth: finite_number(object.get("depth")),
                speed: finite_number(object.get("speed")),
            }),
            _ => None,
        }
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value?.as_f64().filter(|f| f.is_finite())
}

/// Callbacks the overlay sends back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NuiCallback {
    /// The close button was clicked.
    Close,
    /// Escape was pressed while the overlay had focus.
    Escape,
}

/// Fire-and-forget poster for [`NuiCallback`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct NuiBridge {
    resource_name: String,
}

impl NuiBridge {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn callback_url(&self, callback: NuiCallback) -> String {
        format!("https://{}/{}", self.resource_name, callback.as_ref())
    }

    /// Post the callback in the background. Failures are logged and dropped.
    pub fn post(&self, callback: NuiCallback) {
        let url = self.callback_url(callback);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = post_empty_json(&url).await {
                log_debug!(
                    LogComponent::Infrastructure("NuiBridge"),
                    "📭 {} ignored: {}",
                    url,
                    e
                );
            }
        });
    }
}

async fn post_empty_json(url: &str) -> FinderResult<()> {
    Request::post(url)
        .header("Content-Type", CALLBACK_CONTENT_TYPE)
        .body(CALLBACK_BODY)
        .map_err(|e| FinderError::Bridge(e.to_string()))?
        .send()
        .await
        .map_err(|e| FinderError::Bridge(e.to_string()))?;
    Ok(())
}

/// Resource name reported by the host's `GetParentResourceName()`, if it exists.
pub fn host_resource_name() -> Option<String> {
    let global = js_sys::global();
    let function = js_sys::Reflect::get(&global, &JsValue::from_str("GetParentResourceName"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    function.call0(&global).ok()?.as_string()
}
