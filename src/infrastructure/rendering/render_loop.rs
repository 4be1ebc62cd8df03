use std::cell::RefCell;
use std::rc::Rc;

use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::CanvasRenderer;
use crate::domain::{
    errors::{FinderError, FinderResult},
    logging::{LogComponent, LogLevel, get_logger},
    sonar::SonarRenderer,
};

/// The one renderer of the page, shared by the frame loop and the message listener.
pub type SharedRenderer = Rc<RefCell<SonarRenderer<ChaCha8Rng>>>;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Start the `requestAnimationFrame` loop.
///
/// Every frame asks the renderer for a column and blits the buffer when it changed.
/// The loop re-arms itself and lives as long as the page.
pub fn start_render_loop(renderer: SharedRenderer, canvas: CanvasRenderer) -> FinderResult<()> {
    let window = web_sys::window()
        .ok_or_else(|| FinderError::Canvas("Window not available".to_string()))?;

    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let loop_window = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let dirty = {
            let mut sonar = renderer.borrow_mut();
            sonar.tick(now);
            sonar.take_dirty()
        };

        if dirty {
            let sonar = renderer.borrow();
            let buffer = sonar.buffer();
            if let Err(e) = canvas.present(buffer) {
                get_logger().log_with_metadata(
                    LogLevel::Warn,
                    LogComponent::Infrastructure("RenderLoop"),
                    &format!("⚠️ frame skipped: {}", e),
                    &format!("buffer={}x{}", buffer.width(), buffer.height()),
                );
            }
        }

        if let Some(callback) = next.borrow().as_ref() {
            let _ = loop_window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = slot.borrow().as_ref() {
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| FinderError::Canvas(format!("requestAnimationFrame failed: {:?}", e)))?;
    }

    Ok(())
}
