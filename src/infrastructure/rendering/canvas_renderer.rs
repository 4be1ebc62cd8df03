use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::domain::{
    errors::{FinderError, FinderResult},
    logging::{LogComponent, get_logger},
    sonar::PixelBuffer,
};

/// Canvas 2D presenter for the sonar framebuffer - Infrastructure implementation
pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    /// Size the canvas and grab its 2D context.
    pub fn attach(canvas: &HtmlCanvasElement, width: u32, height: u32) -> FinderResult<Self> {
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(|e| js_error("Failed to get 2D context", e))?
            .ok_or_else(|| FinderError::Canvas("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|e| js_error("Failed to cast to 2D context", e))?;

        get_logger().info(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("🖼️ Sonar canvas attached ({}x{})", width, height),
        );

        Ok(Self { context, width, height })
    }

    /// Copy the whole framebuffer onto the canvas.
    pub fn present(&self, buffer: &PixelBuffer) -> FinderResult<()> {
        if buffer.width() != self.width as usize || buffer.height() != self.height as usize {
            return Err(FinderError::Canvas(format!(
                "buffer {}x{} does not match canvas {}x{}",
                buffer.width(),
                buffer.height(),
                self.width,
                self.height
            )));
        }

        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(buffer.as_bytes()),
            self.width,
            self.height,
        )
        .map_err(|e| js_error("Failed to build ImageData", e))?;

        self.context
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| js_error("Failed to put ImageData", e))
    }
}

fn js_error(context: &str, value: impl Into<JsValue>) -> FinderError {
    FinderError::Canvas(format!("{}: {:?}", context, value.into()))
}
