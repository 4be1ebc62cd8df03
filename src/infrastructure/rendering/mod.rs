pub mod canvas_renderer;
pub mod render_loop;

pub use canvas_renderer::CanvasRenderer;
pub use render_loop::{SharedRenderer, start_render_loop};
