//! Sonar waterfall core: render state, framebuffer and the column painter.

pub mod pixel_buffer;
pub mod readouts;
pub mod renderer;
pub mod value_objects;

pub use pixel_buffer::PixelBuffer;
pub use readouts::{PLACEHOLDER, Readouts, SignalStatus, format_reading};
pub use renderer::{HEADROOM_PX, RenderState, SCROLL_STRIDE_PX, SonarRenderer};
pub use value_objects::{DepthRange, Rgba, SonarColor};
