use super::value_objects::{Rgba, SonarColor};

/// Owned RGBA framebuffer mirroring the sonar `<canvas>`.
///
/// Row-major, never resized after construction. All writes are clipped to the
/// buffer bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// New buffer filled with the opaque background color.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![SonarColor::Background.rgba(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Top-to-bottom colors of column `x`; empty when out of bounds.
    pub fn column(&self, x: usize) -> Vec<Rgba> {
        if x >= self.width {
            return Vec::new();
        }
        (0..self.height).map(|y| self.pixels[y * self.width + x]).collect()
    }

    /// Raw bytes in `ImageData` layout.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Shift every row left by `stride` columns.
    ///
    /// The rightmost `stride` columns keep their old content until repainted.
    pub fn scroll_left(&mut self, stride: usize) {
        if self.width == 0 || stride == 0 {
            return;
        }
        let stride = stride.min(self.width);
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.copy_within(stride.., 0);
        }
    }

    /// Canvas-style `fillRect` on the integer grid.
    ///
    /// Edges round to the nearest pixel, negative extents are normalized.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let Some((x0, x1)) = pixel_span(x, w, self.width) else {
            return;
        };
        let Some((y0, y1)) = pixel_span(y, h, self.height) else {
            return;
        };
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }
}

fn pixel_span(start: f64, extent: f64, limit: usize) -> Option<(usize, usize)> {
    let (a, b) = if extent < 0.0 {
        (start + extent, start)
    } else {
        (start, start + extent)
    };
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let lo = a.round().max(0.0);
    let hi = b.round().min(limit as f64);
    (hi > lo).then(|| (lo as usize, hi as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(0xff, 0, 0);
    const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    #[test]
    fn starts_solid_black() {
        let buffer = PixelBuffer::new(4, 3);
        assert!(buffer.as_bytes().chunks(4).all(|px| px == [0, 0, 0, 0xff]));
        assert_eq!(buffer.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.fill_rect(2.0, 2.0, 10.0, 10.0, RED);
        assert_eq!(buffer.pixel(3, 3), Some(RED));
        assert_eq!(buffer.pixel(1, 1), Some(BLACK));

        buffer.fill_rect(-5.0, -5.0, 6.0, 6.0, RED);
        assert_eq!(buffer.pixel(0, 0), Some(RED));
        assert_eq!(buffer.pixel(1, 0), Some(BLACK));
    }

    #[test]
    fn fill_rect_normalizes_negative_extent() {
        let mut buffer = PixelBuffer::new(3, 5);
        buffer.fill_rect(0.0, 4.0, 1.0, -2.0, RED);
        assert_eq!(buffer.column(0), vec![BLACK, BLACK, RED, RED, BLACK]);
    }

    #[test]
    fn fill_rect_ignores_non_finite_and_empty() {
        let mut buffer = PixelBuffer::new(3, 3);
        buffer.fill_rect(f64::NAN, 0.0, 1.0, 1.0, RED);
        buffer.fill_rect(0.0, 0.0, 0.0, 3.0, RED);
        buffer.fill_rect(0.0, f64::INFINITY, 1.0, 1.0, RED);
        assert_eq!(buffer, PixelBuffer::new(3, 3));
    }

    #[test]
    fn scroll_moves_columns_left() {
        let mut buffer = PixelBuffer::new(5, 2);
        buffer.fill_rect(4.0, 0.0, 1.0, 2.0, RED);
        buffer.scroll_left(2);
        assert_eq!(buffer.column(2), vec![RED, RED]);
        // stale tail is left for the caller to repaint
        assert_eq!(buffer.column(4), vec![RED, RED]);
        assert_eq!(buffer.column(3), vec![BLACK, BLACK]);
    }

    #[test]
    fn zero_sized_buffer_is_inert() {
        let mut buffer = PixelBuffer::new(0, 0);
        buffer.scroll_left(2);
        buffer.fill_rect(0.0, 0.0, 5.0, 5.0, RED);
        assert!(buffer.as_bytes().is_empty());
        assert!(buffer.column(0).is_empty());
    }
}
