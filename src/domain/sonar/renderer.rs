use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    pixel_buffer::PixelBuffer,
    readouts::Readouts,
    value_objects::{DepthRange, SonarColor},
};
use crate::domain::config::FinderConfig;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_trace};

/// Pixels kept free below the deepest plottable depth.
pub const HEADROOM_PX: f64 = 5.0;
/// Columns added per ping.
pub const SCROLL_STRIDE_PX: usize = 2;

/// `depth_to_y(None)` lands at this share of the canvas height.
const UNKNOWN_DEPTH_HEIGHT_RATIO: f64 = 0.7;
/// Seabed drawn at this share of the range while the depth is unknown.
const UNKNOWN_DEPTH_RANGE_RATIO: f64 = 0.8;

const NOISE_CANDIDATES: usize = 12;
const NOISE_SKIP_CHANCE: f64 = 0.4;
const NOISE_CLEARANCE_PX: f64 = 10.0;

const FISH_CHANCE: f64 = 0.25;
const FISH_MIN_DEPTH_RATIO: f64 = 0.3;
const FISH_DEPTH_SPREAD: f64 = 0.5;
const FISH_MIN_HEIGHT_PX: f64 = 5.0;
const FISH_HEIGHT_SPREAD_PX: f64 = 6.0;

/// Everything the sonar knows about the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub visible: bool,
    pub current_depth: Option<f64>,
    /// Display only.
    pub current_speed: Option<f64>,
    pub in_boat: bool,
    pub max_depth_range: DepthRange,
    /// Frame clock (ms) of the last drawn column.
    pub last_ping_ms: f64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            visible: false,
            current_depth: None,
            current_speed: None,
            in_boat: false,
            max_depth_range: DepthRange::default(),
            last_ping_ms: 0.0,
        }
    }
}

/// Scrolling waterfall painter.
///
/// Owns the render state and the framebuffer; the random source is injected so
/// noise and fish marks can be replayed from a seed.
pub struct SonarRenderer<R: Rng> {
    state: RenderState,
    buffer: PixelBuffer,
    rng: R,
    ping_interval_ms: f64,
    dirty: bool,
}

impl SonarRenderer<ChaCha8Rng> {
    pub fn seeded(config: &FinderConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SonarRenderer<R> {
    pub fn new(config: &FinderConfig, rng: R) -> Self {
        Self {
            state: RenderState::default(),
            buffer: PixelBuffer::new(config.canvas_width as usize, config.canvas_height as usize),
            rng,
            ping_interval_ms: f64::from(config.ping_interval_ms),
            dirty: true,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// True once after the buffer changed; the presenter uses it to skip idle frames.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn toggle_visibility(&mut self, show: bool) {
        self.state.visible = show;
        if !show {
            self.buffer.fill(SonarColor::Background.rgba());
            self.state.current_depth = None;
            self.state.current_speed = None;
            self.dirty = true;
        }
        log_debug!(LogComponent::Domain("SonarRenderer"), "👁️ visible = {}", show);
    }

    /// Ingest one telemetry push and return the readout text for it.
    pub fn apply_telemetry(
        &mut self,
        in_boat: bool,
        depth: Option<f64>,
        speed: Option<f64>,
    ) -> Readouts {
        self.state.in_boat = in_boat;

        if !in_boat {
            self.state.current_depth = None;
            self.state.current_speed = None;
            return Readouts::no_signal();
        }

        self.state.current_depth = depth;
        self.state.current_speed = speed;

        let before = self.state.max_depth_range;
        self.state.max_depth_range = before.adjust_for(depth);
        if self.state.max_depth_range != before {
            log_debug!(
                LogComponent::Domain("SonarRenderer"),
                "📏 range {} -> {}",
                before,
                self.state.max_depth_range
            );
        }

        Readouts::active(depth, speed)
    }

    /// Map a depth in feet to a row. `None` maps to 70% of the canvas height.
    pub fn depth_to_y(&self, depth: Option<f64>) -> f64 {
        let height = self.buffer.height() as f64;
        let Some(depth) = depth else {
            return height * UNKNOWN_DEPTH_HEIGHT_RATIO;
        };
        let range = self.state.max_depth_range.feet();
        let t = depth.max(0.0).min(range) / range;
        t * (height - HEADROOM_PX)
    }

    /// Frame callback. Draws one column when visible and the ping interval has passed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.state.visible && now_ms - self.state.last_ping_ms > self.ping_interval_ms {
            self.draw_ping(now_ms);
            true
        } else {
            false
        }
    }

    /// Scroll the waterfall and paint a fresh column on the right edge.
    pub fn draw_ping(&mut self, now_ms: f64) {
        if !self.state.visible {
            return;
        }

        let width = self.buffer.width();
        let height = self.buffer.height() as f64;

        self.buffer.scroll_left(SCROLL_STRIDE_PX);
        self.buffer.fill_rect(
            width.saturating_sub(SCROLL_STRIDE_PX) as f64,
            0.0,
            SCROLL_STRIDE_PX as f64,
            height,
            SonarColor::Background.rgba(),
        );

        let seabed_depth = self.state.current_depth.unwrap_or(
            self.state.max_depth_range.feet() * UNKNOWN_DEPTH_RANGE_RATIO,
        );
        let bottom_y = self.depth_to_y(Some(seabed_depth));

        self.paint_bottom_echo(bottom_y);
        self.paint_noise(bottom_y);
        self.paint_fish_mark();

        self.state.last_ping_ms = now_ms;
        self.dirty = true;
    }

    /// Bright core, denser band, then dark base down to the bottom edge.
    fn paint_bottom_echo(&mut self, bottom_y: f64) {
        let width = self.buffer.width();
        let height = self.buffer.height() as f64;

        for x in width.saturating_sub(SCROLL_STRIDE_PX)..width {
            let x = x as f64;
            self.buffer
                .fill_rect(x, bottom_y - 1.0, 1.0, 3.0, SonarColor::BottomCore.rgba());
            self.buffer
                .fill_rect(x, bottom_y + 2.0, 1.0, 4.0, SonarColor::BottomDense.rgba());
            self.buffer.fill_rect(
                x,
                bottom_y + 6.0,
                1.0,
                height - bottom_y - 6.0,
                SonarColor::BottomBase.rgba(),
            );
        }
    }

    fn paint_noise(&mut self, bottom_y: f64) {
        let x = self.buffer.width() as f64 - 1.0;
        let ceiling = bottom_y - NOISE_CLEARANCE_PX;

        for _ in 0..NOISE_CANDIDATES {
            if self.rng.gen_bool(NOISE_SKIP_CHANCE) {
                continue;
            }
            let y = self.rng.gen_range(0.0..1.0) * ceiling;
            let color = if self.rng.gen_bool(0.5) {
                SonarColor::NoiseCyan
            } else {
                SonarColor::NoiseWhite
            };
            // speckles stay strictly above the ceiling
            let row = y.floor();
            if row < 0.0 || row >= ceiling {
                continue;
            }
            self.buffer.fill_rect(x, row, 1.0, 1.0, color.rgba());
        }
    }

    fn paint_fish_mark(&mut self) {
        // the roll happens even when no fish can be drawn
        if !self.rng.gen_bool(FISH_CHANCE) || !self.state.in_boat {
            return;
        }
        let Some(depth) = self.state.current_depth else {
            return;
        };

        let fish_depth = depth * (FISH_MIN_DEPTH_RATIO + self.rng.gen_range(0.0..1.0) * FISH_DEPTH_SPREAD);
        let fish_y = self.depth_to_y(Some(fish_depth));
        let fish_height = FISH_MIN_HEIGHT_PX + self.rng.gen_range(0.0..1.0) * FISH_HEIGHT_SPREAD_PX;
        let width = self.buffer.width() as f64;

        self.buffer
            .fill_rect(width - 5.0, fish_y, 3.0, fish_height, SonarColor::FishOuter.rgba());
        self.buffer.fill_rect(
            width - 2.0,
            fish_y + 1.0,
            2.0,
            fish_height - 2.0,
            SonarColor::FishInner.rgba(),
        );

        log_trace!(
            LogComponent::Domain("SonarRenderer"),
            "🐟 fish mark at {:.1} ft (y = {:.0})",
            fish_depth,
            fish_y
        );
    }
}
