use bytemuck::{Pod, Zeroable};
use derive_more::Display;
use strum::EnumIter;

pub const MIN_DEPTH_RANGE_FT: f64 = 20.0;
pub const MAX_DEPTH_RANGE_FT: f64 = 120.0;
pub const INITIAL_DEPTH_RANGE_FT: f64 = 40.0;

const RANGE_STEP_UP_FT: f64 = 10.0;
const RANGE_STEP_DOWN_FT: f64 = 5.0;
const EXPAND_ABOVE_RATIO: f64 = 0.8;
const SHRINK_BELOW_RATIO: f64 = 0.4;

/// Depth (feet) covered by the full height of the sonar column.
///
/// Always within `[MIN_DEPTH_RANGE_FT, MAX_DEPTH_RANGE_FT]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display)]
#[display(fmt = "{} ft", _0)]
pub struct DepthRange(f64);

impl DepthRange {
    pub fn new(feet: f64) -> Self {
        if feet.is_nan() {
            return Self::default();
        }
        Self(feet.clamp(MIN_DEPTH_RANGE_FT, MAX_DEPTH_RANGE_FT))
    }

    pub fn feet(self) -> f64 {
        self.0
    }

    /// Auto-ranging step for one accepted depth reading.
    ///
    /// A reading deep in the lower fifth widens the range by 10 ft, a reading in the
    /// upper 40% narrows it by 5 ft. Missing, zero and NaN readings leave it alone.
    pub fn adjust_for(self, depth: Option<f64>) -> Self {
        let Some(depth) = depth.filter(|d| *d != 0.0 && !d.is_nan()) else {
            return self;
        };

        if depth > self.0 * EXPAND_ABOVE_RATIO {
            Self((self.0 + RANGE_STEP_UP_FT).min(MAX_DEPTH_RANGE_FT))
        } else if depth < self.0 * SHRINK_BELOW_RATIO {
            Self((self.0 - RANGE_STEP_DOWN_FT).max(MIN_DEPTH_RANGE_FT))
        } else {
            self
        }
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self(INITIAL_DEPTH_RANGE_FT)
    }
}

/// One RGBA pixel, laid out the way `ImageData` expects it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable, Display)]
#[display(fmt = "#{:02x}{:02x}{:02x}", r, g, b)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// `0xRRGGBB` -> opaque color
    pub const fn from_hex(hex: u32) -> Self {
        Self::opaque((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Every color the sonar paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum SonarColor {
    Background,
    BottomCore,
    BottomDense,
    BottomBase,
    NoiseCyan,
    NoiseWhite,
    FishOuter,
    FishInner,
}

impl SonarColor {
    pub const fn rgba(self) -> Rgba {
        match self {
            SonarColor::Background => Rgba::from_hex(0x000000),
            SonarColor::BottomCore => Rgba::from_hex(0xffe66d),
            SonarColor::BottomDense => Rgba::from_hex(0xff9a3c),
            SonarColor::BottomBase => Rgba::from_hex(0xad2626),
            SonarColor::NoiseCyan => Rgba::from_hex(0x5effff),
            SonarColor::NoiseWhite => Rgba::from_hex(0xffffff),
            SonarColor::FishOuter => Rgba::from_hex(0xffed4a),
            SonarColor::FishInner => Rgba::from_hex(0xff4d4d),
        }
    }
}
