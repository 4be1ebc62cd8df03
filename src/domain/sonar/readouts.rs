use strum::{AsRefStr, Display};

/// Shown instead of a number when there is no reading.
pub const PLACEHOLDER: &str = "--.-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum SignalStatus {
    #[strum(serialize = "NO SIGNAL - NOT IN BOAT / WATER")]
    NoSignal,
    #[strum(serialize = "RUNNING • SONAR ACTIVE")]
    Active,
}

/// Text for the three readouts next to the sonar canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Readouts {
    pub depth: String,
    pub speed: String,
    pub status: SignalStatus,
}

impl Readouts {
    pub fn no_signal() -> Self {
        Self {
            depth: PLACEHOLDER.to_string(),
            speed: PLACEHOLDER.to_string(),
            status: SignalStatus::NoSignal,
        }
    }

    pub fn active(depth: Option<f64>, speed: Option<f64>) -> Self {
        Self {
            depth: format_reading(depth),
            speed: format_reading(speed),
            status: SignalStatus::Active,
        }
    }
}

impl Default for Readouts {
    fn default() -> Self {
        Self::no_signal()
    }
}

/// One decimal place, or the placeholder.
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => PLACEHOLDER.to_string(),
    }
}
