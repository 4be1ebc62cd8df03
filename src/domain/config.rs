use serde::{Deserialize, Serialize};

use crate::domain::errors::{FinderError, FinderResult};
use crate::domain::sonar::HEADROOM_PX;

pub const DEFAULT_RESOURCE_NAME: &str = "az-fishfinder";

/// Overlay settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Minimum gap between two sonar columns.
    pub ping_interval_ms: u32,
    /// Host resource used for the `https://<resource>/<callback>` posts.
    pub resource_name: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 300,
            canvas_height: 180,
            ping_interval_ms: 120,
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
        }
    }
}

impl FinderConfig {
    pub fn from_json(json: &str) -> FinderResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FinderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FinderResult<()> {
        if self.canvas_width == 0 {
            return Err(FinderError::Config("canvas width must be positive".to_string()));
        }
        if f64::from(self.canvas_height) <= HEADROOM_PX {
            return Err(FinderError::Config(format!(
                "canvas height {} leaves no room below the {}px headroom band",
                self.canvas_height, HEADROOM_PX
            )));
        }
        if self.resource_name.trim().is_empty() {
            return Err(FinderError::Config("resource name is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FinderConfig::from_json(r#"{"canvasWidth": 400}"#).unwrap();
        assert_eq!(config.canvas_width, 400);
        assert_eq!(config.canvas_height, 180);
        assert_eq!(config.ping_interval_ms, 120);
        assert_eq!(config.resource_name, DEFAULT_RESOURCE_NAME);
    }

    #[test]
    fn rejects_degenerate_canvas() {
        assert!(matches!(
            FinderConfig::from_json(r#"{"canvasHeight": 5}"#),
            Err(FinderError::Config(_))
        ));
        assert!(FinderConfig::from_json(r#"{"canvasWidth": 0}"#).is_err());
        assert!(FinderConfig::from_json(r#"{"resourceName": "  "}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(FinderConfig::from_json("not json").is_err());
        assert!(FinderConfig::from_json(r#"{"canvasWidth": -3}"#).is_err());
    }
}
