use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas width in pixels.
pub const WIDTH: u32 = 600;
/// Canvas height in pixels.
pub const HEIGHT: u32 = 320;
/// Number of grid cells along each axis.
pub const CELLS: u32 = 100;
/// Axis range. Grid corners span XY_RANGE units per axis, centred on the origin.
pub const XY_RANGE: f64 = 30.0;
/// Angle of the projected x and y axes.
pub const ANGLE_DEGREES: f64 = 30.0;
/// Address the web mode listens on.
pub const DEFAULT_BIND_ADDR: &str = "localhost:8000";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Canvas and grid parameters for one surface rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Grid cells per axis.
    pub cells: u32,
    /// Extent of the sampled domain along each axis.
    pub xy_range: f64,
    /// Axis rotation of the isometric projection.
    pub angle_degrees: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            cells: CELLS,
            xy_range: XY_RANGE,
            angle_degrees: ANGLE_DEGREES,
        }
    }
}

impl SurfaceConfig {
    /// Pixels per x or y unit.
    pub fn xy_scale(&self) -> f64 {
        f64::from(self.width) / 2.0 / self.xy_range
    }

    /// Pixels per z unit.
    pub fn z_scale(&self) -> f64 {
        f64::from(self.height) * 0.4
    }

    /// Number of polygons a full rendering emits.
    pub fn polygon_count(&self) -> usize {
        let cells = self.cells as usize;
        cells * cells
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.cells == 0 {
            return Err(ConfigError::Invalid("cells must be positive".into()));
        }
        if !self.xy_range.is_finite() || self.xy_range <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "xy_range must be finite and positive, got {}",
                self.xy_range
            )));
        }
        if !self.xy_scale().is_finite() {
            return Err(ConfigError::Invalid(format!(
                "xy_range {} is too small for a {}px canvas",
                self.xy_range, self.width
            )));
        }
        if !self.angle_degrees.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "angle_degrees must be finite, got {}",
                self.angle_degrees
            )));
        }
        Ok(())
    }
}

/// HTTP listener settings for web mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Top-level configuration, optionally read from a JSON file.
///
/// Every field has a default, so a file only needs to name what it overrides:
/// ```json
/// { "surface": { "cells": 50 }, "server": { "bind_addr": "127.0.0.1:9000" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.surface.validate()?;
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_addr must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canvas_constants() {
        let s = SurfaceConfig::default();
        assert_eq!(s.width, 600);
        assert_eq!(s.height, 320);
        assert_eq!(s.cells, 100);
        assert_eq!(s.xy_scale(), 10.0);
        assert_eq!(s.z_scale(), 128.0);
        assert_eq!(s.polygon_count(), 10_000);
        assert_eq!(ServerConfig::default().bind_addr, "localhost:8000");
    }

    #[test]
    fn partial_json_overrides_named_fields_only() {
        let cfg = AppConfig::from_json(r#"{ "surface": { "cells": 20 } }"#).unwrap();
        assert_eq!(cfg.surface.cells, 20);
        assert_eq!(cfg.surface.width, WIDTH);
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn rejects_zero_cells() {
        let err = AppConfig::from_json(r#"{ "surface": { "cells": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_range() {
        for xy_range in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let s = SurfaceConfig {
                xy_range,
                ..SurfaceConfig::default()
            };
            assert!(s.validate().is_err(), "xy_range={xy_range}");
        }
    }

    #[test]
    fn rejects_range_that_overflows_scale() {
        let s = SurfaceConfig {
            xy_range: 1e-320,
            ..SurfaceConfig::default()
        };
        assert!(s.xy_scale().is_infinite());
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("too small"), "{err}");

        let tiny = SurfaceConfig {
            xy_range: 1e-300,
            ..SurfaceConfig::default()
        };
        assert!(tiny.validate().is_ok());
    }

    #[test]
    fn serialized_config_loads_back() {
        let cfg = AppConfig {
            surface: SurfaceConfig {
                cells: 42,
                angle_degrees: 25.0,
                ..SurfaceConfig::default()
            },
            server: ServerConfig {
                bind_addr: "127.0.0.1:9000".to_string(),
            },
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        assert!(json.contains("\"bind_addr\": \"127.0.0.1:9000\""), "{json}");
        assert_eq!(AppConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn rejects_blank_bind_addr() {
        let err = AppConfig::from_json(r#"{ "server": { "bind_addr": "  " } }"#).unwrap_err();
        assert!(err.to_string().contains("bind_addr"));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = AppConfig::load("/nonexistent/surface-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
