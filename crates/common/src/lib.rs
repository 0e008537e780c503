//! Shared constants and configuration for the surface plotter.
//!
//! # Invariants
//! - Defaults reproduce the fixed canvas: 600x320 pixels, 100x100 cells with
//!   an axis range of 30, axes rotated by 30 degrees.
//! - Configuration is read once at startup and never mutated afterwards.

pub mod config;

pub use config::{
    AppConfig, ConfigError, ServerConfig, SurfaceConfig, ANGLE_DEGREES, CELLS, DEFAULT_BIND_ADDR,
    HEIGHT, WIDTH, XY_RANGE,
};
