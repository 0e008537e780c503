//! Surface rendering: samples z = sin(r)/r over a grid, projects each cell
//! isometrically and writes the result as an SVG document.
//!
//! # Invariants
//! - Rendering is a pure function of [`SurfaceConfig`]; repeated renders are
//!   byte-identical.
//! - Corners are recomputed per cell and never cached.
//! - Each polygon is filled with the colour of its last corner, (i+1, j+1).
//!
//! [`SurfaceConfig`]: surface_common::SurfaceConfig

mod format;
mod grid;
mod height;
mod projection;
mod renderer;

pub use format::Compact;
pub use grid::{Corner, SurfaceGrid};
pub use height::{height_color, surface_height};
pub use projection::IsometricProjection;
pub use renderer::{RenderError, Renderer, SvgSurfaceRenderer};
