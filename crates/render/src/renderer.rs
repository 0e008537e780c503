use std::io::Write;

use surface_common::SurfaceConfig;
use tracing::debug;

use crate::format::Compact;
use crate::grid::SurfaceGrid;

const SVG_STYLE: &str = "stroke: grey; fill: white; stroke-width: 0.7";

/// Errors from writing a rendering to its sink.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renderer interface. Implementations stream a complete image into any
/// byte sink and hold no state between calls.
pub trait Renderer {
    /// Write one complete image to `out`.
    fn render<W: Write>(&self, out: &mut W) -> Result<(), RenderError>;

    /// Render into an in-memory buffer.
    fn render_to_vec(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(buf)
    }
}

/// Renders the surface as an SVG document: one header line, one `<polygon>`
/// line per grid cell, one closing line.
#[derive(Debug, Clone, Copy)]
pub struct SvgSurfaceRenderer {
    grid: SurfaceGrid,
}

impl SvgSurfaceRenderer {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            grid: SurfaceGrid::new(config),
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        self.grid.config()
    }
}

impl Default for SvgSurfaceRenderer {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl Renderer for SvgSurfaceRenderer {
    fn render<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let config = self.grid.config();
        debug!(
            width = config.width,
            height = config.height,
            cells = config.cells,
            "rendering surface"
        );

        writeln!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' style='{SVG_STYLE}' width='{}' height='{}'>",
            config.width, config.height
        )?;
        for i in 0..config.cells {
            for j in 0..config.cells {
                let [a, b, c, d] = self.grid.cell(i, j);
                // Only the last corner's colour fills the cell.
                writeln!(
                    out,
                    "<polygon points='{},{} {},{} {},{} {},{}' style='fill: #{};'/>",
                    Compact(a.screen.x),
                    Compact(a.screen.y),
                    Compact(b.screen.x),
                    Compact(b.screen.y),
                    Compact(c.screen.x),
                    Compact(c.screen.y),
                    Compact(d.screen.x),
                    Compact(d.screen.y),
                    d.color
                )?;
            }
        }
        writeln!(out, "</svg>")?;

        debug!(polygons = config.polygon_count(), "surface rendered");
        Ok(())
    }
}
