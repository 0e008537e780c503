use glam::{DVec2, DVec3};
use surface_common::SurfaceConfig;

use crate::height::{height_color, surface_height};
use crate::projection::IsometricProjection;

/// A projected grid corner and the colour its height maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    pub screen: DVec2,
    pub color: String,
}

/// The sampling lattice: (cells + 1)^2 corners spanning the surface domain.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceGrid {
    config: SurfaceConfig,
    projection: IsometricProjection,
}

impl SurfaceGrid {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            projection: IsometricProjection::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Surface-space (x, y) of corner (i, j).
    pub fn domain_point(&self, i: u32, j: u32) -> DVec2 {
        let cells = f64::from(self.config.cells);
        DVec2::new(
            self.config.xy_range * (f64::from(i) / cells - 0.5),
            self.config.xy_range * (f64::from(j) / cells - 0.5),
        )
    }

    /// Surface point (x, y, z) above corner (i, j).
    pub fn sample(&self, i: u32, j: u32) -> DVec3 {
        let xy = self.domain_point(i, j);
        xy.extend(surface_height(xy.x, xy.y))
    }

    /// Sample, colour and project corner (i, j).
    pub fn corner(&self, i: u32, j: u32) -> Corner {
        let p = self.sample(i, j);
        Corner {
            screen: self.projection.project(p),
            color: height_color(p.z),
        }
    }

    /// The four corners of cell (i, j) in drawing order:
    /// (i+1, j), (i, j), (i, j+1), (i+1, j+1).
    pub fn cell(&self, i: u32, j: u32) -> [Corner; 4] {
        [
            self.corner(i + 1, j),
            self.corner(i, j),
            self.corner(i, j + 1),
            self.corner(i + 1, j + 1),
        ]
    }
}
