use glam::{DVec2, DVec3};
use surface_common::SurfaceConfig;

/// Isometric projection of surface points onto the SVG canvas.
///
/// The x and y axes are drawn at `angle_degrees` from the horizontal and the
/// canvas centre is the image of the origin. Screen y grows downwards, so
/// positive heights move points up.
#[derive(Debug, Clone, Copy)]
pub struct IsometricProjection {
    origin: DVec2,
    xy_scale: f64,
    z_scale: f64,
    sin: f64,
    cos: f64,
}

impl IsometricProjection {
    pub fn new(config: &SurfaceConfig) -> Self {
        let angle = config.angle_degrees.to_radians();
        Self {
            origin: DVec2::new(f64::from(config.width) / 2.0, f64::from(config.height) / 2.0),
            xy_scale: config.xy_scale(),
            z_scale: config.z_scale(),
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }

    /// Map a point (x, y, z) in surface space to canvas pixels.
    pub fn project(&self, p: DVec3) -> DVec2 {
        DVec2::new(
            self.origin.x + (p.x - p.y) * self.cos * self.xy_scale,
            self.origin.y + (p.x + p.y) * self.sin * self.xy_scale - p.z * self.z_scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_projection() -> IsometricProjection {
        IsometricProjection::new(&SurfaceConfig::default())
    }

    #[test]
    fn origin_maps_to_canvas_centre() {
        let p = default_projection().project(DVec3::ZERO);
        assert_eq!(p, DVec2::new(300.0, 160.0));
    }

    #[test]
    fn height_moves_point_up() {
        let p = default_projection().project(DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(p, DVec2::new(300.0, 32.0));
    }

    #[test]
    fn diagonal_stays_on_centre_column() {
        let proj = default_projection();
        for t in [-15.0, -2.5, 7.0, 15.0] {
            assert_eq!(proj.project(DVec3::new(t, t, 0.0)).x, 300.0);
        }
    }

    #[test]
    fn x_axis_runs_down_and_right() {
        let p = default_projection().project(DVec3::new(1.0, 0.0, 0.0));
        assert!((p.x - (300.0 + 10.0 * 3.0_f64.sqrt() / 2.0)).abs() < 1e-9);
        assert!((p.y - 165.0).abs() < 1e-9);
    }
}
