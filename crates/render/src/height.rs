/// Height of the surface at (x, y): sin(r)/r with r the distance from the origin.
///
/// At the origin the quotient is 0/0; the limit value 1 is returned instead
/// so the peak renders as a regular polygon.
pub fn surface_height(x: f64, y: f64) -> f64 {
    let r = x.hypot(y);
    if r == 0.0 {
        return 1.0;
    }
    r.sin() / r
}

/// Fill colour for a height, as six lowercase hex digits without the `#`.
///
/// The magnitude `trunc(|z| * 255)` becomes the red byte for z >= 0 and the
/// blue byte for z < 0. Magnitudes of 256 or more widen the string past six
/// digits. NaN maps to black.
pub fn height_color(z: f64) -> String {
    // Float-to-int `as` saturates and maps NaN to 0.
    let level = (z.abs() * 255.0) as u64;
    if z < 0.0 {
        format!("0000{level:02x}")
    } else {
        format!("{level:02x}0000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_near_origin() {
        let z = surface_height(0.1, 0.1);
        assert!((z - 0.99667).abs() < 1e-5, "z={z}");
        assert_eq!(height_color(z), "fe0000");
    }

    #[test]
    fn origin_uses_limit_value() {
        assert_eq!(surface_height(0.0, 0.0), 1.0);
        assert_eq!(surface_height(-0.0, 0.0), 1.0);
        assert_eq!(height_color(surface_height(0.0, 0.0)), "ff0000");
    }

    #[test]
    fn height_is_radially_symmetric() {
        assert_eq!(surface_height(3.0, 4.0), surface_height(-4.0, 3.0));
        assert_eq!(surface_height(3.0, 4.0), 5.0_f64.sin() / 5.0);
    }

    #[test]
    fn negative_height_is_blue() {
        let z = surface_height(4.5, 0.0);
        assert!(z < 0.0);
        assert_eq!(height_color(z), "000037");
    }

    #[test]
    fn flat_height_is_black() {
        assert_eq!(height_color(0.0), "000000");
        assert_eq!(height_color(-0.0), "000000");
        assert_eq!(height_color(0.003), "000000");
    }

    #[test]
    fn single_digit_is_zero_padded() {
        assert_eq!(height_color(0.03308), "080000");
        assert_eq!(height_color(-0.03308), "000008");
    }

    #[test]
    fn out_of_range_height_widens_without_panic() {
        assert_eq!(height_color(2.0), "1fe0000");
        assert_eq!(height_color(-1.5), "000017e");
        assert!(height_color(f64::INFINITY).len() > 6);
    }

    #[test]
    fn nan_height_is_black() {
        assert_eq!(height_color(f64::NAN), "000000");
    }
}
