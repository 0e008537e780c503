use std::fmt;

/// Compact display of an `f64` in the `%g` style.
///
/// Uses the shortest digits that round-trip. Values whose decimal exponent
/// lies in [-4, 6) print as plain decimals (`300`, `5.765251108351023`),
/// others in exponent form with a signed, at least two-digit exponent
/// (`1.5e-05`, `1e+06`). Non-finite values print as `NaN`, `+Inf`, `-Inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compact(pub f64);

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" });
        }
        if v == 0.0 {
            return write!(f, "{v}");
        }

        let sci = format!("{v:e}");
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return write!(f, "{v}");
        };
        let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
        if (-4..6).contains(&exp) {
            write!(f, "{v}")
        } else {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
    }
}
