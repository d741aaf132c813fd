//! # Bracket Interpolation
//!
//! Piecewise-linear curves over quantity brackets, used for every supplier
//! cost table (magnets, promo stickers, premium stickers).
//!
//! ```text
//!  cost
//!   │                                   ╱ ← extrapolated with the
//!   │                              ●───╱    last segment's slope
//!   │                        ●────╱
//!   │                  ●────╱
//!   │      ●──────●───╱
//!   │──────●  ← clamped below the first bracket
//!   └──────┴──────┴─────┴─────┴────┴─────── quantity
//!         25     50    100   250  500  1000
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Breakpoints and their values; breakpoints strictly increasing, two or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve", into = "RawCurve")]
pub struct BracketCurve {
    points: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawCurve {
    points: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawCurve> for BracketCurve {
    type Error = String;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        BracketCurve::new(raw.points, raw.values).map_err(|e| e.to_string())
    }
}

impl From<BracketCurve> for RawCurve {
    fn from(curve: BracketCurve) -> Self {
        RawCurve {
            points: curve.points,
            values: curve.values,
        }
    }
}

impl BracketCurve {
    pub fn new(points: Vec<f64>, values: Vec<f64>) -> PricingResult<Self> {
        if points.len() != values.len() {
            return Err(PricingError::ConfigurationInvalid(format!(
                "bracket table has {} breakpoints but {} values",
                points.len(),
                values.len()
            )));
        }
        if points.len() < 2 {
            return Err(PricingError::ConfigurationInvalid(
                "bracket table needs at least two breakpoints".to_string(),
            ));
        }
        if points.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::ConfigurationInvalid(
                "bracket breakpoints must be strictly increasing".to_string(),
            ));
        }
        Ok(BracketCurve { points, values })
    }

    /// Builds a curve from integer quantity brackets.
    pub fn from_brackets(brackets: &[u32], values: &[f64]) -> PricingResult<Self> {
        Self::new(
            brackets.iter().map(|b| *b as f64).collect(),
            values.to_vec(),
        )
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `x`.
    ///
    /// - below the first breakpoint: the first value
    /// - on a breakpoint: that breakpoint's value
    /// - between breakpoints: linear
    /// - above the last: the last segment extended
    pub fn value_at(&self, x: f64) -> f64 {
        let n = self.points.len();
        if x <= self.points[0] {
            return self.values[0];
        }

        // index of the segment [i, i + 1] to use; last segment for extrapolation
        let i = self
            .points
            .windows(2)
            .position(|w| x <= w[1])
            .unwrap_or(n - 2);

        let (x0, x1) = (self.points[i], self.points[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

/// Interpolates between two curves by a second axis (e.g. sticker area).
///
/// `lower` sits at `lower_key`, `upper` at `upper_key`; `key` outside the
/// range clamps to the nearer curve.
pub fn blend(
    lower: (&BracketCurve, f64),
    upper: (&BracketCurve, f64),
    key: f64,
    x: f64,
) -> f64 {
    let (lower_curve, lower_key) = lower;
    let (upper_curve, upper_key) = upper;
    let a = lower_curve.value_at(x);
    let b = upper_curve.value_at(x);
    if upper_key <= lower_key || key <= lower_key {
        return a;
    }
    if key >= upper_key {
        return b;
    }
    a + (key - lower_key) * (b - a) / (upper_key - lower_key)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BRACKETS: [u32; 6] = [25, 50, 100, 250, 500, 1000];

    fn magnet_3x3() -> BracketCurve {
        BracketCurve::from_brackets(&BRACKETS, &[53.0, 85.0, 150.0, 295.0, 538.0, 1023.0])
            .unwrap()
    }

    #[test]
    fn test_exact_breakpoints() {
        let curve = magnet_3x3();
        assert_eq!(curve.value_at(50.0), 85.0);
        assert_eq!(curve.value_at(1000.0), 1023.0);
        assert_eq!(curve.value_at(25.0), 53.0);
    }

    #[test]
    fn test_between_breakpoints() {
        let curve = magnet_3x3();
        // halfway between 50 (85) and 100 (150)
        assert!((curve.value_at(75.0) - 117.5).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_below_first_bracket() {
        let curve = magnet_3x3();
        assert_eq!(curve.value_at(10.0), 53.0);
        assert_eq!(curve.value_at(0.0), 53.0);
    }

    #[test]
    fn test_extrapolates_above_last_bracket() {
        let curve = magnet_3x3();
        // last slope: (1023 - 538) / 500 = 0.97 per piece
        assert!((curve.value_at(1100.0) - (1023.0 + 97.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(BracketCurve::new(vec![1.0], vec![1.0]).is_err());
        assert!(BracketCurve::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(BracketCurve::new(vec![2.0, 1.0], vec![1.0, 2.0]).is_err());
        let bad: Result<BracketCurve, _> =
            serde_json::from_str(r#"{"points":[5,5],"values":[1,2]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_blend_between_sizes() {
        let small = BracketCurve::new(vec![25.0, 50.0], vec![40.0, 59.0]).unwrap();
        let large = BracketCurve::new(vec![25.0, 50.0], vec![60.0, 100.0]).unwrap();
        assert_eq!(blend((&small, 4.0), (&large, 16.0), 10.0, 25.0), 50.0);
        assert_eq!(blend((&small, 4.0), (&large, 16.0), 2.0, 25.0), 40.0);
        assert_eq!(blend((&small, 4.0), (&large, 16.0), 20.0, 50.0), 100.0);
    }
}
