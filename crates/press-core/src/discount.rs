//! # Volume Discount Ladders
//!
//! Threshold ladders: the highest tier whose threshold is ≤ the basis wins.
//!
//! ```text
//! basis (total sq ft)   0 ── 30 ── 60 ── 90 ── 120 ──►
//! rate                  0%   5%   10%   15%   20% (cap)
//! ```
//!
//! The basis is product-specific: aggregate square feet for large format
//! and in-house stickers, piece count for apparel.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// One rung of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub threshold: f64,
    /// Fraction off, 0.05 = 5%.
    pub rate: f64,
}

/// Tiers sorted by threshold with non-decreasing rates, capped at `max_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLadder", into = "RawLadder")]
pub struct DiscountLadder {
    tiers: Vec<DiscountTier>,
    max_rate: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLadder {
    tiers: Vec<DiscountTier>,
    max_rate: f64,
}

impl TryFrom<RawLadder> for DiscountLadder {
    type Error = String;

    fn try_from(raw: RawLadder) -> Result<Self, Self::Error> {
        DiscountLadder::new(raw.tiers, raw.max_rate).map_err(|e| e.to_string())
    }
}

impl From<DiscountLadder> for RawLadder {
    fn from(ladder: DiscountLadder) -> Self {
        RawLadder {
            tiers: ladder.tiers,
            max_rate: ladder.max_rate,
        }
    }
}

impl DiscountLadder {
    pub fn new(tiers: Vec<DiscountTier>, max_rate: f64) -> PricingResult<Self> {
        if !(0.0..1.0).contains(&max_rate) {
            return Err(PricingError::ConfigurationInvalid(format!(
                "discount cap {max_rate} must be in [0, 1)"
            )));
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(PricingError::ConfigurationInvalid(
                    "discount thresholds must be strictly increasing".to_string(),
                ));
            }
            if pair[1].rate < pair[0].rate {
                return Err(PricingError::ConfigurationInvalid(
                    "discount rates must not decrease as thresholds rise".to_string(),
                ));
            }
        }
        if tiers.iter().any(|t| t.rate < 0.0) {
            return Err(PricingError::ConfigurationInvalid(
                "discount rates must not be negative".to_string(),
            ));
        }
        Ok(DiscountLadder { tiers, max_rate })
    }

    /// `(threshold, rate)` pairs, cap = the largest rate.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> PricingResult<Self> {
        let tiers: Vec<DiscountTier> = pairs
            .iter()
            .map(|(threshold, rate)| DiscountTier {
                threshold: *threshold,
                rate: *rate,
            })
            .collect();
        let cap = tiers.iter().map(|t| t.rate).fold(0.0, f64::max);
        Self::new(tiers, cap)
    }

    /// A ladder that never discounts.
    pub fn none() -> Self {
        DiscountLadder {
            tiers: Vec::new(),
            max_rate: 0.0,
        }
    }

    /// Discount rate for `basis`.
    pub fn rate_for(&self, basis: f64) -> f64 {
        self.tiers
            .iter()
            .rev()
            .find(|t| basis >= t.threshold)
            .map(|t| t.rate.min(self.max_rate))
            .unwrap_or(0.0)
    }

    /// `1 - rate_for(basis)`.
    pub fn multiplier_for(&self, basis: f64) -> f64 {
        1.0 - self.rate_for(basis)
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn large_format() -> DiscountLadder {
        DiscountLadder::from_pairs(&[(30.0, 0.05), (60.0, 0.10), (90.0, 0.15), (120.0, 0.20)])
            .unwrap()
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let ladder = large_format();
        assert_eq!(ladder.rate_for(29.99), 0.0);
        assert_eq!(ladder.rate_for(30.0), 0.05);
        assert_eq!(ladder.rate_for(59.99), 0.05);
        assert_eq!(ladder.rate_for(60.0), 0.10);
        assert_eq!(ladder.rate_for(90.0), 0.15);
        assert_eq!(ladder.rate_for(120.0), 0.20);
        assert_eq!(ladder.rate_for(5000.0), 0.20);
    }

    #[test]
    fn test_multiplier_is_non_increasing() {
        let ladder = large_format();
        let mut previous = f64::INFINITY;
        for basis in (0..200).map(|b| b as f64) {
            let m = ladder.multiplier_for(basis);
            assert!(m <= previous);
            previous = m;
        }
    }

    #[test]
    fn test_cap_limits_rate() {
        let tiers = vec![
            DiscountTier { threshold: 10.0, rate: 0.1 },
            DiscountTier { threshold: 20.0, rate: 0.5 },
        ];
        let ladder = DiscountLadder::new(tiers, 0.25).unwrap();
        assert_eq!(ladder.rate_for(25.0), 0.25);
    }

    #[test]
    fn test_rejects_malformed_ladders() {
        assert!(DiscountLadder::from_pairs(&[(30.0, 0.1), (20.0, 0.2)]).is_err());
        assert!(DiscountLadder::from_pairs(&[(30.0, 0.2), (60.0, 0.1)]).is_err());
        assert!(DiscountLadder::new(Vec::new(), 1.0).is_err());
    }

    #[test]
    fn test_empty_ladder() {
        assert_eq!(DiscountLadder::none().multiplier_for(1e6), 1.0);
    }
}
