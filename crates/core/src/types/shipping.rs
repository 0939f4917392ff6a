//! Shipping rate table and weight tiers.
//!
//! Rates are pre-registered with the payment processor; this table only maps
//! a region and weight tier to the processor's rate identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orders at or above this subtotal (minor units) ship for free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 6000;

/// Weight bracket for a parcel.
///
/// Ordered from lightest to heaviest. Anything heavier than the last tier's
/// ceiling still uses the last tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightTier {
    #[serde(rename = "2kg")]
    UpTo2Kg,
    #[serde(rename = "5kg")]
    UpTo5Kg,
    #[serde(rename = "10kg")]
    UpTo10Kg,
}

impl WeightTier {
    /// All tiers, lightest first.
    pub const ALL: [Self; 3] = [Self::UpTo2Kg, Self::UpTo5Kg, Self::UpTo10Kg];

    /// Upper bound of the tier in grams (inclusive).
    #[must_use]
    pub const fn ceiling_grams(self) -> u64 {
        match self {
            Self::UpTo2Kg => 2_000,
            Self::UpTo5Kg => 5_000,
            Self::UpTo10Kg => 10_000,
        }
    }

    /// Smallest tier whose ceiling holds `grams`.
    #[must_use]
    pub fn from_grams(grams: u64) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| grams <= tier.ceiling_grams())
            .unwrap_or(Self::UpTo10Kg)
    }

    /// Tier label (`2kg`, `5kg`, `10kg`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpTo2Kg => "2kg",
            Self::UpTo5Kg => "5kg",
            Self::UpTo10Kg => "10kg",
        }
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping destination region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingRegion {
    /// Germany.
    Domestic,
    /// Rest of the EU.
    Eu,
}

/// Rate identifiers for one region, one per weight tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRates {
    pub up_to_2kg: String,
    pub up_to_5kg: String,
    pub up_to_10kg: String,
}

impl TierRates {
    /// Rate identifier for a tier.
    #[must_use]
    pub fn get(&self, tier: WeightTier) -> &str {
        match tier {
            WeightTier::UpTo2Kg => &self.up_to_2kg,
            WeightTier::UpTo5Kg => &self.up_to_5kg,
            WeightTier::UpTo10Kg => &self.up_to_10kg,
        }
    }
}

/// All registered shipping rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRates {
    /// Rate used once the subtotal reaches [`FREE_SHIPPING_THRESHOLD`].
    pub free_shipping: String,
    /// DHL Germany: 6.99 / 8.99 / 12.99.
    pub domestic: TierRates,
    /// DHL rest of EU: 14.99 / 18.99 / 24.99.
    pub eu: TierRates,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            free_shipping: "shr_1Sgmrb7Vrq9QN3jU5XtgW2No".to_string(),
            domestic: TierRates {
                up_to_2kg: "shr_1Sgn2D7Vrq9QN3jU2uGhJugy".to_string(),
                up_to_5kg: "shr_1Sgn347Vrq9QN3jUwQSrLE1g".to_string(),
                up_to_10kg: "shr_1Sgn3a7Vrq9QN3jU6y2hjC7w".to_string(),
            },
            eu: TierRates {
                up_to_2kg: "shr_1SgogZ7Vrq9QN3jUnR0fCuQt".to_string(),
                up_to_5kg: "shr_1SgohB7Vrq9QN3jJUGmnWRmtnX".to_string(),
                up_to_10kg: "shr_1Sgoi07Vrq9QN3jUWpCe3E015".to_string(),
            },
        }
    }
}

impl ShippingRates {
    /// Rate table for a region.
    #[must_use]
    pub const fn region(&self, region: ShippingRegion) -> &TierRates {
        match region {
            ShippingRegion::Domestic => &self.domestic,
            ShippingRegion::Eu => &self.eu,
        }
    }

    /// Rate identifier for a shipped order.
    ///
    /// Free shipping from [`FREE_SHIPPING_THRESHOLD`], otherwise the EU rate
    /// for the tier. The domestic table is never selected here.
    #[must_use]
    pub fn select(&self, subtotal: i64, tier: WeightTier) -> &str {
        if subtotal >= FREE_SHIPPING_THRESHOLD {
            &self.free_shipping
        } else {
            self.region(ShippingRegion::Eu).get(tier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(WeightTier::from_grams(0), WeightTier::UpTo2Kg);
        assert_eq!(WeightTier::from_grams(2_000), WeightTier::UpTo2Kg);
        assert_eq!(WeightTier::from_grams(2_001), WeightTier::UpTo5Kg);
        assert_eq!(WeightTier::from_grams(5_000), WeightTier::UpTo5Kg);
        assert_eq!(WeightTier::from_grams(5_001), WeightTier::UpTo10Kg);
    }

    #[test]
    fn test_heavier_than_largest_tier_stays_in_largest() {
        assert_eq!(WeightTier::from_grams(10_001), WeightTier::UpTo10Kg);
        assert_eq!(WeightTier::from_grams(u64::MAX), WeightTier::UpTo10Kg);
    }

    #[test]
    fn test_tier_labels() {
        let labels: Vec<_> = WeightTier::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["2kg", "5kg", "10kg"]);
    }

    #[test]
    fn test_free_shipping_regardless_of_tier() {
        let rates = ShippingRates::default();
        for tier in WeightTier::ALL {
            assert_eq!(rates.select(6_000, tier), rates.free_shipping);
            assert_eq!(rates.select(123_456, tier), rates.free_shipping);
        }
    }

    #[test]
    fn test_below_threshold_uses_eu_table() {
        let rates = ShippingRates::default();
        for tier in WeightTier::ALL {
            assert_eq!(rates.select(5_999, tier), rates.eu.get(tier));
            assert_ne!(rates.select(5_999, tier), rates.domestic.get(tier));
        }
    }
}
