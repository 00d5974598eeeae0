//! Discount arithmetic
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("discount must be between 0 and 100 (got {0})")]
    OutOfRange(u32),
}

/// A percentage discount in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Discount(u8);

impl Discount {
    pub const NONE: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// # Errors
    ///
    /// Returns [`PricingError::OutOfRange`] when `pct` exceeds 100.
    pub fn new(pct: u32) -> Result<Self, PricingError> {
        u8::try_from(pct)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(PricingError::OutOfRange(pct))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for Discount {
    type Error = PricingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Discount> for u32 {
    fn from(value: Discount) -> Self {
        Self::from(value.0)
    }
}

/// Price after applying `discount`, rounded half-up and never negative.
///
/// Uses integer arithmetic so `299` at 50% is exactly `150`.
#[must_use]
pub fn final_price(price: u32, discount: Discount) -> u32 {
    let keep = u64::from(100 - discount.percent());
    let scaled = u64::from(price) * keep;
    u32::try_from((scaled + 50) / 100).unwrap_or(u32::MAX)
}

/// Price breakdown displayed in the purchase modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub original: u32,
    pub discount: Discount,
    pub final_price: u32,
}

impl PriceQuote {
    #[must_use]
    pub fn new(original: u32, discount: Discount) -> Self {
        Self {
            original,
            discount,
            final_price: final_price(original, discount),
        }
    }

    /// Free items skip the payment step entirely.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.final_price == 0
    }

    #[must_use]
    pub const fn savings(&self) -> u32 {
        self.original.saturating_sub(self.final_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(price: u32, pct: u32) -> u32 {
        // half-up on exact rationals
        let num = u64::from(price) * u64::from(100 - pct);
        let whole = num / 100;
        let rem = num % 100;
        u32::try_from(if rem >= 50 { whole + 1 } else { whole }).unwrap()
    }

    #[test]
    fn discount_rejects_values_above_hundred() {
        assert!(Discount::new(100).is_ok());
        assert_eq!(Discount::new(101), Err(PricingError::OutOfRange(101)));
        assert_eq!(Discount::new(300), Err(PricingError::OutOfRange(300)));
    }

    #[test]
    fn half_price_rounds_up() {
        assert_eq!(final_price(299, Discount::new(50).unwrap()), 150);
    }

    #[test]
    fn full_discount_is_free() {
        for price in [0, 1, 89, 299, 599, u32::MAX] {
            assert_eq!(final_price(price, Discount::FULL), 0);
        }
        let quote = PriceQuote::new(299, Discount::FULL);
        assert!(quote.is_free());
        assert_eq!(quote.savings(), 299);
    }

    #[test]
    fn no_discount_keeps_price() {
        assert_eq!(final_price(199, Discount::NONE), 199);
        assert!(!PriceQuote::new(199, Discount::NONE).is_free());
    }

    #[test]
    fn matches_reference_rounding_for_catalog_prices() {
        for price in [89, 149, 179, 199, 249, 299, 399, 599] {
            for pct in 0..=100 {
                let d = Discount::new(pct).unwrap();
                assert_eq!(final_price(price, d), reference(price, pct), "{price} @ {pct}%");
            }
        }
    }

    #[test]
    fn zero_price_stays_free() {
        assert_eq!(final_price(0, Discount::new(20).unwrap()), 0);
    }

    #[test]
    fn discount_deserializes_with_range_check() {
        let ok: Discount = serde_json::from_str("30").unwrap();
        assert_eq!(ok.percent(), 30);
        assert!(serde_json::from_str::<Discount>("150").is_err());
    }
}
