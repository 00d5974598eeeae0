//! Promo codes and the admin promo book
use crate::pricing::Discount;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// A redeemable discount token as stored by the shop API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub discount: Discount,
    #[serde(default)]
    pub usages: u32,
    pub active: bool,
}

/// Result of asking the API whether a code is redeemable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoValidation {
    pub valid: bool,
    #[serde(default)]
    pub discount: Discount,
}

impl PromoValidation {
    pub const INVALID: Self = Self {
        valid: false,
        discount: Discount::NONE,
    };
}

/// Canonical form of user-entered codes: trimmed and uppercased.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Accepted discount bounds for newly created codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountRange {
    /// Matches the API's own check; 100 creates a free-item code.
    #[default]
    Api,
    /// Rejects both no-op and free-item codes.
    Strict,
}

impl DiscountRange {
    #[must_use]
    pub const fn bounds(self) -> RangeInclusive<u32> {
        match self {
            Self::Api => 0..=100,
            Self::Strict => 1..=99,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoDraftError {
    #[error("promo code is empty")]
    EmptyCode,
    #[error("promo code {0} already exists")]
    Duplicate(String),
    #[error("discount must be between {min} and {max}")]
    OutOfRange { min: u32, max: u32 },
}

impl PromoDraftError {
    /// Translation key for the inline admin error.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyCode => "admin.promos.errors.empty",
            Self::Duplicate(_) => "admin.promos.errors.duplicate",
            Self::OutOfRange { .. } => "admin.promos.errors.range",
        }
    }
}

/// Default contents of the discount field in the create form.
pub const DEFAULT_DRAFT_DISCOUNT: &str = "10";

/// Unvalidated promo create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoDraft {
    pub code: String,
    pub discount: String,
}

impl Default for PromoDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            discount: DEFAULT_DRAFT_DISCOUNT.to_string(),
        }
    }
}

/// A create request that passed client-side checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewPromo<'a> {
    pub code: &'a str,
    pub discount: Discount,
}

impl PromoDraft {
    /// Check the draft against `range` and the codes already listed.
    ///
    /// Returns the normalised code and discount ready to send.
    ///
    /// # Errors
    ///
    /// Rejects an empty code, a code already present in `existing`, and a
    /// discount that does not parse or falls outside `range`.
    pub fn validate(
        &self,
        range: DiscountRange,
        existing: &[PromoCode],
    ) -> Result<(String, Discount), PromoDraftError> {
        let code = normalize_code(&self.code);
        if code.is_empty() {
            return Err(PromoDraftError::EmptyCode);
        }
        if existing.iter().any(|p| p.code == code) {
            return Err(PromoDraftError::Duplicate(code));
        }
        let bounds = range.bounds();
        let out_of_range = PromoDraftError::OutOfRange {
            min: *bounds.start(),
            max: *bounds.end(),
        };
        let pct = self
            .discount
            .trim()
            .parse::<u32>()
            .map_err(|_| out_of_range.clone())?;
        if !bounds.contains(&pct) {
            return Err(out_of_range);
        }
        let discount = Discount::new(pct).map_err(|_| out_of_range)?;
        Ok((code, discount))
    }
}

/// A change to apply to the local promo list once the API call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    Replace(Vec<PromoCode>),
    Prepend(PromoCode),
    SetActive { id: i64, active: bool },
    Remove(i64),
}

/// Locally displayed list of promo codes in the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoBook {
    promos: Vec<PromoCode>,
}

impl PromoBook {
    #[must_use]
    pub const fn new(promos: Vec<PromoCode>) -> Self {
        Self { promos }
    }

    #[must_use]
    pub fn promos(&self) -> &[PromoCode] {
        &self.promos
    }

    /// Newly created codes go to the top of the list.
    pub fn prepend(&mut self, promo: PromoCode) {
        self.promos.insert(0, promo);
    }

    /// Returns `false` when no code has that id.
    pub fn set_active(&mut self, id: i64, active: bool) -> bool {
        self.promos
            .iter_mut()
            .find(|p| p.id == id)
            .map(|p| p.active = active)
            .is_some()
    }

    /// Returns `false` when no code has that id.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.promos.len();
        self.promos.retain(|p| p.id != id);
        self.promos.len() != before
    }

    pub fn apply(&mut self, update: BookUpdate) {
        match update {
            BookUpdate::Replace(promos) => self.promos = promos,
            BookUpdate::Prepend(promo) => self.prepend(promo),
            BookUpdate::SetActive { id, active } => {
                self.set_active(id, active);
            }
            BookUpdate::Remove(id) => {
                self.remove(id);
            }
        }
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&PromoCode> {
        self.promos.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.promos.iter().filter(|p| p.active).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promos.is_empty()
    }
}
