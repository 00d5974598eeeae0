//! Checkout state for a single item
//!
//! [`PurchaseFlow`] is the state behind the purchase modal. It is a plain
//! value: UI layers feed it the results of [`ShopClient`] calls and render
//! from it, while [`check_promo`] and [`submit_purchase`] drive it directly
//! for headless callers.
use crate::api::{ApiError, ApiTransport, ShopClient};
use crate::catalog::Item;
use crate::pricing::{Discount, PriceQuote};
use crate::promo::{PromoValidation, normalize_code};
use serde::{Deserialize, Serialize};

/// How long the success view stays up before the modal closes itself.
pub const SUCCESS_DISPLAY_MS: u32 = 2200;

/// Body of a purchase call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub username: String,
    pub item_id: u32,
    pub item_name: String,
    pub item_emoji: String,
    pub original_price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

impl PurchaseRequest {
    #[must_use]
    pub fn for_item(item: &Item, username: &str, promo_code: Option<String>) -> Self {
        Self {
            username: username.to_string(),
            item_id: item.id,
            item_name: item.name.clone(),
            item_emoji: item.emoji.clone(),
            original_price: item.price,
            promo_code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub purchase_id: i64,
    #[serde(default)]
    pub final_price: Option<u32>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromoStatus {
    #[default]
    Unchecked,
    Applied(Discount),
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PurchasePhase {
    #[default]
    Editing,
    Submitting,
    Succeeded(PurchaseReceipt),
    /// Server message, or `None` for the generic failure text.
    Failed(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseFlow {
    item: Item,
    username: String,
    promo_input: String,
    promo: PromoStatus,
    phase: PurchasePhase,
}

impl PurchaseFlow {
    #[must_use]
    pub fn new(item: Item, username: impl Into<String>) -> Self {
        Self {
            item,
            username: username.into(),
            promo_input: String::new(),
            promo: PromoStatus::Unchecked,
            phase: PurchasePhase::Editing,
        }
    }

    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn promo_input(&self) -> &str {
        &self.promo_input
    }

    #[must_use]
    pub const fn promo_status(&self) -> PromoStatus {
        self.promo
    }

    #[must_use]
    pub const fn phase(&self) -> &PurchasePhase {
        &self.phase
    }

    /// Replace the typed code, uppercased as typed. Surrounding whitespace is
    /// kept until the code is checked. A previous check result is dropped once
    /// the trimmed code changes.
    pub fn set_promo_input(&mut self, raw: &str) {
        if self.is_locked() {
            return;
        }
        let input = raw.to_uppercase();
        if input == self.promo_input {
            return;
        }
        if normalize_code(&input) != normalize_code(&self.promo_input) {
            self.promo = PromoStatus::Unchecked;
        }
        self.promo_input = input;
    }

    /// Normalised code to validate, if anything was typed.
    #[must_use]
    pub fn code_to_check(&self) -> Option<String> {
        let code = normalize_code(&self.promo_input);
        (!code.is_empty()).then_some(code)
    }

    /// Record a validation answer for `code`.
    ///
    /// Returns `false` and changes nothing when the input has moved on since
    /// `code` was sent. Transport failures count as an invalid code.
    pub fn apply_validation(
        &mut self,
        code: &str,
        result: Result<PromoValidation, ApiError>,
    ) -> bool {
        if self.is_locked() || self.code_to_check().as_deref() != Some(code) {
            return false;
        }
        self.promo = match result {
            Ok(PromoValidation { valid: true, discount }) => PromoStatus::Applied(discount),
            Ok(_) => PromoStatus::Rejected,
            Err(err) => {
                log::warn!("promo check for {code} failed: {err}");
                PromoStatus::Rejected
            }
        };
        true
    }

    #[must_use]
    pub const fn discount(&self) -> Discount {
        match self.promo {
            PromoStatus::Applied(discount) => discount,
            PromoStatus::Unchecked | PromoStatus::Rejected => Discount::NONE,
        }
    }

    #[must_use]
    pub fn quote(&self) -> PriceQuote {
        PriceQuote::new(self.item.price, self.discount())
    }

    /// Enter the submitting phase and build the request body.
    ///
    /// Returns `None` while a submission is in flight or after success. The
    /// promo code is only included once it has been applied.
    pub fn begin_submit(&mut self) -> Option<PurchaseRequest> {
        if self.is_locked() {
            return None;
        }
        let promo_code = match self.promo {
            PromoStatus::Applied(_) => self.code_to_check(),
            PromoStatus::Unchecked | PromoStatus::Rejected => None,
        };
        self.phase = PurchasePhase::Submitting;
        Some(PurchaseRequest::for_item(
            &self.item,
            &self.username,
            promo_code,
        ))
    }

    pub fn finish_submit(&mut self, result: Result<PurchaseReceipt, ApiError>) {
        if self.phase != PurchasePhase::Submitting {
            return;
        }
        self.phase = match result {
            Ok(receipt) => PurchasePhase::Succeeded(receipt),
            Err(err) => {
                log::warn!("purchase of item {} failed: {err}", self.item.id);
                PurchasePhase::Failed(err.server_message().map(ToString::to_string))
            }
        };
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == PurchasePhase::Submitting
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.phase, PurchasePhase::Succeeded(_))
    }

    /// The modal can be dismissed at any point before success.
    #[must_use]
    pub const fn can_dismiss(&self) -> bool {
        !self.is_success()
    }

    const fn is_locked(&self) -> bool {
        matches!(
            self.phase,
            PurchasePhase::Submitting | PurchasePhase::Succeeded(_)
        )
    }
}

/// Validate the typed code, if any, and record the answer.
///
/// Returns `true` when a discount is now applied.
pub async fn check_promo<T: ApiTransport>(client: &ShopClient<T>, flow: &mut PurchaseFlow) -> bool {
    let Some(code) = flow.code_to_check() else {
        return false;
    };
    let result = client.validate_promo(&code).await;
    flow.apply_validation(&code, result);
    matches!(flow.promo_status(), PromoStatus::Applied(_))
}

/// Submit the purchase and record the outcome.
///
/// Returns `true` on success, `false` on failure or when the flow refused a
/// second submission.
pub async fn submit_purchase<T: ApiTransport>(
    client: &ShopClient<T>,
    flow: &mut PurchaseFlow,
) -> bool {
    let Some(request) = flow.begin_submit() else {
        return false;
    };
    let result = client.purchase(&request).await;
    flow.finish_submit(result);
    flow.is_success()
}
