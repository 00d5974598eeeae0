use crate::shop::{ApiError, Item, PromoValidation, PurchaseFlow, PurchaseReceipt};
use std::rc::Rc;
use yew::prelude::*;

pub enum PurchaseAction {
    Input(String),
    Validated {
        code: String,
        result: Result<PromoValidation, ApiError>,
    },
    Submitting,
    Finished(Result<PurchaseReceipt, ApiError>),
}

/// Reducer wrapper so async answers are applied to the latest flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseState {
    pub flow: PurchaseFlow,
}

impl PurchaseState {
    pub fn new(item: Item, username: &str) -> Self {
        Self {
            flow: PurchaseFlow::new(item, username),
        }
    }
}

impl Reducible for PurchaseState {
    type Action = PurchaseAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PurchaseAction::Input(raw) => next.flow.set_promo_input(&raw),
            PurchaseAction::Validated { code, result } => {
                if !next.flow.apply_validation(&code, result) {
                    return self;
                }
            }
            PurchaseAction::Submitting => {
                if next.flow.begin_submit().is_none() {
                    return self;
                }
            }
            PurchaseAction::Finished(result) => next.flow.finish_submit(result),
        }
        Rc::new(next)
    }
}
