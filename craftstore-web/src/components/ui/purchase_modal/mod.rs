//! Checkout dialog for a single item: promo entry, live price, submission.
mod state;

pub use state::{PurchaseAction, PurchaseState};

use crate::components::modal::Modal;
use crate::i18n::{fmt_number, fmt_pct, fmt_rub, t, tf};
use crate::shop::{Item, PriceQuote, PromoStatus, PurchasePhase, SUCCESS_DISPLAY_MS};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PurchaseModalProps {
    pub item: Item,
    pub username: AttrValue,
    /// Fired with the item id once the success screen has been shown.
    pub on_purchased: Callback<u32>,
    pub on_close: Callback<()>,
}

fn buy_label(quote: &PriceQuote, submitting: bool) -> String {
    if submitting {
        t("purchase.processing")
    } else if quote.is_free() {
        t("purchase.get_free")
    } else {
        let price = fmt_number(u64::from(quote.final_price));
        tf("purchase.buy_for", &[("price", price.as_str())])
    }
}

fn promo_feedback(status: PromoStatus) -> Html {
    match status {
        PromoStatus::Unchecked => Html::default(),
        PromoStatus::Applied(discount) => {
            let pct = discount.percent().to_string();
            html! {
                <p class="promo-feedback promo-feedback--ok" role="status">
                    { tf("purchase.applied", &[("pct", pct.as_str())]) }
                </p>
            }
        }
        PromoStatus::Rejected => html! {
            <p class="promo-feedback promo-feedback--error" role="alert">{ t("purchase.not_found") }</p>
        },
    }
}

fn price_panel(quote: &PriceQuote) -> Html {
    let total = if quote.is_free() {
        t("purchase.free")
    } else {
        fmt_rub(u64::from(quote.final_price))
    };
    html! {
        <div class="price-panel">
            <div class="price-panel__label">{ t("purchase.total") }</div>
            <div class="price-panel__row">
                <span class={classes!("price-panel__total", quote.is_free().then_some("price-panel__total--free"))}>
                    { total }
                </span>
                if !quote.discount.is_none() && !quote.is_free() {
                    <s class="price-panel__original">{ fmt_rub(u64::from(quote.original)) }</s>
                }
                if !quote.discount.is_none() {
                    <span class="price-panel__badge">{ format!("-{}", fmt_pct(quote.discount.percent())) }</span>
                }
            </div>
        </div>
    }
}

#[function_component(PurchaseModal)]
pub fn purchase_modal(p: &PurchaseModalProps) -> Html {
    let state = {
        let item = p.item.clone();
        let username = p.username.clone();
        use_reducer(move || PurchaseState::new(item, &username))
    };
    let flow = &state.flow;
    let quote = flow.quote();

    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target().and_then(|target| target.dyn_into::<HtmlInputElement>().ok()) {
                state.dispatch(PurchaseAction::Input(input.value()));
            }
        })
    };

    let check_promo = {
        let state = state.clone();
        Callback::from(move |()| {
            let Some(code) = state.flow.code_to_check() else {
                return;
            };
            let dispatcher = state.dispatcher();
            wasm_bindgen_futures::spawn_local(async move {
                let result = crate::api::client().validate_promo(&code).await;
                dispatcher.dispatch(PurchaseAction::Validated { code, result });
            });
        })
    };
    let on_apply = {
        let check_promo = check_promo.clone();
        Callback::from(move |_: MouseEvent| check_promo.emit(()))
    };
    let on_promo_key = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            e.prevent_default();
            check_promo.emit(());
        }
    });

    let on_buy = {
        let state = state.clone();
        let on_purchased = p.on_purchased.clone();
        let on_close = p.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            let mut probe = state.flow.clone();
            let Some(request) = probe.begin_submit() else {
                return;
            };
            state.dispatch(PurchaseAction::Submitting);
            let dispatcher = state.dispatcher();
            let on_purchased = on_purchased.clone();
            let on_close = on_close.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = crate::api::client().purchase(&request).await;
                let succeeded = result.is_ok();
                dispatcher.dispatch(PurchaseAction::Finished(result));
                if succeeded {
                    log::info!("{} bought item {}", request.username, request.item_id);
                    crate::a11y::set_status(&tf(
                        "purchase.success_body",
                        &[("item", request.item_name.as_str())],
                    ));
                    let _ = crate::dom::sleep_ms(SUCCESS_DISPLAY_MS).await;
                    on_purchased.emit(request.item_id);
                    on_close.emit(());
                }
            });
        })
    };

    let on_close = {
        let state = state.clone();
        let cb = p.on_close.clone();
        Callback::from(move |()| {
            if state.flow.can_dismiss() {
                cb.emit(());
            }
        })
    };

    let item = flow.item();
    let color = item.rarity.color();

    let body = if flow.is_success() {
        html! {
            <div class="purchase-success" role="status">
                <div class="purchase-success__emoji" aria-hidden="true">{ item.emoji.clone() }</div>
                <div class="purchase-success__title">{ t("purchase.success_title") }</div>
                <p>{ tf("purchase.success_body", &[("item", item.name.as_str())]) }</p>
                if quote.is_free() {
                    <div class="purchase-success__free">{ format!("🎁 {}", t("purchase.free")) }</div>
                }
            </div>
        }
    } else {
        let submitting = flow.is_submitting();
        let error = match flow.phase() {
            PurchasePhase::Failed(message) => Some(
                message
                    .clone()
                    .unwrap_or_else(|| t("purchase.error_generic")),
            ),
            _ => None,
        };
        html! {
            <div class="purchase-form">
                <div class="purchase-form__item">
                    <span class="purchase-form__emoji" aria-hidden="true">{ item.emoji.clone() }</span>
                    <div>
                        <div class="purchase-form__name">{ item.name.clone() }</div>
                        <div style={format!("color:{color};")}>{ t(item.rarity.label_key()) }</div>
                    </div>
                </div>
                <div class="purchase-form__buyer">
                    { tf("purchase.buyer", &[("name", flow.username())]) }
                </div>
                <label class="purchase-form__promo" for="promo-input">{ format!("🎟️ {}", t("purchase.promo_label")) }</label>
                <div class="purchase-form__promo-row">
                    <input
                        id="promo-input"
                        class="input"
                        type="text"
                        autocomplete="off"
                        value={flow.promo_input().to_string()}
                        placeholder={t("purchase.promo_placeholder")}
                        disabled={submitting}
                        oninput={on_input}
                        onkeydown={on_promo_key}
                    />
                    <button type="button" class="btn btn--promo" disabled={submitting} onclick={on_apply}>
                        { t("purchase.apply") }
                    </button>
                </div>
                { promo_feedback(flow.promo_status()) }
                { price_panel(&quote) }
                if let Some(message) = error {
                    <div class="purchase-form__error" role="alert">{ format!("⚠️ {message}") }</div>
                }
                <button
                    type="button"
                    class={classes!("btn", "btn--buy", quote.is_free().then_some("btn--free"))}
                    disabled={submitting}
                    aria-busy={submitting.to_string()}
                    onclick={on_buy}
                >
                    { buy_label(&quote, submitting) }
                </button>
            </div>
        }
    };

    html! {
        <Modal
            title={AttrValue::from(t("purchase.title"))}
            class={classes!("purchase-modal")}
            dismissible={flow.can_dismiss()}
            {on_close}
        >
            <div style={format!("--rarity:{color};")}>{ body }</div>
        </Modal>
    }
}
