use super::error_text;
use crate::i18n::{fmt_pct, t, tf};
use crate::shop::admin;
use crate::shop::{BookUpdate, DiscountRange, PromoBook, PromoCode, PromoDraft};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Promo list behind a reducer so late API answers land on the current list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookState {
    pub book: PromoBook,
}

impl Reducible for BookState {
    type Action = BookUpdate;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.book.apply(action);
        Rc::new(next)
    }
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

fn promo_row(promo: &PromoCode, on_toggle: &Callback<(i64, bool)>, on_delete: &Callback<i64>) -> Html {
    let (id, active) = (promo.id, promo.active);
    let toggle = {
        let cb = on_toggle.clone();
        Callback::from(move |_| cb.emit((id, !active)))
    };
    let delete = {
        let cb = on_delete.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let usages = promo.usages.to_string();
    html! {
        <li key={id} class={classes!("promo-row", (!active).then_some("promo-row--inactive"))}>
            <code class="promo-row__code">{ promo.code.clone() }</code>
            <span class="promo-row__discount">{ format!("-{}", fmt_pct(promo.discount.percent())) }</span>
            <span class="promo-row__usages">{ tf("admin.promos.usages", &[("count", usages.as_str())]) }</span>
            <span class="promo-row__status">
                { if active { t("admin.promos.active") } else { t("admin.promos.inactive") } }
            </span>
            <button type="button" class="btn btn--small" onclick={toggle}>
                { if active { t("admin.promos.disable") } else { t("admin.promos.enable") } }
            </button>
            <button type="button" class="btn btn--small btn--danger" onclick={delete}>
                { t("admin.promos.delete") }
            </button>
        </li>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PromosTabProps {
    pub on_promo_created: Callback<PromoCode>,
}

#[function_component(PromosTab)]
pub fn promos_tab(p: &PromosTabProps) -> Html {
    let state = use_reducer(BookState::default);
    let load_error = use_state(|| None::<String>);
    let draft = use_state(PromoDraft::default);
    let create_error = use_state(|| None::<String>);
    let creating = use_state(|| false);

    {
        let dispatcher = state.dispatcher();
        let load_error = load_error.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match admin::load_promos(&crate::api::client()).await {
                    Ok(update) => dispatcher.dispatch(update),
                    Err(err) => {
                        log::warn!("loading promo codes failed: {err}");
                        load_error.set(Some(t("admin.errors.load")));
                    }
                }
            });
            || {}
        });
    }

    let on_code = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                draft.set(PromoDraft {
                    code: value.to_uppercase(),
                    ..(*draft).clone()
                });
            }
        })
    };
    let on_discount = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                draft.set(PromoDraft {
                    discount: value,
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_create = {
        let state = state.clone();
        let draft = draft.clone();
        let create_error = create_error.clone();
        let creating = creating.clone();
        let on_created = p.on_promo_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *creating {
                return;
            }
            creating.set(true);
            let snapshot = (*draft).clone();
            let book = state.book.clone();
            let dispatcher = state.dispatcher();
            let draft = draft.clone();
            let create_error = create_error.clone();
            let creating = creating.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let client = crate::api::client();
                match admin::create_promo(&client, &snapshot, DiscountRange::default(), &book).await {
                    Ok(update) => {
                        if let BookUpdate::Prepend(promo) = &update {
                            on_created.emit(promo.clone());
                        }
                        dispatcher.dispatch(update);
                        draft.set(PromoDraft::default());
                        create_error.set(None);
                    }
                    Err(err) => create_error.set(Some(error_text(&err))),
                }
                creating.set(false);
            });
        })
    };

    let on_toggle = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(id, active): (i64, bool)| {
            let dispatcher = dispatcher.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let update = admin::toggle_promo(&crate::api::client(), id, active).await;
                dispatcher.dispatch(update);
            });
        })
    };
    let on_delete = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: i64| {
            let dispatcher = dispatcher.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let update = admin::delete_promo(&crate::api::client(), id).await;
                dispatcher.dispatch(update);
            });
        })
    };

    let rows = state
        .book
        .promos()
        .iter()
        .map(|promo| promo_row(promo, &on_toggle, &on_delete));

    html! {
        <div class="admin-promos">
            <form class="promo-create" onsubmit={on_create}>
                <h3>{ format!("➕ {}", t("admin.promos.create_title")) }</h3>
                <label for="promo-code">{ t("admin.promos.code") }</label>
                <input
                    id="promo-code"
                    class="input"
                    type="text"
                    value={draft.code.clone()}
                    placeholder={t("admin.promos.code_placeholder")}
                    oninput={on_code}
                />
                <label for="promo-discount">{ t("admin.promos.discount") }</label>
                <input
                    id="promo-discount"
                    class="input"
                    type="number"
                    min="0"
                    max="100"
                    value={draft.discount.clone()}
                    oninput={on_discount}
                />
                <button type="submit" class="btn btn--primary" disabled={*creating}>
                    { if *creating { t("admin.promos.creating") } else { t("admin.promos.create") } }
                </button>
                if let Some(message) = (*create_error).clone() {
                    <p class="admin-error" role="alert">{ format!("⚠️ {message}") }</p>
                }
            </form>
            if let Some(message) = (*load_error).clone() {
                <p class="admin-error" role="alert">{ message }</p>
            }
            if state.book.is_empty() {
                <p class="admin-empty">{ t("admin.promos.empty") }</p>
            } else {
                <ul class="promo-list">{ for rows }</ul>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::Discount;

    fn promo(id: i64, code: &str, active: bool) -> PromoCode {
        PromoCode {
            id,
            code: code.to_string(),
            discount: Discount::new(20).unwrap(),
            usages: 3,
            active,
        }
    }

    #[test]
    fn reducer_applies_updates_in_order() {
        let state = Rc::new(BookState::default())
            .reduce(BookUpdate::Replace(vec![promo(1, "OLD30", false)]))
            .reduce(BookUpdate::Prepend(promo(2, "NEW10", true)))
            .reduce(BookUpdate::SetActive { id: 1, active: true })
            .reduce(BookUpdate::Remove(2));
        let codes: Vec<_> = state.book.promos().iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["OLD30"]);
        assert!(state.book.promos()[0].active);
    }

    #[function_component(RowHarness)]
    fn row_harness() -> Html {
        promo_row(&promo(1, "WELCOME20", true), &Callback::noop(), &Callback::noop())
    }

    #[test]
    fn row_uses_plural_usage_label() {
        crate::i18n::set_lang("ru");
        let html = futures::executor::block_on(yew::LocalServerRenderer::<RowHarness>::new().render());
        assert!(html.contains("WELCOME20"));
        assert!(html.contains("-20%"));
        assert!(html.contains("3 использования"));
    }
}
