//! Catalog grid with category filter and the purchase modal it opens.
mod category;
mod item_card;

pub use category::CategoryBar;
pub use item_card::ItemCard;

use crate::components::ui::purchase_modal::PurchaseModal;
use crate::i18n::t;
use crate::shop::{ALL_CATEGORY, Catalog, Item};
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ShopProps {
    pub catalog: Rc<Catalog>,
    pub username: AttrValue,
    pub purchased: BTreeSet<u32>,
    pub on_purchased: Callback<u32>,
}

#[function_component(Shop)]
pub fn shop(p: &ShopProps) -> Html {
    let category = use_state(|| ALL_CATEGORY.to_string());
    let selected = use_state(|| None::<Item>);

    let on_select_category = {
        let category = category.clone();
        Callback::from(move |next: String| category.set(next))
    };
    let on_buy = {
        let selected = selected.clone();
        Callback::from(move |item: Item| selected.set(Some(item)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let items = p.catalog.filter(&category);
    let cards = items.iter().map(|item| {
        html! {
            <ItemCard
                key={item.id}
                item={(*item).clone()}
                purchased={p.purchased.contains(&item.id)}
                on_buy={on_buy.clone()}
            />
        }
    });

    html! {
        <section id="shop" class="shop" aria-labelledby="shop-title">
            <h2 id="shop-title">{ format!("🛒 {}", t("shop.title")) }</h2>
            <p class="shop__subtitle">{ t("shop.subtitle") }</p>
            <CategoryBar
                categories={p.catalog.categories.clone()}
                active={AttrValue::from((*category).clone())}
                on_select={on_select_category}
            />
            if items.is_empty() {
                <p class="shop__empty">{ t("shop.empty") }</p>
            } else {
                <div class="shop__grid">{ for cards }</div>
            }
            if let Some(item) = (*selected).clone() {
                <PurchaseModal
                    {item}
                    username={p.username.clone()}
                    on_purchased={p.on_purchased.clone()}
                    {on_close}
                />
            }
        </section>
    }
}
