use crate::i18n::{fmt_rub, t};
use crate::shop::Item;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ItemCardProps {
    pub item: Item,
    #[prop_or_default]
    pub purchased: bool,
    pub on_buy: Callback<Item>,
}

#[function_component(ItemCard)]
pub fn item_card(p: &ItemCardProps) -> Html {
    let item = &p.item;
    let color = item.rarity.color();

    let on_buy = {
        let cb = p.on_buy.clone();
        let item = item.clone();
        let purchased = p.purchased;
        Callback::from(move |_| {
            // Bought items stay bought for the rest of the visit
            if !purchased {
                cb.emit(item.clone());
            }
        })
    };

    html! {
        <article class="item-card" style={format!("border-color:{color};")} data-item-id={item.id.to_string()}>
            <header class="item-card__head">
                <span class="item-card__emoji" aria-hidden="true">{ item.emoji.clone() }</span>
                <div>
                    <h3 class="item-card__name">{ item.name.clone() }</h3>
                    <span class="item-card__rarity" style={format!("color:{color};")}>
                        { t(item.rarity.label_key()) }
                    </span>
                </div>
                if let Some(tag) = item.tag {
                    <span class="item-card__tag" style={format!("background:{};", tag.color())}>
                        { tag.label() }
                    </span>
                }
            </header>
            <p class="item-card__desc">{ item.desc.clone() }</p>
            <footer class="item-card__foot">
                <div class="item-card__price">
                    if let Some(old) = item.old_price {
                        <s class="item-card__old" aria-label={t("shop.old_price")}>{ fmt_rub(u64::from(old)) }</s>
                    }
                    <strong>{ fmt_rub(u64::from(item.price)) }</strong>
                </div>
                <button
                    type="button"
                    class={classes!("btn", if p.purchased { "btn--bought" } else { "btn--primary" })}
                    disabled={p.purchased}
                    onclick={on_buy}
                >
                    { if p.purchased { t("shop.bought") } else { t("shop.buy") } }
                </button>
            </footer>
        </article>
    }
}
