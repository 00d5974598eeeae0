use crate::i18n::t;
use crate::shop::Item;
use yew::prelude::*;

/// Number of items in the landing showcase.
pub const SHOWCASE_LEN: usize = 6;

#[derive(Properties, PartialEq, Clone)]
pub struct FeaturedProps {
    pub items: Vec<Item>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Featured)]
pub fn featured(p: &FeaturedProps) -> Html {
    let cards = p.items.iter().map(|item| {
        let color = item.rarity.color();
        html! {
            <li key={item.id} class="featured__card" style={format!("border-color:{color};")}>
                <div class="featured__emoji" aria-hidden="true">{ item.emoji.clone() }</div>
                <div class="featured__name">{ item.name.clone() }</div>
                <div class="featured__rarity" style={format!("color:{color};")}>
                    { t(item.rarity.label_key()) }
                </div>
            </li>
        }
    });

    html! {
        <section id="featured" class="featured" aria-labelledby="featured-title">
            <h2 id="featured-title">{ format!("✨ {}", t("featured.title")) }</h2>
            <p class="featured__subtitle">{ t("featured.subtitle") }</p>
            <ul class="featured__grid">
                { for cards }
            </ul>
            { for p.children.iter() }
        </section>
    }
}
