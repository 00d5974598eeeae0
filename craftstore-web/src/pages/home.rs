use crate::app::BannerPromo;
use crate::components::ui::featured::{Featured, SHOWCASE_LEN};
use crate::components::ui::hero::Hero;
use crate::components::ui::promo_banner::PromoBanner;
use crate::components::ui::shop::Shop;
use crate::shop::{Catalog, GUEST_NAME, Item, SiteSettings};
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::prelude::*;

/// Landing page: hero, catalog, showcase and promo banner.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub catalog: Rc<Catalog>,
    pub settings: SiteSettings,
    /// `None` until the visitor signs in or continues as a guest.
    #[prop_or_default]
    pub username: Option<AttrValue>,
    pub purchased: BTreeSet<u32>,
    pub banner: BannerPromo,
    pub on_purchased: Callback<u32>,
}

#[function_component(HomePage)]
pub fn home_page(props: &Props) -> Html {
    let showcase: Vec<Item> = props
        .catalog
        .featured(SHOWCASE_LEN)
        .into_iter()
        .cloned()
        .collect();
    let buyer = props
        .username
        .clone()
        .unwrap_or_else(|| AttrValue::from(GUEST_NAME));

    html! {
        <>
            <Hero
                server_name={AttrValue::from(props.settings.server_name.clone())}
                server_address={AttrValue::from(props.settings.server_address.clone())}
                welcome_text={AttrValue::from(props.settings.welcome_text.clone())}
                username={props.username.clone()}
            />
            <Shop
                catalog={props.catalog.clone()}
                username={buyer}
                purchased={props.purchased.clone()}
                on_purchased={props.on_purchased.clone()}
            />
            <Featured items={showcase}>
                <PromoBanner
                    code={AttrValue::from(props.banner.code.clone())}
                    discount_pct={props.banner.discount.percent()}
                />
            </Featured>
        </>
    }
}
