use crate::i18n::{t, tf};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeroProps {
    pub server_name: AttrValue,
    pub server_address: AttrValue,
    pub welcome_text: AttrValue,
    #[prop_or_default]
    pub username: Option<AttrValue>,
}

#[function_component(Hero)]
pub fn hero(p: &HeroProps) -> Html {
    html! {
        <section class="hero" aria-labelledby="hero-title">
            <div class="hero__badge">
                <span class="hero__dot" aria-hidden="true">{"●"}</span>
                { t("hero.online") }
            </div>
            <h1 id="hero-title" class="hero__title">{ p.server_name.clone() }</h1>
            if let Some(name) = p.username.as_ref() {
                <p class="hero__greeting">{ tf("hero.greeting", &[("name", name.as_str())]) }</p>
            }
            <p class="hero__welcome">{ p.welcome_text.clone() }</p>
            <div class="hero__address">
                <span>{ t("hero.server_address") }</span>
                <code>{ p.server_address.clone() }</code>
            </div>
            <a class="btn btn--primary" href="#shop">{ t("hero.to_shop") }</a>
        </section>
    }
}
