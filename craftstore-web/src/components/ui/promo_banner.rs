use crate::i18n::{t, tf};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PromoBannerProps {
    pub code: AttrValue,
    pub discount_pct: u8,
}

#[function_component(PromoBanner)]
pub fn promo_banner(p: &PromoBannerProps) -> Html {
    let pct = p.discount_pct.to_string();
    html! {
        <aside class="promo-banner" aria-label={t("promo_banner.title")}>
            <div class="promo-banner__icon" aria-hidden="true">{"🎟️"}</div>
            <h3>{ t("promo_banner.title") }</h3>
            <p class="promo-banner__code"><strong>{ p.code.clone() }</strong></p>
            <p>{ tf("promo_banner.body", &[("pct", pct.as_str())]) }</p>
            <small>{ t("promo_banner.hint") }</small>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn shows_code_and_percentage() {
        crate::i18n::set_lang("en");
        let props = PromoBannerProps {
            code: AttrValue::from("SUMMER25"),
            discount_pct: 25,
        };
        let html = block_on(LocalServerRenderer::<PromoBanner>::with_props(props).render());
        crate::i18n::set_lang("ru");
        assert!(html.contains("SUMMER25"));
        assert!(html.contains("25% off"));
    }
}
