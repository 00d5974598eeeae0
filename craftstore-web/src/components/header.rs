use crate::i18n::{self, t};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub server_name: AttrValue,
    #[prop_or_default]
    pub username: Option<AttrValue>,
    #[prop_or_default]
    pub is_admin: bool,
    pub on_admin: Callback<()>,
    pub current_lang: AttrValue,
    pub on_lang_change: Callback<String>,
}

#[function_component(Header)]
pub fn header(props: &Props) -> Html {
    let on_admin = {
        let cb = props.on_admin.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let lang_buttons = i18n::locales().iter().map(|meta| {
        let code = meta.code;
        let on_lang = props.on_lang_change.clone();
        let active = props.current_lang == code;
        let onclick = Callback::from(move |_| on_lang.emit(code.to_string()));
        html! {
            <button
                type="button"
                class={classes!("lang-btn", active.then_some("lang-btn--active"))}
                aria-pressed={active.to_string()}
                title={meta.name}
                {onclick}
            >
                { code.to_uppercase() }
            </button>
        }
    });

    html! {
        <header class="site-header">
            <a class="site-header__brand" href="#top">{ format!("⛏️ {}", props.server_name) }</a>
            <nav class="site-header__nav" aria-label={t("header.nav_shop")}>
                <a href="#shop">{ t("header.nav_shop") }</a>
                <a href="#featured">{ t("header.nav_featured") }</a>
            </nav>
            <div class="site-header__actions">
                <div class="lang-switch" role="group" aria-label={t("header.language")}>
                    { for lang_buttons }
                </div>
                if props.is_admin {
                    <button
                        type="button"
                        class="btn btn--admin"
                        aria-label={t("header.admin_label")}
                        onclick={on_admin}
                    >
                        { format!("👑 {}", t("header.admin")) }
                    </button>
                }
                if let Some(name) = props.username.as_ref() {
                    <span class={classes!("user-badge", props.is_admin.then_some("user-badge--admin"))}>
                        if props.is_admin { {"👑 "} }
                        { name.clone() }
                    </span>
                }
            </div>
        </header>
    }
}
