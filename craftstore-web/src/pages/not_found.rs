use yew::prelude::*;

/// Shown for any path the router does not recognise.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFoundPage)]
pub fn not_found_page(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ format!("🧱 {}", crate::i18n::t("not_found.title")) }</h1>
            <p>{ crate::i18n::t("not_found.body") }</p>
            <button type="button" class="btn btn--primary" onclick={go_home}>
                { crate::i18n::t("not_found.back") }
            </button>
        </section>
    }
}
