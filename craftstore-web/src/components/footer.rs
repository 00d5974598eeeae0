use crate::i18n::tf;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub server_name: AttrValue,
    pub server_address: AttrValue,
}

#[function_component(Footer)]
pub fn footer(props: &Props) -> Html {
    html! {
        <footer class="site-footer">
            <div class="site-footer__brand">{ format!("⛏️ {}", props.server_name) }</div>
            <div class="site-footer__server">
                { tf("footer.server", &[("address", props.server_address.as_str())]) }
            </div>
            <small>{ tf("footer.copyright", &[("name", props.server_name.as_str())]) }</small>
        </footer>
    }
}
