mod handlers;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::ui::admin_panel::AdminPanel;
use crate::components::ui::auth_modal::AuthModal;
use crate::i18n::t;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFoundPage;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Navigator;

pub fn render_app(state: &AppState, route: Option<&Route>, navigator: Option<Navigator>) -> Html {
    let handlers = AppHandlers::new(state, navigator);
    let settings = &*state.settings;
    let username = state
        .session
        .identity()
        .map(|identity| AttrValue::from(identity.username.clone()));

    let page = match route {
        Some(Route::NotFound) => html! { <NotFoundPage on_go_home={handlers.go_home.clone()} /> },
        Some(Route::Home) | None => html! {
            <HomePage
                catalog={(*state.catalog).clone()}
                settings={settings.clone()}
                username={username.clone()}
                purchased={state.session.purchased().clone()}
                banner={(*state.banner_promo).clone()}
                on_purchased={handlers.purchased.clone()}
            />
        },
    };

    html! {
        <div class="app" id="top" style={crate::theme::root_style(settings)}>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <a class="skip-link" href="#shop">{ t("app.skip_to_shop") }</a>
            <Header
                server_name={AttrValue::from(settings.server_name.clone())}
                {username}
                is_admin={state.session.is_admin()}
                on_admin={handlers.open_admin.clone()}
                current_lang={AttrValue::from((*state.current_language).clone())}
                on_lang_change={handlers.lang_change.clone()}
            />
            <main id="main" role="main">
                { page }
            </main>
            <Footer
                server_name={AttrValue::from(settings.server_name.clone())}
                server_address={AttrValue::from(settings.server_address.clone())}
            />
            <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            if state.needs_sign_in() {
                <AuthModal on_auth={handlers.auth.clone()} />
            }
            if state.admin_panel_open() {
                <AdminPanel
                    settings={settings.clone()}
                    on_close={handlers.close_admin.clone()}
                    on_settings_saved={handlers.settings_saved.clone()}
                    on_promo_created={handlers.promo_created.clone()}
                />
            }
        </div>
    }
}
