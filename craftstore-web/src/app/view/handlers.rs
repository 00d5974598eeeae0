use crate::app::state::{AppState, BannerPromo};
use crate::router::Route;
use crate::shop::{Identity, PromoCode, SiteSettings};
use yew::prelude::*;
use yew_router::prelude::Navigator;

#[derive(Clone)]
pub struct AppHandlers {
    pub auth: Callback<Identity>,
    pub open_admin: Callback<()>,
    pub close_admin: Callback<()>,
    pub purchased: Callback<u32>,
    pub settings_saved: Callback<SiteSettings>,
    pub promo_created: Callback<PromoCode>,
    pub lang_change: Callback<String>,
    pub go_home: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        Self {
            auth: build_auth(state),
            open_admin: build_show_admin(state, true),
            close_admin: build_show_admin(state, false),
            purchased: build_purchased(state),
            settings_saved: build_settings_saved(state),
            promo_created: build_promo_created(state),
            lang_change: build_lang_change(state),
            go_home: build_go_home(navigator),
        }
    }
}

pub fn build_auth(state: &AppState) -> Callback<Identity> {
    let session = state.session.clone();
    Callback::from(move |identity: Identity| {
        log::info!(
            "signed in as {}{}",
            identity.username,
            if identity.is_admin { " (admin)" } else { "" }
        );
        let mut next = (*session).clone();
        next.sign_in(identity);
        session.set(next);
    })
}

pub fn build_show_admin(state: &AppState, open: bool) -> Callback<()> {
    let show_admin = state.show_admin.clone();
    Callback::from(move |()| show_admin.set(open))
}

pub fn build_purchased(state: &AppState) -> Callback<u32> {
    let session = state.session.clone();
    Callback::from(move |item_id: u32| {
        let mut next = (*session).clone();
        next.mark_purchased(item_id);
        session.set(next);
    })
}

pub fn build_settings_saved(state: &AppState) -> Callback<SiteSettings> {
    let settings = state.settings.clone();
    Callback::from(move |saved: SiteSettings| {
        crate::theme::apply_primary_color(&saved);
        settings.set(saved);
    })
}

/// A freshly created code replaces the one advertised on the landing banner.
pub fn build_promo_created(state: &AppState) -> Callback<PromoCode> {
    let banner = state.banner_promo.clone();
    Callback::from(move |promo: PromoCode| {
        banner.set(BannerPromo {
            code: promo.code,
            discount: promo.discount,
        });
    })
}

pub fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    Callback::from(move |code: String| {
        crate::i18n::set_lang(&code);
        current_language.set(crate::i18n::current_lang());
    })
}

pub fn build_go_home(navigator: Option<Navigator>) -> Callback<()> {
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    })
}
