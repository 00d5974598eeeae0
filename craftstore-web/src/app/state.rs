use crate::shop::{Catalog, Discount, ShopSession, SiteSettings};
use std::rc::Rc;
use yew::prelude::*;

/// Code advertised by the promo banner until an admin creates a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerPromo {
    pub code: String,
    pub discount: Discount,
}

impl Default for BannerPromo {
    fn default() -> Self {
        Self {
            code: "VIP50".to_string(),
            discount: Discount::new(50).unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: UseStateHandle<Rc<Catalog>>,
    pub session: UseStateHandle<ShopSession>,
    pub settings: UseStateHandle<SiteSettings>,
    pub settings_loaded: UseStateHandle<bool>,
    pub show_admin: UseStateHandle<bool>,
    pub banner_promo: UseStateHandle<BannerPromo>,
    pub current_language: UseStateHandle<String>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        catalog: use_state(load_catalog),
        session: use_state(ShopSession::default),
        settings: use_state(SiteSettings::default),
        settings_loaded: use_state(|| false),
        show_admin: use_state(|| false),
        banner_promo: use_state(BannerPromo::default),
        current_language: use_state(crate::i18n::current_lang),
    }
}

/// Embedded catalog, or an empty one if the bundled data is broken.
pub fn load_catalog() -> Rc<Catalog> {
    match Catalog::load_from_static() {
        Ok(catalog) => Rc::new(catalog),
        Err(err) => {
            log::error!("bundled catalog failed to load: {err}");
            Rc::new(Catalog::empty())
        }
    }
}

impl AppState {
    /// The admin panel only renders for an admin who opened it.
    #[must_use]
    pub fn admin_panel_open(&self) -> bool {
        *self.show_admin && self.session.is_admin()
    }

    #[must_use]
    pub fn needs_sign_in(&self) -> bool {
        self.session.identity().is_none()
    }
}
