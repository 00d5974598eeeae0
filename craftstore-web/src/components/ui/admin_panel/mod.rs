//! Admin panel: promo code management, site settings and sales stats.
//!
//! Each tab loads its own data when first shown and keeps its own error
//! line, so one failing request does not blank the whole panel.
mod promos;
mod settings;
mod stats;

pub use promos::{BookState, PromosTab};
pub use settings::SettingsTab;
pub use stats::StatsTab;

use crate::components::modal::Modal;
use crate::i18n::{t, tf};
use crate::shop::{AdminError, AdminTab, PromoCode, PromoDraftError, SiteSettings};
use yew::prelude::*;

/// Inline text for a failed admin action.
///
/// Server rejections are shown as the server worded them.
pub fn error_text(err: &AdminError) -> String {
    match err {
        AdminError::Api(api) => api
            .server_message()
            .map_or_else(|| t(err.message_key()), ToString::to_string),
        AdminError::Draft(PromoDraftError::OutOfRange { min, max }) => {
            let (min, max) = (min.to_string(), max.to_string());
            tf(err.message_key(), &[("min", min.as_str()), ("max", max.as_str())])
        }
        AdminError::Draft(_) | AdminError::Settings(_) => t(err.message_key()),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AdminPanelProps {
    pub settings: SiteSettings,
    pub on_close: Callback<()>,
    pub on_settings_saved: Callback<SiteSettings>,
    pub on_promo_created: Callback<PromoCode>,
    #[prop_or_default]
    pub initial_tab: AdminTab,
}

#[function_component(AdminPanel)]
pub fn admin_panel(p: &AdminPanelProps) -> Html {
    let tab = use_state(|| p.initial_tab);

    let tabs = AdminTab::ALL.iter().map(|&id| {
        let selected = *tab == id;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_| tab.set(id))
        };
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("admin-tab", selected.then_some("admin-tab--active"))}
                aria-selected={selected.to_string()}
                {onclick}
            >
                { t(id.label_key()) }
            </button>
        }
    });

    let body = match *tab {
        AdminTab::Promos => html! { <PromosTab on_promo_created={p.on_promo_created.clone()} /> },
        AdminTab::Settings => html! {
            <SettingsTab initial={p.settings.clone()} on_saved={p.on_settings_saved.clone()} />
        },
        AdminTab::Stats => html! { <StatsTab /> },
    };

    html! {
        <Modal
            title={AttrValue::from(format!("👑 {}", t("admin.title")))}
            class={classes!("admin-panel")}
            on_close={p.on_close.clone()}
        >
            <p class="admin-panel__subtitle">{ t("admin.subtitle") }</p>
            <div class="admin-panel__tabs" role="tablist">{ for tabs }</div>
            <div class="admin-panel__body" role="tabpanel">{ body }</div>
        </Modal>
    }
}
