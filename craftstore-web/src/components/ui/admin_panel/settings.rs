use super::error_text;
use crate::i18n::t;
use crate::shop::admin;
use crate::shop::{SAVED_FLASH_MS, SiteSettings};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SettingsField {
    ServerName,
    ServerAddress,
    WelcomeText,
    PrimaryColor,
}

fn update(settings: &SiteSettings, field: SettingsField, value: String) -> SiteSettings {
    let mut next = settings.clone();
    match field {
        SettingsField::ServerName => next.server_name = value,
        SettingsField::ServerAddress => next.server_address = value,
        SettingsField::WelcomeText => next.welcome_text = value,
        SettingsField::PrimaryColor => next.primary_color = value,
    }
    next
}

fn event_value(e: &InputEvent) -> Option<String> {
    let target = e.target()?;
    match target.dyn_into::<HtmlInputElement>() {
        Ok(input) => Some(input.value()),
        Err(other) => other
            .dyn_into::<HtmlTextAreaElement>()
            .ok()
            .map(|area| area.value()),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsTabProps {
    pub initial: SiteSettings,
    pub on_saved: Callback<SiteSettings>,
}

#[function_component(SettingsTab)]
pub fn settings_tab(p: &SettingsTabProps) -> Html {
    let form = use_state(|| p.initial.clone());
    let saving = use_state(|| false);
    let saved = use_state(|| false);
    let error = use_state(|| None::<String>);

    // Start from the stored record rather than whatever the storefront shows
    {
        let form = form.clone();
        let error = error.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match crate::api::client().get_settings().await {
                    Ok(stored) => form.set(stored),
                    Err(err) => {
                        log::warn!("loading settings for the admin form failed: {err}");
                        error.set(Some(t("admin.errors.load")));
                    }
                }
            });
            || {}
        });
    }

    let oninput_for = |field: SettingsField| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = event_value(&e) {
                form.set(update(&form, field, value));
            }
        })
    };

    let on_save = {
        let form = form.clone();
        let saving = saving.clone();
        let saved = saved.clone();
        let error = error.clone();
        let on_saved = p.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            saving.set(true);
            let snapshot = (*form).clone();
            let saving = saving.clone();
            let saved = saved.clone();
            let error = error.clone();
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = admin::save_settings(&crate::api::client(), &snapshot).await;
                saving.set(false);
                match result {
                    Ok(()) => {
                        log::info!("site settings saved");
                        error.set(None);
                        on_saved.emit(snapshot);
                        saved.set(true);
                        crate::a11y::set_status(&t("admin.settings.saved"));
                        let _ = crate::dom::sleep_ms(SAVED_FLASH_MS).await;
                        saved.set(false);
                    }
                    Err(err) => error.set(Some(error_text(&err))),
                }
            });
        })
    };

    let submit_label = if *saving {
        t("admin.settings.saving")
    } else if *saved {
        t("admin.settings.saved")
    } else {
        t("admin.settings.save")
    };

    html! {
        <form class="admin-settings" onsubmit={on_save}>
            <label for="set-name">{ t("admin.settings.server_name") }</label>
            <input id="set-name" class="input" type="text"
                value={form.server_name.clone()}
                oninput={oninput_for(SettingsField::ServerName)} />
            <label for="set-address">{ t("admin.settings.server_address") }</label>
            <input id="set-address" class="input" type="text"
                value={form.server_address.clone()}
                oninput={oninput_for(SettingsField::ServerAddress)} />
            <label for="set-welcome">{ t("admin.settings.welcome_text") }</label>
            <textarea id="set-welcome" class="input" rows="3"
                value={form.welcome_text.clone()}
                oninput={oninput_for(SettingsField::WelcomeText)} />
            <label for="set-color">{ t("admin.settings.primary_color") }</label>
            <div class="admin-settings__color">
                <input id="set-color" class="input" type="text"
                    value={form.primary_color.clone()}
                    oninput={oninput_for(SettingsField::PrimaryColor)} />
                <span class="swatch" style={format!("background:{};", form.theme_color())} aria-hidden="true"></span>
            </div>
            if let Some(message) = (*error).clone() {
                <p class="admin-error" role="alert">{ format!("⚠️ {message}") }</p>
            }
            <button
                type="submit"
                class={classes!("btn", "btn--primary", saved.then_some("btn--saved"))}
                disabled={*saving}
            >
                { submit_label }
            </button>
        </form>
    }
}
