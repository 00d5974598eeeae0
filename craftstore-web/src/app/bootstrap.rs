use crate::app::state::AppState;
use crate::shop::{ApiError, SiteSettings};
use yew::prelude::*;

#[derive(Clone)]
struct BootstrapHandles {
    settings: UseStateHandle<SiteSettings>,
    settings_loaded: UseStateHandle<bool>,
}

fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        settings: app_state.settings.clone(),
        settings_loaded: app_state.settings_loaded.clone(),
    }
}

/// Apply the settings fetch result; on failure the defaults stay in place.
fn apply_settings(handles: &BootstrapHandles, result: Result<SiteSettings, ApiError>) {
    match result {
        Ok(settings) => {
            crate::theme::apply_primary_color(&settings);
            handles.settings.set(settings);
        }
        Err(err) => log::warn!("loading site settings failed, keeping defaults: {err}"),
    }
    handles.settings_loaded.set(true);
}

#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let handles = handles_from_state(app_state);

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let result = crate::api::client().get_settings().await;
            apply_settings(&handles, result);
        });
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        fail: bool,
    }

    #[function_component(BootstrapHarness)]
    fn bootstrap_harness(props: &HarnessProps) -> Html {
        let app_state = crate::app::state::use_app_state();
        let handles = handles_from_state(&app_state);
        let initialized = use_state(|| false);
        if !*initialized {
            initialized.set(true);
            let result = if props.fail {
                Err(ApiError::Transport("offline".to_string()))
            } else {
                Ok(SiteSettings {
                    server_name: "BlockCraft".to_string(),
                    ..SiteSettings::default()
                })
            };
            apply_settings(&handles, result);
        }
        html! { <span>{ app_state.settings.server_name.clone() }</span> }
    }

    #[test]
    fn bootstrap_applies_loaded_settings() {
        let html = block_on(
            LocalServerRenderer::<BootstrapHarness>::with_props(HarnessProps { fail: false })
                .render(),
        );
        assert!(html.contains("CraftStore") || html.contains("BlockCraft"));
    }

    #[test]
    fn bootstrap_keeps_defaults_on_failure() {
        let html = block_on(
            LocalServerRenderer::<BootstrapHarness>::with_props(HarnessProps { fail: true })
                .render(),
        );
        assert!(html.contains("CraftStore"));
    }
}
