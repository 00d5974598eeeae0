//! Primary colour theming through the `--primary` CSS custom property
use crate::shop::SiteSettings;

pub const PRIMARY_VAR: &str = "--primary";

/// Inline style for the app root.
#[must_use]
pub fn root_style(settings: &SiteSettings) -> String {
    format!("{PRIMARY_VAR}:{};", settings.theme_color())
}

/// Re-apply the colour on `<html>` so portals outside the app root pick it up.
pub fn apply_primary_color(settings: &SiteSettings) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let root = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.document_element())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(root) = root
            && let Err(err) = root.style().set_property(PRIMARY_VAR, settings.theme_color())
        {
            log::warn!(
                "failed to apply primary colour: {}",
                crate::dom::js_error_message(&err)
            );
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = settings;
    }
}
