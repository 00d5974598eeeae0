use craftstore_web::api::{DEFAULT_API_BASE, FetchTransport, api_base, client};
use craftstore_web::i18n;
use craftstore_web::router::Route;
use craftstore_web::shop::{ApiError, SiteSettings};
use craftstore_web::theme;
use futures::executor::block_on;
use yew_router::Routable;

#[test]
fn i18n_switches_and_falls_back() {
    i18n::set_lang("en");
    assert_eq!(i18n::current_lang(), "en");
    assert_eq!(i18n::t("shop.buy"), "Buy");
    assert_eq!(i18n::t("missing.key"), "missing.key");

    i18n::set_lang("xx");
    assert_eq!(i18n::current_lang(), "en");

    i18n::set_lang("ru");
    assert_eq!(i18n::t("shop.buy"), "Купить");
    assert_eq!(
        i18n::tf("admin.promos.usages", &[("count", "5")]),
        "5 использований"
    );
}

#[test]
fn locale_metadata_lists_russian_first() {
    let metas = i18n::locales();
    assert_eq!(metas.first().map(|m| m.code), Some(i18n::DEFAULT_LANG));
    assert!(metas.iter().any(|m| m.code == i18n::FALLBACK_LANG));
}

#[test]
fn price_formatting_groups_thousands() {
    assert_eq!(i18n::fmt_rub(299), "299 ₽");
    assert_eq!(i18n::fmt_rub(12_990), "12\u{202f}990 ₽");
    assert_eq!(i18n::fmt_pct(50), "50%");
}

#[test]
fn theme_style_ignores_malformed_colour() {
    let mut settings = SiteSettings::default();
    settings.primary_color = "#ff8800".to_string();
    assert_eq!(theme::root_style(&settings), "--primary:#ff8800;");
    settings.primary_color = "orange".to_string();
    assert_eq!(theme::root_style(&settings), "--primary:#4ade80;");
}

#[test]
fn default_client_targets_configured_base() {
    let shop = client();
    assert_eq!(shop.transport().base(), api_base());
    assert!(!DEFAULT_API_BASE.ends_with('/'));
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn host_transport_reports_unavailable_fetch() {
    let shop = craftstore_web::shop::ShopClient::new(FetchTransport::new("http://localhost:9"));
    let err = block_on(shop.get_settings()).expect_err("no fetch off the browser");
    assert!(matches!(err, ApiError::Transport(msg) if msg.contains("?action=settings")));
}

#[test]
fn unknown_paths_fall_back_to_not_found() {
    assert_eq!(Route::recognize("/"), Some(Route::Home));
    assert_eq!(Route::NotFound.to_path(), "/404");
}
