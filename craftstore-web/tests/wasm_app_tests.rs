#![cfg(target_arch = "wasm32")]

use craftstore_web::app::App;
use craftstore_web::dom;
use wasm_bindgen_test::*;
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
async fn app_mounts_with_auth_modal_and_theme() {
    craftstore_web::i18n::set_lang("ru");
    let root = ensure_app_root();
    Renderer::<App>::with_root(root.clone()).render();
    dom::sleep_ms(50).await.expect("timer");

    let html = root.inner_html();
    assert!(html.contains("auth-modal"));
    assert!(html.contains("--primary"));
    assert!(dom::document().get_element_by_id(craftstore_web::a11y::STATUS_REGION_ID).is_some());
}

#[wasm_bindgen_test]
fn locale_choice_is_persisted() {
    craftstore_web::i18n::set_lang("en");
    let stored = dom::local_storage()
        .expect("local storage")
        .get_item(craftstore_web::i18n::LOCALE_STORAGE_KEY)
        .expect("read item");
    craftstore_web::i18n::set_lang("ru");
    assert_eq!(stored.as_deref(), Some("en"));
}

#[wasm_bindgen_test]
fn console_logging_initialises_once() {
    dom::init_logging();
    dom::init_logging();
    assert!(log::log_enabled!(log::Level::Info));
    log::info!("console logger ready");
}
