use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// When `false` the backdrop, Escape and close button do nothing.
    #[prop_or(true)]
    pub dismissible: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let title_id = format!("modal-title-{}", *modal_id);
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with((), move |()| {
            if let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
            || {}
        });
    }

    let on_backdrop = {
        let cb = props.on_close.clone();
        let dismissible = props.dismissible;
        Callback::from(move |_: MouseEvent| {
            if dismissible {
                cb.emit(());
            }
        })
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let cb = props.on_close.clone();
        let dismissible = props.dismissible;
        Callback::from(move |e: KeyboardEvent| {
            if dismissible && e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    html! {
        <div class="modal-backdrop" role="presentation" onclick={on_backdrop.clone()}>
            <div
                class={classes!("modal", props.class.clone())}
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                tabindex="-1"
                onclick={stop}
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <div class="modal__header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    if props.dismissible {
                        <button
                            type="button"
                            class="modal__close"
                            aria-label={crate::i18n::t("purchase.close")}
                            onclick={on_backdrop}
                        >
                            {"✕"}
                        </button>
                    }
                </div>
                <div class="modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
