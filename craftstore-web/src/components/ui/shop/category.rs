use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CategoryBarProps {
    pub categories: Vec<String>,
    pub active: AttrValue,
    pub on_select: Callback<String>,
}

#[function_component(CategoryBar)]
pub fn category_bar(p: &CategoryBarProps) -> Html {
    let buttons = p.categories.iter().map(|category| {
        let selected = p.active == category.as_str();
        let onclick = {
            let cb = p.on_select.clone();
            let category = category.clone();
            Callback::from(move |_| cb.emit(category.clone()))
        };
        html! {
            <button
                key={category.clone()}
                type="button"
                role="tab"
                class={classes!("category-btn", selected.then_some("category-btn--active"))}
                aria-selected={selected.to_string()}
                {onclick}
            >
                { category.clone() }
            </button>
        }
    });

    html! {
        <div class="category-bar" role="tablist" aria-label={crate::i18n::t("shop.categories")}>
            { for buttons }
        </div>
    }
}
