use crate::i18n::{fmt_number, fmt_rub, t};
use crate::shop::{PeriodTotals, Stats};
use yew::prelude::*;

fn period_card(title_key: &str, totals: PeriodTotals) -> Html {
    html! {
        <div class="stat-card">
            <h4>{ t(title_key) }</h4>
            <dl>
                <dt>{ t("admin.stats.purchases") }</dt>
                <dd>{ fmt_number(totals.count) }</dd>
                <dt>{ t("admin.stats.revenue") }</dt>
                <dd>{ fmt_rub(totals.revenue) }</dd>
            </dl>
        </div>
    }
}

fn render_stats(stats: &Stats) -> Html {
    let bars = stats.top_item_bars().into_iter().map(|(item, width)| {
        html! {
            <li key={item.id} class="top-item">
                <span class="top-item__label">{ format!("{} {}", item.emoji, item.name) }</span>
                <span class="top-item__bar" style={format!("width:{width}%;")}></span>
                <span class="top-item__count">{ fmt_number(item.count) }</span>
            </li>
        }
    });
    let days = stats.daily.iter().map(|point| {
        html! {
            <tr key={point.day.clone()}>
                <td>{ point.day.clone() }</td>
                <td>{ fmt_number(point.count) }</td>
                <td>{ fmt_rub(point.revenue) }</td>
            </tr>
        }
    });

    html! {
        <div class="admin-stats">
            <div class="admin-stats__cards">
                { period_card("admin.stats.today", stats.today) }
                { period_card("admin.stats.total", stats.total) }
                <div class="stat-card">
                    <h4>{ t("admin.stats.players") }</h4>
                    <strong>{ fmt_number(stats.unique_players) }</strong>
                </div>
                <div class="stat-card">
                    <h4>{ t("admin.stats.active_promos") }</h4>
                    <strong>{ fmt_number(stats.active_promos) }</strong>
                </div>
            </div>
            <h4>{ t("admin.stats.top_items") }</h4>
            if stats.top_items.is_empty() {
                <p class="admin-empty">{ t("admin.stats.empty") }</p>
            } else {
                <ol class="top-items">{ for bars }</ol>
            }
            <h4>{ t("admin.stats.daily") }</h4>
            if !stats.daily.is_empty() {
                <table class="daily-table">
                    <thead>
                        <tr>
                            <th scope="col">{ t("admin.stats.day") }</th>
                            <th scope="col">{ t("admin.stats.count") }</th>
                            <th scope="col">{ t("admin.stats.sum") }</th>
                        </tr>
                    </thead>
                    <tbody>{ for days }</tbody>
                </table>
            }
        </div>
    }
}

#[function_component(StatsTab)]
pub fn stats_tab() -> Html {
    let stats = use_state(|| None::<Stats>);
    let error = use_state(|| None::<String>);

    {
        let stats = stats.clone();
        let error = error.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match crate::api::client().get_stats().await {
                    Ok(loaded) => stats.set(Some(loaded)),
                    Err(err) => {
                        log::warn!("loading stats failed: {err}");
                        error.set(Some(t("admin.errors.load")));
                    }
                }
            });
            || {}
        });
    }

    match (stats.as_ref(), error.as_ref()) {
        (Some(loaded), _) => render_stats(loaded),
        (None, Some(message)) => html! { <p class="admin-error" role="alert">{ message.clone() }</p> },
        (None, None) => html! { <p class="admin-loading" aria-busy="true">{ t("app.loading") }</p> },
    }
}
