//! In-memory stand-in for the remote shop API
//!
//! [`MemoryBackend`] answers the same actions as the hosted service and keeps
//! its observable rules: codes are trimmed and uppercased, discounts outside
//! `0..=100` are refused, purchases with an unknown or inactive code fail,
//! successful promo purchases bump the usage counter, and statistics are
//! aggregated from recorded purchases. Dates are simulated with
//! [`MemoryBackend::set_day`].
use crate::api::{ApiAction, ApiError, ApiRequest, ApiTransport, HttpMethod};
use crate::pricing::{Discount, final_price};
use crate::promo::PromoCode;
use crate::settings::SiteSettings;
use crate::stats::{DailyPoint, PeriodTotals, Stats, TopItem};
use serde_json::{Map, Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

const TOP_ITEMS: usize = 5;
const DAILY_WINDOW: usize = 7;
const DEFAULT_DAY: &str = "2025-03-14";

pub const ERR_EMPTY_CODE: &str = "Введите код";
pub const ERR_DISCOUNT_RANGE: &str = "Скидка от 0 до 100%";
pub const ERR_DUPLICATE_CODE: &str = "Такой код уже существует";
pub const ERR_PROMO_UNAVAILABLE: &str = "Промокод не найден или неактивен";
pub const ERR_INTERNAL: &str = "Внутренняя ошибка сервера";
pub const ERR_NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone)]
struct PurchaseRecord {
    username: String,
    item_id: u32,
    item_name: String,
    item_emoji: String,
    final_price: u32,
    day: String,
}

#[derive(Debug)]
struct BackendState {
    /// Oldest first; listed newest first.
    promos: Vec<PromoCode>,
    settings: Map<String, Value>,
    purchases: Vec<PurchaseRecord>,
    next_promo_id: i64,
    day: String,
    calls: Vec<(ApiAction, HttpMethod)>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            promos: Vec::new(),
            settings: Map::new(),
            purchases: Vec::new(),
            next_promo_id: 1,
            day: DEFAULT_DAY.to_string(),
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RefCell<BackendState>,
    fail_mutations: Cell<bool>,
    offline: Cell<bool>,
}

fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or("")
}

fn int_field(body: &Value, key: &str) -> i64 {
    match body.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn error(message: &str) -> Value {
    json!({ "error": message })
}

fn ok() -> Value {
    json!({ "ok": true })
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend preloaded with the demo promo codes and default settings.
    #[must_use]
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.borrow_mut();
            for (code, pct, active) in [("OLD30", 30, false), ("WELCOME20", 20, true), ("VIP50", 50, true)] {
                let id = state.next_promo_id;
                state.next_promo_id += 1;
                state.promos.push(PromoCode {
                    id,
                    code: code.to_string(),
                    discount: Discount::new(pct).unwrap_or_default(),
                    usages: 0,
                    active,
                });
            }
            if let Ok(Value::Object(map)) = serde_json::to_value(SiteSettings::default()) {
                state.settings = map;
            }
        }
        backend
    }

    /// Make PUT, DELETE and settings writes answer with a server error and
    /// change nothing.
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.set(fail);
    }

    /// Make every request fail at the transport level.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Date stamped on purchases recorded from now on.
    pub fn set_day(&self, day: &str) {
        self.state.borrow_mut().day = day.to_string();
    }

    /// Requests that reached the backend, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(ApiAction, HttpMethod)> {
        self.state.borrow().calls.clone()
    }

    #[must_use]
    pub fn promo(&self, code: &str) -> Option<PromoCode> {
        self.state
            .borrow()
            .promos
            .iter()
            .find(|p| p.code == code)
            .cloned()
    }

    #[must_use]
    pub fn purchase_count(&self) -> usize {
        self.state.borrow().purchases.len()
    }

    fn handle(&self, request: &ApiRequest) -> Value {
        let body = request.body.clone().unwrap_or(Value::Null);
        let mutation = matches!(request.method, HttpMethod::Put | HttpMethod::Delete)
            || (request.action == ApiAction::Settings && request.method == HttpMethod::Post);
        let mut state = self.state.borrow_mut();
        state.calls.push((request.action, request.method));
        if mutation && self.fail_mutations.get() {
            return error(ERR_INTERNAL);
        }
        match (request.method, request.action) {
            (HttpMethod::Get, ApiAction::Stats) => state.stats(),
            (HttpMethod::Get, ApiAction::Promos) => {
                let promos: Vec<&PromoCode> = state.promos.iter().rev().collect();
                json!({ "promos": promos })
            }
            (HttpMethod::Post, ApiAction::Promos) => state.create_promo(&body),
            (HttpMethod::Put, ApiAction::Promos) => {
                let id = int_field(&body, "id");
                let active = body.get("active").and_then(Value::as_bool).unwrap_or(false);
                if let Some(promo) = state.promos.iter_mut().find(|p| p.id == id) {
                    promo.active = active;
                }
                ok()
            }
            (HttpMethod::Delete, ApiAction::Promos) => {
                let id = int_field(&body, "id");
                state.promos.retain(|p| p.id != id);
                ok()
            }
            (HttpMethod::Get, ApiAction::Settings) => Value::Object(state.settings.clone()),
            (HttpMethod::Post, ApiAction::Settings) => {
                if let Value::Object(fields) = body {
                    for (key, value) in fields {
                        let text = value
                            .as_str()
                            .map_or_else(|| value.to_string(), ToString::to_string);
                        state.settings.insert(key, Value::String(text));
                    }
                }
                ok()
            }
            (HttpMethod::Post, ApiAction::Purchase) => state.purchase(&body),
            (HttpMethod::Post, ApiAction::ValidatePromo) => {
                let code = str_field(&body, "code").trim().to_uppercase();
                match state.active_promo(&code) {
                    Some(promo) => json!({ "valid": true, "discount": promo.discount }),
                    None => json!({ "valid": false, "discount": 0 }),
                }
            }
            _ => error(ERR_NOT_FOUND),
        }
    }
}

fn totals<'a>(records: impl Iterator<Item = &'a PurchaseRecord>) -> PeriodTotals {
    records.fold(PeriodTotals::default(), |acc, r| PeriodTotals {
        count: acc.count + 1,
        revenue: acc.revenue + u64::from(r.final_price),
    })
}

impl BackendState {
    fn active_promo(&self, code: &str) -> Option<&PromoCode> {
        self.promos.iter().find(|p| p.active && p.code == code)
    }

    fn create_promo(&mut self, body: &Value) -> Value {
        let code = str_field(body, "code").trim().to_uppercase();
        if code.is_empty() {
            return error(ERR_EMPTY_CODE);
        }
        let Some(discount) = u32::try_from(int_field(body, "discount"))
            .ok()
            .and_then(|pct| Discount::new(pct).ok())
        else {
            return error(ERR_DISCOUNT_RANGE);
        };
        if self.promos.iter().any(|p| p.code == code) {
            return error(ERR_DUPLICATE_CODE);
        }
        let promo = PromoCode {
            id: self.next_promo_id,
            code,
            discount,
            usages: 0,
            active: true,
        };
        self.next_promo_id += 1;
        self.promos.push(promo.clone());
        json!(promo)
    }

    fn purchase(&mut self, body: &Value) -> Value {
        let original_price = u32::try_from(int_field(body, "original_price")).unwrap_or(0);
        let code = str_field(body, "promo_code").trim().to_uppercase();
        let mut discount = Discount::NONE;
        if !code.is_empty() {
            let Some(promo) = self.promos.iter_mut().find(|p| p.active && p.code == code) else {
                return error(ERR_PROMO_UNAVAILABLE);
            };
            promo.usages += 1;
            discount = promo.discount;
        }
        let username = match str_field(body, "username") {
            "" => crate::identity::GUEST_NAME,
            name => name,
        };
        let record = PurchaseRecord {
            username: username.to_string(),
            item_id: u32::try_from(int_field(body, "item_id")).unwrap_or(0),
            item_name: str_field(body, "item_name").to_string(),
            item_emoji: str_field(body, "item_emoji").to_string(),
            final_price: final_price(original_price, discount),
            day: self.day.clone(),
        };
        let price = record.final_price;
        self.purchases.push(record);
        json!({
            "purchase_id": self.purchases.len(),
            "final_price": price,
            "discount": discount,
        })
    }

    fn stats(&self) -> Value {
        let mut top: Vec<TopItem> = Vec::new();
        for record in &self.purchases {
            match top.iter_mut().find(|t| {
                t.id == record.item_id && t.name == record.item_name && t.emoji == record.item_emoji
            }) {
                Some(entry) => entry.count += 1,
                None => top.push(TopItem {
                    id: record.item_id,
                    name: record.item_name.clone(),
                    emoji: record.item_emoji.clone(),
                    count: 1,
                }),
            }
        }
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(TOP_ITEMS);

        let mut by_day: BTreeMap<&str, PeriodTotals> = BTreeMap::new();
        for record in &self.purchases {
            let entry = by_day.entry(record.day.as_str()).or_default();
            entry.count += 1;
            entry.revenue += u64::from(record.final_price);
        }
        let skip = by_day.len().saturating_sub(DAILY_WINDOW);
        let daily = by_day
            .into_iter()
            .skip(skip)
            .map(|(day, t)| DailyPoint {
                day: day.to_string(),
                count: t.count,
                revenue: t.revenue,
            })
            .collect();

        let players: BTreeSet<&str> = self.purchases.iter().map(|r| r.username.as_str()).collect();
        let stats = Stats {
            today: totals(self.purchases.iter().filter(|r| r.day == self.day)),
            total: totals(self.purchases.iter()),
            unique_players: players.len() as u64,
            active_promos: self.promos.iter().filter(|p| p.active).count() as u64,
            top_items: top,
            daily,
        };
        json!(stats)
    }
}

impl ApiTransport for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if self.offline.get() {
            return Err(ApiError::Transport("backend offline".to_string()));
        }
        Ok(self.handle(&request))
    }
}
