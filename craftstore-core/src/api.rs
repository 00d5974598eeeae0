//! Typed client for the remote shop API
//!
//! The API is a single endpoint that dispatches on an `action` query parameter
//! and the HTTP method. [`ShopClient`] builds requests and decodes responses;
//! an [`ApiTransport`] only moves JSON, so the browser `fetch` binding and the
//! in-memory test backend share all protocol handling.
use crate::pricing::Discount;
use crate::promo::{NewPromo, PromoCode, PromoValidation, normalize_code};
use crate::purchase::{PurchaseReceipt, PurchaseRequest};
use crate::settings::SiteSettings;
use crate::stats::Stats;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiAction {
    Stats,
    Promos,
    Settings,
    Purchase,
    ValidatePromo,
}

impl ApiAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Promos => "promos",
            Self::Settings => "settings",
            Self::Purchase => "purchase",
            Self::ValidatePromo => "validate-promo",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One call against the shop endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub action: ApiAction,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub const fn get(action: ApiAction) -> Self {
        Self {
            action,
            method: HttpMethod::Get,
            body: None,
        }
    }

    #[must_use]
    pub const fn with_body(action: ApiAction, method: HttpMethod, body: Value) -> Self {
        Self {
            action,
            method,
            body: Some(body),
        }
    }

    /// Full request URL for an endpoint rooted at `base`.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}/?action={}", base.trim_end_matches('/'), self.action)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    /// Business error reported in the response's `error` field.
    #[error("{0}")]
    Server(String),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response missing {0}")]
    MissingField(&'static str),
}

impl ApiError {
    /// Message suitable for showing verbatim, if the server provided one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Moves a request to the shop API and returns the decoded JSON body.
///
/// Implementations return the body even for non-2xx statuses; business
/// errors are recognised by [`ShopClient`] from the `error` field.
#[allow(async_fn_in_trait)]
pub trait ApiTransport {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request cannot be delivered
    /// and [`ApiError::Decode`] when the body is not JSON.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

#[derive(Debug, Deserialize)]
struct PromoList {
    #[serde(default)]
    promos: Vec<PromoCode>,
}

fn server_error(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    if let Some(err) = server_error(&value) {
        return Err(ApiError::Server(err));
    }
    Ok(serde_json::from_value(value)?)
}

fn acknowledge(value: &Value) -> Result<(), ApiError> {
    server_error(value).map_or(Ok(()), |err| Err(ApiError::Server(err)))
}

/// Typed operations over an [`ApiTransport`].
#[derive(Debug, Clone, Default)]
pub struct ShopClient<T> {
    transport: T,
}

impl<T: ApiTransport> ShopClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// # Errors
    ///
    /// Propagates transport, server and decode failures.
    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        let value = self.transport.send(ApiRequest::get(ApiAction::Stats)).await?;
        decode(value)
    }

    /// # Errors
    ///
    /// Propagates transport, server and decode failures.
    pub async fn get_promos(&self) -> Result<Vec<PromoCode>, ApiError> {
        let value = self
            .transport
            .send(ApiRequest::get(ApiAction::Promos))
            .await?;
        decode::<PromoList>(value).map(|list| list.promos)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Server`] when the API refuses the code.
    pub async fn create_promo(
        &self,
        code: &str,
        discount: Discount,
    ) -> Result<PromoCode, ApiError> {
        let body = serde_json::to_value(NewPromo { code, discount })?;
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::Promos,
                HttpMethod::Post,
                body,
            ))
            .await?;
        decode(value)
    }

    /// # Errors
    ///
    /// Propagates transport and server failures.
    pub async fn toggle_promo(&self, id: i64, active: bool) -> Result<(), ApiError> {
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::Promos,
                HttpMethod::Put,
                json!({ "id": id, "active": active }),
            ))
            .await?;
        acknowledge(&value)
    }

    /// # Errors
    ///
    /// Propagates transport and server failures.
    pub async fn delete_promo(&self, id: i64) -> Result<(), ApiError> {
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::Promos,
                HttpMethod::Delete,
                json!({ "id": id }),
            ))
            .await?;
        acknowledge(&value)
    }

    /// # Errors
    ///
    /// Propagates transport, server and decode failures.
    pub async fn get_settings(&self) -> Result<SiteSettings, ApiError> {
        let value = self
            .transport
            .send(ApiRequest::get(ApiAction::Settings))
            .await?;
        decode(value)
    }

    /// # Errors
    ///
    /// Propagates transport and server failures.
    pub async fn save_settings(&self, settings: &SiteSettings) -> Result<(), ApiError> {
        let body = serde_json::to_value(settings)?;
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::Settings,
                HttpMethod::Post,
                body,
            ))
            .await?;
        acknowledge(&value)
    }

    /// Submit a purchase. Succeeds only when the response carries a purchase id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] with the API's message when the purchase
    /// is rejected, or [`ApiError::MissingField`] when no id comes back.
    pub async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseReceipt, ApiError> {
        let body = serde_json::to_value(request)?;
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::Purchase,
                HttpMethod::Post,
                body,
            ))
            .await?;
        if let Some(err) = server_error(&value) {
            return Err(ApiError::Server(err));
        }
        if value.get("purchase_id").is_none_or(Value::is_null) {
            return Err(ApiError::MissingField("purchase_id"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Ask whether `code` is an active promo. The code is normalised first.
    ///
    /// # Errors
    ///
    /// Propagates transport, server and decode failures.
    pub async fn validate_promo(&self, code: &str) -> Result<PromoValidation, ApiError> {
        let value = self
            .transport
            .send(ApiRequest::with_body(
                ApiAction::ValidatePromo,
                HttpMethod::Post,
                json!({ "code": normalize_code(code) }),
            ))
            .await?;
        decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Replays a canned body and records what was sent.
    struct Canned {
        reply: Result<Value, String>,
        sent: RefCell<Vec<ApiRequest>>,
    }

    impl Canned {
        fn ok(reply: Value) -> Self {
            Self {
                reply: Ok(reply),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                reply: Err("offline".to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl ApiTransport for Canned {
        async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
            self.sent.borrow_mut().push(request);
            self.reply.clone().map_err(ApiError::Transport)
        }
    }

    #[test]
    fn builds_action_urls() {
        let req = ApiRequest::get(ApiAction::ValidatePromo);
        assert_eq!(
            req.url("https://api.example/fn/"),
            "https://api.example/fn/?action=validate-promo"
        );
        assert_eq!(
            ApiRequest::get(ApiAction::Stats).url("https://api.example"),
            "https://api.example/?action=stats"
        );
    }

    #[test]
    fn validate_promo_sends_uppercased_code() {
        let client = ShopClient::new(Canned::ok(json!({ "valid": true, "discount": 50 })));
        let result = block_on(client.validate_promo(" vip50 ")).unwrap();
        assert!(result.valid);
        assert_eq!(result.discount.percent(), 50);
        let sent = client.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body, Some(json!({ "code": "VIP50" })));
    }

    #[test]
    fn purchase_surfaces_server_error_verbatim() {
        let client = ShopClient::new(Canned::ok(
            json!({ "error": "Промокод не найден или неактивен" }),
        ));
        let request = PurchaseRequest {
            username: "Steve".to_string(),
            item_id: 1,
            item_name: "Меч Дракона".to_string(),
            item_emoji: "⚔️".to_string(),
            original_price: 299,
            promo_code: None,
        };
        let err = block_on(client.purchase(&request)).unwrap_err();
        assert_eq!(err.server_message(), Some("Промокод не найден или неактивен"));
    }

    #[test]
    fn purchase_without_id_is_an_error() {
        let client = ShopClient::new(Canned::ok(json!({ "ok": true })));
        let request = PurchaseRequest {
            username: "Steve".to_string(),
            item_id: 1,
            item_name: "x".to_string(),
            item_emoji: "x".to_string(),
            original_price: 1,
            promo_code: None,
        };
        let err = block_on(client.purchase(&request)).unwrap_err();
        assert!(matches!(err, ApiError::MissingField("purchase_id")));
        assert!(err.server_message().is_none());
    }

    #[test]
    fn purchase_body_omits_missing_promo() {
        let client = ShopClient::new(Canned::ok(json!({ "purchase_id": 7 })));
        let request = PurchaseRequest {
            username: "Steve".to_string(),
            item_id: 2,
            item_name: "Щит Нефрита".to_string(),
            item_emoji: "🛡️".to_string(),
            original_price: 199,
            promo_code: None,
        };
        let receipt = block_on(client.purchase(&request)).unwrap();
        assert_eq!(receipt.purchase_id, 7);
        let sent = client.transport().sent.borrow();
        let body = sent[0].body.as_ref().unwrap();
        assert!(body.get("promo_code").is_none());
        assert_eq!(body["original_price"], 199);
        assert_eq!(sent[0].action, ApiAction::Purchase);
    }

    #[test]
    fn toggle_and_delete_use_put_and_delete() {
        let client = ShopClient::new(Canned::ok(json!({ "ok": true })));
        block_on(client.toggle_promo(3, false)).unwrap();
        block_on(client.delete_promo(3)).unwrap();
        let sent = client.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].body, Some(json!({ "id": 3, "active": false })));
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].body, Some(json!({ "id": 3 })));
    }

    #[test]
    fn create_promo_reports_duplicate_from_server() {
        let client = ShopClient::new(Canned::ok(json!({ "error": "duplicate" })));
        let err = block_on(client.create_promo("VIP50", Discount::new(50).unwrap())).unwrap_err();
        assert_eq!(err.server_message(), Some("duplicate"));
    }

    #[test]
    fn transport_failures_propagate() {
        let client = ShopClient::new(Canned::offline());
        assert!(matches!(
            block_on(client.get_promos()),
            Err(ApiError::Transport(_))
        ));
    }

    #[test]
    fn settings_round_trip_uses_camel_case_keys() {
        let client = ShopClient::new(Canned::ok(json!({ "ok": true })));
        let settings = SiteSettings {
            primary_color: "#112233".to_string(),
            ..SiteSettings::default()
        };
        block_on(client.save_settings(&settings)).unwrap();
        let sent = client.transport().sent.borrow();
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["primaryColor"], "#112233");
        assert_eq!(body["serverIp"], "play.craftstore.ru");
    }
}
