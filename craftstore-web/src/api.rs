//! Browser transport for the shop API
use crate::shop::{ApiError, ApiRequest, ApiTransport, ShopClient};

/// Hosted shop endpoint used when `CRAFTSTORE_API_URL` is not set at build time.
pub const DEFAULT_API_BASE: &str =
    "https://functions.poehali.dev/76c3efb0-74c1-4921-80c5-2492ad97733e";

/// Endpoint the app talks to.
#[must_use]
pub fn api_base() -> &'static str {
    option_env!("CRAFTSTORE_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

/// Sends requests with `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTransport {
    base: String,
}

impl FetchTransport {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(api_base())
    }
}

impl ApiTransport for FetchTransport {
    #[cfg(target_arch = "wasm32")]
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError> {
        let url = request.url(&self.base);
        let body = request.body.as_ref().map(ToString::to_string);
        let text = crate::dom::fetch_text(&url, request.method.as_str(), body.as_deref())
            .await
            .map_err(|err| ApiError::Transport(crate::dom::js_error_message(&err)))?;
        Ok(serde_json::from_str(&text)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Transport(format!(
            "fetch unavailable off the browser ({})",
            request.url(&self.base)
        )))
    }
}

/// Client bound to the configured endpoint.
#[must_use]
pub fn client() -> ShopClient<FetchTransport> {
    ShopClient::new(FetchTransport::default())
}
