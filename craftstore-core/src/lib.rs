//! CraftStore Core
//!
//! Platform-agnostic storefront logic for the CraftStore Minecraft item shop.
//! This crate provides the catalog, pricing, promo codes, checkout state and
//! a typed client for the shop API without UI or platform-specific
//! dependencies. Browsers plug in a `fetch` transport; tests and the QA
//! harness use [`MemoryBackend`].

pub mod admin;
pub mod api;
pub mod catalog;
pub mod identity;
pub mod memory;
pub mod pricing;
pub mod promo;
pub mod purchase;
pub mod session;
pub mod settings;
pub mod stats;

// Re-export commonly used types
pub use admin::{AdminError, AdminTab, SAVED_FLASH_MS};
pub use api::{ApiAction, ApiError, ApiRequest, ApiTransport, HttpMethod, ShopClient};
pub use catalog::{ALL_CATEGORY, Catalog, CatalogError, Item, ItemTag, Rarity};
pub use identity::{
    ADMIN_PASSWORD, AuthError, AuthMode, GUEST_NAME, Identity, LoginForm, RegisterForm,
};
pub use memory::MemoryBackend;
pub use pricing::{Discount, PriceQuote, PricingError, final_price};
pub use promo::{
    BookUpdate, DiscountRange, PromoBook, PromoCode, PromoDraft, PromoDraftError,
    PromoValidation, normalize_code,
};
pub use purchase::{
    PromoStatus, PurchaseFlow, PurchasePhase, PurchaseReceipt, PurchaseRequest,
    SUCCESS_DISPLAY_MS,
};
pub use session::ShopSession;
pub use settings::{DEFAULT_PRIMARY_COLOR, SettingsError, SiteSettings};
pub use stats::{DailyPoint, PeriodTotals, Stats, TopItem};
