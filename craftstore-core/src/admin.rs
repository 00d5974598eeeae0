//! Admin panel operations
//!
//! Each operation performs its API call and hands back the [`BookUpdate`] to
//! apply to the local promo list. Toggle and delete produce their update even
//! when the call fails; the failure is only logged.
use crate::api::{ApiError, ApiTransport, ShopClient};
use crate::promo::{BookUpdate, DiscountRange, PromoBook, PromoDraft, PromoDraftError};
use crate::settings::{SettingsError, SiteSettings};
use thiserror::Error;

/// How long the "saved" confirmation stays visible.
pub const SAVED_FLASH_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Promos,
    Settings,
    Stats,
}

impl AdminTab {
    pub const ALL: [Self; 3] = [Self::Promos, Self::Settings, Self::Stats];

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Promos => "admin.tabs.promos",
            Self::Settings => "admin.tabs.settings",
            Self::Stats => "admin.tabs.stats",
        }
    }
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Draft(#[from] PromoDraftError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AdminError {
    /// Translation key for inline display. Server messages are shown verbatim
    /// by the caller via [`ApiError::server_message`].
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Draft(err) => err.message_key(),
            Self::Settings(err) => err.message_key(),
            Self::Api(_) => "admin.errors.request",
        }
    }
}

/// Fetch the promo list.
///
/// # Errors
///
/// Propagates the API failure so the tab can show its own load error.
pub async fn load_promos<T: ApiTransport>(
    client: &ShopClient<T>,
) -> Result<BookUpdate, ApiError> {
    client.get_promos().await.map(BookUpdate::Replace)
}

/// Validate `draft` locally, then create the code.
///
/// # Errors
///
/// Draft errors are returned without calling the API; otherwise the server's
/// answer decides.
pub async fn create_promo<T: ApiTransport>(
    client: &ShopClient<T>,
    draft: &PromoDraft,
    range: DiscountRange,
    book: &PromoBook,
) -> Result<BookUpdate, AdminError> {
    let (code, discount) = draft.validate(range, book.promos())?;
    let created = client.create_promo(&code, discount).await?;
    log::info!("created promo {} at {}%", created.code, created.discount.percent());
    Ok(BookUpdate::Prepend(created))
}

pub async fn toggle_promo<T: ApiTransport>(
    client: &ShopClient<T>,
    id: i64,
    active: bool,
) -> BookUpdate {
    if let Err(err) = client.toggle_promo(id, active).await {
        log::warn!("toggling promo {id} failed, updating list anyway: {err}");
    }
    BookUpdate::SetActive { id, active }
}

pub async fn delete_promo<T: ApiTransport>(client: &ShopClient<T>, id: i64) -> BookUpdate {
    if let Err(err) = client.delete_promo(id).await {
        log::warn!("deleting promo {id} failed, updating list anyway: {err}");
    }
    BookUpdate::Remove(id)
}

/// Validate and store the settings record.
///
/// # Errors
///
/// Returns [`AdminError::Settings`] without calling the API when the record
/// is invalid, and [`AdminError::Api`] when the save fails.
pub async fn save_settings<T: ApiTransport>(
    client: &ShopClient<T>,
    settings: &SiteSettings,
) -> Result<(), AdminError> {
    settings.validate()?;
    client.save_settings(settings).await?;
    Ok(())
}
