mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, LOCALE_STORAGE_KEY, current_lang, set_lang};
pub use format::{fmt_number, fmt_pct, fmt_rub};
pub use locales::{DEFAULT_LANG, FALLBACK_LANG, LocaleMeta, locales};
pub use render::{t, tf, tr};
