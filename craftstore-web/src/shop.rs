// Re-export storefront types from the core crate
pub use craftstore_core::*;
