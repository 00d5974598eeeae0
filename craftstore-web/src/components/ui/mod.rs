pub mod admin_panel;
pub mod auth_modal;
pub mod featured;
pub mod hero;
pub mod promo_banner;
pub mod purchase_modal;
pub mod shop;
