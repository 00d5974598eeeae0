//! Deployment base path handling.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/shop` when the storefront
/// is served from a subdirectory), the router is mounted under it. Local
/// builds without `PUBLIC_URL` mount at the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
