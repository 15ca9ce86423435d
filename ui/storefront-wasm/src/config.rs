//! Page-level configuration.
//!
//! Read once at start from `data-*` attributes on `<body>`:
//!
//! ```html
//! <body data-api-base="https://shop.example" data-log-level="debug">
//! ```
//!
//! Any missing attribute falls back to [`ClientConfig::default`].

use crate::dom;

/// Default lifetime of a notification.
pub const DEFAULT_NOTICE_MS: u32 = 3_000;
/// Lifetime of the notification that carries a transfer code.
pub const TRANSFER_NOTICE_MS: u32 = 10_000;
/// Delay between a successful purchase and the page reload.
pub const RELOAD_DELAY_MS: u32 = 2_000;
/// Length of the slide-out animation before a notification is detached.
pub const EXIT_TRANSITION_MS: u32 = 300;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for `/api/*` paths. Empty means same origin.
    pub api_base: String,
    /// `EnvFilter` directive, e.g. `info` or `storefront_wasm=debug`.
    pub log_level: String,
    /// Global name of the login widget object.
    pub login_widget: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: "info".to_string(),
            login_widget: "TelegramLoginWidget".to_string(),
        }
    }
}

impl ClientConfig {
    /// Build from `<body>` attributes, keeping defaults for anything unset.
    pub fn from_page() -> Self {
        let Some(body) = dom::document().body() else {
            return Self::default();
        };
        Self::from_lookup(|name| body.get_attribute(name))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let non_empty = |name: &str| {
            get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(base) = non_empty("data-api-base") {
            cfg.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(level) = non_empty("data-log-level") {
            cfg.log_level = level;
        }
        if let Some(widget) = non_empty("data-login-widget") {
            cfg.login_widget = widget;
        }
        cfg
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
    }

    #[test]
    fn api_base_drops_trailing_slash() {
        let cfg = ClientConfig::from_lookup(lookup(&[("data-api-base", "https://shop.test/")]));
        assert_eq!(cfg.url("/api/stats"), "https://shop.test/api/stats");
    }

    #[test]
    fn blank_attributes_are_ignored() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("data-log-level", "  "),
            ("data-login-widget", "AuthWidget"),
        ]));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.login_widget, "AuthWidget");
        assert_eq!(cfg.url("/api/buy/1"), "/api/buy/1");
    }
}
