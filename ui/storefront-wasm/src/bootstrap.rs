//! One-time page setup.
//!
//! Runs when the document finishes parsing: staggers the card entrance
//! animation, starts the login widget if the page loaded one, and fills
//! `#user-stats` when that element exists.

use crate::api::Transport;
use crate::config::ClientConfig;
use crate::dispatch::{self, Dispatcher};
use crate::dom;
use crate::notifier::Notify;
use crate::page::{GlobalLoginWidget, LoginWidget, Page};
use crate::state;
use sf_api_types::UserStats;
use wasm_bindgen::prelude::*;

pub const STATS_ID: &str = "user-stats";

/// Schedule [`run`] for when the DOM is ready (or now, if it already is).
pub fn on_ready() {
    let document = dom::document();
    if document.ready_state() != "loading" {
        wasm_bindgen_futures::spawn_local(run());
        return;
    }

    let cb = Closure::once_into_js(|| {
        wasm_bindgen_futures::spawn_local(run());
    });
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref()) {
        tracing::error!(error = ?e, "could not listen for DOMContentLoaded");
    }
}

/// Page setup. Only the first call does anything.
///
/// Configuration is read again here: `<body>` may not have existed yet when
/// the module was instantiated.
pub async fn run() {
    if !state::mark_booted() {
        return;
    }
    let config = ClientConfig::from_page();
    state::set_config(config.clone());

    animate_cards();

    let widget = GlobalLoginWidget::resolve(&config.login_widget);
    init_login_widget(widget.as_ref());

    load_stats(&dispatch::browser()).await;
    tracing::debug!("page bootstrap finished");
}

/// `animation-delay` for the card at `index`: `0s`, `0.1s`, `0.2s`, ...
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

pub fn animate_cards() {
    for (i, card) in dom::query_all(".card").iter().enumerate() {
        dom::add_class(card, "fade-in-up");
        dom::set_style(card, "animation-delay", &stagger_delay(i));
    }
}

pub fn init_login_widget<W: LoginWidget + ?Sized>(widget: Option<&W>) {
    let Some(widget) = widget else {
        tracing::debug!("no login widget on this page");
        return;
    };
    if let Err(e) = widget.init() {
        tracing::warn!(error = %e, "login widget init failed");
    }
}

pub async fn load_stats<T: Transport, N: Notify, P: Page>(dispatcher: &Dispatcher<T, N, P>) {
    let Some(target) = dom::by_id(STATS_ID) else {
        return;
    };
    if let Some(stats) = dispatcher.stats().await {
        dom::set_inner_html(&target, &render_stats(&stats));
    }
}

/// Four-column stats row for `#user-stats`.
pub fn render_stats(stats: &UserStats) -> String {
    let cells = [
        (stats.total_nfts.to_string(), "Total NFTs"),
        (stats.balance.to_string(), "Balance ⭐️"),
        (stats.sold_nfts.to_string(), "Sold"),
        (stats.total_earned.to_string(), "Earned ⭐️"),
    ];

    let mut html = String::from(r#"<div class="row">"#);
    for (value, label) in &cells {
        html.push_str(&format!(
            r#"<div class="col-3"><div class="stats-card"><div class="stats-number">{}</div><div class="stats-label">{}</div></div></div>"#,
            value, label
        ));
    }
    html.push_str("</div>");
    html
}
