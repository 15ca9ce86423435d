//! Functions exported to page scripts and inline `onclick` handlers.
//!
//! Names match the hooks the storefront templates already call. Nothing here
//! throws into JavaScript: failures end up as a notification, a `null`, or a
//! log line.

use crate::config::DEFAULT_NOTICE_MS;
use crate::dispatch;
use crate::forms;
use crate::notifier::{self, DomNotifier, Level};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "could not convert payload for JS");
            JsValue::NULL
        }
    }
}

#[wasm_bindgen(js_name = buyNFT)]
pub async fn buy_nft(nft_id: u32) {
    dispatch::browser().buy(nft_id).await;
}

/// Resolves to the transfer receipt, or `null`.
#[wasm_bindgen(js_name = transferNFT)]
pub async fn transfer_nft(nft_id: u32, to_username: String) -> JsValue {
    match dispatch::browser().transfer(nft_id, &to_username).await {
        Some(receipt) => to_js(&receipt),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen(js_name = depositStars)]
pub async fn deposit_stars(amount: i32) {
    dispatch::browser().deposit(amount).await;
}

/// Resolves to the stats object, or `null`.
#[wasm_bindgen(js_name = getUserStats)]
pub async fn get_user_stats() -> JsValue {
    match dispatch::browser().stats().await {
        Some(stats) => to_js(&stats),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>, duration: Option<u32>) {
    let level = kind.as_deref().map(Level::parse).unwrap_or_default();
    notifier::show(message, level, duration.unwrap_or(DEFAULT_NOTICE_MS));
}

#[wasm_bindgen(js_name = previewNFT)]
pub async fn preview_nft(input: HtmlInputElement) {
    if let Err(e) = forms::preview_image(&input).await {
        tracing::warn!(error = %e, "image preview failed");
    }
}

#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form_id: &str) -> bool {
    forms::validate_form(form_id, &DomNotifier)
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub async fn copy_to_clipboard(text: String) {
    forms::copy_to_clipboard(&text, &DomNotifier).await;
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(value: &str) -> String {
    forms::format_date(value)
}
