//! Storefront browser client.
//!
//! Rust + WASM replacement for the storefront's page script: purchase,
//! transfer, deposit and stats calls, toast notifications, form helpers and
//! one-time page setup. Each concern lives in its own module; `bindings`
//! holds everything exported to JavaScript.

pub mod api;
pub mod bindings;
pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod forms;
pub mod logging;
pub mod notifier;
pub mod page;
pub mod state;

#[cfg(test)]
mod testing;

use config::ClientConfig;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_page();
    logging::init(&config.log_level);
    state::set_config(config);

    bootstrap::on_ready();
}
