//! Page-scoped state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Lives as long as the page; nothing here is persisted.

use crate::config::ClientConfig;
use std::cell::{Cell, RefCell};

thread_local! {
    static CONFIG: RefCell<ClientConfig> = RefCell::new(ClientConfig::default());
    static BOOTED: Cell<bool> = const { Cell::new(false) };
}

pub fn config() -> ClientConfig {
    CONFIG.with(|c| c.borrow().clone())
}

pub fn set_config(cfg: ClientConfig) {
    CONFIG.with(|c| *c.borrow_mut() = cfg);
}

/// Flip the boot flag. Returns `true` only for the first caller.
pub fn mark_booted() -> bool {
    BOOTED.with(|b| !b.replace(true))
}
