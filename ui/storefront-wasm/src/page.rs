//! Page-level side effects: navigation and the optional login widget.

use crate::dom;
use crate::error::{ClientError, describe};
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;

/// Navigation the dispatchers may trigger after a response.
pub trait Page {
    /// Reload the current page once `delay_ms` has passed.
    fn reload_after(&self, delay_ms: u32);
    /// Open `url` in a new browsing context.
    fn open_in_new_context(&self, url: &str);
}

impl<P: Page + ?Sized> Page for &P {
    fn reload_after(&self, delay_ms: u32) {
        (**self).reload_after(delay_ms);
    }

    fn open_in_new_context(&self, url: &str) {
        (**self).open_in_new_context(url);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPage;

impl Page for BrowserPage {
    fn reload_after(&self, delay_ms: u32) {
        Timeout::new(delay_ms, || {
            if let Err(e) = dom::window().location().reload() {
                tracing::warn!(error = %describe(&e), "reload failed");
            }
        })
        .forget();
    }

    fn open_in_new_context(&self, url: &str) {
        match dom::window().open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => {}
            Ok(None) => tracing::warn!(%url, "new window was blocked"),
            Err(e) => tracing::warn!(%url, error = %describe(&e), "window.open failed"),
        }
    }
}

/// External sign-in widget exposing an `init` entry point.
pub trait LoginWidget {
    fn init(&self) -> Result<(), ClientError>;
}

/// A login widget found on the global object.
#[derive(Clone, Debug)]
pub struct GlobalLoginWidget {
    name: String,
    object: JsValue,
}

impl GlobalLoginWidget {
    /// Look `name` up on the global object. `None` if it is not defined.
    pub fn resolve(name: &str) -> Option<Self> {
        let object = Reflect::get(&js_sys::global(), &JsValue::from_str(name)).ok()?;
        if object.is_undefined() || object.is_null() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            object,
        })
    }
}

impl LoginWidget for GlobalLoginWidget {
    fn init(&self) -> Result<(), ClientError> {
        let init = Reflect::get(&self.object, &JsValue::from_str("init"))?;
        let init: Function = init
            .dyn_into()
            .map_err(|_| ClientError::Dom(format!("{}.init is not a function", self.name)))?;
        init.call0(&self.object)?;
        Ok(())
    }
}
