//! Toast notifications.
//!
//! [`NotificationQueue`] is the bookkeeping: insertion order, ids, and the
//! `Visible -> Leaving -> detached` lifecycle. The DOM side keeps one queue in
//! a page-scoped singleton together with `#notification-container` and the
//! injected keyframes, both created once by [`ensure_initialized`].
//!
//! A notification leaves either when its timer fires or when it is clicked.
//! Both paths go through [`dismiss`]; only the first one to arrive starts the
//! exit animation, and only one detach ever touches the element.

use crate::config::EXIT_TRANSITION_MS;
use crate::dom;
use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

pub const CONTAINER_ID: &str = "notification-container";
const STYLE_ID: &str = "notification-keyframes";

const KEYFRAMES: &str = "
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    Info,
    Success,
    Error,
}

impl Level {
    /// Parse the page's `type` strings. Anything unknown renders as info.
    pub fn parse(s: &str) -> Level {
        match s.trim() {
            "success" => Level::Success,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Level::Success => "#10b981",
            Level::Error => "#ef4444",
            Level::Info => "#6366f1",
        }
    }
}

/// Anything that can put a message in front of the user.
pub trait Notify {
    fn notify(&self, message: &str, level: Level, duration_ms: u32);
}

impl<N: Notify + ?Sized> Notify for &N {
    fn notify(&self, message: &str, level: Level, duration_ms: u32) {
        (**self).notify(message, level, duration_ms);
    }
}

pub type NoticeId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Leaving,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub id: NoticeId,
    /// May contain markup; rendered as HTML.
    pub message: String,
    pub level: Level,
    pub duration_ms: u32,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
}

/// Notifications currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    next_id: NoticeId,
    entries: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, message: &str, level: Level, duration_ms: u32) -> NoticeId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            message: message.to_string(),
            level,
            duration_ms,
            created_at: Utc::now(),
            phase: Phase::Visible,
        });
        id
    }

    /// Push, then let `attach` wire the new id to the page. If `attach`
    /// fails the entry is dropped again.
    pub fn push_with<E>(
        &mut self,
        message: &str,
        level: Level,
        duration_ms: u32,
        attach: impl FnOnce(NoticeId) -> Result<(), E>,
    ) -> Result<NoticeId, E> {
        let id = self.push(message, level, duration_ms);
        if let Err(e) = attach(id) {
            self.detach(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Start the exit transition. `false` if it already started or the
    /// notification is gone.
    pub fn begin_exit(&mut self, id: NoticeId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) if n.phase == Phase::Visible => {
                n.phase = Phase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Remove a notification. `None` if it was already removed.
    pub fn detach(&mut self, id: NoticeId) -> Option<Notification> {
        let pos = self.entries.iter().position(|n| n.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, id: NoticeId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn ids(&self) -> Vec<NoticeId> {
        self.entries.iter().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inline style for a single notification of the given level.
pub fn notice_style(level: Level) -> String {
    format!(
        "background: {}; color: white; padding: 12px 24px; border-radius: 8px; \
         margin-bottom: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); \
         animation: slideIn 0.3s ease; cursor: pointer;",
        level.color()
    )
}

// ── DOM singleton ──

struct Node {
    el: Element,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

struct Mounted {
    container: Element,
    queue: NotificationQueue,
    nodes: HashMap<NoticeId, Node>,
}

thread_local! {
    static NOTIFIER: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Browser [`Notify`] backed by the page singleton.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomNotifier;

impl Notify for DomNotifier {
    fn notify(&self, message: &str, level: Level, duration_ms: u32) {
        show(message, level, duration_ms);
    }
}

/// Create the container and keyframes if this page has not got them yet.
pub fn ensure_initialized() -> Result<(), JsValue> {
    if NOTIFIER.with(|n| n.borrow().is_some()) {
        return Ok(());
    }
    let mounted = mount()?;
    NOTIFIER.with(|n| *n.borrow_mut() = Some(mounted));
    Ok(())
}

fn mount() -> Result<Mounted, JsValue> {
    let container = match dom::by_id(CONTAINER_ID) {
        Some(el) => el,
        None => {
            let el = dom::create_element("div")?;
            el.set_id(CONTAINER_ID);
            el.set_attribute(
                "style",
                "position: fixed; top: 20px; right: 20px; z-index: 9999;",
            )?;
            gloo_utils::body().append_child(&el)?;
            el
        }
    };

    if dom::by_id(STYLE_ID).is_none() {
        let style = dom::create_element("style")?;
        style.set_id(STYLE_ID);
        style.set_text_content(Some(KEYFRAMES));
        gloo_utils::head().append_child(&style)?;
    }

    tracing::debug!("notification container mounted");
    Ok(Mounted {
        container,
        queue: NotificationQueue::default(),
        nodes: HashMap::new(),
    })
}

/// Show a notification. Never fails; DOM errors are logged and dropped.
pub fn show(message: &str, level: Level, duration_ms: u32) {
    if let Err(e) = try_show(message, level, duration_ms) {
        tracing::warn!(error = ?e, "could not render notification");
    }
}

fn try_show(message: &str, level: Level, duration_ms: u32) -> Result<NoticeId, JsValue> {
    ensure_initialized()?;

    let el = dom::create_element("div")?;
    el.set_attribute("style", &notice_style(level))?;
    el.set_inner_html(message);

    let id = NOTIFIER.with(|n| -> Result<NoticeId, JsValue> {
        let mut guard = n.borrow_mut();
        let Mounted {
            container,
            queue,
            nodes,
        } = guard
            .as_mut()
            .ok_or_else(|| JsValue::from_str("notifier not mounted"))?;

        queue.push_with(message, level, duration_ms, |id| -> Result<(), JsValue> {
            let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
                dismiss(id);
            }) as Box<dyn FnMut(_)>);
            el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            container.append_child(&el)?;
            nodes.insert(id, Node { el, on_click });
            Ok(())
        })
    })?;

    Timeout::new(duration_ms, move || dismiss(id)).forget();
    Ok(id)
}

/// Begin the exit animation; the element is detached after the transition.
/// Calling this again for the same id does nothing.
pub fn dismiss(id: NoticeId) {
    let el = NOTIFIER.with(|n| {
        let mut guard = n.borrow_mut();
        let m = guard.as_mut()?;
        if !m.queue.begin_exit(id) {
            return None;
        }
        m.nodes.get(&id).map(|node| node.el.clone())
    });
    let Some(el) = el else {
        return;
    };

    dom::set_style(&el, "animation", "slideOut 0.3s ease");
    Timeout::new(EXIT_TRANSITION_MS, move || detach(id)).forget();
}

fn detach(id: NoticeId) {
    let node = NOTIFIER.with(|n| {
        let mut guard = n.borrow_mut();
        let m = guard.as_mut()?;
        m.queue.detach(id)?;
        m.nodes.remove(&id)
    });
    if let Some(node) = node {
        let _ = node
            .el
            .remove_event_listener_with_callback("click", node.on_click.as_ref().unchecked_ref());
        node.el.remove();
    }
}
