//! Test doubles for the transport, notifier and page seams.

use crate::api::{ApiRequest, Transport};
use crate::error::ClientError;
use crate::notifier::{Level, Notify};
use crate::page::Page;
use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;

pub enum StubReply {
    Json(Value),
    /// fetch rejected
    Offline,
    /// body was not JSON
    Garbage,
}

pub struct StubTransport {
    reply: StubReply,
    sent: RefCell<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for StubTransport {
    async fn send(&self, req: &ApiRequest) -> Result<Value, ClientError> {
        self.sent.borrow_mut().push(req.clone());
        match &self.reply {
            StubReply::Json(v) => Ok(v.clone()),
            StubReply::Offline => Err(ClientError::Transport("network unreachable".into())),
            StubReply::Garbage => {
                Err(serde_json::from_str::<Value>("<html>502</html>").unwrap_err().into())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: Level,
    pub duration_ms: u32,
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, message: &str, level: Level, duration_ms: u32) {
        self.notices.borrow_mut().push(Notice {
            message: message.to_string(),
            level,
            duration_ms,
        });
    }
}

#[derive(Default)]
pub struct RecordingPage {
    reloads: RefCell<Vec<u32>>,
    opened: RefCell<Vec<String>>,
}

impl RecordingPage {
    pub fn reloads(&self) -> Vec<u32> {
        self.reloads.borrow().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Page for RecordingPage {
    fn reload_after(&self, delay_ms: u32) {
        self.reloads.borrow_mut().push(delay_ms);
    }

    fn open_in_new_context(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}
