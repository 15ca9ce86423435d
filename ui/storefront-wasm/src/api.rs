//! HTTP API client.
//!
//! Wraps `fetch` for JSON requests to the storefront backend. The backend
//! reports business failures as 4xx with a JSON envelope, so a non-2xx status
//! is decoded like any other response; only a rejected fetch or an
//! unparseable body is a transport error.

use crate::config::ClientConfig;
use crate::dom;
use crate::error::{ClientError, describe};
use async_trait::async_trait;
use serde_json::Value;
use sf_api_types::{DepositRequest, TransferRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// One call against `/api/*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    Buy { nft_id: u32 },
    Transfer(TransferRequest),
    Deposit(DepositRequest),
    Stats,
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::Stats => "GET",
            _ => "POST",
        }
    }

    pub fn path(&self) -> String {
        match self {
            ApiRequest::Buy { nft_id } => format!("/api/buy/{}", nft_id),
            ApiRequest::Transfer(_) => "/api/transfer".to_string(),
            ApiRequest::Deposit(_) => "/api/deposit".to_string(),
            ApiRequest::Stats => "/api/stats".to_string(),
        }
    }

    /// JSON body, if the call has one.
    pub fn body(&self) -> Result<Option<String>, ClientError> {
        let body = match self {
            ApiRequest::Transfer(req) => Some(serde_json::to_string(req)?),
            ApiRequest::Deposit(req) => Some(serde_json::to_string(req)?),
            ApiRequest::Buy { .. } | ApiRequest::Stats => None,
        };
        Ok(body)
    }
}

/// Sends an [`ApiRequest`] and yields the decoded JSON body.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: &ApiRequest) -> Result<Value, ClientError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, req: &ApiRequest) -> Result<Value, ClientError> {
        (**self).send(req).await
    }
}

/// [`Transport`] over `window.fetch`.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn build(&self, req: &ApiRequest) -> Result<Request, ClientError> {
        let url = self.config.url(&req.path());

        let opts = RequestInit::new();
        opts.set_method(req.method());

        if req.method() == "POST" {
            let headers = Headers::new()?;
            headers.set("Content-Type", "application/json")?;
            opts.set_headers(&headers);
        }
        if let Some(body) = req.body()? {
            opts.set_body(&JsValue::from_str(&body));
        }

        Ok(Request::new_with_str_and_init(&url, &opts)?)
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: &ApiRequest) -> Result<Value, ClientError> {
        let request = self.build(req)?;

        let resp_value = JsFuture::from(dom::window().fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Transport(format!("fetch error: {}", describe(&e))))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ClientError::Transport("response is not a Response".to_string()))?;

        if !resp.ok() {
            tracing::debug!(
                path = %req.path(),
                status = resp.status(),
                "non-2xx response, decoding body anyway"
            );
        }

        let text = JsFuture::from(resp.text()?)
            .await
            .map_err(|e| ClientError::Transport(format!("text error: {}", describe(&e))))?;
        let text = text.as_string().unwrap_or_default();

        serde_json::from_str(&text).map_err(|e| {
            ClientError::Decode(format!("{} ({} bytes from {})", e, text.len(), req.path()))
        })
    }
}
