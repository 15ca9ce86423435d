//! Storefront actions.
//!
//! Every action has three outcomes: the backend said yes, the backend said no
//! (with a reason), or the call itself broke. Buy, transfer and deposit report
//! the last two to the user. Stats feeds passive page decoration, so its
//! failures only go to the log.

use crate::api::{ApiRequest, FetchTransport, Transport};
use crate::config::{DEFAULT_NOTICE_MS, RELOAD_DELAY_MS, TRANSFER_NOTICE_MS};
use crate::dom::escape_html;
use crate::error::ClientError;
use crate::notifier::{DomNotifier, Level, Notify};
use crate::page::{BrowserPage, Page};
use crate::state;
use serde::de::DeserializeOwned;
use sf_api_types::{
    ApiEnvelope, DepositRequest, DepositResponse, Outcome, StatsResponse, TransferReceipt,
    TransferRequest, UserStats,
};

const BUY_OK: &str = "✅ Purchase completed!";
const BUY_FAILED: &str = "❌ Purchase failed";
const TRANSFER_FAILED: &str = "❌ Transfer failed";
const DEPOSIT_NO_LINK: &str = "❌ Could not create payment link";
const DEPOSIT_FAILED: &str = "❌ Deposit failed";

pub type BrowserDispatcher = Dispatcher<FetchTransport, DomNotifier, BrowserPage>;

/// Dispatcher wired to `fetch`, the page notifier and the real window.
pub fn browser() -> BrowserDispatcher {
    Dispatcher::new(FetchTransport::new(state::config()), DomNotifier, BrowserPage)
}

pub struct Dispatcher<T, N, P> {
    transport: T,
    notifier: N,
    page: P,
}

impl<T: Transport, N: Notify, P: Page> Dispatcher<T, N, P> {
    pub fn new(transport: T, notifier: N, page: P) -> Self {
        Self {
            transport,
            notifier,
            page,
        }
    }

    async fn call<R: DeserializeOwned>(&self, req: &ApiRequest) -> Result<Outcome<R>, ClientError> {
        let value = self.transport.send(req).await?;
        Ok(Outcome::from_value(value)?)
    }

    fn error(&self, message: &str) {
        self.notifier.notify(message, Level::Error, DEFAULT_NOTICE_MS);
    }

    fn rejected(&self, reason: &str) {
        self.error(&format!("❌ {}", escape_html(reason)));
    }

    /// `POST /api/buy/{id}`. Reloads the page 2 s after a successful purchase.
    /// Only the envelope is read; extra fields in the body are ignored.
    pub async fn buy(&self, nft_id: u32) {
        match self.call::<ApiEnvelope>(&ApiRequest::Buy { nft_id }).await {
            Ok(Outcome::Success(_)) => {
                tracing::info!(nft_id, "purchase completed");
                self.notifier.notify(BUY_OK, Level::Success, DEFAULT_NOTICE_MS);
                self.page.reload_after(RELOAD_DELAY_MS);
            }
            Ok(Outcome::Failure(reason)) => {
                tracing::info!(nft_id, %reason, "purchase rejected");
                self.rejected(&reason);
            }
            Err(e) => {
                tracing::warn!(nft_id, error = %e, "purchase request failed");
                self.error(BUY_FAILED);
            }
        }
    }

    /// `POST /api/transfer`. Returns the backend's receipt on success.
    pub async fn transfer(&self, nft_id: u32, to_username: &str) -> Option<TransferReceipt> {
        let req = ApiRequest::Transfer(TransferRequest {
            nft_id,
            to_username: to_username.to_string(),
        });
        match self.call::<TransferReceipt>(&req).await {
            Ok(Outcome::Success(receipt)) => {
                tracing::info!(nft_id, to = %to_username, "transfer code issued");
                self.notifier.notify(
                    &format!("✅ Transfer code: {}", escape_html(&receipt.transfer_code)),
                    Level::Success,
                    TRANSFER_NOTICE_MS,
                );
                Some(receipt)
            }
            Ok(Outcome::Failure(reason)) => {
                tracing::info!(nft_id, %reason, "transfer rejected");
                self.rejected(&reason);
                None
            }
            Err(e) => {
                tracing::warn!(nft_id, error = %e, "transfer request failed");
                self.error(TRANSFER_FAILED);
                None
            }
        }
    }

    /// `POST /api/deposit`. Opens the payment link in a new tab.
    pub async fn deposit(&self, amount: i32) {
        let req = ApiRequest::Deposit(DepositRequest { amount });
        match self.call::<DepositResponse>(&req).await {
            Ok(Outcome::Success(resp)) => match resp.link() {
                Some(link) => self.page.open_in_new_context(link),
                None => {
                    tracing::warn!(amount, "deposit succeeded without a payment link");
                    self.error(DEPOSIT_NO_LINK);
                }
            },
            Ok(Outcome::Failure(reason)) => {
                tracing::info!(amount, %reason, "deposit rejected");
                self.error(DEPOSIT_NO_LINK);
            }
            Err(e) => {
                tracing::warn!(amount, error = %e, "deposit request failed");
                self.error(DEPOSIT_FAILED);
            }
        }
    }

    /// `GET /api/stats`. Never notifies; `None` on any failure.
    pub async fn stats(&self) -> Option<UserStats> {
        match self.call::<StatsResponse>(&ApiRequest::Stats).await {
            Ok(Outcome::Success(resp)) => {
                if resp.stats.is_none() {
                    tracing::warn!("stats response had no stats");
                }
                resp.stats
            }
            Ok(Outcome::Failure(reason)) => {
                tracing::warn!(%reason, "stats unavailable");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching stats");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNotifier, RecordingPage, StubReply, StubTransport};
    use serde_json::json;

    fn rig(reply: StubReply) -> (StubTransport, RecordingNotifier, RecordingPage) {
        (
            StubTransport::new(reply),
            RecordingNotifier::default(),
            RecordingPage::default(),
        )
    }

    #[tokio::test]
    async fn buy_success_notifies_then_schedules_one_reload() {
        let (t, n, p) = rig(StubReply::Json(json!({ "success": true, "nft_id": 7 })));
        Dispatcher::new(&t, &n, &p).buy(7).await;

        assert_eq!(t.sent(), vec![ApiRequest::Buy { nft_id: 7 }]);
        let notices = n.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, Level::Success);
        assert_eq!(p.reloads(), vec![2000]);
    }

    #[tokio::test]
    async fn buy_success_with_unexpected_fields_still_reloads() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "nft_id": "7",
            "message": null
        })));
        Dispatcher::new(&t, &n, &p).buy(7).await;

        let notices = n.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, BUY_OK);
        assert_eq!(notices[0].level, Level::Success);
        assert_eq!(p.reloads(), vec![2000]);
    }

    #[tokio::test]
    async fn buy_failure_shows_reason_and_does_not_reload() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": false,
            "error": "Insufficient balance"
        })));
        Dispatcher::new(&t, &n, &p).buy(3).await;

        let notices = n.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, Level::Error);
        assert!(notices[0].message.contains("Insufficient balance"));
        assert!(p.reloads().is_empty());
    }

    #[tokio::test]
    async fn buy_transport_failure_is_contained() {
        let (t, n, p) = rig(StubReply::Offline);
        Dispatcher::new(&t, &n, &p).buy(3).await;

        assert_eq!(n.notices()[0].message, BUY_FAILED);
        assert_eq!(n.notices()[0].level, Level::Error);
        assert!(p.reloads().is_empty());
    }

    #[tokio::test]
    async fn buy_garbage_body_is_generic_error() {
        let (t, n, p) = rig(StubReply::Garbage);
        Dispatcher::new(&t, &n, &p).buy(3).await;
        assert_eq!(n.notices()[0].message, BUY_FAILED);
        assert!(p.reloads().is_empty());
    }

    #[tokio::test]
    async fn transfer_success_returns_receipt_and_long_notice() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "transfer_code": "ABC123"
        })));
        let receipt = Dispatcher::new(&t, &n, &p)
            .transfer(42, "alice")
            .await
            .expect("receipt");

        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            json!({ "success": true, "transfer_code": "ABC123" })
        );
        let notices = n.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("ABC123"));
        assert_eq!(notices[0].level, Level::Success);
        assert_eq!(notices[0].duration_ms, 10_000);
        assert_eq!(
            t.sent(),
            vec![ApiRequest::Transfer(TransferRequest {
                nft_id: 42,
                to_username: "alice".into(),
            })]
        );
    }

    #[tokio::test]
    async fn transfer_success_with_null_code_is_still_success() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "transfer_code": null
        })));
        let receipt = Dispatcher::new(&t, &n, &p)
            .transfer(42, "alice")
            .await
            .expect("receipt");

        assert_eq!(receipt.transfer_code, "");
        assert_eq!(n.notices()[0].level, Level::Success);
        assert_eq!(n.notices()[0].duration_ms, 10_000);
    }

    #[tokio::test]
    async fn transfer_failure_returns_none_with_default_duration() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": false,
            "error": "User not found"
        })));
        let out = Dispatcher::new(&t, &n, &p).transfer(42, "nobody").await;

        assert!(out.is_none());
        let notices = n.notices();
        assert_eq!(notices[0].level, Level::Error);
        assert_eq!(notices[0].duration_ms, 3_000);
        assert!(notices[0].message.contains("User not found"));
    }

    #[tokio::test]
    async fn transfer_transport_failure_returns_none() {
        let (t, n, p) = rig(StubReply::Offline);
        let out = Dispatcher::new(&t, &n, &p).transfer(1, "bob").await;
        assert!(out.is_none());
        assert_eq!(n.notices()[0].message, TRANSFER_FAILED);
    }

    #[tokio::test]
    async fn deposit_opens_link_only_on_success_with_link() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "payment_link": "https://t.me/invoice/abc"
        })));
        Dispatcher::new(&t, &n, &p).deposit(100).await;
        assert_eq!(p.opened(), vec!["https://t.me/invoice/abc".to_string()]);
        assert!(n.notices().is_empty());
    }

    #[tokio::test]
    async fn deposit_opens_any_non_empty_link_as_sent() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "payment_link": "  "
        })));
        Dispatcher::new(&t, &n, &p).deposit(100).await;
        assert_eq!(p.opened(), vec!["  ".to_string()]);
        assert!(n.notices().is_empty());
    }

    #[tokio::test]
    async fn deposit_without_link_or_on_failure_notifies() {
        let cases = [
            json!({ "success": true }),
            json!({ "success": true, "payment_link": "" }),
            json!({ "success": false, "error": "Invalid amount" }),
            json!({ "success": false, "payment_link": "https://t.me/invoice/abc" }),
        ];
        for body in cases {
            let (t, n, p) = rig(StubReply::Json(body.clone()));
            Dispatcher::new(&t, &n, &p).deposit(0).await;
            assert!(p.opened().is_empty(), "opened a link for {}", body);
            assert_eq!(n.notices().len(), 1, "no notice for {}", body);
            assert_eq!(n.notices()[0].message, DEPOSIT_NO_LINK);
        }
    }

    #[tokio::test]
    async fn deposit_transport_failure_notifies() {
        let (t, n, p) = rig(StubReply::Offline);
        Dispatcher::new(&t, &n, &p).deposit(5).await;
        assert!(p.opened().is_empty());
        assert_eq!(n.notices()[0].message, DEPOSIT_FAILED);
    }

    #[tokio::test]
    async fn stats_success_returns_snapshot() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "stats": {
                "total_nfts": 4,
                "balance": 250,
                "sold_nfts": 2,
                "total_earned": 90,
                "total_spent": 10
            }
        })));
        let stats = Dispatcher::new(&t, &n, &p).stats().await.expect("stats");
        assert_eq!(stats.total_nfts, 4);
        assert_eq!(stats.balance, 250);
        assert!(n.notices().is_empty());
        assert_eq!(t.sent(), vec![ApiRequest::Stats]);
    }

    #[tokio::test]
    async fn stats_with_null_counters_still_render() {
        let (t, n, p) = rig(StubReply::Json(json!({
            "success": true,
            "stats": {
                "total_nfts": 1,
                "balance": null,
                "sold_nfts": 0,
                "total_earned": null
            }
        })));
        let stats = Dispatcher::new(&t, &n, &p).stats().await.expect("stats");
        assert_eq!(stats.balance, 0);
        assert_eq!(stats.total_earned, 0);
        assert_eq!(stats.total_nfts, 1);
    }

    #[tokio::test]
    async fn stats_failures_are_silent() {
        for reply in [
            StubReply::Json(json!({ "success": false })),
            StubReply::Json(json!({ "success": true })),
            StubReply::Offline,
            StubReply::Garbage,
        ] {
            let (t, n, p) = rig(reply);
            assert!(Dispatcher::new(&t, &n, &p).stats().await.is_none());
            assert!(n.notices().is_empty());
        }
    }
}
