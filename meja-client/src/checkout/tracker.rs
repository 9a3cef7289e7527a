//! Customer checkout: fetch, place, cancel, watch

use std::time::Duration;

use shared::models::{Checkout, CheckoutState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::view::{CheckoutAction, view};
use crate::api::CheckoutApi;
use crate::error::{ClientError, ClientResult, CredentialKind};
use crate::http::Gateway;
use crate::route::{Notice, Route, Transition};

/// Checkout operations for the current table session
#[derive(Debug, Clone)]
pub struct CheckoutTracker {
    gateway: Gateway,
}

impl CheckoutTracker {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The table's checkout, `None` if it has not checked out
    pub async fn current(&self) -> ClientResult<Option<Checkout>> {
        CheckoutApi::new(&self.gateway).mine().await
    }

    /// Place the order. The service locks the order and starts the
    /// checkout in DRAFT.
    pub async fn create(&self) -> ClientResult<Checkout> {
        let checkout = CheckoutApi::new(&self.gateway).create().await?;
        tracing::info!(checkout_id = %checkout.id, state = %checkout.state, "Checkout created");
        Ok(checkout)
    }

    /// Withdraw a draft checkout. Ends the table session and sends the
    /// customer back to the entry page.
    pub async fn cancel(&self, checkout: &Checkout) -> ClientResult<Transition> {
        if !view(&checkout.state).customer_can(CheckoutAction::Cancel) {
            return Err(ClientError::InvalidState {
                action: "cancel",
                state: checkout.state.to_string(),
            });
        }

        CheckoutApi::new(&self.gateway).cancel_mine().await?;
        self.gateway.session().clear(CredentialKind::Table)?;
        tracing::info!(checkout_id = %checkout.id, "Checkout cancelled, table session cleared");

        Ok(Transition::to(Route::Home).with_notice(Notice::info(
            "Order Cancelled",
            "Your order has been cancelled. You will be logged out.",
        )))
    }

    /// Cancel failure as an error toast
    pub fn cancel_failed_notice(error: &ClientError) -> Notice {
        Notice::error("Cancel Failed", error.to_string())
    }

    /// Poll the checkout every `interval` until it reaches a terminal
    /// state, the session goes away, or `shutdown` fires.
    pub fn watch(&self, interval: Duration, shutdown: CancellationToken) -> CheckoutWatch {
        let (tx, rx) = watch::channel(None);
        let tracker = self.clone();

        let task = tokio::spawn(async move {
            tracing::debug!(?interval, "Checkout watch started");
            loop {
                match tracker.current().await {
                    Ok(latest) => {
                        let terminal = latest.as_ref().is_some_and(|c| c.state.is_terminal());
                        tx.send_if_modified(|current| {
                            if *current != latest {
                                *current = latest;
                                true
                            } else {
                                false
                            }
                        });
                        if terminal {
                            break;
                        }
                    }
                    Err(e @ (ClientError::Unauthorized(_) | ClientError::NoSession(_))) => {
                        tracing::warn!("Checkout watch stopped: {}", e);
                        break;
                    }
                    Err(e) => tracing::warn!("Checkout poll failed: {}", e),
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = shutdown.cancelled() => break,
                }
            }
            tracing::debug!("Checkout watch stopped");
        });

        CheckoutWatch { updates: rx, task }
    }
}

/// Handle on a running checkout poll
#[derive(Debug)]
pub struct CheckoutWatch {
    updates: watch::Receiver<Option<Checkout>>,
    task: JoinHandle<()>,
}

impl CheckoutWatch {
    /// Latest checkout seen
    pub fn latest(&self) -> Option<Checkout> {
        self.updates.borrow().clone()
    }

    /// State of the latest checkout seen
    pub fn state(&self) -> Option<CheckoutState> {
        self.updates.borrow().as_ref().map(|c| c.state.clone())
    }

    /// Wait for the next change. `None` once polling has stopped.
    pub async fn changed(&mut self) -> Option<Option<Checkout>> {
        self.updates.changed().await.ok()?;
        Some(self.updates.borrow_and_update().clone())
    }

    /// A second receiver for the same updates
    pub fn subscribe(&self) -> watch::Receiver<Option<Checkout>> {
        self.updates.clone()
    }

    /// Wait for the poll loop to exit
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Checkout watch task failed: {}", e);
        }
    }
}
