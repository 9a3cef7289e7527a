//! Admin checkout board

use shared::models::{CheckoutRecord, CheckoutState};

use crate::api::CheckoutApi;
use crate::checkout::{CheckoutAction, view};
use crate::error::{ClientError, ClientResult};
use crate::http::Gateway;
use crate::route::Notice;

/// All checkouts, split by the cancelled toggle
#[derive(Debug, Clone)]
pub struct CheckoutBoard {
    gateway: Gateway,
    records: Vec<CheckoutRecord>,
    show_cancelled: bool,
}

impl CheckoutBoard {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            records: Vec::new(),
            show_cancelled: false,
        }
    }

    /// `GET /api/checkout`
    pub async fn refresh(&mut self) -> ClientResult<&[CheckoutRecord]> {
        self.records = CheckoutApi::new(&self.gateway).list().await?;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[CheckoutRecord] {
        &self.records
    }

    pub fn set_show_cancelled(&mut self, show: bool) {
        self.show_cancelled = show;
    }

    pub fn show_cancelled(&self) -> bool {
        self.show_cancelled
    }

    /// Cancelled checkouts when the toggle is on, everything else otherwise
    pub fn visible(&self) -> Vec<&CheckoutRecord> {
        self.records
            .iter()
            .filter(|r| (r.state == CheckoutState::Cancelled) == self.show_cancelled)
            .collect()
    }

    /// Ask the service to move a checkout to its next state, then refetch.
    /// A failed refetch leaves the old list and is only logged.
    ///
    /// Checkouts the board knows to be outside ORDERED..=READY are refused
    /// locally; unknown ids are left for the service to judge.
    pub async fn advance(&mut self, checkout_id: &str) -> ClientResult<Notice> {
        if let Some(record) = self.records.iter().find(|r| r.id == checkout_id) {
            if !view(&record.state).admin_can(CheckoutAction::Advance) {
                return Err(ClientError::InvalidState {
                    action: "advance",
                    state: record.state.to_string(),
                });
            }
        }

        CheckoutApi::new(&self.gateway).advance(checkout_id).await?;
        tracing::info!(checkout_id, "Checkout state advanced");
        if let Err(e) = self.refresh().await {
            tracing::warn!(checkout_id, "Failed to reload checkouts: {}", e);
        }
        Ok(Notice::info(
            "State Advanced",
            format!("Order #{checkout_id} state advanced"),
        ))
    }

    /// Advance failure as an error toast
    pub fn advance_failed_notice(checkout_id: &str) -> Notice {
        Notice::error(
            "Error",
            format!("Failed to advance state for order #{checkout_id}"),
        )
    }
}
