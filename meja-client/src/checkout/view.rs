//! Checkout state presentation
//!
//! The order service owns the lifecycle. This module only says how a state
//! looks and which buttons are offered in it.

use std::borrow::Cow;

use rust_decimal::Decimal;
use shared::models::{CheckoutState, Order};

use crate::money;

/// Badge colour family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Info,
    Warning,
    Attention,
    Success,
    Danger,
}

/// Action a user may take on a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    /// Customer withdraws a draft checkout
    Cancel,
    /// Admin moves the checkout to whatever state the service decides
    Advance,
}

/// How a checkout state is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateView {
    pub label: Cow<'static, str>,
    pub description: &'static str,
    pub tone: BadgeTone,
    pub customer_actions: &'static [CheckoutAction],
    pub admin_actions: &'static [CheckoutAction],
    /// No further transitions
    pub terminal: bool,
}

impl StateView {
    pub fn customer_can(&self, action: CheckoutAction) -> bool {
        self.customer_actions.contains(&action)
    }

    pub fn admin_can(&self, action: CheckoutAction) -> bool {
        self.admin_actions.contains(&action)
    }
}

const CANCEL: &[CheckoutAction] = &[CheckoutAction::Cancel];
const ADVANCE: &[CheckoutAction] = &[CheckoutAction::Advance];
const NONE: &[CheckoutAction] = &[];

const PROCESSING: &str = "Processing your order...";

/// View for a state
pub fn view(state: &CheckoutState) -> StateView {
    let (label, description, tone, customer_actions, admin_actions) = match state {
        CheckoutState::Draft => ("Draft", PROCESSING, BadgeTone::Neutral, CANCEL, NONE),
        CheckoutState::Ordered => (
            "Ordered",
            "Your order has been placed and will be prepared soon.",
            BadgeTone::Info,
            NONE,
            ADVANCE,
        ),
        CheckoutState::Preparing => (
            "Preparing",
            "Your order is being prepared.",
            BadgeTone::Warning,
            NONE,
            ADVANCE,
        ),
        CheckoutState::Ready => (
            "Ready",
            "Your order is ready for pickup.",
            BadgeTone::Attention,
            NONE,
            ADVANCE,
        ),
        CheckoutState::Completed => (
            "Completed",
            "Your order has been completed.",
            BadgeTone::Success,
            NONE,
            NONE,
        ),
        CheckoutState::Cancelled => (
            "Cancelled",
            "This order has been cancelled.",
            BadgeTone::Danger,
            NONE,
            NONE,
        ),
        CheckoutState::Other(raw) => {
            return StateView {
                label: Cow::Owned(raw.clone()),
                description: PROCESSING,
                tone: BadgeTone::Neutral,
                customer_actions: NONE,
                admin_actions: NONE,
                terminal: false,
            };
        }
    };

    StateView {
        label: Cow::Borrowed(label),
        description,
        tone,
        customer_actions,
        admin_actions,
        terminal: state.is_terminal(),
    }
}

/// `state.view()` sugar
pub trait CheckoutStateExt {
    fn view(&self) -> StateView;
}

impl CheckoutStateExt for CheckoutState {
    fn view(&self) -> StateView {
        view(self)
    }
}

/// One line of the order summary on the status page
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Read-only rendering of an order next to its checkout
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_id: String,
    pub table_number: String,
    pub lines: Vec<SummaryLine>,
    pub total: Decimal,
    pub total_display: String,
}

impl OrderSummary {
    pub fn from_order(order: &Order) -> Self {
        let lines = order
            .items
            .iter()
            .map(|i| SummaryLine {
                name: i.menu_item_name.clone(),
                quantity: i.quantity,
                unit_price: money::format_idr_f64(i.price),
                subtotal: money::format_idr_f64(i.subtotal),
            })
            .collect();
        let total = money::sum(order.items.iter().map(|i| i.subtotal));

        Self {
            order_id: order.id.clone(),
            table_number: order.nomor_meja.clone(),
            lines,
            total,
            total_display: money::format_idr(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_draft_offers_cancel() {
        let states = [
            CheckoutState::Draft,
            CheckoutState::Ordered,
            CheckoutState::Preparing,
            CheckoutState::Ready,
            CheckoutState::Completed,
            CheckoutState::Cancelled,
            CheckoutState::Other("ON_HOLD".into()),
        ];
        for state in &states {
            let v = view(state);
            assert_eq!(
                v.customer_can(CheckoutAction::Cancel),
                *state == CheckoutState::Draft,
                "{state}"
            );
        }
    }

    #[test]
    fn advance_only_between_ordered_and_ready() {
        assert!(!view(&CheckoutState::Draft).admin_can(CheckoutAction::Advance));
        assert!(view(&CheckoutState::Ordered).admin_can(CheckoutAction::Advance));
        assert!(view(&CheckoutState::Preparing).admin_can(CheckoutAction::Advance));
        assert!(view(&CheckoutState::Ready).admin_can(CheckoutAction::Advance));
        assert!(!view(&CheckoutState::Completed).admin_can(CheckoutAction::Advance));
        assert!(!view(&CheckoutState::Cancelled).admin_can(CheckoutAction::Advance));
    }

    #[test]
    fn labels_and_descriptions() {
        let v = view(&CheckoutState::Ready);
        assert_eq!(v.label, "Ready");
        assert_eq!(v.description, "Your order is ready for pickup.");

        let v = view(&CheckoutState::Cancelled);
        assert_eq!(v.label, "Cancelled");
        assert!(v.terminal);

        let v = view(&CheckoutState::Other("ON_HOLD".into()));
        assert_eq!(v.label, "ON_HOLD");
        assert_eq!(v.description, "Processing your order...");
        assert!(!v.terminal);
    }
}
