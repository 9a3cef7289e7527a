//! Checkout status for customers and the state badge shared with admins

mod tracker;
mod view;

pub use tracker::{CheckoutTracker, CheckoutWatch};
pub use view::{
    BadgeTone, CheckoutAction, CheckoutStateExt, OrderSummary, StateView, SummaryLine, view,
};
