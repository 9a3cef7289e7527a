//! Customer cart
//!
//! [`CartReconciler`] is the pure state machine; [`CartSync`] wires it to
//! the order service.

mod reconciler;
mod sync;

pub use reconciler::{CartLine, CartPhase, CartReconciler, LoadOutcome};
pub use sync::CartSync;
