//! Local cart vs. server order
//!
//! The order service owns the table's order. The customer edits a local
//! copy and saves it back as a full replacement list.
//!
//! ```text
//!   Synced ──edit──▶ Dirty ──begin_save──▶ Saving ──complete_save──▶ Synced
//!     ▲                ▲                     │ (edited while saving) ─▶ Dirty
//!     └─discard────────┘◀──────fail_save─────┘
//! ```
//!
//! A server order that arrives while the cart is Dirty or Saving only
//! replaces the baseline; local lines are kept until the user saves or
//! discards.

use rust_decimal::Decimal;
use shared::models::{Order, OrderLineRequest, UpdateOrderRequest};

use crate::error::{ClientError, ClientResult};
use crate::money;

/// Where the local cart stands relative to the server order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// Local lines equal the last server order
    Synced,
    /// Local edits not yet sent
    Dirty,
    /// Replacement list in flight
    Saving,
}

impl CartPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Dirty => "dirty",
            Self::Saving => "saving",
        }
    }
}

/// What `load` did with a server order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Local lines now mirror the order
    Applied,
    /// Local edits were kept; the order became the new baseline
    Deferred,
}

/// One cart line; `quantity` is never 0
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu_item_id: String,
    pub quantity: u32,
    /// Known unit price, used for the display total while unsaved
    pub unit_price: Option<f64>,
}

/// Cart state machine
#[derive(Debug, Clone)]
pub struct CartReconciler {
    lines: Vec<CartLine>,
    baseline: Option<Order>,
    phase: CartPhase,
    edited_while_saving: bool,
    last_error: Option<String>,
}

impl Default for CartReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl CartReconciler {
    /// Empty cart with no server order yet
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            baseline: None,
            phase: CartPhase::Synced,
            edited_while_saving: false,
            last_error: None,
        }
    }

    /// Cart mirroring a server order
    pub fn from_order(order: Order) -> Self {
        let mut cart = Self::new();
        cart.apply(Some(order));
        cart
    }

    fn lines_of(order: Option<&Order>) -> Vec<CartLine> {
        order
            .map(|o| {
                o.items
                    .iter()
                    .filter(|i| i.quantity > 0)
                    .map(|i| CartLine {
                        menu_item_id: i.menu_item_id.clone(),
                        quantity: i.quantity,
                        unit_price: Some(i.price),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn apply(&mut self, order: Option<Order>) {
        self.lines = Self::lines_of(order.as_ref());
        self.baseline = order;
        self.phase = CartPhase::Synced;
        self.edited_while_saving = false;
    }

    /// Take a fresh server order
    pub fn load(&mut self, order: Order) -> LoadOutcome {
        match self.phase {
            CartPhase::Synced => {
                self.apply(Some(order));
                LoadOutcome::Applied
            }
            CartPhase::Dirty | CartPhase::Saving => {
                tracing::debug!(phase = self.phase.as_str(), "Keeping local cart edits");
                self.baseline = Some(order);
                LoadOutcome::Deferred
            }
        }
    }

    /// The table has no order (yet); same merge rules as [`load`](Self::load)
    pub fn reset(&mut self) -> LoadOutcome {
        match self.phase {
            CartPhase::Synced => {
                self.apply(None);
                LoadOutcome::Applied
            }
            CartPhase::Dirty | CartPhase::Saving => {
                self.baseline = None;
                LoadOutcome::Deferred
            }
        }
    }

    fn touch(&mut self) {
        match self.phase {
            CartPhase::Synced => self.phase = CartPhase::Dirty,
            CartPhase::Dirty => {}
            CartPhase::Saving => self.edited_while_saving = true,
        }
    }

    fn position(&self, menu_item_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.menu_item_id == menu_item_id)
    }

    /// Add one portion; an existing line is incremented
    pub fn add(&mut self, menu_item_id: &str, unit_price: Option<f64>) {
        match self.position(menu_item_id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity += 1;
                if unit_price.is_some() {
                    line.unit_price = unit_price;
                }
            }
            None => self.lines.push(CartLine {
                menu_item_id: menu_item_id.to_string(),
                quantity: 1,
                unit_price,
            }),
        }
        self.touch();
    }

    /// Increment an existing line. Returns false if the item is not in the cart.
    pub fn increase(&mut self, menu_item_id: &str) -> bool {
        let Some(idx) = self.position(menu_item_id) else {
            return false;
        };
        self.lines[idx].quantity += 1;
        self.touch();
        true
    }

    /// Decrement a line; a line at 1 is removed
    pub fn decrease(&mut self, menu_item_id: &str) -> bool {
        let Some(idx) = self.position(menu_item_id) else {
            return false;
        };
        if self.lines[idx].quantity > 1 {
            self.lines[idx].quantity -= 1;
        } else {
            self.lines.remove(idx);
        }
        self.touch();
        true
    }

    /// Drop a line entirely
    pub fn remove(&mut self, menu_item_id: &str) -> bool {
        let Some(idx) = self.position(menu_item_id) else {
            return false;
        };
        self.lines.remove(idx);
        self.touch();
        true
    }

    /// The server deleted the stored line for an item. Drops it from the
    /// baseline and from the local lines without marking the cart edited.
    pub fn forget_saved(&mut self, menu_item_id: &str) {
        if let Some(order) = &mut self.baseline {
            order.items.retain(|i| i.menu_item_id != menu_item_id);
        }
        if let Some(idx) = self.position(menu_item_id) {
            self.lines.remove(idx);
        }
    }

    /// Set a line's quantity; 0 removes it, a missing line is created
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        match (self.position(menu_item_id), quantity) {
            (None, 0) => return,
            (Some(idx), 0) => {
                self.lines.remove(idx);
            }
            (Some(idx), q) => {
                if self.lines[idx].quantity == q {
                    return;
                }
                self.lines[idx].quantity = q;
            }
            (None, q) => {
                let unit_price = self
                    .baseline
                    .as_ref()
                    .and_then(|o| o.item_for(menu_item_id))
                    .map(|i| i.price);
                self.lines.push(CartLine {
                    menu_item_id: menu_item_id.to_string(),
                    quantity: q,
                    unit_price,
                });
            }
        }
        self.touch();
    }

    /// Throw away local edits and mirror the baseline again
    pub fn discard_changes(&mut self) -> ClientResult<()> {
        if self.phase == CartPhase::Saving {
            return Err(ClientError::InvalidState {
                action: "discard changes",
                state: self.phase.as_str().to_string(),
            });
        }
        let baseline = self.baseline.take();
        self.apply(baseline);
        self.last_error = None;
        Ok(())
    }

    /// Start a save; returns the full replacement list to send
    pub fn begin_save(&mut self) -> ClientResult<UpdateOrderRequest> {
        if self.phase == CartPhase::Saving {
            return Err(ClientError::InvalidState {
                action: "save",
                state: self.phase.as_str().to_string(),
            });
        }
        self.phase = CartPhase::Saving;
        self.edited_while_saving = false;
        Ok(self.to_request())
    }

    /// The service accepted the save and returned the stored order
    pub fn complete_save(&mut self, order: Order) {
        self.last_error = None;
        if self.edited_while_saving {
            self.baseline = Some(order);
            self.edited_while_saving = false;
            self.phase = CartPhase::Dirty;
        } else {
            self.apply(Some(order));
        }
    }

    /// The save failed; local lines stay and can be retried
    pub fn fail_save(&mut self, message: impl Into<String>) {
        self.phase = CartPhase::Dirty;
        self.edited_while_saving = false;
        self.last_error = Some(message.into());
    }

    /// Replacement list for the current lines
    pub fn to_request(&self) -> UpdateOrderRequest {
        UpdateOrderRequest {
            items: self
                .lines
                .iter()
                .map(|l| OrderLineRequest {
                    menu_item_id: l.menu_item_id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.phase != CartPhase::Synced
    }

    pub fn phase(&self) -> CartPhase {
        self.phase
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn baseline(&self) -> Option<&Order> {
        self.baseline.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of one item (0 if absent)
    pub fn quantity_of(&self, menu_item_id: &str) -> u32 {
        self.position(menu_item_id)
            .map(|idx| self.lines[idx].quantity)
            .unwrap_or(0)
    }

    /// Portions across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    fn unit_price(&self, line: &CartLine) -> Option<f64> {
        line.unit_price.or_else(|| {
            self.baseline
                .as_ref()
                .and_then(|o| o.item_for(&line.menu_item_id))
                .map(|i| i.price)
        })
    }

    /// Total shown to the user.
    ///
    /// When synced this is the sum of the server's subtotals. Otherwise
    /// each line is priced from its known unit price, falling back to the
    /// baseline order; unpriced lines count as zero (see
    /// [`unpriced_lines`](Self::unpriced_lines)).
    pub fn display_total(&self) -> Decimal {
        if self.phase == CartPhase::Synced {
            if let Some(order) = &self.baseline {
                return money::sum(order.items.iter().map(|i| i.subtotal));
            }
        }
        self.lines
            .iter()
            .map(|l| money::line_total(self.unit_price(l).unwrap_or_default(), l.quantity))
            .sum()
    }

    /// Lines left out of [`display_total`](Self::display_total) for lack of
    /// a price. Non-zero means the shown total is incomplete.
    pub fn unpriced_lines(&self) -> usize {
        if self.phase == CartPhase::Synced && self.baseline.is_some() {
            return 0;
        }
        self.lines
            .iter()
            .filter(|l| self.unit_price(l).is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItem;

    fn item(id: &str, menu_item_id: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            id: id.into(),
            menu_item_id: menu_item_id.into(),
            menu_item_name: menu_item_id.to_uppercase(),
            menu_item_description: String::new(),
            menu_item_category: None,
            price,
            quantity,
            subtotal: price * quantity as f64,
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        let total = items.iter().map(|i| i.subtotal).sum();
        Order {
            id: "o1".into(),
            meja_id: "t1".into(),
            nomor_meja: "M05".into(),
            items,
            created_at: "2024-05-01T10:00:00Z".into(),
            updated_at: None,
            locked: false,
            total,
        }
    }

    #[test]
    fn add_then_decrease_keeps_quantities_positive() {
        let mut cart = CartReconciler::new();
        cart.add("a", Some(10_000.0));
        cart.add("a", None);
        cart.add("b", Some(5_000.0));
        assert_eq!(cart.quantity_of("a"), 2);
        assert_eq!(cart.lines()[0].unit_price, Some(10_000.0));

        for _ in 0..5 {
            cart.decrease("a");
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
        assert_eq!(cart.quantity_of("a"), 0);
        assert_eq!(cart.lines().len(), 1);
        assert!(!cart.decrease("a"));
    }

    #[test]
    fn decrease_from_one_removes_line() {
        let mut cart = CartReconciler::from_order(order(vec![item("1", "a", 10.0, 1)]));
        assert!(cart.decrease("a"));
        assert!(cart.is_empty());
        assert!(cart.has_unsaved_changes());
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut cart = CartReconciler::new();
        cart.set_quantity("a", 3);
        assert_eq!(cart.quantity_of("a"), 3);
        cart.set_quantity("a", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn fresh_order_while_dirty_is_deferred() {
        let mut cart = CartReconciler::from_order(order(vec![item("1", "a", 10.0, 1)]));
        cart.add("b", Some(20.0));

        let outcome = cart.load(order(vec![item("1", "a", 10.0, 4)]));
        assert_eq!(outcome, LoadOutcome::Deferred);
        assert_eq!(cart.quantity_of("a"), 1);
        assert_eq!(cart.quantity_of("b"), 1);
        assert_eq!(cart.phase(), CartPhase::Dirty);

        cart.discard_changes().unwrap();
        assert_eq!(cart.quantity_of("a"), 4);
        assert_eq!(cart.quantity_of("b"), 0);
        assert!(!cart.has_unsaved_changes());
    }

    #[test]
    fn fresh_order_while_synced_is_applied() {
        let mut cart = CartReconciler::new();
        let outcome = cart.load(order(vec![item("1", "a", 10.0, 2)]));
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn save_cycle_syncs_to_server_order() {
        let mut cart = CartReconciler::new();
        cart.add("a", Some(15_000.0));
        cart.add("a", None);
        cart.add("b", Some(8_000.0));

        let request = cart.begin_save().unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].quantity, 2);
        assert!(cart.begin_save().is_err());

        cart.complete_save(order(vec![item("1", "a", 15_000.0, 2), item("2", "b", 8_000.0, 1)]));
        assert!(!cart.has_unsaved_changes());
        assert_eq!(money::to_f64(cart.display_total()), 38_000.0);
    }

    #[test]
    fn edits_during_save_stay_dirty() {
        let mut cart = CartReconciler::new();
        cart.add("a", Some(10.0));
        cart.begin_save().unwrap();
        cart.add("b", Some(5.0));

        cart.complete_save(order(vec![item("1", "a", 10.0, 1)]));
        assert_eq!(cart.phase(), CartPhase::Dirty);
        assert_eq!(cart.quantity_of("b"), 1);
        assert_eq!(cart.baseline().map(|o| o.items.len()), Some(1));
    }

    #[test]
    fn failed_save_keeps_lines() {
        let mut cart = CartReconciler::new();
        cart.add("a", Some(10.0));
        cart.begin_save().unwrap();
        cart.fail_save("HTTP error! status: 500");

        assert_eq!(cart.phase(), CartPhase::Dirty);
        assert_eq!(cart.last_error(), Some("HTTP error! status: 500"));
        assert_eq!(cart.quantity_of("a"), 1);
    }

    #[test]
    fn discard_rejected_while_saving() {
        let mut cart = CartReconciler::new();
        cart.add("a", None);
        cart.begin_save().unwrap();
        assert!(matches!(
            cart.discard_changes(),
            Err(ClientError::InvalidState { .. })
        ));
    }

    #[test]
    fn dirty_total_uses_local_prices() {
        let mut cart = CartReconciler::from_order(order(vec![item("1", "a", 12_000.0, 1)]));
        cart.increase("a");
        cart.add("c", None);
        assert_eq!(money::to_f64(cart.display_total()), 24_000.0);
        assert_eq!(cart.unpriced_lines(), 1);

        cart.remove("c");
        assert_eq!(cart.unpriced_lines(), 0);
    }

    #[test]
    fn forget_saved_drops_line_and_keeps_edits() {
        let mut cart = CartReconciler::from_order(order(vec![
            item("1", "a", 10.0, 2),
            item("2", "b", 5.0, 1),
        ]));
        cart.add("c", Some(7.0));

        cart.forget_saved("a");

        assert_eq!(cart.quantity_of("a"), 0);
        assert_eq!(cart.quantity_of("c"), 1);
        assert_eq!(cart.phase(), CartPhase::Dirty);
        assert!(cart.baseline().unwrap().item_for("a").is_none());
        assert_eq!(cart.to_request().items.len(), 2);
    }
}
