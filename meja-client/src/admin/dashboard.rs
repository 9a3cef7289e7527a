//! Admin landing page figures

use chrono::{DateTime, NaiveDateTime};
use shared::models::{CheckoutRecord, CheckoutState};

use crate::api::{CheckoutApi, MenuApi, TableApi};
use crate::error::ClientResult;
use crate::http::Gateway;
use crate::money;

/// Recent orders shown on the dashboard
pub const RECENT_LIMIT: usize = 5;

/// One row of the recent orders card
#[derive(Debug, Clone, PartialEq)]
pub struct RecentOrder {
    pub checkout_id: String,
    pub table_number: String,
    pub items: usize,
    pub total: Option<String>,
    pub state: CheckoutState,
    /// `HH:MM` of order creation
    pub time: Option<String>,
}

impl RecentOrder {
    fn from_record(record: &CheckoutRecord) -> Self {
        let order = record.order.as_ref();
        Self {
            checkout_id: record.id.clone(),
            table_number: record.table_number().unwrap_or("-").to_string(),
            items: order.map(|o| o.order_items.len()).unwrap_or(0),
            total: order.and_then(|o| o.total).map(money::format_idr_f64),
            state: record.state.clone(),
            time: order
                .and_then(|o| o.created_at.as_deref())
                .and_then(clock_time),
        }
    }
}

/// Counts and the most recent checkouts
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub tables: usize,
    pub menu_items: usize,
    pub checkouts: usize,
    /// Checkouts not yet completed or cancelled
    pub active_checkouts: usize,
    pub recent: Vec<RecentOrder>,
}

impl DashboardSummary {
    pub fn build(tables: usize, menu_items: usize, records: &[CheckoutRecord]) -> Self {
        Self {
            tables,
            menu_items,
            checkouts: records.len(),
            active_checkouts: records.iter().filter(|r| !r.state.is_terminal()).count(),
            recent: records
                .iter()
                .take(RECENT_LIMIT)
                .map(RecentOrder::from_record)
                .collect(),
        }
    }
}

/// Loads the dashboard
#[derive(Debug, Clone)]
pub struct Dashboard {
    gateway: Gateway,
}

impl Dashboard {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Tables, menu and checkouts are fetched concurrently
    pub async fn load(&self) -> ClientResult<DashboardSummary> {
        let tables = TableApi::new(&self.gateway);
        let menus = MenuApi::new(&self.gateway);
        let checkouts = CheckoutApi::new(&self.gateway);

        let (tables, menu_items, records) =
            tokio::try_join!(tables.list(), menus.list_all(), checkouts.list())?;

        Ok(DashboardSummary::build(tables.len(), menu_items.len(), &records))
    }
}

/// `HH:MM` from an RFC 3339 or naive ISO timestamp
fn clock_time(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%H:%M").to_string());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_accepts_both_formats() {
        assert_eq!(clock_time("2024-05-01T19:05:33Z").as_deref(), Some("19:05"));
        assert_eq!(clock_time("2024-05-01T08:30:00.123456").as_deref(), Some("08:30"));
        assert_eq!(clock_time("yesterday"), None);
    }

    #[test]
    fn summary_counts_and_limits_recent() {
        let records: Vec<CheckoutRecord> = (0..7)
            .map(|i| {
                let state = if i == 0 { "COMPLETED" } else { "ORDERED" };
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "state": state,
                    "order": {"id": i, "total": 10000, "orderItems": [], "meja": {"nomorMeja": "M01"}}
                }))
                .unwrap()
            })
            .collect();

        let summary = DashboardSummary::build(3, 12, &records);
        assert_eq!(summary.checkouts, 7);
        assert_eq!(summary.active_checkouts, 6);
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.recent[0].table_number, "M01");
        assert_eq!(summary.recent[0].total.as_deref(), Some("Rp 10.000"));
    }
}
