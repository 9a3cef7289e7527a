//! Admin panels
//!
//! Every call here needs the admin bearer token; a 401 clears it and
//! the error's [`redirect`](crate::ClientError::redirect) points at the
//! login page.

mod account;
mod checkouts;
mod dashboard;
mod menus;
mod tables;

pub use account::AdminAccount;
pub use checkouts::CheckoutBoard;
pub use dashboard::{Dashboard, DashboardSummary, RECENT_LIMIT, RecentOrder};
pub use menus::{ImageFile, MenuForm, MenuPanel};
pub use tables::TablesPanel;
