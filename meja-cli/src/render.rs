//! Terminal output

use meja_client::admin::DashboardSummary;
use meja_client::checkout::{CheckoutStateExt, OrderSummary};
use meja_client::money;
use meja_client::{Checkout, CheckoutRecord, Meja, MenuItem, Notice, Page, Transition};

pub fn notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("✗ {}: {}", notice.title, notice.description);
    } else {
        println!("✓ {}: {}", notice.title, notice.description);
    }
}

pub fn transition(next: &Transition) {
    if let Some(n) = &next.notice {
        notice(n);
    }
    println!("→ {}", next.route);
}

pub fn menu_item(item: &MenuItem) {
    let stock = match item.quantity {
        Some(q) if q <= 0 => " (sold out)".to_string(),
        Some(q) => format!(" ({q} left)"),
        None => String::new(),
    };
    let rating = item
        .average_rating
        .map(|r| format!("  ★ {r:.1}"))
        .unwrap_or_default();
    println!(
        "{:<12} {:<28} {:>12}{}{}",
        item.id,
        item.name,
        money::format_idr_f64(item.price),
        rating,
        stock
    );
}

pub fn menu_page(page: &Page<MenuItem>) {
    for item in &page.items {
        menu_item(item);
    }
    println!(
        "-- page {} of {} ({} items)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}

pub fn order_summary(summary: &OrderSummary) {
    println!("Order {} · table {}", summary.order_id, summary.table_number);
    for line in &summary.lines {
        println!(
            "  {:>3} × {:<28} {:>12} {:>12}",
            line.quantity, line.name, line.unit_price, line.subtotal
        );
    }
    println!("  {:>58}", format!("Total {}", summary.total_display));
}

pub fn checkout(checkout: &Checkout) {
    let view = checkout.state.view();
    println!("Checkout {} · {}", checkout.id, view.label);
    println!("  {}", view.description);
    if !checkout.message.is_empty() {
        println!("  {}", checkout.message);
    }
}

pub fn tables(tables: &[Meja]) {
    for table in tables {
        println!("{:<12} {:<10} {}", table.id, table.nomor_meja, table.status);
    }
    let occupied = tables.iter().filter(|t| t.is_occupied()).count();
    println!("-- {} tables, {} occupied", tables.len(), occupied);
}

pub fn checkout_records(records: &[&CheckoutRecord]) {
    if records.is_empty() {
        println!("No checkouts");
        return;
    }
    for record in records {
        let view = record.state.view();
        let items = record.order.as_ref().map(|o| o.item_count()).unwrap_or(0);
        println!(
            "#{:<8} {:<14} table {:<8} {} items",
            record.id,
            view.label,
            record.table_number().unwrap_or("-"),
            items
        );
    }
}

pub fn dashboard(summary: &DashboardSummary) {
    println!("Tables:           {}", summary.tables);
    println!("Menu items:       {}", summary.menu_items);
    println!("Checkouts:        {}", summary.checkouts);
    println!("Active checkouts: {}", summary.active_checkouts);
    if summary.recent.is_empty() {
        return;
    }
    println!("Recent orders:");
    for order in &summary.recent {
        println!(
            "  #{:<8} table {:<8} {:>2} items {:>12} {:<10} {}",
            order.checkout_id,
            order.table_number,
            order.items,
            order.total.as_deref().unwrap_or("-"),
            order.state.as_str(),
            order.time.as_deref().unwrap_or("")
        );
    }
}

/// `★★★☆☆`
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_capped_at_five() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
