//! Customer commands

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use meja_client::MejaClient;
use meja_client::api::MenuQuery;
use meja_client::cart::CartSync;
use meja_client::catalog::Catalog;
use meja_client::checkout::{CheckoutStateExt, CheckoutTracker, OrderSummary};
use meja_client::customer::CustomerSession;
use tokio_util::sync::CancellationToken;

use crate::render;

#[derive(Args, Debug)]
pub struct MenuArgs {
    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page
    #[arg(long, default_value_t = 10)]
    pub size: u32,

    /// Only items whose name or description contains this
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Show the saved order of this table
    Show,
    /// Add portions of a menu item and save
    Add {
        menu_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a menu item (0 removes it) and save
    Set { menu_id: String, quantity: u32 },
    /// Remove a saved item from the order
    Remove { menu_id: String },
}

#[derive(Subcommand, Debug)]
pub enum CheckoutCommand {
    /// Show the checkout of this table
    Status,
    /// Check out the saved order
    Create,
    /// Cancel a checkout that is still a draft; ends the table session
    Cancel,
    /// Follow the checkout until it completes or is cancelled
    Watch {
        /// Seconds between polls
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
}

pub async fn check_in(client: &MejaClient, table: &str) -> Result<()> {
    match client.customer().check_in(table).await {
        Ok(next) => {
            println!("Checked in at table {}", table.trim());
            render::transition(&next);
            Ok(())
        }
        Err(e) => {
            render::notice(&CustomerSession::login_failed_notice(&e));
            Err(e.into())
        }
    }
}

pub async fn bind(client: &MejaClient, table_id: &str) -> Result<()> {
    client.customer().bind_table(table_id).await?;
    println!("Bound to table {table_id}");
    Ok(())
}

pub async fn logout(client: &MejaClient) -> Result<()> {
    let next = client.customer().logout().await?;
    println!("Logged out");
    render::transition(&next);
    Ok(())
}

pub async fn menu(client: &MejaClient, args: &MenuArgs) -> Result<()> {
    let mut query = MenuQuery::page(args.page, args.size);
    if let Some(search) = &args.search {
        query = query.with_search(search.as_str());
    }
    let page = client.catalog().list(&query).await?;
    if page.items.is_empty() {
        println!("No menu items");
        return Ok(());
    }
    render::menu_page(&page);
    Ok(())
}

pub async fn order(client: &MejaClient, command: OrderCommand) -> Result<()> {
    let mut sync = client.cart();
    sync.refresh().await.context("failed to load the current order")?;

    match command {
        OrderCommand::Show => {}
        OrderCommand::Add { menu_id, quantity } => {
            if quantity == 0 {
                bail!("quantity must be at least 1");
            }
            let item = client.catalog().get(&menu_id).await?;
            if !item.is_available() {
                bail!("{} is sold out", item.name);
            }
            for _ in 0..quantity {
                sync.cart_mut().add(&item.id, Some(item.price));
            }
            save(&mut sync).await?;
        }
        OrderCommand::Set { menu_id, quantity } => {
            sync.cart_mut().set_quantity(&menu_id, quantity);
            if !sync.cart().has_unsaved_changes() {
                println!("Nothing to change");
                return Ok(());
            }
            save(&mut sync).await?;
        }
        OrderCommand::Remove { menu_id } => {
            let notice = sync.remove_saved_item(&menu_id).await?;
            render::notice(&notice);
        }
    }

    match sync.cart().baseline() {
        Some(order) if !order.items.is_empty() => {
            render::order_summary(&OrderSummary::from_order(order));
        }
        _ => println!("Your order is empty"),
    }
    Ok(())
}

async fn save(sync: &mut CartSync) -> Result<()> {
    match sync.save().await {
        Ok(notice) => {
            render::notice(&notice);
            Ok(())
        }
        Err(e) => {
            render::notice(&CartSync::save_failed_notice(&e));
            Err(e.into())
        }
    }
}

pub async fn checkout(client: &MejaClient, command: CheckoutCommand) -> Result<()> {
    let tracker = client.checkout();
    match command {
        CheckoutCommand::Status => match tracker.current().await? {
            Some(checkout) => render::checkout(&checkout),
            None => println!("No checkout yet"),
        },
        CheckoutCommand::Create => {
            let checkout = tracker.create().await?;
            render::checkout(&checkout);
        }
        CheckoutCommand::Cancel => {
            let Some(checkout) = tracker.current().await? else {
                bail!("there is no checkout to cancel");
            };
            match tracker.cancel(&checkout).await {
                Ok(next) => render::transition(&next),
                Err(e) => {
                    render::notice(&CheckoutTracker::cancel_failed_notice(&e));
                    return Err(e.into());
                }
            }
        }
        CheckoutCommand::Watch { interval } => watch(&tracker, interval).await?,
    }
    Ok(())
}

async fn watch(tracker: &CheckoutTracker, interval: u64) -> Result<()> {
    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut watch = tracker.watch(Duration::from_secs(interval.max(1)), shutdown);
    while let Some(latest) = watch.changed().await {
        match latest {
            Some(checkout) => {
                render::checkout(&checkout);
                if checkout.state.view().terminal {
                    break;
                }
            }
            None => println!("No checkout yet"),
        }
    }
    watch.join().await;
    Ok(())
}

pub async fn rate(client: &MejaClient, menu_id: &str, stars: u8) -> Result<()> {
    let item = client.catalog().get(menu_id).await?;
    let ratings = client.ratings();
    ratings.load_all(std::slice::from_ref(&item)).await;
    let notice = ratings.submit(&item, stars).await?;
    render::notice(&notice);
    Ok(())
}

pub async fn unrate(client: &MejaClient, menu_id: &str) -> Result<()> {
    let item = client.catalog().get(menu_id).await?;
    let ratings = client.ratings();
    ratings.load_all(std::slice::from_ref(&item)).await;
    match ratings.remove(&item).await? {
        Some(notice) => render::notice(&notice),
        None => println!("You have not rated {}", item.name),
    }
    Ok(())
}

pub async fn ratings(client: &MejaClient, search: Option<&str>) -> Result<()> {
    let items = client.catalog().all().await?;
    let items: Vec<_> = match search {
        Some(query) => Catalog::filter(&items, query).into_iter().cloned().collect(),
        None => items,
    };
    let ratings = client.ratings();
    let rated = ratings.load_all(&items).await;

    for item in &items {
        println!(
            "{:<12} {:<28} {}",
            item.id,
            item.name,
            render::stars(ratings.store().rating_of(&item.id))
        );
    }
    println!("-- {} of {} items rated", rated, items.len());
    Ok(())
}
