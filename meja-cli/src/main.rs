//! # meja CLI
//!
//! Dine-in ordering from the terminal. The session (table session or admin
//! token) is kept in `--session-dir` between runs.

mod admin;
mod customer;
mod logger;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use meja_client::{ClientConfig, ClientError, MejaClient, Route};

use admin::AdminCommand;
use customer::{CheckoutCommand, MenuArgs, OrderCommand};

/// Order from your table, or run the restaurant as admin
#[derive(Parser, Debug)]
#[command(name = "meja", version, about, long_about = None)]
struct Cli {
    /// More output; repeat for more (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory the session is stored in
    #[arg(long, env = "MEJA_SESSION_DIR", default_value = ".meja", global = true)]
    session_dir: PathBuf,

    /// Also write logs to a daily file in this directory
    #[arg(long, env = "MEJA_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sit down at a table by its number
    CheckIn { table: String },
    /// Bind to a table id from a QR code
    Bind { table_id: String },
    /// End the table session
    Logout,
    /// Browse the menu
    Menu(MenuArgs),
    /// The table's order
    Order {
        #[command(subcommand)]
        action: OrderCommand,
    },
    /// Check out and follow the order
    Checkout {
        #[command(subcommand)]
        action: CheckoutCommand,
    },
    /// Rate a menu item from 1 to 5 stars
    Rate {
        menu_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
    },
    /// Remove your rating of a menu item
    Unrate { menu_id: String },
    /// Your ratings across the menu
    Ratings {
        #[arg(long)]
        search: Option<String>,
    },
    /// Restaurant administration
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logger::init_logger(cli.verbose, cli.log_dir.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("Error: {e:#}");
            if let Some(route) = e.downcast_ref::<ClientError>().and_then(ClientError::redirect) {
                eprintln!("{}", login_hint(route));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env()?.with_session_dir(&cli.session_dir);
    let client = MejaClient::new(&config)?;
    tracing::debug!(session_dir = %cli.session_dir.display(), "client ready");

    match cli.command {
        Command::CheckIn { table } => customer::check_in(&client, &table).await,
        Command::Bind { table_id } => customer::bind(&client, &table_id).await,
        Command::Logout => customer::logout(&client).await,
        Command::Menu(args) => customer::menu(&client, &args).await,
        Command::Order { action } => customer::order(&client, action).await,
        Command::Checkout { action } => customer::checkout(&client, action).await,
        Command::Rate { menu_id, stars } => customer::rate(&client, &menu_id, stars).await,
        Command::Unrate { menu_id } => customer::unrate(&client, &menu_id).await,
        Command::Ratings { search } => customer::ratings(&client, search.as_deref()).await,
        Command::Admin { action } => admin::run(&client, action).await,
    }
}

fn login_hint(route: Route) -> &'static str {
    match route {
        Route::AdminLogin => "Log in with `meja admin login --email <email>`",
        _ => "Check in with `meja check-in <table number>`",
    }
}
