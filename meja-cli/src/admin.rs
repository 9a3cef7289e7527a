//! Admin commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use meja_client::admin::{AdminAccount, CheckoutBoard, ImageFile, MenuForm};
use meja_client::{AdminRegistration, MejaClient};

use crate::render;

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Create an admin account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "MEJA_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and keep the token in the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MEJA_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the admin token
    Logout,
    /// Show the logged-in admin
    Profile,
    /// Change the admin's display name
    Rename { name: String },
    /// Delete the admin account
    DeleteAccount {
        /// Required; the account cannot be restored
        #[arg(long)]
        yes: bool,
    },
    /// List tables
    Tables,
    /// Add a table
    AddTable { number: String },
    /// Change a table's number
    RenameTable { id: String, number: String },
    /// List menu items
    Menus,
    /// Add a menu item
    AddMenu(MenuFormArgs),
    /// Edit a menu item; omitted fields keep their value
    UpdateMenu {
        id: String,
        #[command(flatten)]
        form: MenuFormArgs,
    },
    /// Delete a menu item
    DeleteMenu { id: String },
    /// List checkouts
    Checkouts {
        /// Show cancelled checkouts instead of the others
        #[arg(long)]
        cancelled: bool,
    },
    /// Move a checkout to its next state
    Advance { id: String },
    /// Counts and recent orders
    Dashboard,
}

#[derive(Args, Debug, Default)]
pub struct MenuFormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Price in rupiah
    #[arg(long)]
    pub price: Option<String>,
    /// Stock; leave out for untracked
    #[arg(long)]
    pub quantity: Option<i32>,
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl MenuFormArgs {
    /// Overlay the given fields on `form`
    async fn apply(self, mut form: MenuForm) -> Result<MenuForm> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if self.quantity.is_some() {
            form.quantity = self.quantity;
        }
        if let Some(path) = self.image {
            form.image = Some(read_image(&path).await?);
        }
        Ok(form)
    }
}

async fn read_image(path: &Path) -> Result<ImageFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("image path has no file name")?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(ImageFile { file_name, bytes })
}

pub async fn run(client: &MejaClient, command: AdminCommand) -> Result<()> {
    let account = client.admin();
    match command {
        AdminCommand::Register {
            email,
            name,
            password,
        } => {
            let registration = AdminRegistration {
                email,
                name,
                password,
            };
            let next = account.register(&registration).await?;
            println!("Account created, log in to continue");
            render::transition(&next);
        }
        AdminCommand::Login { email, password } => {
            let next = account.login(&email, &password).await?;
            render::transition(&next);
        }
        AdminCommand::Logout => render::transition(&account.logout()?),
        AdminCommand::Profile => {
            let admin = account.profile().await?;
            println!("{} <{}>", admin.name, admin.email);
        }
        AdminCommand::Rename { name } => match account.rename(&name).await {
            Ok(notice) => render::notice(&notice),
            Err(e) => {
                render::notice(&AdminAccount::update_failed_notice(&e));
                return Err(e.into());
            }
        },
        AdminCommand::DeleteAccount { yes } => {
            if !yes {
                bail!("pass --yes to delete the account");
            }
            render::transition(&account.delete_account().await?);
        }
        AdminCommand::Tables => {
            let mut panel = client.tables();
            render::tables(panel.refresh().await?);
        }
        AdminCommand::AddTable { number } => {
            let mut panel = client.tables();
            render::notice(&panel.create(&number).await?);
            render::tables(panel.tables());
        }
        AdminCommand::RenameTable { id, number } => {
            let mut panel = client.tables();
            render::notice(&panel.rename(&id, &number).await?);
            render::tables(panel.tables());
        }
        AdminCommand::Menus => {
            let mut panel = client.menus();
            for item in panel.refresh().await? {
                render::menu_item(item);
            }
        }
        AdminCommand::AddMenu(args) => {
            let form = args.apply(MenuForm::default()).await?;
            let mut panel = client.menus();
            render::notice(&panel.create(form).await?);
        }
        AdminCommand::UpdateMenu { id, form } => {
            let existing = client.catalog().get(&id).await?;
            let form = form.apply(MenuForm::from_item(&existing)).await?;
            let mut panel = client.menus();
            render::notice(&panel.update(&id, form).await?);
        }
        AdminCommand::DeleteMenu { id } => {
            let mut panel = client.menus();
            render::notice(&panel.delete(&id).await?);
        }
        AdminCommand::Checkouts { cancelled } => {
            let mut board = client.checkout_board();
            board.refresh().await?;
            board.set_show_cancelled(cancelled);
            render::checkout_records(&board.visible());
        }
        AdminCommand::Advance { id } => {
            let mut board = client.checkout_board();
            board.refresh().await?;
            match board.advance(&id).await {
                Ok(notice) => render::notice(&notice),
                Err(e) => {
                    render::notice(&CheckoutBoard::advance_failed_notice(&id));
                    return Err(e.into());
                }
            }
        }
        AdminCommand::Dashboard => {
            let summary = client.dashboard().load().await?;
            render::dashboard(&summary);
        }
    }
    Ok(())
}
