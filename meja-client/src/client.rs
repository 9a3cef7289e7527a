//! Client facade
//!
//! One [`Gateway`] (and so one session) shared by every flow.

use crate::admin::{AdminAccount, CheckoutBoard, Dashboard, MenuPanel, TablesPanel};
use crate::api::StorageApi;
use crate::cart::CartSync;
use crate::catalog::Catalog;
use crate::checkout::CheckoutTracker;
use crate::config::ClientConfig;
use crate::customer::CustomerSession;
use crate::error::ClientResult;
use crate::http::Gateway;
use crate::ratings::RatingAggregator;
use crate::session::SessionContext;

/// Entry point of the SDK
#[derive(Debug, Clone)]
pub struct MejaClient {
    gateway: Gateway,
}

impl MejaClient {
    /// Build from configuration; the session is loaded from
    /// `config.session_dir` when set
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            gateway: Gateway::from_config(config)?,
        })
    }

    /// Build around an existing session
    pub fn with_session(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        Ok(Self {
            gateway: Gateway::new(config, session)?,
        })
    }

    /// Configuration from the environment
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionContext {
        self.gateway.session()
    }

    pub fn customer(&self) -> CustomerSession {
        CustomerSession::new(self.gateway.clone())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.gateway.clone())
    }

    pub fn cart(&self) -> CartSync {
        CartSync::new(self.gateway.clone())
    }

    pub fn checkout(&self) -> CheckoutTracker {
        CheckoutTracker::new(self.gateway.clone())
    }

    pub fn ratings(&self) -> RatingAggregator {
        RatingAggregator::new(self.gateway.clone())
    }

    pub fn storage(&self) -> StorageApi<'_> {
        StorageApi::new(&self.gateway)
    }

    pub fn admin(&self) -> AdminAccount {
        AdminAccount::new(self.gateway.clone())
    }

    pub fn tables(&self) -> TablesPanel {
        TablesPanel::new(self.gateway.clone())
    }

    pub fn menus(&self) -> MenuPanel {
        MenuPanel::new(self.gateway.clone())
    }

    pub fn checkout_board(&self) -> CheckoutBoard {
        CheckoutBoard::new(self.gateway.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.gateway.clone())
    }
}
