//! Application context shared by every page.
//!
//! Holds the resolved configuration, the REST gateway and the in-process
//! gateway for collections the API does not serve, plus the notification and
//! confirmation seams. Each page gets its own controller built from these.

use std::sync::Arc;

use crate::config::Config;
use crate::controller::{
    AccountPage, CategoryPage, Confirmer, Notifier, ResourceController, SubcategoryPage,
    TransactionPage, WishlistPage,
};
use crate::error::AppError;
use crate::gateway::{Gateway, MemoryGateway, RestGateway};
use crate::models::Resource;

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    remote: Arc<dyn Gateway>,
    local: Arc<dyn Gateway>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
}

impl AppContext {
    /// Context talking to the API at `config.api_base_url`.
    pub fn new(
        config: Config,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Result<Self, AppError> {
        let remote = Arc::new(RestGateway::new(config.clone())?);
        tracing::info!(api = %config.api_base_url, "application context ready");

        Ok(Self::with_gateways(
            config,
            remote,
            Arc::new(MemoryGateway::new()),
            notifier,
            confirmer,
        ))
    }

    /// Context over explicit gateways.
    pub fn with_gateways(
        config: Config,
        remote: Arc<dyn Gateway>,
        local: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            config,
            remote,
            local,
            notifier,
            confirmer,
        }
    }

    fn page<R: Resource>(&self) -> ResourceController<R> {
        ResourceController::new(
            self.remote.clone(),
            self.notifier.clone(),
            self.confirmer.clone(),
        )
    }

    pub fn account_page(&self) -> AccountPage {
        self.page()
    }

    pub fn category_page(&self) -> CategoryPage {
        self.page()
    }

    pub fn subcategory_page(&self) -> SubcategoryPage {
        self.page()
    }

    pub fn transaction_page(&self) -> TransactionPage {
        TransactionPage::new(
            self.remote.clone(),
            self.notifier.clone(),
            self.confirmer.clone(),
        )
    }

    /// Wishlists live in the local gateway; they survive as long as this context.
    pub fn wishlist_page(&self) -> WishlistPage {
        WishlistPage::new(
            self.local.clone(),
            self.notifier.clone(),
            self.confirmer.clone(),
        )
    }
}
