//! Wishlist page: lists and their items, each driven by its own controller.

use std::sync::Arc;

use crate::controller::{Confirmer, Notifier, Outcome, ResourceController};
use crate::error::AppError;
use crate::gateway::{Gateway, item_path};
use crate::models::wishlist::BoughtBody;
use crate::models::{Resource, Wishlist, WishlistItem};

pub struct WishlistPage {
    lists: ResourceController<Wishlist>,
    items: ResourceController<WishlistItem>,
}

impl WishlistPage {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            lists: ResourceController::new(gateway.clone(), notifier.clone(), confirmer.clone()),
            items: ResourceController::new(gateway, notifier, confirmer),
        }
    }

    pub fn lists(&self) -> &ResourceController<Wishlist> {
        &self.lists
    }

    pub fn items(&self) -> &ResourceController<WishlistItem> {
        &self.items
    }

    /// Load lists and items together.
    pub async fn load_all(&self) -> Result<(), AppError> {
        tokio::try_join!(self.lists.load_all(), self.items.load_all())?;
        Ok(())
    }

    /// Items on one list, in list order.
    pub async fn items_of(&self, wishlist_id: i64) -> Vec<WishlistItem> {
        self.items
            .items()
            .await
            .into_iter()
            .filter(|item| item.wishlist_id == wishlist_id)
            .collect()
    }

    /// Flip an item's bought flag, then reload the items.
    pub async fn toggle_bought(&self, item: &WishlistItem) -> Result<Outcome, AppError> {
        self.items.scope().ensure_open()?;
        let _busy = self.items.begin()?;

        let body = serde_json::to_value(BoughtBody { bought: !item.bought })?;
        let result = self
            .items
            .gateway()
            .patch(&item_path(WishlistItem::COLLECTION, item.id), body)
            .await
            .map(|_| Outcome::BoughtToggled);

        self.items.finish(result, |_| {}).await
    }

    /// Delete a list after confirmation, together with its items.
    ///
    /// The items page stays busy for the whole cascade. Once the list itself is
    /// gone the result is `Deleted` even if some of its items could not be
    /// removed; those failures are notified and the items are reloaded anyway.
    pub async fn remove_list(&self, id: i64) -> Result<Outcome, AppError> {
        self.items.scope().ensure_open()?;
        let _items_busy = self.items.begin()?;

        let outcome = self.lists.remove(id).await?;
        if outcome != Outcome::Deleted {
            return Ok(outcome);
        }

        if let Err(e) = self.remove_items_of(id).await {
            self.items
                .report_failure("Could not remove the wishlist's items", &e);
        }
        if let Err(e) = self.items.reload().await {
            tracing::warn!(wishlist = id, "reload after list removal failed: {}", e);
        }
        Ok(outcome)
    }

    /// Delete every stored item of a list, continuing past failures.
    ///
    /// Reads the items from the gateway rather than the local list, which may be stale.
    async fn remove_items_of(&self, wishlist_id: i64) -> Result<(), AppError> {
        let gateway = self.items.gateway();
        let stored: Vec<WishlistItem> =
            serde_json::from_value(gateway.get(WishlistItem::COLLECTION).await?)?;
        let orphans: Vec<&WishlistItem> = stored
            .iter()
            .filter(|item| item.wishlist_id == wishlist_id)
            .collect();
        tracing::info!(wishlist = wishlist_id, count = orphans.len(), "removing items of deleted wishlist");

        let mut first_error = None;
        for item in orphans {
            if let Err(e) = gateway
                .delete(&item_path(WishlistItem::COLLECTION, item.id))
                .await
            {
                tracing::error!(wishlist = wishlist_id, item = item.id, "item removal failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn close(&self) {
        self.lists.close();
        self.items.close();
    }
}
