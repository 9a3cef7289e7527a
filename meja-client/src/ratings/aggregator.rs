//! Optimistic rating flows against the menu service

use std::sync::Arc;

use futures::future::join_all;
use shared::models::{MenuItem, Rating};

use super::store::{RatingAction, RatingStore};
use crate::api::RatingApi;
use crate::error::{ClientError, ClientResult};
use crate::http::Gateway;
use crate::route::Notice;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Rating page state for the current table session
#[derive(Debug, Clone)]
pub struct RatingAggregator {
    gateway: Gateway,
    store: Arc<RatingStore>,
}

impl RatingAggregator {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            store: Arc::new(RatingStore::new()),
        }
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// The session's rating of one item; 404 is `None`
    pub async fn fetch_mine(&self, menu_id: &str) -> ClientResult<Option<Rating>> {
        RatingApi::new(&self.gateway).mine(menu_id).await
    }

    /// Fetch the session's rating of every item concurrently. Items whose
    /// lookup fails are treated as unrated. Returns how many are rated.
    ///
    /// Each item is marked loading while its lookup runs. Items with a
    /// change in flight are skipped, and a lookup that lands after the
    /// item was changed locally is discarded.
    pub async fn load_all(&self, items: &[MenuItem]) -> usize {
        let store = &*self.store;
        let lookups = items.iter().filter_map(|item| {
            let guard = store.begin_load(&item.id)?;
            let revision = store.revision(&item.id);
            Some(async move {
                let _guard = guard;
                let rating = match self.fetch_mine(&item.id).await {
                    Ok(rating) => rating,
                    Err(e) => {
                        tracing::warn!(menu_id = %item.id, "Failed to fetch rating: {}", e);
                        None
                    }
                };
                if !store.resync_since(&item.id, rating, revision) {
                    tracing::debug!(menu_id = %item.id, "Rating changed while loading, keeping local");
                }
            })
        });

        join_all(lookups).await;
        store.len()
    }

    /// Rate an item. Shows the value at once, creates or updates on the
    /// server, and resyncs the item if that fails.
    pub async fn submit(&self, item: &MenuItem, rating: u8) -> ClientResult<Notice> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ClientError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        let _guard = self.store.begin(&item.id).ok_or_else(|| ClientError::InvalidState {
            action: "rate",
            state: "a rating is already being saved".into(),
        })?;

        let existing_id = self.store.get(&item.id).and_then(|r| r.rating_id);
        self.store.apply(RatingAction::Optimistic {
            menu_id: item.id.clone(),
            rating,
        });

        let api = RatingApi::new(&self.gateway);
        let result = match &existing_id {
            Some(rating_id) => api.update(rating_id, &item.id, rating).await,
            None => api.create(&item.id, rating).await,
        };

        match result {
            Ok(stored) => {
                self.store.apply(RatingAction::Confirmed {
                    menu_id: item.id.clone(),
                    rating: stored,
                });
                Ok(match existing_id {
                    Some(_) => Notice::info(
                        "Rating Updated",
                        format!(
                            "Your rating for \"{}\" has been updated to {} stars.",
                            item.name, rating
                        ),
                    ),
                    None => Notice::info(
                        "Rating Submitted",
                        format!("Thank you for rating \"{}\" {} stars!", item.name, rating),
                    ),
                })
            }
            Err(e) => {
                tracing::warn!(menu_id = %item.id, "Failed to submit rating: {}", e);
                self.resync(&item.id).await;
                Err(e)
            }
        }
    }

    /// Remove the session's rating of an item. A rating that was never
    /// stored is dropped locally and yields no notice.
    pub async fn remove(&self, item: &MenuItem) -> ClientResult<Option<Notice>> {
        let _guard = self.store.begin(&item.id).ok_or_else(|| ClientError::InvalidState {
            action: "remove rating",
            state: "a rating is already being saved".into(),
        })?;

        let rating_id = self.store.get(&item.id).and_then(|r| r.rating_id);
        self.store.apply(RatingAction::Removed {
            menu_id: item.id.clone(),
        });
        let Some(rating_id) = rating_id else {
            return Ok(None);
        };

        match RatingApi::new(&self.gateway).delete(&rating_id).await {
            Ok(()) => Ok(Some(Notice::info(
                "Rating Removed",
                format!(
                    "Your rating for \"{}\" has been successfully removed.",
                    item.name
                ),
            ))),
            Err(e) => {
                tracing::warn!(menu_id = %item.id, "Failed to remove rating: {}", e);
                self.resync(&item.id).await;
                Err(e)
            }
        }
    }

    /// Replace local state for one item with the server's
    async fn resync(&self, menu_id: &str) {
        let rating = match self.fetch_mine(menu_id).await {
            Ok(rating) => rating,
            Err(e) => {
                tracing::warn!(menu_id, "Resync failed, dropping local rating: {}", e);
                None
            }
        };
        self.store.apply(RatingAction::Resynced {
            menu_id: menu_id.to_string(),
            rating,
        });
    }
}
