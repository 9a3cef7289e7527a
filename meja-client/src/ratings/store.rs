//! Local rating state
//!
//! All changes go through [`RatingStore::apply`]. A failed server call is
//! never undone by hand; the item is refetched and a `Resynced` action
//! replaces whatever the optimistic step wrote.
//!
//! Every applied action bumps the item's revision. A bulk load reads the
//! revision before fetching and drops its result if the item changed in
//! the meantime ([`RatingStore::resync_since`]).

use dashmap::{DashMap, DashSet};
use shared::models::Rating;

/// The session's rating of one menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRating {
    pub menu_id: String,
    /// 1..=5
    pub rating: u8,
    /// Server id, once the rating is stored
    pub rating_id: Option<String>,
}

/// State change for one item
#[derive(Debug, Clone, PartialEq)]
pub enum RatingAction {
    /// Show the new value before the server answers
    Optimistic { menu_id: String, rating: u8 },
    /// The server stored the rating
    Confirmed { menu_id: String, rating: Rating },
    /// The rating is gone
    Removed { menu_id: String },
    /// Replace local state with what the server has
    Resynced {
        menu_id: String,
        rating: Option<Rating>,
    },
}

/// Ratings keyed by menu item id, plus the items with a call in flight
#[derive(Debug, Default)]
pub struct RatingStore {
    ratings: DashMap<String, UserRating>,
    revisions: DashMap<String, u64>,
    in_flight: DashSet<String>,
    loading: DashSet<String>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, action: RatingAction) {
        let menu_id = match &action {
            RatingAction::Optimistic { menu_id, .. }
            | RatingAction::Confirmed { menu_id, .. }
            | RatingAction::Removed { menu_id }
            | RatingAction::Resynced { menu_id, .. } => menu_id.clone(),
        };
        *self.revisions.entry(menu_id).or_insert(0) += 1;
        self.write(action);
    }

    fn write(&self, action: RatingAction) {
        match action {
            RatingAction::Optimistic { menu_id, rating } => {
                self.ratings
                    .entry(menu_id.clone())
                    .and_modify(|r| r.rating = rating)
                    .or_insert(UserRating {
                        menu_id,
                        rating,
                        rating_id: None,
                    });
            }
            RatingAction::Confirmed { menu_id, rating } => {
                self.ratings.insert(menu_id.clone(), stored(menu_id, rating));
            }
            RatingAction::Removed { menu_id } => {
                self.ratings.remove(&menu_id);
            }
            RatingAction::Resynced { menu_id, rating } => match rating {
                Some(rating) if rating.rating > 0 => {
                    self.ratings.insert(menu_id.clone(), stored(menu_id, rating));
                }
                _ => {
                    self.ratings.remove(&menu_id);
                }
            },
        }
    }

    /// Changes applied to an item so far
    pub fn revision(&self, menu_id: &str) -> u64 {
        self.revisions.get(menu_id).map(|r| *r).unwrap_or(0)
    }

    /// Apply a fetched rating unless the item changed after `revision` was
    /// read. Returns whether it was applied.
    pub fn resync_since(&self, menu_id: &str, rating: Option<Rating>, revision: u64) -> bool {
        let mut current = self.revisions.entry(menu_id.to_string()).or_insert(0);
        if *current != revision {
            return false;
        }
        *current += 1;
        self.write(RatingAction::Resynced {
            menu_id: menu_id.to_string(),
            rating,
        });
        true
    }

    pub fn get(&self, menu_id: &str) -> Option<UserRating> {
        self.ratings.get(menu_id).map(|r| r.value().clone())
    }

    /// Stars to show; 0 when unrated
    pub fn rating_of(&self, menu_id: &str) -> u8 {
        self.ratings.get(menu_id).map(|r| r.rating).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All ratings, ordered by menu id
    pub fn snapshot(&self) -> Vec<UserRating> {
        let mut all: Vec<UserRating> = self.ratings.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.menu_id.cmp(&b.menu_id));
        all
    }

    /// Mark an item busy. `None` if a call for it is already running.
    pub fn begin(&self, menu_id: &str) -> Option<InFlightGuard<'_>> {
        if !self.in_flight.insert(menu_id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            set: &self.in_flight,
            menu_id: menu_id.to_string(),
        })
    }

    /// Mark an item as loading. `None` if it is already loading or a
    /// change to it is in flight.
    pub fn begin_load(&self, menu_id: &str) -> Option<InFlightGuard<'_>> {
        if self.in_flight.contains(menu_id) || !self.loading.insert(menu_id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            set: &self.loading,
            menu_id: menu_id.to_string(),
        })
    }

    /// Loading or saving
    pub fn is_pending(&self, menu_id: &str) -> bool {
        self.in_flight.contains(menu_id) || self.loading.contains(menu_id)
    }

    pub fn is_loading(&self, menu_id: &str) -> bool {
        self.loading.contains(menu_id)
    }
}

fn stored(menu_id: String, rating: Rating) -> UserRating {
    UserRating {
        menu_id,
        rating: rating.rating,
        rating_id: Some(rating.id),
    }
}

/// Clears the busy mark on drop
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    set: &'a DashSet<String>,
    menu_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.menu_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, menu_id: &str, rating: u8) -> Rating {
        Rating {
            id: id.into(),
            menu_id: menu_id.into(),
            rating,
            created_at: String::new(),
        }
    }

    #[test]
    fn optimistic_keeps_known_id() {
        let store = RatingStore::new();
        store.apply(RatingAction::Confirmed {
            menu_id: "m1".into(),
            rating: server("r1", "m1", 3),
        });
        store.apply(RatingAction::Optimistic {
            menu_id: "m1".into(),
            rating: 5,
        });

        let r = store.get("m1").unwrap();
        assert_eq!(r.rating, 5);
        assert_eq!(r.rating_id.as_deref(), Some("r1"));
    }

    #[test]
    fn resync_replaces_or_removes() {
        let store = RatingStore::new();
        store.apply(RatingAction::Optimistic {
            menu_id: "m1".into(),
            rating: 4,
        });
        store.apply(RatingAction::Resynced {
            menu_id: "m1".into(),
            rating: None,
        });
        assert_eq!(store.rating_of("m1"), 0);
        assert!(store.is_empty());

        store.apply(RatingAction::Resynced {
            menu_id: "m2".into(),
            rating: Some(server("r9", "m2", 2)),
        });
        assert_eq!(store.get("m2").unwrap().rating_id.as_deref(), Some("r9"));
    }

    #[test]
    fn in_flight_guard_is_exclusive() {
        let store = RatingStore::new();
        let guard = store.begin("m1").unwrap();
        assert!(store.is_pending("m1"));
        assert!(store.begin("m1").is_none());
        assert!(store.begin("m2").is_some());

        drop(guard);
        assert!(!store.is_pending("m1"));
        assert!(store.begin("m1").is_some());
    }

    #[test]
    fn load_yields_to_changes() {
        let store = RatingStore::new();
        let saving = store.begin("m1").unwrap();
        assert!(store.begin_load("m1").is_none());
        drop(saving);

        let loading = store.begin_load("m1").unwrap();
        assert!(store.is_loading("m1"));
        assert!(store.is_pending("m1"));
        assert!(store.begin_load("m1").is_none());
        drop(loading);
        assert!(!store.is_pending("m1"));
    }

    #[test]
    fn stale_resync_is_dropped() {
        let store = RatingStore::new();
        let seen = store.revision("m1");
        store.apply(RatingAction::Confirmed {
            menu_id: "m1".into(),
            rating: server("r1", "m1", 4),
        });

        assert!(!store.resync_since("m1", None, seen));
        assert_eq!(store.rating_of("m1"), 4);

        let seen = store.revision("m1");
        assert!(store.resync_since("m1", Some(server("r1", "m1", 2)), seen));
        assert_eq!(store.rating_of("m1"), 2);
    }
}
