//! Customer ratings of menu items

mod aggregator;
mod store;

pub use aggregator::{MAX_RATING, MIN_RATING, RatingAggregator};
pub use store::{InFlightGuard, RatingAction, RatingStore, UserRating};
