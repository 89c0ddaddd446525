//! Trip history and travel statistics.

mod error;
mod record;
mod stats;
mod store;

pub use error::HistoryError;
pub use record::{LastMileLeg, TripRecord};
pub use stats::{TravelStats, points_for};
pub use store::TripHistory;
