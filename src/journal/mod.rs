//! The activity journal: entries, their labels, and the views built on them.
//!
//! - [`store`]: atomic entry writes
//! - [`queries`]: reference-data and feed reads
//! - [`frequency`]: hour-of-day label counts
//! - [`labeling`]: label partitioning, selection state and suggestions
//! - [`feed`]: paginated, day-grouped feed
//! - [`notify`]: watch-channel subscriptions refreshed after writes
//! - [`summary`]: one-line entry summaries
//! - [`stats`]: counts for the `stats` command

pub mod feed;
pub mod frequency;
pub mod labeling;
pub mod notify;
pub mod queries;
pub mod stats;
pub mod store;
pub mod summary;
pub mod time;
pub mod types;
