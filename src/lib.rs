//! Haven: the local data layer of a personal activity journal.
//!
//! Entries record life events (a meal, a mood, hours slept, ounces drunk)
//! against a seeded taxonomy of entry types and labels. Everything lives in
//! one SQLite file; reference data ships with the binary and is upgraded in
//! place by a version-gated seeder.
//!
//! | Entry type | Measurement | Example summary |
//! |------------|-------------|-----------------|
//! | **Food** | labels + meal source | I ate Cheese, Bread |
//! | **Emotion** | labels | I felt Calm |
//! | **Hydration** | number (oz) | I drank 16 oz |
//! | **Sleep** | number (hours) | I slept 7.5 hours |
//! | **Symptom** | labels | I experienced Headache |
//! | **Activity** | labels by category | I hiked |
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization, schema, migrations, and health checks
//! - [`seed`]: bundled reference data and the version-gated seeder
//! - [`journal`]: entry writes, frequency ranking, the paginated feed, subscriptions
//! - [`service`]: async facade running the core on blocking worker threads
//! - [`error`]: the crate error type

pub mod config;
pub mod db;
pub mod error;
pub mod journal;
pub mod seed;
pub mod service;
