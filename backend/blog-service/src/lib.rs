//! Blog service: posts, threaded comments and live comment subscriptions
//!
//! Storage is either in-process ([`store::MemoryStore`]) or Postgres
//! ([`store::PostgresStore`]). Each storage kind is paired with the matching
//! `comment_feed` backend so a published comment reaches every subscriber
//! that can observe it.

pub mod config;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
