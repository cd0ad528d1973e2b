//! Chirp Market: an in-memory social feed and marketplace client.
//!
//! All data is seeded mock data held by [`store::AppStore`]; backend calls go
//! through [`backend::BackendTrait`], implemented here by a logging stub.

pub mod backend;
pub mod config;
pub mod error;
pub mod forms;
pub mod market;
pub mod models;
pub mod seed;
pub mod store;
pub mod views;

pub use backend::{BackendTrait, MockBackend};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::AppStore;
