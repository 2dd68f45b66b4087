//! Upload a food photo, identify it with an ImageNet classifier and look up
//! its calories.

pub mod classifier;
pub mod config;
pub mod error;
pub mod nutrition;
pub mod web;

pub use config::AppConfig;
pub use error::AppError;
pub use web::{router, AppState};
