pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::YearoutError;
pub use crate::core::services::YearoutService;

#[cfg(test)]
mod tests;
