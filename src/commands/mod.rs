//! Command implementations for the food share CLI

pub mod browse;
pub mod claims;
pub mod common;
pub mod dashboard;
pub mod listings;
pub mod output;
pub mod predict;
pub mod reports;

#[cfg(test)]
mod tests;

pub use common::{AppConfig, CommandContext, StoreLocation};
