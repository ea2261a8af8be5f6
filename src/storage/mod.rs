//! Storage layer for the food share dashboard
//!
//! This module provides a clean abstraction over the SQLite store,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Store handle, connection lifecycle and table definitions
//! - `seed`: Rebuilding the tables from the CSV seed sources
//! - `gateway`: Generic parameter-bound read/write statements
//! - `filters`: Browse filter builder
//! - `listings`: Listing CRUD, claims and lookups
//! - `reports`: Analytics catalog and dashboard queries

pub mod filters;
pub mod gateway;
pub mod listings;
pub mod models;
pub mod reports;
pub mod schema;
pub mod seed;


// Re-export the main types and database struct for easy access
pub use filters::{provider_contacts, FilterQuery, FilterSelection, ListingDimension, ListingFilter};
pub use gateway::Table;
pub use listings::{default_update_expiry, today};
pub use models::*;
pub use reports::{ReportKind, EXPIRY_WINDOW_DAYS};
pub use schema::FoodDatabase;
pub use seed::{SeedData, SeedReport, SeedSources};
