//! Local Food Wastage Management Library
//!
//! Data-access layer behind a surplus-food dashboard: providers list food,
//! receivers claim it, and operators review analytics over the listings.
//!
//! ## Features
//!
//! - **Seed Loading**: Rebuild the store from four CSV sources on every start
//! - **Query Gateway**: Parameter-bound reads and writes over one connection
//! - **Browse Filters**: Multi-value filters over city, provider, food and meal type
//! - **Listing Management**: Add, update and remove listings; claim them
//! - **Reporting**: A fixed catalog of fifteen aggregate queries
//! - **Quantity Prediction**: Estimate donation size from a trained model
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use food_share::storage::{FoodDatabase, ListingFilter, FilterSelection, SeedSources};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut db = FoodDatabase::new_in_memory()?;
//! db.load_seed(&SeedSources::from_dir(Path::new("data")))?;
//!
//! let options = db.filter_options()?;
//! let filter = ListingFilter::from_selection(&FilterSelection::all(&options));
//! for row in db.filter_listings(&filter)? {
//!     println!("{} x{} from {}", row.food_name, row.quantity, row.provider_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FOOD_SHARE_DATA_DIR=./data
//! export FOOD_SHARE_DB_PATH=/tmp/food_wastage.db
//! export FOOD_SHARE_MODEL_PATH=./data/food_quantity_predictor.json
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod estimator;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{ClaimId, ClaimStatus, FoodId, FoodType, MealType, ProviderId, ReceiverId};
pub use error::{FoodShareError, Result};
pub use estimator::{DonationFeatures, QuantityEstimator, QuantityModel};
pub use storage::FoodDatabase;

pub const DATA_DIR_ENV_VAR: &str = "FOOD_SHARE_DATA_DIR";
pub const DB_PATH_ENV_VAR: &str = "FOOD_SHARE_DB_PATH";
pub const MODEL_PATH_ENV_VAR: &str = "FOOD_SHARE_MODEL_PATH";
