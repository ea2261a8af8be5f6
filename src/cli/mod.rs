//! CLI argument definitions and parsing.

pub mod types;

use crate::{DATA_DIR_ENV_VAR, DB_PATH_ENV_VAR, MODEL_PATH_ENV_VAR};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{FoodId, FoodType, MealType, ProviderId, ReceiverId};

/// Where the store, seed sources and model artifact live.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Directory holding the four seed CSVs.
    #[clap(long, global = true, env = DATA_DIR_ENV_VAR)]
    pub data_dir: Option<PathBuf>,

    /// Store file; rebuilt on every run (default: <cache dir>/food-share/food_wastage.db).
    #[clap(long, global = true, env = DB_PATH_ENV_VAR, conflicts_with = "in_memory")]
    pub db_path: Option<PathBuf>,

    /// Keep the store in memory instead of on disk.
    #[clap(long, global = true)]
    pub in_memory: bool,

    /// Quantity model artifact (default: <data dir>/food_quantity_predictor.json).
    #[clap(long, global = true, env = MODEL_PATH_ENV_VAR)]
    pub model: Option<PathBuf>,
}

/// Browse filter selections. An omitted dimension selects every current value.
#[derive(Debug, Clone, Default, Args)]
pub struct BrowseFilters {
    /// Filter by city (repeatable): `--city Delhi --city Pune`.
    #[clap(long = "city")]
    pub cities: Option<Vec<String>>,

    /// Filter by provider type (repeatable).
    #[clap(long = "provider-type")]
    pub provider_types: Option<Vec<String>>,

    /// Filter by food type (repeatable).
    #[clap(long = "food-type")]
    pub food_types: Option<Vec<FoodType>>,

    /// Filter by meal type (repeatable).
    #[clap(long = "meal-type")]
    pub meal_types: Option<Vec<MealType>>,
}

#[derive(Debug, Subcommand)]
pub enum ListingCmd {
    /// Add a new food listing for a provider.
    Add {
        /// Provider donating the food.
        #[clap(long)]
        provider_id: ProviderId,

        /// Name of the food item.
        #[clap(long)]
        food_name: String,

        /// Quantity (at least 1).
        #[clap(long)]
        quantity: i64,

        /// Expiry date (YYYY-MM-DD), today or later.
        #[clap(long)]
        expiry: NaiveDate,

        #[clap(long, value_enum)]
        food_type: FoodType,

        #[clap(long, value_enum)]
        meal_type: MealType,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Change quantity and expiry date of an existing listing.
    Update {
        #[clap(long)]
        food_id: FoodId,

        /// New quantity (at least 1).
        #[clap(long)]
        quantity: i64,

        /// New expiry date (YYYY-MM-DD); defaults to the later of today and the current expiry.
        #[clap(long)]
        expiry: Option<NaiveDate>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Remove a listing together with its claims.
    Remove {
        #[clap(long)]
        food_id: FoodId,
    },

    /// List every listing id and name.
    List {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Overview metrics, food expiring soon and recent claims.
    Dashboard {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Browse listings with provider contacts.
    Browse {
        #[clap(flatten)]
        filters: BrowseFilters,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Add, update, remove or list food listings.
    Listing {
        #[clap(subcommand)]
        cmd: ListingCmd,
    },

    /// Claim a listing on behalf of a receiver.
    Claim {
        #[clap(long)]
        food_id: FoodId,

        #[clap(long)]
        receiver_id: ReceiverId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Run the analytics catalog, or one report by number.
    Report {
        /// Report number (1-15); all reports when omitted.
        #[clap(long, short, value_parser = clap::value_parser!(u8).range(1..=15))]
        number: Option<u8>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Predict the quantity of a new donation.
    Predict {
        #[clap(long)]
        provider_type: String,

        /// City of the provider.
        #[clap(long)]
        location: String,

        #[clap(long, value_enum)]
        food_type: FoodType,

        #[clap(long, value_enum)]
        meal_type: MealType,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "food-share", about = "Local food wastage management dashboard")]
pub struct FoodShare {
    #[clap(flatten)]
    pub store: StoreArgs,

    /// Log debug output to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
