//! Common utilities and helper functions shared across commands.
//!
//! Resolves where the store, seed sources and model live, and builds the
//! context every command handler receives.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    cli::StoreArgs,
    estimator::{default_model_path, QuantityEstimator},
    storage::{FoodDatabase, SeedReport, SeedSources},
    FoodShareError, Result,
};

/// Where the store lives for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub store: StoreLocation,
    pub model_path: PathBuf,
}

impl AppConfig {
    /// Fill in defaults for everything the CLI (or its env vars) left unset.
    pub fn from_args(args: &StoreArgs) -> Result<Self> {
        let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        let store = if args.in_memory {
            StoreLocation::InMemory
        } else {
            match &args.db_path {
                Some(path) => StoreLocation::File(path.clone()),
                None => StoreLocation::File(FoodDatabase::database_path()?),
            }
        };

        let model_path = args
            .model
            .clone()
            .unwrap_or_else(|| default_model_path(&data_dir));

        Ok(Self {
            data_dir,
            store,
            model_path,
        })
    }

    pub fn seed_sources(&self) -> SeedSources {
        SeedSources::from_dir(&self.data_dir)
    }
}

/// Context containing the resources every command needs
pub struct CommandContext {
    pub db: FoodDatabase,
    pub seed: SeedReport,
    pub estimator: Option<QuantityEstimator>,
    pub model_path: PathBuf,
}

impl CommandContext {
    /// Open a fresh store, seed it and try to load the quantity model.
    ///
    /// A missing seed source is fatal. A missing model only disables
    /// prediction.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut db = match &config.store {
            StoreLocation::File(path) => {
                info!(path = %path.display(), "opening store");
                FoodDatabase::open(path)?
            }
            StoreLocation::InMemory => FoodDatabase::new_in_memory()?,
        };

        let seed = db.load_seed(&config.seed_sources())?;
        let estimator = load_estimator(&config.model_path);

        Ok(Self {
            db,
            seed,
            estimator,
            model_path: config.model_path.clone(),
        })
    }

    /// The loaded estimator, or `ModelUnavailable`.
    pub fn estimator_mut(&mut self) -> Result<&mut QuantityEstimator> {
        let path = self.model_path.display().to_string();
        self.estimator
            .as_mut()
            .ok_or(FoodShareError::ModelUnavailable { path })
    }

    /// Release the store connection.
    pub fn close(self) -> Result<()> {
        self.db.close()?;
        Ok(())
    }
}

/// Load the model if present, logging instead of failing when it is not.
pub fn load_estimator(path: &Path) -> Option<QuantityEstimator> {
    match QuantityEstimator::load(path) {
        Ok(estimator) => Some(estimator),
        Err(e) => {
            warn!("Quantity prediction disabled: {}", e);
            None
        }
    }
}
