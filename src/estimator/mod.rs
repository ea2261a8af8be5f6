//! Quantity estimator for new donations
//!
//! Wraps a previously trained regression over four categorical features
//! (provider type, location, food type, meal type) and turns its raw output
//! into a whole, non-negative quantity. Training happens elsewhere; this
//! module only loads the artifact and evaluates it.

use crate::error::{FoodShareError, Result};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default artifact file name inside the data directory.
pub const MODEL_FILENAME: &str = "food_quantity_predictor.json";

const PREDICTION_CACHE_SIZE: usize = 256;

/// Feature row fed to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonationFeatures {
    #[serde(rename = "Provider_Type")]
    pub provider_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food_Type")]
    pub food_type: String,
    #[serde(rename = "Meal_Type")]
    pub meal_type: String,
}

impl DonationFeatures {
    pub fn new(
        provider_type: impl Into<String>,
        location: impl Into<String>,
        food_type: impl Into<String>,
        meal_type: impl Into<String>,
    ) -> Self {
        Self {
            provider_type: provider_type.into(),
            location: location.into(),
            food_type: food_type.into(),
            meal_type: meal_type.into(),
        }
    }

    /// (feature name, category) pairs in model column order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("Provider_Type", self.provider_type.as_str()),
            ("Location", self.location.as_str()),
            ("Food_Type", self.food_type.as_str()),
            ("Meal_Type", self.meal_type.as_str()),
        ]
    }
}

/// A trained model mapping a feature row to a raw quantity estimate.
pub trait QuantityModel {
    fn predict_raw(&self, features: &DonationFeatures) -> f64;
}

/// One-hot encoded linear regression.
///
/// Each feature maps categories to a weight; a category the model never
/// saw contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearCategoricalModel {
    pub intercept: f64,
    #[serde(default)]
    pub coefficients: HashMap<String, HashMap<String, f64>>,
}

impl LinearCategoricalModel {
    /// Load a model artifact from JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FoodShareError::ModelUnavailable {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl QuantityModel for LinearCategoricalModel {
    fn predict_raw(&self, features: &DonationFeatures) -> f64 {
        features
            .pairs()
            .iter()
            .filter_map(|(feature, category)| {
                self.coefficients
                    .get(*feature)
                    .and_then(|weights| weights.get(*category))
            })
            .fold(self.intercept, |acc, weight| acc + weight)
    }
}

/// Round a raw model output to the nearest non-negative integer, ties to even.
pub fn round_quantity(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round_ties_even();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Estimator front-end: evaluates the model and memoises results per
/// feature row.
pub struct QuantityEstimator {
    model: Box<dyn QuantityModel>,
    cache: LruCache<DonationFeatures, u32>,
}

impl QuantityEstimator {
    pub fn new(model: Box<dyn QuantityModel>) -> Self {
        let capacity = NonZeroUsize::new(PREDICTION_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            model,
            cache: LruCache::new(capacity),
        }
    }

    /// Load the artifact at `path`; `ModelUnavailable` when it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        let model = LinearCategoricalModel::from_path(path)?;
        info!(path = %path.display(), "loaded quantity model");
        Ok(Self::new(Box::new(model)))
    }

    /// Predicted quantity for one donation.
    pub fn predict(&mut self, features: &DonationFeatures) -> u32 {
        if let Some(cached) = self.cache.get(features) {
            return *cached;
        }
        let raw = self.model.predict_raw(features);
        let quantity = round_quantity(raw);
        debug!(raw, quantity, "quantity prediction");
        self.cache.put(features.clone(), quantity);
        quantity
    }
}

/// Default artifact path for a data directory.
pub fn default_model_path(data_dir: &Path) -> PathBuf {
    data_dir.join(MODEL_FILENAME)
}
