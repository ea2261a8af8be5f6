//! Fixed category sets for food listings and claims.

use crate::error::FoodShareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dietary category of a food listing.
///
/// The stored spelling (`"Non-Vegetarian"`) is what the seed sources and
/// the `Food_Type` column use; the CLI accepts the kebab-case form.
///
/// # Examples
///
/// ```rust
/// use food_share::FoodType;
///
/// let food_type: FoodType = "non-vegetarian".parse().unwrap();
/// assert_eq!(food_type, FoodType::NonVegetarian);
/// assert_eq!(food_type.to_string(), "Non-Vegetarian");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [
        FoodType::Vegetarian,
        FoodType::NonVegetarian,
        FoodType::Vegan,
    ];

    /// Column value stored in `food_listings.Food_Type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Vegetarian => "Vegetarian",
            FoodType::NonVegetarian => "Non-Vegetarian",
            FoodType::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "vegetarian" => Ok(FoodType::Vegetarian),
            "non-vegetarian" | "nonvegetarian" => Ok(FoodType::NonVegetarian),
            "vegan" => Ok(FoodType::Vegan),
            _ => Err(FoodShareError::InvalidCategory {
                kind: "food type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Meal a food listing is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealType {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snacks" | "snack" => Ok(MealType::Snacks),
            _ => Err(FoodShareError::InvalidCategory {
                kind: "meal type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a claim.
///
/// New claims start as `Pending`; the seed data also carries
/// `Completed` and `Cancelled` claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "completed" => Ok(ClaimStatus::Completed),
            "cancelled" | "canceled" => Ok(ClaimStatus::Cancelled),
            _ => Err(FoodShareError::InvalidCategory {
                kind: "claim status".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
