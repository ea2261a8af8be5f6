//! Type-safe wrappers and enums for food share records.

pub mod categories;
pub mod ids;

pub use categories::{ClaimStatus, FoodType, MealType};
pub use ids::{ClaimId, FoodId, ProviderId, ReceiverId};
