//! Data models for the storage layer
//!
//! Field renames match the seed column names exactly, so the same structs
//! deserialize from the seed CSVs and serialize back out as JSON rows.

use crate::cli::types::{ClaimId, ClaimStatus, FoodId, FoodType, MealType, ProviderId, ReceiverId};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for `Expiry_Date` in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for claim timestamps created in-process.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An organisation donating food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "Provider_ID")]
    pub provider_id: ProviderId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub provider_type: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

/// An organisation or individual claiming food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: ReceiverId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub receiver_type: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

/// One donation batch offered by a provider.
///
/// `provider_type` and `location` are a snapshot of the provider's `Type`
/// and `City` taken when the listing was written. They are not refreshed
/// if the provider record changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodListing {
    #[serde(rename = "Food_ID")]
    pub food_id: FoodId,
    #[serde(rename = "Food_Name")]
    pub food_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Expiry_Date", deserialize_with = "deserialize_expiry_date")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "Provider_ID")]
    pub provider_id: ProviderId,
    #[serde(rename = "Provider_Type")]
    pub provider_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food_Type")]
    pub food_type: String,
    #[serde(rename = "Meal_Type")]
    pub meal_type: String,
}

/// A receiver's request against a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "Claim_ID")]
    pub claim_id: ClaimId,
    #[serde(rename = "Food_ID")]
    pub food_id: FoodId,
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: ReceiverId,
    #[serde(rename = "Status")]
    pub status: ClaimStatus,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Input for creating a food listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub provider_id: ProviderId,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// Input for changing quantity and expiry of an existing listing.
///
/// A missing `expiry_date` keeps the update default: the later of the
/// current expiry and today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub food_id: FoodId,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
}

/// Provider option for the add-listing picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub provider_id: ProviderId,
    pub name: String,
}

/// Listing option for the update/remove pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub food_id: FoodId,
    pub food_name: String,
}

impl ListingSummary {
    /// Label in the form `"Bread (ID: 3)"`.
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.food_name, self.food_id)
    }
}

/// One row of the browse view: a listing joined with its provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
    pub provider_name: String,
    pub provider_type: String,
    pub provider_contact: String,
}

/// Distinct provider contact derived from browse results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderContact {
    pub provider_name: String,
    pub provider_type: String,
    pub provider_contact: String,
    pub location: String,
}

/// Current distinct values of each browse dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub provider_types: Vec<String>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_providers: i64,
    pub total_receivers: i64,
    pub total_food_listings: i64,
    pub total_claims: i64,
}

/// Listing close to expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    pub location: String,
    pub provider_type: String,
}

/// Recent claim activity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentClaim {
    pub timestamp: String,
    pub food_name: String,
    pub receiver_name: String,
    pub status: String,
}

/// Providers and receivers located in one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCounts {
    pub city: String,
    pub number_of_providers: i64,
    pub number_of_receivers: i64,
}

/// Share of all claims in one status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: String,
    pub claim_count: i64,
    pub percentage: f64,
}

/// Parse an expiry date in either ISO (`2025-03-17`) or US (`3/17/2025`) form.
pub fn parse_expiry_date(raw: &str) -> crate::Result<NaiveDate> {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(_) => Ok(NaiveDate::parse_from_str(raw, "%m/%d/%Y")?),
    }
}

fn deserialize_expiry_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expiry_date(&raw).map_err(serde::de::Error::custom)
}
