//! Listing CRUD, claim creation and single-row lookups

use super::models::*;
use super::schema::FoodDatabase;
use crate::cli::types::{ClaimId, ClaimStatus, FoodId, ProviderId, ReceiverId};
use crate::error::FoodShareError;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

const LISTING_COLUMNS: &str = "Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID,
     Provider_Type, Location, Food_Type, Meal_Type";

/// Local calendar date used for expiry validation and expiry windows.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Default expiry offered by the update form: never earlier than the
/// listing's current expiry, never earlier than today.
pub fn default_update_expiry(listing: &FoodListing, today: NaiveDate) -> NaiveDate {
    listing.expiry_date.max(today)
}

fn validate_quantity(quantity: i64) -> crate::Result<()> {
    if quantity < 1 {
        return Err(FoodShareError::InvalidListing {
            reason: format!("quantity must be at least 1, got {}", quantity),
        });
    }
    Ok(())
}

fn validate_expiry(expiry_date: NaiveDate, today: NaiveDate) -> crate::Result<()> {
    if expiry_date < today {
        return Err(FoodShareError::InvalidListing {
            reason: format!(
                "expiry date {} is before {}",
                expiry_date.format(DATE_FORMAT),
                today.format(DATE_FORMAT)
            ),
        });
    }
    Ok(())
}

impl FoodDatabase {
    /// Add a listing, validating against the local date.
    pub fn add_listing(&mut self, listing: &NewListing) -> Result<FoodListing> {
        self.add_listing_as_of(listing, today())
    }

    /// Add a listing as if submitted on `today`.
    ///
    /// The provider's current `Type` and `City` are copied onto the new row
    /// as `Provider_Type` and `Location`.
    pub fn add_listing_as_of(&mut self, listing: &NewListing, today: NaiveDate) -> Result<FoodListing> {
        let food_name = listing.food_name.trim();
        if food_name.is_empty() {
            return Err(FoodShareError::InvalidListing {
                reason: "food name must not be empty".to_string(),
            }
            .into());
        }
        validate_quantity(listing.quantity)?;
        validate_expiry(listing.expiry_date, today)?;

        let provider = self
            .get_provider(listing.provider_id)?
            .ok_or(FoodShareError::UnknownProvider {
                id: listing.provider_id.as_i64(),
            })?;

        self.conn.execute(
            "INSERT INTO food_listings
             (Food_Name, Quantity, Expiry_Date, Provider_ID, Location, Food_Type, Meal_Type, Provider_Type)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                food_name,
                listing.quantity,
                listing.expiry_date.format(DATE_FORMAT).to_string(),
                provider.provider_id.as_i64(),
                provider.city,
                listing.food_type.as_str(),
                listing.meal_type.as_str(),
                provider.provider_type
            ],
        )?;
        let food_id = FoodId::new(self.conn.last_insert_rowid());

        info!(%food_id, provider_id = %provider.provider_id, "added food listing");

        Ok(FoodListing {
            food_id,
            food_name: food_name.to_string(),
            quantity: listing.quantity,
            expiry_date: listing.expiry_date,
            provider_id: provider.provider_id,
            provider_type: provider.provider_type,
            location: provider.city,
            food_type: listing.food_type.as_str().to_string(),
            meal_type: listing.meal_type.as_str().to_string(),
        })
    }

    /// Update quantity and expiry, validating against the local date.
    pub fn update_listing(&mut self, update: &ListingUpdate) -> Result<FoodListing> {
        self.update_listing_as_of(update, today())
    }

    /// Overwrite quantity and expiry of one listing as if submitted on
    /// `today`. Every other column is left untouched.
    pub fn update_listing_as_of(
        &mut self,
        update: &ListingUpdate,
        today: NaiveDate,
    ) -> Result<FoodListing> {
        validate_quantity(update.quantity)?;

        let current = self
            .get_listing(update.food_id)?
            .ok_or(FoodShareError::UnknownListing {
                id: update.food_id.as_i64(),
            })?;

        let expiry_date = update
            .expiry_date
            .unwrap_or_else(|| default_update_expiry(&current, today));
        validate_expiry(expiry_date, today)?;

        self.conn.execute(
            "UPDATE food_listings SET Quantity = ?, Expiry_Date = ? WHERE Food_ID = ?",
            params![
                update.quantity,
                expiry_date.format(DATE_FORMAT).to_string(),
                update.food_id.as_i64()
            ],
        )?;

        info!(food_id = %update.food_id, quantity = update.quantity, "updated food listing");

        Ok(FoodListing {
            quantity: update.quantity,
            expiry_date,
            ..current
        })
    }

    /// Delete a listing and every claim against it.
    ///
    /// Both deletes run in one transaction: either both apply or, on any
    /// failure (including an unknown id), neither does. Returns the number
    /// of claims removed.
    pub fn remove_listing(&mut self, food_id: FoodId) -> Result<usize> {
        let tx = self.conn.transaction()?;

        let claims_removed = tx.execute(
            "DELETE FROM claims WHERE Food_ID = ?",
            params![food_id.as_i64()],
        )?;
        let listings_removed = tx.execute(
            "DELETE FROM food_listings WHERE Food_ID = ?",
            params![food_id.as_i64()],
        )?;

        if listings_removed == 0 {
            // dropping tx rolls back the claim delete
            return Err(FoodShareError::UnknownListing {
                id: food_id.as_i64(),
            }
            .into());
        }

        tx.commit()?;
        info!(%food_id, claims_removed, "removed food listing");
        Ok(claims_removed)
    }

    /// Record a receiver's claim against a listing with status `Pending`.
    pub fn claim(&mut self, food_id: FoodId, receiver_id: ReceiverId) -> Result<Claim> {
        if self.get_listing(food_id)?.is_none() {
            return Err(FoodShareError::UnknownListing {
                id: food_id.as_i64(),
            }
            .into());
        }
        if self.get_receiver(receiver_id)?.is_none() {
            return Err(FoodShareError::UnknownReceiver {
                id: receiver_id.as_i64(),
            }
            .into());
        }

        let status = ClaimStatus::Pending;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        self.conn.execute(
            "INSERT INTO claims (Food_ID, Receiver_ID, Status, Timestamp) VALUES (?, ?, ?, ?)",
            params![
                food_id.as_i64(),
                receiver_id.as_i64(),
                status.as_str(),
                timestamp
            ],
        )?;
        let claim_id = ClaimId::new(self.conn.last_insert_rowid());

        info!(%claim_id, %food_id, %receiver_id, "recorded claim");

        Ok(Claim {
            claim_id,
            food_id,
            receiver_id,
            status,
            timestamp,
        })
    }

    /// Fetch one listing by id
    pub fn get_listing(&self, food_id: FoodId) -> Result<Option<FoodListing>> {
        let listing = self
            .conn
            .query_row(
                &format!("SELECT {LISTING_COLUMNS} FROM food_listings WHERE Food_ID = ?"),
                params![food_id.as_i64()],
                row_to_listing,
            )
            .optional()?;
        Ok(listing)
    }

    /// Every listing, ordered by id
    pub fn get_all_listings(&self) -> Result<Vec<FoodListing>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LISTING_COLUMNS} FROM food_listings ORDER BY Food_ID"
        ))?;
        let rows = stmt.query_map([], row_to_listing)?;

        let mut listings = Vec::new();
        for row in rows {
            listings.push(row?);
        }
        Ok(listings)
    }

    /// Id and name of every listing, for the update/remove pickers
    pub fn list_listings(&self) -> Result<Vec<ListingSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Food_ID, Food_Name FROM food_listings ORDER BY Food_ID")?;
        let rows = stmt.query_map([], |row| {
            Ok(ListingSummary {
                food_id: FoodId::new(row.get(0)?),
                food_name: row.get(1)?,
            })
        })?;

        let mut listings = Vec::new();
        for row in rows {
            listings.push(row?);
        }
        Ok(listings)
    }

    /// Id and name of every provider, for the add-listing picker
    pub fn list_providers(&self) -> Result<Vec<ProviderSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Provider_ID, Name FROM providers ORDER BY Provider_ID")?;
        let rows = stmt.query_map([], |row| {
            Ok(ProviderSummary {
                provider_id: ProviderId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;

        let mut providers = Vec::new();
        for row in rows {
            providers.push(row?);
        }
        Ok(providers)
    }

    pub fn get_provider(&self, provider_id: ProviderId) -> Result<Option<Provider>> {
        let provider = self
            .conn
            .query_row(
                "SELECT Provider_ID, Name, Type, Address, City, Contact
                 FROM providers WHERE Provider_ID = ?",
                params![provider_id.as_i64()],
                |row| {
                    Ok(Provider {
                        provider_id: ProviderId::new(row.get(0)?),
                        name: row.get(1)?,
                        provider_type: row.get(2)?,
                        address: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        city: row.get(4)?,
                        contact: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(provider)
    }

    pub fn get_receiver(&self, receiver_id: ReceiverId) -> Result<Option<Receiver>> {
        let receiver = self
            .conn
            .query_row(
                "SELECT Receiver_ID, Name, Type, City, Contact
                 FROM receivers WHERE Receiver_ID = ?",
                params![receiver_id.as_i64()],
                |row| {
                    Ok(Receiver {
                        receiver_id: ReceiverId::new(row.get(0)?),
                        name: row.get(1)?,
                        receiver_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        city: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        contact: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(receiver)
    }

    /// Every claim against one listing, oldest id first
    pub fn get_claims_for_listing(&self, food_id: FoodId) -> Result<Vec<Claim>> {
        let mut stmt = self.conn.prepare(
            "SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp
             FROM claims WHERE Food_ID = ? ORDER BY Claim_ID",
        )?;
        let rows = stmt.query_map(params![food_id.as_i64()], |row| {
            let status: String = row.get(3)?;
            let status = status.parse::<ClaimStatus>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Claim {
                claim_id: ClaimId::new(row.get(0)?),
                food_id: FoodId::new(row.get(1)?),
                receiver_id: ReceiverId::new(row.get(2)?),
                status,
                timestamp: row.get(4)?,
            })
        })?;

        let mut claims = Vec::new();
        for row in rows {
            claims.push(row?);
        }
        Ok(claims)
    }
}

/// Helper to convert a `LISTING_COLUMNS` row to a FoodListing
fn row_to_listing(row: &Row) -> rusqlite::Result<FoodListing> {
    let expiry: String = row.get(3)?;
    let expiry_date = parse_expiry_date(&expiry).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(FoodListing {
        food_id: FoodId::new(row.get(0)?),
        food_name: row.get(1)?,
        quantity: row.get(2)?,
        expiry_date,
        provider_id: ProviderId::new(row.get(4)?),
        provider_type: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        location: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        food_type: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        meal_type: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}
