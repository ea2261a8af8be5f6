//! Listing filter builder for the browse view.
//!
//! A filter is a list of typed `IN` clauses, one per dimension, joined with
//! `AND`. The builder renders one placeholder per allowed value and keeps
//! the values in a parameter list in the same order, so the final
//! statement never contains caller text.

use super::models::{FilterOptions, FilteredListing, ProviderContact};
use super::schema::FoodDatabase;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const BROWSE_SELECT: &str = "SELECT
        fl.Food_Name, fl.Quantity, fl.Expiry_Date, fl.Location, fl.Food_Type, fl.Meal_Type,
        p.Name AS ProviderName, p.Type AS ProviderType, p.Contact AS ProviderContact
     FROM food_listings fl
     JOIN providers p ON fl.Provider_ID = p.Provider_ID";

/// Column of `food_listings` a browse filter can restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingDimension {
    Location,
    ProviderType,
    FoodType,
    MealType,
}

impl ListingDimension {
    pub const ALL: [ListingDimension; 4] = [
        ListingDimension::Location,
        ListingDimension::ProviderType,
        ListingDimension::FoodType,
        ListingDimension::MealType,
    ];

    /// Qualified column name in the browse statement.
    pub fn column(&self) -> &'static str {
        match self {
            ListingDimension::Location => "fl.Location",
            ListingDimension::ProviderType => "fl.Provider_Type",
            ListingDimension::FoodType => "fl.Food_Type",
            ListingDimension::MealType => "fl.Meal_Type",
        }
    }
}

impl fmt::Display for ListingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListingDimension::Location => "Location",
            ListingDimension::ProviderType => "Provider_Type",
            ListingDimension::FoodType => "Food_Type",
            ListingDimension::MealType => "Meal_Type",
        };
        write!(f, "{}", s)
    }
}

/// One `column IN (...)` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InClause {
    pub dimension: ListingDimension,
    pub values: Vec<String>,
}

/// The four user selections of the browse view.
///
/// An empty selection excludes every row for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub locations: Vec<String>,
    pub provider_types: Vec<String>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

impl FilterSelection {
    /// Select every current value in each dimension.
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            locations: options.locations.clone(),
            provider_types: options.provider_types.clone(),
            food_types: options.food_types.clone(),
            meal_types: options.meal_types.clone(),
        }
    }
}

/// Rendered statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Builder accumulating `IN` clauses for the browse query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    clauses: Vec<InClause>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `dimension` to `values`. An empty list matches nothing.
    pub fn with<I, S>(mut self, dimension: ListingDimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses.push(InClause {
            dimension,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// One clause per dimension, in Location, Provider_Type, Food_Type,
    /// Meal_Type order.
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self::new()
            .with(ListingDimension::Location, selection.locations.iter().cloned())
            .with(ListingDimension::ProviderType, selection.provider_types.iter().cloned())
            .with(ListingDimension::FoodType, selection.food_types.iter().cloned())
            .with(ListingDimension::MealType, selection.meal_types.iter().cloned())
    }

    pub fn clauses(&self) -> &[InClause] {
        &self.clauses
    }

    /// Render the statement. Parameters follow clause order, then value order.
    pub fn build(&self) -> FilterQuery {
        let mut sql = String::from(BROWSE_SELECT);
        let mut params = Vec::new();

        for (i, clause) in self.clauses.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(clause.dimension.column());
            sql.push_str(" IN (");
            for (j, value) in clause.values.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                sql.push('?');
                params.push(value.clone());
            }
            sql.push(')');
        }

        FilterQuery { sql, params }
    }
}

/// Distinct provider contacts in first-seen order.
pub fn provider_contacts(rows: &[FilteredListing]) -> Vec<ProviderContact> {
    let mut seen = HashSet::new();
    let mut contacts = Vec::new();
    for row in rows {
        let contact = ProviderContact {
            provider_name: row.provider_name.clone(),
            provider_type: row.provider_type.clone(),
            provider_contact: row.provider_contact.clone(),
            location: row.location.clone(),
        };
        if seen.insert(contact.clone()) {
            contacts.push(contact);
        }
    }
    contacts
}

impl FoodDatabase {
    /// Listings joined with their provider that satisfy every clause of `filter`.
    ///
    /// Rows are returned as-is, without deduplication.
    pub fn filter_listings(&self, filter: &ListingFilter) -> Result<Vec<FilteredListing>> {
        let query = filter.build();
        let mut stmt = self.conn.prepare(&query.sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(query.params.iter()), |row| {
            Ok(FilteredListing {
                food_name: row.get(0)?,
                quantity: row.get(1)?,
                expiry_date: row.get(2)?,
                location: row.get(3)?,
                food_type: row.get(4)?,
                meal_type: row.get(5)?,
                provider_name: row.get(6)?,
                provider_type: row.get(7)?,
                provider_contact: row.get(8)?,
            })
        })?;

        let mut listings = Vec::new();
        for row in rows {
            listings.push(row?);
        }
        Ok(listings)
    }

    /// Distinct current values of each browse dimension.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        Ok(FilterOptions {
            locations: self.distinct_listing_values("Location")?,
            provider_types: self.distinct_listing_values("Provider_Type")?,
            food_types: self.distinct_listing_values("Food_Type")?,
            meal_types: self.distinct_listing_values("Meal_Type")?,
        })
    }

    fn distinct_listing_values(&self, column: &'static str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM food_listings WHERE {column} IS NOT NULL ORDER BY {column}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }
}
