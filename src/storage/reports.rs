//! Reporting catalog and dashboard queries
//!
//! The fifteen analytics queries are fixed: their grouping keys, aggregates,
//! ordering and limits do not change at runtime. Only the expiry window
//! takes parameters, and those are bound, not formatted in.

use super::gateway::Table;
use super::models::*;
use super::schema::FoodDatabase;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days ahead (inclusive) that count as "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 3;

/// Claims shown in the dashboard activity feed.
pub const RECENT_CLAIMS_LIMIT: u32 = 10;

/// One entry of the analytics catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    ProvidersAndReceiversByCity,
    QuantityByProviderType,
    BangaloreProviderContacts,
    TopReceiversByClaims,
    TotalQuantity,
    ListingsByCity,
    ListingsByFoodType,
    ClaimsPerFoodItem,
    CompletedClaimsByProvider,
    ClaimStatusBreakdown,
    AverageQuantityPerReceiver,
    ClaimsByMealType,
    QuantityByProvider,
    ExpiringSoon,
    UnclaimedListings,
}

impl ReportKind {
    pub const ALL: [ReportKind; 15] = [
        ReportKind::ProvidersAndReceiversByCity,
        ReportKind::QuantityByProviderType,
        ReportKind::BangaloreProviderContacts,
        ReportKind::TopReceiversByClaims,
        ReportKind::TotalQuantity,
        ReportKind::ListingsByCity,
        ReportKind::ListingsByFoodType,
        ReportKind::ClaimsPerFoodItem,
        ReportKind::CompletedClaimsByProvider,
        ReportKind::ClaimStatusBreakdown,
        ReportKind::AverageQuantityPerReceiver,
        ReportKind::ClaimsByMealType,
        ReportKind::QuantityByProvider,
        ReportKind::ExpiringSoon,
        ReportKind::UnclaimedListings,
    ];

    /// Catalog number, 1 through 15.
    pub fn number(&self) -> u8 {
        match self {
            ReportKind::ProvidersAndReceiversByCity => 1,
            ReportKind::QuantityByProviderType => 2,
            ReportKind::BangaloreProviderContacts => 3,
            ReportKind::TopReceiversByClaims => 4,
            ReportKind::TotalQuantity => 5,
            ReportKind::ListingsByCity => 6,
            ReportKind::ListingsByFoodType => 7,
            ReportKind::ClaimsPerFoodItem => 8,
            ReportKind::CompletedClaimsByProvider => 9,
            ReportKind::ClaimStatusBreakdown => 10,
            ReportKind::AverageQuantityPerReceiver => 11,
            ReportKind::ClaimsByMealType => 12,
            ReportKind::QuantityByProvider => 13,
            ReportKind::ExpiringSoon => 14,
            ReportKind::UnclaimedListings => 15,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.number() == number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::ProvidersAndReceiversByCity => {
                "Number of Food Providers and Receivers by City"
            }
            ReportKind::QuantityByProviderType => {
                "Top Contributing Provider Types by Food Quantity"
            }
            ReportKind::BangaloreProviderContacts => "Contact Information for Providers in Bangalore",
            ReportKind::TopReceiversByClaims => "Top Receivers by Number of Claims",
            ReportKind::TotalQuantity => "Total Quantity of Food Available",
            ReportKind::ListingsByCity => "Number of Food Listings by City",
            ReportKind::ListingsByFoodType => "Most Common Food Types Available",
            ReportKind::ClaimsPerFoodItem => "Number of Claims per Food Item",
            ReportKind::CompletedClaimsByProvider => "Providers with Most Successful Claims",
            ReportKind::ClaimStatusBreakdown => "Percentage of Claims by Status",
            ReportKind::AverageQuantityPerReceiver => {
                "Average Quantity of Food per Claim for Each Receiver"
            }
            ReportKind::ClaimsByMealType => "Most Claimed Meal Types",
            ReportKind::QuantityByProvider => "Total Food Quantity Donated by Each Provider",
            ReportKind::ExpiringSoon => "Food Items Expiring in the Next 3 Days",
            ReportKind::UnclaimedListings => "Providers with Unclaimed Food Listings",
        }
    }

    /// Statement text. Only `ExpiringSoon` has placeholders: window start and end.
    pub fn sql(&self) -> &'static str {
        match self {
            ReportKind::ProvidersAndReceiversByCity => {
                "SELECT p.City, COUNT(DISTINCT p.Provider_ID) AS NumberOfProviders,
                        COUNT(DISTINCT r.Receiver_ID) AS NumberOfReceivers
                 FROM providers p
                 LEFT JOIN receivers r ON p.City = r.City
                 GROUP BY p.City"
            }
            ReportKind::QuantityByProviderType => {
                "SELECT p.Type, SUM(fl.Quantity) AS TotalQuantityDonated
                 FROM food_listings fl
                 JOIN providers p ON fl.Provider_ID = p.Provider_ID
                 GROUP BY p.Type
                 ORDER BY TotalQuantityDonated DESC"
            }
            ReportKind::BangaloreProviderContacts => {
                "SELECT Name, Type, Address, Contact FROM providers WHERE City = 'Bangalore'"
            }
            ReportKind::TopReceiversByClaims => {
                "SELECT r.Name, r.Type, r.City, COUNT(c.Claim_ID) AS NumberOfClaims
                 FROM claims c
                 JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
                 GROUP BY r.Receiver_ID
                 ORDER BY NumberOfClaims DESC
                 LIMIT 10"
            }
            ReportKind::TotalQuantity => {
                "SELECT SUM(Quantity) AS TotalAvailableQuantity FROM food_listings"
            }
            ReportKind::ListingsByCity => {
                "SELECT Location, COUNT(Food_ID) AS NumberOfListings
                 FROM food_listings
                 GROUP BY Location
                 ORDER BY NumberOfListings DESC"
            }
            ReportKind::ListingsByFoodType => {
                "SELECT Food_Type, COUNT(Food_ID) AS ListingCount
                 FROM food_listings
                 GROUP BY Food_Type
                 ORDER BY ListingCount DESC"
            }
            ReportKind::ClaimsPerFoodItem => {
                "SELECT fl.Food_Name, COUNT(c.Claim_ID) AS NumberOfClaims
                 FROM claims c
                 JOIN food_listings fl ON c.Food_ID = fl.Food_ID
                 GROUP BY fl.Food_ID
                 ORDER BY NumberOfClaims DESC"
            }
            ReportKind::CompletedClaimsByProvider => {
                "SELECT p.Name, p.Type, COUNT(c.Claim_ID) AS SuccessfulClaims
                 FROM claims c
                 JOIN food_listings fl ON c.Food_ID = fl.Food_ID
                 JOIN providers p ON fl.Provider_ID = p.Provider_ID
                 WHERE c.Status = 'Completed'
                 GROUP BY p.Provider_ID
                 ORDER BY SuccessfulClaims DESC"
            }
            ReportKind::ClaimStatusBreakdown => {
                "SELECT Status, COUNT(*) AS ClaimCount,
                        (COUNT(*) * 100.0 / (SELECT COUNT(*) FROM claims)) AS Percentage
                 FROM claims
                 GROUP BY Status"
            }
            ReportKind::AverageQuantityPerReceiver => {
                "SELECT r.Name, AVG(fl.Quantity) AS AverageQuantityPerClaim
                 FROM claims c
                 JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
                 JOIN food_listings fl ON c.Food_ID = fl.Food_ID
                 WHERE c.Status = 'Completed'
                 GROUP BY r.Receiver_ID
                 ORDER BY AverageQuantityPerClaim DESC"
            }
            ReportKind::ClaimsByMealType => {
                "SELECT fl.Meal_Type, COUNT(c.Claim_ID) AS NumberOfClaims
                 FROM claims c
                 JOIN food_listings fl ON c.Food_ID = fl.Food_ID
                 GROUP BY fl.Meal_Type
                 ORDER BY NumberOfClaims DESC"
            }
            ReportKind::QuantityByProvider => {
                "SELECT p.Name, p.City, SUM(fl.Quantity) AS TotalQuantityDonated
                 FROM food_listings fl
                 JOIN providers p ON fl.Provider_ID = p.Provider_ID
                 GROUP BY p.Provider_ID
                 ORDER BY TotalQuantityDonated DESC"
            }
            ReportKind::ExpiringSoon => {
                "SELECT Food_Name, Quantity, Expiry_Date, Location
                 FROM food_listings
                 WHERE Expiry_Date BETWEEN ?1 AND ?2
                 ORDER BY Expiry_Date ASC"
            }
            ReportKind::UnclaimedListings => {
                "SELECT p.Name, p.Type, p.City, fl.Food_Name, fl.Quantity
                 FROM food_listings fl
                 JOIN providers p ON fl.Provider_ID = p.Provider_ID
                 LEFT JOIN claims c ON fl.Food_ID = c.Food_ID
                 WHERE c.Claim_ID IS NULL"
            }
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Inclusive `[today, today + EXPIRY_WINDOW_DAYS]` window as stored date strings.
pub fn expiry_window(today: NaiveDate) -> (String, String) {
    let end = today + Duration::days(EXPIRY_WINDOW_DAYS);
    (
        today.format(DATE_FORMAT).to_string(),
        end.format(DATE_FORMAT).to_string(),
    )
}

impl FoodDatabase {
    /// Run one catalog query. `today` anchors the expiry window.
    pub fn run_report(&self, kind: ReportKind, today: NaiveDate) -> Result<Table> {
        match kind {
            ReportKind::ExpiringSoon => {
                let (start, end) = expiry_window(today);
                self.query(kind.sql(), params![start, end])
            }
            _ => self.query(kind.sql(), []),
        }
    }

    /// Run the whole catalog in order.
    pub fn run_all_reports(&self, today: NaiveDate) -> Result<Vec<(ReportKind, Table)>> {
        ReportKind::ALL
            .iter()
            .map(|kind| -> Result<(ReportKind, Table)> {
                Ok((*kind, self.run_report(*kind, today)?))
            })
            .collect()
    }

    /// Report 1 as typed rows.
    pub fn city_counts(&self) -> Result<Vec<CityCounts>> {
        let mut stmt = self
            .conn
            .prepare(ReportKind::ProvidersAndReceiversByCity.sql())?;
        let rows = stmt.query_map([], |row| {
            Ok(CityCounts {
                city: row.get(0)?,
                number_of_providers: row.get(1)?,
                number_of_receivers: row.get(2)?,
            })
        })?;

        let mut counts = Vec::new();
        for row in rows {
            counts.push(row?);
        }
        Ok(counts)
    }

    /// Report 5: sum of `Quantity` over all listings (0 when there are none).
    pub fn total_quantity(&self) -> Result<i64> {
        let total: Option<i64> =
            self.conn
                .query_row(ReportKind::TotalQuantity.sql(), [], |row| row.get(0))?;
        Ok(total.unwrap_or(0))
    }

    /// Report 10 as typed rows.
    pub fn claim_status_breakdown(&self) -> Result<Vec<StatusShare>> {
        let mut stmt = self.conn.prepare(ReportKind::ClaimStatusBreakdown.sql())?;
        let rows = stmt.query_map([], |row| {
            Ok(StatusShare {
                status: row.get(0)?,
                claim_count: row.get(1)?,
                percentage: row.get(2)?,
            })
        })?;

        let mut shares = Vec::new();
        for row in rows {
            shares.push(row?);
        }
        Ok(shares)
    }

    /// Listings expiring within the window starting `today`, soonest first,
    /// with the provider type for the dashboard.
    pub fn expiring_soon(&self, today: NaiveDate) -> Result<Vec<ExpiringListing>> {
        let (start, end) = expiry_window(today);
        let mut stmt = self.conn.prepare(
            "SELECT Food_Name, Quantity, Expiry_Date, Location, Provider_Type
             FROM food_listings
             WHERE Expiry_Date BETWEEN ?1 AND ?2
             ORDER BY Expiry_Date ASC",
        )?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok(ExpiringListing {
                food_name: row.get(0)?,
                quantity: row.get(1)?,
                expiry_date: row.get(2)?,
                location: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                provider_type: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        let mut listings = Vec::new();
        for row in rows {
            listings.push(row?);
        }
        Ok(listings)
    }

    /// Most recent claims with food and receiver names, newest first.
    pub fn recent_claims(&self, limit: u32) -> Result<Vec<RecentClaim>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.Timestamp, fl.Food_Name, r.Name AS ReceiverName, c.Status
             FROM claims c
             JOIN food_listings fl ON c.Food_ID = fl.Food_ID
             JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
             ORDER BY c.Timestamp DESC
             LIMIT ?",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(RecentClaim {
                timestamp: row.get(0)?,
                food_name: row.get(1)?,
                receiver_name: row.get(2)?,
                status: row.get(3)?,
            })
        })?;

        let mut claims = Vec::new();
        for row in rows {
            claims.push(row?);
        }
        Ok(claims)
    }

    /// Distinct counts of providers, receivers, listings and claims.
    pub fn dashboard_metrics(&self) -> Result<DashboardMetrics> {
        let metrics = self.conn.query_row(
            "SELECT
                (SELECT COUNT(DISTINCT Provider_ID) FROM providers),
                (SELECT COUNT(DISTINCT Receiver_ID) FROM receivers),
                (SELECT COUNT(DISTINCT Food_ID) FROM food_listings),
                (SELECT COUNT(DISTINCT Claim_ID) FROM claims)",
            [],
            |row| {
                Ok(DashboardMetrics {
                    total_providers: row.get(0)?,
                    total_receivers: row.get(1)?,
                    total_food_listings: row.get(2)?,
                    total_claims: row.get(3)?,
                })
            },
        )?;
        Ok(metrics)
    }
}
