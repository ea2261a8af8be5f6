//! Seed loader: rebuilds the four tables from flat CSV sources.

use super::models::{Claim, FoodListing, Provider, Receiver, DATE_FORMAT};
use super::schema::{create_tables, drop_tables, FoodDatabase};
use crate::error::FoodShareError;
use anyhow::{Context, Result};
use rusqlite::params;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PROVIDERS_FILE: &str = "providers_data.csv";
pub const RECEIVERS_FILE: &str = "receivers_data.csv";
pub const FOOD_LISTINGS_FILE: &str = "food_listings_data.csv";
pub const CLAIMS_FILE: &str = "claims_data.csv";

/// Locations of the four seed sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSources {
    pub providers: PathBuf,
    pub receivers: PathBuf,
    pub food_listings: PathBuf,
    pub claims: PathBuf,
}

impl SeedSources {
    /// Standard file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            providers: dir.join(PROVIDERS_FILE),
            receivers: dir.join(RECEIVERS_FILE),
            food_listings: dir.join(FOOD_LISTINGS_FILE),
            claims: dir.join(CLAIMS_FILE),
        }
    }

    fn entries(&self) -> [(&'static str, &Path); 4] {
        [
            ("providers", &self.providers),
            ("receivers", &self.receivers),
            ("food_listings", &self.food_listings),
            ("claims", &self.claims),
        ]
    }

    /// Fail with `MissingInput` for the first source that does not exist.
    pub fn verify(&self) -> crate::Result<()> {
        for (name, path) in self.entries() {
            if !path.is_file() {
                return Err(FoodShareError::MissingInput {
                    source_name: name.to_string(),
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse all four sources into memory.
    pub fn read(&self) -> Result<SeedData> {
        self.verify()?;
        Ok(SeedData {
            providers: read_records(&self.providers)?,
            receivers: read_records(&self.receivers)?,
            food_listings: read_records(&self.food_listings)?,
            claims: read_records(&self.claims)?,
        })
    }
}

/// Parsed contents of the four seed sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub providers: Vec<Provider>,
    pub receivers: Vec<Receiver>,
    pub food_listings: Vec<FoodListing>,
    pub claims: Vec<Claim>,
}

/// Row counts written by a seed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub providers: usize,
    pub receivers: usize,
    pub food_listings: usize,
    pub claims: usize,
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open seed source {}", path.display()))?;

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .with_context(|| format!("Failed to parse seed source {}", path.display()))?;

    debug!(path = %path.display(), rows = records.len(), "read seed source");
    Ok(records)
}

impl FoodDatabase {
    /// Load the seed sources once per session.
    ///
    /// The first call replaces the store contents; later calls return the
    /// report of that first load without touching the store.
    pub fn load_seed(&mut self, sources: &SeedSources) -> Result<SeedReport> {
        if let Some(report) = self.seed_report {
            debug!("seed already loaded for this session");
            return Ok(report);
        }
        let data = sources.read()?;
        self.replace_all(&data)
    }

    /// Drop every table and repopulate it from `data` in one transaction.
    ///
    /// Rows are copied one-to-one: no filtering, no dedup.
    /// `Expiry_Date` is the only rewritten column: it is stored as ISO
    /// `YYYY-MM-DD` whatever form the source used.
    pub fn replace_all(&mut self, data: &SeedData) -> Result<SeedReport> {
        let tx = self.conn.transaction()?;
        drop_tables(&tx)?;
        create_tables(&tx)?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO providers (Provider_ID, Name, Type, Address, City, Contact)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for p in &data.providers {
                stmt.execute(params![
                    p.provider_id.as_i64(),
                    p.name,
                    p.provider_type,
                    p.address,
                    p.city,
                    p.contact
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO receivers (Receiver_ID, Name, Type, City, Contact)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for r in &data.receivers {
                stmt.execute(params![
                    r.receiver_id.as_i64(),
                    r.name,
                    r.receiver_type,
                    r.city,
                    r.contact
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO food_listings
                 (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID,
                  Provider_Type, Location, Food_Type, Meal_Type)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for l in &data.food_listings {
                stmt.execute(params![
                    l.food_id.as_i64(),
                    l.food_name,
                    l.quantity,
                    l.expiry_date.format(DATE_FORMAT).to_string(),
                    l.provider_id.as_i64(),
                    l.provider_type,
                    l.location,
                    l.food_type,
                    l.meal_type
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for c in &data.claims {
                stmt.execute(params![
                    c.claim_id.as_i64(),
                    c.food_id.as_i64(),
                    c.receiver_id.as_i64(),
                    c.status.as_str(),
                    c.timestamp
                ])?;
            }
        }

        tx.commit()?;

        let report = SeedReport {
            providers: data.providers.len(),
            receivers: data.receivers.len(),
            food_listings: data.food_listings.len(),
            claims: data.claims.len(),
        };
        info!(
            providers = report.providers,
            receivers = report.receivers,
            food_listings = report.food_listings,
            claims = report.claims,
            "store populated from seed sources"
        );
        self.seed_report = Some(report);
        Ok(report)
    }

    /// Report of the seed load for this session, if one happened.
    pub fn seed_report(&self) -> Option<SeedReport> {
        self.seed_report
    }

    /// Current row count of each table.
    pub fn table_counts(&self) -> Result<SeedReport> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(SeedReport {
            providers: count("providers")?,
            receivers: count("receivers")?,
            food_listings: count("food_listings")?,
            claims: count("claims")?,
        })
    }
}
