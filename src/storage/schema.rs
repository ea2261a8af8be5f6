//! Database schema and connection management

use super::seed::SeedReport;
use crate::error::FoodShareError;
use anyhow::Result;
use dirs::cache_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name of the store inside the cache directory.
pub const DATABASE_FILENAME: &str = "food_wastage.db";

/// Table statements, in creation order.
///
/// There are no foreign key constraints: removing a listing cascades to its
/// claims in application code.
const CREATE_TABLES: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS providers (
        Provider_ID INTEGER PRIMARY KEY,
        Name TEXT NOT NULL,
        Type TEXT NOT NULL,
        Address TEXT,
        City TEXT NOT NULL,
        Contact TEXT
    )",
    "CREATE TABLE IF NOT EXISTS receivers (
        Receiver_ID INTEGER PRIMARY KEY,
        Name TEXT NOT NULL,
        Type TEXT,
        City TEXT,
        Contact TEXT
    )",
    "CREATE TABLE IF NOT EXISTS food_listings (
        Food_ID INTEGER PRIMARY KEY,
        Food_Name TEXT NOT NULL,
        Quantity INTEGER NOT NULL,
        Expiry_Date TEXT NOT NULL,
        Provider_ID INTEGER NOT NULL,
        Provider_Type TEXT,
        Location TEXT,
        Food_Type TEXT,
        Meal_Type TEXT
    )",
    "CREATE TABLE IF NOT EXISTS claims (
        Claim_ID INTEGER PRIMARY KEY,
        Food_ID INTEGER NOT NULL,
        Receiver_ID INTEGER NOT NULL,
        Status TEXT NOT NULL,
        Timestamp TEXT NOT NULL
    )",
];

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_claims_food ON claims(Food_ID)",
    "CREATE INDEX IF NOT EXISTS idx_listings_expiry ON food_listings(Expiry_Date)",
    "CREATE INDEX IF NOT EXISTS idx_listings_provider ON food_listings(Provider_ID)",
];

pub(crate) const TABLE_NAMES: [&str; 4] = ["claims", "food_listings", "receivers", "providers"];

/// Handle to the relational store holding providers, receivers, listings
/// and claims for one session.
///
/// The handle owns the single connection. It is passed explicitly to
/// whatever needs the store and closes the connection when dropped or
/// when [`FoodDatabase::close`] is called.
pub struct FoodDatabase {
    pub(crate) conn: Connection,
    pub(crate) seed_report: Option<SeedReport>,
}

impl FoodDatabase {
    /// Open a fresh store at the default cache location.
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;
        Self::open(&db_path)
    }

    /// Open a fresh store at `db_path`, discarding any file left by a
    /// previous run.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if db_path.exists() {
            debug!(path = %db_path.display(), "removing previous store");
            std::fs::remove_file(db_path)?;
        }

        let conn = Connection::open(db_path)?;
        let mut db = Self {
            conn,
            seed_report: None,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create an in-memory store (useful for testing)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self {
            conn,
            seed_report: None,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn database_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| FoodShareError::Store {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("food-share").join(DATABASE_FILENAME))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        create_tables(&self.conn)
    }

    /// Close the connection, surfacing any error the drop would swallow.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}

/// Create every table and index that does not exist yet.
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    for statement in CREATE_TABLES.iter().chain(CREATE_INDEXES.iter()) {
        conn.execute(statement, [])?;
    }
    Ok(())
}

/// Drop all four tables.
pub(crate) fn drop_tables(conn: &Connection) -> Result<()> {
    for table in TABLE_NAMES {
        conn.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
    }
    Ok(())
}
