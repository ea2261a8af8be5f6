//! Integration tests for the storage layer, seeded from CSV sources on disk

use chrono::Duration;
use food_share::{
    storage::{seed, *},
    FoodId, FoodShareError, FoodType, MealType, ProviderId,
};
use rusqlite::types::Value;
use std::path::Path;
use tempfile::TempDir;

const PROVIDERS_CSV: &str = "\
Provider_ID,Name,Type,Address,City,Contact
1,Gupta Kitchens,Restaurant,12 MG Road,X,+91-900-000-0001
2,FreshMart,Supermarket,4 Park Street,X,+91-900-000-0002
";

const RECEIVERS_CSV: &str = "Receiver_ID,Name,Type,City,Contact\n";

const FOOD_LISTINGS_CSV: &str = "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
1,Bread,20,1/5/2020,1,Restaurant,X,Vegetarian,Breakfast
2,Salad,8,2020-01-09,2,Supermarket,X,Vegan,Lunch
3,Salad,8,2020-01-09,2,Supermarket,X,Vegan,Lunch
";

const CLAIMS_CSV: &str = "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,1,4,Completed,2020-01-03 10:00:00
2,2,4,Cancelled,2020-01-04 11:00:00
3,2,5,Pending,2020-01-04 12:00:00
";

fn write_seed(dir: &Path) {
    std::fs::write(dir.join(seed::PROVIDERS_FILE), PROVIDERS_CSV).unwrap();
    std::fs::write(dir.join(seed::RECEIVERS_FILE), RECEIVERS_CSV).unwrap();
    std::fs::write(dir.join(seed::FOOD_LISTINGS_FILE), FOOD_LISTINGS_CSV).unwrap();
    std::fs::write(dir.join(seed::CLAIMS_FILE), CLAIMS_CSV).unwrap();
}

fn seeded_db() -> (TempDir, FoodDatabase) {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());
    let mut db = FoodDatabase::new_in_memory().unwrap();
    db.load_seed(&SeedSources::from_dir(dir.path())).unwrap();
    (dir, db)
}

#[test]
fn test_seed_counts_match_sources_without_dedup() {
    let (_dir, db) = seeded_db();

    let counts = db.table_counts().unwrap();
    assert_eq!(counts.providers, 2);
    assert_eq!(counts.receivers, 0);
    // The duplicate Salad row is kept.
    assert_eq!(counts.food_listings, 3);
    assert_eq!(counts.claims, 3);
    assert_eq!(Some(counts), db.seed_report());
}

#[test]
fn test_seed_normalises_expiry_dates() {
    let (_dir, db) = seeded_db();
    let table = db
        .query(
            "SELECT Expiry_Date FROM food_listings WHERE Food_ID = ?",
            [FoodId::new(1).as_i64()],
        )
        .unwrap();
    assert_eq!(
        table.value(0, "Expiry_Date"),
        Some(&Value::Text("2020-01-05".to_string()))
    );
}

#[test]
fn test_reseeding_fresh_store_gives_same_state() {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());
    let sources = SeedSources::from_dir(dir.path());

    let data = sources.read().unwrap();
    let mut db = FoodDatabase::new_in_memory().unwrap();
    let once = db.replace_all(&data).unwrap();
    let twice = db.replace_all(&data).unwrap();
    assert_eq!(once, twice);
    assert_eq!(db.table_counts().unwrap(), once);
}

#[test]
fn test_malformed_seed_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());
    std::fs::write(
        dir.path().join(seed::PROVIDERS_FILE),
        "Provider_ID,Name,Type,Address,City,Contact\nabc,Broken,Restaurant,,X,\n",
    )
    .unwrap();

    let mut db = FoodDatabase::new_in_memory().unwrap();
    assert!(db.load_seed(&SeedSources::from_dir(dir.path())).is_err());
    assert!(db.seed_report().is_none());
}

#[test]
fn test_city_counts_without_receivers() {
    let (_dir, db) = seeded_db();

    let counts = db.city_counts().unwrap();
    assert_eq!(
        counts,
        vec![CityCounts {
            city: "X".to_string(),
            number_of_providers: 2,
            number_of_receivers: 0,
        }]
    );
}

#[test]
fn test_total_quantity_cross_check() {
    let (_dir, db) = seeded_db();

    let all = db.query("SELECT Quantity FROM food_listings", []).unwrap();
    let sum: i64 = all
        .column("Quantity")
        .into_iter()
        .map(|v| match v {
            Value::Integer(n) => *n,
            other => panic!("unexpected quantity {:?}", other),
        })
        .sum();

    let report = db
        .run_report(ReportKind::TotalQuantity, today())
        .unwrap();
    assert_eq!(
        report.value(0, "TotalAvailableQuantity"),
        Some(&Value::Integer(sum))
    );
    assert_eq!(db.total_quantity().unwrap(), sum);
}

#[test]
fn test_status_percentages_sum_to_hundred() {
    let (_dir, db) = seeded_db();

    let shares = db.claim_status_breakdown().unwrap();
    let total: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);
    assert_eq!(shares.iter().map(|s| s.claim_count).sum::<i64>(), 3);
}

#[test]
fn test_expiring_listing_lifecycle() {
    let (_dir, mut db) = seeded_db();
    let today = today();

    let added = db
        .add_listing(&NewListing {
            provider_id: ProviderId::new(1),
            food_name: "Dal".to_string(),
            quantity: 10,
            expiry_date: today + Duration::days(1),
            food_type: FoodType::Vegetarian,
            meal_type: MealType::Dinner,
        })
        .unwrap();
    assert_eq!(added.location, "X");
    assert_eq!(added.provider_type, "Restaurant");

    let expiring = db.run_report(ReportKind::ExpiringSoon, today).unwrap();
    let names = expiring.column("Food_Name");
    assert_eq!(names, vec![&Value::Text("Dal".to_string())]);

    db.remove_listing(added.food_id).unwrap();
    let expiring = db.run_report(ReportKind::ExpiringSoon, today).unwrap();
    assert!(expiring.is_empty());
    assert!(db.get_listing(added.food_id).unwrap().is_none());
}

#[test]
fn test_remove_listing_leaves_no_claims() {
    let (_dir, mut db) = seeded_db();

    let removed = db.remove_listing(FoodId::new(2)).unwrap();
    assert_eq!(removed, 2);

    let claims = db
        .query("SELECT * FROM claims WHERE Food_ID = ?", [2])
        .unwrap();
    assert!(claims.is_empty());
    assert!(claims.column_index("Claim_ID").is_some());
}

#[test]
fn test_unknown_ids_leave_store_unchanged() {
    let (_dir, mut db) = seeded_db();
    let before = db.table_counts().unwrap();

    let err = db
        .update_listing(&ListingUpdate {
            food_id: FoodId::new(999),
            quantity: 3,
            expiry_date: None,
        })
        .unwrap_err();
    let err = FoodShareError::from(err);
    assert!(err.is_unknown_reference());
    assert_eq!(err.to_string(), "Food listing not found: 999");

    assert!(db.remove_listing(FoodId::new(999)).is_err());
    assert_eq!(db.table_counts().unwrap(), before);
}

#[test]
fn test_filter_every_row_satisfies_selection() {
    let (_dir, db) = seeded_db();
    let options = db.filter_options().unwrap();
    let mut selection = FilterSelection::all(&options);
    selection.meal_types = vec!["Lunch".to_string()];
    selection.provider_types = vec!["Supermarket".to_string(), "Bakery".to_string()];

    let rows = db
        .filter_listings(&ListingFilter::from_selection(&selection))
        .unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(selection.locations.contains(&row.location));
        assert!(selection.provider_types.contains(&row.provider_type));
        assert!(selection.food_types.contains(&row.food_type));
        assert!(selection.meal_types.contains(&row.meal_type));
    }
    assert_eq!(provider_contacts(&rows).len(), 1);
}
