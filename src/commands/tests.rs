//! Integration tests for command handlers

use super::*;
use crate::cli::{types::FoodType, types::MealType, BrowseFilters, StoreArgs};
use crate::estimator::{DonationFeatures, MODEL_FILENAME};
use crate::storage::seed::{CLAIMS_FILE, FOOD_LISTINGS_FILE, PROVIDERS_FILE, RECEIVERS_FILE};
use crate::FoodShareError;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROVIDERS_CSV: &str = "\
Provider_ID,Name,Type,Address,City,Contact
1,Gupta Kitchens,Restaurant,12 MG Road,Bangalore,+91-900-000-0001
2,FreshMart,Supermarket,4 Park Street,Delhi,+91-900-000-0002
";

const RECEIVERS_CSV: &str = "\
Receiver_ID,Name,Type,City,Contact
1,Hope Shelter,Shelter,Bangalore,+91-800-000-0001
2,City NGO,NGO,Delhi,+91-800-000-0002
";

const FOOD_LISTINGS_CSV: &str = "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
1,Bread,20,3/11/2025,1,Restaurant,Bangalore,Vegetarian,Breakfast
2,Chicken Curry,15,2025-03-12,1,Restaurant,Bangalore,Non-Vegetarian,Dinner
3,Salad,8,3/20/2025,2,Supermarket,Delhi,Vegan,Lunch
";

const CLAIMS_CSV: &str = "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,1,1,Completed,2025-03-05 10:00:00
2,3,2,Pending,2025-03-06 11:00:00
";

const MODEL_JSON: &str = r#"{
    "intercept": 10.0,
    "coefficients": {
        "Provider_Type": { "Restaurant": 5.0 },
        "Location": { "Bangalore": 2.0 },
        "Food_Type": { "Vegetarian": 1.0 },
        "Meal_Type": { "Lunch": 0.4 }
    }
}"#;

fn today_fixed() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn write_seed(dir: &Path) {
    std::fs::write(dir.join(PROVIDERS_FILE), PROVIDERS_CSV).unwrap();
    std::fs::write(dir.join(RECEIVERS_FILE), RECEIVERS_CSV).unwrap();
    std::fs::write(dir.join(FOOD_LISTINGS_FILE), FOOD_LISTINGS_CSV).unwrap();
    std::fs::write(dir.join(CLAIMS_FILE), CLAIMS_CSV).unwrap();
}

fn in_memory_config(dir: &Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        store: StoreLocation::InMemory,
        model_path: dir.join(MODEL_FILENAME),
    }
}

fn seeded_context() -> (TempDir, CommandContext) {
    let dir = TempDir::new().unwrap();
    write_seed(dir.path());
    let ctx = CommandContext::new(&in_memory_config(dir.path())).unwrap();
    (dir, ctx)
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_from_explicit_args() {
        let args = StoreArgs {
            data_dir: Some(PathBuf::from("/srv/food")),
            db_path: Some(PathBuf::from("/tmp/food.db")),
            in_memory: false,
            model: None,
        };

        let config = AppConfig::from_args(&args).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/food"));
        assert_eq!(
            config.store,
            StoreLocation::File(PathBuf::from("/tmp/food.db"))
        );
        assert_eq!(
            config.model_path,
            PathBuf::from("/srv/food").join(MODEL_FILENAME)
        );
    }

    #[test]
    fn test_config_in_memory_and_model_override() {
        let args = StoreArgs {
            data_dir: None,
            db_path: None,
            in_memory: true,
            model: Some(PathBuf::from("model.json")),
        };

        let config = AppConfig::from_args(&args).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.store, StoreLocation::InMemory);
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(
            config.seed_sources().providers,
            PathBuf::from(".").join(PROVIDERS_FILE)
        );
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn test_context_seeds_store() {
        let (_dir, ctx) = seeded_context();

        assert_eq!(ctx.seed.providers, 2);
        assert_eq!(ctx.seed.receivers, 2);
        assert_eq!(ctx.seed.food_listings, 3);
        assert_eq!(ctx.seed.claims, 2);
        assert_eq!(ctx.db.table_counts().unwrap(), ctx.seed);
    }

    #[test]
    fn test_context_missing_seed_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_seed(dir.path());
        std::fs::remove_file(dir.path().join(CLAIMS_FILE)).unwrap();

        match CommandContext::new(&in_memory_config(dir.path())) {
            Err(FoodShareError::MissingInput { source_name, path }) => {
                assert_eq!(source_name, "claims");
                assert!(path.ends_with(CLAIMS_FILE));
            }
            Err(e) => panic!("Expected MissingInput, got {e}"),
            Ok(_) => panic!("Expected MissingInput, got a context"),
        }
    }

    #[test]
    fn test_context_without_model_disables_prediction() {
        let (_dir, mut ctx) = seeded_context();

        assert!(ctx.estimator.is_none());
        assert!(matches!(
            ctx.estimator_mut(),
            Err(FoodShareError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_context_with_malformed_model_disables_prediction() {
        let dir = TempDir::new().unwrap();
        write_seed(dir.path());
        std::fs::write(dir.path().join(MODEL_FILENAME), "not a model").unwrap();

        let mut ctx = CommandContext::new(&in_memory_config(dir.path())).unwrap();
        assert!(ctx.estimator.is_none());
        match ctx.estimator_mut() {
            Err(err @ FoodShareError::ModelUnavailable { .. }) => {
                let message = err.to_string();
                assert!(message.contains("could not be loaded"));
                assert!(message.contains(MODEL_FILENAME));
            }
            Err(e) => panic!("Expected ModelUnavailable, got {e}"),
            Ok(_) => panic!("Expected ModelUnavailable, got an estimator"),
        }
    }

    #[test]
    fn test_context_with_model_predicts() {
        let dir = TempDir::new().unwrap();
        write_seed(dir.path());
        std::fs::write(dir.path().join(MODEL_FILENAME), MODEL_JSON).unwrap();

        let mut ctx = CommandContext::new(&in_memory_config(dir.path())).unwrap();
        let features = DonationFeatures::new("Restaurant", "Bangalore", "Vegetarian", "Lunch");
        // 10 + 5 + 2 + 1 + 0.4 = 18.4
        assert_eq!(ctx.estimator_mut().unwrap().predict(&features), 18);
    }

    #[test]
    fn test_file_store_is_rebuilt_each_session() {
        let dir = TempDir::new().unwrap();
        write_seed(dir.path());
        let db_path = dir.path().join("store").join("food_wastage.db");
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            store: StoreLocation::File(db_path.clone()),
            model_path: dir.path().join(MODEL_FILENAME),
        };

        let mut first = CommandContext::new(&config).unwrap();
        first.db.claim(crate::FoodId::new(2), crate::ReceiverId::new(2)).unwrap();
        assert_eq!(first.db.table_counts().unwrap().claims, 3);
        first.close().unwrap();
        assert!(db_path.exists());

        let second = CommandContext::new(&config).unwrap();
        assert_eq!(second.db.table_counts().unwrap().claims, 2);
    }
}

#[cfg(test)]
mod handler_tests {
    use super::*;
    use crate::commands::browse::{browse, selection_from_filters};
    use crate::commands::dashboard::build_dashboard;
    use crate::commands::reports::run_reports;

    #[test]
    fn test_selection_defaults_to_every_option() {
        let (_dir, ctx) = seeded_context();
        let options = ctx.db.filter_options().unwrap();

        let selection = selection_from_filters(&BrowseFilters::default(), &options);
        assert_eq!(selection.locations, options.locations);
        assert_eq!(selection.meal_types, options.meal_types);
    }

    #[test]
    fn test_selection_maps_enum_filters_to_column_values() {
        let (_dir, ctx) = seeded_context();
        let options = ctx.db.filter_options().unwrap();
        let filters = BrowseFilters {
            food_types: Some(vec![FoodType::NonVegetarian]),
            meal_types: Some(vec![MealType::Dinner, MealType::Lunch]),
            ..Default::default()
        };

        let selection = selection_from_filters(&filters, &options);
        assert_eq!(selection.food_types, vec!["Non-Vegetarian"]);
        assert_eq!(selection.meal_types, vec!["Dinner", "Lunch"]);
        assert_eq!(selection.locations, options.locations);
    }

    #[test]
    fn test_browse_returns_listings_and_contacts() {
        let (_dir, ctx) = seeded_context();
        let filters = BrowseFilters {
            cities: Some(vec!["Bangalore".to_string()]),
            ..Default::default()
        };

        let result = browse(&ctx, &filters).unwrap();
        assert_eq!(result.listings.len(), 2);
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].provider_name, "Gupta Kitchens");
    }

    #[test]
    fn test_browse_with_no_cities_selected_is_empty() {
        let (_dir, ctx) = seeded_context();
        let filters = BrowseFilters {
            cities: Some(Vec::new()),
            ..Default::default()
        };

        let result = browse(&ctx, &filters).unwrap();
        assert!(result.listings.is_empty());
        assert!(result.contacts.is_empty());
    }

    #[test]
    fn test_run_single_report() {
        let (_dir, ctx) = seeded_context();
        let reports = run_reports(&ctx, Some(5), today_fixed()).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].number, 5);
        assert_eq!(
            reports[0].rows.value(0, "TotalAvailableQuantity"),
            Some(&rusqlite::types::Value::Integer(43))
        );
    }

    #[test]
    fn test_run_all_reports() {
        let (_dir, ctx) = seeded_context();
        let reports = run_reports(&ctx, None, today_fixed()).unwrap();
        assert_eq!(reports.len(), 15);
    }

    #[test]
    fn test_run_unknown_report_number() {
        let (_dir, ctx) = seeded_context();
        assert!(matches!(
            run_reports(&ctx, Some(16), today_fixed()),
            Err(FoodShareError::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_dashboard_uses_seeded_dates() {
        let (_dir, ctx) = seeded_context();
        let dashboard = build_dashboard(&ctx, today_fixed()).unwrap();

        assert_eq!(dashboard.metrics.total_food_listings, 3);
        let names: Vec<&str> = dashboard
            .expiring_soon
            .iter()
            .map(|l| l.food_name.as_str())
            .collect();
        assert_eq!(names, vec!["Bread", "Chicken Curry"]);
        assert_eq!(dashboard.recent_claims.len(), 2);
        assert_eq!(dashboard.recent_claims[0].food_name, "Salad");
    }
}
