//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod food_share_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = FoodShareError::from(json_error);

        match error {
            FoodShareError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FoodShareError::from(io_error);

        match error {
            FoodShareError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<i64>().unwrap_err();
        let error = FoodShareError::from(parse_error);

        match error {
            FoodShareError::InvalidId(_) => (),
            _ => panic!("Expected InvalidId error variant"),
        }
    }

    #[test]
    fn test_date_error_conversion() {
        let parse_error = chrono::NaiveDate::parse_from_str("2025-13-40", "%Y-%m-%d").unwrap_err();
        let error = FoodShareError::from(parse_error);

        match error {
            FoodShareError::InvalidDate(_) => (),
            _ => panic!("Expected InvalidDate error variant"),
        }
    }

    #[test]
    fn test_missing_input_error() {
        let error = FoodShareError::MissingInput {
            source_name: "providers".to_string(),
            path: "data/providers_data.csv".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("providers"));
        assert!(error_string.contains("data/providers_data.csv"));
    }

    #[test]
    fn test_unknown_provider_error() {
        let error = FoodShareError::UnknownProvider { id: 404 };
        assert_eq!(error.to_string(), "Provider not found: 404");
        assert!(error.is_unknown_reference());
    }

    #[test]
    fn test_unknown_listing_error() {
        let error = FoodShareError::UnknownListing { id: 7 };
        assert_eq!(error.to_string(), "Food listing not found: 7");
        assert!(error.is_unknown_reference());
    }

    #[test]
    fn test_model_unavailable_is_not_unknown_reference() {
        let error = FoodShareError::ModelUnavailable {
            path: "model.json".to_string(),
        };
        assert!(error.to_string().contains("model.json"));
        assert!(!error.is_unknown_reference());
    }

    #[test]
    fn test_invalid_category_error() {
        let error = FoodShareError::InvalidCategory {
            kind: "food type".to_string(),
            value: "Pescatarian".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid food type: Pescatarian");
    }

    #[test]
    fn test_database_error_conversion() {
        let db_error = rusqlite::Error::InvalidColumnType(
            0,
            "test_column".to_string(),
            rusqlite::types::Type::Null,
        );
        let error = FoodShareError::from(db_error);

        match error {
            FoodShareError::Database(_) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_anyhow_preserves_domain_error() {
        let anyhow_error: anyhow::Error = FoodShareError::UnknownListing { id: 12 }.into();
        let error = FoodShareError::from(anyhow_error);

        match error {
            FoodShareError::UnknownListing { id } => assert_eq!(id, 12),
            _ => panic!("Expected UnknownListing error variant"),
        }
    }

    #[test]
    fn test_anyhow_recovers_database_error() {
        let anyhow_error: anyhow::Error = rusqlite::Error::QueryReturnedNoRows.into();
        let error = FoodShareError::from(anyhow_error);

        match error {
            FoodShareError::Database(rusqlite::Error::QueryReturnedNoRows) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_anyhow_other_error_becomes_store_error() {
        let anyhow_error = anyhow::anyhow!("Test anyhow error message");
        let error = FoodShareError::from(anyhow_error);

        match error {
            FoodShareError::Store { message } => {
                assert!(message.contains("Test anyhow error message"));
            }
            _ => panic!("Expected Store error variant"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FoodShareError::from(io_error);

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(FoodShareError::UnknownProvider { id: 1 })
        }

        match test_function().unwrap_err() {
            FoodShareError::UnknownProvider { id } => assert_eq!(id, 1),
            _ => panic!("Expected UnknownProvider error"),
        }
    }
}
