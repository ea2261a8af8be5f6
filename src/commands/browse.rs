//! Browse command implementation

use serde::Serialize;

use super::common::CommandContext;
use crate::{
    cli::BrowseFilters,
    storage::{
        provider_contacts, FilterOptions, FilterSelection, FilteredListing, ListingFilter,
        ProviderContact,
    },
    Result,
};

/// Browse results and the distinct provider contacts among them.
#[derive(Debug, Serialize)]
pub struct BrowseResult {
    pub listings: Vec<FilteredListing>,
    pub contacts: Vec<ProviderContact>,
}

/// Turn CLI filters into a selection. A dimension the user did not mention
/// selects every current value, like the multi-select defaults.
pub fn selection_from_filters(filters: &BrowseFilters, options: &FilterOptions) -> FilterSelection {
    FilterSelection {
        locations: filters
            .cities
            .clone()
            .unwrap_or_else(|| options.locations.clone()),
        provider_types: filters
            .provider_types
            .clone()
            .unwrap_or_else(|| options.provider_types.clone()),
        food_types: filters
            .food_types
            .as_ref()
            .map(|types| types.iter().map(|t| t.as_str().to_string()).collect())
            .unwrap_or_else(|| options.food_types.clone()),
        meal_types: filters
            .meal_types
            .as_ref()
            .map(|types| types.iter().map(|t| t.as_str().to_string()).collect())
            .unwrap_or_else(|| options.meal_types.clone()),
    }
}

/// Run the browse query for `filters`.
pub fn browse(ctx: &CommandContext, filters: &BrowseFilters) -> Result<BrowseResult> {
    let options = ctx.db.filter_options()?;
    let selection = selection_from_filters(filters, &options);
    let listings = ctx.db.filter_listings(&ListingFilter::from_selection(&selection))?;
    let contacts = provider_contacts(&listings);
    Ok(BrowseResult { listings, contacts })
}

/// Handle the browse command
pub fn handle_browse(ctx: &CommandContext, filters: &BrowseFilters, as_json: bool) -> Result<()> {
    let result = browse(ctx, filters)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{:<24} {:<6} {:<12} {:<12} {:<15} {:<10} {:<24} Provider Type",
        "Food", "Qty", "Expiry", "Location", "Food Type", "Meal", "Provider"
    );
    for l in &result.listings {
        println!(
            "{:<24} {:<6} {:<12} {:<12} {:<15} {:<10} {:<24} {}",
            l.food_name.chars().take(24).collect::<String>(),
            l.quantity,
            l.expiry_date,
            l.location,
            l.food_type,
            l.meal_type,
            l.provider_name.chars().take(24).collect::<String>(),
            l.provider_type
        );
    }
    println!();
    println!("Showing {} listings based on your filters.", result.listings.len());
    println!();

    println!("Provider Contact Information");
    if result.contacts.is_empty() {
        println!("No listings match the current filters.");
    } else {
        for c in &result.contacts {
            println!(
                "{:<28} {:<18} {:<24} {}",
                c.provider_name.chars().take(28).collect::<String>(),
                c.provider_type,
                c.provider_contact,
                c.location
            );
        }
    }

    Ok(())
}
