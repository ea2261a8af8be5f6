//! Listing management command implementation

use chrono::NaiveDate;

use super::common::CommandContext;
use crate::{
    cli::ListingCmd,
    storage::{FoodListing, ListingUpdate, NewListing, DATE_FORMAT},
    Result,
};

fn print_listing(listing: &FoodListing, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(listing)?);
    } else {
        println!(
            "#{} {} | qty {} | expires {} | {} ({}) | {} / {}",
            listing.food_id,
            listing.food_name,
            listing.quantity,
            listing.expiry_date.format(DATE_FORMAT),
            listing.location,
            listing.provider_type,
            listing.food_type,
            listing.meal_type
        );
    }
    Ok(())
}

/// Handle the listing subcommands as of `today`
pub fn handle_listing(ctx: &mut CommandContext, cmd: ListingCmd, today: NaiveDate) -> Result<()> {
    match cmd {
        ListingCmd::Add {
            provider_id,
            food_name,
            quantity,
            expiry,
            food_type,
            meal_type,
            json,
        } => {
            let listing = ctx.db.add_listing_as_of(
                &NewListing {
                    provider_id,
                    food_name,
                    quantity,
                    expiry_date: expiry,
                    food_type,
                    meal_type,
                },
                today,
            )?;
            if !json {
                println!("✓ Successfully added listing for '{}'", listing.food_name);
            }
            print_listing(&listing, json)
        }

        ListingCmd::Update {
            food_id,
            quantity,
            expiry,
            json,
        } => {
            let listing = ctx.db.update_listing_as_of(
                &ListingUpdate {
                    food_id,
                    quantity,
                    expiry_date: expiry,
                },
                today,
            )?;
            if !json {
                println!("✓ Successfully updated listing ID {}", food_id);
            }
            print_listing(&listing, json)
        }

        ListingCmd::Remove { food_id } => {
            let claims_removed = ctx.db.remove_listing(food_id)?;
            println!(
                "✓ Successfully removed listing ID {} and {} associated claims",
                food_id, claims_removed
            );
            Ok(())
        }

        ListingCmd::List { json } => {
            let listings = ctx.db.list_listings()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                for listing in &listings {
                    println!("{}", listing.label());
                }
            }
            Ok(())
        }
    }
}
