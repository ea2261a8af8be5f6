//! Dashboard command implementation

use chrono::NaiveDate;
use serde::Serialize;

use super::common::CommandContext;
use crate::{
    storage::{reports::RECENT_CLAIMS_LIMIT, DashboardMetrics, ExpiringListing, RecentClaim},
    Result,
};

/// Everything the dashboard shows.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    pub expiring_soon: Vec<ExpiringListing>,
    pub recent_claims: Vec<RecentClaim>,
}

/// Collect dashboard data as of `today`.
pub fn build_dashboard(ctx: &CommandContext, today: NaiveDate) -> Result<Dashboard> {
    Ok(Dashboard {
        metrics: ctx.db.dashboard_metrics()?,
        expiring_soon: ctx.db.expiring_soon(today)?,
        recent_claims: ctx.db.recent_claims(RECENT_CLAIMS_LIMIT)?,
    })
}

/// Handle the dashboard command
pub fn handle_dashboard(ctx: &CommandContext, today: NaiveDate, as_json: bool) -> Result<()> {
    let dashboard = build_dashboard(ctx, today)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let m = &dashboard.metrics;
    println!("System Overview");
    println!(
        "{:<22} {:<18} {:<22} {}",
        "Total Food Providers", "Total Receivers", "Active Food Listings", "Total Claims Made"
    );
    println!(
        "{:<22} {:<18} {:<22} {}",
        m.total_providers, m.total_receivers, m.total_food_listings, m.total_claims
    );
    println!();

    println!("Food Expiring Soon");
    if dashboard.expiring_soon.is_empty() {
        println!("Nothing expires in the next few days.");
    } else {
        println!(
            "{:<24} {:<8} {:<12} {:<14} Provider Type",
            "Food", "Qty", "Expiry", "Location"
        );
        for item in &dashboard.expiring_soon {
            println!(
                "{:<24} {:<8} {:<12} {:<14} {}",
                item.food_name.chars().take(24).collect::<String>(),
                item.quantity,
                item.expiry_date,
                item.location,
                item.provider_type
            );
        }
    }
    println!();

    println!("Recent Claims Activity");
    if dashboard.recent_claims.is_empty() {
        println!("No claims yet.");
    } else {
        println!(
            "{:<20} {:<24} {:<24} Status",
            "Timestamp", "Food", "Receiver"
        );
        for claim in &dashboard.recent_claims {
            println!(
                "{:<20} {:<24} {:<24} {}",
                claim.timestamp,
                claim.food_name.chars().take(24).collect::<String>(),
                claim.receiver_name.chars().take(24).collect::<String>(),
                claim.status
            );
        }
    }

    Ok(())
}
