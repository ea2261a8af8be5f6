//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use clap::Parser;
use food_share::{
    cli::{Commands, FoodShare},
    commands::{
        browse::handle_browse, claims::handle_claim, dashboard::handle_dashboard,
        listings::handle_listing, predict::handle_predict, reports::handle_report, AppConfig,
        CommandContext,
    },
    storage::today,
    DonationFeatures, Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
fn main() -> Result<()> {
    let app = FoodShare::parse();

    let default_level = if app.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_args(&app.store)?;
    let mut ctx = CommandContext::new(&config)?;
    let today = today();

    match app.command {
        Commands::Dashboard { json } => handle_dashboard(&ctx, today, json)?,

        Commands::Browse { filters, json } => handle_browse(&ctx, &filters, json)?,

        Commands::Listing { cmd } => handle_listing(&mut ctx, cmd, today)?,

        Commands::Claim {
            food_id,
            receiver_id,
            json,
        } => handle_claim(&mut ctx, food_id, receiver_id, json)?,

        Commands::Report { number, json } => handle_report(&ctx, number, today, json)?,

        Commands::Predict {
            provider_type,
            location,
            food_type,
            meal_type,
            json,
        } => handle_predict(
            &mut ctx,
            DonationFeatures::new(provider_type, location, food_type.as_str(), meal_type.as_str()),
            json,
        )?,
    }

    ctx.close()
}
