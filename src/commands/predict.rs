//! Quantity prediction command implementation

use serde::Serialize;

use super::common::CommandContext;
use crate::{estimator::DonationFeatures, Result};

#[derive(Debug, Serialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub features: DonationFeatures,
    pub predicted_quantity: u32,
}

/// Handle the predict command
pub fn handle_predict(ctx: &mut CommandContext, features: DonationFeatures, as_json: bool) -> Result<()> {
    let predicted_quantity = ctx.estimator_mut()?.predict(&features);
    let prediction = Prediction {
        features,
        predicted_quantity,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!(
            "Predicted Donation Quantity: {} units",
            prediction.predicted_quantity
        );
        println!("This prediction is based on historical data of similar donations.");
    }
    Ok(())
}
