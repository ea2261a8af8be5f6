//! Claim command implementation

use super::common::CommandContext;
use crate::{FoodId, ReceiverId, Result};

/// Handle the claim command
pub fn handle_claim(
    ctx: &mut CommandContext,
    food_id: FoodId,
    receiver_id: ReceiverId,
    as_json: bool,
) -> Result<()> {
    let claim = ctx.db.claim(food_id, receiver_id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&claim)?);
    } else {
        println!(
            "✓ Claim {} recorded: receiver {} on listing {} ({}, {})",
            claim.claim_id, claim.receiver_id, claim.food_id, claim.status, claim.timestamp
        );
    }
    Ok(())
}
