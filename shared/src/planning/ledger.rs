//! On-hand ledger builder

use crate::models::{OnHandLookup, OnHandStock};

/// Split stock records into per-coffee and per-blend lookups.
///
/// A record with both ids lands in both tables; a later record for the same
/// id overwrites an earlier one.
pub fn build_on_hand_lookup(stocks: &[OnHandStock]) -> OnHandLookup {
    stocks
        .iter()
        .fold(OnHandLookup::default(), |mut lookup, stock| {
            if let Some(coffee_id) = stock.coffee_id {
                lookup.coffees.insert(coffee_id, stock.on_hand_roasted_g);
            }
            if let Some(blend_id) = stock.blend_id {
                lookup.blends.insert(blend_id, stock.on_hand_roasted_g);
            }
            lookup
        })
}
