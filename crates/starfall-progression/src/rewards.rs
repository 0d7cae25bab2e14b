//! Kill rewards keyed by category tag.

use starfall_core::config::RewardTable;

/// XP granted for destroying something tagged `tag`.
///
/// Unknown tags yield `None` and a warning; callers treat that as no reward.
pub fn xp_for_tag(rewards: &RewardTable, tag: &str) -> Option<f64> {
    let xp = rewards.0.get(tag).copied();
    if xp.is_none() {
        tracing::warn!(tag, "no XP reward configured for tag");
    }
    xp
}
