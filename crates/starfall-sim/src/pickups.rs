//! Collectibles dropped in the world.
//!
//! A pickup carries a boxed [`Collectible`]; the pickup system hands each one
//! a [`CollectContext`] for the collecting ship and applies what it asks for.

use starfall_combat::vitals::restore_shield;
use starfall_core::components::Vitals;
use starfall_core::constants::EXP_GEM_XP;

/// Collection-time access to the collecting ship.
pub struct CollectContext<'a> {
    pub vitals: Option<&'a mut Vitals>,
    /// XP to route into the collector's ledger once collection finishes.
    pub xp_gained: f64,
}

/// Something a ship can pick up.
pub trait Collectible: Send + Sync {
    /// Short name used in events and logs.
    fn kind(&self) -> &'static str;

    fn collect(&self, ctx: &mut CollectContext<'_>);
}

/// Component wrapping a collectible lying in the world.
pub struct Pickup(pub Box<dyn Collectible>);

/// Experience gem.
#[derive(Debug, Clone, Copy)]
pub struct ExpGem {
    pub xp: f64,
}

impl Default for ExpGem {
    fn default() -> Self {
        Self { xp: EXP_GEM_XP }
    }
}

impl Collectible for ExpGem {
    fn kind(&self) -> &'static str {
        "ExpGem"
    }

    fn collect(&self, ctx: &mut CollectContext<'_>) {
        ctx.xp_gained += self.xp;
    }
}

/// Shield recharge cell.
#[derive(Debug, Clone, Copy)]
pub struct ShieldCell {
    pub amount: f64,
}

impl Collectible for ShieldCell {
    fn kind(&self) -> &'static str {
        "ShieldCell"
    }

    fn collect(&self, ctx: &mut CollectContext<'_>) {
        if let Some(vitals) = ctx.vitals.as_deref_mut() {
            restore_shield(vitals, self.amount);
        }
    }
}
