//! Enemy AI for Starfall.
//!
//! Implements the skirmisher behavior machine (Strafe/RandomFly), the
//! pursuit/pass-through chase used by small hulls, and the mapping from
//! configured behavior to initial runtime state.

pub mod fsm;
pub mod profiles;
pub mod pursuit;

pub use starfall_core as core;
