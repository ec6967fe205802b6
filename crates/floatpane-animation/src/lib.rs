//! Decay projection and settle animation contract for Floatpane
//!
//! The physics here is deliberately small: a single exponential-decay model
//! that converts a release velocity into the extra distance a thrown panel
//! would travel before stopping. The visual settle itself is driven by the
//! host through the [`SettleAnimator`] capability.

mod decay;
mod settle;

pub use decay::*;
pub use settle::*;
