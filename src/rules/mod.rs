//! Rules engine trait, match results and termination.
//!
//! Front ends talk to `RulesEngine`. Termination evaluation is a pure
//! function of `MatchState` so it can be checked at any point.

pub mod engine;
pub mod termination;

pub use engine::{Action, EndReason, Outcome, RulesEngine};
pub use termination::{evaluate_termination, Termination};
