//! Turn resolution.
//!
//! - `movement`: single-step movement, pass-start bonus, step observers
//! - `landing`: rent, ownership offers and AI purchases
//! - `cycle`: human roll-cycles and AI sub-turns
//! - `purchase`: human purchases
//! - `rules`: `WalrusRules`, the session-level `RulesEngine`
//!
//! All operations take `&mut MatchState` and either apply completely or
//! leave the state untouched.

pub mod movement;
pub mod landing;
pub mod cycle;
pub mod purchase;
pub mod rules;

pub use movement::{NoSteps, Step, StepObserver};
pub use landing::resolve_landing;
pub use cycle::{resolve_human_turn, run_ai_sub_turn, SubTurn};
pub use purchase::{buy_tile, can_buy, check_purchase};
pub use rules::WalrusRules;
