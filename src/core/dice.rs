//! Roll sources.
//!
//! The engine never invents randomness. Callers inject a `RollSource`,
//! which lets tests script exact roll sequences.
//!
//! ## Sources
//!
//! - `ChaChaDice`: seeded, deterministic, checkpointable
//! - `ScriptedDice`: replays a fixed sequence
//!
//! ```
//! use walrus_estate::core::{ChaChaDice, RollSource};
//!
//! let mut dice = ChaChaDice::new(42);
//! let saved = dice.state();
//! let first = dice.roll();
//!
//! let mut replay = ChaChaDice::from_state(&saved);
//! assert_eq!(replay.roll(), first);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Lowest legal die face.
pub const MIN_ROLL: u8 = 1;
/// Highest legal die face. Rolling it grants an extra turn.
pub const MAX_ROLL: u8 = 6;

/// Is `roll` a legal die face?
#[must_use]
pub const fn is_valid_roll(roll: u8) -> bool {
    roll >= MIN_ROLL && roll <= MAX_ROLL
}

/// A capability producing one die roll per call.
///
/// Implementations should return values in `1..=6`. The engine validates
/// every roll it receives and rejects anything else.
pub trait RollSource {
    /// Produce the next roll.
    fn roll(&mut self) -> u8;
}

/// Deterministic six-sided die backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct ChaChaDice {
    inner: ChaCha8Rng,
    seed: u64,
}

impl ChaChaDice {
    /// Create a die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Capture the current position in the stream.
    #[must_use]
    pub fn state(&self) -> DiceState {
        DiceState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume from a captured state.
    #[must_use]
    pub fn from_state(state: &DiceState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RollSource for ChaChaDice {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(MIN_ROLL..=MAX_ROLL)
    }
}

/// Serializable die state for checkpointing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}

/// Replays a fixed roll sequence, cycling when it runs out.
///
/// An empty script rolls 1 forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    script: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create dice that replay `script` in order.
    #[must_use]
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// How many rolls have been handed out.
    #[must_use]
    pub fn rolls_used(&self) -> usize {
        self.cursor
    }
}

impl RollSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if self.script.is_empty() {
            return MIN_ROLL;
        }
        let roll = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        roll
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}
