//! FSRS scheduling core for spaced-repetition flashcards.
//!
//! Given a card's memory state and the instant it is being graded, the
//! engine produces the resulting memory state and due-delay for each of
//! the four ratings. Everything is a pure function over immutable
//! inputs: the clock and the fuzz randomness are injected, and card
//! persistence belongs to the caller.

pub mod card;
pub mod fuzz;
pub mod interval;
pub mod memory;
pub mod params;
pub mod scheduler;

pub use card::{Card, Rating, ReviewLog, State};
pub use fuzz::{apply_fuzz, apply_fuzz_with};
pub use params::{
    DEFAULT_WEIGHTS, DEFAULT_WEIGHTS_LEGACY, FormulaVersion, FsrsParameters, ParameterError,
};
pub use scheduler::{CandidateOutcome, DeckConfig, NextStates, apply_rating, next_states};
