use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card lifecycle. New is the sole entry state; Review is the steady
/// state; Learning and Relearning are transient step sequences on the
/// way into or back to Review. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    New,
    Learning,
    Review,
    Relearning,
}

/// Learner's answer quality. The rating is the transition trigger:
/// there is no separate event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn from_u8(n: u8) -> Option<Rating> {
        match n {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r as u8
    }
}

impl From<Rating> for f64 {
    fn from(r: Rating) -> f64 {
        f64::from(r as u8)
    }
}

/// The entity being scheduled. Grading never mutates a card in place;
/// the engine borrows it and returns a disjoint new value. Persistence
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub state: State,
    pub stability: f64,
    pub difficulty: f64,
    pub lapses: u32,
    /// Index into the active learning/relearning step list. Only
    /// meaningful in Learning and Relearning.
    pub step: usize,
    pub due: DateTime<Utc>,
    pub last_review: Option<DateTime<Utc>>,
}

impl Card {
    /// A fresh card: state New, no memory state yet, due immediately.
    pub fn new(now: DateTime<Utc>) -> Card {
        Card {
            id: uuid::Uuid::new_v4().to_string(),
            state: State::New,
            stability: 0.0,
            difficulty: 5.0,
            lapses: 0,
            step: 0,
            due: now,
            last_review: None,
        }
    }
}

/// Audit record of one completed grading event. Written once, never
/// mutated; storage belongs to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
    pub card_id: String,
    pub review_time: DateTime<Utc>,
    pub rating: Rating,
    pub state: State,
    pub due: DateTime<Utc>,
    pub stability: f64,
    pub difficulty: f64,
    pub lapses: u32,
}
