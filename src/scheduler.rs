// State-transition engine. Dispatches on (state, rating), combining the
// memory model and interval model with the step/graduation rules, and
// always produces all four candidate outcomes so a caller can preview
// every option before the learner commits.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::card::{Card, Rating, ReviewLog, State};
use crate::interval::next_interval;
use crate::memory::{
    S_MIN, init_difficulty, init_stability, next_difficulty, next_forget_stability,
    next_recall_stability, retrievability,
};
use crate::params::{FsrsParameters, ParameterError};

/// Days until the first Review-state interval when a card graduates
/// through the last learning step on Good.
const GRADUATING_INTERVAL_DAYS: i64 = 1;

/// Days until the first Review-state interval when a card graduates
/// immediately on Easy.
const EASY_INTERVAL_DAYS: i64 = 4;

/// Elapsed time substituted when a Review-state card carries no
/// last_review timestamp. Must be positive to keep the forgetting curve
/// off its degenerate zero-division edge.
const MISSING_REVIEW_EPSILON_DAYS: f64 = 0.01;

/// Deck-level scheduling configuration: the parameter set plus the
/// learning and relearning step lists. Long-lived and read-only;
/// shareable across any number of concurrent scheduling calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    learning_steps: Vec<Duration>,
    relearning_steps: Vec<Duration>,
    params: FsrsParameters,
}

impl DeckConfig {
    pub fn new(
        learning_steps: Vec<Duration>,
        relearning_steps: Vec<Duration>,
        params: FsrsParameters,
    ) -> Result<Self, ParameterError> {
        if learning_steps.is_empty() || learning_steps.iter().any(|s| *s <= Duration::zero()) {
            return Err(ParameterError::InvalidSteps("learning_steps"));
        }
        if relearning_steps.is_empty() || relearning_steps.iter().any(|s| *s <= Duration::zero()) {
            return Err(ParameterError::InvalidSteps("relearning_steps"));
        }
        Ok(Self {
            learning_steps,
            relearning_steps,
            params,
        })
    }

    pub fn learning_steps(&self) -> &[Duration] {
        &self.learning_steps
    }

    pub fn relearning_steps(&self) -> &[Duration] {
        &self.relearning_steps
    }

    pub fn params(&self) -> &FsrsParameters {
        &self.params
    }
}

impl Default for DeckConfig {
    /// 1m/10m learning steps, a single 10m relearning step, default
    /// parameters. Known-good values, so no validation round-trip.
    fn default() -> Self {
        Self {
            learning_steps: vec![Duration::minutes(1), Duration::minutes(10)],
            relearning_steps: vec![Duration::minutes(10)],
            params: FsrsParameters::default(),
        }
    }
}

/// The would-be memory state and due-delay for one rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateOutcome {
    pub stability: f64,
    pub difficulty: f64,
    pub interval: Duration,
}

/// All four candidate outcomes for one card at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextStates {
    pub again: CandidateOutcome,
    pub hard: CandidateOutcome,
    pub good: CandidateOutcome,
    pub easy: CandidateOutcome,
}

impl NextStates {
    pub fn get(&self, rating: Rating) -> &CandidateOutcome {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

// Full transition including the lifecycle bookkeeping the preview
// surface deliberately omits.
struct Transition {
    stability: f64,
    difficulty: f64,
    interval: Duration,
    state: State,
    step: usize,
}

impl Transition {
    fn outcome(&self) -> CandidateOutcome {
        CandidateOutcome {
            stability: self.stability,
            difficulty: self.difficulty,
            interval: self.interval,
        }
    }
}

fn elapsed_days(card: &Card, now: DateTime<Utc>) -> f64 {
    match card.last_review {
        Some(last) => ((now - last).num_days() as f64).max(0.0),
        None => {
            // Semantically unusual but structurally valid; rejecting it
            // would break a live session, so proceed on an epsilon.
            warn!(
                card_id = %card.id,
                "review-state card has no last_review, substituting epsilon elapsed time"
            );
            MISSING_REVIEW_EPSILON_DAYS
        }
    }
}

fn transition(card: &Card, config: &DeckConfig, rating: Rating, now: DateTime<Utc>) -> Transition {
    let params = config.params();
    match card.state {
        State::New => {
            let stability = init_stability(rating, params);
            let difficulty = init_difficulty(rating, params);
            match rating {
                Rating::Again | Rating::Hard | Rating::Good => Transition {
                    stability,
                    difficulty,
                    interval: config.learning_steps()[0],
                    state: State::Learning,
                    step: 0,
                },
                Rating::Easy => Transition {
                    stability,
                    difficulty,
                    interval: Duration::days(EASY_INTERVAL_DAYS),
                    state: State::Review,
                    step: 0,
                },
            }
        }
        State::Learning | State::Relearning => {
            let steps = match card.state {
                State::Learning => config.learning_steps(),
                _ => config.relearning_steps(),
            };
            // Steps are short-term remediation: an existing long-term
            // stability rides through them unchanged, and a card that
            // never earned one is seeded by this rating.
            let stability = if card.stability > 0.0 {
                card.stability
            } else {
                init_stability(rating, params)
            };
            let difficulty = next_difficulty(card.difficulty, rating, params);
            match rating {
                Rating::Again | Rating::Hard => Transition {
                    stability,
                    difficulty,
                    interval: steps[0],
                    state: card.state,
                    step: 0,
                },
                Rating::Good => {
                    let next_step = card.step + 1;
                    if next_step < steps.len() {
                        Transition {
                            stability,
                            difficulty,
                            interval: steps[next_step],
                            state: card.state,
                            step: next_step,
                        }
                    } else {
                        Transition {
                            stability,
                            difficulty,
                            interval: Duration::days(GRADUATING_INTERVAL_DAYS),
                            state: State::Review,
                            step: 0,
                        }
                    }
                }
                Rating::Easy => Transition {
                    stability,
                    difficulty,
                    interval: Duration::days(EASY_INTERVAL_DAYS),
                    state: State::Review,
                    step: 0,
                },
            }
        }
        State::Review => {
            let stability = card.stability.max(S_MIN);
            let elapsed = elapsed_days(card, now);
            let r = retrievability(params, elapsed, stability);
            let difficulty = next_difficulty(card.difficulty, rating, params);
            match rating {
                Rating::Again => Transition {
                    stability: next_forget_stability(card.difficulty, stability, r, params),
                    difficulty,
                    // The lapse interval is unconditionally the first
                    // relearning step; the forget stability only shapes
                    // the post-relearning schedule.
                    interval: config.relearning_steps()[0],
                    state: State::Relearning,
                    step: 0,
                },
                _ => {
                    let next_stability =
                        next_recall_stability(card.difficulty, stability, r, rating, params);
                    Transition {
                        stability: next_stability,
                        difficulty,
                        interval: Duration::days(next_interval(next_stability, params)),
                        state: State::Review,
                        step: 0,
                    }
                }
            }
        }
    }
}

/// Compute the candidate outcome for every rating at once. Pure: reads
/// the card, config, and injected timestamp, mutates nothing.
pub fn next_states(card: &Card, config: &DeckConfig, now: DateTime<Utc>) -> NextStates {
    NextStates {
        again: transition(card, config, Rating::Again, now).outcome(),
        hard: transition(card, config, Rating::Hard, now).outcome(),
        good: transition(card, config, Rating::Good, now).outcome(),
        easy: transition(card, config, Rating::Easy, now).outcome(),
    }
}

/// Commit one rating: returns the disjoint successor card and the audit
/// log entry. The input card is only borrowed and never modified.
pub fn apply_rating(
    card: &Card,
    rating: Rating,
    config: &DeckConfig,
    now: DateTime<Utc>,
) -> (Card, ReviewLog) {
    let t = transition(card, config, rating, now);
    let lapsed = card.state == State::Review && rating == Rating::Again;
    let lapses = card.lapses + u32::from(lapsed);
    let due = now + t.interval;
    debug!(
        card_id = %card.id,
        rating = u8::from(rating),
        from = ?card.state,
        to = ?t.state,
        "graded card"
    );
    let next = Card {
        id: card.id.clone(),
        state: t.state,
        stability: t.stability,
        difficulty: t.difficulty,
        lapses,
        step: t.step,
        due,
        last_review: Some(now),
    };
    let log = ReviewLog {
        card_id: card.id.clone(),
        review_time: now,
        rating,
        state: t.state,
        due,
        stability: t.stability,
        difficulty: t.difficulty,
        lapses,
    };
    (next, log)
}
