// FSRS memory model: pure functions over (difficulty, stability,
// retrievability) and the weight vector. Nothing here touches a clock
// or holds state.

use crate::card::Rating;
use crate::params::FsrsParameters;

type R = f64;
type S = f64;
type D = f64;
type T = f64;

pub const S_MIN: f64 = 0.1;
pub const S_MAX: f64 = 36500.0;
pub const D_MIN: f64 = 1.0;
pub const D_MAX: f64 = 10.0;

/// Fixed-precision rounding applied to every floating output. Persisted
/// memory states and logs must compare bit-for-bit across platforms, so
/// this is a correctness requirement, not cosmetics.
pub(crate) fn round8(x: f64) -> f64 {
    (x * 1e8).round() / 1e8
}

fn clamp_d(d: D) -> D {
    d.clamp(D_MIN, D_MAX)
}

fn clamp_s(s: S) -> S {
    s.clamp(S_MIN, S_MAX)
}

/// Seed stability for a card graded for the first time.
pub fn init_stability(rating: Rating, params: &FsrsParameters) -> S {
    let w = params.w();
    round8(clamp_s(w[rating as usize - 1]))
}

/// Seed difficulty for a card graded for the first time.
pub fn init_difficulty(rating: Rating, params: &FsrsParameters) -> D {
    let w = params.w();
    let g: f64 = rating.into();
    round8(clamp_d(w[4] - f64::exp((g - 1.0) * w[5]) + 1.0))
}

/// Difficulty update: a signed per-rating delta, linearly damped as
/// difficulty approaches its ceiling, then mean-reverted toward the
/// Easy-rating seed so repeated grading cannot drift it unboundedly.
pub fn next_difficulty(d: D, rating: Rating, params: &FsrsParameters) -> D {
    let w = params.w();
    let g: f64 = rating.into();
    let delta = -w[6] * (g - 3.0);
    let damped = d + delta * (D_MAX - d) / 9.0;
    let anchor = init_difficulty(Rating::Easy, params);
    round8(clamp_d(w[7] * anchor + (1.0 - w[7]) * damped))
}

/// Forgetting curve: probability of recall after `elapsed` days at
/// stability `s`. By construction r = 0.9 exactly when elapsed == s.
pub fn retrievability(params: &FsrsParameters, elapsed: T, s: S) -> R {
    round8((1.0 + params.factor() * elapsed / s).powf(params.decay()))
}

/// Stability after a successful Review-state recall (Hard/Good/Easy).
/// Lower retrievability (a later-than-predicted review) yields a larger
/// gain; Hard shrinks the gain, Easy amplifies it.
pub fn next_recall_stability(d: D, s: S, r: R, rating: Rating, params: &FsrsParameters) -> S {
    let w = params.w();
    let hard_penalty = if rating == Rating::Hard { w[15] } else { 1.0 };
    let easy_bonus = if rating == Rating::Easy { w[16] } else { 1.0 };
    let alpha = 1.0
        + f64::exp(w[8])
            * (11.0 - d)
            * s.powf(-w[9])
            * (f64::exp((1.0 - r) * w[10]) - 1.0)
            * hard_penalty
            * easy_bonus;
    round8(clamp_s(s * alpha))
}

/// Stability after a lapse (Again in Review state). Generally well below
/// the pre-lapse stability.
pub fn next_forget_stability(d: D, s: S, r: R, params: &FsrsParameters) -> S {
    let w = params.w();
    let next = w[11] * d.powf(-w[12]) * ((s + 1.0).powf(w[13]) - 1.0) * f64::exp((1.0 - r) * w[14]);
    round8(clamp_s(next))
}
