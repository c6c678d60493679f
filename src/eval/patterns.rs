//! Pattern scores for Gomoku evaluation
//!
//! A run is scored by its length and by whether at least one of its two
//! ends is an empty cell (open) or both are blocked by the edge or an
//! opponent stone. Scores grow with length and favor open runs.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five or more in a row - immediate win
    pub const WIN: i32 = 1_000_000;

    /// Four with an empty end (live four)
    pub const FOUR: i32 = 10_000;
    /// Four blocked on both ends (dead four)
    pub const BLOCKED_FOUR: i32 = 1_000;

    /// Three with an empty end
    pub const THREE: i32 = 1_000;
    /// Three blocked on both ends
    pub const BLOCKED_THREE: i32 = 100;

    /// Two with an empty end
    pub const TWO: i32 = 100;
    /// Single stone with an empty end
    pub const ONE: i32 = 10;
}

/// Score of a run of `count` same-color stones.
///
/// Fully blocked twos and singles are worthless: they can never grow into
/// a five along this line.
#[inline]
pub fn line_score(count: usize, open: bool) -> i32 {
    match (count, open) {
        (5.., _) => PatternScore::WIN,
        (4, true) => PatternScore::FOUR,
        (4, false) => PatternScore::BLOCKED_FOUR,
        (3, true) => PatternScore::THREE,
        (3, false) => PatternScore::BLOCKED_THREE,
        (2, true) => PatternScore::TWO,
        (1, true) => PatternScore::ONE,
        _ => 0,
    }
}
