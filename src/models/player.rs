//! Player data structures for the club roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairs, rankings and lookups).
pub type PlayerId = Uuid;

/// Starting overall score for a freshly registered player.
pub const OVERALL_SCORE_SEED: u8 = 50;

/// Upper bound of the overall score scale.
pub const OVERALL_SCORE_MAX: u8 = 100;

/// A player in the club roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Discrete skill tier, 1 (beginner) to 5 (pro). None counts as 0 when seeding.
    pub skill_level: Option<u8>,
    /// Bounded 0-100 skill metric, seeded once and nudged per completed tournament.
    pub overall_score: u8,
}

impl Player {
    /// Create a new player with the given name. Overall score starts at the seed value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skill_level: None,
            overall_score: OVERALL_SCORE_SEED,
        }
    }

    /// Skill tier as used by the pairing sort (absent tier sorts below tier 1).
    pub fn skill_or_default(&self) -> u8 {
        self.skill_level.unwrap_or(0)
    }

    /// Apply a signed delta to the overall score, clamped into [0, 100].
    pub fn apply_overall_delta(&mut self, delta: i32) {
        let next = i32::from(self.overall_score) + delta;
        self.overall_score = next.clamp(0, i32::from(OVERALL_SCORE_MAX)) as u8;
    }
}
