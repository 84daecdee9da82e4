//! Pair: two players entered together as one bracket unit.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pair.
pub type PairId = Uuid;

/// Two players entered together, with a 1-8 seed assigned at extraction time.
/// Immutable once matches reference it; re-extraction replaces all pairs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub tournament_id: TournamentId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    /// 1 (strongest combination) to 8; determines the initial bracket slot.
    pub seed: u8,
}

impl Pair {
    pub fn new(tournament_id: TournamentId, player_1: PlayerId, player_2: PlayerId, seed: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            player_1,
            player_2,
            seed,
        }
    }

    /// Whether the given player is one of the two members.
    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.player_1 == player_id || self.player_2 == player_id
    }

    /// Both member ids, in stored order.
    pub fn players(&self) -> [PlayerId; 2] {
        [self.player_1, self.player_2]
    }
}
