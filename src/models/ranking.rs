//! Ranking rows: per-tournament placements and the cumulative leaderboard.

use crate::models::pair::PairId;
use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// A point total that is either derived by the engine or pinned by an admin.
/// Recomputation preserves `Overridden` values and replaces `Computed` ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "points")]
pub enum PointValue {
    Computed(u32),
    Overridden(u32),
}

impl PointValue {
    pub fn value(self) -> u32 {
        match self {
            PointValue::Computed(v) | PointValue::Overridden(v) => v,
        }
    }

    pub fn is_overridden(self) -> bool {
        matches!(self, PointValue::Overridden(_))
    }
}

/// One pair's final standing within a tournament. Placements form a
/// permutation of 1..=8 once the tournament fully resolves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentRanking {
    pub tournament_id: TournamentId,
    pub pair_id: PairId,
    /// 1-8, unique within the tournament.
    pub placement: u8,
    pub points: PointValue,
}

/// Per-player leaderboard row, recomputed from all tournament rankings.
/// Not a source of truth except where `points` is overridden.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CumulativeRanking {
    pub player_id: PlayerId,
    pub points: PointValue,
    /// Placement 1 finishes.
    pub gold: u32,
    /// Placement 2 finishes.
    pub silver: u32,
    /// Placement 3 finishes.
    pub bronze: u32,
    /// Placement 8 finishes.
    pub wooden_spoons: u32,
    /// Admin-awarded MVP titles; carried across recomputes, never derived.
    pub mvp_titles: u32,
}

impl CumulativeRanking {
    /// Zero-valued row for a player with no resolved tournaments yet.
    pub fn empty(player_id: PlayerId) -> Self {
        Self {
            player_id,
            points: PointValue::Computed(0),
            gold: 0,
            silver: 0,
            bronze: 0,
            wooden_spoons: 0,
            mvp_titles: 0,
        }
    }
}
