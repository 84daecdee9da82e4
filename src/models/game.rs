//! Match, Round and Bracket for the fixed two-bracket elimination structure.

use crate::models::pair::PairId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the draw a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bracket {
    /// Winners' path: quarterfinals through final and third place.
    Main,
    /// Quarterfinal losers' path, deciding placements 5-8.
    Consolation,
}

/// Round of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Quarterfinal,
    Semifinal,
    Final,
    ThirdPlace,
    ConsolationSemi,
    ConsolationFinal,
    ConsolationSeventh,
}

impl Round {
    /// Fixed round-to-bracket mapping.
    pub fn bracket(self) -> Bracket {
        match self {
            Round::Quarterfinal | Round::Semifinal | Round::Final | Round::ThirdPlace => {
                Bracket::Main
            }
            Round::ConsolationSemi | Round::ConsolationFinal | Round::ConsolationSeventh => {
                Bracket::Consolation
            }
        }
    }

    /// How many matches this round holds in an 8-pair draw.
    pub fn match_count(self) -> usize {
        match self {
            Round::Quarterfinal => 4,
            Round::Semifinal | Round::ConsolationSemi => 2,
            _ => 1,
        }
    }
}

/// A single match between two pairs. Slots are None until the upstream
/// round resolves (quarterfinal slots are set at bracket creation).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: Round,
    pub bracket: Bracket,
    /// Index within the round; which upstream matches feed this one.
    pub ordinal: usize,
    pub pair_1: Option<PairId>,
    pub pair_2: Option<PairId>,
    pub score_1: Option<u32>,
    pub score_2: Option<u32>,
    /// None if not yet played. When set, scores are present and distinct
    /// and the higher score belongs to the winner.
    pub winner: Option<PairId>,
}

impl GameMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: Round,
        ordinal: usize,
        pair_1: Option<PairId>,
        pair_2: Option<PairId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            bracket: round.bracket(),
            ordinal,
            pair_1,
            pair_2,
            score_1: None,
            score_2: None,
            winner: None,
        }
    }

    /// The pair that lost, once a winner is recorded. None for undecided matches.
    pub fn loser(&self) -> Option<PairId> {
        let winner = self.winner?;
        match (self.pair_1, self.pair_2) {
            (Some(p1), Some(p2)) if p1 == winner => Some(p2),
            (Some(p1), Some(p2)) if p2 == winner => Some(p1),
            _ => None,
        }
    }

    /// Whether the given pair occupies one of the two slots.
    pub fn has_pair(&self, pair_id: PairId) -> bool {
        self.pair_1 == Some(pair_id) || self.pair_2 == Some(pair_id)
    }

    /// Both slots filled: a result may be recorded.
    pub fn is_ready(&self) -> bool {
        self.pair_1.is_some() && self.pair_2.is_some()
    }

    /// Drop the recorded result, keeping the pair slots.
    pub fn clear_result(&mut self) {
        self.score_1 = None;
        self.score_2 = None;
        self.winner = None;
    }
}
