//! Tournament, Category and TournamentError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::pair::{Pair, PairId};
use crate::models::player::PlayerId;
use crate::models::ranking::{PointValue, TournamentRanking};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Pair extraction needs exactly 16 players.
    WrongPlayerCount { expected: usize, got: usize },
    /// A player appears more than once in the extraction input.
    DuplicatePlayer(PlayerId),
    /// Bracket construction needs exactly 8 pairs.
    WrongPairCount { expected: usize, got: usize },
    /// No pair carries this seed (seeds 1-8 must all be present).
    MissingSeed(u8),
    /// Match not found in this tournament.
    MatchNotFound(MatchId),
    /// Pair not found in this tournament.
    PairNotFound(PairId),
    /// The pair's placement-deciding match has no winner yet.
    PlacementNotDetermined(PairId),
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// A result was submitted for a match whose pair slots are not yet determined.
    PairsNotSet(MatchId),
    /// Scores must be distinct so the winner is unambiguous.
    TiedScore,
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::WrongPlayerCount { expected, got } => {
                write!(f, "Need exactly {} players for pair extraction (got {})", expected, got)
            }
            TournamentError::DuplicatePlayer(_) => write!(f, "A player appears more than once"),
            TournamentError::WrongPairCount { expected, got } => {
                write!(f, "Need exactly {} pairs to build a bracket (got {})", expected, got)
            }
            TournamentError::MissingSeed(seed) => write!(f, "No pair carries seed {}", seed),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::PairNotFound(_) => write!(f, "Pair not found"),
            TournamentError::PlacementNotDetermined(_) => {
                write!(f, "The pair's placement is not determined yet")
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::PairsNotSet(_) => {
                write!(f, "Match pairs are not determined yet; resolve the upstream matches first")
            }
            TournamentError::TiedScore => write!(f, "Scores must be distinct to decide a winner"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Tournament tier: controls the placement-to-points table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GrandSlam,
    #[default]
    Master1000,
}

impl Category {
    /// Points for a final placement (1-8). Unknown placements score 0.
    pub fn points_for(self, placement: u8) -> u32 {
        const GRAND_SLAM: [u32; 8] = [2000, 1000, 400, 200, 100, 50, 25, 10];
        const MASTER_1000: [u32; 8] = [1000, 500, 200, 100, 50, 25, 15, 10];
        let table = match self {
            Category::GrandSlam => &GRAND_SLAM,
            Category::Master1000 => &MASTER_1000,
        };
        match placement {
            1..=8 => table[usize::from(placement) - 1],
            _ => 0,
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Created; pairs not yet extracted.
    #[default]
    Setup,
    /// Pairs and fixtures exist; results coming in.
    Bracket,
    /// Every match has a winner; rankings finalized.
    Completed,
}

/// Full tournament state: pairs, fixtures, results and rankings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// None falls back to `Category::Master1000` for points.
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub state: TournamentState,
    /// The 8 seeded pairs, once extracted.
    pub pairs: Vec<Pair>,
    /// The 12 fixtures, once the bracket is built.
    pub matches: Vec<GameMatch>,
    /// Final standings; written when the tournament completes or on recalculation.
    pub rankings: Vec<TournamentRanking>,
    /// Overall-score deltas are applied at most once per tournament.
    pub scores_applied: bool,
}

impl Tournament {
    /// Create a new tournament in Setup state with no pairs or matches.
    pub fn new(name: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            created_at: Utc::now(),
            state: TournamentState::Setup,
            pairs: Vec::new(),
            matches: Vec::new(),
            rankings: Vec::new(),
            scores_applied: false,
        }
    }

    /// Points table in effect (unset category uses the master_1000 table).
    pub fn category_or_default(&self) -> Category {
        self.category.unwrap_or_default()
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_match_mut(&mut self, match_id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    pub fn get_pair(&self, pair_id: PairId) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.id == pair_id)
    }

    /// Record a match result. Both pair slots must be determined and scores
    /// distinct; the higher score's pair becomes the winner.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        score_1: u32,
        score_2: u32,
    ) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        if score_1 == score_2 {
            return Err(TournamentError::TiedScore);
        }
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if !m.is_ready() {
            return Err(TournamentError::PairsNotSet(match_id));
        }
        m.score_1 = Some(score_1);
        m.score_2 = Some(score_2);
        m.winner = if score_1 > score_2 { m.pair_1 } else { m.pair_2 };
        Ok(())
    }

    /// Retract a match result. Downstream slots are re-derived by the next
    /// propagation pass; downstream results recorded from the stale slots
    /// must be cleared explicitly by the caller.
    pub fn clear_result(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.clear_result();
        if self.state == TournamentState::Completed {
            self.state = TournamentState::Bracket;
        }
        Ok(())
    }

    /// Completion predicate: at least one match and every match decided.
    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.winner.is_some())
    }

    /// Pin a pair's tournament points to an admin-chosen value. The row must
    /// already exist (the pair's placement must be determinable).
    pub fn override_pair_points(
        &mut self,
        pair_id: PairId,
        points: u32,
    ) -> Result<(), TournamentError> {
        if self.get_pair(pair_id).is_none() {
            return Err(TournamentError::PairNotFound(pair_id));
        }
        let row = self
            .rankings
            .iter_mut()
            .find(|r| r.pair_id == pair_id)
            .ok_or(TournamentError::PlacementNotDetermined(pair_id))?;
        row.points = PointValue::Overridden(points);
        Ok(())
    }
}
