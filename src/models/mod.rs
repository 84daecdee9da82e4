//! Data structures for the padel club: players, pairs, matches, rankings.

mod game;
mod pair;
mod player;
mod ranking;
mod tournament;

pub use game::{Bracket, GameMatch, MatchId, Round};
pub use pair::{Pair, PairId};
pub use player::{Player, PlayerId, OVERALL_SCORE_MAX, OVERALL_SCORE_SEED};
pub use ranking::{CumulativeRanking, PointValue, TournamentRanking};
pub use tournament::{Category, Tournament, TournamentError, TournamentId, TournamentState};
