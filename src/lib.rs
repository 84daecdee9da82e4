//! Padel club tournament web app: library with models and the bracket/ranking engine.

pub mod logic;
pub mod models;

pub use logic::{
    allocate_pairs, apply_slot_updates, build_bracket, calculate_rankings, extract_pairs,
    finalize_rankings, generate_bracket, overall_score_deltas, recompute_cumulative,
    settle_overall_scores, slot_updates, PairingEntry, SlotUpdate, PAIRS_PER_TOURNAMENT,
    PLAYERS_PER_TOURNAMENT,
};
pub use models::{
    Bracket, Category, CumulativeRanking, GameMatch, MatchId, Pair, PairId, Player, PlayerId,
    PointValue, Round, Tournament, TournamentError, TournamentId, TournamentRanking,
    TournamentState, OVERALL_SCORE_MAX, OVERALL_SCORE_SEED,
};
