//! Tournament engine: pairing, bracket construction, propagation, rankings.

mod aggregate;
mod bracket;
mod pairing;
mod propagation;
mod ranking;

pub use aggregate::{overall_score_deltas, recompute_cumulative, settle_overall_scores};
pub use bracket::{build_bracket, generate_bracket};
pub use pairing::{
    allocate_pairs, extract_pairs, PairingEntry, PAIRS_PER_TOURNAMENT, PLAYERS_PER_TOURNAMENT,
};
pub use propagation::{apply_slot_updates, slot_updates, SlotUpdate};
pub use ranking::{calculate_rankings, finalize_rankings};
