//! Pair extraction: split 16 ranked players into 8 seeded pairs.

use crate::models::{Pair, PlayerId, Tournament, TournamentError, TournamentId, TournamentState};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Players required for pair extraction.
pub const PLAYERS_PER_TOURNAMENT: usize = 16;

/// Pairs produced by extraction (and required by the bracket builder).
pub const PAIRS_PER_TOURNAMENT: usize = 8;

/// One player's standing at extraction time: skill tier plus cumulative
/// ranking points as the tie-break.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairingEntry {
    pub player: PlayerId,
    /// Discrete tier 1-5; absent counts as 0.
    pub skill_level: Option<u8>,
    pub ranking_points: u32,
}

/// Partition 16 players into 8 strength-balanced pairs.
///
/// 1. Stable-sort descending by (skill tier, ranking points).
/// 2. Pair rank i with rank 15-i, so every pair joins one of the 8 strongest
///    with one of the 8 weakest.
/// 3. Seed = i + 1 (the pair holding the overall strongest player seeds 1).
///
/// Pure; the caller persists the pairs and must first discard any prior
/// pairs, matches and rankings for the tournament.
pub fn allocate_pairs(
    tournament_id: TournamentId,
    entries: &[PairingEntry],
) -> Result<Vec<Pair>, TournamentError> {
    if entries.len() != PLAYERS_PER_TOURNAMENT {
        return Err(TournamentError::WrongPlayerCount {
            expected: PLAYERS_PER_TOURNAMENT,
            got: entries.len(),
        });
    }
    let mut seen = HashSet::new();
    for e in entries {
        if !seen.insert(e.player) {
            return Err(TournamentError::DuplicatePlayer(e.player));
        }
    }

    let mut ranked: Vec<&PairingEntry> = entries.iter().collect();
    ranked.sort_by_key(|e| Reverse((e.skill_level.unwrap_or(0), e.ranking_points)));

    let pairs = (0..PAIRS_PER_TOURNAMENT)
        .map(|i| {
            let strong = ranked[i];
            let weak = ranked[PLAYERS_PER_TOURNAMENT - 1 - i];
            Pair::new(tournament_id, strong.player, weak.player, (i + 1) as u8)
        })
        .collect();
    Ok(pairs)
}

/// Extract pairs into the tournament. Replaces any prior pairs and, since
/// matches and rankings reference them, discards those too (the cascade that
/// keeps no match pointing at a deleted pair). The tournament drops back to
/// Setup until a bracket is generated. `scores_applied` is left alone so a
/// rebuilt tournament cannot settle overall scores twice.
pub fn extract_pairs(
    tournament: &mut Tournament,
    entries: &[PairingEntry],
) -> Result<(), TournamentError> {
    let pairs = allocate_pairs(tournament.id, entries)?;
    tournament.pairs = pairs;
    tournament.matches.clear();
    tournament.rankings.clear();
    tournament.state = TournamentState::Setup;
    Ok(())
}
