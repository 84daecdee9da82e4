//! Cumulative aggregation: fold all tournaments into the per-player
//! leaderboard and the bounded overall score.

use crate::models::{CumulativeRanking, Pair, Player, PlayerId, PointValue, Tournament};

/// Full recompute of the cumulative leaderboard from every tournament's
/// ranking rows (through pair membership). Always folds from scratch, so
/// edits, retractions and re-categorization need no special handling.
///
/// Rows whose existing points are `Overridden` are preserved verbatim; MVP
/// titles are admin state and carry over. Players with no resolved
/// tournaments get a zero row.
pub fn recompute_cumulative(
    players: &[Player],
    tournaments: &[Tournament],
    existing: &[CumulativeRanking],
) -> Vec<CumulativeRanking> {
    players
        .iter()
        .map(|player| {
            let prior = existing.iter().find(|r| r.player_id == player.id);
            if let Some(row) = prior.filter(|r| r.points.is_overridden()) {
                return row.clone();
            }
            let mut row = CumulativeRanking::empty(player.id);
            row.mvp_titles = prior.map(|r| r.mvp_titles).unwrap_or(0);
            let mut total = 0u32;
            for t in tournaments {
                for ranking in &t.rankings {
                    let Some(pair) = t.get_pair(ranking.pair_id) else {
                        continue;
                    };
                    if !pair.has_player(player.id) {
                        continue;
                    }
                    total += ranking.points.value();
                    match ranking.placement {
                        1 => row.gold += 1,
                        2 => row.silver += 1,
                        3 => row.bronze += 1,
                        8 => row.wooden_spoons += 1,
                        _ => {}
                    }
                }
            }
            row.points = PointValue::Computed(total);
            row
        })
        .collect()
}

/// Per-player overall-score deltas for one completed tournament: plus or
/// minus 1 for every decided match the player's pair played, plus 2 more for
/// finishing 1st, minus 2 more for finishing 8th.
pub fn overall_score_deltas(tournament: &Tournament) -> Vec<(PlayerId, i32)> {
    tournament
        .pairs
        .iter()
        .flat_map(|pair| {
            let delta = pair_delta(tournament, pair);
            pair.players().map(move |player| (player, delta))
        })
        .collect()
}

fn pair_delta(tournament: &Tournament, pair: &Pair) -> i32 {
    let mut delta = 0i32;
    for m in &tournament.matches {
        if m.winner.is_none() || !m.has_pair(pair.id) {
            continue;
        }
        delta += if m.winner == Some(pair.id) { 1 } else { -1 };
    }
    if let Some(row) = tournament.rankings.iter().find(|r| r.pair_id == pair.id) {
        match row.placement {
            1 => delta += 2,
            8 => delta -= 2,
            _ => {}
        }
    }
    delta
}

/// Apply the tournament's overall-score deltas to the roster, clamped into
/// [0, 100]. Guarded so a tournament settles scores at most once, even if
/// its results are later retracted and resubmitted.
pub fn settle_overall_scores(tournament: &mut Tournament, players: &mut [Player]) -> bool {
    if tournament.scores_applied {
        return false;
    }
    for (player_id, delta) in overall_score_deltas(tournament) {
        if let Some(p) = players.iter_mut().find(|p| p.id == player_id) {
            p.apply_overall_delta(delta);
        }
    }
    tournament.scores_applied = true;
    true
}
