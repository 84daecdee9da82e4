//! Ranking calculation: terminal match outcomes to placements and points.

use crate::models::{
    Category, GameMatch, Pair, PointValue, Round, Tournament, TournamentRanking,
};

/// Terminal matches and the placements they decide (winner, loser).
const PLACEMENT_MATCHES: [(Round, u8, u8); 4] = [
    (Round::Final, 1, 2),
    (Round::ThirdPlace, 3, 4),
    (Round::ConsolationFinal, 5, 6),
    (Round::ConsolationSeventh, 7, 8),
];

/// Derive ranking rows from the terminal matches. Only pairs whose
/// placement-deciding match has a winner get a row, so a partially played
/// tournament yields a partial (possibly empty) list. Deterministic and
/// stateless; points come from the category table as `Computed` values.
pub fn calculate_rankings(
    pairs: &[Pair],
    matches: &[GameMatch],
    category: Category,
) -> Vec<TournamentRanking> {
    let mut rankings = Vec::new();
    for &(round, winner_place, loser_place) in &PLACEMENT_MATCHES {
        let Some(m) = matches.iter().find(|m| m.round == round) else {
            continue;
        };
        let placed = [(m.winner, winner_place), (m.loser(), loser_place)];
        for (pair_id, placement) in placed {
            let Some(pair_id) = pair_id else { continue };
            if !pairs.iter().any(|p| p.id == pair_id) {
                continue;
            }
            rankings.push(TournamentRanking {
                tournament_id: m.tournament_id,
                pair_id,
                placement,
                points: PointValue::Computed(category.points_for(placement)),
            });
        }
    }
    rankings
}

/// Recompute and store the tournament's ranking rows, keeping any point
/// value an admin has overridden for the same pair.
pub fn finalize_rankings(tournament: &mut Tournament) {
    let category = tournament.category_or_default();
    let mut rankings = calculate_rankings(&tournament.pairs, &tournament.matches, category);
    for row in &mut rankings {
        let existing = tournament
            .rankings
            .iter()
            .find(|r| r.pair_id == row.pair_id)
            .map(|r| r.points);
        if let Some(points @ PointValue::Overridden(_)) = existing {
            row.points = points;
        }
    }
    // An overridden row whose deciding match was retracted has no derived
    // replacement this pass; carry it over so the pinned value survives
    // until the result is re-recorded.
    for old in &tournament.rankings {
        if old.points.is_overridden() && !rankings.iter().any(|r| r.pair_id == old.pair_id) {
            rankings.push(old.clone());
        }
    }
    tournament.rankings = rankings;
}
