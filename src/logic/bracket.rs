//! Bracket construction: 8 seeded pairs to a 12-match two-bracket fixture set.

use crate::logic::pairing::PAIRS_PER_TOURNAMENT;
use crate::models::{
    GameMatch, Pair, PairId, Round, Tournament, TournamentError, TournamentId, TournamentState,
};

/// Quarterfinal seeding policy: 1v8, 4v5, 2v7, 3v6 by ordinal, so the top
/// seeds cannot meet before the semifinals.
const QUARTERFINAL_SEEDS: [(u8, u8); 4] = [(1, 8), (4, 5), (2, 7), (3, 6)];

/// Expand 8 seeded pairs into the full fixture set: 4 quarterfinals with
/// pairs placed, then slot-empty semifinals, final, third place, consolation
/// semis, consolation final and consolation seventh.
///
/// Pure fixture generator. Regeneration is destructive: the caller must
/// discard existing match results first.
pub fn build_bracket(
    tournament_id: TournamentId,
    pairs: &[Pair],
) -> Result<Vec<GameMatch>, TournamentError> {
    if pairs.len() != PAIRS_PER_TOURNAMENT {
        return Err(TournamentError::WrongPairCount {
            expected: PAIRS_PER_TOURNAMENT,
            got: pairs.len(),
        });
    }

    let by_seed = |seed: u8| -> Result<PairId, TournamentError> {
        pairs
            .iter()
            .find(|p| p.seed == seed)
            .map(|p| p.id)
            .ok_or(TournamentError::MissingSeed(seed))
    };

    let mut matches = Vec::with_capacity(12);
    for (ordinal, &(high, low)) in QUARTERFINAL_SEEDS.iter().enumerate() {
        matches.push(GameMatch::new(
            tournament_id,
            Round::Quarterfinal,
            ordinal,
            Some(by_seed(high)?),
            Some(by_seed(low)?),
        ));
    }
    for round in [Round::Semifinal, Round::ConsolationSemi] {
        for ordinal in 0..round.match_count() {
            matches.push(GameMatch::new(tournament_id, round, ordinal, None, None));
        }
    }
    for round in [Round::Final, Round::ThirdPlace, Round::ConsolationFinal, Round::ConsolationSeventh] {
        matches.push(GameMatch::new(tournament_id, round, 0, None, None));
    }
    Ok(matches)
}

/// (Re)generate the tournament's fixtures from its extracted pairs.
/// Destructive: existing matches, results and rankings are discarded.
pub fn generate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let matches = build_bracket(tournament.id, &tournament.pairs)?;
    tournament.matches = matches;
    tournament.rankings.clear();
    tournament.state = TournamentState::Bracket;
    Ok(())
}
