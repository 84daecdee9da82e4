//! Result propagation: derive downstream pair slots from recorded winners.

use crate::models::{GameMatch, MatchId, PairId, Round, Tournament};
use serde::{Deserialize, Serialize};

/// Which side of a resolved upstream match feeds a downstream slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Feed {
    Winner,
    Loser,
}

/// Static dependency table: downstream round, side taken, upstream round.
/// Downstream ordinal k is fed by upstream ordinals 2k and 2k+1.
const FLOW: [(Round, Feed, Round); 6] = [
    (Round::Semifinal, Feed::Winner, Round::Quarterfinal),
    (Round::Final, Feed::Winner, Round::Semifinal),
    (Round::ThirdPlace, Feed::Loser, Round::Semifinal),
    (Round::ConsolationSemi, Feed::Loser, Round::Quarterfinal),
    (Round::ConsolationFinal, Feed::Winner, Round::ConsolationSemi),
    (Round::ConsolationSeventh, Feed::Loser, Round::ConsolationSemi),
];

/// A downstream match whose derived slots differ from the stored ones.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub match_id: MatchId,
    pub pair_1: Option<PairId>,
    pub pair_2: Option<PairId>,
}

fn find<'a>(matches: &'a [GameMatch], round: Round, ordinal: usize) -> Option<&'a GameMatch> {
    matches.iter().find(|m| m.round == round && m.ordinal == ordinal)
}

fn feed_value(matches: &[GameMatch], round: Round, ordinal: usize, feed: Feed) -> Option<PairId> {
    let upstream = find(matches, round, ordinal)?;
    match feed {
        Feed::Winner => upstream.winner,
        Feed::Loser => upstream.loser(),
    }
}

/// Compute the slot updates implied by the current winners. Undecided
/// upstream matches derive to None, so a retracted result un-derives the
/// dependent slot. Idempotent: matches whose stored slots already equal the
/// derived ones produce no update.
pub fn slot_updates(matches: &[GameMatch]) -> Vec<SlotUpdate> {
    let mut updates = Vec::new();
    for &(downstream, feed, upstream) in &FLOW {
        for ordinal in 0..downstream.match_count() {
            let Some(target) = find(matches, downstream, ordinal) else {
                continue;
            };
            let pair_1 = feed_value(matches, upstream, 2 * ordinal, feed);
            let pair_2 = feed_value(matches, upstream, 2 * ordinal + 1, feed);
            if target.pair_1 != pair_1 || target.pair_2 != pair_2 {
                updates.push(SlotUpdate {
                    match_id: target.id,
                    pair_1,
                    pair_2,
                });
            }
        }
    }
    updates
}

/// Apply the computed slot updates to the tournament's matches. A match that
/// already holds a recorded winner is never rewritten; its result must be
/// cleared explicitly first. Returns the updates actually applied and those
/// skipped because of a standing result.
pub fn apply_slot_updates(tournament: &mut Tournament) -> (Vec<SlotUpdate>, Vec<SlotUpdate>) {
    let updates = slot_updates(&tournament.matches);
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    for update in updates {
        let Some(m) = tournament.get_match_mut(update.match_id) else {
            continue;
        };
        if m.winner.is_some() {
            skipped.push(update);
            continue;
        }
        m.pair_1 = update.pair_1;
        m.pair_2 = update.pair_2;
        applied.push(update);
    }
    (applied, skipped)
}
