//! Integration tests for cumulative aggregation: point folds, medal tallies,
//! overrides and the bounded overall score.

use padel_club_web::{
    recompute_cumulative, Category, CumulativeRanking, Pair, Player, PlayerId, PointValue,
    Tournament, TournamentRanking,
};
use uuid::Uuid;

/// A tournament with one ranked pair at the given placement, scored from the
/// category table. Enough structure for aggregation, which only reads pairs
/// and ranking rows.
fn tournament_with_placement(
    category: Category,
    player_1: PlayerId,
    player_2: PlayerId,
    placement: u8,
) -> Tournament {
    let mut t = Tournament::new("Past event", Some(category));
    let pair = Pair::new(t.id, player_1, player_2, 1);
    t.rankings.push(TournamentRanking {
        tournament_id: t.id,
        pair_id: pair.id,
        placement,
        points: PointValue::Computed(category.points_for(placement)),
    });
    t.pairs.push(pair);
    t
}

#[test]
fn points_fold_across_tournaments() {
    let player = Player::new("Ana");
    let partner_a = Uuid::new_v4();
    let partner_b = Uuid::new_v4();

    // 1st in a master_1000 (1000) plus 3rd in a grand_slam (400).
    let t1 = tournament_with_placement(Category::Master1000, player.id, partner_a, 1);
    let t2 = tournament_with_placement(Category::GrandSlam, player.id, partner_b, 3);

    let rows = recompute_cumulative(&[player.clone()], &[t1, t2], &[]);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.points, PointValue::Computed(1400));
    assert_eq!(row.gold, 1);
    assert_eq!(row.silver, 0);
    assert_eq!(row.bronze, 1);
    assert_eq!(row.wooden_spoons, 0);
}

#[test]
fn wooden_spoon_counts_placement_8() {
    let player = Player::new("Bea");
    let t = tournament_with_placement(Category::Master1000, player.id, Uuid::new_v4(), 8);
    let rows = recompute_cumulative(&[player], &[t], &[]);
    assert_eq!(rows[0].wooden_spoons, 1);
    assert_eq!(rows[0].points, PointValue::Computed(10));
}

#[test]
fn players_without_results_get_a_zero_row() {
    let player = Player::new("Carla");
    let rows = recompute_cumulative(&[player], &[], &[]);
    assert_eq!(rows[0].points, PointValue::Computed(0));
    assert_eq!(rows[0].gold + rows[0].silver + rows[0].bronze + rows[0].wooden_spoons, 0);
}

#[test]
fn overridden_rows_survive_recomputation() {
    let player = Player::new("Dani");
    let t = tournament_with_placement(Category::Master1000, player.id, Uuid::new_v4(), 1);

    let mut pinned = CumulativeRanking::empty(player.id);
    pinned.points = PointValue::Overridden(9999);
    pinned.gold = 7;

    let rows = recompute_cumulative(&[player], &[t], &[pinned.clone()]);
    assert_eq!(rows[0], pinned);
}

#[test]
fn mvp_titles_carry_across_recomputes() {
    let player = Player::new("Eva");
    let t = tournament_with_placement(Category::GrandSlam, player.id, Uuid::new_v4(), 2);

    let mut existing = CumulativeRanking::empty(player.id);
    existing.mvp_titles = 3;

    let rows = recompute_cumulative(&[player], &[t], &[existing]);
    assert_eq!(rows[0].mvp_titles, 3);
    assert_eq!(rows[0].points, PointValue::Computed(1000));
    assert_eq!(rows[0].silver, 1);
}

#[test]
fn recompute_is_idempotent() {
    let player = Player::new("Flor");
    let t = tournament_with_placement(Category::Master1000, player.id, Uuid::new_v4(), 1);
    let players = [player];
    let tournaments = [t];

    let once = recompute_cumulative(&players, &tournaments, &[]);
    let twice = recompute_cumulative(&players, &tournaments, &once);
    assert_eq!(once, twice);
}

#[test]
fn overall_score_clamps_at_both_bounds() {
    let mut p = Player::new("Gol");
    p.apply_overall_delta(1000);
    assert_eq!(p.overall_score, 100);
    p.apply_overall_delta(-1000);
    assert_eq!(p.overall_score, 0);
    p.apply_overall_delta(-5);
    assert_eq!(p.overall_score, 0);
}
