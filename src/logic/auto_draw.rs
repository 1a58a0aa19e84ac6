//! Auto-draw: assign the eligible pool to position slots across all matches.
//!
//! 1. Shuffle the pool (auto-draw is meant to be re-rollable, so the RNG is
//!    injected and production callers pass `thread_rng`).
//! 2. Walk matches in order; each match draws the next `layout.capacity()`
//!    players from the pool.
//! 3. Within one match, sort the drawn chunk by skill (descending) and deal
//!    across the two sides in snake order (A B B A ...), so the sides' mean
//!    skill stays close regardless of the shuffle.

use crate::models::{CourtLayout, CourtMatch, DrawError, EligiblePlayer, EventDraw, TeamSide};
use crate::models::MatchPlayer;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Run a full re-draw on the event's matches: exclude reserves, verify the
/// pool is non-empty, clear all assignments and install the engine's output.
/// The previous state is replaced atomically only on success.
pub fn run_auto_draw(
    draw: &mut EventDraw,
    pool: &[EligiblePlayer],
    layout: &CourtLayout,
    rng: &mut impl Rng,
) -> Result<(), DrawError> {
    let active: Vec<EligiblePlayer> = pool.iter().filter(|p| !p.is_reserve).cloned().collect();
    if active.is_empty() {
        return Err(DrawError::NoEligiblePlayers);
    }
    let mut matches = draw.matches.clone();
    for m in &mut matches {
        m.clear_players();
    }
    draw.matches = generate_auto_matches(&active, matches, layout, rng);
    Ok(())
}

/// Produce a new assignment of `players` into `matches` (handed in with
/// cleared team arrays). Match identities are unchanged; each player is
/// consumed at most once; matches beyond the pool stay empty. Never fails:
/// an empty pool or empty match list passes through.
pub fn generate_auto_matches(
    players: &[EligiblePlayer],
    mut matches: Vec<CourtMatch>,
    layout: &CourtLayout,
    rng: &mut impl Rng,
) -> Vec<CourtMatch> {
    if players.is_empty() || matches.is_empty() {
        return matches;
    }

    let mut seen = HashSet::new();
    let mut pool: Vec<&EligiblePlayer> = players
        .iter()
        .filter(|p| seen.insert(p.member_id))
        .collect();
    pool.shuffle(rng);

    let mut remaining = pool.into_iter();
    for m in &mut matches {
        let drawn: Vec<&EligiblePlayer> = remaining.by_ref().take(layout.capacity()).collect();
        if drawn.is_empty() {
            break;
        }
        fill_match(m, drawn, layout);
    }
    matches
}

/// Place one match's drawn chunk into its slots: skill-sorted descending
/// (stable, so ties keep shuffle order), dealt to sides in snake order, each
/// side's slots filled in layout declaration order.
fn fill_match(m: &mut CourtMatch, mut drawn: Vec<&EligiblePlayer>, layout: &CourtLayout) {
    drawn.sort_by(|a, b| skill_or_zero(b).total_cmp(&skill_or_zero(a)));

    let slots_a = layout.side_slots(TeamSide::A);
    let slots_b = layout.side_slots(TeamSide::B);
    let mut next_a = 0;
    let mut next_b = 0;

    for (i, player) in drawn.into_iter().enumerate() {
        let side = pick_side(snake_side(i), next_a < slots_a.len(), next_b < slots_b.len());
        match side {
            Some(TeamSide::A) => {
                let slot = slots_a[next_a];
                next_a += 1;
                m.team_a_players
                    .push(MatchPlayer::from_eligible(player, TeamSide::A, &slot.id));
            }
            Some(TeamSide::B) => {
                let slot = slots_b[next_b];
                next_b += 1;
                m.team_b_players
                    .push(MatchPlayer::from_eligible(player, TeamSide::B, &slot.id));
            }
            None => break,
        }
    }
}

/// Snake dealing order over the skill-sorted chunk: A B B A A B B A ...
fn snake_side(i: usize) -> TeamSide {
    match i % 4 {
        0 | 3 => TeamSide::A,
        _ => TeamSide::B,
    }
}

/// Preferred side if it still has free slots, otherwise the other side.
fn pick_side(prefer: TeamSide, a_free: bool, b_free: bool) -> Option<TeamSide> {
    let free = |s: TeamSide| match s {
        TeamSide::A => a_free,
        TeamSide::B => b_free,
    };
    if free(prefer) {
        Some(prefer)
    } else if free(prefer.other()) {
        Some(prefer.other())
    } else {
        None
    }
}

/// Skill used for balancing: unparseable or missing labels count as 0.
fn skill_or_zero(p: &EligiblePlayer) -> f64 {
    p.skill_value().unwrap_or(0.0)
}
