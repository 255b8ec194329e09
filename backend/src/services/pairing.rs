//! Pairing Engine
//!
//! This module builds the full round schedule for an Americano tournament.
//! For a roster of N players (N ≥ 4, N divisible by 4, N ≤ 24) it produces
//! N−1 rounds of N/4 matches such that:
//! - every player appears in exactly one match per round
//! - every pair of players partners exactly once across the schedule
//! - every pair of players faces each other at least once
//!
//! ## Algorithm
//!
//! 1. Label the roster 0..N−1 in input order and build N−1 perfect
//!    matchings of the complete graph with the circle method: player 0
//!    stays fixed while the remaining N−1 rotate one position per round.
//!    Together the matchings cover every possible partnership exactly once.
//! 2. Each matching yields N/2 partnerships; a round needs N/4 matches,
//!    each a pair of disjoint partnerships. Enumerate all ways to pair the
//!    partnerships up and keep the first one (in generation order) that
//!    introduces the most opposition pairs not seen in earlier rounds,
//!    stopping early when no candidate can do better.
//! 3. Translate indices back to player ids.
//!
//! The whole computation is index-driven and allocation-order free, so a
//! fixed input ordering always produces an identical schedule.

use crate::error::{AppError, Result};
use tracing::instrument;
use uuid::Uuid;

/// Largest roster the format supports.
pub const MAX_PLAYERS: usize = 24;
pub const MIN_PLAYERS: usize = 4;

/// One planned match: the partnership `team1` versus the partnership
/// `team2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMatch {
    pub team1: (Uuid, Uuid),
    pub team2: (Uuid, Uuid),
}

impl PlannedMatch {
    pub fn player_ids(&self) -> [Uuid; 4] {
        [self.team1.0, self.team1.1, self.team2.0, self.team2.1]
    }
}

/// A full round: every roster player appears in exactly one entry.
pub type PlannedRound = Vec<PlannedMatch>;

/// Number of rounds a schedule for `num_players` has.
pub const fn rounds_for(num_players: usize) -> usize {
    num_players.saturating_sub(1)
}

pub const fn matches_per_round(num_players: usize) -> usize {
    num_players / 4
}

pub const fn total_matches(num_players: usize) -> usize {
    rounds_for(num_players) * matches_per_round(num_players)
}

fn validate_roster(player_ids: &[Uuid]) -> Result<()> {
    let n = player_ids.len();

    if n < MIN_PLAYERS || n % 4 != 0 {
        return Err(AppError::InvalidRoster(format!(
            "Americano needs at least {MIN_PLAYERS} players and a multiple of 4, got {n}"
        )));
    }

    if n > MAX_PLAYERS {
        return Err(AppError::InvalidRoster(format!(
            "Americano supports at most {MAX_PLAYERS} players, got {n}"
        )));
    }

    for (i, id) in player_ids.iter().enumerate() {
        if player_ids[..i].contains(id) {
            return Err(AppError::InvalidRoster(format!(
                "Duplicate player {id} in roster"
            )));
        }
    }

    Ok(())
}

/// Generates the complete round schedule for the given roster.
///
/// The output is deterministic for a fixed input ordering: repeated calls
/// return identical schedules.
///
/// # Arguments
///
/// * `player_ids` - Ordered roster of distinct player ids
///
/// # Returns
///
/// `rounds_for(N)` rounds of `N / 4` matches each
///
/// # Errors
///
/// Returns `InvalidRoster` if the roster size is below 4, above
/// [`MAX_PLAYERS`], not divisible by 4, or contains duplicates
#[instrument(level = "info", skip(player_ids), fields(num_players = player_ids.len()))]
pub fn generate_schedule(player_ids: &[Uuid]) -> Result<Vec<PlannedRound>> {
    validate_roster(player_ids)?;

    let n = player_ids.len();
    let matchings = one_factorisation(n);

    // opposed[u][v] marks pairs that have already met across the net.
    let mut opposed = vec![vec![false; n]; n];
    let mut rounds = Vec::with_capacity(matchings.len());

    for partnerships in matchings {
        let pairing = best_edge_pairing(&partnerships, &opposed);

        for &((a, b), (c, d)) in &pairing {
            for u in [a, b] {
                for v in [c, d] {
                    opposed[u][v] = true;
                    opposed[v][u] = true;
                }
            }
        }

        let round: PlannedRound = pairing
            .into_iter()
            .map(|((a, b), (c, d))| PlannedMatch {
                team1: (player_ids[a], player_ids[b]),
                team2: (player_ids[c], player_ids[d]),
            })
            .collect();
        rounds.push(round);
    }

    Ok(rounds)
}

type Edge = (usize, usize);

/// Circle-method one-factorisation of the complete graph on `n` vertices:
/// vertex 0 is fixed, the tail rotates right once per iteration. The
/// resulting `n - 1` matchings cover every edge exactly once.
fn one_factorisation(n: usize) -> Vec<Vec<Edge>> {
    let mut arrangement: Vec<usize> = (0..n).collect();
    let mut matchings = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let matching: Vec<Edge> = (0..n / 2)
            .map(|i| (arrangement[i], arrangement[n - 1 - i]))
            .collect();
        matchings.push(matching);

        let last = arrangement[n - 1];
        for i in (2..n).rev() {
            arrangement[i] = arrangement[i - 1];
        }
        arrangement[1] = last;
    }

    matchings
}

/// Pairs the round's partnerships into matches, maximising the number of
/// opposition pairs that have not met in earlier rounds. Ties resolve to
/// the first candidate in generation order; the search stops as soon as no
/// remaining candidate can beat the best one found.
fn best_edge_pairing(edges: &[Edge], opposed: &[Vec<bool>]) -> Vec<(Edge, Edge)> {
    let num_matches = edges.len() / 2;

    // A partition cannot introduce more new pairs than it has opposition
    // slots, nor more than are still uncovered among these players.
    let uncovered: usize = edges
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .map(|u| {
            edges
                .iter()
                .flat_map(|&(a, b)| [a, b])
                .filter(|&v| v > u && !opposed[u][v])
                .count()
        })
        .sum();
    let target = (4 * num_matches).min(uncovered);

    let mut best: Option<Vec<(Edge, Edge)>> = None;
    let mut best_gain = -1i64;

    let mut current = Vec::with_capacity(num_matches);
    search_pairings(
        edges,
        &mut vec![false; edges.len()],
        &mut current,
        0,
        opposed,
        target as i64,
        &mut best_gain,
        &mut best,
    );

    best.expect("at least one pairing exists for an even number of edges")
}

fn new_oppositions(first: Edge, second: Edge, opposed: &[Vec<bool>]) -> i64 {
    let mut gain = 0;
    for u in [first.0, first.1] {
        for v in [second.0, second.1] {
            if !opposed[u][v] {
                gain += 1;
            }
        }
    }
    gain
}

#[allow(clippy::too_many_arguments)]
fn search_pairings(
    edges: &[Edge],
    used: &mut Vec<bool>,
    current: &mut Vec<(Edge, Edge)>,
    gain_so_far: i64,
    opposed: &[Vec<bool>],
    target: i64,
    best_gain: &mut i64,
    best: &mut Option<Vec<(Edge, Edge)>>,
) -> bool {
    if *best_gain >= target {
        return true;
    }

    let Some(anchor) = (0..edges.len()).find(|&i| !used[i]) else {
        if gain_so_far > *best_gain {
            *best_gain = gain_so_far;
            *best = Some(current.clone());
        }
        return *best_gain >= target;
    };

    // Remaining matches can add at most 4 new pairs each.
    let remaining = (edges.len() - current.len() * 2) / 2;
    if gain_so_far + 4 * remaining as i64 <= *best_gain {
        return false;
    }

    used[anchor] = true;
    for partner in anchor + 1..edges.len() {
        if used[partner] {
            continue;
        }
        used[partner] = true;
        current.push((edges[anchor], edges[partner]));
        let gain = new_oppositions(edges[anchor], edges[partner], opposed);

        let done = search_pairings(
            edges,
            used,
            current,
            gain_so_far + gain,
            opposed,
            target,
            best_gain,
            best,
        );

        current.pop();
        used[partner] = false;
        if done {
            used[anchor] = false;
            return true;
        }
    }
    used[anchor] = false;
    false
}
