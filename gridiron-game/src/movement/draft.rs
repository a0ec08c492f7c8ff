//! The professional draft.
//!
//! Prospects are ranked once on a board that weighs current ability,
//! projection, positional scarcity and age. Pro teams then pick in reverse
//! standings order, round after round, always taking the top remaining
//! prospect. A pick whose rookie salary no longer fits under the team's cap
//! is forfeited and recorded as a [`PolicyGap`].

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::attributes::{Position, Rating};
use crate::config::DraftPolicy;
use crate::constants::{DRAFT_BASELINE_AGE, ROOKIE_CONTRACT_YEARS};
use crate::error::{InvariantViolation, PolicyGap};
use crate::numbers::{round_f64_to_u32, u32_to_f64, usize_to_f64};
use crate::player::{Contract, PlayerId};
use crate::registry::Registry;
use crate::standings::{StandingsRow, draft_cmp};
use crate::team::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub player: PlayerId,
    pub position: Position,
    pub potential: Rating,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub round: u8,
    /// One-based pick number across all rounds.
    pub number: usize,
    pub team: TeamId,
    pub player: PlayerId,
    pub salary: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReport {
    pub picks: Vec<DraftPick>,
    pub gaps: Vec<PolicyGap>,
    /// Board prospects nobody picked, best first.
    pub undrafted: Vec<PlayerId>,
}

/// Rank prospects best first. Scarcity is `1 / n` for a position with `n`
/// prospects on the board.
///
/// # Errors
///
/// Returns an error if a prospect is not registered.
pub fn draft_board(
    registry: &Registry,
    prospects: &[PlayerId],
    policy: &DraftPolicy,
) -> Result<Vec<BoardEntry>, InvariantViolation> {
    let mut players = Vec::with_capacity(prospects.len());
    for &id in prospects {
        players.push(
            registry
                .player(id)
                .ok_or(InvariantViolation::UnknownPlayer(id))?,
        );
    }
    let mut per_position: BTreeMap<Position, usize> = BTreeMap::new();
    for player in &players {
        *per_position.entry(player.position).or_default() += 1;
    }
    let mut board: Vec<BoardEntry> = players
        .iter()
        .map(|player| {
            let scarcity = 1.0
                / usize_to_f64(per_position.get(&player.position).copied().unwrap_or(1).max(1));
            let potential = player.potential();
            let score = policy.overall_weight * player.overall().as_f64()
                + policy.potential_weight * potential.as_f64()
                + policy.scarcity_weight * scarcity
                - policy.age_weight * (f64::from(player.age) - DRAFT_BASELINE_AGE);
            BoardEntry {
                player: player.id,
                position: player.position,
                potential,
                score,
            }
        })
        .collect();
    board.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.potential.cmp(&a.potential))
            .then(a.player.cmp(&b.player))
    });
    Ok(board)
}

/// Teams worst first: fewest wins, most losses, worst point differential,
/// then id.
#[must_use]
pub fn draft_order(rows: &[StandingsRow]) -> Vec<TeamId> {
    let mut rows = rows.to_vec();
    rows.sort_by(draft_cmp);
    rows.into_iter().map(|row| row.team).collect()
}

/// Rookie salary slides linearly from the top of the scale for pick one to
/// the floor for the last pick.
#[must_use]
pub fn rookie_salary(number: usize, total_picks: usize, policy: &DraftPolicy) -> u32 {
    let top = policy.rookie_scale_top.max(policy.rookie_scale_floor);
    let floor = policy.rookie_scale_floor;
    if total_picks <= 1 {
        return top;
    }
    let slide = usize_to_f64(number.saturating_sub(1).min(total_picks - 1))
        / usize_to_f64(total_picks - 1);
    round_f64_to_u32(u32_to_f64(top) - u32_to_f64(top - floor) * slide)
}

/// Run the draft for `prospects` in `order`.
///
/// # Errors
///
/// Returns an error if a prospect or team is not registered. Teams are
/// checked before any pick is made.
pub fn run_draft(
    registry: &mut Registry,
    prospects: &[PlayerId],
    order: &[TeamId],
    policy: &DraftPolicy,
) -> Result<DraftReport, InvariantViolation> {
    if let Some(&missing) = order.iter().find(|team| registry.team(**team).is_none()) {
        return Err(InvariantViolation::UnknownTeam(missing));
    }
    let mut available = draft_board(registry, prospects, policy)?;
    available.reverse();

    let total = order.len() * usize::from(policy.rounds);
    let mut report = DraftReport::default();
    let mut number = 0;
    'rounds: for round in 1..=policy.rounds {
        for &team in order {
            if available.is_empty() {
                break 'rounds;
            }
            number += 1;
            let salary = rookie_salary(number, total, policy);
            let room = registry.cap_space(team).unwrap_or(u32::MAX);
            if room < salary {
                warn!("team {} forfeits round {round} pick {number}: {room} cap room", team.0);
                report.gaps.push(PolicyGap::PickForfeited { team, round });
                continue;
            }
            let Some(entry) = available.pop() else {
                break 'rounds;
            };
            registry.transfer(entry.player, Some(team))?;
            if let Some(player) = registry.player_mut(entry.player) {
                player.college = None;
                player.contract = Some(Contract {
                    salary,
                    years_remaining: ROOKIE_CONTRACT_YEARS,
                });
            }
            report.picks.push(DraftPick {
                round,
                number,
                team,
                player: entry.player,
                salary,
            });
        }
    }
    report.undrafted = available.iter().rev().map(|entry| entry.player).collect();
    info!(
        "draft complete: {} picks, {} forfeited, {} undrafted",
        report.picks.len(),
        report.gaps.len(),
        report.undrafted.len()
    );
    Ok(report)
}
