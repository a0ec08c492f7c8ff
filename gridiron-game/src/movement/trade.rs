//! Player-for-player trades between two teams of the same tier.
//!
//! A proposal is checked in full before anything moves. Once valid, both
//! groups change hands in one registry call, so a traded player is always on
//! exactly one of the two rosters.

use std::collections::BTreeSet;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::InvariantViolation;
use crate::player::{PlayerId, Tier};
use crate::registry::Registry;
use crate::team::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub from: TeamId,
    pub to: TeamId,
    /// Players leaving `from` for `to`.
    pub send: Vec<PlayerId>,
    /// Players leaving `to` for `from`.
    pub receive: Vec<PlayerId>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeError {
    #[error("a team cannot trade with itself ({0:?})")]
    SameTeam(TeamId),
    #[error("trade moves no players")]
    Empty,
    #[error("team {0:?} is not registered")]
    UnknownTeam(TeamId),
    #[error("player {0:?} is not registered")]
    UnknownPlayer(PlayerId),
    #[error("player {player:?} is not on the roster of {team:?}")]
    NotOnRoster { player: PlayerId, team: TeamId },
    #[error("player {0:?} is listed more than once")]
    DuplicatePlayer(PlayerId),
    #[error("teams play in different tiers ({from:?} and {to:?})")]
    TierMismatch { from: Tier, to: Tier },
    #[error("team {team:?} would carry {size} players, above its limit of {limit}")]
    RosterLimit {
        team: TeamId,
        size: usize,
        limit: usize,
    },
    #[error("team {team:?} payroll {payroll} would exceed its cap of {cap}")]
    CapExceeded { team: TeamId, payroll: u32, cap: u32 },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Payroll on both sides after a completed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub proposal: TradeProposal,
    pub from_payroll: u32,
    pub to_payroll: u32,
}

fn group_salary(registry: &Registry, players: &[PlayerId]) -> u32 {
    players
        .iter()
        .filter_map(|id| registry.player(*id))
        .fold(0_u32, |acc, player| acc.saturating_add(player.salary()))
}

fn check_side(
    registry: &Registry,
    team: TeamId,
    outgoing: &[PlayerId],
    incoming: &[PlayerId],
) -> Result<(), TradeError> {
    let record = registry.team(team).ok_or(TradeError::UnknownTeam(team))?;
    for &player in outgoing {
        if registry.player(player).is_none() {
            return Err(TradeError::UnknownPlayer(player));
        }
        if !record.roster().contains(&player) {
            return Err(TradeError::NotOnRoster { player, team });
        }
    }
    let size = (record.roster_len() + incoming.len()).saturating_sub(outgoing.len());
    if size > record.roster_limit() {
        return Err(TradeError::RosterLimit {
            team,
            size,
            limit: record.roster_limit(),
        });
    }
    if let Some(cap) = record.salary_cap() {
        let payroll = registry
            .payroll(team)
            .saturating_sub(group_salary(registry, outgoing))
            .saturating_add(group_salary(registry, incoming));
        // A trade that lowers an over-cap payroll is still allowed.
        if payroll > cap && payroll > registry.payroll(team) {
            return Err(TradeError::CapExceeded { team, payroll, cap });
        }
    }
    Ok(())
}

/// Check a proposal against rosters, roster limits and salary caps without
/// changing anything.
///
/// # Errors
///
/// Returns the first rule the proposal breaks.
pub fn validate_trade(registry: &Registry, proposal: &TradeProposal) -> Result<(), TradeError> {
    if proposal.from == proposal.to {
        return Err(TradeError::SameTeam(proposal.from));
    }
    if proposal.send.is_empty() && proposal.receive.is_empty() {
        return Err(TradeError::Empty);
    }
    let from = registry
        .team(proposal.from)
        .ok_or(TradeError::UnknownTeam(proposal.from))?;
    let to = registry
        .team(proposal.to)
        .ok_or(TradeError::UnknownTeam(proposal.to))?;
    if from.tier != to.tier {
        return Err(TradeError::TierMismatch {
            from: from.tier,
            to: to.tier,
        });
    }
    let mut seen = BTreeSet::new();
    for &player in proposal.send.iter().chain(&proposal.receive) {
        if !seen.insert(player) {
            return Err(TradeError::DuplicatePlayer(player));
        }
    }
    check_side(registry, proposal.from, &proposal.send, &proposal.receive)?;
    check_side(registry, proposal.to, &proposal.receive, &proposal.send)?;
    Ok(())
}

/// Validate and apply a trade. Nothing changes unless every check passes.
///
/// # Errors
///
/// Returns a [`TradeError`] describing the first failed check.
pub fn execute_trade(
    registry: &mut Registry,
    proposal: TradeProposal,
) -> Result<TradeOutcome, TradeError> {
    validate_trade(registry, &proposal)?;
    registry.swap_groups(proposal.from, &proposal.send, proposal.to, &proposal.receive)?;
    let outcome = TradeOutcome {
        from_payroll: registry.payroll(proposal.from),
        to_payroll: registry.payroll(proposal.to),
        proposal,
    };
    info!(
        "trade: team {} sent {} player(s) to team {} for {}",
        outcome.proposal.from.0,
        outcome.proposal.send.len(),
        outcome.proposal.to.0,
        outcome.proposal.receive.len()
    );
    Ok(outcome)
}
