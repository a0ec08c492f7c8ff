//! College eligibility clock and redshirts.
//!
//! Players enrol with three countable seasons. Each season end spends one
//! unless the player sat out as a redshirt, which is allowed once. At zero
//! the player is draft-eligible. An undrafted player returns for one final
//! countable season only if they used their redshirt and are still inside
//! the five-season window; everyone else goes to free agency.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::attributes::Position;
use crate::constants::COLLEGE_MAX_SEASONS;
use crate::error::InvariantViolation;
use crate::player::{CollegeStatus, PlayerId, PlayerStatus};
use crate::registry::Registry;
use crate::team::{TeamId, starters_at};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub advanced: usize,
    pub redshirts_completed: Vec<PlayerId>,
    pub final_years_completed: Vec<PlayerId>,
    pub draft_eligible: Vec<PlayerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndraftedReport {
    pub returning: Vec<PlayerId>,
    pub free_agents: Vec<PlayerId>,
}

/// Put a college player in a redshirt season. Returns `false` when the
/// player has no college clock or is already redshirting.
///
/// # Errors
///
/// Returns an error if the player is unknown or has used their redshirt.
pub fn start_redshirt(
    registry: &mut Registry,
    player: PlayerId,
) -> Result<bool, InvariantViolation> {
    let record = registry
        .player_mut(player)
        .ok_or(InvariantViolation::UnknownPlayer(player))?;
    let Some(status) = record.college.as_mut() else {
        return Ok(false);
    };
    if status.redshirt_used {
        return Err(InvariantViolation::RedshirtReused(player));
    }
    if status.redshirting {
        return Ok(false);
    }
    status.redshirting = true;
    Ok(true)
}

/// Redshirt first-season players who sit below the starter line at their
/// position.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn assign_redshirts(
    registry: &mut Registry,
    college_teams: &[TeamId],
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let mut chosen = Vec::new();
    for &team in college_teams {
        if registry.team(team).is_none() {
            return Err(InvariantViolation::UnknownTeam(team));
        }
        let mut depth: BTreeMap<Position, Vec<_>> = BTreeMap::new();
        for player in registry.roster(team) {
            if matches!(player.status, PlayerStatus::Active) {
                depth.entry(player.position).or_default().push(player);
            }
        }
        for (position, mut players) in depth {
            players.sort_by(|a, b| b.overall().cmp(&a.overall()).then(a.id.cmp(&b.id)));
            for player in players.into_iter().skip(starters_at(position)) {
                let fresh = player.college.is_some_and(|status| {
                    status.seasons_enrolled == 0 && !status.redshirt_used && !status.redshirting
                });
                if fresh {
                    chosen.push(player.id);
                }
            }
        }
    }
    for &player in &chosen {
        start_redshirt(registry, player)?;
    }
    debug!("{} freshmen redshirting", chosen.len());
    Ok(chosen)
}

/// The clock step for one season end.
fn tick(status: CollegeStatus, player: PlayerId) -> Result<CollegeStatus, InvariantViolation> {
    let mut next = status;
    next.seasons_enrolled = next.seasons_enrolled.saturating_add(1);
    if status.redshirting {
        next.redshirting = false;
        next.redshirt_used = true;
    } else if status.final_year {
        next.final_year = false;
    } else {
        next.eligibility_remaining = status
            .eligibility_remaining
            .checked_sub(1)
            .ok_or(InvariantViolation::EligibilityUnderflow(player))?;
    }
    Ok(next)
}

/// Run the season-end eligibility clock for every rostered college player.
/// All players are checked before any clock moves.
///
/// # Errors
///
/// Returns an error if a team is unknown or a player with no eligibility
/// left is still on a roster.
pub fn advance_eligibility(
    registry: &mut Registry,
    college_teams: &[TeamId],
) -> Result<EligibilityReport, InvariantViolation> {
    let mut staged = Vec::new();
    for &team in college_teams {
        if registry.team(team).is_none() {
            return Err(InvariantViolation::UnknownTeam(team));
        }
        for player in registry.roster(team) {
            if let Some(status) = player.college {
                staged.push((player.id, status, tick(status, player.id)?));
            }
        }
    }

    let mut report = EligibilityReport::default();
    for (id, before, after) in staged {
        if let Some(player) = registry.player_mut(id) {
            player.college = Some(after);
        }
        report.advanced += 1;
        if before.redshirting {
            report.redshirts_completed.push(id);
        }
        if before.final_year {
            report.final_years_completed.push(id);
        }
        if after.draft_eligible() {
            report.draft_eligible.push(id);
        }
    }
    Ok(report)
}

/// Decide what happens to draft-eligible players nobody picked.
///
/// # Errors
///
/// Returns an error if a player is unknown.
pub fn resolve_undrafted(
    registry: &mut Registry,
    undrafted: &[PlayerId],
) -> Result<UndraftedReport, InvariantViolation> {
    let mut report = UndraftedReport::default();
    for &id in undrafted {
        let player = registry
            .player(id)
            .ok_or(InvariantViolation::UnknownPlayer(id))?;
        if !player.is_draft_eligible() {
            continue;
        }
        let returns = player.college.is_some_and(|status| {
            status.redshirt_used && status.seasons_enrolled < COLLEGE_MAX_SEASONS
        });
        if returns {
            if let Some(status) = registry
                .player_mut(id)
                .and_then(|player| player.college.as_mut())
            {
                status.final_year = true;
            }
            report.returning.push(id);
        } else {
            registry.release(id)?;
            report.free_agents.push(id);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Tier;
    use crate::registry::fixtures;

    fn college_registry(levels: &[(Position, u8)]) -> (Registry, TeamId, Vec<PlayerId>) {
        let mut registry = Registry::new();
        let team = registry.allocate_team_id();
        registry.insert_team(fixtures::team(team, Tier::College));
        let ids = levels
            .iter()
            .map(|&(position, level)| {
                let id = registry.allocate_player_id();
                let mut player = fixtures::player(id, position, level);
                player.college = Some(CollegeStatus::incoming());
                registry.insert_player(player, Some(team)).unwrap()
            })
            .collect();
        (registry, team, ids)
    }

    fn status(registry: &Registry, id: PlayerId) -> CollegeStatus {
        registry.player(id).unwrap().college.unwrap()
    }

    #[test]
    fn clock_runs_three_seasons_then_draft_eligible() {
        let (mut registry, team, ids) = college_registry(&[(Position::QB, 60)]);
        for season in 1..=3 {
            let report = advance_eligibility(&mut registry, &[team]).unwrap();
            assert_eq!(status(&registry, ids[0]).eligibility_remaining, 3 - season);
            assert_eq!(report.draft_eligible.is_empty(), season < 3);
        }
        let err = advance_eligibility(&mut registry, &[team]).unwrap_err();
        assert_eq!(err, InvariantViolation::EligibilityUnderflow(ids[0]));
        assert_eq!(status(&registry, ids[0]).seasons_enrolled, 3, "failed tick commits nothing");
    }

    #[test]
    fn redshirt_season_does_not_count_and_is_single_use() {
        let (mut registry, team, ids) = college_registry(&[(Position::QB, 60)]);
        assert!(start_redshirt(&mut registry, ids[0]).unwrap());
        advance_eligibility(&mut registry, &[team]).unwrap();
        let after = status(&registry, ids[0]);
        assert_eq!(after.eligibility_remaining, 3);
        assert!(after.redshirt_used && !after.redshirting);
        assert_eq!(
            start_redshirt(&mut registry, ids[0]).unwrap_err(),
            InvariantViolation::RedshirtReused(ids[0])
        );
    }

    #[test]
    fn eligibility_never_increases() {
        let (mut registry, team, ids) =
            college_registry(&[(Position::QB, 60), (Position::RB, 55)]);
        start_redshirt(&mut registry, ids[1]).unwrap();
        let mut last: Vec<u8> = ids
            .iter()
            .map(|id| status(&registry, *id).eligibility_remaining)
            .collect();
        for _ in 0..3 {
            if advance_eligibility(&mut registry, &[team]).is_err() {
                break;
            }
            for (index, id) in ids.iter().enumerate() {
                let now = status(&registry, *id).eligibility_remaining;
                assert!(now <= last[index]);
                last[index] = now;
            }
        }
    }

    #[test]
    fn only_backups_in_their_first_season_redshirt() {
        let (mut registry, team, ids) = college_registry(&[
            (Position::QB, 70),
            (Position::QB, 50),
            (Position::K, 40),
        ]);
        let chosen = assign_redshirts(&mut registry, &[team]).unwrap();
        assert_eq!(chosen, vec![ids[1]]);
        assert!(registry.player(ids[1]).unwrap().is_redshirting());
    }

    #[test]
    fn undrafted_return_requires_a_used_redshirt() {
        let (mut registry, _, ids) = college_registry(&[(Position::QB, 60), (Position::RB, 60)]);
        for (id, redshirted) in [(ids[0], true), (ids[1], false)] {
            let player = registry.player_mut(id).unwrap();
            player.college = Some(CollegeStatus {
                eligibility_remaining: 0,
                seasons_enrolled: if redshirted { 4 } else { 3 },
                redshirt_used: redshirted,
                redshirting: false,
                final_year: false,
            });
        }
        let report = resolve_undrafted(&mut registry, &ids).unwrap();
        assert_eq!(report.returning, vec![ids[0]]);
        assert_eq!(report.free_agents, vec![ids[1]]);
        assert!(status(&registry, ids[0]).final_year);
        let released = registry.player(ids[1]).unwrap();
        assert_eq!(released.status, PlayerStatus::FreeAgent);
        assert_eq!(released.team, None);
        registry.verify_integrity().unwrap();
    }

    #[test]
    fn final_year_is_spent_without_touching_eligibility() {
        let (mut registry, team, ids) = college_registry(&[(Position::QB, 60)]);
        registry.player_mut(ids[0]).unwrap().college = Some(CollegeStatus {
            eligibility_remaining: 0,
            seasons_enrolled: 4,
            redshirt_used: true,
            redshirting: false,
            final_year: true,
        });
        let report = advance_eligibility(&mut registry, &[team]).unwrap();
        assert_eq!(report.final_years_completed, vec![ids[0]]);
        assert_eq!(report.draft_eligible, vec![ids[0]]);
        let undrafted = resolve_undrafted(&mut registry, &ids).unwrap();
        assert_eq!(undrafted.free_agents, vec![ids[0]], "a second return is not allowed");
    }
}
