//! Contracts, free agency and pro roster limits.
//!
//! Free agents are courted best first. Every pro team with an open roster
//! slot and cap room bids the player's asking salary, with a premium when
//! the team is short at the player's position, capped by its cap room. The
//! player signs with the highest bid. Unsigned players stay in the pool for
//! next offseason unless they are past retirement age.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attributes::Rating;
use crate::config::{FreeAgencyPolicy, GenerationConfig};
use crate::error::{InvariantViolation, PolicyGap};
use crate::generator::{GenerationContext, generate_player};
use crate::numbers::{round_f64_to_u32, u32_to_f64};
use crate::player::{Contract, Player, PlayerId, PlayerStatus, Tier};
use crate::registry::Registry;
use crate::team::{TeamId, template_count};

use super::vacancies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signing {
    pub player: PlayerId,
    pub team: TeamId,
    pub salary: u32,
    pub years: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAgencyReport {
    pub signings: Vec<Signing>,
    pub gaps: Vec<PolicyGap>,
    pub retired: Vec<PlayerId>,
    pub held_over: Vec<PlayerId>,
}

/// What a player asks for: the league minimum plus a fixed amount per
/// overall point above 50.
#[must_use]
pub fn asking_salary(player: &Player, policy: &FreeAgencyPolicy) -> u32 {
    let above = u32::from(player.overall().value().saturating_sub(50));
    policy
        .minimum_salary
        .saturating_add(policy.salary_per_point.saturating_mul(above))
}

/// Count down every pro contract by a season and release players whose deal
/// ran out.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn expire_contracts(
    registry: &mut Registry,
    pro_teams: &[TeamId],
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let mut expired = Vec::new();
    for &team in pro_teams {
        let roster: Vec<PlayerId> = registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?
            .roster()
            .iter()
            .copied()
            .collect();
        for id in roster {
            let Some(player) = registry.player_mut(id) else {
                continue;
            };
            let done = match player.contract.as_mut() {
                Some(contract) => {
                    contract.years_remaining = contract.years_remaining.saturating_sub(1);
                    contract.years_remaining == 0
                }
                None => true,
            };
            if done {
                registry.release(id)?;
                expired.push(id);
            }
        }
    }
    debug!("{} pro contracts expired", expired.len());
    Ok(expired)
}

#[derive(Debug, Clone, Copy)]
struct Bid {
    team: TeamId,
    amount: u32,
    prestige: Rating,
}

fn best_bid(
    registry: &Registry,
    player: &Player,
    pro_teams: &[TeamId],
    policy: &FreeAgencyPolicy,
) -> Option<Bid> {
    let asking = u32_to_f64(asking_salary(player, policy));
    pro_teams
        .iter()
        .filter_map(|&team| {
            let record = registry.team(team)?;
            if record.open_slots() == 0 {
                return None;
            }
            let room = registry.cap_space(team)?;
            let short = registry.position_count(team, player.position)
                < template_count(Tier::Pro, player.position);
            let premium = if short { 1.0 + policy.need_bonus } else { 1.0 };
            let amount = round_f64_to_u32(asking * premium).min(room);
            (amount >= policy.minimum_salary).then_some(Bid {
                team,
                amount,
                prestige: record.prestige,
            })
        })
        .max_by(|a, b| {
            a.amount
                .cmp(&b.amount)
                .then(a.prestige.cmp(&b.prestige))
                .then(b.team.cmp(&a.team))
        })
}

/// Sign free agents, best first, to the highest bidder.
///
/// # Errors
///
/// Returns an error if a pooled player disappears mid-run, which would mean
/// the registry is corrupt.
pub fn run_free_agency(
    registry: &mut Registry,
    pro_teams: &[TeamId],
    policy: &FreeAgencyPolicy,
) -> Result<FreeAgencyReport, InvariantViolation> {
    let mut pool: Vec<&Player> = registry
        .players()
        .filter(|player| matches!(player.status, PlayerStatus::FreeAgent))
        .collect();
    pool.sort_by(|a, b| b.overall().cmp(&a.overall()).then(a.id.cmp(&b.id)));
    let pool: Vec<PlayerId> = pool.iter().map(|player| player.id).collect();

    let mut report = FreeAgencyReport::default();
    for id in pool {
        let player = registry
            .player(id)
            .ok_or(InvariantViolation::UnknownPlayer(id))?;
        if let Some(bid) = best_bid(registry, player, pro_teams, policy) {
            registry.transfer(id, Some(bid.team))?;
            if let Some(player) = registry.player_mut(id) {
                player.contract = Some(Contract {
                    salary: bid.amount,
                    years_remaining: policy.contract_years,
                });
            }
            report.signings.push(Signing {
                player: id,
                team: bid.team,
                salary: bid.amount,
                years: policy.contract_years,
            });
        } else if player.age >= policy.retirement_age {
            registry.retire(id)?;
            report.retired.push(id);
        } else {
            report.gaps.push(PolicyGap::Unsigned { player: id });
            report.held_over.push(id);
        }
    }
    if !report.held_over.is_empty() {
        warn!("{} free agents unsigned, held over", report.held_over.len());
    }
    debug!(
        "free agency: {} signed, {} retired",
        report.signings.len(),
        report.retired.len()
    );
    Ok(report)
}

/// Release the lowest-rated players until the roster fits its limit.
///
/// # Errors
///
/// Returns an error if the team is not registered.
pub fn trim_roster(
    registry: &mut Registry,
    team: TeamId,
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let record = registry
        .team(team)
        .ok_or(InvariantViolation::UnknownTeam(team))?;
    let excess = record.roster_len().saturating_sub(record.roster_limit());
    if excess == 0 {
        return Ok(Vec::new());
    }
    let mut roster = registry.roster(team);
    roster.sort_by(|a, b| a.overall().cmp(&b.overall()).then(b.id.cmp(&a.id)));
    let cut: Vec<PlayerId> = roster.iter().take(excess).map(|player| player.id).collect();
    for &id in &cut {
        registry.release(id)?;
    }
    Ok(cut)
}

/// Sign generated veterans at the league minimum into a pro team's
/// vacancies while the cap allows.
///
/// # Errors
///
/// Returns an error if the team is not registered.
pub fn fill_pro_roster<R: Rng + ?Sized>(
    registry: &mut Registry,
    team: TeamId,
    generation: &GenerationConfig,
    policy: &FreeAgencyPolicy,
    rng: &mut R,
) -> Result<(Vec<PlayerId>, Option<PolicyGap>), InvariantViolation> {
    let record = registry
        .team(team)
        .ok_or(InvariantViolation::UnknownTeam(team))?;
    let context = GenerationContext::professional(record.region);
    let slots = vacancies(registry, record);
    let mut added = Vec::with_capacity(slots.len());
    for position in slots {
        if registry.cap_space(team).unwrap_or(u32::MAX) < policy.minimum_salary {
            warn!("team {} has no cap room to fill {position:?}", team.0);
            return Ok((added, Some(PolicyGap::EmptyPosition { team })));
        }
        let id = registry.allocate_player_id();
        let mut player = generate_player(id, Some(position), &context, generation, rng);
        player.contract = Some(Contract {
            salary: policy.minimum_salary,
            years_remaining: policy.contract_years,
        });
        added.push(registry.insert_player(player, Some(team))?);
    }
    Ok((added, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Position;
    use crate::registry::fixtures;
    use crate::team::{Finances, roster_size};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn pro_registry(teams: usize) -> (Registry, Vec<TeamId>) {
        let mut registry = Registry::new();
        let ids = (0..teams)
            .map(|_| {
                let id = registry.allocate_team_id();
                registry.insert_team(fixtures::team(id, Tier::Pro))
            })
            .collect();
        (registry, ids)
    }

    fn free_agent(registry: &mut Registry, position: Position, level: u8, age: u8) -> PlayerId {
        let id = registry.allocate_player_id();
        let mut player = fixtures::player(id, position, level);
        player.age = age;
        registry.insert_player(player, None).unwrap();
        registry.release(id).unwrap();
        id
    }

    fn sign(registry: &mut Registry, team: TeamId, position: Position, salary: u32) -> PlayerId {
        let id = registry.allocate_player_id();
        let mut player = fixtures::player(id, position, 60);
        player.tier = Tier::Pro;
        player.contract = Some(Contract {
            salary,
            years_remaining: 1,
        });
        registry.insert_player(player, Some(team)).unwrap()
    }

    #[test]
    fn asking_salary_grows_with_overall() {
        let policy = FreeAgencyPolicy::default();
        let weak = fixtures::player(PlayerId(1), Position::QB, 30);
        let strong = fixtures::player(PlayerId(2), Position::QB, 80);
        assert_eq!(asking_salary(&weak, &policy), policy.minimum_salary);
        assert!(asking_salary(&strong, &policy) > asking_salary(&weak, &policy));
    }

    #[test]
    fn need_wins_the_bidding() {
        let (mut registry, teams) = pro_registry(2);
        for _ in 0..3 {
            sign(&mut registry, teams[0], Position::QB, 1_000);
        }
        let target = free_agent(&mut registry, Position::QB, 75, 26);
        let report = run_free_agency(&mut registry, &teams, &FreeAgencyPolicy::default()).unwrap();
        assert_eq!(report.signings.len(), 1);
        assert_eq!(report.signings[0].team, teams[1], "the team short at QB pays the premium");
        let player = registry.player(target).unwrap();
        assert_eq!(player.status, PlayerStatus::Active);
        assert_eq!(player.salary(), report.signings[0].salary);
    }

    #[test]
    fn bids_are_capped_by_cap_room() {
        let (mut registry, teams) = pro_registry(1);
        registry.team_mut(teams[0]).unwrap().finances = Finances::SalaryCap { cap: 2_000 };
        let target = free_agent(&mut registry, Position::WR, 85, 27);
        let policy = FreeAgencyPolicy::default();
        let report = run_free_agency(&mut registry, &teams, &policy).unwrap();
        assert_eq!(report.signings[0].salary, 2_000);
        assert_eq!(registry.cap_space(teams[0]), Some(0));
        assert_eq!(registry.player(target).unwrap().team, Some(teams[0]));
    }

    #[test]
    fn unsigned_veterans_retire_and_others_are_held() {
        let (mut registry, teams) = pro_registry(1);
        registry.team_mut(teams[0]).unwrap().finances = Finances::SalaryCap { cap: 100 };
        let old = free_agent(&mut registry, Position::RB, 60, 36);
        let young = free_agent(&mut registry, Position::RB, 60, 25);
        let report = run_free_agency(&mut registry, &teams, &FreeAgencyPolicy::default()).unwrap();
        assert_eq!(report.retired, vec![old]);
        assert_eq!(report.held_over, vec![young]);
        assert_eq!(report.gaps, vec![PolicyGap::Unsigned { player: young }]);
        assert_eq!(registry.player(old).unwrap().status, PlayerStatus::Retired);
        assert_eq!(registry.player(young).unwrap().status, PlayerStatus::FreeAgent);
    }

    #[test]
    fn expired_deals_return_players_to_the_pool() {
        let (mut registry, teams) = pro_registry(1);
        let expiring = sign(&mut registry, teams[0], Position::K, 900);
        let staying = sign(&mut registry, teams[0], Position::P, 900);
        registry.player_mut(staying).unwrap().contract = Some(Contract {
            salary: 900,
            years_remaining: 3,
        });
        let expired = expire_contracts(&mut registry, &teams).unwrap();
        assert_eq!(expired, vec![expiring]);
        assert_eq!(
            registry.player(staying).unwrap().contract.unwrap().years_remaining,
            2
        );
        assert_eq!(registry.player(expiring).unwrap().status, PlayerStatus::FreeAgent);
        registry.verify_integrity().unwrap();
    }

    #[test]
    fn trim_cuts_the_weakest_down_to_the_limit() {
        let (mut registry, teams) = pro_registry(1);
        let limit = roster_size(Tier::Pro);
        let mut ids = Vec::new();
        for i in 0..limit + 2 {
            let id = registry.allocate_player_id();
            let level = 50 + u8::try_from(i % 40).unwrap();
            let player = fixtures::player(id, Position::ALL[i % 20], level);
            ids.push(registry.insert_player(player, Some(teams[0])).unwrap());
        }
        let cut = trim_roster(&mut registry, teams[0]).unwrap();
        assert_eq!(cut.len(), 2);
        assert_eq!(registry.team(teams[0]).unwrap().roster_len(), limit);
        let kept_floor = registry
            .roster(teams[0])
            .iter()
            .map(|player| player.overall())
            .min()
            .unwrap();
        for id in cut {
            assert!(registry.player(id).unwrap().overall() <= kept_floor);
        }
    }

    #[test]
    fn pro_fill_stops_when_the_cap_runs_out() {
        let (mut registry, teams) = pro_registry(1);
        let policy = FreeAgencyPolicy::default();
        registry.team_mut(teams[0]).unwrap().finances = Finances::SalaryCap {
            cap: policy.minimum_salary * 5,
        };
        let (added, gap) = fill_pro_roster(
            &mut registry,
            teams[0],
            &GenerationConfig::default(),
            &policy,
            &mut SmallRng::seed_from_u64(6),
        )
        .unwrap();
        assert_eq!(added.len(), 5);
        assert_eq!(gap, Some(PolicyGap::EmptyPosition { team: teams[0] }));
        assert!(
            registry
                .roster(teams[0])
                .iter()
                .all(|player| player.tier == Tier::Pro && player.contract.is_some())
        );
    }
}
