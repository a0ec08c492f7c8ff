//! High-school intake and college recruiting.
//!
//! Recruiting is deterministic. College teams make scholarship offers in
//! rounds, highest prestige first, each to the best uncommitted seniors by
//! potential. At the end of a round every senior holding offers commits to the
//! one with the highest interest score. Seniors nobody offered follow the
//! configured [`UnrecruitedPolicy`].

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attributes::{Position, Rating};
use crate::config::{GenerationConfig, RecruitingPolicy, UnrecruitedPolicy};
use crate::constants::{COLLEGE_MAX_SEASONS, HIGH_SCHOOL_FRESHMEN_PER_TEAM};
use crate::error::{InvariantViolation, PolicyGap};
use crate::generator::{GenerationContext, Intake, generate_class};
use crate::numbers::usize_to_f64;
use crate::player::{CollegeStatus, Player, PlayerId, Region, Tier};
use crate::registry::Registry;
use crate::team::{TeamId, missing_slots, roster_size, roster_template, template_count};

/// A senior's signed scholarship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub player: PlayerId,
    pub team: TeamId,
    pub round: u8,
    pub interest: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecruitingReport {
    pub commitments: Vec<Commitment>,
    pub gaps: Vec<PolicyGap>,
    pub retired: Vec<PlayerId>,
    /// Unrecruited seniors held for college walk-on slots.
    pub walk_on_pool: Vec<PlayerId>,
}

impl RecruitingReport {
    #[must_use]
    pub fn committed_to(&self, team: TeamId) -> usize {
        self.commitments.iter().filter(|c| c.team == team).count()
    }
}

/// A recruit's interest in one college.
///
/// Every component is on `[0, 1]`, so with weights summing to one the score
/// is on `[0, 1]` as well.
#[must_use]
pub fn interest(
    home: Region,
    college: Region,
    prestige: Rating,
    playing_time: f64,
    persuasion: Rating,
    policy: &RecruitingPolicy,
) -> f64 {
    policy.proximity_weight * home.proximity(college)
        + policy.prestige_weight * prestige.fraction()
        + policy.playing_time_weight * playing_time.clamp(0.0, 1.0)
        + policy.persuasion_weight * persuasion.fraction()
}

/// Overall ratings of the players a college keeps next season, by position,
/// best first.
#[derive(Debug, Clone)]
struct DepthChart {
    by_position: BTreeMap<Position, Vec<Rating>>,
}

impl DepthChart {
    fn staying(registry: &Registry, team: TeamId) -> Self {
        let mut by_position: BTreeMap<Position, Vec<Rating>> = BTreeMap::new();
        for player in registry.roster(team) {
            if leaves_after_season(player) {
                continue;
            }
            by_position
                .entry(player.position)
                .or_default()
                .push(player.overall());
        }
        for ratings in by_position.values_mut() {
            ratings.sort_by(|a, b| b.cmp(a));
        }
        Self { by_position }
    }

    fn len(&self) -> usize {
        self.by_position.values().map(Vec::len).sum()
    }

    /// `1.0` for a clear starter, falling to `0.0` once the recruit would sit
    /// below every rostered slot at the position.
    fn playing_time(&self, position: Position, overall: Rating) -> f64 {
        let ahead = self
            .by_position
            .get(&position)
            .map_or(0, |ratings| ratings.iter().filter(|r| **r >= overall).count());
        let places = template_count(Tier::College, position).max(1);
        (1.0 - usize_to_f64(ahead) / usize_to_f64(places)).clamp(0.0, 1.0)
    }
}

/// Draft-eligible players who can not come back for a final year.
fn leaves_after_season(player: &Player) -> bool {
    player.is_draft_eligible()
        && player.college.is_some_and(|status| {
            !status.redshirt_used || status.seasons_enrolled >= COLLEGE_MAX_SEASONS
        })
}

#[derive(Debug, Clone)]
struct Suitor {
    team: TeamId,
    region: Region,
    prestige: Rating,
    persuasion: Rating,
    slots: usize,
    depth: DepthChart,
    offered: BTreeSet<PlayerId>,
}

#[derive(Debug, Clone, Copy)]
struct Recruit {
    id: PlayerId,
    region: Region,
    position: Position,
    overall: Rating,
    potential: Rating,
}

/// Scholarship slots a college can fill this offseason.
#[must_use]
pub fn recruiting_slots(registry: &Registry, team: TeamId) -> usize {
    registry.team(team).map_or(0, |record| {
        let staying = DepthChart::staying(registry, team).len();
        usize::from(record.scholarships_remaining)
            .min(record.roster_limit().saturating_sub(staying))
    })
}

/// Run one recruiting cycle for `seniors` across `college_teams`.
///
/// `persuasion` supplies each college's manager persuasion grade.
///
/// # Errors
///
/// Returns an error if a senior or college is not registered. Nothing is
/// moved in that case.
pub fn run_recruiting(
    registry: &mut Registry,
    seniors: &[PlayerId],
    college_teams: &[TeamId],
    persuasion: impl Fn(TeamId) -> Rating,
    policy: &RecruitingPolicy,
) -> Result<RecruitingReport, InvariantViolation> {
    let mut board = Vec::with_capacity(seniors.len());
    for &id in seniors {
        let player = registry
            .player(id)
            .ok_or(InvariantViolation::UnknownPlayer(id))?;
        board.push(Recruit {
            id,
            region: player.region,
            position: player.position,
            overall: player.overall(),
            potential: player.potential(),
        });
    }
    board.sort_by(|a, b| b.potential.cmp(&a.potential).then(a.id.cmp(&b.id)));

    let mut suitors = Vec::with_capacity(college_teams.len());
    for &team in college_teams {
        let record = registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?;
        suitors.push(Suitor {
            team,
            region: record.region,
            prestige: record.prestige,
            persuasion: persuasion(team),
            slots: recruiting_slots(registry, team),
            depth: DepthChart::staying(registry, team),
            offered: BTreeSet::new(),
        });
    }
    suitors.sort_by(|a, b| b.prestige.cmp(&a.prestige).then(a.team.cmp(&b.team)));

    let max_offers = usize::from(policy.max_offers_per_recruit);
    let mut committed: BTreeMap<PlayerId, Commitment> = BTreeMap::new();
    let mut ever_offered: BTreeSet<PlayerId> = BTreeSet::new();
    for round in 1..=policy.rounds {
        let mut offers: BTreeMap<PlayerId, Vec<usize>> = BTreeMap::new();
        for (index, suitor) in suitors.iter_mut().enumerate() {
            let mut made = 0;
            for recruit in &board {
                if made >= suitor.slots {
                    break;
                }
                if committed.contains_key(&recruit.id) || suitor.offered.contains(&recruit.id) {
                    continue;
                }
                let holding = offers.entry(recruit.id).or_default();
                if holding.len() >= max_offers {
                    continue;
                }
                holding.push(index);
                suitor.offered.insert(recruit.id);
                ever_offered.insert(recruit.id);
                made += 1;
            }
        }
        offers.retain(|_, holding| !holding.is_empty());
        if offers.is_empty() {
            break;
        }

        for recruit in &board {
            let Some(holding) = offers.get(&recruit.id) else {
                continue;
            };
            let choice = holding
                .iter()
                .map(|&index| {
                    let suitor = &suitors[index];
                    let score = interest(
                        recruit.region,
                        suitor.region,
                        suitor.prestige,
                        suitor.depth.playing_time(recruit.position, recruit.overall),
                        suitor.persuasion,
                        policy,
                    );
                    (index, score)
                })
                .max_by(|(a, a_score), (b, b_score)| {
                    a_score
                        .total_cmp(b_score)
                        .then(suitors[*a].prestige.cmp(&suitors[*b].prestige))
                        .then(suitors[*b].team.cmp(&suitors[*a].team))
                });
            if let Some((index, score)) = choice {
                let suitor = &mut suitors[index];
                suitor.slots = suitor.slots.saturating_sub(1);
                suitor
                    .depth
                    .by_position
                    .entry(recruit.position)
                    .or_default()
                    .push(recruit.overall);
                committed.insert(
                    recruit.id,
                    Commitment {
                        player: recruit.id,
                        team: suitor.team,
                        round,
                        interest: score,
                    },
                );
            }
        }
        debug!(
            "recruiting round {round}: {} commitments so far",
            committed.len()
        );
    }

    let mut report = RecruitingReport::default();
    for recruit in &board {
        if let Some(commitment) = committed.get(&recruit.id) {
            registry.transfer(recruit.id, Some(commitment.team))?;
            if let Some(player) = registry.player_mut(recruit.id) {
                enroll(player);
            }
            if let Some(team) = registry.team_mut(commitment.team) {
                team.scholarships_remaining = team.scholarships_remaining.saturating_sub(1);
            }
            report.commitments.push(*commitment);
            continue;
        }
        if !ever_offered.contains(&recruit.id) {
            report.gaps.push(PolicyGap::NoOffers { player: recruit.id });
        }
        match policy.unrecruited {
            UnrecruitedPolicy::Retire => {
                registry.retire(recruit.id)?;
                report.retired.push(recruit.id);
            }
            UnrecruitedPolicy::WalkOnPool => {
                registry.transfer(recruit.id, None)?;
                if let Some(player) = registry.player_mut(recruit.id) {
                    player.tier = Tier::College;
                    enroll(player);
                }
                report.walk_on_pool.push(recruit.id);
            }
        }
    }
    if !report.gaps.is_empty() {
        warn!(
            "{} seniors finished recruiting without an offer ({:?})",
            report.gaps.len(),
            policy.unrecruited
        );
    }
    Ok(report)
}

fn enroll(player: &mut Player) {
    player.class_year = 1;
    player.college = Some(CollegeStatus::incoming());
}

/// Positions for a high-school team's incoming class: shortfalls left by
/// departing seniors first, then the template in order. The class never
/// outgrows the room left once the seniors are gone.
fn freshman_slots(registry: &Registry, team: TeamId, tier: Tier) -> Vec<Position> {
    let roster = registry.roster(team);
    let staying = roster.iter().filter(|p| !p.is_high_school_senior()).count();
    let class_size = HIGH_SCHOOL_FRESHMEN_PER_TEAM.min(roster_size(tier).saturating_sub(staying));
    let mut slots = missing_slots(tier, |position| {
        roster
            .iter()
            .filter(|p| p.position == position && !p.is_high_school_senior())
            .count()
    });
    slots.truncate(class_size);
    let template = roster_template(tier);
    let mut cursor = 0;
    while slots.len() < class_size && !template.is_empty() {
        slots.push(template[cursor % template.len()].0);
        cursor += 1;
    }
    slots
}

/// Add an incoming freshman class to every high-school team.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn run_freshman_intake<R: Rng + ?Sized>(
    registry: &mut Registry,
    high_school_teams: &[TeamId],
    scouting: impl Fn(TeamId) -> Rating,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let mut added = Vec::new();
    for &team in high_school_teams {
        let record = registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?;
        let context = GenerationContext::high_school(
            record.region,
            Intake::Freshman,
            scouting(team),
            record.facility,
        );
        let slots = freshman_slots(registry, team, record.tier);
        let class = generate_class(
            &mut || registry.allocate_player_id(),
            &slots,
            &context,
            config,
            rng,
        );
        for player in class {
            added.push(registry.insert_player(player, Some(team))?);
        }
    }
    debug!("freshman intake added {} players", added.len());
    Ok(added)
}
