//! End-of-season economy and offseason player growth.
//!
//! Managers are judged against the place their team was expected to finish,
//! which is its preseason prestige rank inside the division. Beating that
//! place earns renown and skill points; missing it costs renown at a lower
//! rate, and a good finish pays a little on its own, so steady competent
//! play trends upward over a career.
//!
//! Players grow in two ways. Every week of the season each team practices
//! under its [`PracticeFocus`], which trains only the attributes its drills
//! name. Each offseason, unlocking may lift attribute ceilings toward the
//! player's hidden ceiling, then a number of growth passes at a higher rate
//! move current values toward their ceilings. High-school teams also hold a
//! training camp in the offseason.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Rating};
use crate::config::ProgressionConfig;
use crate::constants::{
    AGING_DECLINE_MAX, COLLEGE_RENOWN_MULTIPLIER, DEVELOPMENT_BASE_RATE, FACILITY_FACTOR_BASE,
    FACILITY_FACTOR_SLOPE, HIGH_SCHOOL_RENOWN_MULTIPLIER, MANAGER_FACTOR_BASE,
    MANAGER_FACTOR_SLOPE, PRO_RENOWN_MULTIPLIER, RENOWN_FINISH_BONUS, TEAM_PRESTIGE_DRIFT,
    UNLOCK_STEP_MAX,
};
use crate::error::InvariantViolation;
use crate::manager::{Manager, ManagerId};
use crate::numbers::{round_f64_to_i32, round_f64_to_u32, usize_to_f64};
use crate::player::{Player, PlayerId, PlayerStatus, Tier};
use crate::practice::PracticeFocus;
use crate::registry::Registry;
use crate::standings::Standings;
use crate::team::TeamId;

/// One division's season, as progression needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionSeason {
    pub tier: Tier,
    /// Teams by preseason prestige, best first.
    pub preseason_order: Vec<TeamId>,
    pub standings: Standings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenownDelta {
    pub manager: ManagerId,
    pub team: TeamId,
    pub expected_place: usize,
    pub actual_place: usize,
    pub delta: f64,
    pub renown: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPointAward {
    pub manager: ManagerId,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeChange {
    pub team: TeamId,
    pub before: Rating,
    pub after: Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonReview {
    pub renown: Vec<RenownDelta>,
    pub awards: Vec<SkillPointAward>,
    pub prestige: Vec<PrestigeChange>,
}

/// Teams by prestige, best first, then by id.
#[must_use]
pub fn preseason_order(registry: &Registry, teams: &[TeamId]) -> Vec<TeamId> {
    let mut order: Vec<(Rating, TeamId)> = teams
        .iter()
        .filter_map(|&team| registry.team(team).map(|record| (record.prestige, team)))
        .collect();
    order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    order.into_iter().map(|(_, team)| team).collect()
}

/// One-based place a team was expected to finish.
#[must_use]
pub fn expected_place(preseason_order: &[TeamId], team: TeamId) -> Option<usize> {
    preseason_order
        .iter()
        .position(|&entry| entry == team)
        .map(|index| index + 1)
}

const fn renown_multiplier(tier: Tier) -> f64 {
    match tier {
        Tier::HighSchool => HIGH_SCHOOL_RENOWN_MULTIPLIER,
        Tier::College => COLLEGE_RENOWN_MULTIPLIER,
        Tier::Pro => PRO_RENOWN_MULTIPLIER,
    }
}

/// Points for finishing in the top half, `(teams + 1 - place) / 2`.
fn finish_bias(actual: usize, teams: usize) -> usize {
    (teams + 1).saturating_sub(actual) / 2
}

/// Renown change for finishing `actual` against an `expected` place.
#[must_use]
pub fn renown_delta(
    tier: Tier,
    expected: usize,
    actual: usize,
    teams: usize,
    config: &ProgressionConfig,
) -> f64 {
    let beat = usize_to_f64(expected) - usize_to_f64(actual);
    let rate = if beat > 0.0 {
        config.renown_gain_per_place
    } else {
        config.renown_loss_per_place
    };
    let finish = RENOWN_FINISH_BONUS * usize_to_f64(finish_bias(actual, teams));
    renown_multiplier(tier) * beat.mul_add(rate, finish)
}

/// Skill points for a season: a base, the places gained over expectation,
/// the finish bias and one point per `renown_per_bonus_point` of renown.
/// Always at least one.
#[must_use]
pub fn skill_points(
    expected: usize,
    actual: usize,
    teams: usize,
    renown: f64,
    config: &ProgressionConfig,
) -> u32 {
    let beat = i64::try_from(expected).unwrap_or(i64::MAX) - i64::try_from(actual).unwrap_or(0);
    let bias = i64::try_from(finish_bias(actual, teams)).unwrap_or(0);
    let bonus = if config.renown_per_bonus_point > 0.0 {
        i64::from(round_f64_to_u32(
            (renown.max(0.0) / config.renown_per_bonus_point).floor(),
        ))
    } else {
        0
    };
    let total = i64::from(config.skill_points_base) + beat + bias + bonus;
    u32::try_from(total.max(1)).unwrap_or(1)
}

/// Move prestige 30% of the way toward the finish-based target
/// `99 * (n - place + 1) / n`.
#[must_use]
pub fn drift_prestige(current: Rating, place: usize, teams: usize) -> Rating {
    if teams == 0 {
        return current;
    }
    let target = 99.0 * usize_to_f64(teams + 1 - place.clamp(1, teams)) / usize_to_f64(teams);
    Rating::from_f64(
        current
            .as_f64()
            .mul_add(1.0 - TEAM_PRESTIGE_DRIFT, target * TEAM_PRESTIGE_DRIFT),
    )
}

/// Judge every division's season: renown and skill points for managed
/// teams, prestige drift for all teams.
///
/// # Errors
///
/// Returns an error if a standings team is missing from the registry or
/// from its division's preseason order.
pub fn apply_end_of_season(
    registry: &mut Registry,
    managers: &mut BTreeMap<ManagerId, Manager>,
    divisions: &[DivisionSeason],
    config: &ProgressionConfig,
) -> Result<SeasonReview, InvariantViolation> {
    let mut review = SeasonReview::default();
    for division in divisions {
        let ranked = division.standings.ranked();
        let teams = ranked.len();
        for (index, row) in ranked.iter().enumerate() {
            let actual = index + 1;
            let record = registry
                .team(row.team)
                .ok_or(InvariantViolation::UnknownTeam(row.team))?;
            let expected = expected_place(&division.preseason_order, row.team)
                .ok_or(InvariantViolation::UnknownTeam(row.team))?;
            if let Some(id) = record.manager
                && let Some(manager) = managers.get_mut(&id)
            {
                let delta = renown_delta(division.tier, expected, actual, teams, config);
                manager.renown += delta;
                let points = skill_points(expected, actual, teams, manager.renown, config);
                manager.award_points(points);
                review.renown.push(RenownDelta {
                    manager: id,
                    team: row.team,
                    expected_place: expected,
                    actual_place: actual,
                    delta,
                    renown: manager.renown,
                });
                review.awards.push(SkillPointAward {
                    manager: id,
                    points,
                });
                info!(
                    "{} finished {actual} of {teams} (expected {expected}): renown {delta:+.1}, {points} skill points",
                    manager.name
                );
            }
            let before = record.prestige;
            let after = drift_prestige(before, actual, teams);
            if let Some(team) = registry.team_mut(row.team) {
                team.prestige = after;
            }
            review.prestige.push(PrestigeChange {
                team: row.team,
                before,
                after,
            });
        }
    }
    Ok(review)
}

/// The manager and facility grades that shape one player's growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevelopmentContext {
    pub developing: Rating,
    pub unlocking: Rating,
    pub facility: Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentSummary {
    pub gained: u32,
    pub unlocked: u32,
}

fn manager_factor(developing: Rating) -> f64 {
    MANAGER_FACTOR_SLOPE.mul_add(developing.as_f64(), MANAGER_FACTOR_BASE)
}

fn facility_factor(facility: Rating) -> f64 {
    FACILITY_FACTOR_SLOPE.mul_add(facility.as_f64(), FACILITY_FACTOR_BASE)
}

/// Raise ceilings of position attributes that are at or next to their cap.
/// Never past the player's hidden ceiling.
fn unlock<R: Rng + ?Sized>(
    player: &mut Player,
    unlocking: Rating,
    config: &ProgressionConfig,
    rng: &mut R,
) -> u32 {
    let chance = (config.unlock_chance * 2.0 * unlocking.fraction()).clamp(0.0, 1.0);
    let limit = player.hidden_ceiling;
    let mut unlocked = 0;
    let near_cap: Vec<_> = player
        .attributes
        .iter()
        .filter(|(attribute, current, ceiling)| {
            player.position.uses(*attribute) && current.headroom(*ceiling) <= 1 && *ceiling < limit
        })
        .map(|(attribute, _, _)| attribute)
        .collect();
    for attribute in near_cap {
        if rng.gen_bool(chance) {
            let step = rng.gen_range(1..=UNLOCK_STEP_MAX);
            unlocked += u32::from(player.attributes.raise_ceiling(attribute, step, limit));
        }
    }
    unlocked
}

/// One offseason of growth for a single player.
pub fn develop_player<R: Rng + ?Sized>(
    player: &mut Player,
    context: DevelopmentContext,
    config: &ProgressionConfig,
    rng: &mut R,
) -> DevelopmentSummary {
    let unlocked = unlock(player, context.unlocking, config, rng);
    let rate = DEVELOPMENT_BASE_RATE
        * config.offseason_multiplier
        * manager_factor(context.developing)
        * facility_factor(context.facility);
    let mut gained = 0_i32;
    for _ in 0..config.development_passes {
        let plan: Vec<_> = player
            .attributes
            .iter()
            .filter_map(|(attribute, current, ceiling)| {
                let headroom = current.headroom(ceiling);
                if headroom == 0 {
                    return None;
                }
                let used = player.position.uses(attribute);
                let relevance = if used { 1.0 } else { config.off_position_rate };
                let mut step = round_f64_to_i32(rate * f64::from(headroom) / 99.0 * relevance);
                if used {
                    step = step.max(1);
                }
                (step > 0).then_some((attribute, step))
            })
            .collect();
        for (attribute, step) in plan {
            gained += player.attributes.adjust_current(attribute, step);
        }
    }
    DevelopmentSummary {
        gained: u32::try_from(gained).unwrap_or(0),
        unlocked,
    }
}

/// Develop every active rostered player of the listed teams.
///
/// `context` supplies the grades for a team. Returns totals per team.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn develop_rosters<R: Rng + ?Sized>(
    registry: &mut Registry,
    teams: &[TeamId],
    context: impl Fn(TeamId) -> DevelopmentContext,
    config: &ProgressionConfig,
    rng: &mut R,
) -> Result<BTreeMap<TeamId, DevelopmentSummary>, InvariantViolation> {
    let mut totals = BTreeMap::new();
    for &team in teams {
        let roster: Vec<PlayerId> = registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?
            .roster()
            .iter()
            .copied()
            .collect();
        let grades = context(team);
        let mut total = DevelopmentSummary::default();
        for id in roster {
            if let Some(player) = registry.player_mut(id)
                && matches!(player.status, PlayerStatus::Active)
            {
                let summary = develop_player(player, grades, config, rng);
                total.gained += summary.gained;
                total.unlocked += summary.unlocked;
            }
        }
        totals.insert(team, total);
    }
    debug!("developed {} rosters", totals.len());
    Ok(totals)
}

/// One practice session for a single player. `intensity` scales the weekly
/// rate; a drill with headroom always gains at least a point. Returns the
/// points gained.
pub fn practice_player(
    player: &mut Player,
    focus: PracticeFocus,
    context: DevelopmentContext,
    intensity: f64,
) -> u32 {
    let rate = DEVELOPMENT_BASE_RATE
        * intensity
        * manager_factor(context.developing)
        * facility_factor(context.facility);
    let mut gained = 0_i32;
    for (attribute, drill_rate) in focus.drills_for(player.position) {
        let headroom = player
            .attributes
            .current(attribute)
            .headroom(player.attributes.ceiling(attribute));
        if headroom == 0 {
            continue;
        }
        let delta = rate * f64::from(headroom) / 99.0 * drill_rate;
        let mut step = round_f64_to_i32(delta);
        if step <= 0 && delta > 0.0 {
            step = 1;
        }
        if step > 0 {
            gained += player.attributes.adjust_current(attribute, step);
        }
    }
    u32::try_from(gained).unwrap_or(0)
}

/// Run one practice session for every active player of the listed teams,
/// each under its own team's focus. Returns points gained per team.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn run_practice(
    registry: &mut Registry,
    teams: &[TeamId],
    context: impl Fn(TeamId) -> DevelopmentContext,
    intensity: f64,
) -> Result<BTreeMap<TeamId, u32>, InvariantViolation> {
    let mut totals = BTreeMap::new();
    for &team in teams {
        let record = registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?;
        let focus = record.practice;
        let roster: Vec<PlayerId> = record.roster().iter().copied().collect();
        let grades = context(team);
        let mut total = 0;
        for id in roster {
            if let Some(player) = registry.player_mut(id)
                && matches!(player.status, PlayerStatus::Active)
            {
                total += practice_player(player, focus, grades, intensity);
            }
        }
        totals.insert(team, total);
    }
    Ok(totals)
}

/// Offseason camp for high-school teams: one practice session at the camp
/// multiplier.
///
/// # Errors
///
/// Returns an error if a team is not registered.
pub fn run_training_camp(
    registry: &mut Registry,
    high_schools: &[TeamId],
    context: impl Fn(TeamId) -> DevelopmentContext,
    config: &ProgressionConfig,
) -> Result<BTreeMap<TeamId, u32>, InvariantViolation> {
    let totals = run_practice(
        registry,
        high_schools,
        context,
        config.practice_intensity * config.training_camp_multiplier,
    )?;
    debug!(
        "training camp: {} teams gained {} points",
        totals.len(),
        totals.values().sum::<u32>()
    );
    Ok(totals)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    pub aged: usize,
    pub declined: Vec<PlayerId>,
    pub retired: Vec<PlayerId>,
}

/// Age every player in the pipeline by a year and move high-schoolers up a
/// class. Players in `incoming` joined this offseason and are skipped. Pro
/// players past `decline_age` lose a little on the attributes their
/// position uses; rostered pros at `retirement_age` retire.
///
/// # Errors
///
/// Returns an error if a retiring player cannot be detached.
pub fn age_players<R: Rng + ?Sized>(
    registry: &mut Registry,
    incoming: &BTreeSet<PlayerId>,
    retirement_age: u8,
    config: &ProgressionConfig,
    rng: &mut R,
) -> Result<AgingReport, InvariantViolation> {
    let mut report = AgingReport::default();
    let mut retiring = Vec::new();
    for id in registry.player_ids() {
        if incoming.contains(&id) {
            continue;
        }
        let Some(player) = registry.player_mut(id) else {
            continue;
        };
        if matches!(player.status, PlayerStatus::Retired) {
            continue;
        }
        player.age = player.age.saturating_add(1);
        report.aged += 1;
        match player.tier {
            Tier::HighSchool => player.class_year = player.class_year.saturating_add(1),
            Tier::College => {}
            Tier::Pro => {
                if player.age > config.decline_age {
                    let position = player.position;
                    for attribute in Attribute::ALL {
                        if position.uses(attribute) {
                            let loss = rng.gen_range(1..=AGING_DECLINE_MAX);
                            player.attributes.adjust_current(attribute, -loss);
                        }
                    }
                    report.declined.push(id);
                }
                if player.age >= retirement_age && matches!(player.status, PlayerStatus::Active) {
                    retiring.push(id);
                }
            }
        }
    }
    for id in retiring {
        registry.retire(id)?;
        report.retired.push(id);
    }
    debug!(
        "aged {} players: {} declined, {} retired",
        report.aged,
        report.declined.len(),
        report.retired.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeSet, Position};
    use crate::manager::ManagerSkills;
    use crate::practice::{DefenseFocus, OffenseFocus};
    use crate::registry::fixtures;
    use crate::standings::StandingsRow;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn flat(current: u8, ceiling: u8) -> AttributeSet {
        AttributeSet::from_fn(|_| (Rating::from(current), Rating::from(ceiling)))
    }

    fn context(developing: u8, unlocking: u8, facility: u8) -> DevelopmentContext {
        DevelopmentContext {
            developing: Rating::from(developing),
            unlocking: Rating::from(unlocking),
            facility: Rating::from(facility),
        }
    }

    #[test]
    fn beating_expectations_pays_and_missing_costs_less() {
        let config = ProgressionConfig::default();
        let beat = renown_delta(Tier::College, 6, 3, 10, &config);
        let missed = renown_delta(Tier::College, 3, 6, 10, &config);
        assert!(beat > 0.0);
        assert!(missed < 0.0);
        assert!(beat > -missed);
        assert!(renown_delta(Tier::HighSchool, 4, 4, 10, &config) >= 0.0);
        assert!(
            renown_delta(Tier::Pro, 6, 3, 10, &config)
                > renown_delta(Tier::HighSchool, 6, 3, 10, &config)
        );
    }

    #[test]
    fn skill_points_follow_finish_and_renown() {
        let config = ProgressionConfig::default();
        assert_eq!(skill_points(5, 5, 10, 0.0, &config), 2 + 3);
        assert_eq!(skill_points(8, 2, 10, 0.0, &config), 2 + 6 + 4);
        assert_eq!(skill_points(1, 10, 10, 0.0, &config), 1);
        assert_eq!(skill_points(5, 5, 10, 25.0, &config), 2 + 3 + 2);
    }

    #[test]
    fn prestige_drifts_toward_finish() {
        let champion = drift_prestige(Rating::from(50), 1, 10);
        let last = drift_prestige(Rating::from(50), 10, 10);
        assert_eq!(champion.value(), 65);
        assert!(last < Rating::from(50));
    }

    #[test]
    fn end_of_season_updates_managed_teams_only() {
        let mut registry = Registry::new();
        let teams: Vec<TeamId> = (0..4)
            .map(|index| {
                let id = registry.allocate_team_id();
                let mut team = fixtures::team(id, Tier::HighSchool);
                team.prestige = Rating::from(80 - index * 10);
                registry.insert_team(team)
            })
            .collect();
        let boss = ManagerId(1);
        registry.team_mut(teams[3]).unwrap().manager = Some(boss);
        let manager = Manager::new(
            boss,
            "Sam Reyes".to_string(),
            ManagerSkills::uniform(Rating::from(50)),
        );
        let mut managers = BTreeMap::from([(boss, manager)]);
        let order = preseason_order(&registry, &teams);
        assert_eq!(order, teams);
        let mut rows: Vec<StandingsRow> =
            teams.iter().map(|&team| StandingsRow::new(team)).collect();
        rows[3].wins = 6;
        rows[0].losses = 6;
        let standings = Standings::from_rows(rows);
        let review = apply_end_of_season(
            &mut registry,
            &mut managers,
            &[DivisionSeason {
                tier: Tier::HighSchool,
                preseason_order: order,
                standings,
            }],
            &ProgressionConfig::default(),
        )
        .unwrap();
        assert_eq!(review.renown.len(), 1);
        let delta = review.renown[0];
        assert_eq!((delta.expected_place, delta.actual_place), (4, 1));
        assert!(delta.delta > 0.0);
        assert_eq!(managers[&boss].points_earned(), 25 + review.awards[0].points);
        assert_eq!(review.prestige.len(), 4);
        assert!(registry.team(teams[3]).unwrap().prestige > Rating::from(50));
    }

    #[test]
    fn development_stays_within_ceilings() {
        let mut player = fixtures::player(PlayerId(1), Position::QB, 40);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let config = ProgressionConfig::default();
            develop_player(&mut player, context(99, 99, 99), &config, &mut rng);
            for (_, current, ceiling) in player.attributes.iter() {
                assert!(current <= ceiling);
                assert!(ceiling <= player.hidden_ceiling.max(Rating::from(50)));
            }
        }
    }

    #[test]
    fn better_developers_grow_players_faster() {
        let config = ProgressionConfig {
            unlock_chance: 0.0,
            ..ProgressionConfig::default()
        };
        let mut weak = fixtures::player(PlayerId(1), Position::RB, 30);
        let mut strong = weak.clone();
        weak.attributes = flat(30, 90);
        strong.attributes = flat(30, 90);
        let mut rng = SmallRng::seed_from_u64(4);
        let slow = develop_player(&mut weak, context(0, 0, 0), &config, &mut rng);
        let fast = develop_player(&mut strong, context(99, 0, 99), &config, &mut rng);
        assert!(fast.gained > slow.gained);
        assert!(strong.overall() >= weak.overall());
    }

    #[test]
    fn unlocking_respects_the_hidden_ceiling() {
        let config = ProgressionConfig {
            unlock_chance: 1.0,
            development_passes: 0,
            ..ProgressionConfig::default()
        };
        let mut player = fixtures::player(PlayerId(1), Position::K, 60);
        player.attributes = flat(70, 70);
        player.hidden_ceiling = Rating::from(72);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..10 {
            develop_player(&mut player, context(50, 99, 50), &config, &mut rng);
        }
        assert_eq!(player.attributes.ceiling(Attribute::KickPower).value(), 72);
        assert_eq!(
            player.attributes.ceiling(Attribute::Tackling).value(),
            70,
            "unused attributes stay put"
        );
    }

    #[test]
    fn practice_focus_picks_what_grows() {
        let mut passer = fixtures::player(PlayerId(1), Position::QB, 30);
        passer.attributes = flat(30, 90);
        let mut runner = passer.clone();
        let passing = PracticeFocus::new(OffenseFocus::PassGame, DefenseFocus::Balanced);
        let running = PracticeFocus::new(OffenseFocus::RunGame, DefenseFocus::Balanced);
        for _ in 0..4 {
            practice_player(&mut passer, passing, context(50, 50, 50), 1.0);
            practice_player(&mut runner, running, context(50, 50, 50), 1.0);
        }
        let current = |player: &Player, attribute| player.attributes.current(attribute).value();
        assert!(current(&passer, Attribute::DeepAccuracy) > 30);
        assert_eq!(current(&runner, Attribute::DeepAccuracy), 30);
        assert!(current(&runner, Attribute::Scrambling) > 30);
        assert_eq!(current(&passer, Attribute::Scrambling), 30);
        assert_eq!(current(&passer, Attribute::Tackling), 30);
        assert_eq!(current(&runner, Attribute::Tackling), 30);
    }

    #[test]
    fn weekly_practice_never_passes_ceilings() {
        let mut registry = Registry::new();
        let team = registry.allocate_team_id();
        let mut record = fixtures::team(team, Tier::College);
        record.practice = PracticeFocus::new(
            OffenseFocus::StrengthConditioning,
            DefenseFocus::StrengthConditioning,
        );
        registry.insert_team(record);
        for (index, position) in [Position::QB, Position::LT, Position::DE, Position::CB]
            .into_iter()
            .enumerate()
        {
            let id = registry.allocate_player_id();
            let mut player = fixtures::player(id, position, 40);
            player.attributes = AttributeSet::from_fn(|attribute| {
                let ceiling = 45 + u8::try_from(attribute.index() + index).unwrap_or(0);
                (Rating::from(40), Rating::from(ceiling))
            });
            registry.insert_player(player, Some(team)).unwrap();
        }
        let ceilings: Vec<_> = registry
            .roster(team)
            .iter()
            .map(|player| player.attributes.clone())
            .collect();
        for _ in 0..40 {
            run_practice(&mut registry, &[team], |_| context(99, 99, 99), 1.0).unwrap();
        }
        for (player, before) in registry.roster(team).iter().zip(&ceilings) {
            for (attribute, current, ceiling) in player.attributes.iter() {
                assert!(current <= ceiling);
                assert_eq!(ceiling, before.ceiling(attribute), "practice never moves ceilings");
            }
            assert_eq!(
                player.attributes.current(Attribute::Speed),
                player.attributes.ceiling(Attribute::Speed),
                "a season of drills reaches the cap"
            );
        }
    }

    #[test]
    fn training_camp_outpaces_a_practice_week() {
        let mut registry = Registry::new();
        let camp = registry.allocate_team_id();
        registry.insert_team(fixtures::team(camp, Tier::HighSchool));
        let week = registry.allocate_team_id();
        registry.insert_team(fixtures::team(week, Tier::HighSchool));
        for team in [camp, week] {
            let id = registry.allocate_player_id();
            let mut player = fixtures::player(id, Position::WR, 20);
            player.attributes = flat(20, 95);
            registry.insert_player(player, Some(team)).unwrap();
        }
        let config = ProgressionConfig::default();
        let grades = |_| context(50, 50, 50);
        let camp_gain = run_training_camp(&mut registry, &[camp], grades, &config).unwrap();
        let week_gain =
            run_practice(&mut registry, &[week], grades, config.practice_intensity).unwrap();
        assert!(camp_gain[&camp] > week_gain[&week]);
    }

    #[test]
    fn aging_moves_classes_declines_and_retires() {
        let mut registry = Registry::new();
        let hs = registry.allocate_team_id();
        registry.insert_team(fixtures::team(hs, Tier::HighSchool));
        let pro = registry.allocate_team_id();
        registry.insert_team(fixtures::team(pro, Tier::Pro));

        let sophomore = registry.allocate_player_id();
        let mut player = fixtures::player(sophomore, Position::WR, 40);
        player.class_year = 2;
        registry.insert_player(player, Some(hs)).unwrap();

        let freshman = registry.allocate_player_id();
        registry
            .insert_player(fixtures::player(freshman, Position::WR, 40), Some(hs))
            .unwrap();

        let veteran = registry.allocate_player_id();
        let mut player = fixtures::player(veteran, Position::QB, 70);
        player.age = 34;
        registry.insert_player(player, Some(pro)).unwrap();

        let before = registry.player(veteran).unwrap().overall();
        let report = age_players(
            &mut registry,
            &BTreeSet::from([freshman]),
            35,
            &ProgressionConfig::default(),
            &mut SmallRng::seed_from_u64(8),
        )
        .unwrap();
        assert_eq!(report.aged, 2);
        assert_eq!(registry.player(sophomore).unwrap().class_year, 3);
        assert_eq!(registry.player(freshman).unwrap().class_year, 1);
        assert_eq!(report.declined, vec![veteran]);
        assert_eq!(report.retired, vec![veteran]);
        let retired = registry.player(veteran).unwrap();
        assert_eq!(retired.status, PlayerStatus::Retired);
        assert!(retired.overall() < before);
        registry.verify_integrity().unwrap();
    }
}
