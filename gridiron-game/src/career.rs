//! Career orchestration: one manager's league, season after season.
//!
//! A career moves through three phases. `start_season` builds schedules and
//! records preseason expectations; `advance_week` plays one week in every
//! division and runs that week's practice; `finish_season` closes the books; `run_offseason` moves players
//! through the pipeline and opens the next season. Every step works on
//! staged copies and commits only when it succeeds.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rand_chacha::ChaCha20Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::attributes::Rating;
use crate::config::{EngineConfig, ResolverConfig};
use crate::constants::{AI_MANAGER_SKILL, STAT_LEADERS_PER_CATEGORY};
use crate::error::{EngineError, InvariantViolation, PolicyGap};
use crate::generator::{GenerationContext, Intake};
use crate::league::League;
use crate::manager::{Manager, ManagerId, Skill, SkillAllocation};
use crate::movement::{
    DraftReport, EligibilityReport, FreeAgencyReport, RecruitingReport, TradeOutcome,
    TradeProposal, UndraftedReport, advance_eligibility, assign_redshirts, draft_order,
    execute_trade, expire_contracts, fill_pro_roster, fill_roster, resolve_undrafted, run_draft,
    run_free_agency, run_freshman_intake, run_recruiting, trim_roster,
};
use crate::player::{PlayerId, PlayerStatus, Tier};
use crate::practice::PracticeFocus;
use crate::progression::{
    AgingReport, DevelopmentContext, DevelopmentSummary, DivisionSeason, SeasonReview,
    age_players, apply_end_of_season, develop_rosters, preseason_order, run_practice,
    run_training_camp,
};
use crate::resolver::{TeamSheet, resolve_game};
use crate::result::GameResult;
use crate::rng::{RngStreams, Stream};
use crate::schedule::{Fixture, build_schedule};
use crate::standings::{Standings, StandingsRow};
use crate::stats::{CategoryLeaders, SeasonStats, season_stats, stat_leaders};
use crate::team::{DivisionId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerPhase {
    /// Between offseason and kickoff. Schedules are not built yet.
    Preseason,
    InSeason,
    /// Every game is played and the season is judged; the offseason is next.
    SeasonComplete,
}

impl CareerPhase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preseason => "preseason",
            Self::InSeason => "the regular season",
            Self::SeasonComplete => "the end of season",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutcome {
    pub season: u32,
    pub standings: Vec<(DivisionId, Standings)>,
    /// Statistical leaders of each division.
    pub leaders: Vec<(DivisionId, Vec<CategoryLeaders>)>,
    pub review: SeasonReview,
    pub eligibility: EligibilityReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffseasonReport {
    pub freshmen: Vec<PlayerId>,
    pub recruiting: RecruitingReport,
    pub expired_contracts: Vec<PlayerId>,
    pub draft: DraftReport,
    pub undrafted: UndraftedReport,
    pub free_agency: FreeAgencyReport,
    pub released: Vec<PlayerId>,
    pub roster_gaps: Vec<PolicyGap>,
    /// Points gained at each high-school training camp.
    pub training_camp: BTreeMap<TeamId, u32>,
    pub development: BTreeMap<TeamId, DevelopmentSummary>,
    pub aging: AgingReport,
    pub filled: usize,
    /// Walk-on pool players no college roster had room for.
    pub unplaced_walk_ons: Vec<PlayerId>,
    pub pruned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub outcome: SeasonOutcome,
    pub offseason: OffseasonReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    config: EngineConfig,
    streams: RngStreams,
    league: League,
    phase: CareerPhase,
    user: ManagerId,
}

impl Career {
    /// Start a new career for `manager` in a freshly generated league.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the layout is unusable.
    pub fn new(config: EngineConfig, seed: u64, manager: Manager) -> Result<Self, EngineError> {
        let streams = RngStreams::from_user_seed(seed);
        let user = manager.id;
        let league = League::create(&config, manager, &mut streams.stream(Stream::LeagueSetup, 0))?;
        info!("new career with seed {seed}");
        Ok(Self {
            config,
            streams,
            league,
            phase: CareerPhase::Preseason,
            user,
        })
    }

    #[must_use]
    pub const fn league(&self) -> &League {
        &self.league
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> CareerPhase {
        self.phase
    }

    #[must_use]
    pub const fn season(&self) -> u32 {
        self.league.season
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.streams.seed()
    }

    #[must_use]
    pub fn user_manager(&self) -> Option<&Manager> {
        self.league.managers.get(&self.user)
    }

    fn expect_phase(&self, phase: CareerPhase) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(EngineError::WrongPhase(self.phase.label()))
        }
    }

    /// Build every division's schedule, record preseason expectations and
    /// redshirt college backups.
    ///
    /// # Errors
    ///
    /// Fails outside preseason or when a division cannot be scheduled.
    pub fn start_season(&mut self) -> Result<(), EngineError> {
        self.expect_phase(CareerPhase::Preseason)?;
        let season = self.league.season;
        let mut league = self.league.clone();
        let mut rng = self.streams.stream(Stream::Schedule, season);
        for division in &mut league.divisions {
            division.schedule = Some(build_schedule(division.id, &division.teams, &mut rng)?);
            division.preseason_order = preseason_order(&league.registry, &division.teams);
            division.standings = None;
        }
        let colleges = league.teams_in(Tier::College);
        let redshirts = assign_redshirts(&mut league.registry, &colleges)?;
        self.league = league;
        self.phase = CareerPhase::InSeason;
        debug!(
            "season {season} started: {} schedules, {} redshirts",
            self.league.divisions.len(),
            redshirts.len()
        );
        Ok(())
    }

    /// Whether every division has played its last week.
    #[must_use]
    pub fn season_finished(&self) -> bool {
        self.league.divisions.iter().all(|division| {
            division
                .schedule
                .as_ref()
                .is_some_and(|schedule| schedule.is_complete())
        })
    }

    fn team_sheets(&self) -> BTreeMap<TeamId, TeamSheet> {
        self.league
            .registry
            .teams()
            .map(|team| {
                let roster = self.league.registry.roster(team.id);
                let management = self.league.skill(team.id, Skill::InGameManagement);
                (team.id, TeamSheet::from_roster(team, &roster, management))
            })
            .collect()
    }

    /// Play the next week in every division, then hold practice for every
    /// team that played. Either the whole week is committed or none of it.
    ///
    /// # Errors
    ///
    /// Fails outside the regular season or once every schedule is complete.
    pub fn advance_week(&mut self) -> Result<Vec<GameResult>, EngineError> {
        self.expect_phase(CareerPhase::InSeason)?;
        let season = self.league.season;
        let sheets = self.team_sheets();
        let mut staged = Vec::new();
        let mut practicing = Vec::new();
        for (index, division) in self.league.divisions.iter().enumerate() {
            let Some(schedule) = division.schedule.as_ref() else {
                continue;
            };
            let Some((week, fixtures)) = schedule.pending_week() else {
                continue;
            };
            practicing.extend(&division.teams);
            let streams = self.streams;
            let results = resolve_fixtures(&sheets, fixtures, &self.config.resolver, |fixture| {
                streams.fixture(season, division.id, week, fixture.slot)
            })?;
            let mut next = schedule.clone();
            next.commit_week(results.clone())?;
            staged.push((index, next, results));
        }
        if staged.is_empty() {
            return Err(InvariantViolation::ScheduleComplete("every division".to_string()).into());
        }
        let grades = development_grades(&self.league, &practicing);
        let mut registry = self.league.registry.clone();
        let practice = run_practice(
            &mut registry,
            &practicing,
            |team| grades.get(&team).copied().unwrap_or_else(ai_grades),
            self.config.progression.practice_intensity,
        )?;
        self.league.registry = registry;
        let mut played = Vec::new();
        for (index, schedule, results) in staged {
            if let Some(division) = self.league.divisions.get_mut(index) {
                division.schedule = Some(schedule);
            }
            played.extend(results);
        }
        debug!(
            "season {season}: {} games committed, practice gained {} points",
            played.len(),
            practice.values().sum::<u32>()
        );
        Ok(played)
    }

    /// Judge the completed season and run the eligibility clock.
    ///
    /// # Errors
    ///
    /// Fails unless every division has finished its schedule.
    pub fn finish_season(&mut self) -> Result<SeasonOutcome, EngineError> {
        self.expect_phase(CareerPhase::InSeason)?;
        if !self.season_finished() {
            return Err(EngineError::WrongPhase("a season with games left to play"));
        }
        let season = self.league.season;
        let mut league = self.league.clone();
        let mut seasons = Vec::with_capacity(league.divisions.len());
        let mut tables = Vec::with_capacity(league.divisions.len());
        let mut leaders = Vec::with_capacity(league.divisions.len());
        for division in &mut league.divisions {
            let played = division
                .schedule
                .as_ref()
                .map_or(&[][..], |schedule| schedule.played());
            leaders.push((
                division.id,
                stat_leaders(&season_stats(played), STAT_LEADERS_PER_CATEGORY),
            ));
            let standings = Standings::from_results(&division.teams, played);
            seasons.push(DivisionSeason {
                tier: division.tier,
                preseason_order: division.preseason_order.clone(),
                standings: standings.clone(),
            });
            tables.push((division.id, standings.clone()));
            division.standings = Some(standings);
        }
        let review = apply_end_of_season(
            &mut league.registry,
            &mut league.managers,
            &seasons,
            &self.config.progression,
        )?;
        let colleges = league.teams_in(Tier::College);
        let eligibility = advance_eligibility(&mut league.registry, &colleges)?;
        self.league = league;
        self.phase = CareerPhase::SeasonComplete;
        info!(
            "season {season} complete: {} managers judged, {} players draft-eligible",
            review.renown.len(),
            eligibility.draft_eligible.len()
        );
        Ok(SeasonOutcome {
            season,
            standings: tables,
            leaders,
            review,
            eligibility,
        })
    }

    /// Move every player through the offseason and open the next season.
    ///
    /// Order: freshman intake, recruiting, contract expiry, draft, undrafted
    /// returns, free agency, roster trims and pro depth, high-school training
    /// camp, development, aging, then high-school and college roster fill.
    ///
    /// # Errors
    ///
    /// Fails outside the end of season, or on any invariant violation, in
    /// which case nothing changes.
    pub fn run_offseason(&mut self) -> Result<OffseasonReport, EngineError> {
        self.expect_phase(CareerPhase::SeasonComplete)?;
        let season = self.league.season;
        let config = &self.config;
        let mut league = self.league.clone();
        let mut generation = self.streams.stream(Stream::Generation, season);
        let mut offseason = self.streams.stream(Stream::Offseason, season);
        let mut development = self.streams.stream(Stream::Development, season);
        let high_schools = league.teams_in(Tier::HighSchool);
        let colleges = league.teams_in(Tier::College);
        let pros = league.teams_in(Tier::Pro);
        let scouting = league.skill_table(&high_schools, Skill::Scouting);
        let persuasion = league.skill_table(&colleges, Skill::Persuasion);
        let baseline = Rating::from(AI_MANAGER_SKILL);
        let mut report = OffseasonReport::default();

        for &team in &colleges {
            if let Some(record) = league.registry.team_mut(team) {
                record.scholarships_remaining = config.recruiting.scholarships_per_class;
            }
        }

        report.freshmen = run_freshman_intake(
            &mut league.registry,
            &high_schools,
            |team| scouting.get(&team).copied().unwrap_or(baseline),
            &config.generation,
            &mut generation,
        )?;
        let incoming: BTreeSet<PlayerId> = report.freshmen.iter().copied().collect();

        let seniors: Vec<PlayerId> = league
            .registry
            .players()
            .filter(|player| player.is_high_school_senior())
            .map(|player| player.id)
            .collect();
        report.recruiting = run_recruiting(
            &mut league.registry,
            &seniors,
            &colleges,
            |team| persuasion.get(&team).copied().unwrap_or(baseline),
            &config.recruiting,
        )?;

        report.expired_contracts = expire_contracts(&mut league.registry, &pros)?;
        let prospects: Vec<PlayerId> = league
            .registry
            .players()
            .filter(|player| player.team.is_some() && player.is_draft_eligible())
            .map(|player| player.id)
            .collect();
        let rows: Vec<StandingsRow> = league
            .divisions_in(Tier::Pro)
            .filter_map(|division| division.standings.as_ref())
            .flat_map(Standings::ranked)
            .collect();
        let order = draft_order(&rows);
        report.draft = run_draft(&mut league.registry, &prospects, &order, &config.draft)?;
        report.undrafted = resolve_undrafted(&mut league.registry, &report.draft.undrafted)?;

        report.free_agency = run_free_agency(&mut league.registry, &pros, &config.free_agency)?;
        for &team in &pros {
            report
                .released
                .extend(trim_roster(&mut league.registry, team)?);
            let (_, gap) = fill_pro_roster(
                &mut league.registry,
                team,
                &config.generation,
                &config.free_agency,
                &mut offseason,
            )?;
            report.roster_gaps.extend(gap);
        }

        let mut developing: Vec<TeamId> = high_schools.clone();
        developing.extend(&colleges);
        let grades = development_grades(&league, &developing);
        report.training_camp = run_training_camp(
            &mut league.registry,
            &high_schools,
            |team| grades.get(&team).copied().unwrap_or_else(ai_grades),
            &config.progression,
        )?;
        report.development = develop_rosters(
            &mut league.registry,
            &developing,
            |team| grades.get(&team).copied().unwrap_or_else(ai_grades),
            &config.progression,
            &mut development,
        )?;
        report.aging = age_players(
            &mut league.registry,
            &incoming,
            config.free_agency.retirement_age,
            &config.progression,
            &mut development,
        )?;

        let mut pool = report.recruiting.walk_on_pool.clone();
        let mut no_pool = Vec::new();
        for &team in high_schools.iter().chain(&colleges) {
            let Some(record) = league.registry.team(team) else {
                return Err(InvariantViolation::UnknownTeam(team).into());
            };
            let (context, source) = if matches!(record.tier, Tier::HighSchool) {
                let context = GenerationContext::high_school(
                    record.region,
                    Intake::Freshman,
                    scouting.get(&team).copied().unwrap_or(baseline),
                    record.facility,
                );
                (context, &mut no_pool)
            } else {
                (GenerationContext::college(record.region, Intake::WalkOn), &mut pool)
            };
            report.filled += fill_roster(
                &mut league.registry,
                team,
                &context,
                &config.generation,
                source,
                &mut generation,
            )?
            .len();
        }
        for id in pool {
            league.registry.retire(id)?;
            report.unplaced_walk_ons.push(id);
        }
        if !report.unplaced_walk_ons.is_empty() {
            warn!(
                "{} walk-ons found no college roster and retired",
                report.unplaced_walk_ons.len()
            );
        }

        report.pruned = league.registry.prune_retired();
        league.registry.verify_integrity()?;
        league.season += 1;
        for division in &mut league.divisions {
            division.schedule = None;
        }
        self.league = league;
        self.phase = CareerPhase::Preseason;
        info!(
            "offseason {season}: {} commitments, {} picks, {} signings, {} retired records pruned",
            report.recruiting.commitments.len(),
            report.draft.picks.len(),
            report.free_agency.signings.len(),
            report.pruned
        );
        Ok(report)
    }

    /// Play a whole season and its offseason on a copy, committing only if
    /// every step succeeds and `cancel` stays unset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] when `cancel` is raised between
    /// weeks, or the first error from any step. The career is unchanged on
    /// error.
    pub fn simulate_season(&mut self, cancel: &AtomicBool) -> Result<SeasonSummary, EngineError> {
        let mut staged = self.clone();
        match staged.phase {
            CareerPhase::Preseason => staged.start_season()?,
            CareerPhase::InSeason => {}
            CareerPhase::SeasonComplete => return Err(EngineError::WrongPhase(self.phase.label())),
        }
        while !staged.season_finished() {
            if cancel.load(Ordering::Relaxed) {
                warn!("season {} cancelled", staged.league.season);
                return Err(EngineError::Cancelled);
            }
            staged.advance_week()?;
        }
        let outcome = staged.finish_season()?;
        if cancel.load(Ordering::Relaxed) {
            return Err(EngineError::Cancelled);
        }
        let offseason = staged.run_offseason()?;
        *self = staged;
        Ok(SeasonSummary { outcome, offseason })
    }

    /// Spend the user's skill points. Not allowed while games are being
    /// played.
    ///
    /// # Errors
    ///
    /// Fails during the regular season or when the allocation asks for more
    /// points than are available.
    pub fn spend_skill_points(&mut self, allocation: &SkillAllocation) -> Result<u32, EngineError> {
        if matches!(self.phase, CareerPhase::InSeason) {
            return Err(EngineError::WrongPhase(self.phase.label()));
        }
        let manager = self
            .league
            .managers
            .get_mut(&self.user)
            .ok_or(InvariantViolation::UnknownManager(self.user))?;
        Ok(manager.spend_points(allocation)?)
    }

    /// Set the practice plan of the user's team. It applies from the next
    /// practice on and carries over between seasons.
    ///
    /// # Errors
    ///
    /// Fails when the user manager has no team.
    pub fn set_practice_focus(&mut self, focus: PracticeFocus) -> Result<(), EngineError> {
        let team = self
            .user_manager()
            .and_then(|manager| manager.team)
            .ok_or(InvariantViolation::UnknownManager(self.user))?;
        let record = self
            .league
            .registry
            .team_mut(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?;
        record.practice = focus;
        debug!(
            "team {team:?} now practices {} / {}",
            focus.offense.label(),
            focus.defense.label()
        );
        Ok(())
    }

    /// Apply a trade between two teams.
    ///
    /// # Errors
    ///
    /// Returns the trade's validation failure; rosters are untouched then.
    pub fn trade(&mut self, proposal: TradeProposal) -> Result<TradeOutcome, EngineError> {
        Ok(execute_trade(&mut self.league.registry, proposal)?)
    }

    /// A player's totals for the season in progress, or the season just
    /// finished until the offseason runs.
    #[must_use]
    pub fn player_season_stats(&self, player: PlayerId) -> Option<SeasonStats> {
        let games = self
            .league
            .divisions
            .iter()
            .filter_map(|division| division.schedule.as_ref())
            .flat_map(|schedule| schedule.played())
            .filter(|game| game.result.lines.iter().any(|line| line.player == player));
        season_stats(games).remove(&player)
    }

    /// Active players on a team's roster.
    #[must_use]
    pub fn active_roster(&self, team: TeamId) -> Vec<PlayerId> {
        self.league
            .registry
            .roster(team)
            .iter()
            .filter(|player| matches!(player.status, PlayerStatus::Active))
            .map(|player| player.id)
            .collect()
    }
}

fn ai_grades() -> DevelopmentContext {
    let baseline = Rating::from(AI_MANAGER_SKILL);
    DevelopmentContext {
        developing: baseline,
        unlocking: baseline,
        facility: baseline,
    }
}

/// Development grades for `teams`, read before the registry is borrowed
/// mutably.
fn development_grades(league: &League, teams: &[TeamId]) -> BTreeMap<TeamId, DevelopmentContext> {
    teams
        .iter()
        .filter_map(|&team| {
            let record = league.registry.team(team)?;
            Some((
                team,
                DevelopmentContext {
                    developing: league.skill(team, Skill::DevelopingPotential),
                    unlocking: league.skill(team, Skill::UnlockingPotential),
                    facility: record.facility,
                },
            ))
        })
        .collect()
}

/// Resolve one week of fixtures from immutable sheets. Each fixture draws
/// from its own stream, so sequential and parallel runs agree.
fn resolve_fixtures<F>(
    sheets: &BTreeMap<TeamId, TeamSheet>,
    fixtures: &[Fixture],
    rules: &ResolverConfig,
    rng_for: F,
) -> Result<Vec<GameResult>, InvariantViolation>
where
    F: Fn(&Fixture) -> ChaCha20Rng + Sync,
{
    let resolve = |fixture: &Fixture| -> Result<GameResult, InvariantViolation> {
        let home = sheets
            .get(&fixture.home)
            .ok_or(InvariantViolation::UnknownTeam(fixture.home))?;
        let away = sheets
            .get(&fixture.away)
            .ok_or(InvariantViolation::UnknownTeam(fixture.away))?;
        Ok(resolve_game(home, away, rules, &mut rng_for(fixture)))
    };
    #[cfg(feature = "parallel")]
    {
        fixtures.par_iter().map(resolve).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        fixtures.iter().map(resolve).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, Position};
    use crate::manager::ManagerSkills;
    use crate::practice::{DefenseFocus, OffenseFocus};
    use crate::stats::StatCategory;

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.league.high_school_divisions = 2;
        config.league.college_divisions = 1;
        config.league.pro_divisions = 1;
        config.league.teams_per_division = 4;
        config
    }

    fn career(seed: u64) -> Career {
        let manager = Manager::new(
            ManagerId(1),
            "Casey Ward".to_string(),
            ManagerSkills::uniform(Rating::from(55)),
        );
        Career::new(small_config(), seed, manager).unwrap()
    }

    #[test]
    fn phases_are_enforced() {
        let mut career = career(1);
        assert!(matches!(career.advance_week(), Err(EngineError::WrongPhase(_))));
        assert!(matches!(career.run_offseason(), Err(EngineError::WrongPhase(_))));
        career.start_season().unwrap();
        assert!(matches!(career.start_season(), Err(EngineError::WrongPhase(_))));
        assert!(matches!(career.finish_season(), Err(EngineError::WrongPhase(_))));
    }

    #[test]
    fn weeks_advance_every_division_together() {
        let mut career = career(2);
        career.start_season().unwrap();
        let results = career.advance_week().unwrap();
        assert_eq!(results.len(), career.league().divisions.len() * 2);
        for division in &career.league().divisions {
            let schedule = division.schedule.as_ref().unwrap();
            assert_eq!(schedule.played().len(), 2);
        }
    }

    #[test]
    fn full_season_commits_and_opens_the_next() {
        let mut career = career(3);
        let cancel = AtomicBool::new(false);
        let summary = career.simulate_season(&cancel).unwrap();
        assert_eq!(summary.outcome.season, 1);
        assert_eq!(career.season(), 2);
        assert_eq!(career.phase(), CareerPhase::Preseason);
        for (_, standings) in &summary.outcome.standings {
            assert_eq!(standings.total_wins(), standings.total_losses());
        }
        assert_eq!(summary.outcome.review.renown.len(), 1);
        career.league().registry.verify_integrity().unwrap();
        for tier in Tier::ALL {
            for team in career.league().teams_in(tier) {
                let record = career.league().registry.team(team).unwrap();
                assert!(record.roster_len() <= record.roster_limit());
            }
        }
    }

    #[test]
    fn cancelled_season_leaves_the_career_untouched() {
        let mut career = career(4);
        let before = career.clone();
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            career.simulate_season(&cancel),
            Err(EngineError::Cancelled)
        ));
        assert_eq!(career, before);
    }

    #[test]
    fn same_seed_same_career() {
        let cancel = AtomicBool::new(false);
        let mut a = career(9);
        let mut b = career(9);
        a.simulate_season(&cancel).unwrap();
        b.simulate_season(&cancel).unwrap();
        assert_eq!(a, b);
    }

    fn attribute_points(career: &Career) -> u32 {
        career
            .league()
            .registry
            .players()
            .flat_map(|player| player.attributes.iter())
            .map(|(_, current, _)| u32::from(current.value()))
            .sum()
    }

    #[test]
    fn practice_runs_inside_each_committed_week() {
        let mut career = career(6);
        career.start_season().unwrap();
        let before = attribute_points(&career);
        career.advance_week().unwrap();
        let after_one = attribute_points(&career);
        assert!(after_one > before);
        career.advance_week().unwrap();
        assert!(attribute_points(&career) > after_one);
        career.league().registry.verify_integrity().unwrap();
    }

    #[test]
    fn user_practice_focus_shapes_weekly_growth() {
        let passing_drills = |career: &Career| -> u32 {
            let team = career.user_manager().unwrap().team.unwrap();
            career
                .league()
                .registry
                .roster(team)
                .iter()
                .filter(|player| player.position == Position::QB)
                .map(|player| {
                    [
                        Attribute::DeepAccuracy,
                        Attribute::ThrowUnderPressure,
                        Attribute::ArmStrength,
                    ]
                    .into_iter()
                    .map(|attribute| u32::from(player.attributes.current(attribute).value()))
                    .sum::<u32>()
                })
                .sum()
        };
        let mut balanced = career(8);
        let mut focused = career(8);
        focused
            .set_practice_focus(PracticeFocus::new(OffenseFocus::PassGame, DefenseFocus::Balanced))
            .unwrap();
        let team = focused.user_manager().unwrap().team.unwrap();
        assert_eq!(
            focused.league().registry.team(team).unwrap().practice.offense,
            OffenseFocus::PassGame
        );
        for career in [&mut balanced, &mut focused] {
            career.start_season().unwrap();
            for _ in 0..3 {
                career.advance_week().unwrap();
            }
        }
        assert!(passing_drills(&focused) > passing_drills(&balanced));
    }

    #[test]
    fn finished_season_reports_stat_leaders() {
        let mut career = career(10);
        career.start_season().unwrap();
        while !career.season_finished() {
            career.advance_week().unwrap();
        }
        let outcome = career.finish_season().unwrap();
        assert_eq!(outcome.leaders.len(), career.league().divisions.len());
        for (_, categories) in &outcome.leaders {
            assert_eq!(categories.len(), StatCategory::ALL.len());
            let passing = &categories[0];
            assert_eq!(passing.category, StatCategory::PassingYards);
            let top = passing.leaders.first().unwrap();
            let stats = career.player_season_stats(top.player).unwrap();
            assert_eq!(stats.totals.pass_yards, top.value);
            assert!(stats.games_played >= 1);
            assert!(passing.leaders.len() <= STAT_LEADERS_PER_CATEGORY);
        }
    }

    #[test]
    fn skill_points_are_spent_between_seasons_only() {
        let mut career = career(5);
        let charged = career
            .spend_skill_points(&SkillAllocation::single(Skill::Scouting, 5))
            .unwrap();
        assert_eq!(charged, 5);
        assert_eq!(career.user_manager().unwrap().skills.scouting.value(), 60);
        career.start_season().unwrap();
        assert!(matches!(
            career.spend_skill_points(&SkillAllocation::single(Skill::Scouting, 1)),
            Err(EngineError::WrongPhase(_))
        ));
    }
}
