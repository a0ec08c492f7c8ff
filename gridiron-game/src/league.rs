//! League structure: tiers, divisions, teams and the managers who run them.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attributes::Rating;
use crate::config::EngineConfig;
use crate::constants::{AI_MANAGER_SKILL, INITIAL_CONTRACT_YEARS_MAX, INITIAL_PAYROLL_SHARE};
use crate::error::{EngineError, InvariantViolation};
use crate::generator::{GenerationContext, Intake, generate_class};
use crate::manager::{Manager, ManagerId, Skill};
use crate::movement::asking_salary;
use crate::names::team_names;
use crate::numbers::{round_f64_to_u32, u32_to_f64, usize_to_u16};
use crate::player::{Contract, PlayerId, Region, Tier};
use crate::practice::PracticeFocus;
use crate::registry::Registry;
use crate::schedule::Schedule;
use crate::standings::Standings;
use crate::team::{DivisionId, Finances, Team, TeamId, missing_slots};

/// A fixed group of teams that play each other twice a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub tier: Tier,
    pub name: String,
    pub teams: Vec<TeamId>,
    pub schedule: Option<Schedule>,
    /// Teams by prestige at the start of the season, best first.
    pub preseason_order: Vec<TeamId>,
    /// Final table of the last completed season.
    pub standings: Option<Standings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub season: u32,
    pub divisions: Vec<Division>,
    pub registry: Registry,
    pub managers: BTreeMap<ManagerId, Manager>,
}

const fn prestige_range(tier: Tier) -> (u8, u8) {
    match tier {
        Tier::HighSchool => (20, 80),
        Tier::College => (35, 95),
        Tier::Pro => (60, 99),
    }
}

const fn facility_range(tier: Tier) -> (u8, u8) {
    match tier {
        Tier::HighSchool => (15, 75),
        Tier::College => (35, 95),
        Tier::Pro => (55, 99),
    }
}

const fn division_count(config: &EngineConfig, tier: Tier) -> usize {
    match tier {
        Tier::HighSchool => config.league.high_school_divisions,
        Tier::College => config.league.college_divisions,
        Tier::Pro => config.league.pro_divisions,
    }
}

fn finances_for(tier: Tier, prestige: Rating, config: &EngineConfig) -> Finances {
    match tier {
        Tier::HighSchool => Finances::None,
        Tier::College => Finances::Nil {
            budget: u32::from(prestige.value()) * 50,
        },
        Tier::Pro => Finances::SalaryCap {
            cap: config.free_agency.salary_cap,
        },
    }
}

impl League {
    /// Build a fresh league: every division, team and roster, with the
    /// player's manager placed at a high-school team.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable layout, or an invariant
    /// violation if roster construction goes wrong.
    pub fn create<R: Rng + ?Sized>(
        config: &EngineConfig,
        mut manager: Manager,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let per_division = config.league.teams_per_division;
        let total_teams: usize = Tier::ALL
            .iter()
            .map(|tier| division_count(config, *tier) * per_division)
            .sum();
        let mut names = team_names(total_teams, rng).into_iter();

        let mut registry = Registry::new();
        let mut divisions = Vec::new();
        for tier in Tier::ALL {
            for number in 0..division_count(config, tier) {
                let id = DivisionId(usize_to_u16(divisions.len()));
                let mut teams = Vec::with_capacity(per_division);
                for _ in 0..per_division {
                    let team_id = registry.allocate_team_id();
                    let (lo, hi) = prestige_range(tier);
                    let prestige = Rating::from(rng.gen_range(lo..=hi));
                    let (lo, hi) = facility_range(tier);
                    let facility = Rating::from(rng.gen_range(lo..=hi));
                    let team = Team {
                        id: team_id,
                        name: names.next().unwrap_or_else(|| format!("Team {}", team_id.0)),
                        tier,
                        division: id,
                        region: Region::at(rng.gen_range(0..Region::ALL.len())),
                        prestige,
                        facility,
                        finances: finances_for(tier, prestige, config),
                        roster: BTreeSet::new(),
                        scholarships_remaining: if matches!(tier, Tier::College) {
                            config.recruiting.scholarships_per_class
                        } else {
                            0
                        },
                        manager: None,
                        practice: PracticeFocus::default(),
                    };
                    teams.push(registry.insert_team(team));
                }
                divisions.push(Division {
                    id,
                    tier,
                    name: format!("{} Division {}", tier_label(tier), number + 1),
                    teams,
                    schedule: None,
                    preseason_order: Vec::new(),
                    standings: None,
                });
            }
        }

        let mut league = Self {
            season: 1,
            divisions,
            registry,
            managers: BTreeMap::new(),
        };
        let high_schools = league.teams_in(Tier::HighSchool);
        let home = high_schools[rng.gen_range(0..high_schools.len())];
        manager.team = Some(home);
        if let Some(team) = league.registry.team_mut(home) {
            team.manager = Some(manager.id);
        }
        info!("{} takes over at team {}", manager.name, home.0);
        league.managers.insert(manager.id, manager);

        for tier in Tier::ALL {
            for team in league.teams_in(tier) {
                league.populate(team, config, rng)?;
            }
        }
        for team in league.teams_in(Tier::Pro) {
            league.sign_initial_contracts(team, config, rng)?;
        }
        league.registry.verify_integrity()?;
        debug!(
            "league created: {} divisions, {} players",
            league.divisions.len(),
            league.registry.player_count()
        );
        Ok(league)
    }

    /// Fill an empty roster to its template.
    fn populate<R: Rng + ?Sized>(
        &mut self,
        team: TeamId,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<(), InvariantViolation> {
        let record = self
            .registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?;
        let context = match record.tier {
            Tier::HighSchool => GenerationContext::high_school(
                record.region,
                Intake::InitialRoster,
                self.skill(team, Skill::Scouting),
                record.facility,
            ),
            Tier::College => GenerationContext::college(record.region, Intake::InitialRoster),
            Tier::Pro => GenerationContext::professional(record.region),
        };
        let slots = missing_slots(record.tier, |_| 0);
        let registry = &mut self.registry;
        let class = generate_class(
            &mut || registry.allocate_player_id(),
            &slots,
            &context,
            &config.generation,
            rng,
        );
        for player in class {
            self.registry.insert_player(player, Some(team))?;
        }
        Ok(())
    }

    /// Opening pro deals: asking salaries scaled to fit a share of the cap,
    /// never below the league minimum.
    fn sign_initial_contracts<R: Rng + ?Sized>(
        &mut self,
        team: TeamId,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<(), InvariantViolation> {
        let policy = &config.free_agency;
        let asks: Vec<(PlayerId, u32)> = self
            .registry
            .roster(team)
            .iter()
            .map(|player| (player.id, asking_salary(player, policy)))
            .collect();
        let cap = self
            .registry
            .team(team)
            .ok_or(InvariantViolation::UnknownTeam(team))?
            .salary_cap()
            .unwrap_or(policy.salary_cap);
        let budget = u32_to_f64(cap) * INITIAL_PAYROLL_SHARE;
        let total: f64 = asks.iter().map(|(_, ask)| u32_to_f64(*ask)).sum();
        let scale = if total > budget { budget / total } else { 1.0 };
        for (id, ask) in asks {
            let salary = round_f64_to_u32(u32_to_f64(ask) * scale).max(policy.minimum_salary);
            let years = rng.gen_range(1..=INITIAL_CONTRACT_YEARS_MAX);
            if let Some(player) = self.registry.player_mut(id) {
                player.contract = Some(Contract {
                    salary,
                    years_remaining: years,
                });
            }
        }
        Ok(())
    }

    /// Team ids of a tier in division order.
    #[must_use]
    pub fn teams_in(&self, tier: Tier) -> Vec<TeamId> {
        self.divisions
            .iter()
            .filter(|division| division.tier == tier)
            .flat_map(|division| division.teams.iter().copied())
            .collect()
    }

    pub fn divisions_in(&self, tier: Tier) -> impl Iterator<Item = &Division> {
        self.divisions
            .iter()
            .filter(move |division| division.tier == tier)
    }

    #[must_use]
    pub fn division(&self, id: DivisionId) -> Option<&Division> {
        self.divisions.iter().find(|division| division.id == id)
    }

    /// The running manager's grade in `skill`, or the league baseline for
    /// teams without one.
    #[must_use]
    pub fn skill(&self, team: TeamId, skill: Skill) -> Rating {
        self.registry
            .team(team)
            .and_then(|record| record.manager)
            .and_then(|id| self.managers.get(&id))
            .map_or(Rating::from(AI_MANAGER_SKILL), |manager| {
                manager.skills.get(skill)
            })
    }

    /// [`Self::skill`] for many teams at once, for use while the registry
    /// is borrowed mutably.
    #[must_use]
    pub fn skill_table(&self, teams: &[TeamId], skill: Skill) -> BTreeMap<TeamId, Rating> {
        teams
            .iter()
            .map(|&team| (team, self.skill(team, skill)))
            .collect()
    }
}

const fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::HighSchool => "High School",
        Tier::College => "College",
        Tier::Pro => "Pro",
    }
}
