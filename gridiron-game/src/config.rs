//! Tunable policy configuration.
//!
//! Structural constants live in [`crate::constants`]; everything designers
//! are expected to tune between releases lives here, loaded from the
//! compiled-in `engine.json` with per-field serde defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const DEFAULT_ENGINE_DATA: &str = include_str!("../assets/data/engine.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueLayout {
    #[serde(default = "LeagueLayout::default_high_school_divisions")]
    pub high_school_divisions: usize,
    #[serde(default = "LeagueLayout::default_college_divisions")]
    pub college_divisions: usize,
    #[serde(default = "LeagueLayout::default_pro_divisions")]
    pub pro_divisions: usize,
    #[serde(default = "LeagueLayout::default_teams_per_division")]
    pub teams_per_division: usize,
}

impl LeagueLayout {
    const fn default_high_school_divisions() -> usize {
        10
    }

    const fn default_college_divisions() -> usize {
        3
    }

    const fn default_pro_divisions() -> usize {
        1
    }

    const fn default_teams_per_division() -> usize {
        10
    }
}

impl Default for LeagueLayout {
    fn default() -> Self {
        Self {
            high_school_divisions: Self::default_high_school_divisions(),
            college_divisions: Self::default_college_divisions(),
            pro_divisions: Self::default_pro_divisions(),
            teams_per_division: Self::default_teams_per_division(),
        }
    }
}

/// Game-day rules per tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Rating points added to the home side's unit ratings.
    #[serde(default)]
    pub home_field_bonus: f64,
    /// Whether high-school games may end level.
    #[serde(default)]
    pub high_school_ties: bool,
    /// Whether college games may end level. Pro games never do.
    #[serde(default)]
    pub college_ties: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            home_field_bonus: 0.0,
            high_school_ties: false,
            college_ties: false,
        }
    }
}

/// How scouting and facilities shape generated high-school classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "GenerationConfig::default_scouting_mean_shift")]
    pub scouting_mean_shift: f64,
    #[serde(default = "GenerationConfig::default_facility_mean_shift")]
    pub facility_mean_shift: f64,
    #[serde(default = "GenerationConfig::default_scouting_spread_narrowing")]
    pub scouting_spread_narrowing: f64,
    #[serde(default = "GenerationConfig::default_scouting_floor")]
    pub scouting_floor: f64,
}

impl GenerationConfig {
    const fn default_scouting_mean_shift() -> f64 {
        0.16
    }

    const fn default_facility_mean_shift() -> f64 {
        0.06
    }

    const fn default_scouting_spread_narrowing() -> f64 {
        0.35
    }

    const fn default_scouting_floor() -> f64 {
        0.2
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            scouting_mean_shift: Self::default_scouting_mean_shift(),
            facility_mean_shift: Self::default_facility_mean_shift(),
            scouting_spread_narrowing: Self::default_scouting_spread_narrowing(),
            scouting_floor: Self::default_scouting_floor(),
        }
    }
}

/// What happens to seniors nobody offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnrecruitedPolicy {
    #[default]
    Retire,
    WalkOnPool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitingPolicy {
    #[serde(default = "RecruitingPolicy::default_proximity_weight")]
    pub proximity_weight: f64,
    #[serde(default = "RecruitingPolicy::default_prestige_weight")]
    pub prestige_weight: f64,
    #[serde(default = "RecruitingPolicy::default_playing_time_weight")]
    pub playing_time_weight: f64,
    #[serde(default = "RecruitingPolicy::default_persuasion_weight")]
    pub persuasion_weight: f64,
    #[serde(default = "RecruitingPolicy::default_rounds")]
    pub rounds: u8,
    #[serde(default = "RecruitingPolicy::default_scholarships_per_class")]
    pub scholarships_per_class: u8,
    /// Live offers a single recruit may hold in one round.
    #[serde(default = "RecruitingPolicy::default_max_offers_per_recruit")]
    pub max_offers_per_recruit: u8,
    #[serde(default)]
    pub unrecruited: UnrecruitedPolicy,
}

impl RecruitingPolicy {
    const fn default_proximity_weight() -> f64 {
        0.30
    }

    const fn default_prestige_weight() -> f64 {
        0.35
    }

    const fn default_playing_time_weight() -> f64 {
        0.25
    }

    const fn default_persuasion_weight() -> f64 {
        0.10
    }

    const fn default_rounds() -> u8 {
        6
    }

    const fn default_scholarships_per_class() -> u8 {
        crate::constants::COLLEGE_SCHOLARSHIPS_PER_CLASS
    }

    const fn default_max_offers_per_recruit() -> u8 {
        5
    }
}

impl Default for RecruitingPolicy {
    fn default() -> Self {
        Self {
            proximity_weight: Self::default_proximity_weight(),
            prestige_weight: Self::default_prestige_weight(),
            playing_time_weight: Self::default_playing_time_weight(),
            persuasion_weight: Self::default_persuasion_weight(),
            rounds: Self::default_rounds(),
            scholarships_per_class: Self::default_scholarships_per_class(),
            max_offers_per_recruit: Self::default_max_offers_per_recruit(),
            unrecruited: UnrecruitedPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPolicy {
    #[serde(default = "DraftPolicy::default_rounds")]
    pub rounds: u8,
    #[serde(default = "DraftPolicy::default_overall_weight")]
    pub overall_weight: f64,
    #[serde(default = "DraftPolicy::default_potential_weight")]
    pub potential_weight: f64,
    #[serde(default = "DraftPolicy::default_scarcity_weight")]
    pub scarcity_weight: f64,
    #[serde(default = "DraftPolicy::default_age_weight")]
    pub age_weight: f64,
    /// Rookie salary for the first overall pick, in thousands.
    #[serde(default = "DraftPolicy::default_rookie_scale_top")]
    pub rookie_scale_top: u32,
    #[serde(default = "DraftPolicy::default_rookie_scale_floor")]
    pub rookie_scale_floor: u32,
}

impl DraftPolicy {
    const fn default_rounds() -> u8 {
        2
    }

    const fn default_overall_weight() -> f64 {
        0.45
    }

    const fn default_potential_weight() -> f64 {
        0.45
    }

    const fn default_scarcity_weight() -> f64 {
        10.0
    }

    const fn default_age_weight() -> f64 {
        1.5
    }

    const fn default_rookie_scale_top() -> u32 {
        8_000
    }

    const fn default_rookie_scale_floor() -> u32 {
        750
    }
}

impl Default for DraftPolicy {
    fn default() -> Self {
        Self {
            rounds: Self::default_rounds(),
            overall_weight: Self::default_overall_weight(),
            potential_weight: Self::default_potential_weight(),
            scarcity_weight: Self::default_scarcity_weight(),
            age_weight: Self::default_age_weight(),
            rookie_scale_top: Self::default_rookie_scale_top(),
            rookie_scale_floor: Self::default_rookie_scale_floor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgencyPolicy {
    /// Salary cap per pro team, in thousands.
    #[serde(default = "FreeAgencyPolicy::default_salary_cap")]
    pub salary_cap: u32,
    #[serde(default = "FreeAgencyPolicy::default_minimum_salary")]
    pub minimum_salary: u32,
    /// Asking salary added per overall point above 50, in thousands.
    #[serde(default = "FreeAgencyPolicy::default_salary_per_point")]
    pub salary_per_point: u32,
    /// Bid premium for a team with no one at the player's position.
    #[serde(default = "FreeAgencyPolicy::default_need_bonus")]
    pub need_bonus: f64,
    #[serde(default = "FreeAgencyPolicy::default_contract_years")]
    pub contract_years: u8,
    #[serde(default = "FreeAgencyPolicy::default_retirement_age")]
    pub retirement_age: u8,
}

impl FreeAgencyPolicy {
    const fn default_salary_cap() -> u32 {
        255_000
    }

    const fn default_minimum_salary() -> u32 {
        750
    }

    const fn default_salary_per_point() -> u32 {
        300
    }

    const fn default_need_bonus() -> f64 {
        0.25
    }

    const fn default_contract_years() -> u8 {
        2
    }

    const fn default_retirement_age() -> u8 {
        35
    }
}

impl Default for FreeAgencyPolicy {
    fn default() -> Self {
        Self {
            salary_cap: Self::default_salary_cap(),
            minimum_salary: Self::default_minimum_salary(),
            salary_per_point: Self::default_salary_per_point(),
            need_bonus: Self::default_need_bonus(),
            contract_years: Self::default_contract_years(),
            retirement_age: Self::default_retirement_age(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Renown per standings place finished above expectation.
    #[serde(default = "ProgressionConfig::default_renown_gain_per_place")]
    pub renown_gain_per_place: f64,
    /// Renown per standings place finished below expectation.
    #[serde(default = "ProgressionConfig::default_renown_loss_per_place")]
    pub renown_loss_per_place: f64,
    #[serde(default = "ProgressionConfig::default_skill_points_base")]
    pub skill_points_base: i32,
    /// Renown needed per bonus skill point.
    #[serde(default = "ProgressionConfig::default_renown_per_bonus_point")]
    pub renown_per_bonus_point: f64,
    #[serde(default = "ProgressionConfig::default_development_passes")]
    pub development_passes: u8,
    /// Growth multiplier for attributes the player's position does not use.
    #[serde(default = "ProgressionConfig::default_off_position_rate")]
    pub off_position_rate: f64,
    #[serde(default = "ProgressionConfig::default_unlock_chance")]
    pub unlock_chance: f64,
    #[serde(default = "ProgressionConfig::default_decline_age")]
    pub decline_age: u8,
    /// Strength of one in-season practice week.
    #[serde(default = "ProgressionConfig::default_practice_intensity")]
    pub practice_intensity: f64,
    /// Offseason growth rate relative to a practice week.
    #[serde(default = "ProgressionConfig::default_offseason_multiplier")]
    pub offseason_multiplier: f64,
    /// High-school training camp rate relative to a practice week.
    #[serde(default = "ProgressionConfig::default_training_camp_multiplier")]
    pub training_camp_multiplier: f64,
}

impl ProgressionConfig {
    const fn default_renown_gain_per_place() -> f64 {
        2.0
    }

    const fn default_renown_loss_per_place() -> f64 {
        1.0
    }

    const fn default_skill_points_base() -> i32 {
        2
    }

    const fn default_renown_per_bonus_point() -> f64 {
        10.0
    }

    const fn default_development_passes() -> u8 {
        2
    }

    const fn default_off_position_rate() -> f64 {
        0.3
    }

    const fn default_unlock_chance() -> f64 {
        0.25
    }

    const fn default_decline_age() -> u8 {
        30
    }

    const fn default_practice_intensity() -> f64 {
        1.0
    }

    const fn default_offseason_multiplier() -> f64 {
        2.0
    }

    const fn default_training_camp_multiplier() -> f64 {
        2.0
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            renown_gain_per_place: Self::default_renown_gain_per_place(),
            renown_loss_per_place: Self::default_renown_loss_per_place(),
            skill_points_base: Self::default_skill_points_base(),
            renown_per_bonus_point: Self::default_renown_per_bonus_point(),
            development_passes: Self::default_development_passes(),
            off_position_rate: Self::default_off_position_rate(),
            unlock_chance: Self::default_unlock_chance(),
            decline_age: Self::default_decline_age(),
            practice_intensity: Self::default_practice_intensity(),
            offseason_multiplier: Self::default_offseason_multiplier(),
            training_camp_multiplier: Self::default_training_camp_multiplier(),
        }
    }
}

/// Every tunable policy in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub league: LeagueLayout,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub recruiting: RecruitingPolicy,
    #[serde(default)]
    pub draft: DraftPolicy,
    #[serde(default)]
    pub free_agency: FreeAgencyPolicy,
    #[serde(default)]
    pub progression: ProgressionConfig,
}

impl EngineConfig {
    /// Compiled-in configuration, falling back to code defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ENGINE_DATA).unwrap_or_default()
    }

    /// Parse and validate a caller-supplied configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| ConfigurationError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every invariant the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let teams = self.league.teams_per_division;
        if teams < 2 || teams % 2 != 0 {
            return Err(ConfigurationError::OddDivision {
                division: "every division".to_string(),
                count: teams,
            });
        }
        for (field, value) in [
            ("high_school_divisions", self.league.high_school_divisions),
            ("college_divisions", self.league.college_divisions),
            ("pro_divisions", self.league.pro_divisions),
        ] {
            if value == 0 {
                return Err(ConfigurationError::MinViolation {
                    field,
                    min: 1,
                    value,
                });
            }
        }
        let weights = [
            ("proximity_weight", self.recruiting.proximity_weight),
            ("prestige_weight", self.recruiting.prestige_weight),
            ("playing_time_weight", self.recruiting.playing_time_weight),
            ("persuasion_weight", self.recruiting.persuasion_weight),
            ("scouting_spread_narrowing", self.generation.scouting_spread_narrowing),
            ("unlock_chance", self.progression.unlock_chance),
            ("off_position_rate", self.progression.off_position_rate),
        ];
        for (field, value) in weights {
            check_range(field, value, 0.0, 1.0)?;
        }
        check_range("home_field_bonus", self.resolver.home_field_bonus, -10.0, 10.0)?;
        for (field, value) in [
            ("practice_intensity", self.progression.practice_intensity),
            ("offseason_multiplier", self.progression.offseason_multiplier),
            ("training_camp_multiplier", self.progression.training_camp_multiplier),
        ] {
            check_range(field, value, 0.0, 5.0)?;
        }
        for (field, value) in [
            ("recruiting.rounds", self.recruiting.rounds),
            ("recruiting.max_offers_per_recruit", self.recruiting.max_offers_per_recruit),
        ] {
            if value == 0 {
                return Err(ConfigurationError::MinViolation {
                    field,
                    min: 1,
                    value: 0,
                });
            }
        }
        if self.free_agency.minimum_salary > self.free_agency.salary_cap {
            return Err(ConfigurationError::RangeViolation {
                field: "minimum_salary",
                min: 0.0,
                max: f64::from(self.free_agency.salary_cap),
                value: f64::from(self.free_agency.minimum_salary),
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}
