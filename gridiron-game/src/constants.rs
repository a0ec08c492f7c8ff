//! Centralized structural and balance constants for the Gridiron simulation.
//!
//! Structural values (rating scale, roster sizes, eligibility clock) and the
//! box-score math live here. Policy weights that designers tune between
//! releases live in `assets/data/engine.json` instead.

// Rating scale -------------------------------------------------------------
pub const RATING_MAX: u8 = 99;

// Roster sizes --------------------------------------------------------------
pub(crate) const HIGH_SCHOOL_ROSTER_SIZE: usize = 30;
pub(crate) const COLLEGE_ROSTER_SIZE: usize = 40;
pub(crate) const PRO_ROSTER_SIZE: usize = 53;
pub(crate) const HIGH_SCHOOL_FRESHMEN_PER_TEAM: usize = 8;
pub(crate) const COLLEGE_SCHOLARSHIPS_PER_CLASS: u8 = 8;

// Eligibility clock ---------------------------------------------------------
pub(crate) const COLLEGE_ELIGIBILITY_YEARS: u8 = 3;
pub(crate) const COLLEGE_MAX_SEASONS: u8 = 5;
pub(crate) const HIGH_SCHOOL_SENIOR_YEAR: u8 = 4;

// Generation ----------------------------------------------------------------
pub(crate) const DIAMOND_BASE_CHANCE: f64 = 0.07;
pub(crate) const DIAMOND_SCOUTING_BONUS: f64 = 0.05;
pub(crate) const DEVELOPMENT_GAP_MAX: u8 = 28;
pub(crate) const LEAN_BUILD_WPI: f64 = 2.7;
pub(crate) const HEAVY_BUILD_WPI: f64 = 3.5;
pub(crate) const BUILD_FIT_MARGIN: f64 = 0.5;
pub(crate) const ARM_LENGTH_MIN_IN: f64 = 28.0;
pub(crate) const ARM_LENGTH_MAX_IN: f64 = 36.0;
pub(crate) const HIDDEN_CEILING_HEADROOM_MIN: u8 = 4;
pub(crate) const HIDDEN_CEILING_HEADROOM_MAX: u8 = 18;

// Box-score model ----------------------------------------------------------
pub(crate) const PLAYS_MIN: u32 = 57;
pub(crate) const PLAYS_MAX: u32 = 72;
pub(crate) const RUN_SHARE_BASE: f64 = 0.43;
pub(crate) const RUN_SHARE_MIN: f64 = 0.28;
pub(crate) const RUN_SHARE_MAX: f64 = 0.62;
pub(crate) const SACK_RATE_BASE: f64 = 0.065;
pub(crate) const YARDS_PER_CARRY_BASE: f64 = 4.3;
pub(crate) const YARDS_PER_CARRY_MIN: f64 = 1.5;
pub(crate) const YARDS_PER_CARRY_MAX: f64 = 7.5;
pub(crate) const COMPLETION_BASE: f64 = 0.63;
pub(crate) const YARDS_PER_ATTEMPT_BASE: f64 = 7.0;
pub(crate) const YARDS_PER_ATTEMPT_MIN: f64 = 3.5;
pub(crate) const YARDS_PER_ATTEMPT_MAX: f64 = 12.0;
pub(crate) const INTERCEPTION_BASE: f64 = 0.025;
pub(crate) const FUMBLE_PER_CARRY: f64 = 0.015;
pub(crate) const FUMBLE_PER_SACK: f64 = 0.08;
pub(crate) const PLAYS_PER_DRIVE_MIN: f64 = 5.5;
pub(crate) const PLAYS_PER_DRIVE_MAX: f64 = 7.0;
pub(crate) const DRIVES_MIN: u32 = 6;
pub(crate) const TD_RATE_BASE: f64 = 0.08;
pub(crate) const TD_RATE_MIN: f64 = 0.05;
pub(crate) const TD_RATE_MAX: f64 = 0.5;
pub(crate) const FIELD_GOAL_SHARE: f64 = 0.15;
pub(crate) const FIELD_GOAL_BASE: f64 = 0.72;
pub(crate) const EXTRA_POINT_BASE: f64 = 0.94;
pub(crate) const PICK_SIX_CHANCE: f64 = 0.12;
pub(crate) const FUMBLE_RETURN_TD_CHANCE: f64 = 0.08;
/// Saturation scale for rushing yards per drive before it feeds TD odds.
pub(crate) const RUSH_DRIVE_SATURATION: f64 = 22.0;
/// Saturation scale for passing yards per drive before it feeds TD odds.
pub(crate) const PASS_DRIVE_SATURATION: f64 = 30.0;
pub(crate) const DRIVE_YARDS_TD_SLOPE: f64 = 0.0085;
pub(crate) const IN_GAME_MANAGEMENT_MAX_BONUS: f64 = 3.0;

// Progression ----------------------------------------------------------------
pub(crate) const DEVELOPMENT_BASE_RATE: f64 = 3.0;
pub(crate) const TEAM_PRESTIGE_DRIFT: f64 = 0.3;
pub(crate) const STARTING_SKILL_POINTS: u32 = 25;
pub(crate) const STAT_LEADERS_PER_CATEGORY: usize = 5;

// Movement ------------------------------------------------------------------
/// Skill grade assumed for teams run by the league rather than a manager.
pub(crate) const AI_MANAGER_SKILL: u8 = 50;
pub(crate) const ROOKIE_CONTRACT_YEARS: u8 = 3;
pub(crate) const DRAFT_BASELINE_AGE: f64 = 21.0;
/// Share of the cap handed out as payroll when a league is created.
pub(crate) const INITIAL_PAYROLL_SHARE: f64 = 0.9;
pub(crate) const INITIAL_CONTRACT_YEARS_MAX: u8 = 4;

// Manager economy -----------------------------------------------------------
pub(crate) const HIGH_SCHOOL_RENOWN_MULTIPLIER: f64 = 1.0;
pub(crate) const COLLEGE_RENOWN_MULTIPLIER: f64 = 2.0;
pub(crate) const PRO_RENOWN_MULTIPLIER: f64 = 3.0;
/// Renown per point of finish bias, so meeting expectations near the top
/// still pays.
pub(crate) const RENOWN_FINISH_BONUS: f64 = 0.25;
pub(crate) const MANAGER_FACTOR_BASE: f64 = 0.7;
pub(crate) const MANAGER_FACTOR_SLOPE: f64 = 0.006;
pub(crate) const FACILITY_FACTOR_BASE: f64 = 0.8;
pub(crate) const FACILITY_FACTOR_SLOPE: f64 = 0.004;
pub(crate) const UNLOCK_STEP_MAX: u8 = 3;
pub(crate) const AGING_DECLINE_MAX: i32 = 2;
