//! Gridiron GM Game Engine
//!
//! Platform-agnostic core logic for a multi-tier American football career
//! simulation: high school, college and professional leagues joined by a
//! recruiting, draft and free-agency pipeline. No UI or storage backends live
//! here.

pub mod attributes;
pub mod career;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod league;
pub mod manager;
pub mod movement;
pub mod names;
pub mod numbers;
pub mod player;
pub mod practice;
pub mod progression;
pub mod registry;
pub mod resolver;
pub mod result;
pub mod rng;
pub mod schedule;
pub mod standings;
pub mod stats;
pub mod team;

// Re-export commonly used types
pub use attributes::{Attribute, AttributeSet, Physical, Position, PositionGroup, Rating};
pub use career::{Career, CareerPhase, OffseasonReport, SeasonOutcome, SeasonSummary};
pub use config::{
    DraftPolicy, EngineConfig, FreeAgencyPolicy, GenerationConfig, LeagueLayout,
    ProgressionConfig, RecruitingPolicy, ResolverConfig, UnrecruitedPolicy,
};
pub use error::{ConfigurationError, EngineError, InvariantViolation, PolicyGap};
pub use generator::{GenerationContext, Intake, generate_class, generate_player};
pub use league::{Division, League};
pub use manager::{Manager, ManagerId, ManagerSkills, Skill, SkillAllocation};
pub use movement::{TradeError, TradeOutcome, TradeProposal};
pub use player::{CollegeStatus, Contract, Player, PlayerId, PlayerStatus, Region, Tier};
pub use practice::{DefenseFocus, OffenseFocus, PracticeFocus};
pub use progression::{SeasonReview, develop_player, practice_player};
pub use registry::Registry;
pub use resolver::{TeamSheet, resolve_game};
pub use result::{GameResult, Outcome, PlayerLine, TeamBox};
pub use rng::{RngStreams, Stream};
pub use schedule::{Fixture, PlayedGame, Schedule, build_schedule};
pub use standings::{Standings, StandingsRow};
pub use stats::{CategoryLeaders, Leader, SeasonStats, StatCategory, season_stats, stat_leaders};
pub use team::{DivisionId, Finances, Team, TeamId};

/// Source of engine configuration.
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the tuning and policy configuration for a new career.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    fn load_engine_config(&self) -> Result<EngineConfig, Self::Error>;
}

/// Loader backed by the configuration compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticData;

impl DataLoader for StaticData {
    type Error = ConfigurationError;

    fn load_engine_config(&self) -> Result<EngineConfig, Self::Error> {
        let config = EngineConfig::load_from_static();
        config.validate()?;
        Ok(config)
    }
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait CareerStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a career snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the career cannot be saved.
    fn save_career(&self, slot: &str, career: &Career) -> Result<(), Self::Error>;

    /// Load a career snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the career cannot be loaded.
    fn load_career(&self, slot: &str) -> Result<Option<Career>, Self::Error>;

    /// Delete a saved career
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_career(&self, slot: &str) -> Result<(), Self::Error>;
}

/// Entry point tying configuration and persistence to careers
pub struct CareerEngine<L, S>
where
    L: DataLoader,
    S: CareerStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> CareerEngine<L, S>
where
    L: DataLoader,
    S: CareerStorage,
{
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Start a new career for `manager` from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the league
    /// cannot be built from it.
    pub fn create_career(&self, seed: u64, manager: Manager) -> Result<Career, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let config = self.data_loader.load_engine_config().map_err(Into::into)?;
        Ok(Career::new(config, seed, manager)?)
    }

    /// Save a career
    ///
    /// # Errors
    ///
    /// Returns an error if the career cannot be saved.
    pub fn save_career(&self, slot: &str, career: &Career) -> Result<(), S::Error> {
        self.storage.save_career(slot, career)
    }

    /// Load a career and check it before handing it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be read, or if its configuration
    /// or rosters are inconsistent.
    pub fn load_career(&self, slot: &str) -> Result<Option<Career>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let Some(career) = self.storage.load_career(slot).map_err(Into::into)? else {
            return Ok(None);
        };
        career.config().validate()?;
        career.league().registry.verify_integrity()?;
        Ok(Some(career))
    }

    /// Delete a saved career
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_career(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.delete_career(slot)
    }
}
