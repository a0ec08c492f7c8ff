//! Error taxonomy for the simulation core.
//!
//! Configuration errors are raised before any state mutates. Invariant
//! violations indicate a logic bug or malformed caller input and abort the
//! current operation without committing partial state. Policy gaps are not
//! errors at all; see [`PolicyGap`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::ManagerId;
use crate::player::PlayerId;
use crate::team::TeamId;

/// Errors raised when league or policy configuration is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("division {division} has {count} teams; schedules need an even count of at least two")]
    OddDivision { division: String, count: usize },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: usize,
        value: usize,
    },
    #[error("engine configuration could not be parsed: {0}")]
    Parse(String),
}

/// A broken consistency rule. Always aborts the operation that found it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("player {0:?} is not registered")]
    UnknownPlayer(PlayerId),
    #[error("team {0:?} is not registered")]
    UnknownTeam(TeamId),
    #[error("manager {0:?} is not registered")]
    UnknownManager(ManagerId),
    #[error("player {player:?} appears on rosters of {first:?} and {second:?}")]
    DuplicateRosterEntry {
        player: PlayerId,
        first: TeamId,
        second: TeamId,
    },
    #[error("player {player:?} points at {recorded:?} but is rostered by {actual:?}")]
    RosterMismatch {
        player: PlayerId,
        recorded: Option<TeamId>,
        actual: Option<TeamId>,
    },
    #[error("eligibility for {0:?} would drop below zero")]
    EligibilityUnderflow(PlayerId),
    #[error("redshirt for {0:?} was already used")]
    RedshirtReused(PlayerId),
    #[error("skill spend of {requested} exceeds {available} unspent points")]
    SkillPointsOverspent { requested: u32, available: u32 },
    #[error("schedule for {0} is already complete")]
    ScheduleComplete(String),
    #[error("fixture in week {week} lists team {team:?} more than once")]
    DoubleBooked { week: u16, team: TeamId },
    #[error("results staged for week {week} do not match its fixtures")]
    FixtureMismatch { week: u16 },
}

/// Recoverable situations a policy had no rule for. Recorded and logged,
/// never dropping the player involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyGap {
    /// A senior finished recruiting without any scholarship offer.
    NoOffers { player: PlayerId },
    /// A pro team could not fit a rookie contract under its cap.
    PickForfeited { team: TeamId, round: u8 },
    /// A free agent drew no affordable bid this offseason.
    Unsigned { player: PlayerId },
    /// A roster had no player at a position the box score needs.
    EmptyPosition { team: TeamId },
}

/// Umbrella error for orchestration entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Trade(#[from] crate::movement::trade::TradeError),
    #[error("season advance cancelled before commit")]
    Cancelled,
    #[error("operation not valid during {0}")]
    WrongPhase(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_converts_into_engine_error() {
        let err: EngineError = InvariantViolation::UnknownPlayer(PlayerId(7)).into();
        assert!(matches!(
            err,
            EngineError::Invariant(InvariantViolation::UnknownPlayer(PlayerId(7)))
        ));
    }

    #[test]
    fn configuration_messages_name_the_field() {
        let err = ConfigurationError::RangeViolation {
            field: "proximity_weight",
            min: 0.0,
            max: 1.0,
            value: 2.0,
        };
        assert!(err.to_string().contains("proximity_weight"));
    }
}
