//! Player entity and the identifiers shared across the league.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeSet, Physical, Position, Rating, overall, potential};
use crate::constants::{COLLEGE_ELIGIBILITY_YEARS, HIGH_SCHOOL_SENIOR_YEAR};
use crate::team::TeamId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Competitive level a player or team belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    HighSchool,
    College,
    Pro,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::HighSchool, Self::College, Self::Pro];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::College => "college",
            Self::Pro => "pro",
        }
    }
}

/// Home regions. High-school divisions map one-to-one onto regions and
/// college programs are spread across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Texas,
    GreatPlains,
    MountainWest,
    PacificNorthwest,
    California,
    Southwest,
    SunBelt,
}

const REGION_SPAN: f64 = 11.0;

impl Region {
    pub const ALL: [Self; 10] = [
        Self::Northeast,
        Self::Southeast,
        Self::Midwest,
        Self::Texas,
        Self::GreatPlains,
        Self::MountainWest,
        Self::PacificNorthwest,
        Self::California,
        Self::Southwest,
        Self::SunBelt,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Northeast => "Northeast",
            Self::Southeast => "Southeast",
            Self::Midwest => "Midwest",
            Self::Texas => "Texas",
            Self::GreatPlains => "Great Plains",
            Self::MountainWest => "Mountain West",
            Self::PacificNorthwest => "Pacific Northwest",
            Self::California => "California",
            Self::Southwest => "Southwest",
            Self::SunBelt => "Sun Belt",
        }
    }

    /// Rough map coordinates used for distance.
    const fn coordinates(self) -> (f64, f64) {
        match self {
            Self::Northeast => (9.5, 8.0),
            Self::Southeast => (8.5, 3.5),
            Self::Midwest => (6.5, 7.0),
            Self::Texas => (4.5, 2.0),
            Self::GreatPlains => (4.5, 6.0),
            Self::MountainWest => (2.5, 6.0),
            Self::PacificNorthwest => (0.5, 9.0),
            Self::California => (0.0, 4.5),
            Self::Southwest => (2.0, 3.0),
            Self::SunBelt => (6.5, 2.5),
        }
    }

    /// Nearness on `0.0..=1.0`; 1.0 for the same region.
    #[must_use]
    pub fn proximity(self, other: Self) -> f64 {
        let (ax, ay) = self.coordinates();
        let (bx, by) = other.coordinates();
        let distance = (ax - bx).hypot(ay - by);
        (1.0 - distance / REGION_SPAN).clamp(0.0, 1.0)
    }

    /// Region at a wrapped index, for round-robin assignment.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Where a player stands in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Active,
    /// Unattached but still eligible to sign with a professional team.
    FreeAgent,
    /// Left the simulated pipeline. Kept for history.
    Retired,
}

/// College eligibility clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeStatus {
    /// Countable seasons left before draft eligibility, `0..=3`.
    pub eligibility_remaining: u8,
    pub seasons_enrolled: u8,
    pub redshirt_used: bool,
    /// Sitting out the current season.
    pub redshirting: bool,
    /// Returning for a final countable year after going undrafted.
    pub final_year: bool,
}

impl CollegeStatus {
    #[must_use]
    pub const fn incoming() -> Self {
        Self {
            eligibility_remaining: COLLEGE_ELIGIBILITY_YEARS,
            seasons_enrolled: 0,
            redshirt_used: false,
            redshirting: false,
            final_year: false,
        }
    }

    #[must_use]
    pub const fn draft_eligible(&self) -> bool {
        self.eligibility_remaining == 0 && !self.final_year
    }
}

/// Professional contract terms. Salary is in thousands of dollars per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub salary: u32,
    pub years_remaining: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: u8,
    pub tier: Tier,
    pub position: Position,
    pub physical: Physical,
    pub attributes: AttributeSet,
    /// Highest any attribute ceiling may ever be raised to. Fixed at generation.
    pub hidden_ceiling: Rating,
    pub region: Region,
    /// High-school class year, 1 (freshman) through 4 (senior).
    pub class_year: u8,
    pub college: Option<CollegeStatus>,
    pub contract: Option<Contract>,
    pub status: PlayerStatus,
    pub team: Option<TeamId>,
}

impl Player {
    #[must_use]
    pub fn overall(&self) -> Rating {
        overall(&self.attributes, self.physical, self.position)
    }

    #[must_use]
    pub fn potential(&self) -> Rating {
        potential(&self.attributes, self.physical, self.position)
    }

    #[must_use]
    pub const fn is_high_school_senior(&self) -> bool {
        matches!(self.tier, Tier::HighSchool)
            && self.class_year >= HIGH_SCHOOL_SENIOR_YEAR
            && matches!(self.status, PlayerStatus::Active)
    }

    #[must_use]
    pub fn is_draft_eligible(&self) -> bool {
        matches!(self.tier, Tier::College)
            && matches!(self.status, PlayerStatus::Active)
            && self.college.is_some_and(|status| status.draft_eligible())
    }

    /// Whether the player sits out the current season.
    #[must_use]
    pub fn is_redshirting(&self) -> bool {
        self.college.is_some_and(|status| status.redshirting)
    }

    #[must_use]
    pub fn salary(&self) -> u32 {
        self.contract.map_or(0, |contract| contract.salary)
    }
}
