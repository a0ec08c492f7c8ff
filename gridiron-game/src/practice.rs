//! Practice plans and the drills behind them.
//!
//! Every team sets one focus for its offense and one for its defense. A focus
//! is a table of drills, each naming the attribute it trains, the positions
//! that take part and a rate multiplier (1.0 for a primary drill, lower for
//! secondary work). Special teams practice with neither unit.

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Attribute as A, Position, Position as P, PositionGroup};

/// One line of a practice table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drill {
    pub attribute: Attribute,
    pub positions: &'static [Position],
    pub rate: f64,
}

const fn drill(attribute: Attribute, positions: &'static [Position], rate: f64) -> Drill {
    Drill {
        attribute,
        positions,
        rate,
    }
}

const OFFENSE: &[Position] = &[
    P::QB,
    P::RB,
    P::FB,
    P::WR,
    P::TE,
    P::LT,
    P::LG,
    P::C,
    P::RG,
    P::RT,
];
const LINE: &[Position] = &[P::LT, P::LG, P::C, P::RG, P::RT];
const BLOCKERS: &[Position] = &[P::LT, P::LG, P::C, P::RG, P::RT, P::FB, P::TE];
const LINE_AND_BACKS: &[Position] = &[P::LT, P::LG, P::C, P::RG, P::RT, P::RB, P::FB];
const PASSER: &[Position] = &[P::QB];
const BACKS: &[Position] = &[P::RB, P::FB];
const BACKS_AND_PASSER: &[Position] = &[P::RB, P::FB, P::QB];
const PASSER_AND_RB: &[Position] = &[P::QB, P::RB];
const RECEIVERS: &[Position] = &[P::WR, P::TE];
const HANDS: &[Position] = &[P::WR, P::TE, P::RB];
const BALL_CARRIERS: &[Position] = &[P::RB, P::FB, P::WR, P::TE];
const SKILL: &[Position] = &[P::QB, P::RB, P::FB, P::WR, P::TE];

const DEFENSE: &[Position] = &[P::DE, P::DT, P::NT, P::OLB, P::ILB, P::CB, P::S];
const DEFENSIVE_LINE: &[Position] = &[P::DE, P::DT, P::NT];
const RUSHERS: &[Position] = &[P::DE, P::DT, P::NT, P::OLB];
const FRONT_SEVEN: &[Position] = &[P::DE, P::DT, P::NT, P::OLB, P::ILB];
const EDGE: &[Position] = &[P::DE, P::OLB];
const INTERIOR: &[Position] = &[P::DE, P::DT, P::NT, P::ILB];
const LINEBACKERS: &[Position] = &[P::OLB, P::ILB];
const BLITZERS: &[Position] = &[P::OLB, P::ILB, P::DE];
const BLITZ_SPEED: &[Position] = &[P::OLB, P::ILB, P::S];
const SECONDARY: &[Position] = &[P::CB, P::S];
const COVER: &[Position] = &[P::CB, P::S, P::OLB, P::ILB];
const READERS: &[Position] = &[P::CB, P::S, P::ILB];

const OFFENSE_STRENGTH_CONDITIONING: &[Drill] = &[
    drill(A::Speed, OFFENSE, 1.0),
    drill(A::Acceleration, OFFENSE, 1.0),
    drill(A::LateralQuickness, OFFENSE, 1.0),
    drill(A::LowerBodyStrength, OFFENSE, 1.0),
    drill(A::UpperBodyStrength, OFFENSE, 1.0),
    drill(A::VerticalJump, OFFENSE, 0.8),
    drill(A::BroadJump, OFFENSE, 0.8),
];

const OFFENSE_PASS_GAME: &[Drill] = &[
    drill(A::ShortAccuracy, PASSER, 1.0),
    drill(A::MidAccuracy, PASSER, 1.0),
    drill(A::DeepAccuracy, PASSER, 1.0),
    drill(A::ThrowUnderPressure, PASSER, 1.0),
    drill(A::ArmStrength, PASSER, 0.9),
    drill(A::Vision, PASSER, 0.7),
    drill(A::Catching, HANDS, 1.0),
    drill(A::RouteRunning, RECEIVERS, 1.0),
    drill(A::PassProtection, LINE, 1.0),
    drill(A::Familiarity, OFFENSE, 0.5),
];

const OFFENSE_RUN_GAME: &[Drill] = &[
    drill(A::RunBlock, BLOCKERS, 1.0),
    drill(A::BallSecurity, BALL_CARRIERS, 1.0),
    drill(A::Vision, BACKS_AND_PASSER, 0.9),
    drill(A::LowerBodyStrength, LINE_AND_BACKS, 0.8),
    drill(A::Scrambling, PASSER, 0.8),
    drill(A::Familiarity, OFFENSE, 0.5),
];

const OFFENSE_SCREEN_QUICK: &[Drill] = &[
    drill(A::ShortAccuracy, PASSER, 1.0),
    drill(A::LateralQuickness, SKILL, 1.0),
    drill(A::Catching, HANDS, 1.0),
    drill(A::RouteRunning, RECEIVERS, 0.8),
    drill(A::RunBlock, LINE, 0.7),
    drill(A::Vision, PASSER_AND_RB, 0.6),
];

const OFFENSE_RED_ZONE: &[Drill] = &[
    drill(A::ShortAccuracy, PASSER, 1.0),
    drill(A::ThrowUnderPressure, PASSER, 0.9),
    drill(A::RunBlock, BLOCKERS, 0.9),
    drill(A::BallSecurity, BACKS, 0.9),
    drill(A::Catching, HANDS, 0.9),
    drill(A::VerticalJump, RECEIVERS, 0.6),
];

const OFFENSE_PLAY_ACTION: &[Drill] = &[
    drill(A::MidAccuracy, PASSER, 1.0),
    drill(A::DeepAccuracy, PASSER, 0.9),
    drill(A::Vision, PASSER, 1.0),
    drill(A::RunBlock, LINE, 0.9),
    drill(A::RouteRunning, RECEIVERS, 0.8),
    drill(A::Familiarity, OFFENSE, 0.5),
];

const OFFENSE_TWO_MINUTE: &[Drill] = &[
    drill(A::ShortAccuracy, PASSER, 1.0),
    drill(A::Catching, HANDS, 0.9),
    drill(A::Speed, SKILL, 0.8),
    drill(A::Acceleration, SKILL, 0.8),
    drill(A::PassProtection, LINE, 0.7),
    drill(A::Familiarity, OFFENSE, 0.6),
];

const OFFENSE_BALANCED: &[Drill] = &[
    drill(A::Speed, OFFENSE, 0.6),
    drill(A::Acceleration, OFFENSE, 0.6),
    drill(A::ShortAccuracy, PASSER, 0.6),
    drill(A::MidAccuracy, PASSER, 0.6),
    drill(A::Catching, HANDS, 0.6),
    drill(A::RouteRunning, RECEIVERS, 0.6),
    drill(A::RunBlock, BLOCKERS, 0.6),
    drill(A::PassProtection, LINE, 0.6),
    drill(A::BallSecurity, BACKS, 0.5),
    drill(A::Familiarity, OFFENSE, 0.5),
];

const DEFENSE_STRENGTH_CONDITIONING: &[Drill] = &[
    drill(A::Speed, DEFENSE, 1.0),
    drill(A::Acceleration, DEFENSE, 1.0),
    drill(A::LateralQuickness, DEFENSE, 1.0),
    drill(A::LowerBodyStrength, DEFENSE, 1.0),
    drill(A::UpperBodyStrength, DEFENSE, 1.0),
    drill(A::VerticalJump, DEFENSE, 0.8),
    drill(A::BroadJump, DEFENSE, 0.8),
];

const DEFENSE_PASS_RUSH: &[Drill] = &[
    drill(A::PassRush, RUSHERS, 1.0),
    drill(A::BlockShedding, FRONT_SEVEN, 1.0),
    drill(A::Speed, EDGE, 0.8),
    drill(A::Acceleration, EDGE, 0.8),
    drill(A::UpperBodyStrength, DEFENSIVE_LINE, 0.7),
    drill(A::LowerBodyStrength, DEFENSIVE_LINE, 0.7),
];

const DEFENSE_TAKEAWAYS: &[Drill] = &[
    drill(A::Coverage, COVER, 1.0),
    drill(A::Tackling, DEFENSE, 1.0),
    drill(A::Pursuit, DEFENSE, 1.0),
    drill(A::Vision, READERS, 0.8),
    drill(A::VerticalJump, SECONDARY, 0.5),
];

const DEFENSE_ZONE_COVERAGE: &[Drill] = &[
    drill(A::Coverage, COVER, 1.0),
    drill(A::Vision, READERS, 1.0),
    drill(A::Pursuit, DEFENSE, 0.8),
    drill(A::Tackling, COVER, 0.7),
];

const DEFENSE_MAN_COVERAGE: &[Drill] = &[
    drill(A::Coverage, SECONDARY, 1.0),
    drill(A::Speed, SECONDARY, 0.9),
    drill(A::Acceleration, SECONDARY, 0.9),
    drill(A::LateralQuickness, SECONDARY, 1.0),
    drill(A::Tackling, SECONDARY, 0.6),
];

const DEFENSE_STOPPING_RUSH: &[Drill] = &[
    drill(A::Tackling, DEFENSE, 1.0),
    drill(A::BlockShedding, FRONT_SEVEN, 1.0),
    drill(A::LowerBodyStrength, INTERIOR, 0.9),
    drill(A::UpperBodyStrength, DEFENSIVE_LINE, 0.8),
    drill(A::Pursuit, COVER, 0.8),
];

const DEFENSE_BLITZ_PACKAGES: &[Drill] = &[
    drill(A::PassRush, BLITZERS, 1.0),
    drill(A::Speed, BLITZ_SPEED, 0.9),
    drill(A::Pursuit, LINEBACKERS, 0.9),
    drill(A::BlockShedding, LINEBACKERS, 0.8),
    drill(A::Tackling, COVER, 0.6),
];

const DEFENSE_THIRD_DOWN: &[Drill] = &[
    drill(A::PassRush, RUSHERS, 0.9),
    drill(A::Coverage, COVER, 0.9),
    drill(A::BlockShedding, FRONT_SEVEN, 0.7),
    drill(A::Pursuit, DEFENSE, 0.7),
    drill(A::Vision, READERS, 0.6),
];

const DEFENSE_BALANCED: &[Drill] = &[
    drill(A::PassRush, RUSHERS, 0.5),
    drill(A::Coverage, COVER, 0.5),
    drill(A::Tackling, DEFENSE, 0.5),
    drill(A::BlockShedding, FRONT_SEVEN, 0.5),
    drill(A::Pursuit, DEFENSE, 0.5),
    drill(A::Speed, DEFENSE, 0.4),
    drill(A::LowerBodyStrength, INTERIOR, 0.4),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffenseFocus {
    StrengthConditioning,
    PassGame,
    RunGame,
    ScreenQuick,
    RedZone,
    PlayAction,
    TwoMinute,
    #[default]
    Balanced,
}

impl OffenseFocus {
    pub const ALL: [Self; 8] = [
        Self::StrengthConditioning,
        Self::PassGame,
        Self::RunGame,
        Self::ScreenQuick,
        Self::RedZone,
        Self::PlayAction,
        Self::TwoMinute,
        Self::Balanced,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrengthConditioning => "Strength & Conditioning",
            Self::PassGame => "Pass Game",
            Self::RunGame => "Run Game",
            Self::ScreenQuick => "Screen & Quick Game",
            Self::RedZone => "Red Zone",
            Self::PlayAction => "Play Action",
            Self::TwoMinute => "Two-Minute / Tempo",
            Self::Balanced => "Balanced",
        }
    }

    #[must_use]
    pub const fn drills(self) -> &'static [Drill] {
        match self {
            Self::StrengthConditioning => OFFENSE_STRENGTH_CONDITIONING,
            Self::PassGame => OFFENSE_PASS_GAME,
            Self::RunGame => OFFENSE_RUN_GAME,
            Self::ScreenQuick => OFFENSE_SCREEN_QUICK,
            Self::RedZone => OFFENSE_RED_ZONE,
            Self::PlayAction => OFFENSE_PLAY_ACTION,
            Self::TwoMinute => OFFENSE_TWO_MINUTE,
            Self::Balanced => OFFENSE_BALANCED,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseFocus {
    StrengthConditioning,
    PassRush,
    Takeaways,
    ZoneCoverage,
    ManCoverage,
    StoppingRush,
    BlitzPackages,
    ThirdDown,
    #[default]
    Balanced,
}

impl DefenseFocus {
    pub const ALL: [Self; 9] = [
        Self::StrengthConditioning,
        Self::PassRush,
        Self::Takeaways,
        Self::ZoneCoverage,
        Self::ManCoverage,
        Self::StoppingRush,
        Self::BlitzPackages,
        Self::ThirdDown,
        Self::Balanced,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrengthConditioning => "Strength & Conditioning",
            Self::PassRush => "Pass Rush",
            Self::Takeaways => "Take-aways",
            Self::ZoneCoverage => "Zone Coverage",
            Self::ManCoverage => "Man Coverage",
            Self::StoppingRush => "Stopping the Rush",
            Self::BlitzPackages => "Blitz Packages",
            Self::ThirdDown => "Third Down",
            Self::Balanced => "Balanced",
        }
    }

    #[must_use]
    pub const fn drills(self) -> &'static [Drill] {
        match self {
            Self::StrengthConditioning => DEFENSE_STRENGTH_CONDITIONING,
            Self::PassRush => DEFENSE_PASS_RUSH,
            Self::Takeaways => DEFENSE_TAKEAWAYS,
            Self::ZoneCoverage => DEFENSE_ZONE_COVERAGE,
            Self::ManCoverage => DEFENSE_MAN_COVERAGE,
            Self::StoppingRush => DEFENSE_STOPPING_RUSH,
            Self::BlitzPackages => DEFENSE_BLITZ_PACKAGES,
            Self::ThirdDown => DEFENSE_THIRD_DOWN,
            Self::Balanced => DEFENSE_BALANCED,
        }
    }
}

/// A team's practice plan. New teams practice balanced on both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PracticeFocus {
    #[serde(default)]
    pub offense: OffenseFocus,
    #[serde(default)]
    pub defense: DefenseFocus,
}

impl PracticeFocus {
    #[must_use]
    pub const fn new(offense: OffenseFocus, defense: DefenseFocus) -> Self {
        Self { offense, defense }
    }

    /// Attributes `position` trains under this plan, with their rates.
    pub fn drills_for(self, position: Position) -> impl Iterator<Item = (Attribute, f64)> {
        let drills: &'static [Drill] = match position.group() {
            PositionGroup::Offense => self.offense.drills(),
            PositionGroup::Defense => self.defense.drills(),
            PositionGroup::Special => &[],
        };
        drills
            .iter()
            .filter(move |drill| drill.positions.contains(&position))
            .map(|drill| (drill.attribute, drill.rate))
    }
}
