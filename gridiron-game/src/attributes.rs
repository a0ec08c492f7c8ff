//! Bounded ratings, trainable attributes, and the per-position composite model.
//!
//! Every attribute is stored as a [`Rating`], which clamps to `0..=99` on
//! construction and arithmetic. Composite overall and potential are pure
//! functions of an [`AttributeSet`] and a [`Physical`] profile; neither is
//! ever stored.

use serde::{Deserialize, Serialize};

use crate::constants::{ARM_LENGTH_MAX_IN, ARM_LENGTH_MIN_IN, BUILD_FIT_MARGIN, RATING_MAX};
use crate::numbers::{round_f64_to_i32, round_f64_to_u8};

/// A value on the shared 0-99 scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(RATING_MAX);

    /// Clamp any integer onto the rating scale.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(value: i32) -> Self {
        let clamped = if value < 0 {
            0
        } else if value > RATING_MAX as i32 {
            RATING_MAX as i32
        } else {
            value
        };
        Self(clamped as u8)
    }

    /// Round and clamp a float onto the rating scale.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self(round_f64_to_u8(value, RATING_MAX))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Fraction of the full scale, `0.0..=1.0`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.as_f64() / f64::from(RATING_MAX)
    }

    #[must_use]
    pub const fn saturating_add(self, delta: i32) -> Self {
        Self::new(self.0 as i32 + delta)
    }

    #[must_use]
    pub const fn headroom(self, ceiling: Self) -> u8 {
        ceiling.0.saturating_sub(self.0)
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self::new(i32::from(value))
    }
}

/// Trainable attributes. Each carries a current value and a growth ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Speed,
    Acceleration,
    LateralQuickness,
    Vision,
    LowerBodyStrength,
    UpperBodyStrength,
    VerticalJump,
    BroadJump,
    KickPower,
    ArmStrength,
    RunBlock,
    PassRush,
    PassProtection,
    Scrambling,
    ShortAccuracy,
    MidAccuracy,
    DeepAccuracy,
    ThrowUnderPressure,
    BallSecurity,
    Catching,
    RouteRunning,
    Tackling,
    Coverage,
    BlockShedding,
    Pursuit,
    KickAccuracy,
    Familiarity,
}

pub const ATTRIBUTE_COUNT: usize = 27;

impl Attribute {
    pub const ALL: [Self; ATTRIBUTE_COUNT] = [
        Self::Speed,
        Self::Acceleration,
        Self::LateralQuickness,
        Self::Vision,
        Self::LowerBodyStrength,
        Self::UpperBodyStrength,
        Self::VerticalJump,
        Self::BroadJump,
        Self::KickPower,
        Self::ArmStrength,
        Self::RunBlock,
        Self::PassRush,
        Self::PassProtection,
        Self::Scrambling,
        Self::ShortAccuracy,
        Self::MidAccuracy,
        Self::DeepAccuracy,
        Self::ThrowUnderPressure,
        Self::BallSecurity,
        Self::Catching,
        Self::RouteRunning,
        Self::Tackling,
        Self::Coverage,
        Self::BlockShedding,
        Self::Pursuit,
        Self::KickAccuracy,
        Self::Familiarity,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Acceleration => "acceleration",
            Self::LateralQuickness => "lateral_quickness",
            Self::Vision => "vision",
            Self::LowerBodyStrength => "lower_body_strength",
            Self::UpperBodyStrength => "upper_body_strength",
            Self::VerticalJump => "vertical_jump",
            Self::BroadJump => "broad_jump",
            Self::KickPower => "kick_power",
            Self::ArmStrength => "arm_strength",
            Self::RunBlock => "run_block",
            Self::PassRush => "pass_rush",
            Self::PassProtection => "pass_protection",
            Self::Scrambling => "scrambling",
            Self::ShortAccuracy => "short_accuracy",
            Self::MidAccuracy => "mid_accuracy",
            Self::DeepAccuracy => "deep_accuracy",
            Self::ThrowUnderPressure => "throw_under_pressure",
            Self::BallSecurity => "ball_security",
            Self::Catching => "catching",
            Self::RouteRunning => "route_running",
            Self::Tackling => "tackling",
            Self::Coverage => "coverage",
            Self::BlockShedding => "block_shedding",
            Self::Pursuit => "pursuit",
            Self::KickAccuracy => "kick_accuracy",
            Self::Familiarity => "familiarity",
        }
    }
}

/// Current value and growth ceiling for every trainable attribute.
///
/// There is no `Default`: a set can only be built by supplying every
/// attribute, so nothing is ever read uninitialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    current: [Rating; ATTRIBUTE_COUNT],
    ceiling: [Rating; ATTRIBUTE_COUNT],
}

impl AttributeSet {
    /// Build a set from `(current, ceiling)` per attribute. Current values
    /// above their ceiling are lowered onto it.
    #[must_use]
    pub fn from_fn(mut values: impl FnMut(Attribute) -> (Rating, Rating)) -> Self {
        let mut current = [Rating::MIN; ATTRIBUTE_COUNT];
        let mut ceiling = [Rating::MIN; ATTRIBUTE_COUNT];
        for attribute in Attribute::ALL {
            let (value, cap) = values(attribute);
            ceiling[attribute.index()] = cap;
            current[attribute.index()] = value.min(cap);
        }
        Self { current, ceiling }
    }

    #[must_use]
    pub const fn current(&self, attribute: Attribute) -> Rating {
        self.current[attribute.index()]
    }

    #[must_use]
    pub const fn ceiling(&self, attribute: Attribute) -> Rating {
        self.ceiling[attribute.index()]
    }

    /// Raise (or lower) a current value; the result stays within `0..=ceiling`.
    /// Returns the change actually applied.
    pub fn adjust_current(&mut self, attribute: Attribute, delta: i32) -> i32 {
        let idx = attribute.index();
        let before = self.current[idx];
        let after = before.saturating_add(delta).min(self.ceiling[idx]);
        self.current[idx] = after;
        i32::from(after.value()) - i32::from(before.value())
    }

    /// Raise a ceiling by `delta`, never past `limit`. Ceilings never drop.
    pub fn raise_ceiling(&mut self, attribute: Attribute, delta: u8, limit: Rating) -> u8 {
        let idx = attribute.index();
        let before = self.ceiling[idx];
        if before >= limit {
            return 0;
        }
        let after = before.saturating_add(i32::from(delta)).min(limit);
        self.ceiling[idx] = after;
        after.value() - before.value()
    }

    #[must_use]
    pub fn highest_ceiling(&self) -> Rating {
        self.ceiling.iter().copied().max().unwrap_or(Rating::MIN)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Rating, Rating)> + '_ {
        Attribute::ALL
            .iter()
            .map(|&attribute| (attribute, self.current(attribute), self.ceiling(attribute)))
    }
}

/// Non-trainable body measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physical {
    pub height_in: u8,
    pub weight_lb: u16,
    pub arm_length_in: u8,
}

impl Physical {
    /// Weight per inch of height, the build measure used by position fit.
    #[must_use]
    pub fn weight_per_inch(self) -> f64 {
        f64::from(self.weight_lb) / f64::from(self.height_in.max(60))
    }

    /// Arm length mapped onto the rating scale.
    #[must_use]
    pub fn arm_length_rating(self) -> f64 {
        let span = ARM_LENGTH_MAX_IN - ARM_LENGTH_MIN_IN;
        ((f64::from(self.arm_length_in) - ARM_LENGTH_MIN_IN) / span * f64::from(RATING_MAX))
            .clamp(0.0, f64::from(RATING_MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionGroup {
    Offense,
    Defense,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    FB,
    WR,
    TE,
    LT,
    LG,
    C,
    RG,
    RT,
    DE,
    DT,
    NT,
    OLB,
    ILB,
    CB,
    S,
    K,
    P,
    LS,
}

/// One input to a position's composite rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Trained(Attribute),
    ArmLength,
}

type Weights = &'static [(Component, f64)];

const fn t(attribute: Attribute, weight: f64) -> (Component, f64) {
    (Component::Trained(attribute), weight)
}

const fn arm(weight: f64) -> (Component, f64) {
    (Component::ArmLength, weight)
}

use Attribute as A;

const QB_WEIGHTS: Weights = &[
    t(A::ArmStrength, 0.18),
    t(A::Vision, 0.14),
    t(A::Scrambling, 0.12),
    t(A::ShortAccuracy, 0.10),
    t(A::MidAccuracy, 0.10),
    t(A::DeepAccuracy, 0.08),
    t(A::ThrowUnderPressure, 0.08),
    t(A::Speed, 0.08),
    t(A::Acceleration, 0.08),
    t(A::UpperBodyStrength, 0.04),
    t(A::LowerBodyStrength, 0.04),
];
const RB_WEIGHTS: Weights = &[
    t(A::Speed, 0.16),
    t(A::Acceleration, 0.16),
    t(A::Vision, 0.12),
    t(A::LowerBodyStrength, 0.12),
    t(A::BallSecurity, 0.10),
    t(A::Catching, 0.08),
    t(A::VerticalJump, 0.06),
    t(A::LateralQuickness, 0.10),
    t(A::UpperBodyStrength, 0.04),
];
const FB_WEIGHTS: Weights = &[
    t(A::LowerBodyStrength, 0.20),
    t(A::RunBlock, 0.20),
    t(A::UpperBodyStrength, 0.14),
    t(A::BallSecurity, 0.08),
    arm(0.06),
    t(A::Speed, 0.10),
    t(A::Vision, 0.10),
];
const WR_WEIGHTS: Weights = &[
    t(A::Speed, 0.16),
    t(A::Acceleration, 0.16),
    t(A::Catching, 0.14),
    t(A::RouteRunning, 0.12),
    t(A::LateralQuickness, 0.12),
    t(A::Vision, 0.08),
    t(A::VerticalJump, 0.06),
    t(A::UpperBodyStrength, 0.04),
    t(A::LowerBodyStrength, 0.04),
];
const TE_WEIGHTS: Weights = &[
    t(A::UpperBodyStrength, 0.14),
    t(A::RunBlock, 0.14),
    t(A::Catching, 0.14),
    t(A::RouteRunning, 0.08),
    t(A::PassProtection, 0.08),
    arm(0.06),
    t(A::Speed, 0.10),
    t(A::Vision, 0.10),
    t(A::LowerBodyStrength, 0.08),
];
const TACKLE_WEIGHTS: Weights = &[
    t(A::PassProtection, 0.22),
    t(A::RunBlock, 0.22),
    arm(0.14),
    t(A::LowerBodyStrength, 0.14),
    t(A::UpperBodyStrength, 0.14),
];
const GUARD_WEIGHTS: Weights = &[
    t(A::RunBlock, 0.22),
    t(A::PassProtection, 0.22),
    arm(0.14),
    t(A::LowerBodyStrength, 0.14),
    t(A::UpperBodyStrength, 0.14),
];
const CENTER_WEIGHTS: Weights = &[
    t(A::RunBlock, 0.22),
    t(A::PassProtection, 0.22),
    arm(0.12),
    t(A::LowerBodyStrength, 0.12),
    t(A::UpperBodyStrength, 0.12),
    t(A::Vision, 0.08),
];
const DE_WEIGHTS: Weights = &[
    t(A::PassRush, 0.18),
    arm(0.12),
    t(A::BlockShedding, 0.12),
    t(A::LowerBodyStrength, 0.14),
    t(A::UpperBodyStrength, 0.14),
    t(A::Speed, 0.10),
    t(A::Acceleration, 0.10),
];
const DT_WEIGHTS: Weights = &[
    t(A::LowerBodyStrength, 0.16),
    t(A::UpperBodyStrength, 0.16),
    t(A::PassRush, 0.18),
    t(A::BlockShedding, 0.10),
    t(A::Tackling, 0.10),
    t(A::Pursuit, 0.10),
    t(A::Vision, 0.08),
    arm(0.08),
];
const NT_WEIGHTS: Weights = &[
    t(A::LowerBodyStrength, 0.28),
    t(A::UpperBodyStrength, 0.22),
    t(A::PassRush, 0.08),
    t(A::BlockShedding, 0.08),
    t(A::Tackling, 0.12),
    t(A::Pursuit, 0.10),
    t(A::Vision, 0.06),
    arm(0.06),
];
const OLB_WEIGHTS: Weights = &[
    t(A::Speed, 0.14),
    t(A::PassRush, 0.14),
    t(A::Tackling, 0.12),
    t(A::BlockShedding, 0.10),
    t(A::Pursuit, 0.10),
    t(A::LateralQuickness, 0.10),
    t(A::LowerBodyStrength, 0.10),
    t(A::UpperBodyStrength, 0.10),
    t(A::Vision, 0.06),
];
const ILB_WEIGHTS: Weights = &[
    t(A::Vision, 0.16),
    t(A::Tackling, 0.14),
    t(A::Pursuit, 0.12),
    t(A::BlockShedding, 0.10),
    t(A::LowerBodyStrength, 0.12),
    t(A::UpperBodyStrength, 0.10),
    t(A::Speed, 0.10),
    t(A::LateralQuickness, 0.10),
];
const CB_WEIGHTS: Weights = &[
    t(A::Speed, 0.18),
    t(A::Acceleration, 0.18),
    t(A::Coverage, 0.16),
    t(A::LateralQuickness, 0.14),
    t(A::Tackling, 0.08),
    t(A::VerticalJump, 0.04),
    t(A::Vision, 0.06),
    t(A::UpperBodyStrength, 0.04),
];
const S_WEIGHTS: Weights = &[
    t(A::Speed, 0.14),
    t(A::Vision, 0.14),
    t(A::Coverage, 0.14),
    t(A::Tackling, 0.12),
    t(A::Pursuit, 0.10),
    t(A::LateralQuickness, 0.10),
    t(A::VerticalJump, 0.04),
    t(A::UpperBodyStrength, 0.04),
    t(A::LowerBodyStrength, 0.04),
];
const K_WEIGHTS: Weights = &[
    t(A::KickPower, 0.36),
    t(A::KickAccuracy, 0.32),
    t(A::Speed, 0.16),
    t(A::Acceleration, 0.16),
];
const P_WEIGHTS: Weights = &[
    t(A::KickPower, 0.32),
    t(A::KickAccuracy, 0.28),
    t(A::Speed, 0.20),
    t(A::Acceleration, 0.20),
];
const LS_WEIGHTS: Weights = &[
    t(A::UpperBodyStrength, 0.18),
    t(A::LowerBodyStrength, 0.18),
    t(A::ArmStrength, 0.16),
    t(A::Vision, 0.16),
    t(A::Tackling, 0.10),
    t(A::LateralQuickness, 0.10),
    t(A::Speed, 0.06),
    arm(0.06),
];

impl Position {
    pub const ALL: [Self; 20] = [
        Self::QB,
        Self::RB,
        Self::FB,
        Self::WR,
        Self::TE,
        Self::LT,
        Self::LG,
        Self::C,
        Self::RG,
        Self::RT,
        Self::DE,
        Self::DT,
        Self::NT,
        Self::OLB,
        Self::ILB,
        Self::CB,
        Self::S,
        Self::K,
        Self::P,
        Self::LS,
    ];

    #[must_use]
    pub const fn group(self) -> PositionGroup {
        match self {
            Self::QB
            | Self::RB
            | Self::FB
            | Self::WR
            | Self::TE
            | Self::LT
            | Self::LG
            | Self::C
            | Self::RG
            | Self::RT => PositionGroup::Offense,
            Self::DE | Self::DT | Self::NT | Self::OLB | Self::ILB | Self::CB | Self::S => {
                PositionGroup::Defense
            }
            Self::K | Self::P | Self::LS => PositionGroup::Special,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::QB => "QB",
            Self::RB => "RB",
            Self::FB => "FB",
            Self::WR => "WR",
            Self::TE => "TE",
            Self::LT => "LT",
            Self::LG => "LG",
            Self::C => "C",
            Self::RG => "RG",
            Self::RT => "RT",
            Self::DE => "DE",
            Self::DT => "DT",
            Self::NT => "NT",
            Self::OLB => "OLB",
            Self::ILB => "ILB",
            Self::CB => "CB",
            Self::S => "S",
            Self::K => "K",
            Self::P => "P",
            Self::LS => "LS",
        }
    }

    /// Composite weights for this position. Tables are normalized when
    /// combined, so only their relative sizes matter.
    #[must_use]
    pub const fn weights(self) -> &'static [(Component, f64)] {
        match self {
            Self::QB => QB_WEIGHTS,
            Self::RB => RB_WEIGHTS,
            Self::FB => FB_WEIGHTS,
            Self::WR => WR_WEIGHTS,
            Self::TE => TE_WEIGHTS,
            Self::LT | Self::RT => TACKLE_WEIGHTS,
            Self::LG | Self::RG => GUARD_WEIGHTS,
            Self::C => CENTER_WEIGHTS,
            Self::DE => DE_WEIGHTS,
            Self::DT => DT_WEIGHTS,
            Self::NT => NT_WEIGHTS,
            Self::OLB => OLB_WEIGHTS,
            Self::ILB => ILB_WEIGHTS,
            Self::CB => CB_WEIGHTS,
            Self::S => S_WEIGHTS,
            Self::K => K_WEIGHTS,
            Self::P => P_WEIGHTS,
            Self::LS => LS_WEIGHTS,
        }
    }

    /// Acceptable weight-per-inch window for the position's archetype.
    #[must_use]
    pub const fn build_range(self) -> (f64, f64) {
        match self {
            Self::QB => (2.2, 2.9),
            Self::RB => (2.1, 2.7),
            Self::FB | Self::LS => (2.7, 3.7),
            Self::WR | Self::CB => (1.8, 2.5),
            Self::TE => (2.5, 3.4),
            Self::LT | Self::LG | Self::RG | Self::RT => (3.0, 4.3),
            Self::C => (2.9, 4.2),
            Self::DE => (2.7, 3.6),
            Self::DT => (3.0, 4.1),
            Self::NT => (3.2, 4.5),
            Self::OLB => (2.3, 3.1),
            Self::ILB => (2.5, 3.3),
            Self::S | Self::K | Self::P => (1.9, 2.7),
        }
    }

    /// Whether an attribute feeds this position's composite.
    #[must_use]
    pub fn uses(self, attribute: Attribute) -> bool {
        self.weights()
            .iter()
            .any(|(component, _)| *component == Component::Trained(attribute))
    }
}

/// How well a body fits a position, `0.25..=1.0`. The penalty grows
/// continuously with distance outside the position's build window.
#[must_use]
pub fn build_fit(physical: Physical, position: Position) -> f64 {
    let wpi = physical.weight_per_inch();
    let (lo, hi) = position.build_range();
    let over = if wpi < lo {
        lo - wpi
    } else if wpi > hi {
        wpi - hi
    } else {
        return 1.0;
    };
    if over < BUILD_FIT_MARGIN {
        0.3 + 0.7 * (1.0 - over / BUILD_FIT_MARGIN)
    } else {
        (0.3 - (over - BUILD_FIT_MARGIN) * 0.1).max(0.25)
    }
}

fn weighted(
    attributes: &AttributeSet,
    physical: Physical,
    position: Position,
    read: impl Fn(&AttributeSet, Attribute) -> Rating,
) -> f64 {
    let weights = position.weights();
    let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let sum: f64 = weights
        .iter()
        .map(|&(component, weight)| {
            let value = match component {
                Component::Trained(attribute) => read(attributes, attribute).as_f64(),
                Component::ArmLength => physical.arm_length_rating(),
            };
            value * weight
        })
        .sum();
    sum / total
}

/// Composite overall: weighted sum of current values at the position.
#[must_use]
pub fn overall(attributes: &AttributeSet, physical: Physical, position: Position) -> Rating {
    Rating::from_f64(weighted(attributes, physical, position, AttributeSet::current))
}

/// Projected ceiling at a position: weighted ceilings scaled by build fit,
/// never below the current overall.
#[must_use]
pub fn potential(attributes: &AttributeSet, physical: Physical, position: Position) -> Rating {
    let raw = weighted(attributes, physical, position, AttributeSet::ceiling);
    let fitted = Rating::new(round_f64_to_i32(raw * build_fit(physical, position)));
    fitted.max(overall(attributes, physical, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(current: u8, ceiling: u8) -> AttributeSet {
        AttributeSet::from_fn(|_| (Rating::from(current), Rating::from(ceiling)))
    }

    const AVERAGE_BUILD: Physical = Physical {
        height_in: 72,
        weight_lb: 200,
        arm_length_in: 32,
    };

    #[test]
    fn rating_clamps_on_every_constructor() {
        assert_eq!(Rating::new(-5).value(), 0);
        assert_eq!(Rating::new(140).value(), 99);
        assert_eq!(Rating::from_f64(f64::NAN).value(), 0);
        assert_eq!(Rating::from(250).value(), 99);
        assert_eq!(Rating::new(98).saturating_add(5).value(), 99);
    }

    #[test]
    fn composite_is_a_weighted_mean() {
        let set = flat(55, 55);
        for position in Position::ALL {
            let uses_arm = position
                .weights()
                .iter()
                .any(|(component, _)| *component == Component::ArmLength);
            if uses_arm {
                continue;
            }
            assert_eq!(
                overall(&set, AVERAGE_BUILD, position).value(),
                55,
                "{} composite drifted from a flat profile",
                position.key()
            );
        }
    }

    #[test]
    fn current_never_exceeds_ceiling() {
        let mut set = AttributeSet::from_fn(|_| (Rating::from(80), Rating::from(60)));
        assert_eq!(set.current(Attribute::Speed).value(), 60);
        let applied = set.adjust_current(Attribute::Speed, 10);
        assert_eq!(applied, 0);
        assert_eq!(set.current(Attribute::Speed).value(), 60);
    }

    #[test]
    fn ceilings_only_rise_and_respect_limit() {
        let mut set = flat(40, 70);
        assert_eq!(set.raise_ceiling(Attribute::Vision, 10, Rating::from(75)), 5);
        assert_eq!(set.ceiling(Attribute::Vision).value(), 75);
        assert_eq!(set.raise_ceiling(Attribute::Vision, 10, Rating::from(60)), 0);
        assert_eq!(set.ceiling(Attribute::Vision).value(), 75);
    }

    #[test]
    fn flat_attributes_give_flat_overall() {
        let physical = Physical {
            arm_length_in: 32,
            ..AVERAGE_BUILD
        };
        let set = flat(60, 60);
        // Arm length 32in maps to 49.5 on the rating scale.
        let qb = overall(&set, physical, Position::QB);
        assert_eq!(qb.value(), 60);
        let lt = overall(&set, physical, Position::LT);
        assert!(lt.value() < 60);
    }

    #[test]
    fn wrong_build_caps_potential() {
        let lineman_body = Physical {
            height_in: 70,
            weight_lb: 300,
            arm_length_in: 34,
        };
        let set = flat(40, 90);
        let as_receiver = potential(&set, lineman_body, Position::WR);
        let as_guard = potential(&set, lineman_body, Position::LG);
        assert!(as_guard > as_receiver);
        assert!(as_receiver.value() <= 40);
    }

    #[test]
    fn potential_never_below_overall() {
        let lineman_body = Physical {
            height_in: 70,
            weight_lb: 300,
            arm_length_in: 34,
        };
        let set = flat(70, 75);
        assert!(
            potential(&set, lineman_body, Position::CB) >= overall(&set, lineman_body, Position::CB)
        );
    }

    #[test]
    fn build_fit_decays_continuously() {
        let inside = build_fit(AVERAGE_BUILD, Position::QB);
        assert!((inside - 1.0).abs() < f64::EPSILON);
        let near = build_fit(
            Physical {
                weight_lb: 225,
                ..AVERAGE_BUILD
            },
            Position::QB,
        );
        assert!(near < 1.0 && near > 0.3);
        let far = build_fit(
            Physical {
                weight_lb: 330,
                ..AVERAGE_BUILD
            },
            Position::QB,
        );
        assert!(far <= 0.3 && far >= 0.25);
    }
}
