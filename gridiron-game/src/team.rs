//! Teams, finances, and roster composition targets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::attributes::{Position, Rating};
use crate::constants::{COLLEGE_ROSTER_SIZE, HIGH_SCHOOL_ROSTER_SIZE, PRO_ROSTER_SIZE};
use crate::manager::ManagerId;
use crate::player::{PlayerId, Region, Tier};
use crate::practice::PracticeFocus;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeamId(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DivisionId(pub u16);

/// Money a team can commit. Pro payroll is derived from roster contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Finances {
    None,
    /// College name-image-likeness budget, in thousands.
    Nil { budget: u32 },
    /// Pro salary cap, in thousands.
    SalaryCap { cap: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub tier: Tier,
    pub division: DivisionId,
    pub region: Region,
    pub prestige: Rating,
    pub facility: Rating,
    pub finances: Finances,
    /// Owning side of roster membership. Mutated only through the registry.
    pub(crate) roster: BTreeSet<PlayerId>,
    pub scholarships_remaining: u8,
    pub manager: Option<ManagerId>,
    #[serde(default)]
    pub practice: PracticeFocus,
}

impl Team {
    #[must_use]
    pub const fn roster(&self) -> &BTreeSet<PlayerId> {
        &self.roster
    }

    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    #[must_use]
    pub const fn roster_limit(&self) -> usize {
        roster_size(self.tier)
    }

    #[must_use]
    pub fn open_slots(&self) -> usize {
        self.roster_limit().saturating_sub(self.roster.len())
    }

    /// Salary cap, if this team carries one.
    #[must_use]
    pub const fn salary_cap(&self) -> Option<u32> {
        match self.finances {
            Finances::SalaryCap { cap } => Some(cap),
            Finances::None | Finances::Nil { .. } => None,
        }
    }
}

#[must_use]
pub const fn roster_size(tier: Tier) -> usize {
    match tier {
        Tier::HighSchool => HIGH_SCHOOL_ROSTER_SIZE,
        Tier::College => COLLEGE_ROSTER_SIZE,
        Tier::Pro => PRO_ROSTER_SIZE,
    }
}

type Template = &'static [(Position, u8)];

const HIGH_SCHOOL_TEMPLATE: Template = &[
    (Position::QB, 2),
    (Position::RB, 2),
    (Position::C, 1),
    (Position::DE, 2),
    (Position::WR, 3),
    (Position::CB, 2),
    (Position::FB, 1),
    (Position::TE, 2),
    (Position::LT, 1),
    (Position::LG, 1),
    (Position::RG, 1),
    (Position::RT, 1),
    (Position::DT, 1),
    (Position::NT, 1),
    (Position::OLB, 2),
    (Position::ILB, 2),
    (Position::S, 2),
    (Position::K, 1),
    (Position::P, 1),
    (Position::LS, 1),
];

const COLLEGE_TEMPLATE: Template = &[
    (Position::QB, 3),
    (Position::RB, 3),
    (Position::FB, 1),
    (Position::WR, 4),
    (Position::TE, 2),
    (Position::LT, 2),
    (Position::LG, 1),
    (Position::C, 2),
    (Position::RG, 1),
    (Position::RT, 2),
    (Position::DE, 3),
    (Position::DT, 2),
    (Position::NT, 1),
    (Position::OLB, 3),
    (Position::ILB, 2),
    (Position::CB, 3),
    (Position::S, 3),
    (Position::K, 1),
    (Position::P, 1),
    (Position::LS, 1),
];

const PRO_TEMPLATE: Template = &[
    (Position::QB, 3),
    (Position::RB, 5),
    (Position::FB, 1),
    (Position::WR, 6),
    (Position::TE, 3),
    (Position::LT, 2),
    (Position::LG, 2),
    (Position::C, 2),
    (Position::RG, 2),
    (Position::RT, 2),
    (Position::DE, 4),
    (Position::DT, 3),
    (Position::NT, 1),
    (Position::OLB, 4),
    (Position::ILB, 3),
    (Position::CB, 4),
    (Position::S, 4),
    (Position::K, 1),
    (Position::P, 1),
    (Position::LS, 1),
];

/// Target head count per position, in fill-priority order. Counts sum to the
/// tier's roster size.
#[must_use]
pub const fn roster_template(tier: Tier) -> &'static [(Position, u8)] {
    match tier {
        Tier::HighSchool => HIGH_SCHOOL_TEMPLATE,
        Tier::College => COLLEGE_TEMPLATE,
        Tier::Pro => PRO_TEMPLATE,
    }
}

/// Target head count at one position.
#[must_use]
pub fn template_count(tier: Tier, position: Position) -> usize {
    roster_template(tier)
        .iter()
        .find(|(slot, _)| *slot == position)
        .map_or(0, |(_, count)| usize::from(*count))
}

/// Starters fielded per position in a game.
#[must_use]
pub const fn starters_at(position: Position) -> usize {
    match position {
        Position::WR => 3,
        Position::DE | Position::OLB | Position::CB | Position::S => 2,
        _ => 1,
    }
}

/// Slots needed to reach the template, expanded one entry per missing player.
#[must_use]
pub fn missing_slots(tier: Tier, counts: impl Fn(Position) -> usize) -> Vec<Position> {
    let mut slots = Vec::new();
    for &(position, target) in roster_template(tier) {
        let have = counts(position);
        for _ in have..usize::from(target) {
            slots.push(position);
        }
    }
    slots
}
