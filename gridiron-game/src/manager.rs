//! Managers: the player-controlled (or AI) decision makers attached to teams.

use serde::{Deserialize, Serialize};

use crate::attributes::Rating;
use crate::constants::STARTING_SKILL_POINTS;
use crate::error::InvariantViolation;
use crate::team::TeamId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ManagerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Scouting,
    DevelopingPotential,
    UnlockingPotential,
    Persuasion,
    InGameManagement,
}

impl Skill {
    pub const ALL: [Self; 5] = [
        Self::Scouting,
        Self::DevelopingPotential,
        Self::UnlockingPotential,
        Self::Persuasion,
        Self::InGameManagement,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSkills {
    pub scouting: Rating,
    pub developing_potential: Rating,
    pub unlocking_potential: Rating,
    pub persuasion: Rating,
    pub in_game_management: Rating,
}

impl ManagerSkills {
    #[must_use]
    pub const fn uniform(value: Rating) -> Self {
        Self {
            scouting: value,
            developing_potential: value,
            unlocking_potential: value,
            persuasion: value,
            in_game_management: value,
        }
    }

    #[must_use]
    pub const fn get(&self, skill: Skill) -> Rating {
        match skill {
            Skill::Scouting => self.scouting,
            Skill::DevelopingPotential => self.developing_potential,
            Skill::UnlockingPotential => self.unlocking_potential,
            Skill::Persuasion => self.persuasion,
            Skill::InGameManagement => self.in_game_management,
        }
    }

    fn slot(&mut self, skill: Skill) -> &mut Rating {
        match skill {
            Skill::Scouting => &mut self.scouting,
            Skill::DevelopingPotential => &mut self.developing_potential,
            Skill::UnlockingPotential => &mut self.unlocking_potential,
            Skill::Persuasion => &mut self.persuasion,
            Skill::InGameManagement => &mut self.in_game_management,
        }
    }
}

/// Points to add per skill in one spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAllocation {
    pub scouting: u32,
    pub developing_potential: u32,
    pub unlocking_potential: u32,
    pub persuasion: u32,
    pub in_game_management: u32,
}

impl SkillAllocation {
    #[must_use]
    pub const fn single(skill: Skill, points: u32) -> Self {
        let mut allocation = Self {
            scouting: 0,
            developing_potential: 0,
            unlocking_potential: 0,
            persuasion: 0,
            in_game_management: 0,
        };
        match skill {
            Skill::Scouting => allocation.scouting = points,
            Skill::DevelopingPotential => allocation.developing_potential = points,
            Skill::UnlockingPotential => allocation.unlocking_potential = points,
            Skill::Persuasion => allocation.persuasion = points,
            Skill::InGameManagement => allocation.in_game_management = points,
        }
        allocation
    }

    #[must_use]
    pub const fn get(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Scouting => self.scouting,
            Skill::DevelopingPotential => self.developing_potential,
            Skill::UnlockingPotential => self.unlocking_potential,
            Skill::Persuasion => self.persuasion,
            Skill::InGameManagement => self.in_game_management,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        Skill::ALL
            .iter()
            .fold(0_u32, |acc, skill| acc.saturating_add(self.get(*skill)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
    pub skills: ManagerSkills,
    /// Career reputation. Unbounded in both directions.
    pub renown: f64,
    points_earned: u32,
    points_spent: u32,
    pub team: Option<TeamId>,
}

impl Manager {
    #[must_use]
    pub const fn new(id: ManagerId, name: String, skills: ManagerSkills) -> Self {
        Self {
            id,
            name,
            skills,
            renown: 0.0,
            points_earned: STARTING_SKILL_POINTS,
            points_spent: 0,
            team: None,
        }
    }

    #[must_use]
    pub const fn points_earned(&self) -> u32 {
        self.points_earned
    }

    #[must_use]
    pub const fn points_spent(&self) -> u32 {
        self.points_spent
    }

    #[must_use]
    pub const fn available_points(&self) -> u32 {
        self.points_earned.saturating_sub(self.points_spent)
    }

    pub fn award_points(&mut self, points: u32) {
        self.points_earned = self.points_earned.saturating_add(points);
    }

    /// Apply a skill allocation. Skills stop at 99 and only the points
    /// actually applied are charged.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::SkillPointsOverspent`] when the
    /// allocation asks for more than the unspent balance; nothing changes.
    pub fn spend_points(
        &mut self,
        allocation: &SkillAllocation,
    ) -> Result<u32, InvariantViolation> {
        let requested = allocation.total();
        let available = self.available_points();
        if requested > available {
            return Err(InvariantViolation::SkillPointsOverspent {
                requested,
                available,
            });
        }
        let mut charged = 0_u32;
        for skill in Skill::ALL {
            let ask = allocation.get(skill);
            if ask == 0 {
                continue;
            }
            let slot = self.skills.slot(skill);
            let room = u32::from(slot.headroom(Rating::MAX));
            let applied = ask.min(room);
            *slot = slot.saturating_add(i32::try_from(applied).unwrap_or(i32::MAX));
            charged += applied;
        }
        self.points_spent += charged;
        Ok(charged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rookie() -> Manager {
        Manager::new(
            ManagerId(1),
            "Pat Morgan".to_string(),
            ManagerSkills::uniform(Rating::from(50)),
        )
    }

    #[test]
    fn starts_with_opening_points() {
        let manager = rookie();
        assert_eq!(manager.available_points(), 25);
        assert_eq!(manager.points_spent(), 0);
    }

    #[test]
    fn overspend_is_rejected_without_change() {
        let mut manager = rookie();
        let before = manager.skills;
        let err = manager
            .spend_points(&SkillAllocation::single(Skill::Scouting, 26))
            .unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::SkillPointsOverspent {
                requested: 26,
                available: 25
            }
        );
        assert_eq!(manager.skills, before);
        assert_eq!(manager.points_spent(), 0);
    }

    #[test]
    fn spend_stops_at_cap_and_refunds_excess() {
        let mut manager = rookie();
        manager.skills.persuasion = Rating::from(95);
        let charged = manager
            .spend_points(&SkillAllocation {
                persuasion: 10,
                scouting: 5,
                ..SkillAllocation::default()
            })
            .unwrap();
        assert_eq!(charged, 9);
        assert_eq!(manager.skills.persuasion.value(), 99);
        assert_eq!(manager.skills.scouting.value(), 55);
        assert_eq!(manager.available_points(), 16);
    }

    #[test]
    fn spent_never_exceeds_earned() {
        let mut manager = rookie();
        manager.award_points(4);
        let _ = manager.spend_points(&SkillAllocation::single(Skill::InGameManagement, 29));
        assert!(manager.points_spent() <= manager.points_earned());
        assert_eq!(manager.available_points(), 0);
    }
}
