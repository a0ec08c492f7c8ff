//! Arena owning every player and team, keyed by stable ids.
//!
//! Roster membership lives on the team side. `Player::team` mirrors it and
//! is only ever written by [`Registry::transfer`], so the two cannot drift
//! apart without [`Registry::verify_integrity`] noticing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::Position;
use crate::error::InvariantViolation;
use crate::player::{Player, PlayerId, PlayerStatus, Tier};
use crate::team::{Team, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    players: BTreeMap<PlayerId, Player>,
    teams: BTreeMap<TeamId, Team>,
    next_player: u32,
    next_team: u32,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next player id.
    pub fn allocate_player_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player += 1;
        id
    }

    pub fn allocate_team_id(&mut self) -> TeamId {
        let id = TeamId(self.next_team);
        self.next_team += 1;
        id
    }

    pub fn insert_team(&mut self, mut team: Team) -> TeamId {
        team.roster.clear();
        let id = team.id;
        self.teams.insert(id, team);
        id
    }

    /// Register a new, unattached player and optionally roster them.
    ///
    /// # Errors
    ///
    /// Returns an error when `team` is not registered; the player is still
    /// registered as unattached in that case.
    pub fn insert_player(
        &mut self,
        mut player: Player,
        team: Option<TeamId>,
    ) -> Result<PlayerId, InvariantViolation> {
        let id = player.id;
        player.team = None;
        self.players.insert(id, player);
        if team.is_some() {
            self.transfer(id, team)?;
        }
        Ok(id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Mutable access to a player's attributes and clocks. Team membership
    /// must go through [`Self::transfer`].
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players on a team's roster in id order.
    #[must_use]
    pub fn roster(&self, team: TeamId) -> Vec<&Player> {
        self.teams.get(&team).map_or_else(Vec::new, |team| {
            team.roster
                .iter()
                .filter_map(|id| self.players.get(id))
                .collect()
        })
    }

    #[must_use]
    pub fn position_count(&self, team: TeamId, position: Position) -> usize {
        self.roster(team)
            .iter()
            .filter(|player| player.position == position)
            .count()
    }

    /// Current pro payroll, derived from roster contracts.
    #[must_use]
    pub fn payroll(&self, team: TeamId) -> u32 {
        self.roster(team)
            .iter()
            .fold(0_u32, |acc, player| acc.saturating_add(player.salary()))
    }

    /// Cap room left for a pro team, `None` for uncapped tiers.
    #[must_use]
    pub fn cap_space(&self, team: TeamId) -> Option<u32> {
        let cap = self.teams.get(&team)?.salary_cap()?;
        Some(cap.saturating_sub(self.payroll(team)))
    }

    /// The single mutation point for roster membership: remove the player
    /// from their current roster (if any) and add them to `to` (if any).
    ///
    /// # Errors
    ///
    /// Returns an error if the player or destination team is unknown. No
    /// state changes in that case.
    pub fn transfer(
        &mut self,
        player: PlayerId,
        to: Option<TeamId>,
    ) -> Result<Option<TeamId>, InvariantViolation> {
        let from = self
            .players
            .get(&player)
            .ok_or(InvariantViolation::UnknownPlayer(player))?
            .team;
        if let Some(dest) = to
            && !self.teams.contains_key(&dest)
        {
            return Err(InvariantViolation::UnknownTeam(dest));
        }
        if let Some(source) = from
            && let Some(team) = self.teams.get_mut(&source)
        {
            team.roster.remove(&player);
        }
        if let Some(dest) = to
            && let Some(team) = self.teams.get_mut(&dest)
        {
            team.roster.insert(player);
        }
        if let Some(record) = self.players.get_mut(&player) {
            record.team = to;
            if let Some(dest) = to
                && let Some(team) = self.teams.get(&dest)
            {
                record.tier = team.tier;
                record.status = PlayerStatus::Active;
            }
        }
        Ok(from)
    }

    /// Detach a player and mark them a free agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown.
    pub fn release(&mut self, player: PlayerId) -> Result<(), InvariantViolation> {
        self.transfer(player, None)?;
        if let Some(record) = self.players.get_mut(&player) {
            record.status = PlayerStatus::FreeAgent;
            record.tier = Tier::Pro;
            record.college = None;
            record.contract = None;
        }
        Ok(())
    }

    /// Detach a player and remove them from the pipeline. The record stays.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown.
    pub fn retire(&mut self, player: PlayerId) -> Result<(), InvariantViolation> {
        self.transfer(player, None)?;
        if let Some(record) = self.players.get_mut(&player) {
            record.status = PlayerStatus::Retired;
            record.contract = None;
        }
        Ok(())
    }

    /// Drop retired players nobody references any more.
    pub fn prune_retired(&mut self) -> usize {
        let before = self.players.len();
        self.players
            .retain(|_, player| !matches!(player.status, PlayerStatus::Retired));
        before - self.players.len()
    }

    /// Check roster/back-reference consistency across the whole arena.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn verify_integrity(&self) -> Result<(), InvariantViolation> {
        let mut seen: BTreeMap<PlayerId, TeamId> = BTreeMap::new();
        for team in self.teams.values() {
            for &player in &team.roster {
                if let Some(first) = seen.insert(player, team.id) {
                    return Err(InvariantViolation::DuplicateRosterEntry {
                        player,
                        first,
                        second: team.id,
                    });
                }
                let record = self
                    .players
                    .get(&player)
                    .ok_or(InvariantViolation::UnknownPlayer(player))?;
                if record.team != Some(team.id) {
                    return Err(InvariantViolation::RosterMismatch {
                        player,
                        recorded: record.team,
                        actual: Some(team.id),
                    });
                }
            }
        }
        for player in self.players.values() {
            if player.team.is_some() && !seen.contains_key(&player.id) {
                return Err(InvariantViolation::RosterMismatch {
                    player: player.id,
                    recorded: player.team,
                    actual: None,
                });
            }
        }
        Ok(())
    }

    /// Swap two disjoint player groups between teams in one step. Callers
    /// validate beforehand; this only applies membership.
    pub(crate) fn swap_groups(
        &mut self,
        left: TeamId,
        left_players: &[PlayerId],
        right: TeamId,
        right_players: &[PlayerId],
    ) -> Result<(), InvariantViolation> {
        for &player in left_players {
            self.transfer(player, Some(right))?;
        }
        for &player in right_players {
            self.transfer(player, Some(left))?;
        }
        Ok(())
    }
}
