//! Box-score records produced by the game resolver.
//!
//! Team totals are never stored independently of the player lines: a
//! [`TeamBox`] is tallied from the lines of its players, so the two can not
//! disagree.

use serde::{Deserialize, Serialize};

use crate::attributes::Position;
use crate::player::PlayerId;
use crate::team::TeamId;

/// One player's statistics for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub player: PlayerId,
    pub team: TeamId,
    pub position: Position,
    pub pass_attempts: u16,
    pub completions: u16,
    pub pass_yards: u32,
    pub pass_touchdowns: u16,
    pub interceptions_thrown: u16,
    pub sacks_taken: u16,
    pub rush_attempts: u16,
    pub rush_yards: u32,
    pub rush_touchdowns: u16,
    pub fumbles_lost: u16,
    pub targets: u16,
    pub receptions: u16,
    pub receiving_yards: u32,
    pub receiving_touchdowns: u16,
    pub tackles: u16,
    pub sacks: u16,
    pub interceptions: u16,
    pub forced_fumbles: u16,
    pub defensive_touchdowns: u16,
    pub fg_attempts: u16,
    pub fg_made: u16,
    pub xp_attempts: u16,
    pub xp_made: u16,
    pub punts: u16,
    pub punt_yards: u32,
}

impl PlayerLine {
    #[must_use]
    pub const fn empty(player: PlayerId, team: TeamId, position: Position) -> Self {
        Self {
            player,
            team,
            position,
            pass_attempts: 0,
            completions: 0,
            pass_yards: 0,
            pass_touchdowns: 0,
            interceptions_thrown: 0,
            sacks_taken: 0,
            rush_attempts: 0,
            rush_yards: 0,
            rush_touchdowns: 0,
            fumbles_lost: 0,
            targets: 0,
            receptions: 0,
            receiving_yards: 0,
            receiving_touchdowns: 0,
            tackles: 0,
            sacks: 0,
            interceptions: 0,
            forced_fumbles: 0,
            defensive_touchdowns: 0,
            fg_attempts: 0,
            fg_made: 0,
            xp_attempts: 0,
            xp_made: 0,
            punts: 0,
            punt_yards: 0,
        }
    }

    /// Fold another line for the same player into this one.
    pub fn absorb(&mut self, other: &Self) {
        self.pass_attempts += other.pass_attempts;
        self.completions += other.completions;
        self.pass_yards += other.pass_yards;
        self.pass_touchdowns += other.pass_touchdowns;
        self.interceptions_thrown += other.interceptions_thrown;
        self.sacks_taken += other.sacks_taken;
        self.rush_attempts += other.rush_attempts;
        self.rush_yards += other.rush_yards;
        self.rush_touchdowns += other.rush_touchdowns;
        self.fumbles_lost += other.fumbles_lost;
        self.targets += other.targets;
        self.receptions += other.receptions;
        self.receiving_yards += other.receiving_yards;
        self.receiving_touchdowns += other.receiving_touchdowns;
        self.tackles += other.tackles;
        self.sacks += other.sacks;
        self.interceptions += other.interceptions;
        self.forced_fumbles += other.forced_fumbles;
        self.defensive_touchdowns += other.defensive_touchdowns;
        self.fg_attempts += other.fg_attempts;
        self.fg_made += other.fg_made;
        self.xp_attempts += other.xp_attempts;
        self.xp_made += other.xp_made;
        self.punts += other.punts;
        self.punt_yards += other.punt_yards;
    }
}

/// Team totals for one game, tallied from player lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBox {
    pub team: TeamId,
    pub score: u16,
    pub plays: u16,
    pub pass_attempts: u16,
    pub completions: u16,
    pub pass_yards: u32,
    pub pass_touchdowns: u16,
    pub interceptions_thrown: u16,
    pub sacks_taken: u16,
    pub rush_attempts: u16,
    pub rush_yards: u32,
    pub rush_touchdowns: u16,
    pub fumbles_lost: u16,
    pub receiving_yards: u32,
    pub receptions: u16,
    pub tackles: u16,
    pub sacks: u16,
    pub interceptions: u16,
    pub defensive_touchdowns: u16,
    pub fg_attempts: u16,
    pub fg_made: u16,
    pub xp_attempts: u16,
    pub xp_made: u16,
    pub punts: u16,
}

impl TeamBox {
    /// Sum every line belonging to `team`.
    #[must_use]
    pub fn tally(team: TeamId, score: u16, plays: u16, lines: &[PlayerLine]) -> Self {
        lines
            .iter()
            .filter(|line| line.team == team)
            .fold(
                Self {
                    team,
                    score,
                    plays,
                    ..Self::default()
                },
                |mut acc, line| {
                    acc.pass_attempts += line.pass_attempts;
                    acc.completions += line.completions;
                    acc.pass_yards += line.pass_yards;
                    acc.pass_touchdowns += line.pass_touchdowns;
                    acc.interceptions_thrown += line.interceptions_thrown;
                    acc.sacks_taken += line.sacks_taken;
                    acc.rush_attempts += line.rush_attempts;
                    acc.rush_yards += line.rush_yards;
                    acc.rush_touchdowns += line.rush_touchdowns;
                    acc.fumbles_lost += line.fumbles_lost;
                    acc.receiving_yards += line.receiving_yards;
                    acc.receptions += line.receptions;
                    acc.tackles += line.tackles;
                    acc.sacks += line.sacks;
                    acc.interceptions += line.interceptions;
                    acc.defensive_touchdowns += line.defensive_touchdowns;
                    acc.fg_attempts += line.fg_attempts;
                    acc.fg_made += line.fg_made;
                    acc.xp_attempts += line.xp_attempts;
                    acc.xp_made += line.xp_made;
                    acc.punts += line.punts;
                    acc
                },
            )
    }

    #[must_use]
    pub const fn total_yards(&self) -> u32 {
        self.rush_yards + self.pass_yards
    }

    #[must_use]
    pub const fn turnovers(&self) -> u16 {
        self.interceptions_thrown + self.fumbles_lost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

/// Final box score of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home: TeamBox,
    pub away: TeamBox,
    pub lines: Vec<PlayerLine>,
    /// Whether a level score was broken by the tiebreak pass.
    pub tiebreak: bool,
}

impl GameResult {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.home.score.cmp(&self.away.score) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        match self.outcome() {
            Outcome::HomeWin => Some(self.home.team),
            Outcome::AwayWin => Some(self.away.team),
            Outcome::Tie => None,
        }
    }

    pub fn lines_for(&self, team: TeamId) -> impl Iterator<Item = &PlayerLine> {
        self.lines.iter().filter(move |line| line.team == team)
    }

    #[must_use]
    pub fn line(&self, player: PlayerId) -> Option<&PlayerLine> {
        self.lines.iter().find(|line| line.player == player)
    }

    /// Score from this team's perspective: (for, against).
    #[must_use]
    pub fn score_for(&self, team: TeamId) -> Option<(u16, u16)> {
        if team == self.home.team {
            Some((self.home.score, self.away.score))
        } else if team == self.away.team {
            Some((self.away.score, self.home.score))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(player: u32, team: u32) -> PlayerLine {
        PlayerLine::empty(PlayerId(player), TeamId(team), Position::RB)
    }

    #[test]
    fn tally_only_counts_own_lines() {
        let mut a = line(1, 1);
        a.rush_yards = 80;
        a.rush_attempts = 14;
        let mut b = line(2, 1);
        b.rush_yards = 22;
        b.rush_attempts = 6;
        let mut c = line(3, 2);
        c.rush_yards = 500;
        let totals = TeamBox::tally(TeamId(1), 17, 60, &[a, b, c]);
        assert_eq!(totals.rush_yards, 102);
        assert_eq!(totals.rush_attempts, 20);
        assert_eq!(totals.score, 17);
    }

    #[test]
    fn absorb_merges_counts() {
        let mut a = line(1, 1);
        a.tackles = 3;
        let mut b = line(1, 1);
        b.tackles = 2;
        b.rush_yards = 9;
        a.absorb(&b);
        assert_eq!(a.tackles, 5);
        assert_eq!(a.rush_yards, 9);
    }

    #[test]
    fn outcome_follows_score() {
        let result = GameResult {
            home: TeamBox {
                team: TeamId(1),
                score: 21,
                ..TeamBox::default()
            },
            away: TeamBox {
                team: TeamId(2),
                score: 24,
                ..TeamBox::default()
            },
            lines: Vec::new(),
            tiebreak: false,
        };
        assert_eq!(result.outcome(), Outcome::AwayWin);
        assert_eq!(result.winner(), Some(TeamId(2)));
        assert_eq!(result.score_for(TeamId(1)), Some((21, 24)));
        assert_eq!(result.score_for(TeamId(9)), None);
    }
}
