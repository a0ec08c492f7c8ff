//! Division standings tallied from committed results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schedule::PlayedGame;
use crate::team::TeamId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: TeamId,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub points_for: u32,
    pub points_against: u32,
}

impl StandingsRow {
    #[must_use]
    pub const fn new(team: TeamId) -> Self {
        Self {
            team,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    #[must_use]
    pub const fn games(&self) -> u16 {
        self.wins + self.losses + self.ties
    }

    #[must_use]
    pub fn point_differential(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }

    /// Win percentage with ties counting half, `0.0` before any game.
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + f64::from(self.ties) / 2.0) / f64::from(games)
    }

    /// Compare win percentages exactly as `(2w + t) / 2g` fractions.
    fn percentage_cmp(&self, other: &Self) -> Ordering {
        let lhs = (2 * u64::from(self.wins) + u64::from(self.ties)) * u64::from(other.games().max(1));
        let rhs =
            (2 * u64::from(other.wins) + u64::from(other.ties)) * u64::from(self.games().max(1));
        lhs.cmp(&rhs)
    }

    fn record(&mut self, scored: u16, conceded: u16) {
        self.points_for += u32::from(scored);
        self.points_against += u32::from(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.ties += 1,
        }
    }
}

/// Best-first ordering: win percentage, then point differential, then id.
#[must_use]
pub fn rank_cmp(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.percentage_cmp(a)
        .then(b.point_differential().cmp(&a.point_differential()))
        .then(a.team.cmp(&b.team))
}

/// Draft ordering, worst first: fewest wins, most losses, worst point
/// differential, then id.
#[must_use]
pub fn draft_cmp(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    a.wins
        .cmp(&b.wins)
        .then(b.losses.cmp(&a.losses))
        .then(a.point_differential().cmp(&b.point_differential()))
        .then(a.team.cmp(&b.team))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    rows: BTreeMap<TeamId, StandingsRow>,
}

impl Standings {
    /// Tally results for the listed teams. Games involving unlisted teams
    /// are ignored.
    #[must_use]
    pub fn from_results(teams: &[TeamId], played: &[PlayedGame]) -> Self {
        let mut rows: BTreeMap<TeamId, StandingsRow> = teams
            .iter()
            .map(|&team| (team, StandingsRow::new(team)))
            .collect();
        for game in played {
            let result = &game.result;
            if let Some(row) = rows.get_mut(&result.home.team) {
                row.record(result.home.score, result.away.score);
            }
            if let Some(row) = rows.get_mut(&result.away.team) {
                row.record(result.away.score, result.home.score);
            }
        }
        Self { rows }
    }

    /// Rebuild standings from stored rows.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = StandingsRow>) -> Self {
        Self {
            rows: rows.into_iter().map(|row| (row.team, row)).collect(),
        }
    }

    #[must_use]
    pub fn row(&self, team: TeamId) -> Option<&StandingsRow> {
        self.rows.get(&team)
    }

    pub fn rows(&self) -> impl Iterator<Item = &StandingsRow> {
        self.rows.values()
    }

    /// Rows best-first.
    #[must_use]
    pub fn ranked(&self) -> Vec<StandingsRow> {
        let mut rows: Vec<StandingsRow> = self.rows.values().copied().collect();
        rows.sort_by(rank_cmp);
        rows
    }

    /// One-based finishing place.
    #[must_use]
    pub fn place(&self, team: TeamId) -> Option<usize> {
        self.ranked()
            .iter()
            .position(|row| row.team == team)
            .map(|index| index + 1)
    }

    #[must_use]
    pub fn total_wins(&self) -> u32 {
        self.rows.values().map(|row| u32::from(row.wins)).sum()
    }

    #[must_use]
    pub fn total_losses(&self) -> u32 {
        self.rows.values().map(|row| u32::from(row.losses)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{GameResult, TeamBox};
    use crate::schedule::Fixture;

    fn game(home: u32, home_score: u16, away: u32, away_score: u16) -> PlayedGame {
        let fixture = Fixture {
            week: 1,
            slot: 0,
            home: TeamId(home),
            away: TeamId(away),
        };
        PlayedGame {
            fixture,
            result: GameResult {
                home: TeamBox {
                    team: TeamId(home),
                    score: home_score,
                    ..TeamBox::default()
                },
                away: TeamBox {
                    team: TeamId(away),
                    score: away_score,
                    ..TeamBox::default()
                },
                lines: Vec::new(),
                tiebreak: false,
            },
        }
    }

    #[test]
    fn ranking_breaks_ties_by_differential_then_id() {
        let teams = [TeamId(1), TeamId(2), TeamId(3), TeamId(4)];
        let played = [
            game(1, 30, 2, 10),
            game(3, 17, 4, 14),
            game(2, 21, 3, 20),
            game(4, 14, 1, 10),
        ];
        let standings = Standings::from_results(&teams, &played);
        let order: Vec<u32> = standings.ranked().iter().map(|row| row.team.0).collect();
        // Every team is 1-1; differentials are +16, -19, +2, +1.
        assert_eq!(order, vec![1, 3, 4, 2]);
        assert_eq!(standings.place(TeamId(2)), Some(4));
        assert_eq!(standings.total_wins(), standings.total_losses());
    }

    #[test]
    fn ties_count_half() {
        let teams = [TeamId(1), TeamId(2)];
        let standings = Standings::from_results(&teams, &[game(1, 7, 2, 7), game(2, 3, 1, 0)]);
        let row = standings.row(TeamId(1)).unwrap();
        assert_eq!((row.wins, row.losses, row.ties), (0, 1, 1));
        assert!((row.win_percentage() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn draft_order_puts_worst_first() {
        let mut rows = vec![
            StandingsRow {
                wins: 5,
                losses: 4,
                ..StandingsRow::new(TeamId(1))
            },
            StandingsRow {
                wins: 2,
                losses: 7,
                points_for: 150,
                points_against: 200,
                ..StandingsRow::new(TeamId(2))
            },
            StandingsRow {
                wins: 2,
                losses: 7,
                points_for: 100,
                points_against: 220,
                ..StandingsRow::new(TeamId(3))
            },
        ];
        rows.sort_by(draft_cmp);
        let order: Vec<u32> = rows.iter().map(|row| row.team.0).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }
}
