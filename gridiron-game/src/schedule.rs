//! Double round-robin schedules built with the circle method.
//!
//! A division of `n` teams plays `2 * (n - 1)` weeks. The second half
//! mirrors the first with home and away swapped, so every ordered pairing
//! occurs exactly once and every team hosts `n - 1` games.
//!
//! Weeks advance atomically: a week's fixtures are resolved into a staging
//! vector and only committed once every fixture produced a result.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InvariantViolation};
use crate::numbers::usize_to_u16;
use crate::result::GameResult;
use crate::team::{DivisionId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// One-based week number.
    pub week: u16,
    /// Position within the week, used to derive the fixture's RNG stream.
    pub slot: usize,
    pub home: TeamId,
    pub away: TeamId,
}

impl Fixture {
    #[must_use]
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SchedulePhase {
    NotStarted,
    InProgress { next_week: u16 },
    Complete,
}

/// A fixture with its committed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedGame {
    pub fixture: Fixture,
    pub result: GameResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    division: DivisionId,
    teams: Vec<TeamId>,
    weeks: Vec<Vec<Fixture>>,
    phase: SchedulePhase,
    played: Vec<PlayedGame>,
}

/// Build a division's double round robin. Team order is shuffled with
/// `rng` before pairing.
///
/// # Errors
///
/// Returns [`ConfigurationError::OddDivision`] when the team count is odd or
/// below two, and [`ConfigurationError::MinViolation`] when a team is listed
/// twice.
pub fn build_schedule<R: Rng + ?Sized>(
    division: DivisionId,
    teams: &[TeamId],
    rng: &mut R,
) -> Result<Schedule, ConfigurationError> {
    let count = teams.len();
    if count < 2 || count % 2 != 0 {
        return Err(ConfigurationError::OddDivision {
            division: format!("{}", division.0),
            count,
        });
    }
    let unique: BTreeSet<TeamId> = teams.iter().copied().collect();
    if unique.len() != count {
        return Err(ConfigurationError::MinViolation {
            field: "distinct teams per division",
            min: count,
            value: unique.len(),
        });
    }

    let mut order = teams.to_vec();
    order.shuffle(rng);

    let rounds = count - 1;
    let mut first_half: Vec<Vec<(TeamId, TeamId)>> = Vec::with_capacity(rounds);
    let mut ring = order;
    for round in 0..rounds {
        let mut pairs = Vec::with_capacity(count / 2);
        for i in 0..count / 2 {
            let a = ring[i];
            let b = ring[count - 1 - i];
            // The anchored team alternates venues; other pairs alternate by
            // seat so home counts stay level through the first half.
            let home_first = if i == 0 {
                round % 2 == 0
            } else {
                (round + i) % 2 == 0
            };
            pairs.push(if home_first { (a, b) } else { (b, a) });
        }
        first_half.push(pairs);
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }
    }

    let mut weeks = Vec::with_capacity(rounds * 2);
    let mirrored: Vec<Vec<(TeamId, TeamId)>> = first_half
        .iter()
        .map(|pairs| pairs.iter().map(|&(home, away)| (away, home)).collect())
        .collect();
    for (index, pairs) in first_half.into_iter().chain(mirrored).enumerate() {
        let week = usize_to_u16(index + 1);
        weeks.push(
            pairs
                .into_iter()
                .enumerate()
                .map(|(slot, (home, away))| Fixture {
                    week,
                    slot,
                    home,
                    away,
                })
                .collect(),
        );
    }

    Ok(Schedule {
        division,
        teams: teams.to_vec(),
        weeks,
        phase: SchedulePhase::NotStarted,
        played: Vec::new(),
    })
}

impl Schedule {
    #[must_use]
    pub const fn division(&self) -> DivisionId {
        self.division
    }

    #[must_use]
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    #[must_use]
    pub const fn phase(&self) -> SchedulePhase {
        self.phase
    }

    #[must_use]
    pub fn week_count(&self) -> u16 {
        usize_to_u16(self.weeks.len())
    }

    #[must_use]
    pub fn weeks(&self) -> &[Vec<Fixture>] {
        &self.weeks
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.weeks.iter().flatten()
    }

    #[must_use]
    pub fn played(&self) -> &[PlayedGame] {
        &self.played
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.phase, SchedulePhase::Complete)
    }

    /// Week number and fixtures that the next advance will resolve.
    #[must_use]
    pub fn pending_week(&self) -> Option<(u16, &[Fixture])> {
        let week = match self.phase {
            SchedulePhase::NotStarted => 1,
            SchedulePhase::InProgress { next_week } => next_week,
            SchedulePhase::Complete => return None,
        };
        let index = usize::from(week.checked_sub(1)?);
        self.weeks.get(index).map(|fixtures| (week, fixtures.as_slice()))
    }

    /// Commit a fully staged week. Results must be in fixture order.
    ///
    /// # Errors
    ///
    /// Fails without changing anything when the schedule is complete or the
    /// staged results do not match the pending fixtures one-for-one.
    pub fn commit_week(&mut self, results: Vec<GameResult>) -> Result<u16, InvariantViolation> {
        let Some((week, fixtures)) = self.pending_week() else {
            return Err(InvariantViolation::ScheduleComplete(format!(
                "division {}",
                self.division.0
            )));
        };
        if fixtures.len() != results.len()
            || fixtures
                .iter()
                .zip(&results)
                .any(|(fixture, result)| {
                    fixture.home != result.home.team || fixture.away != result.away.team
                })
        {
            return Err(InvariantViolation::FixtureMismatch { week });
        }
        let fixtures = fixtures.to_vec();
        self.played.extend(
            fixtures
                .into_iter()
                .zip(results)
                .map(|(fixture, result)| PlayedGame { fixture, result }),
        );
        self.phase = if week >= self.week_count() {
            SchedulePhase::Complete
        } else {
            SchedulePhase::InProgress {
                next_week: week + 1,
            }
        };
        Ok(week)
    }

    /// Resolve and commit the next week. If any fixture fails, nothing
    /// from that week is recorded.
    ///
    /// # Errors
    ///
    /// Propagates the first resolver failure, or an invariant violation when
    /// the schedule is already complete.
    pub fn advance_week<F, E>(&mut self, mut resolve: F) -> Result<u16, E>
    where
        F: FnMut(&Fixture) -> Result<GameResult, E>,
        E: From<InvariantViolation>,
    {
        let Some((_, fixtures)) = self.pending_week() else {
            return Err(InvariantViolation::ScheduleComplete(format!(
                "division {}",
                self.division.0
            ))
            .into());
        };
        let mut staged = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            staged.push(resolve(fixture)?);
        }
        Ok(self.commit_week(staged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TeamBox;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::BTreeMap;

    fn ten_teams() -> Vec<TeamId> {
        (0..10).map(TeamId).collect()
    }

    fn stub_result(fixture: &Fixture) -> GameResult {
        GameResult {
            home: TeamBox {
                team: fixture.home,
                score: 21,
                ..TeamBox::default()
            },
            away: TeamBox {
                team: fixture.away,
                score: 14,
                ..TeamBox::default()
            },
            lines: Vec::new(),
            tiebreak: false,
        }
    }

    #[test]
    fn double_round_robin_shape() {
        let teams = ten_teams();
        let schedule =
            build_schedule(DivisionId(0), &teams, &mut SmallRng::seed_from_u64(4)).unwrap();
        assert_eq!(schedule.week_count(), 18);
        let mut pairings: BTreeMap<(TeamId, TeamId), usize> = BTreeMap::new();
        for week in schedule.weeks() {
            assert_eq!(week.len(), 5);
            let mut seen = BTreeSet::new();
            for fixture in week {
                assert!(seen.insert(fixture.home), "team booked twice in a week");
                assert!(seen.insert(fixture.away), "team booked twice in a week");
                *pairings.entry((fixture.home, fixture.away)).or_default() += 1;
            }
        }
        assert_eq!(pairings.len(), 90);
        assert!(pairings.values().all(|&count| count == 1));
        for team in &teams {
            let hosted = schedule.fixtures().filter(|f| f.home == *team).count();
            assert_eq!(hosted, 9);
        }
    }

    #[test]
    fn odd_or_tiny_divisions_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let odd: Vec<TeamId> = (0..9).map(TeamId).collect();
        assert!(matches!(
            build_schedule(DivisionId(2), &odd, &mut rng),
            Err(ConfigurationError::OddDivision { count: 9, .. })
        ));
        assert!(build_schedule(DivisionId(2), &[TeamId(1)], &mut rng).is_err());
        assert!(build_schedule(DivisionId(2), &[TeamId(1), TeamId(1)], &mut rng).is_err());
    }

    #[test]
    fn failed_week_commits_nothing() {
        let mut schedule =
            build_schedule(DivisionId(0), &ten_teams(), &mut SmallRng::seed_from_u64(8)).unwrap();
        schedule
            .advance_week(|fixture| Ok::<_, InvariantViolation>(stub_result(fixture)))
            .unwrap();
        let before = schedule.clone();
        let mut calls = 0;
        let err = schedule.advance_week(|fixture| {
            calls += 1;
            if calls == 4 {
                Err(InvariantViolation::UnknownTeam(fixture.home))
            } else {
                Ok(stub_result(fixture))
            }
        });
        assert!(err.is_err());
        assert_eq!(schedule, before);
        assert_eq!(schedule.phase(), SchedulePhase::InProgress { next_week: 2 });
    }

    #[test]
    fn schedule_runs_to_completion() {
        let mut schedule =
            build_schedule(DivisionId(0), &ten_teams(), &mut SmallRng::seed_from_u64(8)).unwrap();
        for expected in 1..=18 {
            let week = schedule
                .advance_week(|fixture| Ok::<_, InvariantViolation>(stub_result(fixture)))
                .unwrap();
            assert_eq!(week, expected);
        }
        assert!(schedule.is_complete());
        assert_eq!(schedule.played().len(), 90);
        assert!(matches!(
            schedule.advance_week(|fixture| Ok::<_, InvariantViolation>(stub_result(fixture))),
            Err(InvariantViolation::ScheduleComplete(_))
        ));
    }

    #[test]
    fn mismatched_results_are_refused() {
        let mut schedule =
            build_schedule(DivisionId(0), &ten_teams(), &mut SmallRng::seed_from_u64(8)).unwrap();
        let err = schedule.commit_week(Vec::new()).unwrap_err();
        assert_eq!(err, InvariantViolation::FixtureMismatch { week: 1 });
        assert_eq!(schedule.phase(), SchedulePhase::NotStarted);
    }
}
