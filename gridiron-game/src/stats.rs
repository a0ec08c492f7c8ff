//! Season statistics rolled up from played games.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::result::PlayerLine;
use crate::schedule::PlayedGame;
use crate::team::TeamId;

/// One player's totals over every game they recorded a line in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub games_played: u16,
    pub totals: PlayerLine,
}

/// Fold every player line of `games` into per-player totals.
#[must_use]
pub fn season_stats<'a>(
    games: impl IntoIterator<Item = &'a PlayedGame>,
) -> BTreeMap<PlayerId, SeasonStats> {
    let mut stats: BTreeMap<PlayerId, SeasonStats> = BTreeMap::new();
    for game in games {
        for line in &game.result.lines {
            stats
                .entry(line.player)
                .and_modify(|season| {
                    season.games_played = season.games_played.saturating_add(1);
                    season.totals.absorb(line);
                })
                .or_insert_with(|| SeasonStats {
                    games_played: 1,
                    totals: line.clone(),
                });
        }
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    PassingYards,
    RushingYards,
    ReceivingYards,
    Receptions,
    Sacks,
    Interceptions,
}

impl StatCategory {
    pub const ALL: [Self; 6] = [
        Self::PassingYards,
        Self::RushingYards,
        Self::ReceivingYards,
        Self::Receptions,
        Self::Sacks,
        Self::Interceptions,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PassingYards => "Passing yards",
            Self::RushingYards => "Rushing yards",
            Self::ReceivingYards => "Receiving yards",
            Self::Receptions => "Receptions",
            Self::Sacks => "Sacks",
            Self::Interceptions => "Interceptions",
        }
    }

    #[must_use]
    pub fn value(self, line: &PlayerLine) -> u32 {
        match self {
            Self::PassingYards => line.pass_yards,
            Self::RushingYards => line.rush_yards,
            Self::ReceivingYards => line.receiving_yards,
            Self::Receptions => u32::from(line.receptions),
            Self::Sacks => u32::from(line.sacks),
            Self::Interceptions => u32::from(line.interceptions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub player: PlayerId,
    pub team: TeamId,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLeaders {
    pub category: StatCategory,
    pub leaders: Vec<Leader>,
}

/// The top `limit` players in each category, highest first, ties by player
/// id. Players with nothing in a category are left out of it.
#[must_use]
pub fn stat_leaders(stats: &BTreeMap<PlayerId, SeasonStats>, limit: usize) -> Vec<CategoryLeaders> {
    StatCategory::ALL
        .into_iter()
        .map(|category| {
            let mut leaders: Vec<Leader> = stats
                .values()
                .map(|season| Leader {
                    player: season.totals.player,
                    team: season.totals.team,
                    value: category.value(&season.totals),
                })
                .filter(|leader| leader.value > 0)
                .collect();
            leaders.sort_by(|a, b| b.value.cmp(&a.value).then(a.player.cmp(&b.player)));
            leaders.truncate(limit);
            CategoryLeaders { category, leaders }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Position;
    use crate::result::{GameResult, TeamBox};
    use crate::schedule::Fixture;

    fn game(week: u16, lines: Vec<PlayerLine>) -> PlayedGame {
        PlayedGame {
            fixture: Fixture {
                week,
                slot: 0,
                home: TeamId(1),
                away: TeamId(2),
            },
            result: GameResult {
                home: TeamBox::tally(TeamId(1), 0, 0, &lines),
                away: TeamBox::tally(TeamId(2), 0, 0, &lines),
                lines,
                tiebreak: false,
            },
        }
    }

    fn passer(id: u32, team: u32, yards: u32) -> PlayerLine {
        PlayerLine {
            pass_attempts: 30,
            pass_yards: yards,
            ..PlayerLine::empty(PlayerId(id), TeamId(team), Position::QB)
        }
    }

    fn rusher(id: u32, team: u32, sacks: u16) -> PlayerLine {
        PlayerLine {
            sacks,
            tackles: 4,
            ..PlayerLine::empty(PlayerId(id), TeamId(team), Position::DE)
        }
    }

    #[test]
    fn season_totals_sum_every_game() {
        let games = [
            game(1, vec![passer(10, 1, 250), rusher(20, 2, 1)]),
            game(2, vec![passer(10, 1, 180), rusher(20, 2, 2)]),
            game(3, vec![passer(10, 1, 301)]),
        ];
        let stats = season_stats(&games);
        let qb = &stats[&PlayerId(10)];
        assert_eq!(qb.games_played, 3);
        assert_eq!(qb.totals.pass_yards, 731);
        assert_eq!(qb.totals.pass_attempts, 90);
        let edge = &stats[&PlayerId(20)];
        assert_eq!(edge.games_played, 2);
        assert_eq!((edge.totals.sacks, edge.totals.tackles), (3, 8));
    }

    #[test]
    fn leaders_rank_by_value_then_id_and_skip_zeroes() {
        let games = [game(
            1,
            vec![
                passer(3, 1, 200),
                passer(1, 2, 200),
                passer(2, 1, 320),
                rusher(4, 2, 2),
            ],
        )];
        let leaders = stat_leaders(&season_stats(&games), 2);
        assert_eq!(leaders.len(), StatCategory::ALL.len());
        let passing = &leaders[0];
        assert_eq!(passing.category, StatCategory::PassingYards);
        let order: Vec<PlayerId> = passing.leaders.iter().map(|l| l.player).collect();
        assert_eq!(order, vec![PlayerId(2), PlayerId(1)]);
        let sacks = leaders
            .iter()
            .find(|c| c.category == StatCategory::Sacks)
            .unwrap();
        assert_eq!(sacks.leaders.len(), 1);
        assert_eq!(sacks.leaders[0].team, TeamId(2));
        let rushing = leaders
            .iter()
            .find(|c| c.category == StatCategory::RushingYards)
            .unwrap();
        assert!(rushing.leaders.is_empty());
    }
}
