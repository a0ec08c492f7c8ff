use std::collections::BTreeMap;

use gridiron_game::{
    Attribute, DivisionId, EngineConfig, InvariantViolation, League, Manager, ManagerId,
    ManagerSkills, Player, Rating, Standings, TeamId, TeamSheet, Tier, build_schedule,
    resolve_game,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const SEASONS: u64 = 150;
const BOOST: u8 = 6;

/// Ten sheets cut from one college roster. The first team plays the same
/// roster with every attribute raised by `BOOST`.
fn division() -> (DivisionId, BTreeMap<TeamId, TeamSheet>) {
    let mut config = EngineConfig::load_from_static();
    config.league.teams_per_division = 10;
    config.league.high_school_divisions = 1;
    config.league.college_divisions = 1;
    config.league.pro_divisions = 1;
    let manager = Manager::new(
        ManagerId(1),
        "Riley Chen".to_string(),
        ManagerSkills::uniform(Rating::from(50)),
    );
    let league = League::create(&config, manager, &mut ChaCha20Rng::seed_from_u64(5)).unwrap();
    let division = league.divisions_in(Tier::College).next().unwrap();
    assert_eq!(division.teams.len(), 10);

    let source = division.teams[0];
    let record = league.registry.team(source).unwrap();
    let roster = league.registry.roster(source);
    let even = TeamSheet::from_roster(record, &roster, Rating::from(50));

    let boosted_players: Vec<Player> = roster
        .iter()
        .map(|&player| {
            let mut player = player.clone();
            for attribute in Attribute::ALL {
                player.attributes.raise_ceiling(attribute, BOOST, Rating::MAX);
                player.attributes.adjust_current(attribute, i32::from(BOOST));
            }
            player
        })
        .collect();
    let boosted_refs: Vec<&Player> = boosted_players.iter().collect();
    let boosted = TeamSheet::from_roster(record, &boosted_refs, Rating::from(50));

    let sheets = division
        .teams
        .iter()
        .map(|&team| {
            let mut sheet = if team == source { boosted.clone() } else { even.clone() };
            sheet.team = team;
            (team, sheet)
        })
        .collect();
    (division.id, sheets)
}

#[test]
fn stronger_team_wins_more_over_full_seasons() {
    let (division, sheets) = division();
    let teams: Vec<TeamId> = sheets.keys().copied().collect();
    let strong = *teams.first().unwrap();
    let rules = EngineConfig::load_from_static().resolver;

    let (mut strong_wins, mut strong_games) = (0_u32, 0_u32);
    for seed in 0..SEASONS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut schedule = build_schedule(division, &teams, &mut rng).unwrap();
        assert_eq!(schedule.week_count(), 18);
        while schedule.pending_week().is_some() {
            schedule
                .advance_week(|fixture| -> Result<_, InvariantViolation> {
                    Ok(resolve_game(
                        &sheets[&fixture.home],
                        &sheets[&fixture.away],
                        &rules,
                        &mut rng,
                    ))
                })
                .unwrap();
        }

        let standings = Standings::from_results(&teams, schedule.played());
        assert_eq!(
            standings.total_wins(),
            standings.total_losses(),
            "season {seed} is unbalanced"
        );
        for row in standings.rows() {
            assert_eq!(row.games(), 18, "team {:?} in season {seed}", row.team);
        }
        let row = standings.row(strong).unwrap();
        strong_wins += u32::from(row.wins);
        strong_games += u32::from(row.games());
    }

    let share = f64::from(strong_wins) / f64::from(strong_games);
    assert!(share > 0.5, "boosted team won only {share:.3} of its games");
}
