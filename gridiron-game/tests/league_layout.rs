use gridiron_game::team::roster_size;
use gridiron_game::{
    Career, EngineConfig, EngineError, Manager, ManagerId, ManagerSkills, Rating, Tier,
};

fn manager() -> Manager {
    Manager::new(
        ManagerId(1),
        "Avery Cole".to_string(),
        ManagerSkills::uniform(Rating::from(50)),
    )
}

#[test]
fn default_league_matches_its_layout() {
    let config = EngineConfig::load_from_static();
    let career = Career::new(config.clone(), 2024, manager()).unwrap();
    let league = career.league();
    let per_division = config.league.teams_per_division;

    for (tier, divisions) in [
        (Tier::HighSchool, config.league.high_school_divisions),
        (Tier::College, config.league.college_divisions),
        (Tier::Pro, config.league.pro_divisions),
    ] {
        assert_eq!(league.divisions_in(tier).count(), divisions);
        let teams = league.teams_in(tier);
        assert_eq!(teams.len(), divisions * per_division);
        for team in teams {
            let record = league.registry.team(team).unwrap();
            assert_eq!(record.tier, tier);
            assert_eq!(record.roster_len(), roster_size(tier));
        }
    }

    let home = career.user_manager().unwrap().team.unwrap();
    assert_eq!(league.registry.team(home).unwrap().tier, Tier::HighSchool);
    league.registry.verify_integrity().unwrap();
}

#[test]
fn every_division_plays_a_double_round_robin() {
    let mut career = Career::new(EngineConfig::load_from_static(), 77, manager()).unwrap();
    career.start_season().unwrap();
    for division in &career.league().divisions {
        let schedule = division.schedule.as_ref().unwrap();
        let teams = division.teams.len();
        assert_eq!(usize::from(schedule.week_count()), 2 * (teams - 1));
        for team in &division.teams {
            let home = schedule.fixtures().filter(|f| f.home == *team).count();
            let away = schedule.fixtures().filter(|f| f.away == *team).count();
            assert_eq!(home, teams - 1);
            assert_eq!(away, teams - 1);
        }
        assert_eq!(division.preseason_order.len(), teams);
    }

    let games = career.advance_week().unwrap();
    let expected: usize = career
        .league()
        .divisions
        .iter()
        .map(|division| division.teams.len() / 2)
        .sum();
    assert_eq!(games.len(), expected);
}

#[test]
fn unusable_layouts_are_rejected_up_front() {
    let mut config = EngineConfig::load_from_static();
    config.league.teams_per_division = 5;
    assert!(matches!(
        Career::new(config, 1, manager()),
        Err(EngineError::Configuration(_))
    ));
}
