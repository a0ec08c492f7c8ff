use std::hash::Hasher;
use std::sync::atomic::AtomicBool;

use gridiron_game::{Career, EngineConfig, Manager, ManagerId, ManagerSkills, Rating};
use twox_hash::XxHash64;

fn fingerprint(seed: u64, seasons: u32) -> u64 {
    let mut config = EngineConfig::load_from_static();
    config.league.high_school_divisions = 2;
    config.league.college_divisions = 1;
    config.league.pro_divisions = 1;
    config.league.teams_per_division = 4;
    let manager = Manager::new(
        ManagerId(1),
        "Sam Ortiz".to_string(),
        ManagerSkills::uniform(Rating::from(50)),
    );
    let mut career = Career::new(config, seed, manager).unwrap();
    let cancel = AtomicBool::new(false);
    for _ in 0..seasons {
        career.simulate_season(&cancel).unwrap();
    }
    let bytes = serde_json::to_vec(&career).unwrap();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&bytes);
    hasher.finish()
}

#[test]
fn same_seed_replays_the_same_career() {
    assert_eq!(fingerprint(0xC0FFEE, 2), fingerprint(0xC0FFEE, 2));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(fingerprint(1, 1), fingerprint(2, 1));
}

#[test]
fn week_by_week_matches_whole_season() {
    let mut config = EngineConfig::load_from_static();
    config.league.high_school_divisions = 2;
    config.league.college_divisions = 1;
    config.league.pro_divisions = 1;
    config.league.teams_per_division = 4;
    let manager = Manager::new(
        ManagerId(1),
        "Sam Ortiz".to_string(),
        ManagerSkills::uniform(Rating::from(50)),
    );
    let mut stepped = Career::new(config, 99, manager).unwrap();
    let mut whole = stepped.clone();

    stepped.start_season().unwrap();
    while !stepped.season_finished() {
        stepped.advance_week().unwrap();
    }
    stepped.finish_season().unwrap();
    stepped.run_offseason().unwrap();

    whole.simulate_season(&AtomicBool::new(false)).unwrap();
    assert_eq!(stepped, whole);
}
