use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

use gridiron_game::{
    Career, CareerPhase, EngineConfig, EngineError, Manager, ManagerId, ManagerSkills,
    PlayerId, PlayerStatus, Rating, Skill, SkillAllocation, Tier, TradeError, TradeProposal,
};

fn small_config() -> EngineConfig {
    let mut config = EngineConfig::load_from_static();
    config.league.high_school_divisions = 2;
    config.league.college_divisions = 1;
    config.league.pro_divisions = 1;
    config.league.teams_per_division = 4;
    config
}

fn new_career(seed: u64) -> Career {
    let manager = Manager::new(
        ManagerId(7),
        "Morgan Reyes".to_string(),
        ManagerSkills::uniform(Rating::from(60)),
    );
    Career::new(small_config(), seed, manager).unwrap()
}

fn college_clocks(career: &Career) -> BTreeMap<PlayerId, u8> {
    career
        .league()
        .registry
        .players()
        .filter(|player| matches!(player.tier, Tier::College) && player.team.is_some())
        .filter_map(|player| {
            player
                .college
                .map(|status| (player.id, status.eligibility_remaining))
        })
        .collect()
}

#[test]
fn consecutive_seasons_keep_the_league_consistent() {
    let mut career = new_career(0x5EED);
    let cancel = AtomicBool::new(false);
    for expected_season in 1..=2 {
        let summary = career.simulate_season(&cancel).unwrap();
        assert_eq!(summary.outcome.season, expected_season);
        for (_, standings) in &summary.outcome.standings {
            assert_eq!(standings.total_wins(), standings.total_losses());
        }

        let league = career.league();
        league.registry.verify_integrity().unwrap();
        for team in league.teams_in(Tier::Pro) {
            let record = league.registry.team(team).unwrap();
            assert!(record.roster_len() <= record.roster_limit());
            let cap = record.salary_cap().unwrap();
            assert!(
                league.registry.payroll(team) <= cap,
                "team {team:?} payroll over its cap"
            );
        }
        for team in league.teams_in(Tier::HighSchool) {
            for player in league.registry.roster(team) {
                assert!((1..=4).contains(&player.class_year));
            }
        }
        for player in league.registry.players() {
            assert_ne!(player.status, PlayerStatus::Retired, "retired records are pruned");
            if matches!(player.tier, Tier::College) && player.team.is_some() {
                assert!(!player.is_draft_eligible(), "draft-eligible players leave college");
            }
        }
    }
    assert_eq!(career.season(), 3);
    assert_eq!(career.phase(), CareerPhase::Preseason);
}

#[test]
fn eligibility_only_counts_down() {
    let mut career = new_career(11);
    career.start_season().unwrap();
    let before = college_clocks(&career);
    while !career.season_finished() {
        career.advance_week().unwrap();
    }
    career.finish_season().unwrap();
    let after = college_clocks(&career);
    let mut ticked = 0;
    for (id, remaining) in &after {
        let previous = before[id];
        assert!(*remaining <= previous, "eligibility rose for {id:?}");
        if *remaining < previous {
            ticked += 1;
        }
    }
    assert!(ticked > 0, "a season should use some eligibility");
}

#[test]
fn season_outcome_judges_the_user_manager() {
    let mut career = new_career(23);
    let points_before = career.user_manager().unwrap().available_points();
    let summary = career.simulate_season(&AtomicBool::new(false)).unwrap();
    let award = summary
        .outcome
        .review
        .awards
        .iter()
        .find(|award| award.manager == ManagerId(7))
        .unwrap();
    assert!(award.points >= 1);
    assert_eq!(
        career.user_manager().unwrap().available_points(),
        points_before + award.points
    );
}

#[test]
fn trades_move_players_between_pro_rosters() {
    let mut career = new_career(31);
    let pros = career.league().teams_in(Tier::Pro);
    let (a, b) = (pros[0], pros[1]);
    let cheapest = |career: &Career, team| {
        career
            .league()
            .registry
            .roster(team)
            .into_iter()
            .min_by_key(|player| (player.salary(), player.id))
            .map(|player| player.id)
            .unwrap()
    };
    let send = cheapest(&career, a);
    let receive = cheapest(&career, b);
    career
        .trade(TradeProposal {
            from: a,
            to: b,
            send: vec![send],
            receive: vec![receive],
        })
        .unwrap();
    let registry = &career.league().registry;
    assert_eq!(registry.player(send).unwrap().team, Some(b));
    assert_eq!(registry.player(receive).unwrap().team, Some(a));
    registry.verify_integrity().unwrap();
}

#[test]
fn rejected_trade_changes_nothing() {
    let mut career = new_career(37);
    let pros = career.league().teams_in(Tier::Pro);
    let stranger = career.league().registry.roster(pros[1])[0].id;
    let before = career.clone();
    let err = career
        .trade(TradeProposal {
            from: pros[0],
            to: pros[1],
            send: vec![stranger],
            receive: Vec::new(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Trade(TradeError::NotOnRoster { .. })
    ));
    assert_eq!(career, before);
}

#[test]
fn skill_spending_feeds_back_into_the_league() {
    let mut career = new_career(41);
    let team = career.user_manager().unwrap().team.unwrap();
    let before = career.league().skill(team, Skill::Persuasion);
    career
        .spend_skill_points(&SkillAllocation::single(Skill::Persuasion, 10))
        .unwrap();
    let after = career.league().skill(team, Skill::Persuasion);
    assert_eq!(after.value(), before.value() + 10);
}
