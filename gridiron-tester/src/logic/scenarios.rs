use super::career_tester::{
    Layout, SimulationPlan, league_is_consistent, pipeline_moves_players, replays_identically,
    standings_balance, user_manager_progresses,
};

pub struct TestScenario {
    pub name: String,
    pub description: String,
    pub plan: SimulationPlan,
}

const CATALOGUE: &[(&str, &str)] = &[
    ("smoke", "One compact season; rosters, caps and standings stay consistent"),
    (
        "determinism",
        "Replaying a seed reproduces the same career fingerprint",
    ),
    (
        "pipeline",
        "Three compact seasons move players through recruiting and the draft",
    ),
    (
        "career",
        "Five compact seasons; the user manager keeps earning skill points",
    ),
    ("full-league", "One season on the production league layout"),
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOGUE.to_vec()
}

pub fn scenario_names() -> Vec<String> {
    CATALOGUE.iter().map(|(name, _)| (*name).to_string()).collect()
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let plan = match name {
        "smoke" => SimulationPlan::new(Layout::Compact, 1)
            .check(league_is_consistent)
            .check(standings_balance),
        "determinism" => SimulationPlan::new(Layout::Compact, 2).check(replays_identically),
        "pipeline" => SimulationPlan::new(Layout::Compact, 3)
            .check(league_is_consistent)
            .check(pipeline_moves_players),
        "career" => SimulationPlan::new(Layout::Compact, 5)
            .check(league_is_consistent)
            .check(standings_balance)
            .check(user_manager_progresses),
        "full-league" => SimulationPlan::new(Layout::Full, 1)
            .check(league_is_consistent)
            .check(standings_balance)
            .check(pipeline_moves_players),
        _ => return None,
    };
    let description = CATALOGUE
        .iter()
        .find(|(key, _)| *key == name)
        .map_or_else(String::new, |(_, text)| (*text).to_string());
    Some(TestScenario {
        name: name.to_string(),
        description,
        plan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (name, description) in list_scenarios() {
            let scenario = get_scenario(name).unwrap();
            assert_eq!(scenario.description, description);
            assert!(!scenario.plan.expectations.is_empty());
        }
        assert!(get_scenario("missing").is_none());
    }
}
