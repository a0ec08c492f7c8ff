use anyhow::{Context, Result, bail};
use gridiron_game::{
    Career, EngineConfig, Manager, ManagerId, ManagerSkills, Rating, SeasonSummary, Tier,
};
use sha2::{Digest, Sha256};
use std::sync::atomic::AtomicBool;

/// League size a plan runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Four-team divisions, one per tier except high school. Fast.
    Compact,
    /// The compiled-in production layout.
    Full,
}

impl Layout {
    pub fn config(self) -> EngineConfig {
        let mut config = EngineConfig::load_from_static();
        if matches!(self, Self::Compact) {
            config.league.high_school_divisions = 2;
            config.league.college_divisions = 1;
            config.league.pro_divisions = 1;
            config.league.teams_per_division = 4;
        }
        config
    }
}

pub type Expectation = fn(&CareerRun) -> Result<()>;

pub struct SimulationPlan {
    pub layout: Layout,
    pub seasons: u32,
    pub expectations: Vec<Expectation>,
}

impl SimulationPlan {
    pub const fn new(layout: Layout, seasons: u32) -> Self {
        Self {
            layout,
            seasons,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn check(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }
}

/// Everything a finished plan leaves behind for expectations to inspect.
pub struct CareerRun {
    pub seed: u64,
    pub layout: Layout,
    pub summaries: Vec<SeasonSummary>,
    pub career: Career,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CareerTester {
    verbose: bool,
}

impl CareerTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Create a career from `seed` and play `plan.seasons` full seasons.
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> Result<CareerRun> {
        let mut career = Career::new(plan.layout.config(), seed, test_manager())
            .with_context(|| format!("creating career for seed {seed}"))?;
        let cancel = AtomicBool::new(false);
        let mut summaries = Vec::new();
        for _ in 0..plan.seasons {
            let summary = career
                .simulate_season(&cancel)
                .with_context(|| format!("season {} of seed {seed}", career.season()))?;
            if self.verbose {
                println!(
                    "    season {}: {} commitments, {} draft picks, {} signings",
                    summary.outcome.season,
                    summary.offseason.recruiting.commitments.len(),
                    summary.offseason.draft.picks.len(),
                    summary.offseason.free_agency.signings.len()
                );
            }
            summaries.push(summary);
        }
        let fingerprint = fingerprint(&career)?;
        Ok(CareerRun {
            seed,
            layout: plan.layout,
            summaries,
            career,
            fingerprint,
        })
    }
}

pub fn test_manager() -> Manager {
    Manager::new(
        ManagerId(1),
        "QA Manager".to_string(),
        ManagerSkills::uniform(Rating::from(50)),
    )
}

/// SHA-256 of the serialized career, as lowercase hex.
pub fn fingerprint(career: &Career) -> Result<String> {
    let bytes = serde_json::to_vec(career).context("serializing career")?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{digest:x}"))
}

pub fn league_is_consistent(run: &CareerRun) -> Result<()> {
    let league = run.career.league();
    league.registry.verify_integrity()?;
    for team in league.teams_in(Tier::Pro) {
        let Some(record) = league.registry.team(team) else {
            bail!("pro team {team:?} missing from the registry");
        };
        if record.roster_len() > record.roster_limit() {
            bail!(
                "{} carries {} players over a limit of {}",
                record.name,
                record.roster_len(),
                record.roster_limit()
            );
        }
        if let Some(cap) = record.salary_cap() {
            let payroll = league.registry.payroll(team);
            if payroll > cap {
                bail!("{} payroll {payroll} exceeds cap {cap}", record.name);
            }
        }
    }
    Ok(())
}

pub fn standings_balance(run: &CareerRun) -> Result<()> {
    for summary in &run.summaries {
        for (division, standings) in &summary.outcome.standings {
            let (wins, losses) = (standings.total_wins(), standings.total_losses());
            if wins != losses {
                bail!(
                    "season {} division {division:?}: {wins} wins against {losses} losses",
                    summary.outcome.season
                );
            }
        }
    }
    Ok(())
}

pub fn pipeline_moves_players(run: &CareerRun) -> Result<()> {
    let commitments: usize = run
        .summaries
        .iter()
        .map(|summary| summary.offseason.recruiting.commitments.len())
        .sum();
    let picks: usize = run
        .summaries
        .iter()
        .map(|summary| summary.offseason.draft.picks.len())
        .sum();
    if commitments == 0 {
        bail!("no senior signed with a college");
    }
    if picks == 0 {
        bail!("no college player was drafted");
    }
    Ok(())
}

pub fn user_manager_progresses(run: &CareerRun) -> Result<()> {
    let Some(manager) = run.career.user_manager() else {
        bail!("user manager missing");
    };
    let seasons = u32::try_from(run.summaries.len()).unwrap_or(u32::MAX);
    if manager.points_earned() < seasons {
        bail!(
            "manager earned {} skill points over {} seasons",
            manager.points_earned(),
            run.summaries.len()
        );
    }
    Ok(())
}

pub fn replays_identically(run: &CareerRun) -> Result<()> {
    let plan = SimulationPlan::new(run.layout, u32::try_from(run.summaries.len())?);
    let replay = CareerTester::new(false).run_plan(&plan, run.seed)?;
    if replay.fingerprint != run.fingerprint {
        bail!(
            "seed {} replayed to {} instead of {}",
            run.seed,
            replay.fingerprint,
            run.fingerprint
        );
    }
    Ok(())
}
