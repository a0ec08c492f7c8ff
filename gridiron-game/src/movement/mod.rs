//! Player movement between tiers and teams.
//!
//! Every roster change made here goes through [`Registry::transfer`] or its
//! `release`/`retire` wrappers, so rosters and player back-references stay in
//! step. Recruiting, draft and free agency record [`PolicyGap`]s for cases
//! their rules do not cover instead of failing or dropping the player.
//!
//! [`PolicyGap`]: crate::error::PolicyGap

pub mod draft;
pub mod eligibility;
pub mod free_agency;
pub mod recruiting;
pub mod trade;

use rand::Rng;

use crate::attributes::Position;
use crate::config::GenerationConfig;
use crate::error::InvariantViolation;
use crate::generator::{GenerationContext, generate_player};
use crate::player::PlayerId;
use crate::registry::Registry;
use crate::team::{Team, TeamId, roster_template, starters_at};

pub use draft::{
    BoardEntry, DraftPick, DraftReport, draft_board, draft_order, rookie_salary, run_draft,
};
pub use eligibility::{
    EligibilityReport, UndraftedReport, advance_eligibility, assign_redshirts, resolve_undrafted,
    start_redshirt,
};
pub use free_agency::{
    FreeAgencyReport, Signing, asking_salary, expire_contracts, fill_pro_roster, run_free_agency,
    trim_roster,
};
pub use recruiting::{
    Commitment, RecruitingReport, interest, run_freshman_intake, run_recruiting,
};
pub use trade::{TradeError, TradeOutcome, TradeProposal, execute_trade, validate_trade};

/// Positions a team should add, capped by its open roster slots.
///
/// Slots needed to field the starting formation come first, then the rest
/// of the roster template in template order.
#[must_use]
pub fn vacancies(registry: &Registry, team: &Team) -> Vec<Position> {
    let mut slots: Vec<(bool, Position)> = Vec::new();
    for &(position, target) in roster_template(team.tier) {
        let have = registry.position_count(team.id, position);
        for depth in have..usize::from(target) {
            slots.push((depth >= starters_at(position), position));
        }
    }
    slots.sort_by_key(|(bench, _)| *bench);
    slots
        .into_iter()
        .take(team.open_slots())
        .map(|(_, position)| position)
        .collect()
}

/// Remove and return the pooled player with the best potential at `position`.
fn take_from_pool(
    registry: &Registry,
    pool: &mut Vec<PlayerId>,
    position: Position,
) -> Option<PlayerId> {
    let index = pool
        .iter()
        .enumerate()
        .filter_map(|(index, id)| registry.player(*id).map(|player| (index, player)))
        .filter(|(_, player)| player.position == position)
        .max_by(|(_, a), (_, b)| a.potential().cmp(&b.potential()).then(b.id.cmp(&a.id)))
        .map(|(index, _)| index)?;
    Some(pool.remove(index))
}

/// Fill a high-school or college roster's vacancies, drawing on `pool` before
/// generating new players from `context`.
///
/// # Errors
///
/// Returns an error if the team is unknown.
pub fn fill_roster<R: Rng + ?Sized>(
    registry: &mut Registry,
    team: TeamId,
    context: &GenerationContext,
    config: &GenerationConfig,
    pool: &mut Vec<PlayerId>,
    rng: &mut R,
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let record = registry
        .team(team)
        .ok_or(InvariantViolation::UnknownTeam(team))?;
    let slots = vacancies(registry, record);
    let mut added = Vec::with_capacity(slots.len());
    for position in slots {
        let id = if let Some(id) = take_from_pool(registry, pool, position) {
            id
        } else {
            let id = registry.allocate_player_id();
            let player = generate_player(id, Some(position), context, config, rng);
            registry.insert_player(player, None)?
        };
        registry.transfer(id, Some(team))?;
        added.push(id);
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Intake;
    use crate::player::{Region, Tier};
    use crate::registry::fixtures;
    use crate::team::roster_size;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn vacancies_put_starters_first_and_respect_limit() {
        let mut registry = Registry::new();
        let id = registry.allocate_team_id();
        registry.insert_team(fixtures::team(id, Tier::College));
        let team = registry.team(id).unwrap().clone();
        let slots = vacancies(&registry, &team);
        assert_eq!(slots.len(), roster_size(Tier::College));
        let first_bench = slots
            .iter()
            .enumerate()
            .position(|(index, position)| {
                slots[..index].iter().filter(|p| *p == position).count() >= starters_at(*position)
            })
            .unwrap();
        assert_eq!(first_bench, 26, "the 26 formation slots come first");
    }

    #[test]
    fn fill_uses_pool_before_generating() {
        let mut registry = Registry::new();
        let team = registry.allocate_team_id();
        registry.insert_team(fixtures::team(team, Tier::College));
        let pooled = registry.allocate_player_id();
        registry
            .insert_player(fixtures::player(pooled, Position::K, 60), None)
            .unwrap();
        let mut pool = vec![pooled];
        let context = GenerationContext::college(Region::Midwest, Intake::WalkOn);
        let added = fill_roster(
            &mut registry,
            team,
            &context,
            &GenerationConfig::default(),
            &mut pool,
            &mut SmallRng::seed_from_u64(2),
        )
        .unwrap();
        assert!(pool.is_empty());
        assert!(added.contains(&pooled));
        assert_eq!(registry.team(team).unwrap().roster_len(), roster_size(Tier::College));
        registry.verify_integrity().unwrap();
    }
}
