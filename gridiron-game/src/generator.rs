//! Player generation.
//!
//! Ceilings are drawn per attribute from a normal distribution whose centre
//! and spread depend on the tier. For high-school intake the generating
//! team's scouting and facility grades shift the centre up, narrow the spread
//! and lift the floor, so better-scouted classes are both stronger and more
//! predictable. Current values sit a random development gap below each
//! ceiling.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeSet, Physical, Position, Rating, potential};
use crate::config::GenerationConfig;
use crate::constants::{
    ARM_LENGTH_MAX_IN, ARM_LENGTH_MIN_IN, COLLEGE_ELIGIBILITY_YEARS, DEVELOPMENT_GAP_MAX,
    DIAMOND_BASE_CHANCE, DIAMOND_SCOUTING_BONUS, HEAVY_BUILD_WPI, HIDDEN_CEILING_HEADROOM_MAX,
    HIDDEN_CEILING_HEADROOM_MIN, LEAN_BUILD_WPI,
};
use crate::names::player_name;
use crate::numbers::round_f64_to_i32;
use crate::player::{CollegeStatus, Player, PlayerId, PlayerStatus, Region, Tier};

/// Which pipeline entry point a player is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intake {
    /// Incoming high-school freshmen (ages 14-15).
    Freshman,
    /// A full starting roster at league creation, all class years.
    InitialRoster,
    /// College roster filler at a modest baseline.
    WalkOn,
    /// Professional veteran (league creation and depth fill).
    Veteran,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub tier: Tier,
    pub intake: Intake,
    pub region: Region,
    /// Scouting grade of the generating team's manager. High school only.
    pub scouting: Rating,
    /// Facility grade of the generating team. High school only.
    pub facility: Rating,
}

impl GenerationContext {
    #[must_use]
    pub const fn high_school(
        region: Region,
        intake: Intake,
        scouting: Rating,
        facility: Rating,
    ) -> Self {
        Self {
            tier: Tier::HighSchool,
            intake,
            region,
            scouting,
            facility,
        }
    }

    #[must_use]
    pub const fn college(region: Region, intake: Intake) -> Self {
        Self {
            tier: Tier::College,
            intake,
            region,
            scouting: Rating::MIN,
            facility: Rating::MIN,
        }
    }

    #[must_use]
    pub const fn professional(region: Region) -> Self {
        Self {
            tier: Tier::Pro,
            intake: Intake::Veteran,
            region,
            scouting: Rating::MIN,
            facility: Rating::MIN,
        }
    }
}

/// Centre, spread and floor of the ceiling distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeilingProfile {
    pub mean: f64,
    pub spread: f64,
    pub floor: f64,
}

const HIGH_SCHOOL_PROFILE: CeilingProfile = CeilingProfile {
    mean: 47.5,
    spread: 16.0,
    floor: 20.0,
};
const DIAMOND_PROFILE: CeilingProfile = CeilingProfile {
    mean: 71.0,
    spread: 12.0,
    floor: 50.0,
};
const COLLEGE_PROFILE: CeilingProfile = CeilingProfile {
    mean: 62.5,
    spread: 13.0,
    floor: 40.0,
};
const WALK_ON_PROFILE: CeilingProfile = CeilingProfile {
    mean: 50.0,
    spread: 10.0,
    floor: 30.0,
};
const PRO_PROFILE: CeilingProfile = CeilingProfile {
    mean: 72.5,
    spread: 13.0,
    floor: 50.0,
};

/// Ceiling distribution for a context, before any diamond roll.
#[must_use]
pub fn ceiling_profile(context: &GenerationContext, config: &GenerationConfig) -> CeilingProfile {
    match (context.tier, context.intake) {
        (Tier::HighSchool, _) => {
            let scouting = context.scouting.as_f64();
            let facility = context.facility.as_f64();
            CeilingProfile {
                mean: HIGH_SCHOOL_PROFILE.mean
                    + config.scouting_mean_shift * (scouting - 50.0)
                    + config.facility_mean_shift * (facility - 50.0),
                spread: HIGH_SCHOOL_PROFILE.spread
                    * (1.0 - config.scouting_spread_narrowing * context.scouting.fraction()),
                floor: HIGH_SCHOOL_PROFILE.floor + config.scouting_floor * scouting,
            }
        }
        (Tier::College, Intake::WalkOn) => WALK_ON_PROFILE,
        (Tier::College, _) => COLLEGE_PROFILE,
        (Tier::Pro, _) => PRO_PROFILE,
    }
}

fn sample_ceiling<R: Rng + ?Sized>(profile: CeilingProfile, rng: &mut R) -> f64 {
    let draw = Normal::new(profile.mean, profile.spread.max(0.5))
        .map_or(profile.mean, |normal| normal.sample(rng));
    draw.clamp(profile.floor.min(99.0), 99.0)
}

fn age_for<R: Rng + ?Sized>(context: &GenerationContext, rng: &mut R) -> u8 {
    match (context.tier, context.intake) {
        (Tier::HighSchool, Intake::Freshman) => rng.gen_range(14..=15),
        (Tier::HighSchool, _) => rng.gen_range(14..=18),
        (Tier::College, Intake::WalkOn) => rng.gen_range(18..=19),
        (Tier::College, _) => rng.gen_range(18..=22),
        (Tier::Pro, _) => rng.gen_range(22..=30),
    }
}

fn class_year_for(tier: Tier, age: u8) -> u8 {
    match tier {
        Tier::HighSchool => age.saturating_sub(13).clamp(1, 4),
        Tier::College => age.saturating_sub(17).clamp(1, 4),
        Tier::Pro => 4,
    }
}

/// High-school size bands by age: (min height, max height, min weight, max weight).
const fn high_school_band(age: u8) -> (u8, u8, u16, u16) {
    match age {
        0..=14 => (64, 70, 140, 220),
        15 => (65, 71, 150, 240),
        16 => (66, 72, 160, 260),
        17 => (67, 73, 170, 280),
        _ => (68, 74, 180, 300),
    }
}

fn physical_for<R: Rng + ?Sized>(
    tier: Tier,
    age: u8,
    position: Option<Position>,
    rng: &mut R,
) -> Physical {
    let height_in = match tier {
        Tier::HighSchool => {
            let (lo, hi, _, _) = high_school_band(age);
            rng.gen_range(lo..=hi)
        }
        Tier::College => rng.gen_range(68..=76),
        Tier::Pro => rng.gen_range(69..=77),
    };
    let weight_lb = match (tier, position) {
        (Tier::HighSchool, _) => {
            let (_, _, lo, hi) = high_school_band(age);
            rng.gen_range(lo..=hi)
        }
        (_, Some(position)) => {
            let (lo, hi) = position.build_range();
            let wpi = rng.gen_range(lo..=hi);
            u16::try_from(round_f64_to_i32(wpi * f64::from(height_in)).max(150)).unwrap_or(200)
        }
        (Tier::College, None) => rng.gen_range(180..=320),
        (Tier::Pro, None) => rng.gen_range(190..=330),
    };
    let arm_lo = round_f64_to_i32(ARM_LENGTH_MIN_IN);
    let arm_hi = round_f64_to_i32(ARM_LENGTH_MAX_IN);
    let mut arm = rng.gen_range(arm_lo..=arm_hi);
    if height_in >= 72 {
        arm = (arm + rng.gen_range(0..=2)).min(arm_hi);
    }
    Physical {
        height_in,
        weight_lb,
        arm_length_in: u8::try_from(arm).unwrap_or(32),
    }
}

/// Lean bodies skew toward quickness, heavy bodies toward strength.
fn build_bias(physical: Physical, attribute: Attribute) -> i32 {
    let wpi = physical.weight_per_inch();
    if wpi < LEAN_BUILD_WPI {
        match attribute {
            Attribute::Speed | Attribute::Acceleration => 8,
            Attribute::LateralQuickness | Attribute::VerticalJump => 6,
            Attribute::BroadJump => 5,
            Attribute::LowerBodyStrength => -6,
            Attribute::UpperBodyStrength | Attribute::RunBlock | Attribute::PassProtection => -4,
            _ => 0,
        }
    } else if wpi > HEAVY_BUILD_WPI {
        match attribute {
            Attribute::LowerBodyStrength => 8,
            Attribute::UpperBodyStrength | Attribute::RunBlock | Attribute::PassProtection => 6,
            Attribute::Speed | Attribute::Acceleration => -6,
            Attribute::LateralQuickness | Attribute::VerticalJump | Attribute::BroadJump => -4,
            _ => 0,
        }
    } else {
        0
    }
}

const fn current_floor(tier: Tier) -> u8 {
    match tier {
        Tier::HighSchool => 0,
        Tier::College => 35,
        Tier::Pro => 50,
    }
}

fn attributes_for<R: Rng + ?Sized>(
    profile: CeilingProfile,
    tier: Tier,
    physical: Physical,
    rng: &mut R,
) -> AttributeSet {
    AttributeSet::from_fn(|attribute| {
        let base = round_f64_to_i32(sample_ceiling(profile, rng));
        let ceiling = Rating::new(base + build_bias(physical, attribute));
        let gap_max = DEVELOPMENT_GAP_MAX.min(ceiling.value());
        let gap = rng.gen_range(0..=gap_max);
        let current = ceiling
            .value()
            .saturating_sub(gap)
            .max(current_floor(tier))
            .min(ceiling.value());
        (Rating::from(current), ceiling)
    })
}

/// A body and attribute profile not yet tied to a position.
#[derive(Debug, Clone)]
struct Prospect {
    name: String,
    age: u8,
    physical: Physical,
    attributes: AttributeSet,
    hidden_ceiling: Rating,
}

fn prospect<R: Rng + ?Sized>(
    context: &GenerationContext,
    config: &GenerationConfig,
    position: Option<Position>,
    rng: &mut R,
) -> Prospect {
    let age = age_for(context, rng);
    let physical = physical_for(context.tier, age, position, rng);
    let mut profile = ceiling_profile(context, config);
    if matches!(context.tier, Tier::HighSchool) {
        let diamond_chance =
            DIAMOND_BASE_CHANCE + DIAMOND_SCOUTING_BONUS * context.scouting.fraction();
        if rng.gen_bool(diamond_chance.clamp(0.0, 1.0)) {
            profile = CeilingProfile {
                floor: DIAMOND_PROFILE.floor.max(profile.floor),
                ..DIAMOND_PROFILE
            };
        }
    }
    let attributes = attributes_for(profile, context.tier, physical, rng);
    let headroom = rng.gen_range(HIDDEN_CEILING_HEADROOM_MIN..=HIDDEN_CEILING_HEADROOM_MAX);
    let hidden_ceiling = attributes
        .highest_ceiling()
        .saturating_add(i32::from(headroom));
    Prospect {
        name: player_name(rng),
        age,
        physical,
        attributes,
        hidden_ceiling,
    }
}

fn into_player(
    id: PlayerId,
    prospect: Prospect,
    position: Position,
    context: &GenerationContext,
) -> Player {
    let college = matches!(context.tier, Tier::College).then(|| {
        let mut status = CollegeStatus::incoming();
        if !matches!(context.intake, Intake::WalkOn) {
            let years = class_year_for(Tier::College, prospect.age)
                .saturating_sub(1)
                .min(COLLEGE_ELIGIBILITY_YEARS - 1);
            status.seasons_enrolled = years;
            status.eligibility_remaining = status.eligibility_remaining.saturating_sub(years);
        }
        status
    });
    Player {
        id,
        name: prospect.name,
        age: prospect.age,
        tier: context.tier,
        position,
        physical: prospect.physical,
        attributes: prospect.attributes,
        hidden_ceiling: prospect.hidden_ceiling,
        region: context.region,
        class_year: if matches!(context.intake, Intake::Freshman) {
            1
        } else {
            class_year_for(context.tier, prospect.age)
        },
        college,
        contract: None,
        status: PlayerStatus::Active,
        team: None,
    }
}

/// Generate one fully attributed player. Without a position the player is
/// placed where their projected potential is highest.
pub fn generate_player<R: Rng + ?Sized>(
    id: PlayerId,
    position: Option<Position>,
    context: &GenerationContext,
    config: &GenerationConfig,
    rng: &mut R,
) -> Player {
    let prospect = prospect(context, config, position, rng);
    let position = position.unwrap_or_else(|| best_position(&prospect));
    into_player(id, prospect, position, context)
}

fn best_position(prospect: &Prospect) -> Position {
    Position::ALL
        .iter()
        .copied()
        .max_by_key(|position| potential(&prospect.attributes, prospect.physical, *position))
        .unwrap_or(Position::WR)
}

/// Generate a class for a list of position slots. High-school bodies are
/// generated first and each slot, in order, takes the remaining prospect with
/// the highest potential there; other tiers generate per slot.
pub fn generate_class<R: Rng + ?Sized>(
    ids: &mut impl FnMut() -> PlayerId,
    slots: &[Position],
    context: &GenerationContext,
    config: &GenerationConfig,
    rng: &mut R,
) -> Vec<Player> {
    if !matches!(context.tier, Tier::HighSchool) {
        return slots
            .iter()
            .map(|&position| generate_player(ids(), Some(position), context, config, rng))
            .collect();
    }
    let mut pool: Vec<Option<Prospect>> = slots
        .iter()
        .map(|_| Some(prospect(context, config, None, rng)))
        .collect();
    let mut class = Vec::with_capacity(slots.len());
    for &slot in slots {
        let best = pool
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                entry
                    .as_ref()
                    .map(|p| (idx, potential(&p.attributes, p.physical, slot)))
            })
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(idx, _)| idx);
        if let Some(prospect) = best.and_then(|idx| pool[idx].take()) {
            class.push(into_player(ids(), prospect, slot, context));
        }
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn next_ids() -> impl FnMut() -> PlayerId {
        let mut next = 0;
        move || {
            next += 1;
            PlayerId(next)
        }
    }

    fn mean_potential(scouting: u8, seed: u64) -> f64 {
        let config = GenerationConfig::default();
        let context = GenerationContext::high_school(
            Region::Midwest,
            Intake::Freshman,
            Rating::from(scouting),
            Rating::from(50),
        );
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ids = next_ids();
        let slots = vec![Position::QB; 400];
        let class = generate_class(&mut ids, &slots, &context, &config, &mut rng);
        let total: f64 = class.iter().map(|p| p.potential().as_f64()).sum();
        total / 400.0
    }

    #[test]
    fn generated_values_stay_in_bounds() {
        let config = GenerationConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        for tier_context in [
            GenerationContext::high_school(
                Region::Texas,
                Intake::InitialRoster,
                Rating::MAX,
                Rating::MAX,
            ),
            GenerationContext::college(Region::Texas, Intake::WalkOn),
            GenerationContext::professional(Region::Texas),
        ] {
            for i in 0..50 {
                let player = generate_player(PlayerId(i), None, &tier_context, &config, &mut rng);
                for (_, current, ceiling) in player.attributes.iter() {
                    assert!(current <= ceiling);
                    assert!(ceiling.value() <= 99);
                }
                assert!(player.hidden_ceiling >= player.attributes.highest_ceiling());
            }
        }
    }

    #[test]
    fn class_fills_every_slot_in_order() {
        let config = GenerationConfig::default();
        let context = GenerationContext::high_school(
            Region::California,
            Intake::Freshman,
            Rating::from(50),
            Rating::from(50),
        );
        let slots = [Position::QB, Position::LT, Position::K, Position::CB];
        let mut rng = SmallRng::seed_from_u64(9);
        let mut ids = next_ids();
        let class = generate_class(&mut ids, &slots, &context, &config, &mut rng);
        let positions: Vec<_> = class.iter().map(|p| p.position).collect();
        assert_eq!(positions, slots.to_vec());
        assert!(class.iter().all(|p| p.age <= 15 && p.class_year == 1));
    }

    #[test]
    fn scouting_raises_mean_and_narrows_spread() {
        let config = GenerationConfig::default();
        let low = ceiling_profile(
            &GenerationContext::high_school(
                Region::Midwest,
                Intake::Freshman,
                Rating::from(10),
                Rating::from(50),
            ),
            &config,
        );
        let high = ceiling_profile(
            &GenerationContext::high_school(
                Region::Midwest,
                Intake::Freshman,
                Rating::from(90),
                Rating::from(50),
            ),
            &config,
        );
        assert!(high.mean > low.mean);
        assert!(high.spread < low.spread);
        assert!(high.floor > low.floor);
    }

    #[test]
    fn scouted_classes_project_higher() {
        let strong = mean_potential(90, 17);
        let weak = mean_potential(10, 17);
        assert!(
            strong > weak + 5.0,
            "scouting 90 mean {strong:.1} should clear scouting 10 mean {weak:.1}"
        );
    }

    fn mean_overall(scouting: u8, seed: u64) -> f64 {
        let config = GenerationConfig::default();
        let context = GenerationContext::high_school(
            Region::Southeast,
            Intake::Freshman,
            Rating::from(scouting),
            Rating::from(50),
        );
        let mut ids = next_ids();
        let class = generate_class(
            &mut ids,
            &Position::ALL,
            &context,
            &config,
            &mut SmallRng::seed_from_u64(seed),
        );
        let total: f64 = class.iter().map(|p| p.overall().as_f64()).sum();
        total / class.len() as f64
    }

    #[test]
    fn scouting_lifts_today_across_mixed_classes() {
        let trials = 40_u32;
        let (mut strong_ahead, mut gap) = (0_u32, 0.0);
        for seed in 0..u64::from(trials) {
            let strong = mean_overall(90, seed);
            let weak = mean_overall(10, seed);
            if strong > weak {
                strong_ahead += 1;
            }
            gap += strong - weak;
        }
        let gap = gap / f64::from(trials);
        assert!(strong_ahead >= 36, "scouting 90 led only {strong_ahead}/{trials} classes");
        assert!(gap > 4.0, "mean overall gap was {gap:.1}");
    }

    #[test]
    fn same_seed_same_class() {
        let config = GenerationConfig::default();
        let context = GenerationContext::professional(Region::Northeast);
        let slots = [Position::QB, Position::WR, Position::S];
        let mut first_ids = next_ids();
        let mut second_ids = next_ids();
        let a = generate_class(
            &mut first_ids,
            &slots,
            &context,
            &config,
            &mut SmallRng::seed_from_u64(21),
        );
        let b = generate_class(
            &mut second_ids,
            &slots,
            &context,
            &config,
            &mut SmallRng::seed_from_u64(21),
        );
        assert_eq!(a, b);
    }
}
