//! Box-score game resolution.
//!
//! A game is two symmetric possessions: each side's offense against the
//! other's defense. Unit ratings are condensed from the starters on an
//! immutable [`TeamSheet`]; team totals are drawn from the matchup and then
//! partitioned onto individual starters so every player line sums back to
//! the team figures.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::attributes::{Attribute, AttributeSet, Position, PositionGroup, Rating, overall};
use crate::config::ResolverConfig;
use crate::constants::{
    COMPLETION_BASE, DRIVE_YARDS_TD_SLOPE, DRIVES_MIN, EXTRA_POINT_BASE, FIELD_GOAL_BASE,
    FIELD_GOAL_SHARE, FUMBLE_PER_CARRY, FUMBLE_PER_SACK, FUMBLE_RETURN_TD_CHANCE,
    IN_GAME_MANAGEMENT_MAX_BONUS, INTERCEPTION_BASE, PASS_DRIVE_SATURATION, PICK_SIX_CHANCE,
    PLAYS_MAX, PLAYS_MIN, PLAYS_PER_DRIVE_MAX, PLAYS_PER_DRIVE_MIN, RUN_SHARE_BASE, RUN_SHARE_MAX,
    RUN_SHARE_MIN, RUSH_DRIVE_SATURATION, SACK_RATE_BASE, TD_RATE_BASE, TD_RATE_MAX, TD_RATE_MIN,
    YARDS_PER_ATTEMPT_BASE, YARDS_PER_ATTEMPT_MAX, YARDS_PER_ATTEMPT_MIN, YARDS_PER_CARRY_BASE,
    YARDS_PER_CARRY_MAX, YARDS_PER_CARRY_MIN,
};
use crate::numbers::{round_f64_to_u32, u32_to_f64, u32_to_u16};
use crate::player::{Player, PlayerId, PlayerStatus, Tier};
use crate::result::{GameResult, PlayerLine, TeamBox};
use crate::team::{Team, TeamId};

const PARTITION_NOISE: f64 = 0.04;
const UNRATED_UNIT: f64 = 30.0;

/// Starters fielded per position, in depth-chart fill order.
const FORMATION: [(Position, usize); 18] = [
    (Position::QB, 1),
    (Position::RB, 2),
    (Position::WR, 3),
    (Position::TE, 1),
    (Position::LT, 1),
    (Position::LG, 1),
    (Position::C, 1),
    (Position::RG, 1),
    (Position::RT, 1),
    (Position::DE, 2),
    (Position::DT, 1),
    (Position::NT, 1),
    (Position::OLB, 2),
    (Position::ILB, 1),
    (Position::CB, 2),
    (Position::S, 2),
    (Position::K, 1),
    (Position::P, 1),
];

const OFFENSIVE_LINE: [Position; 5] = [
    Position::LT,
    Position::LG,
    Position::C,
    Position::RG,
    Position::RT,
];
const DEFENSIVE_LINE: [Position; 3] = [Position::DE, Position::DT, Position::NT];
const LINEBACKERS: [Position; 2] = [Position::OLB, Position::ILB];
const SECONDARY: [Position; 2] = [Position::CB, Position::S];

/// A player lined up in one formation slot for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starter {
    pub player: PlayerId,
    /// Slot the player fills; differs from their listed position when the
    /// depth chart ran short.
    pub slot: Position,
    pub attributes: AttributeSet,
}

impl Starter {
    fn get(&self, attribute: Attribute) -> f64 {
        self.attributes.current(attribute).as_f64()
    }
}

/// Read-only snapshot of one side's lineup for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team: TeamId,
    pub tier: Tier,
    starters: Vec<Starter>,
    /// Rating points from the manager's in-game management.
    management_bonus: f64,
}

impl TeamSheet {
    /// Pick starters by overall at each formation slot. Redshirting and
    /// inactive players sit out; a short position borrows the best
    /// remaining player rated at that slot.
    #[must_use]
    pub fn from_roster(team: &Team, roster: &[&Player], management: Rating) -> Self {
        let available: Vec<&Player> = roster
            .iter()
            .copied()
            .filter(|player| {
                matches!(player.status, PlayerStatus::Active) && !player.is_redshirting()
            })
            .collect();
        let mut used: BTreeSet<PlayerId> = BTreeSet::new();
        let mut starters = Vec::new();
        for (slot, count) in FORMATION {
            let mut depth: Vec<&Player> = available
                .iter()
                .copied()
                .filter(|player| player.position == slot && !used.contains(&player.id))
                .collect();
            depth.sort_by(|a, b| b.overall().cmp(&a.overall()).then(a.id.cmp(&b.id)));
            if depth.len() < count {
                let mut fill: Vec<(&Player, Rating)> = available
                    .iter()
                    .copied()
                    .filter(|player| player.position != slot && !used.contains(&player.id))
                    .map(|player| (player, overall(&player.attributes, player.physical, slot)))
                    .collect();
                fill.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
                depth.extend(fill.into_iter().map(|(player, _)| player));
            }
            for player in depth.into_iter().take(count) {
                used.insert(player.id);
                starters.push(Starter {
                    player: player.id,
                    slot,
                    attributes: player.attributes.clone(),
                });
            }
        }
        Self {
            team: team.id,
            tier: team.tier,
            starters,
            management_bonus: IN_GAME_MANAGEMENT_MAX_BONUS * management.fraction(),
        }
    }

    #[must_use]
    pub fn starters(&self) -> &[Starter] {
        &self.starters
    }

    fn at(&self, slot: Position) -> SmallVec<[&Starter; 3]> {
        self.starters
            .iter()
            .filter(|starter| starter.slot == slot)
            .collect()
    }

    fn first(&self, slot: Position) -> Option<&Starter> {
        self.starters.iter().find(|starter| starter.slot == slot)
    }

    fn unit(&self, slots: &[Position]) -> SmallVec<[&Starter; 6]> {
        self.starters
            .iter()
            .filter(|starter| slots.contains(&starter.slot))
            .collect()
    }

    fn defenders(&self) -> SmallVec<[&Starter; 12]> {
        self.starters
            .iter()
            .filter(|starter| matches!(starter.slot.group(), PositionGroup::Defense))
            .collect()
    }
}

/// Condensed strength of one side, all on the rating scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRatings {
    pub run_block: f64,
    pub pass_protection: f64,
    pub quarterback_passing: f64,
    pub quarterback_mobility: f64,
    pub rushing: f64,
    pub receiving: f64,
    pub pass_rush: f64,
    pub run_stop: f64,
    pub linebackers: f64,
    pub secondary: f64,
    pub kicking: f64,
    pub punting: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        UNRATED_UNIT
    } else {
        sum / u32_to_f64(count)
    }
}

fn scale(value: f64) -> f64 {
    value.clamp(0.0, 99.0)
}

impl UnitRatings {
    /// Rate a sheet; `extra` adds to the management bonus (home field).
    #[must_use]
    pub fn rate(sheet: &TeamSheet, extra: f64) -> Self {
        use Attribute as A;
        let bonus = sheet.management_bonus + extra;
        let line = sheet.unit(&OFFENSIVE_LINE);
        let run_block = scale(mean(line.iter().map(|p| p.get(A::RunBlock))) + bonus);
        let pass_protection = scale(mean(line.iter().map(|p| p.get(A::PassProtection))) + bonus);

        let (quarterback_passing, quarterback_mobility) =
            sheet.first(Position::QB).map_or((UNRATED_UNIT, UNRATED_UNIT), |qb| {
                let accuracy = (qb.get(A::ShortAccuracy) + qb.get(A::MidAccuracy)) / 2.0;
                let passing = 0.18 * qb.get(A::ArmStrength)
                    + 0.14 * qb.get(A::Vision)
                    + 0.14 * accuracy
                    + 0.12 * qb.get(A::DeepAccuracy)
                    + 0.12 * qb.get(A::ThrowUnderPressure)
                    + 0.10 * qb.get(A::Speed)
                    + 0.10 * qb.get(A::Acceleration);
                let mobility = 0.30 * qb.get(A::Scrambling)
                    + 0.30 * qb.get(A::Speed)
                    + 0.20 * qb.get(A::Acceleration)
                    + 0.20 * qb.get(A::LateralQuickness);
                (scale(passing + bonus), scale(mobility))
            });

        let rushing = sheet.first(Position::RB).map_or(UNRATED_UNIT, |rb| {
            scale(
                0.20 * rb.get(A::Speed)
                    + 0.20 * rb.get(A::Acceleration)
                    + 0.14 * rb.get(A::LateralQuickness)
                    + 0.12 * rb.get(A::BroadJump)
                    + 0.12 * rb.get(A::Vision)
                    + 0.10 * rb.get(A::BallSecurity)
                    + 0.12 * rb.get(A::LowerBodyStrength)
                    + bonus,
            )
        });

        let receivers = sheet.unit(&[Position::WR, Position::TE]);
        let receiving = scale(
            mean(receivers.iter().map(|p| {
                0.30 * p.get(A::Catching)
                    + 0.25 * p.get(A::RouteRunning)
                    + 0.20 * p.get(A::Speed)
                    + 0.15 * p.get(A::LateralQuickness)
                    + 0.10 * p.get(A::Vision)
            })) + bonus,
        );

        let front = sheet.unit(&DEFENSIVE_LINE);
        let pass_rush = scale(
            mean(
                front
                    .iter()
                    .map(|p| 0.70 * p.get(A::PassRush) + 0.30 * p.get(A::BlockShedding)),
            ) + bonus,
        );
        let run_stop = scale(
            mean(front.iter().map(|p| {
                0.30 * p.get(A::LowerBodyStrength)
                    + 0.25 * p.get(A::UpperBodyStrength)
                    + 0.20 * p.get(A::BlockShedding)
                    + 0.15 * p.get(A::Tackling)
                    + 0.10 * p.get(A::Pursuit)
            })) + bonus,
        );

        let backers = sheet.unit(&LINEBACKERS);
        let linebackers = scale(
            mean(backers.iter().map(|p| {
                0.25 * p.get(A::Tackling)
                    + 0.22 * p.get(A::Pursuit)
                    + 0.18 * p.get(A::Speed)
                    + 0.18 * p.get(A::LateralQuickness)
                    + 0.17 * p.get(A::BlockShedding)
                    + 0.10 * p.get(A::Vision)
            })) + bonus,
        );

        let backs = sheet.unit(&SECONDARY);
        let secondary = scale(
            mean(backs.iter().map(|p| {
                0.30 * p.get(A::Coverage)
                    + 0.22 * p.get(A::Tackling)
                    + 0.22 * p.get(A::Speed)
                    + 0.16 * p.get(A::LateralQuickness)
                    + 0.10 * p.get(A::Vision)
            })) + bonus,
        );

        let kicking = sheet.first(Position::K).map_or(UNRATED_UNIT, |k| {
            scale(0.55 * k.get(A::KickPower) + 0.45 * k.get(A::KickAccuracy))
        });
        let punting = sheet.first(Position::P).map_or(UNRATED_UNIT, |p| {
            scale(0.60 * p.get(A::KickPower) + 0.40 * p.get(A::KickAccuracy))
        });

        Self {
            run_block,
            pass_protection,
            quarterback_passing,
            quarterback_mobility,
            rushing,
            receiving,
            pass_rush,
            run_stop,
            linebackers,
            secondary,
            kicking,
            punting,
        }
    }

    /// Rushing offense: one third back, two thirds line.
    #[must_use]
    pub fn rush_offense(&self) -> f64 {
        self.rushing / 3.0 + self.run_block * 2.0 / 3.0
    }

    #[must_use]
    pub fn rush_defense(&self) -> f64 {
        0.50 * self.run_stop + 0.30 * self.linebackers + 0.20 * self.secondary
    }

    #[must_use]
    pub fn pass_offense(&self) -> f64 {
        0.35 * self.quarterback_passing + 0.30 * self.receiving + 0.35 * self.pass_protection
    }

    #[must_use]
    pub fn pass_defense(&self) -> f64 {
        0.35 * self.pass_rush + 0.25 * self.linebackers + 0.40 * self.secondary
    }

    /// Single-number strength used to weight the tiebreak.
    #[must_use]
    pub fn strength(&self) -> f64 {
        (self.rush_offense() + self.pass_offense() + self.rush_defense() + self.pass_defense())
            / 4.0
    }
}

fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, deviation: f64) -> f64 {
    Normal::new(mean, deviation).map_or(mean, |normal| normal.sample(rng))
}

/// Split `total` into non-negative integer shares roughly proportional to
/// `weights`, with small noise. Shares always sum to `total`; slots with a
/// non-positive weight receive nothing unless every weight is non-positive.
pub(crate) fn partition<R: Rng + ?Sized>(
    total: u32,
    weights: &[f64],
    rng: &mut R,
) -> SmallVec<[u32; 12]> {
    let mut shares: SmallVec<[u32; 12]> = smallvec![0; weights.len()];
    if weights.is_empty() || total == 0 {
        return shares;
    }
    let positive: f64 = weights.iter().filter(|weight| **weight > 0.0).sum();
    let uniform = positive <= 0.0 || !positive.is_finite();
    let noisy: SmallVec<[f64; 12]> = weights
        .iter()
        .map(|&weight| {
            if uniform {
                1.0
            } else if weight > 0.0 {
                (weight / positive + gauss(rng, 0.0, PARTITION_NOISE)).max(0.001)
            } else {
                0.0
            }
        })
        .collect();
    let noisy_sum: f64 = noisy.iter().sum();
    for (share, weight) in shares.iter_mut().zip(&noisy) {
        *share = round_f64_to_u32((f64::from(total) * weight / noisy_sum).floor());
    }
    let mut order: SmallVec<[usize; 12]> = (0..noisy.len()).filter(|&i| noisy[i] > 0.0).collect();
    order.sort_by(|&a, &b| noisy[b].total_cmp(&noisy[a]).then(a.cmp(&b)));
    let mut assigned: u32 = shares.iter().sum();
    let mut cursor = 0;
    while assigned < total && !order.is_empty() {
        shares[order[cursor % order.len()]] += 1;
        assigned += 1;
        cursor += 1;
    }
    while assigned > total {
        let Some(largest) = (0..shares.len()).max_by_key(|&i| shares[i]) else {
            break;
        };
        shares[largest] -= 1;
        assigned -= 1;
    }
    shares
}

fn count_of<R: Rng + ?Sized>(trials: u32, chance: f64, rng: &mut R) -> u32 {
    let chance = chance.clamp(0.0, 1.0);
    (0..trials).filter(|_| rng.gen_bool(chance)).count().try_into().unwrap_or(u32::MAX)
}

const fn tackle_weight(slot: Position) -> f64 {
    match slot {
        Position::ILB => 9.0,
        Position::OLB => 7.0,
        Position::S => 5.5,
        Position::CB | Position::DE => 4.0,
        Position::DT => 3.5,
        Position::NT => 3.0,
        _ => 1.0,
    }
}

const fn sack_weight(slot: Position) -> f64 {
    match slot {
        Position::DE => 5.0,
        Position::OLB => 3.5,
        Position::DT => 2.5,
        Position::NT => 1.5,
        Position::ILB => 0.5,
        Position::S => 0.3,
        Position::CB => 0.2,
        _ => 0.1,
    }
}

const fn interception_weight(slot: Position) -> f64 {
    match slot {
        Position::CB => 5.0,
        Position::S => 4.0,
        Position::OLB | Position::ILB => 1.0,
        Position::DE => 0.1,
        _ => 0.001,
    }
}

const fn forced_fumble_weight(slot: Position) -> f64 {
    match slot {
        Position::DE => 4.0,
        Position::OLB => 3.0,
        Position::DT => 2.0,
        Position::NT | Position::ILB => 1.5,
        Position::S => 1.0,
        Position::CB => 0.5,
        _ => 0.5,
    }
}

/// Lines keyed by player for one side of one possession.
struct Ledger {
    team: TeamId,
    lines: BTreeMap<PlayerId, PlayerLine>,
}

impl Ledger {
    const fn new(team: TeamId) -> Self {
        Self {
            team,
            lines: BTreeMap::new(),
        }
    }

    fn line(&mut self, starter: &Starter) -> &mut PlayerLine {
        let team = self.team;
        self.lines
            .entry(starter.player)
            .or_insert_with(|| PlayerLine::empty(starter.player, team, starter.slot))
    }
}

/// Team-level draws for one offense against one defense.
#[derive(Debug, Clone, Copy)]
struct DriveTotals {
    plays: u32,
    rush_attempts: u32,
    rush_yards: u32,
    pass_attempts: u32,
    completions: u32,
    pass_yards: u32,
    sacks: u32,
    interceptions: u32,
    fumbles: u32,
    drives: u32,
    rush_touchdowns: u32,
    pass_touchdowns: u32,
    fg_attempts: u32,
    fg_made: u32,
    xp_made: u32,
    pick_sixes: u32,
    fumble_returns: u32,
}

impl DriveTotals {
    const fn touchdowns(&self) -> u32 {
        self.rush_touchdowns + self.pass_touchdowns
    }

    const fn offense_points(&self) -> u32 {
        self.touchdowns() * 6 + self.xp_made + self.fg_made * 3
    }

    const fn defense_points(&self) -> u32 {
        (self.pick_sixes + self.fumble_returns) * 7
    }
}

fn draw_totals<R: Rng + ?Sized>(off: &UnitRatings, def: &UnitRatings, rng: &mut R) -> DriveTotals {
    let rush_matchup = off.rush_offense() - def.rush_defense();
    let pass_matchup = off.pass_offense() - def.pass_defense();

    let plays = rng.gen_range(PLAYS_MIN..=PLAYS_MAX);
    let run_share = (RUN_SHARE_BASE
        + (rush_matchup - pass_matchup) / 400.0
        + gauss(rng, 0.0, 0.05))
    .clamp(RUN_SHARE_MIN, RUN_SHARE_MAX);
    let rush_attempts = round_f64_to_u32(u32_to_f64(plays) * run_share).max(12);
    let pass_plays = plays.saturating_sub(rush_attempts);

    let sack_rate = (SACK_RATE_BASE
        + (def.pass_rush - off.pass_protection) / 500.0
        + gauss(rng, 0.0, 0.015))
    .clamp(0.02, 0.15);
    let sacks =
        round_f64_to_u32(u32_to_f64(pass_plays) * sack_rate).min(pass_plays.saturating_sub(5));
    let pass_attempts = pass_plays.saturating_sub(sacks).max(5);

    let carry = ((YARDS_PER_CARRY_BASE + rush_matchup / 20.0) * gauss(rng, 1.0, 0.12))
        .clamp(YARDS_PER_CARRY_MIN, YARDS_PER_CARRY_MAX);
    let rush_yards = round_f64_to_u32(u32_to_f64(rush_attempts) * carry);

    let completion_rate =
        (COMPLETION_BASE + pass_matchup / 200.0 + gauss(rng, 0.0, 0.05)).clamp(0.40, 0.80);
    let completions =
        round_f64_to_u32(u32_to_f64(pass_attempts) * completion_rate).min(pass_attempts);
    let per_attempt = ((YARDS_PER_ATTEMPT_BASE + pass_matchup / 20.0) * gauss(rng, 1.0, 0.12))
        .clamp(YARDS_PER_ATTEMPT_MIN, YARDS_PER_ATTEMPT_MAX);
    let pass_yards = if completions == 0 {
        0
    } else {
        round_f64_to_u32(u32_to_f64(pass_attempts) * per_attempt)
    };

    let interception_rate =
        (INTERCEPTION_BASE - pass_matchup / 500.0 + gauss(rng, 0.0, 0.008)).clamp(0.0, 0.08);
    let interceptions = round_f64_to_u32(u32_to_f64(pass_attempts) * interception_rate)
        .min(5)
        .min(pass_attempts - completions);
    let fumbles = round_f64_to_u32(
        u32_to_f64(rush_attempts) * FUMBLE_PER_CARRY
            + u32_to_f64(sacks) * FUMBLE_PER_SACK
            + gauss(rng, 0.0, 0.4),
    )
    .min(4);

    let drives = round_f64_to_u32(
        u32_to_f64(plays) / rng.gen_range(PLAYS_PER_DRIVE_MIN..PLAYS_PER_DRIVE_MAX),
    )
    .max(DRIVES_MIN);
    let rush_per_drive = u32_to_f64(rush_yards) / u32_to_f64(drives);
    let pass_per_drive = u32_to_f64(pass_yards) / u32_to_f64(drives);
    let drive_value = RUSH_DRIVE_SATURATION * (rush_per_drive / RUSH_DRIVE_SATURATION).tanh()
        + PASS_DRIVE_SATURATION * (pass_per_drive / PASS_DRIVE_SATURATION).tanh();
    let td_rate = (TD_RATE_BASE + DRIVE_YARDS_TD_SLOPE * drive_value + gauss(rng, 0.0, 0.03))
        .clamp(TD_RATE_MIN, TD_RATE_MAX);

    let mut touchdowns = 0;
    let mut fg_attempts = 0;
    for _ in 0..drives {
        let roll: f64 = rng.r#gen();
        if roll < td_rate {
            touchdowns += 1;
        } else if roll < td_rate + FIELD_GOAL_SHARE {
            fg_attempts += 1;
        }
    }

    let total_yards = rush_yards + pass_yards;
    let rush_share = if total_yards == 0 {
        0.5
    } else {
        u32_to_f64(rush_yards) / u32_to_f64(total_yards)
    };
    let mut rush_touchdowns = count_of(touchdowns, (rush_share * 1.1).clamp(0.1, 0.9), rng);
    let mut pass_touchdowns = touchdowns - rush_touchdowns;
    if pass_touchdowns > completions {
        rush_touchdowns += pass_touchdowns - completions;
        pass_touchdowns = completions;
    }

    let fg_made = count_of(
        fg_attempts,
        (FIELD_GOAL_BASE + off.kicking / 400.0).clamp(0.60, 0.95),
        rng,
    );
    let xp_made = count_of(
        touchdowns,
        (EXTRA_POINT_BASE + off.kicking / 1500.0).clamp(0.90, 0.995),
        rng,
    );
    let pick_sixes = count_of(interceptions, PICK_SIX_CHANCE, rng);
    let fumble_returns = count_of(fumbles, FUMBLE_RETURN_TD_CHANCE, rng);

    DriveTotals {
        plays,
        rush_attempts,
        rush_yards,
        pass_attempts,
        completions,
        pass_yards,
        sacks,
        interceptions,
        fumbles,
        drives,
        rush_touchdowns,
        pass_touchdowns,
        fg_attempts,
        fg_made,
        xp_made,
        pick_sixes,
        fumble_returns,
    }
}

fn distribute_rushing<R: Rng + ?Sized>(
    sheet: &TeamSheet,
    ratings: &UnitRatings,
    totals: &DriveTotals,
    ledger: &mut Ledger,
    rng: &mut R,
) {
    use Attribute as A;
    let mut carriers: SmallVec<[&Starter; 3]> = SmallVec::new();
    let mut weights: SmallVec<[f64; 3]> = SmallVec::new();
    for (depth, back) in sheet.at(Position::RB).into_iter().enumerate() {
        let burst = 0.35 * back.get(A::Speed)
            + 0.35 * back.get(A::Acceleration)
            + 0.30 * back.get(A::LateralQuickness);
        carriers.push(back);
        weights.push(burst * if depth == 0 { 2.0 } else { 1.0 });
    }
    if let Some(qb) = sheet.first(Position::QB) {
        let scramble = (0.05 + ratings.quarterback_mobility / 400.0).clamp(0.02, 0.20);
        let backs_weight: f64 = weights.iter().sum();
        let weight = if backs_weight > 0.0 {
            backs_weight * scramble / (1.0 - scramble)
        } else {
            1.0
        };
        carriers.push(qb);
        weights.push(weight);
    }
    if carriers.is_empty() {
        return;
    }
    let attempts = partition(totals.rush_attempts, &weights, rng);
    let yard_weights: SmallVec<[f64; 3]> = attempts.iter().map(|&n| f64::from(n)).collect();
    let yards = partition(totals.rush_yards, &yard_weights, rng);
    let score_weights: SmallVec<[f64; 3]> = attempts
        .iter()
        .zip(&yards)
        .map(|(&n, &y)| f64::from(n + y))
        .collect();
    let touchdowns = partition(totals.rush_touchdowns, &score_weights, rng);
    let risk: SmallVec<[f64; 3]> = carriers
        .iter()
        .zip(&attempts)
        .map(|(carrier, &n)| f64::from(n) * (100.0 - carrier.get(A::BallSecurity)).max(1.0))
        .collect();
    let fumbles = partition(totals.fumbles, &risk, rng);
    for (i, carrier) in carriers.iter().enumerate() {
        let line = ledger.line(carrier);
        line.rush_attempts += u32_to_u16(attempts[i]);
        line.rush_yards += yards[i];
        line.rush_touchdowns += u32_to_u16(touchdowns[i]);
        line.fumbles_lost += u32_to_u16(fumbles[i]);
    }
}

fn distribute_passing<R: Rng + ?Sized>(
    sheet: &TeamSheet,
    totals: &DriveTotals,
    ledger: &mut Ledger,
    rng: &mut R,
) {
    use Attribute as A;
    let Some(qb) = sheet.first(Position::QB) else {
        return;
    };
    let passer = ledger.line(qb);
    passer.pass_attempts += u32_to_u16(totals.pass_attempts);
    passer.completions += u32_to_u16(totals.completions);
    passer.pass_yards += totals.pass_yards;
    passer.pass_touchdowns += u32_to_u16(totals.pass_touchdowns);
    passer.interceptions_thrown += u32_to_u16(totals.interceptions);
    passer.sacks_taken += u32_to_u16(totals.sacks);

    let mut receivers: SmallVec<[&Starter; 6]> = SmallVec::new();
    let mut weights: SmallVec<[f64; 6]> = SmallVec::new();
    let hands = |p: &Starter| {
        0.40 * p.get(A::Catching) + 0.35 * p.get(A::RouteRunning) + 0.25 * p.get(A::Speed)
    };
    for (depth, wide) in sheet.at(Position::WR).into_iter().enumerate() {
        receivers.push(wide);
        weights.push(hands(wide) * if depth == 0 { 1.5 } else { 1.0 });
    }
    for tight in sheet.at(Position::TE) {
        receivers.push(tight);
        weights.push(hands(tight) * 0.85);
    }
    for back in sheet.at(Position::RB) {
        receivers.push(back);
        weights.push(
            (0.45 * back.get(A::Catching)
                + 0.35 * back.get(A::RouteRunning)
                + 0.20 * back.get(A::Speed))
                * 0.30,
        );
    }
    if receivers.is_empty() {
        return;
    }
    let targets = partition(totals.pass_attempts, &weights, rng);
    let target_weights: SmallVec<[f64; 6]> = targets.iter().map(|&n| f64::from(n)).collect();
    let mut receptions = partition(totals.completions, &target_weights, rng);
    let mut deficit = 0;
    for (caught, &thrown) in receptions.iter_mut().zip(&targets) {
        if *caught > thrown {
            deficit += *caught - thrown;
            *caught = thrown;
        }
    }
    for (caught, &thrown) in receptions.iter_mut().zip(&targets) {
        let room = thrown - *caught;
        let moved = room.min(deficit);
        *caught += moved;
        deficit -= moved;
    }
    let yard_weights: SmallVec<[f64; 6]> = receptions.iter().map(|&n| f64::from(n)).collect();
    let yards = partition(totals.pass_yards, &yard_weights, rng);
    let score_weights: SmallVec<[f64; 6]> = receptions
        .iter()
        .zip(&yards)
        .map(|(&n, &y)| if n == 0 { 0.0 } else { f64::from(y + n) })
        .collect();
    let touchdowns = partition(totals.pass_touchdowns, &score_weights, rng);
    for (i, receiver) in receivers.iter().enumerate() {
        let line = ledger.line(receiver);
        line.targets += u32_to_u16(targets[i]);
        line.receptions += u32_to_u16(receptions[i]);
        line.receiving_yards += yards[i];
        line.receiving_touchdowns += u32_to_u16(touchdowns[i]);
    }
}

fn distribute_kicking<R: Rng + ?Sized>(
    sheet: &TeamSheet,
    ratings: &UnitRatings,
    totals: &DriveTotals,
    ledger: &mut Ledger,
    rng: &mut R,
) {
    if let Some(kicker) = sheet.first(Position::K) {
        let line = ledger.line(kicker);
        line.fg_attempts += u32_to_u16(totals.fg_attempts);
        line.fg_made += u32_to_u16(totals.fg_made);
        line.xp_attempts += u32_to_u16(totals.touchdowns());
        line.xp_made += u32_to_u16(totals.xp_made);
    }
    if let Some(punter) = sheet.first(Position::P) {
        let idle = totals.drives.saturating_sub(
            totals.touchdowns() + totals.fg_made + totals.interceptions + totals.fumbles,
        );
        let punts = (idle + rng.gen_range(0..=2)).saturating_sub(1).max(2);
        let average = (35.0 + ratings.punting / 5.0).clamp(30.0, 55.0);
        let line = ledger.line(punter);
        line.punts += u32_to_u16(punts);
        line.punt_yards += round_f64_to_u32(u32_to_f64(punts) * average * gauss(rng, 1.0, 0.08));
    }
}

fn distribute_defense<R: Rng + ?Sized>(
    sheet: &TeamSheet,
    totals: &DriveTotals,
    ledger: &mut Ledger,
    rng: &mut R,
) {
    use Attribute as A;
    let defenders = sheet.defenders();
    if defenders.is_empty() {
        return;
    }
    let tackle_weights: SmallVec<[f64; 12]> = defenders
        .iter()
        .map(|p| {
            tackle_weight(p.slot)
                * (0.5 * p.get(A::Tackling) + 0.3 * p.get(A::Pursuit) + 0.2 * p.get(A::Speed))
                / 50.0
        })
        .collect();
    let sack_weights: SmallVec<[f64; 12]> = defenders
        .iter()
        .map(|p| {
            sack_weight(p.slot) * (0.7 * p.get(A::PassRush) + 0.3 * p.get(A::BlockShedding))
                / 50.0
        })
        .collect();
    let pick_weights: SmallVec<[f64; 12]> = defenders
        .iter()
        .map(|p| {
            (interception_weight(p.slot)
                * (0.5 * p.get(A::Coverage)
                    + 0.3 * p.get(A::Speed)
                    + 0.2 * p.get(A::LateralQuickness))
                / 50.0)
                .max(0.001)
        })
        .collect();
    let strip_weights: SmallVec<[f64; 12]> = defenders
        .iter()
        .map(|p| {
            forced_fumble_weight(p.slot) * (0.5 * p.get(A::Tackling) + 0.5 * p.get(A::Pursuit))
                / 50.0
        })
        .collect();
    let score_weights: SmallVec<[f64; 12]> = pick_weights
        .iter()
        .zip(&strip_weights)
        .map(|(pick, strip)| pick * 2.0 + strip)
        .collect();

    let tackle_total = (totals.plays + rng.gen_range(0..=10)).saturating_sub(5);
    let tackles = partition(tackle_total, &tackle_weights, rng);
    let sacks = partition(totals.sacks, &sack_weights, rng);
    let picks = partition(totals.interceptions, &pick_weights, rng);
    let strips = partition(totals.fumbles, &strip_weights, rng);
    let scores = partition(totals.pick_sixes + totals.fumble_returns, &score_weights, rng);
    for (i, defender) in defenders.iter().enumerate() {
        let line = ledger.line(defender);
        line.tackles += u32_to_u16(tackles[i]);
        line.sacks += u32_to_u16(sacks[i]);
        line.interceptions += u32_to_u16(picks[i]);
        line.forced_fumbles += u32_to_u16(strips[i]);
        line.defensive_touchdowns += u32_to_u16(scores[i]);
    }
}

/// One offense against one defense.
struct Possession {
    offense: Ledger,
    defense: Ledger,
    totals: DriveTotals,
}

fn possession<R: Rng + ?Sized>(
    offense: &TeamSheet,
    offense_ratings: &UnitRatings,
    defense: &TeamSheet,
    defense_ratings: &UnitRatings,
    rng: &mut R,
) -> Possession {
    let totals = draw_totals(offense_ratings, defense_ratings, rng);
    let mut attack = Ledger::new(offense.team);
    let mut guard = Ledger::new(defense.team);
    distribute_passing(offense, &totals, &mut attack, rng);
    distribute_rushing(offense, offense_ratings, &totals, &mut attack, rng);
    distribute_kicking(offense, offense_ratings, &totals, &mut attack, rng);
    distribute_defense(defense, &totals, &mut guard, rng);
    Possession {
        offense: attack,
        defense: guard,
        totals,
    }
}

const fn ties_allowed(tier: Tier, rules: &ResolverConfig) -> bool {
    match tier {
        Tier::Pro => false,
        Tier::College => rules.college_ties,
        Tier::HighSchool => rules.high_school_ties,
    }
}

/// Resolve one game between two sheets.
///
/// The routine is side-symmetric except for `rules.home_field_bonus`. When
/// the tier does not allow ties a level score is broken by a single field
/// goal for a side drawn in proportion to team strength.
pub fn resolve_game<R: Rng + ?Sized>(
    home: &TeamSheet,
    away: &TeamSheet,
    rules: &ResolverConfig,
    rng: &mut R,
) -> GameResult {
    let home_ratings = UnitRatings::rate(home, rules.home_field_bonus);
    let away_ratings = UnitRatings::rate(away, 0.0);

    let home_drive = possession(home, &home_ratings, away, &away_ratings, rng);
    let away_drive = possession(away, &away_ratings, home, &home_ratings, rng);

    let mut home_score = home_drive.totals.offense_points() + away_drive.totals.defense_points();
    let mut away_score = away_drive.totals.offense_points() + home_drive.totals.defense_points();

    let mut lines: BTreeMap<PlayerId, PlayerLine> = BTreeMap::new();
    for ledger in [
        home_drive.offense,
        home_drive.defense,
        away_drive.offense,
        away_drive.defense,
    ] {
        for (id, line) in ledger.lines {
            lines
                .entry(id)
                .and_modify(|existing| existing.absorb(&line))
                .or_insert(line);
        }
    }

    let mut tiebreak = false;
    if home_score == away_score && !ties_allowed(home.tier, rules) {
        tiebreak = true;
        let home_strength = home_ratings.strength().max(1.0);
        let away_strength = away_ratings.strength().max(1.0);
        let home_takes = rng.gen_bool(home_strength / (home_strength + away_strength));
        let (sheet, score) = if home_takes {
            (home, &mut home_score)
        } else {
            (away, &mut away_score)
        };
        *score += 3;
        if let Some(kicker) = sheet.first(Position::K).or_else(|| sheet.starters.first()) {
            let line = lines
                .entry(kicker.player)
                .or_insert_with(|| PlayerLine::empty(kicker.player, sheet.team, kicker.slot));
            line.fg_attempts += 1;
            line.fg_made += 1;
        }
    }

    let lines: Vec<PlayerLine> = lines.into_values().collect();
    GameResult {
        home: TeamBox::tally(
            home.team,
            u32_to_u16(home_score),
            u32_to_u16(home_drive.totals.plays),
            &lines,
        ),
        away: TeamBox::tally(
            away.team,
            u32_to_u16(away_score),
            u32_to_u16(away_drive.totals.plays),
            &lines,
        ),
        lines,
        tiebreak,
    }
}
