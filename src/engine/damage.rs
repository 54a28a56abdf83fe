//! The potency/power/durability damage formula, shared by immediate hits and
//! scheduled field hits. Net damage never goes negative.

use crate::engine::ledger::Context;
use crate::engine::rng::Rng;
use crate::engine::state::{CardSnapshot, Stats};

/// Outcome of a single card's hit against a defender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Damage(f64),
    Dodged,
    Guarded,
}

/// The attacker power matched to the card's type. A card typed both Physical
/// and Supernatural uses the larger of the two.
fn type_matched_power(card: &CardSnapshot, stats: &Stats) -> f64 {
    match (card.is_physical(), card.is_supernatural()) {
        (true, true) => stats.physical_power.max(stats.supernatural_power),
        (true, false) => stats.physical_power,
        (false, true) => stats.supernatural_power,
        (false, false) => 0.0,
    }
}

/// Net damage for one card hit:
/// `max((potency + power) * attackPower - (durability + bonus) * opposingPower / 2, 0)`.
/// A bypass (explicit or attack-linked durability negation) zeroes the
/// defender's durability term entirely.
pub fn card_damage(
    card: &CardSnapshot,
    attacker: &Stats,
    defender: &Stats,
    card_defense_bonus: f64,
    bypass_defense: bool,
) -> f64 {
    let raw = (card.potency + type_matched_power(card, attacker)) * attacker.attack_power;
    let defender_durability = if bypass_defense {
        0.0
    } else {
        defender.durability + card_defense_bonus
    };
    let effective_defense = (defender_durability * type_matched_power(card, defender)) / 2.0;
    (raw - effective_defense).max(0.0)
}

/// Dodge probability: speed gap over 100, shifted by the defender's chance-up
/// minus the attacker's chance-down, clamped to [0, 1].
pub fn dodge_probability(
    attacker: &Stats,
    defender: &Stats,
    attacker_context: &Context,
    defender_context: &Context,
) -> f64 {
    let base = ((defender.speed - attacker.speed) / 100.0).clamp(0.0, 1.0);
    let shift = (defender_context.chance_up - attacker_context.chance_down) / 100.0;
    (base + shift).clamp(0.0, 1.0)
}

/// Resolve one card hit: guard check, dodge roll, then the damage formula.
/// Contribution is zero (no roll consumed) when an unbypassed Guard is up.
#[allow(clippy::too_many_arguments)]
pub fn resolve_hit(
    card: &CardSnapshot,
    attacker: &Stats,
    defender: &Stats,
    attacker_context: &Context,
    defender_context: &Context,
    card_defense_bonus: f64,
    bypass_defense: bool,
    rng: &mut Rng,
) -> HitOutcome {
    if defender_context.guard && !bypass_defense {
        return HitOutcome::Guarded;
    }
    let dodge = dodge_probability(attacker, defender, attacker_context, defender_context);
    if dodge > 0.0 && rng.uniform() < dodge {
        return HitOutcome::Dodged;
    }
    HitOutcome::Damage(card_damage(
        card,
        attacker,
        defender,
        card_defense_bonus,
        bypass_defense,
    ))
}

/// Activation chance with luck deltas and the intelligence bonus: each 10
/// points of intelligence adds roughly 1% of the base chance,
/// multiplicatively rather than flat.
pub fn activation_chance(
    authored_chance: f64,
    self_context: &Context,
    opponent_context: &Context,
    intelligence: f64,
) -> f64 {
    let base =
        (authored_chance + self_context.chance_up - opponent_context.chance_down).clamp(0.0, 100.0);
    let bonus = base * (intelligence / 1000.0).clamp(0.0, 1.0);
    (base + bonus).clamp(0.0, 100.0)
}
