//! Persistent effect ledger: per-side maps of standing effects with a
//! remaining-turns counter. The ledger survives across requests only via the
//! caller's persisted snapshot; in memory it is scoped to a single call.
//!
//! Invariant: at most one entry per `(type, target)` key per side.
//! Reactivation REPLACES power/precedence/remaining, never stacks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::ability::{Ability, AbilityKind};
use crate::engine::events::Side;
use crate::engine::state::Stats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentEffect {
    #[serde(flatten)]
    pub kind: AbilityKind,
    pub power: f64,
    pub precedence: i32,
    pub remaining: u32,
}

pub type EffectMap = BTreeMap<String, PersistentEffect>;

/// Both sides' standing effects. `player`/`enemy` mirror the wire shape the
/// surrounding persistence layer stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectBucket {
    pub player: EffectMap,
    pub enemy: EffectMap,
}

impl EffectBucket {
    pub fn side(&self, side: Side) -> &EffectMap {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut EffectMap {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}

/// Per-turn, per-side ephemeral record. Created fresh each resolution pass,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub chance_up: f64,
    pub chance_down: f64,
    /// Precedence of the active Ability Shield, if any.
    pub ability_shield: Option<i32>,
    pub guard: bool,
    pub frozen_turns: u32,
    /// Curse suppression level, 0..=3.
    pub curse_suppress: u32,
    pub revive: Option<f64>,
    /// Per played-card flags set during the pre-damage pass, keyed by the
    /// card's index within the played set.
    pub per_card: BTreeMap<usize, CardFlags>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CardFlags {
    /// This card's hit ignores defender durability (and Guard).
    pub bypass_defense: bool,
}

impl Context {
    pub fn bypass_for(&self, card_index: usize) -> bool {
        self.per_card
            .get(&card_index)
            .is_some_and(|f| f.bypass_defense)
    }

    pub fn set_bypass(&mut self, card_index: usize) {
        self.per_card.entry(card_index).or_default().bypass_defense = true;
    }
}

/// Build an effect entry from a resolved ability. `remaining` starts at the
/// ability's authored duration.
pub fn effect_from_ability(ability: &Ability) -> PersistentEffect {
    PersistentEffect {
        kind: ability.kind.clone(),
        power: ability.power,
        precedence: ability.precedence,
        remaining: ability.duration.max(1),
    }
}

/// Insert or replace an entry under its `(type, target)` key.
pub fn upsert(bucket: &mut EffectMap, effect: PersistentEffect) {
    bucket.insert(effect.kind.effect_key(), effect);
}

/// Fold every unexpired entry into a working copy of the side's stats and a
/// fresh [Context]. Base stats are left untouched.
pub fn apply(bucket: &EffectMap, base: &Stats) -> (Stats, Context) {
    let mut stats = base.clone();
    let mut context = Context::default();
    for effect in bucket.values() {
        if effect.remaining == 0 {
            continue;
        }
        match &effect.kind {
            AbilityKind::StatsUp { stat } => {
                *stats.stat_mut(*stat) += effect.power;
            }
            AbilityKind::StatsDown { stat } => {
                let slot = stats.stat_mut(*stat);
                *slot = (*slot - effect.power).max(0.0);
            }
            AbilityKind::Lucky => context.chance_up += effect.power,
            AbilityKind::Unluck => context.chance_down += effect.power,
            AbilityKind::Freeze => {
                stats.speed = 0.0;
                context.frozen_turns = effect.remaining;
            }
            AbilityKind::Curse => {
                context.curse_suppress = effect.power.max(0.0).min(3.0) as u32;
            }
            AbilityKind::Guard => context.guard = true,
            AbilityKind::AbilityShield => {
                context.ability_shield = Some(
                    context
                        .ability_shield
                        .map_or(effect.precedence, |p| p.max(effect.precedence)),
                );
            }
            AbilityKind::Revive => context.revive = Some(effect.power),
            // Non-persistent kinds never reach the ledger; ignore defensively.
            AbilityKind::AbilityNegation
            | AbilityKind::InstantDeath
            | AbilityKind::DurabilityNegation { .. }
            | AbilityKind::None => {}
        }
    }
    (stats, context)
}

/// End-of-round duration tick: decrement every entry, drop the expired.
/// A tick on an empty bucket is a no-op.
pub fn tick(bucket: &mut EffectMap) {
    bucket.retain(|_, effect| {
        effect.remaining = effect.remaining.saturating_sub(1);
        effect.remaining > 0
    });
}
