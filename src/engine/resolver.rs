//! Pre-damage resolution: activation rolls, shield blocks, dependency
//! chains, attack-linked deferral, ability negation and ledger adoption.
//! Runs once per main action, acting side's queue first, then the
//! defender's.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::engine::ability::{Ability, AbilityKind};
use crate::engine::damage::activation_chance;
use crate::engine::events::{Side, TurnEvent};
use crate::engine::ledger::{effect_from_ability, upsert, Context, EffectBucket};
use crate::engine::queue::build_effect_queue;
use crate::engine::rng::Rng;
use crate::engine::state::{CardSnapshot, Stats};

/// Maximum ledger entries a single Ability Negation can remove.
pub const MAX_NEGATION_REMOVALS: usize = 3;

/// An ability that rolled successfully and awaits negation/adoption.
#[derive(Debug, Clone)]
struct PendingAbility {
    card_index: usize,
    card_name: String,
    ability: Ability,
}

/// Per-side output of the pre-damage pass, consumed by the damage step.
#[derive(Debug, Clone, Default)]
pub struct SidePass {
    /// Abilities deferred to the on-hit step, keyed by owning card instance.
    pub attack_linked: BTreeMap<usize, Vec<Ability>>,
    /// Unlinked Instant Death abilities captured for the instant-death step.
    pub instant_death: Vec<(usize, String, Ability)>,
}

/// Pair of per-side values addressable by [Side].
#[derive(Debug, Clone, Default)]
struct PerSide<T> {
    player: T,
    enemy: T,
}

impl<T> PerSide<T> {
    fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}

/// Ephemeral contexts for both sides of one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct SideContexts {
    pub player: Context,
    pub enemy: Context,
}

impl SideContexts {
    pub fn get(&self, side: Side) -> &Context {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Context {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Split-borrow `(this side, other side)`.
    pub fn split_mut(&mut self, side: Side) -> (&mut Context, &mut Context) {
        match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }
}

pub struct PreDamagePass<'a> {
    pub acting: Side,
    pub acting_played: &'a [CardSnapshot],
    pub defender_played: &'a [CardSnapshot],
    pub acting_stats: &'a Stats,
    pub defender_stats: &'a Stats,
    /// Preferred ledger key for the acting side's negation removals.
    pub negation_target: Option<&'a str>,
}

impl PreDamagePass<'_> {
    fn played_for(&self, side: Side) -> &[CardSnapshot] {
        if side == self.acting {
            self.acting_played
        } else {
            self.defender_played
        }
    }

    fn stats_for(&self, side: Side) -> &Stats {
        if side == self.acting {
            self.acting_stats
        } else {
            self.defender_stats
        }
    }

    /// Run the full pre-damage phase. Mutates both contexts (immediate Guard
    /// and Ability Shield toggles) and the ledger (negation removals and
    /// adoption), and returns the deferred work for the damage step.
    pub fn run(
        &self,
        contexts: &mut SideContexts,
        ledger: &mut EffectBucket,
        rng: &mut Rng,
        events: &mut Vec<TurnEvent>,
    ) -> (SidePass, SidePass) {
        let order = [self.acting, self.acting.opponent()];

        let mut pending = PerSide::<Vec<PendingAbility>>::default();
        let mut passes = PerSide::<SidePass>::default();
        for side in order {
            let (side_pending, side_pass) = self.resolve_queue(side, contexts, rng, events);
            *pending.get_mut(side) = side_pending;
            *passes.get_mut(side) = side_pass;
        }

        // Negation: acting side's successes first, then whatever the
        // defender still has pending after those drops.
        for side in order {
            let negations: Vec<(i32, f64)> = pending
                .get(side)
                .iter()
                .filter(|p| p.ability.kind == AbilityKind::AbilityNegation && p.ability.power > 0.0)
                .map(|p| (p.ability.precedence, p.ability.power))
                .collect();
            for (precedence, power) in negations {
                let preferred = if side == self.acting {
                    self.negation_target
                } else {
                    None
                };
                remove_lower_precedence_effects(
                    ledger.side_mut(side.opponent()),
                    side.opponent(),
                    precedence,
                    power,
                    preferred,
                    events,
                );
                let opponent_pending = std::mem::take(pending.get_mut(side.opponent()));
                *pending.get_mut(side.opponent()) = opponent_pending
                    .into_iter()
                    .filter(|p| {
                        if p.ability.precedence < precedence {
                            events.push(TurnEvent::AbilityNegated {
                                side: side.opponent(),
                                key: p.ability.key.clone(),
                                precedence: p.ability.precedence,
                            });
                            false
                        } else {
                            true
                        }
                    })
                    .collect();
            }
        }

        // Adoption and per-card flags over what survived negation.
        for side in order {
            for p in pending.get(side) {
                if p.ability.kind.is_persistent() {
                    let target = if p.ability.kind.targets_opponent() {
                        side.opponent()
                    } else {
                        side
                    };
                    upsert(ledger.side_mut(target), effect_from_ability(&p.ability));
                }
                match &p.ability.kind {
                    AbilityKind::DurabilityNegation { .. } => {
                        contexts.get_mut(side).set_bypass(p.card_index);
                    }
                    AbilityKind::InstantDeath => {
                        passes.get_mut(side).instant_death.push((
                            p.card_index,
                            p.card_name.clone(),
                            p.ability.clone(),
                        ));
                    }
                    _ => {}
                }
            }
        }

        let defender_pass = std::mem::take(passes.get_mut(self.acting.opponent()));
        let acting_pass = std::mem::take(passes.get_mut(self.acting));
        (acting_pass, defender_pass)
    }

    /// Resolve one side's queue in precedence order: gating, shield block,
    /// attack-linked deferral, then the activation roll.
    fn resolve_queue(
        &self,
        side: Side,
        contexts: &mut SideContexts,
        rng: &mut Rng,
        events: &mut Vec<TurnEvent>,
    ) -> (Vec<PendingAbility>, SidePass) {
        let played = self.played_for(side);
        let mut queue = build_effect_queue(played);

        // Curse suppression: the cursed side loses its N lowest-precedence
        // entries before anything rolls.
        let suppress = contexts.get(side).curse_suppress as usize;
        if suppress > 0 {
            queue.truncate(queue.len().saturating_sub(suppress));
        }

        let mut succeeded: HashSet<(usize, String)> = HashSet::new();
        let mut pending: Vec<PendingAbility> = Vec::new();
        let mut pass = SidePass::default();
        let intelligence = self.stats_for(side).intelligence;

        for entry in queue {
            let ability = entry.ability;

            let parents_ok = ability
                .parent_keys()
                .all(|key| succeeded.contains(&(entry.card_index, key.to_string())));
            if !parents_ok {
                continue;
            }

            if ability.kind.targets_opponent() {
                let shield = contexts.get(side.opponent()).ability_shield;
                if let Some(shield_precedence) = shield {
                    if shield_precedence >= ability.precedence {
                        events.push(TurnEvent::AbilityBlocked {
                            side,
                            card: entry.card_name.clone(),
                            key: ability.key.clone(),
                            shield_precedence,
                        });
                        continue;
                    }
                }
            }

            if ability.is_attack_linked() {
                // Deferred to the on-hit step; optimistically counted as
                // succeeded so dependents can chain off it in this pass.
                succeeded.insert((entry.card_index, ability.key.clone()));
                pass.attack_linked
                    .entry(entry.card_index)
                    .or_default()
                    .push(ability);
                continue;
            }

            let (self_context, opponent_context) = contexts.split_mut(side);
            let chance = activation_chance(
                ability.activation_chance,
                self_context,
                opponent_context,
                intelligence,
            );
            if !rng.chance(chance) {
                events.push(TurnEvent::AbilityFailed {
                    side,
                    card: entry.card_name.clone(),
                    key: ability.key.clone(),
                    chance,
                });
                continue;
            }
            events.push(TurnEvent::AbilityActivated {
                side,
                card: entry.card_name.clone(),
                key: ability.key.clone(),
                chance,
            });
            succeeded.insert((entry.card_index, ability.key.clone()));

            // Immediate toggles, visible to later abilities in this pass.
            match ability.kind {
                AbilityKind::Guard => self_context.guard = true,
                AbilityKind::AbilityShield => {
                    self_context.ability_shield = Some(
                        self_context
                            .ability_shield
                            .map_or(ability.precedence, |p| p.max(ability.precedence)),
                    );
                }
                _ => {}
            }

            pending.push(PendingAbility {
                card_index: entry.card_index,
                card_name: entry.card_name,
                ability,
            });
        }

        (pending, pass)
    }
}

/// Remove up to `clamp(floor(power), 1, 3)` ledger entries with strictly
/// lower precedence than the negation, lowest precedence first. A preferred
/// key, when present and eligible, is removed ahead of the rest.
fn remove_lower_precedence_effects(
    bucket: &mut crate::engine::ledger::EffectMap,
    bucket_side: Side,
    negation_precedence: i32,
    power: f64,
    preferred: Option<&str>,
    events: &mut Vec<TurnEvent>,
) {
    let budget = (power.floor() as usize).clamp(1, MAX_NEGATION_REMOVALS);
    let mut eligible: Vec<(i32, String)> = bucket
        .iter()
        .filter(|(_, e)| e.precedence < negation_precedence)
        .map(|(k, e)| (e.precedence, k.clone()))
        .collect();
    eligible.sort();
    if let Some(preferred) = preferred {
        if let Some(at) = eligible.iter().position(|(_, k)| k == preferred) {
            let hit = eligible.remove(at);
            eligible.insert(0, hit);
        }
    }
    for (precedence, key) in eligible.into_iter().take(budget) {
        bucket.remove(&key);
        events.push(TurnEvent::EffectRemoved {
            side: bucket_side,
            key,
            precedence,
        });
    }
}
