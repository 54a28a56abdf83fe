//! On-field scheduler: cards staged for multi-turn auto-hits. Tracks the
//! overall-turn counter (1 = the initial play), precomputed durability
//! negation windows and child-ability firing turns, and recycles expired
//! cards back to their owner's deck.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ability::{Ability, AbilityKind, DurabilityWindow, HitSchedule, LinkRef};
pub use crate::engine::ability::{TargetMode, TargetScope, Targeting};
use crate::engine::damage::{resolve_hit, HitOutcome};
use crate::engine::events::{Side, TurnEvent};
use crate::engine::ledger::{effect_from_ability, upsert, Context, EffectBucket};
use crate::engine::rng::Rng;
use crate::engine::state::{CardSnapshot, Stats};

/// Live field cards per side.
pub const MAX_FIELD_SLOTS: usize = 3;

/// What a field card is currently aimed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "ref")]
pub enum TargetRef {
    /// The opposing character.
    Character,
    /// A specific opposing field card, by instance id.
    FieldCard(String),
}

/// A child ability's precomputed firing turns (overall-turn numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSchedule {
    pub ability: Ability,
    pub turns: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleState {
    /// Last completed overall turn. The initial play is 1; field ticks
    /// advance it to 2 and beyond.
    pub overall_turn: u32,
    /// Overall turns whose hit bypasses defender durability.
    pub negation_turns: Vec<u32>,
    pub children: Vec<ChildSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCard {
    pub instance_id: String,
    pub owner: Side,
    pub card: CardSnapshot,
    pub turns_remaining: u32,
    /// Key of the primary multi-hit ability.
    pub link: String,
    pub targeting: Targeting,
    pub target_ref: TargetRef,
    pub schedule: ScheduleState,
}

impl FieldCard {
    /// A snapshot the scheduler cannot safely advance: its link no longer
    /// names a card ability, or its turn counter never started. Kept alive
    /// without dealing damage rather than aborting the turn.
    pub fn is_malformed(&self) -> bool {
        self.schedule.overall_turn == 0 || !self.card.abilities.iter().any(|a| a.key == self.link)
    }
}

/// Snapshot a played card as a field card after its primary multi-hit
/// ability resolved its first hit. Returns None when the window has no
/// remaining turns (single-hit cards recycle normally).
pub fn create_field_card(
    owner: Side,
    card: &CardSnapshot,
    primary: &Ability,
    rng: &mut Rng,
) -> Option<FieldCard> {
    let multi = primary.multi_hit.as_ref()?;
    let turns = multi.turns;
    if turns < 2 {
        return None;
    }
    let window_start = 2;
    let window_end = turns;

    let mut negation_turns: Vec<u32> = Vec::new();
    for ability in &card.abilities {
        if let AbilityKind::DurabilityNegation { window } = &ability.kind {
            match window {
                DurabilityWindow::Auto => {
                    negation_turns = (window_start..=window_end).collect();
                    break;
                }
                DurabilityWindow::Turns { turns } => {
                    negation_turns.extend(
                        turns
                            .iter()
                            .copied()
                            .filter(|t| (window_start..=window_end).contains(t)),
                    );
                }
            }
        }
    }
    negation_turns.sort_unstable();
    negation_turns.dedup();

    let children = card
        .abilities
        .iter()
        .filter(|a| {
            a.key != primary.key
                && a.kind.is_persistent()
                && a.linked_to
                    .iter()
                    .any(|l| matches!(l, LinkRef::Key(k) if *k == primary.key))
        })
        .filter_map(|ability| {
            let turns = match ability.multi_hit.as_ref()?.schedule.as_ref()? {
                HitSchedule::List { turns } => turns
                    .iter()
                    .copied()
                    .filter(|t| (window_start..=window_end).contains(t))
                    .collect(),
                HitSchedule::Random { times } => {
                    rng.sample_unique(window_start, window_end, *times as usize)
                }
            };
            Some(ChildSchedule {
                ability: ability.clone(),
                turns,
            })
        })
        .collect();

    Some(FieldCard {
        instance_id: Uuid::new_v4().to_string(),
        owner,
        card: card.clone(),
        turns_remaining: turns - 1,
        link: primary.key.clone(),
        targeting: multi.targeting,
        target_ref: TargetRef::Character,
        schedule: ScheduleState {
            overall_turn: 1,
            negation_turns,
            children,
        },
    })
}

/// Result of ticking one side's field.
#[derive(Debug, Clone, Default)]
pub struct FieldTickOutcome {
    /// Summed damage to apply to the opponent once, after the tick.
    pub total_damage: f64,
    /// Cards whose window closed (or whose locked target vanished),
    /// recycled to the owner's deck by the caller.
    pub recycled: Vec<CardSnapshot>,
    /// Instance ids held this tick awaiting a retarget choice.
    pub prompts: Vec<String>,
}

/// Advance every live field card for `owner` by one owning-side turn:
/// resolve targets, deal scheduled hits, fire scheduled children into the
/// ledger, decrement counters, recycle the expired.
#[allow(clippy::too_many_arguments)]
pub fn tick_side_field(
    owner: Side,
    field: &mut Vec<FieldCard>,
    opposing_field_ids: &[String],
    retarget_choices: &BTreeMap<String, String>,
    attacker_stats: &Stats,
    defender_stats: &Stats,
    attacker_context: &Context,
    defender_context: &Context,
    defender_card_bonus: f64,
    ledger: &mut EffectBucket,
    rng: &mut Rng,
    events: &mut Vec<TurnEvent>,
) -> FieldTickOutcome {
    let mut outcome = FieldTickOutcome::default();
    let mut kept: Vec<FieldCard> = Vec::with_capacity(field.len());

    for mut entry in field.drain(..) {
        if entry.is_malformed() {
            // Defensive: never advance or damage from a snapshot the
            // scheduler cannot interpret.
            kept.push(entry);
            continue;
        }

        match resolve_target(&mut entry, opposing_field_ids, retarget_choices, rng) {
            TargetResolution::Ready => {}
            TargetResolution::Hold => {
                events.push(TurnEvent::RetargetPrompt {
                    side: owner,
                    instance_id: entry.instance_id.clone(),
                });
                outcome.prompts.push(entry.instance_id.clone());
                kept.push(entry);
                continue;
            }
            TargetResolution::Dropped => {
                events.push(TurnEvent::FieldExpired {
                    side: owner,
                    card: entry.card.name.clone(),
                });
                outcome.recycled.push(entry.card);
                continue;
            }
        }

        let overall_turn = entry.schedule.overall_turn + 1;
        let bypass = entry.schedule.negation_turns.contains(&overall_turn);
        let hit = resolve_hit(
            &entry.card,
            attacker_stats,
            defender_stats,
            attacker_context,
            defender_context,
            defender_card_bonus,
            bypass,
            rng,
        );
        match hit {
            HitOutcome::Damage(amount) => {
                let amount = if amount < 0.0 {
                    events.push(TurnEvent::InvariantClamped {
                        side: owner,
                        detail: format!("negative field hit from {}", entry.card.name),
                    });
                    0.0
                } else {
                    amount
                };
                events.push(TurnEvent::FieldHit {
                    side: owner,
                    card: entry.card.name.clone(),
                    overall_turn,
                    amount,
                });
                outcome.total_damage += amount;
            }
            HitOutcome::Dodged => events.push(TurnEvent::AttackDodged {
                side: owner.opponent(),
                card: entry.card.name.clone(),
            }),
            HitOutcome::Guarded => events.push(TurnEvent::AttackGuarded {
                side: owner.opponent(),
                card: entry.card.name.clone(),
            }),
        }

        // Schedule membership alone gates child firing; no fresh roll.
        for child in &entry.schedule.children {
            if !child.turns.contains(&overall_turn) {
                continue;
            }
            let target = if child.ability.kind.targets_opponent() {
                owner.opponent()
            } else {
                owner
            };
            upsert(ledger.side_mut(target), effect_from_ability(&child.ability));
            events.push(TurnEvent::FieldChildFired {
                side: owner,
                card: entry.card.name.clone(),
                key: child.ability.key.clone(),
                overall_turn,
            });
        }

        entry.schedule.overall_turn = overall_turn;
        entry.turns_remaining = entry.turns_remaining.saturating_sub(1);
        if entry.turns_remaining == 0 {
            events.push(TurnEvent::FieldExpired {
                side: owner,
                card: entry.card.name.clone(),
            });
            outcome.recycled.push(entry.card);
        } else {
            kept.push(entry);
        }
    }

    *field = kept;
    outcome
}

enum TargetResolution {
    Ready,
    Hold,
    Dropped,
}

fn resolve_target(
    entry: &mut FieldCard,
    opposing_field_ids: &[String],
    retarget_choices: &BTreeMap<String, String>,
    rng: &mut Rng,
) -> TargetResolution {
    let target_alive = match &entry.target_ref {
        TargetRef::Character => true,
        TargetRef::FieldCard(id) => opposing_field_ids.iter().any(|fid| fid == id),
    };
    if target_alive {
        return TargetResolution::Ready;
    }
    match entry.targeting.mode {
        TargetMode::Locked => TargetResolution::Dropped,
        TargetMode::RetargetRandom => {
            entry.target_ref = match entry.targeting.scope {
                TargetScope::Character => TargetRef::Character,
                TargetScope::Field if !opposing_field_ids.is_empty() => {
                    let at = rng.index(opposing_field_ids.len());
                    TargetRef::FieldCard(opposing_field_ids[at].clone())
                }
                TargetScope::Field => TargetRef::Character,
            };
            TargetResolution::Ready
        }
        TargetMode::RetargetChoose => match retarget_choices.get(&entry.instance_id) {
            Some(choice) if choice == "character" => {
                entry.target_ref = TargetRef::Character;
                TargetResolution::Ready
            }
            Some(choice) if opposing_field_ids.contains(choice) => {
                entry.target_ref = TargetRef::FieldCard(choice.clone());
                TargetResolution::Ready
            }
            _ => TargetResolution::Hold,
        },
    }
}
