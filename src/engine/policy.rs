//! Enemy decision policy: chooses the AI side's action from its hand and the
//! authored priority/combo/weight configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::rng::Rng;
use crate::engine::state::CardSnapshot;

/// Priority assumed for cards the authored table does not mention.
const DEFAULT_CARD_PRIORITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyWeights {
    pub play: f64,
    pub skip: f64,
    pub defend: f64,
}

impl Default for PolicyWeights {
    fn default() -> Self {
        Self {
            play: 1.0,
            skip: 1.0,
            defend: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Combo {
    pub cards: Vec<String>,
    pub priority: f64,
}

/// Authored per-enemy decision configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    pub card_priority: BTreeMap<String, f64>,
    pub combos: Vec<Combo>,
    /// SP ratio below which skipping starts scoring.
    pub sp_skip_threshold: f64,
    /// HP ratio below which defending starts scoring.
    pub defend_hp_threshold: f64,
    pub weights: PolicyWeights,
    /// Probability in [0, 1] of playing the greedy set without scoring.
    pub greed_chance: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            card_priority: BTreeMap::new(),
            combos: Vec::new(),
            sp_skip_threshold: 0.3,
            defend_hp_threshold: 0.25,
            weights: PolicyWeights::default(),
            greed_chance: 0.1,
        }
    }
}

impl PolicyConfig {
    fn priority_of(&self, card: &CardSnapshot) -> f64 {
        self.card_priority
            .get(&card.name)
            .copied()
            .unwrap_or(DEFAULT_CARD_PRIORITY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnemyAction {
    /// Hand indices to play, combo cards first.
    Play(Vec<usize>),
    Skip,
    Defend,
}

/// Pick the enemy action: highest-priority affordable combo, greedy fill
/// from the rest of the hand, then score play vs skip vs defend. Ties break
/// play > defend > skip.
pub fn decide(
    hand: &[CardSnapshot],
    sp: f64,
    max_sp: f64,
    hp: f64,
    max_hp: f64,
    config: &PolicyConfig,
    rng: &mut Rng,
) -> EnemyAction {
    let (selection, combo_score) = select_cards(hand, sp, config);

    if !selection.is_empty() && config.greed_chance > 0.0 && rng.uniform() < config.greed_chance {
        return EnemyAction::Play(selection);
    }

    let priority_sum: f64 = selection.iter().map(|&i| config.priority_of(&hand[i])).sum();
    let play_score = if selection.is_empty() {
        f64::NEG_INFINITY
    } else {
        config.weights.play * (combo_score + priority_sum)
    };

    let sp_ratio = if max_sp > 0.0 { sp / max_sp } else { 0.0 };
    let skip_score = if config.sp_skip_threshold > 0.0 {
        config.weights.skip
            * ((config.sp_skip_threshold - sp_ratio) / config.sp_skip_threshold).max(0.0)
    } else {
        0.0
    };

    let hp_ratio = if max_hp > 0.0 { hp / max_hp } else { 0.0 };
    let defend_score = if config.defend_hp_threshold > 0.0 {
        config.weights.defend
            * ((config.defend_hp_threshold - hp_ratio) / config.defend_hp_threshold).max(0.0)
    } else {
        0.0
    };

    // Tie-break order: play > defend > skip.
    if play_score >= defend_score && play_score >= skip_score && !selection.is_empty() {
        EnemyAction::Play(selection)
    } else if defend_score >= skip_score {
        EnemyAction::Defend
    } else {
        EnemyAction::Skip
    }
}

/// Combo selection plus greedy fill. Returns hand indices and the selected
/// combo's priority (0 when no combo matched).
fn select_cards(hand: &[CardSnapshot], sp: f64, config: &PolicyConfig) -> (Vec<usize>, f64) {
    let mut selection: Vec<usize> = Vec::new();
    let mut spent = 0.0;
    let mut combo_score = 0.0;

    let mut combos: Vec<&Combo> = config.combos.iter().collect();
    combos.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    for combo in combos {
        if let Some(indices) = match_combo(hand, &combo.cards) {
            let cost: f64 = indices.iter().map(|&i| hand[i].sp_cost).sum();
            if cost <= sp {
                spent = cost;
                combo_score = combo.priority;
                selection = indices;
                break;
            }
        }
    }

    // Greedy fill: highest priority first while SP allows.
    let mut rest: Vec<usize> = (0..hand.len()).filter(|i| !selection.contains(i)).collect();
    rest.sort_by(|&a, &b| {
        config
            .priority_of(&hand[b])
            .total_cmp(&config.priority_of(&hand[a]))
    });
    for index in rest {
        let cost = hand[index].sp_cost;
        if spent + cost <= sp {
            spent += cost;
            selection.push(index);
        }
    }

    (selection, combo_score)
}

/// Exact card-set match: every combo card name must be found on a distinct
/// hand slot.
fn match_combo(hand: &[CardSnapshot], names: &[String]) -> Option<Vec<usize>> {
    if names.is_empty() {
        return None;
    }
    let mut used: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        let slot = hand
            .iter()
            .enumerate()
            .position(|(i, card)| card.name == *name && !used.contains(&i))?;
        used.push(slot);
    }
    Some(used)
}
