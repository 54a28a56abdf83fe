//! Runtime state carried through a turn: side stats, card snapshots and
//! piles. All of it arrives on the request and leaves on the result; nothing
//! here survives in memory between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::ability::{normalize_card_abilities, Ability, StatKey};

/// Cards drawn into a hand after each pile update.
pub const HAND_SIZE: usize = 5;

/// Numeric attributes for one side. Base stats persist across turns;
/// effective stats are derived per response by folding the ledger in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub attack_power: f64,
    pub physical_power: f64,
    pub supernatural_power: f64,
    pub durability: f64,
    pub vitality: f64,
    pub intelligence: f64,
    pub speed: f64,
    pub sp: f64,
    pub max_sp: f64,
    pub hp: f64,
}

impl Stats {
    /// Full HP derived from vitality. Used as a floor when a snapshot arrives
    /// without an HP value.
    pub fn max_hp(&self) -> f64 {
        (self.vitality * 100.0).max(1.0)
    }

    /// Mutable slot for the stat a Stats Up / Stats Down effect names.
    pub fn stat_mut(&mut self, key: StatKey) -> &mut f64 {
        match key {
            StatKey::AttackPower => &mut self.attack_power,
            StatKey::PhysicalPower => &mut self.physical_power,
            StatKey::SupernaturalPower => &mut self.supernatural_power,
            StatKey::Durability => &mut self.durability,
            StatKey::Vitality => &mut self.vitality,
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Speed => &mut self.speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    Physical,
    Supernatural,
    Support,
    #[serde(other)]
    Other,
}

/// Minimal runtime projection of a catalog card, carried inside piles and
/// field entries. Distinct from the catalog record: abilities here are
/// already canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub name: String,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub sp_cost: f64,
    #[serde(default)]
    pub potency: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub types: Vec<CardType>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl CardSnapshot {
    /// Build a snapshot from loosely-shaped authored card data, normalizing
    /// abilities in the process. Missing numeric fields default to zero.
    pub fn from_authored(raw: &Value) -> Self {
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let types = raw
            .get("types")
            .cloned()
            .and_then(|t| serde_json::from_value(t).ok())
            .unwrap_or_default();
        let raw_abilities: Vec<Value> = raw
            .get("abilities")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Self {
            name,
            rating: raw.get("rating").and_then(Value::as_u64).unwrap_or(0) as u32,
            sp_cost: raw.get("spCost").and_then(Value::as_f64).unwrap_or(0.0),
            potency: raw.get("potency").and_then(Value::as_f64).unwrap_or(0.0),
            defense: raw.get("defense").and_then(Value::as_f64).unwrap_or(0.0),
            types,
            abilities: normalize_card_abilities(&raw_abilities),
        }
    }

    pub fn is_physical(&self) -> bool {
        self.types.contains(&CardType::Physical)
    }

    pub fn is_supernatural(&self) -> bool {
        self.types.contains(&CardType::Supernatural)
    }

    /// Whether the card deals direct damage at all.
    pub fn is_attacking(&self) -> bool {
        self.is_physical() || self.is_supernatural()
    }

    /// The primary multi-hit ability: the first ability with a window of at
    /// least one turn. At most one per card is honored.
    pub fn primary_multi_hit(&self) -> Option<&Ability> {
        self.abilities
            .iter()
            .find(|a| a.multi_hit.as_ref().is_some_and(|m| m.turns >= 1))
    }
}

/// One side's persisted battle state: base stats plus draw/hand piles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SideState {
    pub stats: Stats,
    pub hand: Vec<CardSnapshot>,
    pub deck: Vec<CardSnapshot>,
    /// Set by the defend action; halves incoming damage until this side's
    /// next main action.
    pub defending: bool,
}

impl SideState {
    /// Draw from the top of the deck until the hand holds [HAND_SIZE] cards
    /// or the deck runs out.
    pub fn refill_hand(&mut self) {
        while self.hand.len() < HAND_SIZE && !self.deck.is_empty() {
            let card = self.deck.remove(0);
            self.hand.push(card);
        }
    }

    /// Return a card to the bottom of the deck.
    pub fn recycle_card(&mut self, card: CardSnapshot) {
        self.deck.push(card);
    }
}
