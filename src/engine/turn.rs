//! Turn orchestration: one full combat turn between the player side and the
//! AI side, as a single synchronous computation. The caller supplies the
//! complete prior state and persists the returned state; nothing survives in
//! memory between calls.
//!
//! Phase order per turn:
//! field tick (player) -> main action (player) -> pile update (player) ->
//! [seed exit] -> field tick (enemy) -> main action (enemy) ->
//! pile update (enemy) -> duration tick -> respond.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::ability::{Ability, AbilityKind};
use crate::engine::damage::{activation_chance, resolve_hit, HitOutcome};
use crate::engine::events::{Side, TurnEvent};
use crate::engine::field::{create_field_card, tick_side_field, FieldCard, MAX_FIELD_SLOTS};
use crate::engine::ledger::{self, effect_from_ability, upsert, Context, EffectBucket};
use crate::engine::policy::{decide, EnemyAction, PolicyConfig};
use crate::engine::resolver::{PreDamagePass, SideContexts, SidePass};
use crate::engine::rng::Rng;
use crate::engine::state::{CardSnapshot, SideState, Stats};

/// SP regained by an unfrozen side each of its main actions.
pub const SP_REGEN: f64 = 2.0;
/// Extra SP granted by the skip action.
pub const SKIP_SP_BONUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnAction {
    Play,
    Skip,
    Defend,
}

/// Field cards staged for both sides, wire-shaped like the persisted
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OnField {
    pub player: Vec<FieldCard>,
    pub enemy: Vec<FieldCard>,
}

impl OnField {
    fn side_mut(&mut self, side: Side) -> &mut Vec<FieldCard> {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    fn instance_ids(&self, side: Side) -> Vec<String> {
        let cards = match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        };
        cards.iter().map(|c| c.instance_id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnRequest {
    pub player: SideState,
    pub enemy: SideState,
    pub active_effects: EffectBucket,
    pub on_field: OnField,
    /// Hand indices the player plays this turn.
    pub selected_cards: Vec<usize>,
    pub action: Option<TurnAction>,
    /// Field instance id -> "character" or an opposing field instance id.
    pub retarget_choices: BTreeMap<String, String>,
    /// Preferred opponent ledger key for the player's negation removals.
    pub negation_target: Option<String>,
    pub enemy_policy: Option<PolicyConfig>,
    pub seed: Option<u64>,
    /// Bootstrap seed request: shuffle and deal only.
    pub bootstrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleOutcome {
    PlayerWon,
    EnemyWon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub player: SideState,
    pub enemy: SideState,
    pub active_effects: EffectBucket,
    pub on_field: OnField,
    /// Display-only stat views with the ledger folded in.
    pub player_effective: Stats,
    pub enemy_effective: Stats,
    pub message: String,
    pub retarget_prompts: Vec<String>,
    pub defend_used: bool,
    pub enemy_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<BattleOutcome>,
    pub events: Vec<TurnEvent>,
    pub seed: u64,
}

/// Structurally invalid requests the surrounding layer must reject before
/// persisting anything.
#[derive(Debug)]
pub enum TurnError {
    Parse(serde_json::Error),
    Rejected(String),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Rejected(reason) => write!(f, "rejected action: {reason}"),
        }
    }
}

impl std::error::Error for TurnError {}

/// Resolve one full turn.
pub fn resolve_turn(request: TurnRequest) -> Result<TurnResult, TurnError> {
    let seed = request.seed.unwrap_or_else(crate::engine::rng::entropy_seed);
    let mut rng = Rng::new(seed);
    let mut turn = TurnState::new(request, seed);

    turn.sanitize();
    let seed_exit = turn.is_seed_request();

    turn.field_tick(Side::Player, &mut rng);
    if !seed_exit && !turn.battle_over() {
        turn.main_action(Side::Player, &mut rng)?;
    }
    turn.pile_update(Side::Player, &mut rng);

    if seed_exit {
        // Seed requests still deal the enemy hand; nothing else of the enemy
        // half runs.
        turn.pile_update(Side::Enemy, &mut rng);
        return Ok(turn.respond());
    }

    if !turn.battle_over() {
        turn.field_tick(Side::Enemy, &mut rng);
    }
    if !turn.battle_over() {
        turn.main_action(Side::Enemy, &mut rng)?;
    }
    turn.pile_update(Side::Enemy, &mut rng);

    ledger::tick(&mut turn.effects.player);
    ledger::tick(&mut turn.effects.enemy);

    Ok(turn.respond())
}

/// Working state for one turn resolution.
struct TurnState {
    player: SideState,
    enemy: SideState,
    effects: EffectBucket,
    on_field: OnField,
    selected_cards: Vec<usize>,
    action: Option<TurnAction>,
    retarget_choices: BTreeMap<String, String>,
    negation_target: Option<String>,
    policy: PolicyConfig,
    bootstrap: bool,
    seed: u64,
    events: Vec<TurnEvent>,
    retarget_prompts: Vec<String>,
    defend_used: bool,
    enemy_action: Option<String>,
    /// Played cards awaiting pile update, per side.
    played: BTreeMap<&'static str, (TurnAction, Vec<CardSnapshot>)>,
}

impl TurnState {
    fn new(request: TurnRequest, seed: u64) -> Self {
        Self {
            player: request.player,
            enemy: request.enemy,
            effects: request.active_effects,
            on_field: request.on_field,
            selected_cards: request.selected_cards,
            action: request.action,
            retarget_choices: request.retarget_choices,
            negation_target: request.negation_target,
            policy: request.enemy_policy.unwrap_or_default(),
            bootstrap: request.bootstrap,
            seed,
            events: Vec::new(),
            retarget_prompts: Vec::new(),
            defend_used: false,
            enemy_action: None,
            played: BTreeMap::new(),
        }
    }

    fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Defensive numeric floors: a snapshot arriving without HP gets the
    /// vitality-derived full value; SP never exceeds its cap.
    fn sanitize(&mut self) {
        for side in [Side::Player, Side::Enemy] {
            let state = self.side_mut(side);
            if state.stats.hp <= 0.0 {
                state.stats.hp = state.stats.max_hp();
            }
            if state.stats.max_sp <= 0.0 {
                state.stats.max_sp = state.stats.sp.max(1.0);
            }
            state.stats.sp = state.stats.sp.clamp(0.0, state.stats.max_sp);
        }
    }

    fn is_seed_request(&self) -> bool {
        self.bootstrap || (self.action.is_none() && self.selected_cards.is_empty())
    }

    fn battle_over(&self) -> bool {
        self.player.stats.hp <= 0.0 || self.enemy.stats.hp <= 0.0
    }

    /// Effective stats and context for one side, derived from its ledger
    /// bucket.
    fn derived(&self, side: Side) -> (Stats, Context) {
        ledger::apply(self.effects.side(side), &self.side(side).stats)
    }

    /// Defense bonus the opponent's hand grants while it is defending.
    fn defense_bonus(&self, side: Side) -> f64 {
        let state = self.side(side);
        if state.defending {
            state.hand.iter().map(|c| c.defense).sum()
        } else {
            0.0
        }
    }

    /// Lower a side's HP, applying Revive from its ledger at every
    /// HP-lowering point, not only at end of turn.
    fn apply_damage(&mut self, target: Side, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        let hp = {
            let stats = &mut self.side_mut(target).stats;
            stats.hp = (stats.hp - amount).max(0.0);
            stats.hp
        };
        if hp <= 0.0 {
            self.try_revive(target);
        }
    }

    fn try_revive(&mut self, target: Side) {
        let Some(effect) = self.effects.side_mut(target).remove("Revive") else {
            return;
        };
        let vitality = self.side(target).stats.vitality;
        let restored = (vitality * 100.0 * effect.power / 100.0).floor().max(1.0);
        self.side_mut(target).stats.hp = restored;
        self.events.push(TurnEvent::Revived {
            side: target,
            restored_hp: restored,
        });
    }

    /// Advance `side`'s field cards and apply their summed damage to the
    /// opponent. Field resolution must never raise an HP value; violations
    /// are clamped and logged.
    fn field_tick(&mut self, side: Side, rng: &mut Rng) {
        if self.on_field.side_mut(side).is_empty() {
            return;
        }
        let (attacker_stats, attacker_context) = self.derived(side);
        let (defender_stats, defender_context) = self.derived(side.opponent());
        let opposing_ids = self.on_field.instance_ids(side.opponent());
        let defender_bonus = self.defense_bonus(side.opponent());

        let mut field = std::mem::take(self.on_field.side_mut(side));
        let outcome = tick_side_field(
            side,
            &mut field,
            &opposing_ids,
            &self.retarget_choices,
            &attacker_stats,
            &defender_stats,
            &attacker_context,
            &defender_context,
            defender_bonus,
            &mut self.effects,
            rng,
            &mut self.events,
        );
        *self.on_field.side_mut(side) = field;

        for card in outcome.recycled {
            self.side_mut(side).recycle_card(card);
        }
        self.retarget_prompts.extend(outcome.prompts);

        let mut damage = outcome.total_damage;
        if damage < 0.0 {
            self.events.push(TurnEvent::InvariantClamped {
                side,
                detail: "field tick produced negative total damage".to_string(),
            });
            damage = 0.0;
        }
        if self.side(side.opponent()).defending {
            damage /= 2.0;
        }
        self.apply_damage(side.opponent(), damage);
    }

    fn main_action(&mut self, side: Side, rng: &mut Rng) -> Result<(), TurnError> {
        // Defend lasts until the defender's next main action.
        self.side_mut(side).defending = false;

        let (_, context) = self.derived(side);
        if context.frozen_turns > 0 {
            self.events.push(TurnEvent::Frozen {
                side,
                remaining: context.frozen_turns,
            });
            if side == Side::Enemy {
                self.enemy_action = Some("frozen".to_string());
            }
            self.played.insert(side.as_str(), (TurnAction::Skip, Vec::new()));
            return Ok(());
        }

        let (action, picks) = self.choose_action(side, rng)?;

        {
            let stats = &mut self.side_mut(side).stats;
            stats.sp = (stats.sp + SP_REGEN).min(stats.max_sp);
            if action == TurnAction::Skip {
                stats.sp = (stats.sp + SKIP_SP_BONUS).min(stats.max_sp);
            }
        }

        match action {
            TurnAction::Skip => {
                self.played.insert(side.as_str(), (TurnAction::Skip, Vec::new()));
            }
            TurnAction::Defend => {
                self.side_mut(side).defending = true;
                if side == Side::Player {
                    self.defend_used = true;
                }
                self.played.insert(side.as_str(), (TurnAction::Defend, Vec::new()));
            }
            TurnAction::Play => {
                let cost = self.validate_picks(side, &picks)?;
                let sp = self.side(side).stats.sp;
                if cost > sp {
                    return Err(TurnError::Rejected(format!(
                        "play cost {cost} exceeds available SP {sp}"
                    )));
                }
                self.side_mut(side).stats.sp -= cost;
                let played = self.take_cards(side, &picks);
                self.resolve_play(side, &played, rng);
                self.played.insert(side.as_str(), (TurnAction::Play, played));
            }
        }
        Ok(())
    }

    fn choose_action(
        &mut self,
        side: Side,
        rng: &mut Rng,
    ) -> Result<(TurnAction, Vec<usize>), TurnError> {
        match side {
            Side::Player => {
                let action = match self.action {
                    Some(action) => action,
                    None => TurnAction::Skip,
                };
                if action == TurnAction::Play && self.selected_cards.is_empty() {
                    return Err(TurnError::Rejected("play with no selected cards".to_string()));
                }
                Ok((action, self.selected_cards.clone()))
            }
            Side::Enemy => {
                let stats = &self.enemy.stats;
                // Budget exactly what main_action will grant: regen is capped
                // at max SP before the play is paid for.
                let choice = decide(
                    &self.enemy.hand,
                    (stats.sp + SP_REGEN).min(stats.max_sp),
                    stats.max_sp,
                    stats.hp,
                    stats.max_hp(),
                    &self.policy,
                    rng,
                );
                Ok(match choice {
                    EnemyAction::Play(picks) => {
                        let names: Vec<&str> = picks
                            .iter()
                            .filter_map(|&i| self.enemy.hand.get(i).map(|c| c.name.as_str()))
                            .collect();
                        self.enemy_action = Some(format!("play {}", names.join(", ")));
                        (TurnAction::Play, picks)
                    }
                    EnemyAction::Defend => {
                        self.enemy_action = Some("defend".to_string());
                        (TurnAction::Defend, Vec::new())
                    }
                    EnemyAction::Skip => {
                        self.enemy_action = Some("skip".to_string());
                        (TurnAction::Skip, Vec::new())
                    }
                })
            }
        }
    }

    /// Check the picks reference distinct, existing hand slots and return
    /// their summed SP cost. Must run before the hand is touched so a
    /// rejected action leaves the state exactly as it arrived.
    fn validate_picks(&self, side: Side, picks: &[usize]) -> Result<f64, TurnError> {
        let hand = &self.side(side).hand;
        let mut sorted: Vec<usize> = picks.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != picks.len() || sorted.iter().any(|&i| i >= hand.len()) {
            return Err(TurnError::Rejected(
                "selected cards reference invalid hand slots".to_string(),
            ));
        }
        Ok(sorted.iter().map(|&i| hand[i].sp_cost).sum())
    }

    /// Remove the validated picks from the side's hand, preserving pick
    /// order for resolution.
    fn take_cards(&mut self, side: Side, picks: &[usize]) -> Vec<CardSnapshot> {
        let mut sorted: Vec<usize> = picks.to_vec();
        sorted.sort_unstable();
        let mut removed: Vec<(usize, CardSnapshot)> = Vec::with_capacity(sorted.len());
        for &index in sorted.iter().rev() {
            let card = self.side_mut(side).hand.remove(index);
            removed.push((index, card));
        }
        removed.sort_by_key(|(index, _)| picks.iter().position(|&p| p == *index));
        removed.into_iter().map(|(_, card)| card).collect()
    }

    /// The pre-damage pass, instant death, damage and on-hit steps for one
    /// side's play.
    fn resolve_play(&mut self, side: Side, played: &[CardSnapshot], rng: &mut Rng) {
        let (acting_stats, acting_context) = self.derived(side);
        let (defender_stats, defender_context) = self.derived(side.opponent());
        let mut contexts = match side {
            Side::Player => SideContexts {
                player: acting_context,
                enemy: defender_context,
            },
            Side::Enemy => SideContexts {
                player: defender_context,
                enemy: acting_context,
            },
        };

        let negation_target = self.negation_target.clone();
        let pass = PreDamagePass {
            acting: side,
            acting_played: played,
            defender_played: &[],
            acting_stats: &acting_stats,
            defender_stats: &defender_stats,
            negation_target: if side == Side::Player {
                negation_target.as_deref()
            } else {
                None
            },
        };
        let (acting_pass, _) = pass.run(&mut contexts, &mut self.effects, rng, &mut self.events);

        self.resolve_instant_death(side, &acting_pass, &contexts, &acting_stats, rng);
        if self.battle_over() {
            return;
        }

        let defender_bonus = self.defense_bonus(side.opponent());
        let mut total = 0.0;
        for (index, card) in played.iter().enumerate() {
            if !card.is_attacking() {
                continue;
            }
            let deferred: &[Ability] = acting_pass
                .attack_linked
                .get(&index)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let mut bypass = contexts.get(side).bypass_for(index);
            for ability in deferred {
                if matches!(ability.kind, AbilityKind::DurabilityNegation { .. })
                    && self.roll_on_hit(side, card, ability, &contexts, &acting_stats, rng)
                {
                    bypass = true;
                }
            }

            let outcome = resolve_hit(
                card,
                &acting_stats,
                &defender_stats,
                contexts.get(side),
                contexts.get(side.opponent()),
                defender_bonus,
                bypass,
                rng,
            );
            match outcome {
                HitOutcome::Damage(amount) => {
                    self.events.push(TurnEvent::DamageDealt {
                        side,
                        card: card.name.clone(),
                        amount,
                    });
                    total += amount;
                    if amount > 0.0 {
                        self.fire_on_hit(side, index, card, deferred, &contexts, &acting_stats, rng);
                    }
                }
                HitOutcome::Dodged => self.events.push(TurnEvent::AttackDodged {
                    side: side.opponent(),
                    card: card.name.clone(),
                }),
                HitOutcome::Guarded => self.events.push(TurnEvent::AttackGuarded {
                    side: side.opponent(),
                    card: card.name.clone(),
                }),
            }
        }

        if self.side(side.opponent()).defending {
            total /= 2.0;
        }
        self.apply_damage(side.opponent(), total);
    }

    /// Roll one attack-linked ability at the on-hit step, honoring the
    /// opponent's shield for opponent-targeting kinds.
    fn roll_on_hit(
        &mut self,
        side: Side,
        card: &CardSnapshot,
        ability: &Ability,
        contexts: &SideContexts,
        acting_stats: &Stats,
        rng: &mut Rng,
    ) -> bool {
        if ability.kind.targets_opponent() {
            if let Some(shield_precedence) = contexts.get(side.opponent()).ability_shield {
                if shield_precedence >= ability.precedence {
                    self.events.push(TurnEvent::AbilityBlocked {
                        side,
                        card: card.name.clone(),
                        key: ability.key.clone(),
                        shield_precedence,
                    });
                    return false;
                }
            }
        }
        let chance = activation_chance(
            ability.activation_chance,
            contexts.get(side),
            contexts.get(side.opponent()),
            acting_stats.intelligence,
        );
        let activated = rng.chance(chance);
        self.events.push(if activated {
            TurnEvent::AbilityActivated {
                side,
                card: card.name.clone(),
                key: ability.key.clone(),
                chance,
            }
        } else {
            TurnEvent::AbilityFailed {
                side,
                card: card.name.clone(),
                key: ability.key.clone(),
                chance,
            }
        });
        activated
    }

    /// Fire the remaining attack-linked abilities once their card's hit has
    /// landed. Durability negation was consumed before the hit.
    #[allow(clippy::too_many_arguments)]
    fn fire_on_hit(
        &mut self,
        side: Side,
        _card_index: usize,
        card: &CardSnapshot,
        deferred: &[Ability],
        contexts: &SideContexts,
        acting_stats: &Stats,
        rng: &mut Rng,
    ) {
        for ability in deferred {
            if matches!(ability.kind, AbilityKind::DurabilityNegation { .. }) {
                continue;
            }
            if !self.roll_on_hit(side, card, ability, contexts, acting_stats, rng) {
                continue;
            }
            match &ability.kind {
                AbilityKind::InstantDeath => {
                    self.events.push(TurnEvent::InstantDeath {
                        side: side.opponent(),
                        card: card.name.clone(),
                    });
                    self.side_mut(side.opponent()).stats.hp = 0.0;
                    self.try_revive(side.opponent());
                }
                kind if kind.is_persistent() => {
                    let target = if kind.targets_opponent() {
                        side.opponent()
                    } else {
                        side
                    };
                    upsert(self.effects.side_mut(target), effect_from_ability(ability));
                }
                _ => {}
            }
        }
    }

    /// Instant Death resolves before normal damage: roll each captured
    /// ability against the intelligence-adjusted chance and force the target
    /// to zero HP on success (Revive still applies).
    fn resolve_instant_death(
        &mut self,
        side: Side,
        pass: &SidePass,
        contexts: &SideContexts,
        acting_stats: &Stats,
        rng: &mut Rng,
    ) {
        for (_, card_name, ability) in &pass.instant_death {
            if contexts.get(side.opponent()).ability_shield.is_some() {
                continue;
            }
            let chance = activation_chance(
                ability.activation_chance,
                contexts.get(side),
                contexts.get(side.opponent()),
                acting_stats.intelligence,
            );
            if !rng.chance(chance) {
                continue;
            }
            self.events.push(TurnEvent::InstantDeath {
                side: side.opponent(),
                card: card_name.clone(),
            });
            self.side_mut(side.opponent()).stats.hp = 0.0;
            self.try_revive(side.opponent());
            if self.battle_over() {
                return;
            }
        }
    }

    /// Pile bookkeeping after a side's action: multi-hit cards become field
    /// cards (capacity permitting), everything else returns to the deck
    /// bottom; skip recycles the whole hand; defend leaves it untouched.
    /// Hands refill to the fixed size afterwards.
    fn pile_update(&mut self, side: Side, rng: &mut Rng) {
        if self.bootstrap {
            let state = self.side_mut(side);
            let mut deck = std::mem::take(&mut state.deck);
            rng.shuffle(&mut deck);
            state.deck = deck;
        }

        // Seed requests have no recorded action; leave the hand untouched
        // and just deal.
        let (action, played) = self
            .played
            .remove(side.as_str())
            .unwrap_or((TurnAction::Defend, Vec::new()));

        match action {
            TurnAction::Play => {
                for card in played {
                    let staged = card.primary_multi_hit().cloned().and_then(|primary| {
                        if self.on_field.side_mut(side).len() < MAX_FIELD_SLOTS {
                            create_field_card(side, &card, &primary, rng)
                        } else {
                            None
                        }
                    });
                    match staged {
                        Some(field_card) => self.on_field.side_mut(side).push(field_card),
                        None => self.side_mut(side).recycle_card(card),
                    }
                }
            }
            TurnAction::Skip => {
                let state = self.side_mut(side);
                let hand = std::mem::take(&mut state.hand);
                for card in hand {
                    state.recycle_card(card);
                }
            }
            TurnAction::Defend => {}
        }

        self.side_mut(side).refill_hand();
    }

    fn respond(mut self) -> TurnResult {
        let (player_effective, _) = self.derived(Side::Player);
        let (enemy_effective, _) = self.derived(Side::Enemy);
        let outcome = if self.player.stats.hp <= 0.0 {
            Some(BattleOutcome::EnemyWon)
        } else if self.enemy.stats.hp <= 0.0 {
            Some(BattleOutcome::PlayerWon)
        } else {
            None
        };
        let message = self.narrative(outcome);
        TurnResult {
            player: self.player,
            enemy: self.enemy,
            active_effects: self.effects,
            on_field: self.on_field,
            player_effective,
            enemy_effective,
            message,
            retarget_prompts: self.retarget_prompts,
            defend_used: self.defend_used,
            enemy_action: self.enemy_action,
            outcome,
            events: self.events,
            seed: self.seed,
        }
    }

    fn narrative(&self, outcome: Option<BattleOutcome>) -> String {
        let mut dealt = 0.0;
        let mut taken = 0.0;
        for event in &self.events {
            match event {
                TurnEvent::DamageDealt { side, amount, .. }
                | TurnEvent::FieldHit { side, amount, .. } => match side {
                    Side::Player => dealt += amount,
                    Side::Enemy => taken += amount,
                },
                _ => {}
            }
        }
        let mut message = format!("You dealt {dealt:.0} damage and took {taken:.0}.");
        if let Some(enemy_action) = &self.enemy_action {
            message.push_str(&format!(" Enemy chose to {enemy_action}."));
        }
        match outcome {
            Some(BattleOutcome::PlayerWon) => message.push_str(" Victory!"),
            Some(BattleOutcome::EnemyWon) => message.push_str(" You were defeated."),
            None => {}
        }
        message
    }
}
