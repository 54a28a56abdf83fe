pub mod ability;
pub mod damage;
pub mod events;
pub mod field;
pub mod ledger;
pub mod policy;
pub mod queue;
pub mod resolver;
pub mod rng;
pub mod state;
pub mod turn;

pub use ability::{
    normalize_card_abilities, Ability, AbilityKind, DurabilityWindow, HitSchedule, LinkRef,
    MultiHit, StatKey,
};
pub use damage::{
    activation_chance, card_damage, dodge_probability, resolve_hit, HitOutcome,
};
pub use events::{serialize_events_json, Side, TurnEvent};
pub use field::{
    create_field_card, tick_side_field, ChildSchedule, FieldCard, FieldTickOutcome, ScheduleState,
    TargetMode, TargetRef, TargetScope, Targeting, MAX_FIELD_SLOTS,
};
pub use ledger::{
    apply, effect_from_ability, tick, upsert, CardFlags, Context, EffectBucket, EffectMap,
    PersistentEffect,
};
pub use policy::{decide, Combo, EnemyAction, PolicyConfig, PolicyWeights};
pub use queue::{build_effect_queue, QueueEntry};
pub use resolver::{PreDamagePass, SideContexts, SidePass, MAX_NEGATION_REMOVALS};
pub use rng::{entropy_seed, Rng};
pub use state::{CardSnapshot, CardType, SideState, Stats, HAND_SIZE};
pub use turn::{
    resolve_turn, BattleOutcome, OnField, TurnAction, TurnError, TurnRequest, TurnResult,
    SKIP_SP_BONUS, SP_REGEN,
};
