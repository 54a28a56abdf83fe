//! Effect queue construction: flattens a side's played cards into a
//! precedence-ordered resolution queue. Ordering is an explicit contract:
//! stable sort by precedence descending, equal precedence preserves the
//! original card/ability order with no further tie-break.

use crate::engine::ability::{Ability, AbilityKind};
use crate::engine::state::CardSnapshot;

/// One resolvable ability, tied to the played card it came from.
/// `card_index` identifies the card instance within the played set for
/// dependency tracking and per-card flags.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub card_index: usize,
    pub card_name: String,
    pub ability: Ability,
}

/// Build the resolution queue for a set of played cards. No-op abilities and
/// abilities with a zero activation chance never enter the queue.
pub fn build_effect_queue(played: &[CardSnapshot]) -> Vec<QueueEntry> {
    let mut queue: Vec<QueueEntry> = Vec::new();
    for (card_index, card) in played.iter().enumerate() {
        for ability in &card.abilities {
            if ability.kind == AbilityKind::None || ability.activation_chance <= 0.0 {
                continue;
            }
            queue.push(QueueEntry {
                card_index,
                card_name: card.name.clone(),
                ability: ability.clone(),
            });
        }
    }
    // Stable: equal precedence keeps insertion order.
    queue.sort_by(|a, b| b.ability.precedence.cmp(&a.ability.precedence));
    queue
}
