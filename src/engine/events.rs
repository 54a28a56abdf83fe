//! Structured resolution events. Collected during a turn and returned on the
//! result instead of being accumulated in process-wide diagnostic state.

use serde::{Deserialize, Serialize};

/// Which side of the battle an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum TurnEvent {
    AbilityActivated {
        side: Side,
        card: String,
        key: String,
        chance: f64,
    },
    AbilityFailed {
        side: Side,
        card: String,
        key: String,
        chance: f64,
    },
    AbilityBlocked {
        side: Side,
        card: String,
        key: String,
        shield_precedence: i32,
    },
    AbilityNegated {
        side: Side,
        key: String,
        precedence: i32,
    },
    EffectRemoved {
        side: Side,
        key: String,
        precedence: i32,
    },
    DamageDealt {
        side: Side,
        card: String,
        amount: f64,
    },
    AttackDodged {
        side: Side,
        card: String,
    },
    AttackGuarded {
        side: Side,
        card: String,
    },
    FieldHit {
        side: Side,
        card: String,
        overall_turn: u32,
        amount: f64,
    },
    FieldChildFired {
        side: Side,
        card: String,
        key: String,
        overall_turn: u32,
    },
    FieldExpired {
        side: Side,
        card: String,
    },
    RetargetPrompt {
        side: Side,
        instance_id: String,
    },
    InstantDeath {
        side: Side,
        card: String,
    },
    Revived {
        side: Side,
        restored_hp: f64,
    },
    Frozen {
        side: Side,
        remaining: u32,
    },
    ActionRejected {
        side: Side,
        reason: String,
    },
    /// A resolution invariant was violated and clamped (e.g. field damage
    /// that would have raised HP). Logged, never propagated.
    InvariantClamped {
        side: Side,
        detail: String,
    },
}

/// Serialize events for API payloads and logs.
pub fn serialize_events_json(events: &[TurnEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_camel_case_tags() {
        let events = vec![
            TurnEvent::DamageDealt {
                side: Side::Player,
                card: "Strike".to_string(),
                amount: 114.0,
            },
            TurnEvent::Frozen {
                side: Side::Enemy,
                remaining: 2,
            },
        ];
        let json = serialize_events_json(&events).expect("events serialize");
        assert!(json.contains("\"event\":\"damageDealt\""));
        assert!(json.contains("\"side\":\"player\""));
        assert!(json.contains("\"event\":\"frozen\""));
    }
}
