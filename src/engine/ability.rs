//! Ability normalization: canonicalizes loosely-shaped authored ability data
//! (legacy field names, numeric link indices, missing fields) into a fixed
//! internal shape. The resolution engine only ever sees the canonical form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stat attributes a Stats Up / Stats Down ability can mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    AttackPower,
    PhysicalPower,
    SupernaturalPower,
    Durability,
    Vitality,
    Intelligence,
    Speed,
}

impl StatKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "attackpower" | "attack" => Some(Self::AttackPower),
            "physicalpower" | "physical" => Some(Self::PhysicalPower),
            "supernaturalpower" | "supernatural" => Some(Self::SupernaturalPower),
            "durability" | "defense" => Some(Self::Durability),
            "vitality" => Some(Self::Vitality),
            "intelligence" => Some(Self::Intelligence),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AttackPower => "attackPower",
            Self::PhysicalPower => "physicalPower",
            Self::SupernaturalPower => "supernaturalPower",
            Self::Durability => "durability",
            Self::Vitality => "vitality",
            Self::Intelligence => "intelligence",
            Self::Speed => "speed",
        }
    }
}

/// Which overall turns of a multi-hit window bypass defender durability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum DurabilityWindow {
    /// Every hit in the window bypasses. Authored default (`{auto: true}`).
    Auto,
    /// Only the listed overall turns bypass.
    Turns { turns: Vec<u32> },
}

/// Canonical ability kind. Unrecognized authored types normalize to [AbilityKind::None],
/// which the queue builder filters out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum AbilityKind {
    StatsUp { stat: StatKey },
    StatsDown { stat: StatKey },
    Freeze,
    Lucky,
    Unluck,
    Curse,
    Guard,
    AbilityShield,
    Revive,
    AbilityNegation,
    InstantDeath,
    DurabilityNegation { window: DurabilityWindow },
    None,
}

impl AbilityKind {
    /// Kinds adopted into the persistent effect ledger on success.
    pub fn is_persistent(&self) -> bool {
        matches!(
            self,
            Self::StatsUp { .. }
                | Self::StatsDown { .. }
                | Self::Freeze
                | Self::Lucky
                | Self::Unluck
                | Self::Curse
                | Self::Guard
                | Self::AbilityShield
                | Self::Revive
        )
    }

    /// Kinds that act on the opposing side, and are therefore subject to the
    /// opponent's Ability Shield.
    pub fn targets_opponent(&self) -> bool {
        matches!(
            self,
            Self::StatsDown { .. }
                | Self::Freeze
                | Self::Unluck
                | Self::Curse
                | Self::AbilityNegation
                | Self::InstantDeath
                | Self::DurabilityNegation { .. }
        )
    }

    /// Ledger key: `type` or `type:stat` for stat effects. At most one ledger
    /// entry per key per side.
    pub fn effect_key(&self) -> String {
        match self {
            Self::StatsUp { stat } => format!("StatsUp:{}", stat.as_str()),
            Self::StatsDown { stat } => format!("StatsDown:{}", stat.as_str()),
            Self::Freeze => "Freeze".to_string(),
            Self::Lucky => "Lucky".to_string(),
            Self::Unluck => "Unluck".to_string(),
            Self::Curse => "Curse".to_string(),
            Self::Guard => "Guard".to_string(),
            Self::AbilityShield => "AbilityShield".to_string(),
            Self::Revive => "Revive".to_string(),
            Self::AbilityNegation => "AbilityNegation".to_string(),
            Self::InstantDeath => "InstantDeath".to_string(),
            Self::DurabilityNegation { .. } => "DurabilityNegation".to_string(),
            Self::None => "None".to_string(),
        }
    }
}

/// Dependency reference, resolved at normalization time. Legacy numeric
/// indices are mapped onto sibling keys here and never reach the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "key")]
pub enum LinkRef {
    /// The owning card's attack hit. Abilities linked here defer to the
    /// on-hit step.
    Attack,
    /// A sibling ability key on the same card.
    Key(String),
}

/// Firing schedule for a multi-hit child ability, in overall-turn numbers
/// (1 = the initial play, >=2 = field ticks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum HitSchedule {
    List { turns: Vec<u32> },
    /// Sample `times` distinct turns from the remaining window, without
    /// replacement.
    Random { times: u32 },
}

/// What a field card does when its target disappears mid-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetMode {
    /// Keep the original target; drop the field card if it is gone.
    Locked,
    /// Pick a fresh opposing target when the current one is gone.
    RetargetRandom,
    /// Surface a retarget prompt and hold until the caller chooses.
    RetargetChoose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetScope {
    Character,
    Field,
}

/// Targeting policy a multi-hit ability carries onto its field card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Targeting {
    pub mode: TargetMode,
    pub scope: TargetScope,
}

impl Default for Targeting {
    fn default() -> Self {
        Self {
            mode: TargetMode::Locked,
            scope: TargetScope::Character,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiHit {
    /// Total overall turns the hit repeats for, counting the initial play.
    pub turns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<HitSchedule>,
    #[serde(default)]
    pub targeting: Targeting,
}

/// Canonical ability. Immutable once normalized; owned by the card snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    #[serde(flatten)]
    pub kind: AbilityKind,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub power: f64,
    pub duration: u32,
    pub activation_chance: f64,
    pub precedence: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_to: Vec<LinkRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_hit: Option<MultiHit>,
}

impl Ability {
    pub fn is_attack_linked(&self) -> bool {
        self.linked_to.iter().any(|l| matches!(l, LinkRef::Attack))
    }

    /// Sibling keys this ability depends on (the attack sentinel excluded).
    pub fn parent_keys(&self) -> impl Iterator<Item = &str> {
        self.linked_to.iter().filter_map(|l| match l {
            LinkRef::Key(key) => Some(key.as_str()),
            LinkRef::Attack => None,
        })
    }
}

fn str_field<'v>(raw: &'v Value, names: &[&str]) -> Option<&'v str> {
    names.iter().find_map(|n| raw.get(*n).and_then(Value::as_str))
}

/// Read a numeric field defensively: numbers pass through, numeric strings
/// parse, everything else falls back to `default`.
fn num_field(raw: &Value, names: &[&str], default: f64) -> f64 {
    for name in names {
        match raw.get(*name) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return parsed;
                }
            }
            _ => {}
        }
    }
    default
}

fn parse_kind(type_name: &str, raw: &Value) -> AbilityKind {
    let folded: String = type_name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_lowercase();
    let stat = || {
        str_field(raw, &["target", "stat", "targetStat"])
            .and_then(StatKey::parse)
            .unwrap_or(StatKey::AttackPower)
    };
    match folded.as_str() {
        "statsup" | "buff" => AbilityKind::StatsUp { stat: stat() },
        "statsdown" | "debuff" => AbilityKind::StatsDown { stat: stat() },
        "freeze" => AbilityKind::Freeze,
        "lucky" => AbilityKind::Lucky,
        "unluck" | "unlucky" => AbilityKind::Unluck,
        "curse" => AbilityKind::Curse,
        "guard" => AbilityKind::Guard,
        "abilityshield" | "shield" => AbilityKind::AbilityShield,
        "revive" => AbilityKind::Revive,
        "abilitynegation" | "negation" => AbilityKind::AbilityNegation,
        "instantdeath" => AbilityKind::InstantDeath,
        "durabilitynegation" => AbilityKind::DurabilityNegation {
            window: parse_durability_window(raw.get("durabilityNegation")),
        },
        _ => AbilityKind::None,
    }
}

fn parse_durability_window(raw: Option<&Value>) -> DurabilityWindow {
    let Some(raw) = raw else {
        return DurabilityWindow::Auto;
    };
    if let Some(turns) = raw.get("turns").and_then(Value::as_array) {
        let turns: Vec<u32> = turns
            .iter()
            .filter_map(Value::as_u64)
            .map(|t| t as u32)
            .collect();
        if !turns.is_empty() {
            return DurabilityWindow::Turns { turns };
        }
    }
    DurabilityWindow::Auto
}

/// Parse an authored targeting block. Unrecognized or missing modes and
/// scopes fall back to the locked-character default.
fn parse_targeting(raw: Option<&Value>) -> Targeting {
    let Some(raw) = raw else {
        return Targeting::default();
    };
    let fold = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase()
    };
    let mode = match str_field(raw, &["mode"]).map(fold).as_deref() {
        Some("retargetrandom") | Some("random") => TargetMode::RetargetRandom,
        Some("retargetchoose") | Some("choose") => TargetMode::RetargetChoose,
        _ => TargetMode::Locked,
    };
    let scope = match str_field(raw, &["scope"]).map(fold).as_deref() {
        Some("field") => TargetScope::Field,
        _ => TargetScope::Character,
    };
    Targeting { mode, scope }
}

fn parse_multi_hit(ability_raw: &Value) -> Option<MultiHit> {
    let raw = ability_raw
        .get("multiHit")
        .or_else(|| ability_raw.get("multi_hit"))?;
    let turns = num_field(raw, &["turns"], 0.0).max(0.0) as u32;
    let schedule = raw.get("schedule").and_then(|sched| {
        match sched.get("type").and_then(Value::as_str) {
            Some("list") => {
                let turns: Vec<u32> = sched
                    .get("turns")
                    .and_then(Value::as_array)
                    .map(|a| a.iter().filter_map(Value::as_u64).map(|t| t as u32).collect())
                    .unwrap_or_default();
                Some(HitSchedule::List { turns })
            }
            Some("random") => {
                let times = num_field(sched, &["times"], 0.0).max(0.0) as u32;
                Some(HitSchedule::Random { times })
            }
            _ => None,
        }
    });
    if turns == 0 && schedule.is_none() {
        return None;
    }
    // Targeting may sit inside the multiHit block or on the ability itself.
    let targeting = parse_targeting(raw.get("targeting").or_else(|| ability_raw.get("targeting")));
    Some(MultiHit {
        turns,
        schedule,
        targeting,
    })
}

/// Collect the raw `linkedTo` field before key resolution: an array of keys,
/// a single key string, or a legacy positional index.
enum RawLink {
    Keys(Vec<String>),
    Index(usize),
    None,
}

fn parse_raw_link(raw: &Value) -> RawLink {
    match raw.get("linkedTo").or_else(|| raw.get("linked_to")) {
        Some(Value::Array(items)) => RawLink::Keys(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Some(Value::String(s)) => RawLink::Keys(vec![s.clone()]),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(idx) => RawLink::Index(idx as usize),
            None => RawLink::None,
        },
        _ => RawLink::None,
    }
}

/// Normalize one card's raw authored ability list into canonical abilities.
///
/// Key synthesis (`{type}_{index+1}`, spaces stripped) and legacy numeric
/// `linkedTo` resolution both need the full sibling list, so normalization is
/// per-card rather than per-ability. An out-of-range numeric index resolves
/// to no link at all.
pub fn normalize_card_abilities(raw_abilities: &[Value]) -> Vec<Ability> {
    let mut abilities: Vec<Ability> = Vec::with_capacity(raw_abilities.len());
    let mut raw_links: Vec<RawLink> = Vec::with_capacity(raw_abilities.len());

    for (index, raw) in raw_abilities.iter().enumerate() {
        let type_name = str_field(raw, &["type", "name", "abilityType"])
            .unwrap_or("None")
            .to_string();
        let kind = parse_kind(&type_name, raw);
        let key = match str_field(raw, &["key"]) {
            Some(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => format!(
                "{}_{}",
                type_name.replace(char::is_whitespace, ""),
                index + 1
            ),
        };
        abilities.push(Ability {
            kind,
            key,
            desc: str_field(raw, &["desc", "description"]).map(str::to_string),
            power: num_field(raw, &["power"], 0.0),
            duration: num_field(raw, &["duration"], 0.0).max(0.0) as u32,
            activation_chance: num_field(raw, &["activationChance", "chance"], 100.0)
                .clamp(0.0, 100.0),
            precedence: num_field(raw, &["precedence", "priority"], 0.0) as i32,
            linked_to: Vec::new(),
            multi_hit: parse_multi_hit(raw),
        });
        raw_links.push(parse_raw_link(raw));
    }

    let keys: Vec<String> = abilities.iter().map(|a| a.key.clone()).collect();
    for (index, link) in raw_links.into_iter().enumerate() {
        let resolved = match link {
            RawLink::Keys(names) => names
                .into_iter()
                .map(|name| {
                    if name.eq_ignore_ascii_case("attack") {
                        LinkRef::Attack
                    } else {
                        LinkRef::Key(name)
                    }
                })
                .collect(),
            RawLink::Index(target) => {
                if target < keys.len() && target != index {
                    vec![LinkRef::Key(keys[target].clone())]
                } else {
                    Vec::new()
                }
            }
            RawLink::None => Vec::new(),
        };
        abilities[index].linked_to = resolved;
    }

    abilities
}
