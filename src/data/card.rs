//! Card catalog records: authored card data as written by the importer and
//! loaded at runtime. Runtime code converts records to engine snapshots,
//! normalizing abilities on the way in.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::state::CardSnapshot;

/// Authored card record (catalog schema). Abilities stay raw here; they are
/// normalized when the record becomes an engine snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
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
    pub types: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<Value>,
}

impl CardRecord {
    /// Convert to the engine's runtime snapshot shape. Unknown type strings
    /// survive as the catch-all card type rather than failing the load.
    pub fn to_snapshot(&self) -> CardSnapshot {
        CardSnapshot::from_authored(&serde_json::json!({
            "name": self.name,
            "rating": self.rating,
            "spCost": self.sp_cost,
            "potency": self.potency,
            "defense": self.defense,
            "types": self.types.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>(),
            "abilities": self.abilities,
        }))
    }
}

/// Index of all cards for id/name resolution. Includes data_version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIndex {
    #[serde(default)]
    pub data_version: Option<String>,
    #[serde(default)]
    pub source_note: Option<String>,
    pub cards: Vec<CardIndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIndexEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: u32,
}

pub const DEFAULT_CARDS_INDEX_PATH: &str = "data/cards/index.json";

/// Load the card index from data/cards/index.json. Returns None if missing.
pub fn load_card_index(path: &str) -> Option<CardIndex> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Load a single card record by id from data/cards/<id>.json.
pub fn load_card_record(data_dir: &Path, id: &str) -> Option<CardRecord> {
    let path = data_dir.join("cards").join(format!("{id}.json"));
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::CardType;

    #[test]
    fn record_to_snapshot_normalizes_types_and_abilities() {
        let record = CardRecord {
            id: "strike".to_string(),
            name: "Strike".to_string(),
            rating: 3,
            sp_cost: 2.0,
            potency: 5.0,
            defense: 1.0,
            types: vec!["Physical".to_string(), "Mystery".to_string()],
            abilities: vec![serde_json::json!({"type": "lucky", "power": 10, "duration": 2})],
        };

        let snapshot = record.to_snapshot();
        assert_eq!(snapshot.types, vec![CardType::Physical, CardType::Other]);
        assert_eq!(snapshot.abilities.len(), 1);
        assert_eq!(snapshot.abilities[0].key, "lucky_1");
    }
}
