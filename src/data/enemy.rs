//! Enemy catalog records: stats, deck card references and the decision
//! policy for one AI opponent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::policy::PolicyConfig;
use crate::engine::state::Stats;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyRecord {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    /// Card ids or names, resolved against the card catalog.
    #[serde(default)]
    pub deck: Vec<String>,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Index of all enemies for id/name resolution. Includes data_version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyIndex {
    #[serde(default)]
    pub data_version: Option<String>,
    #[serde(default)]
    pub source_note: Option<String>,
    pub enemies: Vec<EnemyIndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyIndexEntry {
    pub id: String,
    pub name: String,
}

pub const DEFAULT_ENEMIES_INDEX_PATH: &str = "data/enemies/index.json";

/// Load the enemy index from data/enemies/index.json. Returns None if missing.
pub fn load_enemy_index(path: &str) -> Option<EnemyIndex> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Load a single enemy record by id from data/enemies/<id>.json.
pub fn load_enemy_record(data_dir: &Path, id: &str) -> Option<EnemyRecord> {
    let path = data_dir.join("enemies").join(format!("{id}.json"));
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}
