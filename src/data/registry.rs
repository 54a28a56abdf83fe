//! Read-only registry of catalog data, loaded once and shared. Resolves
//! cards and enemies by id or display name with normalized lookup, and
//! builds engine-side state from enemy records. Missing data degrades to
//! empty listings, never an error.

use std::path::{Path, PathBuf};

use crate::data::card::{load_card_index, load_card_record, CardIndex, CardRecord};
use crate::data::enemy::{load_enemy_index, load_enemy_record, EnemyIndex, EnemyRecord};
use crate::engine::state::SideState;

/// Normalize a string for lookup: lowercase, collapse spaces/underscores.
pub fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug)]
pub struct DataRegistry {
    pub data_dir: PathBuf,
    pub card_index: Option<CardIndex>,
    pub enemy_index: Option<EnemyIndex>,
}

impl DataRegistry {
    /// Load indexes from the default data directory.
    pub fn load() -> Self {
        Self::load_from(Path::new("data"))
    }

    pub fn load_from(data_dir: &Path) -> Self {
        let card_index_path = data_dir.join("cards").join("index.json");
        let enemy_index_path = data_dir.join("enemies").join("index.json");
        Self {
            data_dir: data_dir.to_path_buf(),
            card_index: card_index_path
                .to_str()
                .and_then(load_card_index),
            enemy_index: enemy_index_path
                .to_str()
                .and_then(load_enemy_index),
        }
    }

    /// Resolve a card by id first, then by unique normalized name.
    pub fn resolve_card(&self, name_or_id: &str) -> Option<CardRecord> {
        let index = self.card_index.as_ref()?;
        let normalized = normalize_lookup(name_or_id);

        if let Some(entry) = index
            .cards
            .iter()
            .find(|e| normalize_lookup(&e.id) == normalized)
        {
            return load_card_record(&self.data_dir, &entry.id);
        }
        let by_name: Vec<_> = index
            .cards
            .iter()
            .filter(|e| normalize_lookup(&e.name) == normalized)
            .collect();
        if by_name.len() == 1 {
            return load_card_record(&self.data_dir, &by_name[0].id);
        }
        None
    }

    /// Resolve an enemy by id first, then by unique normalized name.
    pub fn resolve_enemy(&self, name_or_id: &str) -> Option<EnemyRecord> {
        let index = self.enemy_index.as_ref()?;
        let normalized = normalize_lookup(name_or_id);

        if let Some(entry) = index
            .enemies
            .iter()
            .find(|e| normalize_lookup(&e.id) == normalized)
        {
            return load_enemy_record(&self.data_dir, &entry.id);
        }
        let by_name: Vec<_> = index
            .enemies
            .iter()
            .filter(|e| normalize_lookup(&e.name) == normalized)
            .collect();
        if by_name.len() == 1 {
            return load_enemy_record(&self.data_dir, &by_name[0].id);
        }
        None
    }

    /// Build battle-ready side state from an enemy record: stats plus a deck
    /// of resolved card snapshots. Unresolvable deck references are skipped.
    pub fn enemy_side_state(&self, enemy: &EnemyRecord) -> SideState {
        let deck = enemy
            .deck
            .iter()
            .filter_map(|id| self.resolve_card(id))
            .map(|record| record.to_snapshot())
            .collect();
        SideState {
            stats: enemy.stats.clone(),
            hand: Vec::new(),
            deck,
            defending: false,
        }
    }
}
