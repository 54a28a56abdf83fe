//! Card catalog importer: authored CSV rows in, normalized per-card JSON
//! plus index out. Columns: id, name, rating, spCost, potency, defense,
//! types (semicolon-separated), abilities (embedded JSON array).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::data::card::{CardIndex, CardIndexEntry, CardRecord};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug, Deserialize)]
struct CsvCardRow {
    id: String,
    name: String,
    #[serde(default)]
    rating: u32,
    #[serde(default, rename = "spCost")]
    sp_cost: f64,
    #[serde(default)]
    potency: f64,
    #[serde(default)]
    defense: f64,
    #[serde(default)]
    types: String,
    #[serde(default)]
    abilities: String,
}

/// Import a card CSV into `<data_dir>/cards/`. Returns the number of cards
/// written. Rows with unparsable ability JSON import with no abilities
/// rather than failing the batch.
pub fn import_cards_csv(csv_path: &Path, data_dir: &Path) -> Result<usize, ImportError> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let out_dir = data_dir.join("cards");
    fs::create_dir_all(&out_dir)?;

    let mut entries: Vec<CardIndexEntry> = Vec::new();
    for row in reader.deserialize() {
        let row: CsvCardRow = row?;
        let abilities: Vec<Value> = if row.abilities.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&row.abilities).unwrap_or_default()
        };
        let record = CardRecord {
            id: row.id.clone(),
            name: row.name.clone(),
            rating: row.rating,
            sp_cost: row.sp_cost,
            potency: row.potency,
            defense: row.defense,
            types: row
                .types
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            abilities,
        };
        let out_path = out_dir.join(format!("{}.json", record.id));
        fs::write(&out_path, serde_json::to_string_pretty(&record)?)?;
        entries.push(CardIndexEntry {
            id: record.id,
            name: record.name,
            rating: record.rating,
        });
    }

    let count = entries.len();
    let index = CardIndex {
        data_version: Some(chrono::Utc::now().format("%Y-%m-%d").to_string()),
        source_note: Some(format!("imported from {}", csv_path.display())),
        cards: entries,
    };
    fs::write(
        out_dir.join("index.json"),
        serde_json::to_string_pretty(&index)?,
    )?;
    Ok(count)
}
