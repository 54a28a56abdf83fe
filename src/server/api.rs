//! JSON payload builders for the HTTP surface. Each function loads what it
//! needs, builds a payload, and returns it as a string; routing and status
//! codes live in `routes.rs`.
//!
//! The turn endpoint is stateless: the caller supplies the complete prior
//! snapshot and must persist the returned one before issuing the next
//! request. Overlapping requests against the same save are the caller's
//! problem to serialize.

use std::fmt;

use serde::Serialize;

use crate::data::registry::DataRegistry;
use crate::engine::turn::{resolve_turn, TurnError, TurnRequest};

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "gauntlet-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct CardListItem {
    pub id: String,
    pub name: String,
    pub rating: u32,
}

pub fn cards_payload() -> Result<String, serde_json::Error> {
    let registry = DataRegistry::load();
    let list: Vec<CardListItem> = registry
        .card_index
        .map(|index| {
            index
                .cards
                .into_iter()
                .map(|e| CardListItem {
                    id: e.id,
                    name: e.name,
                    rating: e.rating,
                })
                .collect()
        })
        .unwrap_or_default();
    serde_json::to_string_pretty(&serde_json::json!({ "cards": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyListItem {
    pub id: String,
    pub name: String,
}

pub fn enemies_payload() -> Result<String, serde_json::Error> {
    let registry = DataRegistry::load();
    let list: Vec<EnemyListItem> = registry
        .enemy_index
        .map(|index| {
            index
                .enemies
                .into_iter()
                .map(|e| EnemyListItem {
                    id: e.id,
                    name: e.name,
                })
                .collect()
        })
        .unwrap_or_default();
    serde_json::to_string_pretty(&serde_json::json!({ "enemies": list }))
}

pub fn data_version_payload() -> Result<String, serde_json::Error> {
    let registry = DataRegistry::load();
    serde_json::to_string_pretty(&serde_json::json!({
        "cardVersion": registry.card_index.and_then(|i| i.data_version),
        "enemyVersion": registry.enemy_index.and_then(|i| i.data_version),
    }))
}

#[derive(Debug)]
pub enum TurnPayloadError {
    Parse(serde_json::Error),
    Rejected(String),
}

impl fmt::Display for TurnPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Rejected(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for TurnPayloadError {}

/// Resolve one turn from a request body and serialize the result.
pub fn turn_payload(body: &str) -> Result<String, TurnPayloadError> {
    let request: TurnRequest = serde_json::from_str(body).map_err(TurnPayloadError::Parse)?;
    let result = resolve_turn(request).map_err(|err| match err {
        TurnError::Parse(parse) => TurnPayloadError::Parse(parse),
        TurnError::Rejected(reason) => TurnPayloadError::Rejected(reason),
    })?;
    serde_json::to_string_pretty(&result).map_err(TurnPayloadError::Parse)
}
