//! Structural validation of the catalog: duplicate ids, unresolvable deck
//! references, abilities that normalize to no-ops. Used by the `validate`
//! CLI command before shipping catalog changes.

use std::collections::HashSet;
use std::fmt;

use crate::data::card::load_card_record;
use crate::data::registry::DataRegistry;
use crate::engine::ability::{normalize_card_abilities, AbilityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate the loaded catalog. An absent catalog is an info diagnostic, not
/// an error; a broken one is.
pub fn validate_catalog(registry: &DataRegistry) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(card_index) = registry.card_index.as_ref() else {
        report.push(ValidationSeverity::Info, "cards", "no card index present");
        return report;
    };

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for entry in &card_index.cards {
        if !seen_ids.insert(entry.id.as_str()) {
            report.push(
                ValidationSeverity::Error,
                format!("cards/{}", entry.id),
                "duplicate card id",
            );
        }
        let Some(record) = load_card_record(&registry.data_dir, &entry.id) else {
            report.push(
                ValidationSeverity::Error,
                format!("cards/{}", entry.id),
                "indexed card record missing or unreadable",
            );
            continue;
        };
        if record.sp_cost < 0.0 {
            report.push(
                ValidationSeverity::Error,
                format!("cards/{}", entry.id),
                "negative spCost",
            );
        }
        let abilities = normalize_card_abilities(&record.abilities);
        for (raw, ability) in record.abilities.iter().zip(&abilities) {
            if ability.kind == AbilityKind::None {
                let type_name = raw
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("<missing>");
                report.push(
                    ValidationSeverity::Warning,
                    format!("cards/{}/{}", entry.id, ability.key),
                    format!("ability type {type_name:?} normalizes to a no-op"),
                );
            }
        }
    }

    if let Some(enemy_index) = registry.enemy_index.as_ref() {
        let mut seen_enemy_ids: HashSet<&str> = HashSet::new();
        for entry in &enemy_index.enemies {
            if !seen_enemy_ids.insert(entry.id.as_str()) {
                report.push(
                    ValidationSeverity::Error,
                    format!("enemies/{}", entry.id),
                    "duplicate enemy id",
                );
            }
            let Some(enemy) = registry.resolve_enemy(&entry.id) else {
                report.push(
                    ValidationSeverity::Error,
                    format!("enemies/{}", entry.id),
                    "indexed enemy record missing or unreadable",
                );
                continue;
            };
            for card_id in &enemy.deck {
                if registry.resolve_card(card_id).is_none() {
                    report.push(
                        ValidationSeverity::Error,
                        format!("enemies/{}", entry.id),
                        format!("deck references unknown card {card_id:?}"),
                    );
                }
            }
        }
    } else {
        report.push(ValidationSeverity::Info, "enemies", "no enemy index present");
    }

    report
}
