//! Import the card catalog from CSV (e.g. from the design spreadsheet).
//! Reads data/import/cards.csv, writes data/cards/*.json plus index.json.
//! CSV columns: id, name, rating, spCost, potency, defense, types
//! (semicolon-separated), abilities (embedded JSON array).

use std::path::Path;

use gauntlet::data::import::import_cards_csv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let input_path = Path::new(&manifest_dir).join("data/import/cards.csv");
    let data_dir = Path::new(&manifest_dir).join("data");

    if !input_path.exists() {
        return Err(format!(
            "{} not found. Create data/import/ and add cards.csv (columns: id, name, rating, spCost, potency, defense, types, abilities)",
            input_path.display()
        )
        .into());
    }

    let count = import_cards_csv(&input_path, &data_dir)?;
    println!(
        "Wrote {} cards to {}",
        count,
        data_dir.join("cards").display()
    );
    Ok(())
}
