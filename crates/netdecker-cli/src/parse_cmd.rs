use std::path::Path;

use netdecker::{CardTuple, Decklist, DecklistOptions, LineOptions, generate_decklist_with};
use tracing::info;

use crate::cli::DeckFormat;
use crate::shared::{load_aliases, load_cards, load_ocr, parse_format, save_aliases};

pub fn run(
    file: &Path,
    cards: &Path,
    format: &str,
    aliases: Option<&Path>,
    output: &DeckFormat,
    y_tolerance: i32,
) -> Result<(), i32> {
    let format = parse_format(format)?;
    let response = load_ocr(file)?;
    let db = load_cards(cards)?;
    if let Some(path) = aliases {
        load_aliases(&db, path)?;
    }

    let opts = DecklistOptions {
        lines: LineOptions { y_tolerance },
        ..DecklistOptions::default()
    };
    let deck = generate_decklist_with(&response, &db, format, &opts).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let learned = db.learned_aliases();
    if !learned.is_empty() {
        info!(count = learned.len(), "learned aliases during parse");
    }
    if let Some(path) = aliases {
        save_aliases(&db, path)?;
    }

    match output {
        DeckFormat::Text => print!("{}", deck.serialize()),
        DeckFormat::Json => println!("{}", deck_json(&deck)),
    }
    Ok(())
}

fn card_json(card: &CardTuple) -> serde_json::Value {
    serde_json::json!({
        "quantity": card.quantity,
        "name": card.name,
    })
}

fn deck_json(deck: &Decklist) -> serde_json::Value {
    serde_json::json!({
        "companion": deck.companion.as_ref().map(card_json),
        "maindeck": deck.maindeck.iter().map(card_json).collect::<Vec<_>>(),
        "sideboard": deck.sideboard.iter().map(card_json).collect::<Vec<_>>(),
    })
}
