use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use netdecker::{CardDatabase, CardfileError, Format, OcrResponse, vision};
use tracing::debug;

/// Read and decode a recorded Vision response with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or is not a Vision response.
pub fn load_ocr(file: &Path) -> Result<OcrResponse, i32> {
    let json = read_file(file)?;
    vision::parse_response(&json).map_err(|e| {
        eprintln!("Error: failed to read OCR response: {e}");
        1
    })
}

/// Load a Scryfall card file.
pub fn load_cards(file: &Path) -> Result<CardDatabase, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    CardDatabase::open(file).map_err(|e| {
        eprintln!("Error: failed to load card file: {e}");
        1
    })
}

/// Restore aliases saved by an earlier run. A missing file is a fresh start.
pub fn load_aliases(db: &CardDatabase, file: &Path) -> Result<(), i32> {
    if !file.exists() {
        debug!(path = %file.display(), "no alias file yet");
        return Ok(());
    }

    File::open(file)
        .map_err(CardfileError::from)
        .and_then(|f| db.load_aliases(BufReader::new(f)))
        .map(|_| ())
        .map_err(|e| {
            eprintln!("Error: failed to load aliases: {e}");
            1
        })
}

/// Write every learned alias to `file`, replacing its previous contents.
pub fn save_aliases(db: &CardDatabase, file: &Path) -> Result<(), i32> {
    File::create(file)
        .map_err(CardfileError::from)
        .and_then(|f| {
            let mut writer = BufWriter::new(f);
            db.save_aliases(&mut writer)?;
            writer.flush()?;
            Ok(())
        })
        .map_err(|e| {
            eprintln!("Error: failed to save aliases to {}: {e}", file.display());
            1
        })
}

/// Validate a user-supplied format name.
pub fn parse_format(name: &str) -> Result<Format, i32> {
    name.parse().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

fn read_file(file: &Path) -> Result<String, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
