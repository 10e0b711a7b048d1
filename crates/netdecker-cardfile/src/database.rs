//! In-memory card database.
//!
//! [`CardDatabase`] holds every card name with its format legality and
//! companion flag, plus an alias table mapping OCR spellings to canonical
//! names. The alias table sits behind a [`RwLock`] so one database can serve
//! concurrent parse requests while they record newly learned aliases.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use netdecker_core::{CardReference, Format};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CardfileError;

/// Separator Scryfall uses between the faces of a double-faced card.
const FACE_SEPARATOR: &str = " // ";

/// Keyword marking a card that can be a companion.
const COMPANION_KEYWORD: &str = "Companion";

/// A card known to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Canonical name. For double-faced cards, the front face only.
    pub name: String,
    /// Formats the card is legal in.
    pub formats: Vec<Format>,
    /// Whether the card can be a companion.
    pub companion: bool,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, formats: impl IntoIterator<Item = Format>) -> Self {
        Self {
            name: name.into(),
            formats: formats.into_iter().collect(),
            companion: false,
        }
    }

    pub fn with_companion(mut self, companion: bool) -> Self {
        self.companion = companion;
        self
    }

    /// Returns `true` if the card is legal in `format`.
    pub fn is_legal(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }
}

/// One entry of a Scryfall oracle-cards bulk file. Unused fields are ignored.
#[derive(Debug, Deserialize)]
struct ScryfallCard {
    name: String,
    #[serde(default)]
    legalities: HashMap<String, String>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl ScryfallCard {
    fn into_record(self) -> CardRecord {
        let formats = Format::ALL.into_iter().filter(|format| {
            matches!(
                self.legalities.get(format.as_str()).map(String::as_str),
                Some("legal" | "restricted")
            )
        });
        let name = match self.name.split_once(FACE_SEPARATOR) {
            Some((front, _)) => front.to_string(),
            None => self.name.clone(),
        };
        let companion = self.keywords.iter().any(|k| k == COMPANION_KEYWORD);
        CardRecord::new(name, formats).with_companion(companion)
    }
}

/// One line of an alias file: an OCR spelling and the card it resolves to.
#[derive(Debug, Serialize, Deserialize)]
struct AliasRecord {
    alias: String,
    name: String,
}

#[derive(Debug, Clone)]
struct AliasEntry {
    alias: String,
    lowered: String,
    name: String,
    learned: bool,
}

#[derive(Debug, Default)]
struct AliasTable {
    entries: Vec<AliasEntry>,
    // Exact alias strings already in `entries`.
    known: HashSet<String>,
}

impl AliasTable {
    /// Insert unless `alias` is already present. Returns `true` if inserted.
    fn insert(&mut self, alias: &str, name: &str, learned: bool) -> bool {
        if !self.known.insert(alias.to_string()) {
            return false;
        }
        self.entries.push(AliasEntry {
            alias: alias.to_string(),
            lowered: alias.to_lowercase(),
            name: name.to_string(),
            learned,
        });
        true
    }
}

/// Card names, legality and aliases held in memory.
///
/// # Usage
///
/// ```ignore
/// let db = CardDatabase::open("oracle-cards.json")?;
/// let deck = netdecker_core::parse_textboxes(&lines, &db, Format::Historic);
/// ```
#[derive(Debug, Default)]
pub struct CardDatabase {
    cards: Vec<CardRecord>,
    by_name: HashMap<String, usize>,
    aliases: RwLock<AliasTable>,
}

impl CardDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a Scryfall oracle-cards bulk file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CardfileError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load Scryfall oracle-cards JSON from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CardfileError> {
        let cards: Vec<ScryfallCard> = serde_json::from_reader(reader)?;
        Self::from_scryfall_cards(cards)
    }

    /// Load Scryfall oracle-cards JSON from a string.
    pub fn from_scryfall_json(json: &str) -> Result<Self, CardfileError> {
        let cards: Vec<ScryfallCard> = serde_json::from_str(json)?;
        Self::from_scryfall_cards(cards)
    }

    fn from_scryfall_cards(cards: Vec<ScryfallCard>) -> Result<Self, CardfileError> {
        let total = cards.len();
        let mut db = Self::new();
        for card in cards {
            let record = card.into_record();
            if !record.formats.is_empty() {
                db.insert_card(record);
            }
        }

        if db.is_empty() {
            return Err(CardfileError::NoCards);
        }
        info!(total, kept = db.len(), "loaded card file");
        Ok(db)
    }

    /// Add a card and register its name as an alias of itself.
    ///
    /// A name seen before (e.g. a second printing of a front face) merges
    /// its legality and companion flag into the existing record.
    pub fn insert_card(&mut self, record: CardRecord) {
        if let Some(&index) = self.by_name.get(&record.name) {
            let existing = &mut self.cards[index];
            for format in record.formats {
                if !existing.formats.contains(&format) {
                    existing.formats.push(format);
                }
            }
            existing.companion |= record.companion;
            return;
        }

        self.aliases
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(&record.name, &record.name, false);
        self.by_name.insert(record.name.clone(), self.cards.len());
        self.cards.push(record);
    }

    /// Look up a card by its canonical name.
    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.by_name.get(name).map(|&index| &self.cards[index])
    }

    /// Number of distinct card names.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Aliases recorded through [`CardReference::add_alias`], as `(alias, name)`
    /// pairs in the order they were learned.
    pub fn learned_aliases(&self) -> Vec<(String, String)> {
        self.aliases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .filter(|entry| entry.learned)
            .map(|entry| (entry.alias.clone(), entry.name.clone()))
            .collect()
    }

    /// Restore aliases previously written by [`save_aliases`](Self::save_aliases).
    ///
    /// Aliases of unknown cards are skipped, and an alias already in the
    /// table keeps its existing mapping. Restored aliases count as learned,
    /// so saving again writes them back out. Returns the number inserted.
    pub fn load_aliases(&self, reader: impl Read) -> Result<usize, CardfileError> {
        let records: Vec<AliasRecord> = serde_json::from_reader(reader)?;
        let mut aliases = self.aliases.write().unwrap_or_else(PoisonError::into_inner);
        let mut inserted = 0;
        for record in &records {
            if self.get(&record.name).is_none() {
                warn!(alias = %record.alias, card = %record.name, "skipping alias of unknown card");
                continue;
            }
            if aliases.insert(&record.alias, &record.name, true) {
                inserted += 1;
            }
        }
        info!(total = records.len(), inserted, "loaded aliases");
        Ok(inserted)
    }

    /// Write every learned alias as a JSON array of `{"alias", "name"}` objects.
    pub fn save_aliases(&self, mut writer: impl Write) -> Result<(), CardfileError> {
        let records: Vec<AliasRecord> = self
            .learned_aliases()
            .into_iter()
            .map(|(alias, name)| AliasRecord { alias, name })
            .collect();
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writeln!(writer)?;
        Ok(())
    }

    fn is_legal(&self, name: &str, format: Format) -> bool {
        self.get(name).is_some_and(|card| card.is_legal(format))
    }
}

impl CardReference for CardDatabase {
    fn name_from_alias(&self, alias: &str, format: Format, truncated: bool) -> Option<String> {
        let needle = alias.to_lowercase();
        let aliases = self.aliases.read().unwrap_or_else(PoisonError::into_inner);
        aliases
            .entries
            .iter()
            .filter(|entry| {
                if truncated {
                    entry.lowered.starts_with(&needle)
                } else {
                    entry.lowered == needle
                }
            })
            .find(|entry| self.is_legal(&entry.name, format))
            .map(|entry| entry.name.clone())
    }

    fn names_in_range(&self, min_len: usize, max_len: usize, format: Format) -> Vec<String> {
        self.cards
            .iter()
            .filter(|card| card.is_legal(format))
            .filter(|card| (min_len..=max_len).contains(&card.name.chars().count()))
            .map(|card| card.name.clone())
            .collect()
    }

    fn is_companion(&self, name: &str) -> bool {
        self.get(name).is_some_and(|card| card.companion)
    }

    fn add_alias(&self, alias: &str, name: &str) {
        let inserted = self
            .aliases
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(alias, name, true);
        if inserted {
            debug!(alias, card = name, "recorded alias");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORACLE_CARDS: &str = r#"[
        {
            "name": "Island",
            "legalities": {"standard": "legal", "historic": "legal", "modern": "legal",
                           "legacy": "legal", "vintage": "legal", "pauper": "legal",
                           "pioneer": "legal"},
            "keywords": []
        },
        {
            "name": "Lurrus of the Dream-Den",
            "legalities": {"standard": "not_legal", "historic": "legal", "modern": "legal",
                           "legacy": "banned", "vintage": "restricted"},
            "keywords": ["Companion", "Lifelink"]
        },
        {
            "name": "Bonecrusher Giant // Stomp",
            "legalities": {"historic": "legal", "pioneer": "legal", "modern": "legal"},
            "keywords": []
        },
        {
            "name": "Black Lotus",
            "legalities": {"legacy": "banned", "vintage": "restricted"}
        },
        {
            "name": "Chaos Orb",
            "legalities": {"legacy": "banned", "vintage": "banned"}
        }
    ]"#;

    fn db() -> CardDatabase {
        CardDatabase::from_scryfall_json(ORACLE_CARDS).unwrap()
    }

    #[test]
    fn loads_front_faces_only() {
        let db = db();
        assert!(db.get("Bonecrusher Giant").is_some());
        assert!(db.get("Bonecrusher Giant // Stomp").is_none());
    }

    #[test]
    fn legal_and_restricted_count_as_legal() {
        let db = db();
        let lurrus = db.get("Lurrus of the Dream-Den").unwrap();
        assert!(lurrus.is_legal(Format::Historic));
        assert!(lurrus.is_legal(Format::Vintage));
        assert!(!lurrus.is_legal(Format::Standard));
        assert!(!lurrus.is_legal(Format::Legacy));
        assert!(db.get("Black Lotus").unwrap().is_legal(Format::Vintage));
    }

    #[test]
    fn skips_cards_legal_nowhere() {
        let db = db();
        assert!(db.get("Chaos Orb").is_none());
        assert_eq!(db.len(), 4);
    }

    #[test]
    fn flags_companions() {
        let db = db();
        assert!(db.is_companion("Lurrus of the Dream-Den"));
        assert!(!db.is_companion("Island"));
        assert!(!db.is_companion("Unknown Card"));
    }

    #[test]
    fn empty_card_file_is_an_error() {
        let err = CardDatabase::from_scryfall_json("[]").unwrap_err();
        assert!(matches!(err, CardfileError::NoCards));
    }

    #[test]
    fn malformed_card_file_is_an_error() {
        let err = CardDatabase::from_scryfall_json(r#"[{"legalities": {}}]"#).unwrap_err();
        assert!(matches!(err, CardfileError::Json(_)));
    }

    #[test]
    fn duplicate_names_merge_legality() {
        let mut db = CardDatabase::new();
        db.insert_card(CardRecord::new("Fable of the Mirror-Breaker", [Format::Pioneer]));
        db.insert_card(CardRecord::new("Fable of the Mirror-Breaker", [Format::Modern]));
        assert_eq!(db.len(), 1);
        let card = db.get("Fable of the Mirror-Breaker").unwrap();
        assert_eq!(card.formats, vec![Format::Pioneer, Format::Modern]);
    }

    #[test]
    fn alias_lookup_is_case_insensitive() {
        let db = db();
        assert_eq!(
            db.name_from_alias("ISLAND", Format::Standard, false),
            Some("Island".to_string())
        );
        assert_eq!(db.name_from_alias("Islan", Format::Standard, false), None);
    }

    #[test]
    fn alias_lookup_respects_format() {
        let db = db();
        assert_eq!(
            db.name_from_alias("lurrus of the dream-den", Format::Standard, false),
            None
        );
        assert_eq!(
            db.name_from_alias("lurrus of the dream-den", Format::Modern, false),
            Some("Lurrus of the Dream-Den".to_string())
        );
    }

    #[test]
    fn truncated_alias_lookup_matches_prefix() {
        let db = db();
        assert_eq!(
            db.name_from_alias("Bonecrusher Gi", Format::Pioneer, true),
            Some("Bonecrusher Giant".to_string())
        );
        assert_eq!(db.name_from_alias("Bonecrusher Gi", Format::Pioneer, false), None);
    }

    #[test]
    fn names_in_range_filters_length_and_format() {
        let db = db();
        assert_eq!(db.names_in_range(5, 7, Format::Standard), vec!["Island"]);
        assert_eq!(
            db.names_in_range(6, 34, Format::Modern),
            vec!["Island", "Lurrus of the Dream-Den", "Bonecrusher Giant"]
        );
        assert!(db.names_in_range(6, 34, Format::Pauper).contains(&"Island".to_string()));
        assert!(db.names_in_range(30, 34, Format::Modern).is_empty());
    }

    #[test]
    fn add_alias_keeps_first_mapping() {
        let db = db();
        db.add_alias("Lsland", "Island");
        db.add_alias("Lsland", "Lurrus of the Dream-Den");
        db.add_alias("Island", "Lurrus of the Dream-Den");

        assert_eq!(
            db.name_from_alias("lsland", Format::Standard, false),
            Some("Island".to_string())
        );
        assert_eq!(
            db.name_from_alias("island", Format::Standard, false),
            Some("Island".to_string())
        );
        assert_eq!(
            db.learned_aliases(),
            vec![("Lsland".to_string(), "Island".to_string())]
        );
    }

    #[test]
    fn learned_alias_serves_truncated_lookup() {
        let db = db();
        db.add_alias("Bonecrusher Glan", "Bonecrusher Giant");
        assert_eq!(
            db.name_from_alias("bonecrusher gla", Format::Modern, true),
            Some("Bonecrusher Giant".to_string())
        );
    }

    #[test]
    fn aliases_survive_save_and_load() {
        let first = db();
        first.add_alias("Lsland", "Island");
        first.add_alias("Bonecrusher Glant", "Bonecrusher Giant");
        let mut saved = Vec::new();
        first.save_aliases(&mut saved).unwrap();

        let second = db();
        assert_eq!(second.load_aliases(saved.as_slice()).unwrap(), 2);
        assert_eq!(
            second.name_from_alias("lsland", Format::Standard, false),
            Some("Island".to_string())
        );
        assert_eq!(second.learned_aliases(), first.learned_aliases());
    }

    #[test]
    fn load_aliases_skips_unknown_and_existing() {
        let db = db();
        db.add_alias("Lsland", "Island");
        let json = r#"[
            {"alias": "Lsland", "name": "Bonecrusher Giant"},
            {"alias": "Island", "name": "Bonecrusher Giant"},
            {"alias": "Chaos 0rb", "name": "Chaos Orb"},
            {"alias": "Lurrus of the Dream-Dem", "name": "Lurrus of the Dream-Den"}
        ]"#;

        assert_eq!(db.load_aliases(json.as_bytes()).unwrap(), 1);
        assert_eq!(
            db.name_from_alias("lsland", Format::Standard, false),
            Some("Island".to_string())
        );
        assert_eq!(
            db.name_from_alias("island", Format::Modern, false),
            Some("Island".to_string())
        );
        assert_eq!(db.learned_aliases().len(), 2);
    }

    #[test]
    fn malformed_alias_file_is_an_error() {
        let db = db();
        let err = db.load_aliases("{\"Lsland\": \"Island\"}".as_bytes()).unwrap_err();
        assert!(matches!(err, CardfileError::Json(_)));
        assert!(db.learned_aliases().is_empty());
    }

    #[test]
    fn save_aliases_without_learning_writes_empty_array() {
        let db = db();
        let mut saved = Vec::new();
        db.save_aliases(&mut saved).unwrap();
        assert_eq!(String::from_utf8(saved).unwrap(), "[]\n");
    }

    #[test]
    fn concurrent_alias_inserts() {
        let db = db();
        std::thread::scope(|s| {
            for i in 0..8 {
                let db = &db;
                s.spawn(move || {
                    db.add_alias("Lsland", "Island");
                    db.add_alias(&format!("Isl4nd {i}"), "Island");
                    assert_eq!(
                        db.name_from_alias("lsland", Format::Standard, false),
                        Some("Island".to_string())
                    );
                });
            }
        });

        let learned = db.learned_aliases();
        assert_eq!(learned.len(), 9);
        assert_eq!(
            learned.iter().filter(|(alias, _)| alias == "Lsland").count(),
            1
        );
    }
}
