//! Shared fixtures for CLI integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const CARDS: &str = r#"[
    {"name": "Island", "legalities": {"historic": "legal", "standard": "legal"}},
    {"name": "Opt", "legalities": {"historic": "legal"}},
    {"name": "Negate", "legalities": {"historic": "legal"}},
    {"name": "Yorion, Sky Nomad", "legalities": {"historic": "legal"},
     "keywords": ["Companion"]}
]"#;

/// Maindeck column then sideboard column, in Vision reading order.
pub const WORDS: &[(&str, i32, i32, i32, i32)] = &[
    ("Yorion,", 10, 10, 60, 24),
    ("Sky", 64, 10, 84, 24),
    ("Nomad", 88, 10, 130, 24),
    ("Island", 10, 30, 60, 44),
    ("x20", 20, 46, 40, 56),
    ("Opt", 10, 60, 40, 74),
    ("x4", 20, 76, 34, 86),
    ("Sideboard", 400, 10, 480, 24),
    ("Yorion,", 410, 30, 460, 44),
    ("Sky", 464, 30, 484, 44),
    ("Nomad", 488, 30, 530, 44),
    ("Negate", 410, 50, 460, 64),
    ("Negate", 410, 70, 460, 84),
];

pub fn vision_json(words: &[(&str, i32, i32, i32, i32)]) -> String {
    let full_text: Vec<&str> = words.iter().map(|w| w.0).collect();
    let mut annotations = vec![serde_json::json!({ "description": full_text.join("\n") })];
    for &(text, x0, y0, x1, y1) in words {
        annotations.push(serde_json::json!({
            "description": text,
            "boundingPoly": { "vertices": [
                { "x": x0, "y": y0 }, { "x": x1, "y": y0 },
                { "x": x1, "y": y1 }, { "x": x0, "y": y1 },
            ]},
        }));
    }
    serde_json::json!({ "responses": [{ "textAnnotations": annotations }] }).to_string()
}

pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
