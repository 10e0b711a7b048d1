use std::path::Path;

use netdecker::{LineAssembler, LineOptions, Textbox};

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, load_ocr};

pub fn run(file: &Path, output: &OutputFormat, y_tolerance: i32) -> Result<(), i32> {
    let response = load_ocr(file)?;
    if !response.success {
        eprintln!(
            "Error: OCR failed: {}",
            response.error_message.as_deref().unwrap_or_default()
        );
        return Err(1);
    }

    let opts = LineOptions { y_tolerance };
    let lines = LineAssembler::assemble(&response.words, &opts);

    match output {
        OutputFormat::Text => write_text(&lines),
        OutputFormat::Json => write_json(&lines),
        OutputFormat::Csv => write_csv(&lines),
    }
    Ok(())
}

fn write_text(lines: &[Textbox]) {
    println!("text\tx0\ty0\tx1\ty1");
    for line in lines {
        let bbox = &line.bounding_box;
        println!(
            "{}\t{}\t{}\t{}\t{}",
            line.text, bbox.upper_left.x, bbox.upper_left.y, bbox.lower_right.x, bbox.lower_right.y,
        );
    }
}

fn write_json(lines: &[Textbox]) {
    let all_lines: Vec<serde_json::Value> = lines
        .iter()
        .map(|line| {
            let bbox = &line.bounding_box;
            serde_json::json!({
                "text": line.text,
                "x0": bbox.upper_left.x,
                "y0": bbox.upper_left.y,
                "x1": bbox.lower_right.x,
                "y1": bbox.lower_right.y,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(all_lines));
}

fn write_csv(lines: &[Textbox]) {
    println!("text,x0,y0,x1,y1");
    for line in lines {
        let bbox = &line.bounding_box;
        println!(
            "{},{},{},{},{}",
            csv_escape(&line.text),
            bbox.upper_left.x,
            bbox.upper_left.y,
            bbox.lower_right.x,
            bbox.lower_right.y,
        );
    }
}
