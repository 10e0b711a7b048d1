//! Google Cloud Vision `images:annotate` response decoding.
//!
//! Accepts either a single `AnnotateImageResponse` or the batch
//! `{"responses": [...]}` wrapper returned by the REST endpoint; only the
//! first image of a batch is used. The first text annotation is the
//! full-page block and is skipped: every remaining annotation is one word.

use netdecker_core::{BoundingBox, Vertex, Word};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ocr::OcrResponse;

/// Key of the batch wrapper.
const BATCH_KEY: &str = "responses";

#[derive(Debug, Deserialize)]
struct BatchResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    bounding_poly: BoundingPoly,
}

#[derive(Debug, Default, Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<PolyVertex>,
}

// Vision omits zero coordinates.
#[derive(Debug, Default, Deserialize)]
struct PolyVertex {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
}

/// Decode a Vision response body into an [`OcrResponse`].
///
/// A response carrying a non-empty `error.message` decodes to an
/// unsuccessful [`OcrResponse`]. Malformed JSON is an [`Error::VisionDecode`].
pub fn parse_response(json: &str) -> Result<OcrResponse> {
    let value: Value = serde_json::from_str(json)?;
    let response = if value.get(BATCH_KEY).is_some() {
        let batch: BatchResponse = serde_json::from_value(value)?;
        batch.responses.into_iter().next().ok_or(Error::EmptyBatch)?
    } else {
        serde_json::from_value::<AnnotateImageResponse>(value)?
    };

    if let Some(status) = response.error.filter(|status| !status.message.is_empty()) {
        return Ok(OcrResponse::failure(status.message));
    }

    let words = response
        .text_annotations
        .into_iter()
        .skip(1)
        .filter_map(|annotation| {
            let vertices: Vec<Vertex> = annotation
                .bounding_poly
                .vertices
                .iter()
                .map(|v| Vertex::new(v.x, v.y))
                .collect();
            match BoundingBox::from_polygon(&vertices) {
                Some(bbox) => Some(Word::new(bbox, annotation.description)),
                None => {
                    debug!(
                        text = %annotation.description,
                        vertices = vertices.len(),
                        "skipping annotation without a four-point box"
                    );
                    None
                }
            }
        })
        .collect();

    Ok(OcrResponse::success(words))
}
