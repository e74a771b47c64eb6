//! Tolerant extraction of a JSON object embedded in free-form model output.
//!
//! Models are asked for bare JSON but routinely wrap it in markdown fences or
//! surround it with prose. The extractor strips fence markers, then takes the
//! first balanced `{ ... }` span found by brace counting and parses it.
//!
//! Brace counting does not look inside string literals: a value such as
//! `"{note}"` ahead of the real closing brace shifts the detected end of the
//! object. That gap is known and kept as is.

use crate::Error;
use log::*;
use serde_json::{Map, Value};

/// Fence markers removed before scanning. Longest first so that "```json"
/// is not left behind as "json" after stripping "```".
const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// Number of characters of the raw text included in failure logs.
const PREVIEW_CHARS: usize = 200;

/// Locate the first balanced top-level JSON object in `text` and parse it.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, Error> {
    extract(text).inspect_err(|e| {
        warn!(
            "Failed to extract JSON from model response ({e}): {:?}",
            preview(text)
        );
    })
}

fn extract(text: &str) -> Result<Map<String, Value>, Error> {
    let stripped = strip_fences(text);
    if stripped.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let start = stripped.find('{').ok_or(Error::NoJsonFound)?;
    let end = balanced_end(&stripped[start..]).ok_or(Error::UnbalancedBraces)?;
    let candidate = &stripped[start..start + end];

    serde_json::from_str::<Map<String, Value>>(candidate)
        .map_err(|e| Error::MalformedJson(e.to_string()))
}

fn strip_fences(text: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}

/// Byte length of the span starting at `text[0] == '{'` up to and including the
/// brace that brings the depth back to zero.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth: usize = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
