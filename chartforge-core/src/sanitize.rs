//! Sanitization of model completions into executable code.
//!
//! Models tend to wrap code in markdown fences or lead with prose. These
//! filters are best-effort string matching, not a parser: a code line whose
//! content happens to start with a filtered phrase is dropped too.

use once_cell::sync::Lazy;
use regex::Regex;

/// Code-fence markers, with or without a language tag.
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:python)?").unwrap());

/// Known noise substrings emitted by data-download helpers.
const NOISE: &[&str] = &[
    "YF.download() has changed argument auto_adjust default to True",
    "[*********************100%***********************]  1 of 1 completed",
];

/// Leading phrases that mark a prose line rather than code.
const PREAMBLE_MARKERS: &[&str] = &["here is", "below is", "the code", "this code", "note:"];

/// Strip markdown code-fence markers anywhere in the text.
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}

/// Remove known noise substrings wherever they occur.
pub fn strip_noise(text: &str) -> String {
    let mut out = text.to_string();
    for noise in NOISE {
        out = out.replace(noise, "");
    }
    out
}

/// Drop blank lines and lines whose case-insensitive leading text matches a
/// preamble marker.
pub fn drop_preamble_lines(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            !line.trim().is_empty() && !PREAMBLE_MARKERS.iter().any(|m| lower.starts_with(m))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the full sanitization pass: fences, then noise, then preamble lines.
///
/// Idempotent: cleaning already-clean text yields the same text.
pub fn clean(raw: &str) -> String {
    drop_preamble_lines(&strip_noise(&strip_fences(raw)))
}
