// ============================================================
// Layer 4 — Sample Parser
// ============================================================
// Splits one raw annotated line into one marked sample per aspect
// occurrence. Two input grammars:
//
//   1. No explicit labels:
//        "ok [ASP]food[ASP] but rude [ASP]waiters[ASP]"
//      → "ok [ASP]food[ASP] but rude waiters"
//        "ok food but rude [ASP]waiters[ASP]"
//      One emitted sample per aspect. Each keeps exactly that
//      aspect's markers and strips every other marker pair.
//
//   2. Explicit per-aspect labels after !sent!:
//        "ok [ASP]food[ASP] but rude [ASP]waiters[ASP]!sent!positive,negative"
//      → "[PADDING] ok [ASP]food[ASP] but rude waiters [PADDING] !sent! positive"
//        "[PADDING] ok food but rude [ASP]waiters[ASP] [PADDING] !sent! negative"
//      The label count must equal the aspect count; on mismatch
//      the labels are dropped with a warning and the line degrades
//      to grammar 1 (guards kept). The [PADDING] guards protect
//      aspects at the sentence boundary from truncation loss and
//      are stripped again during assembly.
//
// A line with no aspect markers parses to zero samples. An odd
// marker count cannot be paired up and is a MalformedRecord error;
// the corpus driver decides whether that skips the line or aborts
// the batch.

use crate::domain::error::ParseError;
use crate::domain::sample::{ASPECT_MARKER, BOUNDARY_GUARD, LABEL_SEPARATOR};

/// Split one annotated line into per-aspect marked samples.
pub fn parse_sample(raw: &str) -> Result<Vec<String>, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    match raw.split_once(LABEL_SEPARATOR) {
        None => {
            let parts = split_markers(raw, raw)?;
            Ok(isolate_each(&parts, None))
        }
        Some((text, labels)) => {
            let labels: Vec<&str> = labels.split(',').map(str::trim).collect();
            let guarded = format!("{BOUNDARY_GUARD} {text} {BOUNDARY_GUARD}");
            let parts = split_markers(&guarded, raw)?;
            let aspects = parts.len() / 2;

            if aspects == labels.len() {
                Ok(isolate_each(&parts, Some(&labels)))
            } else {
                // Unequal counts: keep the aspects, drop the labels.
                tracing::warn!(
                    "{}",
                    ParseError::LabelCountMismatch {
                        aspects,
                        labels: labels.len(),
                        text:   raw.to_string(),
                    }
                );
                Ok(isolate_each(&parts, None))
            }
        }
    }
}

/// Split on [ASP]. A balanced line alternates plain text (even
/// indices) and aspect spans (odd indices), so a valid split has
/// odd length.
fn split_markers<'a>(text: &'a str, raw: &str) -> Result<Vec<&'a str>, ParseError> {
    let parts: Vec<&str> = text.split(ASPECT_MARKER).collect();
    if parts.len() % 2 == 0 {
        return Err(ParseError::MalformedRecord(raw.to_string()));
    }
    Ok(parts)
}

/// Emit one sample per aspect span: the target span keeps its
/// markers, every other span loses them. Reconstructing from the
/// split parts (rather than substring replacement) means repeated
/// aspect strings can never collide with each other.
fn isolate_each(parts: &[&str], labels: Option<&[&str]>) -> Vec<String> {
    let aspects = parts.len() / 2;
    let mut samples = Vec::with_capacity(aspects);

    for target in 0..aspects {
        let target_part = target * 2 + 1;
        let mut sample = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i == target_part {
                sample.push_str(ASPECT_MARKER);
                sample.push_str(part);
                sample.push_str(ASPECT_MARKER);
            } else {
                sample.push_str(part);
            }
        }
        if let Some(labels) = labels {
            sample.push_str(&format!(" {} {}", LABEL_SEPARATOR, labels[target]));
        }
        samples.push(sample);
    }

    samples
}
