// ============================================================
// Layer 3 — ParsedSample Domain Type
// ============================================================
// Represents a single annotated (sentence, aspect, label) triple.
// This is the core concept of aspect-based sentiment analysis:
//   - We have a sentence
//   - One span of it names an ASPECT (an entity or attribute)
//   - The sentiment label applies to that aspect, not the sentence
//
// A line of input text marks its aspects with paired [ASP] markers
// and may carry gold labels after a !sent! separator:
//
//   "The [ASP]battery[ASP] life is great.!sent!positive"
//
// The parser isolates one aspect per emitted sample; this type
// holds the result of splitting one such sample into its left
// context, aspect span, and right context.
//
// Invariant: text_left + aspect + text_right reconstructs the
// original unmarked sentence (after [PADDING] guards are removed).
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::error::ParseError;

/// The marker pair delimiting an aspect span inside a line.
pub const ASPECT_MARKER: &str = "[ASP]";

/// Separates the sentence text from its comma-separated gold labels.
pub const LABEL_SEPARATOR: &str = "!sent!";

/// Guard token wrapped around labeled sentences so that an aspect
/// sitting at the very start or end of a sentence cannot be lost
/// to truncation during tokenization. Stripped before assembly.
pub const BOUNDARY_GUARD: &str = "[PADDING]";

/// One aspect occurrence split out of an annotated line.
///
/// `polarity` is `None` for unlabeled inference input and
/// `Some(label)` when the line carried a gold label for this aspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSample {
    /// Sentence text before the aspect span, guards removed
    pub text_left: String,

    /// The aspect span itself, markers removed
    pub aspect: String,

    /// Sentence text after the aspect span, guards removed
    pub text_right: String,

    /// The gold sentiment label for this aspect, if one was supplied
    pub polarity: Option<String>,
}

impl ParsedSample {
    /// Split one marked sample string (the parser's output format,
    /// `left [ASP]aspect[ASP] right` with an optional
    /// ` !sent! label` suffix) into its triple.
    ///
    /// Fails with `InvalidInput` for empty text and with
    /// `MalformedRecord` when the marker structure does not isolate
    /// exactly one aspect.
    pub fn from_marked(marked: &str) -> Result<Self, ParseError> {
        if marked.trim().is_empty() {
            return Err(ParseError::InvalidInput("empty text".to_string()));
        }

        // Peel off the label suffix first; an empty label after the
        // separator counts as unlabeled.
        let (text, polarity) = match marked.split_once(LABEL_SEPARATOR) {
            Some((text, label)) => {
                let label = label.trim();
                let polarity = if label.is_empty() {
                    None
                } else {
                    Some(label.to_string())
                };
                (text.to_string(), polarity)
            }
            None => (marked.to_string(), None),
        };

        // The guards only protect boundary aspects during parsing;
        // they must never reach the tokenizer.
        let text = text.replace(BOUNDARY_GUARD, "");

        let parts: Vec<&str> = text.split(ASPECT_MARKER).collect();
        if parts.len() != 3 {
            return Err(ParseError::MalformedRecord(marked.to_string()));
        }

        Ok(Self {
            text_left:  parts[0].to_string(),
            aspect:     parts[1].to_string(),
            text_right: parts[2].to_string(),
            polarity,
        })
    }

    /// Reconstructs the unmarked sentence this sample came from.
    pub fn sentence(&self) -> String {
        format!("{}{}{}", self.text_left, self.aspect, self.text_right)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_into_triple() {
        let s = ParsedSample::from_marked("The [ASP]battery[ASP] life is great.").unwrap();
        assert_eq!(s.text_left,  "The ");
        assert_eq!(s.aspect,     "battery");
        assert_eq!(s.text_right, " life is great.");
        assert!(s.polarity.is_none());
    }

    #[test]
    fn test_sentence_round_trip() {
        let raw = "The [ASP]battery[ASP] life is great.";
        let s = ParsedSample::from_marked(raw).unwrap();
        assert_eq!(s.sentence(), raw.replace(ASPECT_MARKER, ""));
    }

    #[test]
    fn test_label_suffix_is_extracted() {
        let s = ParsedSample::from_marked("ok [ASP]food[ASP] here !sent! positive").unwrap();
        assert_eq!(s.polarity.as_deref(), Some("positive"));
        assert_eq!(s.aspect, "food");
    }

    #[test]
    fn test_empty_label_means_unlabeled() {
        let s = ParsedSample::from_marked("ok [ASP]food[ASP] here !sent! ").unwrap();
        assert!(s.polarity.is_none());
    }

    #[test]
    fn test_boundary_guards_are_stripped() {
        let s = ParsedSample::from_marked("[PADDING] [ASP]Food[ASP] was fine [PADDING]").unwrap();
        assert_eq!(s.aspect, "Food");
        assert!(!s.sentence().contains(BOUNDARY_GUARD));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(
            ParsedSample::from_marked("   "),
            Err(ParseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unbalanced_markers_are_rejected() {
        assert!(matches!(
            ParsedSample::from_marked("no aspect span here"),
            Err(ParseError::MalformedRecord(_))
        ));
        assert!(matches!(
            ParsedSample::from_marked("one [ASP]dangling marker"),
            Err(ParseError::MalformedRecord(_))
        ));
    }
}
