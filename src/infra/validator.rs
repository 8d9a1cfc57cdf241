// ============================================================
// Layer 6 — Label Validator
// ============================================================
// The default LabelValidator. Two checks per triple:
//
//   1. The aspect text must occur in the sentence — an aspect the
//      sentence does not contain cannot have a boundary in it.
//   2. When a label set is configured, a supplied polarity must
//      be a member. Unlabeled samples always pass this check.
//
// The checks run after feature assembly has split and encoded the
// sample, so a failure here drops a record that is otherwise fully
// built — by then the raw text is known good, which makes the
// failure message precise.

use crate::domain::error::ParseError;
use crate::domain::traits::LabelValidator;

/// Aspect-in-text and label-set membership checks.
#[derive(Default)]
pub struct DefaultLabelValidator {
    /// The labels a polarity may take; None accepts any label
    labels: Option<Vec<String>>,
}

impl DefaultLabelValidator {
    pub fn new(labels: Option<Vec<String>>) -> Self {
        Self { labels }
    }
}

impl LabelValidator for DefaultLabelValidator {
    fn validate(
        &self,
        text:     &str,
        aspect:   &str,
        polarity: Option<&str>,
    ) -> Result<(), ParseError> {
        let aspect = aspect.trim();
        if !text.contains(aspect) {
            return Err(ParseError::LabelConsistency(format!(
                "aspect '{aspect}' does not occur in '{text}'"
            )));
        }

        if let (Some(labels), Some(polarity)) = (&self.labels, polarity) {
            let polarity = polarity.trim();
            if !labels.iter().any(|label| label == polarity) {
                return Err(ParseError::LabelConsistency(format!(
                    "label '{polarity}' is not one of {labels:?}"
                )));
            }
        }

        Ok(())
    }
}
