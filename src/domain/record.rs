// ============================================================
// Layer 3 — FeatureRecord Domain Type
// ============================================================
// The fixed-shape numeric record the feature assembler produces
// for one (sentence, aspect, label) triple.
//
// Different model families consume different subsets of these
// fields: a plain LSTM reads only text_indices, TD-LSTM reads the
// left/right context encodings, graph-convolution models also read
// the dependency adjacency matrix. The configuration's `inputs`
// list names the fields a model wants; every other field is left
// as None so "not requested" is distinguishable from "all zeros".
//
// Every populated sequence field has length exactly max_seq_len,
// and the dependency graph is max_seq_len x max_seq_len. The
// batcher relies on this when stacking records into tensors.
//
// Reference: Tang et al. (2016) TD-LSTM — left/right contexts
//            Zhang et al. (2019) ASGCN — dependency graph input

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the feature fields a model configuration may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    TextIndices,
    ContextIndices,
    LeftIndices,
    LeftWithAspectIndices,
    RightIndices,
    RightWithAspectIndices,
    AspectIndices,
    AspectBoundary,
    DependencyGraph,
}

impl InputField {
    /// Every field name, in record-field order.
    pub const ALL: [InputField; 9] = [
        InputField::TextIndices,
        InputField::ContextIndices,
        InputField::LeftIndices,
        InputField::LeftWithAspectIndices,
        InputField::RightIndices,
        InputField::RightWithAspectIndices,
        InputField::AspectIndices,
        InputField::AspectBoundary,
        InputField::DependencyGraph,
    ];

    /// The snake_case name used in configuration `inputs` lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::TextIndices            => "text_indices",
            InputField::ContextIndices         => "context_indices",
            InputField::LeftIndices            => "left_indices",
            InputField::LeftWithAspectIndices  => "left_with_aspect_indices",
            InputField::RightIndices           => "right_indices",
            InputField::RightWithAspectIndices => "right_with_aspect_indices",
            InputField::AspectIndices          => "aspect_indices",
            InputField::AspectBoundary         => "aspect_boundary",
            InputField::DependencyGraph        => "dependency_graph",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown input field '{s}'"))
    }
}

/// One fully assembled feature record.
///
/// Sequence fields are token-id arrays of length max_seq_len.
/// `aspect_boundary` is an inclusive (start, end) index pair into
/// the padded full sequence; `dependency_graph` is a square 0/1
/// adjacency matrix over sentence tokens, cropped or zero-padded
/// to max_seq_len on both axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// `[CLS] left aspect right [SEP]`, the full tagged sequence
    pub text_indices: Option<Vec<u32>>,

    /// The sentence with the aspect span removed
    pub context_indices: Option<Vec<u32>>,

    /// Left context only, truncated so the aspect always fits
    pub left_indices: Option<Vec<u32>>,

    /// `[CLS] left aspect [SEP]`
    pub left_with_aspect_indices: Option<Vec<u32>>,

    /// Right context only
    pub right_indices: Option<Vec<u32>>,

    /// `aspect right`
    pub right_with_aspect_indices: Option<Vec<u32>>,

    /// The aspect span only
    pub aspect_indices: Option<Vec<u32>>,

    /// Inclusive (start, end) token positions of the aspect
    pub aspect_boundary: Option<[usize; 2]>,

    /// Syntactic adjacency matrix, max_seq_len x max_seq_len
    pub dependency_graph: Option<Vec<Vec<u8>>>,

    /// The reconstructed unmarked sentence — kept for traceability
    pub text_raw: String,

    /// The aspect span as it appeared in the sentence
    pub aspect: String,

    /// The gold label carried by the input line, if any
    pub polarity: Option<String>,
}

impl FeatureRecord {
    /// Number of aspect tokens covered by the boundary pair,
    /// when a boundary was requested.
    pub fn aspect_span_length(&self) -> Option<usize> {
        self.aspect_boundary
            .map(|[start, end]| end.saturating_sub(start) + 1)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trip() {
        for field in InputField::ALL {
            let parsed: InputField = field.as_str().parse().unwrap();
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn test_unknown_field_name_is_an_error() {
        assert!("attention_mask".parse::<InputField>().is_err());
    }

    #[test]
    fn test_aspect_span_length() {
        let record = FeatureRecord {
            text_indices:              None,
            context_indices:           None,
            left_indices:              None,
            left_with_aspect_indices:  None,
            right_indices:             None,
            right_with_aspect_indices: None,
            aspect_indices:            None,
            aspect_boundary:           Some([3, 5]),
            dependency_graph:          None,
            text_raw:                  "a b c d e f".to_string(),
            aspect:                    "d e f".to_string(),
            polarity:                  None,
        };
        assert_eq!(record.aspect_span_length(), Some(3));
    }
}
