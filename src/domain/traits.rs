// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - WordTokenizer and PretrainedTokenizer both implement
//     TextEncoder, and the feature assembler works with either
//   - WindowGraph implements DependencyGraphSource today;
//     a real syntactic parser adapter can replace it without
//     the assembler noticing
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::ParseError;

// ─── TextEncoder ──────────────────────────────────────────────────────────────
/// Any component that can turn a piece of text into a fixed-length
/// sequence of token ids.
///
/// Implementations:
///   - WordTokenizer       → growable word-level vocabulary,
///                           fit on a corpus before encoding
///   - PretrainedTokenizer → delegates to a pretrained subword
///                           tokenizer, no fitting step
pub trait TextEncoder {
    /// Encode `text` into exactly `max_seq_len()` token ids.
    /// An empty token sequence encodes as a single 0 id before
    /// padding. `reverse` flips the id order before padding.
    fn text_to_sequence(&self, text: &str, reverse: bool) -> Result<Vec<u32>, ParseError>;

    /// The fixed output length every encoding is padded or
    /// truncated to.
    fn max_seq_len(&self) -> usize;
}

// ─── DependencyGraphSource ────────────────────────────────────────────────────
/// Any component that can produce a syntactic adjacency matrix
/// for a raw sentence.
///
/// The matrix must be square, sized to the whitespace token count
/// of the sentence. The assembler crops or zero-pads it to the
/// configured max_seq_len on both axes; correctness of the
/// syntax analysis itself is the implementation's business.
///
/// Implementations:
///   - WindowGraph → symmetric token-window adjacency, a stand-in
///     until a dependency-parser adapter is plugged in
pub trait DependencyGraphSource {
    /// Build the adjacency matrix for one sentence.
    fn build(&self, text: &str) -> Result<Vec<Vec<u8>>, ParseError>;
}

// ─── LabelValidator ───────────────────────────────────────────────────────────
/// Any component that can check a (sentence, aspect, label) triple
/// for consistency before it becomes a feature record.
///
/// Implementations:
///   - DefaultLabelValidator → aspect must occur in the sentence,
///     and a supplied label must belong to the configured label set
pub trait LabelValidator {
    /// Returns Ok for a consistent triple, `LabelConsistency`
    /// otherwise.
    fn validate(
        &self,
        text:     &str,
        aspect:   &str,
        polarity: Option<&str>,
    ) -> Result<(), ParseError>;
}
