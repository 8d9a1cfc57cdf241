// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for the parsing and feature-assembly pipeline.
//
// The corpus drivers decide what happens when one of these is
// produced for a single input line: with `ignore_error` set the
// record is logged and dropped, otherwise the first error aborts
// the whole batch. The errors themselves never apply that policy —
// they only describe what went wrong, so the caller stays in
// control of skip-vs-abort.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

/// Everything that can go wrong while turning one annotated line
/// into feature records. A failed sample contributes zero records,
/// never a partially filled one.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The [ASP] marker structure of a line cannot be parsed,
    /// e.g. an odd number of markers or a missing aspect split.
    #[error("malformed record, unbalanced or missing [ASP] markers: {0}")]
    MalformedRecord(String),

    /// A `!sent!` suffix listed a different number of labels than
    /// there are aspects. The parser degrades to unlabeled samples
    /// and logs this — it is never fatal on its own.
    #[error("{aspects} aspects but {labels} labels, ignoring the reference labels: {text}")]
    LabelCountMismatch {
        aspects: usize,
        labels:  usize,
        text:    String,
    },

    /// Empty or whitespace-only text (or an aspect that tokenizes
    /// to nothing) reached the feature assembler.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external label validator rejected a (sentence, aspect,
    /// label) triple.
    #[error("label inconsistency: {0}")]
    LabelConsistency(String),

    /// The dependency-graph builder failed for a sentence.
    #[error("dependency graph error: {0}")]
    Graph(String),

    /// The tokenizer failed to encode a piece of text.
    #[error("tokenizer error: {0}")]
    Tokenize(String),
}

/// Errors raised by the layered configuration resolver.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An unrecognized template name was passed to `set_config`.
    #[error(
        "unknown config type '{0}', expected one of: \
         template, base, english, chinese, multilingual, glove"
    )]
    UnknownKind(String),

    /// Overrides must be a JSON object mapping option names to values.
    #[error("config overrides must be a JSON object, got: {0}")]
    InvalidOverrides(String),
}
