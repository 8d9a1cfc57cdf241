// ============================================================
// Layer 4 — Layered Configuration
// ============================================================
// Run configurations are resolved from a fixed set of named
// option templates rather than built by hand:
//
//   template      → the most general option set, always the base
//   base          → the recommended English ABSA checkpoint
//   english       → English-only pretrained checkpoint
//   chinese       → Chinese pretrained checkpoint
//   multilingual  → multilingual pretrained checkpoint
//   glove         → classic word-embedding setup, no pretrained
//                   tokenizer, longer sequences
//
// Resolution always starts from `template` and layers the named
// set's options on top — later values fully replace earlier ones,
// key by key, with no deep merging of nested values. The result
// is a deep copy: a resolved Config never aliases registry state.
//
// The registry itself is process-wide and mutable by name via
// set_config, so a caller can tune defaults once before building
// any configs. Mutation is synchronized with an RwLock, but the
// ordering of concurrent set_config calls is the caller's
// responsibility.

// The named option sets the registry is seeded with
pub mod templates;

// Resolution, merging, and the process-wide registry
pub mod manager;

pub use manager::{merge, resolve, set_config, Config, ConfigKind, ConfigMap};
