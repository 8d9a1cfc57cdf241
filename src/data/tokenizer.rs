// ============================================================
// Layer 4 — Tokenizer Adapters
// ============================================================
// Two interchangeable TextEncoder implementations:
//
//   WordTokenizer       — classic word-embedding setup. Builds a
//                         growable word→id vocabulary from an
//                         explicit fit_on_text pass over a corpus,
//                         then maps words to ids at encode time.
//                         Ids start at 1; 0 is the padding id.
//
//   PretrainedTokenizer — wraps a pretrained HuggingFace subword
//                         tokenizer. No fitting step: the
//                         vocabulary ships with the checkpoint.
//
// Both variants share the same contract: encode to exactly
// max_seq_len ids, replace an empty result with a single 0 id,
// optionally reverse, then pad/truncate post/post.
//
// The unknown-token id of the word variant is fixed at one past
// the vocabulary size as of the FIRST encode call. Fitting after
// that point grows the vocabulary but cannot move the unknown id,
// so encodings stay comparable across the lifetime of the
// tokenizer. Fit the full corpus before encoding anything.
//
// Reference: Rust Book §8 (HashMaps)

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;

use crate::data::padding::{pad_and_truncate, Side};
use crate::domain::error::ParseError;
use crate::domain::traits::TextEncoder;

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// Vocabulary-building word-level tokenizer.
pub struct WordTokenizer {
    max_seq_len: usize,
    lower:       bool,
    word2idx:    HashMap<String, u32>,
    idx2word:    HashMap<u32, String>,
    next_idx:    u32,
    unknown_idx: OnceLock<u32>,
}

impl WordTokenizer {
    pub fn new(max_seq_len: usize, lower: bool) -> Self {
        Self {
            max_seq_len,
            lower,
            word2idx:    HashMap::new(),
            idx2word:    HashMap::new(),
            next_idx:    1,
            unknown_idx: OnceLock::new(),
        }
    }

    /// Rebuild a tokenizer from a persisted vocabulary mapping.
    pub fn from_vocab(vocab: HashMap<String, u32>, max_seq_len: usize, lower: bool) -> Self {
        let next_idx = vocab.values().copied().max().unwrap_or(0) + 1;
        let idx2word = vocab.iter().map(|(w, &i)| (i, w.clone())).collect();
        Self {
            max_seq_len,
            lower,
            word2idx: vocab,
            idx2word,
            next_idx,
            unknown_idx: OnceLock::new(),
        }
    }

    /// Add every previously unseen word of `text` to the vocabulary.
    pub fn fit_on_text(&mut self, text: &str) {
        let text = if self.lower { text.to_lowercase() } else { text.to_string() };
        for word in text.split_whitespace() {
            if !self.word2idx.contains_key(word) {
                self.word2idx.insert(word.to_string(), self.next_idx);
                self.idx2word.insert(self.next_idx, word.to_string());
                self.next_idx += 1;
            }
        }
    }

    /// Number of distinct words fitted so far.
    pub fn vocab_len(&self) -> usize {
        self.word2idx.len()
    }

    /// Whether this tokenizer lower-cases text.
    pub fn is_lowercasing(&self) -> bool {
        self.lower
    }

    /// The fitted word→id mapping, for persistence.
    pub fn vocab(&self) -> &HashMap<String, u32> {
        &self.word2idx
    }

    /// The word behind an id, if the id belongs to the vocabulary.
    pub fn word_for(&self, id: u32) -> Option<&str> {
        self.idx2word.get(&id).map(String::as_str)
    }

    /// The id unseen words map to. Fixed on first call (usually
    /// the first encode) and stable afterwards, even if the
    /// vocabulary keeps growing.
    pub fn unknown_id(&self) -> u32 {
        *self
            .unknown_idx
            .get_or_init(|| self.word2idx.len() as u32 + 1)
    }
}

impl TextEncoder for WordTokenizer {
    fn text_to_sequence(&self, text: &str, reverse: bool) -> Result<Vec<u32>, ParseError> {
        let text = if self.lower { text.to_lowercase() } else { text.to_string() };
        let unknown = self.unknown_id();

        let mut ids: Vec<u32> = text
            .split_whitespace()
            .map(|word| self.word2idx.get(word).copied().unwrap_or(unknown))
            .collect();

        if ids.is_empty() {
            ids.push(0);
        }
        if reverse {
            ids.reverse();
        }

        Ok(pad_and_truncate(&ids, self.max_seq_len, Side::Post, Side::Post, 0))
    }

    fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

// ─── PretrainedTokenizer ──────────────────────────────────────────────────────
/// Adapter over a pretrained HuggingFace tokenizer.
pub struct PretrainedTokenizer {
    tokenizer:   tokenizers::Tokenizer,
    max_seq_len: usize,
}

impl PretrainedTokenizer {
    /// Fetch a tokenizer from the HuggingFace hub by identifier.
    pub fn from_pretrained(identifier: &str, max_seq_len: usize) -> Result<Self> {
        let tokenizer = tokenizers::Tokenizer::from_pretrained(identifier, None)
            .map_err(|e| anyhow::anyhow!("Cannot load pretrained tokenizer '{identifier}': {e}"))?;
        Ok(Self { tokenizer, max_seq_len })
    }

    /// Load a tokenizer from a local tokenizer.json file.
    pub fn from_file(path: &Path, max_seq_len: usize) -> Result<Self> {
        let tokenizer = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {e}", path.display()))?;
        Ok(Self { tokenizer, max_seq_len })
    }

    /// Wrap an already constructed tokenizer.
    pub fn from_tokenizer(tokenizer: tokenizers::Tokenizer, max_seq_len: usize) -> Self {
        Self { tokenizer, max_seq_len }
    }
}

impl TextEncoder for PretrainedTokenizer {
    fn text_to_sequence(&self, text: &str, reverse: bool) -> Result<Vec<u32>, ParseError> {
        // Encode without special tokens: the assembler places its
        // own [CLS]/[SEP] markers in the text where a model needs
        // them, and context features must not grow extra tokens.
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| ParseError::Tokenize(e.to_string()))?;

        let mut ids: Vec<u32> = encoding.get_ids().to_vec();
        if ids.is_empty() {
            ids.push(0);
        }
        if reverse {
            ids.reverse();
        }

        Ok(pad_and_truncate(&ids, self.max_seq_len, Side::Post, Side::Post, 0))
    }

    fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// Only the word variant is tested here — the pretrained variant is
// a thin delegation and needs a downloaded vocabulary file.
#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> WordTokenizer {
        let mut tok = WordTokenizer::new(8, true);
        tok.fit_on_text("the battery life is great");
        tok
    }

    #[test]
    fn test_fit_assigns_ids_from_one() {
        let tok = fitted();
        assert_eq!(tok.vocab_len(), 5);
        assert_eq!(tok.vocab().get("the"), Some(&1));
        assert_eq!(tok.vocab().get("great"), Some(&5));
    }

    #[test]
    fn test_encode_is_padded_to_max_seq_len() {
        let tok = fitted();
        let ids = tok.text_to_sequence("the battery", false).unwrap();
        assert_eq!(ids.len(), 8);
        assert_eq!(&ids[..2], &[1, 2]);
        assert!(ids[2..].iter().all(|&id| id == 0));
    }

    #[test]
    fn test_lowercasing_applies_at_fit_and_encode() {
        let tok = fitted();
        let upper = tok.text_to_sequence("THE BATTERY", false).unwrap();
        let lower = tok.text_to_sequence("the battery", false).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_unseen_words_share_the_unknown_id() {
        let tok = fitted();
        let ids = tok.text_to_sequence("the keyboard", false).unwrap();
        assert_eq!(ids[0], 1);
        assert_eq!(ids[1], tok.unknown_id());
        assert_eq!(tok.unknown_id(), 6); // one past the fitted vocabulary
    }

    #[test]
    fn test_unknown_id_is_frozen_at_first_encode() {
        let mut tok = fitted();
        let before = tok.text_to_sequence("keyboard", false).unwrap();

        // Growing the vocabulary afterwards must not move the
        // unknown id, so old and new encodings stay comparable.
        tok.fit_on_text("screen resolution brightness");
        let after = tok.text_to_sequence("keyboard", false).unwrap();
        assert_eq!(before, after);
        assert_eq!(tok.unknown_id(), 6);
    }

    #[test]
    fn test_empty_text_encodes_as_single_zero() {
        let tok = fitted();
        let ids = tok.text_to_sequence("   ", false).unwrap();
        assert_eq!(ids, vec![0; 8]);
    }

    #[test]
    fn test_reverse_flips_before_padding() {
        let tok = fitted();
        let ids = tok.text_to_sequence("the battery life", true).unwrap();
        assert_eq!(&ids[..3], &[3, 2, 1]);
        assert!(ids[3..].iter().all(|&id| id == 0));
    }

    #[test]
    fn test_long_text_is_truncated_to_the_head() {
        let mut tok = WordTokenizer::new(3, true);
        tok.fit_on_text("a b c d e");
        let ids = tok.text_to_sequence("a b c d e", false).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_vocab_round_trip() {
        let tok = fitted();
        let rebuilt = WordTokenizer::from_vocab(tok.vocab().clone(), 8, true);
        assert_eq!(
            rebuilt.text_to_sequence("battery life", false).unwrap(),
            tok.text_to_sequence("battery life", false).unwrap(),
        );
        assert_eq!(rebuilt.word_for(2), Some("battery"));
    }
}
