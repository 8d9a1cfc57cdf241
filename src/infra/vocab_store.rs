// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists tokenizer state so the exact same vocabulary is used
// across runs. Two responsibilities:
//
//   Word tokenizer — the fitted word→id mapping is saved to
//     vocab.json and reloaded on the next run. Encodings are only
//     comparable across runs if the mapping is identical, so
//     load-or-fit is the only entry point the application uses.
//
//   Pretrained tokenizer — loaded from a local tokenizer.json if
//     one sits in the store directory (offline runs), otherwise
//     fetched from the HuggingFace hub by identifier.
//
// File layout:
//   <dir>/
//     vocab.json      ← word tokenizer mapping
//     tokenizer.json  ← optional local pretrained tokenizer

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::tokenizer::{PretrainedTokenizer, WordTokenizer};

/// What vocab.json holds. The lowercase flag travels with the
/// mapping because a vocabulary fitted lowercased is useless to a
/// case-preserving tokenizer.
#[derive(Debug, Serialize, Deserialize)]
struct VocabFile {
    lower: bool,
    words: HashMap<String, u32>,
}

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load an existing word vocabulary or fit a new one on
    /// `texts` and save it.
    pub fn load_or_fit(
        &self,
        texts:       &[String],
        max_seq_len: usize,
        lower:       bool,
    ) -> Result<WordTokenizer> {
        let vocab_path = self.dir.join("vocab.json");
        if vocab_path.exists() {
            tracing::info!("Loading existing vocabulary from '{}'", vocab_path.display());
            self.load_word_vocab(max_seq_len)
        } else {
            tracing::info!("Fitting new vocabulary over {} text(s)", texts.len());
            let mut tokenizer = WordTokenizer::new(max_seq_len, lower);
            for text in texts {
                tokenizer.fit_on_text(text);
            }
            self.save_word_vocab(&tokenizer)?;
            Ok(tokenizer)
        }
    }

    /// Write the fitted mapping to vocab.json.
    pub fn save_word_vocab(&self, tokenizer: &WordTokenizer) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();
        let path = self.dir.join("vocab.json");

        let file = VocabFile {
            lower: tokenizer.is_lowercasing(),
            words: tokenizer.vocab().clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::debug!(
            "Saved vocabulary of {} word(s) to '{}'",
            tokenizer.vocab_len(),
            path.display()
        );
        Ok(())
    }

    /// Rebuild a word tokenizer from vocab.json.
    pub fn load_word_vocab(&self, max_seq_len: usize) -> Result<WordTokenizer> {
        let path = self.dir.join("vocab.json");
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", path.display()))?;

        let file: VocabFile = serde_json::from_str(&json)
            .with_context(|| format!("Malformed vocabulary file '{}'", path.display()))?;
        Ok(WordTokenizer::from_vocab(file.words, max_seq_len, file.lower))
    }

    /// Load a pretrained tokenizer: a local tokenizer.json wins,
    /// otherwise the identifier is fetched from the hub.
    pub fn load_pretrained(
        &self,
        identifier:  &str,
        max_seq_len: usize,
    ) -> Result<PretrainedTokenizer> {
        let local = self.dir.join("tokenizer.json");
        if local.exists() {
            tracing::info!("Loading local tokenizer from '{}'", local.display());
            PretrainedTokenizer::from_file(&local, max_seq_len)
        } else {
            tracing::info!("Fetching pretrained tokenizer '{}'", identifier);
            PretrainedTokenizer::from_pretrained(identifier, max_seq_len)
        }
    }
}
