// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the full feature-preparation pipeline in order:
//
//   Step 1: Resolve the named configuration   (Layer 4 - config)
//   Step 2: Load the annotated lines          (Layer 4 - data)
//   Step 3: Build the tokenizer variant       (Layer 6 - infra)
//   Step 4: Parse + assemble the corpus       (Layer 4 - data)
//   Step 5: Write the records as JSON         (Layer 6 - infra)
//
// Which tokenizer is built is a configuration decision: a config
// naming a pretrained_bert checkpoint gets the pretrained subword
// tokenizer; one without (the glove family) gets the
// vocabulary-building word tokenizer, fitted over the corpus with
// markers and label suffixes stripped first.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::{self, Config, ConfigKind};
use crate::data::dataset::AbsaDataset;
use crate::data::assembler::FeatureAssembler;
use crate::data::loader::load_lines;
use crate::data::tokenizer::{PretrainedTokenizer, WordTokenizer};
use crate::domain::sample::{ASPECT_MARKER, LABEL_SEPARATOR};
use crate::domain::traits::TextEncoder;
use crate::infra::graph::WindowGraph;
use crate::infra::validator::DefaultLabelValidator;
use crate::infra::vocab_store::VocabStore;

// ─── Preparation Settings ─────────────────────────────────────────────────────
/// Everything the prepare workflow needs, converted from CLI args.
#[derive(Debug, Clone)]
pub struct PrepareSettings {
    /// The annotated inference file to process
    pub input: PathBuf,

    /// Where to write the assembled records as JSON; None skips
    /// the write and only reports counts
    pub output: Option<PathBuf>,

    /// Which named configuration template to resolve
    pub config_kind: ConfigKind,

    /// Per-run option overrides applied to the resolved config
    pub overrides: Vec<(String, Value)>,

    /// Skip-and-log failed lines instead of aborting the batch
    pub ignore_error: bool,

    /// Directory for vocabulary and tokenizer caches
    pub cache_dir: String,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
/// Owns the settings and runs the full preparation pipeline.
pub struct PrepareUseCase {
    settings: PrepareSettings,
}

impl PrepareUseCase {
    pub fn new(settings: PrepareSettings) -> Self {
        Self { settings }
    }

    /// Execute the pipeline end to end. Returns the number of
    /// feature records assembled.
    pub fn execute(&self) -> Result<usize> {
        let s = &self.settings;

        // ── Step 1: resolve the configuration ─────────────────────────────────
        let mut opt = config::resolve(s.config_kind);
        for (key, value) in &s.overrides {
            opt.set(key.clone(), value.clone());
        }
        tracing::info!(
            "Resolved '{}' config: max_seq_len={}, {} input field(s)",
            s.config_kind,
            opt.max_seq_len(),
            opt.inputs().len()
        );

        // ── Step 2: load the corpus ───────────────────────────────────────────
        let lines = load_lines(&s.input)?;

        // ── Step 3: build the tokenizer the config selects ────────────────────
        let encoder = build_encoder(&opt, &lines, &s.cache_dir)?;

        // ── Step 4: parse and assemble every line ─────────────────────────────
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let assembler = FeatureAssembler::new(encoder.as_ref(), &graph, &validator, &opt);

        let mut dataset = AbsaDataset::new();
        let count = dataset.prepare_from_lines(&assembler, &lines, s.ignore_error)?;

        // ── Step 5: write the records ─────────────────────────────────────────
        if let Some(output) = &s.output {
            let json = serde_json::to_string_pretty(dataset.records())?;
            fs::write(output, json)
                .with_context(|| format!("Cannot write records to '{}'", output.display()))?;
            tracing::info!("Wrote {} record(s) to '{}'", count, output.display());
        }

        Ok(count)
    }
}

/// Pick and construct the TextEncoder a configuration asks for.
fn build_encoder(
    opt:       &Config,
    lines:     &[String],
    cache_dir: &str,
) -> Result<Box<dyn TextEncoder>> {
    let store = VocabStore::new(cache_dir);

    match opt.pretrained_bert() {
        Some(identifier) => {
            let tokenizer: PretrainedTokenizer =
                store.load_pretrained(&identifier, opt.max_seq_len())?;
            Ok(Box::new(tokenizer))
        }
        None => {
            // The vocabulary is fitted on sentence text only —
            // markers and label suffixes are annotation, not words
            let stripped: Vec<String> = lines.iter().map(|l| strip_annotations(l)).collect();
            let tokenizer: WordTokenizer =
                store.load_or_fit(&stripped, opt.max_seq_len(), opt.lowercase())?;
            Ok(Box::new(tokenizer))
        }
    }
}

/// Remove [ASP] markers and any !sent! suffix from one line.
fn strip_annotations(line: &str) -> String {
    let text = line
        .split_once(LABEL_SEPARATOR)
        .map_or(line, |(text, _)| text);
    text.replace(ASPECT_MARKER, "")
}
