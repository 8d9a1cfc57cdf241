// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Parses and assembles a single literal annotated line and
// returns the result for display. Meant for quickly checking how
// an annotation will be split before committing a whole file:
//
//   absa-prep parse --text "ok [ASP]food[ASP] but rude [ASP]waiters[ASP]"
//
// Unlike the prepare workflow there is no corpus to fit a
// vocabulary on, so the word tokenizer is fitted on the line
// itself. That makes the ids line-local (fine for inspection,
// useless for training), and it keeps this command fully offline
// even for configs that name a pretrained checkpoint.

use anyhow::Result;

use crate::config::{self, ConfigKind};
use crate::data::assembler::FeatureAssembler;
use crate::data::dataset::AbsaDataset;
use crate::data::parser::parse_sample;
use crate::data::tokenizer::WordTokenizer;
use crate::domain::record::FeatureRecord;
use crate::domain::sample::{ASPECT_MARKER, LABEL_SEPARATOR};
use crate::infra::graph::WindowGraph;
use crate::infra::validator::DefaultLabelValidator;

/// The outcome of inspecting one line.
pub struct Inspection {
    /// The per-aspect marked samples the parser produced
    pub samples: Vec<String>,

    /// The assembled records, one per sample
    pub records: Vec<FeatureRecord>,
}

pub struct InspectUseCase {
    config_kind: ConfigKind,
}

impl InspectUseCase {
    pub fn new(config_kind: ConfigKind) -> Self {
        Self { config_kind }
    }

    /// Parse and assemble one annotated line.
    pub fn inspect(&self, line: &str) -> Result<Inspection> {
        let opt = config::resolve(self.config_kind);

        // Line-local vocabulary; see the module note
        let mut tokenizer = WordTokenizer::new(opt.max_seq_len(), opt.lowercase());
        let text = line
            .split_once(LABEL_SEPARATOR)
            .map_or(line, |(text, _)| text);
        tokenizer.fit_on_text(&text.replace(ASPECT_MARKER, ""));

        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let assembler = FeatureAssembler::new(&tokenizer, &graph, &validator, &opt);

        let samples = parse_sample(line)?;
        let mut dataset = AbsaDataset::new();
        dataset.process_data(&assembler, &samples, false)?;

        Ok(Inspection {
            samples,
            records: dataset.records().to_vec(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_emits_one_record_per_aspect() {
        let use_case = InspectUseCase::new(ConfigKind::Glove);
        let inspection = use_case
            .inspect("ok [ASP]food[ASP] but rude [ASP]waiters[ASP]!sent!positive,negative")
            .unwrap();

        assert_eq!(inspection.samples.len(), 2);
        assert_eq!(inspection.records.len(), 2);
        assert_eq!(inspection.records[0].aspect, "food");
        assert_eq!(inspection.records[0].polarity.as_deref(), Some("positive"));
        assert_eq!(inspection.records[1].aspect, "waiters");
        assert_eq!(inspection.records[1].polarity.as_deref(), Some("negative"));
    }

    #[test]
    fn test_inspect_line_without_aspects_is_empty() {
        let use_case = InspectUseCase::new(ConfigKind::Glove);
        let inspection = use_case.inspect("no annotation at all").unwrap();
        assert!(inspection.samples.is_empty());
        assert!(inspection.records.is_empty());
    }
}
