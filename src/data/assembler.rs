// ============================================================
// Layer 4 — Feature Assembler
// ============================================================
// Turns one marked sample string into the full FeatureRecord a
// model consumes. The assembly per sample:
//
//   Step 1: split into (left, aspect, right) and optional label
//   Step 2: encode the tagged full sequence and every context view
//   Step 3: clip the left context so the aspect always fits the
//           fixed window, and derive the aspect boundary pair
//   Step 4: fetch the dependency adjacency matrix and shape it
//           to max_seq_len on both axes
//   Step 5: validate the (sentence, aspect, label) triple
//   Step 6: populate exactly the fields the configuration requests
//
// The left clip is the load-bearing invariant:
//   left_len = min(max_seq_len - aspect_len, nonzero(left))
// guarantees aspect_boundary.end <= max_seq_len - 1, so the
// aspect span can never be pushed out of the window by a long
// left context.
//
// Reference: Tang et al. (2016) TD-LSTM
//            Zhang et al. (2019) ASGCN

use std::collections::HashSet;

use crate::config::Config;
use crate::domain::error::ParseError;
use crate::domain::record::{FeatureRecord, InputField};
use crate::domain::sample::ParsedSample;
use crate::domain::traits::{DependencyGraphSource, LabelValidator, TextEncoder};

/// Assembles FeatureRecords from marked sample strings.
pub struct FeatureAssembler<'a> {
    encoder:     &'a dyn TextEncoder,
    graph:       &'a dyn DependencyGraphSource,
    validator:   &'a dyn LabelValidator,
    max_seq_len: usize,
    inputs:      HashSet<InputField>,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(
        encoder:   &'a dyn TextEncoder,
        graph:     &'a dyn DependencyGraphSource,
        validator: &'a dyn LabelValidator,
        config:    &Config,
    ) -> Self {
        Self {
            encoder,
            graph,
            validator,
            max_seq_len: config.max_seq_len(),
            inputs:      config.inputs().into_iter().collect(),
        }
    }

    /// Assemble one marked sample (`left [ASP]aspect[ASP] right`,
    /// optional ` !sent! label` suffix) into a FeatureRecord.
    pub fn assemble(&self, marked: &str) -> Result<FeatureRecord, ParseError> {
        let sample = ParsedSample::from_marked(marked)?;
        self.features_for(&sample)
    }

    /// Assemble an already split sample.
    pub fn features_for(&self, sample: &ParsedSample) -> Result<FeatureRecord, ParseError> {
        let left   = sample.text_left.as_str();
        let aspect = sample.aspect.as_str();
        let right  = sample.text_right.as_str();

        // ── Step 2: encode every view of the sentence ─────────────────────────
        let text_indices = self
            .encoder
            .text_to_sequence(&format!("[CLS] {left} {aspect} {right} [SEP]"), false)?;
        let context_indices = self
            .encoder
            .text_to_sequence(&format!("{left}{right}"), false)?;
        let left_indices = self.encoder.text_to_sequence(left, false)?;
        let left_with_aspect_indices = self
            .encoder
            .text_to_sequence(&format!("[CLS] {left} {aspect} [SEP]"), false)?;
        let right_indices = self.encoder.text_to_sequence(right, false)?;
        let right_with_aspect_indices = self
            .encoder
            .text_to_sequence(&format!("{aspect} {right}"), false)?;
        let aspect_indices = self.encoder.text_to_sequence(aspect, false)?;

        // ── Step 3: clip the left context, derive the boundary ────────────────
        let aspect_len = count_nonzero(&aspect_indices);
        if aspect_len == 0 {
            return Err(ParseError::InvalidInput(format!(
                "aspect tokenizes to nothing in: {}",
                sample.sentence()
            )));
        }

        let left_len = self
            .max_seq_len
            .saturating_sub(aspect_len)
            .min(count_nonzero(&left_indices));

        let mut clipped_left = left_indices[..left_len].to_vec();
        clipped_left.resize(self.max_seq_len, 0);

        // Inclusive span; end stays below max_seq_len because of
        // the left clip above
        let aspect_boundary = [left_len, left_len + aspect_len - 1];

        // ── Step 4: dependency graph, shaped to the window ────────────────────
        let graph_text = format!("{left} {aspect} {right}");
        let matrix = self.graph.build(&graph_text)?;
        let dependency_graph = shape_square(matrix, self.max_seq_len);

        // ── Step 5: validate the triple ───────────────────────────────────────
        let sentence = sample.sentence().trim().to_string();
        self.validator
            .validate(&sentence, aspect, sample.polarity.as_deref())?;

        // ── Step 6: keep only the requested fields ────────────────────────────
        let want = |field: InputField| self.inputs.contains(&field);
        Ok(FeatureRecord {
            text_indices:    want(InputField::TextIndices).then_some(text_indices),
            context_indices: want(InputField::ContextIndices).then_some(context_indices),
            left_indices:    want(InputField::LeftIndices).then_some(clipped_left),
            left_with_aspect_indices: want(InputField::LeftWithAspectIndices)
                .then_some(left_with_aspect_indices),
            right_indices: want(InputField::RightIndices).then_some(right_indices),
            right_with_aspect_indices: want(InputField::RightWithAspectIndices)
                .then_some(right_with_aspect_indices),
            aspect_indices:   want(InputField::AspectIndices).then_some(aspect_indices),
            aspect_boundary:  want(InputField::AspectBoundary).then_some(aspect_boundary),
            dependency_graph: want(InputField::DependencyGraph).then_some(dependency_graph),
            text_raw: sentence,
            aspect:   aspect.trim().to_string(),
            polarity: sample.polarity.clone(),
        })
    }
}

fn count_nonzero(ids: &[u32]) -> usize {
    ids.iter().filter(|&&id| id != 0).count()
}

/// Crop or zero-pad a square matrix to exactly len x len.
/// Cropping drops token indices at and beyond len; padding appends
/// zero rows and columns.
fn shape_square(mut matrix: Vec<Vec<u8>>, len: usize) -> Vec<Vec<u8>> {
    matrix.truncate(len);
    for row in &mut matrix {
        row.truncate(len);
        row.resize(len, 0);
    }
    matrix.resize(len, vec![0; len]);
    matrix
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, ConfigKind};
    use crate::data::parser::parse_sample;
    use crate::data::tokenizer::WordTokenizer;
    use crate::infra::graph::WindowGraph;
    use crate::infra::validator::DefaultLabelValidator;
    use serde_json::json;

    fn word_tokenizer(corpus: &str, max_seq_len: usize) -> WordTokenizer {
        let mut tok = WordTokenizer::new(max_seq_len, true);
        tok.fit_on_text(corpus);
        tok
    }

    fn test_config(max_seq_len: usize) -> Config {
        let mut config = resolve(ConfigKind::Base);
        config.set("max_seq_len", json!(max_seq_len));
        config.set("inputs", json!(InputField::ALL.map(|f| f.as_str())));
        config
    }

    #[test]
    fn test_boundary_matches_aspect_length() {
        let tok = word_tokenizer("the battery life is great", 16);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(16);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let record = assembler
            .assemble("the [ASP]battery life[ASP] is great")
            .unwrap();
        let [start, end] = record.aspect_boundary.unwrap();
        assert_eq!(start, 1); // "the" fills the left context
        assert_eq!(end - start + 1, 2); // two aspect tokens
        assert_eq!(record.aspect_span_length(), Some(2));
    }

    #[test]
    fn test_long_left_context_never_pushes_the_aspect_out() {
        let corpus: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let corpus = corpus.join(" ");
        let tok = word_tokenizer(&format!("{corpus} screen dim"), 10);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(10);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let record = assembler
            .assemble(&format!("{corpus} [ASP]screen dim[ASP]"))
            .unwrap();
        let [start, end] = record.aspect_boundary.unwrap();
        assert_eq!(end - start + 1, 2);
        assert!(end < 10);
        // Left context was clipped to make room for the aspect
        assert_eq!(start, 8);
    }

    #[test]
    fn test_every_sequence_field_has_fixed_length() {
        let tok = word_tokenizer("ok food but rude waiters", 12);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(12);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let record = assembler.assemble("ok [ASP]food[ASP] but rude waiters").unwrap();
        for ids in [
            record.text_indices.as_ref().unwrap(),
            record.context_indices.as_ref().unwrap(),
            record.left_indices.as_ref().unwrap(),
            record.left_with_aspect_indices.as_ref().unwrap(),
            record.right_indices.as_ref().unwrap(),
            record.right_with_aspect_indices.as_ref().unwrap(),
            record.aspect_indices.as_ref().unwrap(),
        ] {
            assert_eq!(ids.len(), 12);
        }

        let graph = record.dependency_graph.as_ref().unwrap();
        assert_eq!(graph.len(), 12);
        assert!(graph.iter().all(|row| row.len() == 12));
    }

    #[test]
    fn test_unrequested_fields_stay_empty() {
        let tok = word_tokenizer("ok food here", 8);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let mut config = test_config(8);
        config.set("inputs", json!(["text_indices", "aspect_boundary"]));
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let record = assembler.assemble("ok [ASP]food[ASP] here").unwrap();
        assert!(record.text_indices.is_some());
        assert!(record.aspect_boundary.is_some());
        assert!(record.context_indices.is_none());
        assert!(record.dependency_graph.is_none());
        // Traceability fields are always populated
        assert_eq!(record.text_raw, "ok food here");
        assert_eq!(record.aspect, "food");
    }

    #[test]
    fn test_polarity_suffix_is_carried() {
        let tok = word_tokenizer("ok food here", 8);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(8);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let record = assembler
            .assemble("ok [ASP]food[ASP] here !sent! positive")
            .unwrap();
        assert_eq!(record.polarity.as_deref(), Some("positive"));

        let unlabeled = assembler.assemble("ok [ASP]food[ASP] here").unwrap();
        assert!(unlabeled.polarity.is_none());
    }

    #[test]
    fn test_empty_text_is_invalid_input() {
        let tok = word_tokenizer("anything", 8);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(8);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        assert!(matches!(
            assembler.assemble("  "),
            Err(ParseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inconsistent_label_propagates() {
        let tok = word_tokenizer("ok food here", 8);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::new(Some(vec![
            "negative".to_string(),
            "neutral".to_string(),
            "positive".to_string(),
        ]));
        let config = test_config(8);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        assert!(matches!(
            assembler.assemble("ok [ASP]food[ASP] here !sent! wonderful"),
            Err(ParseError::LabelConsistency(_))
        ));
    }

    #[test]
    fn test_end_to_end_two_labeled_aspects() {
        let line = "The [ASP]battery[ASP] life is great but the [ASP]screen[ASP] is dim.\
                    !sent!positive,negative";
        let sentence = "The battery life is great but the screen is dim.";

        let tok = word_tokenizer(sentence, 80);
        let graph = WindowGraph::default();
        let validator = DefaultLabelValidator::default();
        let config = test_config(80);
        let assembler = FeatureAssembler::new(&tok, &graph, &validator, &config);

        let samples = parse_sample(line).unwrap();
        assert_eq!(samples.len(), 2);

        let records: Vec<_> = samples
            .iter()
            .map(|s| assembler.assemble(s).unwrap())
            .collect();

        assert_eq!(records[0].aspect, "battery");
        assert_eq!(records[0].polarity.as_deref(), Some("positive"));
        assert_eq!(records[1].aspect, "screen");
        assert_eq!(records[1].polarity.as_deref(), Some("negative"));

        // Both records reconstruct the full unmarked sentence
        for record in &records {
            assert_eq!(record.text_raw, sentence);
            let [start, end] = record.aspect_boundary.unwrap();
            assert!(end < 80);
            assert_eq!(end - start + 1, record.aspect_span_length().unwrap());
        }
    }
}
