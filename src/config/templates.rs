// ============================================================
// Layer 4 — Named Option Templates
// ============================================================
// The immutable option sets the configuration registry is seeded
// with. Each constructor returns a fresh map, so the registry's
// working copies can be mutated without touching these defaults.
//
// The pretrained variants differ from `template` only in which
// checkpoint they name; `glove` is the classic word-embedding
// setup and swaps the whole model family: no pretrained
// tokenizer, longer sequences, higher learning rate, and a
// reduced set of requested input fields.

use serde_json::{json, Value};

use super::manager::ConfigMap;

/// All nine feature fields, the default `inputs` for the
/// pretrained model family.
fn all_inputs() -> Value {
    json!([
        "text_indices",
        "context_indices",
        "left_indices",
        "left_with_aspect_indices",
        "right_indices",
        "right_with_aspect_indices",
        "aspect_indices",
        "aspect_boundary",
        "dependency_graph",
    ])
}

fn as_map(value: Value) -> ConfigMap {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("static templates are JSON objects"),
    }
}

/// The most general option set; every resolution starts here.
pub fn template() -> ConfigMap {
    as_map(json!({
        "model":               "bert_baseline",
        "optimizer":           "adamw",
        "learning_rate":       2e-5,
        "pretrained_bert":     "microsoft/mdeberta-v3-base",
        "cache_dataset":       true,
        "max_seq_len":         80,
        "lowercase":           true,
        "dropout":             0.0,
        "l2reg":               1e-6,
        "num_epoch":           10,
        "batch_size":          16,
        "patience":            99999,
        "seed":                52,
        "polarities_dim":      3,
        "log_step":            10,
        "evaluate_begin":      0,
        "cross_validate_fold": -1,
        "inputs":              all_inputs(),
    }))
}

/// The recommended English ABSA checkpoint.
pub fn base() -> ConfigMap {
    let mut map = template();
    map.insert(
        "pretrained_bert".to_string(),
        json!("yangheng/deberta-v3-base-absa-v1.1"),
    );
    map
}

/// English-only pretrained checkpoint.
pub fn english() -> ConfigMap {
    let mut map = template();
    map.insert(
        "pretrained_bert".to_string(),
        json!("yangheng/deberta-v3-base-absa-v1.1"),
    );
    map
}

/// Chinese pretrained checkpoint.
pub fn chinese() -> ConfigMap {
    let mut map = template();
    map.insert("pretrained_bert".to_string(), json!("bert-base-chinese"));
    map
}

/// Multilingual pretrained checkpoint.
pub fn multilingual() -> ConfigMap {
    let mut map = template();
    map.insert(
        "pretrained_bert".to_string(),
        json!("microsoft/mdeberta-v3-base"),
    );
    map
}

/// Classic word-embedding setup. No pretrained tokenizer: the
/// vocabulary is built from the corpus instead.
pub fn glove() -> ConfigMap {
    as_map(json!({
        "model":               "lstm",
        "optimizer":           "adamw",
        "learning_rate":       1e-3,
        "pretrained_bert":     null,
        "cache_dataset":       true,
        "max_seq_len":         100,
        "lowercase":           true,
        "dropout":             0.1,
        "l2reg":               1e-6,
        "num_epoch":           100,
        "batch_size":          64,
        "patience":            20,
        "seed":                52,
        "embed_dim":           300,
        "hidden_dim":          300,
        "polarities_dim":      3,
        "log_step":            5,
        "hops":                3,
        "evaluate_begin":      0,
        "cross_validate_fold": -1,
        "inputs": [
            "text_indices",
            "aspect_indices",
            "aspect_boundary",
            "dependency_graph",
        ],
    }))
}
