// ============================================================
// Layer 4 — Configuration Resolver
// ============================================================
// Resolves one of the named option templates into a Config the
// rest of the pipeline consumes. Two-step resolution:
//
//   resolve("chinese")
//     = deep copy of template  ⊕  chinese overrides
//
// where ⊕ replaces whole values key by key (resolving "template"
// itself applies the template onto itself, a no-op). The merge is
// pure; all process-wide mutability lives in the registry behind
// set_config, guarded by an RwLock.
//
// The Config type wraps the merged map and adds typed accessors
// for the options the pipeline reads (`max_seq_len`, `inputs`,
// `pretrained_bert`, `lowercase`), plus generic get/set by key so
// callers can carry model-specific options through untouched.
//
// Reference: Rust Book §16 (Shared-State Concurrency)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, RwLock};

use crate::config::templates;
use crate::domain::error::ConfigError;
use crate::domain::record::InputField;

/// A flat option-name → value mapping, the unit the registry and
/// the merge function work with.
pub type ConfigMap = serde_json::Map<String, Value>;

// ─── ConfigKind ───────────────────────────────────────────────────────────────
/// The recognized names of the layered option templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Template,
    Base,
    English,
    Chinese,
    Multilingual,
    Glove,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 6] = [
        ConfigKind::Template,
        ConfigKind::Base,
        ConfigKind::English,
        ConfigKind::Chinese,
        ConfigKind::Multilingual,
        ConfigKind::Glove,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKind::Template     => "template",
            ConfigKind::Base         => "base",
            ConfigKind::English      => "english",
            ConfigKind::Chinese      => "chinese",
            ConfigKind::Multilingual => "multilingual",
            ConfigKind::Glove        => "glove",
        }
    }

    fn seed(&self) -> ConfigMap {
        match self {
            ConfigKind::Template     => templates::template(),
            ConfigKind::Base         => templates::base(),
            ConfigKind::English      => templates::english(),
            ConfigKind::Chinese      => templates::chinese(),
            ConfigKind::Multilingual => templates::multilingual(),
            ConfigKind::Glove        => templates::glove(),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

// ─── Process-wide registry ────────────────────────────────────────────────────
// Working copies of every named template. set_config mutates these;
// the immutable constructors in templates.rs are never touched, so
// the seeded state is always recoverable by restarting the process.
static REGISTRY: LazyLock<RwLock<HashMap<ConfigKind, ConfigMap>>> = LazyLock::new(|| {
    let mut registry = HashMap::new();
    for kind in ConfigKind::ALL {
        registry.insert(kind, kind.seed());
    }
    RwLock::new(registry)
});

/// Layer `overrides` on top of `base`, key by key. Later values
/// fully replace earlier ones — no deep merge of nested values.
pub fn merge(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Resolve a named template into a Config. The result is a deep
/// copy — mutating it never affects the registry or other configs.
pub fn resolve(kind: ConfigKind) -> Config {
    let registry = REGISTRY.read().expect("config registry lock poisoned");
    let template = &registry[&ConfigKind::Template];
    let named    = &registry[&kind];
    Config::from_map(merge(template, named))
}

/// Update one named template in place. All configs resolved
/// afterward observe the change; already-resolved configs do not.
///
/// Fails with `UnknownKind` for an unrecognized template name and
/// with `InvalidOverrides` when `overrides` is not a JSON object.
pub fn set_config(kind: &str, overrides: &Value) -> Result<(), ConfigError> {
    let kind: ConfigKind = kind.parse()?;
    let overrides = overrides
        .as_object()
        .ok_or_else(|| ConfigError::InvalidOverrides(overrides.to_string()))?;

    let mut registry = REGISTRY.write().expect("config registry lock poisoned");
    let entry = registry
        .get_mut(&kind)
        .expect("registry is seeded with every kind");
    for (key, value) in overrides {
        entry.insert(key.clone(), value.clone());
    }

    tracing::debug!("Updated '{}' config with {} option(s)", kind, overrides.len());
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────
/// One resolved run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    options: ConfigMap,
}

impl Config {
    pub fn from_map(options: ConfigMap) -> Self {
        Self { options }
    }

    /// Raw access to any option by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Override one option on this instance only.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.options.insert(key.into(), value);
    }

    /// The fixed sequence length every feature is shaped to.
    pub fn max_seq_len(&self) -> usize {
        self.options
            .get("max_seq_len")
            .and_then(Value::as_u64)
            .unwrap_or(80) as usize
    }

    /// The pretrained tokenizer identifier, when the configuration
    /// selects the pretrained model family. None selects the
    /// vocabulary-building word tokenizer.
    pub fn pretrained_bert(&self) -> Option<String> {
        self.options
            .get("pretrained_bert")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Whether the word tokenizer lower-cases text before fitting
    /// and encoding.
    pub fn lowercase(&self) -> bool {
        self.options
            .get("lowercase")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// The feature fields the configured model consumes. Unknown
    /// names are logged and skipped rather than failing the run.
    pub fn inputs(&self) -> Vec<InputField> {
        let Some(names) = self.options.get("inputs").and_then(Value::as_array) else {
            return InputField::ALL.to_vec();
        };

        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            match name.as_str().map(str::parse::<InputField>) {
                Some(Ok(field)) => fields.push(field),
                _ => tracing::warn!("Ignoring unknown input field in config: {}", name),
            }
        }
        fields
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// Tests that mutate the registry use probe keys unique to each
// test, so they stay independent when the test harness runs them
// in parallel.
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_base_defaults() {
        let config = resolve(ConfigKind::Base);
        assert_eq!(config.max_seq_len(), 80);
        assert_eq!(
            config.pretrained_bert().as_deref(),
            Some("yangheng/deberta-v3-base-absa-v1.1")
        );
        assert_eq!(config.inputs().len(), 9);
    }

    #[test]
    fn test_resolve_glove_selects_word_tokenizer() {
        let config = resolve(ConfigKind::Glove);
        assert_eq!(config.max_seq_len(), 100);
        assert!(config.pretrained_bert().is_none());
        assert!(config.lowercase());
        assert_eq!(config.inputs().len(), 4);
    }

    #[test]
    fn test_merge_replaces_whole_values() {
        let mut base = ConfigMap::new();
        base.insert("inputs".to_string(), json!(["text_indices", "aspect_indices"]));
        base.insert("max_seq_len".to_string(), json!(80));

        let mut overrides = ConfigMap::new();
        overrides.insert("inputs".to_string(), json!(["context_indices"]));

        let merged = merge(&base, &overrides);
        // The whole array is replaced, not appended to
        assert_eq!(merged["inputs"], json!(["context_indices"]));
        assert_eq!(merged["max_seq_len"], json!(80));
    }

    #[test]
    fn test_template_onto_itself_is_a_noop() {
        let template = templates::template();
        assert_eq!(merge(&template, &template), template);
    }

    #[test]
    fn test_set_config_rejects_unknown_kind() {
        let result = set_config("klingon", &json!({"max_seq_len": 10}));
        assert!(matches!(result, Err(ConfigError::UnknownKind(_))));
    }

    #[test]
    fn test_set_config_rejects_non_object_overrides() {
        let result = set_config("base", &json!([1, 2, 3]));
        assert!(matches!(result, Err(ConfigError::InvalidOverrides(_))));
    }

    #[test]
    fn test_set_config_is_isolated_across_names() {
        set_config("chinese", &json!({"probe_chinese_only": 7})).unwrap();

        // Visible where it was set...
        let chinese = resolve(ConfigKind::Chinese);
        assert_eq!(chinese.get("probe_chinese_only"), Some(&json!(7)));

        // ...but never leaks into a sibling template
        let base = resolve(ConfigKind::Base);
        assert!(base.get("probe_chinese_only").is_none());
    }

    #[test]
    fn test_template_mutation_reaches_every_resolution() {
        set_config("template", &json!({"probe_shared_default": "on"})).unwrap();

        // The named maps do not define this key, so the template
        // layer supplies it everywhere
        for kind in [ConfigKind::Base, ConfigKind::Glove] {
            let config = resolve(kind);
            assert_eq!(config.get("probe_shared_default"), Some(&json!("on")));
        }
    }

    #[test]
    fn test_resolved_config_does_not_alias_registry() {
        let mut config = resolve(ConfigKind::Base);
        config.set("probe_local_only", json!(true));
        assert!(resolve(ConfigKind::Base).get("probe_local_only").is_none());
    }

    #[test]
    fn test_instance_set_overrides_typed_accessor() {
        let mut config = resolve(ConfigKind::Base);
        config.set("max_seq_len", json!(128));
        assert_eq!(config.max_seq_len(), 128);
    }

    #[test]
    fn test_unknown_input_names_are_skipped() {
        let mut config = resolve(ConfigKind::Base);
        config.set("inputs", json!(["text_indices", "not_a_field"]));
        assert_eq!(config.inputs(), vec![InputField::TextIndices]);
    }
}
