// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `parse`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, bool, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::application::prepare_use_case::PrepareSettings;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process an annotated file into feature records
    Prepare(PrepareArgs),

    /// Show how a single annotated line is split and assembled
    Parse(ParseArgs),
}

/// All arguments for the `prepare` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// The annotated inference file to process
    #[arg(long)]
    pub input: String,

    /// Where to write the assembled records as JSON
    #[arg(long)]
    pub output: Option<String>,

    /// Named configuration template to resolve
    /// (template, base, english, chinese, multilingual, glove)
    #[arg(long, default_value = "base")]
    pub config: String,

    /// Directory for vocabulary and tokenizer caches
    #[arg(long, default_value = "caches")]
    pub cache_dir: String,

    /// Log and skip failed lines instead of aborting the batch
    #[arg(long)]
    pub ignore_error: bool,

    /// Per-run config overrides as key=value pairs; the value is
    /// parsed as JSON when possible, else taken as a string
    /// (e.g. --set max_seq_len=128 --set "inputs=[\"text_indices\"]")
    #[arg(long = "set", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,
}

impl PrepareArgs {
    /// Convert CLI args into the application-layer settings.
    /// This is the boundary between Layer 1 and Layer 2 —
    /// the application layer never sees clap types.
    pub fn into_settings(self) -> Result<PrepareSettings> {
        Ok(PrepareSettings {
            input:        PathBuf::from(self.input),
            output:       self.output.map(PathBuf::from),
            config_kind:  self.config.parse()?,
            overrides:    self.overrides,
            ignore_error: self.ignore_error,
            cache_dir:    self.cache_dir,
        })
    }
}

/// All arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The annotated line to inspect
    #[arg(long)]
    pub text: String,

    /// Named configuration template to resolve. The default keeps
    /// this command offline (no pretrained tokenizer download)
    #[arg(long, default_value = "glove")]
    pub config: String,
}

/// Parse one `key=value` override. The value side is JSON when it
/// parses as JSON, a plain string otherwise, so both
/// `--set max_seq_len=128` and `--set pretrained_bert=bert-base-chinese`
/// do what they look like.
fn parse_override(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_override_parses_json_values() {
        assert_eq!(
            parse_override("max_seq_len=128").unwrap(),
            ("max_seq_len".to_string(), json!(128))
        );
        assert_eq!(
            parse_override("inputs=[\"text_indices\"]").unwrap(),
            ("inputs".to_string(), json!(["text_indices"]))
        );
    }

    #[test]
    fn test_override_falls_back_to_string() {
        assert_eq!(
            parse_override("pretrained_bert=bert-base-chinese").unwrap(),
            ("pretrained_bert".to_string(), json!("bert-base-chinese"))
        );
    }

    #[test]
    fn test_override_without_equals_is_rejected() {
        assert!(parse_override("max_seq_len").is_err());
    }
}
