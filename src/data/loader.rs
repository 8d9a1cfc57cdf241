// ============================================================
// Layer 4 — Inference File Loader
// ============================================================
// Reads an annotated inference file into memory, one record per
// line. The file format is plain UTF-8 text:
//
//   <text with [ASP]...[ASP] markers>
//   <text with [ASP]...[ASP] markers>!sent!<comma-separated labels>
//
// Blank lines are ignored. A line that cannot be decoded is
// skipped with a warning rather than failing the whole file —
// one broken line must never cost the rest of the corpus.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Load all non-blank lines of an annotated inference file.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open inference file '{}'", path.display()))?;

    let mut lines = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        match line {
            Ok(line) => {
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping undecodable line {} of '{}': {}",
                    number + 1,
                    path.display(),
                    e
                );
            }
        }
    }

    tracing::info!("Loaded {} record(s) from '{}'", lines.len(), path.display());
    Ok(lines)
}
