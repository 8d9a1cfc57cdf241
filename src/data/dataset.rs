// ============================================================
// Layer 4 — ABSA Dataset
// ============================================================
// Holds the ordered sequence of FeatureRecords assembled from one
// file or one literal string, and exposes indexed access through
// Burn's Dataset trait so a DataLoader can batch it.
//
// Population is wholesale: every process_data call replaces the
// stored records, it never appends. Callers must not rely on
// accumulation across calls.
//
// The corpus drivers own the error policy. With ignore_error set,
// a line that fails to parse or assemble is logged with its raw
// text and dropped; without it, the first failure aborts the whole
// batch. A failed sample contributes zero records, never a partial
// one.

use std::path::Path;

use anyhow::Result;
use burn::data::dataset::Dataset;
use indicatif::ProgressBar;

use crate::data::assembler::FeatureAssembler;
use crate::data::loader::load_lines;
use crate::data::parser::parse_sample;
use crate::domain::error::ParseError;
use crate::domain::record::FeatureRecord;

/// The ordered container of assembled feature records.
#[derive(Default)]
pub struct AbsaDataset {
    records: Vec<FeatureRecord>,
}

impl AbsaDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn sample_count(&self) -> usize {
        self.records.len()
    }

    /// Parse and assemble a whole annotated file. Blank lines are
    /// skipped by the loader; every surviving line contributes one
    /// sample per aspect occurrence.
    pub fn prepare_from_file(
        &mut self,
        assembler:    &FeatureAssembler<'_>,
        path:         &Path,
        ignore_error: bool,
    ) -> Result<usize> {
        let lines = load_lines(path)?;
        self.prepare_from_lines(assembler, &lines, ignore_error)
    }

    /// Parse and assemble one literal annotated string.
    pub fn prepare_from_text(
        &mut self,
        assembler:    &FeatureAssembler<'_>,
        text:         &str,
        ignore_error: bool,
    ) -> Result<usize> {
        let lines = [text.to_string()];
        self.prepare_from_lines(assembler, &lines, ignore_error)
    }

    /// Shared driver: lines → marked samples → records.
    pub fn prepare_from_lines(
        &mut self,
        assembler:    &FeatureAssembler<'_>,
        lines:        &[String],
        ignore_error: bool,
    ) -> Result<usize> {
        let mut samples = Vec::new();
        for line in lines {
            match parse_sample(line) {
                Ok(parsed) => samples.extend(parsed),
                Err(e) if ignore_error => {
                    tracing::warn!("Skipping unparsable line '{}': {}", line, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.process_data(assembler, &samples, ignore_error)?;
        Ok(self.records.len())
    }

    /// Assemble marked samples into records, replacing the stored
    /// sequence wholesale.
    pub fn process_data(
        &mut self,
        assembler:    &FeatureAssembler<'_>,
        samples:      &[String],
        ignore_error: bool,
    ) -> Result<(), ParseError> {
        let mut records = Vec::with_capacity(samples.len());
        let progress = ProgressBar::new(samples.len() as u64);

        for sample in samples {
            progress.inc(1);
            match assembler.assemble(sample) {
                Ok(record) => records.push(record),
                Err(e) if ignore_error => {
                    tracing::warn!("Ignoring error while processing '{}': {}", sample, e);
                }
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e);
                }
            }
        }
        progress.finish_and_clear();

        tracing::info!(
            "Assembled {} feature record(s) from {} sample(s)",
            records.len(),
            samples.len()
        );
        self.records = records;
        Ok(())
    }
}

impl Dataset<FeatureRecord> for AbsaDataset {
    fn get(&self, index: usize) -> Option<FeatureRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
