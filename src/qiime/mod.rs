pub mod classifier;
pub mod config;
pub mod pairs;
pub mod report;

use crate::errors::{Error, Result};
use classifier::{Platform, SampleType};
use config::PipelineConfig;
use log::*;
use pairs::SampleTable;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SampleSummary {
    sample_id: String,
    sequencer: Platform,
}

impl SampleSummary {
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn sequencer(&self) -> Platform {
        self.sequencer
    }
}

/// What a run found and wrote.
#[derive(Debug, Serialize, Clone, Default)]
pub struct Summary {
    samples: Vec<SampleSummary>,
    controls: Vec<SampleSummary>,
    missing_pairs: Vec<PathBuf>,
    replaced_samples: Vec<String>,
    files: Vec<PathBuf>,
}

impl Summary {
    fn collect(samples: &SampleTable, sample_type: SampleType) -> Vec<SampleSummary> {
        samples
            .group(sample_type)
            .map(|record| SampleSummary {
                sample_id: record.sample_id.clone(),
                sequencer: record.platform,
            })
            .collect()
    }

    pub fn samples(&self) -> &[SampleSummary] {
        &self.samples
    }

    pub fn controls(&self) -> &[SampleSummary] {
        &self.controls
    }

    pub fn missing_pairs(&self) -> &[PathBuf] {
        &self.missing_pairs
    }

    pub fn replaced_samples(&self) -> &[String] {
        &self.replaced_samples
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== SUMMARY ===")?;
        writeln!(f, "Main samples: {}", self.samples.len())?;
        for sample in &self.samples {
            writeln!(f, "  - {} ({})", sample.sample_id, sample.sequencer)?;
        }

        if !self.controls.is_empty() {
            writeln!(f, "Controls: {}", self.controls.len())?;
            for sample in &self.controls {
                writeln!(f, "  - {} ({})", sample.sample_id, sample.sequencer)?;
            }
        }

        if !self.missing_pairs.is_empty() {
            writeln!(f, "Skipped (missing R2): {}", self.missing_pairs.len())?;
            for path in &self.missing_pairs {
                writeln!(f, "  - {}", path.display())?;
            }
        }

        writeln!(f, "\nGenerated files:")?;
        for path in &self.files {
            writeln!(f, "  - {}", path.display())?;
        }

        Ok(())
    }
}

/// Directory listing -> classified samples -> manifests and metadata.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Pipeline {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the whole pass.
    ///
    /// Nothing is written when no pair is found: the run fails with
    /// [`Error::NoSamples`] before the output directory is created. The
    /// control manifest is only written when there is at least one control.
    pub fn run(&self) -> Result<Summary> {
        info!(
            "Scanning directory: {}",
            self.config.input_directory.display()
        );
        let discovery = pairs::find_fastq_pairs(&self.config.input_directory)?;
        let samples = &discovery.samples;

        if samples.is_empty() {
            return Err(Error::NoSamples {
                dir: self.config.input_directory.clone(),
            });
        }

        fs::create_dir_all(&self.config.output_directory)
            .map_err(|e| Error::file_io(&self.config.output_directory, e))?;

        let mut files = vec![];

        let manifest_path = self.config.manifest_path();
        report::generate_manifest(samples, &manifest_path, SampleType::Sample)?;
        files.push(manifest_path);

        if samples.count(SampleType::Control) > 0 {
            let manifest_control_path = self.config.manifest_control_path();
            report::generate_manifest(samples, &manifest_control_path, SampleType::Control)?;
            files.push(manifest_control_path);
        } else {
            info!("No control detected - manifest_control is not generated");
        }

        let metadata_path = self.config.metadata_path();
        report::generate_metadata(samples, &metadata_path)?;
        files.push(metadata_path);

        Ok(Summary {
            samples: Summary::collect(samples, SampleType::Sample),
            controls: Summary::collect(samples, SampleType::Control),
            missing_pairs: discovery.missing,
            replaced_samples: discovery.replaced,
            files,
        })
    }
}
