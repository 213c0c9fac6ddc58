//! `QIIME-Pack` prepares the import files of a QIIME2 run from a directory
//! of paired FASTQ files: a manifest for the samples, a manifest for the
//! negative controls and the sample metadata.
#[macro_use]
extern crate lazy_static;

pub mod errors;
pub mod qiime;

pub use errors::{Error, Result};
pub use qiime::config::PipelineConfig;
pub use qiime::{Pipeline, Summary};
