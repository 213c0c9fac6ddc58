//! Tab separated outputs consumed by `qiime tools import`.
use crate::errors::{Error, Result};
use crate::qiime::classifier::SampleType;
use crate::qiime::pairs::{SampleRecord, SampleTable};
use log::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const MANIFEST_HEADER: [&str; 3] = [
    "sample-id",
    "forward-absolute-filepath",
    "reverse-absolute-filepath",
];

pub const METADATA_HEADER: [&str; 4] = ["sample-id", "sequencer", "sample-type", "description"];

#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    sample_id: &'a str,
    forward: String,
    reverse: String,
}

impl<'a> From<&'a SampleRecord> for ManifestRow<'a> {
    fn from(record: &'a SampleRecord) -> Self {
        ManifestRow {
            sample_id: &record.sample_id,
            forward: record.forward_path.to_string_lossy().into_owned(),
            reverse: record.reverse_path.to_string_lossy().into_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MetadataRow<'a> {
    sample_id: &'a str,
    sequencer: &'static str,
    sample_type: &'static str,
    description: &'static str,
}

impl<'a> From<&'a SampleRecord> for MetadataRow<'a> {
    fn from(record: &'a SampleRecord) -> Self {
        let sample_type = record.sample_type();
        MetadataRow {
            sample_id: &record.sample_id,
            sequencer: record.platform.as_str(),
            sample_type: sample_type.as_str(),
            description: sample_type.description(),
        }
    }
}

/// Writes `header` then one row per item. The header is always written, even
/// when there is no row.
fn write_tsv<W, T, I>(
    writer: W,
    output_path: &Path,
    quote_style: csv::QuoteStyle,
    header: &[&str],
    rows: I,
) -> Result<usize>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let csv_error = |e: csv::Error| Error::Csv {
        file: output_path.to_path_buf(),
        source: e,
    };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(quote_style)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(header).map_err(csv_error)?;
    let mut count = 0;
    for row in rows {
        wtr.serialize(row).map_err(csv_error)?;
        count += 1;
    }
    wtr.flush().map_err(|e| Error::file_io(output_path, e))?;

    Ok(count)
}

fn create(output_path: &Path) -> Result<File> {
    File::create(output_path).map_err(|e| Error::file_io(output_path, e))
}

/// Writes the manifest of every record belonging to `sample_type`, in
/// discovery order, and returns the number of rows.
pub fn generate_manifest(
    samples: &SampleTable,
    output_path: &Path,
    sample_type: SampleType,
) -> Result<usize> {
    let count = write_manifest(create(output_path)?, output_path, samples, sample_type)?;
    info!(
        "Manifest created: {} ({} samples)",
        output_path.display(),
        count
    );

    Ok(count)
}

pub fn write_manifest<W: Write>(
    writer: W,
    output_path: &Path,
    samples: &SampleTable,
    sample_type: SampleType,
) -> Result<usize> {
    write_tsv(
        writer,
        output_path,
        // Manifest rows are taken verbatim by the importer.
        csv::QuoteStyle::Never,
        &MANIFEST_HEADER,
        samples.group(sample_type).map(ManifestRow::from),
    )
}

/// Writes one metadata row per record, samples and controls alike.
pub fn generate_metadata(samples: &SampleTable, output_path: &Path) -> Result<usize> {
    let count = write_metadata(create(output_path)?, output_path, samples)?;
    info!("Metadata created: {}", output_path.display());

    Ok(count)
}

pub fn write_metadata<W: Write>(
    writer: W,
    output_path: &Path,
    samples: &SampleTable,
) -> Result<usize> {
    write_tsv(
        writer,
        output_path,
        csv::QuoteStyle::Necessary,
        &METADATA_HEADER,
        samples.iter().map(MetadataRow::from),
    )
}
