//! Filename conventions of the sequencing runs: sample id extraction,
//! sequencer detection and negative control detection.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample id used when no filename shape matches.
pub const UNKNOWN_SAMPLE: &str = "UNKNOWN";

/// Exact (case-sensitive) renames applied after extraction.
const SAMPLE_ALIASES: &[(&str, &str)] = &[("Poe2MN", "POE2")];

/// Evaluated in order, all case-insensitive. `ctrl` is a prefix rule while
/// `control` only matches the whole id.
const CONTROL_PATTERNS: &[&str] = &[
    r"^eau$",
    r"^water$",
    r"^blank$",
    r"^control$",
    r"^neg$",
    r"^negative$",
    r"^nc$",
    r"^ntc$",
    r"^ctrl",
    r"^blank[0-9]*$",
    r"^neg[0-9]*$",
];

lazy_static! {
    // HS24-BC2_S33_L001_R1_001.fastq.gz, HS24-BC2_R1.fastq, HS24-BC2_run2_R1.fq
    static ref NAME_SHAPES: Vec<(Regex, Platform)> = vec![
        (
            Regex::new(r"(?i)^([^_]+)_S\d+_L\d+_R[12]_\d+\.(fastq|fq)(\.gz)?$").unwrap(),
            Platform::MiSeq,
        ),
        (
            Regex::new(r"(?i)^([^_]+)_R[12]\.(fastq|fq)(\.gz)?$").unwrap(),
            Platform::ISeq,
        ),
        (
            Regex::new(r"(?i)^([^_]+)_.*_R[12]\.(fastq|fq)(\.gz)?$").unwrap(),
            Platform::Unknown,
        ),
    ];
    static ref SEQUENCER_SHAPES: Vec<(Regex, Platform)> = vec![
        (
            Regex::new(r"(?i)_S\d+_L\d+_R[12]_\d+\.(fastq|fq)(\.gz)?$").unwrap(),
            Platform::MiSeq,
        ),
        (
            Regex::new(r"(?i)_R[12]\.(fastq|fq)(\.gz)?$").unwrap(),
            Platform::ISeq,
        ),
    ];
    static ref CONTROL_RES: Vec<Regex> = CONTROL_PATTERNS
        .iter()
        .map(|pattern| Regex::new(&format!("(?i){}", pattern)).unwrap())
        .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    MiSeq,
    #[serde(rename = "iSeq")]
    ISeq,
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MiSeq => "MiSeq",
            Platform::ISeq => "iSeq",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    Sample,
    Control,
}

impl SampleType {
    pub fn from_control_flag(is_control: bool) -> SampleType {
        if is_control {
            SampleType::Control
        } else {
            SampleType::Sample
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Sample => "sample",
            SampleType::Control => "control",
        }
    }

    /// Free text written to the `description` column of the metadata.
    pub fn description(&self) -> &'static str {
        match self {
            SampleType::Sample => "Environmental sample",
            SampleType::Control => "Negative control",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of matching a filename against the naming shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleName {
    pub id: String,
    /// Platform implied by the shape which matched, `Unknown` for the
    /// generic shape and for the fallback.
    pub shape: Platform,
}

/// Everything the classifier can tell from a single forward-read filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub filename: String,
    pub sample_id: String,
    pub shape: Platform,
    pub sequencer: Platform,
    pub sample_type: SampleType,
}

impl Classification {
    pub fn is_control(&self) -> bool {
        self.sample_type == SampleType::Control
    }
}

pub fn normalize_sample_name(sample_id: String) -> String {
    match SAMPLE_ALIASES.iter().find(|(alias, _)| *alias == sample_id) {
        Some((_, canonical)) => canonical.to_string(),
        None => sample_id,
    }
}

/// Extracts the sample id from a forward-read filename.
///
/// The shapes are tried in order (MiSeq, iSeq, generic) and the first one
/// matching wins; the id is then normalized. Unmatched filenames give
/// [`UNKNOWN_SAMPLE`].
///
/// # Example
///
/// ```
/// use qiime_pack::qiime::classifier::{extract_sample, Platform};
///
/// let name = extract_sample("HS24-BC2_S33_L001_R1_001.fastq.gz");
/// assert_eq!(name.id, "HS24-BC2");
/// assert_eq!(name.shape, Platform::MiSeq);
/// ```
pub fn extract_sample(filename: &str) -> SampleName {
    for (re, platform) in NAME_SHAPES.iter() {
        if let Some(cap) = re.captures(filename) {
            return SampleName {
                id: normalize_sample_name(String::from(&cap[1])),
                shape: *platform,
            };
        }
    }

    SampleName {
        id: String::from(UNKNOWN_SAMPLE),
        shape: Platform::Unknown,
    }
}

pub fn extract_sample_name(filename: &str) -> String {
    extract_sample(filename).id
}

/// Tags the sequencer from the filename suffix alone.
///
/// NOTE: this is independent from [`extract_sample`] and both can disagree,
/// e.g. `A_run2_R1.fastq` is extracted with the generic shape but detected
/// as iSeq here.
pub fn detect_sequencer(filename: &str) -> Platform {
    SEQUENCER_SHAPES
        .iter()
        .find(|(re, _)| re.is_match(filename))
        .map(|(_, platform)| *platform)
        .unwrap_or(Platform::Unknown)
}

pub fn is_control_sample(sample_id: &str) -> bool {
    CONTROL_RES.iter().any(|re| re.is_match(sample_id))
}

pub fn classify(filename: &str) -> Classification {
    let name = extract_sample(filename);
    let sample_type = SampleType::from_control_flag(is_control_sample(&name.id));

    Classification {
        filename: String::from(filename),
        sample_id: name.id,
        shape: name.shape,
        sequencer: detect_sequencer(filename),
        sample_type,
    }
}
