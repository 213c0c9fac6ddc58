use crate::errors::{Error, Result};
use crate::qiime::classifier::{self, Platform, SampleType};
use crate::qiime::config::Constants;
use linear_map::LinearMap;
use log::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One detected forward/reverse pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRecord {
    pub sample_id: String,
    pub forward_path: PathBuf,
    pub reverse_path: PathBuf,
    pub platform: Platform,
    pub is_control: bool,
}

impl SampleRecord {
    pub fn new(
        sample_id: &str,
        forward_path: PathBuf,
        reverse_path: PathBuf,
        platform: Platform,
    ) -> SampleRecord {
        SampleRecord {
            sample_id: String::from(sample_id),
            forward_path,
            reverse_path,
            platform,
            is_control: classifier::is_control_sample(sample_id),
        }
    }

    pub fn sample_type(&self) -> SampleType {
        SampleType::from_control_flag(self.is_control)
    }
}

/// Records keyed by sample id, iterated in discovery order.
///
/// Inserting an id which is already present replaces the record but keeps
/// the position of the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    records: LinearMap<String, SampleRecord>,
}

impl SampleTable {
    pub fn new() -> SampleTable {
        SampleTable {
            records: LinearMap::new(),
        }
    }

    /// Returns the replaced record, if any.
    pub fn insert(&mut self, record: SampleRecord) -> Option<SampleRecord> {
        self.records.insert(record.sample_id.clone(), record)
    }

    pub fn get(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.records.get(sample_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.values()
    }

    pub fn group(&self, sample_type: SampleType) -> impl Iterator<Item = &SampleRecord> {
        self.iter()
            .filter(move |record| record.sample_type() == sample_type)
    }

    pub fn count(&self, sample_type: SampleType) -> usize {
        self.group(sample_type).count()
    }
}

/// Outcome of scanning a directory.
#[derive(Debug, Default)]
pub struct Discovery {
    pub samples: SampleTable,
    /// Forward files without a reverse file.
    pub missing: Vec<PathBuf>,
    /// Sample ids seen more than once; the last pair found was kept.
    pub replaced: Vec<String>,
}

/// `HS24_R1.fastq` -> `HS24_R2.fastq`, every marker is replaced.
pub fn reverse_read_name(forward_name: &str) -> String {
    forward_name.replace(Constants::FORWARD_MARKER, Constants::REVERSE_MARKER)
}

/// Finds every forward-read file of `raw_data_dir` having a matching
/// reverse-read file next to it.
///
/// Entries are visited in file name order, dot-files included. Anything that
/// is not a regular file is ignored. A missing reverse file is only logged.
pub fn find_fastq_pairs(raw_data_dir: &Path) -> Result<Discovery> {
    let dir = fs::canonicalize(raw_data_dir).map_err(|e| Error::file_io(raw_data_dir, e))?;
    let mut entries = fs::read_dir(&dir)
        .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
        .map_err(|e| Error::file_io(&dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut discovery = Discovery::default();
    for entry in entries {
        let forward_path = entry.path();
        let filename = match forward_path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => {
                debug!("Skipping non UTF-8 filename: {:?}", forward_path);
                continue;
            }
        };

        if !filename.contains(Constants::FORWARD_MARKER) || !forward_path.is_file() {
            continue;
        }

        let reverse_name = reverse_read_name(&filename);
        let reverse_path = dir.join(&reverse_name);
        if !reverse_path.exists() {
            warn!(
                "{}",
                Error::MissingPair {
                    forward: forward_path.clone(),
                    reverse: reverse_path,
                }
            );
            discovery.missing.push(forward_path);
            continue;
        }

        let classification = classifier::classify(&filename);
        info!(
            "Found: {} ({}) - {} / {}",
            classification.sample_id, classification.sequencer, filename, reverse_name
        );
        info!("  -> Classified as {}", classification.sample_type);

        let record = SampleRecord::new(
            &classification.sample_id,
            forward_path,
            reverse_path,
            classification.sequencer,
        );
        if let Some(previous) = discovery.samples.insert(record) {
            warn!(
                "Sample {} found twice, {:?} replaces {:?}",
                previous.sample_id, filename, previous.forward_path
            );
            discovery.replaced.push(previous.sample_id);
        }
    }

    Ok(discovery)
}

#[cfg(test)]
mod pairs_tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            File::create(dir.join(name)).unwrap();
        }
    }

    fn record(sample_id: &str, forward: &str) -> SampleRecord {
        SampleRecord::new(
            sample_id,
            PathBuf::from(forward),
            PathBuf::from(forward.replace("_R1", "_R2")),
            Platform::ISeq,
        )
    }

    #[test]
    fn test_reverse_read_name() {
        assert_eq!(
            reverse_read_name("HS24-BC2_S33_L001_R1_001.fastq.gz"),
            "HS24-BC2_S33_L001_R2_001.fastq.gz"
        );
        assert_eq!(reverse_read_name("A_R1.fastq"), "A_R2.fastq");
    }

    #[test]
    fn test_table_keeps_first_position_on_replace() {
        let mut table = SampleTable::new();
        assert!(table.insert(record("A", "/a/A_R1.fastq")).is_none());
        assert!(table.insert(record("B", "/a/B_R1.fastq")).is_none());
        let previous = table.insert(record("A", "/b/A_R1.fastq")).unwrap();

        assert_eq!(previous.forward_path, PathBuf::from("/a/A_R1.fastq"));
        assert_eq!(table.len(), 2);
        let ids: Vec<&str> = table.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(
            table.get("A").unwrap().forward_path,
            PathBuf::from("/b/A_R1.fastq")
        );
    }

    #[test]
    fn test_table_groups() {
        let mut table = SampleTable::new();
        table.insert(record("A", "/a/A_R1.fastq"));
        table.insert(record("Blank1", "/a/Blank1_R1.fastq"));
        table.insert(record("C", "/a/C_R1.fastq"));

        assert_eq!(table.count(SampleType::Sample), 2);
        assert_eq!(table.count(SampleType::Control), 1);
        let controls: Vec<&str> = table
            .group(SampleType::Control)
            .map(|r| r.sample_id.as_str())
            .collect();
        assert_eq!(controls, vec!["Blank1"]);
    }

    #[test]
    fn test_find_fastq_pairs() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "HS24-BC2_S33_L001_R1_001.fastq.gz",
                "HS24-BC2_S33_L001_R2_001.fastq.gz",
                "Blank_R1.fastq",
                "Blank_R2.fastq",
                "Lonely_R1.fastq",
                "notes.txt",
                ".hidden_R1.fastq",
                ".hidden_R2.fastq",
            ],
        );
        fs::create_dir(dir.path().join("sub_R1")).unwrap();

        let discovery = find_fastq_pairs(dir.path()).unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        assert_eq!(discovery.samples.len(), 3);
        let ids: Vec<&str> = discovery
            .samples
            .iter()
            .map(|r| r.sample_id.as_str())
            .collect();
        assert_eq!(ids, vec![".hidden", "Blank", "HS24-BC2"]);

        let sample = discovery.samples.get("HS24-BC2").unwrap();
        assert_eq!(sample.platform, Platform::MiSeq);
        assert!(!sample.is_control);
        assert!(sample.forward_path.is_absolute());
        assert_eq!(
            sample.reverse_path,
            root.join("HS24-BC2_S33_L001_R2_001.fastq.gz")
        );

        let blank = discovery.samples.get("Blank").unwrap();
        assert_eq!(blank.platform, Platform::ISeq);
        assert!(blank.is_control);

        assert_eq!(discovery.missing, vec![root.join("Lonely_R1.fastq")]);
        assert!(discovery.replaced.is_empty());
    }

    #[test]
    fn test_find_fastq_pairs_keeps_dot_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &[".A_R1.fastq", ".A_R2.fastq"]);

        let discovery = find_fastq_pairs(dir.path()).unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        assert_eq!(discovery.samples.len(), 1);
        let record = discovery.samples.get(".A").unwrap();
        assert_eq!(record.forward_path, root.join(".A_R1.fastq"));
        assert_eq!(record.reverse_path, root.join(".A_R2.fastq"));
        assert_eq!(record.platform, Platform::ISeq);
        assert!(discovery.missing.is_empty());
    }

    #[test]
    fn test_find_fastq_pairs_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "A_R1.fastq",
                "A_R2.fastq",
                "A_run2_R1.fastq",
                "A_run2_R2.fastq",
                "B_R1.fastq",
                "B_R2.fastq",
            ],
        );

        let discovery = find_fastq_pairs(dir.path()).unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        let ids: Vec<&str> = discovery
            .samples
            .iter()
            .map(|r| r.sample_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(
            discovery.samples.get("A").unwrap().forward_path,
            root.join("A_run2_R1.fastq")
        );
        assert_eq!(discovery.replaced, vec![String::from("A")]);
    }

    #[test]
    fn test_find_fastq_pairs_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("01_raw_data");
        match find_fastq_pairs(&missing) {
            Err(Error::FileIo { file, .. }) => assert_eq!(file, missing),
            other => panic!("Unexpected result: {:?}", other.map(|d| d.samples.len())),
        }
    }
}
