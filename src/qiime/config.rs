use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct Constants {}
impl Constants {
    /// Working directory of the fungal ITS workflow.
    pub const ROOTDIR: &'static str = "/nvme/bio/data_fungi/valormicro_nc";
    pub const RAW_DATA_DIR: &'static str = "01_raw_data";
    pub const DATABASE_DIR: &'static str = "98_databasefiles";

    pub const MANIFEST: &'static str = "manifest";
    pub const MANIFEST_CONTROL: &'static str = "manifest_control";
    pub const METADATA: &'static str = "sample-metadata.tsv";

    pub const FORWARD_MARKER: &'static str = "_R1";
    pub const REVERSE_MARKER: &'static str = "_R2";
}

/// Where to read the paired FASTQ files from and where to write the
/// manifests and the metadata.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::from_root(Constants::ROOTDIR)
    }
}

impl PipelineConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        input_directory: P,
        output_directory: Q,
    ) -> PipelineConfig {
        PipelineConfig {
            input_directory: input_directory.into(),
            output_directory: output_directory.into(),
        }
    }

    /// `<root>/01_raw_data` -> `<root>/98_databasefiles`
    pub fn from_root<P: AsRef<Path>>(root: P) -> PipelineConfig {
        let root = root.as_ref();
        PipelineConfig::new(
            root.join(Constants::RAW_DATA_DIR),
            root.join(Constants::DATABASE_DIR),
        )
    }

    /// Reads a config such as
    /// `{"input_directory": "/data/raw", "output_directory": "/data/qiime"}`.
    pub fn from_json_file<P: AsRef<Path>>(config_file: P) -> Result<PipelineConfig> {
        let config_file = config_file.as_ref();
        let f = File::open(config_file).map_err(|e| Error::file_io(config_file, e))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| Error::Config {
            file: config_file.to_path_buf(),
            source: e,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_directory.join(Constants::MANIFEST)
    }

    pub fn manifest_control_path(&self) -> PathBuf {
        self.output_directory.join(Constants::MANIFEST_CONTROL)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.output_directory.join(Constants::METADATA)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.input_directory,
            PathBuf::from("/nvme/bio/data_fungi/valormicro_nc/01_raw_data")
        );
        assert_eq!(
            config.metadata_path(),
            PathBuf::from("/nvme/bio/data_fungi/valormicro_nc/98_databasefiles/sample-metadata.tsv")
        );
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.json");
        fs::write(
            &config_file,
            r#"{"input_directory": "/data/raw", "output_directory": "/data/qiime"}"#,
        )
        .unwrap();

        let config = PipelineConfig::from_json_file(&config_file).unwrap();
        assert_eq!(config, PipelineConfig::new("/data/raw", "/data/qiime"));
        assert_eq!(
            config.manifest_control_path(),
            PathBuf::from("/data/qiime/manifest_control")
        );
    }

    #[test]
    fn test_from_invalid_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.json");
        fs::write(&config_file, r#"{"input_directory": "/data/raw"}"#).unwrap();

        match PipelineConfig::from_json_file(&config_file) {
            Err(Error::Config { file, .. }) => assert_eq!(file, config_file),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(matches!(
            PipelineConfig::from_json_file(dir.path().join("missing.json")),
            Err(Error::FileIo { .. })
        ));
    }
}
