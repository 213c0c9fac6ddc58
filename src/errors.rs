use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing rows to \"{file}\": {source}")]
    Csv {
        file: PathBuf,
        source: csv::Error,
    },

    #[error("Cannot load the configuration file \"{file}\": {source}")]
    Config {
        file: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No paired FASTQ files found in \"{dir}\"")]
    NoSamples { dir: PathBuf },

    #[error("Missing R2 file \"{reverse}\" for \"{forward}\"")]
    MissingPair { forward: PathBuf, reverse: PathBuf },
}

impl Error {
    pub fn file_io<P: Into<PathBuf>>(file: P, source: std::io::Error) -> Error {
        Error::FileIo {
            file: file.into(),
            source,
        }
    }

    /// Maps the error onto the `sysexits` status the binary exits with.
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Error::NoSamples { .. } => exitcode::DATAERR,
            Error::Config { .. } => exitcode::CONFIG,
            Error::Json(_) => exitcode::SOFTWARE,
            Error::FileIo { .. } | Error::Csv { .. } | Error::MissingPair { .. } => {
                exitcode::IOERR
            }
        }
    }
}

#[cfg(test)]
mod errors_tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        let err = Error::NoSamples {
            dir: PathBuf::from("/data"),
        };
        assert_eq!(err.exit_code(), exitcode::DATAERR);
        assert_eq!(
            err.to_string(),
            "No paired FASTQ files found in \"/data\""
        );

        let err = Error::file_io(
            "/data/manifest",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), exitcode::IOERR);
    }
}
