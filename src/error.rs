use std::path::PathBuf;

/// Everything that can stop a conversion run.
///
/// Header and attribution failures are fatal: the run stops at the first
/// file that cannot be converted so the author list is never built from a
/// partially inspected tree.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("No header comment found")]
    NoHeaderFound,

    #[error("No header comment END found")]
    NoHeaderEndFound,

    #[error("Unrecognized license: {line}")]
    UnrecognizedLicenseLine { line: String },

    #[error("Unrecognized copyright: {line}")]
    UnrecognizedCopyrightLine { line: String },

    #[error("No license found")]
    NoLicenseFound,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Attach the offending file to a per-file error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ ConvertError::File { .. } => already,
            other => ConvertError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error with any file wrapper removed.
    pub fn root_cause(&self) -> &ConvertError {
        match self {
            ConvertError::File { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The file the error was raised for, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConvertError::File { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The header line that triggered the error, if any.
    pub fn offending_line(&self) -> Option<&str> {
        match self.root_cause() {
            ConvertError::UnrecognizedLicenseLine { line }
            | ConvertError::UnrecognizedCopyrightLine { line } => Some(line),
            _ => None,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.root_cause() {
            ConvertError::InvalidArguments(_) => 2,
            _ => 1,
        }
    }
}
