use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by document sinks and format parsing.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The output file could not be opened for writing.
    #[error("cannot open '{}' for writing: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing or flushing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A node was put while no file was open.
    #[error("no output file is open")]
    NotOpen,
    /// A printf-style float format string was not understood.
    #[error("invalid float format '{0}'")]
    InvalidFloatFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn open_error_reports_path_and_source() {
        let err = DocumentError::Open {
            path: PathBuf::from("/no/such/dir/scene.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let text = err.to_string();
        assert!(text.contains("/no/such/dir/scene.yaml"));
        assert!(text.contains("missing"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts() {
        let err: DocumentError = std::io::Error::other("disk full").into();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn display_simple_variants() {
        assert_eq!(DocumentError::NotOpen.to_string(), "no output file is open");
        assert_eq!(
            DocumentError::InvalidFloatFormat("%q".into()).to_string(),
            "invalid float format '%q'"
        );
    }
}
