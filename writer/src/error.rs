use std::path::PathBuf;

use stdscene_document::DocumentError;
use thiserror::Error;

/// Errors from writing a scene file.
///
/// Encoding itself never fails; only the document sink can.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink could not open the output file.
    #[error("cannot open scene file '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    /// The sink failed while writing or closing the document.
    #[error("scene document output failed: {0}")]
    Sink(#[from] DocumentError),
}
