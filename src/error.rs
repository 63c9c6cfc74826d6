//! Error types for dataset acquisition and access.
use std::io;
use std::path::PathBuf;


/// All errors that can occur while acquiring, verifying, or reading
/// a dataset.
///
/// Every error is fatal and propagates to the caller at the point of
/// detection. There is no partial-success or degraded-mode path:
/// a dataset either constructs completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset file is not in the local cache and downloading
    /// is disabled.
    #[error(
        "dataset not found at {path}. \
         Call `download(true)` on the builder to fetch it"
    )]
    NotFound {
        /// Expected location of the cached file.
        path: PathBuf,
    },

    /// The file on disk does not match its expected digest.
    /// Raised both right after a fetch and on reuse of a cached file,
    /// so a partial or corrupted cache entry is never loaded.
    #[error(
        "digest mismatch for {path}: expected {expected}, computed {computed}"
    )]
    Integrity {
        /// The file that failed verification.
        path: PathBuf,
        /// The digest the caller supplied.
        expected: String,
        /// The digest computed from the file contents.
        computed: String,
    },

    /// Caller-side misconfiguration,
    /// e.g. a declared dimensionality smaller than the data,
    /// an unknown split name,
    /// or an explicit class set missing an observed label.
    #[error("{0}")]
    Config(String),

    /// Network or HTTP failure while fetching a remote resource.
    /// The transport error is preserved unmodified as the source.
    #[error("failed to fetch {url}")]
    Transfer {
        /// The remote location that could not be fetched.
        url: String,
        /// The underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// Record access out of range.
    #[error("index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds {
        /// The requested record index.
        index: usize,
        /// The number of records in the dataset.
        len: usize,
    },

    /// Malformed LIBSVM text.
    #[error("{path}:{line}: {msg}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        /// What went wrong on that line.
        msg: String,
    },

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}


/// Convenience `Result` type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
