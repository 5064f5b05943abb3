use std::fmt;
use std::path::PathBuf;

/// Error types for sfs-stats operations
#[derive(Debug)]
pub enum StatsError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Results directory does not exist
    MissingInput(String),

    /// A `.volume` line does not carry an integer in its fifth column
    MalformedRecord {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Two lines of one `.volume` file report different sizes
    InconsistentVolume {
        path: PathBuf,
        line: usize,
        expected: u64,
        found: u64,
    },

    /// A `.volume` file holds no records
    EmptyVolume { path: PathBuf },

    /// A timing file holds no `real` lines
    EmptySample { path: PathBuf },

    /// No usable `raw` volume to normalize ratios against
    MissingBaseline(String),

    /// Configuration error
    Config(String),

    /// JSON serialization error
    Json(serde_json::Error),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// Chart encoding error
    Image(image::ImageError),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Directory listing error
    FileWalking(ignore::Error),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Io(err) => write!(f, "IO error: {err}"),
            StatsError::MissingInput(path) => write!(f, "No directory {path} found"),
            StatsError::MalformedRecord {
                path,
                line,
                content,
            } => write!(
                f,
                "Malformed record: file {} line {line}: '{content}'",
                path.display()
            ),
            StatsError::InconsistentVolume {
                path,
                line,
                expected,
                found,
            } => write!(
                f,
                "Malformed record: file {} line {line}: volume {found} differs from {expected}",
                path.display()
            ),
            StatsError::EmptyVolume { path } => {
                write!(f, "Malformed record: file {} has no volume lines", path.display())
            }
            StatsError::EmptySample { path } => {
                write!(f, "Empty sample: file {} has no 'real' timing lines", path.display())
            }
            StatsError::MissingBaseline(msg) => write!(f, "Missing baseline: {msg}"),
            StatsError::Config(msg) => write!(f, "Configuration error: {msg}"),
            StatsError::Json(err) => write!(f, "JSON error: {err}"),
            StatsError::Csv(err) => write!(f, "CSV error: {err}"),
            StatsError::Image(err) => write!(f, "Chart error: {err}"),
            StatsError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            StatsError::FileWalking(err) => write!(f, "Directory listing error: {err}"),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::Io(err) => Some(err),
            StatsError::Json(err) => Some(err),
            StatsError::Csv(err) => Some(err),
            StatsError::Image(err) => Some(err),
            StatsError::TomlParsing(err) => Some(err),
            StatsError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StatsError {
    fn from(err: std::io::Error) -> Self {
        StatsError::Io(err)
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Json(err)
    }
}

impl From<csv::Error> for StatsError {
    fn from(err: csv::Error) -> Self {
        StatsError::Csv(err)
    }
}

impl From<image::ImageError> for StatsError {
    fn from(err: image::ImageError) -> Self {
        StatsError::Image(err)
    }
}

impl From<toml::de::Error> for StatsError {
    fn from(err: toml::de::Error) -> Self {
        StatsError::TomlParsing(err)
    }
}

impl From<ignore::Error> for StatsError {
    fn from(err: ignore::Error) -> Self {
        StatsError::FileWalking(err)
    }
}

/// Type alias for Results using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;
