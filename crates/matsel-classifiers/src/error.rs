use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures while reading the labelled material table.
#[derive(Debug)]
pub enum DatasetError {
    MissingFile(PathBuf),
    /// Required columns absent from the header, sorted by name.
    MissingColumns(Vec<String>),
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    Empty,
    Csv(csv::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::MissingFile(path) => {
                write!(f, "CSV file not found: {}", path.display())
            }
            DatasetError::MissingColumns(columns) => {
                write!(f, "Missing columns in CSV: {}", quoted_list(columns))
            }
            DatasetError::InvalidValue { row, column, value } => write!(
                f,
                "Invalid value '{}' in column '{}' at row {}",
                value, column, row
            ),
            DatasetError::Empty => write!(f, "CSV file contains no data rows"),
            DatasetError::Csv(err) => write!(f, "Failed to parse CSV: {}", err),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err)
    }
}

/// Reasons a stratified train/test split cannot be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    InvalidTestSize(f64),
    EmptyPartition { n_samples: usize, test_size: f64 },
    ClassTooSmall { label: i32, count: usize },
    TooFewSamples { partition: &'static str, size: usize, n_classes: usize },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitError::InvalidTestSize(size) => {
                write!(f, "test_size must lie strictly between 0 and 1, got {}", size)
            }
            SplitError::EmptyPartition { n_samples, test_size } => write!(
                f,
                "test_size={} with {} samples leaves an empty partition",
                test_size, n_samples
            ),
            SplitError::ClassTooSmall { label, count } => write!(
                f,
                "class {} has only {} member(s); stratified split needs at least 2",
                label, count
            ),
            SplitError::TooFewSamples {
                partition,
                size,
                n_classes,
            } => write!(
                f,
                "{} partition of {} rows cannot hold all {} classes",
                partition, size, n_classes
            ),
        }
    }
}

impl Error for SplitError {}

/// Failures raised by classifier fitting or inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    NotFitted,
    EmptyTrainingSet,
    SingleClass(i32),
    LengthMismatch { rows: usize, labels: usize },
    ShapeMismatch { expected: usize, found: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::NotFitted => write!(f, "Model has not been fitted"),
            ModelError::EmptyTrainingSet => write!(f, "Cannot fit a model on zero rows"),
            ModelError::SingleClass(label) => write!(
                f,
                "Training labels contain only class {}; two classes are required",
                label
            ),
            ModelError::LengthMismatch { rows, labels } => write!(
                f,
                "Feature matrix has {} rows but {} labels were given",
                rows, labels
            ),
            ModelError::ShapeMismatch { expected, found } => write!(
                f,
                "Expected {} feature columns, found {}",
                expected, found
            ),
        }
    }
}

impl Error for ModelError {}

/// Failures while persisting or reloading a model bundle.
#[derive(Debug)]
pub enum BundleError {
    MissingFile(PathBuf),
    Io(std::io::Error),
    Malformed(serde_json::Error),
    Invalid,
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BundleError::MissingFile(path) => write!(
                f,
                "Model bundle not found at {}. Run `matsel train` first.",
                path.display()
            ),
            BundleError::Io(err) => write!(f, "Bundle I/O failed: {}", err),
            BundleError::Malformed(err) => write!(f, "Model bundle could not be decoded: {}", err),
            BundleError::Invalid => {
                write!(f, "Invalid model bundle. Expected model and feature_columns.")
            }
        }
    }
}

impl Error for BundleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BundleError::Io(err) => Some(err),
            BundleError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::Io(err)
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::Malformed(err)
    }
}

/// Render names the way the training tool always has: `['a', 'b']`.
pub fn quoted_list<S: AsRef<str>>(names: &[S]) -> String {
    let inner = names
        .iter()
        .map(|name| format!("'{}'", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}
