use thiserror::Error;

/// Errors that can occur while loading, reshaping or plotting usage data
#[derive(Debug, Error)]
pub enum PlotError {
    /// Isolated-environment marker variable is not set
    #[error("Run this program from a venv to avoid polluting your system.")]
    NotIsolated,

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame reading, casting or construction error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// CSV writing error (usage recorder)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the input file
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    /// A column named in an unpivot does not exist
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Unpivot called without any value column
    #[error("No value columns to unpivot")]
    NoValueColumns,

    /// Nothing left to draw
    #[error("No data to plot")]
    EmptyData,

    /// Drawing or image encoding error
    #[error("Render error: {0}")]
    Render(String),

    /// Font file could not be registered
    #[error("Font error: {0}")]
    Font(String),

    /// Configuration error (unknown property, invalid default, bad verbosity)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
