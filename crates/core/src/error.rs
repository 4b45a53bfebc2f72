/// Result alias that carries the custom [`HarmonicError`] type.
pub type Result<T> = std::result::Result<T, HarmonicError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum HarmonicError {
    /// A rejected input, such as a state hook declared with both a literal
    /// default and a getter (or neither), or a bad configuration value.
    #[error("invalid argument: {0}")]
    Argument(String),
    /// A state hook was looked up on a later render without having been
    /// declared on the first one.
    #[error("use called on an uninitialized state variable `{name}`")]
    UninitializedState { name: String },
    /// A state hook was declared again with a different value type.
    #[error("state variable `{name}` was declared with a different type")]
    StateType { name: String },
    /// In-place series updates must pair every data item with a series.
    #[error("cannot pair {expected} plotted series with {found} new series")]
    SeriesMismatch { expected: usize, found: usize },
    /// A series was given x and y arrays of different lengths.
    #[error("series has {x} x values but {y} y values")]
    SeriesLength { x: usize, y: usize },
    /// The inverse real FFT rejected its buffers.
    #[error("inverse fft failed: {0}")]
    Fft(#[from] realfft::FftError),
    /// Configuration or export JSON could not be read or written.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Drawing a figure to an image failed.
    #[error("plot rendering failed: {0}")]
    Plot(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Free-form error raised by the host or the application shell.
    #[error("{0}")]
    Message(String),
}

impl HarmonicError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Creates an [`HarmonicError::Argument`] error for a rejected input.
    pub fn argument<T: Into<String>>(msg: T) -> Self {
        Self::Argument(msg.into())
    }
}

impl From<&str> for HarmonicError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for HarmonicError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
