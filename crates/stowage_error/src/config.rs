//! Store configuration errors.

use std::fmt;

/// Failure to load or interpret store configuration.
///
/// `origin` names the configuration source that failed (a file path, or
/// the layered defaults) when it is known.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Source being read when the error occurred
    pub origin: Option<String>,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Configuration error raised at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage_error::ConfigError;
    ///
    /// let err = ConfigError::new("unknown layout 'spiral'").with_origin("stowage.toml");
    /// assert_eq!(err.origin.as_deref(), Some("stowage.toml"));
    /// assert!(err.to_string().contains("stowage.toml: unknown layout"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            origin: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Record the configuration source that failed.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(origin) = &self.origin {
            write!(f, "{}: ", origin)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
