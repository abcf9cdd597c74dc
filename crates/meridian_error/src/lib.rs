use std::fmt;

pub type Result<T, E = MeridianError> = std::result::Result<T, E>;

/// Error type used throughout the workspace.
#[derive(Debug)]
pub struct MeridianError {
    msg: String,
    /// Source of the error, if this error was produced by wrapping some other
    /// error.
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Secondary errors encountered while handling this error, typically
    /// during cleanup. These never mask the primary error.
    suppressed: Vec<MeridianError>,
}

impl MeridianError {
    pub fn new(msg: impl Into<String>) -> Self {
        MeridianError {
            msg: msg.into(),
            source: None,
            suppressed: Vec::new(),
        }
    }

    pub fn with_source(
        msg: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        MeridianError {
            msg: msg.into(),
            source: Some(source),
            suppressed: Vec::new(),
        }
    }

    /// Attach a secondary error to this one.
    ///
    /// Used when an error occurs while recovering from `self`, for example a
    /// failure during resource teardown. The primary error remains the one
    /// reported.
    pub fn add_suppressed(&mut self, other: MeridianError) {
        self.suppressed.push(other);
    }

    pub fn suppressed(&self) -> &[MeridianError] {
        &self.suppressed
    }
}

impl fmt::Display for MeridianError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MeridianError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::fmt::Error> for MeridianError {
    fn from(value: std::fmt::Error) -> Self {
        Self::with_source("Format error", Box::new(value))
    }
}

pub trait ResultExt<T, E> {
    /// Wrap an error with a static context message.
    fn context(self, msg: &'static str) -> Result<T>;

    /// Wrap an error with a lazily computed context message.
    fn context_fn<F: Fn() -> String>(self, f: F) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &'static str) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(MeridianError::with_source(msg, Box::new(e))),
        }
    }

    fn context_fn<F: Fn() -> String>(self, f: F) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(MeridianError::with_source(f(), Box::new(e))),
        }
    }
}

pub trait OptionExt<T> {
    /// Convert an Option into a Result, erroring with the provided message if
    /// the value is missing.
    fn required(self, msg: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, msg: &'static str) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(MeridianError::new(msg)),
        }
    }
}

#[macro_export]
macro_rules! not_implemented {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        return Err($crate::MeridianError::new(format!("Not yet implemented: {msg}")));
    }};
}
