use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A lightweight error carrying a message and an optional cause.
///
/// Instances are cheap to build and cheap to clone, which makes them
/// suitable as the payload of cached singletons: one `FastError` can
/// be constructed once, stored in a static, and handed out by
/// reference for the lifetime of the program.
#[derive(Debug, Clone)]
pub struct FastError {
    message: Cow<'static, str>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl FastError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        FastError {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(
        message: impl Into<Cow<'static, str>>,
        cause: impl Error + Send + Sync + 'static,
    ) -> Self {
        FastError {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Wraps an existing error, reusing its display output as the message.
    pub fn from_cause(cause: impl Error + Send + Sync + 'static) -> Self {
        FastError {
            message: Cow::Owned(cause.to_string()),
            cause: Some(Arc::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FastError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}
