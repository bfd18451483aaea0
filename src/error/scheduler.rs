use std::error::Error as StdError;
use std::fmt;

/// Broad category of a [`SchedulerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User supplied something the shell cannot accept (e.g. a non-numeric CRN).
    InvalidInput,
    Io,
    Parse,
    Http,
    Other,
}

#[derive(Debug)]
pub struct SchedulerError {
    pub kind: ErrorKind,
    pub message: String,
    source: Option<Box<dyn StdError + 'static>>,
}

impl SchedulerError {
    pub fn with_kind(kind: ErrorKind, message: &str) -> Self {
        SchedulerError {
            kind,
            message: message.to_string(),
            source: None,
        }
    }

    pub fn invalid_input(message: &str) -> Self {
        Self::with_kind(ErrorKind::InvalidInput, message)
    }

    /// Prefix the message with some context, keeping kind and source.
    pub fn context(mut self, context: &str) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }

    /// The wrapped error, if this one was converted from another.
    pub fn source_error(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchedulerError({:?}): {}", self.kind, self.message)
    }
}

fn classify(err: &(dyn StdError + 'static)) -> ErrorKind {
    if err.is::<std::io::Error>() {
        ErrorKind::Io
    } else if err.is::<serde_json::Error>() || err.is::<toml::de::Error>() {
        ErrorKind::Parse
    } else if err.is::<reqwest::Error>() || err.is::<reqwest_middleware::Error>() {
        ErrorKind::Http
    } else {
        ErrorKind::Other
    }
}

// Lets `?` lift any std error into a SchedulerError.
impl<E: StdError + 'static> From<E> for SchedulerError {
    fn from(err: E) -> Self {
        let kind = classify(&err);
        SchedulerError {
            kind,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err: SchedulerError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.source_error().is_some());
        assert_eq!(err.message, "gone");
    }

    #[test]
    fn json_errors_are_parse_errors() {
        let err: SchedulerError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn context_prefixes_message() {
        let err = SchedulerError::invalid_input("CRN must be numeric.").context("add");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.message, "add: CRN must be numeric.");
        assert!(err.to_string().contains("InvalidInput"));
    }
}
