use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidInput(String),
    Json(serde_json::Error),
    Zip(zip::result::ZipError),
    Xml(quick_xml::Error),
    Pdf(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(reason) => write!(f, "invalid resume payload: {reason}"),
            Error::Json(e) => write!(f, "invalid resume payload: {e}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            Error::Pdf(e) => write!(f, "PDF error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::InvalidInput(_) | Error::Pdf(_) => None,
        }
    }
}

impl Error {
    /// True for failures caused by the caller's payload rather than by
    /// serialization of a valid document.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::Json(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// A font program that cannot supply metrics. Never fatal: the caller
/// substitutes the built-in metrics and keeps rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsError {
    pub reason: String,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unusable font program: {}", self.reason)
    }
}

impl std::error::Error for MetricsError {}
