/// Failure while loading datasets or configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Io { path: String, message: String },
    Json(String),
    MissingOrigin,
    MultipleOrigins(Vec<String>),
    InvalidRecord { day: usize, reason: String },
    InvalidConfig { field: String, reason: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "read {path}: {message}"),
            LoadError::Json(msg) => write!(f, "invalid json: {msg}"),
            LoadError::MissingOrigin => write!(f, "city dataset has no origin"),
            LoadError::MultipleOrigins(names) => {
                write!(f, "city dataset has more than one origin: {}", names.join(", "))
            }
            LoadError::InvalidRecord { day, reason } => {
                write!(f, "timeline record {day} is invalid: {reason}")
            }
            LoadError::InvalidConfig { field, reason } => {
                write!(f, "config field {field} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e.to_string())
    }
}

/// A display collaborator could not apply an update.
///
/// The driver logs these and keeps going; they never abort a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "display sink failed: {}", self.0)
    }
}

impl std::error::Error for SinkError {}
