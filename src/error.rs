use std::fmt;

pub const VALIDATION_MESSAGE: &str = "Please select an image first.";

/// Everything that can end an upload attempt. None of these are fatal to the
/// app; the user can reselect or resubmit right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Submit was pressed with no file selected.
    Validation,
    UnsupportedFile { name: String },
    Read(String),
    Decode(String),
    /// The request could not be sent or the response could not be retrieved.
    Transport(String),
    /// Non-2xx response. `message` is the server text, if it sent any.
    Server { status: u16, message: Option<String> },
    /// A 2xx response whose body is not a prediction.
    Parse(String),
}

impl UploadError {
    /// Text for the error region of the screen.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation => VALIDATION_MESSAGE.to_string(),
            error => format!("Error: {}", error),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Validation => write!(f, "{}", VALIDATION_MESSAGE),
            UploadError::UnsupportedFile { name } => write!(f, "Unsupported file type: {}", name),
            UploadError::Read(message) => write!(f, "could not read file: {}", message),
            UploadError::Decode(message) => write!(f, "could not decode image: {}", message),
            UploadError::Transport(message) => write!(f, "{}", message),
            UploadError::Server {
                message: Some(message),
                ..
            } => write!(f, "{}", message),
            UploadError::Server {
                status,
                message: None,
            } => write!(f, "HTTP {}", status),
            UploadError::Parse(message) => write!(f, "invalid response: {}", message),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Read(err.to_string())
    }
}

impl From<image::ImageError> for UploadError {
    fn from(err: image::ImageError) -> Self {
        UploadError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::Parse(err.to_string())
    }
}
