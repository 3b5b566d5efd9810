/// Simplified error system - no over-engineering!
#[derive(Debug, Clone)]
pub enum AppError {
    ValidationError(String),
    NetworkError(String),
    ServerError { status: u16, detail: Option<String> },
    DecodeError(String),
    RenderingError(String),
}

impl AppError {
    /// User-facing message: prefer the server-supplied detail, otherwise the fallback.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::ServerError {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AppError::ServerError {
                status,
                detail: Some(detail),
            } => write!(f, "Server Error ({}): {}", status, detail),
            AppError::ServerError {
                status,
                detail: None,
            } => write!(f, "Server Error ({})", status),
            AppError::DecodeError(msg) => write!(f, "Decode Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Simple convenience type aliases
pub type NetworkResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
