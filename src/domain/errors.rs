use derive_more::{Display, From};

/// Root error type. The simulation core itself never fails; errors come from
/// the edges: configuration parsing, catalog lookups and canvas access.
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(ValidationError),
    #[display(fmt = "Configuration Error: {}", _0)]
    Configuration(ConfigurationError),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(RenderingError),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ValidationError {
    #[display(fmt = "symbol cannot be empty")]
    EmptySymbol,
    #[display(fmt = "{} must be finite, got {}", field, value)]
    NonFinite { field: &'static str, value: f64 },
    #[display(fmt = "{} must not be negative, got {}", field, value)]
    Negative { field: &'static str, value: f64 },
    #[display(fmt = "invalid color '{}'", _0)]
    InvalidColor(String),
    #[display(fmt = "unknown instrument '{}'", _0)]
    UnknownInstrument(String),
    #[display(fmt = "duplicate instrument '{}'", _0)]
    DuplicateInstrument(String),
    #[display(fmt = "instrument catalog is empty")]
    EmptyCatalog,
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConfigurationError {
    #[display(fmt = "invalid parameter '{}': {}", name, reason)]
    InvalidParameter { name: &'static str, reason: String },
    #[display(fmt = "parse failed: {}", _0)]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum RenderingError {
    #[display(fmt = "canvas '{}' not found", _0)]
    CanvasNotFound(String),
    #[display(fmt = "2D context unavailable: {}", _0)]
    ContextUnavailable(String),
    #[display(fmt = "draw call failed: {}", _0)]
    DrawFailed(String),
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Configuration(ConfigurationError::Parse(error.to_string()))
    }
}

impl ConfigurationError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidParameter { name, reason: reason.into() }
    }
}

pub type DomainResult<T> = Result<T, AppError>;
pub type ConfigResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
