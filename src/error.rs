use std::fmt;

#[derive(Debug)]
pub enum PayloadError {
    /// Malformed messages, tools, model or parameters.
    Schema(String),
    /// A tool type the selected template does not recognize.
    UnsupportedToolType(String),
    TemplateNotFound(String),
    ConfigError(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl PayloadError {
    pub fn schema(msg: impl Into<String>) -> Self {
        PayloadError::Schema(msg.into())
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, PayloadError::Schema(_))
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Schema(msg) => write!(f, "Schema error: {}", msg),
            PayloadError::UnsupportedToolType(tool_type) => {
                write!(f, "Unsupported tool type: '{}'", tool_type)
            }
            PayloadError::TemplateNotFound(name) => write!(f, "Template not found: '{}'", name),
            PayloadError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PayloadError::IoError(e) => write!(f, "IO error: {}", e),
            PayloadError::JsonError(e) => write!(f, "JSON error: {}", e),
            PayloadError::YamlError(e) => write!(f, "YAML error: {}", e),
            PayloadError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::IoError(e) => Some(e),
            PayloadError::JsonError(e) => Some(e),
            PayloadError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PayloadError {
    fn from(err: std::io::Error) -> Self {
        PayloadError::IoError(err)
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for PayloadError {
    fn from(err: serde_yaml::Error) -> Self {
        PayloadError::YamlError(err)
    }
}

impl From<anyhow::Error> for PayloadError {
    fn from(err: anyhow::Error) -> Self {
        PayloadError::ConfigError(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, PayloadError>;
