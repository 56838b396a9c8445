use crate::config::{Layout, TemplateConfig};
use crate::error::{PayloadError, Result};
use crate::models::{RequestParameters, Tool, ToolShape};
use crate::validation::validate_parameters;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::sync::OnceLock;

/// A named rendering profile: which tool shapes it accepts, how the JSON is
/// laid out, and which parameters it fills in when the caller leaves them unset.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadTemplate {
    pub name: String,
    pub description: String,
    pub tool_shapes: Vec<ToolShape>,
    /// `None` renders on a single line.
    pub indent: Option<usize>,
    pub defaults: RequestParameters,
}

impl PayloadTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tool_shapes: vec![ToolShape::Legacy, ToolShape::Function],
            indent: Some(2),
            defaults: RequestParameters::default(),
        }
    }

    pub fn with_tool_shapes(mut self, shapes: &[ToolShape]) -> Self {
        self.tool_shapes = shapes.to_vec();
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_defaults(mut self, defaults: RequestParameters) -> Self {
        self.defaults = defaults;
        self
    }

    /// Build a user template from a config entry.
    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        if !is_valid_name(&config.name) {
            return Err(PayloadError::ConfigError(format!(
                "Template name '{}' may only contain letters, digits, '_', '-' and '.'",
                config.name
            )));
        }

        if config.tool_shapes.is_empty() {
            return Err(PayloadError::ConfigError(format!(
                "Template '{}' must accept at least one tool shape",
                config.name
            )));
        }

        let defaults = validate_parameters(&Value::Object(config.parameters.clone()))
            .map_err(|e| {
                PayloadError::ConfigError(format!("Template '{}': {}", config.name, e))
            })?;

        let indent = match config.layout {
            Layout::Pretty => Some(config.indent),
            Layout::Compact => None,
        };

        Ok(Self {
            name: config.name.clone(),
            description: config
                .description
                .clone()
                .unwrap_or_else(|| "User-defined template".to_string()),
            tool_shapes: config.tool_shapes.clone(),
            indent,
            defaults,
        })
    }

    pub fn accepts(&self, shape: ToolShape) -> bool {
        self.tool_shapes.contains(&shape)
    }

    /// Fails on the first tool whose shape this template does not accept.
    pub fn check_tools(&self, tools: &[Tool]) -> Result<()> {
        match tools.iter().find(|tool| !self.accepts(tool.shape())) {
            Some(tool) => Err(PayloadError::UnsupportedToolType(tool.tool_type().to_string())),
            None => Ok(()),
        }
    }

    /// Serialize a payload with this template's layout.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        match self.indent {
            None => Ok(serde_json::to_string(value)?),
            Some(width) => {
                let indent = " ".repeat(width);
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut buf = Vec::new();
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value.serialize(&mut serializer)?;
                String::from_utf8(buf).map_err(|e| PayloadError::Other(e.to_string()))
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
    NAME_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("template name pattern"))
        .is_match(name)
}
