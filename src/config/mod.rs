mod defaults;
mod templates;

use crate::cli::{Args, Endpoint};
use crate::error::{PayloadError, Result};
use crate::models::RequestParameters;
use crate::validation::validate_parameters;
use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{parse_bool_flag, DEFAULT_LEGACY_TOOL, DEFAULT_MODEL};
pub use templates::{Layout, TemplateConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

/// Contents of a `payload-manager` config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

/// Effective settings after merging CLI flags, environment and config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub model: String,
    pub template: Option<String>,
    pub endpoint: Endpoint,
    pub highlight: bool,
    pub verbose: bool,
    /// Request parameters from the config file, lowest precedence.
    pub parameters: RequestParameters,
    pub templates: Vec<TemplateConfig>,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = match &args.config {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load()?,
        };
        Self::from_sources(args, file_config, |key| env::var(key).ok())
    }

    /// Merge settings: CLI args > environment > config file > defaults.
    pub fn from_sources<F>(args: &Args, file_config: FileConfig, env_var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = args
            .model
            .clone()
            .or_else(|| env_var("PAYLOAD_MODEL"))
            .or(file_config.defaults.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let template = args
            .template
            .clone()
            .or_else(|| env_var("PAYLOAD_TEMPLATE"))
            .or(file_config.defaults.template.clone());

        let env_endpoint = match env_var("PAYLOAD_ENDPOINT") {
            Some(value) => Some(Endpoint::from_str(&value, true).map_err(|_| {
                PayloadError::ConfigError(format!(
                    "PAYLOAD_ENDPOINT has invalid value '{}' (expected chat-completions, responses or legacy)",
                    value
                ))
            })?),
            None => None,
        };
        let endpoint = args
            .endpoint
            .or(env_endpoint)
            .or(file_config.defaults.endpoint)
            .unwrap_or_default();

        let verbose = args.verbose
            || env_var("PAYLOAD_VERBOSE")
                .map(|v| parse_bool_flag(&v))
                .or(file_config.defaults.verbose)
                .unwrap_or(false);

        let highlight = args.highlight || file_config.defaults.highlight.unwrap_or(false);

        let parameters = validate_parameters(&Value::Object(file_config.parameters))
            .map_err(|e| PayloadError::ConfigError(format!("Invalid 'parameters' section: {}", e)))?;

        Ok(Config {
            model,
            template,
            endpoint,
            highlight,
            verbose,
            parameters,
            templates: file_config.templates,
        })
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "error"
        }
    }

    /// The template to use: explicit choice, else the endpoint's default.
    pub fn template_name(&self) -> &str {
        self.template
            .as_deref()
            .unwrap_or_else(|| self.endpoint.default_template())
    }
}

impl FileConfig {
    /// Load the first config file found, or defaults when there is none.
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Local override
            PathBuf::from(".payload-manager.yaml"),
            PathBuf::from(".payload-manager.yml"),
            PathBuf::from(".payload-manager.json"),
        ];

        if let Some(config_dir) = global_config_dir() {
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.yml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    pub fn example() -> Self {
        let mut parameters = Map::new();
        parameters.insert("temperature".to_string(), Value::from(0.7));

        let mut precise = Map::new();
        precise.insert("temperature".to_string(), Value::from(0.0));
        precise.insert("max_tokens".to_string(), Value::from(1024));

        FileConfig {
            defaults: DefaultsConfig {
                model: Some(DEFAULT_MODEL.to_string()),
                template: None,
                endpoint: Some(Endpoint::ChatCompletions),
                highlight: Some(false),
                verbose: None,
            },
            parameters,
            templates: vec![TemplateConfig {
                name: "precise".to_string(),
                description: Some("Deterministic function-calling payloads".to_string()),
                tool_shapes: vec![crate::models::ToolShape::Function],
                layout: Layout::Pretty,
                indent: 2,
                parameters: precise,
            }],
        }
    }

    /// Write the example config to `path`. Never overwrites an existing file.
    pub fn write_example(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_yaml::to_string(&Self::example())?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

pub fn global_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("payload-manager"))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}
