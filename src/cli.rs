use crate::templates::{CHAT_COMPLETIONS, CHAT_WITH_TOOLS, RESPONSES};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Which request shape to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// `/v1/chat/completions`
    ChatCompletions,
    /// `/v1/responses`
    Responses,
    /// Deprecated chat-with-tools entry point
    #[default]
    Legacy,
}

impl Endpoint {
    pub fn default_template(&self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => CHAT_COMPLETIONS,
            Endpoint::Responses => RESPONSES,
            Endpoint::Legacy => CHAT_WITH_TOOLS,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "payload-manager")]
#[command(about = "Generate validated JSON payloads for chat-completion APIs", long_about = None)]
pub struct Args {
    #[arg(long = "model", help = "Model name (default: grok-beta)")]
    pub model: Option<String>,

    #[arg(
        short = 'm',
        long = "message",
        help = "User message",
        required_unless_present_any = ["request", "list_templates", "config_init"]
    )]
    pub message: Option<String>,

    #[arg(long = "system", help = "System message placed before the user message")]
    pub system: Option<String>,

    #[arg(
        long = "tools",
        num_args = 1..,
        help = "Legacy tool names, rendered as {\"type\": NAME, \"name\": NAME} (legacy endpoint default: web_search)"
    )]
    pub tools: Vec<String>,

    #[arg(long = "no-tools", help = "Render an empty tool list", conflicts_with = "tools")]
    pub no_tools: bool,

    #[arg(
        long = "function-tools",
        help = "JSON or YAML file holding a list of function tool definitions"
    )]
    pub function_tools: Option<PathBuf>,

    #[arg(
        long = "request",
        help = "JSON or YAML request document ('-' reads JSON from stdin)",
        conflicts_with_all = ["message", "system"]
    )]
    pub request: Option<PathBuf>,

    #[arg(long = "endpoint", value_enum, help = "Payload shape to render")]
    pub endpoint: Option<Endpoint>,

    #[arg(short = 't', long = "template", help = "Template name")]
    pub template: Option<String>,

    #[arg(
        short = 'p',
        long = "param",
        value_parser = parse_param,
        help = "Extra request parameter KEY=VALUE (VALUE is parsed as JSON, else taken as a string)"
    )]
    pub params: Vec<(String, Value)>,

    #[arg(long = "temperature", help = "Sampling temperature")]
    pub temperature: Option<f64>,

    #[arg(long = "max-tokens", help = "Maximum tokens to generate")]
    pub max_tokens: Option<u32>,

    #[arg(long = "stream", help = "Request a streaming response")]
    pub stream: bool,

    #[arg(long = "highlight", help = "Syntax-highlight the payload on a terminal")]
    pub highlight: bool,

    #[arg(long = "list-templates", help = "List available templates and exit")]
    pub list_templates: bool,

    #[arg(long = "config", help = "Path to a config file")]
    pub config: Option<PathBuf>,

    #[arg(long = "config-init", help = "Write an example config file and exit")]
    pub config_init: bool,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,
}

/// Parse `KEY=VALUE`. VALUE is JSON when it parses as JSON, otherwise a string.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{}': expected KEY=VALUE", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{}': empty key", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_param_json_and_string() {
        assert_eq!(parse_param("temperature=0.5").unwrap(), ("temperature".to_string(), json!(0.5)));
        assert_eq!(parse_param("stop=[\"\\n\"]").unwrap().1, json!(["\n"]));
        assert_eq!(parse_param("user=alice").unwrap().1, json!("alice"));
        assert_eq!(parse_param("note=a=b").unwrap().1, json!("a=b"));
    }

    #[test]
    fn test_parse_param_rejects_missing_equals() {
        assert!(parse_param("temperature").is_err());
        assert!(parse_param("=1").is_err());
    }

    #[test]
    fn test_message_required() {
        assert!(Args::try_parse_from(["payload-manager"]).is_err());
        assert!(Args::try_parse_from(["payload-manager", "--list-templates"]).is_ok());
    }
}
