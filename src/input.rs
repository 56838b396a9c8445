//! Turning command-line input into a validated [`RenderRequest`].

use crate::cli::{Args, Endpoint};
use crate::config::{Config, DEFAULT_LEGACY_TOOL};
use crate::error::{PayloadError, Result};
use crate::models::{Message, RenderRequest, RequestParameters, Tool};
use crate::validation::validate_tools;
use serde_json::{Number, Value};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn build_request(args: &Args, config: &Config) -> Result<RenderRequest> {
    let mut request = match &args.request {
        Some(path) => RenderRequest::from_value(&read_document(path)?)?,
        None => request_from_flags(args, config)?,
    };

    // The chat-completions shape always needs a model; responses only takes
    // one when given explicitly.
    if let Some(model) = &args.model {
        request = request.with_model(model.as_str())?;
    } else if request.model().is_none() && config.endpoint != Endpoint::Responses {
        request = request.with_model(config.model.as_str())?;
    }

    let parameters = cli_parameters(args)?
        .with_defaults(request.parameters())
        .with_defaults(&config.parameters);

    Ok(request.with_parameters(parameters))
}

fn request_from_flags(args: &Args, config: &Config) -> Result<RenderRequest> {
    let message = args
        .message
        .as_deref()
        .ok_or_else(|| PayloadError::schema("A user message is required"))?;

    let mut messages = Vec::new();
    if let Some(system) = &args.system {
        messages.push(Message::system(system.as_str()));
    }
    messages.push(Message::user(message));

    let mut tools: Vec<Tool> = if args.no_tools {
        Vec::new()
    } else if args.tools.is_empty()
        && args.function_tools.is_none()
        && config.endpoint == Endpoint::Legacy
    {
        vec![Tool::legacy(DEFAULT_LEGACY_TOOL, DEFAULT_LEGACY_TOOL)]
    } else {
        args.tools
            .iter()
            .map(|name| Tool::legacy(name.as_str(), name.as_str()))
            .collect()
    };

    if let Some(path) = &args.function_tools {
        tools.extend(validate_tools(&read_document(path)?)?);
    }

    RenderRequest::new(messages).with_tools(tools)
}

/// Parameters given as flags. These override everything else.
pub fn cli_parameters(args: &Args) -> Result<RequestParameters> {
    let mut parameters = RequestParameters::new();
    for (key, value) in &args.params {
        parameters.set(key, value.clone())?;
    }
    if let Some(temperature) = args.temperature {
        // NaN and infinities have no JSON form
        let number = Number::from_f64(temperature).ok_or_else(|| {
            PayloadError::schema(format!(
                "Parameter 'temperature' must be a finite number, got {}",
                temperature
            ))
        })?;
        parameters.set("temperature", Value::Number(number))?;
    }
    if let Some(max_tokens) = args.max_tokens {
        parameters.set("max_tokens", Value::from(max_tokens))?;
    }
    if args.stream {
        parameters.set("stream", Value::Bool(true))?;
    }
    Ok(parameters)
}

/// Read a JSON or YAML document from a file, or JSON from stdin for `-`.
pub fn read_document(path: &Path) -> Result<Value> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin().read_to_string(&mut contents)?;
        return Ok(serde_json::from_str(&contents)?);
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PayloadError::Other(format!("Failed to read {}: {}", path.display(), e))
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Ok(serde_json::from_str(&contents)?),
    }
}
