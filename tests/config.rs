use payload_manager::cli::{Args, Endpoint};
use payload_manager::config::{Config, FileConfig};
use payload_manager::input::build_request;
use payload_manager::models::ToolShape;
use payload_manager::{Manager, PayloadError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn args_with_message(message: &str) -> Args {
    Args {
        message: Some(message.to_string()),
        ..Args::default()
    }
}

#[test]
fn test_load_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
defaults:
  model: grok-4
  endpoint: chat-completions
parameters:
  temperature: 0.2
templates:
  - name: precise
    tool_shapes: [function]
"#,
    )
    .unwrap();

    let file_config = FileConfig::load_from(&path).unwrap();
    assert_eq!(file_config.defaults.model.as_deref(), Some("grok-4"));
    assert_eq!(file_config.defaults.endpoint, Some(Endpoint::ChatCompletions));
    assert_eq!(file_config.templates[0].tool_shapes, vec![ToolShape::Function]);
}

#[test]
fn test_load_json_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"defaults": {"template": "compact"}}"#).unwrap();

    let file_config = FileConfig::load_from(&path).unwrap();
    assert_eq!(file_config.defaults.template.as_deref(), Some("compact"));
}

#[test]
fn test_load_invalid_config_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "defaults: [unclosed").unwrap();

    let err = FileConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.yaml"));
}

#[test]
fn test_precedence_args_env_file() {
    let file_config: FileConfig = serde_yaml::from_str(
        r#"
defaults:
  model: from-file
  template: file-template
  endpoint: responses
"#,
    )
    .unwrap();

    let config = Config::from_sources(&Args::default(), file_config.clone(), no_env).unwrap();
    assert_eq!(config.model, "from-file");
    assert_eq!(config.endpoint, Endpoint::Responses);

    let env: HashMap<&str, &str> = [
        ("PAYLOAD_MODEL", "from-env"),
        ("PAYLOAD_ENDPOINT", "chat-completions"),
        ("PAYLOAD_VERBOSE", "yes"),
    ]
    .into_iter()
    .collect();
    let config = Config::from_sources(&Args::default(), file_config.clone(), |key| {
        env.get(key).map(|v| v.to_string())
    })
    .unwrap();
    assert_eq!(config.model, "from-env");
    assert_eq!(config.endpoint, Endpoint::ChatCompletions);
    assert!(config.verbose);
    assert_eq!(config.template_name(), "file-template");

    let args = Args {
        model: Some("from-args".to_string()),
        endpoint: Some(Endpoint::Legacy),
        ..Args::default()
    };
    let config = Config::from_sources(&args, file_config, |key| {
        env.get(key).map(|v| v.to_string())
    })
    .unwrap();
    assert_eq!(config.model, "from-args");
    assert_eq!(config.endpoint, Endpoint::Legacy);
}

#[test]
fn test_defaults_without_config() {
    let config = Config::from_sources(&Args::default(), FileConfig::default(), no_env).unwrap();
    assert_eq!(config.model, "grok-beta");
    assert_eq!(config.endpoint, Endpoint::Legacy);
    assert_eq!(config.template_name(), "chat_with_tools");
    assert!(!config.highlight);
}

#[test]
fn test_invalid_env_endpoint() {
    let result = Config::from_sources(&Args::default(), FileConfig::default(), |key| {
        (key == "PAYLOAD_ENDPOINT").then(|| "carrier-pigeon".to_string())
    });
    assert!(result.is_err());
}

#[test]
fn test_invalid_file_parameters() {
    let file_config: FileConfig =
        serde_yaml::from_str("parameters:\n  tools: []\n").unwrap();
    let err = Config::from_sources(&Args::default(), file_config, no_env).unwrap_err();
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn test_write_example_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.yaml");

    FileConfig::write_example(&path).unwrap();
    let loaded = FileConfig::load_from(&path).unwrap();
    assert_eq!(loaded.templates[0].name, "precise");

    // Never overwrites
    assert!(FileConfig::write_example(&path).is_err());
}

#[test]
fn test_cli_default_legacy_payload() {
    let args = args_with_message("Test message");
    let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
    let request = build_request(&args, &config).unwrap();

    let rendered = Manager::new()
        .render_chat_with_tools(&request, config.template_name())
        .unwrap();
    assert!(rendered.payload.contains("\"model\": \"grok-beta\""));
    assert!(rendered.payload.contains("\"content\": \"Test message\""));
    assert!(rendered.payload.contains("\"type\": \"web_search\""));
}

#[test]
fn test_cli_parameters_override_file_parameters() {
    let file_config: FileConfig =
        serde_yaml::from_str("parameters:\n  temperature: 0.9\n  max_tokens: 10\n").unwrap();
    let args = Args {
        temperature: Some(0.1),
        params: vec![("seed".to_string(), json!(7))],
        stream: true,
        system: Some("Be brief.".to_string()),
        tools: vec!["web_search".to_string(), "x_search".to_string()],
        ..args_with_message("hi")
    };
    let config = Config::from_sources(&args, file_config, no_env).unwrap();
    let request = build_request(&args, &config).unwrap();

    let parameters = request.parameters();
    assert_eq!(parameters.temperature.as_ref().and_then(|n| n.as_f64()), Some(0.1));
    assert_eq!(parameters.max_tokens, Some(10));
    assert_eq!(parameters.seed, Some(7));
    assert_eq!(parameters.stream, Some(true));
    assert_eq!(request.messages()[0].role, "system");
    assert_eq!(request.tools().map(|tools| tools.len()), Some(2));
}

#[test]
fn test_cli_request_document_and_function_tools() {
    let temp_dir = TempDir::new().unwrap();
    let request_path = temp_dir.path().join("request.json");
    fs::write(
        &request_path,
        r#"{"input": [{"role": "user", "content": "hi"}], "temperature": 0.3}"#,
    )
    .unwrap();

    let args = Args {
        request: Some(request_path),
        endpoint: Some(Endpoint::Responses),
        temperature: Some(0.8),
        ..Args::default()
    };
    let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
    let request = build_request(&args, &config).unwrap();
    assert!(request.model().is_none());
    assert_eq!(
        request.parameters().temperature.as_ref().and_then(|n| n.as_f64()),
        Some(0.8)
    );

    let tools_path = temp_dir.path().join("tools.yaml");
    fs::write(
        &tools_path,
        r#"
- type: function
  function:
    name: lookup
"#,
    )
    .unwrap();
    let args = Args {
        function_tools: Some(tools_path),
        endpoint: Some(Endpoint::ChatCompletions),
        ..args_with_message("hi")
    };
    let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
    let request = build_request(&args, &config).unwrap();
    let payload = Manager::new()
        .render_chat_completions(&request, config.template_name())
        .unwrap();
    let parsed: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(parsed["tools"][0]["function"]["name"], "lookup");
    assert_eq!(parsed["model"], "grok-beta");
}

#[test]
fn test_verbose_precedence_sets_log_level() {
    let file_config: FileConfig = serde_yaml::from_str("defaults:\n  verbose: true\n").unwrap();

    let config = Config::from_sources(&Args::default(), file_config.clone(), no_env).unwrap();
    assert!(config.verbose);
    assert_eq!(config.log_level(), "debug");

    // The environment beats the file
    let config = Config::from_sources(&Args::default(), file_config.clone(), |key| {
        (key == "PAYLOAD_VERBOSE").then(|| "false".to_string())
    })
    .unwrap();
    assert!(!config.verbose);
    assert_eq!(config.log_level(), "error");

    let args = Args {
        verbose: true,
        ..Args::default()
    };
    let config = Config::from_sources(&args, FileConfig::default(), |key| {
        (key == "PAYLOAD_VERBOSE").then(|| "0".to_string())
    })
    .unwrap();
    assert_eq!(config.log_level(), "debug");

    let config = Config::from_sources(&Args::default(), FileConfig::default(), no_env).unwrap();
    assert_eq!(config.log_level(), "error");
}

#[test]
fn test_cli_rejects_non_finite_temperature() {
    for temperature in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let args = Args {
            temperature: Some(temperature),
            ..args_with_message("hi")
        };
        let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
        let err = build_request(&args, &config).unwrap_err();
        assert!(err.to_string().contains("temperature"), "{}", temperature);
    }
}

#[test]
fn test_cli_integer_temperature_renders_verbatim() {
    let args = Args {
        temperature: Some(1.0),
        max_tokens: Some(256),
        ..args_with_message("hi")
    };
    let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
    let request = build_request(&args, &config).unwrap();
    let rendered = Manager::new()
        .render_chat_with_tools(&request, config.template_name())
        .unwrap();

    let parsed: Value = serde_json::from_str(&rendered.payload).unwrap();
    assert_eq!(parsed["temperature"].as_f64(), Some(1.0));
    assert_eq!(parsed["max_tokens"], json!(256));
    assert!(!rendered.payload.contains("null"));
}

#[test]
fn test_cli_tools_are_validated() {
    let args = Args {
        tools: vec![String::new()],
        ..args_with_message("hi")
    };
    let config = Config::from_sources(&args, FileConfig::default(), no_env).unwrap();
    let err = build_request(&args, &config).unwrap_err();
    assert!(matches!(err, PayloadError::UnsupportedToolType(_)));
}
