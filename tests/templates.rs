use payload_manager::config::{Layout, TemplateConfig};
use payload_manager::models::{Message, RenderRequest, RequestParameters, Tool, ToolShape};
use payload_manager::templates::{PayloadTemplate, TemplateRegistry, CHAT_WITH_TOOLS};
use payload_manager::{Manager, PayloadError};
use serde_json::{json, Value};

fn yaml_templates(yaml: &str) -> Vec<TemplateConfig> {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn test_builtin_templates_resolve() {
    let registry = TemplateRegistry::new();
    for name in [
        "chat_with_tools",
        "chatwithtools.jinja",
        "advanced",
        "advanced.jinja",
        "chat_completions",
        "responses",
        "compact",
    ] {
        assert!(registry.resolve(name).is_ok(), "{} should resolve", name);
    }
    assert_eq!(
        registry.resolve("chatwithtools.jinja").unwrap().name,
        CHAT_WITH_TOOLS
    );
}

#[test]
fn test_resolve_unknown_template() {
    let registry = TemplateRegistry::new();
    assert!(!registry.contains("nope"));
    let err = registry.resolve("nope").unwrap_err();
    assert!(matches!(err, PayloadError::TemplateNotFound(_)));
}

#[test]
fn test_list_is_sorted() {
    let registry = TemplateRegistry::new();
    let names: Vec<&str> = registry.list().iter().map(|t| t.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 5);
}

#[test]
fn test_template_config_defaults() {
    let templates = yaml_templates(
        r#"
- name: team
"#,
    );
    let config = &templates[0];
    assert_eq!(config.tool_shapes, vec![ToolShape::Legacy, ToolShape::Function]);
    assert_eq!(config.layout, Layout::Pretty);
    assert_eq!(config.indent, 2);
    assert!(config.parameters.is_empty());
}

#[test]
fn test_user_templates_from_config() {
    let templates = yaml_templates(
        r#"
- name: precise
  description: Deterministic output
  tool_shapes: [function]
  layout: compact
  parameters:
    temperature: 0.0
    max_tokens: 512
- name: bad name
- name: chat_completions
  layout: compact
- name: wrong-param
  parameters:
    stream: "sometimes"
"#,
    );
    let registry = TemplateRegistry::from_config(&templates);

    let precise = registry.resolve("precise").unwrap();
    assert_eq!(precise.description, "Deterministic output");
    assert_eq!(precise.indent, None);
    assert!(!precise.accepts(ToolShape::Legacy));
    assert_eq!(precise.defaults.max_tokens, Some(512));

    // Invalid entries are skipped, built-ins are not replaced
    assert!(!registry.contains("bad name"));
    assert!(!registry.contains("wrong-param"));
    assert_eq!(registry.resolve("chat_completions").unwrap().indent, Some(2));
}

#[test]
fn test_user_templates_with_lookup_names_are_skipped() {
    let templates = yaml_templates(
        r#"
- name: mine.jinja
- name: chatwithtools
  layout: compact
- name: mine-v2
"#,
    );
    let registry = TemplateRegistry::from_config(&templates);
    let names: Vec<&str> = registry.list().iter().map(|t| t.name.as_str()).collect();

    assert!(!names.contains(&"mine.jinja"));
    assert!(!names.contains(&"chatwithtools"));
    assert!(!registry.contains("mine"));
    assert!(registry.contains("mine-v2.jinja"));

    // The alias still reaches the built-in
    assert_eq!(registry.resolve("chatwithtools").unwrap().indent, Some(2));
}

#[test]
fn test_template_defaults_fill_unset_parameters() {
    let templates = yaml_templates(
        r#"
- name: precise
  parameters:
    temperature: 0.0
    max_tokens: 512
    reasoning_effort: low
"#,
    );
    let manager = Manager::with_registry(TemplateRegistry::from_config(&templates));

    let mut parameters = RequestParameters::new();
    parameters.max_tokens = Some(64);
    let request = RenderRequest::new(vec![Message::user("hi")])
        .with_model("grok-4")
        .unwrap()
        .with_parameters(parameters);

    let payload = manager.render_chat_completions(&request, "precise").unwrap();
    let parsed: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(parsed["temperature"], json!(0.0));
    assert_eq!(parsed["max_tokens"], json!(64));
    assert_eq!(parsed["reasoning_effort"], json!("low"));
}

#[test]
fn test_register_rejects_duplicates() {
    let mut registry = TemplateRegistry::new();
    let err = registry
        .register(PayloadTemplate::new("responses", "again"))
        .unwrap_err();
    assert!(err.to_string().contains("already registered"));

    registry
        .register(
            PayloadTemplate::new("legacy-only", "Legacy tools only")
                .with_tool_shapes(&[ToolShape::Legacy]),
        )
        .unwrap();

    let manager = Manager::with_registry(registry);
    let request = RenderRequest::new(vec![Message::user("hi")])
        .with_model("m")
        .unwrap()
        .with_tools(vec![Tool::function("lookup")])
        .unwrap();
    let err = manager
        .render_chat_completions(&request, "legacy-only")
        .unwrap_err();
    match err {
        PayloadError::UnsupportedToolType(tool_type) => assert_eq!(tool_type, "function"),
        other => panic!("expected UnsupportedToolType, got {:?}", other),
    }
}
