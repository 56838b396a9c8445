use crate::config::TemplateConfig;
use crate::error::{PayloadError, Result};
use crate::models::ToolShape;
use std::collections::HashMap;

use super::template::PayloadTemplate;

pub const CHAT_WITH_TOOLS: &str = "chat_with_tools";
pub const ADVANCED: &str = "advanced";
pub const CHAT_COMPLETIONS: &str = "chat_completions";
pub const RESPONSES: &str = "responses";
pub const COMPACT: &str = "compact";

/// Old template file names and the built-ins that replaced them.
const ALIASES: [(&str, &str); 1] = [("chatwithtools", CHAT_WITH_TOOLS)];

const LEGACY_SUFFIX: &str = ".jinja";

#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, PayloadTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// A registry holding only the built-in templates.
    pub fn new() -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
        };
        registry.register_builtin_templates();
        registry
    }

    /// Built-ins plus the user templates from the config file.
    pub fn from_config(configs: &[TemplateConfig]) -> Self {
        let mut registry = Self::new();
        registry.register_user_templates(configs);
        registry
    }

    fn register_builtin_templates(&mut self) {
        let both = [ToolShape::Legacy, ToolShape::Function];
        let function_only = [ToolShape::Function];

        let builtins = [
            PayloadTemplate::new(
                CHAT_WITH_TOOLS,
                "Chat payload with tools; accepts legacy and function tools",
            )
            .with_tool_shapes(&both),
            PayloadTemplate::new(
                ADVANCED,
                "Chat payload with tools and sampling parameters",
            )
            .with_tool_shapes(&both),
            PayloadTemplate::new(
                CHAT_COMPLETIONS,
                "Payload for /v1/chat/completions; function tools only",
            )
            .with_tool_shapes(&function_only),
            PayloadTemplate::new(RESPONSES, "Payload for /v1/responses; function tools only")
                .with_tool_shapes(&function_only),
            PayloadTemplate::new(COMPACT, "Single-line payload; accepts both tool shapes")
                .with_tool_shapes(&both)
                .with_indent(None),
        ];

        for template in builtins {
            self.templates.insert(template.name.clone(), template);
        }
    }

    fn register_user_templates(&mut self, configs: &[TemplateConfig]) {
        // Built-ins are already in place, so a clashing user template loses
        for config in configs {
            match PayloadTemplate::from_config(config).and_then(|t| self.register(t)) {
                Ok(()) => tracing::debug!(template = %config.name, "registered user template"),
                Err(e) => {
                    tracing::warn!(template = %config.name, error = %e, "skipping user template")
                }
            }
        }
    }

    /// Add a template. Names must be unique and must resolve to themselves:
    /// `foo.jinja` or an alias such as `chatwithtools` could never be looked up.
    pub fn register(&mut self, template: PayloadTemplate) -> Result<()> {
        if canonical_name(&template.name) != template.name {
            return Err(PayloadError::ConfigError(format!(
                "Template name '{}' is reserved for lookups of '{}'",
                template.name,
                canonical_name(&template.name)
            )));
        }
        if self.templates.contains_key(&template.name) {
            return Err(PayloadError::ConfigError(format!(
                "Template '{}' is already registered",
                template.name
            )));
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&PayloadTemplate> {
        let key = canonical_name(name);
        self.templates
            .get(key)
            .ok_or_else(|| PayloadError::TemplateNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(canonical_name(name))
    }

    /// All templates, sorted by name.
    pub fn list(&self) -> Vec<&PayloadTemplate> {
        let mut templates: Vec<&PayloadTemplate> = self.templates.values().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }
}

fn canonical_name(name: &str) -> &str {
    let stem = name.strip_suffix(LEGACY_SUFFIX).unwrap_or(name);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == stem)
        .map(|(_, target)| *target)
        .unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("chatwithtools.jinja"), CHAT_WITH_TOOLS);
        assert_eq!(canonical_name("advanced.jinja"), ADVANCED);
        assert_eq!(canonical_name("responses"), RESPONSES);
        assert_eq!(canonical_name("custom"), "custom");
    }

    #[test]
    fn test_register_rejects_lookup_names() {
        let mut registry = TemplateRegistry::new();
        for name in ["mine.jinja", "chatwithtools"] {
            let err = registry.register(PayloadTemplate::new(name, "")).unwrap_err();
            assert!(err.to_string().contains("reserved"), "{}", name);
        }
        assert_eq!(registry.list().len(), 5);
    }
}
