use crate::models::ToolShape;

pub const DEFAULT_MODEL: &str = "grok-beta";

pub const DEFAULT_LEGACY_TOOL: &str = "web_search";

pub fn default_tool_shapes() -> Vec<ToolShape> {
    vec![ToolShape::Legacy, ToolShape::Function]
}

pub fn default_indent() -> usize {
    2
}

pub fn parse_bool_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
