use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::defaults::{default_indent, default_tool_shapes};
use crate::models::ToolShape;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Pretty,
    Compact,
}

/// A user template entry from the `templates:` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub name: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default = "default_tool_shapes")]
    pub tool_shapes: Vec<ToolShape>,

    #[serde(default)]
    pub layout: Layout,

    // Ignored for the compact layout
    #[serde(default = "default_indent")]
    pub indent: usize,

    // Filled in when the caller leaves them unset
    #[serde(default)]
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}
