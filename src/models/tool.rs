use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const FUNCTION_TOOL_TYPE: &str = "function";

/// The two wire shapes a tool can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolShape {
    /// `{"type": "...", "name": "..."}`
    Legacy,
    /// `{"type": "function", "function": {"name": "...", ...}}`
    Function,
}

impl fmt::Display for ToolShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolShape::Legacy => write!(f, "legacy"),
            ToolShape::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    // Unrecognized keys (e.g. "strict") pass through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Function {
        function: FunctionDefinition,
        extra: Map<String, Value>,
    },
    Legacy {
        tool_type: String,
        name: String,
        extra: Map<String, Value>,
    },
}

impl Tool {
    pub fn function(name: impl Into<String>) -> Self {
        Tool::Function {
            function: FunctionDefinition::new(name),
            extra: Map::new(),
        }
    }

    pub fn legacy(tool_type: impl Into<String>, name: impl Into<String>) -> Self {
        Tool::Legacy {
            tool_type: tool_type.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Set the description of a function tool. No-op for legacy tools.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        if let Tool::Function { function, .. } = &mut self {
            function.description = Some(text.into());
        }
        self
    }

    /// Set the JSON Schema parameters of a function tool. No-op for legacy tools.
    pub fn with_parameters(mut self, schema: Value) -> Self {
        if let Tool::Function { function, .. } = &mut self {
            function.parameters = Some(schema);
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Tool::Function { function, .. } => &function.name,
            Tool::Legacy { name, .. } => name,
        }
    }

    pub fn tool_type(&self) -> &str {
        match self {
            Tool::Function { .. } => FUNCTION_TOOL_TYPE,
            Tool::Legacy { tool_type, .. } => tool_type,
        }
    }

    pub fn shape(&self) -> ToolShape {
        match self {
            Tool::Function { .. } => ToolShape::Function,
            Tool::Legacy { .. } => ToolShape::Legacy,
        }
    }
}

impl Serialize for Tool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Tool::Function { function, extra } => {
                map.serialize_entry("type", FUNCTION_TOOL_TYPE)?;
                map.serialize_entry("function", function)?;
                for (key, value) in extra {
                    map.serialize_entry(key, value)?;
                }
            }
            Tool::Legacy {
                tool_type,
                name,
                extra,
            } => {
                map.serialize_entry("type", tool_type)?;
                map.serialize_entry("name", name)?;
                for (key, value) in extra {
                    map.serialize_entry(key, value)?;
                }
            }
        }
        map.end()
    }
}
