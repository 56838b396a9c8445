//! Parsing of loosely typed request documents into typed values.
//!
//! Every function here is pure: the candidate is only read, and either a typed
//! value or a [`PayloadError`] comes back.

use crate::error::{PayloadError, Result};
use crate::models::{FunctionDefinition, Message, RequestParameters, Tool, FUNCTION_TOOL_TYPE};
use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};

const MESSAGE_KEYS: [&str; 2] = ["role", "content"];
const FUNCTION_KEYS: [&str; 3] = ["name", "description", "parameters"];

pub fn validate_messages(candidate: &Value) -> Result<Vec<Message>> {
    let items = candidate
        .as_array()
        .ok_or_else(|| PayloadError::schema("Messages must be a list"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_message(index, item))
        .collect()
}

fn parse_message(index: usize, item: &Value) -> Result<Message> {
    let object = item.as_object().ok_or_else(|| {
        PayloadError::schema(format!("Each message must be an object (message {})", index))
    })?;

    let (Some(role), Some(content)) = (object.get("role"), object.get("content")) else {
        return Err(PayloadError::schema(format!(
            "Each message must have 'role' and 'content' keys (message {})",
            index
        )));
    };

    let (Some(role), Some(content)) = (role.as_str(), content.as_str()) else {
        return Err(PayloadError::schema(format!(
            "'role' and 'content' must be strings (message {})",
            index
        )));
    };

    if let Some(key) = object
        .keys()
        .find(|key| !MESSAGE_KEYS.contains(&key.as_str()))
    {
        return Err(PayloadError::schema(format!(
            "Unexpected key '{}' in message {}",
            key, index
        )));
    }

    Ok(Message::new(role, content))
}

pub fn validate_tools(candidate: &Value) -> Result<Vec<Tool>> {
    let items = candidate
        .as_array()
        .ok_or_else(|| PayloadError::schema("Tools must be a list"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_tool(index, item))
        .collect()
}

fn parse_tool(index: usize, item: &Value) -> Result<Tool> {
    let object = item.as_object().ok_or_else(|| {
        PayloadError::schema(format!("Each tool must be an object (tool {})", index))
    })?;

    let tool_type = match object.get("type") {
        Some(Value::String(tool_type)) => tool_type.as_str(),
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "'type' must be a string (tool {})",
                index
            )))
        }
        None => {
            return Err(PayloadError::schema(format!(
                "Each tool must have a 'type' key (tool {})",
                index
            )))
        }
    };

    if tool_type.is_empty() {
        return Err(PayloadError::UnsupportedToolType(String::new()));
    }

    if tool_type == FUNCTION_TOOL_TYPE {
        parse_function_tool(index, object)
    } else {
        parse_legacy_tool(index, tool_type, object)
    }
}

fn parse_function_tool(index: usize, object: &Map<String, Value>) -> Result<Tool> {
    let function = match object.get("function") {
        Some(Value::Object(function)) => function,
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "'function' must be an object (tool {})",
                index
            )))
        }
        None => {
            return Err(PayloadError::schema(format!(
                "Function tools must have a 'function' object (tool {})",
                index
            )))
        }
    };

    let name = match function.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(Value::String(_)) => {
            return Err(PayloadError::schema(format!(
                "Function 'name' must not be empty (tool {})",
                index
            )))
        }
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "Function 'name' must be a string (tool {})",
                index
            )))
        }
        None => {
            return Err(PayloadError::schema(format!(
                "Function definition is missing required key 'name' (tool {})",
                index
            )))
        }
    };

    let description = match function.get("description") {
        None => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "Function 'description' must be a string (tool {})",
                index
            )))
        }
    };

    let parameters = match function.get("parameters") {
        None => None,
        Some(schema @ Value::Object(_)) => {
            check_parameters_schema(index, schema)?;
            Some(schema.clone())
        }
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "Function 'parameters' must be an object (tool {})",
                index
            )))
        }
    };

    Ok(Tool::Function {
        function: FunctionDefinition {
            name,
            description,
            parameters,
            extra: remaining_keys(function, &FUNCTION_KEYS),
        },
        extra: remaining_keys(object, &["type", "function"]),
    })
}

fn parse_legacy_tool(index: usize, tool_type: &str, object: &Map<String, Value>) -> Result<Tool> {
    let name = match object.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(PayloadError::schema(format!(
                "'type' and 'name' must be strings (tool {})",
                index
            )))
        }
        None => {
            return Err(PayloadError::schema(format!(
                "Each tool must have 'type' and 'name' keys (tool {})",
                index
            )))
        }
    };

    Ok(Tool::Legacy {
        tool_type: tool_type.to_string(),
        name,
        extra: remaining_keys(object, &["type", "name"]),
    })
}

fn check_parameters_schema(index: usize, schema: &Value) -> Result<()> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map(|_| ())
        .map_err(|e| {
            PayloadError::schema(format!(
                "Function 'parameters' is not a valid JSON Schema (tool {}): {}",
                index, e
            ))
        })
}

fn remaining_keys(object: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn validate_model(candidate: &Value) -> Result<String> {
    match candidate.as_str() {
        Some(model) if !model.is_empty() => Ok(model.to_string()),
        Some(_) => Err(PayloadError::schema("Model must not be empty")),
        None => Err(PayloadError::schema("Model must be a string")),
    }
}

pub fn validate_parameters(candidate: &Value) -> Result<RequestParameters> {
    let object = candidate
        .as_object()
        .ok_or_else(|| PayloadError::schema("Parameters must be a mapping"))?;

    let mut parameters = RequestParameters::new();
    for (key, value) in object {
        parameters.set(key, value.clone())?;
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remaining_keys_skips_known() {
        let object = json!({"type": "x", "name": "y", "max_results": 3});
        let extra = remaining_keys(object.as_object().unwrap(), &["type", "name"]);
        assert_eq!(extra.len(), 1);
        assert_eq!(extra["max_results"], json!(3));
    }

    #[test]
    fn test_parameters_schema_rejects_bad_type_keyword() {
        let schema = json!({"type": 42});
        assert!(check_parameters_schema(0, &schema).is_err());
    }
}
