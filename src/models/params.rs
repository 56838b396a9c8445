use crate::error::{PayloadError, Result};
use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Top-level payload keys owned by the renderer.
pub const RESERVED_KEYS: [&str; 4] = ["model", "messages", "input", "tools"];

/// Request options rendered next to the messages.
///
/// Recognized options are typed; anything else lands in an extension map and
/// is serialized verbatim. Unset options never appear in the payload.
/// Sampling numbers keep the caller's representation, so `1` stays `1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter by name.
    ///
    /// Recognized names are type-checked; `null` clears them. Unknown names are
    /// kept as-is, `null` included. Reserved payload keys are rejected.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if key.is_empty() {
            return Err(PayloadError::schema("Parameter names must not be empty"));
        }
        if RESERVED_KEYS.contains(&key) {
            return Err(PayloadError::schema(format!(
                "'{}' is reserved and cannot be passed as a parameter",
                key
            )));
        }

        if value.is_null() && is_recognized(key) {
            self.clear(key);
            return Ok(());
        }

        match key {
            "temperature" => self.temperature = Some(expect_number(key, &value)?),
            "top_p" => self.top_p = Some(expect_number(key, &value)?),
            "max_tokens" => {
                let tokens = value
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| type_error(key, "a non-negative integer", &value))?;
                self.max_tokens = Some(tokens);
            }
            "stream" => {
                self.stream = Some(
                    value
                        .as_bool()
                        .ok_or_else(|| type_error(key, "a boolean", &value))?,
                )
            }
            "seed" => {
                self.seed = Some(
                    value
                        .as_i64()
                        .ok_or_else(|| type_error(key, "an integer", &value))?,
                )
            }
            "tool_choice" => self.tool_choice = Some(value),
            "user" => {
                self.user = Some(
                    value
                        .as_str()
                        .ok_or_else(|| type_error(key, "a string", &value))?
                        .to_string(),
                )
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    pub fn get_extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every option left unset here from `defaults`.
    pub fn with_defaults(mut self, defaults: &RequestParameters) -> Self {
        if self.temperature.is_none() {
            self.temperature = defaults.temperature.clone();
        }
        if self.top_p.is_none() {
            self.top_p = defaults.top_p.clone();
        }
        self.max_tokens = self.max_tokens.or(defaults.max_tokens);
        self.stream = self.stream.or(defaults.stream);
        self.seed = self.seed.or(defaults.seed);
        if self.tool_choice.is_none() {
            self.tool_choice = defaults.tool_choice.clone();
        }
        if self.user.is_none() {
            self.user = defaults.user.clone();
        }
        for (key, value) in &defaults.extra {
            self.extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    fn clear(&mut self, key: &str) {
        match key {
            "temperature" => self.temperature = None,
            "top_p" => self.top_p = None,
            "max_tokens" => self.max_tokens = None,
            "stream" => self.stream = None,
            "seed" => self.seed = None,
            "tool_choice" => self.tool_choice = None,
            "user" => self.user = None,
            _ => {}
        }
    }
}

fn is_recognized(key: &str) -> bool {
    matches!(
        key,
        "temperature" | "top_p" | "max_tokens" | "stream" | "seed" | "tool_choice" | "user"
    )
}

fn expect_number(key: &str, value: &Value) -> Result<Number> {
    match value {
        Value::Number(n) if n.as_f64().map_or(false, f64::is_finite) => Ok(n.clone()),
        _ => Err(type_error(key, "a number", value)),
    }
}

fn type_error(key: &str, expected: &str, value: &Value) -> PayloadError {
    PayloadError::schema(format!(
        "Parameter '{}' must be {}, got {}",
        key, expected, value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_keys_go_to_extra() {
        let mut params = RequestParameters::new();
        params.set("reasoning_effort", json!("high")).unwrap();
        assert_eq!(params.get_extra("reasoning_effort"), Some(&json!("high")));
        assert!(params.temperature.is_none());
    }

    #[test]
    fn test_null_clears_recognized_key() {
        let mut params = RequestParameters::new();
        params.set("temperature", json!(0.3)).unwrap();
        params.set("temperature", Value::Null).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_integer_temperature_is_kept() {
        let mut params = RequestParameters::new();
        params.set("temperature", json!(1)).unwrap();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"temperature": 1}));
    }

    #[test]
    fn test_max_tokens_rejects_negative() {
        let mut params = RequestParameters::new();
        let err = params.set("max_tokens", json!(-5)).unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }
}
