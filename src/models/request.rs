use crate::error::{PayloadError, Result};
use crate::models::{Message, RequestParameters, Tool};
use crate::validation::{validate_messages, validate_model, validate_parameters, validate_tools};
use serde_json::Value;

/// A validated set of render inputs.
///
/// The fields are private: a model or tool list only gets in through the
/// validator, whether it arrives as JSON or as typed values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    model: Option<String>,
    messages: Vec<Message>,
    // None leaves the key out, Some(vec![]) renders "tools": []
    tools: Option<Vec<Tool>>,
    parameters: RequestParameters,
}

impl RenderRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self> {
        self.model = Some(validate_model(&Value::String(model.into()))?);
        Ok(self)
    }

    /// Attach tools. Typed tools are re-checked against the wire rules, so
    /// `Tool::legacy("", "")` fails here just as its JSON form would.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Result<Self> {
        self.tools = Some(validate_tools(&serde_json::to_value(&tools)?)?);
        Ok(self)
    }

    pub fn with_parameters(mut self, parameters: RequestParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tools(&self) -> Option<&[Tool]> {
        self.tools.as_deref()
    }

    pub fn parameters(&self) -> &RequestParameters {
        &self.parameters
    }

    /// Validate untyped inputs. Messages are checked first, then tools, then
    /// the model and parameters; the first failure wins.
    pub fn from_parts(
        model: Option<&Value>,
        messages: &Value,
        tools: Option<&Value>,
        parameters: Option<&Value>,
    ) -> Result<Self> {
        let messages = validate_messages(messages)?;
        let tools = tools.map(validate_tools).transpose()?;
        let model = model.map(validate_model).transpose()?;
        let parameters = parameters
            .map(validate_parameters)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            model,
            messages,
            tools,
            parameters,
        })
    }

    /// Parse a whole request document such as
    /// `{"model": "...", "messages": [...], "tools": [...], "temperature": 0.2}`.
    ///
    /// The messages may live under `messages` or `input`. Every other key is
    /// treated as a request parameter.
    pub fn from_value(document: &Value) -> Result<Self> {
        let object = document
            .as_object()
            .ok_or_else(|| PayloadError::schema("Request document must be an object"))?;

        let messages = match (object.get("messages"), object.get("input")) {
            (Some(_), Some(_)) => {
                return Err(PayloadError::schema(
                    "Request document must not contain both 'messages' and 'input'",
                ))
            }
            (Some(messages), None) | (None, Some(messages)) => messages,
            (None, None) => {
                return Err(PayloadError::schema(
                    "Request document is missing 'messages'",
                ))
            }
        };

        let parameters: serde_json::Map<String, Value> = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "model" | "messages" | "input" | "tools"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self::from_parts(
            object.get("model"),
            messages,
            object.get("tools"),
            Some(&Value::Object(parameters)),
        )
    }

    pub fn require_model(&self) -> Result<&str> {
        self.model
            .as_deref()
            .ok_or_else(|| PayloadError::schema("Model must be a string"))
    }
}
