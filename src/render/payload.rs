use crate::models::{Message, RequestParameters, Tool};
use serde::Serialize;

/// Body of a `/v1/chat/completions` request.
#[derive(Serialize)]
pub struct ChatCompletionsPayload<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [Tool]>,
    #[serde(flatten)]
    pub parameters: &'a RequestParameters,
}

/// Body of a `/v1/responses` request.
#[derive(Serialize)]
pub struct ResponsesPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub input: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [Tool]>,
    #[serde(flatten)]
    pub parameters: &'a RequestParameters,
}
