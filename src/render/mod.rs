mod deprecation;
mod payload;

pub use deprecation::{notice_is_logged, DeprecatedRender, DeprecationNotice, DEPRECATION_TARGET};
pub use payload::{ChatCompletionsPayload, ResponsesPayload};

use crate::error::Result;
use crate::models::RenderRequest;
use crate::templates::PayloadTemplate;

/// Render the chat-completions shape: `model`, `messages`, `tools`, then
/// parameters. Template defaults fill parameters the request left unset.
pub fn render_chat_completions(
    template: &PayloadTemplate,
    model: &str,
    request: &RenderRequest,
) -> Result<String> {
    if let Some(tools) = request.tools() {
        template.check_tools(tools)?;
    }

    let parameters = request.parameters().clone().with_defaults(&template.defaults);
    let payload = ChatCompletionsPayload {
        model,
        messages: request.messages(),
        tools: request.tools(),
        parameters: &parameters,
    };

    tracing::debug!(
        template = %template.name,
        messages = request.messages().len(),
        "rendering chat-completions payload"
    );
    template.to_json(&payload)
}

/// Render the responses shape: optional `model`, `input`, `tools`, then
/// parameters.
pub fn render_responses(template: &PayloadTemplate, request: &RenderRequest) -> Result<String> {
    if let Some(tools) = request.tools() {
        template.check_tools(tools)?;
    }

    let parameters = request.parameters().clone().with_defaults(&template.defaults);
    let payload = ResponsesPayload {
        model: request.model(),
        input: request.messages(),
        tools: request.tools(),
        parameters: &parameters,
    };

    tracing::debug!(
        template = %template.name,
        messages = request.messages().len(),
        "rendering responses payload"
    );
    template.to_json(&payload)
}
