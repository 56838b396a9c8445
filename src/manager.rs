use crate::config::Config;
use crate::error::{PayloadError, Result};
use crate::models::RenderRequest;
use crate::render::{self, DeprecatedRender, DeprecationNotice};
use crate::templates::TemplateRegistry;

/// Builds JSON payloads for chat-completion style APIs.
///
/// Every entry point validates the request in full before the template is
/// resolved, so schema errors never produce partial output.
#[derive(Debug, Clone, Default)]
pub struct Manager {
    registry: TemplateRegistry,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_registry(TemplateRegistry::from_config(&config.templates))
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Payload for `/v1/chat/completions`. The request must carry a model.
    pub fn render_chat_completions(
        &self,
        request: &RenderRequest,
        template_name: &str,
    ) -> Result<String> {
        let model = request.require_model()?;
        let template = self.registry.resolve(template_name)?;
        render::render_chat_completions(template, model, request)
    }

    /// Payload for `/v1/responses`. Messages are emitted under `input`; the
    /// model is optional.
    pub fn render_responses(&self, request: &RenderRequest, template_name: &str) -> Result<String> {
        let template = self.registry.resolve(template_name)?;
        render::render_responses(template, request)
    }

    /// Deprecated: use [`Manager::render_chat_completions`].
    ///
    /// Output is byte-identical to `render_chat_completions` for the same
    /// request and template. Tools are mandatory here.
    pub fn render_chat_with_tools(
        &self,
        request: &RenderRequest,
        template_name: &str,
    ) -> Result<DeprecatedRender> {
        let notice = DeprecationNotice {
            entry_point: "render_chat_with_tools",
            replacement: "render_chat_completions or render_responses",
        };
        tracing::warn!(
            target: render::DEPRECATION_TARGET,
            entry_point = notice.entry_point,
            replacement = notice.replacement,
            "deprecated entry point called"
        );

        if request.tools().is_none() {
            return Err(PayloadError::schema("Tools must be a list"));
        }

        let payload = self.render_chat_completions(request, template_name)?;
        Ok(DeprecatedRender { payload, notice })
    }
}
