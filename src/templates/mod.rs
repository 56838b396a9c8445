mod registry;
mod template;

pub use registry::{TemplateRegistry, ADVANCED, CHAT_COMPLETIONS, CHAT_WITH_TOOLS, COMPACT, RESPONSES};
pub use template::PayloadTemplate;
