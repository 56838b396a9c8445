mod message;
mod params;
mod request;
mod tool;

pub use message::Message;
pub use params::{RequestParameters, RESERVED_KEYS};
pub use request::RenderRequest;
pub use tool::{FunctionDefinition, Tool, ToolShape, FUNCTION_TOOL_TYPE};
