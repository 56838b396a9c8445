//! Validated JSON payload generation for chat-completion APIs.
//!
//! Untyped request documents are parsed into typed messages, tools and
//! parameters, then rendered through a named template into a JSON string:
//!
//! ```
//! use payload_manager::{Manager, RenderRequest};
//! use serde_json::json;
//!
//! let request = RenderRequest::from_parts(
//!     Some(&json!("grok-4")),
//!     &json!([{"role": "user", "content": "Hello"}]),
//!     Some(&json!([])),
//!     None,
//! )
//! .unwrap();
//!
//! let payload = Manager::new()
//!     .render_chat_completions(&request, "chat_completions")
//!     .unwrap();
//! assert!(payload.contains("\"tools\": []"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod manager;
pub mod models;
pub mod render;
pub mod templates;
pub mod ui;
pub mod validation;

pub use error::{PayloadError, Result};
pub use manager::Manager;
pub use models::{Message, RenderRequest, RequestParameters, Tool, ToolShape};
pub use render::{DeprecatedRender, DeprecationNotice};
pub use templates::{PayloadTemplate, TemplateRegistry};
