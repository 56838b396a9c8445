pub mod highlight;
pub mod output;

pub use output::{display_error, display_notice, display_payload, display_templates};
