use std::fmt;

/// Log target of the advisory event emitted by deprecated entry points.
pub const DEPRECATION_TARGET: &str = "payload_manager::deprecation";

/// Whether the current subscriber records the deprecation advisory.
pub fn notice_is_logged() -> bool {
    tracing::enabled!(target: DEPRECATION_TARGET, tracing::Level::WARN)
}

/// Advisory returned by deprecated entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub entry_point: &'static str,
    pub replacement: &'static str,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is deprecated and will be removed in a future release; use {} instead",
            self.entry_point, self.replacement
        )
    }
}

/// A payload rendered through a deprecated entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedRender {
    pub payload: String,
    pub notice: DeprecationNotice,
}
