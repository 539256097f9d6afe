//! Injected logging capability for the processor.
//!
//! The processor never touches a global logger directly; it writes through a
//! [`ProcessorLog`] handed to it at construction.

/// Sink for the processor's informational and error messages
pub trait ProcessorLog {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards messages to `tracing` (the default sink)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ProcessorLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "file_relay", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "file_relay", "{}", message);
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl ProcessorLog for NoopLog {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
