pub mod config;
pub mod processor;
pub mod utils;

// Re-export commonly used types
pub use config::{read_config, write_config, ConfigError, ProcessorConfig};
pub use processor::{
    handler_fn, BatchSummary, CleanupResult, CleanupTargets, CommandHandler, FileHandler,
    FileProcessor, HandlerParams, NoopLog, ProcessorError, ProcessorLog, TracingLog,
};
