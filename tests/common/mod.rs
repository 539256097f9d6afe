#![allow(dead_code)]

use file_relay::{FileProcessor, ProcessorLog};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Log sink that keeps every message for later assertions
#[derive(Clone, Default)]
pub struct RecordingLog {
    pub info: Arc<Mutex<Vec<String>>>,
    pub error: Arc<Mutex<Vec<String>>>,
}

impl RecordingLog {
    pub fn info_lines(&self) -> Vec<String> {
        self.info.lock().unwrap().clone()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.error.lock().unwrap().clone()
    }
}

impl ProcessorLog for RecordingLog {
    fn info(&self, message: &str) {
        self.info.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.error.lock().unwrap().push(message.to_string());
    }
}

/// Build a processor over `<root>/input`, `<root>/done` and `<root>/failed`
pub fn create_processor(root: &Path) -> (FileProcessor, RecordingLog) {
    let log = RecordingLog::default();
    let processor = FileProcessor::new(root.join("input"), root.join("done"), root.join("failed"))
        .expect("Should create processor")
        .with_log(Box::new(log.clone()));
    (processor, log)
}

/// Write a file, creating parent folders as needed
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent folder");
    }
    fs::write(path, content).expect("Failed to write file");
}
