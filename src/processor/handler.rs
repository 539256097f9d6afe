use crate::utils::PARAM_ENV_PREFIX;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Named parameters forwarded unchanged to the handler
pub type HandlerParams = serde_json::Map<String, serde_json::Value>;

/// Processes one file and reports whether it succeeded.
///
/// `filename` is relative to the processor's input folder. Returning `Ok(false)`
/// routes the file to the failed folder; returning `Err` aborts the call and
/// leaves the file where it is.
pub trait FileHandler {
    fn handle(&mut self, filename: &Path, params: &HandlerParams) -> anyhow::Result<bool>;
}

impl<F> FileHandler for F
where
    F: FnMut(&Path, &HandlerParams) -> anyhow::Result<bool>,
{
    fn handle(&mut self, filename: &Path, params: &HandlerParams) -> anyhow::Result<bool> {
        self(filename, params)
    }
}

/// Pin a closure's signature so it can be used as a [`FileHandler`] without
/// annotating argument and return types.
pub fn handler_fn<F>(f: F) -> F
where
    F: FnMut(&Path, &HandlerParams) -> anyhow::Result<bool>,
{
    f
}

/// Runs an external command for each file.
///
/// The command is invoked as `program [args...] <input_folder>/<filename>` with
/// each parameter exported as `FILE_RELAY_PARAM_<KEY>`. A zero exit status is
/// success.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    program: String,
    args: Vec<String>,
    input_folder: PathBuf,
}

impl CommandHandler {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        input_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            input_folder: input_folder.into(),
        }
    }
}

impl FileHandler for CommandHandler {
    fn handle(&mut self, filename: &Path, params: &HandlerParams) -> anyhow::Result<bool> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(self.input_folder.join(filename));

        for (key, value) in params {
            command.env(param_env_name(key), param_env_value(value));
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to run '{}'", self.program))?;

        debug!(
            file = %filename.display(),
            status = %status,
            "Handler command finished"
        );

        Ok(status.success())
    }
}

/// Environment variable name for a handler parameter
pub fn param_env_name(key: &str) -> String {
    let key: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{PARAM_ENV_PREFIX}{key}")
}

fn param_env_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
