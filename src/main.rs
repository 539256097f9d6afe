use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use file_relay::{
    read_config, write_config, CleanupTargets, CommandHandler, FileProcessor, HandlerParams,
    ProcessorConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// File Relay - process files from an input folder and route them to done or failed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a command against every file in the input folder
    Run {
        #[command(flatten)]
        folders: FolderArgs,

        /// Only process files ending in this extension (without the dot)
        #[arg(short, long)]
        extension: Option<String>,

        /// Also process files in subfolders of the input folder
        #[arg(short, long)]
        recursive: bool,

        /// Run the handler but leave every file in the input folder
        #[arg(long)]
        dry_run: bool,

        /// Handler parameter as key=value, exported as FILE_RELAY_PARAM_<KEY>.
        /// Values that parse as JSON keep their type.
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Command to run; the file path is appended as the last argument
        #[arg(last = true, required = true, num_args = 1..)]
        handler: Vec<String>,
    },

    /// Delete everything inside the selected folders
    Cleanup {
        #[command(flatten)]
        folders: FolderArgs,

        #[arg(long)]
        clean_input: bool,

        #[arg(long)]
        clean_done: bool,

        #[arg(long)]
        clean_failed: bool,
    },

    /// Write a config file template
    InitConfig {
        /// Where to write the config
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct FolderArgs {
    /// JSON config file; explicit folder flags take precedence over it
    #[arg(short, long, env = "FILE_RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Folder holding files awaiting processing
    #[arg(long, env = "FILE_RELAY_INPUT")]
    input: Option<PathBuf>,

    /// Destination for successfully processed files
    #[arg(long, env = "FILE_RELAY_DONE")]
    done: Option<PathBuf>,

    /// Destination for files that failed processing
    #[arg(long, env = "FILE_RELAY_FAILED")]
    failed: Option<PathBuf>,
}

impl FolderArgs {
    fn resolve(self) -> anyhow::Result<ProcessorConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?,
            None => ProcessorConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_folder = input;
        }
        if let Some(done) = self.done {
            config.done_folder = done;
        }
        if let Some(failed) = self.failed {
            config.failed_folder = failed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn to_handler_params(params: Vec<(String, String)>) -> HandlerParams {
    params
        .into_iter()
        .map(|(key, value)| {
            let value =
                serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            (key, value)
        })
        .collect()
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging; stdout is reserved for JSON results
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            folders,
            extension,
            recursive,
            dry_run,
            params,
            handler,
        } => {
            let mut config = folders.resolve()?;
            config.suppress_move |= dry_run;

            let processor = FileProcessor::from_config(&config)?;
            let Some((program, args)) = handler.split_first() else {
                bail!("No handler command given");
            };
            let mut handler =
                CommandHandler::new(program.clone(), args.to_vec(), &config.input_folder);

            let summary = processor.process_all_with_summary(
                &mut handler,
                extension.as_deref(),
                recursive,
                &to_handler_params(params),
            )?;

            println!("{}", serde_json::to_string_pretty(&summary)?);

            if summary.all_succeeded() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Cleanup {
            folders,
            clean_input,
            clean_done,
            clean_failed,
        } => {
            let config = folders.resolve()?;
            let targets = CleanupTargets {
                input: clean_input,
                done: clean_done,
                failed: clean_failed,
            };
            if targets.is_empty() {
                bail!("Nothing to clean; pass --clean-input, --clean-done or --clean-failed");
            }

            let processor = FileProcessor::from_config(&config)?;
            let result = processor.cleanup(targets)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::InitConfig { path } => {
            write_config(&path, &ProcessorConfig::default())?;
            info!("Wrote config template to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
