use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use pewsetup_backend::{OutputSink, SetupError};

/// Publishes step outputs through the runner's file commands
/// (`GITHUB_OUTPUT` and `GITHUB_PATH`).
#[derive(Debug, Clone, Default)]
pub struct WorkflowCommands {
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl WorkflowCommands {
    #[must_use]
    pub fn new(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            path_file,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env_path("GITHUB_OUTPUT"), env_path("GITHUB_PATH"))
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn append_line(path: &Path, contents: &str) -> Result<(), SetupError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| SetupError::filesystem("open command file", path, &error))?;
    file.write_all(contents.as_bytes())
        .map_err(|error| SetupError::filesystem("append to command file", path, &error))
}

/// Render one `GITHUB_OUTPUT` entry. Multi-line values use the heredoc form
/// with a delimiter that does not occur in the value.
fn format_output(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let mut delimiter = String::from("ghadelimiter");
    let mut attempt = 0_u32;
    while value.contains(&delimiter) {
        attempt += 1;
        delimiter = format!("ghadelimiter_{attempt}");
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

impl OutputSink for WorkflowCommands {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), SetupError> {
        match &self.output_file {
            Some(path) => {
                debug!("Writing {} outputs to {}", outputs.len(), path.display());
                let rendered: String = outputs
                    .iter()
                    .map(|(name, value)| format_output(name, value))
                    .collect();
                append_line(path, &rendered)
            }
            None => {
                for (name, value) in outputs {
                    info!("Output {name}={value}");
                }
                Ok(())
            }
        }
    }

    fn add_path(&mut self, dir: &Path) -> Result<(), SetupError> {
        match &self.path_file {
            Some(path) => {
                debug!("Adding {} to PATH via {}", dir.display(), path.display());
                append_line(path, &format!("{}\n", dir.display()))
            }
            None => {
                info!("Add to PATH: {}", dir.display());
                Ok(())
            }
        }
    }
}

/// Format a message as an `::error::` workflow command.
#[must_use]
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
