use clap::builder::{FalseyValueParser, NonEmptyStringValueParser};
use clap::{Args, Parser, Subcommand};
use pewsetup_github::DEFAULT_API_URL;
use pewsetup_platform::error_annotation;

/// Install a pewbuild release and expose it to later workflow steps.
#[derive(Debug, Parser)]
#[command(name = "setup-pewbuild", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (set automatically when the runner is in debug mode)
    #[arg(
        long,
        env = "RUNNER_DEBUG",
        global = true,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub phase: Phase,
}

/// Step lifecycle phase, chosen by the calling workflow.
#[derive(Debug, Subcommand)]
pub enum Phase {
    /// Resolve, install and publish pewbuild
    Setup(SetupArgs),
    /// Post-job cleanup
    Cleanup,
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Version to install: `latest`, an exact tag such as `1.2.3`, or a
    /// `^1.2` / `~1.2` range
    #[arg(long = "tool-version", env = "INPUT_VERSION", default_value = "latest")]
    pub version: String,

    /// Token used to query GitHub releases
    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub token: String,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Render an argument error as an `::error::` annotation. Help and version
/// requests are not failures and yield `None`.
pub fn parse_failure_annotation(error: &clap::Error) -> Option<String> {
    error
        .use_stderr()
        .then(|| error_annotation(error.to_string().trim_end()))
}
