mod cli;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use pewsetup_core::{
    BINARY_NAME, Installer, REPO_NAME, REPO_OWNER, Setup, check_platform, run_cleanup,
};
use pewsetup_github::GitHubReleaseProvider;
use pewsetup_platform::{
    FsToolCache, HostPlatform, RunnerPaths, WorkflowCommands, error_annotation,
};

use crate::cli::{Cli, Phase, SetupArgs, parse_failure_annotation};
use crate::error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match parse_failure_annotation(&error) {
            Some(annotation) => {
                println!("{annotation}");
                return ExitCode::FAILURE;
            }
            None => error.exit(),
        },
    };
    logging::init_logging(cli.debug);

    match run(cli.phase).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("Setup failed: {error:?}");
            println!("{}", error_annotation(&error.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(phase: Phase) -> Result<(), AppError> {
    match phase {
        Phase::Setup(args) => setup(args).await,
        Phase::Cleanup => {
            run_cleanup();
            Ok(())
        }
    }
}

async fn setup(args: SetupArgs) -> Result<(), AppError> {
    let host = HostPlatform::current();
    check_platform(&host)?;

    let paths = RunnerPaths::from_env()?;
    log::debug!(
        "Runner temp {}, tool cache {}",
        paths.temp_dir.display(),
        paths.tool_cache_dir.display()
    );

    let provider =
        GitHubReleaseProvider::new(REPO_OWNER, REPO_NAME, args.token)?.with_api_url(&args.api_url);
    let cache = FsToolCache::new(&paths.tool_cache_dir);
    let installer = Installer::new(&paths.temp_dir, &paths.tool_cache_dir, BINARY_NAME);
    let mut commands = WorkflowCommands::from_env();

    Setup::new(&provider, &cache, installer, host)
        .run(&args.version, &mut commands)
        .await?;
    Ok(())
}
