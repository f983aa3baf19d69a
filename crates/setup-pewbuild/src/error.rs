use pewsetup_backend::SetupError;
use pewsetup_platform::RunnerPathsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    RunnerPaths(#[from] RunnerPathsError),
}
