use thiserror::Error;

/// Everything that can abort a counting run.
///
/// None of these are recovered from: the transaction is rolled back and the
/// process exits with a non-zero code.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("name must be provided")]
    MissingName,

    #[error("hls and mp4 are required for video")]
    IncompleteVideo,

    #[error("environment variable {0} must be set")]
    MissingEnv(&'static str),

    #[error("environment variable {0} has an invalid value: {1}")]
    InvalidEnv(&'static str, String),

    #[error("a voting with the name '{0}' could not be found")]
    VotingNotFound(String),

    #[error("voting '{0}' has no options")]
    NoOptions(String),

    #[error("voting is undecided, you must provide the winner's voting option name with --winner")]
    Undecided,

    #[error("voting is undecided but a voting option with the name '{0}' could not be found")]
    WinnerNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
