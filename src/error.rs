use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid roster YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("roster failed validation: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("aggregator received {received} of {expected} trial results")]
    MissingResults { expected: usize, received: usize },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("aggregator thread panicked")]
    AggregatorPanicked,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Trial(#[from] TrialError),
}

pub type Result<T> = std::result::Result<T, Error>;
