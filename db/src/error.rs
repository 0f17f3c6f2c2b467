use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database Error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Database Pool Error: {0}")]
    Pool(#[from] deadpool_diesel::PoolError),

    #[error("Creating database pool: {0}")]
    PoolBuild(String),

    #[error("Database worker {0}")]
    Interact(&'static str),
}

impl From<deadpool_diesel::InteractError> for Error {
    fn from(e: deadpool_diesel::InteractError) -> Self {
        match e {
            deadpool_diesel::InteractError::Panic(_) => Error::Interact("panicked"),
            deadpool_diesel::InteractError::Aborted => Error::Interact("aborted"),
        }
    }
}
