#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}
