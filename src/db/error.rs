#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Invalid date in measurement data: {0}")]
    InvalidDate(#[from] chrono::ParseError),
}
