use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("The requested item was not found in the database.")]
    NotFound,
}
