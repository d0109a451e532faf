//! Error handling for the application

use crate::pricing::catalog::CatalogError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
