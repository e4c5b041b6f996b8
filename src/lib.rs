pub mod bio;
pub mod cli;
pub mod core;
pub mod index;
pub mod loader;
pub mod query;
pub mod store;
pub mod utils;

pub use crate::core::release::{Release, ReleaseHandle};
pub use crate::query::{ClusterDirection, QueryCriteria, QueryOutcome, SearchCategory};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Taxonomy path not found: {}", .0.join(";"))]
    PathNotFound(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MirusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let integrity = MirusError::Integrity("duplicate precursor MI0000001".to_string());
        assert_eq!(
            format!("{}", integrity),
            "Integrity error: duplicate precursor MI0000001"
        );

        let missing = MirusError::PathNotFound(vec!["Metazoa".into(), "Chordata".into()]);
        assert_eq!(
            format!("{}", missing),
            "Taxonomy path not found: Metazoa;Chordata"
        );

        let input = MirusError::InvalidInput("negative window".to_string());
        assert_eq!(format!("{}", input), "Invalid input: negative window");
    }
}
