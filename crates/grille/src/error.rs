//! Error type for grille.
//!
//! Degenerate geometry is not an error here: generators answer it with an
//! empty (or origin-only) layout. The only failures are names that don't map
//! to anything, which means the caller has a bug.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrilleError {
    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Unknown center fill algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Unknown scale type: {0} (use 'linear' or 'exponential')")]
    UnknownScaleType(String),
}

pub type Result<T> = std::result::Result<T, GrilleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let err = GrilleError::UnknownAlgorithm("voronoi".to_string());
        assert_eq!(err.to_string(), "Unknown center fill algorithm: voronoi");
        let err = GrilleError::UnknownPattern("spiral".to_string());
        assert!(err.to_string().contains("spiral"));
    }
}
