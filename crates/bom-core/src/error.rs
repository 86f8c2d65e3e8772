//! Errors for BOM document parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to parse BOM document: {message}")]
    Malformed { message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::Malformed {
            message: "unexpected end of file".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse BOM document: unexpected end of file"
        );
    }
}
