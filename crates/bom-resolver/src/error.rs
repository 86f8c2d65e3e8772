//! Errors for remote model resolution and recommendation building.

use bom_core::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// The coordinate was not found in any configured repository; one
    /// rendered line per attempted endpoint.
    #[error(
        "unable to locate '{coordinate}' (artifact path '{path}') in the following repositories:\n{}",
        .attempts.join("\n")
    )]
    UnresolvableModel {
        coordinate: String,
        path: String,
        attempts: Vec<String>,
    },

    #[error("cyclic model reference detected: {}", .chain.join(" -> "))]
    CyclicModel { chain: Vec<String> },

    #[error("referenced model '{coordinate}' declares no version")]
    MissingVersion { coordinate: String },

    #[error("failed to initialize HTTP client: {message}")]
    HttpClient { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
