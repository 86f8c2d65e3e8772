//! Version recommendations from BOM documents.
//!
//! This crate resolves BOM models over a prioritized repository list,
//! builds their effective form (parent merging, BOM imports, property
//! interpolation), and folds them into one memoized
//! `groupId:artifactId -> version` recommendation map.

pub mod builder;
pub mod engine;
pub mod error;
pub mod repository;
pub mod resolver;

pub use builder::ModelBuilder;
pub use engine::{BomSource, RecommendationEngine, RecommendationMap, SourceKind};
pub use error::{ResolveError, Result};
pub use repository::{
    Credentials, FetchError, RepositoryEndpoint, RepositoryKind, RepositoryLocator, pom_path,
};
pub use resolver::ModelResolver;
