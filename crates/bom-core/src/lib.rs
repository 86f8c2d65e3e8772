//! BOM model layer: domain types, document parsing, and property
//! interpolation.
//!
//! This crate is pure data-and-parsing; remote resolution and
//! recommendation building live in `bom-resolver`.

pub mod error;
pub mod interpolate;
pub mod parser;
pub mod types;

pub use error::{ModelError, Result};
pub use interpolate::{PropertySources, expand};
pub use parser::{parse_pom, parse_pom_bytes};
pub use types::{Coordinate, EffectiveModel, ManagedDependency, RawModel};
