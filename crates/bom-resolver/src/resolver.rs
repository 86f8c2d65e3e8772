//! First-success-wins model resolution across the endpoint list.

use crate::error::{ResolveError, Result};
use crate::repository::{RepositoryEndpoint, RepositoryKind, RepositoryLocator, pom_path};
use bom_core::{Coordinate, RawModel, parse_pom_bytes};

/// Locates and parses a model by coordinate alone, scanning the
/// caller-supplied endpoints in order. Stateless per coordinate: any
/// caching happens above this layer.
pub struct ModelResolver {
    locator: RepositoryLocator,
}

impl ModelResolver {
    pub fn new(locator: RepositoryLocator) -> Self {
        Self { locator }
    }

    /// Resolves `coordinate` against the endpoint list. The first
    /// successful fetch wins; endpoints after it are never contacted.
    /// Every failure is recorded so an exhausted scan can report which
    /// repositories were tried and why each one failed.
    pub async fn resolve(
        &self,
        coordinate: &Coordinate,
        endpoints: &[RepositoryEndpoint],
    ) -> Result<RawModel> {
        let version =
            coordinate
                .version
                .as_deref()
                .ok_or_else(|| ResolveError::MissingVersion {
                    coordinate: coordinate.key(),
                })?;

        let mut attempts = Vec::new();
        for endpoint in endpoints {
            if endpoint.kind != RepositoryKind::Maven {
                tracing::warn!("skipping non-artifact repository {}", endpoint.base_url);
                continue;
            }

            match self
                .locator
                .fetch(
                    &coordinate.group_id,
                    &coordinate.artifact_id,
                    version,
                    endpoint,
                )
                .await
            {
                Ok(bytes) => {
                    tracing::debug!("resolved {} from {}", coordinate.id(), endpoint.base_url);
                    // a fetched document that fails to parse is fatal, not
                    // a try-the-next-repository condition
                    return parse_pom_bytes(&bytes).map_err(Into::into);
                }
                Err(e) => {
                    tracing::debug!("fetch failed for {}: {e}", coordinate.id());
                    attempts.push(e.to_string());
                }
            }
        }

        Err(ResolveError::UnresolvableModel {
            coordinate: coordinate.id(),
            path: pom_path(&coordinate.group_id, &coordinate.artifact_id, version),
            attempts,
        })
    }
}
