//! Effective-model building: parent and import merging plus interpolation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use bom_core::{Coordinate, EffectiveModel, PropertySources, RawModel, expand, parse_pom_bytes};

use crate::error::{ResolveError, Result};
use crate::repository::{RepositoryEndpoint, RepositoryLocator};
use crate::resolver::ModelResolver;

/// Turns one BOM document into its effective model: the parent chain is
/// resolved and merged, BOM imports are expanded, and `${...}` references
/// in version values are interpolated. A failure at any step aborts the
/// whole build; no partial model is ever returned.
pub struct ModelBuilder {
    resolver: ModelResolver,
}

impl ModelBuilder {
    pub fn new(locator: RepositoryLocator) -> Self {
        Self {
            resolver: ModelResolver::new(locator),
        }
    }

    pub async fn build_effective(
        &self,
        bytes: &[u8],
        endpoints: &[RepositoryEndpoint],
        context: &HashMap<String, String>,
    ) -> Result<EffectiveModel> {
        let raw = parse_pom_bytes(bytes)?;
        let mut in_progress = Vec::new();
        self.build_model(raw, endpoints, context, &mut in_progress)
            .await
    }

    /// Boxed so the parent/import recursion has a nameable future type.
    /// `in_progress` holds the `group:artifact` keys currently on the
    /// resolution stack; revisiting one is a cycle.
    fn build_model<'a>(
        &'a self,
        raw: RawModel,
        endpoints: &'a [RepositoryEndpoint],
        context: &'a HashMap<String, String>,
        in_progress: &'a mut Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<EffectiveModel>> + Send + 'a>> {
        Box::pin(async move {
            let key = model_key(&raw);
            if in_progress.contains(&key) {
                let mut chain = in_progress.clone();
                chain.push(key);
                return Err(ResolveError::CyclicModel { chain });
            }

            in_progress.push(key);
            let result = self
                .build_unguarded(raw, endpoints, context, in_progress)
                .await;
            in_progress.pop();
            result
        })
    }

    async fn build_unguarded(
        &self,
        raw: RawModel,
        endpoints: &[RepositoryEndpoint],
        context: &HashMap<String, String>,
        in_progress: &mut Vec<String>,
    ) -> Result<EffectiveModel> {
        let parent = match &raw.parent {
            Some(parent_coord) => {
                let parent_raw = self.resolver.resolve(parent_coord, endpoints).await?;
                Some(
                    self.build_model(parent_raw, endpoints, context, in_progress)
                        .await?,
                )
            }
            None => None,
        };

        // coordinates and properties not declared locally come from the parent
        let group_id = raw
            .group_id
            .clone()
            .or_else(|| parent.as_ref().and_then(|p| p.group_id.clone()));
        let artifact_id = raw.artifact_id.clone();
        let version = raw
            .version
            .clone()
            .or_else(|| parent.as_ref().and_then(|p| p.version.clone()));

        let mut properties = parent
            .as_ref()
            .map(|p| p.properties.clone())
            .unwrap_or_default();
        properties.extend(raw.properties.clone());

        let self_refs =
            self_references(group_id.as_deref(), artifact_id.as_deref(), version.as_deref());

        // declared properties win over self-references; caller context and
        // the process environment come after
        let sources = PropertySources::new()
            .layer(&properties)
            .layer(&self_refs)
            .layer(context);

        let mut entries = parent
            .as_ref()
            .map(|p| p.entries.clone())
            .unwrap_or_default();

        // imported BOMs overlay the parent; the model's own entries overlay both
        for dep in raw.managed.iter().filter(|d| d.is_import()) {
            let import_version = dep
                .version
                .as_deref()
                .map(|v| expand(v, &sources))
                .ok_or_else(|| ResolveError::MissingVersion {
                    coordinate: dep.key(),
                })?;
            let coordinate = Coordinate::new(
                dep.group_id.clone(),
                dep.artifact_id.clone(),
                Some(import_version),
            );
            let imported_raw = self.resolver.resolve(&coordinate, endpoints).await?;
            let imported = self
                .build_model(imported_raw, endpoints, context, in_progress)
                .await?;
            tracing::debug!(
                "imported {} entries from {}",
                imported.entries.len(),
                imported.id()
            );
            entries.extend(imported.entries);
        }

        for dep in raw.managed.iter().filter(|d| !d.is_import()) {
            match dep.version {
                Some(ref v) => {
                    entries.insert(dep.key(), expand(v, &sources));
                }
                // an entry without a version masks any inherited one
                None => {
                    entries.remove(&dep.key());
                }
            }
        }

        Ok(EffectiveModel {
            group_id,
            artifact_id,
            version,
            entries,
            properties,
        })
    }
}

fn model_key(raw: &RawModel) -> String {
    let group_id = raw
        .group_id
        .as_deref()
        .or_else(|| raw.parent.as_ref().map(|p| p.group_id.as_str()))
        .unwrap_or("[unknown]");
    let artifact_id = raw.artifact_id.as_deref().unwrap_or("[unknown]");
    format!("{group_id}:{artifact_id}")
}

/// Standard model self-references: `project.groupId`, `project.artifactId`,
/// `project.version`, plus the legacy `pom.*` aliases still found in older
/// documents.
fn self_references(
    group_id: Option<&str>,
    artifact_id: Option<&str>,
    version: Option<&str>,
) -> HashMap<String, String> {
    let mut refs = HashMap::new();
    for (name, value) in [
        ("groupId", group_id),
        ("artifactId", artifact_id),
        ("version", version),
    ] {
        if let Some(value) = value {
            refs.insert(format!("project.{name}"), value.to_string());
            refs.insert(format!("pom.{name}"), value.to_string());
        }
    }
    refs
}
