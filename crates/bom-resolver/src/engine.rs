//! Recommendation engine: folds BOM inputs into one memoized version map.

use std::collections::HashMap;
use tokio::sync::OnceCell;

use crate::builder::ModelBuilder;
use crate::error::{ResolveError, Result};
use crate::repository::{RepositoryEndpoint, RepositoryLocator};

/// How a BOM input was classified by the caller, typically from its
/// file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pom,
    Other,
}

impl SourceKind {
    /// Classification from a file-like name: anything ending in "pom"
    /// counts as a BOM document.
    pub fn from_name(name: &str) -> Self {
        if name.ends_with("pom") {
            Self::Pom
        } else {
            Self::Other
        }
    }
}

/// One BOM input: raw document bytes plus an identity string used in
/// diagnostics.
#[derive(Debug, Clone)]
pub struct BomSource {
    pub identity: String,
    pub kind: SourceKind,
    pub bytes: Vec<u8>,
}

impl BomSource {
    pub fn new(identity: impl Into<String>, kind: SourceKind, bytes: Vec<u8>) -> Self {
        Self {
            identity: identity.into(),
            kind,
            bytes,
        }
    }

    pub fn pom(identity: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(identity, SourceKind::Pom, bytes)
    }
}

/// `groupId:artifactId` to recommended version.
pub type RecommendationMap = HashMap<String, String>;

struct Resolved {
    recommendations: RecommendationMap,
    diagnostics: Vec<String>,
}

/// Folds every configured BOM input into one `group:artifact -> version`
/// map. The map is materialized once, on first use; every later lookup
/// reuses it without touching the network again.
pub struct RecommendationEngine {
    sources: Vec<BomSource>,
    endpoints: Vec<RepositoryEndpoint>,
    context: HashMap<String, String>,
    builder: ModelBuilder,
    resolved: OnceCell<Resolved>,
}

impl RecommendationEngine {
    pub fn new(
        sources: Vec<BomSource>,
        endpoints: Vec<RepositoryEndpoint>,
        context: HashMap<String, String>,
    ) -> Result<Self> {
        let locator = RepositoryLocator::new().map_err(|e| ResolveError::HttpClient {
            message: e.to_string(),
        })?;
        Ok(Self::with_locator(sources, endpoints, context, locator))
    }

    /// An engine with a caller-configured locator, e.g. for custom fetch
    /// timeouts.
    pub fn with_locator(
        sources: Vec<BomSource>,
        endpoints: Vec<RepositoryEndpoint>,
        context: HashMap<String, String>,
        locator: RepositoryLocator,
    ) -> Self {
        Self {
            sources,
            endpoints,
            context,
            builder: ModelBuilder::new(locator),
            resolved: OnceCell::new(),
        }
    }

    /// The full recommendation map, built on first call.
    pub async fn recommendations(&self) -> Result<&RecommendationMap> {
        Ok(&self.resolve_all().await?.recommendations)
    }

    /// The recommended version for one coordinate, or `None` when no
    /// processed BOM declares it.
    pub async fn version(&self, group_id: &str, artifact_id: &str) -> Result<Option<&str>> {
        Ok(self
            .resolve_all()
            .await?
            .recommendations
            .get(&format!("{group_id}:{artifact_id}"))
            .map(String::as_str))
    }

    /// One `uses ...` line per consumed BOM, in processing order.
    pub async fn diagnostics(&self) -> Result<&[String]> {
        Ok(self.resolve_all().await?.diagnostics.as_slice())
    }

    async fn resolve_all(&self) -> Result<&Resolved> {
        self.resolved.get_or_try_init(|| self.scan_sources()).await
    }

    async fn scan_sources(&self) -> Result<Resolved> {
        let mut recommendations = RecommendationMap::new();
        let mut diagnostics = Vec::new();

        for source in &self.sources {
            if source.kind != SourceKind::Pom {
                // the first non-POM input ends the whole scan; later
                // sources are never read
                tracing::warn!("stopping at non-BOM input {}", source.identity);
                break;
            }

            let model = self
                .builder
                .build_effective(&source.bytes, &self.endpoints, &self.context)
                .await?;

            let line = format!("uses {}", model.id());
            tracing::info!("{line}");
            diagnostics.push(line);

            // later inputs overwrite earlier ones sharing a key
            recommendations.extend(model.entries);
        }

        Ok(Resolved {
            recommendations,
            diagnostics,
        })
    }
}
