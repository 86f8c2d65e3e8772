//! Domain types for BOM models and dependency coordinates.

use std::collections::HashMap;

/// A dependency coordinate. Lookup identity is `groupId:artifactId`;
/// the version is an attribute, needed only to build repository paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
        }
    }

    /// Canonical identity: "{groupId}:{artifactId}"
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.version.as_deref().unwrap_or("[unknown]")
        )
    }
}

/// One entry of a BOM's dependency-management section.
///
/// The version may be absent or contain unresolved `${...}` references.
/// Scope and type are carried to recognize BOM imports
/// (`scope=import`, `type=pom`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub dep_type: Option<String>,
}

impl ManagedDependency {
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn is_import(&self) -> bool {
        self.scope.as_deref() == Some("import") && self.dep_type.as_deref() == Some("pom")
    }
}

/// A parsed BOM document, before parent merging and interpolation.
///
/// Repositories declared by the document itself are not represented:
/// lookups always use the caller-supplied endpoint list.
#[derive(Debug, Clone, Default)]
pub struct RawModel {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent: Option<Coordinate>,
    pub managed: Vec<ManagedDependency>,
    pub properties: HashMap<String, String>,
}

/// A BOM after parent merging and property interpolation.
///
/// `entries` maps `groupId:artifactId` to a version string; a reference
/// the interpolator could not resolve stays as its literal `${...}` text.
/// `properties` is the merged parent-chain property view, child over parent.
#[derive(Debug, Clone)]
pub struct EffectiveModel {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub entries: HashMap<String, String>,
    pub properties: HashMap<String, String>,
}

impl EffectiveModel {
    /// Identity string for diagnostics: "{groupId}:{artifactId}:{version}".
    pub fn id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id.as_deref().unwrap_or("[unknown]"),
            self.artifact_id.as_deref().unwrap_or("[unknown]"),
            self.version.as_deref().unwrap_or("[unknown]")
        )
    }

    pub fn version_of(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.entries
            .get(&format!("{group_id}:{artifact_id}"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_and_id() {
        let coord = Coordinate::new("com.example", "platform", Some("1.0.0".into()));
        assert_eq!(coord.key(), "com.example:platform");
        assert_eq!(coord.id(), "com.example:platform:1.0.0");
    }

    #[test]
    fn test_coordinate_id_without_version() {
        let coord = Coordinate::new("com.example", "platform", None);
        assert_eq!(coord.id(), "com.example:platform:[unknown]");
    }

    #[test]
    fn test_managed_dependency_import_detection() {
        let dep = ManagedDependency {
            group_id: "com.example".into(),
            artifact_id: "other-bom".into(),
            version: Some("2.0".into()),
            scope: Some("import".into()),
            dep_type: Some("pom".into()),
        };
        assert!(dep.is_import());

        let plain = ManagedDependency {
            scope: None,
            dep_type: None,
            ..dep.clone()
        };
        assert!(!plain.is_import());

        // import scope without type=pom is not an import
        let jar = ManagedDependency {
            dep_type: Some("jar".into()),
            ..dep
        };
        assert!(!jar.is_import());
    }

    #[test]
    fn test_effective_model_id() {
        let model = EffectiveModel {
            group_id: Some("com.example".into()),
            artifact_id: Some("platform-bom".into()),
            version: Some("1.0.0".into()),
            entries: HashMap::new(),
            properties: HashMap::new(),
        };
        assert_eq!(model.id(), "com.example:platform-bom:1.0.0");
    }

    #[test]
    fn test_effective_model_version_of() {
        let mut entries = HashMap::new();
        entries.insert("com.x:lib".to_string(), "2.0".to_string());
        let model = EffectiveModel {
            group_id: None,
            artifact_id: None,
            version: None,
            entries,
            properties: HashMap::new(),
        };
        assert_eq!(model.version_of("com.x", "lib"), Some("2.0"));
        assert_eq!(model.version_of("com.x", "missing"), None);
        assert_eq!(model.id(), "[unknown]:[unknown]:[unknown]");
    }
}
