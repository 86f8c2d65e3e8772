//! Integration tests using fixture files.

use bom_core::{PropertySources, expand, parse_pom};

fn load_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

#[test]
fn test_fixture_platform_bom() {
    let content = load_fixture("platform_bom.xml");
    let model = parse_pom(&content).unwrap();

    assert_eq!(model.group_id.as_deref(), Some("com.example.platform"));
    assert_eq!(model.artifact_id.as_deref(), Some("platform-bom"));
    assert_eq!(model.version.as_deref(), Some("1.4.0"));
    assert!(model.parent.is_none());

    assert_eq!(model.managed.len(), 4);
    let commons = model
        .managed
        .iter()
        .find(|d| d.key() == "org.apache.commons:commons-lang3")
        .expect("commons-lang3 not found");
    assert_eq!(commons.version.as_deref(), Some("${commons.version}"));

    assert_eq!(
        model.properties.get("commons.version"),
        Some(&"3.14.0".to_string())
    );
}

#[test]
fn test_fixture_platform_bom_interpolates() {
    let content = load_fixture("platform_bom.xml");
    let model = parse_pom(&content).unwrap();

    let sources = PropertySources::new().layer(&model.properties);
    let commons = model
        .managed
        .iter()
        .find(|d| d.key() == "org.apache.commons:commons-lang3")
        .unwrap();
    assert_eq!(
        expand(commons.version.as_deref().unwrap(), &sources),
        "3.14.0"
    );
}

#[test]
fn test_fixture_child_bom() {
    let content = load_fixture("child_bom.xml");
    let model = parse_pom(&content).unwrap();

    let parent = model.parent.expect("parent not captured");
    assert_eq!(parent.key(), "com.example.platform:platform-bom");
    assert_eq!(parent.version.as_deref(), Some("1.4.0"));

    // group and version are inherited, only artifactId is declared
    assert_eq!(model.group_id, None);
    assert_eq!(model.version, None);
    assert_eq!(model.artifact_id.as_deref(), Some("service-bom"));

    assert_eq!(model.managed.len(), 2);
    assert_eq!(
        model.properties.get("commons.version"),
        Some(&"3.15.0".to_string())
    );
}

#[test]
fn test_fixture_import_bom() {
    let content = load_fixture("import_bom.xml");
    let model = parse_pom(&content).unwrap();

    assert_eq!(model.managed.len(), 2);
    let import = model
        .managed
        .iter()
        .find(|d| d.key() == "com.example.platform:platform-bom")
        .expect("import entry not found");
    assert!(import.is_import());

    let own = model
        .managed
        .iter()
        .find(|d| d.key() == "org.slf4j:slf4j-api")
        .expect("own entry not found");
    assert!(!own.is_import());
    assert_eq!(own.version.as_deref(), Some("2.0.13"));
}
