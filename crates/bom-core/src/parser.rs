//! BOM document parser.
//!
//! Uses the quick-xml SAX reader to extract the pieces a recommendation
//! needs: project coordinates, the parent reference, properties, and
//! dependency-management entries. Everything else in the document is
//! skipped, including any `<repositories>` it declares — lookups always
//! run against the caller-supplied endpoint list.

use crate::error::{ModelError, Result};
use crate::types::{Coordinate, ManagedDependency, RawModel};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Context stack element for SAX parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseContext {
    Root,
    Parent,
    Properties,
    DependencyManagement,
    ManagedDependencies,
    Dependency,
    Exclusions,
}

#[derive(Default)]
struct DepAccum {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    dep_type: Option<String>,
}

#[derive(Default)]
struct ParentAccum {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

pub fn parse_pom(content: &str) -> Result<RawModel> {
    let mut model = RawModel::default();

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut context_stack: Vec<ParseContext> = vec![ParseContext::Root];
    // open-element count; project children sit at depth 2
    let mut depth: usize = 0;
    let mut current_field: Option<String> = None;
    let mut current_prop_key: Option<String> = None;
    let mut current_dep: Option<DepAccum> = None;
    let mut current_parent: Option<ParentAccum> = None;

    loop {
        let event = reader.read_event().map_err(|e| ModelError::Malformed {
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let ctx = context_stack.last().cloned().unwrap_or(ParseContext::Root);

                match (ctx, tag.as_str()) {
                    (ParseContext::Root, "parent") if depth == 2 => {
                        context_stack.push(ParseContext::Parent);
                        current_parent = Some(ParentAccum::default());
                        current_field = None;
                    }
                    (ParseContext::Root, "properties") if depth == 2 => {
                        context_stack.push(ParseContext::Properties);
                    }
                    (ParseContext::Root, "dependencyManagement") if depth == 2 => {
                        context_stack.push(ParseContext::DependencyManagement);
                    }
                    (ParseContext::DependencyManagement, "dependencies") => {
                        context_stack.push(ParseContext::ManagedDependencies);
                    }
                    (ParseContext::ManagedDependencies, "dependency") => {
                        context_stack.push(ParseContext::Dependency);
                        current_dep = Some(DepAccum::default());
                        current_field = None;
                    }
                    (ParseContext::Dependency, "exclusions") => {
                        context_stack.push(ParseContext::Exclusions);
                    }
                    (ParseContext::Root, field @ ("groupId" | "artifactId" | "version"))
                        if depth == 2 =>
                    {
                        current_field = Some(field.to_string());
                    }
                    (ParseContext::Parent | ParseContext::Dependency, field) => {
                        current_field = Some(field.to_string());
                    }
                    (ParseContext::Properties, key) if depth == 3 => {
                        current_prop_key = Some(key.to_string());
                    }
                    _ => {
                        current_field = None;
                    }
                }
            }
            Event::Text(ref e) => {
                let text = match e.decode() {
                    Ok(cow) => {
                        let s = cow.trim().to_string();
                        quick_xml::escape::unescape(&s)
                            .map(|c| c.into_owned())
                            .unwrap_or(s)
                    }
                    Err(_) => String::from_utf8_lossy(e.as_ref()).trim().to_string(),
                };
                if text.is_empty() {
                    continue;
                }

                let ctx = context_stack.last().cloned().unwrap_or(ParseContext::Root);
                match ctx {
                    ParseContext::Root => {
                        if let Some(ref field) = current_field {
                            match field.as_str() {
                                "groupId" => model.group_id = Some(text),
                                "artifactId" => model.artifact_id = Some(text),
                                "version" => model.version = Some(text),
                                _ => {}
                            }
                        }
                    }
                    ParseContext::Parent => {
                        if let (Some(ref field), Some(ref mut parent)) =
                            (current_field.as_ref(), current_parent.as_mut())
                        {
                            match field.as_str() {
                                "groupId" => parent.group_id = Some(text),
                                "artifactId" => parent.artifact_id = Some(text),
                                "version" => parent.version = Some(text),
                                _ => {}
                            }
                        }
                    }
                    ParseContext::Dependency => {
                        if let (Some(ref field), Some(ref mut dep)) =
                            (current_field.as_ref(), current_dep.as_mut())
                        {
                            match field.as_str() {
                                "groupId" => dep.group_id = Some(text),
                                "artifactId" => dep.artifact_id = Some(text),
                                "version" => dep.version = Some(text),
                                "scope" => dep.scope = Some(text),
                                "type" => dep.dep_type = Some(text),
                                _ => {}
                            }
                        }
                    }
                    ParseContext::Properties => {
                        if let Some(key) = current_prop_key.take() {
                            model.properties.insert(key, text);
                        }
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let ctx = context_stack.last().cloned().unwrap_or(ParseContext::Root);

                match (ctx, tag.as_str()) {
                    (ParseContext::Parent, "parent") => {
                        context_stack.pop();
                        model.parent = current_parent.take().and_then(finalize_parent);
                    }
                    (ParseContext::Properties, "properties") => {
                        context_stack.pop();
                    }
                    (ParseContext::DependencyManagement, "dependencyManagement") => {
                        context_stack.pop();
                    }
                    (ParseContext::ManagedDependencies, "dependencies") => {
                        context_stack.pop();
                    }
                    (ParseContext::Dependency, "dependency") => {
                        context_stack.pop();
                        if let Some(dep) = current_dep.take()
                            && let Some(managed) = finalize_dep(dep)
                        {
                            model.managed.push(managed);
                        }
                        current_field = None;
                    }
                    (ParseContext::Exclusions, "exclusions") => {
                        context_stack.pop();
                    }
                    _ => {
                        current_field = None;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(
        "parsed BOM document {:?}: {} managed entries, {} properties",
        model.artifact_id,
        model.managed.len(),
        model.properties.len()
    );

    Ok(model)
}

/// Parses raw document bytes; the wire encoding must be UTF-8.
pub fn parse_pom_bytes(bytes: &[u8]) -> Result<RawModel> {
    let content = std::str::from_utf8(bytes).map_err(|e| ModelError::Malformed {
        message: format!("document is not valid UTF-8: {e}"),
    })?;
    parse_pom(content)
}

fn finalize_parent(parent: ParentAccum) -> Option<Coordinate> {
    Some(Coordinate {
        group_id: parent.group_id?,
        artifact_id: parent.artifact_id?,
        version: parent.version,
    })
}

fn finalize_dep(dep: DepAccum) -> Option<ManagedDependency> {
    Some(ManagedDependency {
        group_id: dep.group_id?,
        artifact_id: dep.artifact_id?,
        version: dep.version,
        scope: dep.scope,
        dep_type: dep.dep_type,
    })
}
