//! `${...}` property expansion for managed-dependency version strings.

use std::collections::HashMap;

/// Ordered property lookup: earlier layers win, process environment
/// variables are consulted last.
#[derive(Default)]
pub struct PropertySources<'a> {
    layers: Vec<&'a HashMap<String, String>>,
}

impl<'a> PropertySources<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer below all previously added ones.
    pub fn layer(mut self, properties: &'a HashMap<String, String>) -> Self {
        self.layers.push(properties);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<String> {
        for layer in &self.layers {
            if let Some(value) = layer.get(name) {
                return Some(value.clone());
            }
        }
        std::env::var(name).ok()
    }
}

/// Expands every `${name}` reference in `value`.
///
/// Substitution is a single textual pass: a resolved value is inserted
/// verbatim, even if it contains further references. Unresolved references
/// are kept as their literal text.
pub fn expand(value: &str, sources: &PropertySources<'_>) -> String {
    if !value.contains("${") {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match sources.resolve(name) {
                    Some(resolved) => out.push_str(&resolved),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // unterminated reference, keep the tail as-is
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
