//! Workflow parsing structures
//!
//! A workflow document is a YAML mapping with a single required top-level
//! field, `nodes`. Each entry names a task node; nodes execute in document
//! order, so the mapping is kept as an ordered list after parsing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::TabulaError;

/// One task node: an operation name, its arguments, and an optional
/// output name under which the result is stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    /// Operation name looked up in the registry at dispatch time
    pub function: String,
    /// Argument name -> literal value or reference to a prior output name
    #[serde(default)]
    pub params: HashMap<String, serde_yaml::Value>,
    /// Output name to store the result under
    #[serde(default)]
    pub vars: Option<String>,
    /// Declared upstream nodes. Accepted for documentation purposes only:
    /// execution order is document order, never a topological sort.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Workflow parsed from YAML, nodes in document order
#[derive(Debug, Clone)]
pub struct Workflow {
    pub nodes: Vec<(String, Node)>,
}

impl Workflow {
    /// Parse a YAML document into a workflow.
    ///
    /// A missing or malformed `nodes` mapping is a `Format` error; a node
    /// body that does not match the [`Node`] shape is too.
    pub fn parse(yaml: &str) -> Result<Self, TabulaError> {
        let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;

        let mapping = doc
            .get("nodes")
            .ok_or_else(|| TabulaError::Format("missing top-level 'nodes' field".to_string()))?;
        let mapping = mapping.as_mapping().ok_or_else(|| {
            TabulaError::Format("'nodes' must be a mapping of node name to node".to_string())
        })?;

        let mut nodes = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| TabulaError::Format("node names must be strings".to_string()))?
                .to_string();
            let node: Node = serde_yaml::from_value(value.clone())
                .map_err(|e| TabulaError::Format(format!("node '{name}': {e}")))?;
            nodes.push((name, node));
        }

        Ok(Workflow { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Declared dependencies that do not name any node in the document.
    /// Used by `validate` to warn; never used to reorder execution.
    pub fn unknown_dependencies(&self) -> Vec<(String, String)> {
        let mut unknown = Vec::new();
        for (name, node) in &self.nodes {
            for dep in &node.dependencies {
                if !self.nodes.iter().any(|(n, _)| n == dep) {
                    unknown.push((name.clone(), dep.clone()));
                }
            }
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_document_order() {
        let yaml = r#"
nodes:
  zeta:
    function: read_csv
    params:
      path: a.csv
  alpha:
    function: drop_nans
    params:
      df: data
"#;
        let wf = Workflow::parse(yaml).unwrap();
        assert_eq!(wf.len(), 2);
        assert_eq!(wf.nodes[0].0, "zeta");
        assert_eq!(wf.nodes[1].0, "alpha");
    }

    #[test]
    fn parse_defaults() {
        let yaml = r#"
nodes:
  only:
    function: head
"#;
        let wf = Workflow::parse(yaml).unwrap();
        let (_, node) = &wf.nodes[0];
        assert_eq!(node.function, "head");
        assert!(node.params.is_empty());
        assert!(node.vars.is_none());
        assert!(node.dependencies.is_empty());
    }

    #[test]
    fn missing_nodes_is_format_error() {
        let err = Workflow::parse("tasks: {}").unwrap_err();
        assert!(matches!(err, TabulaError::Format(_)));
    }

    #[test]
    fn non_mapping_nodes_is_format_error() {
        let err = Workflow::parse("nodes: [1, 2]").unwrap_err();
        assert!(matches!(err, TabulaError::Format(_)));
    }

    #[test]
    fn empty_nodes_mapping_is_valid() {
        let wf = Workflow::parse("nodes: {}").unwrap();
        assert!(wf.is_empty());
    }

    #[test]
    fn dependencies_are_parsed_but_unordered() {
        let yaml = r#"
nodes:
  second:
    function: drop_nans
    params:
      df: data
    dependencies:
      - first
  first:
    function: read_csv
    params:
      path: a.csv
    vars: data
"#;
        let wf = Workflow::parse(yaml).unwrap();
        // document order wins, the declared dependency does not reorder
        assert_eq!(wf.nodes[0].0, "second");
        assert!(wf.unknown_dependencies().is_empty());
    }

    #[test]
    fn unknown_dependency_is_reported() {
        let yaml = r#"
nodes:
  clean:
    function: drop_nans
    dependencies:
      - load
"#;
        let wf = Workflow::parse(yaml).unwrap();
        assert_eq!(
            wf.unknown_dependencies(),
            vec![("clean".to_string(), "load".to_string())]
        );
    }
}
