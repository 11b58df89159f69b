//! Workflow dispatcher
//!
//! Executes a document-described sequence of operations with value
//! threading between nodes. Nodes run in document order; a single node's
//! failure is recorded and never aborts the run. Each run owns its
//! [`OutputStore`], so concurrent runs are fully isolated.

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::outputs::OutputStore;
use crate::registry::Registry;
use crate::value::OpValue;
use crate::workflow::{Node, Workflow};

/// Parameters whose resolved value must be a frame before dispatch
const FRAME_PARAMS: [&str; 3] = ["df", "df1", "df2"];

/// Outcome of one node visit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NodeStatus {
    Completed,
    Skipped { reason: String },
    TypeError { detail: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeOutcome {
    /// Sequential task number, starting at 1, incremented once per node
    /// visited regardless of skip, success, or failure
    pub task_number: usize,
    pub node: String,
    pub function: String,
    #[serde(flatten)]
    pub status: NodeStatus,
    /// Output name the result was stored under, if any
    pub stored_as: Option<String>,
    pub duration_ms: u64,
}

impl NodeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, NodeStatus::Completed)
    }
}

/// Structured summary of one run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub completed: usize,
    pub skipped: usize,
    pub type_errors: usize,
    pub failed: usize,
    pub outcomes: Vec<NodeOutcome>,
}

impl RunReport {
    fn from_outcomes(outcomes: Vec<NodeOutcome>) -> Self {
        let mut report = RunReport {
            completed: 0,
            skipped: 0,
            type_errors: 0,
            failed: 0,
            outcomes: Vec::new(),
        };
        for outcome in &outcomes {
            match outcome.status {
                NodeStatus::Completed => report.completed += 1,
                NodeStatus::Skipped { .. } => report.skipped += 1,
                NodeStatus::TypeError { .. } => report.type_errors += 1,
                NodeStatus::Failed { .. } => report.failed += 1,
            }
        }
        report.outcomes = outcomes;
        report
    }

    /// Whether every node completed
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.type_errors == 0 && self.failed == 0
    }
}

/// Workflow runner
#[derive(Debug, Default)]
pub struct Runner;

impl Runner {
    pub fn new() -> Self {
        Self
    }

    /// Parse and run a YAML document with a fresh output store
    pub fn run_str(&self, yaml: &str) -> Result<RunReport, TabulaError> {
        let workflow = Workflow::parse(yaml)?;
        let mut store = OutputStore::new();
        Ok(self.run(&workflow, &mut store))
    }

    /// Run a parsed workflow against a caller-owned output store
    pub fn run(&self, workflow: &Workflow, store: &mut OutputStore) -> RunReport {
        let mut outcomes = Vec::with_capacity(workflow.len());
        for (index, (name, node)) in workflow.nodes.iter().enumerate() {
            outcomes.push(self.run_node(index + 1, name, node, store));
        }
        RunReport::from_outcomes(outcomes)
    }

    fn run_node(
        &self,
        task_number: usize,
        name: &str,
        node: &Node,
        store: &mut OutputStore,
    ) -> NodeOutcome {
        let started = Instant::now();
        let outcome = |status: NodeStatus, stored_as: Option<String>| NodeOutcome {
            task_number,
            node: name.to_string(),
            function: node.function.clone(),
            status,
            stored_as,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        let Some(op) = Registry::get(&node.function) else {
            warn!(
                task = task_number,
                node = name,
                function = %node.function,
                "unknown operation, skipping node"
            );
            return outcome(
                NodeStatus::Skipped {
                    reason: TabulaError::OpNotFound(node.function.clone()).to_string(),
                },
                None,
            );
        };

        let args = match resolve_params(&node.params, store) {
            Ok(args) => args,
            Err(e) => {
                warn!(task = task_number, node = name, error = %e, "argument resolution failed");
                return outcome(
                    NodeStatus::Failed {
                        error: e.to_string(),
                    },
                    None,
                );
            }
        };

        // frame parameters are type-gated before dispatch so a bad
        // reference fails the node, not the operation
        for key in FRAME_PARAMS {
            if let Some(value) = args.get(key) {
                if !value.is_frame() {
                    let detail = format!("'{key}' resolved to {}", value.kind());
                    warn!(task = task_number, node = name, %detail, "type check failed");
                    return outcome(NodeStatus::TypeError { detail }, None);
                }
            }
        }

        info!(
            task = task_number,
            node = name,
            function = %node.function,
            "running node"
        );

        match op(&args) {
            Ok(value) => {
                let stored_as = node.vars.clone();
                if let Some(var) = &stored_as {
                    store.insert(var.clone(), value);
                    info!(task = task_number, node = name, output = %var, "output saved");
                }
                outcome(NodeStatus::Completed, stored_as)
            }
            Err(e) => {
                warn!(task = task_number, node = name, error = %e, "node failed");
                outcome(
                    NodeStatus::Failed {
                        error: e.to_string(),
                    },
                    None,
                )
            }
        }
    }
}

/// Substitute output references into node parameters.
///
/// A string value equal to an existing output name resolves to the stored
/// value; everything else passes through as a literal.
fn resolve_params(
    params: &HashMap<String, serde_yaml::Value>,
    store: &OutputStore,
) -> Result<OpArgs, TabulaError> {
    let mut resolved: HashMap<String, OpValue> = HashMap::with_capacity(params.len());
    for (key, value) in params {
        let op_value = match value.as_str().and_then(|s| store.get(s)) {
            Some(stored) => stored.clone(),
            None => OpValue::Scalar(serde_json::to_value(value).map_err(|e| {
                TabulaError::argument(key.clone(), format!("unsupported literal: {e}"))
            })?),
        };
        resolved.insert(key.clone(), op_value);
    }
    Ok(OpArgs::new(resolved))
}
