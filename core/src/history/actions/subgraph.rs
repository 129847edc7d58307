//! Actions covering the text round-trip and subgraph structure: import,
//! collapse/expand, and entering/leaving nested graphs.

use serde::{Deserialize, Serialize};

use crate::controller::{ControllerError, GraphController};
use crate::graph::Link;
use crate::history::record::{ActionResult, GraphAction};
use crate::math::Vec2;

/// Re-imports a node from its exported text.
///
/// Also serves as the recreation step for removed subgraph nodes, whose
/// contents cannot be captured field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportNodeFromTextAction {
    pub node_path: String,
    pub position: Vec2,
    pub exported_text: String,
}

impl GraphAction for ImportNodeFromTextAction {
    fn title(&self) -> String {
        "Import node from text".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        let imported = ctl.import_nodes_from_text(&self.exported_text, false)?;
        if imported.len() != 1 {
            return Err(ControllerError::InvalidOperation(format!(
                "expected to import exactly one node, got {}",
                imported.len()
            )));
        }
        Ok(())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Collapses a set of nodes into one subgraph node.
///
/// Captures, before the collapse runs, the full exported text of the
/// affected nodes plus the textual `source -> target` form of every link
/// crossing the collapse boundary. Undo re-imports the originals and
/// re-attaches the boundary links by path text, independent of whatever
/// identities the collapse assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapseNodesAction {
    pub collapsed_node_path: String,
    pub collapsed_node_paths: Vec<String>,
    pub collapsed_content: String,
    pub boundary_links: Vec<String>,
}

impl GraphAction for CollapseNodesAction {
    fn title(&self) -> String {
        "Collapse nodes".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.collapse_nodes(&self.collapsed_node_paths, &self.collapsed_node_path, false)
            .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.collapsed_node_path, false)?;

        let recovered = ctl.import_nodes_from_text(&self.collapsed_content, false)?;
        if recovered.len() != self.collapsed_node_paths.len() {
            return Err(ControllerError::InvalidOperation(format!(
                "collapse undo recovered {} of {} nodes",
                recovered.len(),
                self.collapsed_node_paths.len()
            )));
        }

        restore_links(ctl, &self.boundary_links);
        Ok(())
    }
}

/// Expands a subgraph node back into its contents.
///
/// The exported text and link representations are captured before the
/// expansion; the names of the nodes that actually came out are filled in
/// afterwards so redo can verify it reproduced the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandNodeAction {
    pub subgraph_node_path: String,
    pub subgraph_content: String,
    pub subgraph_links: Vec<String>,
    pub expanded_node_paths: Vec<String>,
}

impl GraphAction for ExpandNodeAction {
    fn title(&self) -> String {
        "Expand node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        let expanded = ctl.expand_node(&self.subgraph_node_path, false)?;
        if expanded.len() != self.expanded_node_paths.len() {
            return Err(ControllerError::InvalidOperation(format!(
                "expand redo produced {} of {} nodes",
                expanded.len(),
                self.expanded_node_paths.len()
            )));
        }
        Ok(())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        for path in &self.expanded_node_paths {
            ctl.remove_node_by_name(path, false)?;
        }

        let recovered = ctl.import_nodes_from_text(&self.subgraph_content, false)?;
        if recovered.len() != 1 {
            return Err(ControllerError::InvalidOperation(format!(
                "expand undo recovered {} nodes, expected the subgraph node",
                recovered.len()
            )));
        }

        restore_links(ctl, &self.subgraph_links);
        Ok(())
    }
}

/// Re-attaches links from their textual representations. Individual
/// failures are logged, not fatal: a link whose far end went away should
/// not abort restoring everything else.
fn restore_links(ctl: &mut dyn GraphController, representations: &[String]) {
    for representation in representations {
        let Some((source, target)) = Link::split_path_representation(representation) else {
            log::warn!("skipping malformed link representation '{representation}'");
            continue;
        };
        if let Err(e) = ctl.add_link(source, target, false) {
            log::warn!("failed to restore link '{representation}': {e}");
        }
    }
}

/// Starts editing a subgraph. The subgraph is referenced by the name of its
/// node — a deferred handle resolved (or failed) at replay time, because
/// the subgraph may not be resident between undo and redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushGraphAction {
    pub graph_node_path: String,
}

impl GraphAction for PushGraphAction {
    fn title(&self) -> String {
        "Push graph".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.push_graph(&self.graph_node_path, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.pop_graph(false).map(|_| ())
    }
}

/// Stops editing the innermost pushed subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopGraphAction {
    pub graph_node_path: String,
}

impl GraphAction for PopGraphAction {
    fn title(&self) -> String {
        "Pop graph".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.pop_graph(false).map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.push_graph(&self.graph_node_path, false)
    }
}
