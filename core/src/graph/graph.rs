//! The graph container: nodes, links, selection, and boundary pins.

use serde::{Deserialize, Serialize};

use super::link::Link;
use super::node::Node;
use super::pin::{split_pin_path, Pin};

/// A pin exposed on the boundary of a graph.
///
/// When the graph backs a [`Subgraph`](super::NodeKind::Subgraph) node, each
/// exposed pin is mirrored as a pin on that node; `binding` records which
/// inner pin the boundary pin stands for, so expanding the subgraph can
/// re-attach outer links to the right inner pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposedPin {
    pub pin: Pin,
    /// Path of the inner pin this boundary pin forwards to; empty when the
    /// pin was declared directly rather than created by a collapse.
    pub binding: String,
}

/// A graph: a flat set of uniquely named nodes plus the links between their
/// pins.
///
/// Everything is addressed by stable textual identity (node names,
/// dot-separated pin paths); no indices or references escape this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    /// Names of currently selected nodes, in selection order.
    pub selection: Vec<String>,
    /// Boundary pins of this graph (see [`ExposedPin`]).
    pub exposed_pins: Vec<ExposedPin>,
}

/// A serializable subset of a graph: the exchange format of node
/// export/import (and thereby of collapse/expand undo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeClipboard {
    pub nodes: Vec<Node>,
    /// Links with both endpoints inside `nodes`.
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.node(name).is_some()
    }

    /// Adds a node; fails (returns `false`) on a name collision.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.has_node(&node.name) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Removes a node by name, returning it. Links touching the node are the
    /// caller's responsibility (they are usually broken one by one so the
    /// breaks can be recorded); the selection entry is dropped here.
    pub fn remove_node(&mut self, name: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.name == name)?;
        self.selection.retain(|s| s != name);
        Some(self.nodes.remove(index))
    }

    /// Renames a node and rewrites every path that mentions it: link
    /// endpoints, the selection, and injection entries on other nodes' pins.
    pub fn rename_node(&mut self, old: &str, new: &str) -> bool {
        if !self.has_node(old) || self.has_node(new) {
            return false;
        }
        for node in &mut self.nodes {
            if node.name == old {
                node.name = new.to_string();
            }
            for pin in &mut node.pins {
                rewrite_injections(pin, old, new);
            }
        }
        for link in &mut self.links {
            if let Some((node, rest)) = split_pin_path(&link.source) {
                if node == old {
                    link.source = format!("{new}.{rest}");
                }
            }
            if let Some((node, rest)) = split_pin_path(&link.target) {
                if node == old {
                    link.target = format!("{new}.{rest}");
                }
            }
        }
        for selected in &mut self.selection {
            if selected == old {
                *selected = new.to_string();
            }
        }
        true
    }

    /// Resolves a full pin path (`"Node.Pin.Sub"`) to a pin.
    pub fn find_pin(&self, path: &str) -> Option<&Pin> {
        let (node_name, rest) = split_pin_path(path)?;
        let segments: Vec<&str> = rest.split('.').collect();
        self.node(node_name)?.find_pin(&segments)
    }

    /// Mutable variant of [`find_pin`](Self::find_pin).
    pub fn find_pin_mut(&mut self, path: &str) -> Option<&mut Pin> {
        let (node_name, rest) = split_pin_path(path)?;
        let segments: Vec<&str> = rest.split('.').collect();
        self.node_mut(node_name)?.find_pin_mut(&segments)
    }

    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.links
            .iter()
            .any(|l| l.source == source && l.target == target)
    }

    /// Removes the link between the given pin paths, if present.
    pub fn remove_link(&mut self, source: &str, target: &str) -> bool {
        let before = self.links.len();
        self.links
            .retain(|l| !(l.source == source && l.target == target));
        self.links.len() != before
    }

    /// All links with either endpoint on the given node, cloned.
    pub fn links_touching(&self, node_name: &str) -> Vec<Link> {
        self.links
            .iter()
            .filter(|l| l.touches_node(node_name))
            .cloned()
            .collect()
    }

    /// Returns `base` if free, otherwise `base_1`, `base_2`, ...
    pub fn unique_node_name(&self, base: &str) -> String {
        if !self.has_node(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{base}_{counter}");
            if !self.has_node(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    pub fn exposed_pin(&self, name: &str) -> Option<&ExposedPin> {
        self.exposed_pins.iter().find(|e| e.pin.name == name)
    }

    pub fn exposed_pin_mut(&mut self, name: &str) -> Option<&mut ExposedPin> {
        self.exposed_pins.iter_mut().find(|e| e.pin.name == name)
    }

    /// Extracts the named nodes plus every link fully inside the set.
    /// Returns `None` if any name does not resolve.
    pub fn clipboard(&self, names: &[String]) -> Option<NodeClipboard> {
        let mut nodes = Vec::with_capacity(names.len());
        for node in &self.nodes {
            if names.contains(&node.name) {
                nodes.push(node.clone());
            }
        }
        if nodes.len() != names.len() {
            return None;
        }
        let inside = |path: &str| {
            split_pin_path(path).is_some_and(|(node, _)| names.iter().any(|n| n == node))
        };
        let links = self
            .links
            .iter()
            .filter(|l| inside(&l.source) && inside(&l.target))
            .cloned()
            .collect();
        Some(NodeClipboard { nodes, links })
    }
}

fn rewrite_injections(pin: &mut Pin, old: &str, new: &str) {
    for injection in &mut pin.injections {
        if injection.node_name == old {
            injection.node_name = new.to_string();
        }
    }
    for sub in &mut pin.sub_pins {
        rewrite_injections(sub, old, new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeKind;
    use crate::graph::pin::PinDirection;

    fn add_node(graph: &mut Graph, name: &str) {
        let mut node = Node::new(
            name,
            NodeKind::Operator {
                op_type: "math.Add".into(),
                method: "execute".into(),
            },
        );
        node.pins.push(Pin::new("A", PinDirection::Input, "f32"));
        node.pins.push(Pin::new("Result", PinDirection::Output, "f32"));
        assert!(graph.add_node(node));
    }

    #[test]
    fn add_rejects_duplicate_names() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "Add");
        assert!(!graph.add_node(Node::new("Add", NodeKind::Branch)));
    }

    #[test]
    fn find_pin_by_full_path() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "Add");
        assert!(graph.find_pin("Add.A").is_some());
        assert!(graph.find_pin("Add.Missing").is_none());
        assert!(graph.find_pin("Missing.A").is_none());
    }

    #[test]
    fn rename_rewrites_links_and_selection() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "Add");
        add_node(&mut graph, "Scale");
        graph.links.push(Link::new("Add.Result", "Scale.A"));
        graph.selection.push("Add".into());

        assert!(graph.rename_node("Add", "Sum"));
        assert_eq!(graph.links[0].source, "Sum.Result");
        assert_eq!(graph.selection[0], "Sum");
        assert!(graph.find_pin("Sum.A").is_some());
    }

    #[test]
    fn rename_rejects_collision() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "Add");
        add_node(&mut graph, "Scale");
        assert!(!graph.rename_node("Add", "Scale"));
    }

    #[test]
    fn unique_name_appends_counter() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "Add");
        assert_eq!(graph.unique_node_name("Add"), "Add_1");
        assert_eq!(graph.unique_node_name("Scale"), "Scale");
    }

    #[test]
    fn clipboard_keeps_internal_links_only() {
        let mut graph = Graph::new("Root");
        add_node(&mut graph, "A");
        add_node(&mut graph, "B");
        add_node(&mut graph, "C");
        graph.links.push(Link::new("A.Result", "B.A"));
        graph.links.push(Link::new("C.Result", "A.A"));

        let clipboard = graph.clipboard(&["A".into(), "B".into()]).unwrap();
        assert_eq!(clipboard.nodes.len(), 2);
        assert_eq!(clipboard.links.len(), 1);
        assert_eq!(clipboard.links[0].source, "A.Result");

        assert!(graph.clipboard(&["A".into(), "Missing".into()]).is_none());
    }
}
