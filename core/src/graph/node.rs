//! Nodes: the units placed on the graph canvas.

use serde::{Deserialize, Serialize};

use crate::math::{Color, Vec2};

use super::graph::Graph;
use super::pin::Pin;

/// The concrete kind of a node, with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A named operation resolved from a registered operator type.
    Operator {
        /// Registered type path of the operator, e.g. `"math.Add"`.
        op_type: String,
        /// Method entry point on the operator type.
        method: String,
    },
    /// Reads (getter) or writes (setter) a graph variable.
    Variable {
        variable: String,
        data_type: String,
        is_getter: bool,
    },
    /// Exposes a graph input or output parameter.
    Parameter {
        parameter: String,
        data_type: String,
        is_input: bool,
    },
    /// A free-floating comment box.
    Comment {
        text: String,
        font_size: u32,
        bubble_visible: bool,
    },
    /// A pass-through used to tidy link routing.
    Reroute { show_as_full_node: bool },
    /// Conditional execution split.
    Branch,
    /// Picks one of several inputs by index.
    Select { data_type: String },
    /// A nested graph collapsed behind a single node.
    Subgraph { graph: Box<Graph> },
}

impl NodeKind {
    /// Short tag used in notifications and diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Operator { .. } => "operator",
            Self::Variable { .. } => "variable",
            Self::Parameter { .. } => "parameter",
            Self::Comment { .. } => "comment",
            Self::Reroute { .. } => "reroute",
            Self::Branch => "branch",
            Self::Select { .. } => "select",
            Self::Subgraph { .. } => "subgraph",
        }
    }
}

/// A node on the canvas: identity, kind payload, visual state, and pins.
///
/// Nodes are addressed by name; names are unique within their graph. No
/// component holds references into a node across mutations — everything is
/// re-resolved by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub category: String,
    pub keywords: String,
    pub description: String,
    pub pins: Vec<Pin>,
    /// Whether this node lives inline inside a pin rather than on the canvas.
    pub injected: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec2::zeros(),
            size: Vec2::zeros(),
            color: Color::default(),
            category: String::new(),
            keywords: String::new(),
            description: String::new(),
            pins: Vec::new(),
            injected: false,
        }
    }

    pub fn is_subgraph(&self) -> bool {
        matches!(self.kind, NodeKind::Subgraph { .. })
    }

    pub fn subgraph(&self) -> Option<&Graph> {
        match &self.kind {
            NodeKind::Subgraph { graph } => Some(graph),
            _ => None,
        }
    }

    pub fn subgraph_mut(&mut self) -> Option<&mut Graph> {
        match &mut self.kind {
            NodeKind::Subgraph { graph } => Some(graph),
            _ => None,
        }
    }

    pub fn find_pin_by_name(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.name == name)
    }

    pub fn find_pin_by_name_mut(&mut self, name: &str) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|p| p.name == name)
    }

    /// Resolves pin path segments (relative to this node) to a pin.
    pub fn find_pin(&self, segments: &[&str]) -> Option<&Pin> {
        let (first, rest) = segments.split_first()?;
        let pin = self.find_pin_by_name(first)?;
        if rest.is_empty() {
            Some(pin)
        } else {
            pin.find_sub_pin(rest)
        }
    }

    /// Mutable variant of [`find_pin`](Self::find_pin).
    pub fn find_pin_mut(&mut self, segments: &[&str]) -> Option<&mut Pin> {
        let (first, rest) = segments.split_first()?;
        let pin = self.find_pin_by_name_mut(first)?;
        if rest.is_empty() {
            Some(pin)
        } else {
            pin.find_sub_pin_mut(rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::pin::PinDirection;

    #[test]
    fn find_pin_resolves_segments() {
        let mut node = Node::new(
            "Add",
            NodeKind::Operator {
                op_type: "math.Add".into(),
                method: "execute".into(),
            },
        );
        node.pins.push(Pin::new("A", PinDirection::Input, "f32"));
        node.pins.push(Pin::new("Result", PinDirection::Output, "f32"));

        assert!(node.find_pin(&["A"]).is_some());
        assert!(node.find_pin(&["Result"]).is_some());
        assert!(node.find_pin(&["B"]).is_none());
    }

    #[test]
    fn kind_tags() {
        assert_eq!(NodeKind::Branch.tag(), "branch");
        let comment = NodeKind::Comment {
            text: String::new(),
            font_size: 18,
            bubble_visible: false,
        };
        assert_eq!(comment.tag(), "comment");
    }
}
