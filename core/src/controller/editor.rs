//! The reference controller: an in-memory graph session with recording.
//!
//! [`GraphEditor`] owns the root graph, a stack of pushed subgraphs, and
//! one [`ActionStack`] for the session. Every mutation method validates,
//! captures its action while the pre-mutation state is still observable,
//! mutates, notifies observers, and finally records — so the action always
//! holds exactly the old state it needs to invert.
//!
//! Undo/redo temporarily move the action stack out of the editor while the
//! stack replays against it; replayed mutations pass `record = false` and
//! therefore never touch the (empty) resident stack.

use std::collections::BTreeSet;
use std::fmt;

use crate::graph::{
    ExposedPin, Graph, Injection, Link, Node, NodeClipboard, NodeKind, Pin, PinDirection,
};
use crate::history::actions::*;
use crate::history::{ActionRecord, ActionStack};
use crate::math::{Color, Vec2};

use super::error::{ControllerError, ControllerResult};
use super::events::GraphEvent;
use super::registry::OperatorRegistry;
use super::GraphController;

/// Observer callback for graph-modified notifications.
pub type GraphObserver = Box<dyn FnMut(&GraphEvent)>;

/// An editing session over an in-memory graph.
pub struct GraphEditor {
    registry: OperatorRegistry,
    root: Graph,
    /// Names of pushed subgraph nodes, outermost first. Each name resolves
    /// within the graph formed by the names before it — a deferred handle,
    /// re-resolved (or failed) on every access.
    graph_stack: Vec<String>,
    stack: ActionStack,
    observers: Vec<GraphObserver>,
    notifications_suspended: bool,
}

impl GraphEditor {
    pub fn new(registry: OperatorRegistry) -> Self {
        Self {
            registry,
            root: Graph::new("Root"),
            graph_stack: Vec::new(),
            stack: ActionStack::new(),
            observers: Vec::new(),
            notifications_suspended: false,
        }
    }

    /// The root graph (read-only).
    pub fn graph(&self) -> &Graph {
        &self.root
    }

    /// The graph currently being edited: the root, or the innermost pushed
    /// subgraph.
    pub fn edited_graph(&self) -> ControllerResult<&Graph> {
        self.graph_at(self.graph_stack.len())
    }

    /// Read-only view of the session's undo history.
    pub fn action_stack(&self) -> &ActionStack {
        &self.stack
    }

    /// Registers an observer for graph-modified notifications.
    pub fn on_modified(&mut self, observer: impl FnMut(&GraphEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Suppresses (or re-enables) notification broadcasts. Useful while
    /// performing a large batch of changes that observers should only see
    /// the end of.
    pub fn suspend_notifications(&mut self, suspend: bool) {
        self.notifications_suspended = suspend;
    }

    // --- session-level history API -----------------------------------------

    /// Opens an undo bracket; all mutations until the matching close commit
    /// as one undo step.
    pub fn open_undo_bracket(&mut self, title: &str) {
        self.stack.open_bracket(title);
        self.notify(GraphEvent::BracketOpened);
    }

    /// Closes the innermost undo bracket.
    pub fn close_undo_bracket(&mut self) -> bool {
        let ok = self.stack.close_bracket();
        if ok {
            self.notify(GraphEvent::BracketClosed);
        }
        ok
    }

    /// Cancels the innermost undo bracket. Mutations already applied inside
    /// it stay applied; they just will not be undoable as a step.
    pub fn cancel_undo_bracket(&mut self) -> bool {
        let ok = self.stack.cancel_bracket();
        if ok {
            self.notify(GraphEvent::BracketCanceled);
        }
        ok
    }

    /// Undoes the most recent step. Returns `false` (after reporting) when
    /// there is nothing to undo or the step failed.
    pub fn undo(&mut self) -> bool {
        let mut stack = std::mem::take(&mut self.stack);
        let ok = stack.undo(self);
        self.stack = stack;
        ok
    }

    /// Redoes the most recently undone step.
    pub fn redo(&mut self) -> bool {
        let mut stack = std::mem::take(&mut self.stack);
        let ok = stack.redo(self);
        self.stack = stack;
        ok
    }

    /// Replays undo/redo until the history cursor matches `desired` —
    /// invoked after an external transaction system moved independently.
    pub fn reconcile(&mut self, desired: usize) -> bool {
        let mut stack = std::mem::take(&mut self.stack);
        let ok = stack.reconcile(desired, self);
        self.stack = stack;
        ok
    }

    /// Marks the current state as saved (see
    /// [`ActionStack::has_unsaved_changes`]).
    pub fn mark_saved(&mut self) {
        self.stack.mark_saved();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.stack.has_unsaved_changes()
    }

    // --- graph resolution ---------------------------------------------------

    fn graph_at(&self, depth: usize) -> ControllerResult<&Graph> {
        let mut graph = &self.root;
        for name in &self.graph_stack[..depth] {
            graph = graph
                .node(name)
                .and_then(Node::subgraph)
                .ok_or_else(|| ControllerError::NodeNotFound(name.clone()))?;
        }
        Ok(graph)
    }

    fn graph_at_mut(&mut self, depth: usize) -> ControllerResult<&mut Graph> {
        let mut graph = &mut self.root;
        for name in &self.graph_stack[..depth] {
            graph = graph
                .node_mut(name)
                .and_then(Node::subgraph_mut)
                .ok_or_else(|| ControllerError::NodeNotFound(name.clone()))?;
        }
        Ok(graph)
    }

    fn current(&self) -> ControllerResult<&Graph> {
        self.graph_at(self.graph_stack.len())
    }

    fn current_mut(&mut self) -> ControllerResult<&mut Graph> {
        self.graph_at_mut(self.graph_stack.len())
    }

    // --- internals ----------------------------------------------------------

    fn record(&mut self, record: bool, action: ActionRecord) {
        if record {
            self.stack.push_action(action);
        }
    }

    /// Resolves the node name to create: the requested one (must be free)
    /// or a unique name derived from `base`.
    fn resolve_new_node_name(&self, requested: &str, base: &str) -> ControllerResult<String> {
        let graph = self.current()?;
        if requested.is_empty() {
            return Ok(graph.unique_node_name(base));
        }
        if graph.has_node(requested) {
            return Err(ControllerError::NameCollision(requested.to_string()));
        }
        Ok(requested.to_string())
    }

    fn insert_node(
        &mut self,
        node: Node,
        record: bool,
        action: ActionRecord,
    ) -> ControllerResult<String> {
        let name = node.name.clone();
        self.current_mut()?.add_node(node);
        self.notify(GraphEvent::NodeAdded { node: name.clone() });
        self.record(record, action);
        Ok(name)
    }

    /// The requested node names plus every node injected into their pins.
    fn names_with_injected(&self, names: &[String]) -> ControllerResult<Vec<String>> {
        let graph = self.current()?;
        let mut all = names.to_vec();
        for name in names {
            let node = graph
                .node(name)
                .ok_or_else(|| ControllerError::NodeNotFound(name.clone()))?;
            for pin in &node.pins {
                for injection in &pin.injections {
                    if !all.contains(&injection.node_name) {
                        all.push(injection.node_name.clone());
                    }
                }
            }
        }
        Ok(all)
    }
}

/// Inserts clipboard contents into `graph`, uniquifying node names and
/// rewriting links and injection entries accordingly. Returns the names of
/// the inserted top-level (non-injected) nodes, in clipboard order, plus
/// the (old, new) renames that were applied.
fn insert_clipboard(
    graph: &mut Graph,
    clipboard: NodeClipboard,
) -> (Vec<String>, Vec<(String, String)>) {
    let NodeClipboard { mut nodes, mut links } = clipboard;

    let mut taken: BTreeSet<String> = graph.nodes.iter().map(|n| n.name.clone()).collect();
    let mut mapping: Vec<(String, String)> = Vec::new();
    for node in &nodes {
        let mut candidate = node.name.clone();
        let mut counter = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}_{counter}", node.name);
            counter += 1;
        }
        taken.insert(candidate.clone());
        if candidate != node.name {
            mapping.push((node.name.clone(), candidate));
        }
    }

    for (old, new) in &mapping {
        for node in &mut nodes {
            if node.name == *old {
                node.name = new.clone();
            }
            for pin in &mut node.pins {
                rewrite_pin_injections(pin, old, new);
            }
        }
        for link in &mut links {
            if link.source_node() == old {
                if let Some((_, rest)) = link.source.split_once('.') {
                    link.source = format!("{new}.{rest}");
                }
            }
            if link.target_node() == old {
                if let Some((_, rest)) = link.target.split_once('.') {
                    link.target = format!("{new}.{rest}");
                }
            }
        }
    }

    let mut inserted = Vec::new();
    for node in nodes {
        if !node.injected {
            inserted.push(node.name.clone());
        }
        graph.add_node(node);
    }
    graph.links.extend(links);
    (inserted, mapping)
}

fn rewrite_pin_injections(pin: &mut Pin, old: &str, new: &str) {
    for injection in &mut pin.injections {
        if injection.node_name == old {
            injection.node_name = new.to_string();
        }
    }
    for sub in &mut pin.sub_pins {
        rewrite_pin_injections(sub, old, new);
    }
}

/// Derives a boundary pin name from an inner pin path: `"A.Result"`
/// becomes `"A_Result"`, uniquified against the already-exposed names.
fn exposed_pin_name(inner_pin_path: &str, exposed: &[ExposedPin]) -> String {
    let base = inner_pin_path.replace('.', "_");
    if !exposed.iter().any(|e| e.pin.name == base) {
        return base;
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{base}_{counter}");
        if !exposed.iter().any(|e| e.pin.name == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn short_type_name(op_type: &str) -> &str {
    op_type.rsplit('.').next().unwrap_or(op_type)
}

/// Applies node renames to a pin path.
fn remap_pin_path(path: &str, renames: &[(String, String)]) -> String {
    let Some((node, rest)) = path.split_once('.') else {
        return path.to_string();
    };
    for (old, new) in renames {
        if node == old {
            return format!("{new}.{rest}");
        }
    }
    path.to_string()
}

impl GraphController for GraphEditor {
    fn notify(&mut self, event: GraphEvent) {
        if self.notifications_suspended {
            return;
        }
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // --- node creation -----------------------------------------------------

    fn add_operator_node(
        &mut self,
        op_type: &str,
        method: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let spec = self.registry.get(op_type).ok_or_else(|| {
            ControllerError::InvalidOperation(format!("unknown operator type '{op_type}'"))
        })?;
        let pins = spec.pins.clone();
        let name = self.resolve_new_node_name(name, short_type_name(op_type))?;

        let mut node = Node::new(
            &name,
            NodeKind::Operator {
                op_type: op_type.to_string(),
                method: method.to_string(),
            },
        );
        node.position = position;
        node.pins = pins;

        let action = ActionRecord::from_action(AddOperatorNodeAction {
            op_type: op_type.to_string(),
            method: method.to_string(),
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_variable_node(
        &mut self,
        variable: &str,
        data_type: &str,
        is_getter: bool,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, variable)?;

        let direction = if is_getter {
            PinDirection::Output
        } else {
            PinDirection::Input
        };
        let mut node = Node::new(
            &name,
            NodeKind::Variable {
                variable: variable.to_string(),
                data_type: data_type.to_string(),
                is_getter,
            },
        );
        node.position = position;
        node.pins
            .push(Pin::new("Value", direction, data_type).with_default(default_value));

        let action = ActionRecord::from_action(AddVariableNodeAction {
            variable: variable.to_string(),
            data_type: data_type.to_string(),
            is_getter,
            default_value: default_value.to_string(),
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_parameter_node(
        &mut self,
        parameter: &str,
        data_type: &str,
        is_input: bool,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, parameter)?;

        // An input parameter feeds the graph, so its node produces a value.
        let direction = if is_input {
            PinDirection::Output
        } else {
            PinDirection::Input
        };
        let mut node = Node::new(
            &name,
            NodeKind::Parameter {
                parameter: parameter.to_string(),
                data_type: data_type.to_string(),
                is_input,
            },
        );
        node.position = position;
        node.pins
            .push(Pin::new("Value", direction, data_type).with_default(default_value));

        let action = ActionRecord::from_action(AddParameterNodeAction {
            parameter: parameter.to_string(),
            data_type: data_type.to_string(),
            is_input,
            default_value: default_value.to_string(),
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_comment_node(
        &mut self,
        text: &str,
        position: Vec2,
        size: Vec2,
        color: Color,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, "Comment")?;

        let mut node = Node::new(
            &name,
            NodeKind::Comment {
                text: text.to_string(),
                font_size: 18,
                bubble_visible: false,
            },
        );
        node.position = position;
        node.size = size;
        node.color = color;

        let action = ActionRecord::from_action(AddCommentNodeAction {
            text: text.to_string(),
            position,
            size,
            color,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_reroute_node(
        &mut self,
        show_as_full_node: bool,
        data_type: &str,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, "Reroute")?;

        let mut node = Node::new(&name, NodeKind::Reroute { show_as_full_node });
        node.position = position;
        node.pins
            .push(Pin::new("Value", PinDirection::InOut, data_type).with_default(default_value));

        let action = ActionRecord::from_action(AddRerouteNodeAction {
            show_as_full_node,
            data_type: data_type.to_string(),
            default_value: default_value.to_string(),
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_branch_node(
        &mut self,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, "Branch")?;

        let mut node = Node::new(&name, NodeKind::Branch);
        node.position = position;
        node.pins.push(Pin::new("Condition", PinDirection::Input, "bool"));
        node.pins.push(Pin::new("True", PinDirection::Output, "exec"));
        node.pins.push(Pin::new("False", PinDirection::Output, "exec"));

        let action = ActionRecord::from_action(AddBranchNodeAction {
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    fn add_select_node(
        &mut self,
        data_type: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let name = self.resolve_new_node_name(name, "Select")?;

        let mut node = Node::new(
            &name,
            NodeKind::Select {
                data_type: data_type.to_string(),
            },
        );
        node.position = position;
        node.pins.push(Pin::new("Index", PinDirection::Input, "i32"));
        node.pins
            .push(Pin::array("Values", PinDirection::Input, data_type));
        node.pins
            .push(Pin::new("Result", PinDirection::Output, data_type));

        let action = ActionRecord::from_action(AddSelectNodeAction {
            data_type: data_type.to_string(),
            position,
            node_path: name.clone(),
        });
        self.insert_node(node, record, action)
    }

    // --- node removal / identity -------------------------------------------

    fn remove_node_by_name(&mut self, name: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let is_subgraph = node.is_subgraph();

        let exported = if is_subgraph {
            Some(self.export_nodes_to_text(&[name.to_string()])?)
        } else {
            None
        };

        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let injected_names: Vec<String> = node
            .pins
            .iter()
            .flat_map(|p| p.injections.iter().map(|i| i.node_name.clone()))
            .collect();
        let action = if record {
            Some(RemoveNodeAction::new(graph, node, exported)?)
        } else {
            None
        };
        // Links to injected companions are not broken through recorded
        // actions: the inverse record rebuilds them along with the nodes.
        let links: Vec<Link> = graph
            .links_touching(name)
            .into_iter()
            .filter(|l| !injected_names.iter().any(|n| l.touches_node(n)))
            .collect();

        if record {
            self.open_undo_bracket(&format!("Remove {name}"));
        }
        let result = (|| -> ControllerResult {
            for link in &links {
                self.break_link(&link.source, &link.target, record)?;
            }
            if let Some(action) = action {
                self.record(record, ActionRecord::from_action(action));
            }
            let graph = self.current_mut()?;
            for injected in &injected_names {
                graph.remove_node(injected);
            }
            graph.remove_node(name);
            graph.links.retain(|l| {
                !l.touches_node(name) && !injected_names.iter().any(|n| l.touches_node(n))
            });
            self.notify(GraphEvent::NodeRemoved {
                node: name.to_string(),
            });
            Ok(())
        })();

        if record {
            if result.is_ok() {
                self.close_undo_bracket();
            } else {
                self.cancel_undo_bracket();
            }
        }
        result
    }

    fn rename_node(&mut self, old: &str, new: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        if !graph.has_node(old) {
            return Err(ControllerError::NodeNotFound(old.to_string()));
        }
        if graph.has_node(new) {
            return Err(ControllerError::NameCollision(new.to_string()));
        }

        self.current_mut()?.rename_node(old, new);
        self.notify(GraphEvent::NodeRenamed {
            old: old.to_string(),
            new: new.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(RenameNodeAction {
                old_name: old.to_string(),
                new_name: new.to_string(),
            }),
        );
        Ok(())
    }

    // --- node state --------------------------------------------------------

    fn set_node_selection(&mut self, names: &[String], record: bool) -> ControllerResult {
        let graph = self.current()?;
        let mut selection: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if graph.has_node(name) {
                if !selection.contains(name) {
                    selection.push(name.clone());
                }
            } else {
                log::warn!("ignoring unknown node '{name}' in selection");
            }
        }
        let old_selection = graph.selection.clone();

        self.current_mut()?.selection = selection.clone();
        self.notify(GraphEvent::SelectionChanged {
            nodes: selection.clone(),
        });
        self.record(
            record,
            ActionRecord::from_action(SetNodeSelectionAction {
                old_selection,
                new_selection: selection,
            }),
        );
        Ok(())
    }

    fn set_node_position_by_name(
        &mut self,
        name: &str,
        position: Vec2,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodePositionAction::new(node, position);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.position = position;
        }
        self.notify(GraphEvent::NodePositionChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_node_size_by_name(&mut self, name: &str, size: Vec2, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodeSizeAction::new(node, size);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.size = size;
        }
        self.notify(GraphEvent::NodeSizeChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_node_color_by_name(
        &mut self,
        name: &str,
        color: Color,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodeColorAction::new(node, color);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.color = color;
        }
        self.notify(GraphEvent::NodeColorChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_node_category_by_name(
        &mut self,
        name: &str,
        category: &str,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodeCategoryAction::new(node, category);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.category = category.to_string();
        }
        self.notify(GraphEvent::NodeCategoryChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_node_keywords_by_name(
        &mut self,
        name: &str,
        keywords: &str,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodeKeywordsAction::new(node, keywords);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.keywords = keywords.to_string();
        }
        self.notify(GraphEvent::NodeKeywordsChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_node_description_by_name(
        &mut self,
        name: &str,
        description: &str,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let action = SetNodeDescriptionAction::new(node, description);

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.description = description.to_string();
        }
        self.notify(GraphEvent::NodeDescriptionChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_comment_text_by_name(
        &mut self,
        name: &str,
        text: &str,
        font_size: u32,
        bubble_visible: bool,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let NodeKind::Comment {
            text: old_text,
            font_size: old_font_size,
            bubble_visible: old_bubble_visible,
        } = &node.kind
        else {
            return Err(ControllerError::KindMismatch {
                node: name.to_string(),
                expected: "comment",
                found: node.kind.tag(),
            });
        };
        let action = SetCommentTextAction {
            node_path: name.to_string(),
            old_text: old_text.clone(),
            new_text: text.to_string(),
            old_font_size: *old_font_size,
            new_font_size: font_size,
            old_bubble_visible: *old_bubble_visible,
            new_bubble_visible: bubble_visible,
        };

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.kind = NodeKind::Comment {
                text: text.to_string(),
                font_size,
                bubble_visible,
            };
        }
        self.notify(GraphEvent::CommentTextChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_reroute_compactness_by_name(
        &mut self,
        name: &str,
        show_as_full_node: bool,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        let NodeKind::Reroute {
            show_as_full_node: old_show,
        } = &node.kind
        else {
            return Err(ControllerError::KindMismatch {
                node: name.to_string(),
                expected: "reroute",
                found: node.kind.tag(),
            });
        };
        let action = SetRerouteCompactnessAction {
            node_path: name.to_string(),
            old_show_as_full_node: *old_show,
            new_show_as_full_node: show_as_full_node,
        };

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(name) {
            node.kind = NodeKind::Reroute { show_as_full_node };
        }
        self.notify(GraphEvent::RerouteCompactnessChanged {
            node: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn rename_variable(&mut self, old: &str, new: &str, record: bool) -> ControllerResult {
        let graph = self.current_mut()?;
        let mut renamed = false;
        for node in &mut graph.nodes {
            if let NodeKind::Variable { variable, .. } = &mut node.kind {
                if variable == old {
                    *variable = new.to_string();
                    renamed = true;
                }
            }
        }
        if !renamed {
            return Err(ControllerError::InvalidOperation(format!(
                "variable '{old}' is not used by any node"
            )));
        }

        self.notify(GraphEvent::VariableRenamed {
            old: old.to_string(),
            new: new.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(RenameVariableAction {
                old_name: old.to_string(),
                new_name: new.to_string(),
            }),
        );
        Ok(())
    }

    fn rename_parameter(&mut self, old: &str, new: &str, record: bool) -> ControllerResult {
        let graph = self.current_mut()?;
        let mut renamed = false;
        for node in &mut graph.nodes {
            if let NodeKind::Parameter { parameter, .. } = &mut node.kind {
                if parameter == old {
                    *parameter = new.to_string();
                    renamed = true;
                }
            }
        }
        if !renamed {
            return Err(ControllerError::InvalidOperation(format!(
                "parameter '{old}' is not used by any node"
            )));
        }

        self.notify(GraphEvent::ParameterRenamed {
            old: old.to_string(),
            new: new.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(RenameParameterAction {
                old_name: old.to_string(),
                new_name: new.to_string(),
            }),
        );
        Ok(())
    }

    // --- pin state ---------------------------------------------------------

    fn set_pin_expansion(
        &mut self,
        pin_path: &str,
        expanded: bool,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let pin = graph
            .find_pin(pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(pin_path.to_string()))?;
        let action = SetPinExpansionAction {
            pin_path: pin_path.to_string(),
            old_expanded: pin.expanded,
            new_expanded: expanded,
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(pin_path) {
            pin.expanded = expanded;
        }
        self.notify(GraphEvent::PinExpansionChanged {
            pin: pin_path.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_pin_watched(&mut self, pin_path: &str, watched: bool, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let pin = graph
            .find_pin(pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(pin_path.to_string()))?;
        let action = SetPinWatchAction {
            pin_path: pin_path.to_string(),
            old_watched: pin.watched,
            new_watched: watched,
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(pin_path) {
            pin.watched = watched;
        }
        self.notify(GraphEvent::PinWatchChanged {
            pin: pin_path.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn set_pin_default_value(
        &mut self,
        pin_path: &str,
        value: &str,
        record: bool,
    ) -> ControllerResult {
        let graph = self.current()?;
        let pin = graph
            .find_pin(pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(pin_path.to_string()))?;
        if pin.direction == PinDirection::Output {
            return Err(ControllerError::InvalidOperation(format!(
                "output pin '{pin_path}' cannot carry a default value"
            )));
        }
        let action = SetPinDefaultValueAction {
            pin_path: pin_path.to_string(),
            old_value: pin.default_value.clone(),
            new_value: value.to_string(),
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(pin_path) {
            pin.default_value = value.to_string();
        }
        self.notify(GraphEvent::PinDefaultValueChanged {
            pin: pin_path.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn insert_array_pin(
        &mut self,
        array_pin_path: &str,
        index: usize,
        default_value: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let graph = self.current()?;
        let pin = graph
            .find_pin(array_pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(array_pin_path.to_string()))?;
        if !pin.is_array {
            return Err(ControllerError::InvalidOperation(format!(
                "pin '{array_pin_path}' is not an array"
            )));
        }
        if index > pin.sub_pins.len() {
            return Err(ControllerError::InvalidOperation(format!(
                "array index {index} out of bounds for '{array_pin_path}'"
            )));
        }
        let (direction, data_type) = (pin.direction, pin.data_type.clone());
        let action = InsertArrayPinAction {
            array_pin_path: array_pin_path.to_string(),
            index,
            new_default_value: default_value.to_string(),
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(array_pin_path) {
            let element =
                Pin::new(index.to_string(), direction, data_type).with_default(default_value);
            pin.sub_pins.insert(index, element);
            pin.renumber_array_elements();
        }
        let element_path = format!("{array_pin_path}.{index}");
        self.notify(GraphEvent::PinArrayChanged {
            pin: array_pin_path.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(element_path)
    }

    fn remove_array_pin(&mut self, element_pin_path: &str, record: bool) -> ControllerResult {
        let (array_pin_path, index_text) = element_pin_path
            .rsplit_once('.')
            .ok_or_else(|| ControllerError::PinNotFound(element_pin_path.to_string()))?;
        let index: usize = index_text.parse().map_err(|_| {
            ControllerError::InvalidOperation(format!(
                "'{element_pin_path}' is not an array element path"
            ))
        })?;

        let graph = self.current()?;
        let pin = graph
            .find_pin(array_pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(array_pin_path.to_string()))?;
        if !pin.is_array {
            return Err(ControllerError::InvalidOperation(format!(
                "pin '{array_pin_path}' is not an array"
            )));
        }
        let element = pin
            .sub_pins
            .get(index)
            .ok_or_else(|| ControllerError::PinNotFound(element_pin_path.to_string()))?;
        let action = RemoveArrayPinAction {
            array_pin_path: array_pin_path.to_string(),
            index,
            default_value: element.default_value.clone(),
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(array_pin_path) {
            pin.sub_pins.remove(index);
            pin.renumber_array_elements();
        }
        self.notify(GraphEvent::PinArrayChanged {
            pin: array_pin_path.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    // --- links -------------------------------------------------------------

    fn add_link(&mut self, source: &str, target: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let source_pin = graph
            .find_pin(source)
            .ok_or_else(|| ControllerError::PinNotFound(source.to_string()))?;
        let target_pin = graph
            .find_pin(target)
            .ok_or_else(|| ControllerError::PinNotFound(target.to_string()))?;

        if !source_pin.direction.can_be_source() {
            return Err(ControllerError::InvalidOperation(format!(
                "pin '{source}' cannot be a link source"
            )));
        }
        if !target_pin.direction.can_be_target() {
            return Err(ControllerError::InvalidOperation(format!(
                "pin '{target}' cannot be a link target"
            )));
        }
        if source_pin.data_type != target_pin.data_type {
            return Err(ControllerError::InvalidOperation(format!(
                "type mismatch: '{source}' is {} but '{target}' is {}",
                source_pin.data_type, target_pin.data_type
            )));
        }
        if graph.links.iter().any(|l| l.target == target) {
            return Err(ControllerError::InvalidOperation(format!(
                "pin '{target}' is already linked"
            )));
        }

        self.current_mut()?.links.push(Link::new(source, target));
        self.notify(GraphEvent::LinkAdded {
            source: source.to_string(),
            target: target.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(AddLinkAction {
                source: source.to_string(),
                target: target.to_string(),
            }),
        );
        Ok(())
    }

    fn break_link(&mut self, source: &str, target: &str, record: bool) -> ControllerResult {
        if !self.current()?.has_link(source, target) {
            return Err(ControllerError::LinkNotFound {
                src: source.to_string(),
                target: target.to_string(),
            });
        }

        self.current_mut()?.remove_link(source, target);
        self.notify(GraphEvent::LinkRemoved {
            source: source.to_string(),
            target: target.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(BreakLinkAction {
                source: source.to_string(),
                target: target.to_string(),
            }),
        );
        Ok(())
    }

    // --- exposed pins ------------------------------------------------------

    fn add_exposed_pin(
        &mut self,
        name: &str,
        direction: PinDirection,
        data_type: &str,
        default_value: &str,
        record: bool,
    ) -> ControllerResult<String> {
        if name.is_empty() {
            return Err(ControllerError::InvalidOperation(
                "exposed pin name may not be empty".into(),
            ));
        }
        let graph = self.current()?;
        if graph.exposed_pin(name).is_some() {
            return Err(ControllerError::NameCollision(name.to_string()));
        }
        let action = AddExposedPinAction {
            name: name.to_string(),
            direction,
            data_type: data_type.to_string(),
            default_value: default_value.to_string(),
        };

        let graph = self.current_mut()?;
        graph.exposed_pins.push(ExposedPin {
            pin: Pin::new(name, direction, data_type).with_default(default_value),
            binding: String::new(),
        });
        self.sync_outer_subgraph_pins()?;
        self.notify(GraphEvent::PinAdded {
            pin: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(name.to_string())
    }

    fn remove_exposed_pin(&mut self, name: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let exposed = graph
            .exposed_pin(name)
            .ok_or_else(|| ControllerError::PinNotFound(name.to_string()))?;
        let action = RemoveExposedPinAction {
            name: name.to_string(),
            direction: exposed.pin.direction,
            data_type: exposed.pin.data_type.clone(),
            default_value: exposed.pin.default_value.clone(),
        };

        let graph = self.current_mut()?;
        graph.exposed_pins.retain(|e| e.pin.name != name);
        self.sync_outer_subgraph_pins()?;
        self.notify(GraphEvent::PinRemoved {
            pin: name.to_string(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(())
    }

    fn rename_exposed_pin(&mut self, old: &str, new: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        if graph.exposed_pin(old).is_none() {
            return Err(ControllerError::PinNotFound(old.to_string()));
        }
        if graph.exposed_pin(new).is_some() {
            return Err(ControllerError::NameCollision(new.to_string()));
        }

        let graph = self.current_mut()?;
        if let Some(exposed) = graph.exposed_pin_mut(old) {
            exposed.pin.name = new.to_string();
        }
        self.sync_outer_subgraph_pins()?;
        self.rewire_outer_links_for_renamed_pin(old, new)?;
        self.notify(GraphEvent::PinRenamed {
            old: old.to_string(),
            new: new.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(RenameExposedPinAction {
                old_name: old.to_string(),
                new_name: new.to_string(),
            }),
        );
        Ok(())
    }

    // --- injected nodes ----------------------------------------------------

    fn inject_node_into_pin(
        &mut self,
        pin_path: &str,
        as_input: bool,
        input_pin: &str,
        output_pin: &str,
        record: bool,
    ) -> ControllerResult<String> {
        let graph = self.current()?;
        if graph.find_pin(pin_path).is_none() {
            return Err(ControllerError::PinNotFound(pin_path.to_string()));
        }
        let link = if as_input {
            graph.links.iter().find(|l| l.target == pin_path)
        } else {
            graph.links.iter().find(|l| l.source == pin_path)
        };
        let link = link.ok_or_else(|| {
            ControllerError::InvalidOperation(format!(
                "no link to inject through on pin '{pin_path}'"
            ))
        })?;
        let node_name = if as_input {
            link.source_node().to_string()
        } else {
            link.target_node().to_string()
        };
        let node = graph
            .node(&node_name)
            .ok_or_else(|| ControllerError::NodeNotFound(node_name.clone()))?;
        if !output_pin.is_empty() && node.find_pin_by_name(output_pin).is_none() {
            return Err(ControllerError::PinNotFound(format!(
                "{node_name}.{output_pin}"
            )));
        }
        if !input_pin.is_empty() && node.find_pin_by_name(input_pin).is_none() {
            return Err(ControllerError::PinNotFound(format!(
                "{node_name}.{input_pin}"
            )));
        }
        let action = InjectNodeIntoPinAction {
            pin_path: pin_path.to_string(),
            as_input,
            input_pin: input_pin.to_string(),
            output_pin: output_pin.to_string(),
            node_path: node_name.clone(),
        };

        let graph = self.current_mut()?;
        if let Some(node) = graph.node_mut(&node_name) {
            node.injected = true;
        }
        if let Some(pin) = graph.find_pin_mut(pin_path) {
            pin.injections.push(Injection {
                node_name: node_name.clone(),
                as_input,
                input_pin: input_pin.to_string(),
                output_pin: output_pin.to_string(),
            });
        }
        self.notify(GraphEvent::NodeInjected {
            pin: pin_path.to_string(),
            node: node_name.clone(),
        });
        self.record(record, ActionRecord::from_action(action));
        Ok(node_name)
    }

    fn eject_node_from_pin(&mut self, pin_path: &str, record: bool) -> ControllerResult<String> {
        let graph = self.current()?;
        let pin = graph
            .find_pin(pin_path)
            .ok_or_else(|| ControllerError::PinNotFound(pin_path.to_string()))?;
        let injection = pin.injections.last().cloned().ok_or_else(|| {
            ControllerError::InvalidOperation(format!("pin '{pin_path}' has no injected node"))
        })?;

        // Recording an ejection reuses the inject action behind an inverse
        // container: undoing the ejection re-injects, redoing ejects again.
        let action = if record {
            let mut inverse = ActionRecord::inverse("Eject node from pin");
            inverse.push_sub_action(ActionRecord::from_action(InjectNodeIntoPinAction {
                pin_path: pin_path.to_string(),
                as_input: injection.as_input,
                input_pin: injection.input_pin.clone(),
                output_pin: injection.output_pin.clone(),
                node_path: injection.node_name.clone(),
            }))?;
            Some(inverse)
        } else {
            None
        };

        let graph = self.current_mut()?;
        if let Some(pin) = graph.find_pin_mut(pin_path) {
            pin.injections.pop();
        }
        if let Some(node) = graph.node_mut(&injection.node_name) {
            node.injected = false;
        }
        self.notify(GraphEvent::NodeEjected {
            pin: pin_path.to_string(),
            node: injection.node_name.clone(),
        });
        if let Some(action) = action {
            self.record(record, action);
        }
        Ok(injection.node_name)
    }

    // --- text round-trip ----------------------------------------------------

    fn export_nodes_to_text(&self, names: &[String]) -> ControllerResult<String> {
        let all = self.names_with_injected(names)?;
        let graph = self.current()?;
        let clipboard = graph
            .clipboard(&all)
            .ok_or_else(|| ControllerError::InvalidOperation("nothing to export".into()))?;
        ron::ser::to_string_pretty(&clipboard, ron::ser::PrettyConfig::default())
            .map_err(|e| ControllerError::Serialization(e.to_string()))
    }

    fn import_nodes_from_text(
        &mut self,
        text: &str,
        record: bool,
    ) -> ControllerResult<Vec<String>> {
        let clipboard: NodeClipboard =
            ron::from_str(text).map_err(|e| ControllerError::Serialization(e.to_string()))?;
        if clipboard.nodes.is_empty() {
            return Err(ControllerError::InvalidOperation(
                "clipboard holds no nodes".into(),
            ));
        }

        let graph = self.current_mut()?;
        let (imported, _) = insert_clipboard(graph, clipboard);

        if record {
            let bracket = imported.len() > 1;
            if bracket {
                self.open_undo_bracket("Import nodes");
            }
            for name in &imported {
                let exported = self.export_nodes_to_text(std::slice::from_ref(name))?;
                let position = self
                    .current()?
                    .node(name)
                    .map(|n| n.position)
                    .unwrap_or_else(Vec2::zeros);
                self.record(
                    true,
                    ActionRecord::from_action(ImportNodeFromTextAction {
                        node_path: name.clone(),
                        position,
                        exported_text: exported,
                    }),
                );
            }
            if bracket {
                self.close_undo_bracket();
            }
        }

        self.notify(GraphEvent::NodesImported {
            nodes: imported.clone(),
        });
        Ok(imported)
    }

    // --- structure ----------------------------------------------------------

    fn collapse_nodes(
        &mut self,
        names: &[String],
        collapsed_name: &str,
        record: bool,
    ) -> ControllerResult<String> {
        if names.is_empty() {
            return Err(ControllerError::InvalidOperation(
                "no nodes to collapse".into(),
            ));
        }
        let full_set = self.names_with_injected(names)?;
        let graph = self.current()?;
        let final_name = if collapsed_name.is_empty() {
            graph.unique_node_name("Collapsed")
        } else {
            if graph
                .nodes
                .iter()
                .any(|n| n.name == collapsed_name && !full_set.contains(&n.name))
            {
                return Err(ControllerError::NameCollision(collapsed_name.to_string()));
            }
            collapsed_name.to_string()
        };

        let action = if record {
            let content = self.export_nodes_to_text(names)?;
            let graph = self.current()?;
            let boundary_links = graph
                .links
                .iter()
                .filter(|l| {
                    full_set.iter().any(|n| n == l.source_node())
                        != full_set.iter().any(|n| n == l.target_node())
                })
                .map(Link::path_representation)
                .collect();
            Some(CollapseNodesAction {
                collapsed_node_path: final_name.clone(),
                collapsed_node_paths: names.to_vec(),
                collapsed_content: content,
                boundary_links,
            })
        } else {
            None
        };

        let graph = self.current_mut()?;
        let mut inner = Graph::new(&final_name);
        let mut positions = Vec::new();
        for name in &full_set {
            if let Some(node) = graph.remove_node(name) {
                positions.push(node.position);
                inner.nodes.push(node);
            }
        }

        let mut boundary = Vec::new();
        let mut remaining = Vec::new();
        for link in graph.links.drain(..) {
            let source_inside = full_set.iter().any(|n| n == link.source_node());
            let target_inside = full_set.iter().any(|n| n == link.target_node());
            match (source_inside, target_inside) {
                (true, true) => inner.links.push(link),
                (false, false) => remaining.push(link),
                _ => boundary.push((link, source_inside)),
            }
        }
        graph.links = remaining;

        let mut outer_links = Vec::new();
        for (link, source_inside) in boundary {
            let (binding, direction) = if source_inside {
                (link.source.clone(), PinDirection::Output)
            } else {
                (link.target.clone(), PinDirection::Input)
            };
            let pin_name = match inner
                .exposed_pins
                .iter()
                .find(|e| e.binding == binding && e.pin.direction == direction)
            {
                Some(existing) => existing.pin.name.clone(),
                None => {
                    let data_type = inner
                        .find_pin(&binding)
                        .map(|p| p.data_type.clone())
                        .unwrap_or_default();
                    let pin_name = exposed_pin_name(&binding, &inner.exposed_pins);
                    inner.exposed_pins.push(ExposedPin {
                        pin: Pin::new(&pin_name, direction, data_type),
                        binding: binding.clone(),
                    });
                    pin_name
                }
            };
            if source_inside {
                outer_links.push(Link::new(format!("{final_name}.{pin_name}"), link.target));
            } else {
                outer_links.push(Link::new(link.source, format!("{final_name}.{pin_name}")));
            }
        }

        let mirror: Vec<Pin> = inner.exposed_pins.iter().map(|e| e.pin.clone()).collect();
        let mut subgraph_node = Node::new(
            &final_name,
            NodeKind::Subgraph {
                graph: Box::new(inner),
            },
        );
        subgraph_node.pins = mirror;
        if !positions.is_empty() {
            let sum = positions.iter().fold(Vec2::zeros(), |acc, p| acc + p);
            subgraph_node.position = sum / positions.len() as f32;
        }
        graph.add_node(subgraph_node);
        graph.links.extend(outer_links);

        self.notify(GraphEvent::NodesCollapsed {
            node: final_name.clone(),
        });
        if let Some(action) = action {
            self.record(record, ActionRecord::from_action(action));
        }
        Ok(final_name)
    }

    fn expand_node(&mut self, name: &str, record: bool) -> ControllerResult<Vec<String>> {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        if !node.is_subgraph() {
            return Err(ControllerError::KindMismatch {
                node: name.to_string(),
                expected: "subgraph",
                found: node.kind.tag(),
            });
        }

        let mut action = if record {
            let content = self.export_nodes_to_text(&[name.to_string()])?;
            let links = self
                .current()?
                .links_touching(name)
                .iter()
                .map(Link::path_representation)
                .collect();
            Some(ExpandNodeAction {
                subgraph_node_path: name.to_string(),
                subgraph_content: content,
                subgraph_links: links,
                expanded_node_paths: Vec::new(),
            })
        } else {
            None
        };

        let graph = self.current_mut()?;
        let outer_links = graph.links_touching(name);
        graph.links.retain(|l| !l.touches_node(name));
        let Some(node) = graph.remove_node(name) else {
            return Err(ControllerError::NodeNotFound(name.to_string()));
        };
        let NodeKind::Subgraph { graph: inner } = node.kind else {
            return Err(ControllerError::KindMismatch {
                node: name.to_string(),
                expected: "subgraph",
                found: "node",
            });
        };
        let inner = *inner;
        let exposed = inner.exposed_pins.clone();

        let (expanded, renames) = insert_clipboard(
            graph,
            NodeClipboard {
                nodes: inner.nodes,
                links: inner.links,
            },
        );

        // Reattach outer links through the exposed-pin bindings, following
        // any renames the insertion had to apply.
        for link in outer_links {
            let (own_path, far_side_source) = if link.source_node() == name {
                (link.source.clone(), false)
            } else {
                (link.target.clone(), true)
            };
            let Some((_, pin_name)) = own_path.split_once('.') else {
                continue;
            };
            let Some(entry) = exposed.iter().find(|e| e.pin.name == pin_name) else {
                log::warn!("no exposed pin '{pin_name}' behind expanded node '{name}'");
                continue;
            };
            let inner_path = remap_pin_path(&entry.binding, &renames);
            let rewired = if far_side_source {
                Link::new(link.source, inner_path)
            } else {
                Link::new(inner_path, link.target)
            };
            if graph.find_pin(&rewired.source).is_some() && graph.find_pin(&rewired.target).is_some()
            {
                graph.links.push(rewired);
            } else {
                log::warn!(
                    "dropping unreattachable link '{}'",
                    rewired.path_representation()
                );
            }
        }

        if let Some(action) = &mut action {
            action.expanded_node_paths = expanded.clone();
        }
        self.notify(GraphEvent::NodeExpanded {
            nodes: expanded.clone(),
        });
        if let Some(action) = action {
            self.record(record, ActionRecord::from_action(action));
        }
        Ok(expanded)
    }

    fn push_graph(&mut self, name: &str, record: bool) -> ControllerResult {
        let graph = self.current()?;
        let node = graph
            .node(name)
            .ok_or_else(|| ControllerError::NodeNotFound(name.to_string()))?;
        if !node.is_subgraph() {
            return Err(ControllerError::KindMismatch {
                node: name.to_string(),
                expected: "subgraph",
                found: node.kind.tag(),
            });
        }

        self.graph_stack.push(name.to_string());
        self.notify(GraphEvent::GraphPushed {
            graph: name.to_string(),
        });
        self.record(
            record,
            ActionRecord::from_action(PushGraphAction {
                graph_node_path: name.to_string(),
            }),
        );
        Ok(())
    }

    fn pop_graph(&mut self, record: bool) -> ControllerResult<String> {
        let Some(name) = self.graph_stack.pop() else {
            return Err(ControllerError::InvalidOperation(
                "no graph has been pushed".into(),
            ));
        };
        self.notify(GraphEvent::GraphPopped {
            graph: name.clone(),
        });
        self.record(
            record,
            ActionRecord::from_action(PopGraphAction {
                graph_node_path: name.clone(),
            }),
        );
        Ok(name)
    }
}

impl GraphEditor {
    /// Mirrors the edited graph's exposed pins onto the subgraph node that
    /// backs it, when one is on the graph stack.
    fn sync_outer_subgraph_pins(&mut self) -> ControllerResult {
        let Some(node_name) = self.graph_stack.last().cloned() else {
            return Ok(());
        };
        let mirror: Vec<Pin> = self
            .current()?
            .exposed_pins
            .iter()
            .map(|e| e.pin.clone())
            .collect();
        let parent = self.graph_at_mut(self.graph_stack.len() - 1)?;
        if let Some(node) = parent.node_mut(&node_name) {
            node.pins = mirror;
        }
        Ok(())
    }

    /// Rewrites parent-graph links that referenced a renamed exposed pin.
    fn rewire_outer_links_for_renamed_pin(&mut self, old: &str, new: &str) -> ControllerResult {
        let Some(node_name) = self.graph_stack.last().cloned() else {
            return Ok(());
        };
        let old_path = format!("{node_name}.{old}");
        let new_path = format!("{node_name}.{new}");
        let parent = self.graph_at_mut(self.graph_stack.len() - 1)?;
        for link in &mut parent.links {
            if link.source == old_path {
                link.source = new_path.clone();
            }
            if link.target == old_path {
                link.target = new_path.clone();
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GraphEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphEditor")
            .field("nodes", &self.root.nodes.len())
            .field("links", &self.root.links.len())
            .field("graph_stack", &self.graph_stack)
            .field("undo_len", &self.stack.undo_len())
            .field("redo_len", &self.stack.redo_len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
