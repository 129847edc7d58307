//! The controller capability interface and its reference implementation.
//!
//! [`GraphController`] is the narrow seam between the history engine and
//! the graph model: one method per supported mutation kind, each addressed
//! purely by stable identity (node names, pin paths) and each taking a
//! `record` flag. Interactive edits pass `record = true` so the mutation is
//! captured in the undo history; history replay always passes `false`,
//! which is what keeps undoing from recording itself.
//!
//! [`GraphEditor`] is the reference implementation: an in-memory graph (plus
//! a stack of pushed subgraphs) wired to one [`ActionStack`] per editing
//! session.
//!
//! [`ActionStack`]: crate::history::ActionStack

mod editor;
mod error;
mod events;
mod registry;

#[cfg(test)]
mod tests;

pub use editor::GraphEditor;
pub use error::{ControllerError, ControllerResult};
pub use events::GraphEvent;
pub use registry::{OperatorRegistry, OperatorSpec};

use crate::math::{Color, Vec2};
use crate::graph::PinDirection;

/// Capability interface through which history records mutate the graph.
///
/// All methods are synchronous and run to completion before returning;
/// graph mutation is not reentrant. Methods that create something return
/// the identity actually used (names may be uniquified on collision with
/// an empty request), so that action records can address the result when
/// they replay.
pub trait GraphController {
    /// Broadcasts a graph-modified notification to observers.
    fn notify(&mut self, event: GraphEvent);

    /// Reports a non-fatal warning (e.g. "nothing to undo").
    fn report_warning(&mut self, message: &str) {
        log::warn!("{message}");
    }

    /// Reports a recoverable error (e.g. a failed undo step).
    fn report_error(&mut self, message: &str) {
        log::error!("{message}");
    }

    // --- node creation -----------------------------------------------------

    /// Adds an operator node of the registered type `op_type`. Pass an empty
    /// `name` to derive one from the type.
    fn add_operator_node(
        &mut self,
        op_type: &str,
        method: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn add_variable_node(
        &mut self,
        variable: &str,
        data_type: &str,
        is_getter: bool,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn add_parameter_node(
        &mut self,
        parameter: &str,
        data_type: &str,
        is_input: bool,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn add_comment_node(
        &mut self,
        text: &str,
        position: Vec2,
        size: Vec2,
        color: Color,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn add_reroute_node(
        &mut self,
        show_as_full_node: bool,
        data_type: &str,
        default_value: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn add_branch_node(&mut self, position: Vec2, name: &str, record: bool)
        -> ControllerResult<String>;

    fn add_select_node(
        &mut self,
        data_type: &str,
        position: Vec2,
        name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    // --- node removal / identity -------------------------------------------

    /// Removes a node (and any nodes injected into its pins). Links touching
    /// the node are broken first.
    fn remove_node_by_name(&mut self, name: &str, record: bool) -> ControllerResult;

    fn rename_node(&mut self, old: &str, new: &str, record: bool) -> ControllerResult;

    // --- node state --------------------------------------------------------

    fn set_node_selection(&mut self, names: &[String], record: bool) -> ControllerResult;

    fn set_node_position_by_name(
        &mut self,
        name: &str,
        position: Vec2,
        record: bool,
    ) -> ControllerResult;

    fn set_node_size_by_name(&mut self, name: &str, size: Vec2, record: bool) -> ControllerResult;

    fn set_node_color_by_name(&mut self, name: &str, color: Color, record: bool)
        -> ControllerResult;

    fn set_node_category_by_name(
        &mut self,
        name: &str,
        category: &str,
        record: bool,
    ) -> ControllerResult;

    fn set_node_keywords_by_name(
        &mut self,
        name: &str,
        keywords: &str,
        record: bool,
    ) -> ControllerResult;

    fn set_node_description_by_name(
        &mut self,
        name: &str,
        description: &str,
        record: bool,
    ) -> ControllerResult;

    fn set_comment_text_by_name(
        &mut self,
        name: &str,
        text: &str,
        font_size: u32,
        bubble_visible: bool,
        record: bool,
    ) -> ControllerResult;

    fn set_reroute_compactness_by_name(
        &mut self,
        name: &str,
        show_as_full_node: bool,
        record: bool,
    ) -> ControllerResult;

    /// Renames a graph variable, rewriting every variable node that uses it.
    fn rename_variable(&mut self, old: &str, new: &str, record: bool) -> ControllerResult;

    /// Renames a graph parameter, rewriting every parameter node that uses it.
    fn rename_parameter(&mut self, old: &str, new: &str, record: bool) -> ControllerResult;

    // --- pin state ---------------------------------------------------------

    fn set_pin_expansion(&mut self, pin_path: &str, expanded: bool, record: bool)
        -> ControllerResult;

    fn set_pin_watched(&mut self, pin_path: &str, watched: bool, record: bool)
        -> ControllerResult;

    fn set_pin_default_value(
        &mut self,
        pin_path: &str,
        value: &str,
        record: bool,
    ) -> ControllerResult;

    /// Inserts an element into an array pin, returning the new element's
    /// pin path (`"Node.Array.<index>"`).
    fn insert_array_pin(
        &mut self,
        array_pin_path: &str,
        index: usize,
        default_value: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn remove_array_pin(&mut self, element_pin_path: &str, record: bool) -> ControllerResult;

    // --- links -------------------------------------------------------------

    fn add_link(&mut self, source: &str, target: &str, record: bool) -> ControllerResult;

    fn break_link(&mut self, source: &str, target: &str, record: bool) -> ControllerResult;

    // --- exposed pins (boundary of the graph being edited) ------------------

    fn add_exposed_pin(
        &mut self,
        name: &str,
        direction: PinDirection,
        data_type: &str,
        default_value: &str,
        record: bool,
    ) -> ControllerResult<String>;

    fn remove_exposed_pin(&mut self, name: &str, record: bool) -> ControllerResult;

    fn rename_exposed_pin(&mut self, old: &str, new: &str, record: bool) -> ControllerResult;

    // --- injected nodes ----------------------------------------------------

    /// Turns the node currently linked to `pin_path` into an inline
    /// (injected) node on that pin. Returns the injected node's name.
    fn inject_node_into_pin(
        &mut self,
        pin_path: &str,
        as_input: bool,
        input_pin: &str,
        output_pin: &str,
        record: bool,
    ) -> ControllerResult<String>;

    /// Ejects the most recently injected node from `pin_path`, returning its
    /// name.
    fn eject_node_from_pin(&mut self, pin_path: &str, record: bool) -> ControllerResult<String>;

    // --- text round-trip ----------------------------------------------------

    /// Exports the named nodes (plus the links among them) as text.
    fn export_nodes_to_text(&self, names: &[String]) -> ControllerResult<String>;

    /// Imports nodes previously exported with
    /// [`export_nodes_to_text`](Self::export_nodes_to_text). Colliding names
    /// are uniquified; the names actually used are returned in order.
    fn import_nodes_from_text(&mut self, text: &str, record: bool) -> ControllerResult<Vec<String>>;

    // --- structure ----------------------------------------------------------

    /// Collapses the named nodes into a single subgraph node called
    /// `collapsed_name`, rewiring boundary-crossing links through exposed
    /// pins. Returns the subgraph node's name.
    fn collapse_nodes(
        &mut self,
        names: &[String],
        collapsed_name: &str,
        record: bool,
    ) -> ControllerResult<String>;

    /// Expands a subgraph node back into its contents, returning the names
    /// of the nodes that came out.
    fn expand_node(&mut self, name: &str, record: bool) -> ControllerResult<Vec<String>>;

    /// Starts editing the subgraph behind the named subgraph node. The
    /// reference is resolved by name at call time and fails if the node is
    /// not resident.
    fn push_graph(&mut self, name: &str, record: bool) -> ControllerResult;

    /// Stops editing the innermost pushed subgraph, returning its node name.
    fn pop_graph(&mut self, record: bool) -> ControllerResult<String>;
}
