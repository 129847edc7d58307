//! Actions covering node creation, removal, and per-node state.

use serde::{Deserialize, Serialize};

use crate::controller::GraphController;
use crate::graph::{Graph, Node, NodeKind, PinDirection};
use crate::history::codec::{encode, ActionKey, CodecError};
use crate::history::record::{ActionRecord, ActionResult, GraphAction};
use crate::math::{Color, Vec2};

use super::pin::{SetPinDefaultValueAction, SetPinExpansionAction};
use super::subgraph::ImportNodeFromTextAction;
use super::AddLinkAction;

/// Adds an operator node resolved from the operator registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOperatorNodeAction {
    pub op_type: String,
    pub method: String,
    pub position: Vec2,
    pub node_path: String,
}

impl AddOperatorNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Operator { op_type, method } => Some(Self {
                op_type: op_type.clone(),
                method: method.clone(),
                position: node.position,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddOperatorNodeAction {
    fn title(&self) -> String {
        "Add operator node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_operator_node(&self.op_type, &self.method, self.position, &self.node_path, false)
            .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a variable getter/setter node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddVariableNodeAction {
    pub variable: String,
    pub data_type: String,
    pub is_getter: bool,
    pub default_value: String,
    pub position: Vec2,
    pub node_path: String,
}

impl AddVariableNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Variable {
                variable,
                data_type,
                is_getter,
            } => Some(Self {
                variable: variable.clone(),
                data_type: data_type.clone(),
                is_getter: *is_getter,
                default_value: node
                    .find_pin_by_name("Value")
                    .map(|p| p.default_value.clone())
                    .unwrap_or_default(),
                position: node.position,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddVariableNodeAction {
    fn title(&self) -> String {
        "Add variable node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_variable_node(
            &self.variable,
            &self.data_type,
            self.is_getter,
            &self.default_value,
            self.position,
            &self.node_path,
            false,
        )
        .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a parameter node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddParameterNodeAction {
    pub parameter: String,
    pub data_type: String,
    pub is_input: bool,
    pub default_value: String,
    pub position: Vec2,
    pub node_path: String,
}

impl AddParameterNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Parameter {
                parameter,
                data_type,
                is_input,
            } => Some(Self {
                parameter: parameter.clone(),
                data_type: data_type.clone(),
                is_input: *is_input,
                default_value: node
                    .find_pin_by_name("Value")
                    .map(|p| p.default_value.clone())
                    .unwrap_or_default(),
                position: node.position,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddParameterNodeAction {
    fn title(&self) -> String {
        "Add parameter node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_parameter_node(
            &self.parameter,
            &self.data_type,
            self.is_input,
            &self.default_value,
            self.position,
            &self.node_path,
            false,
        )
        .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a comment box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCommentNodeAction {
    pub text: String,
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub node_path: String,
}

impl AddCommentNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Comment { text, .. } => Some(Self {
                text: text.clone(),
                position: node.position,
                size: node.size,
                color: node.color,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddCommentNodeAction {
    fn title(&self) -> String {
        "Add comment node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_comment_node(
            &self.text,
            self.position,
            self.size,
            self.color,
            &self.node_path,
            false,
        )
        .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a reroute (pass-through) node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRerouteNodeAction {
    pub show_as_full_node: bool,
    pub data_type: String,
    pub default_value: String,
    pub position: Vec2,
    pub node_path: String,
}

impl AddRerouteNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Reroute { show_as_full_node } => {
                let value = node.find_pin_by_name("Value")?;
                Some(Self {
                    show_as_full_node: *show_as_full_node,
                    data_type: value.data_type.clone(),
                    default_value: value.default_value.clone(),
                    position: node.position,
                    node_path: node.name.clone(),
                })
            }
            _ => None,
        }
    }
}

impl GraphAction for AddRerouteNodeAction {
    fn title(&self) -> String {
        "Add reroute node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_reroute_node(
            self.show_as_full_node,
            &self.data_type,
            &self.default_value,
            self.position,
            &self.node_path,
            false,
        )
        .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a branch node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBranchNodeAction {
    pub position: Vec2,
    pub node_path: String,
}

impl AddBranchNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Branch => Some(Self {
                position: node.position,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddBranchNodeAction {
    fn title(&self) -> String {
        "Add branch node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_branch_node(self.position, &self.node_path, false).map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Adds a select node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSelectNodeAction {
    pub data_type: String,
    pub position: Vec2,
    pub node_path: String,
}

impl AddSelectNodeAction {
    pub fn from_node(node: &Node) -> Option<Self> {
        match &node.kind {
            NodeKind::Select { data_type } => Some(Self {
                data_type: data_type.clone(),
                position: node.position,
                node_path: node.name.clone(),
            }),
            _ => None,
        }
    }
}

impl GraphAction for AddSelectNodeAction {
    fn title(&self) -> String {
        "Add select node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_select_node(&self.data_type, self.position, &self.node_path, false)
            .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_node_by_name(&self.node_path, false)
    }
}

/// Turns the node linked to a pin into an inline (injected) node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectNodeIntoPinAction {
    pub pin_path: String,
    pub as_input: bool,
    pub input_pin: String,
    pub output_pin: String,
    pub node_path: String,
}

impl GraphAction for InjectNodeIntoPinAction {
    fn title(&self) -> String {
        "Inject node into pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.inject_node_into_pin(
            &self.pin_path,
            self.as_input,
            &self.input_pin,
            &self.output_pin,
            false,
        )
        .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.eject_node_from_pin(&self.pin_path, false).map(|_| ())
    }
}

/// Removes a node of any kind.
///
/// At construction time, while the node still exists, this synthesizes an
/// inverse record whose sub-actions would recreate the node: the matching
/// `Add*` action for its concrete kind, a default-value restore per
/// input/visible pin, an expansion restore per expanded pin, and the
/// (add, link, inject) triple per injected node. Undoing the removal replays
/// the inverse forward; redoing replays it backward. One remove type thereby
/// serves every node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveNodeAction {
    pub node_path: String,
    pub inverse: ActionKey,
}

impl RemoveNodeAction {
    /// Captures the inverse of removing `node`. For subgraph nodes the
    /// caller exports the node first and passes the text in
    /// `exported_subgraph`.
    pub fn new(
        graph: &Graph,
        node: &Node,
        exported_subgraph: Option<String>,
    ) -> Result<Self, CodecError> {
        let mut inverse = ActionRecord::inverse(format!("Recreate {}", node.name));

        match &node.kind {
            NodeKind::Operator { .. } => {
                if let Some(add) = AddOperatorNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
                push_pin_default_restores(&mut inverse, node)?;
            }
            NodeKind::Variable { .. } => {
                if let Some(add) = AddVariableNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
                push_pin_default_restores(&mut inverse, node)?;
            }
            NodeKind::Parameter { .. } => {
                if let Some(add) = AddParameterNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
                push_pin_default_restores(&mut inverse, node)?;
            }
            NodeKind::Comment { .. } => {
                if let Some(add) = AddCommentNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
            }
            NodeKind::Reroute { .. } => {
                if let Some(add) = AddRerouteNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
            }
            NodeKind::Branch => {
                if let Some(add) = AddBranchNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
            }
            NodeKind::Select { .. } => {
                if let Some(add) = AddSelectNodeAction::from_node(node) {
                    inverse.push_sub_action(ActionRecord::from_action(add))?;
                }
            }
            NodeKind::Subgraph { .. } => {
                inverse.push_sub_action(ActionRecord::from_action(ImportNodeFromTextAction {
                    node_path: node.name.clone(),
                    position: node.position,
                    exported_text: exported_subgraph.unwrap_or_default(),
                }))?;
            }
        }

        for pin in &node.pins {
            let pin_path = format!("{}.{}", node.name, pin.name);

            if pin.expanded && !pin.sub_pins.is_empty() {
                inverse.push_sub_action(ActionRecord::from_action(SetPinExpansionAction {
                    pin_path: pin_path.clone(),
                    old_expanded: false,
                    new_expanded: true,
                }))?;
            }

            for injection in &pin.injections {
                let Some(injected) = graph.node(&injection.node_name) else {
                    continue;
                };
                let Some(add) = AddVariableNodeAction::from_node(injected) else {
                    continue;
                };
                inverse.push_sub_action(ActionRecord::from_action(add))?;
                inverse.push_sub_action(ActionRecord::from_action(AddLinkAction {
                    source: format!("{}.{}", injected.name, injection.output_pin),
                    target: pin_path.clone(),
                }))?;
                inverse.push_sub_action(ActionRecord::from_action(InjectNodeIntoPinAction {
                    pin_path: pin_path.clone(),
                    as_input: injection.as_input,
                    input_pin: injection.input_pin.clone(),
                    output_pin: injection.output_pin.clone(),
                    node_path: injected.name.clone(),
                }))?;
            }
        }

        Ok(Self {
            node_path: node.name.clone(),
            inverse: encode(&inverse)?,
        })
    }
}

fn push_pin_default_restores(inverse: &mut ActionRecord, node: &Node) -> Result<(), CodecError> {
    for pin in &node.pins {
        if matches!(pin.direction, PinDirection::Input | PinDirection::Visible) {
            inverse.push_sub_action(ActionRecord::from_action(SetPinDefaultValueAction {
                pin_path: format!("{}.{}", node.name, pin.name),
                old_value: pin.default_value.clone(),
                new_value: pin.default_value.clone(),
            }))?;
        }
    }
    Ok(())
}

impl GraphAction for RemoveNodeAction {
    fn title(&self) -> String {
        "Remove node".into()
    }

    // Forward = tear the node down by replaying the recreation sequence
    // backwards; reverse = replay it forwards. The double negative lets the
    // inverse record hold everything kind-specific.
    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        crate::history::codec::decode(&self.inverse)?.redo(ctl)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        crate::history::codec::decode(&self.inverse)?.undo(ctl)
    }
}

/// Replaces the node selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeSelectionAction {
    pub old_selection: Vec<String>,
    pub new_selection: Vec<String>,
}

impl GraphAction for SetNodeSelectionAction {
    fn title(&self) -> String {
        "Set node selection".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_selection(&self.new_selection, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_selection(&self.old_selection, false)
    }
}

/// Moves a node. Consecutive moves of the same node merge into one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodePositionAction {
    pub node_path: String,
    pub old_position: Vec2,
    pub new_position: Vec2,
}

impl SetNodePositionAction {
    pub fn new(node: &Node, new_position: Vec2) -> Self {
        Self {
            node_path: node.name.clone(),
            old_position: node.position,
            new_position,
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_position = other.new_position;
        true
    }
}

impl GraphAction for SetNodePositionAction {
    fn title(&self) -> String {
        "Set node position".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_position_by_name(&self.node_path, self.new_position, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_position_by_name(&self.node_path, self.old_position, false)
    }
}

/// Resizes a node. Merges like [`SetNodePositionAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeSizeAction {
    pub node_path: String,
    pub old_size: Vec2,
    pub new_size: Vec2,
}

impl SetNodeSizeAction {
    pub fn new(node: &Node, new_size: Vec2) -> Self {
        Self {
            node_path: node.name.clone(),
            old_size: node.size,
            new_size,
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_size = other.new_size;
        true
    }
}

impl GraphAction for SetNodeSizeAction {
    fn title(&self) -> String {
        "Set node size".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_size_by_name(&self.node_path, self.new_size, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_size_by_name(&self.node_path, self.old_size, false)
    }
}

/// Recolors a node. Merges like [`SetNodePositionAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeColorAction {
    pub node_path: String,
    pub old_color: Color,
    pub new_color: Color,
}

impl SetNodeColorAction {
    pub fn new(node: &Node, new_color: Color) -> Self {
        Self {
            node_path: node.name.clone(),
            old_color: node.color,
            new_color,
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_color = other.new_color;
        true
    }
}

impl GraphAction for SetNodeColorAction {
    fn title(&self) -> String {
        "Set node color".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_color_by_name(&self.node_path, self.new_color, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_color_by_name(&self.node_path, self.old_color, false)
    }
}

/// Changes a node's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeCategoryAction {
    pub node_path: String,
    pub old_category: String,
    pub new_category: String,
}

impl SetNodeCategoryAction {
    pub fn new(node: &Node, new_category: &str) -> Self {
        Self {
            node_path: node.name.clone(),
            old_category: node.category.clone(),
            new_category: new_category.to_string(),
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_category = other.new_category.clone();
        true
    }
}

impl GraphAction for SetNodeCategoryAction {
    fn title(&self) -> String {
        "Set node category".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_category_by_name(&self.node_path, &self.new_category, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_category_by_name(&self.node_path, &self.old_category, false)
    }
}

/// Changes a node's keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeKeywordsAction {
    pub node_path: String,
    pub old_keywords: String,
    pub new_keywords: String,
}

impl SetNodeKeywordsAction {
    pub fn new(node: &Node, new_keywords: &str) -> Self {
        Self {
            node_path: node.name.clone(),
            old_keywords: node.keywords.clone(),
            new_keywords: new_keywords.to_string(),
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_keywords = other.new_keywords.clone();
        true
    }
}

impl GraphAction for SetNodeKeywordsAction {
    fn title(&self) -> String {
        "Set node keywords".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_keywords_by_name(&self.node_path, &self.new_keywords, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_keywords_by_name(&self.node_path, &self.old_keywords, false)
    }
}

/// Changes a node's description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNodeDescriptionAction {
    pub node_path: String,
    pub old_description: String,
    pub new_description: String,
}

impl SetNodeDescriptionAction {
    pub fn new(node: &Node, new_description: &str) -> Self {
        Self {
            node_path: node.name.clone(),
            old_description: node.description.clone(),
            new_description: new_description.to_string(),
        }
    }

    pub fn merge(&mut self, other: &Self) -> bool {
        if self.node_path != other.node_path {
            return false;
        }
        self.new_description = other.new_description.clone();
        true
    }
}

impl GraphAction for SetNodeDescriptionAction {
    fn title(&self) -> String {
        "Set node description".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_description_by_name(&self.node_path, &self.new_description, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_node_description_by_name(&self.node_path, &self.old_description, false)
    }
}

/// Edits a comment node's text and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCommentTextAction {
    pub node_path: String,
    pub old_text: String,
    pub new_text: String,
    pub old_font_size: u32,
    pub new_font_size: u32,
    pub old_bubble_visible: bool,
    pub new_bubble_visible: bool,
}

impl GraphAction for SetCommentTextAction {
    fn title(&self) -> String {
        "Set comment text".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_comment_text_by_name(
            &self.node_path,
            &self.new_text,
            self.new_font_size,
            self.new_bubble_visible,
            false,
        )
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_comment_text_by_name(
            &self.node_path,
            &self.old_text,
            self.old_font_size,
            self.old_bubble_visible,
            false,
        )
    }
}

/// Toggles a reroute node between compact and full display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRerouteCompactnessAction {
    pub node_path: String,
    pub old_show_as_full_node: bool,
    pub new_show_as_full_node: bool,
}

impl GraphAction for SetRerouteCompactnessAction {
    fn title(&self) -> String {
        "Set reroute compactness".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_reroute_compactness_by_name(&self.node_path, self.new_show_as_full_node, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_reroute_compactness_by_name(&self.node_path, self.old_show_as_full_node, false)
    }
}

/// Renames a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameNodeAction {
    pub old_name: String,
    pub new_name: String,
}

impl GraphAction for RenameNodeAction {
    fn title(&self) -> String {
        "Rename node".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_node(&self.old_name, &self.new_name, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_node(&self.new_name, &self.old_name, false)
    }
}

/// Renames a graph variable across every node using it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameVariableAction {
    pub old_name: String,
    pub new_name: String,
}

impl GraphAction for RenameVariableAction {
    fn title(&self) -> String {
        "Rename variable".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_variable(&self.old_name, &self.new_name, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_variable(&self.new_name, &self.old_name, false)
    }
}

/// Renames a graph parameter across every node using it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameParameterAction {
    pub old_name: String,
    pub new_name: String,
}

impl GraphAction for RenameParameterAction {
    fn title(&self) -> String {
        "Rename parameter".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_parameter(&self.old_name, &self.new_name, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_parameter(&self.new_name, &self.old_name, false)
    }
}
