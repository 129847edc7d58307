//! Action records: the invertible units of history.
//!
//! A record pairs a closed, serializable union of concrete action kinds
//! ([`ActionData`]) with an ordered list of sub-actions applied atomically
//! as part of it. Undo applies sub-actions in reverse order; redo applies
//! them forward. Two special kinds carry no change of their own:
//! `Compound` (the bracket container) and `Inverse`, whose sub-action
//! replay directions are deliberately swapped — the mechanism behind
//! "undo a removal by running the recreation sequence forward".

use serde::{Deserialize, Serialize};

use crate::controller::{ControllerResult, GraphController};

use super::actions::*;
use super::codec::{decode, encode, ActionKey, CodecError};

/// Result type for action replay.
pub type ActionResult<T = ()> = ControllerResult<T>;

/// A single invertible mutation, implemented by every catalog type.
///
/// `apply` performs the action's own forward change and `undo` reverses it;
/// sub-action ordering is handled by [`ActionRecord`], not here. Both
/// directions address the target purely through the controller, by stable
/// identity, so a decoded copy of the action replays exactly like the
/// original.
pub trait GraphAction {
    /// Human-readable title, used in history panels and failure reports.
    fn title(&self) -> String;

    /// Applies the action's own forward change.
    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult;

    /// Reverses the action's own change.
    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult;
}

macro_rules! action_catalog {
    ($( $variant:ident ( $ty:ty ) ),+ $(,)?) => {
        /// The closed set of action kinds.
        ///
        /// Exhaustive matching replaces the reflection-driven dispatch of
        /// typical editor frameworks: adding a kind without wiring its
        /// replay is a compile error.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum ActionData {
            /// A pure container: a bracket of sub-actions with no change of
            /// its own.
            Compound,
            /// A container replayed in the opposite direction: undo runs
            /// its sub-actions forward, redo runs them backward.
            Inverse,
            $( $variant($ty), )+
        }

        impl ActionData {
            /// The type tag stored in [`ActionKey`].
            pub fn kind(&self) -> &'static str {
                match self {
                    Self::Compound => "Compound",
                    Self::Inverse => "Inverse",
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }

            fn default_title(&self) -> String {
                match self {
                    Self::Compound => "Action".into(),
                    Self::Inverse => "Inverse action".into(),
                    $( Self::$variant(action) => action.title(), )+
                }
            }

            fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
                match self {
                    Self::Compound | Self::Inverse => Ok(()),
                    $( Self::$variant(action) => action.apply(ctl), )+
                }
            }

            fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
                match self {
                    Self::Compound | Self::Inverse => Ok(()),
                    $( Self::$variant(action) => action.undo(ctl), )+
                }
            }
        }

        $(
            impl From<$ty> for ActionData {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }
        )+
    };
}

action_catalog! {
    AddOperatorNode(AddOperatorNodeAction),
    AddVariableNode(AddVariableNodeAction),
    AddParameterNode(AddParameterNodeAction),
    AddCommentNode(AddCommentNodeAction),
    AddRerouteNode(AddRerouteNodeAction),
    AddBranchNode(AddBranchNodeAction),
    AddSelectNode(AddSelectNodeAction),
    InjectNodeIntoPin(InjectNodeIntoPinAction),
    RemoveNode(RemoveNodeAction),
    SetNodeSelection(SetNodeSelectionAction),
    SetNodePosition(SetNodePositionAction),
    SetNodeSize(SetNodeSizeAction),
    SetNodeColor(SetNodeColorAction),
    SetNodeCategory(SetNodeCategoryAction),
    SetNodeKeywords(SetNodeKeywordsAction),
    SetNodeDescription(SetNodeDescriptionAction),
    SetCommentText(SetCommentTextAction),
    SetRerouteCompactness(SetRerouteCompactnessAction),
    RenameNode(RenameNodeAction),
    RenameVariable(RenameVariableAction),
    RenameParameter(RenameParameterAction),
    SetPinExpansion(SetPinExpansionAction),
    SetPinWatch(SetPinWatchAction),
    SetPinDefaultValue(SetPinDefaultValueAction),
    InsertArrayPin(InsertArrayPinAction),
    RemoveArrayPin(RemoveArrayPinAction),
    AddLink(AddLinkAction),
    BreakLink(BreakLinkAction),
    AddExposedPin(AddExposedPinAction),
    RemoveExposedPin(RemoveExposedPinAction),
    RenameExposedPin(RenameExposedPinAction),
    ImportNodeFromText(ImportNodeFromTextAction),
    CollapseNodes(CollapseNodesAction),
    ExpandNode(ExpandNodeAction),
    PushGraph(PushGraphAction),
    PopGraph(PopGraphAction),
}

impl ActionData {
    /// Merges `other` into `self`, updating only "new state" fields.
    ///
    /// Only the continuously adjustable kinds merge, and only with the
    /// exact same kind targeting the same identity. "Old state" fields are
    /// never touched — that is what makes a merged record undo all the way
    /// back to the state before the first edit of the run.
    pub fn merge(&mut self, other: &ActionData) -> bool {
        match (self, other) {
            (Self::SetNodePosition(a), Self::SetNodePosition(b)) => a.merge(b),
            (Self::SetNodeSize(a), Self::SetNodeSize(b)) => a.merge(b),
            (Self::SetNodeColor(a), Self::SetNodeColor(b)) => a.merge(b),
            (Self::SetNodeCategory(a), Self::SetNodeCategory(b)) => a.merge(b),
            (Self::SetNodeKeywords(a), Self::SetNodeKeywords(b)) => a.merge(b),
            (Self::SetNodeDescription(a), Self::SetNodeDescription(b)) => a.merge(b),
            (Self::SetPinDefaultValue(a), Self::SetPinDefaultValue(b)) => a.merge(b),
            _ => false,
        }
    }

    /// Whether the action changes document content, as opposed to UI state
    /// (selection, pin expansion, watches). Non-content actions are fully
    /// undoable but do not count toward unsaved changes.
    pub fn modifies_content(&self) -> bool {
        !matches!(
            self,
            Self::SetNodeSelection(_) | Self::SetPinExpansion(_) | Self::SetPinWatch(_)
        )
    }
}

/// A titled, invertible unit of history with sub-actions.
///
/// Records are created synchronously when a mutation is requested and are
/// immutable once committed, except through [`merge`](Self::merge). They
/// never hold live model references; sub-actions are stored pre-encoded as
/// [`ActionKey`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub title: String,
    pub sub_actions: Vec<ActionKey>,
    pub data: ActionData,
}

impl ActionRecord {
    pub fn new(title: impl Into<String>, data: ActionData) -> Self {
        Self {
            title: title.into(),
            sub_actions: Vec::new(),
            data,
        }
    }

    /// An empty bracket container.
    pub fn compound(title: impl Into<String>) -> Self {
        Self::new(title, ActionData::Compound)
    }

    /// An empty inverse container (sub-run directions swapped).
    pub fn inverse(title: impl Into<String>) -> Self {
        Self::new(title, ActionData::Inverse)
    }

    /// Encodes `record` and appends it as the last sub-action.
    pub fn push_sub_action(&mut self, record: ActionRecord) -> Result<(), CodecError> {
        self.sub_actions.push(encode(&record)?);
        Ok(())
    }

    /// Attempts to merge `other` into this record.
    ///
    /// Succeeds only when neither record carries sub-actions and the data
    /// kinds agree (see [`ActionData::merge`]); on success this record's
    /// "new state" takes `other`'s while its "old state" stays untouched.
    pub fn merge(&mut self, other: &ActionRecord) -> bool {
        if !self.sub_actions.is_empty() || !other.sub_actions.is_empty() {
            return false;
        }
        self.data.merge(&other.data)
    }

    /// Reverses this record: sub-actions in reverse order (stopping at the
    /// first failure), then the record's own reverse change.
    pub fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        match &self.data {
            ActionData::Compound => self.undo_sub_actions(ctl),
            ActionData::Inverse => self.redo_sub_actions(ctl),
            data => {
                self.undo_sub_actions(ctl)?;
                data.undo(ctl)
            }
        }
    }

    /// Replays this record forward: its own change first, then sub-actions
    /// in forward order — except removals, whose own teardown runs last so
    /// that sub-recorded link breaks happen while both ends still exist.
    pub fn redo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        match &self.data {
            ActionData::Compound => self.redo_sub_actions(ctl),
            ActionData::Inverse => self.undo_sub_actions(ctl),
            data @ ActionData::RemoveNode(_) => {
                self.redo_sub_actions(ctl)?;
                data.apply(ctl)
            }
            data => {
                data.apply(ctl)?;
                self.redo_sub_actions(ctl)
            }
        }
    }

    fn undo_sub_actions(&self, ctl: &mut dyn GraphController) -> ActionResult {
        for key in self.sub_actions.iter().rev() {
            decode(key)?.undo(ctl)?;
        }
        Ok(())
    }

    fn redo_sub_actions(&self, ctl: &mut dyn GraphController) -> ActionResult {
        for key in &self.sub_actions {
            decode(key)?.redo(ctl)?;
        }
        Ok(())
    }

    /// See [`ActionData::modifies_content`]. Containers count as content.
    pub fn modifies_content(&self) -> bool {
        self.data.modifies_content()
    }
}

impl ActionRecord {
    /// Wraps a concrete catalog action in a record, titled after it.
    pub fn from_action<A>(action: A) -> Self
    where
        A: GraphAction + Into<ActionData>,
    {
        let data: ActionData = action.into();
        let title = data.default_title();
        Self::new(title, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    fn move_action(node: &str, from: (f32, f32), to: (f32, f32)) -> ActionRecord {
        ActionRecord::from_action(SetNodePositionAction {
            node_path: node.into(),
            old_position: vec2(from.0, from.1),
            new_position: vec2(to.0, to.1),
        })
    }

    #[test]
    fn merge_takes_new_state_keeps_old() {
        let mut first = move_action("Add", (0.0, 0.0), (10.0, 0.0));
        let second = move_action("Add", (10.0, 0.0), (20.0, 5.0));

        assert!(first.merge(&second));
        match &first.data {
            ActionData::SetNodePosition(a) => {
                assert_eq!(a.old_position, vec2(0.0, 0.0));
                assert_eq!(a.new_position, vec2(20.0, 5.0));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn merge_rejects_different_target() {
        let mut first = move_action("Add", (0.0, 0.0), (10.0, 0.0));
        let second = move_action("Scale", (0.0, 0.0), (10.0, 0.0));
        assert!(!first.merge(&second));
    }

    #[test]
    fn merge_rejects_different_kind() {
        let mut first = move_action("Add", (0.0, 0.0), (10.0, 0.0));
        let second = ActionRecord::from_action(SetNodeSizeAction {
            node_path: "Add".into(),
            old_size: vec2(0.0, 0.0),
            new_size: vec2(100.0, 50.0),
        });
        assert!(!first.merge(&second));
    }

    #[test]
    fn merge_rejects_records_with_sub_actions() {
        let mut first = move_action("Add", (0.0, 0.0), (10.0, 0.0));
        first.push_sub_action(move_action("Other", (0.0, 0.0), (1.0, 1.0))).unwrap();
        let second = move_action("Add", (10.0, 0.0), (20.0, 0.0));
        assert!(!first.merge(&second));

        let mut third = move_action("Add", (0.0, 0.0), (10.0, 0.0));
        let mut fourth = move_action("Add", (10.0, 0.0), (20.0, 0.0));
        fourth.push_sub_action(move_action("Other", (0.0, 0.0), (1.0, 1.0))).unwrap();
        assert!(!third.merge(&fourth));
    }

    #[test]
    fn kind_tags_are_variant_names() {
        let record = move_action("Add", (0.0, 0.0), (1.0, 1.0));
        assert_eq!(record.data.kind(), "SetNodePosition");
        assert_eq!(ActionRecord::compound("x").data.kind(), "Compound");
        assert_eq!(ActionRecord::inverse("x").data.kind(), "Inverse");
    }

    #[test]
    fn selection_and_watch_are_not_content() {
        let selection = ActionRecord::from_action(SetNodeSelectionAction {
            old_selection: vec![],
            new_selection: vec!["Add".into()],
        });
        assert!(!selection.modifies_content());

        let watch = ActionRecord::from_action(SetPinWatchAction {
            pin_path: "Add.A".into(),
            old_watched: false,
            new_watched: true,
        });
        assert!(!watch.modifies_content());

        assert!(move_action("Add", (0.0, 0.0), (1.0, 1.0)).modifies_content());
    }

    #[test]
    fn from_action_sets_title() {
        let record = move_action("Add", (0.0, 0.0), (1.0, 1.0));
        assert_eq!(record.title, "Set node position");
    }
}
