//! The concrete action catalog: one type per supported mutation kind.
//!
//! Every action captures, at construction time, exactly the fields needed
//! to replay its mutation forward (redo) and to invert it (undo), and
//! addresses its target purely by stable identity. See
//! [`ActionData`](super::ActionData) for the closed union over these types.

mod link;
mod node;
mod pin;
mod subgraph;

pub use link::{AddLinkAction, BreakLinkAction};
pub use node::{
    AddBranchNodeAction, AddCommentNodeAction, AddOperatorNodeAction, AddParameterNodeAction,
    AddRerouteNodeAction, AddSelectNodeAction, AddVariableNodeAction, InjectNodeIntoPinAction,
    RemoveNodeAction, RenameNodeAction, RenameParameterAction, RenameVariableAction,
    SetCommentTextAction, SetNodeCategoryAction, SetNodeColorAction, SetNodeDescriptionAction,
    SetNodeKeywordsAction, SetNodePositionAction, SetNodeSelectionAction, SetNodeSizeAction,
    SetRerouteCompactnessAction,
};
pub use pin::{
    AddExposedPinAction, InsertArrayPinAction, RemoveArrayPinAction, RemoveExposedPinAction,
    RenameExposedPinAction, SetPinDefaultValueAction, SetPinExpansionAction, SetPinWatchAction,
};
pub use subgraph::{
    CollapseNodesAction, ExpandNodeAction, ImportNodeFromTextAction, PopGraphAction,
    PushGraphAction,
};
