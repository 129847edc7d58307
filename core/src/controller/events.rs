//! Graph-modified notifications broadcast to external observers.

/// A single "graph modified" notification.
///
/// Events are emitted by the controller as part of every successful
/// mutation (including mutations replayed by undo/redo) and by the
/// action stack around grouped interactions. Observers (UI panels,
/// tooling) receive them in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    /// A grouped interaction began; until the matching close/cancel, all
    /// following events belong to one user-visible step.
    BracketOpened,
    BracketClosed,
    BracketCanceled,

    NodeAdded { node: String },
    NodeRemoved { node: String },
    NodeRenamed { old: String, new: String },
    SelectionChanged { nodes: Vec<String> },
    NodePositionChanged { node: String },
    NodeSizeChanged { node: String },
    NodeColorChanged { node: String },
    NodeCategoryChanged { node: String },
    NodeKeywordsChanged { node: String },
    NodeDescriptionChanged { node: String },
    CommentTextChanged { node: String },
    RerouteCompactnessChanged { node: String },
    VariableRenamed { old: String, new: String },
    ParameterRenamed { old: String, new: String },

    PinExpansionChanged { pin: String },
    PinWatchChanged { pin: String },
    PinDefaultValueChanged { pin: String },
    PinArrayChanged { pin: String },
    PinAdded { pin: String },
    PinRemoved { pin: String },
    PinRenamed { old: String, new: String },

    LinkAdded { source: String, target: String },
    LinkRemoved { source: String, target: String },

    NodeInjected { pin: String, node: String },
    NodeEjected { pin: String, node: String },

    NodesImported { nodes: Vec<String> },
    NodesCollapsed { node: String },
    NodeExpanded { nodes: Vec<String> },
    GraphPushed { graph: String },
    GraphPopped { graph: String },
}
