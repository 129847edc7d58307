//! Actions covering links between pins.

use serde::{Deserialize, Serialize};

use crate::controller::GraphController;
use crate::history::record::{ActionResult, GraphAction};

/// Connects an output pin to an input pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLinkAction {
    pub source: String,
    pub target: String,
}

impl GraphAction for AddLinkAction {
    fn title(&self) -> String {
        "Add link".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_link(&self.source, &self.target, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.break_link(&self.source, &self.target, false)
    }
}

/// Disconnects a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakLinkAction {
    pub source: String,
    pub target: String,
}

impl GraphAction for BreakLinkAction {
    fn title(&self) -> String {
        "Break link".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.break_link(&self.source, &self.target, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_link(&self.source, &self.target, false)
    }
}
