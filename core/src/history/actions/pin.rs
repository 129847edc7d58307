//! Actions covering pin state and the exposed pins of the edited graph.

use serde::{Deserialize, Serialize};

use crate::controller::GraphController;
use crate::graph::PinDirection;
use crate::history::record::{ActionResult, GraphAction};

/// Expands or collapses a pin's sub-pins in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPinExpansionAction {
    pub pin_path: String,
    pub old_expanded: bool,
    pub new_expanded: bool,
}

impl GraphAction for SetPinExpansionAction {
    fn title(&self) -> String {
        "Set pin expansion".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_pin_expansion(&self.pin_path, self.new_expanded, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_pin_expansion(&self.pin_path, self.old_expanded, false)
    }
}

/// Toggles the watch flag on a pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPinWatchAction {
    pub pin_path: String,
    pub old_watched: bool,
    pub new_watched: bool,
}

impl GraphAction for SetPinWatchAction {
    fn title(&self) -> String {
        "Set pin watch".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_pin_watched(&self.pin_path, self.new_watched, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.set_pin_watched(&self.pin_path, self.old_watched, false)
    }
}

/// Changes a pin's default value. Consecutive edits of the same pin merge
/// into one step, which is how typing or dragging a value collapses into a
/// single undo entry.
///
/// An empty value means "no stored default": applying or reverting to an
/// empty value is a no-op rather than an error, so freshly created pins
/// round-trip cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPinDefaultValueAction {
    pub pin_path: String,
    pub old_value: String,
    pub new_value: String,
}

impl SetPinDefaultValueAction {
    pub fn merge(&mut self, other: &Self) -> bool {
        if self.pin_path != other.pin_path {
            return false;
        }
        self.new_value = other.new_value.clone();
        true
    }
}

impl GraphAction for SetPinDefaultValueAction {
    fn title(&self) -> String {
        "Set pin default value".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        if self.new_value.is_empty() {
            return Ok(());
        }
        ctl.set_pin_default_value(&self.pin_path, &self.new_value, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        if self.old_value.is_empty() {
            return Ok(());
        }
        ctl.set_pin_default_value(&self.pin_path, &self.old_value, false)
    }
}

/// Inserts an element into an array pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertArrayPinAction {
    pub array_pin_path: String,
    pub index: usize,
    pub new_default_value: String,
}

impl GraphAction for InsertArrayPinAction {
    fn title(&self) -> String {
        "Insert array pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.insert_array_pin(&self.array_pin_path, self.index, &self.new_default_value, false)
            .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_array_pin(&format!("{}.{}", self.array_pin_path, self.index), false)
    }
}

/// Removes an element from an array pin, capturing its default so undo can
/// reinsert it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveArrayPinAction {
    pub array_pin_path: String,
    pub index: usize,
    pub default_value: String,
}

impl GraphAction for RemoveArrayPinAction {
    fn title(&self) -> String {
        "Remove array pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_array_pin(&format!("{}.{}", self.array_pin_path, self.index), false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.insert_array_pin(&self.array_pin_path, self.index, &self.default_value, false)
            .map(|_| ())
    }
}

/// Declares a new exposed pin on the boundary of the edited graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExposedPinAction {
    pub name: String,
    pub direction: PinDirection,
    pub data_type: String,
    pub default_value: String,
}

impl GraphAction for AddExposedPinAction {
    fn title(&self) -> String {
        "Add exposed pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_exposed_pin(&self.name, self.direction, &self.data_type, &self.default_value, false)
            .map(|_| ())
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_exposed_pin(&self.name, false)
    }
}

/// Removes an exposed pin; same captured fields as
/// [`AddExposedPinAction`] with the operations swapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveExposedPinAction {
    pub name: String,
    pub direction: PinDirection,
    pub data_type: String,
    pub default_value: String,
}

impl GraphAction for RemoveExposedPinAction {
    fn title(&self) -> String {
        "Remove exposed pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.remove_exposed_pin(&self.name, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.add_exposed_pin(&self.name, self.direction, &self.data_type, &self.default_value, false)
            .map(|_| ())
    }
}

/// Renames an exposed pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameExposedPinAction {
    pub old_name: String,
    pub new_name: String,
}

impl GraphAction for RenameExposedPinAction {
    fn title(&self) -> String {
        "Rename exposed pin".into()
    }

    fn apply(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_exposed_pin(&self.old_name, &self.new_name, false)
    }

    fn undo(&self, ctl: &mut dyn GraphController) -> ActionResult {
        ctl.rename_exposed_pin(&self.new_name, &self.old_name, false)
    }
}
