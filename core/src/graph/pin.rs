//! Pins: the typed connection points of a node.
//!
//! Pins are addressed by dot-separated paths rooted at their node, e.g.
//! `"Add.A"` for pin `A` on node `Add`, `"Add.Values.2"` for the third
//! element of the array pin `Values`, or `"Blend.Settings.Weight"` for a
//! sub-pin of an expanded struct pin.

use serde::{Deserialize, Serialize};

/// Flow direction of a pin relative to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinDirection {
    /// Consumes a value; may carry a default when unlinked.
    Input,
    /// Produces a value.
    Output,
    /// Both consumes and produces (pass-through pins, e.g. on reroutes).
    InOut,
    /// Shown on the node but not linkable; carries a default.
    Visible,
}

impl PinDirection {
    /// Whether a link may start at a pin of this direction.
    pub fn can_be_source(self) -> bool {
        matches!(self, Self::Output | Self::InOut)
    }

    /// Whether a link may end at a pin of this direction.
    pub fn can_be_target(self) -> bool {
        matches!(self, Self::Input | Self::InOut)
    }
}

/// A node injected inline into a pin (e.g. a variable node feeding the pin
/// without occupying canvas space of its own).
///
/// The injected node itself lives in the graph like any other node; this
/// entry records the wiring so it can be ejected and re-injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injection {
    /// Name of the injected node.
    pub node_name: String,
    /// Whether the node was injected on the input side of the pin.
    pub as_input: bool,
    /// Name of the injected node's input pin used for pass-through.
    pub input_pin: String,
    /// Name of the injected node's output pin used for pass-through.
    pub output_pin: String,
}

/// A single connection point on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub direction: PinDirection,
    /// Data type tag, e.g. `"f32"`, `"Vec2"`, `"Transform"`.
    pub data_type: String,
    /// Textual default value; empty means "use the type's default".
    pub default_value: String,
    /// Array pins hold one sub-pin per element, named `"0"`, `"1"`, ...
    pub is_array: bool,
    /// Whether the pin is shown expanded (sub-pins visible) in the editor.
    pub expanded: bool,
    /// Whether the pin's value is watched during execution.
    pub watched: bool,
    pub sub_pins: Vec<Pin>,
    /// Nodes injected inline into this pin.
    pub injections: Vec<Injection>,
}

impl Pin {
    pub fn new(name: impl Into<String>, direction: PinDirection, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction,
            data_type: data_type.into(),
            default_value: String::new(),
            is_array: false,
            expanded: false,
            watched: false,
            sub_pins: Vec::new(),
            injections: Vec::new(),
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn array(name: impl Into<String>, direction: PinDirection, data_type: impl Into<String>) -> Self {
        let mut pin = Self::new(name, direction, data_type);
        pin.is_array = true;
        pin
    }

    /// Resolves a relative path (`segments` below this pin) to a sub-pin.
    pub fn find_sub_pin(&self, segments: &[&str]) -> Option<&Pin> {
        let (first, rest) = segments.split_first()?;
        let sub = self.sub_pins.iter().find(|p| p.name == *first)?;
        if rest.is_empty() {
            Some(sub)
        } else {
            sub.find_sub_pin(rest)
        }
    }

    /// Mutable variant of [`find_sub_pin`](Self::find_sub_pin).
    pub fn find_sub_pin_mut(&mut self, segments: &[&str]) -> Option<&mut Pin> {
        let (first, rest) = segments.split_first()?;
        let sub = self.sub_pins.iter_mut().find(|p| p.name == *first)?;
        if rest.is_empty() {
            Some(sub)
        } else {
            sub.find_sub_pin_mut(rest)
        }
    }

    pub fn has_injections(&self) -> bool {
        !self.injections.is_empty()
    }

    /// Renames array element sub-pins back to `"0"`, `"1"`, ... after an
    /// insertion or removal.
    pub fn renumber_array_elements(&mut self) {
        for (index, sub) in self.sub_pins.iter_mut().enumerate() {
            sub.name = index.to_string();
        }
    }
}

/// Splits a pin path into its node name and the pin-relative remainder.
///
/// `"Add.A"` → `("Add", "A")`; `"Add.Values.2"` → `("Add", "Values.2")`.
pub fn split_pin_path(path: &str) -> Option<(&str, &str)> {
    let (node, rest) = path.split_once('.')?;
    if node.is_empty() || rest.is_empty() {
        return None;
    }
    Some((node, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn struct_pin() -> Pin {
        let mut pin = Pin::new("Settings", PinDirection::Input, "BlendSettings");
        pin.sub_pins.push(Pin::new("Weight", PinDirection::Input, "f32"));
        pin.sub_pins.push(Pin::new("Bias", PinDirection::Input, "f32"));
        pin
    }

    #[test]
    fn find_sub_pin_by_segments() {
        let pin = struct_pin();
        assert!(pin.find_sub_pin(&["Weight"]).is_some());
        assert!(pin.find_sub_pin(&["Missing"]).is_none());
    }

    #[test]
    fn find_sub_pin_nested() {
        let mut outer = Pin::new("Outer", PinDirection::Input, "Nested");
        outer.sub_pins.push(struct_pin());
        assert!(outer.find_sub_pin(&["Settings", "Bias"]).is_some());
        assert!(outer.find_sub_pin(&["Settings", "Bias", "Deeper"]).is_none());
    }

    #[test]
    fn renumber_after_removal() {
        let mut array = Pin::array("Values", PinDirection::Input, "f32");
        for i in 0..3 {
            array.sub_pins.push(Pin::new(i.to_string(), PinDirection::Input, "f32"));
        }
        array.sub_pins.remove(1);
        array.renumber_array_elements();
        let names: Vec<&str> = array.sub_pins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["0", "1"]);
    }

    #[test]
    fn split_pin_path_variants() {
        assert_eq!(split_pin_path("Add.A"), Some(("Add", "A")));
        assert_eq!(split_pin_path("Add.Values.2"), Some(("Add", "Values.2")));
        assert_eq!(split_pin_path("Add"), None);
        assert_eq!(split_pin_path(".A"), None);
    }
}
