//! Registered operator types.
//!
//! Operator nodes take their pin layout from a registry the embedding
//! application fills at startup. The registry is explicit configuration
//! handed to the controller — there are no process-wide lookup tables.

use std::collections::BTreeMap;

use crate::graph::Pin;

/// The pin template of a registered operator type.
#[derive(Debug, Clone, Default)]
pub struct OperatorSpec {
    /// Pins instantiated on every node of this operator type.
    pub pins: Vec<Pin>,
}

impl OperatorSpec {
    pub fn new(pins: Vec<Pin>) -> Self {
        Self { pins }
    }
}

/// Maps operator type paths (e.g. `"math.Add"`) to their pin templates.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    specs: BTreeMap<String, OperatorSpec>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, op_type: impl Into<String>, spec: OperatorSpec) {
        self.specs.insert(op_type.into(), spec);
    }

    pub fn get(&self, op_type: &str) -> Option<&OperatorSpec> {
        self.specs.get(op_type)
    }

    pub fn contains(&self, op_type: &str) -> bool {
        self.specs.contains_key(op_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PinDirection;

    #[test]
    fn register_and_look_up() {
        let mut registry = OperatorRegistry::new();
        registry.register(
            "math.Add",
            OperatorSpec::new(vec![
                Pin::new("A", PinDirection::Input, "f32"),
                Pin::new("B", PinDirection::Input, "f32"),
                Pin::new("Result", PinDirection::Output, "f32"),
            ]),
        );
        assert!(registry.contains("math.Add"));
        assert_eq!(registry.get("math.Add").unwrap().pins.len(), 3);
        assert!(registry.get("math.Sub").is_none());
    }
}
