//! Links: directed connections between an output pin and an input pin.

use serde::{Deserialize, Serialize};

/// Separator used in the textual representation of a link.
pub const LINK_SEPARATOR: &str = " -> ";

/// A directed connection between two pins, addressed purely by pin path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Path of the source (output) pin, e.g. `"Add.Result"`.
    pub source: String,
    /// Path of the target (input) pin, e.g. `"Scale.Value"`.
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Textual form of the link, e.g. `"Add.Result -> Scale.Value"`.
    ///
    /// This representation survives the identities of the linked nodes being
    /// recycled: collapse/expand undo re-links by path text alone.
    pub fn path_representation(&self) -> String {
        format!("{}{}{}", self.source, LINK_SEPARATOR, self.target)
    }

    /// Splits a textual link representation back into (source, target).
    pub fn split_path_representation(representation: &str) -> Option<(&str, &str)> {
        let (source, target) = representation.split_once(LINK_SEPARATOR)?;
        if source.is_empty() || target.is_empty() {
            return None;
        }
        Some((source, target))
    }

    /// Returns the name of the node owning the source pin.
    pub fn source_node(&self) -> &str {
        self.source.split('.').next().unwrap_or(&self.source)
    }

    /// Returns the name of the node owning the target pin.
    pub fn target_node(&self) -> &str {
        self.target.split('.').next().unwrap_or(&self.target)
    }

    /// Whether either endpoint belongs to the given node.
    pub fn touches_node(&self, node_name: &str) -> bool {
        self.source_node() == node_name || self.target_node() == node_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representation_round_trip() {
        let link = Link::new("Add.Result", "Scale.Value");
        let rep = link.path_representation();
        assert_eq!(rep, "Add.Result -> Scale.Value");
        let (source, target) = Link::split_path_representation(&rep).unwrap();
        assert_eq!(source, "Add.Result");
        assert_eq!(target, "Scale.Value");
    }

    #[test]
    fn split_rejects_malformed() {
        assert!(Link::split_path_representation("no separator").is_none());
        assert!(Link::split_path_representation(" -> Target.In").is_none());
    }

    #[test]
    fn node_names_from_paths() {
        let link = Link::new("Add.Values.0", "Scale.Value");
        assert_eq!(link.source_node(), "Add");
        assert_eq!(link.target_node(), "Scale");
        assert!(link.touches_node("Add"));
        assert!(!link.touches_node("Value"));
    }
}
