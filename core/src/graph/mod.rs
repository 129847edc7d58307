//! The node-graph model: nodes, pins, links, and nested subgraphs.
//!
//! Everything in this module is addressed by stable textual identity
//! (node names and dot-separated pin paths), so that history records and
//! serialized clipboards stay valid across arbitrary mutations of the live
//! object graph.
//!
//! - [`Graph`] — a flat set of uniquely named nodes plus links
//! - [`Node`] / [`NodeKind`] — canvas units with kind-specific payloads
//! - [`Pin`] — typed connection points, including array and struct sub-pins
//! - [`Link`] — a directed pin-to-pin connection
//! - [`NodeClipboard`] — the export/import exchange format

mod graph;
mod link;
mod node;
mod pin;

pub use graph::{ExposedPin, Graph, NodeClipboard};
pub use link::{Link, LINK_SEPARATOR};
pub use node::{Node, NodeKind};
pub use pin::{split_pin_path, Injection, Pin, PinDirection};
