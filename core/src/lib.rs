//! # NodeForge Core
//!
//! A node-graph editing model with a transactional undo/redo engine.
//!
//! The [`graph`] module holds the model (nodes, pins, links, nested
//! subgraphs), [`controller`] the capability interface mutations go
//! through, and [`history`] the action stack: invertible action records,
//! bracket grouping, merging of rapid edits, inverse-action synthesis for
//! removals, and reconciliation with an external transaction system.

pub mod controller;
pub mod graph;
pub mod history;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
