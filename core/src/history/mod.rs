//! Transactional undo/redo for the node-graph model.
//!
//! Every mutation is captured as an invertible [`ActionRecord`]; records
//! group into brackets committed as single undo steps, rapid consecutive
//! edits merge, and removals synthesize inverse records that recreate prior
//! state. Histories store only [`ActionKey`]s (opaque, type-tagged text),
//! so an external value-based transaction system can persist them and drive
//! [`ActionStack::reconcile`] when it moves on its own.
//!
//! - [`ActionRecord`] / [`ActionData`] — the invertible units of change
//! - [`actions`] — the concrete catalog, one type per mutation kind
//! - [`encode`] / [`decode`] / [`ActionKey`] — the serialization bridge
//! - [`ActionStack`] — brackets, merging, undo/redo, reconciliation

pub mod actions;

mod codec;
mod record;
mod stack;

pub use codec::{decode, encode, ActionKey, CodecError};
pub use record::{ActionData, ActionRecord, ActionResult, GraphAction};
pub use stack::{ActionStack, DEFAULT_MAX_DEPTH};
