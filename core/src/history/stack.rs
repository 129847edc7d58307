//! The action stack: undo/redo histories, brackets, and reconciliation
//! with an external transaction system.
//!
//! The stack owns two ordered histories of [`ActionKey`]s plus a LIFO stack
//! of currently open brackets (live records, call-stack-scoped). It never
//! owns live action records long-term: everything committed is encoded, and
//! decoded transiently for replay. A `cursor` tracks agreement with an
//! external value-based transaction system; [`reconcile`](ActionStack::reconcile)
//! replays this stack's own history until the cursor matches whatever the
//! external system decided.
//!
//! All failures are recovered here: undo/redo report and return `false`,
//! never panic, and always leave the histories consistent and continuable.

use serde::{Deserialize, Serialize};

use crate::controller::{GraphController, GraphEvent};

use super::codec::{decode, encode, ActionKey};
use super::record::ActionRecord;

/// Default maximum number of committed undo steps.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Undo/redo history for one editing session.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionStack {
    undo_actions: Vec<ActionKey>,
    redo_actions: Vec<ActionKey>,
    /// Open brackets, innermost last. Transient: never persisted.
    #[serde(skip)]
    brackets: Vec<ActionRecord>,
    /// Index this stack believes the external transaction system is at;
    /// equals `undo_actions.len()` after every local operation.
    cursor: usize,
    max_depth: usize,
    /// Signed distance to the saved state, `None` when unreachable.
    save_distance: Option<i64>,
}

impl Default for ActionStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionStack {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates a stack that keeps at most `max_depth` undo steps, dropping
    /// the oldest on overflow.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_actions: Vec::new(),
            redo_actions: Vec::new(),
            brackets: Vec::new(),
            cursor: 0,
            max_depth,
            save_distance: Some(0),
        }
    }

    // --- read-only inspection -----------------------------------------------

    pub fn undo_len(&self) -> usize {
        self.undo_actions.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_actions.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_actions.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_actions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn bracket_depth(&self) -> usize {
        self.brackets.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Titles of undoable steps, most recent first. Decodes lazily; entries
    /// that fail to decode fall back to their kind tag.
    pub fn undo_titles(&self) -> impl Iterator<Item = String> + '_ {
        self.undo_actions.iter().rev().map(title_of)
    }

    /// Titles of redoable steps, most recent first.
    pub fn redo_titles(&self) -> impl Iterator<Item = String> + '_ {
        self.redo_actions.iter().rev().map(title_of)
    }

    // --- brackets -----------------------------------------------------------

    /// Opens a bracket: every following push lands inside it until the
    /// matching close, committing as a single undo step.
    pub fn open_bracket(&mut self, title: &str) {
        self.brackets.push(ActionRecord::compound(title));
    }

    /// Closes the innermost bracket. At depth zero the bracket commits to
    /// undo history; at greater depth it becomes a sub-action of the new
    /// innermost bracket, so nested brackets compose instead of flattening.
    pub fn close_bracket(&mut self) -> bool {
        debug_assert!(
            !self.brackets.is_empty(),
            "close_bracket without matching open_bracket"
        );
        let Some(record) = self.brackets.pop() else {
            return false;
        };
        if let Some(parent) = self.brackets.last_mut() {
            if let Err(e) = parent.push_sub_action(record) {
                log::error!("failed to nest bracket: {e}");
                return false;
            }
            return true;
        }
        self.commit(record)
    }

    /// Discards the innermost bracket without committing it.
    ///
    /// Effects already applied by the bracket's actions are deliberately
    /// not rolled back: cancel means "stop recording, accept the current
    /// state", not "revert".
    pub fn cancel_bracket(&mut self) -> bool {
        debug_assert!(
            !self.brackets.is_empty(),
            "cancel_bracket without matching open_bracket"
        );
        self.brackets.pop().is_some()
    }

    // --- recording ----------------------------------------------------------

    /// Records `record`, merging where possible: into the open bracket's
    /// last sub-action, or, with no bracket open, into the last committed
    /// undo entry (decoded, merged, re-encoded in place). Appends only when
    /// merging fails. Top-level recording discards the redo branch.
    pub fn push_action(&mut self, record: ActionRecord) -> bool {
        if let Some(bracket) = self.brackets.last_mut() {
            if let Some(last_key) = bracket.sub_actions.last_mut() {
                if let Some(key) = merge_into_key(last_key, &record) {
                    *last_key = key;
                    return true;
                }
            }
            return match encode(&record) {
                Ok(key) => {
                    bracket.sub_actions.push(key);
                    true
                }
                Err(e) => {
                    log::error!("failed to encode action '{}': {e}", record.title);
                    false
                }
            };
        }

        let content = record.modifies_content();
        if let Some(last_key) = self.undo_actions.last_mut() {
            if let Some(key) = merge_into_key(last_key, &record) {
                *last_key = key;
                self.discard_redo(content);
                // The merged-into entry was the save point; its content
                // changed, so the save is gone.
                if content && self.save_distance == Some(0) {
                    self.save_distance = None;
                }
                self.cursor = self.undo_actions.len();
                return true;
            }
        }
        self.commit(record)
    }

    fn commit(&mut self, record: ActionRecord) -> bool {
        let content = record.modifies_content();
        let key = match encode(&record) {
            Ok(key) => key,
            Err(e) => {
                log::error!("failed to encode action '{}': {e}", record.title);
                return false;
            }
        };
        self.discard_redo(content);
        if content {
            if let Some(d) = &mut self.save_distance {
                *d += 1;
            }
        }
        self.undo_actions.push(key);
        self.trim_overflow();
        self.cursor = self.undo_actions.len();
        true
    }

    fn discard_redo(&mut self, content: bool) {
        if self.redo_actions.is_empty() {
            return;
        }
        self.redo_actions.clear();
        // A save point sitting in the discarded redo branch is unreachable.
        if content {
            if let Some(d) = self.save_distance {
                if d < 0 {
                    self.save_distance = None;
                }
            }
        }
    }

    fn trim_overflow(&mut self) {
        if self.undo_actions.len() > self.max_depth {
            self.undo_actions.remove(0);
            if let Some(d) = self.save_distance {
                if d > self.undo_actions.len() as i64 {
                    self.save_distance = None;
                }
            }
        }
    }

    // --- replay -------------------------------------------------------------

    /// Undoes the most recent step. Reports "nothing to undo" on an empty
    /// history; on replay failure reports the failing action's title and
    /// drops the entry (it is not retried).
    pub fn undo(&mut self, ctl: &mut dyn GraphController) -> bool {
        let Some(key) = self.undo_actions.pop() else {
            ctl.report_warning("Nothing to undo.");
            return false;
        };
        self.cursor = self.undo_actions.len();

        let record = match decode(&key) {
            Ok(record) => record,
            Err(e) => {
                ctl.report_error(&format!("Error while decoding undo entry: {e}"));
                return false;
            }
        };
        match record.undo(ctl) {
            Ok(()) => {
                if record.modifies_content() {
                    if let Some(d) = &mut self.save_distance {
                        *d -= 1;
                    }
                }
                self.redo_actions.push(key);
                true
            }
            Err(e) => {
                ctl.report_error(&format!(
                    "Error while undoing action '{}': {e}",
                    record.title
                ));
                false
            }
        }
    }

    /// Redoes the most recently undone step; symmetric to
    /// [`undo`](Self::undo).
    pub fn redo(&mut self, ctl: &mut dyn GraphController) -> bool {
        let Some(key) = self.redo_actions.pop() else {
            ctl.report_warning("Nothing to redo.");
            return false;
        };
        let record = match decode(&key) {
            Ok(record) => record,
            Err(e) => {
                ctl.report_error(&format!("Error while decoding redo entry: {e}"));
                return false;
            }
        };
        match record.redo(ctl) {
            Ok(()) => {
                if record.modifies_content() {
                    if let Some(d) = &mut self.save_distance {
                        *d += 1;
                    }
                }
                self.undo_actions.push(key);
                self.trim_overflow();
                self.cursor = self.undo_actions.len();
                true
            }
            Err(e) => {
                ctl.report_error(&format!(
                    "Error while redoing action '{}': {e}",
                    record.title
                ));
                false
            }
        }
    }

    /// Re-derives the cursor after the external transaction system moved
    /// independently: replays undo while the cursor is past `desired` and
    /// redo while it is short of it, inside a broadcast bracket.
    ///
    /// Stops with a logged warning if history runs out before `desired` is
    /// reached, and broadcasts a cancel on the first failed step. Returns
    /// whether the cursor ended up at `desired`.
    pub fn reconcile(&mut self, desired: usize, ctl: &mut dyn GraphController) -> bool {
        if desired == self.cursor {
            return true;
        }
        ctl.notify(GraphEvent::BracketOpened);

        while self.cursor > desired {
            if self.undo_actions.is_empty() {
                log::warn!(
                    "reconcile stopped: undo history exhausted at {} (desired {desired})",
                    self.cursor
                );
                break;
            }
            if !self.undo(ctl) {
                ctl.notify(GraphEvent::BracketCanceled);
                return false;
            }
        }
        while self.cursor < desired {
            if self.redo_actions.is_empty() {
                log::warn!(
                    "reconcile stopped: redo history exhausted at {} (desired {desired})",
                    self.cursor
                );
                break;
            }
            if !self.redo(ctl) {
                ctl.notify(GraphEvent::BracketCanceled);
                return false;
            }
        }

        ctl.notify(GraphEvent::BracketClosed);
        self.cursor == desired
    }

    // --- save tracking ------------------------------------------------------

    /// Records the current state as saved.
    pub fn mark_saved(&mut self) {
        self.save_distance = Some(0);
    }

    /// Whether the current state differs from the last saved one. `true`
    /// when never saved, or when the save point became unreachable (dropped
    /// by overflow, or discarded with the redo branch).
    pub fn has_unsaved_changes(&self) -> bool {
        self.save_distance != Some(0)
    }

    /// Drops both histories and any open brackets. The saved state remains
    /// "saved" only if the stack was at it.
    pub fn clear(&mut self) {
        self.undo_actions.clear();
        self.redo_actions.clear();
        self.brackets.clear();
        self.cursor = 0;
        if self.save_distance != Some(0) {
            self.save_distance = None;
        }
    }
}

fn title_of(key: &ActionKey) -> String {
    decode(key)
        .map(|record| record.title)
        .unwrap_or_else(|_| key.kind.clone())
}

/// Decodes `last_key`, merges `record` into it, and re-encodes. `None` if
/// the entry does not merge (or cannot be decoded — a corrupt entry should
/// not swallow a fresh action).
fn merge_into_key(last_key: &ActionKey, record: &ActionRecord) -> Option<ActionKey> {
    let mut last = decode(last_key).ok()?;
    if !last.merge(record) {
        return None;
    }
    match encode(&last) {
        Ok(key) => Some(key),
        Err(e) => {
            log::error!("failed to re-encode merged action '{}': {e}", last.title);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::actions::{SetNodePositionAction, SetNodeSelectionAction};
    use crate::math::vec2;

    fn move_record(node: &str, from: (f32, f32), to: (f32, f32)) -> ActionRecord {
        ActionRecord::from_action(SetNodePositionAction {
            node_path: node.into(),
            old_position: vec2(from.0, from.1),
            new_position: vec2(to.0, to.1),
        })
    }

    #[test]
    fn push_commits_top_level_entries() {
        let mut stack = ActionStack::new();
        assert!(stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0))));
        assert!(stack.push_action(move_record("Scale", (0.0, 0.0), (1.0, 0.0))));
        assert_eq!(stack.undo_len(), 2);
        assert_eq!(stack.cursor(), 2);
    }

    #[test]
    fn consecutive_pushes_merge_into_last_entry() {
        let mut stack = ActionStack::new();
        stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0)));
        stack.push_action(move_record("Add", (1.0, 0.0), (2.0, 0.0)));
        stack.push_action(move_record("Add", (2.0, 0.0), (3.0, 0.0)));
        assert_eq!(stack.undo_len(), 1);

        // Different target breaks the run.
        stack.push_action(move_record("Scale", (0.0, 0.0), (1.0, 0.0)));
        assert_eq!(stack.undo_len(), 2);
    }

    #[test]
    fn bracketed_pushes_commit_one_entry() {
        let mut stack = ActionStack::new();
        stack.open_bracket("Drag nodes");
        stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0)));
        stack.push_action(move_record("Scale", (0.0, 0.0), (1.0, 0.0)));
        assert_eq!(stack.undo_len(), 0);
        assert!(stack.close_bracket());
        assert_eq!(stack.undo_len(), 1);

        let key = &stack.undo_actions[0];
        let record = decode(key).unwrap();
        assert_eq!(record.title, "Drag nodes");
        assert_eq!(record.sub_actions.len(), 2);
    }

    #[test]
    fn nested_brackets_compose_not_flatten() {
        let mut stack = ActionStack::new();
        stack.open_bracket("Outer");
        stack.open_bracket("Inner A");
        stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0)));
        assert!(stack.close_bracket());
        stack.open_bracket("Inner B");
        assert!(stack.close_bracket());
        assert!(stack.close_bracket());

        assert_eq!(stack.undo_len(), 1);
        let record = decode(&stack.undo_actions[0]).unwrap();
        assert_eq!(record.sub_actions.len(), 2);
        let inner_a = decode(&record.sub_actions[0]).unwrap();
        assert_eq!(inner_a.title, "Inner A");
        assert_eq!(inner_a.sub_actions.len(), 1);
        let inner_b = decode(&record.sub_actions[1]).unwrap();
        assert_eq!(inner_b.title, "Inner B");
        assert!(inner_b.sub_actions.is_empty());
    }

    #[test]
    fn merge_inside_bracket() {
        let mut stack = ActionStack::new();
        stack.open_bracket("Drag");
        stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0)));
        stack.push_action(move_record("Add", (1.0, 0.0), (5.0, 5.0)));
        stack.close_bracket();

        let record = decode(&stack.undo_actions[0]).unwrap();
        assert_eq!(record.sub_actions.len(), 1);
        let merged = decode(&record.sub_actions[0]).unwrap();
        match merged.data {
            crate::history::ActionData::SetNodePosition(a) => {
                assert_eq!(a.old_position, vec2(0.0, 0.0));
                assert_eq!(a.new_position, vec2(5.0, 5.0));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn cancel_bracket_discards() {
        let mut stack = ActionStack::new();
        stack.open_bracket("Doomed");
        stack.push_action(move_record("Add", (0.0, 0.0), (1.0, 0.0)));
        assert!(stack.cancel_bracket());
        assert_eq!(stack.undo_len(), 0);
        assert_eq!(stack.bracket_depth(), 0);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut stack = ActionStack::with_max_depth(2);
        stack.push_action(move_record("A", (0.0, 0.0), (1.0, 0.0)));
        stack.push_action(move_record("B", (0.0, 0.0), (1.0, 0.0)));
        stack.push_action(move_record("C", (0.0, 0.0), (1.0, 0.0)));
        assert_eq!(stack.undo_len(), 2);
        let titles: Vec<String> = stack.undo_titles().collect();
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn save_tracking_follows_commits() {
        let mut stack = ActionStack::new();
        assert!(!stack.has_unsaved_changes());
        stack.push_action(move_record("A", (0.0, 0.0), (1.0, 0.0)));
        assert!(stack.has_unsaved_changes());
        stack.mark_saved();
        assert!(!stack.has_unsaved_changes());

        // Selection changes are UI state, not content.
        stack.push_action(ActionRecord::from_action(SetNodeSelectionAction {
            old_selection: vec![],
            new_selection: vec!["A".into()],
        }));
        assert!(!stack.has_unsaved_changes());

        // Merging into the saved entry invalidates the save.
        stack.mark_saved();
        stack.push_action(move_record("B", (0.0, 0.0), (1.0, 0.0)));
        assert!(stack.has_unsaved_changes());
        stack.mark_saved();
        stack.push_action(move_record("B", (1.0, 0.0), (2.0, 0.0)));
        assert!(stack.has_unsaved_changes());
    }

    #[test]
    fn clear_preserves_save_only_at_save_point() {
        let mut stack = ActionStack::new();
        stack.push_action(move_record("A", (0.0, 0.0), (1.0, 0.0)));
        stack.mark_saved();
        stack.clear();
        assert!(!stack.has_unsaved_changes());

        stack.push_action(move_record("A", (1.0, 0.0), (2.0, 0.0)));
        stack.clear();
        assert!(stack.has_unsaved_changes());
    }

    #[test]
    fn imbalanced_close_is_a_noop_in_release() {
        // debug_assert fires under `cargo test`; exercise the release-mode
        // guard directly only when assertions are off.
        if cfg!(debug_assertions) {
            return;
        }
        let mut stack = ActionStack::new();
        assert!(!stack.close_bracket());
        assert!(!stack.cancel_bracket());
        assert_eq!(stack.undo_len(), 0);
    }

    #[test]
    fn state_serializes_without_brackets() {
        let mut stack = ActionStack::new();
        stack.push_action(move_record("A", (0.0, 0.0), (1.0, 0.0)));
        stack.open_bracket("Transient");

        let text = ron::to_string(&stack).unwrap();
        let restored: ActionStack = ron::from_str(&text).unwrap();
        assert_eq!(restored.undo_len(), 1);
        assert_eq!(restored.cursor(), 1);
        assert_eq!(restored.bracket_depth(), 0);
    }
}
