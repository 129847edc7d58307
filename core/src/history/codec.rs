//! The action codec: type-tagged text keys for action records.
//!
//! Histories never own live action records. Every record is flattened into
//! an [`ActionKey`], a `{kind, data}` pair where `data` is the RON text of
//! the full record, and reconstructed on demand. The decoded instance is a
//! plain owned value: it is dropped (released) on every exit path of
//! whatever scope decoded it, including early-return failures.
//!
//! Round-trip contract: for every concrete action kind,
//! `decode(&encode(&record)?)?` must undo and redo identically to `record`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::ActionRecord;

/// The serialized, type-tagged long-term storage form of an action record.
///
/// `kind` duplicates the tag embedded in `data`; decoding cross-checks the
/// two so a key whose halves drifted apart is rejected instead of silently
/// replaying the wrong action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionKey {
    pub kind: String,
    pub data: String,
}

/// Errors produced by the action codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("failed to encode action '{title}': {message}")]
    Serialize { title: String, message: String },

    #[error("failed to decode action key of kind '{kind}': {message}")]
    Deserialize { kind: String, message: String },

    #[error("action key tagged '{expected}' decoded as '{found}'")]
    KindMismatch { expected: String, found: String },
}

/// Flattens a record into its storable key.
pub fn encode(record: &ActionRecord) -> Result<ActionKey, CodecError> {
    let data = ron::to_string(record).map_err(|e| CodecError::Serialize {
        title: record.title.clone(),
        message: e.to_string(),
    })?;
    Ok(ActionKey {
        kind: record.data.kind().to_string(),
        data,
    })
}

/// Reconstructs a transient record from its key.
pub fn decode(key: &ActionKey) -> Result<ActionRecord, CodecError> {
    let record: ActionRecord = ron::from_str(&key.data).map_err(|e| CodecError::Deserialize {
        kind: key.kind.clone(),
        message: e.to_string(),
    })?;
    if record.data.kind() != key.kind {
        return Err(CodecError::KindMismatch {
            expected: key.kind.clone(),
            found: record.data.kind().to_string(),
        });
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::actions::AddLinkAction;
    use crate::history::record::ActionRecord;

    fn sample_record() -> ActionRecord {
        ActionRecord::from_action(AddLinkAction {
            source: "Add.Result".into(),
            target: "Scale.Value".into(),
        })
    }

    #[test]
    fn round_trip_preserves_record() {
        let record = sample_record();
        let key = encode(&record).unwrap();
        assert_eq!(key.kind, "AddLink");
        let decoded = decode(&key).unwrap();
        assert_eq!(decoded.title, record.title);
        assert_eq!(decoded.data.kind(), "AddLink");
    }

    #[test]
    fn decode_rejects_mismatched_tag() {
        let record = sample_record();
        let mut key = encode(&record).unwrap();
        key.kind = "BreakLink".into();
        let err = decode(&key).unwrap_err();
        assert!(matches!(err, CodecError::KindMismatch { .. }));
    }

    #[test]
    fn decode_rejects_garbage() {
        let key = ActionKey {
            kind: "AddLink".into(),
            data: "not ron at all ]]".into(),
        };
        assert!(matches!(
            decode(&key),
            Err(CodecError::Deserialize { .. })
        ));
    }

    #[test]
    fn nested_sub_actions_survive_round_trip() {
        let mut record = ActionRecord::compound("Grouped edit");
        record.push_sub_action(sample_record()).unwrap();
        record.push_sub_action(sample_record()).unwrap();

        let key = encode(&record).unwrap();
        let decoded = decode(&key).unwrap();
        assert_eq!(decoded.sub_actions.len(), 2);
        assert_eq!(decoded.sub_actions[0].kind, "AddLink");
    }
}
