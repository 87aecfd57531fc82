//! Wire messages exchanged with the collaborators around the core.
//!
//! - [`AdvisoryMessage`]: pushed from the editor context to the advisory
//!   context roughly every three seconds.
//! - [`RemoteAdviceRequest`] / [`RemoteAdviceResponse`]: body of the
//!   remote-advice fallback call.

use serde::{Deserialize, Serialize};

use crate::{BlockRecord, ExtractionSnapshot, Symptom};

/// A push from the extraction side.
///
/// Either a full snapshot or the legacy raw-text-only message. The two are
/// accepted independently and carry no ordering relative to each other.
///
/// # Examples
///
/// ```
/// use block_doctor_core::AdvisoryMessage;
///
/// let full: AdvisoryMessage =
///     serde_json::from_str(r#"{"records":[{"kind":"motor_on"}],"rawText":"go"}"#).unwrap();
/// assert!(matches!(full, AdvisoryMessage::Snapshot(_)));
///
/// let legacy: AdvisoryMessage = serde_json::from_str(r#"{"rawText":"go"}"#).unwrap();
/// assert!(matches!(legacy, AdvisoryMessage::RawTextOnly { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdvisoryMessage {
    Snapshot(SnapshotMessage),
    RawTextOnly {
        #[serde(rename = "rawText")]
        raw_text: String,
    },
}

/// Full snapshot payload; `records` is required so the legacy shape does
/// not match it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub records: Vec<BlockRecord>,
    #[serde(default, rename = "rawText")]
    pub raw_text: String,
}

impl From<ExtractionSnapshot> for AdvisoryMessage {
    fn from(snapshot: ExtractionSnapshot) -> Self {
        Self::Snapshot(SnapshotMessage {
            records: snapshot.records,
            raw_text: snapshot.raw_text,
        })
    }
}

impl From<SnapshotMessage> for ExtractionSnapshot {
    fn from(message: SnapshotMessage) -> Self {
        Self {
            records: message.records,
            raw_text: message.raw_text,
        }
    }
}

/// Request body for the remote-advice fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAdviceRequest {
    /// Free-text description of the problem from the user.
    pub summary: String,
    pub picked_symptom: Option<Symptom>,
    /// Raw text rendering of the editor surface.
    pub block_text: String,
    pub blocks: Vec<BlockRecord>,
}

/// Successful response of the remote-advice fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAdviceResponse {
    pub advice: String,
}
