//! Consumer side of the extraction push.
//!
//! The transport is fire-and-forget: there is no delivery guarantee and no
//! backpressure, and every message is a full replacement, never a delta.
//! [`SnapshotChannel`] is the latest-value slot between the extraction loop
//! and its consumer; [`AdvisoryInbox`] holds what the advisory side
//! currently knows.

use std::sync::{Arc, Mutex, PoisonError};

use block_doctor_core::{AdvisoryMessage, BlockRecord, ExtractionSnapshot, Symptom};
use tracing::debug;

use crate::compose::advise;

/// Latest-known editor state on the advisory side.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryInbox {
    records: Vec<BlockRecord>,
    raw_text: String,
    accepted: u64,
}

impl AdvisoryInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one message, last write wins.
    ///
    /// A snapshot replaces records and raw text; the legacy raw-text message
    /// replaces raw text only and leaves records untouched.
    pub fn accept(&mut self, message: AdvisoryMessage) {
        match message {
            AdvisoryMessage::Snapshot(snapshot) => {
                self.records = snapshot.records;
                self.raw_text = snapshot.raw_text;
            }
            AdvisoryMessage::RawTextOnly { raw_text } => {
                self.raw_text = raw_text;
            }
        }
        self.accepted += 1;
        debug!(
            records = self.records.len(),
            accepted = self.accepted,
            "advisory inbox updated"
        );
    }

    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Number of messages accepted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Composed advice for `symptom` over the latest records.
    pub fn advise(&self, symptom: Option<Symptom>) -> Option<String> {
        advise(symptom, &self.records)
    }
}

/// Single-producer, best-effort latest-value slot.
///
/// `publish` overwrites whatever is pending; a consumer that reads slowly
/// only ever sees the newest snapshot. Clones share the slot.
///
/// # Examples
///
/// ```
/// use block_doctor_core::{BlockRecord, ExtractionSnapshot};
/// use block_doctor_diagnose::inbox::SnapshotChannel;
///
/// let channel = SnapshotChannel::new();
/// let consumer = channel.clone();
///
/// channel.publish(ExtractionSnapshot::empty());
/// channel.publish(ExtractionSnapshot {
///     records: vec![BlockRecord::new("motor_on")],
///     raw_text: String::new(),
/// });
///
/// let latest = consumer.take().unwrap();
/// assert_eq!(latest.records.len(), 1);
/// assert!(consumer.take().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotChannel {
    slot: Arc<Mutex<Option<ExtractionSnapshot>>>,
}

impl SnapshotChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any unread snapshot with `snapshot`.
    pub fn publish(&self, snapshot: ExtractionSnapshot) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("dropping unread snapshot");
        }
        *slot = Some(snapshot);
    }

    /// Takes the newest unread snapshot, if any.
    pub fn take(&self) -> Option<ExtractionSnapshot> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Moves the newest unread snapshot, if any, into `inbox`.
    ///
    /// Returns `true` when the inbox was updated.
    pub fn deliver(&self, inbox: &mut AdvisoryInbox) -> bool {
        match self.take() {
            Some(snapshot) => {
                inbox.accept(snapshot.into());
                true
            }
            None => false,
        }
    }
}
