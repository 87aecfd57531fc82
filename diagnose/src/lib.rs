//! Block editor extraction and troubleshooting advice.
//!
//! This crate turns a live block editor workspace into
//! [`BlockRecord`](block_doctor_core::BlockRecord)s and diagnoses them
//! against a fixed rule set, producing bilingual advice text.
//!
//! # Main entry points
//!
//! - [`extractor::extract_snapshot`]: one extraction cycle over any host
//!   that implements the editor capability traits.
//! - [`editor_json::EditorDump`]: adapter for editor graphs captured as JSON.
//! - [`rules::evaluate`]: run the rule for one symptom.
//! - [`compose::compose`] / [`compose::advise`]: assemble the final advice.
//! - [`inbox::AdvisoryInbox`]: last-write-wins state on the advisory side.
//! - [`remote::request_remote_advice`]: free-text fallback with a
//!   guaranteed displayable answer.
//!
//! # Example
//!
//! ```
//! use block_doctor_core::Symptom;
//! use block_doctor_diagnose::compose::advise;
//! use block_doctor_diagnose::editor_json::EditorDump;
//!
//! let dump = EditorDump::parse(r#"{
//!     "workspace": { "blocks": [
//!         { "type": "motor_on",
//!           "inputList": [{ "fieldRow": [
//!               { "name": "PORT", "value": "A" },
//!               { "name": "SPEED", "value": 40 }
//!           ]}]
//!         }
//!     ]}
//! }"#).unwrap();
//!
//! let snapshot = dump.extract(&[]);
//! let advice = advise(Some(Symptom::Motor), &snapshot.records).unwrap();
//! assert!(advice.contains("port A"));
//! assert!(advice.contains("speed 40%"));
//! ```

pub mod compose;
pub mod config;
pub mod editor_json;
pub mod error;
pub mod extractor;
pub mod inbox;
pub mod output;
pub mod remote;
pub mod rules;

pub use error::{DoctorError, Result};
