//! Core types for block-editor troubleshooting.
//!
//! This crate defines the UI-free data model shared by extraction and
//! diagnosis:
//!
//! - [`BlockRecord`]: one block's kind plus an open field map.
//! - [`ExtractionSnapshot`]: all records from one extraction cycle plus a
//!   raw text fallback.
//! - [`Symptom`]: the closed set of diagnosable malfunction categories.
//! - [`AdviceBundle`]: static bilingual labels and tips per symptom, looked
//!   up with [`advice_bundle`].
//! - [`AdvisoryMessage`], [`RemoteAdviceRequest`]: wire shapes for the
//!   transport and the remote-advice fallback.
//!
//! # Example
//!
//! ```
//! use block_doctor_core::*;
//!
//! let snapshot = ExtractionSnapshot {
//!     records: vec![
//!         BlockRecord::new("motor_on")
//!             .with_field("PORT", "A")
//!             .with_field("SPEED", 40),
//!     ],
//!     raw_text: String::new(),
//! };
//!
//! assert!(snapshot.records[0].kind_contains("motor"));
//! assert_eq!(advice_bundle(Symptom::Motor).label_native, "电机不转");
//! ```

mod message;
mod symptom;
mod taxonomy;
mod types;

pub use message::{AdvisoryMessage, RemoteAdviceRequest, RemoteAdviceResponse, SnapshotMessage};
pub use symptom::{ParseSymptomError, Symptom};
pub use taxonomy::{AdviceBundle, advice_bundle, picker_entries};
pub use types::*;
