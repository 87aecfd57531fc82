//! Remote-advice fallback seam.
//!
//! Used when the built-in rules are not enough: the `other` symptom or a
//! free-text question. The call itself is made by a host-provided
//! [`RemoteAdvisor`]; this module only builds the request and guarantees a
//! displayable answer.

use block_doctor_core::{RemoteAdviceRequest, RemoteAdviceResponse, Symptom};
use tracing::warn;

use crate::error::{DoctorError, Result};
use crate::inbox::AdvisoryInbox;

/// Shown whenever remote advice cannot be obtained.
pub const REMOTE_FALLBACK_MESSAGE: &str =
    "暂时无法获取建议，请稍后重试。 (Advice is unavailable right now, please try again later.)";

/// Executes the remote-advice call.
pub trait RemoteAdvisor {
    fn advise(&self, request: &RemoteAdviceRequest) -> Result<RemoteAdviceResponse>;
}

/// Builds a request from the inbox's latest state.
pub fn build_request(
    inbox: &AdvisoryInbox,
    symptom: Option<Symptom>,
    free_text: &str,
) -> RemoteAdviceRequest {
    RemoteAdviceRequest {
        summary: free_text.trim().to_string(),
        picked_symptom: symptom,
        block_text: inbox.raw_text().to_string(),
        blocks: inbox.records().to_vec(),
    }
}

/// Asks the remote advisor, substituting [`REMOTE_FALLBACK_MESSAGE`] on
/// failure or empty advice.
pub fn request_remote_advice(
    advisor: &dyn RemoteAdvisor,
    inbox: &AdvisoryInbox,
    symptom: Option<Symptom>,
    free_text: &str,
) -> String {
    let request = build_request(inbox, symptom, free_text);
    let outcome = advisor.advise(&request).and_then(|response| {
        let advice = response.advice.trim();
        if advice.is_empty() {
            Err(DoctorError::RemoteAdvice("empty advice".to_string()))
        } else {
            Ok(advice.to_string())
        }
    });
    match outcome {
        Ok(advice) => advice,
        Err(err) => {
            warn!(error = %err, "remote advice unavailable; using fallback");
            REMOTE_FALLBACK_MESSAGE.to_string()
        }
    }
}
