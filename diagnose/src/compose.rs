//! Advice composition.
//!
//! Merges a symptom's static bundle with the rule fragment into one
//! bilingual, presentation-only string. The native section keeps the
//! fragment's line structure; the foreign section renders it on one line.

use std::sync::LazyLock;

use block_doctor_core::{AdviceBundle, BlockRecord, Symptom, advice_bundle};
use regex::Regex;

use crate::rules::evaluate;

pub const NATIVE_DETECTED_MARKER: &str = "从代码检测到：";
pub const FOREIGN_DETECTED_MARKER: &str = "Detected from code:";
pub const SECTION_SEPARATOR: &str = "----------------";

/// Collapses every run of line breaks into a single space.
pub fn single_line(text: &str) -> String {
    static LINE_BREAKS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\r\n]+").expect("static regex must compile"));
    LINE_BREAKS_RE.replace_all(text, " ").into_owned()
}

/// Assembles the final advice text.
///
/// Tip lines are left out when the bundle has no tips, which is the case
/// for [`Symptom::Other`].
///
/// # Examples
///
/// ```
/// use block_doctor_core::{Symptom, advice_bundle};
/// use block_doctor_diagnose::compose::compose;
///
/// let bundle = advice_bundle(Symptom::Stop);
/// let advice = compose(Symptom::Stop, "line one\nline two", bundle);
/// assert!(advice.starts_with("【停不下来】"));
/// assert!(advice.contains("line one line two"));
/// ```
pub fn compose(symptom: Symptom, fragment: &str, bundle: &AdviceBundle) -> String {
    tracing::trace!(%symptom, fragment_len = fragment.len(), "composing advice");
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("【{}】", bundle.label_native));
    if !fragment.is_empty() {
        lines.push(NATIVE_DETECTED_MARKER.to_string());
        lines.push(fragment.to_string());
    }
    if !bundle.tips_native.is_empty() {
        lines.push(bundle.tips_native.to_string());
    }

    lines.push(String::new());
    lines.push(SECTION_SEPARATOR.to_string());

    lines.push(format!("[{}]", bundle.label_foreign));
    if !fragment.is_empty() {
        lines.push(FOREIGN_DETECTED_MARKER.to_string());
        lines.push(single_line(fragment));
    }
    if !bundle.tips_foreign.is_empty() {
        lines.push(bundle.tips_foreign.to_string());
    }

    lines.join("\n")
}

/// Runs the rule for the selected symptom and composes the advice.
///
/// Returns `None` when no symptom is selected.
pub fn advise(symptom: Option<Symptom>, records: &[BlockRecord]) -> Option<String> {
    let symptom = symptom?;
    let fragment = evaluate(symptom, records);
    Some(compose(symptom, &fragment, advice_bundle(symptom)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foreign_section(advice: &str) -> &str {
        advice
            .split_once(SECTION_SEPARATOR)
            .map(|(_, foreign)| foreign)
            .unwrap()
    }

    #[test]
    fn test_compose_layout_with_fragment() {
        let bundle = advice_bundle(Symptom::Sensor);
        let advice = compose(Symptom::Sensor, "a\nb", bundle);
        let expected = [
            "【传感器没反应】".to_string(),
            NATIVE_DETECTED_MARKER.to_string(),
            "a".to_string(),
            "b".to_string(),
            bundle.tips_native.to_string(),
            String::new(),
            SECTION_SEPARATOR.to_string(),
            "[Sensor not responding]".to_string(),
            FOREIGN_DETECTED_MARKER.to_string(),
            "a b".to_string(),
            bundle.tips_foreign.to_string(),
        ]
        .join("\n");
        assert_eq!(advice, expected);
    }

    #[test]
    fn test_compose_omits_markers_for_empty_fragment() {
        let advice = compose(Symptom::Direction, "", advice_bundle(Symptom::Direction));
        assert!(!advice.contains(NATIVE_DETECTED_MARKER));
        assert!(!advice.contains(FOREIGN_DETECTED_MARKER));
        assert!(advice.contains(advice_bundle(Symptom::Direction).tips_foreign));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let bundle = advice_bundle(Symptom::Motor);
        let first = compose(Symptom::Motor, "x\r\ny\n\nz", bundle);
        let second = compose(Symptom::Motor, "x\r\ny\n\nz", bundle);
        assert_eq!(first, second);
    }

    #[test]
    fn test_foreign_fragment_has_no_line_breaks() {
        let fragment = "motor_on: port A\nmotor_on: port B\r\nmotor_on: port C";
        let advice = compose(Symptom::Motor, fragment, advice_bundle(Symptom::Motor));
        assert!(advice.contains(fragment));
        let foreign = foreign_section(&advice);
        assert!(foreign.contains("motor_on: port A motor_on: port B motor_on: port C"));
        let fragment_line = foreign
            .lines()
            .find(|line| line.contains("port A"))
            .unwrap();
        assert!(fragment_line.contains("port C"));
    }

    #[test]
    fn test_other_has_labels_only() {
        let advice = compose(Symptom::Other, "", advice_bundle(Symptom::Other));
        assert_eq!(
            advice,
            format!("【其他问题】\n\n{SECTION_SEPARATOR}\n[Other problem]")
        );
    }

    #[test]
    fn test_advise_requires_a_selection() {
        assert_eq!(advise(None, &[BlockRecord::new("motor_on")]), None);
        let advice = advise(Some(Symptom::NotStarting), &[]).unwrap();
        assert!(advice.contains(crate::rules::NO_START_BLOCK));
    }
}
