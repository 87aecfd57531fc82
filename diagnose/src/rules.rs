//! Diagnostic rule engine.
//!
//! Each [`Symptom`] maps to one rule function through [`rule_for`]. A rule
//! inspects the latest block records and returns a bilingual advice
//! fragment, possibly empty. Rules never fail: a missing block or field is
//! reported as advice, not as an error.
//!
//! Kind matching is case-insensitive substring containment against the
//! fixed keywords below. The keywords over- and under-match some block
//! kinds (`motor_stop` is both a motor and a stop block); they stay literal.

use block_doctor_core::{BlockRecord, FieldValue, Symptom};

/// Speeds below this percentage trigger the low-speed warning.
pub const LOW_SPEED_THRESHOLD: f64 = 70.0;

pub const MOTOR_KEYWORD: &str = "motor";
pub const SENSOR_KEYWORD: &str = "sensor";
pub const FOREVER_KEYWORD: &str = "forever";
pub const STOP_KEYWORD: &str = "stop";
pub const START_KEYWORD: &str = "start";

pub const MOTOR_ID_FIELD: &str = "MOTOR";
pub const PORT_FIELD: &str = "PORT";
pub const SPEED_FIELD: &str = "SPEED";
pub const DIRECTION_FIELD: &str = "DIRECTION";
pub const COLOR_FIELD: &str = "COLOR";
pub const VALUE_FIELD: &str = "VALUE";

pub const NO_MOTOR_BLOCKS: &str = "未检测到电机积木 (No motor blocks detected)";
pub const NO_START_BLOCK: &str =
    "未检测到开始积木，程序可能不会运行 (No start block detected, the program may never run)";
pub const UNTERMINATED_LOOP: &str = "检测到无限循环但没有停止积木，程序不会自行结束 (Found a forever loop but no stop block, the program will not end on its own)";
pub const NO_SENSOR_BLOCKS: &str = "未找到传感器积木 (No sensor blocks found)";
pub const LOW_SPEED_WARNING: &str =
    "速度偏低，建议不低于70% (speed is low, 70% or higher is recommended)";
pub const MISSING_PORT_WARNING: &str = "未设置电机端口 (motor port not set)";
pub const UNSET: &str = "未设置/unset";

/// A rule turns the current records into an advice fragment.
pub type RuleFn = fn(&[BlockRecord]) -> String;

/// Returns the rule that handles `symptom`.
pub fn rule_for(symptom: Symptom) -> RuleFn {
    match symptom {
        Symptom::Motor => motor_rule,
        Symptom::Direction => direction_rule,
        Symptom::NotStarting => not_starting_rule,
        Symptom::Stop => stop_rule,
        Symptom::Sensor => sensor_rule,
        Symptom::Other => other_rule,
    }
}

/// Evaluates the rule for `symptom` over `records`.
///
/// # Examples
///
/// ```
/// use block_doctor_core::{BlockRecord, Symptom};
/// use block_doctor_diagnose::rules::{NO_MOTOR_BLOCKS, evaluate};
///
/// let records = vec![BlockRecord::new("event_start")];
/// assert_eq!(evaluate(Symptom::Motor, &records), NO_MOTOR_BLOCKS);
/// assert_eq!(evaluate(Symptom::NotStarting, &records), "");
/// ```
pub fn evaluate(symptom: Symptom, records: &[BlockRecord]) -> String {
    rule_for(symptom)(records)
}

fn matching<'a>(records: &'a [BlockRecord], keyword: &str) -> Vec<&'a BlockRecord> {
    records.iter().filter(|r| r.kind_contains(keyword)).collect()
}

fn motor_rule(records: &[BlockRecord]) -> String {
    let motors = matching(records, MOTOR_KEYWORD);
    if motors.is_empty() {
        return NO_MOTOR_BLOCKS.to_string();
    }
    motors
        .into_iter()
        .map(motor_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn motor_line(record: &BlockRecord) -> String {
    let identifier = record
        .field(MOTOR_ID_FIELD)
        .or_else(|| record.field(PORT_FIELD));
    let speed = record.field(SPEED_FIELD);

    let port_text = identifier.map_or_else(|| UNSET.to_string(), ToString::to_string);
    let speed_text = speed.map_or_else(|| UNSET.to_string(), |s| format!("{s}%"));
    let mut line = format!("{}: 端口/port {port_text}, 速度/speed {speed_text}", record.kind);

    if speed
        .and_then(FieldValue::as_number)
        .is_some_and(|s| s < LOW_SPEED_THRESHOLD)
    {
        line.push_str(" ⚠ ");
        line.push_str(LOW_SPEED_WARNING);
    }
    if identifier.is_none() {
        line.push_str(" ⚠ ");
        line.push_str(MISSING_PORT_WARNING);
    }
    line
}

fn direction_rule(records: &[BlockRecord]) -> String {
    let motors = matching(records, MOTOR_KEYWORD);
    let [first, second, ..] = motors.as_slice() else {
        return String::new();
    };
    match (first.field(DIRECTION_FIELD), second.field(DIRECTION_FIELD)) {
        (Some(a), Some(b)) if a != b => format!(
            "⚠ 前两个电机方向相反（{a} / {b}），可能导致原地打转 (The first two motors run in opposite directions ({a} / {b}), which may make the robot spin in place)"
        ),
        _ => String::new(),
    }
}

fn not_starting_rule(records: &[BlockRecord]) -> String {
    if records.iter().any(|r| r.kind_contains(START_KEYWORD)) {
        String::new()
    } else {
        NO_START_BLOCK.to_string()
    }
}

fn stop_rule(records: &[BlockRecord]) -> String {
    let has_forever = records.iter().any(|r| r.kind_contains(FOREVER_KEYWORD));
    let has_stop = records.iter().any(|r| r.kind_contains(STOP_KEYWORD));
    if has_forever && !has_stop {
        format!("⚠ {UNTERMINATED_LOOP}")
    } else {
        String::new()
    }
}

fn sensor_rule(records: &[BlockRecord]) -> String {
    let sensors = matching(records, SENSOR_KEYWORD);
    if sensors.is_empty() {
        return NO_SENSOR_BLOCKS.to_string();
    }
    sensors
        .into_iter()
        .map(|record| {
            let mut line = record.kind.clone();
            if let Some(color) = record.field(COLOR_FIELD) {
                line.push_str(&format!(" 颜色/color {color}"));
            }
            if let Some(value) = record.field(VALUE_FIELD) {
                line.push_str(&format!(" 数值/value {value}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Free-text questions go to remote advice instead.
fn other_rule(_records: &[BlockRecord]) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor(port: &str, speed: i32) -> BlockRecord {
        BlockRecord::new("motor_on")
            .with_field("PORT", port)
            .with_field("SPEED", speed)
    }

    #[test]
    fn test_motor_without_motor_blocks_is_exact_fragment() {
        let records = vec![
            BlockRecord::new("event_start"),
            BlockRecord::new("sensor_color").with_field("PORT", "1"),
        ];
        assert_eq!(evaluate(Symptom::Motor, &records), NO_MOTOR_BLOCKS);
        assert_eq!(evaluate(Symptom::Motor, &[]), NO_MOTOR_BLOCKS);
    }

    #[test]
    fn test_motor_reports_port_and_speed() {
        let fragment = evaluate(Symptom::Motor, &[motor("A", 40)]);
        assert_eq!(
            fragment,
            format!("motor_on: 端口/port A, 速度/speed 40% ⚠ {LOW_SPEED_WARNING}")
        );
    }

    #[test]
    fn test_low_speed_warning_respects_threshold() {
        assert!(evaluate(Symptom::Motor, &[motor("A", 50)]).contains(LOW_SPEED_WARNING));
        assert!(!evaluate(Symptom::Motor, &[motor("A", 80)]).contains(LOW_SPEED_WARNING));
        assert!(!evaluate(Symptom::Motor, &[motor("A", 70)]).contains(LOW_SPEED_WARNING));
    }

    #[test]
    fn test_textual_speed_counts_as_numeric() {
        let record = BlockRecord::new("motor_run").with_field("PORT", "B").with_field("SPEED", "35");
        assert!(evaluate(Symptom::Motor, &[record]).contains(LOW_SPEED_WARNING));

        let record = BlockRecord::new("motor_run").with_field("PORT", "B").with_field("SPEED", "fast");
        assert!(!evaluate(Symptom::Motor, &[record]).contains(LOW_SPEED_WARNING));
    }

    #[test]
    fn test_motor_missing_port_and_speed() {
        let fragment = evaluate(Symptom::Motor, &[BlockRecord::new("Motor_Stop")]);
        assert_eq!(
            fragment,
            format!("Motor_Stop: 端口/port {UNSET}, 速度/speed {UNSET} ⚠ {MISSING_PORT_WARNING}")
        );
    }

    #[test]
    fn test_motor_identifier_field_counts_as_port() {
        let record = BlockRecord::new("motor_on").with_field("MOTOR", "left").with_field("SPEED", 90);
        let fragment = evaluate(Symptom::Motor, &[record]);
        assert_eq!(fragment, "motor_on: 端口/port left, 速度/speed 90%");
    }

    #[test]
    fn test_motor_emits_one_line_per_block() {
        let fragment = evaluate(Symptom::Motor, &[motor("A", 90), motor("B", 100)]);
        assert_eq!(fragment.lines().count(), 2);
        assert!(fragment.lines().nth(1).unwrap().contains("port B"));
    }

    #[test]
    fn test_direction_warns_on_opposing_motors() {
        let records = vec![
            motor("A", 80).with_field("DIRECTION", "left"),
            motor("B", 80).with_field("DIRECTION", "right"),
        ];
        let fragment = evaluate(Symptom::Direction, &records);
        assert!(fragment.contains("left / right"));
        assert!(fragment.contains("spin in place"));
    }

    #[test]
    fn test_direction_is_empty_for_matching_or_missing_directions() {
        let same = vec![
            motor("A", 80).with_field("DIRECTION", "forward"),
            motor("B", 80).with_field("DIRECTION", "forward"),
        ];
        assert_eq!(evaluate(Symptom::Direction, &same), "");

        let missing = vec![motor("A", 80).with_field("DIRECTION", "forward"), motor("B", 80)];
        assert_eq!(evaluate(Symptom::Direction, &missing), "");

        let single = vec![motor("A", 80).with_field("DIRECTION", "forward")];
        assert_eq!(evaluate(Symptom::Direction, &single), "");
    }

    #[test]
    fn test_direction_only_compares_first_two_motors() {
        let records = vec![
            motor("A", 80).with_field("DIRECTION", "forward"),
            BlockRecord::new("event_start"),
            motor("B", 80).with_field("DIRECTION", "forward"),
            motor("C", 80).with_field("DIRECTION", "backward"),
        ];
        assert_eq!(evaluate(Symptom::Direction, &records), "");
    }

    #[test]
    fn test_not_starting_requires_start_kind() {
        assert_eq!(
            evaluate(Symptom::NotStarting, &[BlockRecord::new("motor_on")]),
            NO_START_BLOCK
        );
        assert_eq!(
            evaluate(Symptom::NotStarting, &[BlockRecord::new("When_Program_STARTS")]),
            ""
        );
    }

    #[test]
    fn test_stop_flags_forever_without_stop() {
        let mut records = vec![BlockRecord::new("control_forever"), motor("A", 80)];
        assert!(evaluate(Symptom::Stop, &records).contains(UNTERMINATED_LOOP));

        records.push(BlockRecord::new("control_stop_all"));
        assert_eq!(evaluate(Symptom::Stop, &records), "");

        assert_eq!(evaluate(Symptom::Stop, &[motor("A", 80)]), "");
    }

    #[test]
    fn test_sensor_lines_include_optional_fields() {
        let records = vec![
            BlockRecord::new("sensor_color").with_field("COLOR", "red"),
            BlockRecord::new("sensor_distance").with_field("VALUE", 12),
            BlockRecord::new("sensor_touch"),
        ];
        let fragment = evaluate(Symptom::Sensor, &records);
        let lines: Vec<_> = fragment.lines().collect();
        assert_eq!(
            lines,
            [
                "sensor_color 颜色/color red",
                "sensor_distance 数值/value 12",
                "sensor_touch"
            ]
        );
    }

    #[test]
    fn test_sensor_without_sensor_blocks() {
        assert_eq!(evaluate(Symptom::Sensor, &[motor("A", 80)]), NO_SENSOR_BLOCKS);
    }

    #[test]
    fn test_other_never_produces_fragment() {
        assert_eq!(evaluate(Symptom::Other, &[motor("A", 10)]), "");
    }
}
