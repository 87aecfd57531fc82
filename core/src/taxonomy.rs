//! Static bilingual advice text for each symptom.
//!
//! Native text is Simplified Chinese, foreign text is English. The table is
//! read-only and built at compile time.

use crate::Symptom;

/// Static bilingual text for one symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceBundle {
    pub label_native: &'static str,
    pub label_foreign: &'static str,
    pub tips_native: &'static str,
    pub tips_foreign: &'static str,
}

impl AdviceBundle {
    /// Returns `true` if the bundle carries generic tips.
    pub fn has_tips(&self) -> bool {
        !self.tips_native.is_empty() || !self.tips_foreign.is_empty()
    }
}

static MOTOR: AdviceBundle = AdviceBundle {
    label_native: "电机不转",
    label_foreign: "Motor not spinning",
    tips_native: "检查电机线是否插紧、端口是否与程序一致，电池电量是否充足；速度建议设置在70%以上。",
    tips_foreign: "Check that the motor cable is firmly plugged in, the port matches the program and the battery is charged; keep speed at 70% or higher.",
};

static DIRECTION: AdviceBundle = AdviceBundle {
    label_native: "方向不对",
    label_foreign: "Wrong direction",
    tips_native: "检查左右电机的方向设置，镜像安装的电机通常需要相反的方向值；确认左右端口没有接反。",
    tips_foreign: "Check the direction setting of the left and right motors; mirrored motors usually need opposite direction values. Make sure the left and right ports are not swapped.",
};

static NOT_STARTING: AdviceBundle = AdviceBundle {
    label_native: "程序不启动",
    label_foreign: "Program does not start",
    tips_native: "确认程序顶部有开始积木，所有积木都连接在开始积木下方，并且程序已成功下载到主控。",
    tips_foreign: "Make sure the program begins with a start block, every block is attached below it, and the program was downloaded to the controller.",
};

static STOP: AdviceBundle = AdviceBundle {
    label_native: "停不下来",
    label_foreign: "Robot will not stop",
    tips_native: "无限循环会一直运行，请在循环中加入条件判断或在结束时使用停止积木。",
    tips_foreign: "A forever loop never ends on its own; add a condition inside the loop or use a stop block when the task is done.",
};

static SENSOR: AdviceBundle = AdviceBundle {
    label_native: "传感器没反应",
    label_foreign: "Sensor not responding",
    tips_native: "检查传感器端口与程序是否一致，传感器与被测物体的距离是否合适，环境光线是否过强或过暗。",
    tips_foreign: "Check that the sensor port matches the program, the sensor is at a suitable distance from the target, and the ambient light is not too bright or too dark.",
};

static OTHER: AdviceBundle = AdviceBundle {
    label_native: "其他问题",
    label_foreign: "Other problem",
    tips_native: "",
    tips_foreign: "",
};

/// Returns the advice bundle for a symptom.
///
/// # Examples
///
/// ```
/// use block_doctor_core::{Symptom, advice_bundle};
///
/// let bundle = advice_bundle(Symptom::Motor);
/// assert_eq!(bundle.label_foreign, "Motor not spinning");
/// assert!(!advice_bundle(Symptom::Other).has_tips());
/// ```
pub fn advice_bundle(symptom: Symptom) -> &'static AdviceBundle {
    match symptom {
        Symptom::Motor => &MOTOR,
        Symptom::Direction => &DIRECTION,
        Symptom::NotStarting => &NOT_STARTING,
        Symptom::Stop => &STOP,
        Symptom::Sensor => &SENSOR,
        Symptom::Other => &OTHER,
    }
}

static PICKER_ENTRIES: [(Option<Symptom>, &str); 7] = [
    (None, "请选择问题 / Select a problem"),
    (Some(Symptom::Motor), "电机不转 / Motor not spinning"),
    (Some(Symptom::Direction), "方向不对 / Wrong direction"),
    (Some(Symptom::NotStarting), "程序不启动 / Program does not start"),
    (Some(Symptom::Stop), "停不下来 / Robot will not stop"),
    (Some(Symptom::Sensor), "传感器没反应 / Sensor not responding"),
    (Some(Symptom::Other), "其他问题（自由提问） / Other (ask a question)"),
];

/// Ordered `(symptom, label)` pairs for presenting choices to a user.
///
/// The first entry is the unselected sentinel.
pub fn picker_entries() -> &'static [(Option<Symptom>, &'static str)] {
    &PICKER_ENTRIES
}
