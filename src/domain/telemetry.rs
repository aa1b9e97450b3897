// Raw telemetry domain models (untrusted input from the realtime feed)
use serde_json::{Map, Value};

/// One phase sub-record exactly as it arrived. Fields are kept as raw JSON
/// values and only interpreted by the sanitizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPhase {
    pub voltage: Value,
    pub frequency: Value,
    pub current: Value,
    pub power: Value,
    pub power_factor: Value,
}

impl RawPhase {
    /// A sub-record that is not an object behaves as absent.
    pub fn from_json(value: Option<&Value>) -> Option<Self> {
        let fields = value?.as_object()?;
        Some(Self {
            voltage: field(fields, "voltage"),
            frequency: field(fields, "frequency"),
            current: field(fields, "current"),
            power: field(fields, "power"),
            power_factor: field(fields, "powerFactor"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSample {
    pub timestamp: Value,
    pub phase1: Option<RawPhase>,
    pub phase2: Option<RawPhase>,
    pub phase3: Option<RawPhase>,
}

impl RawSample {
    /// Returns `None` for falsy or empty entries, which the pipeline drops.
    pub fn from_json(value: &Value) -> Option<Self> {
        let fields = value.as_object().filter(|fields| !fields.is_empty())?;
        Some(Self {
            timestamp: field(fields, "timestamp"),
            phase1: RawPhase::from_json(fields.get("phase1")),
            phase2: RawPhase::from_json(fields.get("phase2")),
            phase3: RawPhase::from_json(fields.get("phase3")),
        })
    }

    pub fn phases(&self) -> [Option<&RawPhase>; 3] {
        [self.phase1.as_ref(), self.phase2.as_ref(), self.phase3.as_ref()]
    }
}

/// A batch of samples keyed by opaque identifiers, in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBatch {
    pub samples: Vec<(String, RawSample)>,
}

impl RawBatch {
    /// Parse the payload delivered by the feed. `null` (or any scalar) means
    /// "no data yet" and yields `None`. Arrays are keyed by index.
    pub fn from_json(value: &Value) -> Option<Self> {
        let samples = match value {
            Value::Object(entries) => entries
                .iter()
                .filter_map(|(key, entry)| RawSample::from_json(entry).map(|s| (key.clone(), s)))
                .collect(),
            Value::Array(entries) => entries
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| RawSample::from_json(entry).map(|s| (idx.to_string(), s)))
                .collect(),
            _ => return None,
        };
        Some(Self { samples })
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn field(fields: &Map<String, Value>, name: &str) -> Value {
    fields.get(name).cloned().unwrap_or(Value::Null)
}
