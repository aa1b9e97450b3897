// System-backed implementations of the clock and alert id ports
use crate::application::clock::{AlertIdSource, Clock};
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAlertIds;

impl AlertIdSource for UuidAlertIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
