// Age classification of the latest sample
use crate::application::clock::AlertIdSource;
use crate::domain::alert::{Alert, Severity};

#[derive(Debug, Clone, PartialEq)]
pub struct StalenessEvaluation {
    pub severity: Option<Severity>,
    pub alert: Option<Alert>,
}

/// Escalation is strict: an age exactly equal to `tolerance_ms` (or three
/// times it) does not escalate.
pub fn evaluate_staleness(
    timestamp: Option<i64>,
    now_ms: i64,
    tolerance_ms: i64,
    ids: &dyn AlertIdSource,
) -> StalenessEvaluation {
    let Some(timestamp) = timestamp else {
        return StalenessEvaluation {
            severity: Some(Severity::Critical),
            alert: Some(Alert::new(
                ids.next_id(),
                "No timestamp in latest sample".to_string(),
                Severity::Critical,
                now_ms,
            )),
        };
    };

    let age_ms = now_ms.saturating_sub(timestamp);
    let age_secs = (age_ms as f64 / 1000.0).round();

    let (severity, message) = if age_ms > tolerance_ms.saturating_mul(3) {
        (Severity::Critical, format!("Data stale for {}s", age_secs))
    } else if age_ms > tolerance_ms {
        (Severity::Warning, format!("Data delayed by {}s", age_secs))
    } else {
        return StalenessEvaluation {
            severity: None,
            alert: None,
        };
    };

    StalenessEvaluation {
        severity: Some(severity),
        alert: Some(Alert::new(ids.next_id(), message, severity, timestamp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::SequentialAlertIds;

    const NOW: i64 = 1_700_000_000_000;
    const TOLERANCE: i64 = 120_000;

    fn evaluate(timestamp: Option<i64>) -> StalenessEvaluation {
        evaluate_staleness(timestamp, NOW, TOLERANCE, &SequentialAlertIds::default())
    }

    #[test]
    fn test_fresh_sample_is_not_stale() {
        let fresh = evaluate(Some(NOW - 1_000));
        assert_eq!(fresh.severity, None);
        assert_eq!(fresh.alert, None);
    }

    #[test]
    fn test_tolerance_boundary() {
        assert_eq!(evaluate(Some(NOW - 120_000)).severity, None);
        assert_eq!(evaluate(Some(NOW - 120_001)).severity, Some(Severity::Warning));
        assert_eq!(evaluate(Some(NOW - 360_000)).severity, Some(Severity::Warning));
        assert_eq!(evaluate(Some(NOW - 360_001)).severity, Some(Severity::Critical));
    }

    #[test]
    fn test_stale_alerts_carry_sample_timestamp() {
        let delayed = evaluate(Some(NOW - 150_000)).alert.unwrap();
        assert_eq!(delayed.message, "Data delayed by 150s");
        assert_eq!(delayed.severity, Severity::Warning);
        assert_eq!(delayed.timestamp, NOW - 150_000);

        let stale = evaluate(Some(NOW - 400_400)).alert.unwrap();
        assert_eq!(stale.message, "Data stale for 400s");
        assert_eq!(stale.severity, Severity::Critical);
    }

    #[test]
    fn test_missing_timestamp_is_critical_at_now() {
        let missing = evaluate(None);
        assert_eq!(missing.severity, Some(Severity::Critical));
        let alert = missing.alert.unwrap();
        assert_eq!(alert.message, "No timestamp in latest sample");
        assert_eq!(alert.timestamp, NOW);
    }
}
