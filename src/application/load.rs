// Classification of aggregate power against capacity
use crate::domain::phase::Status;
use crate::infrastructure::config::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadEvaluation {
    pub percentage: Option<f64>,
    pub severity: Status,
}

pub fn evaluate_load(total_power_kw: Option<f64>, config: &DashboardConfig) -> LoadEvaluation {
    let Some(power_kw) = total_power_kw else {
        return LoadEvaluation {
            percentage: None,
            severity: Status::Pending,
        };
    };

    let percentage = (power_kw / config.max_apparent_power_kw * 100.0)
        .max(0.0)
        .min(config.max_load_percentage);
    let limits = &config.thresholds.load;
    let severity = if percentage >= limits.critical {
        Status::Critical
    } else if percentage >= limits.warning {
        Status::Warning
    } else {
        Status::Normal
    };

    LoadEvaluation {
        percentage: Some(percentage),
        severity,
    }
}
