use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("sparkline_points must be at least 1")]
    EmptyWindow,
    #[error("{0} must be a finite number greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub nominal_voltage: f64,
    /// Capacity in kVA the load percentage is measured against.
    pub max_apparent_power_kw: f64,
    pub stale_data_tolerance_ms: i64,
    /// Display window size.
    pub sparkline_points: usize,
    /// Upper clamp for the load percentage.
    pub max_load_percentage: f64,
    pub thresholds: Thresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            nominal_voltage: 230.0,
            max_apparent_power_kw: 15.0,
            stale_data_tolerance_ms: 120_000,
            sparkline_points: 30,
            max_load_percentage: 999.0,
            thresholds: Thresholds::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Thresholds {
    pub voltage: VoltageThresholds,
    pub frequency: FrequencyThresholds,
    pub power_factor: PowerFactorThresholds,
    pub load: LoadThresholds,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct VoltageThresholds {
    pub warning_low: f64,
    pub critical_low: f64,
    pub warning_high: f64,
    pub critical_high: f64,
}

impl Default for VoltageThresholds {
    fn default() -> Self {
        Self {
            warning_low: 190.0,
            critical_low: 190.0,
            warning_high: 290.0,
            critical_high: 460.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FrequencyThresholds {
    pub warning_min: f64,
    pub warning_max: f64,
    pub critical_min: f64,
    pub critical_max: f64,
}

impl Default for FrequencyThresholds {
    fn default() -> Self {
        Self {
            warning_min: 48.5,
            warning_max: 55.5,
            critical_min: 47.5,
            critical_max: 55.5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PowerFactorThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for PowerFactorThresholds {
    fn default() -> Self {
        Self {
            warning: 0.85,
            critical: 0.75,
        }
    }
}

/// Load thresholds in percent of capacity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoadThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self {
            warning: 80.0,
            critical: 95.0,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sparkline_points == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.stale_data_tolerance_ms <= 0 {
            return Err(ConfigError::NotPositive("stale_data_tolerance_ms"));
        }

        for (name, value) in [
            ("max_apparent_power_kw", self.max_apparent_power_kw),
            ("max_load_percentage", self.max_load_percentage),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive(name));
            }
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("nominal_voltage", self.nominal_voltage),
            ("thresholds.voltage.warning_low", t.voltage.warning_low),
            ("thresholds.voltage.critical_low", t.voltage.critical_low),
            ("thresholds.voltage.warning_high", t.voltage.warning_high),
            ("thresholds.voltage.critical_high", t.voltage.critical_high),
            ("thresholds.frequency.warning_min", t.frequency.warning_min),
            ("thresholds.frequency.warning_max", t.frequency.warning_max),
            ("thresholds.frequency.critical_min", t.frequency.critical_min),
            ("thresholds.frequency.critical_max", t.frequency.critical_max),
            ("thresholds.power_factor.warning", t.power_factor.warning),
            ("thresholds.power_factor.critical", t.power_factor.critical),
            ("thresholds.load.warning", t.load.warning),
            ("thresholds.load.critical", t.load.critical),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Load `config/dashboard.*` (optional) with `DASHBOARD_` environment
/// overrides, e.g. `DASHBOARD_THRESHOLDS__VOLTAGE__WARNING_LOW=200`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    dashboard_config_from(environment("DASHBOARD"))
}

fn dashboard_config_from(overrides: config::Environment) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(overrides)
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(environment("SERVER"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn environment(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert_eq!(config.nominal_voltage, 230.0);
        assert_eq!(config.sparkline_points, 30);
        assert_eq!(config.thresholds.frequency.critical_min, 47.5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = from_toml(
            r#"
            nominal_voltage = 240.0

            [thresholds.voltage]
            warning_low = 210.0
            "#,
        );
        assert_eq!(config.nominal_voltage, 240.0);
        assert_eq!(config.thresholds.voltage.warning_low, 210.0);
        assert_eq!(config.thresholds.voltage.critical_low, 190.0);
        assert_eq!(config.thresholds.load, LoadThresholds::default());
    }

    fn dashboard_env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment("DASHBOARD").source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let config = dashboard_config_from(dashboard_env(&[
            ("DASHBOARD_THRESHOLDS__POWER_FACTOR__WARNING", "0.9"),
            ("DASHBOARD_SPARKLINE_POINTS", "12"),
            ("DASHBOARD_MAX_APPARENT_POWER_KW", "20"),
            ("UNRELATED_SPARKLINE_POINTS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.thresholds.power_factor.warning, 0.9);
        assert_eq!(config.thresholds.power_factor.critical, 0.75);
        assert_eq!(config.sparkline_points, 12);
        assert_eq!(config.max_apparent_power_kw, 20.0);
    }

    #[test]
    fn test_loader_validates_overrides() {
        let err = dashboard_config_from(dashboard_env(&[("DASHBOARD_SPARKLINE_POINTS", "0")]))
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::EmptyWindow));
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let mut config = DashboardConfig::default();
        config.sparkline_points = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyWindow));

        let mut config = DashboardConfig::default();
        config.max_apparent_power_kw = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("max_apparent_power_kw"))
        );

        let mut config = DashboardConfig::default();
        config.thresholds.power_factor.warning = f64::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite("thresholds.power_factor.warning"))
        );
    }
}
