use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub aggregation: AggregationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_chart_limit")]
    pub chart_limit: usize,
    #[serde(default = "default_combined_chart_limit")]
    pub combined_chart_limit: usize,
    #[serde(default = "default_hourly_window_hours")]
    pub hourly_window_hours: i64,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            chart_limit: default_chart_limit(),
            combined_chart_limit: default_combined_chart_limit(),
            hourly_window_hours: default_hourly_window_hours(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl DashboardSettings {
    /// Wall-clock offset used for chart labels and daily summary dates
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .with_context(|| format!("utc_offset_hours out of range: {}", self.utc_offset_hours))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregationSettings {
    #[serde(default = "default_partition_size")]
    pub partition_size: usize,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            partition_size: default_partition_size(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("data/readings.json")
}

fn default_chart_limit() -> usize {
    10
}

fn default_combined_chart_limit() -> usize {
    15
}

fn default_hourly_window_hours() -> i64 {
    24
}

// WIB
fn default_utc_offset_hours() -> i32 {
    7
}

fn default_partition_size() -> usize {
    256
}

/// Upper bound for `dashboard.hourly_window_hours` (one leap year)
pub const MAX_HOURLY_WINDOW_HOURS: i64 = 24 * 366;

/// Loads `config/monitor.*` (optional) overridden by `MILK__SECTION__KEY` variables
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(
            config::Environment::with_prefix("MILK")
                .separator("__")
                .try_parsing(true),
        );

    build_monitor_config(builder)
}

fn build_monitor_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<MonitorConfig> {
    let settings = builder.build()?;
    let config: MonitorConfig = settings.try_deserialize()?;

    if config.aggregation.partition_size == 0 {
        anyhow::bail!("aggregation.partition_size must be greater than zero");
    }
    let window = config.dashboard.hourly_window_hours;
    if !(1..=MAX_HOURLY_WINDOW_HOURS).contains(&window) {
        anyhow::bail!(
            "dashboard.hourly_window_hours must be between 1 and {}, got {}",
            MAX_HOURLY_WINDOW_HOURS,
            window
        );
    }
    config.dashboard.offset()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = build_monitor_config(config::Config::builder()).unwrap();

        assert_eq!(config.source.path, PathBuf::from("data/readings.json"));
        assert_eq!(config.dashboard.chart_limit, 10);
        assert_eq!(config.dashboard.combined_chart_limit, 15);
        assert_eq!(config.dashboard.hourly_window_hours, 24);
        assert_eq!(config.aggregation.partition_size, 256);
        assert_eq!(config.dashboard.offset().unwrap().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_overrides() {
        let builder = config::Config::builder()
            .set_override("dashboard.chart_limit", 5)
            .unwrap()
            .set_override("source.path", "/tmp/export.json")
            .unwrap();
        let config = build_monitor_config(builder).unwrap();

        assert_eq!(config.dashboard.chart_limit, 5);
        assert_eq!(config.dashboard.combined_chart_limit, 15);
        assert_eq!(config.source.path, PathBuf::from("/tmp/export.json"));
    }

    #[test]
    fn test_rejects_zero_partition_size() {
        let builder = config::Config::builder()
            .set_override("aggregation.partition_size", 0)
            .unwrap();

        assert!(build_monitor_config(builder).is_err());
    }

    #[test]
    fn test_rejects_invalid_window() {
        for window in [i64::MAX, MAX_HOURLY_WINDOW_HOURS + 1, 0, -5] {
            let builder = config::Config::builder()
                .set_override("dashboard.hourly_window_hours", window)
                .unwrap();

            assert!(build_monitor_config(builder).is_err(), "window={}", window);
        }

        let builder = config::Config::builder()
            .set_override("dashboard.hourly_window_hours", MAX_HOURLY_WINDOW_HOURS)
            .unwrap();
        assert_eq!(
            build_monitor_config(builder).unwrap().dashboard.hourly_window_hours,
            MAX_HOURLY_WINDOW_HOURS
        );
    }

    #[test]
    fn test_rejects_invalid_offset() {
        let builder = config::Config::builder()
            .set_override("dashboard.utc_offset_hours", 30)
            .unwrap();

        assert!(build_monitor_config(builder).is_err());
    }
}
