use serde::Serialize;
use tracing::debug;

pub const DEFAULT_CHART_TARGET: &str = "tv_chart";

/// Options handed to the embedded chart widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartConfig {
    pub symbol: String,
    pub interval: &'static str,
    pub timezone: &'static str,
    pub theme: &'static str,
    pub style: &'static str,
    pub locale: &'static str,
    pub toolbar_bg: &'static str,
    pub enable_publishing: bool,
    pub allow_symbol_change: bool,
    pub mount_target: String,
}

impl ChartConfig {
    /// Daily candles, UTC, light theme, symbol locked.
    pub fn daily(symbol: impl Into<String>, mount_target: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: "D",
            timezone: "Etc/UTC",
            theme: "light",
            style: "1",
            locale: "en",
            toolbar_bg: "#f1f3f6",
            enable_publishing: false,
            allow_symbol_change: false,
            mount_target: mount_target.into(),
        }
    }
}

/// The one mounted chart instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountedChart {
    /// Monotonic per slot; bumps on every mount.
    pub instance: u64,
    pub config: ChartConfig,
}

/// Owner of the chart mount target. At most one chart is live; mounting a
/// new one disposes the previous instance first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlot {
    mount_target: String,
    current: Option<MountedChart>,
    mounts: u64,
    disposals: u64,
}

impl ChartSlot {
    pub fn new(mount_target: impl Into<String>) -> Self {
        Self {
            mount_target: mount_target.into(),
            current: None,
            mounts: 0,
            disposals: 0,
        }
    }

    pub fn current(&self) -> Option<&MountedChart> {
        self.current.as_ref()
    }

    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    pub fn disposals(&self) -> u64 {
        self.disposals
    }

    pub fn replace(&mut self, symbol: &str) -> &MountedChart {
        self.dispose();
        self.mounts += 1;
        let config = ChartConfig::daily(symbol, self.mount_target.as_str());
        debug!(symbol, instance = self.mounts, "chart mounted");
        self.current.insert(MountedChart {
            instance: self.mounts,
            config,
        })
    }

    pub fn dispose(&mut self) {
        if let Some(chart) = self.current.take() {
            self.disposals += 1;
            debug!(instance = chart.instance, "chart disposed");
        }
    }
}

impl Default for ChartSlot {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_config_has_fixed_options() {
        let config = ChartConfig::daily("AAPL", "chart");
        assert_eq!(config.interval, "D");
        assert_eq!(config.timezone, "Etc/UTC");
        assert_eq!(config.theme, "light");
        assert_eq!(config.style, "1");
        assert_eq!(config.locale, "en");
        assert!(!config.allow_symbol_change);
        assert_eq!(config.mount_target, "chart");
    }

    #[test]
    fn replace_disposes_previous_instance() {
        let mut slot = ChartSlot::default();

        slot.replace("AAPL");
        let second = slot.replace("MSFT").clone();

        assert_eq!(second.instance, 2);
        assert_eq!(second.config.symbol, "MSFT");
        assert_eq!(slot.mounts(), 2);
        assert_eq!(slot.disposals(), 1);
    }

    #[test]
    fn dispose_on_empty_slot_is_noop() {
        let mut slot = ChartSlot::default();
        slot.dispose();
        assert_eq!(slot.disposals(), 0);
        assert!(slot.current().is_none());
    }
}
