use std::env;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

pub const ENV_CURRENCY: &str = "STALLBOOK_CURRENCY";
pub const ENV_PEAK_HOURS: &str = "STALLBOOK_PEAK_HOURS";
pub const ENV_RISING_WINDOW_DAYS: &str = "STALLBOOK_RISING_WINDOW_DAYS";
pub const ENV_SAME_DAY: &str = "STALLBOOK_SAME_DAY";

pub const DEFAULT_CURRENCY: &str = "₹";
pub const DEFAULT_PEAK_HOURS: [&str; 2] = ["12:00-14:00", "19:00-21:00"];
pub const DEFAULT_RISING_WINDOW_DAYS: u32 = 7;

/// What happens when sales are recorded for a date that already has an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameDayPolicy {
    /// Keep every recording; the newest one is the day's figure.
    #[default]
    Append,
    /// Drop earlier recordings for the date.
    Replace,
}

impl FromStr for SameDayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(SameDayPolicy::Append),
            "replace" => Ok(SameDayPolicy::Replace),
            other => Err(format!("unknown same-day policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerConfig {
    pub currency_symbol: String,
    /// Descriptive labels attached to sales entries and insights.
    pub peak_hours: Vec<String>,
    /// Length of each window compared by the rising-cost insight. At least 1.
    pub rising_cost_window_days: u32,
    pub same_day: SameDayPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            peak_hours: DEFAULT_PEAK_HOURS.iter().map(|hours| hours.to_string()).collect(),
            rising_cost_window_days: DEFAULT_RISING_WINDOW_DAYS,
            same_day: SameDayPolicy::default(),
        }
    }
}

impl LedgerConfig {
    pub fn from_env() -> LedgerConfig {
        LedgerConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, keeping the default for anything unset
    /// or malformed.
    pub fn from_lookup<F>(lookup: F) -> LedgerConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LedgerConfig::default();

        if let Some(symbol) = lookup(ENV_CURRENCY) {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                warn!("{} is empty, using '{}'", ENV_CURRENCY, config.currency_symbol);
            } else {
                config.currency_symbol = symbol.to_string();
            }
        }

        if let Some(hours) = lookup(ENV_PEAK_HOURS) {
            let hours: Vec<String> = hours
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect();
            if hours.is_empty() {
                warn!("{} has no labels, keeping defaults", ENV_PEAK_HOURS);
            } else {
                config.peak_hours = hours;
            }
        }

        if let Some(days) = lookup(ENV_RISING_WINDOW_DAYS) {
            match days.trim().parse::<u32>() {
                Ok(days) if days > 0 => config.rising_cost_window_days = days,
                _ => warn!(
                    "invalid {}='{}', using {}",
                    ENV_RISING_WINDOW_DAYS, days, config.rising_cost_window_days
                ),
            }
        }

        if let Some(policy) = lookup(ENV_SAME_DAY) {
            match policy.parse() {
                Ok(policy) => config.same_day = policy,
                Err(err) => warn!("{}, using {:?}", err, config.same_day),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.peak_hours, vec!["12:00-14:00".to_string(), "19:00-21:00".to_string()]);
        assert_eq!(config.same_day, SameDayPolicy::Append);
    }

    #[test]
    fn test_overrides() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (ENV_CURRENCY, "$"),
            (ENV_PEAK_HOURS, "07:00-09:00, ,17:00-19:00"),
            (ENV_RISING_WINDOW_DAYS, "14"),
            (ENV_SAME_DAY, "Replace"),
        ]));

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.peak_hours, vec!["07:00-09:00".to_string(), "17:00-19:00".to_string()]);
        assert_eq!(config.rising_cost_window_days, 14);
        assert_eq!(config.same_day, SameDayPolicy::Replace);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (ENV_CURRENCY, "  "),
            (ENV_PEAK_HOURS, ","),
            (ENV_RISING_WINDOW_DAYS, "0"),
            (ENV_SAME_DAY, "upsert"),
        ]));

        assert_eq!(config, LedgerConfig::default());
    }
}
