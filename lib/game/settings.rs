use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

#[cfg(test)]
use proptest::prelude::*;

/// Runtime configuration for a [`Game`][`crate::game::Game`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    /// The most energy either side may hold.
    pub max_energy: u8,

    /// The thinking time each side starts with.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((0u64..86400).prop_map(Duration::from_secs)))]
    pub time_limit: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_energy: 5,
            time_limit: Duration::from_secs(15 * 60),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Settings`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game settings")]
pub struct ParseSettingsError(ron::de::SpannedError);

impl FromStr for Settings {
    type Err = ParseSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_settings_is_an_identity(s: Settings) {
        assert_eq!(s.to_string().parse(), Ok(s));
    }

    #[test]
    fn missing_fields_take_default_values() {
        assert_eq!("()".parse(), Ok(Settings::default()));
        assert_eq!(
            "(max_energy: 8)".parse(),
            Ok(Settings {
                max_energy: 8,
                ..Settings::default()
            })
        );
    }

    #[test]
    fn time_limit_is_human_readable() {
        let s: Settings = r#"(time_limit: "90s")"#.parse().unwrap();
        assert_eq!(s.time_limit, Duration::from_secs(90));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!("(max_power: 3)".parse::<Settings>().is_err());
    }

    #[test]
    fn default_settings_cap_energy_at_five_with_fifteen_minutes() {
        let s = Settings::default();
        assert_eq!(s.max_energy, 5);
        assert_eq!(s.time_limit, Duration::from_secs(900));
    }
}
