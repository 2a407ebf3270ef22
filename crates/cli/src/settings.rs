use crate::{env::EnvManager, error::CliError};
use codec::TimestampPolicy;
use model::core::{data_type::SqlDialect, zone::SessionZone};
use std::str::FromStr;

pub const POLICY_VAR: &str = "TZKEEP_POLICY";
pub const SESSION_ZONE_VAR: &str = "TZKEEP_SESSION_ZONE";
pub const DIALECT_VAR: &str = "TZKEEP_DIALECT";

/// Codec configuration. The session zone is only ever taken from here; `TZ` and the
/// host zone are never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSettings {
    pub policy: TimestampPolicy,
    pub session_zone: SessionZone,
    pub dialect: SqlDialect,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            policy: TimestampPolicy::OffsetPreserving,
            session_zone: SessionZone::utc(),
            dialect: SqlDialect::MsSql,
        }
    }
}

impl CodecSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, CliError> {
        let defaults = Self::default();
        Ok(Self {
            policy: parse_var(env, POLICY_VAR)?.unwrap_or(defaults.policy),
            session_zone: parse_var(env, SESSION_ZONE_VAR)?.unwrap_or(defaults.session_zone),
            dialect: parse_var(env, DIALECT_VAR)?.unwrap_or(defaults.dialect),
        })
    }

    /// Applies command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        policy: Option<&str>,
        session_zone: Option<&str>,
        dialect: Option<&str>,
    ) -> Result<Self, CliError> {
        if let Some(raw) = policy {
            self.policy = parse_setting("--policy", raw)?;
        }
        if let Some(raw) = session_zone {
            self.session_zone = parse_setting("--session-zone", raw)?;
        }
        if let Some(raw) = dialect {
            self.dialect = parse_setting("--dialect", raw)?;
        }
        Ok(self)
    }
}

fn parse_var<T>(env: &EnvManager, key: &str) -> Result<Option<T>, CliError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env.get(key).map(|raw| parse_setting(key, raw)).transpose()
}

fn parse_setting<T>(name: &str, raw: &str) -> Result<T, CliError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CliError::Config(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let env = EnvManager::from_vars([("TZ".to_string(), "Europe/Vienna".to_string())]);
        assert_eq!(
            CodecSettings::from_env(&env).unwrap(),
            CodecSettings::default()
        );
    }

    #[test]
    fn test_from_env() {
        let env = EnvManager::from_vars([
            (POLICY_VAR.to_string(), "instant-preserving".to_string()),
            (SESSION_ZONE_VAR.to_string(), "+01:00".to_string()),
            (DIALECT_VAR.to_string(), "mysql".to_string()),
        ]);
        let settings = CodecSettings::from_env(&env).unwrap();
        assert_eq!(settings.policy, TimestampPolicy::InstantPreserving);
        assert_eq!(settings.session_zone.to_string(), "+01:00");
        assert_eq!(settings.dialect, SqlDialect::MySql);

        let bad = EnvManager::from_vars([(POLICY_VAR.to_string(), "maybe".to_string())]);
        assert!(CodecSettings::from_env(&bad).is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = CodecSettings::default()
            .with_overrides(Some("a"), Some("Europe/Vienna"), Some("pg"))
            .unwrap();
        assert_eq!(settings.policy, TimestampPolicy::InstantPreserving);
        assert_eq!(settings.session_zone.to_string(), "Europe/Vienna");
        assert_eq!(settings.dialect, SqlDialect::Postgres);

        let err = CodecSettings::default()
            .with_overrides(None, Some("Nowhere/City"), None)
            .unwrap_err();
        assert!(err.to_string().contains("--session-zone"));
    }
}
