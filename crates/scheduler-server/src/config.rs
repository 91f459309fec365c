use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use scheduler_core::error::CoreError;
use scheduler_core::timezone::validate_timezone;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "scheduler.toml";

/// Prefix shared by all environment overrides (`TODO_PORT`, `TODO_DBFILE`, ...).
pub const ENV_PREFIX: &str = "TODO_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// TCP port the HTTP server listens on
    pub port: u16,
    /// Path of the SQLite database file
    pub db_file: String,
    /// Directory with the static front-end
    pub web_dir: PathBuf,
    /// IANA timezone that decides what "today" is
    pub timezone: String,
    /// Maximum number of tasks returned by the list endpoint
    pub task_list_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7540,
            db_file: "scheduler.db".to_string(),
            web_dir: PathBuf::from("./web"),
            timezone: detect_system_timezone(),
            task_list_limit: 50,
        }
    }
}

impl Config {
    /// Loads defaults, then `scheduler.toml`, then `TODO_*` environment variables.
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                // `TODO_DBFILE` predates the `db_file` key
                if key.as_str().eq_ignore_ascii_case("dbfile") {
                    "db_file".into()
                } else {
                    key.into()
                }
            }))
    }

    /// The configured timezone, validated.
    pub fn tz(&self) -> Result<Tz, CoreError> {
        validate_timezone(&self.timezone)
    }
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    // Method 1: Check TZ environment variable
    if let Ok(tz) = std::env::var("TZ") {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    // Method 2: Try to read from /etc/timezone (Linux)
    #[cfg(target_os = "linux")]
    {
        if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
            let tz = tz.trim();
            if validate_timezone(tz).is_ok() {
                return tz.to_string();
            }
        }
    }

    // Method 3: Ask the platform
    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    "UTC".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::new()?;
            assert_eq!(config.port, 7540);
            assert_eq!(config.db_file, "scheduler.db");
            assert_eq!(config.web_dir, PathBuf::from("./web"));
            assert_eq!(config.task_list_limit, 50);
            assert!(config.tz().is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                port = 8080
                db_file = "from-file.db"
                timezone = "Europe/Moscow"
                "#,
            )?;
            jail.set_env("TODO_PORT", "9000");
            jail.set_env("TODO_DBFILE", "/tmp/from-env.db");

            let config = Config::new()?;
            assert_eq!(config.port, 9000);
            assert_eq!(config.db_file, "/tmp/from-env.db");
            assert_eq!(config.timezone, "Europe/Moscow");
            assert_eq!(config.task_list_limit, 50);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_timezone_is_reported() {
        Jail::expect_with(|jail| {
            jail.set_env("TODO_TIMEZONE", "Mars/Olympus_Mons");
            let config = Config::new()?;
            assert!(matches!(config.tz(), Err(CoreError::InvalidTimezone(_))));
            Ok(())
        });
    }

    #[test]
    fn test_bad_port_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("TODO_PORT", "not-a-port");
            assert!(Config::new().is_err());
            Ok(())
        });
    }
}
