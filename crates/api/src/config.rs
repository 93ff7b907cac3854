use microgreens_core::time_of_day::TimeOfDay;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Garden-specific settings: presentation and job timing.
#[derive(Debug, Clone)]
pub struct GardenSettings {
    /// Entity id the calendar view is published under.
    pub calendar_entity: String,
    /// `provider.name` notification target used by the jobs.
    pub notify_service: String,
    /// Prefix for calendar event titles.
    pub title_prefix: String,
    /// Local time of the watering reminder.
    pub watering_time: TimeOfDay,
    /// Local time of the daily summary.
    pub summary_time: TimeOfDay,
}

impl Default for GardenSettings {
    fn default() -> Self {
        Self {
            calendar_entity: "calendar.microgreens".into(),
            notify_service: "notify.notify".into(),
            title_prefix: "🌱".into(),
            watering_time: TimeOfDay::new(8, 0, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            summary_time: TimeOfDay::new(18, 0, 0).unwrap_or(TimeOfDay::MIDNIGHT),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8123`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path of the JSON document holding the garden.
    pub data_path: String,
    /// Webhook notification channels as `(name, url)` pairs.
    pub notify_webhooks: Vec<(String, String)>,
    pub garden: GardenSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8123`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_PATH`            | `data/microgreens.json`    |
    /// | `CALENDAR_ENTITY`      | `calendar.microgreens`     |
    /// | `NOTIFY_SERVICE`       | `notify.notify`            |
    /// | `TITLE_PREFIX`         | `🌱`                       |
    /// | `WATERING_TIME`        | `08:00`                    |
    /// | `SUMMARY_TIME`         | `18:00`                    |
    /// | `NOTIFY_WEBHOOKS`      | empty (`name=url,...`)     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port = parse_var("PORT", var("PORT", "8123"), "a valid port number")?;

        let cors_origins = split_list(&var("CORS_ORIGINS", "http://localhost:5173"))
            .map(str::to_string)
            .collect();

        let request_timeout_secs = parse_var(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS", "30"),
            "a whole number of seconds",
        )?;

        let data_path = var("DATA_PATH", "data/microgreens.json");

        let notify_webhooks = split_list(&var("NOTIFY_WEBHOOKS", ""))
            .map(|entry| match entry.split_once('=') {
                Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
                    Ok((name.trim().to_string(), url.trim().to_string()))
                }
                _ => Err(ConfigError::Invalid {
                    var: "NOTIFY_WEBHOOKS",
                    expected: "a list of name=url pairs",
                    value: entry.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = GardenSettings::default();
        let garden = GardenSettings {
            calendar_entity: var("CALENDAR_ENTITY", &defaults.calendar_entity),
            notify_service: var("NOTIFY_SERVICE", &defaults.notify_service),
            title_prefix: var("TITLE_PREFIX", &defaults.title_prefix),
            watering_time: parse_var("WATERING_TIME", var("WATERING_TIME", "08:00"), "HH:MM[:SS]")?,
            summary_time: parse_var("SUMMARY_TIME", var("SUMMARY_TIME", "18:00"), "HH:MM[:SS]")?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_path,
            notify_webhooks,
            garden,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, expected, value })
}
