use crate::errors::DashboardError;
use reqwest::Url;
use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300_000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Renders the milestone total and the per-milestone tables.
    pub tables: bool,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub base_url: Url,
    pub poll_interval: Duration,
    pub features: Features,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url = match lookup("DASHBOARD_BASE_URL") {
            Some(value) => Url::parse(&value)
                .map_err(|err| DashboardError::Config(format!("DASHBOARD_BASE_URL: {err}")))?,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|err| DashboardError::Config(err.to_string()))?,
        };

        let poll_interval = match lookup("POLL_INTERVAL_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(DashboardError::Config(format!(
                        "POLL_INTERVAL_SECS must be a positive integer, got {value:?}"
                    )));
                }
                Ok(secs) => Duration::from_secs(secs),
            },
            None => DEFAULT_POLL_INTERVAL,
        };

        let tables = match lookup("DASHBOARD_TABLES") {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                DashboardError::Config(format!("DASHBOARD_TABLES is not a boolean: {value:?}"))
            })?,
            None => false,
        };

        Ok(Self {
            port,
            base_url,
            poll_interval,
            features: Features { tables },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
