//! Server configuration from the process environment.

use chrono_tz::Tz;

use nailcal_core::constants::{DEFAULT_FEED_MONTHS_AHEAD, DEFAULT_FEED_MONTHS_BACK};
use nailcal_core::{SalonError, SalonResult};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEZONE: &str = "Europe/Budapest";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    /// Shared secret for the iCalendar feed, compared by exact equality.
    pub feed_token: String,
    /// Salon timezone; drives day bucketing and the feed window.
    pub timezone: Tz,
    pub feed_months_back: u32,
    pub feed_months_ahead: u32,
    /// Host baked into feed UIDs.
    pub feed_host: String,
    pub calendar_name: String,
}

impl Settings {
    pub fn from_env() -> SalonResult<Self> {
        let feed_token = std::env::var("CALENDAR_FEED_TOKEN").map_err(|_| {
            SalonError::Config("Missing required environment variable CALENDAR_FEED_TOKEN".into())
        })?;

        let timezone: Tz = env_or("SALON_TIMEZONE", DEFAULT_TIMEZONE)
            .parse()
            .map_err(|_| SalonError::Config("SALON_TIMEZONE is not a valid timezone".into()))?;

        Ok(Settings {
            port: parse_env("PORT", DEFAULT_PORT)?,
            feed_token,
            timezone,
            feed_months_back: parse_env("FEED_MONTHS_BACK", DEFAULT_FEED_MONTHS_BACK)?,
            feed_months_ahead: parse_env("FEED_MONTHS_AHEAD", DEFAULT_FEED_MONTHS_AHEAD)?,
            feed_host: env_or("FEED_HOST", "nailcal.local"),
            calendar_name: env_or("SALON_CALENDAR_NAME", "Salon bookings"),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> SalonResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| SalonError::Config(format!("{} has an invalid value", name))),
        Err(_) => Ok(default),
    }
}
