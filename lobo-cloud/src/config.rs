//! Service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for member authentication
    pub jwt_secret: String,
    /// Family UTC offset in minutes, used when an event carries no offset
    pub family_utc_offset_minutes: i32,
    /// Days a member stays "active" after their last request
    pub active_window_days: u32,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let family_utc_offset_minutes =
            parse_offset_minutes(std::env::var("FAMILY_UTC_OFFSET_MINUTES").ok().as_deref())?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            family_utc_offset_minutes,
            active_window_days: std::env::var("ACTIVE_WINDOW_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .filter(|d| *d > 0)
                .unwrap_or(7),
        })
    }
}

/// Parse a UTC offset in minutes; unset means UTC. Offsets beyond ±18h are rejected.
fn parse_offset_minutes(raw: Option<&str>) -> Result<i32, BoxError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(0);
    };
    let minutes: i32 = raw
        .parse()
        .map_err(|_| format!("FAMILY_UTC_OFFSET_MINUTES is not an integer: {raw}"))?;
    if minutes.abs() > 18 * 60 {
        return Err(format!("FAMILY_UTC_OFFSET_MINUTES out of range: {minutes}").into());
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_defaults_to_utc() {
        assert_eq!(parse_offset_minutes(None).unwrap(), 0);
        assert_eq!(parse_offset_minutes(Some("  ")).unwrap(), 0);
    }

    #[test]
    fn test_offset_parses_signed_minutes() {
        assert_eq!(parse_offset_minutes(Some("480")).unwrap(), 480);
        assert_eq!(parse_offset_minutes(Some("-300")).unwrap(), -300);
    }

    #[test]
    fn test_offset_rejects_garbage() {
        assert!(parse_offset_minutes(Some("UTC+8")).is_err());
        assert!(parse_offset_minutes(Some("1200")).is_err());
    }
}
