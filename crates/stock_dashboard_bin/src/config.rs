use dotenvy::dotenv;
use std::env;
use std::error::Error;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

pub struct Config {
    pub workers: usize,
    pub bind: String,
    pub port: u16,
    pub provider_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new() -> Result<Config, Box<dyn Error>> {
        dotenv().ok();
        Config::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Box<dyn Error>> {
        let mut workers: usize = parse_or(&lookup, "STOCK_DASHBOARD_WORKERS", 1)?;
        let mut bind = lookup("STOCK_DASHBOARD_BIND").unwrap_or_default();
        let port: u16 = parse_or(&lookup, "STOCK_DASHBOARD_PORT", DEFAULT_PORT)?;
        let mut provider_url = lookup("STOCK_DASHBOARD_PROVIDER_URL").unwrap_or_default();
        let mut timeout_secs: u64 = parse_or(
            &lookup,
            "STOCK_DASHBOARD_TIMEOUT_SECS",
            yahoo_api::api::DEFAULT_TIMEOUT.as_secs(),
        )?;

        if workers == 0 {
            workers = 1;
        }

        if bind.trim().is_empty() {
            bind = DEFAULT_BIND.to_string();
        }

        if provider_url.trim().is_empty() {
            provider_url = yahoo_api::api::YAHOO_BASE_API_URL.to_string();
        }

        if timeout_secs == 0 {
            timeout_secs = yahoo_api::api::DEFAULT_TIMEOUT.as_secs();
        }

        let config = Config {
            workers,
            bind,
            port,
            provider_url,
            timeout: Duration::from_secs(timeout_secs),
        };
        Ok(config)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| -> Box<dyn Error> { format!("{}: {}", name, e).into() }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Box<dyn Error>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn config_pass_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.workers, 1);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_pass_overrides() {
        let config = config_from(&[
            ("STOCK_DASHBOARD_WORKERS", "4"),
            ("STOCK_DASHBOARD_BIND", "127.0.0.1"),
            ("STOCK_DASHBOARD_PORT", "9000"),
            ("STOCK_DASHBOARD_PROVIDER_URL", "http://localhost:1234"),
            ("STOCK_DASHBOARD_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.provider_url, "http://localhost:1234");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn config_pass_zero_values_coerced() {
        let config = config_from(&[
            ("STOCK_DASHBOARD_WORKERS", "0"),
            ("STOCK_DASHBOARD_TIMEOUT_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.workers, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_fail_malformed_port() {
        let result = config_from(&[("STOCK_DASHBOARD_PORT", "eighty")]);
        let message = result.err().unwrap().to_string();
        assert!(message.starts_with("STOCK_DASHBOARD_PORT"));
    }
}
