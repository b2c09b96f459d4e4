use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: &str = "8080";

#[derive(Debug, Error)]
enum HealthcheckError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Status code {0} from healthcheck")]
    BadStatus(u16),
    #[error("Healthcheck reported status {0:?}")]
    NotOk(String),
}

#[derive(Debug, Deserialize)]
struct StatusJSON {
    status: String,
}

fn healthcheck_url(port: Option<String>) -> String {
    let port = port
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PORT.to_string());
    format!("http://localhost:{}/healthcheck", port.trim())
}

fn check_status(status: StatusJSON) -> Result<(), HealthcheckError> {
    if status.status != "ok" {
        return Err(HealthcheckError::NotOk(status.status));
    }
    Ok(())
}

fn main() -> Result<(), HealthcheckError> {
    let url = healthcheck_url(env::var("STOCK_DASHBOARD_PORT").ok());
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let res = client.get(&url).send()?;
    if res.status() != 200 {
        return Err(HealthcheckError::BadStatus(res.status().as_u16()));
    }
    check_status(res.json::<StatusJSON>()?)
}
