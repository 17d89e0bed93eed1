use anyhow::{bail, Context, Result};
use pilot_core::TravelEstimator;
use serde::Deserialize;
use std::time::Duration;

use crate::config::DirectionsSection;

/// Directions API client (Google Directions response shape).
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    mode: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: i64,
}

impl DirectionsClient {
    pub fn from_config(cfg: &DirectionsSection) -> Result<Self> {
        let api_key = cfg.resolve_api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "missing directions API key; set {} or [directions].api_key",
                crate::config::DIRECTIONS_KEY_ENV
            )
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            mode: cfg.mode.clone(),
            api_key,
        })
    }

    pub async fn travel_seconds(&self, origin: &str, destination: &str) -> Result<i64> {
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("origin", origin),
                ("destination", destination),
                ("mode", self.mode.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
        .with_context(|| format!("invalid directions base_url: {}", self.base_url))?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("directions request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("directions error: {status} {txt}");
        }

        let body: DirectionsResponse = resp.json().await.context("parse directions response")?;
        let secs = total_duration_seconds(&body)?;
        tracing::debug!(destination, secs, "directions estimate");
        Ok(secs)
    }
}

impl TravelEstimator for DirectionsClient {
    fn estimate_seconds(&self, origin: &str, destination: &str) -> Result<i64> {
        // The CLI runs under #[tokio::main]; nested block_on would panic.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.travel_seconds(origin, destination)))
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(self.travel_seconds(origin, destination))
        }
    }
}

/// Sum leg durations of the first route.
fn total_duration_seconds(body: &DirectionsResponse) -> Result<i64> {
    if body.status != "OK" {
        match &body.error_message {
            Some(msg) => bail!("directions status {}: {}", body.status, msg),
            None => bail!("directions status {}", body.status),
        }
    }
    let route = body.routes.first().context("directions returned no routes")?;
    Ok(route.legs.iter().map(|l| l.duration.value).sum())
}
