//! Minimal client for the push gateway's HTTP API.

use serde::Deserialize;
use std::time::Duration;

/// Application name the gateway displays as the notification sender.
const SENDER: &str = "Icinga";

const DEFAULT_BASE_URL: &str = "https://push.random-host.tv/publicapi";

/// Gateway API surface the notification plugin drives.
#[cfg_attr(test, mockall::automock)]
pub trait PushApi {
    /// Checks that the API key is accepted by the gateway.
    fn verify(&self, api_key: &str) -> Result<bool, String>;

    /// Delivers one notification; returns whether the gateway accepted it.
    fn notify(
        &self,
        api_key: &str,
        event: &str,
        description: &str,
        priority: i32,
    ) -> Result<bool, String>;
}

/// Status payload the gateway wraps every response in.
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    code: u16,
}

pub struct PushGateway {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PushGateway {
    pub fn new() -> Result<Self, String> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client, base_url })
    }

    fn post(&self, endpoint: &str, form: &[(&str, &str)]) -> Result<GatewayResponse, String> {
        let url = format!("{}/{endpoint}", self.base_url);
        log::debug!("posting to {url}");

        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .map_err(|e| format!("request failed: {e}"))?;

        response
            .json::<GatewayResponse>()
            .map_err(|e| format!("unreadable gateway response: {e}"))
    }
}

impl PushApi for PushGateway {
    fn verify(&self, api_key: &str) -> Result<bool, String> {
        let response = self.post("verify", &[("apikey", api_key)])?;

        Ok(response.code == 200)
    }

    fn notify(
        &self,
        api_key: &str,
        event: &str,
        description: &str,
        priority: i32,
    ) -> Result<bool, String> {
        let priority = priority.to_string();
        let response = self.post(
            "notify",
            &[
                ("apikey", api_key),
                ("application", SENDER),
                ("event", event),
                ("description", description),
                ("priority", &priority),
            ],
        )?;

        Ok(response.code == 200)
    }
}
