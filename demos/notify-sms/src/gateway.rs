//! Minimal client for the SMS gateway's HTTP API.
//!
//! The gateway answers every submission with a numeric response code on
//! the first line of the body; mapping codes to states is the plugin's
//! business.

use std::time::Duration;

/// Sender ID the recipient sees.
const SENDER: &str = "Icinga";

const DEFAULT_GATEWAY_URL: &str = "https://gateway.smstrade.de/";

/// Gateway API surface the notification plugin drives.
#[cfg_attr(test, mockall::automock)]
pub trait SmsApi {
    /// Submits one SMS; returns the gateway's numeric response code.
    fn send_sms(
        &self,
        api_key: &str,
        phone: &str,
        message: &str,
        route: &str,
    ) -> Result<u32, String>;
}

pub struct SmsGateway {
    client: reqwest::blocking::Client,
    url: String,
}

impl SmsGateway {
    pub fn new() -> Result<Self, String> {
        Self::with_url(DEFAULT_GATEWAY_URL.to_string())
    }

    pub fn with_url(url: String) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client, url })
    }
}

impl SmsApi for SmsGateway {
    fn send_sms(
        &self,
        api_key: &str,
        phone: &str,
        message: &str,
        route: &str,
    ) -> Result<u32, String> {
        log::debug!("submitting SMS via route {route}");

        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("key", api_key),
                ("to", phone),
                ("message", message),
                ("route", route),
                ("from", SENDER),
            ])
            .send()
            .map_err(|e| format!("request failed: {e}"))?;

        let body = response
            .text()
            .map_err(|e| format!("unreadable gateway response: {e}"))?;

        let code_line = body.lines().next().unwrap_or_default().trim();
        code_line
            .parse()
            .map_err(|_| format!("unexpected gateway response: {}", body.trim()))
    }
}
