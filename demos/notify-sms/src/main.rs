mod gateway;

use gateway::{SmsApi, SmsGateway};
use icinga_rust::cli;
use icinga_rust::plugin::{
    NotificationPlugin, NotificationPluginWrapper, PluginError, PluginResult, Report, Status,
    MESSAGE_OPTIONS,
};
use icinga_rust::ParsedOptions;

/// Longest message that still fits a single SMS on every route.
const MAX_MESSAGE_LENGTH: usize = 260;

/// Sends Icinga SMS notifications through the SMS gateway.
struct SmsNotification<G: SmsApi> {
    gateway: G,
}

impl<G: SmsApi> SmsNotification<G> {
    fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

/// Text for the gateway's documented response codes.
fn response_code_text(code: u32) -> Option<&'static str> {
    match code {
        0 => Some("no gateway connection"),
        10 => Some("recipient unknown"),
        20 => Some("sender ID too long"),
        30 => Some("message too long"),
        31 => Some("incorrect message type"),
        40 => Some("incorrect SMS type"),
        50 => Some("login error"),
        60 => Some("insufficient credit"),
        70 => Some("carrier not supported by route"),
        71 => Some("feature not supported by route"),
        80 => Some("failed to send SMS"),
        90 => Some("cannot send"),
        100 => Some("SMS sent successfully"),
        _ => None,
    }
}

fn opt<'a>(options: &'a ParsedOptions, name: &str) -> &'a str {
    options.get(name).map(String::as_str).unwrap_or_default()
}

impl<G: SmsApi> NotificationPlugin for SmsNotification<G> {
    fn name(&self) -> String {
        "notify_sms".to_string()
    }

    fn help(&self) -> String {
        r"Icinga plugin for sending SMS notifications through the SMS gateway.

--type    Notification type
--service Service name
--host    Host name
--address Host address
--state   Service state
--time    Notification time
--output  Check plugin output
--phone   Phone number
--apikey  SMS gateway API key
--route   Route type"
            .to_string()
    }

    fn long_options(&self) -> Vec<String> {
        let mut options: Vec<String> = MESSAGE_OPTIONS
            .iter()
            .map(|name| format!("{name}:"))
            .collect();
        options.extend([
            "phone:".to_string(),
            "apikey:".to_string(),
            "route:".to_string(),
        ]);
        options
    }

    fn required_options(&self) -> Vec<String> {
        let mut options: Vec<String> = MESSAGE_OPTIONS.iter().map(|s| s.to_string()).collect();
        options.extend([
            "phone".to_string(),
            "apikey".to_string(),
            "route".to_string(),
        ]);
        options
    }

    fn send(&mut self, options: &ParsedOptions) -> PluginResult<Report> {
        let kind = opt(options, "type");

        // SMS costs money; only PROBLEM reports go out.
        if kind != "PROBLEM" {
            return Ok(Report::ok(format!(
                "Notification type mismatch \"{kind}\". Exiting."
            )));
        }

        let message: String = format!(
            "-{kind}- Service: {}, Host: {}, State: {}, Message: {}",
            opt(options, "service"),
            opt(options, "host"),
            opt(options, "state"),
            opt(options, "output"),
        )
        .chars()
        .take(MAX_MESSAGE_LENGTH)
        .collect();

        let code = self
            .gateway
            .send_sms(
                opt(options, "apikey"),
                opt(options, "phone"),
                &message,
                opt(options, "route"),
            )
            .map_err(|e| {
                PluginError::failed(format!("Error from SMS gateway: {e}"), Status::Critical)
            })?;

        match code {
            100 => Ok(Report::ok("Message was sent")),
            code => match response_code_text(code) {
                Some(text) => Ok(Report::warning(text)),
                None => Ok(Report::critical("Message could not be sent")),
            },
        }
    }
}

fn main() {
    env_logger::init();

    let gateway = SmsGateway::new().unwrap_or_else(|e| {
        eprintln!("Failed to create gateway client: {e}");
        std::process::exit(Status::Unknown.exit_code());
    });

    cli::run_and_exit(NotificationPluginWrapper::new(SmsNotification::new(
        gateway,
    )));
}
