mod gateway;

use gateway::{PushApi, PushGateway};
use icinga_rust::cli;
use icinga_rust::plugin::{
    NotificationPlugin, NotificationPluginWrapper, PluginError, PluginResult, Report, Status,
    MESSAGE_OPTIONS,
};
use icinga_rust::ParsedOptions;

/// Sends Icinga push notifications through the push gateway.
struct PushNotification<G: PushApi> {
    gateway: G,
}

impl<G: PushApi> PushNotification<G> {
    fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

/// Notification priority for a host or service state. States the gateway
/// has no business paging about stay at the lowest priority.
fn priority_for_state(state: &str) -> i32 {
    match state.parse::<Status>() {
        Ok(Status::Warning) => 1,
        Ok(Status::Critical) => 2,
        _ => 0,
    }
}

fn opt<'a>(options: &'a ParsedOptions, name: &str) -> &'a str {
    options.get(name).map(String::as_str).unwrap_or_default()
}

impl<G: PushApi> NotificationPlugin for PushNotification<G> {
    fn name(&self) -> String {
        "notify_push".to_string()
    }

    fn help(&self) -> String {
        r"Icinga plugin for sending push notifications through the push gateway.

--type    Notification type
--service Service name
--host    Host name
--address Host address
--state   Service state
--time    Notification time
--output  Check plugin output
--apikey  Push gateway API key"
            .to_string()
    }

    fn long_options(&self) -> Vec<String> {
        let mut options: Vec<String> = MESSAGE_OPTIONS
            .iter()
            .map(|name| format!("{name}:"))
            .collect();
        options.push("apikey:".to_string());
        options
    }

    fn required_options(&self) -> Vec<String> {
        let mut options: Vec<String> = MESSAGE_OPTIONS.iter().map(|s| s.to_string()).collect();
        options.push("apikey".to_string());
        options
    }

    fn send(&mut self, options: &ParsedOptions) -> PluginResult<Report> {
        let api_key = opt(options, "apikey");
        let state = opt(options, "state");

        let description = format!(
            "Service: {}\nHost: {}\nState: {}\nMessage: {}",
            opt(options, "service"),
            opt(options, "host"),
            state,
            opt(options, "output"),
        );

        let verified = self.gateway.verify(api_key).map_err(|e| {
            PluginError::failed(format!("Error from push gateway: {e}"), Status::Critical)
        })?;
        if !verified {
            return Err(PluginError::failed(
                "Push gateway rejected the API key",
                Status::Critical,
            ));
        }

        let accepted = self
            .gateway
            .notify(
                api_key,
                opt(options, "type"),
                &description,
                priority_for_state(state),
            )
            .map_err(|e| {
                PluginError::failed(format!("Error from push gateway: {e}"), Status::Critical)
            })?;

        if accepted {
            Ok(Report::ok("Message was sent"))
        } else {
            Ok(Report::warning("Message could not be sent"))
        }
    }
}

fn main() {
    env_logger::init();

    let gateway = PushGateway::new().unwrap_or_else(|e| {
        eprintln!("Failed to create gateway client: {e}");
        std::process::exit(Status::Unknown.exit_code());
    });

    cli::run_and_exit(NotificationPluginWrapper::new(PushNotification::new(
        gateway,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockPushApi;
    use icinga_rust::plugin::Plugin;

    fn full_options() -> ParsedOptions {
        [
            ("type", "PROBLEM"),
            ("service", "mysql"),
            ("host", "db1"),
            ("address", "192.0.2.10"),
            ("state", "CRITICAL"),
            ("time", "2024-05-01 12:00:00"),
            ("output", "connection refused"),
            ("apikey", "secret"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_priority_for_state() {
        assert_eq!(priority_for_state("OK"), 0);
        assert_eq!(priority_for_state("UNKNOWN"), 0);
        assert_eq!(priority_for_state("WARNING"), 1);
        assert_eq!(priority_for_state("CRITICAL"), 2);
        assert_eq!(priority_for_state("nonsense"), 0);
    }

    #[test]
    fn test_send_reports_ok_when_gateway_accepts() {
        let mut mock = MockPushApi::new();
        mock.expect_verify().returning(|_| Ok(true));
        mock.expect_notify().returning(|_, _, _, _| Ok(true));

        let mut plugin = PushNotification::new(mock);
        let report = plugin.send(&full_options()).unwrap();

        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.message, "Message was sent");
    }

    #[test]
    fn test_send_builds_description_and_priority_from_options() {
        let mut mock = MockPushApi::new();
        mock.expect_verify().returning(|_| Ok(true));
        mock.expect_notify()
            .withf(|api_key, event, description, priority| {
                api_key == "secret"
                    && event == "PROBLEM"
                    && description
                        == "Service: mysql\nHost: db1\nState: CRITICAL\nMessage: connection refused"
                    && *priority == 2
            })
            .returning(|_, _, _, _| Ok(true));

        let mut plugin = PushNotification::new(mock);
        let report = plugin.send(&full_options()).unwrap();
        assert_eq!(report.status, Status::Ok);
    }

    #[test]
    fn test_send_reports_warning_when_gateway_declines() {
        let mut mock = MockPushApi::new();
        mock.expect_verify().returning(|_| Ok(true));
        mock.expect_notify().returning(|_, _, _, _| Ok(false));

        let mut plugin = PushNotification::new(mock);
        let report = plugin.send(&full_options()).unwrap();

        assert_eq!(report.status, Status::Warning);
        assert_eq!(report.message, "Message could not be sent");
    }

    #[test]
    fn test_rejected_api_key_is_critical() {
        let mut mock = MockPushApi::new();
        mock.expect_verify().returning(|_| Ok(false));
        mock.expect_notify().times(0);

        let mut plugin = PushNotification::new(mock);
        let err = plugin.send(&full_options()).unwrap_err();

        assert_eq!(err.status(), Status::Critical);
        assert_eq!(err.message(), "Push gateway rejected the API key");
    }

    #[test]
    fn test_gateway_transport_error_is_critical() {
        let mut mock = MockPushApi::new();
        mock.expect_verify()
            .returning(|_| Err("request failed: timeout".to_string()));

        let mut plugin = PushNotification::new(mock);
        let err = plugin.send(&full_options()).unwrap_err();

        assert_eq!(err.status(), Status::Critical);
        assert_eq!(
            err.message(),
            "Error from push gateway: request failed: timeout"
        );
    }

    #[test]
    fn test_full_run_lists_missing_required_options() {
        let mock = MockPushApi::new();
        let mut plugin = NotificationPluginWrapper::new(PushNotification::new(mock));
        plugin.set_options(ParsedOptions::new()).run();

        assert_eq!(plugin.code(), Status::Unknown);
        assert_eq!(
            plugin.message(),
            "Missing required parameters: type, service, host, address, state, time, output, apikey"
        );
    }

    #[test]
    fn test_full_run_captures_gateway_failure() {
        let mut mock = MockPushApi::new();
        mock.expect_verify()
            .returning(|_| Err("connection reset".to_string()));

        let mut plugin = NotificationPluginWrapper::new(PushNotification::new(mock));
        plugin.set_options(full_options()).run();

        assert_eq!(plugin.code(), Status::Critical);
        assert_eq!(
            plugin.message(),
            "Error from push gateway: connection reset"
        );
    }
}
