use crate::plugin::lifecycle::Lifecycle;
use crate::plugin::{Family, Plugin, PluginResult, Report, Status};
use crate::ParsedOptions;

/// Command line options the supervisor passes along with every state change,
/// available for use in notification messages.
pub const MESSAGE_OPTIONS: [&str; 7] = [
    "type", "service", "host", "address", "state", "time", "output",
];

/// Trait for implementing Icinga notification plugins.
///
/// Notification plugins forward a host or service state change to a
/// delivery channel (a push gateway, an SMS provider, a chat system).
/// Except for the name of the operation their lifecycle is identical to
/// that of check plugins: schema declaration, option validation, one shot
/// of domain logic, a (message, code) result.
pub trait NotificationPlugin {
    /// Returns the name of the notification plugin
    fn name(&self) -> String;

    /// Static help text reported when the caller passes the help option.
    fn help(&self) -> String;

    /// getopt-style short option characters (default: none).
    fn short_options(&self) -> String {
        String::new()
    }

    /// Long option names to append after the seeded `help` entry.
    fn long_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Option names that must be present before `send` runs.
    fn required_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Delivers the notification and reports how that went.
    fn send(&mut self, options: &ParsedOptions) -> PluginResult<Report>;
}

/// Wrapper that adapts a NotificationPlugin to the Plugin contract.
pub struct NotificationPluginWrapper<N: NotificationPlugin> {
    notification: N,
    lifecycle: Lifecycle,
}

impl<N: NotificationPlugin> NotificationPluginWrapper<N> {
    pub fn new(notification: N) -> Self {
        let mut lifecycle = Lifecycle::new();
        lifecycle.set_help(notification.help());
        lifecycle.set_short_options(notification.short_options());
        lifecycle.set_long_options(notification.long_options());
        lifecycle.set_required_options(notification.required_options());

        Self {
            notification,
            lifecycle,
        }
    }
}

impl<N: NotificationPlugin> Plugin for NotificationPluginWrapper<N> {
    fn family(&self) -> Family {
        Family::Notification
    }

    fn name(&self) -> String {
        self.notification.name()
    }

    fn short_options(&self) -> &str {
        self.lifecycle.short_options()
    }

    fn long_options(&self) -> &[String] {
        self.lifecycle.long_options()
    }

    fn message(&self) -> &str {
        self.lifecycle.message()
    }

    fn code(&self) -> Status {
        self.lifecycle.code()
    }

    fn set_options(&mut self, options: ParsedOptions) -> &mut Self {
        self.lifecycle.set_options(options);
        self
    }

    fn run(&mut self) -> &mut Self {
        let outcome = self
            .lifecycle
            .pre_run()
            .and_then(|()| self.notification.send(self.lifecycle.options()));
        self.lifecycle.capture(outcome);
        self
    }
}
