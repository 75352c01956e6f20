use crate::plugin::lifecycle::Lifecycle;
use crate::plugin::{Family, Plugin, PluginResult, Report, Status};
use crate::ParsedOptions;

/// Trait for implementing Icinga check plugins.
///
/// Check plugins probe a resource (a daemon, a metric, a file system) and
/// report the observed state. The schema methods declare what the plugin
/// wants on its command line; the lifecycle validates the parsed options
/// before `check` ever runs.
///
/// # Example
///
/// ```no_run
/// use icinga_rust::plugin::{CheckPlugin, PluginResult, Report};
/// use icinga_rust::ParsedOptions;
///
/// struct SwapCheck;
///
/// impl CheckPlugin for SwapCheck {
///     fn name(&self) -> String {
///         "check_swap".to_string()
///     }
///
///     fn help(&self) -> String {
///         "Icinga plugin for checking swap usage.".to_string()
///     }
///
///     fn check(&mut self, _options: &ParsedOptions) -> PluginResult<Report> {
///         Ok(Report::ok("swap usage within limits"))
///     }
/// }
/// ```
pub trait CheckPlugin {
    /// Returns the name of the check plugin
    fn name(&self) -> String;

    /// Static help text reported when the caller passes the help option.
    fn help(&self) -> String;

    /// getopt-style short option characters (default: none).
    fn short_options(&self) -> String {
        String::new()
    }

    /// Long option names to append after the seeded `help` entry.
    ///
    /// Names may carry a getopt `:` suffix when the option takes a value;
    /// the lifecycle stores them verbatim and only the command line front
    /// end interprets the suffix.
    fn long_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Option names that must be present before `check` runs.
    fn required_options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Executes the check and reports the observed state.
    fn check(&mut self, options: &ParsedOptions) -> PluginResult<Report>;
}

/// Wrapper that adapts a CheckPlugin to the Plugin contract.
///
/// `new` snapshots the plugin's declared schema; `run` drives the shared
/// lifecycle and leaves the result readable through `message`/`code`.
pub struct CheckPluginWrapper<C: CheckPlugin> {
    check: C,
    lifecycle: Lifecycle,
}

impl<C: CheckPlugin> CheckPluginWrapper<C> {
    pub fn new(check: C) -> Self {
        let mut lifecycle = Lifecycle::new();
        lifecycle.set_help(check.help());
        lifecycle.set_short_options(check.short_options());
        lifecycle.set_long_options(check.long_options());
        lifecycle.set_required_options(check.required_options());

        Self { check, lifecycle }
    }
}

impl<C: CheckPlugin> Plugin for CheckPluginWrapper<C> {
    fn family(&self) -> Family {
        Family::Check
    }

    fn name(&self) -> String {
        self.check.name()
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
            .and_then(|()| self.check.check(self.lifecycle.options()));
        self.lifecycle.capture(outcome);
        self
    }
}
