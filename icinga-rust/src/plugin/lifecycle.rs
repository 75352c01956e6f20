//! Shared pre-run / run / failure-capture pipeline behind the plugin
//! wrappers.
//!
//! Every run walks the same states: help check, required-option check,
//! family operation, capture. Each short-circuit and every operation
//! failure terminates in a (message, code) result; nothing escapes.

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::report::Report;
use crate::plugin::Status;
use crate::ParsedOptions;

/// Option key that short-circuits a run with the configured help text.
const HELP_OPTION: &str = "help";

/// Option schema, parsed options, and run result shared by every wrapper.
///
/// This is the crate-internal side of the plugin contract; concrete plugins
/// only reach it through their family trait's schema methods.
#[derive(Debug, Clone)]
pub(crate) struct Lifecycle {
    help: String,
    short_options: String,
    long_options: Vec<String>,
    required_options: Vec<String>,
    options: ParsedOptions,
    message: String,
    code: Status,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            help: String::new(),
            short_options: String::new(),
            long_options: vec![HELP_OPTION.to_string()],
            required_options: Vec::new(),
            options: ParsedOptions::new(),
            message: String::new(),
            code: Status::Unknown,
        }
    }
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_help(&mut self, help: String) {
        self.help = help;
    }

    pub(crate) fn set_short_options(&mut self, options: String) {
        self.short_options = options;
    }

    /// Appends onto the seeded list. Never deduplicates: a plugin that
    /// declares a name already present ends up with it twice.
    pub(crate) fn set_long_options(&mut self, options: Vec<String>) {
        self.long_options.extend(options);
    }

    pub(crate) fn set_required_options(&mut self, options: Vec<String>) {
        self.required_options = options;
    }

    pub(crate) fn set_options(&mut self, options: ParsedOptions) {
        self.options = options;
    }

    pub(crate) fn short_options(&self) -> &str {
        &self.short_options
    }

    pub(crate) fn long_options(&self) -> &[String] {
        &self.long_options
    }

    pub(crate) fn options(&self) -> &ParsedOptions {
        &self.options
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn code(&self) -> Status {
        self.code
    }

    /// Help short-circuit and required-parameter validation.
    ///
    /// Help always wins: a run with the help option reports the help text
    /// even when required options are missing as well.
    pub(crate) fn pre_run(&self) -> PluginResult<()> {
        if self.options.contains_key(HELP_OPTION) {
            return Err(PluginError::HelpRequested {
                help: self.help.clone(),
            });
        }

        let missing: Vec<String> = self
            .required_options
            .iter()
            .filter(|name| !self.options.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PluginError::MissingParameters { missing });
        }

        Ok(())
    }

    /// Terminal step: every outcome becomes the run result, failures
    /// included.
    pub(crate) fn capture(&mut self, outcome: PluginResult<Report>) {
        match outcome {
            Ok(report) => {
                self.message = report.message;
                self.code = report.status;
            }
            Err(e) => {
                log::debug!("plugin run captured failure: {e}");
                self.message = e.message();
                self.code = e.status();
            }
        }
    }
}
