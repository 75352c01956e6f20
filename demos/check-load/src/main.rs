use icinga_rust::cli;
use icinga_rust::plugin::{
    CheckPlugin, CheckPluginWrapper, PluginError, PluginResult, Report, Status,
};
use icinga_rust::ParsedOptions;
use std::fs;
use std::path::PathBuf;

/// Checks the one minute load average against warning/critical thresholds.
struct LoadCheck {
    loadavg_path: PathBuf,
}

impl LoadCheck {
    fn new() -> Self {
        Self {
            loadavg_path: PathBuf::from("/proc/loadavg"),
        }
    }

    #[cfg(test)]
    fn with_path(path: PathBuf) -> Self {
        Self { loadavg_path: path }
    }

    fn read_load_averages(&self) -> PluginResult<(f64, f64, f64)> {
        let raw = fs::read_to_string(&self.loadavg_path).map_err(|e| {
            PluginError::failed(
                format!("Failed to read {}: {e}", self.loadavg_path.display()),
                Status::Unknown,
            )
        })?;

        let mut averages = raw
            .split_whitespace()
            .take(3)
            .map(|field| field.parse::<f64>());
        match (averages.next(), averages.next(), averages.next()) {
            (Some(Ok(one)), Some(Ok(five)), Some(Ok(fifteen))) => Ok((one, five, fifteen)),
            _ => Err(PluginError::failed(
                format!("Malformed load average data: {}", raw.trim()),
                Status::Unknown,
            )),
        }
    }
}

/// Reads a threshold option, which the lifecycle has already guaranteed
/// to be present.
fn threshold(options: &ParsedOptions, name: &str) -> PluginResult<f64> {
    let raw = options.get(name).map(String::as_str).unwrap_or_default();

    raw.parse().map_err(|_| {
        PluginError::failed(format!("Invalid {name} threshold: {raw}"), Status::Unknown)
    })
}

impl CheckPlugin for LoadCheck {
    fn name(&self) -> String {
        "check_load".to_string()
    }

    fn help(&self) -> String {
        r"Icinga plugin for checking the system load average.

--warning  One minute load average which triggers a WARNING state
--critical One minute load average which triggers a CRITICAL state"
            .to_string()
    }

    fn long_options(&self) -> Vec<String> {
        vec!["warning:".to_string(), "critical:".to_string()]
    }

    fn required_options(&self) -> Vec<String> {
        vec!["warning".to_string(), "critical".to_string()]
    }

    fn check(&mut self, options: &ParsedOptions) -> PluginResult<Report> {
        let warning = threshold(options, "warning")?;
        let critical = threshold(options, "critical")?;

        let (one, five, fifteen) = self.read_load_averages()?;
        log::debug!("load averages: {one} {five} {fifteen}");

        let message = format!("load average: {one:.2}, {five:.2}, {fifteen:.2}");
        let report = if one >= critical {
            Report::critical(message)
        } else if one >= warning {
            Report::warning(message)
        } else {
            Report::ok(message)
        };

        Ok(report)
    }
}

fn main() {
    env_logger::init();

    cli::run_and_exit(CheckPluginWrapper::new(LoadCheck::new()));
}
