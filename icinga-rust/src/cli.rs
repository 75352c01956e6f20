//! Command line glue for plugin binaries.
//!
//! Builds a clap command from a plugin's declared option schema, hands the
//! parsed result to the plugin as a plain options map, and exits the
//! process with the plugin's return code. clap's own help and error
//! machinery is kept out of the way so that the plugin lifecycle sees
//! `help` and missing required options itself.

use crate::plugin::{Plugin, Status};
use crate::ParsedOptions;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeSet;
use std::ffi::OsString;

/// How an option declared in a plugin schema accepts its argument,
/// following the getopt suffix convention: no colon for a plain flag,
/// `:` for a required value, `::` for an optional one.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ValueKind {
    Flag,
    Required,
    Optional,
}

/// One parseable option derived from the schema.
#[derive(Debug, Clone, Eq, PartialEq)]
struct OptionSpec {
    name: String,
    short: Option<char>,
    kind: ValueKind,
}

/// Splits a long descriptor like `host:` into name and value kind.
fn long_spec(descriptor: &str) -> OptionSpec {
    let name = descriptor.trim_end_matches(':');
    let kind = match descriptor.len() - name.len() {
        0 => ValueKind::Flag,
        1 => ValueKind::Required,
        _ => ValueKind::Optional,
    };

    OptionSpec {
        name: name.to_string(),
        short: None,
        kind,
    }
}

/// Expands a short option string like `ab:c` into one spec per character.
fn short_specs(spec: &str) -> Vec<OptionSpec> {
    let mut specs = Vec::new();
    let mut chars = spec.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' {
            // Stray colon with no preceding option character.
            continue;
        }

        let mut colons = 0;
        while chars.peek() == Some(&':') {
            chars.next();
            colons += 1;
        }

        let kind = match colons {
            0 => ValueKind::Flag,
            1 => ValueKind::Required,
            _ => ValueKind::Optional,
        };

        specs.push(OptionSpec {
            name: c.to_string(),
            short: Some(c),
            kind,
        });
    }

    specs
}

/// The plugin schema reduced to what the parser needs.
///
/// The schema may legitimately repeat a name (the base always seeds
/// `help`); the parser gets each name only once, first declaration wins.
fn specs_for<P: Plugin>(plugin: &P) -> Vec<OptionSpec> {
    let mut seen = BTreeSet::new();
    let mut specs = Vec::new();

    for descriptor in plugin.long_options() {
        let spec = long_spec(descriptor);
        if seen.insert(spec.name.clone()) {
            specs.push(spec);
        }
    }

    for spec in short_specs(plugin.short_options()) {
        if seen.insert(spec.name.clone()) {
            specs.push(spec);
        }
    }

    specs
}

/// Builds a clap command from the plugin's declared option schema.
pub fn command<P: Plugin>(plugin: &P) -> Command {
    let mut cmd = Command::new(plugin.name())
        .disable_help_flag(true)
        .disable_version_flag(true);

    for spec in specs_for(plugin) {
        let mut arg = Arg::new(spec.name.clone());

        arg = match spec.short {
            Some(c) => arg.short(c),
            None => arg.long(spec.name.clone()),
        };

        arg = match spec.kind {
            ValueKind::Flag => arg.action(ArgAction::SetTrue),
            ValueKind::Required => arg.action(ArgAction::Set),
            ValueKind::Optional => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .default_missing_value(""),
        };

        cmd = cmd.arg(arg);
    }

    cmd
}

/// Collects the matched options into the map the lifecycle expects.
/// Flags present on the command line map to the empty string.
fn options_from_matches<P: Plugin>(plugin: &P, matches: &ArgMatches) -> ParsedOptions {
    let mut options = ParsedOptions::new();

    for spec in specs_for(plugin) {
        match spec.kind {
            ValueKind::Flag => {
                if matches.get_flag(&spec.name) {
                    options.insert(spec.name, String::new());
                }
            }
            ValueKind::Required | ValueKind::Optional => {
                if let Some(value) = matches.get_one::<String>(&spec.name) {
                    options.insert(spec.name, value.clone());
                }
            }
        }
    }

    options
}

/// Parses an argument vector against the plugin's schema.
///
/// The first element is taken to be the binary name, matching
/// `std::env::args`.
pub fn parse_options<P, I, T>(plugin: &P, argv: I) -> Result<ParsedOptions, clap::Error>
where
    P: Plugin,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(plugin).try_get_matches_from(argv)?;

    Ok(options_from_matches(plugin, &matches))
}

/// Parses the process arguments, runs the plugin, prints its message and
/// exits with its return code.
///
/// An unparseable command line also terminates with output and a code
/// (`UNKNOWN`), consistent with the rest of the lifecycle.
pub fn run_and_exit<P: Plugin>(mut plugin: P) -> ! {
    let options = match parse_options(&plugin, std::env::args()) {
        Ok(options) => options,
        Err(e) => {
            log::debug!("rejected command line: {e}");
            println!("{e}");
            std::process::exit(Status::Unknown.exit_code());
        }
    };

    plugin.set_options(options).run();

    println!("{}", plugin.message());
    std::process::exit(plugin.code().exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{CheckPlugin, CheckPluginWrapper, PluginResult, Report};

    struct CliCheck;

    impl CheckPlugin for CliCheck {
        fn name(&self) -> String {
            "check_cli".to_string()
        }

        fn help(&self) -> String {
            "usage: check_cli --host <host>".to_string()
        }

        fn short_options(&self) -> String {
            "vw:".to_string()
        }

        fn long_options(&self) -> Vec<String> {
            vec![
                "host:".to_string(),
                "quiet".to_string(),
                "retries::".to_string(),
            ]
        }

        fn required_options(&self) -> Vec<String> {
            vec!["host".to_string()]
        }

        fn check(&mut self, _options: &ParsedOptions) -> PluginResult<Report> {
            Ok(Report::ok("checked"))
        }
    }

    fn plugin() -> CheckPluginWrapper<CliCheck> {
        CheckPluginWrapper::new(CliCheck)
    }

    #[test]
    fn test_long_option_with_value() {
        let options = parse_options(&plugin(), vec!["check_cli", "--host", "db1"]).unwrap();
        assert_eq!(options.get("host").map(String::as_str), Some("db1"));
    }

    #[test]
    fn test_flag_maps_to_empty_string() {
        let options = parse_options(&plugin(), vec!["check_cli", "--quiet"]).unwrap();
        assert_eq!(options.get("quiet").map(String::as_str), Some(""));
    }

    #[test]
    fn test_absent_options_stay_absent() {
        let options = parse_options(&plugin(), vec!["check_cli"]).unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn test_help_flows_into_the_map() {
        // clap's built-in help is disabled; `help` arrives like any option.
        let options = parse_options(&plugin(), vec!["check_cli", "--help"]).unwrap();
        assert_eq!(options.get("help").map(String::as_str), Some(""));
    }

    #[test]
    fn test_short_options() {
        let options = parse_options(&plugin(), vec!["check_cli", "-v", "-w", "5"]).unwrap();
        assert_eq!(options.get("v").map(String::as_str), Some(""));
        assert_eq!(options.get("w").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_optional_value_suffix() {
        let options = parse_options(&plugin(), vec!["check_cli", "--retries"]).unwrap();
        assert_eq!(options.get("retries").map(String::as_str), Some(""));

        let options = parse_options(&plugin(), vec!["check_cli", "--retries", "7"]).unwrap();
        assert_eq!(options.get("retries").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = parse_options(&plugin(), vec!["check_cli", "--bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_then_run_reports_missing_required() {
        let mut wrapper = plugin();
        let options = parse_options(&wrapper, vec!["check_cli", "--quiet"]).unwrap();
        wrapper.set_options(options).run();

        assert_eq!(wrapper.message(), "Missing required parameters: host");
        assert_eq!(wrapper.code(), crate::plugin::Status::Unknown);
    }

    #[test]
    fn test_parse_then_run_reaches_check() {
        let mut wrapper = plugin();
        let options = parse_options(&wrapper, vec!["check_cli", "--host", "db1"]).unwrap();
        wrapper.set_options(options).run();

        assert_eq!(wrapper.message(), "checked");
        assert_eq!(wrapper.code(), crate::plugin::Status::Ok);
    }
}
