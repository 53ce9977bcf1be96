use crate::{
    cli::actions::Action,
    config::{Config, Zone},
    render::{Format, load_template},
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use std::time::Duration;

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if no host is given, the format is unknown or the
/// template cannot be read
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let hosts: Vec<String> = matches
        .get_many::<String>("hosts")
        .context("at least one host is required")?
        .cloned()
        .collect();

    let format = matches
        .get_one::<String>("format")
        .map(|f| f.parse::<Format>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();

    let zone = if matches.get_flag("utc") {
        Zone::Utc
    } else {
        Zone::Local
    };

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map_or(Config::default().timeout, Duration::from_secs);

    let template = matches
        .get_one::<String>("template")
        .map(String::as_str)
        .map(load_template)
        .transpose()
        .context("Failed to load template")?
        .flatten();

    Ok(Action::Inspect {
        hosts,
        format,
        config: Config {
            skip_verify: matches.get_flag("skip-verify"),
            zone,
            timeout,
            template,
        },
    })
}
