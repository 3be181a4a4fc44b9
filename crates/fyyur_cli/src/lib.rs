//! Command-line front end for the Fyyur client helpers.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use fyyur_client::config::Config;
use fyyur_client::http_client::ReqwestTransport;
use fyyur_client::{
    DeleteOutcome, DisplayFormat, MissingFields, Navigator, TimestampParts, VenueDeleter,
    format_show_time,
};
use tracing_subscriber::EnvFilter;

/// Used when neither variable is set or the configured filter does not parse.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Resolve the log filter from `FYYUR_LOG_LEVEL`, then `RUST_LOG`, then
/// `info`. Returns the directive actually in effect alongside the filter.
pub fn log_filter<F>(mut get: F) -> (String, EnvFilter)
where
    F: FnMut(&str) -> Option<String>,
{
    let requested = get("FYYUR_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    match EnvFilter::try_new(&requested) {
        Ok(filter) => (requested, filter),
        Err(_) => (
            DEFAULT_LOG_FILTER.to_string(),
            EnvFilter::new(DEFAULT_LOG_FILTER),
        ),
    }
}

/// Shown for timestamps that do not describe an instant.
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Parser)]
#[command(name = "fyyur")]
#[command(about = "Fyyur venue site helpers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an ISO-8601-like timestamp into a UTC instant.
    ParseDate {
        input: String,
        /// Fill a missing day with 1 and missing time fields with 0.
        #[arg(long)]
        lenient: bool,
        /// Print the parsed components alongside the instant as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a timestamp the way show listings display it.
    FormatDate {
        input: String,
        #[arg(long, default_value_t = DisplayFormat::Medium)]
        format: DisplayFormat,
        #[arg(long)]
        lenient: bool,
    },

    /// Delete venues by id, following the server's redirect if any.
    DeleteVenue {
        /// One request is sent per id, repeated ids included.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
        /// Site root; overrides FYYUR_BASE_URL.
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

/// Prints the new location instead of loading it.
pub struct PrintLocation;

impl Navigator for PrintLocation {
    fn navigate(&self, url: &str) {
        println!("location: {url}");
    }
}

fn policy(lenient: bool) -> MissingFields {
    if lenient {
        MissingFields::StartOfPeriod
    } else {
        MissingFields::Reject
    }
}

pub fn render_parse(input: &str, lenient: bool, json: bool) -> String {
    let parts = TimestampParts::parse(input);
    let instant = parts
        .to_instant(policy(lenient))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));
    if json {
        serde_json::json!({ "input": input, "parts": parts, "instant": instant }).to_string()
    } else {
        instant.unwrap_or_else(|| INVALID_DATE.to_string())
    }
}

pub fn render_format(input: &str, format: DisplayFormat, lenient: bool) -> Result<String> {
    let instant = TimestampParts::parse(input)
        .to_instant(policy(lenient))
        .ok_or_else(|| anyhow!("'{input}' is not a valid timestamp"))?;
    Ok(format_show_time(&instant, format))
}

pub fn render_outcome(venue_id: &str, outcome: &DeleteOutcome, json: bool) -> String {
    if json {
        let mut value = serde_json::to_value(outcome).unwrap_or_default();
        value["venue_id"] = venue_id.into();
        return value.to_string();
    }
    match outcome {
        DeleteOutcome::Navigated { url } => format!("venue {venue_id}: redirected to {url}"),
        DeleteOutcome::NoAction { status } => format!("venue {venue_id}: status {status}"),
        DeleteOutcome::Failed => format!("venue {venue_id}: request failed"),
    }
}

pub async fn delete_venues(
    config: &Config,
    ids: &[String],
    navigator: Arc<dyn Navigator>,
) -> Result<Vec<DeleteOutcome>> {
    let transport = ReqwestTransport::from_config(config).context("building http client")?;
    let deleter = VenueDeleter::new(Arc::new(transport), navigator);
    Ok(deleter.delete_venues(ids).await)
}

/// Run one command, returning the lines to print.
pub async fn run(cli: Cli) -> Result<Vec<String>> {
    match cli.command {
        Command::ParseDate {
            input,
            lenient,
            json,
        } => Ok(vec![render_parse(&input, lenient, json)]),
        Command::FormatDate {
            input,
            format,
            lenient,
        } => Ok(vec![render_format(&input, format, lenient)?]),
        Command::DeleteVenue {
            ids,
            base_url,
            json,
        } => {
            let mut config = Config::from_env()?;
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            tracing::debug!(base_url = %config.base_url, count = ids.len(), "deleting venues");
            let outcomes = delete_venues(&config, &ids, Arc::new(PrintLocation)).await?;
            Ok(ids
                .iter()
                .zip(&outcomes)
                .map(|(id, outcome)| render_outcome(id, outcome, json))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_prints_rfc3339() {
        assert_eq!(
            render_parse("2023-06-15T10:30:00.000Z", false, false),
            "2023-06-15T10:30:00.000Z"
        );
    }

    #[test]
    fn parse_date_invalid_prints_marker() {
        assert_eq!(render_parse("2023-06-15", false, false), INVALID_DATE);
        assert_eq!(
            render_parse("2023-06-15", true, false),
            "2023-06-15T00:00:00.000Z"
        );
    }

    #[test]
    fn parse_date_json_includes_parts() {
        let out = render_parse("2023-06-15", false, true);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["parts"]["year"], 2023);
        assert_eq!(v["parts"]["month"], 6);
        assert!(v["parts"]["hour"].is_null());
        assert!(v["instant"].is_null());
    }

    #[test]
    fn format_date_rejects_invalid_input() {
        assert!(render_format("soon", DisplayFormat::Full, false).is_err());
        assert_eq!(
            render_format("2023-06-15T10:30:00.000Z", DisplayFormat::Medium, false).unwrap(),
            "Thu 06, 15, 2023 10:30AM"
        );
    }

    #[test]
    fn outcome_lines() {
        assert_eq!(
            render_outcome("3", &DeleteOutcome::NoAction { status: 404 }, false),
            "venue 3: status 404"
        );
        let v: serde_json::Value = serde_json::from_str(&render_outcome(
            "3",
            &DeleteOutcome::Navigated {
                url: "http://localhost:5000/".into(),
            },
            true,
        ))
        .unwrap();
        assert_eq!(v["outcome"], "navigated");
        assert_eq!(v["venue_id"], "3");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["fyyur", "delete-venue", "1", "2", "--base-url", "http://x"])
            .expect("parse");
        match cli.command {
            Command::DeleteVenue { ids, base_url, .. } => {
                assert_eq!(ids, vec!["1", "2"]);
                assert_eq!(base_url.as_deref(), Some("http://x"));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["fyyur", "format-date", "2023-06-15", "--format", "full"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::FormatDate {
                format: DisplayFormat::Full,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["fyyur", "delete-venue"]).is_err());
    }
}
