use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use recurrence_detector::{DateSet, DetectOptions, RecurrenceRule, WeekStartDay};

/// Infer the recurrence rule behind a list of dates
#[derive(Parser, Debug)]
#[command(name = "recurrence-detect", author, version, about, long_about = None)]
struct Cli {
    /// Dates as YYYY-MM-DD. Read from stdin (JSON array or whitespace-separated) when omitted
    dates: Vec<String>,

    /// First day of the calendar week, used when counting week gaps
    #[arg(long, value_enum, default_value_t = WeekStart::Monday)]
    week_start: WeekStart,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum WeekStart {
    Monday,
    Sunday,
}

impl From<WeekStart> for WeekStartDay {
    fn from(value: WeekStart) -> Self {
        match value {
            WeekStart::Monday => WeekStartDay::Monday,
            WeekStart::Sunday => WeekStartDay::Sunday,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Tagged JSON object
    Json,
    /// Human-readable description
    Text,
    /// RFC 5545 RRULE line
    Rrule,
}

fn main() -> Result<()> {
    // Set RUST_LOG=debug to see which detector matched
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let set = if cli.dates.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read dates from stdin")?;
        parse_stdin(&input)?
    } else {
        DateSet::parse(cli.dates.as_slice())?
    };

    let options = DetectOptions {
        week_start: cli.week_start.into(),
    };
    let rule = set.classify(&options);

    println!("{}", render(&rule, cli.format)?);
    Ok(())
}

/// Stdin holds either a JSON array or whitespace-separated dates.
fn parse_stdin(input: &str) -> Result<DateSet> {
    let trimmed = input.trim();
    if trimmed.starts_with(['[', '{']) {
        let value: serde_json::Value =
            serde_json::from_str(trimmed).context("stdin is not valid JSON")?;
        Ok(DateSet::from_json(&value)?)
    } else {
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        Ok(DateSet::parse(tokens.as_slice())?)
    }
}

fn render(rule: &RecurrenceRule, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(rule)?,
        Format::Text => rule.to_string(),
        Format::Rrule => rule
            .to_rrule()
            .map(|r| format!("RRULE:{r}"))
            .unwrap_or_default(),
    })
}
