use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use counting_core::{
    report::{history_lines, render_report},
    CountingEngine,
};
use serde::Serialize;
use shared::{
    domain::CountResult,
    error::{CountError, ErrorReport},
    request::{CountRequest, DEFAULT_MAX_RANGE_LEN},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "count", about = "Range, text, and list counting from the command line")]
struct Cli {
    /// Print machine-readable JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,
    /// Largest range that will be generated.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RANGE_LEN)]
    max_range_len: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count from START to END (inclusive) by STEP.
    Range {
        #[arg(allow_negative_numbers = true)]
        start: String,
        #[arg(allow_negative_numbers = true)]
        end: String,
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        step: String,
    },
    /// Tally character and word frequencies in TEXT.
    Text {
        text: String,
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Tally items of a comma-separated LIST.
    Items { list: String },
    /// Run JSON-lines requests from stdin through one engine and print the history.
    Session,
}

#[derive(Serialize)]
struct CountOutput<'a> {
    request: &'a CountRequest,
    result: &'a CountResult,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<CountError>() {
                Some(count_err) if cli.json => {
                    let report = ErrorReport::from(count_err);
                    match serde_json::to_string(&report) {
                        Ok(line) => println!("{line}"),
                        Err(_) => eprintln!("error: {count_err}"),
                    }
                }
                _ => eprintln!("error: {err:#}"),
            }
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut engine = CountingEngine::new();
    let request = match &cli.command {
        Command::Range { start, end, step } => CountRequest::range_from_fields(start, end, step)?,
        Command::Text {
            text,
            case_sensitive,
        } => CountRequest::text_from_input(text, *case_sensitive)?,
        Command::Items { list } => CountRequest::items_from_list(list)?,
        Command::Session => return run_session(cli, &mut engine, io::stdin().lock()),
    };

    let result = execute(&mut engine, &request, cli.max_range_len)?;
    let mut stdout = io::stdout().lock();
    print_result(&mut stdout, cli.json, &request, &result)?;
    Ok(ExitCode::SUCCESS)
}

fn execute(
    engine: &mut CountingEngine,
    request: &CountRequest,
    max_range_len: usize,
) -> Result<CountResult, CountError> {
    request.ensure_within(max_range_len)?;
    engine.execute(request)
}

fn print_result(
    out: &mut impl Write,
    json: bool,
    request: &CountRequest,
    result: &CountResult,
) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &CountOutput { request, result })?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_report(request, result).trim_end())?;
    }
    Ok(())
}

fn run_session(cli: &Cli, engine: &mut CountingEngine, input: impl BufRead) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let failures = run_requests(engine, input, &mut stdout, cli.json, cli.max_range_len)?;
    if failures > 0 {
        tracing::warn!(failures, "session finished with rejected requests");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes one request per non-blank, non-`#` line and ends with the history.
/// Returns how many requests were rejected.
fn run_requests(
    engine: &mut CountingEngine,
    input: impl BufRead,
    out: &mut impl Write,
    json: bool,
    max_range_len: usize,
) -> Result<usize> {
    let mut failures = 0;
    for (idx, line) in input.lines().enumerate() {
        let line = line.context("failed to read request line")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let request: CountRequest = serde_json::from_str(trimmed)
            .with_context(|| format!("line {}: malformed request", idx + 1))?;
        let checked = request
            .validate()
            .and_then(|request| Ok((execute(engine, &request, max_range_len)?, request)));
        match checked {
            Ok((result, request)) => print_result(out, json, &request, &result)?,
            Err(err) => {
                failures += 1;
                if json {
                    serde_json::to_writer(&mut *out, &ErrorReport::from(&err))?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "line {}: {err}", idx + 1)?;
                }
            }
        }
    }

    if json {
        serde_json::to_writer(&mut *out, engine.log())?;
        writeln!(out)?;
    } else {
        writeln!(out, "\nHistory:")?;
        for line in history_lines(engine.log()) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str, json: bool) -> (usize, String) {
        let mut engine = CountingEngine::new();
        let mut out = Vec::new();
        let failures = run_requests(&mut engine, input.as_bytes(), &mut out, json, 1_000)
            .expect("session");
        (failures, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn parses_negative_range_arguments() {
        let cli = Cli::try_parse_from(["count", "range", "10", "-2", "--step", "-3"])
            .expect("parse");
        match cli.command {
            Command::Range { start, end, step } => {
                assert_eq!((start.as_str(), end.as_str(), step.as_str()), ("10", "-2", "-3"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn session_prints_reports_and_history() {
        let input = r#"
# warm up
{"mode":"range","start":1,"end":3,"step":1}
{"mode":"items","items":["a","b","a"]}
"#;
        let (failures, output) = session(input, false);
        assert_eq!(failures, 0);
        assert!(output.contains("Counting from 1 to 3 by 1:\n[1, 2, 3]\n"));
        assert!(output.contains("  'a': 2\n"));
        assert!(output.ends_with(
            "History:\n1. Basic Count - from 1 to 3 by 1\n2. Custom Count - 3 items\n"
        ));
    }

    #[test]
    fn session_reports_rejected_requests_and_keeps_going() {
        let input = concat!(
            "{\"mode\":\"range\",\"start\":1,\"end\":3,\"step\":0}\n",
            "{\"mode\":\"range\",\"start\":0,\"end\":5000,\"step\":1}\n",
            "{\"mode\":\"text\",\"text\":\"Hi hi\",\"case_sensitive\":false}\n",
        );
        let (failures, output) = session(input, true);
        assert_eq!(failures, 2);

        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        let zero_step: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(zero_step["code"], "invalid_argument");
        let too_long: serde_json::Value = serde_json::from_str(lines[1]).expect("json");
        assert_eq!(too_long["code"], "validation");
        let counted: serde_json::Value = serde_json::from_str(lines[2]).expect("json");
        assert_eq!(counted["result"]["payload"]["words"]["hi"], 2);
        let history: serde_json::Value = serde_json::from_str(lines[3]).expect("json");
        assert_eq!(history.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn session_rejects_empty_text_and_item_lists_without_logging() {
        let input = concat!(
            "{\"mode\":\"text\",\"text\":\"\",\"case_sensitive\":false}\n",
            "{\"mode\":\"items\",\"items\":[]}\n",
            "{\"mode\":\"items\",\"items\":[\" \",\"\"]}\n",
            "{\"mode\":\"items\",\"items\":[\" a \",\"\",\"a\"]}\n",
        );
        let (failures, output) = session(input, false);
        assert_eq!(failures, 3);
        assert!(output.contains("line 1: Please enter text to analyze.\n"));
        assert!(output.contains("line 2: Please enter items to count.\n"));
        assert!(output.contains("line 3: Please enter valid items separated by commas.\n"));
        assert!(output.contains("  'a': 2\n"));
        assert!(output.ends_with("History:\n1. Custom Count - 2 items\n"));
    }

    #[test]
    fn malformed_session_line_aborts_with_line_number() {
        let mut engine = CountingEngine::new();
        let mut out = Vec::new();
        let err = run_requests(&mut engine, "not json\n".as_bytes(), &mut out, false, 10)
            .expect_err("malformed");
        assert!(err.to_string().contains("line 1"));
    }
}
