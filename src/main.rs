// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pipewrap::config::load_and_validate_config;
use pipewrap::ToolWrapper;

const DEFAULT_LOG_LEVEL: &str = "info";
const COMMENT_PREFIX: char = '#';

fn init_tracing(log_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or(DEFAULT_LOG_LEVEL)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Control lines from stdin, skipping blank lines and `#` comments.
fn read_control_lines() -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read control lines from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines)
}

/// The control line given on the command line, if any. It must be a single argument.
fn control_line_arg(rest: &[String]) -> anyhow::Result<Option<&str>> {
    match rest {
        [] => Ok(None),
        [line] => Ok(Some(line.as_str())),
        _ => anyhow::bail!(
            "expected the control line as a single quoted argument, got {} arguments",
            rest.len()
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <config.yaml> [control line]", args[0]);
        eprintln!("       {} <config.yaml> < control-lines.txt", args[0]);
        eprintln!("Example: {} pipewrap.yaml 'in.txt > text upper | text count'", args[0]);
        return Ok(ExitCode::from(2));
    }

    let config = load_and_validate_config(&args[1])
        .with_context(|| format!("failed to load configuration '{}'", args[1]))?;
    init_tracing(config.log_level.as_deref());
    let wrapper = ToolWrapper::from_config(&config);

    let control_line = match control_line_arg(&args[2..]) {
        Ok(control_line) => control_line,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };

    if let Some(control_line) = control_line {
        return match wrapper.wrap(control_line).await {
            Ok(output) => {
                print_output(&output);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::error!(control_line = %control_line, error = %e, "Control line failed");
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let lines = read_control_lines()?;
    let results = wrapper.wrap_all(&lines).await;

    let mut failed = false;
    for (line, result) in lines.iter().zip(results) {
        match result {
            Ok(output) => println!("{}\t{}", line, output.trim_end()),
            Err(e) => {
                failed = true;
                tracing::error!(control_line = %line, error = %e, "Control line failed");
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_control_line_arg() {
        assert_eq!(control_line_arg(&[]).unwrap(), None);

        let single = args(&[r#"text emit -message="a b""#]);
        assert_eq!(
            control_line_arg(&single).unwrap(),
            Some(r#"text emit -message="a b""#)
        );

        // What the shell hands over for an unquoted `text emit -message="a b"`.
        let split = args(&["text", "emit", "-message=a b"]);
        assert!(control_line_arg(&split).is_err());
    }
}
