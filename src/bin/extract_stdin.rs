//! Simple CLI that reads HTML from stdin and writes the article as JSON.
//!
//! Usage: `extract_stdin <url> [--options options.json] [--rules rules.json]`
//!
//! Diagnostics go to stderr; set `RUST_LOG=rs_readability=debug` to see
//! the pipeline decisions.

use std::io::{self, Read};
use std::process::ExitCode;

use rs_readability::{extract_with_rules, ExtractionOptions, RuleRegistry};
use tracing_subscriber::EnvFilter;
use url::Url;

struct Args {
    url: Url,
    options: ExtractionOptions,
    rules: RuleRegistry,
}

fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))
}

fn parse_args() -> Result<Args, String> {
    let mut url = None;
    let mut options = ExtractionOptions::default();
    let mut rules = RuleRegistry::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" => {
                let path = args.next().ok_or("--options needs a file")?;
                options = ExtractionOptions::from_json(&read_file(&path)?).map_err(|e| format!("{path}: {e}"))?;
            }
            "--rules" => {
                let path = args.next().ok_or("--rules needs a file")?;
                rules = RuleRegistry::from_json(&read_file(&path)?).map_err(|e| format!("{path}: {e}"))?;
            }
            _ if url.is_none() => {
                url = Some(Url::parse(&arg).map_err(|e| format!("invalid url {arg}: {e}"))?);
            }
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }

    let url = url.ok_or("usage: extract_stdin <url> [--options FILE] [--rules FILE]")?;
    Ok(Args { url, options, rules })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let article = match extract_with_rules(&html, &args.url, &args.options, &args.rules) {
        Ok(article) => article,
        Err(err) => {
            tracing::error!(url = %args.url, error = %err, "extraction failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&article) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to serialize article: {err}");
            ExitCode::FAILURE
        }
    }
}
