//! Main binary for the cows demo CLI
//!
//! Two modes:
//!
//! - Interactive terminal: run the full LLM tool-calling demo.
//! - Piped stdin: treat the input as a single JSON tool call, execute it
//!   against the registry and answer with a JSON result envelope.

use anyhow::{anyhow, bail, Result};
use clap::{Arg, ArgAction, Command};
use cows::config::Config;
use cows::flow::run_demo;
use cows::llm::HttpGenerator;
use cows::{create_tool_registry, ToolRegistry};
use serde_json::Value;
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("cows")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cowsay Orchestration Workshop - a demonstration harness for LLM tool calling")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a cows.toml configuration file"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Base URL of an OpenAI-compatible chat-completions server"),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("NAME")
                .help("Model identifier passed through to the server"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .help("Poem theme (nature, technology, emotions, adventure, creativity)"),
        )
        .arg(
            Arg::new("temperature")
                .long("temperature")
                .value_name("T")
                .value_parser(clap::value_parser!(f32))
                .help("Sampling temperature for the tool-call turn"),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Token budget for the tool-call turn"),
        )
        .arg(
            Arg::new("follow-up")
                .long("follow-up")
                .value_name("STYLE")
                .help("Follow-up turn style: skip, plain or poem"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let registry = create_tool_registry();

    // Input from a pipe: handle as a direct tool call, no model involved
    if !std::io::stdin().is_terminal() {
        return run_passthrough(&registry);
    }

    let mut config = Config::load(matches.get_one::<String>("config").map(Path::new))?;
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.model.base_url = base_url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model.name = model.clone();
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.demo.theme = theme.clone();
    }
    if let Some(temperature) = matches.get_one::<f32>("temperature") {
        config.demo.temperature = *temperature;
    }
    if let Some(max_tokens) = matches.get_one::<usize>("max-tokens") {
        config.demo.max_tokens = *max_tokens;
    }
    if let Some(follow_up) = matches.get_one::<String>("follow-up") {
        config.demo.follow_up = follow_up.clone();
    }

    let demo_config = config.demo_config()?;
    let generator = HttpGenerator::new(&config.model.base_url, &config.model.name);

    match run_demo(&generator, &registry, &demo_config).await {
        Ok(outcome) => {
            println!("Tool call JSON:");
            println!("{}", outcome.tool_call_json);
            println!();
            println!("{}", outcome.art);
            if let Some(answer) = outcome.follow_up {
                println!("Final answer:");
                println!("{}", answer);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read one JSON tool call from stdin, execute it and print a JSON envelope.
fn run_passthrough(registry: &ToolRegistry) -> Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    match handle_tool_call(registry, input.trim()) {
        Ok(result) => {
            println!("{}", serde_json::json!({ "result": result }));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    }
}

fn handle_tool_call(registry: &ToolRegistry, input: &str) -> Result<String> {
    if input.is_empty() {
        bail!("No input data");
    }

    let call: Value = serde_json::from_str(input)?;
    let tool = call
        .get("tool")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("missing tool name"))?;
    let text = call
        .get("args")
        .and_then(|args| args.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(registry.invoke(tool, text)?)
}
