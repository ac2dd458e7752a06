//! High-level orchestration for the cowsay tool-calling demo
//!
//! One linear pass per run: build prompt, generate, extract and validate the
//! tool call, render, optionally generate a follow-up. Every step is
//! one-shot; any validation failure terminates the run.

use crate::core::ToolRegistry;
use crate::llm::{
    extract_tool_call, follow_up_messages, initial_messages, FollowUpStyle, GenerationOptions,
    TextGenerator,
};
use anyhow::{anyhow, Result};
use tracing::{debug, info};

/// Configuration for a single demo run.
///
/// Collapses the historical demo variants (differing temperatures, optional
/// explanation turn) into one configurable path.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Poem theme for the user turn
    pub theme: String,
    /// Sampling temperature for the first turn
    pub temperature: f32,
    /// Token budget for the first turn
    pub max_tokens: usize,
    /// Whether and how the second turn runs
    pub follow_up: FollowUpStyle,
    /// Token budget for the follow-up turn
    pub follow_up_max_tokens: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            theme: "nature".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            follow_up: FollowUpStyle::Plain,
            follow_up_max_tokens: 256,
        }
    }
}

/// Results of a completed demo run
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    /// Raw model output for the first turn, containing the tool call JSON
    pub tool_call_json: String,
    /// Name of the tool that was invoked
    pub tool_name: String,
    /// Rendered art from the tool
    pub art: String,
    /// Final answer from the second turn, when one ran
    pub follow_up: Option<String>,
}

/// Execute the full demo round trip.
///
/// Uses the first tool in the registry. Fails fast on an empty registry or
/// any tool-call validation error; the raw model output is included in
/// extraction errors for debuggability.
pub async fn run_demo(
    generator: &dyn TextGenerator,
    registry: &ToolRegistry,
    config: &DemoConfig,
) -> Result<DemoOutcome> {
    let spec = registry.primary_spec()?;
    info!(tool = %spec.name, theme = %config.theme, "starting demo run");

    let messages = initial_messages(&config.theme, &spec);
    let options = GenerationOptions {
        max_tokens: config.max_tokens,
        temperature: Some(config.temperature),
    };
    let raw_tool_call = generator.generate(&messages, &options).await?;
    debug!(chars = raw_tool_call.len(), "model produced tool call turn");

    let invocation = extract_tool_call(&raw_tool_call, &spec.name)
        .map_err(|err| anyhow!("{err}\nRaw model output: {raw_tool_call}"))?;

    let art = registry.invoke(&invocation.tool, &invocation.text)?;

    let follow_up = if config.follow_up == FollowUpStyle::Skip {
        None
    } else {
        let messages = follow_up_messages(&raw_tool_call, &art, &spec, config.follow_up);
        let options = GenerationOptions {
            max_tokens: config.follow_up_max_tokens,
            temperature: Some(0.0),
        };
        Some(generator.generate(&messages, &options).await?)
    };

    Ok(DemoOutcome {
        tool_call_json: raw_tool_call,
        tool_name: invocation.tool,
        art,
        follow_up,
    })
}
