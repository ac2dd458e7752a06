//! # COWS - Cowsay Orchestration Workshop
//!
//! A demonstration harness showing a locally hosted language model invoking
//! a single external tool - an ASCII-art cowsay renderer - through a minimal
//! JSON tool-calling protocol, then optionally producing a natural-language
//! follow-up.
//!
//! ## Features
//!
//! - **Tool Registry**: explicitly constructed registry of text-rendering tools
//! - **Prompt Building**: message sequences generated from live tool metadata
//! - **Tool-Call Extraction**: lenient about surrounding noise, strict about
//!   the parsed envelope shape
//! - **Orchestration**: one configurable linear pass per run, fail-fast
//!
//! ## Usage
//!
//! ```rust
//! use cows::create_tool_registry;
//! use cows::llm::extract_tool_call;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = create_tool_registry();
//! let spec = registry.primary_spec()?;
//!
//! let raw = r#"Here you go: {"tool": "cowsay", "args": {"text": "moo"}}"#;
//! let invocation = extract_tool_call(raw, &spec.name)?;
//! let art = registry.invoke(&invocation.tool, &invocation.text)?;
//! println!("{}", art);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod flow;
pub mod llm;
pub mod render;

// Re-export main types
pub use config::Config;
pub use core::{ParamSpec, Tool, ToolError, ToolRegistry, ToolSpec};
pub use flow::{run_demo, DemoConfig, DemoOutcome};
pub use render::CowsayTool;

/// Initialize the tool registry with all available tools
pub fn create_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Art renderers
    registry.register(Box::new(CowsayTool::new()));

    registry
}
