//! Core traits and types for the cows tool system

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Error types for registry operations
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },
    #[error("No tools registered")]
    NoToolsRegistered,
}

/// Type and description of a single tool argument.
///
/// Tool schemas are kept as plain typed records instead of loose JSON so the
/// prompt builder never has to poke at untyped attribute bags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// JSON-schema style type hint ("string", "integer", ...)
    pub type_hint: String,
    /// Optional human-readable description
    pub description: Option<String>,
}

impl ParamSpec {
    pub fn new(type_hint: impl Into<String>) -> Self {
        Self {
            type_hint: type_hint.into(),
            description: None,
        }
    }

    pub fn with_description(type_hint: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_hint: type_hint.into(),
            description: Some(description.into()),
        }
    }
}

/// Read-only snapshot of a tool's metadata, as handed to prompt builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub parameters: BTreeMap<String, ParamSpec>,
}

/// Main trait for all tools
///
/// Tools in this crate are text renderers: they take the validated `text`
/// argument from a tool call and produce a decorated string. `invoke` must
/// not fail outward; implementations convert internal errors into an error
/// string payload.
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// Descriptive tags for display and prompting
    fn tags(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Argument schema, keyed by argument name
    fn parameters(&self) -> BTreeMap<String, ParamSpec>;

    /// Execute the tool with the validated text argument
    fn invoke(&self, text: &str) -> String;

    /// Build the metadata snapshot for this tool
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            tags: self.tags(),
            parameters: self.parameters(),
        }
    }
}

/// Registry for managing available tools
///
/// Explicitly constructed and passed to the orchestrator; there is no
/// process-wide registry instance. Tools are stored in name order so "the
/// first tool" is deterministic.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Metadata snapshots for all registered tools, in name order
    pub fn specs(&self) -> BTreeMap<String, ToolSpec> {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.spec()))
            .collect()
    }

    /// Spec of the first registered tool, used when no name is configured
    pub fn primary_spec(&self) -> Result<ToolSpec, ToolError> {
        self.tools
            .values()
            .next()
            .map(|tool| tool.spec())
            .ok_or(ToolError::NoToolsRegistered)
    }

    /// Invoke a tool by name with the validated text argument
    pub fn invoke(&self, name: &str, text: &str) -> Result<String, ToolError> {
        let tool = self.tools.get(name).ok_or_else(|| ToolError::ToolNotFound {
            name: name.to_string(),
        })?;
        Ok(tool.invoke(text))
    }

    /// List all registered tool names
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check whether any tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
