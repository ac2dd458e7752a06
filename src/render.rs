//! ASCII-art cowsay renderer
//!
//! Provides the `cowsay` tool that wraps text in a speech bubble with a cow
//! underneath. The tool never fails outward: internal rendering errors are
//! converted into a `"cowsay error: ..."` payload.

use crate::core::{ParamSpec, Tool};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Maximum bubble width in characters before word wrapping kicks in
const WRAP_WIDTH: usize = 40;

const COW: &str = r#"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||
"#;

/// Internal rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render")]
    EmptyText,
}

/// Tool that renders text as a cow speech bubble
pub struct CowsayTool {
    name: String,
}

impl CowsayTool {
    pub fn new() -> Self {
        Self {
            name: "cowsay".to_string(),
        }
    }
}

impl Default for CowsayTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CowsayTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Generate fun ASCII art speech bubbles with a cow. Use this tool when you want to make messages more engaging and humorous by displaying them as if a cow is speaking."
    }

    fn tags(&self) -> BTreeSet<String> {
        ["text", "art", "fun", "ascii"]
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    fn parameters(&self) -> BTreeMap<String, ParamSpec> {
        let mut params = BTreeMap::new();
        params.insert(
            "text".to_string(),
            ParamSpec::with_description("string", "The message to display in the cow's speech bubble"),
        );
        params
    }

    fn invoke(&self, text: &str) -> String {
        match render_cowsay(text) {
            Ok(art) => art,
            Err(e) => format!("cowsay error: {}", e),
        }
    }
}

/// Render the full cowsay output: speech bubble plus cow.
pub fn render_cowsay(text: &str) -> Result<String, RenderError> {
    let bubble = render_bubble(text)?;
    Ok(format!("{}{}", bubble, COW))
}

/// Render the speech bubble around the given text.
///
/// Embedded newlines are hard line breaks; each line is additionally
/// word-wrapped to the bubble width. Single-line bubbles use `< >` borders,
/// multi-line bubbles use `/ \` on the first line, `\ /` on the last and
/// `| |` in between.
fn render_bubble(text: &str) -> Result<String, RenderError> {
    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| wrap_line(line, WRAP_WIDTH))
        .collect();

    if lines.is_empty() {
        return Err(RenderError::EmptyText);
    }

    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push(' ');
    out.push_str(&"_".repeat(width + 2));
    out.push('\n');

    let count = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let padded = format!("{:<width$}", line, width = width);
        let (open, close) = if count == 1 {
            ('<', '>')
        } else if i == 0 {
            ('/', '\\')
        } else if i == count - 1 {
            ('\\', '/')
        } else {
            ('|', '|')
        };
        out.push_str(&format!("{} {} {}\n", open, padded, close));
    }

    out.push(' ');
    out.push_str(&"-".repeat(width + 2));
    out.push('\n');
    Ok(out)
}

/// Greedy word wrap for a single line of text.
///
/// Words longer than the width are emitted on their own line rather than
/// split, matching how the classic cowsay handles unbreakable tokens.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            wrapped.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}
