//! Prompt construction for the demo conversation flow
//!
//! Pure functions from tool metadata and configuration to role-tagged
//! message sequences. The system prompt reflects the actual registered tool
//! (name, tags, argument schema) rather than hardcoded strings.

use crate::core::{ParamSpec, ToolSpec};
use crate::llm::generate::{Message, Role};
use std::collections::BTreeMap;

/// Themes the user turn can request a poem about
pub const THEMES: [&str; 5] = [
    "nature",
    "technology",
    "emotions",
    "adventure",
    "creativity",
];

/// What the second model turn should produce, if it runs at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUpStyle {
    /// No second turn; the run ends after rendering
    Skip,
    /// Plain natural-language final answer
    #[default]
    Plain,
    /// Short poem commentary in polite Japanese
    PoemCommentary,
}

impl FollowUpStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "skip" => Some(Self::Skip),
            "plain" => Some(Self::Plain),
            "poem" => Some(Self::PoemCommentary),
            _ => None,
        }
    }
}

/// Sorted, comma-joined tag list for display; "none" when the tool has none.
pub fn summarize_tags(spec: &ToolSpec) -> String {
    if spec.tags.is_empty() {
        "none".to_string()
    } else {
        spec.tags
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compact human-friendly description of an argument schema.
pub fn summarize_parameters(parameters: &BTreeMap<String, ParamSpec>) -> String {
    if parameters.is_empty() {
        return "No arguments required".to_string();
    }

    parameters
        .iter()
        .map(|(name, param)| match &param.description {
            Some(description) => format!("{} ({}) - {}", name, param.type_hint, description),
            None => format!("{} ({})", name, param.type_hint),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Example envelope JSON built from the tool's argument names.
fn example_envelope(spec: &ToolSpec) -> String {
    let example_args: serde_json::Map<String, serde_json::Value> = spec
        .parameters
        .keys()
        .map(|name| (name.clone(), serde_json::Value::String("...".to_string())))
        .collect();
    serde_json::json!({"tool": spec.name, "args": example_args}).to_string()
}

/// System prompt reflecting the actual tool metadata.
///
/// Names the tool, states the exact JSON envelope shape and forbids any
/// other content in the response.
pub fn system_prompt(spec: &ToolSpec) -> String {
    format!(
        "You are an AI assistant that can use tools to enhance your responses.\n\
         \n\
         Available tool: {name} - {description}\n\
         Tool format: {example}\n\
         Tool tags: {tags}\n\
         Arguments: {args}\n\
         \n\
         Use this tool when it will make the user's message more playful or expressive.\n\
         \n\
         IMPORTANT: Respond ONLY with a JSON object in the exact format above.\n\
         Do not write explanations or any other text. Just JSON.",
        name = spec.name,
        description = spec.description,
        example = example_envelope(spec),
        tags = summarize_tags(spec),
        args = summarize_parameters(&spec.parameters),
    )
}

/// System/user messages for the first model call.
pub fn initial_messages(theme: &str, spec: &ToolSpec) -> Vec<Message> {
    let user_prompt = format!(
        "Write exactly one short poem about {theme}, add an appropriate emoji at the beginning, \
         and display it using {name}.",
        name = spec.name,
    );
    vec![
        Message::new(Role::System, system_prompt(spec)),
        Message::new(Role::User, user_prompt),
    ]
}

/// Messages for the second model call, feeding the tool result back.
///
/// The assistant turn replays the tool-call JSON the model produced so the
/// conversation reads as a completed invocation.
pub fn follow_up_messages(
    tool_call_json: &str,
    tool_result: &str,
    spec: &ToolSpec,
    style: FollowUpStyle,
) -> Vec<Message> {
    let instruction = match style {
        FollowUpStyle::PoemCommentary => {
            "Now summarise the poem's theme, imagery and emotional resonance in at most three \
             sentences of natural, polite Japanese. Return only the finished passage."
        }
        _ => "Now produce a helpful final answer for the user in natural language.",
    };

    vec![
        Message::new(Role::System, system_prompt(spec)),
        Message::new(Role::Assistant, tool_call_json),
        Message::new(
            Role::User,
            format!("tool_result:\n{tool_result}\n\n{instruction}"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample_spec() -> ToolSpec {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            "text".to_string(),
            ParamSpec::with_description("string", "The message"),
        );
        ToolSpec {
            name: "cowsay".to_string(),
            description: "Generate ASCII art speech bubbles".to_string(),
            tags: ["text", "art"].iter().map(|t| t.to_string()).collect(),
            parameters,
        }
    }

    #[test]
    fn test_summarize_tags_sorted() {
        let spec = sample_spec();
        assert_eq!(summarize_tags(&spec), "art, text");
    }

    #[test]
    fn test_summarize_tags_empty() {
        let mut spec = sample_spec();
        spec.tags = BTreeSet::new();
        assert_eq!(summarize_tags(&spec), "none");
    }

    #[test]
    fn test_summarize_parameters() {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            "text".to_string(),
            ParamSpec::with_description("string", "The text to process"),
        );
        parameters.insert("count".to_string(), ParamSpec::new("integer"));

        let summary = summarize_parameters(&parameters);
        assert_eq!(summary, "count (integer); text (string) - The text to process");
    }

    #[test]
    fn test_summarize_parameters_empty() {
        assert_eq!(
            summarize_parameters(&BTreeMap::new()),
            "No arguments required"
        );
    }

    #[test]
    fn test_system_prompt_contents() {
        let spec = sample_spec();
        let prompt = system_prompt(&spec);

        assert!(prompt.contains("cowsay"));
        assert!(prompt.contains("Generate ASCII art speech bubbles"));
        assert!(prompt.contains("art, text"));
        assert!(prompt.contains("text (string) - The message"));
        assert!(prompt.contains(r#""tool":"cowsay""#));
        assert!(prompt.contains(r#""text":"...""#));
        assert!(prompt.contains("Respond ONLY with a JSON object"));
    }

    #[test]
    fn test_initial_messages() {
        let spec = sample_spec();
        let messages = initial_messages("nature", &spec);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("nature"));
        assert!(messages[1].content.contains("cowsay"));
    }

    #[test]
    fn test_initial_messages_all_themes() {
        let spec = sample_spec();
        for theme in THEMES {
            let messages = initial_messages(theme, &spec);
            assert!(messages[1].content.contains(theme));
        }
    }

    #[test]
    fn test_follow_up_messages() {
        let spec = sample_spec();
        let tool_call = r#"{"tool": "cowsay", "args": {"text": "moo"}}"#;
        let messages = follow_up_messages(tool_call, "< moo >", &spec, FollowUpStyle::Plain);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, tool_call);
        assert!(messages[2].content.starts_with("tool_result:\n< moo >"));
        assert!(messages[2].content.contains("natural language"));
    }

    #[test]
    fn test_follow_up_poem_commentary() {
        let spec = sample_spec();
        let messages = follow_up_messages("{}", "art", &spec, FollowUpStyle::PoemCommentary);
        assert!(messages[2].content.contains("Japanese"));
    }

    #[test]
    fn test_follow_up_style_parse() {
        assert_eq!(FollowUpStyle::parse("skip"), Some(FollowUpStyle::Skip));
        assert_eq!(FollowUpStyle::parse("plain"), Some(FollowUpStyle::Plain));
        assert_eq!(
            FollowUpStyle::parse("poem"),
            Some(FollowUpStyle::PoemCommentary)
        );
        assert_eq!(FollowUpStyle::parse("haiku"), None);
    }
}
