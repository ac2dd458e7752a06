//! Tool-call extraction and validation for raw model output
//!
//! Models are unreliable narrators of strict formats: they wrap the required
//! JSON in prose, markdown fences or doubled braces despite instructions
//! forbidding it. The extractor is therefore maximally permissive about
//! *surrounding* noise while staying maximally strict about the parsed
//! object's shape (exact tool-name match, non-empty text argument). Any
//! reimplementation must keep that asymmetry.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Validation failures when recovering a tool call from model output
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoJson,
    #[error("invalid JSON in model output: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("expected a JSON object, received a different value")]
    NotAnObject,
    #[error("unexpected tool requested: {requested}")]
    WrongTool { requested: String },
    #[error("expected args to be a JSON object")]
    MalformedArgs,
    #[error("tool call did not include text")]
    MissingText,
}

/// The parsed, schema-checked result of tool-call extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvocation {
    /// Tool name, equal to the expected name passed to `extract_tool_call`
    pub tool: String,
    /// Trimmed text argument; interior whitespace preserved verbatim
    pub text: String,
}

/// Locate and validate a JSON tool call embedded in raw model output.
///
/// Scans for the first `{`, parses one complete JSON value from there and
/// checks it against the expected envelope shape
/// `{"tool": <name>, "args": {"text": <string>}}`. Text surrounding the JSON
/// is tolerated: a prefix is skipped, a suffix is logged as an advisory and
/// ignored.
pub fn extract_tool_call(
    raw: &str,
    expected_tool: &str,
) -> Result<ValidatedInvocation, ExtractError> {
    let start = raw.find('{').ok_or(ExtractError::NoJson)?;
    let payload = &raw[start..];

    let (value, rest) = match parse_first_value(payload) {
        Ok(parsed) => parsed,
        // Some models double-wrap the envelope as {{...}}. Retrying from the
        // second brace tolerates exactly that malformation, nothing more.
        Err(err) if payload.starts_with("{{") => {
            parse_first_value(&payload[1..]).map_err(|_| ExtractError::InvalidJson(err))?
        }
        Err(err) => return Err(ExtractError::InvalidJson(err)),
    };

    if !rest.trim().is_empty() {
        warn!("ignoring trailing text after JSON tool call");
    }

    let object = value.as_object().ok_or(ExtractError::NotAnObject)?;

    let requested = object.get("tool");
    match requested.and_then(Value::as_str) {
        Some(tool) if tool == expected_tool => {}
        _ => {
            let requested = match requested {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "(missing)".to_string(),
            };
            return Err(ExtractError::WrongTool { requested });
        }
    }

    let args = object
        .get("args")
        .and_then(Value::as_object)
        .ok_or(ExtractError::MalformedArgs)?;

    let text = args
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ExtractError::MissingText)?;

    Ok(ValidatedInvocation {
        tool: expected_tool.to_string(),
        text: text.to_string(),
    })
}

/// Parse the first complete JSON value from `payload`, returning it together
/// with the unconsumed remainder. Trailing bytes are not an error here.
fn parse_first_value(payload: &str) -> Result<(Value, &str), serde_json::Error> {
    let mut stream = serde_json::Deserializer::from_str(payload).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => {
            let rest = &payload[stream.byte_offset()..];
            Ok((value, rest))
        }
        Some(Err(e)) => Err(e),
        // Blank payload; re-parse to surface the underlying EOF error
        None => serde_json::from_str::<Value>(payload).map(|v| (v, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_tool_call() {
        let raw = r#"{"tool": "cowsay", "args": {"text": "Hello world"}}"#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.tool, "cowsay");
        assert_eq!(invocation.text, "Hello world");
    }

    #[test]
    fn test_extract_with_leading_prose() {
        let raw = r#"Here is your poem: {"tool": "cowsay", "args": {"text": "Hello world"}}"#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "Hello world");
    }

    #[test]
    fn test_extract_with_surrounding_prose() {
        let raw = r#"I will use the tool: {"tool": "cowsay", "args": {"text": "Test poem"}} and that's it."#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "Test poem");
    }

    #[test]
    fn test_extract_multiline_json() {
        let raw = "Let me create a poem:\n{\"tool\": \"cowsay\",\n \"args\": {\"text\": \"Multiline\\npoem\"}}";
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "Multiline\npoem");
    }

    #[test]
    fn test_extract_trims_text_preserving_interior() {
        let raw = r#"{"tool": "cowsay", "args": {"text": "  two\nlines  "}}"#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "two\nlines");
    }

    #[test]
    fn test_extract_doubled_brace() {
        let raw = r#"{{"tool": "cowsay", "args": {"text": "wrapped"}}}"#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "wrapped");
    }

    #[test]
    fn test_extract_markdown_fence() {
        let raw = "```json\n{\"tool\": \"cowsay\", \"args\": {\"text\": \"fenced\"}}\n```";
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "fenced");
    }

    #[test]
    fn test_extract_no_json() {
        let result = extract_tool_call("Just some text without JSON", "cowsay");
        assert!(matches!(result, Err(ExtractError::NoJson)));
    }

    #[test]
    fn test_extract_malformed_json() {
        let raw = r#"{"tool": "cowsay", "args": {"text": "test""#;
        let result = extract_tool_call(raw, "cowsay");
        assert!(matches!(result, Err(ExtractError::InvalidJson(_))));
    }

    #[test]
    fn test_extract_lone_brace_is_invalid_json() {
        let result = extract_tool_call("the value is {", "cowsay");
        assert!(matches!(result, Err(ExtractError::InvalidJson(_))));
    }

    #[test]
    fn test_extract_wrong_tool() {
        let raw = r#"{"tool": "wrong-tool", "args": {"text": "test"}}"#;
        let err = extract_tool_call(raw, "cowsay").unwrap_err();
        match err {
            ExtractError::WrongTool { ref requested } => assert_eq!(requested, "wrong-tool"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("wrong-tool"));
    }

    #[test]
    fn test_extract_missing_tool_field() {
        let raw = r#"{"args": {"text": "test"}}"#;
        let err = extract_tool_call(raw, "cowsay").unwrap_err();
        match err {
            ExtractError::WrongTool { requested } => assert_eq!(requested, "(missing)"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_non_string_tool_field() {
        let raw = r#"{"tool": 42, "args": {"text": "test"}}"#;
        let err = extract_tool_call(raw, "cowsay").unwrap_err();
        match err {
            ExtractError::WrongTool { requested } => assert_eq!(requested, "42"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_args_missing_or_not_object() {
        let missing = extract_tool_call(r#"{"tool": "cowsay"}"#, "cowsay");
        assert!(matches!(missing, Err(ExtractError::MalformedArgs)));

        let not_object = extract_tool_call(r#"{"tool": "cowsay", "args": "text"}"#, "cowsay");
        assert!(matches!(not_object, Err(ExtractError::MalformedArgs)));
    }

    #[test]
    fn test_extract_missing_or_empty_text() {
        for raw in [
            r#"{"tool": "cowsay", "args": {}}"#,
            r#"{"tool": "cowsay", "args": {"text": ""}}"#,
            r#"{"tool": "cowsay", "args": {"text": "   "}}"#,
            r#"{"tool": "cowsay", "args": {"text": 7}}"#,
        ] {
            let result = extract_tool_call(raw, "cowsay");
            assert!(matches!(result, Err(ExtractError::MissingText)), "{raw}");
        }
    }

    #[test]
    fn test_extract_trailing_content_ignored() {
        let raw = r#"{"tool": "cowsay", "args": {"text": "hi"}} extra notes"#;
        let invocation = extract_tool_call(raw, "cowsay").unwrap();
        assert_eq!(invocation.text, "hi");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExtractError::NoJson.to_string(),
            "no JSON object found in model output"
        );
        assert_eq!(
            ExtractError::MissingText.to_string(),
            "tool call did not include text"
        );
        assert_eq!(
            ExtractError::MalformedArgs.to_string(),
            "expected args to be a JSON object"
        );
    }
}
