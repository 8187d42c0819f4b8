//! Final-answer extraction from a finished agent conversation.
//!
//! After an agent run completes, the answer to the user's question lives in
//! one of two places: the arguments of a designated final-answer tool call
//! (e.g. `submit_final_answer`), or the plain text of the last assistant
//! message. [`extract_final_answer`] inspects only the last message of the
//! trace and resolves between the two, tagging the result with its
//! [`AnswerSource`] so callers can tell a structured submission apart from a
//! free-text fallback.
//!
//! One rule is deliberate and load-bearing: once the target tool has been
//! invoked, a malformed or answer-less invocation does NOT fall back to
//! message text. The explicit call is the authoritative attempt, and a broken
//! one must surface as an extraction failure upstream. Free text only wins
//! when the target tool was never invoked at all.
//!
//! Every outcome here is non-exceptional. Malformed argument payloads, wrong
//! tool names, empty traces, and text-less messages all degrade to `None` —
//! nothing panics and nothing returns an error. Each decision point is
//! narrated at debug/warn level without affecting the result.
//!
//! # Examples
//!
//! ```rust
//! use menu_scout::{extract_final_answer, AnswerSource, ContentBlock, Message, ToolUseBlock};
//! use serde_json::json;
//!
//! let trace = vec![
//!     Message::user("What does the cheapest burger cost?"),
//!     Message::assistant(vec![ContentBlock::ToolUse(ToolUseBlock::new(
//!         "call_1",
//!         "submit_final_answer",
//!         json!({"answer": "$6.50"}),
//!     ))]),
//! ];
//!
//! let answer = extract_final_answer(&trace, "submit_final_answer").unwrap();
//! assert_eq!(answer.text, "$6.50");
//! assert_eq!(answer.source, AnswerSource::ToolCall);
//! ```

use crate::types::{ContentBlock, Message, MessageRole, ToolUseBlock};
use serde_json::Value;

/// Which path produced the extracted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// The designated final-answer tool was invoked with a usable `answer`
    /// argument
    ToolCall,
    /// The target tool was never invoked; the last assistant message's text
    /// was used instead
    Content,
}

/// An extracted answer plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalAnswer {
    /// The answer text
    pub text: String,
    /// Which path produced it
    pub source: AnswerSource,
}

/// Classification of a tool invocation's argument payload.
///
/// Models follow the function-calling contract most of the time, but argument
/// payloads do arrive as bare strings, arrays, or numbers. Classifying up
/// front makes the malformed path an explicit case instead of a chain of
/// `as_object()` checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments<'a> {
    /// A well-formed JSON object mapping parameter names to values
    Map(&'a serde_json::Map<String, Value>),
    /// Anything else the model produced where an object was expected
    Malformed(&'a Value),
}

impl<'a> ToolArguments<'a> {
    /// Classify a tool invocation's raw input value.
    pub fn from_value(input: &'a Value) -> Self {
        match input.as_object() {
            Some(map) => ToolArguments::Map(map),
            None => ToolArguments::Malformed(input),
        }
    }

    /// Look up the `answer` argument. `None` when the payload is malformed,
    /// the key is missing, or its value is JSON null.
    pub fn answer(&self) -> Option<&'a Value> {
        match self {
            ToolArguments::Map(map) => map.get("answer").filter(|v| !v.is_null()),
            ToolArguments::Malformed(_) => None,
        }
    }
}

/// Extract the final answer from an agent conversation trace.
///
/// Only the last message of `trace` is inspected. Resolution order:
///
/// 1. Empty trace → `None`.
/// 2. If the last message is assistant-generated and carries tool
///    invocations, scan them in order for the first one named
///    `target_tool_name`. If its arguments are a well-formed object with a
///    non-null `answer` value, that value is the answer
///    ([`AnswerSource::ToolCall`]). A matched invocation stops the scan
///    either way — later invocations are never examined, and a matched but
///    unusable invocation also disables the content fallback.
/// 3. Only when no invocation matched: non-empty text of an assistant-role
///    last message is the answer ([`AnswerSource::Content`]).
/// 4. Otherwise `None`.
///
/// String answer values are returned verbatim; other non-null JSON values are
/// rendered compactly (`true`, `42`, `["a","b"]`).
///
/// The procedure is synchronous, performs no I/O, and never fails — every
/// malformed shape degrades to the next step or to `None`. Callers decide
/// whether `None` is an error at their level.
pub fn extract_final_answer(trace: &[Message], target_tool_name: &str) -> Option<FinalAnswer> {
    let Some(last) = trace.last() else {
        log::warn!("extract_final_answer: no messages in trace");
        return None;
    };

    log::debug!(
        "extract_final_answer: inspecting final message with role {:?}",
        last.role
    );

    let mut target_tool_matched = false;

    if last.role == MessageRole::Assistant {
        let invocations: Vec<&ToolUseBlock> = last
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tool_use) => Some(tool_use),
                _ => None,
            })
            .collect();

        if !invocations.is_empty() {
            log::debug!(
                "extract_final_answer: final message carries {} tool call(s)",
                invocations.len()
            );

            for invocation in invocations {
                if invocation.name != target_tool_name {
                    log::debug!(
                        "extract_final_answer: ignoring tool call '{}'",
                        invocation.name
                    );
                    continue;
                }

                // The first invocation with the target name is authoritative:
                // it ends the scan whether or not it yields an answer, and a
                // miss here must not be papered over by the content fallback.
                target_tool_matched = true;
                log::debug!(
                    "extract_final_answer: processing '{}' tool call",
                    target_tool_name
                );

                match ToolArguments::from_value(&invocation.input) {
                    args @ ToolArguments::Map(_) => match args.answer() {
                        Some(value) => {
                            let text = answer_value_to_string(value);
                            log::debug!("extract_final_answer: answer taken from tool call");
                            return Some(FinalAnswer {
                                text,
                                source: AnswerSource::ToolCall,
                            });
                        }
                        None => {
                            log::warn!(
                                "extract_final_answer: tool '{}' called but 'answer' argument missing or null (arguments: {})",
                                target_tool_name,
                                invocation.input
                            );
                        }
                    },
                    ToolArguments::Malformed(value) => {
                        log::warn!(
                            "extract_final_answer: tool '{}' called but arguments are not an object (arguments: {})",
                            target_tool_name,
                            value
                        );
                    }
                }

                break;
            }

            if !target_tool_matched {
                log::debug!(
                    "extract_final_answer: found tool calls, but none were '{}'",
                    target_tool_name
                );
            }
        }
    }

    // Content fallback: only when the target tool was never invoked — not
    // merely "invoked without a usable answer"
    if !target_tool_matched && last.role == MessageRole::Assistant {
        let text = message_text(last);
        if !text.is_empty() {
            log::debug!(
                "extract_final_answer: no '{}' tool call processed, using message content",
                target_tool_name
            );
            return Some(FinalAnswer {
                text,
                source: AnswerSource::Content,
            });
        }
    }

    log::warn!("extract_final_answer: no answer found via tool call or message content");
    None
}

/// Render an `answer` argument as text: strings verbatim, other JSON values
/// in compact form.
fn answer_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Concatenated text of a message's text blocks.
fn message_text(message: &Message) -> String {
    message
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextBlock;
    use serde_json::json;

    const TARGET: &str = "submit_final_answer";

    fn tool_call_msg(calls: Vec<(&str, Value)>) -> Message {
        let blocks = calls
            .into_iter()
            .enumerate()
            .map(|(i, (name, input))| {
                ContentBlock::ToolUse(ToolUseBlock::new(format!("call_{}", i), name, input))
            })
            .collect();
        Message::assistant(blocks)
    }

    #[test]
    fn test_empty_trace_returns_none() {
        assert_eq!(extract_final_answer(&[], TARGET), None);
    }

    #[test]
    fn test_answer_from_tool_call() {
        let trace = vec![
            Message::user("question"),
            tool_call_msg(vec![(TARGET, json!({"answer": "42"}))]),
        ];

        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "42");
        assert_eq!(answer.source, AnswerSource::ToolCall);
    }

    #[test]
    fn test_answer_from_content_when_no_tool_calls() {
        let trace = vec![
            Message::user("question"),
            Message::assistant(vec![ContentBlock::Text(TextBlock::new("final text"))]),
        ];

        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "final text");
        assert_eq!(answer.source, AnswerSource::Content);
    }

    #[test]
    fn test_matched_tool_without_answer_suppresses_fallback() {
        // Target tool invoked with empty args AND the message has text: the
        // explicit invocation wins and its missing answer is a failure
        let msg = Message::assistant(vec![
            ContentBlock::Text(TextBlock::new("some narration")),
            ContentBlock::ToolUse(ToolUseBlock::new("call_0", "other_tool", json!({"x": 1}))),
            ContentBlock::ToolUse(ToolUseBlock::new("call_1", TARGET, json!({}))),
        ]);
        let trace = vec![Message::user("question"), msg];

        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_unmatched_tools_fall_back_to_content() {
        let msg = Message::assistant(vec![
            ContentBlock::Text(TextBlock::new("fallback text")),
            ContentBlock::ToolUse(ToolUseBlock::new("call_0", "lookup_price", json!({"q": "x"}))),
        ]);
        let trace = vec![msg];

        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "fallback text");
        assert_eq!(answer.source, AnswerSource::Content);
    }

    #[test]
    fn test_malformed_arguments_return_none() {
        let msg = Message::assistant(vec![
            ContentBlock::Text(TextBlock::new("there is text too")),
            ContentBlock::ToolUse(ToolUseBlock::new("call_0", TARGET, json!("not-a-mapping"))),
        ]);
        let trace = vec![msg];

        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_null_answer_counts_as_missing() {
        let trace = vec![tool_call_msg(vec![(TARGET, json!({"answer": null}))])];
        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_first_match_wins_even_when_empty() {
        // Two invocations of the target tool; the first has no answer. The
        // scan stops at the first match, so the usable second one is never
        // reached.
        let trace = vec![tool_call_msg(vec![
            (TARGET, json!({})),
            (TARGET, json!({"answer": "usable"})),
        ])];

        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_scan_skips_other_tools_before_target() {
        let trace = vec![tool_call_msg(vec![
            ("lookup_price", json!({"q": "burger"})),
            (TARGET, json!({"answer": "$6.50"})),
        ])];

        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "$6.50");
        assert_eq!(answer.source, AnswerSource::ToolCall);
    }

    #[test]
    fn test_non_assistant_last_message_returns_none() {
        let trace = vec![
            Message::assistant(vec![ContentBlock::Text(TextBlock::new("earlier answer"))]),
            Message::user("follow-up"),
        ];

        // Only the last message is inspected
        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_assistant_with_empty_text_returns_none() {
        let trace = vec![Message::assistant(vec![ContentBlock::Text(
            TextBlock::new(""),
        )])];

        assert_eq!(extract_final_answer(&trace, TARGET), None);
    }

    #[test]
    fn test_non_string_answer_rendered_compactly() {
        let trace = vec![tool_call_msg(vec![(TARGET, json!({"answer": 42}))])];
        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "42");

        let trace = vec![tool_call_msg(vec![(
            TARGET,
            json!({"answer": {"price": 6.5}}),
        )])];
        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, r#"{"price":6.5}"#);
    }

    #[test]
    fn test_empty_string_answer_is_present() {
        // An empty string is a present value, distinct from missing/null
        let trace = vec![tool_call_msg(vec![(TARGET, json!({"answer": ""}))])];
        let answer = extract_final_answer(&trace, TARGET).unwrap();
        assert_eq!(answer.text, "");
        assert_eq!(answer.source, AnswerSource::ToolCall);
    }

    #[test]
    fn test_tool_arguments_classification() {
        let map = json!({"answer": "x"});
        assert!(matches!(
            ToolArguments::from_value(&map),
            ToolArguments::Map(_)
        ));

        let bad = json!(["not", "a", "map"]);
        assert!(matches!(
            ToolArguments::from_value(&bad),
            ToolArguments::Malformed(_)
        ));
        assert_eq!(ToolArguments::from_value(&bad).answer(), None);
    }
}
