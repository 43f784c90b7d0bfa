//! Decoding of agent conversation messages into [`AgentReply`] values.
//!
//! The agent service returns assistant messages with an optional `content`
//! string and an optional list of tool calls whose `results` may be a JSON
//! string or an already-decoded object. Everything here is lenient: fields of
//! the wrong type are ignored rather than rejected.

use deal_finder_core::{AgentReply, ProductAlternative};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{FinderError, Result};
use crate::parser::AlternativesParser;

/// One message of an agent conversation.
///
/// Each tool call is kept as raw JSON; only its `results` field is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationMessage {
    #[serde(default, deserialize_with = "or_default")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default, deserialize_with = "or_default")]
    pub tool_calls: Option<Vec<Value>>,
}

impl ConversationMessage {
    pub fn is_assistant(&self) -> bool {
        self.role.as_deref() == Some("assistant")
    }
}

/// A conversation snapshot as returned by the agent service.
///
/// Entries that are not message objects are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conversation {
    #[serde(default, deserialize_with = "messages_or_skip")]
    pub messages: Vec<ConversationMessage>,
}

/// Returns the most recent assistant message, if any.
pub fn last_assistant_message(conversation: &Conversation) -> Option<&ConversationMessage> {
    conversation
        .messages
        .iter()
        .rev()
        .find(|message| message.is_assistant())
}

fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn messages_or_skip<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<ConversationMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Decodes a JSON document holding either a conversation (`{"messages": [...]}`)
/// or a single message, returning the assistant message to parse.
///
/// A conversation without an assistant message yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`UnrecognizedDocument`](FinderError::UnrecognizedDocument) when
/// `document` is not a JSON object.
pub fn message_from_document(document: Value) -> Result<Option<ConversationMessage>> {
    if !document.is_object() {
        return Err(FinderError::UnrecognizedDocument(
            "expected a JSON object".to_string(),
        ));
    }

    if document.get("messages").is_some() {
        let conversation: Conversation = serde_json::from_value(document)?;
        return Ok(last_assistant_message(&conversation).cloned());
    }

    Ok(Some(serde_json::from_value(document)?))
}

/// Splits a message into tool-result payloads followed by its text content.
///
/// String `results` are decoded as JSON; results that fail to decode are
/// skipped, as are tool calls that are not objects. Non-string `content` is
/// ignored.
///
/// # Examples
///
/// ```
/// use deal_finder_parser::reply::{ConversationMessage, decode_message};
///
/// let message: ConversationMessage = serde_json::from_str(
///     r#"{"role":"assistant","content":"hi","tool_calls":[{"results":"{\"alternatives\":[]}"}]}"#,
/// ).unwrap();
/// let replies = decode_message(&message);
/// assert_eq!(replies.len(), 2);
/// assert!(replies[0].as_payload().is_some());
/// assert_eq!(replies[1].as_text(), Some("hi"));
/// ```
pub fn decode_message(message: &ConversationMessage) -> Vec<AgentReply> {
    let mut replies = Vec::new();

    for (idx, call) in message.tool_calls.iter().flatten().enumerate() {
        match call.get("results") {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                Ok(payload) => replies.push(AgentReply::ToolResult { payload }),
                Err(err) => {
                    warn!(tool_call = idx, error = %err, "Skipping undecodable tool result");
                }
            },
            Some(payload) => replies.push(AgentReply::ToolResult {
                payload: payload.clone(),
            }),
        }
    }

    if let Some(Value::String(text)) = &message.content {
        replies.push(AgentReply::Text { text: text.clone() });
    }

    replies
}

/// Resolves alternatives from decoded replies.
///
/// The first tool result whose `alternatives` array yields at least one
/// usable record wins. Otherwise the first text reply is run through the
/// [`AlternativesParser`].
pub fn alternatives_from_replies(
    replies: &[AgentReply],
    config: &ParserConfig,
) -> Vec<ProductAlternative> {
    for payload in replies.iter().filter_map(AgentReply::as_payload) {
        let found = alternatives_from_payload(payload);
        if !found.is_empty() {
            debug!(count = found.len(), "Using tool result alternatives");
            return found;
        }
    }

    let text = replies.iter().find_map(AgentReply::as_text);
    AlternativesParser::new(text, *config).parse()
}

/// Decodes and resolves one assistant message.
pub fn alternatives_from_message(
    message: &ConversationMessage,
    config: &ParserConfig,
) -> Vec<ProductAlternative> {
    alternatives_from_replies(&decode_message(message), config)
}

fn alternatives_from_payload(payload: &Value) -> Vec<ProductAlternative> {
    let Some(items) = payload.get("alternatives").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value::<ProductAlternative>(item.clone()).ok())
        .filter(ProductAlternative::has_required_fields)
        .collect()
}
