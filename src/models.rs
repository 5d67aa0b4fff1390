use serde::{Deserialize, Serialize};

use crate::anthropic::OutboundMessage;

// Chat widget request format
#[derive(Deserialize, Clone)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    // steering instructions for the model, free text
    #[serde(rename = "systemContext", default)]
    pub system_context: String,
}

// One turn of the conversation as the widget sends it
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    pub content: String,
}

// The only response body shape - 200, 400, 429 and 500 all carry it
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatResponse {
    pub text: String,
}

// The upstream API only accepts "user" and "assistant" roles. Anything
// else the widget sends ("system", "bot", missing) is forwarded as "user".
// Order is preserved and no message is dropped.
pub fn normalize_messages(messages: &[ChatMessage]) -> Vec<OutboundMessage> {
    messages
        .iter()
        .map(|m| OutboundMessage {
            role: if m.role == "assistant" {
                "assistant".to_string()
            } else {
                "user".to_string()
            },
            content: m.content.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_assistant_roles_become_user() {
        let messages = vec![
            ChatMessage { role: "user".to_string(), content: "hi".to_string() },
            ChatMessage { role: "system".to_string(), content: "a".to_string() },
            ChatMessage { role: "bot".to_string(), content: "b".to_string() },
            ChatMessage { role: String::new(), content: "c".to_string() },
        ];

        let normalized = normalize_messages(&messages);
        assert!(normalized.iter().all(|m| m.role == "user"));
    }

    #[test]
    fn test_assistant_role_preserved_and_order_kept() {
        let messages = vec![
            ChatMessage { role: "user".to_string(), content: "Do you treat scorpions?".to_string() },
            ChatMessage { role: "assistant".to_string(), content: "Yes!".to_string() },
            ChatMessage { role: "user".to_string(), content: "How much?".to_string() },
        ];

        let normalized = normalize_messages(&messages);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].role, "user");
        assert_eq!(normalized[1].role, "assistant");
        assert_eq!(normalized[2].role, "user");
        assert_eq!(normalized[2].content, "How much?");
    }

    #[test]
    fn test_request_parses_without_role_or_system_context() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"messages": [{"content": "hello"}]}"#).unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "");
        assert_eq!(req.system_context, "");
    }
}
