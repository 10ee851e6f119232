//! Append-only chat log between the user and the responder.

use serde::{Deserialize, Serialize};

use crate::responder::respond;
use crate::StatementSnapshot;

pub const WELCOME: &str = "Hello! Ask me for financial advice or questions about your statement.";

/// Canned questions offered as one-tap suggestions
pub const SUGGESTIONS: [&str; 3] = [
    "How can I improve my profile?",
    "What is my credit utilization?",
    "How can I save money?",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub text: String,
    pub sender: Sender,
}

/// Ordered turns for one session. Turns are only ever appended.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            turns: vec![ConversationTurn {
                text: WELCOME.to_string(),
                sender: Sender::Bot,
            }],
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            text: text.into(),
            sender: Sender::User,
        });
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            text: text.into(),
            sender: Sender::Bot,
        });
    }

    /// Record a question and its answer. Blank input is ignored and returns `None`.
    pub fn ask(&mut self, text: &str, data: &StatementSnapshot) -> Option<&ConversationTurn> {
        if text.trim().is_empty() {
            return None;
        }
        self.push_user(text);
        self.push_bot(respond(text, data));
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::GREETING;

    fn data() -> StatementSnapshot {
        StatementSnapshot {
            card_provider: "Bank".to_string(),
            card_variant: None,
            last_four_digits: "1234".to_string(),
            billing_cycle: "cycle".to_string(),
            payment_due_date: "Dec 20, 2025".to_string(),
            total_balance: 2156.34,
            minimum_payment: 75.0,
            credit_limit: 10000.0,
            available_credit: 7843.66,
            last_statement_balance: 1542.78,
            payments_credits: 1600.0,
            rewards: None,
            transactions: vec![],
        }
    }

    #[test]
    fn test_starts_with_welcome() {
        let c = Conversation::new();
        assert_eq!(c.len(), 1);
        assert_eq!(c.turns()[0].sender, Sender::Bot);
        assert_eq!(c.turns()[0].text, WELCOME);
    }

    #[test]
    fn test_ask_appends_question_then_answer() {
        let mut c = Conversation::new();
        let reply = c.ask("hello", &data()).unwrap().text.clone();
        assert_eq!(reply, GREETING);

        c.ask("due date", &data());
        let senders: Vec<Sender> = c.turns().iter().map(|t| t.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::Bot, Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
        assert_eq!(c.turns()[3].text, "due date");
        assert_eq!(c.turns()[4].text, "Your payment is due on Dec 20, 2025.");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut c = Conversation::new();
        assert!(c.ask("   ", &data()).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_suggestions_are_answered() {
        let mut c = Conversation::new();
        for s in SUGGESTIONS {
            let reply = c.ask(s, &data()).unwrap();
            assert_eq!(reply.sender, Sender::Bot);
            assert!(!reply.text.starts_with("I'm not quite sure"));
        }
        assert_eq!(c.len(), 1 + 2 * SUGGESTIONS.len());
    }
}
