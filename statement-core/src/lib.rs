//! statement-core: statement snapshot types and the rule-based query responder

pub mod accounts;
pub mod conversation;
pub mod error;
pub mod metrics;
pub mod reminders;
pub mod responder;
pub mod statement;
pub mod store;

pub use accounts::{AccountBook, HistoryEntry, UserRecord};
pub use conversation::{Conversation, ConversationTurn, Sender, SUGGESTIONS};
pub use error::StatementError;
pub use metrics::{current_spending, money, paid_last_statement, percent, utilization};
pub use reminders::{render_reminder, ReminderEmail};
pub use responder::{classify, respond, Intent};
pub use statement::{RewardsSummary, StatementSnapshot, Transaction};
pub use store::{KeyValueStore, MemoryStore};
