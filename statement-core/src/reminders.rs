//! Payment reminder mockup. Nothing is sent; the email is only rendered.

use serde::{Deserialize, Serialize};

use crate::metrics::money;
use crate::StatementSnapshot;

pub const DEFAULT_RECIPIENT: &str = "you@example.com";
pub const REMINDER_SUBJECT: &str = "Upcoming Payment Reminder";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ReminderEmail {
    /// Header block plus body, the way a mail client preview would show it
    pub fn render(&self) -> String {
        format!("To: {}\nSubject: {}\n\n{}", self.to, self.subject, self.body)
    }
}

/// Build the reminder for a statement. Blank or missing recipients fall back to
/// [`DEFAULT_RECIPIENT`].
pub fn render_reminder(data: &StatementSnapshot, email: Option<&str>) -> ReminderEmail {
    let to = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_RECIPIENT)
        .to_string();

    let body = format!(
        "Hi there,\n\n\
This is a friendly reminder that your payment for your {} credit card is due soon.\n\n\
- Due Date: {}\n\
- Total Balance: ${}\n\
- Minimum Payment: ${}\n\n\
Paying on time helps you avoid late fees and protects your credit score. You can log in to your provider's website to make a payment.\n\n\
Thank you for using our service!",
        data.card_provider,
        data.payment_due_date,
        money(data.total_balance),
        money(data.minimum_payment),
    );

    ReminderEmail {
        to,
        subject: REMINDER_SUBJECT.to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> StatementSnapshot {
        StatementSnapshot {
            card_provider: "Major Bank Inc.".to_string(),
            card_variant: None,
            last_four_digits: "1234".to_string(),
            billing_cycle: "cycle".to_string(),
            payment_due_date: "Dec 20, 2025".to_string(),
            total_balance: 2156.34,
            minimum_payment: 75.0,
            credit_limit: 10000.0,
            available_credit: 7843.66,
            last_statement_balance: 0.0,
            payments_credits: 0.0,
            rewards: None,
            transactions: vec![],
        }
    }

    #[test]
    fn test_default_recipient() {
        let r = render_reminder(&data(), None);
        assert_eq!(r.to, DEFAULT_RECIPIENT);
        assert_eq!(render_reminder(&data(), Some("  ")).to, DEFAULT_RECIPIENT);
    }

    #[test]
    fn test_body_lists_payment_facts() {
        let r = render_reminder(&data(), Some("sam@example.org"));
        assert_eq!(r.to, "sam@example.org");
        assert_eq!(r.subject, "Upcoming Payment Reminder");
        assert!(r.body.contains("your Major Bank Inc. credit card"));
        assert!(r.body.contains("- Due Date: Dec 20, 2025"));
        assert!(r.body.contains("- Total Balance: $2156.34"));
        assert!(r.body.contains("- Minimum Payment: $75.00"));
    }

    #[test]
    fn test_render_includes_headers() {
        let text = render_reminder(&data(), None).render();
        assert!(text.starts_with("To: you@example.com\nSubject: Upcoming Payment Reminder\n\nHi there,"));
    }
}
