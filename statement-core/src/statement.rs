//! Statement snapshot types shared by the responder, the ingest layer and the reports

use serde::{Deserialize, Serialize};

/// A single line item on a credit-card statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Display label as printed on the statement (e.g. "10-28"), never parsed
    pub date: String,
    pub description: String,
    /// Negative = debit/expense, positive = credit/payment
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: Option<&str>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            category: category.map(str::to_string),
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is a payment or credit (positive amount)
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Rewards points block printed on some statements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RewardsSummary {
    pub previous_balance: u64,
    pub earned: u64,
    pub redeemed: u64,
    pub total_points: u64,
}

/// Everything extracted from one statement. Read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementSnapshot {
    pub card_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_variant: Option<String>,
    #[serde(rename = "last_4_digits")]
    pub last_four_digits: String,
    pub billing_cycle: String,
    /// Shown verbatim, never reformatted
    pub payment_due_date: String,
    pub total_balance: f64,
    pub minimum_payment: f64,
    pub credit_limit: f64,
    pub available_credit: f64,
    pub last_statement_balance: f64,
    pub payments_credits: f64,
    #[serde(default, rename = "rewards_summary", skip_serializing_if = "Option::is_none")]
    pub rewards: Option<RewardsSummary>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl StatementSnapshot {
    /// Card number as shown on screen: only the last four digits are visible
    pub fn masked_card_number(&self) -> String {
        format!("**** **** **** {}", self.last_four_digits)
    }

    /// Iterate over expense transactions in statement order
    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_expense())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatementSnapshot {
        StatementSnapshot {
            card_provider: "Test Bank".to_string(),
            card_variant: None,
            last_four_digits: "9876".to_string(),
            billing_cycle: "Jan 1 - Jan 31".to_string(),
            payment_due_date: "Feb 20".to_string(),
            total_balance: 100.0,
            minimum_payment: 25.0,
            credit_limit: 1000.0,
            available_credit: 900.0,
            last_statement_balance: 50.0,
            payments_credits: 50.0,
            rewards: None,
            transactions: vec![
                Transaction::new("01-02", "Coffee", -4.5, Some("Food & Drink")),
                Transaction::new("01-03", "PAYMENT", 50.0, None),
            ],
        }
    }

    #[test]
    fn test_transaction_sign_helpers() {
        let t = Transaction::new("01-02", "Coffee", -4.5, None);
        assert!(t.is_expense());
        assert!(!t.is_credit());
        assert_eq!(t.abs_amount(), 4.5);
    }

    #[test]
    fn test_masked_card_number() {
        assert_eq!(snapshot().masked_card_number(), "**** **** **** 9876");
    }

    #[test]
    fn test_expenses_keep_order() {
        let s = snapshot();
        let descs: Vec<_> = s.expenses().map(|t| t.description.as_str()).collect();
        assert_eq!(descs, vec!["Coffee"]);
    }

    #[test]
    fn test_json_uses_statement_field_names() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["last_4_digits"], "9876");
        assert!(json.get("rewards_summary").is_none());
        // Missing category is omitted rather than written as null
        assert!(json["transactions"][1].get("category").is_none());
    }

    #[test]
    fn test_missing_transactions_default_to_empty() {
        let json = r#"{
            "card_provider": "X", "last_4_digits": "0000", "billing_cycle": "c",
            "payment_due_date": "d", "total_balance": 1.0, "minimum_payment": 1.0,
            "credit_limit": 10.0, "available_credit": 9.0,
            "last_statement_balance": 0.0, "payments_credits": 0.0
        }"#;
        let s: StatementSnapshot = serde_json::from_str(json).unwrap();
        assert!(s.transactions.is_empty());
        assert!(s.rewards.is_none());
    }
}
